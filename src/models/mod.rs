mod question;

pub use question::{AnswerOption, Question};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Import,
    Quiz,
    Result,
}
