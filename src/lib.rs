//! # bold-quiz
//!
//! A terminal exam trainer for question banks exported from a word
//! processor as HTML. Questions start with `Question N:`, options with
//! `a.` .. `d.`, and correct options are the bold ones.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bold_quiz::{ExamConfig, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Import questions from a "Save as Web Page" export
//!     let quiz = Quiz::from_path("bank.htm", ExamConfig::default())?;
//!
//!     // Run timed exams in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The parser and sampler can be used on their own:
//!
//! ```rust
//! use bold_quiz::{parse_html, sample_questions};
//!
//! let bank = parse_html("<p>Question 1: Pick one</p><p><b>a. this</b></p><p>b. that</p>");
//! assert!(bank[0].options[0].is_correct);
//!
//! let exam = sample_questions(&bank, 42);
//! assert_eq!(exam.len(), 1);
//! ```

mod app;
mod config;
mod data;
mod models;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use config::{DEFAULT_DURATION_MINUTES, DEFAULT_QUESTION_COUNT, ExamConfig};
pub use data::{
    Block, LoadError, ParseState, load_bank, parse_html, sample_bank, sample_questions,
    sample_questions_with_rng, save_bank_json,
};
pub use models::{AnswerOption, AppState, Question};
pub use session::{ExamResults, ExamSession, ScoreBand, format_clock};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Error type for quiz operations.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz over a question bank.
    pub fn new(bank: Vec<Question>, config: ExamConfig) -> Self {
        Self {
            app: App::with_bank(bank, config),
        }
    }

    /// Load the bank from an HTML export or a JSON bank file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bold_quiz::{ExamConfig, Quiz};
    ///
    /// let quiz = Quiz::from_path("bank.htm", ExamConfig::default()).expect("Failed to load quiz");
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, config: ExamConfig) -> Result<Self, QuizError> {
        let bank = load_bank(path)?;
        Ok(Self::new(bank, config))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::enter()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::leave()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<(), QuizError> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::render(frame, app, now))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code, Instant::now()) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key, now),
        AppState::Import => handle_import_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key, now),
        AppState::Result => handle_result_input(app, key, now),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz(now);
            false
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            app.open_import();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_import_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => app.submit_import(),
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Backspace => app.pop_import_char(),
        KeyCode::Char(c) => app.push_import_char(c),
        _ => {}
    }
    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    if app.is_confirming_submit() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.submit_exam(now),
            _ => app.cancel_submit(),
        }
        return false;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_option(),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next_question(),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.request_submit(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start_quiz(now);
            false
        }
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Esc => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
