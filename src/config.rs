use std::time::Duration;

pub const DEFAULT_QUESTION_COUNT: usize = 42;
pub const DEFAULT_DURATION_MINUTES: u64 = 45;

/// Settings for one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamConfig {
    /// Upper bound on questions drawn from the bank.
    pub question_count: usize,
    pub duration: Duration,
}

impl ExamConfig {
    pub fn new(question_count: usize, duration_minutes: u64) -> Self {
        Self {
            question_count,
            duration: Duration::from_secs(duration_minutes.saturating_mul(60)),
        }
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT, DEFAULT_DURATION_MINUTES)
    }
}
