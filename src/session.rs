//! Timed exam attempt over a sampled subset of the bank.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::ExamConfig;
use crate::data::sample_questions;
use crate::models::Question;

/// One timed attempt.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<Question>,
    /// Selected option ids keyed by `Question::id`.
    answers: HashMap<u32, BTreeSet<char>>,
    started_at: Instant,
    time_limit: Duration,
    /// Set on submission.
    ended_at: Option<Instant>,
}

/// Summary of a finished (or running) attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamResults {
    pub correct: usize,
    pub total: usize,
    /// Percentage rounded to the nearest integer.
    pub score: u32,
    pub time_taken: Duration,
}

/// Coarse grading used for colouring the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ExamSession {
    /// Sample a new exam from the bank.
    pub fn start(bank: &[Question], config: &ExamConfig, now: Instant) -> Self {
        let count = config.question_count.min(bank.len());
        let questions = sample_questions(bank, count);
        info!(
            questions = questions.len(),
            bank = bank.len(),
            minutes = config.duration.as_secs() / 60,
            "exam started"
        );
        Self::with_questions(questions, config.duration, now)
    }

    pub fn with_questions(questions: Vec<Question>, time_limit: Duration, now: Instant) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            started_at: now,
            time_limit,
            ended_at: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_submitted(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Add the option to the selection, or remove it if already selected.
    pub fn toggle_answer(&mut self, question_id: u32, option_id: char) {
        if self.is_submitted() {
            return;
        }

        let selected = self.answers.entry(question_id).or_default();
        if !selected.remove(&option_id) {
            selected.insert(option_id);
        }
    }

    pub fn selected(&self, question_id: u32) -> Option<&BTreeSet<char>> {
        self.answers.get(&question_id)
    }

    pub fn is_selected(&self, question_id: u32, option_id: char) -> bool {
        self.selected(question_id)
            .is_some_and(|selected| selected.contains(&option_id))
    }

    /// Number of questions with at least one selected option.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.selected(q.id).is_some_and(|s| !s.is_empty()))
            .count()
    }

    pub fn submit(&mut self, now: Instant) {
        if self.is_submitted() {
            return;
        }
        self.ended_at = Some(now);
        info!(answered = self.answered_count(), "exam submitted");
    }

    /// Whole seconds left, rounded up.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.deadline().saturating_duration_since(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    pub fn is_question_correct(&self, question: &Question) -> bool {
        let empty = BTreeSet::new();
        question.is_answered_by(self.selected(question.id).unwrap_or(&empty))
    }

    pub fn results(&self, now: Instant) -> ExamResults {
        let correct = self
            .questions
            .iter()
            .filter(|q| self.is_question_correct(q))
            .count();
        let total = self.questions.len();
        let score = if total > 0 {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        let end = self.ended_at.unwrap_or(now);
        let elapsed = end.saturating_duration_since(self.started_at);

        ExamResults {
            correct,
            total,
            score,
            time_taken: Duration::from_secs(elapsed.as_secs()),
        }
    }

    fn deadline(&self) -> Instant {
        self.started_at + self.time_limit
    }
}

impl ExamResults {
    pub fn band(&self) -> ScoreBand {
        match self.score {
            70.. => ScoreBand::Good,
            50..=69 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self.score {
            80.. => "Excellent work!",
            50..=79 => "Good effort, keep practicing!",
            _ => "Keep studying, you can do it!",
        }
    }
}

/// Format seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
