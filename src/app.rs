use std::time::Instant;

use tracing::{info, warn};

use crate::config::ExamConfig;
use crate::data::{load_bank, sample_bank};
use crate::models::{AppState, Question};
use crate::session::{ExamResults, ExamSession};

const TIME_UP_NOTICE: &str = "Time's up! Your exam has been submitted automatically.";

pub struct App {
    pub state: AppState,
    bank: Vec<Question>,
    config: ExamConfig,
    exam: Option<ExamSession>,
    current_question_index: usize,
    selected_option: usize,
    confirming_submit: bool,
    notice: Option<String>,
    result_scroll: usize,
    import_input: String,
    import_error: Option<String>,
}

impl App {
    pub fn new(config: ExamConfig) -> Self {
        Self::with_bank(sample_bank(), config)
    }

    pub fn with_bank(bank: Vec<Question>, config: ExamConfig) -> Self {
        Self {
            state: AppState::Welcome,
            bank,
            config,
            exam: None,
            current_question_index: 0,
            selected_option: 0,
            confirming_submit: false,
            notice: None,
            result_scroll: 0,
            import_input: String::new(),
            import_error: None,
        }
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    pub fn exam(&self) -> Option<&ExamSession> {
        self.exam.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.exam
            .as_ref()
            .and_then(|exam| exam.questions().get(self.current_question_index))
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.exam.as_ref().map_or(0, |exam| exam.questions().len())
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn is_confirming_submit(&self) -> bool {
        self.confirming_submit
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn import_input(&self) -> &str {
        &self.import_input
    }

    pub fn import_error(&self) -> Option<&str> {
        self.import_error.as_deref()
    }

    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.exam.as_ref().map_or(0, |exam| exam.remaining_secs(now))
    }

    pub fn results(&self, now: Instant) -> Option<ExamResults> {
        self.exam.as_ref().map(|exam| exam.results(now))
    }

    pub fn start_quiz(&mut self, now: Instant) {
        self.exam = Some(ExamSession::start(&self.bank, &self.config, now));
        self.current_question_index = 0;
        self.selected_option = 0;
        self.confirming_submit = false;
        self.notice = None;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Toggle the option under the cursor.
    pub fn toggle_selected_option(&mut self) {
        let Some((question_id, option_id)) = self.current_question().and_then(|q| {
            q.options
                .get(self.selected_option)
                .map(|option| (q.id, option.id))
        }) else {
            return;
        };

        if let Some(exam) = self.exam.as_mut() {
            exam.toggle_answer(question_id, option_id);
        }
    }

    pub fn next_question(&mut self) {
        if self.current_question_index + 1 < self.total_questions() {
            self.current_question_index += 1;
            self.selected_option = 0;
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question_index > 0 {
            self.current_question_index -= 1;
            self.selected_option = 0;
        }
    }

    pub fn request_submit(&mut self) {
        self.confirming_submit = true;
    }

    pub fn cancel_submit(&mut self) {
        self.confirming_submit = false;
    }

    pub fn submit_exam(&mut self, now: Instant) {
        if let Some(exam) = self.exam.as_mut() {
            exam.submit(now);
        }
        self.confirming_submit = false;
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    /// Advance the clock; submits the exam once time runs out.
    pub fn tick(&mut self, now: Instant) {
        if self.state != AppState::Quiz {
            return;
        }

        let expired = self
            .exam
            .as_ref()
            .is_some_and(|exam| !exam.is_submitted() && exam.is_expired(now));
        if expired {
            info!("time limit reached");
            self.submit_exam(now);
            self.notice = Some(TIME_UP_NOTICE.to_string());
        }
    }

    pub fn scroll_results_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.exam = None;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.confirming_submit = false;
        self.notice = None;
        self.result_scroll = 0;
    }

    pub fn open_import(&mut self) {
        self.import_input.clear();
        self.import_error = None;
        self.state = AppState::Import;
    }

    pub fn push_import_char(&mut self, c: char) {
        self.import_input.push(c);
    }

    pub fn pop_import_char(&mut self) {
        self.import_input.pop();
    }

    pub fn cancel_import(&mut self) {
        self.import_error = None;
        self.state = AppState::Welcome;
    }

    /// Load the bank at the typed path; stays on the import screen on failure.
    pub fn submit_import(&mut self) {
        let path = self.import_input.trim();
        if path.is_empty() {
            self.import_error = Some("Enter the path of an .html or .json file".to_string());
            return;
        }

        match load_bank(path) {
            Ok(bank) => {
                self.bank = bank;
                self.import_error = None;
                self.state = AppState::Welcome;
            }
            Err(err) => {
                warn!(error = %err, "import failed");
                self.import_error = Some(err.to_string());
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(ExamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use super::*;

    fn started_app(now: Instant) -> App {
        let mut app = App::new(ExamConfig::new(42, 1));
        app.start_quiz(now);
        app
    }

    #[test]
    fn test_start_quiz() {
        let app = started_app(Instant::now());
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.total_questions(), 2);
        assert_eq!(app.current_question_number(), 1);
        assert!(app.current_question().is_some());
    }

    #[test]
    fn test_option_cursor_wraps() {
        let mut app = started_app(Instant::now());
        app.select_previous_option();
        assert_eq!(app.selected_option(), 3);
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_question_navigation_is_bounded() {
        let mut app = started_app(Instant::now());
        app.previous_question();
        assert_eq!(app.current_question_number(), 1);
        app.next_question();
        app.next_question();
        assert_eq!(app.current_question_number(), 2);
    }

    #[test]
    fn test_toggle_and_submit() {
        let now = Instant::now();
        let mut app = started_app(now);
        let question_id = app.current_question().map(|q| q.id).unwrap();

        app.toggle_selected_option();
        assert!(app.exam().unwrap().is_selected(question_id, 'a'));

        app.request_submit();
        assert!(app.is_confirming_submit());
        app.cancel_submit();
        assert_eq!(app.state, AppState::Quiz);

        app.request_submit();
        app.submit_exam(now);
        assert_eq!(app.state, AppState::Result);
        assert!(app.exam().unwrap().is_submitted());
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_tick_submits_on_expiry() {
        let now = Instant::now();
        let mut app = started_app(now);

        app.tick(now + Duration::from_secs(30));
        assert_eq!(app.state, AppState::Quiz);

        app.tick(now + Duration::from_secs(61));
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.notice(), Some(TIME_UP_NOTICE));
        assert_eq!(app.results(now).unwrap().time_taken, Duration::from_secs(61));
    }

    #[test]
    fn test_restart_returns_home() {
        let mut app = started_app(Instant::now());
        app.scroll_results_down();
        app.restart();
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.exam().is_none());
        assert_eq!(app.result_scroll(), 0);
    }

    #[test]
    fn test_import_flow() {
        let path =
            std::env::temp_dir().join(format!("bold_quiz_app_{}.html", std::process::id()));
        fs::write(
            &path,
            "<p>Question 10: A</p><p><b>a. x</b></p><p>Question 11: B</p><p>b) y</p>\
             <p>Question 12: C</p><p>c. z</p>",
        )
        .unwrap();

        let mut app = App::default();
        app.open_import();
        assert_eq!(app.state, AppState::Import);

        app.submit_import();
        assert!(app.import_error().is_some());

        for c in path.display().to_string().chars() {
            app.push_import_char(c);
        }
        app.submit_import();
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.bank().len(), 3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_import_reports_empty_bank() {
        let path = std::env::temp_dir()
            .join(format!("bold_quiz_app_empty_{}.html", std::process::id()));
        fs::write(&path, "<p>no questions</p>").unwrap();

        let mut app = App::default();
        app.open_import();
        for c in path.display().to_string().chars() {
            app.push_import_char(c);
        }
        app.submit_import();
        assert_eq!(app.state, AppState::Import);
        assert!(app.import_error().unwrap().contains("no valid questions"));
        assert_eq!(app.bank().len(), 2);

        app.cancel_import();
        assert_eq!(app.state, AppState::Welcome);

        let _ = fs::remove_file(&path);
    }
}
