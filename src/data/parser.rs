//! Question bank import from word-processor HTML exports.
//!
//! The document is read as a flat sequence of blocks (`p`, `div` and `li`
//! elements in document order). A block whose text starts with
//! `Question <N>:` opens a question; a block starting with `a.` .. `d.`
//! (or `a)` .. `d)`) adds an option to the open question. The only signal
//! for a correct answer is bold styling somewhere inside the option block.
//!
//! Parsing is best-effort and never fails: input without recognizable
//! questions yields an empty bank.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::models::{AnswerOption, Question};

static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*question\s+([0-9]+)\s*:").expect("static regex must compile")
});

static OPTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*([a-d])[.)]\s+").expect("static regex must compile"));

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, div, li").expect("static selector must compile"));

static BOLD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b, strong").expect("static selector must compile"));

static STYLED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[style]").expect("static selector must compile"));

/// Parse an HTML document into a question bank.
pub fn parse_html(markup: &str) -> Vec<Question> {
    let document = Html::parse_document(markup);

    let questions = document
        .select(&BLOCK_SELECTOR)
        .map(Block::from_element)
        .fold(ParseState::new(), |state, block| state.step(&block))
        .finish();

    debug!(questions = questions.len(), "parsed question bank");
    questions
}

/// One logical line of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Flattened, trimmed visible text.
    pub text: String,
    pub is_bold: bool,
    /// Wraps other blocks; its text spans several lines.
    pub contains_blocks: bool,
}

impl Block {
    pub fn new(text: impl Into<String>, is_bold: bool) -> Self {
        Self {
            text: text.into().trim().to_string(),
            is_bold,
            contains_blocks: false,
        }
    }

    /// A block holding nested `p`, `div` or `li` elements.
    pub fn container(text: impl Into<String>) -> Self {
        Self {
            contains_blocks: true,
            ..Self::new(text, false)
        }
    }

    fn from_element(element: ElementRef<'_>) -> Self {
        let text: String = element.text().collect();
        let text = text.trim().to_string();
        let contains_blocks = element.select(&BLOCK_SELECTOR).next().is_some();
        // Bold only matters on option lines.
        let is_bold =
            !contains_blocks && OPTION_START.is_match(&text) && has_bold_marker(element);
        Self {
            text,
            is_bold,
            contains_blocks,
        }
    }
}

fn has_bold_marker(element: ElementRef<'_>) -> bool {
    if element.select(&BOLD_SELECTOR).next().is_some() {
        return true;
    }

    let own_style = element.value().attr("style").into_iter();
    let descendant_styles = element
        .select(&STYLED_SELECTOR)
        .filter_map(|styled| styled.value().attr("style"));
    if own_style.chain(descendant_styles).any(declares_bold_weight) {
        return true;
    }

    let inner = element.inner_html().to_ascii_lowercase();
    inner.contains("<b>") || inner.contains("<strong>")
}

fn declares_bold_weight(style: &str) -> bool {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .any(|(property, value)| {
            property.trim().eq_ignore_ascii_case("font-weight") && is_bold_weight(value)
        })
}

fn is_bold_weight(value: &str) -> bool {
    let value = value.trim().trim_end_matches("!important").trim();
    value.eq_ignore_ascii_case("bold")
        || value.eq_ignore_ascii_case("bolder")
        || value.parse::<u16>().is_ok_and(|weight| weight >= 600)
}

/// Accumulator threaded through the block sequence.
#[derive(Debug, Default)]
pub struct ParseState {
    finalized: Vec<Question>,
    in_progress: Option<Question>,
    next_id: u32,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one block to the accumulator.
    pub fn step(mut self, block: &Block) -> Self {
        if let Some(captures) = QUESTION_START.captures(&block.text) {
            self.begin_question(&block.text, &captures);
        } else if !block.contains_blocks {
            // A wrapper's options arrive again through its nested blocks.
            if let Some(captures) = OPTION_START.captures(&block.text) {
                self.add_option(&block.text, &captures, block.is_bold);
            }
        }
        self
    }

    fn begin_question(&mut self, text: &str, captures: &Captures<'_>) {
        self.finalize_in_progress();

        // The digit run is ASCII, so the only possible failure is overflow.
        let original_number = captures[1].parse::<u32>().unwrap_or(u32::MAX);
        let stem = text[captures[0].len()..].trim();
        let stem = if stem.is_empty() { text } else { stem };

        self.next_id += 1;
        self.in_progress = Some(Question {
            id: self.next_id,
            original_number,
            text: stem.to_string(),
            options: Vec::new(),
        });
    }

    fn add_option(&mut self, text: &str, captures: &Captures<'_>, is_correct: bool) {
        let Some(question) = self.in_progress.as_mut() else {
            return;
        };

        let id = captures[1]
            .chars()
            .next()
            .map_or('a', |letter| letter.to_ascii_lowercase());
        if question.options.iter().any(|option| option.id == id) {
            warn!(
                question = question.original_number,
                option = %id,
                "skipping repeated option letter"
            );
            return;
        }

        question.options.push(AnswerOption {
            id,
            text: text[captures[0].len()..].trim().to_string(),
            is_correct,
        });
    }

    /// Close the open question, if any, and return the bank.
    pub fn finish(mut self) -> Vec<Question> {
        self.finalize_in_progress();
        self.finalized
    }

    fn finalize_in_progress(&mut self) {
        let Some(question) = self.in_progress.take() else {
            return;
        };
        if question.options.is_empty() {
            debug!(
                question = question.original_number,
                "dropping question without options"
            );
        } else {
            self.finalized.push(question);
        }
    }
}
