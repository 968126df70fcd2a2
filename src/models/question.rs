use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Lowercase letter `a`..=`d`.
    pub id: char,
    pub text: String,
    pub is_correct: bool,
}

/// A multiple-answer question recovered from a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Surrogate key, unique within one parsed bank.
    pub id: u32,
    /// The number the author wrote in the document. Display only.
    pub original_number: u32,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Ids of every option marked correct.
    pub fn correct_option_ids(&self) -> BTreeSet<char> {
        self.options
            .iter()
            .filter(|option| option.is_correct)
            .map(|option| option.id)
            .collect()
    }

    /// A selection is correct only when it equals the full set of correct options.
    pub fn is_answered_by(&self, selected: &BTreeSet<char>) -> bool {
        *selected == self.correct_option_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: 1,
            original_number: 7,
            text: "Select all the mammals".to_string(),
            options: vec![
                AnswerOption { id: 'a', text: "Dolphin".to_string(), is_correct: true },
                AnswerOption { id: 'b', text: "Shark".to_string(), is_correct: false },
                AnswerOption { id: 'c', text: "Blue Whale".to_string(), is_correct: true },
            ],
        }
    }

    #[test]
    fn test_correct_option_ids() {
        let ids: Vec<char> = question().correct_option_ids().into_iter().collect();
        assert_eq!(ids, vec!['a', 'c']);
    }

    #[test]
    fn test_is_answered_by_requires_exact_set() {
        let q = question();
        assert!(q.is_answered_by(&BTreeSet::from(['a', 'c'])));
        assert!(!q.is_answered_by(&BTreeSet::from(['a'])));
        assert!(!q.is_answered_by(&BTreeSet::from(['a', 'b', 'c'])));
        assert!(!q.is_answered_by(&BTreeSet::new()));
    }

    #[test]
    fn test_question_json_shape() {
        let json = serde_json::to_string(&question()).unwrap();
        assert!(json.contains("\"original_number\":7"));
        assert!(json.contains("\"id\":\"a\""));

        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, question());
    }
}
