use crate::models::{AnswerOption, Question};

/// Built-in bank used until a real one is imported.
pub fn sample_bank() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            original_number: 1,
            text: "Which of the following is a React Hook?".to_string(),
            options: options(&[
                ('a', "useState", true),
                ('b', "getState", false),
                ('c', "useEffect", true),
                ('d', "ngOnInit", false),
            ]),
        },
        Question {
            id: 2,
            original_number: 2,
            text: "What is the capital of France?".to_string(),
            options: options(&[
                ('a', "Berlin", false),
                ('b', "London", false),
                ('c', "Madrid", false),
                ('d', "Paris", true),
            ]),
        },
    ]
}

fn options(entries: &[(char, &str, bool)]) -> Vec<AnswerOption> {
    entries
        .iter()
        .map(|&(id, text, is_correct)| AnswerOption {
            id,
            text: text.to_string(),
            is_correct,
        })
        .collect()
}
