use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use super::parser::parse_html;
use crate::models::Question;

/// Error type for loading or saving a question bank.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid question bank JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid question bank {path}: {reason}")]
    InvalidBank { path: String, reason: String },
    #[error(
        "no valid questions found in {0}. Questions must start with 'Question X:' \
         followed by options 'a.', 'b.' etc., with correct answers in bold"
    )]
    NoQuestions(String),
}

/// Load a question bank from an HTML export or a JSON bank file.
///
/// Files with a `.json` extension are read as a serialized bank; anything
/// else is treated as HTML.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;
    // Word exports are often windows-1252; keep what decodes.
    let content = String::from_utf8_lossy(&bytes);

    let questions = if is_json(path) {
        let questions =
            serde_json::from_str::<Vec<Question>>(&content).map_err(|source| LoadError::Json {
                path: shown.clone(),
                source,
            })?;
        check_bank(&questions).map_err(|reason| LoadError::InvalidBank {
            path: shown.clone(),
            reason,
        })?;
        questions
    } else {
        parse_html(&content)
    };

    if questions.is_empty() {
        return Err(LoadError::NoQuestions(shown));
    }

    info!(path = %shown, questions = questions.len(), "loaded question bank");
    Ok(questions)
}

/// Write a bank as pretty-printed JSON that [`load_bank`] can read back.
pub fn save_bank_json<P: AsRef<Path>>(questions: &[Question], path: P) -> Result<(), LoadError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let json = serde_json::to_string_pretty(questions).map_err(|source| LoadError::Json {
        path: shown.clone(),
        source,
    })?;
    fs::write(path, json).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;

    info!(path = %shown, questions = questions.len(), "exported question bank");
    Ok(())
}

// Parsed banks hold these by construction; hand-edited JSON may not.
fn check_bank(questions: &[Question]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id) {
            return Err(format!("question id {} is used more than once", question.id));
        }
        if question.options.is_empty() {
            return Err(format!("question id {} has no options", question.id));
        }
        let mut letters = HashSet::new();
        if let Some(option) = question.options.iter().find(|o| !letters.insert(o.id)) {
            return Err(format!(
                "question id {} repeats option {}",
                question.id, option.id
            ));
        }
    }
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bold_quiz_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_load_html_bank() {
        let path = temp_path("bank.htm");
        fs::write(
            &path,
            "<html><body><p>Question 1: Q</p><p><b>a. yes</b></p><p>b. no</p></body></html>",
        )
        .unwrap();

        let questions = load_bank(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].options[0].is_correct);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let path = temp_path("latin1.html");
        let mut bytes = b"<p>Question 2: Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"?</p><p>a. Oui</p>");
        fs::write(&path, bytes).unwrap();

        let questions = load_bank(&path).unwrap();
        assert_eq!(questions[0].original_number, 2);
        assert!(questions[0].text.starts_with("Caf"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_bank_is_an_error() {
        let path = temp_path("empty.html");
        fs::write(&path, "<p>Nothing to see here</p>").unwrap();

        assert!(matches!(load_bank(&path), Err(LoadError::NoQuestions(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_bank(temp_path("does_not_exist.html"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_json_export_reloads() {
        let html_path = temp_path("export_src.html");
        let json_path = temp_path("export.json");
        fs::write(
            &html_path,
            "<p>Question 3: Q</p><p>a. x</p><p><strong>b. y</strong></p>",
        )
        .unwrap();

        let parsed = load_bank(&html_path).unwrap();
        save_bank_json(&parsed, &json_path).unwrap();
        let reloaded = load_bank(&json_path).unwrap();
        assert_eq!(parsed, reloaded);

        let _ = fs::remove_file(&html_path);
        let _ = fs::remove_file(&json_path);
    }

    #[test]
    fn test_json_bank_with_repeated_ids_is_rejected() {
        let path = temp_path("dup_ids.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "original_number": 1, "text": "A",
                 "options": [{"id": "a", "text": "x", "is_correct": true}]},
                {"id": 1, "original_number": 2, "text": "B",
                 "options": [{"id": "a", "text": "y", "is_correct": true}]}
            ]"#,
        )
        .unwrap();

        match load_bank(&path) {
            Err(LoadError::InvalidBank { reason, .. }) => assert!(reason.contains("id 1")),
            other => panic!("expected InvalidBank, got {:?}", other.map(|q| q.len())),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_bank_without_options_is_rejected() {
        let path = temp_path("no_options.json");
        fs::write(
            &path,
            r#"[{"id": 4, "original_number": 4, "text": "A", "options": []}]"#,
        )
        .unwrap();

        assert!(matches!(load_bank(&path), Err(LoadError::InvalidBank { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let path = temp_path("broken.json");
        fs::write(&path, "[{\"id\": 1").unwrap();

        assert!(matches!(load_bank(&path), Err(LoadError::Json { .. })));

        let _ = fs::remove_file(&path);
    }
}
