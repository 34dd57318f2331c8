//! Structural check of generated quiz GML.
//!
//! The extractor only guarantees that a block starts and ends where expected.
//! This module looks inside the block and reports what a game object would
//! trip over at runtime. Findings are advisory; nothing here rejects code.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Number of questions the prompt asks for.
pub const QUESTION_COUNT: usize = 3;

/// Number of answer options per question.
pub const ANSWERS_PER_QUESTION: usize = 3;

static QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"questions\[(\d+)\]\s*=\s*"(?:[^"\\]|\\.)*"\s*;"#).expect("valid question regex")
});

static ANSWERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)answers\[(\d+)\]\s*=\s*\[(.*?)\]\s*;").expect("valid answers regex")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid quoted string regex"));

static CORRECT_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"correctAnswer\[(\d+)\]\s*=\s*([^;\n]*);").expect("valid correct answer regex")
});

/// A structural problem found in generated quiz code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaIssue {
    MissingQuestion { index: usize },
    MissingAnswers { index: usize },
    WrongAnswerCount { index: usize, found: usize },
    MissingCorrectAnswer { index: usize },
    NonNumericCorrectAnswer { index: usize, value: String },
    CorrectAnswerOutOfRange { index: usize, value: usize },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::MissingQuestion { index } => {
                write!(f, "questions[{index}] is missing")
            }
            SchemaIssue::MissingAnswers { index } => write!(f, "answers[{index}] is missing"),
            SchemaIssue::WrongAnswerCount { index, found } => write!(
                f,
                "answers[{index}] has {found} options, expected {ANSWERS_PER_QUESTION}"
            ),
            SchemaIssue::MissingCorrectAnswer { index } => {
                write!(f, "correctAnswer[{index}] is missing")
            }
            SchemaIssue::NonNumericCorrectAnswer { index, value } => {
                write!(f, "correctAnswer[{index}] is not a number: {value}")
            }
            SchemaIssue::CorrectAnswerOutOfRange { index, value } => write!(
                f,
                "correctAnswer[{index}] = {value} is outside 0..{ANSWERS_PER_QUESTION}"
            ),
        }
    }
}

/// Check generated code against the quiz layout.
///
/// Returns an empty vector when every question has its text, a full set of
/// answer options and a numeric correct-answer index in range.
pub fn validate_gml(code: &str) -> Vec<SchemaIssue> {
    let questions: Vec<usize> = QUESTION
        .captures_iter(code)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    let answers: HashMap<usize, usize> = ANSWERS
        .captures_iter(code)
        .filter_map(|caps| {
            let index = caps[1].parse().ok()?;
            Some((index, QUOTED.find_iter(&caps[2]).count()))
        })
        .collect();

    let correct: HashMap<usize, String> = CORRECT_ANSWER
        .captures_iter(code)
        .filter_map(|caps| Some((caps[1].parse().ok()?, caps[2].trim().to_string())))
        .collect();

    let mut issues = Vec::new();

    for index in 0..QUESTION_COUNT {
        if !questions.contains(&index) {
            issues.push(SchemaIssue::MissingQuestion { index });
        }

        match answers.get(&index) {
            None => issues.push(SchemaIssue::MissingAnswers { index }),
            Some(&found) if found != ANSWERS_PER_QUESTION => {
                issues.push(SchemaIssue::WrongAnswerCount { index, found })
            }
            Some(_) => {}
        }

        match correct.get(&index) {
            None => issues.push(SchemaIssue::MissingCorrectAnswer { index }),
            Some(value) => match value.parse::<usize>() {
                Ok(v) if v < ANSWERS_PER_QUESTION => {}
                Ok(v) => issues.push(SchemaIssue::CorrectAnswerOutOfRange { index, value: v }),
                Err(_) => issues.push(SchemaIssue::NonNumericCorrectAnswer {
                    index,
                    value: value.clone(),
                }),
            },
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"questions = [];
questions[0] = "What is 2 + 2?";
questions[1] = "Capital of France?";
questions[2] = "Largest planet?";

answers = [];
answers[0] = ["3", "4", "5"];
answers[1] = ["Paris", "Rome", "Madrid"];
answers[2] = ["Mars", "Earth", "Jupiter"];

currentQuestion = 0;

correctAnswer = [];
correctAnswer[0] = 1;
correctAnswer[1] = 0;
correctAnswer[2] = 2;

soundright = -1;
soundwrong = -1;"#;

    #[test]
    fn test_valid_quiz_has_no_issues() {
        assert!(validate_gml(VALID).is_empty());
    }

    #[test]
    fn test_escaped_quotes_in_answers() {
        let code = VALID.replace(r#"["3", "4", "5"]"#, r#"["say \"hi\"", "4", "5"]"#);
        assert!(validate_gml(&code).is_empty());
    }

    #[test]
    fn test_missing_question_detected() {
        let code = VALID.replace("questions[1] = \"Capital of France?\";\n", "");
        assert_eq!(
            validate_gml(&code),
            vec![SchemaIssue::MissingQuestion { index: 1 }]
        );
    }

    #[test]
    fn test_wrong_answer_count_detected() {
        let code = VALID.replace(r#"["Mars", "Earth", "Jupiter"]"#, r#"["Mars", "Jupiter"]"#);
        assert_eq!(
            validate_gml(&code),
            vec![SchemaIssue::WrongAnswerCount { index: 2, found: 2 }]
        );
    }

    #[test]
    fn test_bracketed_correct_answer_detected() {
        let code = VALID.replace("correctAnswer[0] = 1;", "correctAnswer[0] = [1];");
        assert_eq!(
            validate_gml(&code),
            vec![SchemaIssue::NonNumericCorrectAnswer {
                index: 0,
                value: "[1]".to_string()
            }]
        );
    }

    #[test]
    fn test_out_of_range_correct_answer_detected() {
        let code = VALID.replace("correctAnswer[2] = 2;", "correctAnswer[2] = 3;");
        assert_eq!(
            validate_gml(&code),
            vec![SchemaIssue::CorrectAnswerOutOfRange { index: 2, value: 3 }]
        );
    }

    #[test]
    fn test_free_text_reports_everything_missing() {
        let issues = validate_gml("I cannot help with that.");
        assert_eq!(issues.len(), QUESTION_COUNT * 3);
        assert_eq!(issues[0], SchemaIssue::MissingQuestion { index: 0 });
    }

    #[test]
    fn test_issue_display() {
        let issue = SchemaIssue::WrongAnswerCount { index: 1, found: 4 };
        assert_eq!(issue.to_string(), "answers[1] has 4 options, expected 3");
    }
}
