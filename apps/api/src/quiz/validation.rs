//! Per-question answer validation.
//!
//! Text and single-choice answers must be non-blank (single-choice must be one of
//! the options), numbers must parse as a finite value above zero, multi-choice needs
//! between one and `max` distinct options.

use std::collections::HashSet;

use crate::errors::{AppError, FieldError};
use crate::quiz::questions::{Question, QuestionKind, QUESTIONS};
use crate::quiz::{Answer, QuizAnswers};

const REQUIRED: &str = "This field is required.";
const INVALID_NUMBER: &str = "Please enter a valid number.";
const NOT_AN_OPTION: &str = "Please choose one of the listed options.";
const SELECT_AT_LEAST_ONE: &str = "Please select at least one option.";

/// Parses a numeric answer. `None` unless it is finite and above zero.
pub fn parse_positive(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

pub fn validate_answer(question: &Question, answer: Option<&Answer>) -> Result<(), FieldError> {
    let fail = |message: &str| Err(FieldError::new(question.id, message));

    match (question.kind, answer) {
        (_, None) => fail(REQUIRED),

        (QuestionKind::Text, Some(Answer::Text(text))) => {
            if text.trim().is_empty() {
                fail(REQUIRED)
            } else {
                Ok(())
            }
        }

        (QuestionKind::SingleChoice { options }, Some(Answer::Text(choice))) => {
            if choice.trim().is_empty() {
                fail(REQUIRED)
            } else if !options.contains(&choice.as_str()) {
                fail(NOT_AN_OPTION)
            } else {
                Ok(())
            }
        }

        (QuestionKind::Number, Some(Answer::Text(text))) => match parse_positive(text) {
            Some(_) => Ok(()),
            None => fail(INVALID_NUMBER),
        },

        (QuestionKind::MultiChoice { options, max }, Some(Answer::Choices(choices))) => {
            let distinct: HashSet<&str> = choices.iter().map(String::as_str).collect();
            if distinct.is_empty() {
                fail(SELECT_AT_LEAST_ONE)
            } else if distinct.len() != choices.len() {
                fail("Each option can only be selected once.")
            } else if distinct.len() > max {
                Err(FieldError::new(
                    question.id,
                    format!("You can only select up to {max} options."),
                ))
            } else if !distinct.iter().all(|c| options.contains(c)) {
                fail(NOT_AN_OPTION)
            } else {
                Ok(())
            }
        }

        (QuestionKind::MultiChoice { .. }, Some(Answer::Text(_))) => fail(SELECT_AT_LEAST_ONE),
        (_, Some(Answer::Choices(_))) => fail("Expected a single answer."),
    }
}

/// Validates every question; reports all failures at once.
pub fn validate_all(answers: &QuizAnswers) -> Result<(), AppError> {
    let errors: Vec<FieldError> = QUESTIONS
        .iter()
        .filter_map(|q| validate_answer(q, answers.get(q.id)).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidAnswers(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::questions::find;

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    fn choices(items: &[&str]) -> Answer {
        Answer::Choices(items.iter().map(|s| s.to_string()).collect())
    }

    fn question(id: &str) -> &'static Question {
        find(id).unwrap()
    }

    #[test]
    fn test_text_requires_content() {
        let q = question("location");
        assert!(validate_answer(q, Some(&text("Kerala"))).is_ok());
        let err = validate_answer(q, Some(&text("   "))).unwrap_err();
        assert_eq!(err.field, "location");
        assert_eq!(err.message, REQUIRED);
        assert!(validate_answer(q, None).is_err());
    }

    #[test]
    fn test_single_choice_must_be_an_option() {
        let q = question("gender");
        assert!(validate_answer(q, Some(&text("Female"))).is_ok());
        assert_eq!(
            validate_answer(q, Some(&text("Robot"))).unwrap_err().message,
            NOT_AN_OPTION
        );
    }

    #[test]
    fn test_number_must_be_positive() {
        let q = question("age");
        assert!(validate_answer(q, Some(&text("18"))).is_ok());
        assert!(validate_answer(q, Some(&text(" 17.5 "))).is_ok());
        for bad in ["0", "-3", "abc", "", "NaN", "inf"] {
            assert_eq!(
                validate_answer(q, Some(&text(bad))).unwrap_err().message,
                INVALID_NUMBER,
                "{bad}"
            );
        }
    }

    #[test]
    fn test_multi_choice_bounds() {
        let q = question("skills");
        assert!(validate_answer(q, Some(&choices(&["Creative expression and design"]))).is_ok());
        assert!(validate_answer(q, Some(&choices(&[]))).is_err());
        assert!(validate_answer(
            q,
            Some(&choices(&[
                "Problem-solving and logical thinking",
                "Creative expression and design",
                "Data analysis and interpretation",
                "Communication and public speaking",
            ]))
        )
        .is_err());
        assert!(validate_answer(q, Some(&choices(&["Juggling"]))).is_err());
        assert!(validate_answer(
            q,
            Some(&choices(&[
                "Creative expression and design",
                "Creative expression and design"
            ]))
        )
        .is_err());
    }

    #[test]
    fn test_validate_all_reports_every_missing_field() {
        let mut answers = QuizAnswers::new();
        answers.insert("gender".to_string(), text("Male"));
        let Err(AppError::InvalidAnswers(errors)) = validate_all(&answers) else {
            panic!("expected invalid answers");
        };
        assert_eq!(errors.len(), QUESTIONS.len() - 1);
        assert!(errors.iter().all(|e| e.field != "gender"));
    }
}
