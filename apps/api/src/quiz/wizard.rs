//! Quiz wizard: one question per step.
//!
//! Forward movement is gated on the current answer validating; backward movement is
//! free and saturates at the first step. Submission is only allowed from the last step
//! and re-validates everything. A rejected operation leaves the wizard untouched.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::careers::CareerSuggestionsInput;
use crate::quiz::questions::{self, Question, QUESTIONS};
use crate::quiz::validation::{parse_positive, validate_all, validate_answer};
use crate::quiz::{Answer, QuizAnswers};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizWizard {
    pub step: usize,
    #[serde(default)]
    pub answers: QuizAnswers,
}

impl QuizWizard {
    /// Step index within the catalog; stored snapshots may carry any value.
    pub fn clamped_step(&self) -> usize {
        self.step.min(QUESTIONS.len() - 1)
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.clamped_step()]
    }

    pub fn is_last_step(&self) -> bool {
        self.clamped_step() + 1 == QUESTIONS.len()
    }

    pub fn progress_percent(&self) -> u32 {
        (((self.clamped_step() + 1) * 100) as f64 / QUESTIONS.len() as f64).round() as u32
    }

    /// Records an answer for any question in the catalog.
    pub fn answer(&mut self, question_id: &str, answer: Answer) -> Result<(), AppError> {
        let question = questions::find(question_id)
            .ok_or_else(|| AppError::Validation(format!("unknown question '{question_id}'")))?;
        self.answers.insert(question.id.to_string(), answer);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), AppError> {
        if self.is_last_step() {
            return Err(AppError::Validation(
                "already on the last question; submit the quiz instead".to_string(),
            ));
        }
        let question = self.current();
        validate_answer(question, self.answers.get(question.id))
            .map_err(|field| AppError::InvalidAnswers(vec![field]))?;
        self.step += 1;
        Ok(())
    }

    pub fn previous(&mut self) {
        self.step = self.clamped_step().saturating_sub(1);
    }

    /// Validates every answer and converts them into the suggestion flow's input.
    pub fn submission(&self) -> Result<CareerSuggestionsInput, AppError> {
        if !self.is_last_step() {
            return Err(AppError::Validation(
                "the quiz can only be submitted from the last question".to_string(),
            ));
        }
        validate_all(&self.answers)?;
        to_suggestions_input(&self.answers)
    }
}

fn text(answers: &QuizAnswers, id: &str) -> Result<String, AppError> {
    match answers.get(id) {
        Some(Answer::Text(value)) => Ok(value.trim().to_string()),
        _ => Err(AppError::Validation(format!("'{id}' must be a single answer"))),
    }
}

fn number(answers: &QuizAnswers, id: &str) -> Result<f64, AppError> {
    parse_positive(&text(answers, id)?)
        .ok_or_else(|| AppError::Validation(format!("'{id}' must be a positive number")))
}

fn choices(answers: &QuizAnswers, id: &str) -> Result<Vec<String>, AppError> {
    match answers.get(id) {
        Some(Answer::Choices(values)) => Ok(values.clone()),
        _ => Err(AppError::Validation(format!("'{id}' must be a list of choices"))),
    }
}

fn to_suggestions_input(answers: &QuizAnswers) -> Result<CareerSuggestionsInput, AppError> {
    Ok(CareerSuggestionsInput {
        gender: text(answers, "gender")?,
        age: number(answers, "age")?,
        education_level: text(answers, "educationLevel")?,
        location: text(answers, "location")?,
        marks: number(answers, "marks")?,
        interest: text(answers, "interest")?,
        aptitude: text(answers, "aptitude")?,
        skills: choices(answers, "skills")?,
        personality: text(answers, "personality")?,
    })
}
