// Quiz: the fixed question catalog, per-question answer validation and the
// step-by-step wizard that ends in a career-suggestions request.

pub mod handlers;
pub mod questions;
pub mod validation;
pub mod wizard;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A recorded answer: free text (also numbers, as typed) or a set of choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

/// Answers keyed by question id.
pub type QuizAnswers = BTreeMap<String, Answer>;
