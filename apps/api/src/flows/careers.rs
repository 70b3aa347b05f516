//! Career flows: suggestions from quiz answers, and a detailed overview of one career.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::prompts::{CAREER_DETAILS_TEMPLATE, CAREER_SUGGESTIONS_TEMPLATE};
use crate::flows::{invoke, require_text, EmptyReason, FlowOutcome};
use crate::llm_client::prompts::{bullet_list, render};
use crate::llm_client::Inference;
use crate::models::career::{sort_by_suitability, CareerDetails, CareerSuggestion};

/// Typed quiz answers, as handed to the suggestion prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSuggestionsInput {
    pub gender: String,
    pub age: f64,
    pub education_level: String,
    pub location: String,
    pub marks: f64,
    pub interest: String,
    pub aptitude: String,
    pub skills: Vec<String>,
    pub personality: String,
}

impl CareerSuggestionsInput {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("gender", &self.gender),
            ("educationLevel", &self.education_level),
            ("location", &self.location),
            ("interest", &self.interest),
            ("aptitude", &self.aptitude),
            ("personality", &self.personality),
        ] {
            require_text(field, value)?;
        }
        if !(self.age.is_finite() && self.age > 0.0) {
            return Err(AppError::Validation("age must be a positive number".to_string()));
        }
        if !(self.marks.is_finite() && self.marks > 0.0) {
            return Err(AppError::Validation("marks must be a positive number".to_string()));
        }
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::Validation("at least one skill is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionsReply {
    #[serde(default)]
    suggestions: Vec<RawSuggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    #[serde(alias = "name")]
    career: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    suitability_score: f64,
}

impl From<RawSuggestion> for CareerSuggestion {
    fn from(raw: RawSuggestion) -> Self {
        let score = if raw.suitability_score.is_finite() {
            raw.suitability_score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        CareerSuggestion {
            name: raw.career.trim().to_string(),
            description: raw.description,
            suitability_score: score,
        }
    }
}

/// Suggests careers for the quiz answers, sorted by descending suitability.
pub async fn career_suggestions(
    llm: &dyn Inference,
    input: &CareerSuggestionsInput,
) -> Result<FlowOutcome<Vec<CareerSuggestion>>, AppError> {
    input.validate()?;

    let age = input.age.to_string();
    let marks = input.marks.to_string();
    let skills = bullet_list(&input.skills);
    let prompt = render(
        CAREER_SUGGESTIONS_TEMPLATE,
        &[
            ("gender", input.gender.as_str()),
            ("age", age.as_str()),
            ("education_level", input.education_level.as_str()),
            ("location", input.location.as_str()),
            ("marks", marks.as_str()),
            ("interest", input.interest.as_str()),
            ("aptitude", input.aptitude.as_str()),
            ("skills", skills.as_str()),
            ("personality", input.personality.as_str()),
        ],
    );

    let outcome = invoke::<SuggestionsReply>(llm, "career_suggestions", &prompt).await?;

    Ok(outcome.and_then(|reply| {
        let suggestions: Vec<CareerSuggestion> = reply
            .suggestions
            .into_iter()
            .filter(|s| !s.career.trim().is_empty())
            .map(CareerSuggestion::from)
            .collect();
        FlowOutcome::non_empty(sort_by_suitability(suggestions))
    }))
}

/// Detailed overview of a single career. The title is the requested career.
pub async fn career_details(
    llm: &dyn Inference,
    career: &str,
) -> Result<FlowOutcome<CareerDetails>, AppError> {
    require_text("career", career)?;
    let career = career.trim();

    let prompt = render(CAREER_DETAILS_TEMPLATE, &[("career", career)]);
    let outcome = invoke::<CareerDetails>(llm, "career_details", &prompt).await?;

    Ok(outcome.and_then(|mut details| {
        if details.job_duties.is_empty()
            && details.required_skills.is_empty()
            && details.academic_pathway.trim().is_empty()
        {
            return FlowOutcome::Empty(EmptyReason::NoContent);
        }
        details.title = career.to_string();
        FlowOutcome::Ready(details)
    }))
}
