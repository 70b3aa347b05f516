//! Snapshot codec: `{ "version": N, "state": { ... } }`.
//!
//! Version 0 is the legacy shape written before the state was versioned by contract:
//! suggestions wrapped as `{ suggestions: [{ career, description, suitabilityScore }] }`,
//! college recommendations wrapped as `{ collegeRecommendations: [...] }`, saved
//! colleges as `{ collegeName, reason }`, and a chosen career without a title.
//! It is migrated on load; nothing ever writes it back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::career::{sort_by_suitability, CareerDetails, CareerSuggestion};
use crate::models::college::{CollegeRecommendation, SavedCollege};
use crate::models::user::UserData;
use crate::quiz::QuizAnswers;
use crate::store::state::GuidanceState;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot version {found} is newer than supported version {}", CURRENT_VERSION)]
    Unsupported { found: u32 },
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    state: &'a GuidanceState,
}

#[derive(Deserialize)]
struct SnapshotIn {
    #[serde(default)]
    version: u32,
    state: serde_json::Value,
}

pub fn encode(state: &GuidanceState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&SnapshotOut {
        version: CURRENT_VERSION,
        state,
    })?)
}

pub fn decode(raw: &str) -> Result<GuidanceState, SnapshotError> {
    let snapshot: SnapshotIn = serde_json::from_str(raw)?;
    migrate(snapshot.version, snapshot.state)
}

/// Upgrades a stored state of any known version to the current shape.
pub fn migrate(version: u32, state: serde_json::Value) -> Result<GuidanceState, SnapshotError> {
    match version {
        0 => {
            let legacy: LegacyState = serde_json::from_value(state)?;
            Ok(legacy.into())
        }
        CURRENT_VERSION => Ok(serde_json::from_value(state)?),
        found => Err(SnapshotError::Unsupported { found }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Version 0
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyState {
    quiz_answers: QuizAnswers,
    career_suggestions: Option<LegacySuggestions>,
    college_recommendations: Option<LegacyRecommendations>,
    chosen_career: Option<CareerDetails>,
    saved_colleges: Vec<LegacySavedCollege>,
    is_authenticated: bool,
    user: Option<UserData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacySuggestions {
    suggestions: Vec<LegacySuggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySuggestion {
    career: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    suitability_score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyRecommendations {
    college_recommendations: Vec<CollegeRecommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySavedCollege {
    college_name: String,
    #[serde(default)]
    reason: String,
}

impl From<LegacyState> for GuidanceState {
    fn from(legacy: LegacyState) -> Self {
        let suggestions = legacy
            .career_suggestions
            .map(|s| s.suggestions)
            .unwrap_or_default()
            .into_iter()
            .map(|s| CareerSuggestion {
                name: s.career,
                description: s.description,
                suitability_score: s.suitability_score.clamp(0.0, 100.0),
            })
            .collect();

        let mut saved_colleges: Vec<SavedCollege> = Vec::new();
        for college in legacy.saved_colleges {
            if !saved_colleges
                .iter()
                .any(|c| c.college_name == college.college_name)
            {
                saved_colleges.push(SavedCollege {
                    college_name: college.college_name,
                    website_url: None,
                    reason: college.reason,
                    attributes: None,
                });
            }
        }

        GuidanceState {
            quiz_answers: (!legacy.quiz_answers.is_empty()).then_some(legacy.quiz_answers),
            career_suggestions: sort_by_suitability(suggestions),
            college_recommendations: legacy
                .college_recommendations
                .map(|r| r.college_recommendations)
                .unwrap_or_default(),
            chosen_career: legacy.chosen_career,
            saved_colleges,
            is_authenticated: legacy.is_authenticated,
            user: legacy.user,
            ..GuidanceState::default()
        }
    }
}
