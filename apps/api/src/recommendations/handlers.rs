use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::colleges::{
    college_recommendations, personalized_colleges, CollegeRecommendationsInput,
    PersonalizedCollegesInput,
};
use crate::flows::{FlowOutcome, FlowResponse};
use crate::models::college::{
    CollegeRecommendation, PreferenceWeights, SavedCollege, ATTRIBUTE_NAMES,
};
use crate::models::planning::{ActivityEntry, ActivityKind};
use crate::recommendations::fit_scoring::{rank_by_fit, FitRanked};
use crate::state::AppState;
use crate::store::state::{Action, GuidanceState};

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: PreferenceWeights,
    pub ranked: Vec<FitRanked<CollegeRecommendation>>,
}

#[derive(Debug, Serialize)]
pub struct SavedCollegesResponse {
    pub saved: Vec<FitRanked<SavedCollege>>,
}

/// Suggested careers and education level from the assessment.
fn assessment(state: &GuidanceState) -> Result<(Vec<String>, String), AppError> {
    let careers = state.suggested_careers();
    if careers.is_empty() {
        return Err(AppError::Validation(
            "take the career assessment first".to_string(),
        ));
    }
    let education_level = state
        .education_level()
        .ok_or_else(|| AppError::Validation("the assessment has no education level".to_string()))?;
    Ok((careers, education_level.to_string()))
}

fn activity(description: String, kind: ActivityKind) -> Action {
    Action::RecordActivity(ActivityEntry {
        description,
        kind,
        at: Utc::now(),
    })
}

/// Fills a bare save request from the matching recommendation, if any.
/// Personalized entries win since they carry attribute scores.
fn with_recommendation_details(state: &GuidanceState, college: SavedCollege) -> SavedCollege {
    if college.attributes.is_some() {
        return college;
    }
    let known = state
        .personalized_colleges
        .iter()
        .chain(&state.college_recommendations)
        .find(|rec| rec.college_name == college.college_name);
    match known {
        Some(rec) => {
            let from_rec = SavedCollege::from(rec);
            SavedCollege {
                website_url: college.website_url.or(from_rec.website_url),
                reason: if college.reason.trim().is_empty() {
                    from_rec.reason
                } else {
                    college.reason
                },
                ..from_rec
            }
        }
        None => college,
    }
}

fn saved_view(state: &GuidanceState) -> SavedCollegesResponse {
    SavedCollegesResponse {
        saved: rank_by_fit(&ATTRIBUTE_NAMES, &state.preference_weights, &state.saved_colleges),
    }
}

/// POST /api/v1/profiles/:profile_id/colleges/recommendations
pub async fn handle_college_recommendations(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<FlowResponse<Vec<CollegeRecommendation>>>, AppError> {
    let current = state.store.load(profile_id).await?;
    let (suggested_careers, education_level) = assessment(&current)?;

    let _guard = state.inflight.begin(profile_id, "college_recommendations")?;
    let input = CollegeRecommendationsInput {
        suggested_careers,
        education_level,
    };
    let outcome = college_recommendations(state.llm.as_ref(), &state.filter, &input).await?;

    if let FlowOutcome::Ready(colleges) = &outcome {
        state
            .store
            .dispatch_all(
                profile_id,
                vec![
                    Action::SetCollegeRecommendations(colleges.clone()),
                    activity(
                        format!("Received {} college recommendations", colleges.len()),
                        ActivityKind::CollegesRecommended,
                    ),
                ],
            )
            .await?;
    }
    Ok(Json(outcome.into()))
}

/// POST /api/v1/profiles/:profile_id/colleges/personalized
///
/// Asks for attribute-scored colleges and returns them ranked by the stored weights.
pub async fn handle_personalized_colleges(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<FlowResponse<Vec<FitRanked<CollegeRecommendation>>>>, AppError> {
    let current = state.store.load(profile_id).await?;
    let (suggested_careers, education_level) = assessment(&current)?;
    let preferences = current.preference_weights;

    let _guard = state.inflight.begin(profile_id, "personalized_colleges")?;
    let input = PersonalizedCollegesInput {
        suggested_careers,
        education_level,
        preferences,
    };
    let outcome = personalized_colleges(state.llm.as_ref(), &state.filter, &input).await?;

    if let FlowOutcome::Ready(colleges) = &outcome {
        state
            .store
            .dispatch_all(
                profile_id,
                vec![
                    Action::SetPersonalizedColleges(colleges.clone()),
                    activity(
                        format!("Received {} personalized colleges", colleges.len()),
                        ActivityKind::CollegesRecommended,
                    ),
                ],
            )
            .await?;
    }

    let weights = input.preferences;
    Ok(Json(
        outcome
            .map(|colleges| rank_by_fit(&ATTRIBUTE_NAMES, &weights, &colleges))
            .into(),
    ))
}

/// PUT /api/v1/profiles/:profile_id/preferences
///
/// Merges the given weights over the stored ones and re-ranks the personalized list
/// without calling the model.
pub async fn handle_set_preferences(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(changes): Json<BTreeMap<String, u32>>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            let mut weights = current.preference_weights.clone();
            weights.0.extend(changes);
            weights.validate()?;
            Ok(current.reduce(Action::SetPreferenceWeights(weights)))
        })
        .await?;

    Ok(Json(PreferencesResponse {
        ranked: rank_by_fit(
            &ATTRIBUTE_NAMES,
            &updated.preference_weights,
            &updated.personalized_colleges,
        ),
        preferences: updated.preference_weights,
    }))
}

/// POST /api/v1/profiles/:profile_id/colleges/saved
pub async fn handle_save_college(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(mut college): Json<SavedCollege>,
) -> Result<Json<SavedCollegesResponse>, AppError> {
    college.college_name = college.college_name.trim().to_string();
    if college.college_name.is_empty() {
        return Err(AppError::Validation("collegeName cannot be empty".to_string()));
    }

    let updated = state
        .store
        .update(profile_id, |current| {
            if current.has_saved_college(&college.college_name) {
                return Ok(current);
            }
            let description = format!("Saved {}", college.college_name);
            let college = with_recommendation_details(&current, college);
            Ok(current
                .reduce(Action::SaveCollege(college))
                .reduce(activity(description, ActivityKind::CollegeSaved)))
        })
        .await?;
    Ok(Json(saved_view(&updated)))
}

/// DELETE /api/v1/profiles/:profile_id/colleges/saved/:name
pub async fn handle_remove_saved_college(
    State(state): State<AppState>,
    Path((profile_id, name)): Path<(Uuid, String)>,
) -> Result<Json<SavedCollegesResponse>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            if !current.has_saved_college(&name) {
                return Err(AppError::NotFound(format!("saved college '{name}'")));
            }
            Ok(current.reduce(Action::RemoveSavedCollege(name.clone())))
        })
        .await?;
    Ok(Json(saved_view(&updated)))
}
