//! Stateless flow endpoints. Nothing here reads or writes a profile.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::flows::careers::career_details;
use crate::flows::colleges::{search_colleges, SearchCollegesInput};
use crate::flows::planning::{ask_tutor, find_mentors, more_resources, study_plan, TutorAnswer};
use crate::flows::FlowResponse;
use crate::models::career::CareerDetails;
use crate::models::college::CollegeSearchResult;
use crate::models::planning::{LearningResource, Mentor, WeeklyPlan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CareerRequest {
    pub career: String,
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    pub career: String,
    pub timeframe: String,
}

#[derive(Debug, Deserialize)]
pub struct TutorRequest {
    pub career: String,
    pub question: String,
}

/// GET /api/v1/careers/:career
pub async fn handle_career_details(
    State(state): State<AppState>,
    Path(career): Path<String>,
) -> Result<Json<FlowResponse<CareerDetails>>, AppError> {
    let outcome = career_details(state.llm.as_ref(), &career).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/colleges/search
pub async fn handle_search_colleges(
    State(state): State<AppState>,
    Json(req): Json<SearchCollegesInput>,
) -> Result<Json<FlowResponse<Vec<CollegeSearchResult>>>, AppError> {
    let outcome = search_colleges(state.llm.as_ref(), &state.filter, &req).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/study-plan
pub async fn handle_study_plan(
    State(state): State<AppState>,
    Json(req): Json<StudyPlanRequest>,
) -> Result<Json<FlowResponse<Vec<WeeklyPlan>>>, AppError> {
    let outcome = study_plan(state.llm.as_ref(), &req.career, &req.timeframe).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/tutor
pub async fn handle_ask_tutor(
    State(state): State<AppState>,
    Json(req): Json<TutorRequest>,
) -> Result<Json<FlowResponse<TutorAnswer>>, AppError> {
    let outcome = ask_tutor(state.llm.as_ref(), &req.career, &req.question).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/mentors
pub async fn handle_find_mentors(
    State(state): State<AppState>,
    Json(req): Json<CareerRequest>,
) -> Result<Json<FlowResponse<Vec<Mentor>>>, AppError> {
    let outcome = find_mentors(state.llm.as_ref(), &req.career).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/resources
pub async fn handle_more_resources(
    State(state): State<AppState>,
    Json(req): Json<CareerRequest>,
) -> Result<Json<FlowResponse<Vec<LearningResource>>>, AppError> {
    let outcome = more_resources(state.llm.as_ref(), &req.career).await?;
    Ok(Json(outcome.into()))
}
