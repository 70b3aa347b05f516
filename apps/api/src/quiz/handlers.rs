use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::careers::career_suggestions;
use crate::flows::{FlowOutcome, FlowResponse};
use crate::models::career::CareerSuggestion;
use crate::models::planning::{ActivityEntry, ActivityKind};
use crate::quiz::questions::{Question, QUESTIONS};
use crate::quiz::wizard::QuizWizard;
use crate::quiz::{Answer, QuizAnswers};
use crate::state::AppState;
use crate::store::state::Action;

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: &'static [Question],
}

/// Where the student is in the quiz.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub step: usize,
    pub total_steps: usize,
    pub question: &'static Question,
    pub progress_percent: u32,
    pub is_last_step: bool,
    pub answers: QuizAnswers,
}

impl From<&QuizWizard> for QuizView {
    fn from(wizard: &QuizWizard) -> Self {
        Self {
            step: wizard.clamped_step(),
            total_steps: QUESTIONS.len(),
            question: wizard.current(),
            progress_percent: wizard.progress_percent(),
            is_last_step: wizard.is_last_step(),
            answers: wizard.answers.clone(),
        }
    }
}

/// Answers arrive as typed by the client; numbers are kept as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AnswerInput {
    Text(String),
    Number(f64),
    Choices(Vec<String>),
}

impl From<AnswerInput> for Answer {
    fn from(input: AnswerInput) -> Self {
        match input {
            AnswerInput::Text(text) => Answer::Text(text),
            AnswerInput::Number(n) => Answer::Text(n.to_string()),
            AnswerInput::Choices(choices) => Answer::Choices(choices),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: String,
    pub value: AnswerInput,
}

/// GET /api/v1/quiz/questions
pub async fn handle_get_questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: &QUESTIONS,
    })
}

/// Applies a wizard step to the stored draft.
async fn step_draft(
    state: &AppState,
    profile_id: Uuid,
    step: impl FnOnce(&mut QuizWizard) -> Result<(), AppError> + Send,
) -> Result<Json<QuizView>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            let mut draft = current.quiz_draft.clone();
            step(&mut draft)?;
            Ok(current.reduce(Action::SetQuizDraft(draft)))
        })
        .await?;
    Ok(Json(QuizView::from(&updated.quiz_draft)))
}

/// POST /api/v1/profiles/:profile_id/quiz/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<QuizView>, AppError> {
    step_draft(&state, profile_id, |draft| {
        draft.answer(&req.question_id, req.value.into())
    })
    .await
}

/// POST /api/v1/profiles/:profile_id/quiz/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    step_draft(&state, profile_id, QuizWizard::next).await
}

/// POST /api/v1/profiles/:profile_id/quiz/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<QuizView>, AppError> {
    step_draft(&state, profile_id, |draft| {
        draft.previous();
        Ok(())
    })
    .await
}

/// POST /api/v1/profiles/:profile_id/quiz/submit
///
/// Invalid answers are rejected without touching the profile. Once the model has been
/// asked, anything but a usable answer resets the profile so the quiz starts over.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<FlowResponse<Vec<CareerSuggestion>>>, AppError> {
    let _guard = state.inflight.begin(profile_id, "quiz_submit")?;

    let current = state.store.load(profile_id).await?;
    let input = current.quiz_draft.submission()?;
    let answers = current.quiz_draft.answers;

    match career_suggestions(state.llm.as_ref(), &input).await {
        Ok(FlowOutcome::Ready(suggestions)) => {
            state
                .store
                .dispatch_all(
                    profile_id,
                    vec![
                        Action::SetQuizAnswers(answers),
                        Action::SetCareerSuggestions(suggestions.clone()),
                        Action::SetQuizDraft(QuizWizard::default()),
                        Action::RecordActivity(ActivityEntry {
                            description: "Took the career assessment".to_string(),
                            kind: ActivityKind::Assessment,
                            at: Utc::now(),
                        }),
                    ],
                )
                .await?;
            Ok(Json(FlowOutcome::Ready(suggestions).into()))
        }
        Ok(FlowOutcome::Empty(reason)) => {
            warn!(%profile_id, ?reason, "no career suggestions; resetting profile");
            state.store.dispatch(profile_id, Action::Reset).await?;
            Ok(Json(FlowOutcome::Empty(reason).into()))
        }
        Err(e) => {
            warn!(%profile_id, "career suggestions failed; resetting profile");
            state.store.dispatch(profile_id, Action::Reset).await?;
            Err(e)
        }
    }
}
