use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::careers::career_details;
use crate::flows::planning::{dashboard_details, DashboardDetails};
use crate::flows::timeline::timeline_events;
use crate::flows::{FlowOutcome, FlowResponse};
use crate::identity::Identity;
use crate::models::career::CareerDetails;
use crate::models::planning::{
    ActivityEntry, ActivityKind, EventKind, EventStatus, SyllabusItem, TimelineEvent,
};
use crate::models::user::UserData;
use crate::quiz::handlers::QuizView;
use crate::state::AppState;
use crate::store::state::{Action, GuidanceState, TimelineEventPatch};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryView {
    #[serde(flatten)]
    pub event: TimelineEvent,
    pub status: EventStatus,
}

fn timeline_view(state: &GuidanceState, today: NaiveDate) -> Vec<TimelineEntryView> {
    state
        .timeline
        .iter()
        .map(|event| TimelineEntryView {
            status: EventStatus::classify(event.date, today),
            event: event.clone(),
        })
        .collect()
}

/// A profile's state plus everything derived from it for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub profile_id: Uuid,
    pub identity: Option<Identity>,
    pub dashboard_unlocked: bool,
    pub syllabus_progress_percent: u32,
    pub quiz: QuizView,
    pub timeline: Vec<TimelineEntryView>,
    pub state: GuidanceState,
}

impl ProfileView {
    fn new(profile_id: Uuid, state: GuidanceState, today: NaiveDate) -> Self {
        let identity = state
            .user
            .as_ref()
            .filter(|_| state.is_authenticated)
            .map(Identity::from);
        Self {
            profile_id,
            identity,
            dashboard_unlocked: state.is_dashboard_unlocked(),
            syllabus_progress_percent: state.syllabus_progress_percent(),
            quiz: QuizView::from(&state.quiz_draft),
            timeline: timeline_view(&state, today),
            state,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusView {
    pub items: Vec<SyllabusItem>,
    pub completed: Vec<String>,
    pub progress_percent: u32,
}

impl From<&GuidanceState> for SyllabusView {
    fn from(state: &GuidanceState) -> Self {
        Self {
            items: state.syllabus.clone(),
            completed: state
                .syllabus
                .iter()
                .filter(|item| state.syllabus_progress.get(&item.id).copied().unwrap_or(false))
                .map(|item| item.id.clone())
                .collect(),
            progress_percent: state.syllabus_progress_percent(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChooseCareerRequest {
    pub career: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSyllabusRequest {
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddEventRequest {
    pub title: String,
    pub date: NaiveDate,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The chosen career's title, or a validation error telling the student what to do first.
fn chosen_career_title(state: &GuidanceState) -> Result<String, AppError> {
    match &state.chosen_career {
        Some(career) if !career.title.trim().is_empty() => Ok(career.title.clone()),
        Some(_) => Err(AppError::Validation(
            "the chosen career has no title; choose it again".to_string(),
        )),
        None => Err(AppError::Validation("choose a career first".to_string())),
    }
}

/// Rejects a write when the chosen career changed while the model was answering.
fn ensure_same_career(state: &GuidanceState, career: &str) -> Result<(), AppError> {
    match chosen_career_title(state) {
        Ok(current) if current == career => Ok(()),
        _ => Err(AppError::Conflict(
            "the chosen career changed while the request was running".to_string(),
        )),
    }
}

/// GET /api/v1/profiles/:profile_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileView>, AppError> {
    let current = state.store.load(profile_id).await?;
    Ok(Json(ProfileView::new(profile_id, current, today())))
}

/// POST /api/v1/profiles/:profile_id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileView>, AppError> {
    let updated = state.store.dispatch(profile_id, Action::Reset).await?;
    Ok(Json(ProfileView::new(profile_id, updated, today())))
}

/// POST /api/v1/profiles/:profile_id/login
pub async fn handle_login(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ProfileView>, AppError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("email must be a valid address".to_string()));
    }

    let user = UserData {
        username: username.to_string(),
        email: email.to_string(),
    };
    let identity = Identity::from(&user);
    let updated = state.store.dispatch(profile_id, Action::Login(user)).await?;
    state.identity.publish(profile_id, Some(identity));

    Ok(Json(ProfileView::new(profile_id, updated, today())))
}

/// POST /api/v1/profiles/:profile_id/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileView>, AppError> {
    let mut was_signed_in = false;
    let updated = state
        .store
        .update(profile_id, |current| {
            was_signed_in = current.is_authenticated && current.user.is_some();
            Ok(current.reduce(Action::Logout))
        })
        .await?;
    if was_signed_in {
        state.identity.publish(profile_id, None);
    }
    Ok(Json(ProfileView::new(profile_id, updated, today())))
}

/// POST /api/v1/profiles/:profile_id/career
pub async fn handle_choose_career(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(req): Json<ChooseCareerRequest>,
) -> Result<Json<FlowResponse<CareerDetails>>, AppError> {
    let _guard = state.inflight.begin(profile_id, "choose_career")?;

    let outcome = career_details(state.llm.as_ref(), &req.career).await?;
    if let FlowOutcome::Ready(details) = &outcome {
        state
            .store
            .dispatch_all(
                profile_id,
                vec![
                    Action::ChooseCareer(details.clone()),
                    Action::RecordActivity(ActivityEntry {
                        description: format!("Chose {} as a career", details.title),
                        kind: ActivityKind::CareerChosen,
                        at: Utc::now(),
                    }),
                ],
            )
            .await?;
    }
    Ok(Json(outcome.into()))
}

/// POST /api/v1/profiles/:profile_id/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<FlowResponse<DashboardDetails>>, AppError> {
    let current = state.store.load(profile_id).await?;
    if !current.is_dashboard_unlocked() {
        return Err(AppError::Validation(
            "the dashboard opens after the assessment and choosing a career".to_string(),
        ));
    }
    let career = chosen_career_title(&current)?;

    let _guard = state.inflight.begin(profile_id, "dashboard")?;
    let outcome = dashboard_details(state.llm.as_ref(), &career).await?;
    if let FlowOutcome::Ready(details) = &outcome {
        let (syllabus, content) = details.clone().into_parts();
        state
            .store
            .update(profile_id, |latest| {
                ensure_same_career(&latest, &career)?;
                Ok(latest
                    .reduce(Action::SetSyllabus(syllabus))
                    .reduce(Action::SetDashboard(content)))
            })
            .await?;
    }
    Ok(Json(outcome.into()))
}

/// POST /api/v1/profiles/:profile_id/syllabus
pub async fn handle_add_syllabus(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(req): Json<AddSyllabusRequest>,
) -> Result<(StatusCode, Json<SyllabusView>), AppError> {
    let items: Vec<SyllabusItem> = req
        .labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(|label| SyllabusItem {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
        })
        .collect();
    if items.is_empty() {
        return Err(AppError::Validation("labels cannot be empty".to_string()));
    }

    let updated = state
        .store
        .dispatch(profile_id, Action::AddSyllabusItems(items))
        .await?;
    Ok((StatusCode::CREATED, Json(SyllabusView::from(&updated))))
}

/// PATCH /api/v1/profiles/:profile_id/syllabus/:item_id
pub async fn handle_toggle_syllabus(
    State(state): State<AppState>,
    Path((profile_id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<SyllabusView>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            if !current.has_syllabus_item(&item_id) {
                return Err(AppError::NotFound(format!("syllabus item {item_id}")));
            }
            Ok(current.reduce(Action::ToggleSyllabusItem(item_id.clone())))
        })
        .await?;
    Ok(Json(SyllabusView::from(&updated)))
}

/// DELETE /api/v1/profiles/:profile_id/syllabus/:item_id
pub async fn handle_remove_syllabus(
    State(state): State<AppState>,
    Path((profile_id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<SyllabusView>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            if !current.has_syllabus_item(&item_id) {
                return Err(AppError::NotFound(format!("syllabus item {item_id}")));
            }
            Ok(current.reduce(Action::RemoveSyllabusItem(item_id.clone())))
        })
        .await?;
    Ok(Json(SyllabusView::from(&updated)))
}

/// POST /api/v1/profiles/:profile_id/timeline/refresh
pub async fn handle_refresh_timeline(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<FlowResponse<Vec<TimelineEntryView>>>, AppError> {
    let current = state.store.load(profile_id).await?;
    let career = chosen_career_title(&current)?;
    let education_level = current
        .education_level()
        .ok_or_else(|| AppError::Validation("take the career assessment first".to_string()))?
        .to_string();

    let _guard = state.inflight.begin(profile_id, "timeline")?;
    let today = today();
    let outcome = timeline_events(state.llm.as_ref(), &career, &education_level, today).await?;

    match outcome {
        FlowOutcome::Ready(events) => {
            let updated = state
                .store
                .update(profile_id, |latest| {
                    ensure_same_career(&latest, &career)?;
                    Ok(latest.reduce(Action::SetTimeline(events)))
                })
                .await?;
            Ok(Json(FlowOutcome::Ready(timeline_view(&updated, today)).into()))
        }
        FlowOutcome::Empty(reason) => Ok(Json(FlowOutcome::Empty(reason).into())),
    }
}

/// POST /api/v1/profiles/:profile_id/timeline/events
pub async fn handle_add_event(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(req): Json<AddEventRequest>,
) -> Result<(StatusCode, Json<TimelineEvent>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let event = TimelineEvent {
        id: Uuid::new_v4(),
        title: title.to_string(),
        date: req.date,
        kind: EventKind::Custom,
    };
    state
        .store
        .dispatch(profile_id, Action::AddTimelineEvent(event.clone()))
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PATCH /api/v1/profiles/:profile_id/timeline/events/:event_id
pub async fn handle_update_event(
    State(state): State<AppState>,
    Path((profile_id, event_id)): Path<(Uuid, Uuid)>,
    Json(mut patch): Json<TimelineEventPatch>,
) -> Result<Json<Vec<TimelineEntryView>>, AppError> {
    if let Some(title) = patch.title.take() {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("title cannot be empty".to_string()));
        }
        patch.title = Some(title);
    }

    let updated = state
        .store
        .update(profile_id, |current| {
            if !current.has_timeline_event(event_id) {
                return Err(AppError::NotFound(format!("timeline event {event_id}")));
            }
            Ok(current.reduce(Action::UpdateTimelineEvent(event_id, patch)))
        })
        .await?;
    Ok(Json(timeline_view(&updated, today())))
}

/// DELETE /api/v1/profiles/:profile_id/timeline/events/:event_id
pub async fn handle_remove_event(
    State(state): State<AppState>,
    Path((profile_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<TimelineEntryView>>, AppError> {
    let updated = state
        .store
        .update(profile_id, |current| {
            if !current.has_timeline_event(event_id) {
                return Err(AppError::NotFound(format!("timeline event {event_id}")));
            }
            Ok(current.reduce(Action::RemoveTimelineEvent(event_id)))
        })
        .await?;
    Ok(Json(timeline_view(&updated, today())))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{Method, StatusCode};
    use chrono::Datelike;
    use serde_json::{json, Value};

    use super::*;
    use crate::identity::IdentityProvider;
    use crate::llm_client::testing::ScriptedInference;
    use crate::models::career::CareerSuggestion;
    use crate::quiz::{Answer, QuizAnswers};
    use crate::routes::build_router;
    use crate::routes::testing::send;
    use crate::state::testing::test_state;

    const DETAILS: &str = r#"{
        "jobDuties": ["Analyse datasets"],
        "requiredSkills": ["Statistics", "Python"],
        "potentialSalary": "₹8-15 LPA",
        "jobGrowth": "High",
        "entrepreneurialOptions": ["Analytics consultancy"],
        "academicPathway": "B.Sc. Statistics, then M.Sc. Data Science",
        "studyMaterials": []
    }"#;

    const DASHBOARD: &str = r#"{
        "syllabus": [
            {"id": "stats", "label": "Probability and statistics"},
            {"id": "py", "label": "Python programming"}
        ],
        "resources": [{"title": "Think Stats", "type": "book"}],
        "news": [{"headline": "AI hiring up", "summary": "Demand grows."}]
    }"#;

    fn uri(profile: Uuid, rest: &str) -> String {
        format!("/api/v1/profiles/{profile}{rest}")
    }

    fn details(title: &str) -> CareerDetails {
        let mut details: CareerDetails = serde_json::from_str(DETAILS).unwrap();
        details.title = title.to_string();
        details
    }

    fn suggestion() -> CareerSuggestion {
        CareerSuggestion {
            name: "Data Scientist".to_string(),
            description: "Finds patterns.".to_string(),
            suitability_score: 80.0,
        }
    }

    async fn unlocked_profile(state: &AppState) -> Uuid {
        let profile = Uuid::new_v4();
        let mut answers = QuizAnswers::new();
        answers.insert(
            "educationLevel".to_string(),
            Answer::Text("Completed Class 12".to_string()),
        );
        state
            .store
            .dispatch_all(
                profile,
                vec![
                    Action::SetQuizAnswers(answers),
                    Action::SetCareerSuggestions(vec![suggestion()]),
                    Action::ChooseCareer(details("Data Scientist")),
                ],
            )
            .await
            .unwrap();
        profile
    }

    #[tokio::test]
    async fn test_fresh_profile_view() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let app = build_router(state);
        let profile = Uuid::new_v4();

        let (status, body) = send(&app, Method::GET, &uri(profile, ""), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profileId"], profile.to_string());
        assert_eq!(body["dashboardUnlocked"], false);
        assert_eq!(body["identity"], Value::Null);
        assert_eq!(body["quiz"]["question"]["id"], "gender");
        assert_eq!(body["state"]["chosenCareer"], Value::Null);
    }

    #[tokio::test]
    async fn test_login_reset_logout() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _listener = state.identity.on_identity_change(Box::new(move |change| {
            sink.lock().unwrap().push(change.identity.is_some());
        }));
        let profile = unlocked_profile(&state).await;
        let app = build_router(state);

        let (status, body) = send(
            &app,
            Method::POST,
            &uri(profile, "/login"),
            Some(json!({"username": "Asha", "email": "asha@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["identity"]["displayName"], "Asha");

        let (_, body) = send(&app, Method::POST, &uri(profile, "/reset"), None).await;
        assert_eq!(body["state"]["quizAnswers"], Value::Null);
        assert_eq!(body["state"]["chosenCareer"], Value::Null);
        assert_eq!(body["state"]["isAuthenticated"], true);
        assert_eq!(body["state"]["user"]["username"], "Asha");

        let (_, body) = send(&app, Method::POST, &uri(profile, "/logout"), None).await;
        assert_eq!(body["state"]["isAuthenticated"], false);
        assert_eq!(body["state"]["user"], Value::Null);

        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_logout_publishes_once_for_the_stored_login() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _listener = state.identity.on_identity_change(Box::new(move |change| {
            sink.lock().unwrap().push(change.identity.is_some());
        }));
        let profile = Uuid::new_v4();
        state
            .store
            .dispatch(
                profile,
                Action::Login(UserData {
                    username: "Ravi".to_string(),
                    email: "ravi@example.com".to_string(),
                }),
            )
            .await
            .unwrap();
        let app = build_router(state);

        let (status, _) = send(&app, Method::POST, &uri(profile, "/logout"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::POST, &uri(profile, "/logout"), None).await;
        assert_eq!(status, StatusCode::OK);

        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn test_login_requires_username_and_email() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let app = build_router(state);
        let (status, _) = send(
            &app,
            Method::POST,
            &uri(Uuid::new_v4(), "/login"),
            Some(json!({"username": " ", "email": "a@b.c"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_choose_career_stores_details_and_activity() {
        let (state, llm) = test_state(ScriptedInference::json(DETAILS));
        let profile = Uuid::new_v4();
        let app = build_router(state.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            &uri(profile, "/career"),
            Some(json!({"career": " Data Scientist "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["data"]["title"], "Data Scientist");
        assert_eq!(llm.calls(), 1);

        let stored = state.store.load(profile).await.unwrap();
        assert_eq!(stored.chosen_career.unwrap().title, "Data Scientist");
        assert_eq!(stored.activity_log[0].kind, ActivityKind::CareerChosen);
    }

    #[tokio::test]
    async fn test_choose_blank_career_is_rejected_before_model() {
        let (state, llm) = test_state(ScriptedInference::json(DETAILS));
        let app = build_router(state);
        let (status, _) = send(
            &app,
            Method::POST,
            &uri(Uuid::new_v4(), "/career"),
            Some(json!({"career": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_locked_until_career_chosen() {
        let (state, llm) = test_state(ScriptedInference::json(DASHBOARD));
        let app = build_router(state);
        let (status, _) = send(&app, Method::POST, &uri(Uuid::new_v4(), "/dashboard"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_dashboard_then_syllabus_progress() {
        let (state, _) = test_state(ScriptedInference::json(DASHBOARD));
        let profile = unlocked_profile(&state).await;
        let app = build_router(state.clone());

        let (status, body) = send(&app, Method::POST, &uri(profile, "/dashboard"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["syllabus"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, Method::PATCH, &uri(profile, "/syllabus/stats"), None).await;
        assert_eq!(body["completed"], json!(["stats"]));
        assert_eq!(body["progressPercent"], 50);

        let (status, body) = send(
            &app,
            Method::POST,
            &uri(profile, "/syllabus"),
            Some(json!({"labels": ["Linear algebra", "python programming", ""]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["progressPercent"], 33);

        let (_, body) = send(&app, Method::DELETE, &uri(profile, "/syllabus/stats"), None).await;
        assert_eq!(body["completed"], json!([]));
        assert_eq!(body["items"].as_array().unwrap().len(), 2);

        let stored = state.store.load(profile).await.unwrap();
        assert!(!stored.syllabus_progress.contains_key("stats"));
        assert_eq!(stored.dashboard.unwrap().news.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_syllabus_item_is_not_found() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let app = build_router(state);
        let profile = Uuid::new_v4();
        let (status, _) = send(&app, Method::PATCH, &uri(profile, "/syllabus/nope"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &uri(profile, "/syllabus/nope"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_timeline_refresh_keeps_custom_events() {
        let year = Utc::now().year() + 1;
        let reply = format!(
            r#"{{"events": [
                {{"title": "Entrance exam", "date": "{year}-05-10", "type": "exam"}},
                {{"title": "Broken", "date": "soon", "type": "deadline"}}
            ]}}"#
        );
        let (state, llm) = test_state(ScriptedInference::json(&reply));
        let profile = unlocked_profile(&state).await;
        let app = build_router(state.clone());

        let (status, custom) = send(
            &app,
            Method::POST,
            &uri(profile, "/timeline/events"),
            Some(json!({"title": "Visit campus", "date": format!("{year}-01-15")})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(custom["kind"], "custom");

        let (status, body) = send(&app, Method::POST, &uri(profile, "/timeline/refresh"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(llm.calls(), 1);
        assert!(llm.last_prompt().unwrap().contains("Completed Class 12"));
        let events = body["data"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["title"], "Visit campus");
        assert_eq!(events[1]["title"], "Entrance exam");
        assert_eq!(events[1]["status"], "future");
    }

    #[tokio::test]
    async fn test_timeline_refresh_needs_assessment() {
        let (state, llm) = test_state(ScriptedInference::new(vec![]));
        let profile = Uuid::new_v4();
        state
            .store
            .dispatch(profile, Action::ChooseCareer(details("Data Scientist")))
            .await
            .unwrap();
        let app = build_router(state);

        let (status, _) = send(&app, Method::POST, &uri(profile, "/timeline/refresh"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_edit_and_remove_event() {
        let (state, _) = test_state(ScriptedInference::new(vec![]));
        let app = build_router(state);
        let profile = Uuid::new_v4();

        let (_, event) = send(
            &app,
            Method::POST,
            &uri(profile, "/timeline/events"),
            Some(json!({"title": "Scholarship form", "date": "2030-03-01"})),
        )
        .await;
        let id = event["id"].as_str().unwrap().to_string();

        let (status, events) = send(
            &app,
            Method::PATCH,
            &uri(profile, &format!("/timeline/events/{id}")),
            Some(json!({"date": "2030-02-20"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events[0]["date"], "2030-02-20");
        assert_eq!(events[0]["title"], "Scholarship form");

        let (status, _) = send(
            &app,
            Method::PATCH,
            &uri(profile, &format!("/timeline/events/{id}")),
            Some(json!({"title": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, events) = send(
            &app,
            Method::DELETE,
            &uri(profile, &format!("/timeline/events/{id}")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events, json!([]));

        let (status, _) = send(
            &app,
            Method::DELETE,
            &uri(profile, &format!("/timeline/events/{id}")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
