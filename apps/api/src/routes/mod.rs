pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::flows::handlers as flows;
use crate::quiz::handlers as quiz;
use crate::recommendations::handlers as colleges;
use crate::state::AppState;
use crate::store::handlers as profiles;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/quiz/questions", get(quiz::handle_get_questions))
        // Profile state
        .route("/api/v1/profiles/:profile_id", get(profiles::handle_get_profile))
        .route("/api/v1/profiles/:profile_id/reset", post(profiles::handle_reset))
        .route("/api/v1/profiles/:profile_id/login", post(profiles::handle_login))
        .route("/api/v1/profiles/:profile_id/logout", post(profiles::handle_logout))
        // Quiz
        .route("/api/v1/profiles/:profile_id/quiz/answer", post(quiz::handle_answer))
        .route("/api/v1/profiles/:profile_id/quiz/next", post(quiz::handle_next))
        .route("/api/v1/profiles/:profile_id/quiz/previous", post(quiz::handle_previous))
        .route("/api/v1/profiles/:profile_id/quiz/submit", post(quiz::handle_submit))
        // Career & colleges
        .route("/api/v1/profiles/:profile_id/career", post(profiles::handle_choose_career))
        .route(
            "/api/v1/profiles/:profile_id/colleges/recommendations",
            post(colleges::handle_college_recommendations),
        )
        .route(
            "/api/v1/profiles/:profile_id/colleges/personalized",
            post(colleges::handle_personalized_colleges),
        )
        .route(
            "/api/v1/profiles/:profile_id/preferences",
            put(colleges::handle_set_preferences),
        )
        .route(
            "/api/v1/profiles/:profile_id/colleges/saved",
            post(colleges::handle_save_college),
        )
        .route(
            "/api/v1/profiles/:profile_id/colleges/saved/:name",
            delete(colleges::handle_remove_saved_college),
        )
        // Dashboard
        .route("/api/v1/profiles/:profile_id/dashboard", post(profiles::handle_dashboard))
        .route("/api/v1/profiles/:profile_id/syllabus", post(profiles::handle_add_syllabus))
        .route(
            "/api/v1/profiles/:profile_id/syllabus/:item_id",
            patch(profiles::handle_toggle_syllabus).delete(profiles::handle_remove_syllabus),
        )
        .route(
            "/api/v1/profiles/:profile_id/timeline/refresh",
            post(profiles::handle_refresh_timeline),
        )
        .route(
            "/api/v1/profiles/:profile_id/timeline/events",
            post(profiles::handle_add_event),
        )
        .route(
            "/api/v1/profiles/:profile_id/timeline/events/:event_id",
            patch(profiles::handle_update_event).delete(profiles::handle_remove_event),
        )
        // Stateless flows
        .route("/api/v1/careers/:career", get(flows::handle_career_details))
        .route("/api/v1/colleges/search", post(flows::handle_search_colleges))
        .route("/api/v1/study-plan", post(flows::handle_study_plan))
        .route("/api/v1/tutor", post(flows::handle_ask_tutor))
        .route("/api/v1/mentors", post(flows::handle_find_mentors))
        .route("/api/v1/resources", post(flows::handle_more_resources))
        .with_state(state)
}
