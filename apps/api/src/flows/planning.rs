//! Planning flows for a chosen career: dashboard content, study plan, tutor,
//! mentors and learning resources.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::prompts::{
    ASK_TUTOR_TEMPLATE, DASHBOARD_DETAILS_TEMPLATE, FIND_MENTORS_TEMPLATE,
    MORE_RESOURCES_TEMPLATE, STUDY_PLAN_TEMPLATE,
};
use crate::flows::{invoke, require_text, EmptyReason, FlowOutcome};
use crate::llm_client::prompts::render;
use crate::llm_client::Inference;
use crate::models::planning::{
    DashboardContent, DashboardResource, LearningResource, Mentor, NewsItem, SyllabusItem,
    WeeklyPlan,
};

/// Syllabus plus the rest of the dashboard content for one career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDetails {
    #[serde(default)]
    pub syllabus: Vec<SyllabusItem>,
    #[serde(default)]
    pub resources: Vec<DashboardResource>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

impl DashboardDetails {
    pub fn into_parts(self) -> (Vec<SyllabusItem>, DashboardContent) {
        (
            self.syllabus,
            DashboardContent {
                resources: self.resources,
                news: self.news,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorAnswer {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct StudyPlanReply {
    #[serde(default)]
    plan: Vec<WeeklyPlan>,
}

#[derive(Debug, Deserialize)]
struct MentorsReply {
    #[serde(default)]
    mentors: Vec<Mentor>,
}

#[derive(Debug, Deserialize)]
struct ResourcesReply {
    #[serde(default)]
    resources: Vec<LearningResource>,
}

/// Gives syllabus items without a usable id a fresh one and drops blank labels.
fn clean_syllabus(items: Vec<SyllabusItem>) -> Vec<SyllabusItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.label.trim().is_empty())
        .map(|mut item| {
            if item.id.trim().is_empty() || !seen.insert(item.id.clone()) {
                item.id = Uuid::new_v4().to_string();
                seen.insert(item.id.clone());
            }
            item
        })
        .collect()
}

pub async fn dashboard_details(
    llm: &dyn Inference,
    career: &str,
) -> Result<FlowOutcome<DashboardDetails>, AppError> {
    require_text("career", career)?;

    let prompt = render(DASHBOARD_DETAILS_TEMPLATE, &[("career", career.trim())]);
    let outcome = invoke::<DashboardDetails>(llm, "dashboard_details", &prompt).await?;

    Ok(outcome.and_then(|mut details| {
        details.syllabus = clean_syllabus(details.syllabus);
        if details.syllabus.is_empty() && details.resources.is_empty() && details.news.is_empty()
        {
            FlowOutcome::Empty(EmptyReason::NoContent)
        } else {
            FlowOutcome::Ready(details)
        }
    }))
}

pub async fn study_plan(
    llm: &dyn Inference,
    career: &str,
    timeframe: &str,
) -> Result<FlowOutcome<Vec<WeeklyPlan>>, AppError> {
    require_text("career", career)?;
    require_text("timeframe", timeframe)?;

    let prompt = render(
        STUDY_PLAN_TEMPLATE,
        &[("career", career.trim()), ("timeframe", timeframe.trim())],
    );
    let outcome = invoke::<StudyPlanReply>(llm, "study_plan", &prompt).await?;
    Ok(outcome.and_then(|reply| FlowOutcome::non_empty(reply.plan)))
}

pub async fn ask_tutor(
    llm: &dyn Inference,
    career: &str,
    question: &str,
) -> Result<FlowOutcome<TutorAnswer>, AppError> {
    require_text("career", career)?;
    require_text("question", question)?;

    let prompt = render(
        ASK_TUTOR_TEMPLATE,
        &[("career", career.trim()), ("question", question.trim())],
    );
    let outcome = invoke::<TutorAnswer>(llm, "ask_tutor", &prompt).await?;
    Ok(outcome.and_then(|reply| {
        if reply.answer.trim().is_empty() {
            FlowOutcome::Empty(EmptyReason::NoContent)
        } else {
            FlowOutcome::Ready(reply)
        }
    }))
}

pub async fn find_mentors(
    llm: &dyn Inference,
    career: &str,
) -> Result<FlowOutcome<Vec<Mentor>>, AppError> {
    require_text("career", career)?;

    let prompt = render(FIND_MENTORS_TEMPLATE, &[("career", career.trim())]);
    let outcome = invoke::<MentorsReply>(llm, "find_mentors", &prompt).await?;
    Ok(outcome.and_then(|reply| FlowOutcome::non_empty(reply.mentors)))
}

pub async fn more_resources(
    llm: &dyn Inference,
    career: &str,
) -> Result<FlowOutcome<Vec<LearningResource>>, AppError> {
    require_text("career", career)?;

    let prompt = render(MORE_RESOURCES_TEMPLATE, &[("career", career.trim())]);
    let outcome = invoke::<ResourcesReply>(llm, "more_resources", &prompt).await?;
    Ok(outcome.and_then(|reply| FlowOutcome::non_empty(reply.resources)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedInference;
    use crate::models::planning::ResourceKind;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_dashboard_details_repairs_duplicate_ids() {
        let llm = ScriptedInference::json(
            r#"{
                "syllabus": [
                    {"id": "s1", "label": "Thermodynamics"},
                    {"id": "s1", "label": "Fluid Mechanics"},
                    {"id": "", "label": "Machine Design"},
                    {"id": "s4", "label": "  "}
                ],
                "resources": [{"title": "Shigley's Mechanical Engineering Design", "type": "book"}],
                "news": [{"headline": "EV push", "summary": "Manufacturers scale up."}]
            }"#,
        );

        let outcome = dashboard_details(&llm, "Mechanical Engineer").await.unwrap();
        let FlowOutcome::Ready(details) = outcome else {
            panic!("expected dashboard details");
        };

        assert_eq!(details.syllabus.len(), 3);
        assert_eq!(details.syllabus[0].id, "s1");
        assert_ne!(details.syllabus[1].id, "s1");
        assert!(!details.syllabus[2].id.is_empty());
        assert_eq!(details.resources[0].kind, ResourceKind::Book);

        let (syllabus, content) = details.into_parts();
        assert_eq!(syllabus.len(), 3);
        assert_eq!(content.news.len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_details_all_empty_is_no_content() {
        let llm = ScriptedInference::json(r#"{"syllabus": [], "resources": [], "news": []}"#);
        let outcome = dashboard_details(&llm, "Chef").await.unwrap();
        assert_eq!(outcome, FlowOutcome::Empty(EmptyReason::NoContent));
    }

    #[tokio::test]
    async fn test_study_plan_parses_weeks() {
        let llm = ScriptedInference::json(
            r#"{"plan": [
                {"week": "Weeks 1-2", "topics": ["Kinematics", "Laws of Motion"], "focus": "Building Fundamentals"},
                {"week": "Week 3", "topics": ["Mock test"], "focus": "Revision"}
            ]}"#,
        );
        let outcome = study_plan(&llm, "Aerospace Engineer", "3 months").await.unwrap();
        let FlowOutcome::Ready(plan) = outcome else {
            panic!("expected a plan");
        };
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].topics.len(), 2);
        assert!(llm.last_prompt().unwrap().contains("The student has 3 months"));
    }

    #[tokio::test]
    async fn test_study_plan_requires_timeframe() {
        let llm = ScriptedInference::json("{}");
        let result = study_plan(&llm, "Doctor", "").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_ask_tutor_returns_answer() {
        let llm = ScriptedInference::json(r#"{"answer": "Ohm's law relates V, I and R."}"#);
        let outcome = ask_tutor(&llm, "Electrical Engineer", "What is Ohm's law?")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            FlowOutcome::Ready(TutorAnswer {
                answer: "Ohm's law relates V, I and R.".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_ask_tutor_blocked_question_is_declined() {
        let llm = ScriptedInference::declining();
        let outcome = ask_tutor(&llm, "Chemist", "something unsafe").await.unwrap();
        assert_eq!(outcome, FlowOutcome::Empty(EmptyReason::Declined));
    }

    #[tokio::test]
    async fn test_find_mentors_empty_is_no_content() {
        let llm = ScriptedInference::json(r#"{"mentors": []}"#);
        let outcome = find_mentors(&llm, "Marine Biologist").await.unwrap();
        assert_eq!(outcome, FlowOutcome::Empty(EmptyReason::NoContent));
    }

    #[tokio::test]
    async fn test_more_resources_parses_kinds() {
        let llm = ScriptedInference::json(
            r#"{"resources": [
                {"title": "CS50", "type": "course", "url": "https://cs50.harvard.edu", "summary": "Intro to CS."},
                {"title": "3Blue1Brown", "type": "video", "url": "https://youtube.com/@3blue1brown", "summary": "Visual maths."}
            ]}"#,
        );
        let outcome = more_resources(&llm, "Software Engineer").await.unwrap();
        let FlowOutcome::Ready(resources) = outcome else {
            panic!("expected resources");
        };
        assert_eq!(resources[0].kind, ResourceKind::Course);
        assert_eq!(resources[1].kind, ResourceKind::Video);
    }

    #[tokio::test]
    async fn test_unknown_resource_kind_is_llm_error() {
        let llm = ScriptedInference::json(
            r#"{"resources": [{"title": "x", "type": "podcast", "url": "https://x"}]}"#,
        );
        let result = more_resources(&llm, "Journalist").await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
