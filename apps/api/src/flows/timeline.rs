//! Timeline flow: upcoming exams and deadlines, with date normalization.
//!
//! Model-produced dates are often from the last cycle of an annual exam. A date
//! strictly before today is moved to the same calendar day one year later;
//! Feb 29 lands on Feb 28. Dates that parse as neither `YYYY-MM-DD` nor RFC 3339
//! are dropped.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::flows::prompts::TIMELINE_EVENTS_TEMPLATE;
use crate::flows::{invoke, require_text, FlowOutcome};
use crate::llm_client::prompts::{render, EDUCATION_TIER_INSTRUCTION};
use crate::llm_client::Inference;
use crate::models::planning::{sort_events, EventKind, TimelineEvent};

/// One event as the model returns it, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub title: String,
    pub date: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: EventKind,
}

#[derive(Debug, Deserialize)]
struct EventsReply {
    #[serde(default)]
    events: Vec<RawEvent>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn add_one_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}

/// Parses and rolls forward one date. `None` when the text is not a date.
pub fn normalize_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = parse_date(raw)?;
    if date < today {
        add_one_year(date)
    } else {
        Some(date)
    }
}

/// Normalizes every event date, drops unparseable ones, assigns ids and sorts by date.
pub fn normalize_events(raw: Vec<RawEvent>, today: NaiveDate) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = raw
        .into_iter()
        .filter_map(|event| match normalize_date(&event.date, today) {
            Some(date) => Some(TimelineEvent {
                id: Uuid::new_v4(),
                title: event.title.trim().to_string(),
                date,
                kind: event.kind,
            }),
            None => {
                warn!(title = %event.title, date = %event.date, "dropping event with unparseable date");
                None
            }
        })
        .collect();

    sort_events(&mut events);
    events
}

/// Key upcoming exams and deadlines for the career, dated on or after `today`.
pub async fn timeline_events(
    llm: &dyn Inference,
    career: &str,
    education_level: &str,
    today: NaiveDate,
) -> Result<FlowOutcome<Vec<TimelineEvent>>, AppError> {
    require_text("career", career)?;
    require_text("educationLevel", education_level)?;

    let today_text = today.format("%Y-%m-%d").to_string();
    let prompt = render(
        TIMELINE_EVENTS_TEMPLATE,
        &[
            ("career", career.trim()),
            ("education_level", education_level.trim()),
            ("tier_instruction", EDUCATION_TIER_INSTRUCTION),
            ("today", today_text.as_str()),
        ],
    );

    let outcome = invoke::<EventsReply>(llm, "timeline_events", &prompt).await?;
    Ok(outcome.and_then(|reply| FlowOutcome::non_empty(normalize_events(reply.events, today))))
}
