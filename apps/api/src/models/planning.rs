use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Window, in days, inside which an upcoming event counts as "soon".
const SOON_WINDOW_DAYS: i64 = 30;

/// A topic or skill the student can tick off on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Article,
    Video,
    Course,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
}

/// Model-produced dashboard content besides the syllabus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardContent {
    #[serde(default)]
    pub resources: Vec<DashboardResource>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Exam,
    Deadline,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
}

/// How an event sits relative to today, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Past,
    Soon,
    Future,
}

impl EventStatus {
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        let days_until = (date - today).num_days();
        if days_until < 0 {
            EventStatus::Past
        } else if days_until <= SOON_WINDOW_DAYS {
            EventStatus::Soon
        } else {
            EventStatus::Future
        }
    }
}

/// Sorts events ascending by date. Stable for events on the same day.
pub fn sort_events(events: &mut [TimelineEvent]) {
    events.sort_by_key(|e| e.date);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub week: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub name: String,
    pub description: String,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Assessment,
    CareerChosen,
    CollegeSaved,
    CollegesRecommended,
}

/// One line of the profile's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub description: String,
    pub kind: ActivityKind,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_classify_past_soon_future() {
        let today = date("2024-06-01");
        assert_eq!(EventStatus::classify(date("2024-05-31"), today), EventStatus::Past);
        assert_eq!(EventStatus::classify(today, today), EventStatus::Soon);
        assert_eq!(EventStatus::classify(date("2024-07-01"), today), EventStatus::Soon);
        assert_eq!(EventStatus::classify(date("2024-07-02"), today), EventStatus::Future);
    }

    #[test]
    fn test_sort_events_ascending() {
        let mut events = vec![
            TimelineEvent {
                id: Uuid::new_v4(),
                title: "CAT".to_string(),
                date: date("2024-11-24"),
                kind: EventKind::Exam,
            },
            TimelineEvent {
                id: Uuid::new_v4(),
                title: "GATE registration".to_string(),
                date: date("2024-09-26"),
                kind: EventKind::Deadline,
            },
        ];
        sort_events(&mut events);
        assert_eq!(events[0].title, "GATE registration");
    }

    #[test]
    fn test_event_kind_wire_names() {
        let kind: EventKind = serde_json::from_str("\"deadline\"").unwrap();
        assert_eq!(kind, EventKind::Deadline);
        assert_eq!(serde_json::to_string(&EventKind::Custom).unwrap(), "\"custom\"");
    }

    #[test]
    fn test_dashboard_resource_uses_type_key() {
        let resource: DashboardResource =
            serde_json::from_str(r#"{"title": "Cracking the PM Interview", "type": "book"}"#)
                .unwrap();
        assert_eq!(resource.kind, ResourceKind::Book);
    }
}
