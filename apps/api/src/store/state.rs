//! Guidance State: everything remembered about one profile, and the reducer that
//! produces each new state from the previous one.
//!
//! CRITICAL: state is never mutated through a shared reference. Every change is
//! `state.reduce(action)`, which consumes the old value and returns the new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::career::{sort_by_suitability, CareerDetails, CareerSuggestion};
use crate::models::college::{CollegeRecommendation, PreferenceWeights, SavedCollege};
use crate::models::planning::{
    sort_events, ActivityEntry, DashboardContent, EventKind, SyllabusItem, TimelineEvent,
};
use crate::models::user::UserData;
use crate::quiz::wizard::QuizWizard;
use crate::quiz::{Answer, QuizAnswers};

/// The activity feed keeps only the most recent entries.
pub const ACTIVITY_LOG_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceState {
    pub quiz_draft: QuizWizard,
    pub quiz_answers: Option<QuizAnswers>,
    pub career_suggestions: Vec<CareerSuggestion>,
    pub college_recommendations: Vec<CollegeRecommendation>,
    pub personalized_colleges: Vec<CollegeRecommendation>,
    pub preference_weights: PreferenceWeights,
    pub chosen_career: Option<CareerDetails>,
    pub saved_colleges: Vec<SavedCollege>,
    pub syllabus: Vec<SyllabusItem>,
    pub syllabus_progress: BTreeMap<String, bool>,
    pub dashboard: Option<DashboardContent>,
    pub timeline: Vec<TimelineEvent>,
    pub activity_log: Vec<ActivityEntry>,
    pub is_authenticated: bool,
    pub user: Option<UserData>,
}

/// Partial edit of a timeline event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelineEventPatch {
    pub title: Option<String>,
    pub date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetQuizDraft(QuizWizard),
    SetQuizAnswers(QuizAnswers),
    SetCareerSuggestions(Vec<CareerSuggestion>),
    SetCollegeRecommendations(Vec<CollegeRecommendation>),
    SetPersonalizedColleges(Vec<CollegeRecommendation>),
    SetPreferenceWeights(PreferenceWeights),
    /// Picking a different career drops the previous career's dashboard, syllabus
    /// and generated timeline; custom events stay.
    ChooseCareer(CareerDetails),
    /// Ignored when a college with the same name is already saved.
    SaveCollege(SavedCollege),
    RemoveSavedCollege(String),
    /// Replaces the syllabus and prunes progress for items that no longer exist.
    SetSyllabus(Vec<SyllabusItem>),
    /// Appends items whose id and label are not already present.
    AddSyllabusItems(Vec<SyllabusItem>),
    ToggleSyllabusItem(String),
    RemoveSyllabusItem(String),
    SetDashboard(DashboardContent),
    /// Replaces generated events; custom events are kept.
    SetTimeline(Vec<TimelineEvent>),
    AddTimelineEvent(TimelineEvent),
    UpdateTimelineEvent(Uuid, TimelineEventPatch),
    RemoveTimelineEvent(Uuid),
    RecordActivity(ActivityEntry),
    Login(UserData),
    Logout,
    /// Clears everything except the login.
    Reset,
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl GuidanceState {
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SetQuizDraft(quiz_draft) => Self { quiz_draft, ..self },

            Action::SetQuizAnswers(answers) => Self {
                quiz_answers: Some(answers),
                ..self
            },

            Action::SetCareerSuggestions(suggestions) => Self {
                career_suggestions: sort_by_suitability(suggestions),
                ..self
            },

            Action::SetCollegeRecommendations(college_recommendations) => Self {
                college_recommendations,
                ..self
            },

            Action::SetPersonalizedColleges(personalized_colleges) => Self {
                personalized_colleges,
                ..self
            },

            Action::SetPreferenceWeights(preference_weights) => Self {
                preference_weights,
                ..self
            },

            Action::ChooseCareer(details) => {
                let unchanged = self
                    .chosen_career
                    .as_ref()
                    .is_some_and(|current| same_label(&current.title, &details.title));
                if unchanged {
                    return Self {
                        chosen_career: Some(details),
                        ..self
                    };
                }
                Self {
                    chosen_career: Some(details),
                    syllabus: Vec::new(),
                    syllabus_progress: BTreeMap::new(),
                    dashboard: None,
                    timeline: self
                        .timeline
                        .into_iter()
                        .filter(|e| e.kind == EventKind::Custom)
                        .collect(),
                    ..self
                }
            }

            Action::SaveCollege(college) => {
                if self
                    .saved_colleges
                    .iter()
                    .any(|c| c.college_name == college.college_name)
                {
                    return self;
                }
                let mut saved_colleges = self.saved_colleges;
                saved_colleges.push(college);
                Self {
                    saved_colleges,
                    ..self
                }
            }

            Action::RemoveSavedCollege(name) => Self {
                saved_colleges: self
                    .saved_colleges
                    .into_iter()
                    .filter(|c| c.college_name != name)
                    .collect(),
                ..self
            },

            Action::SetSyllabus(syllabus) => {
                let syllabus_progress = self
                    .syllabus_progress
                    .into_iter()
                    .filter(|(id, _)| syllabus.iter().any(|item| &item.id == id))
                    .collect();
                Self {
                    syllabus,
                    syllabus_progress,
                    ..self
                }
            }

            Action::AddSyllabusItems(items) => {
                let mut syllabus = self.syllabus;
                for item in items {
                    let duplicate = syllabus.iter().any(|existing| {
                        existing.id == item.id || same_label(&existing.label, &item.label)
                    });
                    if !duplicate && !item.label.trim().is_empty() {
                        syllabus.push(item);
                    }
                }
                Self { syllabus, ..self }
            }

            Action::ToggleSyllabusItem(id) => {
                if !self.syllabus.iter().any(|item| item.id == id) {
                    return self;
                }
                let mut syllabus_progress = self.syllabus_progress;
                let done = syllabus_progress.get(&id).copied().unwrap_or(false);
                syllabus_progress.insert(id, !done);
                Self {
                    syllabus_progress,
                    ..self
                }
            }

            Action::RemoveSyllabusItem(id) => {
                let mut syllabus_progress = self.syllabus_progress;
                syllabus_progress.remove(&id);
                Self {
                    syllabus: self.syllabus.into_iter().filter(|item| item.id != id).collect(),
                    syllabus_progress,
                    ..self
                }
            }

            Action::SetDashboard(content) => Self {
                dashboard: Some(content),
                ..self
            },

            Action::SetTimeline(events) => {
                let mut timeline: Vec<TimelineEvent> = self
                    .timeline
                    .into_iter()
                    .filter(|e| e.kind == EventKind::Custom)
                    .chain(events)
                    .collect();
                sort_events(&mut timeline);
                Self { timeline, ..self }
            }

            Action::AddTimelineEvent(event) => {
                let mut timeline = self.timeline;
                timeline.push(event);
                sort_events(&mut timeline);
                Self { timeline, ..self }
            }

            Action::UpdateTimelineEvent(id, patch) => {
                let mut timeline = self.timeline;
                if let Some(event) = timeline.iter_mut().find(|e| e.id == id) {
                    if let Some(title) = patch.title {
                        event.title = title;
                    }
                    if let Some(date) = patch.date {
                        event.date = date;
                    }
                }
                sort_events(&mut timeline);
                Self { timeline, ..self }
            }

            Action::RemoveTimelineEvent(id) => Self {
                timeline: self.timeline.into_iter().filter(|e| e.id != id).collect(),
                ..self
            },

            Action::RecordActivity(entry) => {
                let mut activity_log = Vec::with_capacity(ACTIVITY_LOG_LIMIT);
                activity_log.push(entry);
                activity_log.extend(self.activity_log.into_iter().take(ACTIVITY_LOG_LIMIT - 1));
                Self {
                    activity_log,
                    ..self
                }
            }

            Action::Login(user) => Self {
                is_authenticated: true,
                user: Some(user),
                ..self
            },

            Action::Logout => Self::default(),

            Action::Reset => Self {
                is_authenticated: self.is_authenticated,
                user: self.user,
                ..Self::default()
            },
        }
    }

    /// The dashboard opens once suggestions exist and a career has been chosen.
    pub fn is_dashboard_unlocked(&self) -> bool {
        !self.career_suggestions.is_empty() && self.chosen_career.is_some()
    }

    /// Share of syllabus items ticked off, 0 – 100.
    pub fn syllabus_progress_percent(&self) -> u32 {
        if self.syllabus.is_empty() {
            return 0;
        }
        let done = self
            .syllabus
            .iter()
            .filter(|item| self.syllabus_progress.get(&item.id).copied().unwrap_or(false))
            .count();
        ((done * 100) as f64 / self.syllabus.len() as f64).round() as u32
    }

    /// Education level from the last completed quiz.
    pub fn education_level(&self) -> Option<&str> {
        match self.quiz_answers.as_ref()?.get("educationLevel")? {
            Answer::Text(level) if !level.trim().is_empty() => Some(level.as_str()),
            _ => None,
        }
    }

    pub fn suggested_careers(&self) -> Vec<String> {
        self.career_suggestions.iter().map(|s| s.name.clone()).collect()
    }

    pub fn has_syllabus_item(&self, id: &str) -> bool {
        self.syllabus.iter().any(|item| item.id == id)
    }

    pub fn has_timeline_event(&self, id: Uuid) -> bool {
        self.timeline.iter().any(|e| e.id == id)
    }

    pub fn has_saved_college(&self, name: &str) -> bool {
        self.saved_colleges.iter().any(|c| c.college_name == name)
    }
}
