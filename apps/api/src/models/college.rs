use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The fixed attribute dimensions every scored college carries.
pub const ATTRIBUTE_NAMES: [&str; 7] = [
    "distance",
    "programs",
    "labs",
    "hostel",
    "cutoffs",
    "placements",
    "accessibility",
];

/// Per-dimension scores, each 0 – 100.
pub type AttributeScores = BTreeMap<String, f64>;

/// A recommended college. `attributes` is present only for personalized recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRecommendation {
    pub college_name: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeScores>,
}

/// A college the student explicitly shortlisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCollege {
    pub college_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeScores>,
}

impl From<&CollegeRecommendation> for SavedCollege {
    fn from(rec: &CollegeRecommendation) -> Self {
        Self {
            college_name: rec.college_name.clone(),
            website_url: (!rec.website_url.is_empty()).then(|| rec.website_url.clone()),
            reason: rec.reason.clone(),
            attributes: rec.attributes.clone(),
        }
    }
}

/// How much the student cares about each attribute, 0 – 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceWeights(pub BTreeMap<String, u32>);

impl Default for PreferenceWeights {
    fn default() -> Self {
        let defaults = [
            ("distance", 50),
            ("programs", 70),
            ("labs", 80),
            ("hostel", 60),
            ("cutoffs", 90),
            ("placements", 85),
            ("accessibility", 75),
        ];
        Self(
            defaults
                .into_iter()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
        )
    }
}

impl PreferenceWeights {
    pub fn get(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Rejects weights above 100 and names outside the attribute dimensions.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, weight) in &self.0 {
            if !ATTRIBUTE_NAMES.contains(&name.as_str()) {
                return Err(AppError::Validation(format!(
                    "unknown preference '{name}'; expected one of {}",
                    ATTRIBUTE_NAMES.join(", ")
                )));
            }
            if *weight > 100 {
                return Err(AppError::Validation(format!(
                    "preference '{name}' must be between 0 and 100, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

/// Sort order requested for a college search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Ranking,
    Fees,
    Distance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Ranking => "ranking",
            SortBy::Fees => "fees",
            SortBy::Distance => "distance",
        }
    }
}

/// One hit of a location-aware college search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSearchResult {
    pub college_name: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub location: String,
    /// Approximate kilometres from the student.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub ranking: String,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub courses: Vec<String>,
    /// 0 – 5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub entrance_exams: Vec<String>,
    #[serde(default)]
    pub admission_criteria: String,
}
