//! Fit Scoring: ranks candidates by how well their attribute scores match the
//! student's importance weights.
//!
//! `fit = round( Σ weight[n] · attribute[n] / Σ weight[n] )` over the attribute names,
//! and `0` when every weight is zero. Missing attributes count as 0; weights for names
//! outside the attribute set are ignored.
//!
//! Pure and cheap: re-run synchronously on every preference change.

use serde::Serialize;

use crate::models::college::{CollegeRecommendation, PreferenceWeights, SavedCollege};

/// Anything that exposes named 0 – 100 attribute scores.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<f64>;
}

impl AttributeSource for CollegeRecommendation {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.as_ref().and_then(|a| a.get(name).copied())
    }
}

impl AttributeSource for SavedCollege {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.as_ref().and_then(|a| a.get(name).copied())
    }
}

/// A candidate annotated with its fit percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitRanked<T> {
    #[serde(flatten)]
    pub item: T,
    /// 0 – 100
    pub fit: u32,
}

/// Computes the weighted-average fit of a single candidate.
pub fn fit_score<T: AttributeSource>(
    attribute_names: &[&str],
    weights: &PreferenceWeights,
    candidate: &T,
) -> u32 {
    let mut weighted_sum = 0.0_f64;
    let mut total_weight = 0_u64;

    for name in attribute_names {
        let weight = weights.get(name);
        let attribute = candidate.attribute(name).unwrap_or(0.0);
        weighted_sum += f64::from(weight) * attribute;
        total_weight += u64::from(weight);
    }

    if total_weight == 0 {
        return 0;
    }

    (weighted_sum / total_weight as f64).round().clamp(0.0, 100.0) as u32
}

/// Scores every candidate and returns them by descending fit.
/// Ties keep their input order. Inputs are left untouched.
pub fn rank_by_fit<T: AttributeSource + Clone>(
    attribute_names: &[&str],
    weights: &PreferenceWeights,
    candidates: &[T],
) -> Vec<FitRanked<T>> {
    let mut ranked: Vec<FitRanked<T>> = candidates
        .iter()
        .map(|candidate| FitRanked {
            fit: fit_score(attribute_names, weights, candidate),
            item: candidate.clone(),
        })
        .collect();

    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.fit.cmp(&a.fit));
    ranked
}
