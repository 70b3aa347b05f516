//! College flows: plain recommendations, personalized recommendations with attribute
//! scores, and location-aware search. All three pass through the government filter.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::prompts::{
    COLLEGE_RECOMMENDATIONS_TEMPLATE, PERSONALIZED_COLLEGES_TEMPLATE, SEARCH_COLLEGES_TEMPLATE,
};
use crate::flows::{invoke, keep_government, require_text, FlowOutcome};
use crate::llm_client::prompts::{
    bullet_list, render, EDUCATION_TIER_INSTRUCTION, GOVERNMENT_ONLY_INSTRUCTION,
};
use crate::llm_client::Inference;
use crate::models::college::{
    CollegeRecommendation, CollegeSearchResult, PreferenceWeights, SortBy, ATTRIBUTE_NAMES,
};
use crate::recommendations::domain_filter::InstitutionFilter;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRecommendationsInput {
    pub suggested_careers: Vec<String>,
    pub education_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedCollegesInput {
    pub suggested_careers: Vec<String>,
    pub education_level: String,
    pub preferences: PreferenceWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCollegesInput {
    pub user_location: String,
    #[serde(default)]
    pub max_distance: Option<f64>,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub education_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsReply {
    #[serde(default)]
    college_recommendations: Vec<CollegeRecommendation>,
}

#[derive(Debug, Deserialize)]
struct PersonalizedReply {
    #[serde(default)]
    recommendations: Vec<CollegeRecommendation>,
}

#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(default)]
    colleges: Vec<CollegeSearchResult>,
}

fn validate_careers(careers: &[String], education_level: &str) -> Result<(), AppError> {
    if careers.iter().all(|c| c.trim().is_empty()) {
        return Err(AppError::Validation(
            "at least one suggested career is required".to_string(),
        ));
    }
    require_text("educationLevel", education_level)
}

fn career_lines(careers: &[String]) -> String {
    let careers: Vec<String> = careers
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    bullet_list(&careers)
}

fn clamp_score(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Recommends government colleges for the suggested careers.
pub async fn college_recommendations(
    llm: &dyn Inference,
    filter: &InstitutionFilter,
    input: &CollegeRecommendationsInput,
) -> Result<FlowOutcome<Vec<CollegeRecommendation>>, AppError> {
    validate_careers(&input.suggested_careers, &input.education_level)?;

    let careers = career_lines(&input.suggested_careers);
    let prompt = render(
        COLLEGE_RECOMMENDATIONS_TEMPLATE,
        &[
            ("education_level", input.education_level.trim()),
            ("careers", careers.as_str()),
            ("tier_instruction", EDUCATION_TIER_INSTRUCTION),
            ("government_instruction", GOVERNMENT_ONLY_INSTRUCTION),
        ],
    );

    let outcome =
        invoke::<RecommendationsReply>(llm, "college_recommendations", &prompt).await?;

    Ok(outcome.and_then(|reply| {
        keep_government(
            "college_recommendations",
            filter,
            reply.college_recommendations,
            |rec| rec.college_name.as_str(),
        )
    }))
}

/// Recommends government colleges with per-attribute scores, unranked.
/// Scores outside 0 – 100 are clamped; unknown attribute names are dropped.
pub async fn personalized_colleges(
    llm: &dyn Inference,
    filter: &InstitutionFilter,
    input: &PersonalizedCollegesInput,
) -> Result<FlowOutcome<Vec<CollegeRecommendation>>, AppError> {
    validate_careers(&input.suggested_careers, &input.education_level)?;
    input.preferences.validate()?;

    let careers = career_lines(&input.suggested_careers);
    let preferences = ATTRIBUTE_NAMES
        .iter()
        .map(|name| format!("- {name}: {}", input.preferences.get(name)))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = render(
        PERSONALIZED_COLLEGES_TEMPLATE,
        &[
            ("education_level", input.education_level.trim()),
            ("careers", careers.as_str()),
            ("preferences", preferences.as_str()),
            ("tier_instruction", EDUCATION_TIER_INSTRUCTION),
            ("government_instruction", GOVERNMENT_ONLY_INSTRUCTION),
        ],
    );

    let outcome = invoke::<PersonalizedReply>(llm, "personalized_colleges", &prompt).await?;

    Ok(outcome.and_then(|reply| {
        let cleaned = reply
            .recommendations
            .into_iter()
            .map(|mut rec| {
                if let Some(attributes) = rec.attributes.as_mut() {
                    attributes.retain(|name, _| ATTRIBUTE_NAMES.contains(&name.as_str()));
                    for value in attributes.values_mut() {
                        *value = clamp_score(*value, 100.0);
                    }
                }
                rec
            })
            .collect();
        keep_government("personalized_colleges", filter, cleaned, |rec| {
            rec.college_name.as_str()
        })
    }))
}

/// Searches government colleges around the student's location.
pub async fn search_colleges(
    llm: &dyn Inference,
    filter: &InstitutionFilter,
    input: &SearchCollegesInput,
) -> Result<FlowOutcome<Vec<CollegeSearchResult>>, AppError> {
    require_text("userLocation", &input.user_location)?;
    if let Some(max) = input.max_distance {
        if !(max.is_finite() && max > 0.0) {
            return Err(AppError::Validation(
                "maxDistance must be greater than 0".to_string(),
            ));
        }
    }

    let max_distance = input
        .max_distance
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| "no limit".to_string());
    let stream = input
        .stream
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("any");
    let education_level = input
        .education_level
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("not specified");

    let prompt = render(
        SEARCH_COLLEGES_TEMPLATE,
        &[
            ("location", input.user_location.trim()),
            ("stream", stream),
            ("max_distance", max_distance.as_str()),
            ("sort_by", input.sort_by.as_str()),
            ("education_level", education_level),
            ("tier_instruction", EDUCATION_TIER_INSTRUCTION),
            ("government_instruction", GOVERNMENT_ONLY_INSTRUCTION),
        ],
    );

    let outcome = invoke::<SearchReply>(llm, "search_colleges", &prompt).await?;

    Ok(outcome.and_then(|reply| {
        let cleaned = reply
            .colleges
            .into_iter()
            .map(|mut college| {
                college.rating = clamp_score(college.rating, 5.0);
                college.distance = clamp_score(college.distance, f64::MAX);
                college
            })
            .collect();
        keep_government("search_colleges", filter, cleaned, |c| c.college_name.as_str())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::EmptyReason;
    use crate::llm_client::testing::ScriptedInference;
    use pretty_assertions::assert_eq;

    fn careers() -> Vec<String> {
        vec!["Civil Engineer".to_string(), "Urban Planner".to_string()]
    }

    #[tokio::test]
    async fn test_recommendations_drop_private_colleges() {
        let llm = ScriptedInference::json(
            r#"{"collegeRecommendations": [
                {"collegeName": "Indian Institute of Technology Bombay", "websiteUrl": "https://www.iitb.ac.in"},
                {"collegeName": "Stanford University", "websiteUrl": "https://stanford.edu"}
            ]}"#,
        );
        let input = CollegeRecommendationsInput {
            suggested_careers: careers(),
            education_level: "Completed Class 12".to_string(),
        };

        let outcome = college_recommendations(&llm, &InstitutionFilter::default(), &input)
            .await
            .unwrap();
        let FlowOutcome::Ready(recs) = outcome else {
            panic!("expected recommendations");
        };
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].college_name, "Indian Institute of Technology Bombay");

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("- Urban Planner"));
        assert!(prompt.contains("government-funded"));
    }

    #[tokio::test]
    async fn test_recommendations_all_filtered_is_filtered_out() {
        let llm = ScriptedInference::json(
            r#"{"collegeRecommendations": [{"collegeName": "Harvard University"}]}"#,
        );
        let input = CollegeRecommendationsInput {
            suggested_careers: careers(),
            education_level: "Undergraduate".to_string(),
        };
        let outcome = college_recommendations(&llm, &InstitutionFilter::default(), &input)
            .await
            .unwrap();
        assert_eq!(outcome, FlowOutcome::Empty(EmptyReason::FilteredOut));
    }

    #[tokio::test]
    async fn test_recommendations_require_a_career() {
        let llm = ScriptedInference::json("{}");
        let input = CollegeRecommendationsInput {
            suggested_careers: vec![" ".to_string()],
            education_level: "Undergraduate".to_string(),
        };
        let result = college_recommendations(&llm, &InstitutionFilter::default(), &input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_personalized_clamps_and_drops_unknown_attributes() {
        let llm = ScriptedInference::json(
            r#"{"recommendations": [{
                "collegeName": "NIT Trichy - B.Tech in Civil Engineering",
                "websiteUrl": "https://www.nitt.edu",
                "reason": "Strong faculty",
                "attributes": {"distance": 130, "labs": -4, "programs": 80, "canteen": 50}
            }]}"#,
        );
        let input = PersonalizedCollegesInput {
            suggested_careers: careers(),
            education_level: "Completed Class 12".to_string(),
            preferences: PreferenceWeights::default(),
        };

        let outcome = personalized_colleges(&llm, &InstitutionFilter::default(), &input)
            .await
            .unwrap();
        let FlowOutcome::Ready(recs) = outcome else {
            panic!("expected recommendations");
        };
        let attributes = recs[0].attributes.as_ref().unwrap();
        assert_eq!(attributes.get("distance"), Some(&100.0));
        assert_eq!(attributes.get("labs"), Some(&0.0));
        assert_eq!(attributes.get("programs"), Some(&80.0));
        assert!(!attributes.contains_key("canteen"));

        assert!(llm.last_prompt().unwrap().contains("- cutoffs: 90"));
    }

    #[tokio::test]
    async fn test_personalized_rejects_out_of_range_weights() {
        let llm = ScriptedInference::json("{}");
        let mut preferences = PreferenceWeights::default();
        preferences.0.insert("hostel".to_string(), 250);
        let input = PersonalizedCollegesInput {
            suggested_careers: careers(),
            education_level: "Completed Class 12".to_string(),
            preferences,
        };
        let result = personalized_colleges(&llm, &InstitutionFilter::default(), &input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_filters_and_clamps_rating() {
        let llm = ScriptedInference::json(
            r#"{"colleges": [
                {"collegeName": "IIT Madras", "location": "Chennai", "distance": 12, "rating": 7.5},
                {"collegeName": "SRM Institute of Science and Technology", "rating": 4.1}
            ]}"#,
        );
        let input = SearchCollegesInput {
            user_location: "Chennai, Tamil Nadu".to_string(),
            max_distance: Some(50.0),
            stream: None,
            sort_by: SortBy::Distance,
            education_level: None,
        };

        let outcome = search_colleges(&llm, &InstitutionFilter::default(), &input)
            .await
            .unwrap();
        let FlowOutcome::Ready(colleges) = outcome else {
            panic!("expected colleges");
        };
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].rating, 5.0);

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("Maximum distance: 50 km"));
        assert!(prompt.contains("Sort by: distance"));
        assert!(prompt.contains("Desired stream/career: any"));
    }

    #[tokio::test]
    async fn test_search_rejects_non_positive_distance() {
        let llm = ScriptedInference::json("{}");
        let input = SearchCollegesInput {
            user_location: "Pune".to_string(),
            max_distance: Some(0.0),
            stream: None,
            sort_by: SortBy::default(),
            education_level: None,
        };
        let result = search_colleges(&llm, &InstitutionFilter::default(), &input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_search_input_defaults_sort_to_ranking() {
        let input: SearchCollegesInput =
            serde_json::from_str(r#"{"userLocation": "Jaipur"}"#).unwrap();
        assert_eq!(input.sort_by, SortBy::Ranking);
        assert_eq!(input.max_distance, None);
    }
}
