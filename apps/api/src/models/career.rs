use serde::{Deserialize, Serialize};

/// A career path proposed from the student's quiz answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSuggestion {
    pub name: String,
    /// One short sentence.
    pub description: String,
    /// 0 – 100
    pub suitability_score: f64,
}

/// A free study material with a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    pub title: String,
    pub url: String,
}

/// Detailed overview of one career. The chosen career of a profile is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDetails {
    /// Filled from the requested career; the model does not echo it back.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub job_duties: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub potential_salary: String,
    #[serde(default)]
    pub job_growth: String,
    #[serde(default)]
    pub entrepreneurial_options: Vec<String>,
    #[serde(default)]
    pub scholarships: Vec<String>,
    #[serde(default)]
    pub academic_pathway: String,
    #[serde(default)]
    pub study_materials: Vec<StudyMaterial>,
}

/// Orders suggestions by descending suitability. Stable: equal scores keep model order.
pub fn sort_by_suitability(mut suggestions: Vec<CareerSuggestion>) -> Vec<CareerSuggestion> {
    suggestions.sort_by(|a, b| b.suitability_score.total_cmp(&a.suitability_score));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str, score: f64) -> CareerSuggestion {
        CareerSuggestion {
            name: name.to_string(),
            description: String::new(),
            suitability_score: score,
        }
    }

    #[test]
    fn test_sort_by_suitability_descending_and_stable() {
        let sorted = sort_by_suitability(vec![
            suggestion("Architect", 70.0),
            suggestion("Data Scientist", 92.0),
            suggestion("Architect", 70.0),
            suggestion("Teacher", 81.0),
        ]);
        let names: Vec<_> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Data Scientist", "Teacher", "Architect", "Architect"]);
    }

    #[test]
    fn test_career_details_tolerates_missing_lists() {
        let details: CareerDetails =
            serde_json::from_str(r#"{"title": "Civil Engineer", "potentialSalary": "₹6,00,000"}"#)
                .unwrap();
        assert_eq!(details.title, "Civil Engineer");
        assert!(details.job_duties.is_empty());
        assert_eq!(details.potential_salary, "₹6,00,000");
    }
}
