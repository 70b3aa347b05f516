use serde::Serialize;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice {
        options: &'static [&'static str],
    },
    MultiChoice {
        options: &'static [&'static str],
        max: usize,
    },
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

/// The quiz, in the order it is asked.
pub static QUESTIONS: [Question; 9] = [
    Question {
        id: "gender",
        prompt: "What is your gender?",
        kind: QuestionKind::SingleChoice {
            options: &["Male", "Female", "Prefer not to say"],
        },
        placeholder: None,
    },
    Question {
        id: "age",
        prompt: "What is your age?",
        kind: QuestionKind::Number,
        placeholder: Some("e.g., 18"),
    },
    Question {
        id: "educationLevel",
        prompt: "What is your current education level?",
        kind: QuestionKind::SingleChoice {
            options: &[
                "Completed Class 10",
                "Completed Class 12",
                "Undergraduate",
                "Graduate",
                "Other",
            ],
        },
        placeholder: None,
    },
    Question {
        id: "location",
        prompt: "Which state do you live in?",
        kind: QuestionKind::Text,
        placeholder: Some("e.g., Maharashtra"),
    },
    Question {
        id: "marks",
        prompt: "What were your overall marks in 12th grade (in %)?",
        kind: QuestionKind::Number,
        placeholder: Some("e.g., 85"),
    },
    Question {
        id: "interest",
        prompt: "Which of these areas sparks your curiosity the most?",
        kind: QuestionKind::SingleChoice {
            options: &[
                "Technology and Innovation",
                "Arts and Creativity",
                "Science and Research",
                "Business and Entrepreneurship",
                "Helping and Nurturing Others",
            ],
        },
        placeholder: None,
    },
    Question {
        id: "aptitude",
        prompt: "You are faced with a complex logical puzzle. How do you feel?",
        kind: QuestionKind::SingleChoice {
            options: &[
                "Excited and ready to solve it systematically.",
                "A bit intimidated, but willing to try.",
                "Prefer to work on something more creative.",
                "I would rather ask for help or collaborate.",
            ],
        },
        placeholder: None,
    },
    Question {
        id: "skills",
        prompt: "Which of these skills do you enjoy using or want to develop? (Select up to 3)",
        kind: QuestionKind::MultiChoice {
            options: &[
                "Problem-solving and logical thinking",
                "Creative expression and design",
                "Data analysis and interpretation",
                "Communication and public speaking",
                "Leadership and team management",
                "Hands-on building and crafting",
            ],
            max: 3,
        },
        placeholder: None,
    },
    Question {
        id: "personality",
        prompt: "How do you prefer to work?",
        kind: QuestionKind::SingleChoice {
            options: &[
                "Independently, focusing on my own tasks",
                "Collaboratively in a team environment",
                "A mix of both independent and team work",
            ],
        },
        placeholder: None,
    },
];

pub fn find(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_question_ids_are_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("marks").map(|q| q.kind), Some(QuestionKind::Number));
        assert!(find("favouriteColour").is_none());
    }

    #[test]
    fn test_serializes_kind_inline() {
        let value = serde_json::to_value(QUESTIONS[7]).unwrap();
        assert_eq!(value["id"], "skills");
        assert_eq!(value["type"], "multi_choice");
        assert_eq!(value["max"], 3);
        assert_eq!(value["options"].as_array().unwrap().len(), 6);
        assert!(value.get("placeholder").is_none());
    }
}
