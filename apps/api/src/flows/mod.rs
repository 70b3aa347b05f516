// Flows: one typed async function per model prompt.
//
// Every flow validates its input before rendering a prompt, calls the model once
// through the `Inference` seam, coerces the JSON reply into its output type and
// applies any deterministic post-processing (clamping, government filter, dates).

pub mod careers;
pub mod colleges;
pub mod handlers;
pub mod planning;
pub mod prompts;
pub mod timeline;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{complete_json, Inference, JsonReply};
use crate::recommendations::domain_filter::InstitutionFilter;

/// Why a flow produced nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The model refused or the safety settings blocked the reply.
    Declined,
    /// The reply parsed but carried no items.
    NoContent,
    /// Every item was removed by the government-institution filter.
    FilteredOut,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::Declined => "The request could not be answered. Try rephrasing it.",
            EmptyReason::NoContent => "No results were found. Please try again.",
            EmptyReason::FilteredOut => "No colleges matched the government-institution criteria.",
        }
    }
}

/// Result of a flow that ran successfully end to end.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome<T> {
    Ready(T),
    Empty(EmptyReason),
}

impl<T> FlowOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FlowOutcome<U> {
        match self {
            FlowOutcome::Ready(value) => FlowOutcome::Ready(f(value)),
            FlowOutcome::Empty(reason) => FlowOutcome::Empty(reason),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> FlowOutcome<U>) -> FlowOutcome<U> {
        match self {
            FlowOutcome::Ready(value) => f(value),
            FlowOutcome::Empty(reason) => FlowOutcome::Empty(reason),
        }
    }
}

impl<T> FlowOutcome<Vec<T>> {
    /// `Empty(NoContent)` for an empty list.
    pub fn non_empty(items: Vec<T>) -> Self {
        if items.is_empty() {
            FlowOutcome::Empty(EmptyReason::NoContent)
        } else {
            FlowOutcome::Ready(items)
        }
    }
}

/// Wire shape of every flow endpoint.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FlowResponse<T> {
    Ready {
        data: T,
    },
    Empty {
        reason: EmptyReason,
        message: &'static str,
    },
}

impl<T> From<FlowOutcome<T>> for FlowResponse<T> {
    fn from(outcome: FlowOutcome<T>) -> Self {
        match outcome {
            FlowOutcome::Ready(data) => FlowResponse::Ready { data },
            FlowOutcome::Empty(reason) => FlowResponse::Empty {
                reason,
                message: reason.message(),
            },
        }
    }
}

/// Sends one rendered prompt and parses the JSON reply into `T`.
async fn invoke<T: DeserializeOwned>(
    llm: &dyn Inference,
    flow: &'static str,
    prompt: &str,
) -> Result<FlowOutcome<T>, AppError> {
    let reply = complete_json::<T>(llm, prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("{flow} failed: {e}")))?;

    match reply {
        JsonReply::Parsed(value) => {
            info!(flow, "flow completed");
            Ok(FlowOutcome::Ready(value))
        }
        JsonReply::Declined { reason } => {
            warn!(flow, %reason, "model declined");
            Ok(FlowOutcome::Empty(EmptyReason::Declined))
        }
    }
}

/// Rejects blank required strings before any network call.
fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Applies the government-institution filter to a parsed college list.
fn keep_government<T>(
    flow: &'static str,
    filter: &InstitutionFilter,
    items: Vec<T>,
    name_of: impl Fn(&T) -> &str,
) -> FlowOutcome<Vec<T>> {
    if items.is_empty() {
        return FlowOutcome::Empty(EmptyReason::NoContent);
    }

    let before = items.len();
    let kept = filter.retain(items, name_of);
    if kept.len() < before {
        warn!(flow, dropped = before - kept.len(), "dropped non-government institutions");
    }

    if kept.is_empty() {
        FlowOutcome::Empty(EmptyReason::FilteredOut)
    } else {
        FlowOutcome::Ready(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flow_response_ready_shape() {
        let response: FlowResponse<Vec<u32>> = FlowOutcome::Ready(vec![1, 2]).into();
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"status": "ready", "data": [1, 2]})
        );
    }

    #[test]
    fn test_flow_response_empty_shape() {
        let response: FlowResponse<Vec<u32>> =
            FlowOutcome::Empty(EmptyReason::FilteredOut).into();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["status"], "empty");
        assert_eq!(value["reason"], "filtered_out");
        assert!(value["message"].as_str().unwrap().contains("No colleges matched"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(
            FlowOutcome::<Vec<u32>>::non_empty(vec![]),
            FlowOutcome::Empty(EmptyReason::NoContent)
        );
        assert_eq!(FlowOutcome::non_empty(vec![3]), FlowOutcome::Ready(vec![3]));
    }

    #[test]
    fn test_keep_government_distinguishes_no_content_from_filtered() {
        let filter = InstitutionFilter::default();
        let none: Vec<&str> = vec![];
        assert_eq!(
            keep_government("test", &filter, none, |s| s),
            FlowOutcome::Empty(EmptyReason::NoContent)
        );
        assert_eq!(
            keep_government("test", &filter, vec!["Stanford University"], |s| s),
            FlowOutcome::Empty(EmptyReason::FilteredOut)
        );
    }

    #[test]
    fn test_require_text_rejects_whitespace() {
        assert!(matches!(
            require_text("career", "   "),
            Err(AppError::Validation(_))
        ));
        assert!(require_text("career", "Architect").is_ok());
    }
}
