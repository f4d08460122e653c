//! Action dispatch surface.
//!
//! Maps named actions with JSON payloads onto the pipeline stages. Every
//! outcome, including unknown actions, malformed payloads, and store
//! failures, is a well-formed response with an explicit `success` flag;
//! nothing escapes `dispatch` as an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    AssignmentResult, Defect, Diagnosis, MatchResult, Requirement, Result, TriageError,
};
use crate::pipeline::{TriagePipeline, TriageReport};

/// An incoming action request: a name plus a free-form JSON payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionEvent {
    pub action: String,

    #[serde(default)]
    pub payload: Value,
}

impl ActionEvent {
    pub fn new(action: impl Into<String>, payload: Value) -> Self {
        Self {
            action: action.into(),
            payload,
        }
    }
}

/// Typed response per action; callers branch on the tag, never on field
/// presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionResponse {
    Linked {
        success: bool,
        result: MatchResult,
    },
    Diagnosed {
        success: bool,
        diagnosis: Diagnosis,
    },
    Assigned {
        success: bool,
        assignment: AssignmentResult,
    },
    Triaged {
        success: bool,
        report: TriageReport,
    },
    Error {
        success: bool,
        message: String,
    },
}

impl ActionResponse {
    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Deserialize)]
struct LinkPayload {
    #[serde(alias = "defect")]
    defect_text: String,
}

#[derive(Deserialize)]
struct DiagnosePayload {
    #[serde(alias = "defect")]
    defect_text: String,

    #[serde(alias = "requirement")]
    requirement_text: String,

    #[serde(default)]
    requirement_id: String,

    #[serde(default)]
    observed_latency_ms: u64,
}

#[derive(Deserialize)]
struct AssignPayload {
    #[serde(alias = "req_id")]
    requirement_id: String,
}

#[derive(Deserialize)]
struct TriagePayload {
    #[serde(alias = "defect")]
    defect_text: String,

    #[serde(default)]
    observed_latency_ms: u64,
}

/// Routes named actions to the pipeline stages.
#[derive(Clone)]
pub struct ActionDispatcher {
    pipeline: TriagePipeline,
}

impl ActionDispatcher {
    pub fn new(pipeline: TriagePipeline) -> Self {
        Self { pipeline }
    }

    /// Handle one action event. Never fails; failures become
    /// `ActionResponse::Error`.
    pub async fn dispatch(&self, event: ActionEvent) -> ActionResponse {
        debug!("Dispatching action '{}'", event.action);

        let outcome = match event.action.as_str() {
            "find-link" => self.find_link(event.payload).await,
            "analyze-cause" => self.analyze_cause(event.payload).await,
            "recommend-assignee" => self.recommend_assignee(event.payload).await,
            "triage" => self.triage(event.payload).await,
            _ => return ActionResponse::error("Unknown action"),
        };

        outcome.unwrap_or_else(|err| ActionResponse::error(err.to_string()))
    }

    async fn find_link(&self, payload: Value) -> Result<ActionResponse> {
        let payload: LinkPayload = decode(payload)?;
        let result = self.pipeline.linker().link(&payload.defect_text).await?;
        Ok(ActionResponse::Linked {
            success: true,
            result,
        })
    }

    async fn analyze_cause(&self, payload: Value) -> Result<ActionResponse> {
        let payload: DiagnosePayload = decode(payload)?;
        let defect =
            Defect::new(payload.defect_text).with_observed_latency(payload.observed_latency_ms);
        let requirement = Requirement::new(payload.requirement_id, payload.requirement_text);

        let diagnosis = self.pipeline.diagnoser().diagnose(&defect, &requirement).await;
        Ok(ActionResponse::Diagnosed {
            success: true,
            diagnosis,
        })
    }

    async fn recommend_assignee(&self, payload: Value) -> Result<ActionResponse> {
        let payload: AssignPayload = decode(payload)?;
        let assignment = self.pipeline.scorer().rank(&payload.requirement_id).await?;
        Ok(ActionResponse::Assigned {
            success: true,
            assignment,
        })
    }

    async fn triage(&self, payload: Value) -> Result<ActionResponse> {
        let payload: TriagePayload = decode(payload)?;
        let defect =
            Defect::new(payload.defect_text).with_observed_latency(payload.observed_latency_ms);

        let report = self.pipeline.run(&defect).await?;
        Ok(ActionResponse::Triaged {
            success: true,
            report,
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(TriageError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentScorer;
    use crate::diagnoser::Diagnoser;
    use crate::domain::{MatchMethod, RootCause};
    use crate::linker::Linker;
    use serde_json::json;
    use std::sync::Arc;
    use triage_stores::demo::{demo_catalog, demo_history, demo_workload};

    fn dispatcher() -> ActionDispatcher {
        ActionDispatcher::new(TriagePipeline::new(
            Linker::new(Arc::new(demo_catalog())),
            Diagnoser::new(),
            AssignmentScorer::new(Arc::new(demo_history()), Arc::new(demo_workload())),
        ))
    }

    #[tokio::test]
    async fn test_unknown_action_is_typed_failure() {
        let response = dispatcher()
            .dispatch(ActionEvent::new("reticulate-splines", json!({})))
            .await;

        assert_eq!(
            response,
            ActionResponse::Error {
                success: false,
                message: "Unknown action".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_find_link_action() {
        let response = dispatcher()
            .dispatch(ActionEvent::new(
                "find-link",
                json!({"defect_text": "Latency observed: 1458ms in PatientDAO access."}),
            ))
            .await;

        match response {
            ActionResponse::Linked { success, result } => {
                assert!(success);
                assert_eq!(result.method, MatchMethod::VectorSimilarity);
                assert_eq!(result.requirement.unwrap().id, "REQ-101");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_link_accepts_defect_alias() {
        let response = dispatcher()
            .dispatch(ActionEvent::new(
                "find-link",
                json!({"defect": "Regression of REQ-103 in prescription flow"}),
            ))
            .await;

        match response {
            ActionResponse::Linked { result, .. } => {
                assert_eq!(result.method, MatchMethod::HardLink);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_cause_action() {
        let response = dispatcher()
            .dispatch(ActionEvent::new(
                "analyze-cause",
                json!({
                    "defect_text": "User was able to view Lab Results without authentication.",
                    "requirement_text": "Only authenticated physicians may view results.",
                    "requirement_id": "REQ-104"
                }),
            ))
            .await;

        match response {
            ActionResponse::Diagnosed { success, diagnosis } => {
                assert!(success);
                assert_eq!(diagnosis.root_cause, RootCause::SecurityViolation);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_recommend_assignee_action() {
        let response = dispatcher()
            .dispatch(ActionEvent::new(
                "recommend-assignee",
                json!({"requirement_id": "REQ-103"}),
            ))
            .await;

        match response {
            ActionResponse::Assigned { success, assignment } => {
                assert!(success);
                assert_eq!(
                    assignment.top_candidate.unwrap().developer_id,
                    "dev_alice"
                );
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_typed_failure() {
        let response = dispatcher()
            .dispatch(ActionEvent::new("find-link", json!({"nonsense": 42})))
            .await;

        match response {
            ActionResponse::Error { success, message } => {
                assert!(!success);
                assert!(message.contains("serialization error"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_triage_action_runs_all_stages() {
        let response = dispatcher()
            .dispatch(ActionEvent::new(
                "triage",
                json!({"defect_text": "Latency observed: 1458ms in PatientDAO access."}),
            ))
            .await;

        match response {
            ActionResponse::Triaged { success, report } => {
                assert!(success);
                assert!(report.diagnosis.is_some());
                assert!(report.assignment.is_some());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
