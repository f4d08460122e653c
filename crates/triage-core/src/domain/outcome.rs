//! Result types produced by the three pipeline stages.
//!
//! Each stage returns one tagged result type with an exhaustive method or
//! source enum, so callers branch on an explicit tag instead of probing for
//! optional fields. None of these carry timestamps: calling a stage twice
//! with identical inputs and no oracle yields identical values.

use serde::{Deserialize, Serialize};
use triage_stores::Requirement;

/// How a defect-to-requirement link was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// The requirement id appeared literally in the defect text.
    HardLink,

    /// Vocabulary-vector cosine similarity over the catalog.
    VectorSimilarity,

    /// The external oracle supplied the link.
    ExternalOracle,
}

/// Outcome of the linking stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Best-matching requirement; `None` only when the catalog is empty.
    pub requirement: Option<Requirement>,

    /// Confidence in [0, 1].
    pub confidence: f64,

    /// How the link was established.
    pub method: MatchMethod,
}

/// Root-cause category assigned by the diagnosis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCause {
    /// Observed latency exceeds a numeric constraint in the requirement.
    PerformanceViolation,

    /// Defect indicates a bypass of authentication/encryption controls.
    SecurityViolation,

    /// Null or invalid input reached code that should have rejected it.
    InputValidationFailure,

    /// No rule triggered.
    Unknown,

    /// Verdict supplied verbatim by the external oracle.
    ExternalVerdict,
}

/// Which engine produced a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSource {
    RuleEngine,
    ExternalOracle,
}

/// Outcome of the diagnosis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub root_cause: RootCause,

    /// Why this category was assigned, citing extracted numbers where the
    /// performance rule fired.
    pub reasoning: String,

    /// Suggested next step for the assignee.
    pub recommendation: String,

    pub source: DiagnosisSource,
}

/// A developer scored for suitability to fix the defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub developer_id: String,
    pub display_name: String,

    /// Normalized prior involvement with the requirement, in [0, 1].
    pub historical_score: f64,

    /// 1 minus current load, in [0, 1].
    pub availability_score: f64,

    /// Weighted combination of the two, in [0, 1].
    pub final_score: f64,

    /// Human-readable derivation of `final_score`.
    pub breakdown: String,
}

/// Outcome of the assignment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Highest-ranked candidate; `None` only when the roster is empty and
    /// the oracle supplied nothing.
    pub top_candidate: Option<Candidate>,

    /// All candidates, descending by `final_score`; ties keep enumeration
    /// order.
    pub ranked_candidates: Vec<Candidate>,
}
