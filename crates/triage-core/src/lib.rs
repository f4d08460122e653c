//! Triage Core Library
//!
//! The three-stage defect triage pipeline:
//!
//! 1. **Linking**: trace a defect description back to the requirement it
//!    violates ([`Linker`], backed by [`SimilarityMatcher`]).
//! 2. **Diagnosis**: classify the probable root cause ([`Diagnoser`],
//!    backed by [`RuleClassifier`]).
//! 3. **Assignment**: rank developers by fit to own the fix
//!    ([`AssignmentScorer`]).
//!
//! Each stage consults an optional external oracle first ([`OracleClient`])
//! and falls back to its local deterministic heuristic on any failure. The
//! stages are independently callable; [`TriagePipeline`] wires the typical
//! flow and [`ActionDispatcher`] exposes them behind named actions.

pub mod assignment;
pub mod diagnoser;
pub mod dispatch;
pub mod domain;
pub mod linker;
pub mod oracle;
pub mod pipeline;
pub mod rules;
pub mod similarity;
pub mod telemetry;

pub use assignment::{
    context_hint, AssignmentScorer, AVAILABILITY_WEIGHT, HISTORY_WEIGHT, ORACLE_CANDIDATE_ID,
};
pub use diagnoser::Diagnoser;
pub use dispatch::{ActionDispatcher, ActionEvent, ActionResponse};
pub use domain::{
    AssignmentResult, Candidate, Defect, Diagnosis, DiagnosisSource, MatchMethod, MatchResult,
    Requirement, Result, RootCause, TriageError,
};
pub use linker::{Linker, ORACLE_LINK_CONFIDENCE, ORACLE_REQUIREMENT_ID};
pub use oracle::{OracleClient, OracleConfig, DEFAULT_ORACLE_TIMEOUT};
pub use pipeline::{TriagePipeline, TriageReport};
pub use rules::{RuleClassifier, UNPARSED_LATENCY_SENTINEL_MS};
pub use similarity::{SimilarityMatcher, DOMAIN_VOCABULARY};
pub use telemetry::init_tracing;

pub use triage_stores::{
    DeveloperProfile, HistoryStore, RequirementCatalog, StoreError, WorkloadStore,
};
