//! Domain models for the triage core.
//!
//! Canonical definitions for the core entities:
//! - `Defect`: A reported issue entering the pipeline
//! - `MatchResult`: Outcome of defect-to-requirement linking
//! - `Diagnosis`: Outcome of root-cause analysis
//! - `AssignmentResult`: Ranked assignee recommendation

pub mod defect;
pub mod error;
pub mod outcome;

// Re-export main types and errors
pub use defect::Defect;
pub use error::{Result, TriageError};
pub use outcome::{
    AssignmentResult, Candidate, Diagnosis, DiagnosisSource, MatchMethod, MatchResult, RootCause,
};

// The requirement catalog entry is defined next to the store traits.
pub use triage_stores::Requirement;
