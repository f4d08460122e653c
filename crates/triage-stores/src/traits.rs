//! Store trait definitions for the triage core
//!
//! These traits define the read-only reference data the pipeline consumes:
//! - `RequirementCatalog`: the requirements a defect can be linked to
//! - `HistoryStore`: which developers previously touched a requirement
//! - `WorkloadStore`: each developer's current load and the full roster
//!
//! All traits are async and backend-agnostic. In-memory implementations are
//! provided via the `memory` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A specification statement the system must satisfy.
///
/// The `text` is free prose and may embed numeric constraints the rule
/// engine knows how to extract (e.g. "within 200ms").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique identifier, e.g. "REQ-101".
    pub id: String,

    /// Requirement prose.
    pub text: String,
}

impl Requirement {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A developer known to the workload store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperProfile {
    /// Stable identifier, e.g. "dev_alice".
    pub developer_id: String,

    /// Human-readable name for reports.
    pub display_name: String,

    /// Current load in [0, 1]; 0.0 means fully available.
    pub current_load: f64,
}

impl DeveloperProfile {
    pub fn new(
        developer_id: impl Into<String>,
        display_name: impl Into<String>,
        current_load: f64,
    ) -> Self {
        Self {
            developer_id: developer_id.into(),
            display_name: display_name.into(),
            current_load: current_load.clamp(0.0, 1.0),
        }
    }
}

/// The catalog of requirements a defect can be traced back to.
///
/// Guarantees:
/// - `all()` returns requirements in a stable order across calls, so
///   tie-breaking in the matcher is reproducible.
/// - The catalog is immutable for the lifetime of the process.
#[async_trait]
pub trait RequirementCatalog: Send + Sync {
    /// Every requirement in the catalog, in stable order.
    async fn all(&self) -> StoreResult<Vec<Requirement>>;
}

/// Per-requirement touch history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Ordered developer ids that touched the given requirement, oldest
    /// first. An unknown id yields an empty vec, not an error.
    async fn touches(&self, requirement_id: &str) -> StoreResult<Vec<String>>;
}

/// Per-developer workload and the full roster.
#[async_trait]
pub trait WorkloadStore: Send + Sync {
    /// All known developers, in stable order. Ranking ties are broken by
    /// this order, so implementations must keep it deterministic.
    async fn roster(&self) -> StoreResult<Vec<DeveloperProfile>>;

    /// Current load for the given developer in [0, 1]. Unknown developers
    /// report 0.0 (fully available).
    async fn load(&self, developer_id: &str) -> StoreResult<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_developer_profile_clamps_load() {
        let over = DeveloperProfile::new("dev_x", "X", 1.7);
        assert_eq!(over.current_load, 1.0);

        let under = DeveloperProfile::new("dev_y", "Y", -0.3);
        assert_eq!(under.current_load, 0.0);
    }

    #[test]
    fn test_requirement_serde_roundtrip() {
        let req = Requirement::new("REQ-9", "The system shall respond within 200ms.");
        let json = serde_json::to_string(&req).expect("serialize");
        let back: Requirement = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(req, back);
    }
}
