//! Seeded sample dataset
//!
//! A small healthcare-flavored catalog, roster, and touch history used by
//! the CLI and integration tests. Production deployments replace these with
//! backends over the real requirements database and issue tracker.

use crate::memory::{MemoryHistoryStore, MemoryWorkloadStore, StaticRequirementCatalog};
use crate::traits::{DeveloperProfile, Requirement};

/// Five requirements spanning access control, encryption, validation,
/// turnaround time, and session handling.
pub fn demo_catalog() -> StaticRequirementCatalog {
    StaticRequirementCatalog::new(vec![
        Requirement::new(
            "REQ-101",
            "The system shall ensure that only authenticated personnel can access the \
             PatientDAO. All access attempts must be logged with a timestamp and user ID \
             within 200ms.",
        ),
        Requirement::new(
            "REQ-102",
            "The system must encrypt all patient health information (PHI) at rest and in \
             transit using AES-256.",
        ),
        Requirement::new(
            "REQ-103",
            "Prescriptions must be validated against the drug interaction database before \
             issuance.",
        ),
        Requirement::new(
            "REQ-104",
            "Lab procedure results must be accessible to the ordering physician within 24 \
             hours of completion.",
        ),
        Requirement::new(
            "REQ-105",
            "The system shall automatically log out users after 15 minutes of inactivity.",
        ),
    ])
}

/// Touch history for the demo catalog.
pub fn demo_history() -> MemoryHistoryStore {
    let mut store = MemoryHistoryStore::new();
    store.record("REQ-101", "dev_jane");
    store.record("REQ-101", "dev_jane");
    store.record("REQ-101", "dev_bob");
    store.record("REQ-102", "dev_jane");
    store.record("REQ-103", "dev_alice");
    store.record("REQ-103", "dev_alice");
    store.record("REQ-104", "dev_bob");
    store.record("REQ-105", "dev_jane");
    store
}

/// Three-developer roster with mixed current load.
pub fn demo_workload() -> MemoryWorkloadStore {
    let mut store = MemoryWorkloadStore::new();
    store.add(DeveloperProfile::new("dev_jane", "Jane Doe", 0.8));
    store.add(DeveloperProfile::new("dev_bob", "Bob Smith", 0.4));
    store.add(DeveloperProfile::new("dev_alice", "Alice Jones", 0.2));
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{HistoryStore, RequirementCatalog, WorkloadStore};

    #[tokio::test]
    async fn test_demo_catalog_ids_are_unique() {
        let all = demo_catalog().all().await.unwrap();
        let mut ids: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[tokio::test]
    async fn test_demo_history_matches_catalog() {
        let catalog = demo_catalog();
        let history = demo_history();
        for req in catalog.all().await.unwrap() {
            assert!(
                !history.touches(&req.id).await.unwrap().is_empty(),
                "demo requirement {} has no touch history",
                req.id
            );
        }
    }

    #[tokio::test]
    async fn test_demo_roster_loads_in_range() {
        let roster = demo_workload().roster().await.unwrap();
        assert_eq!(roster.len(), 3);
        for dev in roster {
            assert!((0.0..=1.0).contains(&dev.current_load));
        }
    }
}
