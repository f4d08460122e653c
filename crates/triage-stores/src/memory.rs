//! In-memory store implementations
//!
//! `StaticRequirementCatalog`, `MemoryHistoryStore`, and `MemoryWorkloadStore`
//! satisfy the trait contracts from plain collections with no external
//! dependencies. They back the CLI demo dataset and every test; a production
//! deployment swaps in implementations over the real issue tracker.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::traits::*;

/// Requirement catalog backed by a fixed `Vec`, preserving insertion order.
#[derive(Debug, Default, Clone)]
pub struct StaticRequirementCatalog {
    requirements: Vec<Requirement>,
}

impl StaticRequirementCatalog {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self { requirements }
    }

    /// An empty catalog. The matcher treats this as a valid degenerate
    /// input, not an error.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequirementCatalog for StaticRequirementCatalog {
    async fn all(&self) -> StoreResult<Vec<Requirement>> {
        Ok(self.requirements.clone())
    }
}

/// Touch history backed by a `HashMap<requirement_id, Vec<developer_id>>`.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistoryStore {
    touches: HashMap<String, Vec<String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `developer_id` touched `requirement_id`. Order of
    /// insertion is the order `touches` reports.
    pub fn record(&mut self, requirement_id: impl Into<String>, developer_id: impl Into<String>) {
        self.touches
            .entry(requirement_id.into())
            .or_default()
            .push(developer_id.into());
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn touches(&self, requirement_id: &str) -> StoreResult<Vec<String>> {
        Ok(self.touches.get(requirement_id).cloned().unwrap_or_default())
    }
}

/// Workload store backed by an insertion-ordered roster.
///
/// The roster is a `Vec`, not a map, so iteration order is exactly the
/// order developers were added; ranking ties stay deterministic.
#[derive(Debug, Default, Clone)]
pub struct MemoryWorkloadStore {
    roster: Vec<DeveloperProfile>,
}

impl MemoryWorkloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a developer to the roster. Re-adding an existing id replaces the
    /// profile in place without disturbing roster order.
    pub fn add(&mut self, profile: DeveloperProfile) {
        if let Some(existing) = self
            .roster
            .iter_mut()
            .find(|p| p.developer_id == profile.developer_id)
        {
            *existing = profile;
        } else {
            self.roster.push(profile);
        }
    }
}

#[async_trait]
impl WorkloadStore for MemoryWorkloadStore {
    async fn roster(&self) -> StoreResult<Vec<DeveloperProfile>> {
        Ok(self.roster.clone())
    }

    async fn load(&self, developer_id: &str) -> StoreResult<f64> {
        Ok(self
            .roster
            .iter()
            .find(|p| p.developer_id == developer_id)
            .map(|p| p.current_load)
            .unwrap_or(0.0))
    }
}
