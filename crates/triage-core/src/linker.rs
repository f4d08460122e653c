//! Defect-to-requirement linking orchestrator.
//!
//! Tries the external oracle first; on any failure or absent answer falls
//! back to the deterministic similarity matcher over the full catalog.

use std::sync::Arc;

use tracing::info;
use triage_stores::RequirementCatalog;

use crate::domain::{MatchMethod, MatchResult, Requirement, Result};
use crate::oracle::OracleClient;
use crate::similarity::SimilarityMatcher;

/// Identifier of requirements synthesized from an oracle link answer.
pub const ORACLE_REQUIREMENT_ID: &str = "ORACLE-REQ";

/// Fixed confidence assigned to oracle-supplied links.
pub const ORACLE_LINK_CONFIDENCE: f64 = 0.95;

/// Linking stage: one async entry point, oracle first, matcher fallback.
#[derive(Clone)]
pub struct Linker {
    catalog: Arc<dyn RequirementCatalog>,
    matcher: SimilarityMatcher,
    oracle: Option<OracleClient>,
}

impl Linker {
    pub fn new(catalog: Arc<dyn RequirementCatalog>) -> Self {
        Self {
            catalog,
            matcher: SimilarityMatcher::new(),
            oracle: None,
        }
    }

    /// Consult the given oracle before falling back to the local matcher.
    pub fn with_oracle(mut self, oracle: OracleClient) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Link a defect description to the requirement it most plausibly
    /// violates. Oracle failures never surface; catalog lookups can.
    pub async fn link(&self, defect_text: &str) -> Result<MatchResult> {
        if let Some(oracle) = &self.oracle {
            if let Some(linked_text) = oracle.translate(defect_text).await {
                info!("Linked via oracle");
                return Ok(MatchResult {
                    requirement: Some(Requirement::new(ORACLE_REQUIREMENT_ID, linked_text)),
                    confidence: ORACLE_LINK_CONFIDENCE,
                    method: MatchMethod::ExternalOracle,
                });
            }
        }

        let requirements = self.catalog.all().await?;
        let result = self.matcher.best_match(defect_text, &requirements);
        info!(
            "Linked via {:?} with confidence {:.2}",
            result.method, result.confidence
        );
        Ok(result)
    }
}
