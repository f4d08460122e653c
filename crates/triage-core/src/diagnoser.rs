//! Root-cause diagnosis orchestrator.
//!
//! Tries the external oracle first; on any failure or absent verdict falls
//! back to the deterministic rule classifier.

use tracing::info;

use crate::domain::{Defect, Diagnosis, DiagnosisSource, Requirement, RootCause};
use crate::oracle::OracleClient;
use crate::rules::RuleClassifier;

/// Diagnosis stage: one async entry point, oracle first, rule fallback.
/// Infallible: both paths always terminate in a well-formed diagnosis.
#[derive(Clone, Default)]
pub struct Diagnoser {
    oracle: Option<OracleClient>,
}

impl Diagnoser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult the given oracle before falling back to the rule engine.
    pub fn with_oracle(mut self, oracle: OracleClient) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Diagnose a defect against its linked requirement.
    pub async fn diagnose(&self, defect: &Defect, requirement: &Requirement) -> Diagnosis {
        if let Some(oracle) = &self.oracle {
            if let Some(verdict) = oracle
                .analyze(&defect.description, &requirement.text)
                .await
            {
                info!("Diagnosed via oracle");
                return Diagnosis {
                    root_cause: RootCause::ExternalVerdict,
                    reasoning: verdict,
                    recommendation: "Follow the external analysis.".to_string(),
                    source: DiagnosisSource::ExternalOracle,
                };
            }
        }

        let diagnosis = RuleClassifier::classify(defect, requirement);
        info!("Diagnosed via rule engine: {:?}", diagnosis.root_cause);
        diagnosis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_diagnose_without_oracle_uses_rules() {
        let diagnoser = Diagnoser::new();
        let defect = Defect::new("Latency observed: 1458ms in PatientDAO access.");
        let requirement = Requirement::new(
            "REQ-101",
            "Access must be logged within 200ms by authenticated personnel.",
        );

        let diagnosis = diagnoser.diagnose(&defect, &requirement).await;

        assert_eq!(diagnosis.root_cause, RootCause::PerformanceViolation);
        assert_eq!(diagnosis.source, DiagnosisSource::RuleEngine);
    }

    #[tokio::test]
    async fn test_unreachable_oracle_falls_back_to_rules() {
        use crate::oracle::{OracleClient, OracleConfig};
        use std::time::Duration;

        let oracle = OracleClient::new(
            OracleConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(200)),
        );
        let diagnoser = Diagnoser::new().with_oracle(oracle);

        let defect = Defect::new("User was able to view Lab Results without authentication.");
        let requirement =
            Requirement::new("REQ-104", "Only authenticated physicians may view results.");

        let diagnosis = diagnoser.diagnose(&defect, &requirement).await;

        assert_eq!(diagnosis.root_cause, RootCause::SecurityViolation);
        assert_eq!(diagnosis.source, DiagnosisSource::RuleEngine);
    }

    #[tokio::test]
    async fn test_diagnose_is_idempotent_without_oracle() {
        let diagnoser = Diagnoser::new();
        let defect = Defect::new("NullPointerException during validation");
        let requirement = Requirement::new("REQ-103", "Prescriptions must be validated.");

        let first = diagnoser.diagnose(&defect, &requirement).await;
        let second = diagnoser.diagnose(&defect, &requirement).await;

        assert_eq!(first, second);
    }
}
