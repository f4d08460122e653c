//! Ordered diagnostic rules for root-cause classification.
//!
//! Rules are evaluated in fixed priority order against the defect and its
//! linked requirement; the first rule whose trigger holds produces the
//! diagnosis and terminates evaluation. Everything here is deterministic,
//! synchronous, and free of I/O.

use regex::Regex;

use crate::domain::{Defect, Diagnosis, DiagnosisSource, Requirement, RootCause};

/// Observed latency assumed when the performance rule triggers but no
/// number can be parsed from the defect. Biases toward flagging a violation
/// instead of silently classifying the defect as Unknown.
pub const UNPARSED_LATENCY_SENTINEL_MS: u64 = 9999;

/// Defect-side triggers for the performance rule.
const LATENCY_KEYWORDS: &[&str] = &["latency", "timeout"];

/// Defect-side triggers for the security rule.
const ACCESS_KEYWORDS: &[&str] = &["access", "role", "unauthorized", "verify", "auth"];

/// Requirement-side triggers for the security rule.
const PROTECTION_KEYWORDS: &[&str] = &["authenticated", "encrypt"];

/// Defect-side triggers for the validation rule.
const VALIDATION_KEYWORDS: &[&str] = &["nullpointer", "null reference", "validation"];

/// Deterministic rule engine mapping (defect, requirement) to a diagnosis.
pub struct RuleClassifier;

impl RuleClassifier {
    /// Evaluate the rule chain. Always produces a diagnosis; the final
    /// default rule catches everything the specific rules skip.
    pub fn classify(defect: &Defect, requirement: &Requirement) -> Diagnosis {
        let defect_text = defect.description.to_lowercase();
        let requirement_text = requirement.text.to_lowercase();

        // RULE 1: performance constraint violation.
        if contains_any(&defect_text, LATENCY_KEYWORDS) || defect.observed_latency().is_some() {
            if let Some(limit_ms) = parse_limit_ms(&requirement_text) {
                let observed_ms = defect
                    .observed_latency()
                    .or_else(|| parse_observed_ms(&defect_text))
                    .unwrap_or(UNPARSED_LATENCY_SENTINEL_MS);

                if observed_ms > limit_ms {
                    return Diagnosis {
                        root_cause: RootCause::PerformanceViolation,
                        reasoning: format!(
                            "Observed latency ({observed_ms}ms) exceeds the requirement limit ({limit_ms}ms)."
                        ),
                        recommendation: "Optimize data access paths: review query plans and cache \
                                         frequent lookups."
                            .to_string(),
                        source: DiagnosisSource::RuleEngine,
                    };
                }
            }
            // No parseable limit, or the observation is within it: let the
            // remaining rules have a look.
        }

        // RULE 2: security policy violation.
        if contains_any(&defect_text, ACCESS_KEYWORDS)
            && contains_any(&requirement_text, PROTECTION_KEYWORDS)
        {
            return Diagnosis {
                root_cause: RootCause::SecurityViolation,
                reasoning: "Defect indicates a bypass of the authentication or encryption \
                            controls the requirement mandates."
                    .to_string(),
                recommendation: "Review access-control enforcement at the service boundary."
                    .to_string(),
                source: DiagnosisSource::RuleEngine,
            };
        }

        // RULE 3: input validation failure.
        if contains_any(&defect_text, VALIDATION_KEYWORDS) {
            return Diagnosis {
                root_cause: RootCause::InputValidationFailure,
                reasoning: "Code failed to handle null or invalid inputs implied by the \
                            requirement."
                    .to_string(),
                recommendation: "Add null checks and input sanitization at the data access layer."
                    .to_string(),
                source: DiagnosisSource::RuleEngine,
            };
        }

        // RULE 4: default.
        Diagnosis {
            root_cause: RootCause::Unknown,
            reasoning: "Insufficient data to determine cause.".to_string(),
            recommendation: "Investigate logs manually.".to_string(),
            source: DiagnosisSource::RuleEngine,
        }
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Extract the numeric limit from a "within N ms" clause, if present.
fn parse_limit_ms(requirement_text: &str) -> Option<u64> {
    let pattern = Regex::new(r"within\s+(\d+)\s*ms").ok()?;
    let captures = pattern.captures(requirement_text)?;
    captures[1].parse().ok()
}

/// Extract the observed latency from an "observed: N ms" clause, if present.
fn parse_observed_ms(defect_text: &str) -> Option<u64> {
    let pattern = Regex::new(r"observed:\s*(\d+)\s*ms").ok()?;
    let captures = pattern.captures(defect_text)?;
    captures[1].parse().ok()
}
