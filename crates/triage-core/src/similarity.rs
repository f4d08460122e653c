//! Vocabulary-vector similarity matching.
//!
//! Texts are encoded as binary presence vectors over a fixed, curated
//! vocabulary of domain keywords; candidate requirements are scored by
//! cosine similarity against the defect vector. A requirement whose id
//! appears literally in the defect text is a hard link and scores exactly
//! 1.0 regardless of vocabulary overlap.

use std::collections::HashSet;

use crate::domain::{MatchMethod, MatchResult, Requirement};

/// Curated domain keywords spanning performance, security, and
/// data-integrity terms. Vector dimensionality equals this list's length.
pub const DOMAIN_VOCABULARY: &[&str] = &[
    // performance
    "latency",
    "timeout",
    "slow",
    "200ms",
    // security / access control
    "personnel",
    "access",
    "authentication",
    "authenticated",
    "role",
    "verify",
    "encrypt",
    "aes",
    "logout",
    "inactivity",
    // data integrity
    "null",
    "pointer",
    "exception",
    "validation",
    "constraint",
    "required",
    "error",
    "fail",
    // clinical domain
    "patient",
    "patientdao",
    "prescription",
    "drug",
    "interaction",
    "lab",
    "physician",
    "logged",
    "timestamp",
];

/// Deterministic defect-to-requirement matcher. Pure: no I/O, no state
/// beyond the vocabulary.
#[derive(Debug, Clone)]
pub struct SimilarityMatcher {
    vocabulary: &'static [&'static str],
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self {
            vocabulary: DOMAIN_VOCABULARY,
        }
    }
}

impl SimilarityMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A matcher over a custom vocabulary (tests use small ones).
    pub fn with_vocabulary(vocabulary: &'static [&'static str]) -> Self {
        Self { vocabulary }
    }

    /// Binary presence vector: dimension i is 1 iff vocabulary word i occurs
    /// as a whole token in the lower-cased text.
    fn encode(&self, text: &str) -> Vec<u8> {
        let tokens = tokenize(text);
        self.vocabulary
            .iter()
            .map(|word| u8::from(tokens.contains(*word)))
            .collect()
    }

    /// Score every requirement against the defect text and return the best.
    ///
    /// Selection is a stable scan in catalog order: the first requirement
    /// with the strictly greatest score wins. An empty catalog yields
    /// `requirement: None` with confidence 0.
    pub fn best_match(&self, defect_text: &str, requirements: &[Requirement]) -> MatchResult {
        if requirements.is_empty() {
            return MatchResult {
                requirement: None,
                confidence: 0.0,
                method: MatchMethod::VectorSimilarity,
            };
        }

        let defect_vector = self.encode(defect_text);

        let mut best_index = 0usize;
        let mut best_score = -1.0f64;
        let mut best_is_hard = false;

        for (index, requirement) in requirements.iter().enumerate() {
            // Hard link: a literal id reference outranks any similarity.
            let (score, is_hard) = if defect_text.contains(&requirement.id) {
                (1.0, true)
            } else {
                let requirement_vector = self.encode(&requirement.text);
                (cosine(&defect_vector, &requirement_vector), false)
            };

            if score > best_score {
                best_index = index;
                best_score = score;
                best_is_hard = is_hard;
            }
        }

        MatchResult {
            requirement: Some(requirements[best_index].clone()),
            confidence: best_score,
            method: if best_is_hard {
                MatchMethod::HardLink
            } else {
                MatchMethod::VectorSimilarity
            },
        }
    }
}

/// Lower-cased maximal alphanumeric runs.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cosine similarity between two binary vectors of equal length.
///
/// Defined as 0.0 (not NaN) when either vector is all-zero.
fn cosine(a: &[u8], b: &[u8]) -> f64 {
    let dot: u32 = a.iter().zip(b).map(|(x, y)| u32::from(x & y)).sum();
    let norm_a = a.iter().map(|&x| u32::from(x)).sum::<u32>();
    let norm_b = b.iter().map(|&y| u32::from(y)).sum::<u32>();

    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }

    f64::from(dot) / (f64::from(norm_a).sqrt() * f64::from(norm_b).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Requirement> {
        vec![
            Requirement::new("REQ-1", "Access must be logged with a timestamp within 200ms."),
            Requirement::new("REQ-2", "All patient data must be encrypted using AES."),
        ]
    }

    #[test]
    fn test_empty_defect_text_is_zero_not_nan() {
        let matcher = SimilarityMatcher::new();
        let result = matcher.best_match("", &catalog());

        assert!(result.confidence.is_finite());
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.confidence, 0.0);
        assert!(result.requirement.is_some());
    }

    #[test]
    fn test_empty_catalog_yields_none() {
        let matcher = SimilarityMatcher::new();
        let result = matcher.best_match("latency spike in PatientDAO", &[]);

        assert_eq!(result.requirement, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_vocabulary_overlap_picks_closest_requirement() {
        let matcher = SimilarityMatcher::new();
        let result = matcher.best_match("Timestamp missing from access log, latency high", &catalog());

        assert_eq!(result.requirement.unwrap().id, "REQ-1");
        assert_eq!(result.method, MatchMethod::VectorSimilarity);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_hard_link_overrides_similarity() {
        let matcher = SimilarityMatcher::new();
        // Textually the defect is all about encryption, but it names REQ-1.
        let result = matcher.best_match("REQ-2 regression: patient data not encrypted with AES", &catalog());

        let matched = result.requirement.unwrap();
        assert_eq!(matched.id, "REQ-2");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.method, MatchMethod::HardLink);
    }

    #[test]
    fn test_hard_link_beats_unrelated_text() {
        let matcher = SimilarityMatcher::new();
        let result = matcher.best_match("see REQ-1 for details", &catalog());

        assert_eq!(result.requirement.unwrap().id, "REQ-1");
        assert_eq!(result.method, MatchMethod::HardLink);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_exact_tie_keeps_first_in_catalog_order() {
        let matcher = SimilarityMatcher::with_vocabulary(&["latency"]);
        let reqs = vec![
            Requirement::new("REQ-A", "latency budget"),
            Requirement::new("REQ-B", "latency ceiling"),
        ];
        let result = matcher.best_match("latency", &reqs);

        assert_eq!(result.requirement.unwrap().id, "REQ-A");
    }

    #[test]
    fn test_zero_vector_requirement_scores_zero() {
        let matcher = SimilarityMatcher::new();
        let reqs = vec![Requirement::new("REQ-X", "the quick brown fox")];
        let result = matcher.best_match("latency timeout", &reqs);

        assert_eq!(result.confidence, 0.0);
        assert!(result.confidence.is_finite());
    }

    #[test]
    fn test_whole_word_matching_only() {
        // "latencymonster" must not count as the token "latency".
        let matcher = SimilarityMatcher::with_vocabulary(&["latency"]);
        let reqs = vec![Requirement::new("REQ-Y", "latency limit")];
        let result = matcher.best_match("latencymonster appeared", &reqs);

        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_identical_keyword_sets_score_one_but_stay_vector_method() {
        let matcher = SimilarityMatcher::with_vocabulary(&["latency", "timeout"]);
        let reqs = vec![Requirement::new("R1", "latency timeout")];
        let result = matcher.best_match("timeout then latency", &reqs);

        assert!((result.confidence - 1.0).abs() < 1e-12);
        assert_eq!(result.method, MatchMethod::VectorSimilarity);
    }
}
