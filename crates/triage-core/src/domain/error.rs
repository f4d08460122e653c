//! Domain-level error taxonomy for the triage core.
//!
//! Oracle failures deliberately have no variant here: the oracle adapter is
//! fail-soft and recovers by falling back to the local heuristics, so its
//! failures never cross an orchestrator boundary.

use triage_stores::StoreError;

/// Triage domain errors.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for triage domain operations.
pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = TriageError::from(StoreError::Connection("tracker offline".to_string()));
        assert!(err.to_string().contains("store error"));
        assert!(err.to_string().contains("tracker offline"));
    }

    #[test]
    fn test_serialization_error_display() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = TriageError::from(bad);
        assert!(err.to_string().contains("serialization error"));
    }
}
