//! The reported defect entering the pipeline.

use serde::{Deserialize, Serialize};

/// A reported issue: free-text description plus an optional structured
/// latency observation.
///
/// Constructed once per incoming request and discarded when the pipeline
/// run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    /// Error log or bug description as reported.
    pub description: String,

    /// Observed latency in milliseconds; 0 means "not provided". Prefer
    /// [`Defect::observed_latency`] over reading this field directly.
    #[serde(default)]
    pub observed_latency_ms: u64,
}

impl Defect {
    /// A defect with no structured latency observation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            observed_latency_ms: 0,
        }
    }

    /// Attach a structured latency observation.
    pub fn with_observed_latency(mut self, latency_ms: u64) -> Self {
        self.observed_latency_ms = latency_ms;
        self
    }

    /// The structured latency observation, hiding the zero sentinel.
    pub fn observed_latency(&self) -> Option<u64> {
        (self.observed_latency_ms > 0).then_some(self.observed_latency_ms)
    }
}
