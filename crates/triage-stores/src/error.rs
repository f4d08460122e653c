//! Error types for triage-stores

use thiserror::Error;

/// Errors that can occur in the reference data layer.
///
/// The in-memory implementations never produce these; the variants exist so
/// that a real backend (an issue-tracker REST API, a requirements database)
/// can surface its failures through the same trait contracts.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend connection error
    #[error("Store backend unreachable: {0}")]
    Connection(String),

    /// Backend query error
    #[error("Store query failed: {0}")]
    Query(String),

    /// Backend returned a payload the adapter could not decode
    #[error("Store payload malformed: {0}")]
    Malformed(String),
}
