//! Error types shared across the Clearbill crates.
//!
//! All fallible operations in the pipeline return `ClearbillResult<T>`.
//! Variants carry enough context to produce a useful audit row when a
//! patient fails at the processing boundary.

use thiserror::Error;

/// The unified error type for the Clearbill engine and its collaborators.
#[derive(Debug, Error)]
pub enum ClearbillError {
    /// The practice-management source could not be read.
    #[error("practice-management source error: {reason}")]
    SourceError { reason: String },

    /// The eligibility-verification service failed in a way the fallback
    /// policy cannot absorb (transport-level, not an empty response).
    #[error("verification service error: {reason}")]
    VerificationError { reason: String },

    /// The publish call to the practice-management system failed.
    #[error("failed to post memo for patient '{patient_id}': {reason}")]
    PublishFailed { patient_id: String, reason: String },

    /// The audit store could not be read or written.
    ///
    /// Logging is best-effort: the pipeline downgrades this to a warning
    /// rather than aborting the run.
    #[error("audit store error: {reason}")]
    AuditError { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the Clearbill crates.
pub type ClearbillResult<T> = Result<T, ClearbillError>;
