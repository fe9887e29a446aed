//! Audit-log row types shared between the engine and audit store
//! implementations.
//!
//! The store itself is append-only; the engine only ever inserts rows and
//! asks one existence question (exact message, agent, status set, window)
//! for duplicate suppression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one (patient, insurance) publish cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    /// A memo was published.
    Success,
    /// The decision engine (or duplicate suppressor) suppressed the memo.
    Skipped,
    /// Something failed; `message` carries the error text.
    Error,
}

/// One append-only audit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Row identifier, assigned at construction.
    pub id: Uuid,
    /// The logical agent that produced this row.
    pub agent_id: String,
    pub status: AuditStatus,
    /// Exact message text. Duplicate suppression compares this verbatim,
    /// so formatting changes intentionally defeat deduplication.
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl AuditEntry {
    /// Build a row stamped with the current time for both bounds.
    pub fn now(agent_id: impl Into<String>, status: AuditStatus, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            agent_id: agent_id.into(),
            status,
            message: message.into(),
            start_time: now,
            end_time: now,
        }
    }
}
