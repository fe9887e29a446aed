//! # clearbill-audit
//!
//! In-memory reference implementation of the engine's `AuditStore`
//! contract.
//!
//! Rows live in a `Vec` behind a `Mutex`, making the store safe to share
//! between the engine and test assertions. A production deployment would
//! back the same trait with a database table; the engine only ever appends
//! rows and asks one existence question, so the contract stays small.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::debug;

use clearbill_contracts::{
    audit::{AuditEntry, AuditStatus},
    error::{ClearbillError, ClearbillResult},
};
use clearbill_engine::traits::AuditStore;

/// Append-only in-memory audit store.
///
/// Cloning shares the underlying rows, so a test can keep one handle while
/// handing another to the engine.
#[derive(Clone, Default)]
pub struct InMemoryAuditStore {
    rows: Arc<Mutex<Vec<AuditEntry>>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row written so far, in append order.
    pub fn export(&self) -> Vec<AuditEntry> {
        self.rows.lock().expect("audit rows lock poisoned").clone()
    }

    /// Number of rows with the given status.
    pub fn count_by_status(&self, status: AuditStatus) -> usize {
        self.rows
            .lock()
            .expect("audit rows lock poisoned")
            .iter()
            .filter(|row| row.status == status)
            .count()
    }
}

impl AuditStore for InMemoryAuditStore {
    /// Existence query for duplicate suppression: same agent, status in the
    /// given set, `end_time` within the window, message text identical.
    fn has_recent(
        &self,
        agent_id: &str,
        statuses: &[AuditStatus],
        since: DateTime<Utc>,
        message: &str,
    ) -> ClearbillResult<bool> {
        let rows = self.rows.lock().map_err(|e| ClearbillError::AuditError {
            reason: format!("audit rows lock poisoned: {}", e),
        })?;

        let found = rows.iter().any(|row| {
            row.agent_id == agent_id
                && statuses.contains(&row.status)
                && row.end_time >= since
                && row.message == message
        });

        debug!(agent_id, found, "duplicate lookup");
        Ok(found)
    }

    fn insert(&self, entry: AuditEntry) -> ClearbillResult<()> {
        let mut rows = self.rows.lock().map_err(|e| ClearbillError::AuditError {
            reason: format!("audit rows lock poisoned: {}", e),
        })?;
        debug!(agent_id = %entry.agent_id, status = ?entry.status, "audit row appended");
        rows.push(entry);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
