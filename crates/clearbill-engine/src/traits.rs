//! Collaborator contracts consumed by the pipeline.
//!
//! These three traits define the engine's entire external surface:
//!
//! - `PracticeSource`       — practice-management system (patients + publish)
//! - `VerificationService`  — real-time eligibility verification vendor
//! - `AuditStore`           — append-only audit log
//!
//! Implementations own timeout and retry policy; every call here is a
//! blocking round trip from the engine's point of view. The engine defines
//! no wire protocol — collaborators consume and produce only the in-memory
//! contract types.

use chrono::{DateTime, Utc};

use clearbill_contracts::{
    audit::{AuditEntry, AuditStatus},
    error::ClearbillResult,
    patient::{InsuranceRecord, Patient},
    service::ServiceLine,
    verification::{PayerMatch, VerificationSnapshot},
};

/// The practice-management system: the source of patients and the target
/// of published memos.
pub trait PracticeSource: Send + Sync {
    /// Patients to process this run, each with their insurance records.
    fn updated_patients(&self) -> ClearbillResult<Vec<Patient>>;

    /// Publish a memo into the patient's record. Returns `false` when the
    /// system rejected the memo without a transport failure.
    fn post_memo(&self, patient_id: &str, text: &str) -> ClearbillResult<bool>;
}

/// The eligibility-verification vendor.
pub trait VerificationService: Send + Sync {
    /// Run a real-time eligibility check for one insurance record.
    ///
    /// `Ok(None)` means the call completed but produced no usable status —
    /// the fuser's fallback policy handles that, it is not an error.
    fn check_eligibility(
        &self,
        patient: &Patient,
        insurance: &InsuranceRecord,
        service_line_hint: Option<ServiceLine>,
    ) -> ClearbillResult<Option<VerificationSnapshot>>;

    /// Identity-discovery fallback, used only when the insurance record
    /// carries no member identifier at all.
    fn discover_insurance(&self, patient: &Patient) -> ClearbillResult<Option<PayerMatch>>;
}

/// The append-only audit log.
///
/// The engine performs a read-then-write without a transaction spanning
/// both; two concurrent runs could both pass the duplicate check and both
/// publish. Acceptable: publishing an identical memo twice is harmless and
/// the system runs as a single scheduled instance.
pub trait AuditStore: Send + Sync {
    /// True when a row exists for `agent_id` with a status in `statuses`,
    /// an `end_time` at or after `since`, and exactly `message` as its
    /// message text.
    fn has_recent(
        &self,
        agent_id: &str,
        statuses: &[AuditStatus],
        since: DateTime<Utc>,
        message: &str,
    ) -> ClearbillResult<bool>;

    /// Append one row.
    fn insert(&self, entry: AuditEntry) -> ClearbillResult<()>;
}
