//! The synchronous processing pipeline: patients → insurance records →
//! service lines, strictly sequential.
//!
//! Failure isolation lives at the patient boundary: an error on one patient
//! is logged as an audit `error` row and the run continues with the next.
//! Verification failures are absorbed by the fuser's fallback policy, and
//! audit logging is best-effort — a broken audit store degrades logging,
//! never computation.

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use clearbill_contracts::{
    audit::{AuditEntry, AuditStatus},
    error::ClearbillResult,
    patient::{InsuranceRecord, Patient},
    verification::VerificationSnapshot,
};

use crate::{
    calculator, classifier,
    config::EngineConfig,
    decision, fuse, memo,
    traits::{AuditStore, PracticeSource, VerificationService},
};

/// Counts reported at the end of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub patients_processed: usize,
    pub memos_posted: usize,
    pub memos_suppressed: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
}

/// The wired-up responsibility engine. Owns its collaborators for the
/// duration of a run; all shared tables are read-only after construction.
pub struct Engine {
    config: EngineConfig,
    source: Box<dyn PracticeSource>,
    verification: Box<dyn VerificationService>,
    audit: Box<dyn AuditStore>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        source: Box<dyn PracticeSource>,
        verification: Box<dyn VerificationService>,
        audit: Box<dyn AuditStore>,
    ) -> Self {
        Self { config, source, verification, audit }
    }

    /// Process every patient the source reports.
    ///
    /// Returns `Err` only when the source itself cannot be read; everything
    /// past that point is isolated per patient.
    pub fn run(&self) -> ClearbillResult<RunSummary> {
        let patients = self.source.updated_patients()?;
        info!(patient_count = patients.len(), "run starting");

        let mut summary = RunSummary::default();

        for patient in &patients {
            if let Err(e) = self.process_patient(patient, &mut summary) {
                warn!(patient_id = %patient.id, error = %e, "patient processing failed");
                summary.errors += 1;
                self.log_best_effort(AuditEntry::now(
                    &self.config.agent_id,
                    AuditStatus::Error,
                    format!("patient {} failed: {}", patient.id, e),
                ));
            }
            summary.patients_processed += 1;
        }

        info!(
            patients = summary.patients_processed,
            posted = summary.memos_posted,
            suppressed = summary.memos_suppressed,
            duplicates = summary.duplicates_skipped,
            errors = summary.errors,
            "run complete"
        );
        Ok(summary)
    }

    fn process_patient(&self, patient: &Patient, summary: &mut RunSummary) -> ClearbillResult<()> {
        for insurance in patient.insurances.iter().filter(|i| i.active) {
            self.process_insurance(patient, insurance, summary);
        }
        Ok(())
    }

    fn process_insurance(
        &self,
        patient: &Patient,
        insurance: &InsuranceRecord,
        summary: &mut RunSummary,
    ) {
        let snapshot = self.verification_snapshot(patient, insurance);

        let fused = fuse::fuse(&self.config, insurance, snapshot.as_ref());
        let category =
            classifier::classify(&self.config, &insurance.carrier_code, &insurance.carrier_name);
        let estimates = calculator::calculate_all(&self.config, insurance, &fused, category);
        let tokens = estimates.map(|e| e.token());

        let memo_text = memo::encode(&insurance.carrier_name, &tokens);
        let message = memo::audit_message(&patient.id, &insurance.id, &memo_text);

        // Duplicate suppression: an identical message already logged as
        // success or skipped within the lookback window ends the cycle
        // before the decision engine even runs.
        if self.is_duplicate(&message) {
            info!(
                patient_id = %patient.id,
                insurance_id = %insurance.id,
                "identical memo already logged within lookback window; skipping"
            );
            summary.duplicates_skipped += 1;
            return;
        }

        let verdict = decision::should_post(&self.config, &insurance.carrier_name, &tokens);
        if !verdict.publish {
            info!(
                patient_id = %patient.id,
                insurance_id = %insurance.id,
                reason = %verdict.reason,
                "memo suppressed"
            );
            summary.memos_suppressed += 1;
            self.log_best_effort(AuditEntry::now(
                &self.config.agent_id,
                AuditStatus::Skipped,
                message,
            ));
            return;
        }

        match self.source.post_memo(&patient.id, &memo_text) {
            Ok(true) => {
                info!(patient_id = %patient.id, memo = %memo_text, "memo posted");
                summary.memos_posted += 1;
                self.log_best_effort(AuditEntry::now(
                    &self.config.agent_id,
                    AuditStatus::Success,
                    message,
                ));
            }
            Ok(false) => {
                warn!(patient_id = %patient.id, "practice system rejected the memo");
                summary.errors += 1;
                self.log_best_effort(AuditEntry::now(
                    &self.config.agent_id,
                    AuditStatus::Error,
                    format!("memo rejected for patient {}: {}", patient.id, memo_text),
                ));
            }
            Err(e) => {
                warn!(patient_id = %patient.id, error = %e, "memo publish failed");
                summary.errors += 1;
                self.log_best_effort(AuditEntry::now(
                    &self.config.agent_id,
                    AuditStatus::Error,
                    format!("memo publish failed for patient {}: {}", patient.id, e),
                ));
            }
        }
    }

    /// Obtain a verification snapshot, or `None` when the record-only
    /// fallback applies.
    ///
    /// Absorbs every verification-side failure: an unresolvable patient
    /// name, a missing member id that discovery cannot fill, and transport
    /// errors all degrade to record-only data rather than aborting.
    fn verification_snapshot(
        &self,
        patient: &Patient,
        insurance: &InsuranceRecord,
    ) -> Option<VerificationSnapshot> {
        if patient.split_name().is_none() {
            warn!(
                patient_id = %patient.id,
                name = %patient.name,
                "cannot split patient name; skipping verification"
            );
            return None;
        }

        let mut record = insurance.clone();
        if record.best_member_id().is_none() {
            match self.verification.discover_insurance(patient) {
                Ok(Some(found))
                    if crate::tables::carrier_names_match(
                        &insurance.carrier_name,
                        &found.payer_name,
                    ) =>
                {
                    debug!(
                        patient_id = %patient.id,
                        payer = %found.payer_name,
                        "member id recovered via insurance discovery"
                    );
                    record.member_id = Some(found.member_id);
                }
                Ok(_) => {
                    warn!(
                        patient_id = %patient.id,
                        carrier = %insurance.carrier_name,
                        "no member id and discovery found no matching payer"
                    );
                    return None;
                }
                Err(e) => {
                    warn!(patient_id = %patient.id, error = %e, "insurance discovery failed");
                    return None;
                }
            }
        }

        match self.verification.check_eligibility(patient, &record, None) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    patient_id = %patient.id,
                    insurance_id = %insurance.id,
                    error = %e,
                    "eligibility check failed; falling back to record data"
                );
                None
            }
        }
    }

    /// Exact-text duplicate lookup. Audit failures count as "not a
    /// duplicate" so a broken store can never silence publishing.
    fn is_duplicate(&self, message: &str) -> bool {
        let since = Utc::now() - Duration::days(self.config.lookback_days);
        match self.audit.has_recent(
            &self.config.agent_id,
            &[AuditStatus::Success, AuditStatus::Skipped],
            since,
            message,
        ) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "duplicate lookup failed; treating as not a duplicate");
                false
            }
        }
    }

    fn log_best_effort(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.insert(entry) {
            warn!(error = %e, "audit insert failed; continuing without log row");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
