//! Simulated collaborators for the demo runs.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted: the practice source prints memos to stdout instead of
//! posting them, and the verification service answers from a canned table
//! keyed by carrier name.

use std::sync::Mutex;

use clearbill_contracts::{
    error::ClearbillResult,
    patient::{InsuranceRecord, Patient},
    service::ServiceLine,
    verification::{PayerMatch, VerificationSnapshot, VerificationStatus},
};
use clearbill_engine::traits::{PracticeSource, VerificationService};

// ── Patient panel ─────────────────────────────────────────────────────────────

fn insurance(
    id: &str,
    code: &str,
    name: &str,
    copay: f64,
    coinsurance: f64,
    annual: f64,
    met: f64,
    member_id: Option<&str>,
) -> InsuranceRecord {
    InsuranceRecord {
        id: id.to_string(),
        carrier_code: code.to_string(),
        carrier_name: name.to_string(),
        active: true,
        copay_dollar_amount: copay,
        copay_percentage_amount: coinsurance,
        annual_deductible: annual,
        deductible_amount_met: met,
        member_id: member_id.map(str::to_string),
        subscriber_id: None,
    }
}

/// A fictional panel covering the interesting paths: a verified commercial
/// plan, an MA plan whose verification comes back empty, a Medicaid member,
/// and a self-pay patient.
pub fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "1001".to_string(),
            name: "Harper, June".to_string(),
            dob: "03/22/1987".to_string(),
            insurances: vec![insurance(
                "ins-1001",
                "UHC01",
                "United Healthcare Choice Plus",
                0.0,
                0.0,
                1500.0,
                1500.0,
                Some("UHC-778812"),
            )],
        },
        Patient {
            id: "1002".to_string(),
            name: "Okafor, Daniel".to_string(),
            dob: "11/02/1954".to_string(),
            insurances: vec![insurance(
                "ins-1002",
                "AET02",
                "Aetna Medicare Advantage HMO",
                0.0,
                0.0,
                500.0,
                100.0,
                Some("AET-104455"),
            )],
        },
        Patient {
            id: "1003".to_string(),
            name: "Reyes, Marisol".to_string(),
            dob: "07/14/1992".to_string(),
            insurances: vec![insurance(
                "ins-1003",
                "MCD",
                "Health First Medicaid",
                0.0,
                0.0,
                0.0,
                0.0,
                Some("MCD-551209"),
            )],
        },
        Patient {
            id: "1004".to_string(),
            name: "Stern, Ava".to_string(),
            dob: "09/30/1979".to_string(),
            insurances: vec![insurance(
                "ins-1004",
                "SP",
                "Self Pay",
                0.0,
                0.0,
                0.0,
                0.0,
                None,
            )],
        },
    ]
}

// ── Practice source ───────────────────────────────────────────────────────────

/// Prints posted memos instead of calling a practice-management API.
pub struct SimulatedPractice {
    patients: Vec<Patient>,
    posted: Mutex<Vec<(String, String)>>,
}

impl SimulatedPractice {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self { patients, posted: Mutex::new(Vec::new()) }
    }
}

impl PracticeSource for SimulatedPractice {
    fn updated_patients(&self) -> ClearbillResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    fn post_memo(&self, patient_id: &str, text: &str) -> ClearbillResult<bool> {
        println!("  [posted] patient {} ← {}", patient_id, text);
        self.posted
            .lock()
            .expect("posted memos lock poisoned")
            .push((patient_id.to_string(), text.to_string()));
        Ok(true)
    }
}

// ── Verification service ──────────────────────────────────────────────────────

/// Canned eligibility answers keyed by carrier name.
pub struct SimulatedVerification;

impl VerificationService for SimulatedVerification {
    fn check_eligibility(
        &self,
        _patient: &Patient,
        insurance: &InsuranceRecord,
        _hint: Option<ServiceLine>,
    ) -> ClearbillResult<Option<VerificationSnapshot>> {
        let name = insurance.carrier_name.to_uppercase();

        // The commercial plan verifies cleanly with a flat specialist copay.
        if name.contains("UNITED") {
            return Ok(Some(VerificationSnapshot {
                status: VerificationStatus::Active,
                copay: Some(45.0),
                coinsurance_pct: None,
                deductible_remaining: None,
                annual_deductible: None,
                deductible_met: None,
            }));
        }

        // The MA plan answers with an all-zero response: syntactically
        // valid, semantically empty. Exercises the fallback branch.
        if name.contains("AETNA") {
            return Ok(Some(VerificationSnapshot {
                status: VerificationStatus::Active,
                copay: Some(0.0),
                coinsurance_pct: Some(0.0),
                deductible_remaining: Some(0.0),
                annual_deductible: None,
                deductible_met: None,
            }));
        }

        // Everyone else: no usable response at all.
        Ok(None)
    }

    fn discover_insurance(&self, patient: &Patient) -> ClearbillResult<Option<PayerMatch>> {
        // Only the self-pay patient lacks a member id, and discovery has
        // nothing for a cash patient.
        let _ = patient;
        Ok(None)
    }
}
