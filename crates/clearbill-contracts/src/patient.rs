//! Patient and insurance record types as delivered by the
//! practice-management source.
//!
//! These are read-only inputs to the engine. The source owns their
//! lifecycle; the engine never mutates or persists them.

use serde::{Deserialize, Serialize};

/// One patient, with every insurance record the source knows about.
///
/// `name` follows the practice-management convention "Last, First".
/// Names that do not split on a comma skip the verification step and
/// fall back to record-only financial data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Practice-management patient identifier.
    pub id: String,
    /// "Last, First" display name.
    pub name: String,
    /// Date of birth, as the source formats it (MM/DD/YYYY).
    pub dob: String,
    /// All insurance records on file, active or not.
    pub insurances: Vec<InsuranceRecord>,
}

impl Patient {
    /// Split the "Last, First" name into `(first, last)`.
    ///
    /// Returns `None` when the name has no comma or either half is empty,
    /// which the pipeline treats as "skip verification for this patient".
    pub fn split_name(&self) -> Option<(String, String)> {
        let (last, first) = self.name.split_once(',')?;
        let last = last.trim();
        let first = first.trim();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some((first.to_string(), last.to_string()))
    }
}

/// One patient-payer relationship from the practice-management system.
///
/// Monetary fields are the practice's historical benefit defaults. They are
/// only trusted when the verification service returns nothing usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceRecord {
    /// Practice-management insurance coverage identifier.
    pub id: String,
    /// Carrier code, e.g. "UHC01" or "MCD".
    pub carrier_code: String,
    /// Free-text carrier name, e.g. "United Healthcare Choice Plus".
    pub carrier_name: String,
    /// Whether the coverage is currently active. Inactive records are skipped.
    pub active: bool,
    /// Flat copay in dollars, 0 when unknown.
    pub copay_dollar_amount: f64,
    /// Coinsurance percentage (0–100), 0 when unknown.
    pub copay_percentage_amount: f64,
    /// Annual deductible in dollars, 0 when unknown.
    pub annual_deductible: f64,
    /// Deductible met to date in dollars.
    pub deductible_amount_met: f64,
    /// Preferred member identifier.
    #[serde(default)]
    pub member_id: Option<String>,
    /// Fallback identifier used when `member_id` is absent.
    #[serde(default)]
    pub subscriber_id: Option<String>,
}

impl InsuranceRecord {
    /// The member identifier to send to the verification service:
    /// `member_id` first, then `subscriber_id`. Blank values count as absent.
    pub fn best_member_id(&self) -> Option<&str> {
        for candidate in [&self.member_id, &self.subscriber_id] {
            if let Some(id) = candidate.as_deref() {
                let id = id.trim();
                if !id.is_empty() {
                    return Some(id);
                }
            }
        }
        None
    }

    /// True when the record carries any deductible signal of its own.
    pub fn has_deductible_data(&self) -> bool {
        self.annual_deductible > 0.0 || self.deductible_amount_met > 0.0
    }
}
