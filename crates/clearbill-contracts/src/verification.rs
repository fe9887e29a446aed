//! Output types of the external eligibility-verification service.
//!
//! A `VerificationSnapshot` is produced at most once per insurance record
//! per run and is never persisted by the engine. Monetary fields are
//! `Option` because the service frequently returns a syntactically valid
//! but partially (or entirely) empty response.

use serde::{Deserialize, Serialize};

/// Coverage status as reported by the verification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Active,
    Inactive,
}

impl VerificationStatus {
    /// Parse the free-text status field. Anything that is not recognizably
    /// "active" or "inactive" counts as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// The verification service's answer for one insurance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSnapshot {
    pub status: VerificationStatus,
    /// Flat copay in dollars, when the response carried one.
    pub copay: Option<f64>,
    /// Coinsurance percentage (0–100).
    pub coinsurance_pct: Option<f64>,
    /// Deductible remaining in dollars.
    pub deductible_remaining: Option<f64>,
    /// Annual deductible in dollars.
    pub annual_deductible: Option<f64>,
    /// Deductible met to date in dollars.
    pub deductible_met: Option<f64>,
}

impl VerificationSnapshot {
    /// True when every extracted monetary field is zero or absent.
    ///
    /// Such a snapshot is semantically empty: the status came back but the
    /// payer reported no usable benefit data, so the fuser falls back to
    /// the practice-management record.
    pub fn all_fields_empty(&self) -> bool {
        [
            self.copay,
            self.coinsurance_pct,
            self.deductible_remaining,
            self.annual_deductible,
            self.deductible_met,
        ]
        .iter()
        .all(|f| f.unwrap_or(0.0) == 0.0)
    }
}

/// A candidate match from the insurance-discovery fallback, used only when
/// the practice-management record has no member identifier at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerMatch {
    /// The payer name the discovery service resolved.
    pub payer_name: String,
    /// The member identifier it found for this patient.
    pub member_id: String,
}
