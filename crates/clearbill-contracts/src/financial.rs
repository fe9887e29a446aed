//! The fused financial view consumed by the responsibility calculator.

use serde::{Deserialize, Serialize};

/// One reconciled set of benefit values for an insurance record, produced
/// by the fuser from the verification snapshot and the record's own
/// defaults.
///
/// Invariant: every field is non-negative. `deductible_remaining` is either
/// taken directly from the verification source or derived as
/// `max(0, annual − met)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Flat copay in dollars; a positive value short-circuits all
    /// deductible/coinsurance math.
    pub copay: f64,
    /// Coinsurance percentage (0–100).
    pub coinsurance_pct: f64,
    /// Dollars of deductible the patient still owes.
    pub deductible_remaining: f64,
}

impl FinancialSnapshot {
    /// True when no financial signal survived fusion at all.
    ///
    /// A calculated $0 backed by an empty snapshot is reported as
    /// "per eligibility" rather than a trustworthy zero.
    pub fn is_empty(&self) -> bool {
        self.copay == 0.0 && self.coinsurance_pct == 0.0 && self.deductible_remaining == 0.0
    }
}
