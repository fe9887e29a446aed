//! Coarse payer classification driving the responsibility rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category a carrier is classified into. Determines which override
/// rules apply before any deductible/coinsurance math runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayerCategory {
    Medicaid,
    SelfPay,
    MedicareAdvantage,
    Commercial,
}

impl fmt::Display for PayerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayerCategory::Medicaid => "Medicaid",
            PayerCategory::SelfPay => "Self-Pay",
            PayerCategory::MedicareAdvantage => "Medicare Advantage",
            PayerCategory::Commercial => "Commercial",
        };
        f.write_str(name)
    }
}
