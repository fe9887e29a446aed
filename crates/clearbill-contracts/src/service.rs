//! The fixed set of clinical service lines the practice bills.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One billable treatment category. Every memo covers all four, in this
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceLine {
    /// Intramuscular ketamine.
    ImKetamine,
    /// Ketamine-assisted psychotherapy.
    Kap,
    /// Spravato (esketamine) administration.
    Spravato,
    /// Medication management (psychiatric E/M).
    MedManagement,
}

impl ServiceLine {
    /// All service lines in memo order.
    pub const ALL: [ServiceLine; 4] = [
        ServiceLine::ImKetamine,
        ServiceLine::Kap,
        ServiceLine::Spravato,
        ServiceLine::MedManagement,
    ];

    /// The ordered CPT/HCPCS codes billed for one session of this line.
    pub fn procedure_codes(&self) -> &'static [&'static str] {
        match self {
            ServiceLine::ImKetamine => &["96372", "99213"],
            ServiceLine::Kap => &["90837", "96372"],
            ServiceLine::Spravato => &["S0013", "99415"],
            ServiceLine::MedManagement => &["99214"],
        }
    }

    /// The 2–3 character abbreviation used in memos.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ServiceLine::ImKetamine => "IM",
            ServiceLine::Kap => "KAP",
            ServiceLine::Spravato => "SPR",
            ServiceLine::MedManagement => "MM",
        }
    }
}

impl fmt::Display for ServiceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceLine::ImKetamine => "IM ketamine",
            ServiceLine::Kap => "KAP",
            ServiceLine::Spravato => "Spravato",
            ServiceLine::MedManagement => "Med Management (Psych E/M)",
        };
        f.write_str(name)
    }
}
