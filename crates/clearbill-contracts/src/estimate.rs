//! Per-service-line responsibility estimates and their memo tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The calculator's answer for one (insurance record, service line) pair:
/// either a concrete dollar amount, a bare coinsurance percentage, or a
/// categorical label. Transient — recomputed every run, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponsibilityEstimate {
    /// A dollar responsibility, ≥ 0, rounded to 2 decimals.
    Dollar(f64),
    /// A coinsurance percentage with no allowed amount to apply it to.
    Percent(f64),
    /// A categorical placeholder the front desk understands.
    Label(EstimateLabel),
}

/// The fixed set of categorical estimate labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateLabel {
    /// Medicaid override: the patient owes nothing for this line.
    MedicaidZero,
    /// No trustworthy number; defer to the eligibility drill-down.
    PerEligibility,
    /// Medicaid med-management: points staff at the medical service type.
    MedicaidMedManagement,
    /// The practice has no self-pay price for this line.
    NoSelfPayPolicy,
    /// A self-pay price exists in principle but is not documented.
    Undocumented,
}

impl fmt::Display for EstimateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EstimateLabel::MedicaidZero => "$0 patient responsibility",
            EstimateLabel::PerEligibility => "Copay/coinsurance/deductible per eligibility",
            EstimateLabel::MedicaidMedManagement => {
                "Typically $0 if eligible (Medicaid balances should be $0). \
                 Verify under the medical service type (drill to 01 = Medical Care) \
                 when checking E/M."
            }
            EstimateLabel::NoSelfPayPolicy => "No self-pay policy",
            EstimateLabel::Undocumented => "No explicit amount documented",
        };
        f.write_str(text)
    }
}

impl ResponsibilityEstimate {
    /// Reduce the estimate to its shortest unambiguous memo token.
    ///
    /// The same tokenization feeds both the posting decision engine and the
    /// memo encoder, so the published text and the publish verdict can never
    /// disagree about what a line says.
    pub fn token(&self) -> EstimateToken {
        match self {
            ResponsibilityEstimate::Dollar(amount) => EstimateToken::Dollar(*amount),
            ResponsibilityEstimate::Percent(pct) => EstimateToken::Percent(*pct),
            ResponsibilityEstimate::Label(EstimateLabel::MedicaidZero) => EstimateToken::Zero,
            ResponsibilityEstimate::Label(EstimateLabel::MedicaidMedManagement) => {
                EstimateToken::Zero
            }
            ResponsibilityEstimate::Label(EstimateLabel::PerEligibility) => {
                EstimateToken::PerEligibility
            }
            ResponsibilityEstimate::Label(EstimateLabel::NoSelfPayPolicy) => {
                EstimateToken::NoPolicy
            }
            ResponsibilityEstimate::Label(EstimateLabel::Undocumented) => EstimateToken::Tbd,
        }
    }
}

/// The short encoded form of an estimate, as it appears in a memo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EstimateToken {
    Dollar(f64),
    Percent(f64),
    PerEligibility,
    /// A categorical "$0" — distinct from a computed `Dollar(0.0)` only in
    /// rendering, not in decision buckets.
    Zero,
    NoPolicy,
    Tbd,
}

impl EstimateToken {
    /// True for a concrete, non-trivial number: a positive dollar amount or
    /// a positive percentage.
    pub fn is_nonzero_value(&self) -> bool {
        match self {
            EstimateToken::Dollar(a) => *a > 0.0,
            EstimateToken::Percent(p) => *p > 0.0,
            _ => false,
        }
    }

    /// True for the generic "Per Elig" placeholder.
    pub fn is_per_eligibility(&self) -> bool {
        matches!(self, EstimateToken::PerEligibility)
    }

    /// True for any flavor of zero dollars.
    pub fn is_zero_dollar(&self) -> bool {
        matches!(self, EstimateToken::Zero) || matches!(self, EstimateToken::Dollar(a) if *a == 0.0)
    }
}

impl fmt::Display for EstimateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateToken::Dollar(a) => write!(f, "${:.2}", a),
            EstimateToken::Percent(p) => write!(f, "{:.0}%", p),
            EstimateToken::PerEligibility => f.write_str("Per Elig"),
            EstimateToken::Zero => f.write_str("$0"),
            EstimateToken::NoPolicy => f.write_str("No Policy"),
            EstimateToken::Tbd => f.write_str("TBD"),
        }
    }
}

/// The publish/suppress verdict for one insurance record's full set of
/// estimates, with the reason written to the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDecision {
    pub publish: bool,
    pub reason: String,
}

impl PostingDecision {
    pub fn publish(reason: impl Into<String>) -> Self {
        Self { publish: true, reason: reason.into() }
    }

    pub fn suppress(reason: impl Into<String>) -> Self {
        Self { publish: false, reason: reason.into() }
    }
}
