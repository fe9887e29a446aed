//! Per-service-line responsibility calculation.
//!
//! The evaluation order is load-bearing: category overrides first, then the
//! flat-copay short-circuit, then deductible before coinsurance. Reordering
//! changes whether small balances round to zero.

use tracing::debug;

use clearbill_contracts::{
    estimate::{EstimateLabel, ResponsibilityEstimate},
    financial::FinancialSnapshot,
    patient::InsuranceRecord,
    payer::PayerCategory,
    service::ServiceLine,
};

use crate::{config::EngineConfig, tables};

/// Round half-away-from-zero to 2 decimal places.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Category/service-line pairs with a fixed answer that bypasses all
/// computation. `None` means "fall through to the math".
fn category_override(
    config: &EngineConfig,
    category: PayerCategory,
    line: ServiceLine,
) -> Option<ResponsibilityEstimate> {
    use EstimateLabel::*;
    use ResponsibilityEstimate::{Dollar, Label};

    let estimate = match (category, line) {
        (PayerCategory::Medicaid, ServiceLine::ImKetamine) => Label(MedicaidZero),
        (PayerCategory::Medicaid, ServiceLine::Kap) => Label(MedicaidZero),
        (PayerCategory::Medicaid, ServiceLine::Spravato) => Label(PerEligibility),
        (PayerCategory::Medicaid, ServiceLine::MedManagement) => Label(MedicaidMedManagement),
        (PayerCategory::SelfPay, ServiceLine::ImKetamine) => {
            Dollar(round_cents(config.self_pay_im_ketamine))
        }
        (PayerCategory::SelfPay, ServiceLine::Spravato) => {
            Dollar(round_cents(config.self_pay_spravato))
        }
        (PayerCategory::SelfPay, ServiceLine::Kap) => Label(Undocumented),
        (PayerCategory::SelfPay, ServiceLine::MedManagement) => Label(NoSelfPayPolicy),
        _ => return None,
    };
    Some(estimate)
}

/// Estimate the patient's dollar responsibility for one service line.
pub fn calculate(
    config: &EngineConfig,
    record: &InsuranceRecord,
    snapshot: &FinancialSnapshot,
    line: ServiceLine,
    category: PayerCategory,
) -> ResponsibilityEstimate {
    // 1. Category overrides bypass everything.
    if let Some(estimate) = category_override(config, category, line) {
        return estimate;
    }

    // 2. Flat-copay plans short-circuit deductible/coinsurance math.
    if snapshot.copay > 0.0 {
        return ResponsibilityEstimate::Dollar(round_cents(snapshot.copay));
    }

    // 3. Allowed amounts for the line, keyed by the carrier's fee schedule
    //    (cross-payer average when the carrier is unresolved).
    let payer = tables::resolve_payer(&record.carrier_name);
    let total_allowed = tables::line_allowed_total(payer, line);

    if total_allowed <= 0.0 {
        // No fee-schedule basis at all for this line.
        if snapshot.coinsurance_pct > 0.0 {
            return ResponsibilityEstimate::Percent(snapshot.coinsurance_pct);
        }
        return ResponsibilityEstimate::Label(EstimateLabel::PerEligibility);
    }

    // 4. Deductible first: the patient owes everything up to the remaining
    //    deductible.
    let deductible_portion = total_allowed.min(snapshot.deductible_remaining);
    let remainder = total_allowed - deductible_portion;

    // 5. Coinsurance on whatever the deductible did not consume.
    let responsibility = deductible_portion + remainder * snapshot.coinsurance_pct / 100.0;
    let responsibility = round_cents(responsibility);

    debug!(
        insurance_id = %record.id,
        service_line = %line,
        category = %category,
        total_allowed,
        deductible_portion,
        responsibility,
        "responsibility calculated"
    );

    // 6. A zero with no financial signal from either source is not a real
    //    zero — defer to the eligibility drill-down.
    if responsibility == 0.0 && snapshot.is_empty() && !record.has_deductible_data() {
        return ResponsibilityEstimate::Label(EstimateLabel::PerEligibility);
    }

    ResponsibilityEstimate::Dollar(responsibility)
}

/// Estimate all four service lines in memo order.
pub fn calculate_all(
    config: &EngineConfig,
    record: &InsuranceRecord,
    snapshot: &FinancialSnapshot,
    category: PayerCategory,
) -> [ResponsibilityEstimate; 4] {
    ServiceLine::ALL.map(|line| calculate(config, record, snapshot, line, category))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
