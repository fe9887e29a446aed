//! Financial data fusion: verification snapshot + record defaults → one
//! `FinancialSnapshot`.
//!
//! The verification service sometimes returns a syntactically valid but
//! semantically empty response (inactive, or every field zero). In that case
//! the record's own historical benefit data is the only trustworthy signal,
//! so fusion is two-tier: field-level priority merge first, then a fallback
//! branch that re-derives the deductible from the record alone.

use tracing::debug;

use clearbill_contracts::{
    financial::FinancialSnapshot,
    patient::InsuranceRecord,
    verification::{VerificationSnapshot, VerificationStatus},
};

use crate::config::EngineConfig;

/// True when the snapshot cannot be trusted and the record's own benefit
/// data must take over.
fn fallback_needed(snapshot: Option<&VerificationSnapshot>) -> bool {
    match snapshot {
        None => true,
        Some(snap) => snap.status == VerificationStatus::Inactive || snap.all_fields_empty(),
    }
}

/// Verification value if positive, else the record default. Each field is
/// merged independently.
fn prefer_nonzero(verified: Option<f64>, record_default: f64) -> f64 {
    match verified {
        Some(v) if v > 0.0 => v,
        _ => record_default.max(0.0),
    }
}

/// Fuse one insurance record with an optional verification snapshot.
///
/// Every output field is non-negative. `deductible_remaining` is taken from
/// the verification source when it reported a positive remaining amount,
/// otherwise derived as `max(0, annual − met)` from whichever source has
/// annual/met data.
pub fn fuse(
    config: &EngineConfig,
    record: &InsuranceRecord,
    snapshot: Option<&VerificationSnapshot>,
) -> FinancialSnapshot {
    let fallback = fallback_needed(snapshot);

    let copay = prefer_nonzero(snapshot.and_then(|s| s.copay), record.copay_dollar_amount);
    let mut coinsurance_pct = prefer_nonzero(
        snapshot.and_then(|s| s.coinsurance_pct),
        record.copay_percentage_amount,
    );

    let mut deductible_remaining = match snapshot.and_then(|s| s.deductible_remaining) {
        Some(remaining) if remaining > 0.0 => remaining,
        _ => {
            let annual = snapshot
                .and_then(|s| s.annual_deductible)
                .filter(|v| *v > 0.0)
                .unwrap_or(record.annual_deductible);
            let met = snapshot
                .and_then(|s| s.deductible_met)
                .filter(|v| *v > 0.0)
                .unwrap_or(record.deductible_amount_met);
            (annual - met).max(0.0)
        }
    };

    if fallback && copay == 0.0 {
        // The snapshot carried nothing usable: substitute the configured
        // default coinsurance and trust only the record's own deductible
        // fields from here on.
        if coinsurance_pct == 0.0 {
            coinsurance_pct = config.default_coinsurance_pct;
        }
        deductible_remaining =
            (record.annual_deductible - record.deductible_amount_met).max(0.0);
    }

    let fused = FinancialSnapshot {
        copay,
        coinsurance_pct,
        deductible_remaining,
    };

    debug!(
        insurance_id = %record.id,
        fallback,
        copay = fused.copay,
        coinsurance_pct = fused.coinsurance_pct,
        deductible_remaining = fused.deductible_remaining,
        "financial data fused"
    );

    fused
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InsuranceRecord {
        InsuranceRecord {
            id: "ins-1".to_string(),
            carrier_code: "AET".to_string(),
            carrier_name: "Aetna Health".to_string(),
            active: true,
            copay_dollar_amount: 0.0,
            copay_percentage_amount: 0.0,
            annual_deductible: 0.0,
            deductible_amount_met: 0.0,
            member_id: Some("M1".to_string()),
            subscriber_id: None,
        }
    }

    fn snapshot() -> VerificationSnapshot {
        VerificationSnapshot {
            status: VerificationStatus::Active,
            copay: None,
            coinsurance_pct: None,
            deductible_remaining: None,
            annual_deductible: None,
            deductible_met: None,
        }
    }

    #[test]
    fn verification_values_take_priority() {
        let mut rec = record();
        rec.copay_dollar_amount = 40.0;
        rec.copay_percentage_amount = 10.0;

        let mut snap = snapshot();
        snap.copay = Some(25.0);
        snap.coinsurance_pct = Some(30.0);

        let fused = fuse(&EngineConfig::default(), &rec, Some(&snap));
        assert_eq!(fused.copay, 25.0);
        assert_eq!(fused.coinsurance_pct, 30.0);
    }

    #[test]
    fn zero_verification_values_fall_through_to_record() {
        let mut rec = record();
        rec.copay_dollar_amount = 40.0;

        let mut snap = snapshot();
        snap.copay = Some(0.0);
        snap.coinsurance_pct = Some(15.0); // keeps the snapshot non-empty

        let fused = fuse(&EngineConfig::default(), &rec, Some(&snap));
        assert_eq!(fused.copay, 40.0);
    }

    #[test]
    fn deductible_remaining_direct_from_verification() {
        let mut snap = snapshot();
        snap.deductible_remaining = Some(320.0);

        let fused = fuse(&EngineConfig::default(), &record(), Some(&snap));
        assert_eq!(fused.deductible_remaining, 320.0);
    }

    #[test]
    fn deductible_remaining_derived_from_annual_minus_met() {
        let mut snap = snapshot();
        snap.annual_deductible = Some(1000.0);
        snap.deductible_met = Some(350.0);

        let fused = fuse(&EngineConfig::default(), &record(), Some(&snap));
        assert_eq!(fused.deductible_remaining, 650.0);
    }

    #[test]
    fn derived_deductible_never_goes_negative() {
        let mut rec = record();
        rec.annual_deductible = 500.0;
        rec.deductible_amount_met = 900.0;

        let fused = fuse(&EngineConfig::default(), &rec, None);
        assert_eq!(fused.deductible_remaining, 0.0);
    }

    #[test]
    fn absent_snapshot_triggers_fallback_defaults() {
        let mut rec = record();
        rec.annual_deductible = 500.0;
        rec.deductible_amount_met = 100.0;

        let fused = fuse(&EngineConfig::default(), &rec, None);
        assert_eq!(fused.coinsurance_pct, 20.0);
        assert_eq!(fused.deductible_remaining, 400.0);
    }

    #[test]
    fn inactive_snapshot_triggers_fallback() {
        let mut rec = record();
        rec.annual_deductible = 200.0;

        let mut snap = snapshot();
        snap.status = VerificationStatus::Inactive;
        // Verification deductible fields are ignored entirely in the
        // fallback branch.
        snap.deductible_remaining = Some(999.0);
        snap.coinsurance_pct = Some(0.0);

        let fused = fuse(&EngineConfig::default(), &rec, Some(&snap));
        assert_eq!(fused.deductible_remaining, 200.0);
        assert_eq!(fused.coinsurance_pct, 20.0);
    }

    #[test]
    fn all_zero_snapshot_triggers_fallback() {
        let mut rec = record();
        rec.copay_percentage_amount = 0.0;
        rec.annual_deductible = 800.0;
        rec.deductible_amount_met = 200.0;

        let mut snap = snapshot();
        snap.copay = Some(0.0);
        snap.coinsurance_pct = Some(0.0);
        snap.deductible_remaining = Some(0.0);

        let fused = fuse(&EngineConfig::default(), &rec, Some(&snap));
        assert_eq!(fused.coinsurance_pct, 20.0);
        assert_eq!(fused.deductible_remaining, 600.0);
    }

    #[test]
    fn fallback_with_record_copay_keeps_record_coinsurance() {
        // A positive fused copay means the fallback substitution never runs.
        let mut rec = record();
        rec.copay_dollar_amount = 35.0;

        let fused = fuse(&EngineConfig::default(), &rec, None);
        assert_eq!(fused.copay, 35.0);
        assert_eq!(fused.coinsurance_pct, 0.0);
    }

    #[test]
    fn outputs_are_never_negative() {
        let mut rec = record();
        rec.copay_dollar_amount = -5.0;
        rec.copay_percentage_amount = -1.0;
        rec.annual_deductible = -100.0;

        let fused = fuse(&EngineConfig::default(), &rec, None);
        assert!(fused.copay >= 0.0);
        assert!(fused.coinsurance_pct >= 0.0);
        assert!(fused.deductible_remaining >= 0.0);
    }
}
