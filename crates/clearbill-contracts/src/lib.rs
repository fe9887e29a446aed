//! # clearbill-contracts
//!
//! Shared types and error contracts for the Clearbill patient financial
//! responsibility engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod audit;
pub mod error;
pub mod estimate;
pub mod financial;
pub mod patient;
pub mod payer;
pub mod service;
pub mod verification;

#[cfg(test)]
mod tests {
    use super::*;
    use error::ClearbillError;
    use estimate::{EstimateLabel, EstimateToken, ResponsibilityEstimate};
    use patient::{InsuranceRecord, Patient};
    use service::ServiceLine;
    use verification::{VerificationSnapshot, VerificationStatus};

    fn record(member_id: Option<&str>, subscriber_id: Option<&str>) -> InsuranceRecord {
        InsuranceRecord {
            id: "ins-1".to_string(),
            carrier_code: "UHC01".to_string(),
            carrier_name: "United Healthcare".to_string(),
            active: true,
            copay_dollar_amount: 0.0,
            copay_percentage_amount: 0.0,
            annual_deductible: 0.0,
            deductible_amount_met: 0.0,
            member_id: member_id.map(str::to_string),
            subscriber_id: subscriber_id.map(str::to_string),
        }
    }

    // ── Patient name splitting ───────────────────────────────────────────────

    #[test]
    fn split_name_last_first() {
        let patient = Patient {
            id: "p1".to_string(),
            name: "Doe, Jane".to_string(),
            dob: "01/15/1980".to_string(),
            insurances: vec![],
        };
        assert_eq!(
            patient.split_name(),
            Some(("Jane".to_string(), "Doe".to_string()))
        );
    }

    #[test]
    fn split_name_rejects_unsplittable() {
        for bad in ["Jane Doe", "Doe,", ", Jane", ""] {
            let patient = Patient {
                id: "p1".to_string(),
                name: bad.to_string(),
                dob: "01/15/1980".to_string(),
                insurances: vec![],
            };
            assert_eq!(patient.split_name(), None, "name {:?} should not split", bad);
        }
    }

    // ── Member id priority ───────────────────────────────────────────────────

    #[test]
    fn member_id_takes_priority_over_subscriber_id() {
        let rec = record(Some("M123"), Some("S456"));
        assert_eq!(rec.best_member_id(), Some("M123"));
    }

    #[test]
    fn blank_member_id_falls_back_to_subscriber_id() {
        let rec = record(Some("   "), Some("S456"));
        assert_eq!(rec.best_member_id(), Some("S456"));
    }

    #[test]
    fn no_identifiers_yields_none() {
        let rec = record(None, Some(""));
        assert_eq!(rec.best_member_id(), None);
    }

    // ── Verification snapshot ────────────────────────────────────────────────

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(VerificationStatus::parse("Active"), Some(VerificationStatus::Active));
        assert_eq!(VerificationStatus::parse(" INACTIVE "), Some(VerificationStatus::Inactive));
        assert_eq!(VerificationStatus::parse("unknown"), None);
    }

    #[test]
    fn snapshot_with_only_zeroes_is_empty() {
        let snap = VerificationSnapshot {
            status: VerificationStatus::Active,
            copay: Some(0.0),
            coinsurance_pct: None,
            deductible_remaining: Some(0.0),
            annual_deductible: None,
            deductible_met: None,
        };
        assert!(snap.all_fields_empty());
    }

    #[test]
    fn snapshot_with_one_value_is_not_empty() {
        let snap = VerificationSnapshot {
            status: VerificationStatus::Active,
            copay: None,
            coinsurance_pct: Some(20.0),
            deductible_remaining: None,
            annual_deductible: None,
            deductible_met: None,
        };
        assert!(!snap.all_fields_empty());
    }

    // ── Tokens ───────────────────────────────────────────────────────────────

    #[test]
    fn token_rendering() {
        assert_eq!(EstimateToken::Dollar(25.0).to_string(), "$25.00");
        assert_eq!(EstimateToken::Percent(20.0).to_string(), "20%");
        assert_eq!(EstimateToken::PerEligibility.to_string(), "Per Elig");
        assert_eq!(EstimateToken::Zero.to_string(), "$0");
        assert_eq!(EstimateToken::NoPolicy.to_string(), "No Policy");
        assert_eq!(EstimateToken::Tbd.to_string(), "TBD");
    }

    #[test]
    fn label_estimates_tokenize_to_fixed_tokens() {
        assert_eq!(
            ResponsibilityEstimate::Label(EstimateLabel::PerEligibility).token(),
            EstimateToken::PerEligibility
        );
        assert_eq!(
            ResponsibilityEstimate::Label(EstimateLabel::MedicaidZero).token(),
            EstimateToken::Zero
        );
        assert_eq!(
            ResponsibilityEstimate::Label(EstimateLabel::MedicaidMedManagement).token(),
            EstimateToken::Zero
        );
        assert_eq!(
            ResponsibilityEstimate::Label(EstimateLabel::NoSelfPayPolicy).token(),
            EstimateToken::NoPolicy
        );
        assert_eq!(
            ResponsibilityEstimate::Label(EstimateLabel::Undocumented).token(),
            EstimateToken::Tbd
        );
    }

    #[test]
    fn zero_dollar_bucket_covers_both_zero_flavors() {
        assert!(EstimateToken::Zero.is_zero_dollar());
        assert!(EstimateToken::Dollar(0.0).is_zero_dollar());
        assert!(!EstimateToken::Dollar(0.01).is_zero_dollar());
        assert!(EstimateToken::Dollar(0.01).is_nonzero_value());
        assert!(!EstimateToken::Tbd.is_nonzero_value());
    }

    // ── Service lines ────────────────────────────────────────────────────────

    #[test]
    fn service_line_order_and_abbreviations() {
        let abbrevs: Vec<&str> = ServiceLine::ALL.iter().map(|s| s.abbreviation()).collect();
        assert_eq!(abbrevs, vec!["IM", "KAP", "SPR", "MM"]);
    }

    #[test]
    fn every_service_line_has_procedure_codes() {
        for line in ServiceLine::ALL {
            assert!(!line.procedure_codes().is_empty(), "{} has no codes", line);
        }
    }

    // ── Error display ────────────────────────────────────────────────────────

    #[test]
    fn publish_failed_display_names_the_patient() {
        let err = ClearbillError::PublishFailed {
            patient_id: "p42".to_string(),
            reason: "connection reset".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("p42"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn config_error_display() {
        let err = ClearbillError::ConfigError {
            reason: "lookback_days must be positive".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
