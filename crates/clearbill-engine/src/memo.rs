//! Memo encoding: one compact line per (patient, insurance) pair.
//!
//! The format is fixed — `"<PAYER> PR: IM:<tok> KAP:<tok> SPR:<tok>
//! MM:<tok>"` — and kept short by construction (short tokens, short
//! abbreviations) so it fits the practice-management memo field without an
//! enforced cap.

use clearbill_contracts::{
    estimate::EstimateToken,
    service::ServiceLine,
};

use crate::tables;

/// Render the memo line for one insurance record.
pub fn encode(carrier_name: &str, tokens: &[EstimateToken; 4]) -> String {
    let mut parts = vec![format!("{} PR:", tables::payer_abbreviation(carrier_name))];
    for (line, token) in ServiceLine::ALL.iter().zip(tokens.iter()) {
        parts.push(format!("{}:{}", line.abbreviation(), token));
    }
    parts.join(" ")
}

/// The exact audit message for a (patient, insurance, memo) triple.
///
/// The duplicate suppressor compares this text verbatim, so both the
/// success row and the skipped row for the same computation must use the
/// identical string. Any change to memo formatting intentionally defeats
/// deduplication: changed text is new information.
pub fn audit_message(patient_id: &str, insurance_id: &str, memo: &str) -> String {
    format!("patient {} insurance {} memo: {}", patient_id, insurance_id, memo)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use EstimateToken::*;

    #[test]
    fn memo_layout_is_fixed() {
        let tokens = [Dollar(25.0), PerEligibility, Zero, Tbd];
        assert_eq!(
            encode("United Healthcare Choice Plus", &tokens),
            "UHC PR: IM:$25.00 KAP:Per Elig SPR:$0 MM:TBD"
        );
    }

    #[test]
    fn unknown_carrier_falls_back_to_first_eight_chars() {
        let tokens = [Zero, Zero, Zero, Zero];
        let memo = encode("Mountain West Cooperative", &tokens);
        assert!(memo.starts_with("MOUNTAIN PR:"), "got {}", memo);
    }

    #[test]
    fn memo_stays_compact() {
        // Worst realistic case: long tokens on every line.
        let tokens = [PerEligibility, PerEligibility, NoPolicy, Dollar(9999.99)];
        let memo = encode("Blue Cross Blue Shield of Texas", &tokens);
        assert!(memo.len() <= 80, "memo unexpectedly long: {} chars", memo.len());
    }

    #[test]
    fn audit_message_is_deterministic() {
        let a = audit_message("p1", "ins-1", "UHC PR: IM:$25.00");
        let b = audit_message("p1", "ins-1", "UHC PR: IM:$25.00");
        assert_eq!(a, b);
        assert_ne!(a, audit_message("p1", "ins-2", "UHC PR: IM:$25.00"));
    }
}
