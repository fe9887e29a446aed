//! Static reference data: contracted allowed amounts, payer alias
//! resolution, and memo abbreviations.
//!
//! Everything in this module is immutable and embedded in the binary. The
//! tables change rarely (annual fee-schedule updates) and are small enough
//! that a database would be pure overhead.

use clearbill_contracts::service::ServiceLine;

// ── Payer codes ───────────────────────────────────────────────────────────────

/// The payers with a contracted fee schedule on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayerCode {
    Uhc,
    Bcbs,
    Anthem,
    Aetna,
    Cigna,
    Humana,
    Kaiser,
    Medicare,
}

impl PayerCode {
    /// All payers, in fee-row column order.
    pub const ALL: [PayerCode; 8] = [
        PayerCode::Uhc,
        PayerCode::Bcbs,
        PayerCode::Anthem,
        PayerCode::Aetna,
        PayerCode::Cigna,
        PayerCode::Humana,
        PayerCode::Kaiser,
        PayerCode::Medicare,
    ];

    fn column(&self) -> usize {
        match self {
            PayerCode::Uhc => 0,
            PayerCode::Bcbs => 1,
            PayerCode::Anthem => 2,
            PayerCode::Aetna => 3,
            PayerCode::Cigna => 4,
            PayerCode::Humana => 5,
            PayerCode::Kaiser => 6,
            PayerCode::Medicare => 7,
        }
    }
}

// ── Payer resolution ──────────────────────────────────────────────────────────

/// Uppercased carrier-name substrings mapped to a payer code.
///
/// Resolution scans every alias and keeps the longest one contained in the
/// carrier name, so "ANTHEM BLUE CROSS" resolves to Anthem, not BCBS.
const PAYER_ALIASES: &[(&str, PayerCode)] = &[
    ("UNITED HEALTHCARE", PayerCode::Uhc),
    ("UNITEDHEALTHCARE", PayerCode::Uhc),
    ("UHC", PayerCode::Uhc),
    ("AARP", PayerCode::Uhc),
    ("BLUE CROSS BLUE SHIELD", PayerCode::Bcbs),
    ("BLUE CROSS", PayerCode::Bcbs),
    ("BLUE SHIELD", PayerCode::Bcbs),
    ("BCBS", PayerCode::Bcbs),
    ("ANTHEM BLUE CROSS", PayerCode::Anthem),
    ("ANTHEM BCBS", PayerCode::Anthem),
    ("ANTHEM", PayerCode::Anthem),
    ("AETNA", PayerCode::Aetna),
    ("CIGNA", PayerCode::Cigna),
    ("BRAVO CIGNA", PayerCode::Cigna),
    ("HUMANA", PayerCode::Humana),
    ("KAISER", PayerCode::Kaiser),
    ("MEDICARE", PayerCode::Medicare),
];

/// Resolve a free-text carrier name to a fee-schedule payer.
///
/// Longest (most specific) alias wins; `None` when nothing matches, in
/// which case the caller falls back to cross-payer averages.
pub fn resolve_payer(carrier_name: &str) -> Option<PayerCode> {
    let name = carrier_name.to_uppercase();
    PAYER_ALIASES
        .iter()
        .filter(|(alias, _)| name.contains(alias))
        .max_by_key(|(alias, _)| alias.len())
        .map(|(_, payer)| *payer)
}

// ── Fee schedule ──────────────────────────────────────────────────────────────

/// Contracted allowed amount per procedure code, one column per payer in
/// `PayerCode::ALL` order: UHC, BCBS, Anthem, Aetna, Cigna, Humana, Kaiser,
/// Medicare.
fn fee_row(procedure_code: &str) -> Option<[f64; 8]> {
    let row = match procedure_code {
        // Therapeutic injection administration.
        "96372" => [28.50, 31.20, 29.75, 27.40, 30.10, 26.85, 25.60, 24.31],
        // Established patient E/M, level 3.
        "99213" => [92.40, 98.75, 95.20, 89.60, 94.30, 88.15, 86.90, 91.44],
        // Psychotherapy, 60 minutes.
        "90837" => [152.30, 164.80, 158.45, 149.90, 156.70, 147.25, 144.60, 152.48],
        // Esketamine, 56 mg.
        "S0013" => [605.00, 632.50, 618.20, 598.40, 611.75, 592.30, 585.00, 590.26],
        // Prolonged clinical staff observation.
        "99415" => [38.20, 41.60, 39.90, 36.75, 40.15, 35.80, 34.95, 37.12],
        // Established patient E/M, level 4.
        "99214" => [131.70, 140.25, 135.60, 127.85, 133.90, 125.40, 123.75, 130.42],
        _ => return None,
    };
    Some(row)
}

/// The contracted amount for one payer and procedure code.
pub fn allowed_amount(payer: PayerCode, procedure_code: &str) -> Option<f64> {
    fee_row(procedure_code).map(|row| row[payer.column()])
}

/// The arithmetic mean of a code's amount across all known payers, used
/// when the carrier cannot be resolved to a fee schedule.
pub fn average_allowed_amount(procedure_code: &str) -> Option<f64> {
    fee_row(procedure_code).map(|row| row.iter().sum::<f64>() / row.len() as f64)
}

/// Sum of allowed amounts across every procedure code in a service line.
///
/// Per code: the resolved payer's contracted amount, else the cross-payer
/// average. Codes absent from the schedule entirely contribute nothing.
pub fn line_allowed_total(payer: Option<PayerCode>, line: ServiceLine) -> f64 {
    line.procedure_codes()
        .iter()
        .filter_map(|code| match payer {
            Some(p) => allowed_amount(p, code).or_else(|| average_allowed_amount(code)),
            None => average_allowed_amount(code),
        })
        .sum()
}

// ── Memo abbreviations ────────────────────────────────────────────────────────

/// Carrier-name substrings mapped to the short payer code printed in memos.
///
/// Checked in order; more specific entries come first so "HEALTH FIRST
/// MEDICAID" renders as MEDICAID and "BRAVO CIGNA" as CIGNA.
const MEMO_ABBREVIATIONS: &[(&str, &str)] = &[
    ("HEALTH FIRST MEDICAID", "MEDICAID"),
    ("COLORADO COMMUNITY HEALTH ALLIANCE", "CCHA"),
    ("COLORADO ACCESS", "CO ACCESS"),
    ("UNITED HEALTHCARE", "UHC"),
    ("UNITEDHEALTHCARE", "UHC"),
    ("BLUE CROSS BLUE SHIELD", "BCBS"),
    ("BRAVO CIGNA", "CIGNA"),
    ("CITY OF AURORA", "AURORA"),
    ("ANTHEM", "ANTHEM"),
    ("AETNA", "AETNA"),
    ("CIGNA", "CIGNA"),
    ("HUMANA", "HUMANA"),
    ("KAISER", "KAISER"),
    ("MEDICAID", "MEDICAID"),
    ("MEDICARE", "MEDICARE"),
    ("AARP", "AARP"),
];

/// The short payer code used in memo text. Falls back to the first 8
/// characters of the name, uppercased.
pub fn payer_abbreviation(carrier_name: &str) -> String {
    let name = carrier_name.to_uppercase();
    for (substring, abbrev) in MEMO_ABBREVIATIONS {
        if name.contains(substring) {
            return (*abbrev).to_string();
        }
    }
    name.chars().take(8).collect()
}

// ── Carrier name matching ─────────────────────────────────────────────────────

/// Families of names that refer to the same payer, used to decide whether a
/// discovered insurance matches the practice-management carrier.
const ABBREVIATION_FAMILIES: &[(&str, &[&str])] = &[
    ("BCBS", &["BLUE CROSS BLUE SHIELD", "BLUECROSS", "BC BS"]),
    ("UNITED", &["UNITED HEALTHCARE", "UHC"]),
    ("ANTHEM", &["ANTHEM BCBS", "ANTHEM BLUE CROSS"]),
    ("AETNA", &["AETNA HEALTH", "AETNA INC"]),
    ("CIGNA", &["CIGNA HEALTH", "CIGNA HEALTHCARE"]),
    ("HUMANA", &["HUMANA HEALTH", "HUMANA INC"]),
    ("MEDICAID", &["MCD", "HEALTH FIRST MEDICAID"]),
    ("MEDICARE", &["MEDICARE ADVANTAGE"]),
];

/// Decide whether two carrier names refer to the same payer.
///
/// Exact match, then abbreviation families in both directions, then a word
/// overlap heuristic: two shared words, or one shared word longer than five
/// characters.
pub fn carrier_names_match(a: &str, b: &str) -> bool {
    let a = a.to_uppercase();
    let b = b.to_uppercase();
    let a = a.trim();
    let b = b.trim();

    if a == b {
        return true;
    }

    for (abbrev, full_names) in ABBREVIATION_FAMILIES {
        if a.contains(abbrev) && full_names.iter().any(|full| b.contains(full)) {
            return true;
        }
        if b.contains(abbrev) && full_names.iter().any(|full| a.contains(full)) {
            return true;
        }
    }

    let a_words: std::collections::HashSet<&str> = a.split_whitespace().collect();
    let b_words: std::collections::HashSet<&str> = b.split_whitespace().collect();
    let common: Vec<&&str> = a_words.intersection(&b_words).collect();

    common.len() >= 2 || common.iter().any(|w| w.len() > 5)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_alias_wins() {
        assert_eq!(resolve_payer("Anthem Blue Cross of Colorado"), Some(PayerCode::Anthem));
        assert_eq!(resolve_payer("Blue Cross Blue Shield of Texas"), Some(PayerCode::Bcbs));
        assert_eq!(resolve_payer("UHC Choice Plus"), Some(PayerCode::Uhc));
    }

    #[test]
    fn unresolved_carrier_yields_none() {
        assert_eq!(resolve_payer("City of Aurora Employee Plan"), None);
    }

    #[test]
    fn every_payer_prices_every_scheduled_code() {
        for line in ServiceLine::ALL {
            for code in line.procedure_codes() {
                for payer in PayerCode::ALL {
                    assert!(
                        allowed_amount(payer, code).is_some(),
                        "missing amount for {:?} {}",
                        payer,
                        code
                    );
                }
            }
        }
    }

    #[test]
    fn average_is_the_cross_payer_mean() {
        let avg = average_allowed_amount("99214").unwrap();
        let sum: f64 = PayerCode::ALL
            .iter()
            .map(|p| allowed_amount(*p, "99214").unwrap())
            .sum();
        assert!((avg - sum / 8.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_code_has_no_row() {
        assert_eq!(allowed_amount(PayerCode::Uhc, "00000"), None);
        assert_eq!(average_allowed_amount("00000"), None);
    }

    #[test]
    fn line_total_sums_all_codes() {
        let total = line_allowed_total(Some(PayerCode::Aetna), ServiceLine::ImKetamine);
        let expected = allowed_amount(PayerCode::Aetna, "96372").unwrap()
            + allowed_amount(PayerCode::Aetna, "99213").unwrap();
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn line_total_falls_back_to_averages() {
        let total = line_allowed_total(None, ServiceLine::MedManagement);
        assert!((total - average_allowed_amount("99214").unwrap()).abs() < 1e-9);
    }

    #[test]
    fn memo_abbreviations_prefer_specific_entries() {
        assert_eq!(payer_abbreviation("HEALTH FIRST MEDICAID"), "MEDICAID");
        assert_eq!(payer_abbreviation("Bravo Cigna Medicare"), "CIGNA");
        assert_eq!(payer_abbreviation("United Healthcare Choice"), "UHC");
    }

    #[test]
    fn memo_abbreviation_fallback_is_first_eight_upper() {
        assert_eq!(payer_abbreviation("Rocky Mountain Plan"), "ROCKY MO");
    }

    #[test]
    fn names_match_via_abbreviation_family() {
        assert!(carrier_names_match("UHC", "United Healthcare of Colorado"));
        assert!(carrier_names_match("Blue Cross Blue Shield TX", "BCBS"));
    }

    #[test]
    fn names_match_via_word_overlap() {
        assert!(carrier_names_match("Rocky Mountain Health", "Rocky Mountain HMO"));
        assert!(!carrier_names_match("Aetna", "Cigna Healthcare"));
    }
}
