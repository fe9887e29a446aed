//! Payer classification: carrier strings → `PayerCategory`.
//!
//! Classification is a pure function of the carrier code, carrier name, and
//! static configuration. Rules live in an ordered table evaluated in
//! declaration order — the first matching rule wins — so the priority is
//! auditable and each rule is testable on its own.

use tracing::debug;

use clearbill_contracts::payer::PayerCategory;

use crate::config::EngineConfig;

// ── Rule table ────────────────────────────────────────────────────────────────

/// One entry in the ordered classification table.
struct CategoryRule {
    /// Stable identifier used in debug logs.
    id: &'static str,
    category: PayerCategory,
    /// Predicate over `(config, CODE_UPPER, NAME_UPPER)`.
    applies: fn(&EngineConfig, &str, &str) -> bool,
}

/// Evaluated top to bottom; the final rule always matches.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        id: "medicaid-indicator",
        category: PayerCategory::Medicaid,
        applies: |config, code, name| {
            config
                .medicaid_indicators
                .iter()
                .any(|ind| code.contains(ind.as_str()) || name.contains(ind.as_str()))
        },
    },
    CategoryRule {
        id: "self-pay-token",
        category: PayerCategory::SelfPay,
        applies: |_, _, name| name.contains("SELF") || name.contains("CASH"),
    },
    CategoryRule {
        id: "medicare-advantage",
        category: PayerCategory::MedicareAdvantage,
        applies: |_, _, name| is_medicare_advantage(name),
    },
    CategoryRule {
        id: "commercial-default",
        category: PayerCategory::Commercial,
        applies: |_, _, _| true,
    },
];

/// Classify one carrier. Pure: identical inputs always yield the same
/// category.
pub fn classify(config: &EngineConfig, carrier_code: &str, carrier_name: &str) -> PayerCategory {
    let code = carrier_code.to_uppercase();
    let name = carrier_name.to_uppercase();

    for rule in RULES {
        if (rule.applies)(config, &code, &name) {
            debug!(rule_id = rule.id, carrier = %carrier_name, category = %rule.category, "carrier classified");
            return rule.category;
        }
    }

    // The commercial-default rule always matches.
    unreachable!("classification table must end with a catch-all rule")
}

// ── Medicare Advantage rule set ───────────────────────────────────────────────

/// Lexical indicators that identify an MA plan on their own.
const MA_STRONG_INDICATORS: &[&str] = &[
    "MEDICARE ADVANTAGE",
    "MEDICARE ADVANTAGE PRESCRIPTION DRUG",
    "PART C",
    "MA-PD",
    "MAPD",
    "DUAL SPECIAL NEEDS",
    "DUAL COMPLETE",
    "D-SNP",
    "DSNP",
    "CHRONIC CONDITION SPECIAL NEEDS",
    "C-SNP",
    "CSNP",
    "INSTITUTIONAL SPECIAL NEEDS",
    "I-SNP",
    "ISNP",
];

/// Plan-type tokens that imply MA only when "MEDICARE" also appears.
const MA_PLAN_TYPE_TOKENS: &[&str] = &[
    "HMO",
    "PPO",
    "PFFS",
    "MSA",
    "COMPLETE",
    "CHOICE",
    "GOLD PLUS",
    "PRIME",
    "SELECT",
    "PLUS",
    "COMPLETE CARE",
    "SENIOR ADVANTAGE",
];

/// Regional MA brand names (Texas and Colorado markets).
const MA_BRANDS: &[&str] = &[
    "AETNA MEDICARE",
    "HUMANA",
    "HUMANA GOLD PLUS",
    "HUMANACHOICE",
    "AARP MEDICARE ADVANTAGE",
    "UNITEDHEALTHCARE MEDICARE",
    "UHC MEDICARE",
    "BLUE CROSS MEDICARE ADVANTAGE",
    "BCBSTX MEDICARE ADVANTAGE",
    "KELSEYCARE ADVANTAGE",
    "CIGNA TRUE CHOICE",
    "CIGNA PREFERRED",
    "WELLCARE MEDICARE",
    "ALLWELL",
    "SCOTT AND WHITE MEDICARE",
    "BAYLOR SCOTT & WHITE MEDICARE",
    "SUPERIOR HEALTHPLAN MEDICARE",
    "ANTHEM MEDIBLUE",
    "ANTHEM MEDICARE ADVANTAGE",
    "KAISER PERMANENTE SENIOR ADVANTAGE",
    "DENVER HEALTH ELEVATE MEDICARE",
    "ELEVATE MEDICARE ADVANTAGE",
    "ROCKY MOUNTAIN HEALTH PLANS MEDICARE",
    "RMHP MEDICARE",
];

/// Products that look Medicare-adjacent but are not MA.
///
/// Checked after every positive rule: a name matching both a positive brand
/// and a negative term is classified MA. Judgment call carried over from
/// the source system, pending product-owner confirmation.
const MA_NEGATIVE_INDICATORS: &[&str] = &[
    "MEDICARE SUPPLEMENT",
    "MEDIGAP",
    "PLAN G",
    "PLAN N",
    "PLAN F",
    "PDP",
    "PRESCRIPTION DRUG PLAN",
    "PART D ONLY",
    "RX ONLY",
    "BLUE ADVANTAGE HMO",
    "ORIGINAL MEDICARE",
    "FEE-FOR-SERVICE (ORIGINAL)",
    "MSP",
    "QMB",
    "SLMB",
    "QI",
    "MEDICAID ONLY",
];

/// Apply the ordered Medicare-Advantage rule set to an uppercased name.
fn is_medicare_advantage(name: &str) -> bool {
    // (a) Strong lexical indicators.
    if MA_STRONG_INDICATORS.iter().any(|ind| name.contains(ind)) {
        return true;
    }

    // (b) Contract-ID pattern: a standalone "X####-###" word.
    if has_contract_id_pattern(name) {
        return true;
    }

    // (c) "MEDICARE" co-occurring with a plan-type token.
    if name.contains("MEDICARE") && MA_PLAN_TYPE_TOKENS.iter().any(|tok| name.contains(tok)) {
        return true;
    }

    // (d) Known regional brands.
    if MA_BRANDS.iter().any(|brand| name.contains(brand)) {
        return true;
    }

    // (e) Negative indicators, checked last.
    if MA_NEGATIVE_INDICATORS.iter().any(|neg| name.contains(neg)) {
        return false;
    }

    // (f) Default.
    false
}

/// Detect an MA contract identifier: one letter, four digits, a hyphen,
/// three digits, bounded by non-alphanumerics on both sides.
fn has_contract_id_pattern(name: &str) -> bool {
    let b = name.as_bytes();
    let n = b.len();
    if n < 9 {
        return false;
    }

    for start in 0..=n - 9 {
        if start > 0 && b[start - 1].is_ascii_alphanumeric() {
            continue;
        }
        if !b[start].is_ascii_alphabetic() {
            continue;
        }
        if !b[start + 1..start + 5].iter().all(u8::is_ascii_digit) {
            continue;
        }
        if b[start + 5] != b'-' {
            continue;
        }
        if !b[start + 6..start + 9].iter().all(u8::is_ascii_digit) {
            continue;
        }
        if start + 9 < n && b[start + 9].is_ascii_alphanumeric() {
            continue;
        }
        return true;
    }
    false
}

// ── Tests ─────────────────────────────────────────────────────────────────────
