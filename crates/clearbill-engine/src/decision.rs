//! Publish/suppress decisions over a full set of service-line estimates.
//!
//! A memo is only useful to front-desk staff if it contains at least one
//! concrete, non-trivial number — purely generic placeholders are worse
//! than no memo.

use tracing::debug;

use clearbill_contracts::estimate::{EstimateToken, PostingDecision};

use crate::config::EngineConfig;

/// True when the carrier is financially out of scope by policy (Medicaid
/// and the regional managed-Medicaid entities).
pub fn is_excluded_carrier(config: &EngineConfig, carrier_name: &str) -> bool {
    let name = carrier_name.to_uppercase();
    config
        .medicaid_exclusion_aliases
        .iter()
        .any(|alias| name.contains(alias.as_str()))
}

/// Decide whether the four tokens justify publishing a memo.
///
/// Evaluation order:
/// 1. Excluded carrier → suppress, regardless of computed values.
/// 2. All tokens "Per Elig" → suppress (no information).
/// 3. Exactly a {Per Elig, $0} mixture → suppress (the $0 is not
///    trustworthy without a real zero-coinsurance signal).
/// 4. Any non-zero dollar or percentage → publish.
/// 5. No "Per Elig" at all → publish (even all-zero is a statement).
/// 6. Anything else → suppress.
pub fn should_post(
    config: &EngineConfig,
    carrier_name: &str,
    tokens: &[EstimateToken; 4],
) -> PostingDecision {
    if is_excluded_carrier(config, carrier_name) {
        return PostingDecision::suppress(format!(
            "carrier '{}' matches a Medicaid exclusion alias",
            carrier_name
        ));
    }

    let per_elig = tokens.iter().filter(|t| t.is_per_eligibility()).count();
    let zero_dollar = tokens.iter().filter(|t| t.is_zero_dollar()).count();
    let nonzero = tokens.iter().filter(|t| t.is_nonzero_value()).count();

    debug!(carrier = %carrier_name, per_elig, zero_dollar, nonzero, "posting decision buckets");

    if per_elig == tokens.len() {
        return PostingDecision::suppress("every service line deferred to eligibility");
    }

    if per_elig > 0 && zero_dollar > 0 && per_elig + zero_dollar == tokens.len() {
        return PostingDecision::suppress(
            "only per-eligibility and untrusted $0 lines; nothing concrete to publish",
        );
    }

    if nonzero > 0 {
        return PostingDecision::publish("at least one concrete non-zero estimate");
    }

    if per_elig == 0 {
        return PostingDecision::publish("no per-eligibility placeholders; values are definitive");
    }

    PostingDecision::suppress("no combination of tokens worth publishing")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
