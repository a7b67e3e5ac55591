//! Merchant name extraction
//!
//! Merchant rules run in order against the original-case text. The first
//! candidate that survives cleanup and filtering wins; otherwise the result
//! is [`UNKNOWN_MERCHANT`].

use tracing::debug;

use crate::models::UNKNOWN_MERCHANT;
use crate::rules::RuleSet;

/// Longest merchant name returned, in characters
pub const MAX_MERCHANT_LEN: usize = 50;

/// Shortest accepted candidate, in characters
const MIN_MERCHANT_LEN: usize = 3;

/// Replace anything but word characters, whitespace, `&`, `.` and `-` with a
/// space, then collapse whitespace runs and trim.
pub fn clean_candidate(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '&' | '.' | '-')
            {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a cleaned candidate can be reported as a merchant.
///
/// Rejects short fragments, filler words from the non-merchant table, and
/// candidates whose first word has no letters. Times, dates and amounts
/// such as "3 PM today" lead with a bare number; "7-Eleven" or "1mg" do not.
pub(crate) fn is_acceptable(rules: &RuleSet, candidate: &str) -> bool {
    if candidate.chars().count() < MIN_MERCHANT_LEN {
        return false;
    }
    let leads_with_number = candidate
        .split_whitespace()
        .next()
        .is_some_and(|word| !word.chars().any(char::is_alphabetic));
    if leads_with_number {
        return false;
    }
    !rules
        .non_merchant_words
        .contains(&candidate.to_lowercase())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Extract the merchant and the name of the rule that produced it
pub(crate) fn extract(rules: &RuleSet, text: &str) -> (String, Option<String>) {
    for rule in &rules.merchant_rules {
        let Some(raw) = rule
            .regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };

        let candidate = clean_candidate(raw);
        if is_acceptable(rules, &candidate) {
            debug!("Merchant rule '{}' matched: {}", rule.name, candidate);
            return (
                truncate_chars(&candidate, MAX_MERCHANT_LEN),
                Some(rule.name.clone()),
            );
        }
        debug!("Merchant rule '{}' candidate rejected: {:?}", rule.name, candidate);
    }

    (UNKNOWN_MERCHANT.to_string(), None)
}
