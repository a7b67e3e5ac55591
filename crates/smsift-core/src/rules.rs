//! Rule tables for spam, transaction, amount and merchant detection
//!
//! The built-in tables are plain constants. Ordered tables are slices of
//! `(name, pattern)` pairs: earlier entries win. [`RuleTables`] is the owned,
//! editable form (what a rule file deserializes into) and [`RuleSet`] is the
//! compiled form the classifier runs against.
//!
//! All patterns are compiled case-insensitive. Amount patterns run against
//! lowercased text; merchant patterns run against the original text.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Direction;

/// Spam keywords, matched as plain substrings of the lowercased message.
///
/// Substring semantics are intentional: "bet" also fires inside "alphabet".
pub const SPAM_KEYWORDS: &[&str] = &[
    "100% free", "act now", "apply now", "free gift", "money back", "limited time", "winner",
    "exclusive deal", "click here", "you have been selected", "be your own boss", "free trial",
    "congratulations", "you won", "claim now", "urgent", "hurry", "expires today", "last chance",
    "no obligation", "risk free", "satisfaction guaranteed", "special promotion", "limited offer",
    "call now", "order now", "buy now", "subscribe", "unsubscribe", "opt out", "stop sms",
    "lottery", "jackpot", "casino", "gambling", "bet", "loan approved", "credit approved",
    "instant cash", "easy money", "work from home", "make money fast", "get rich quick",
    "miracle", "breakthrough", "amazing", "incredible", "fantastic", "unbelievable",
    "free consultation", "free quote", "free estimate", "no cost", "no fee", "no charge",
    "double your income", "financial freedom", "debt relief", "consolidate debt",
    "viagra", "cialis", "pharmacy", "prescription", "medicine", "pills", "drugs",
    "weight loss", "lose weight", "diet pills", "fat burner", "slim down",
    "mlm", "multi level marketing", "pyramid scheme", "network marketing",
    "investment opportunity", "stock alert", "penny stock", "trading", "forex",
];

/// Spam patterns: links, runs of three or more `!`, and email addresses
pub const SPAM_PATTERNS: &[&str] = &[
    r"http[s]?://",
    r"!!!+",
    r"[\w.-]+@[\w-]+(?:\.[\w-]+)+",
];

/// Transaction keywords: banking terms, payment apps and bank names
pub const TRANSACTION_KEYWORDS: &[&str] = &[
    "debited", "credited", "transaction", "paid", "payment", "transferred", "upi", "imps", "neft",
    "netbanking", "wallet", "purchase", "merchant", "ref no", "a/c", "acc", "account",
    "balance", "avl bal", "available balance", "txn", "transaction id", "reference number",
    "atm", "pos", "online", "mobile banking", "internet banking", "card", "debit card",
    "credit card", "bank", "branch", "ifsc", "micr", "cheque", "dd", "demand draft",
    "rtgs", "swift", "wire transfer", "remittance", "money transfer", "fund transfer",
    "paytm", "phonepe", "gpay", "google pay", "bhim", "amazon pay", "mobikwik",
    "freecharge", "paypal", "razorpay", "cashfree", "instamojo", "payu", "ccavenue",
    "sbi", "hdfc", "icici", "axis", "kotak", "yes bank", "pnb", "bob", "canara",
    "union bank", "indian bank", "central bank", "syndicate", "allahabad", "vijaya",
    "corporation bank", "oriental bank", "andhra bank", "dena bank", "idbi",
];

pub const TRANSACTION_PATTERNS: &[&str] = &[
    r"debited.*(?:account|a/c|acc)",
    r"credited.*(?:account|a/c|acc)",
    r"payment.*(?:successful|done|received)",
    r"(?:rs\.?|₹|inr)\s?[0-9]",
    r"ref(?:erence)?\s?no\.?\s?[0-9]+",
];

/// Debit amount rules in priority order. Group 1 is the amount.
pub const DEBIT_PATTERNS: &[(&str, &str)] = &[
    (
        "account_debited_for",
        r"a/?c\s?[x*]*[0-9]+\s+debited\s+for\s+(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "masked_account_debited",
        r"your\s+(?:a/?c(?:count)?(?:\snumber)?\s[x*][0-9]+).?debited\s+(?:by|for)\s+(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "transaction_of_debited",
        r"transaction\s+(?:of\s?)?(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?).*?debited",
    ),
    (
        "debit_of",
        r"debit(?:ed)?\s+(?:of|for)\s+(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "atm_withdrawal",
        r"atm\s+wdl.*?(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "transfer_debited",
        r"(?:neft|imps|upi|transfer|txn).*?debited\s+(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "account_is_debited",
        r"your\s(?:a/?c|account)\s(?:is\s)?debited\s+(?:rs\.?|inr|₹)?\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "amount_been_debited",
        r"(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)\s?(?:has\s)?been\s?debited",
    ),
    (
        "amount_is",
        r"amount\s?(?:is|:)\s?(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
];

/// Credit amount rules, tried only when no debit rule matched
pub const CREDIT_PATTERNS: &[(&str, &str)] = &[
    (
        "credited_with",
        r"(?:credited|credit(?:ed)?)\s?(?:with|by|:)?\s?(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
    (
        "account_is_credited",
        r"your\s(?:a/?c|account)\s(?:is\s)?credited(?:\swith)?\s?(?:rs\.?|inr|₹)\s?([0-9,]+(?:\.[0-9]{1,2})?)",
    ),
];

/// Merchant rules in priority order. Group 1 is the candidate name.
pub const MERCHANT_PATTERNS: &[(&str, &str)] = &[
    (
        "at_or_to",
        r"(?:at|to)\s+([A-Za-z0-9\s&.-]+?)(?:\s+on|\s+via|\s+using|\s+ref|\s+txn|\.|\s*$)",
    ),
    (
        "for",
        r"for\s+([A-Za-z0-9\s&.-]+?)(?:\s+on|\s+via|\s+using|\s+ref|\s+txn|\.|\s*$)",
    ),
    ("before_transaction", r"([A-Za-z0-9\s&.-]+?)\s+transaction"),
    (
        "paid_to",
        r"paid\s+to\s+([A-Za-z0-9\s&.-]+?)(?:\s+on|\s+via|\s+using|\s+ref|\s+txn|\.|\s*$)",
    ),
    (
        "transfer_to",
        r"transfer\s+to\s+([A-Za-z0-9\s&.-]+?)(?:\s+on|\s+via|\s+using|\s+ref|\s+txn|\.|\s*$)",
    ),
];

/// Candidates equal to one of these (lowercased) are not merchant names
pub const NON_MERCHANT_WORDS: &[&str] = &[
    "account", "a/c", "acc", "bank", "branch", "atm", "pos", "online",
    "mobile", "internet", "card", "debit", "credit", "transaction", "txn",
    "payment", "transfer", "upi", "imps", "neft", "rtgs", "ref", "reference",
    "number", "no", "id", "balance", "avl", "available", "limit", "date",
    "time", "amount", "rs", "inr", "rupees", "paisa", "your", "you", "has",
    "been", "is", "was", "will", "be", "for", "from", "to", "at", "on",
    "via", "using", "with", "by", "in", "of", "the", "and", "or", "but",
];

/// A named pattern in an ordered rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

impl NamedPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

fn named(pairs: &[(&str, &str)]) -> Vec<NamedPattern> {
    pairs
        .iter()
        .map(|(name, pattern)| NamedPattern::new(*name, *pattern))
        .collect()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Uncompiled rule tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTables {
    pub spam_keywords: Vec<String>,
    pub spam_patterns: Vec<String>,
    pub transaction_keywords: Vec<String>,
    pub transaction_patterns: Vec<String>,
    pub debit_patterns: Vec<NamedPattern>,
    pub credit_patterns: Vec<NamedPattern>,
    pub merchant_patterns: Vec<NamedPattern>,
    pub non_merchant_words: Vec<String>,
}

impl RuleTables {
    pub fn builtin() -> Self {
        Self {
            spam_keywords: owned(SPAM_KEYWORDS),
            spam_patterns: owned(SPAM_PATTERNS),
            transaction_keywords: owned(TRANSACTION_KEYWORDS),
            transaction_patterns: owned(TRANSACTION_PATTERNS),
            debit_patterns: named(DEBIT_PATTERNS),
            credit_patterns: named(CREDIT_PATTERNS),
            merchant_patterns: named(MERCHANT_PATTERNS),
            non_merchant_words: owned(NON_MERCHANT_WORDS),
        }
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A compiled pattern that was a plain (unnamed) table entry
#[derive(Debug, Clone)]
pub(crate) struct PatternRule {
    pub source: String,
    pub regex: Regex,
}

/// A compiled amount rule. Debit rules precede credit rules.
#[derive(Debug, Clone)]
pub(crate) struct AmountRule {
    pub name: String,
    pub direction: Direction,
    pub regex: Regex,
}

/// A compiled merchant rule
#[derive(Debug, Clone)]
pub(crate) struct MerchantRule {
    pub name: String,
    pub regex: Regex,
}

/// Compiled, immutable rule set
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) spam_keywords: Vec<String>,
    pub(crate) spam_patterns: Vec<PatternRule>,
    pub(crate) transaction_keywords: Vec<String>,
    pub(crate) transaction_patterns: Vec<PatternRule>,
    pub(crate) amount_rules: Vec<AmountRule>,
    pub(crate) merchant_rules: Vec<MerchantRule>,
    pub(crate) non_merchant_words: HashSet<String>,
}

impl RuleSet {
    /// Compile the built-in tables
    pub fn builtin() -> Result<Self> {
        Self::compile(&RuleTables::builtin())
    }

    /// Compile a set of tables, validating every entry
    pub fn compile(tables: &RuleTables) -> Result<Self> {
        let mut amount_rules =
            Vec::with_capacity(tables.debit_patterns.len() + tables.credit_patterns.len());
        for p in &tables.debit_patterns {
            amount_rules.push(AmountRule {
                name: p.name.clone(),
                direction: Direction::Debit,
                regex: compile_capturing(&p.name, &p.pattern)?,
            });
        }
        for p in &tables.credit_patterns {
            amount_rules.push(AmountRule {
                name: p.name.clone(),
                direction: Direction::Credit,
                regex: compile_capturing(&p.name, &p.pattern)?,
            });
        }

        let merchant_rules = tables
            .merchant_patterns
            .iter()
            .map(|p| {
                Ok(MerchantRule {
                    name: p.name.clone(),
                    regex: compile_capturing(&p.name, &p.pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            spam_keywords: keywords("spam_keywords", &tables.spam_keywords)?,
            spam_patterns: patterns(&tables.spam_patterns)?,
            transaction_keywords: keywords("transaction_keywords", &tables.transaction_keywords)?,
            transaction_patterns: patterns(&tables.transaction_patterns)?,
            amount_rules,
            merchant_rules,
            non_merchant_words: keywords("non_merchant_words", &tables.non_merchant_words)?
                .into_iter()
                .collect(),
        })
    }

    /// Table sizes, for display
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        let debit = self
            .amount_rules
            .iter()
            .filter(|r| r.direction == Direction::Debit)
            .count();
        vec![
            ("spam_keywords", self.spam_keywords.len()),
            ("spam_patterns", self.spam_patterns.len()),
            ("transaction_keywords", self.transaction_keywords.len()),
            ("transaction_patterns", self.transaction_patterns.len()),
            ("debit_patterns", debit),
            ("credit_patterns", self.amount_rules.len() - debit),
            ("merchant_patterns", self.merchant_rules.len()),
            ("non_merchant_words", self.non_merchant_words.len()),
        ]
    }
}

fn build(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

fn patterns(sources: &[String]) -> Result<Vec<PatternRule>> {
    sources
        .iter()
        .map(|source| {
            if source.is_empty() {
                return Err(Error::InvalidRule("empty pattern".into()));
            }
            Ok(PatternRule {
                source: source.clone(),
                regex: build(source)?,
            })
        })
        .collect()
}

/// Amount and merchant rules must capture the value in group 1
fn compile_capturing(name: &str, pattern: &str) -> Result<Regex> {
    if name.trim().is_empty() {
        return Err(Error::InvalidRule(format!(
            "pattern '{}' has no name",
            pattern
        )));
    }
    let regex = build(pattern)?;
    if regex.captures_len() < 2 {
        return Err(Error::InvalidRule(format!(
            "pattern '{}' has no capture group",
            name
        )));
    }
    Ok(regex)
}

fn keywords(table: &str, items: &[String]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|k| {
            if k.is_empty() {
                Err(Error::InvalidRule(format!("empty entry in {}", table)))
            } else {
                Ok(k.to_lowercase())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(rules.amount_rules.len(), 11);
        assert_eq!(rules.merchant_rules.len(), 5);
        assert!(rules.non_merchant_words.contains("a/c"));
    }

    #[test]
    fn test_debit_rules_precede_credit_rules() {
        let rules = RuleSet::builtin().unwrap();
        let directions: Vec<_> = rules.amount_rules.iter().map(|r| r.direction).collect();
        let first_credit = directions
            .iter()
            .position(|d| *d == Direction::Credit)
            .unwrap();
        assert_eq!(first_credit, DEBIT_PATTERNS.len());
        assert!(directions[first_credit..]
            .iter()
            .all(|d| *d == Direction::Credit));
        assert_eq!(rules.amount_rules[0].name, "account_debited_for");
    }

    #[test]
    fn test_summary_counts() {
        let rules = RuleSet::builtin().unwrap();
        let summary = rules.summary();
        assert!(summary.contains(&("debit_patterns", 9)));
        assert!(summary.contains(&("credit_patterns", 2)));
        assert!(summary.contains(&("spam_patterns", 3)));
    }

    #[test]
    fn test_rejects_amount_rule_without_group() {
        let mut tables = RuleTables::builtin();
        tables.debit_patterns = vec![NamedPattern::new("no_group", r"debited rs\.?\s?[0-9]+")];
        let err = RuleSet::compile(&tables).unwrap_err();
        assert!(matches!(err, Error::InvalidRule(_)));
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let mut tables = RuleTables::builtin();
        tables.spam_patterns = vec!["(unclosed".to_string()];
        assert!(matches!(
            RuleSet::compile(&tables).unwrap_err(),
            Error::Regex(_)
        ));
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let mut tables = RuleTables::builtin();
        tables.spam_keywords.push(String::new());
        assert!(matches!(
            RuleSet::compile(&tables).unwrap_err(),
            Error::InvalidRule(_)
        ));
    }

    #[test]
    fn test_keywords_lowercased() {
        let mut tables = RuleTables::builtin();
        tables.transaction_keywords = vec!["HDFC".to_string()];
        let rules = RuleSet::compile(&tables).unwrap();
        assert_eq!(rules.transaction_keywords, vec!["hdfc".to_string()]);
    }
}
