//! Message classification engine
//!
//! Classification is a fixed pipeline over one message:
//! lowercase → spam check → transaction check → amount/direction extraction.
//! Merchant extraction runs separately on the original-case text.
//!
//! Priority: spam always beats transactional, keyword tables are checked
//! before pattern tables, debit amount rules before credit amount rules.
//! Within each table the first hit wins.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::merchant;
use crate::models::{AmountMatch, Analysis, ClassificationResult, SmsTransaction};
use crate::rules::RuleSet;

/// Characters of message text included in log lines
const LOG_PREVIEW_CHARS: usize = 40;

// The built-in tables are constants; failing to compile them is a bug.
static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(|| {
    Classifier::new(RuleSet::builtin().expect("Invalid built-in rule tables"))
});

/// Shared classifier over the built-in rule tables
pub fn default_classifier() -> &'static Classifier {
    &DEFAULT_CLASSIFIER
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Stateless classifier over an immutable rule set.
///
/// Safe to share between threads; every method is a pure function of its
/// input and the rule set.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify a message as spam, transactional or non-transactional
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let lower = text.to_lowercase();

        if let Some(trigger) = self.spam_trigger(&lower) {
            debug!("Spam '{}' (trigger: {})", preview(text), trigger);
            return ClassificationResult::spam();
        }

        if let Some(trigger) = self.transaction_trigger(&lower) {
            debug!("Transactional '{}' (trigger: {})", preview(text), trigger);
            let amount = self.match_amount(&lower).map(|(m, _)| m);
            return ClassificationResult::transactional(amount);
        }

        ClassificationResult::non_transactional()
    }

    /// Best-effort merchant name, or "Unknown Merchant"
    pub fn extract_merchant(&self, text: &str) -> String {
        merchant::extract(&self.rules, text).0
    }

    pub fn is_spam(&self, text: &str) -> bool {
        self.spam_trigger(&text.to_lowercase()).is_some()
    }

    pub fn is_transactional(&self, text: &str) -> bool {
        self.transaction_trigger(&text.to_lowercase()).is_some()
    }

    /// Amount and direction, from the first amount rule that matches
    pub fn extract_amount(&self, text: &str) -> Option<AmountMatch> {
        self.match_amount(&text.to_lowercase()).map(|(m, _)| m)
    }

    /// Classify and extract the merchant, recording which rule decided each
    /// step
    pub fn analyze(&self, text: &str) -> Analysis {
        let lower = text.to_lowercase();
        let (merchant, merchant_rule) = merchant::extract(&self.rules, text);

        let spam_trigger = self.spam_trigger(&lower);
        let mut transaction_trigger = None;
        let mut amount_rule = None;

        let result = if spam_trigger.is_some() {
            ClassificationResult::spam()
        } else {
            transaction_trigger = self.transaction_trigger(&lower);
            if transaction_trigger.is_some() {
                let matched = self.match_amount(&lower);
                amount_rule = matched.as_ref().map(|(_, name)| name.to_string());
                ClassificationResult::transactional(matched.map(|(m, _)| m))
            } else {
                ClassificationResult::non_transactional()
            }
        };

        Analysis {
            result,
            merchant,
            spam_trigger,
            transaction_trigger,
            amount_rule,
            merchant_rule,
        }
    }

    /// A complete transaction, or `None` if the message is not transactional
    /// or carries no usable amount
    pub fn extract_transaction(
        &self,
        text: &str,
        received_at: DateTime<Utc>,
    ) -> Option<SmsTransaction> {
        let result = self.classify(text);
        if !result.is_transactional() {
            return None;
        }

        let direction = result.direction?;
        let amount_text = result.amount?;
        let amount = match amount_text.parse::<f64>() {
            Ok(a) if a.is_finite() => a,
            _ => {
                debug!("Unparseable amount '{}' in '{}'", amount_text, preview(text));
                return None;
            }
        };

        Some(SmsTransaction {
            amount,
            direction,
            merchant: self.extract_merchant(text),
            received_at,
            sms_text: text.to_string(),
        })
    }

    /// First spam keyword or pattern found in lowercased text
    fn spam_trigger(&self, lower: &str) -> Option<String> {
        if let Some(keyword) = self.rules.spam_keywords.iter().find(|k| lower.contains(k.as_str()))
        {
            return Some(keyword.clone());
        }
        self.rules
            .spam_patterns
            .iter()
            .find(|p| p.regex.is_match(lower))
            .map(|p| p.source.clone())
    }

    /// First transaction keyword or pattern found in lowercased text
    fn transaction_trigger(&self, lower: &str) -> Option<String> {
        if let Some(keyword) = self
            .rules
            .transaction_keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
        {
            return Some(keyword.clone());
        }
        self.rules
            .transaction_patterns
            .iter()
            .find(|p| p.regex.is_match(lower))
            .map(|p| p.source.clone())
    }

    fn match_amount(&self, lower: &str) -> Option<(AmountMatch, &str)> {
        for rule in &self.rules.amount_rules {
            // "[0-9,]+" can capture bare separators; those are not amounts
            let Some(amount) = rule
                .regex
                .captures(lower)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().replace(',', ""))
                .filter(|a| !a.is_empty())
            else {
                continue;
            };

            debug!("Amount rule '{}' matched: {} {}", rule.name, rule.direction, amount);
            return Some((
                AmountMatch {
                    direction: rule.direction,
                    amount,
                },
                rule.name.as_str(),
            ));
        }
        None
    }
}

impl Default for Classifier {
    fn default() -> Self {
        default_classifier().clone()
    }
}

/// Classify with the built-in rule tables
pub fn classify(text: &str) -> ClassificationResult {
    default_classifier().classify(text)
}

/// Extract a merchant with the built-in rule tables
pub fn extract_merchant(text: &str) -> String {
    default_classifier().extract_merchant(text)
}

pub fn is_spam(text: &str) -> bool {
    default_classifier().is_spam(text)
}

pub fn is_transactional(text: &str) -> bool {
    default_classifier().is_transactional(text)
}

pub fn extract_amount(text: &str) -> Option<AmountMatch> {
    default_classifier().extract_amount(text)
}
