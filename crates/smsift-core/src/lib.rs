//! smsift Core Library
//!
//! Classifies free-form bank and merchant SMS text:
//! - Spam detection (keyword substrings and link/`!!!`/email patterns)
//! - Transaction detection (banking keywords and patterns)
//! - Amount and debit/credit extraction from ordered rule tables
//! - Best-effort merchant name extraction
//! - Rule table overrides loaded from TOML
//!
//! Every classification function is total: any input, including the empty
//! string, produces a well-formed result.

pub mod classifier;
pub mod config;
pub mod error;
pub mod merchant;
pub mod models;
pub mod rules;
pub mod samples;

pub use classifier::{
    classify, default_classifier, extract_amount, extract_merchant, is_spam, is_transactional,
    Classifier,
};
pub use config::{default_rules_path, load_rules, LoadedRules, RuleConfig, RuleSource};
pub use error::{Error, Result};
pub use models::{
    AmountMatch, Analysis, ClassificationResult, Direction, ExpenseDraft, SmsTransaction, Status,
    UNKNOWN_MERCHANT,
};
pub use rules::{NamedPattern, RuleSet, RuleTables};
pub use samples::{check_samples, SampleMessage, SampleMismatch, SAMPLE_MESSAGES};
