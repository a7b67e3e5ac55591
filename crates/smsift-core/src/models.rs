//! Domain models for smsift

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merchant returned when no merchant rule yields an acceptable name
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Category assigned to every expense draft
pub const DEFAULT_CATEGORY: &str = "Other";

/// Top-level verdict for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Promotional or phishing text, excluded from further processing
    Spam,
    /// Describes a bank or payment-app account movement
    Transactional,
    /// Anything else (OTPs, reminders, personal messages)
    NonTransactional,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Transactional => "transactional",
            Self::NonTransactional => "non-transactional",
        }
    }

    /// All statuses in reporting order
    pub fn all() -> &'static [Status] {
        &[Self::Spam, Self::Transactional, Self::NonTransactional]
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spam" => Ok(Self::Spam),
            "transactional" => Ok(Self::Transactional),
            "non-transactional" | "non_transactional" | "nontransactional" => {
                Ok(Self::NonTransactional)
            }
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether money left the account or arrived in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money out
    Debit,
    /// Money in
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount pulled out of a message together with its direction.
///
/// `amount` has `,` grouping separators removed; the decimal part is kept
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMatch {
    pub direction: Direction,
    pub amount: String,
}

/// Output of [`crate::classify`]
///
/// `direction` and `amount` are both `None` unless `status` is
/// `Transactional`, and even then they are set or unset together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: Status,
    pub direction: Option<Direction>,
    pub amount: Option<String>,
}

impl ClassificationResult {
    pub fn spam() -> Self {
        Self {
            status: Status::Spam,
            direction: None,
            amount: None,
        }
    }

    pub fn non_transactional() -> Self {
        Self {
            status: Status::NonTransactional,
            direction: None,
            amount: None,
        }
    }

    /// A transactional verdict. `None` is the keyword-only partial match.
    pub fn transactional(amount: Option<AmountMatch>) -> Self {
        let (direction, amount) = match amount {
            Some(m) => (Some(m.direction), Some(m.amount)),
            None => (None, None),
        };
        Self {
            status: Status::Transactional,
            direction,
            amount,
        }
    }

    pub fn is_spam(&self) -> bool {
        self.status == Status::Spam
    }

    pub fn is_transactional(&self) -> bool {
        self.status == Status::Transactional
    }
}

/// Which rule decided each step of a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub result: ClassificationResult,
    pub merchant: String,
    /// Spam keyword or pattern that fired
    pub spam_trigger: Option<String>,
    /// Transaction keyword or pattern that fired (only checked for non-spam)
    pub transaction_trigger: Option<String>,
    /// Name of the amount rule that produced `result.amount`
    pub amount_rule: Option<String>,
    /// Name of the merchant rule that produced `merchant`
    pub merchant_rule: Option<String>,
}

/// A fully-extracted money movement, ready for an integrator to store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsTransaction {
    pub amount: f64,
    pub direction: Direction,
    pub merchant: String,
    pub received_at: DateTime<Utc>,
    pub sms_text: String,
}

impl SmsTransaction {
    /// Expense tracking only records money going out. Credits return `None`.
    pub fn to_expense(&self) -> Option<ExpenseDraft> {
        match self.direction {
            Direction::Debit => Some(ExpenseDraft {
                amount: self.amount,
                merchant: self.merchant.clone(),
                category: DEFAULT_CATEGORY.to_string(),
                timestamp: self.received_at,
                sms_text: self.sms_text.clone(),
            }),
            Direction::Credit => None,
        }
    }
}

/// An expense row as the integrating application would persist it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub merchant: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
    pub sms_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_names() {
        for status in Status::all() {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), *status);
        }
        assert_eq!(
            "NON_TRANSACTIONAL".parse::<Status>().unwrap(),
            Status::NonTransactional
        );
        assert!("ham".parse::<Status>().is_err());
    }

    #[test]
    fn test_transactional_partial_keeps_fields_together() {
        let partial = ClassificationResult::transactional(None);
        assert_eq!(partial.status, Status::Transactional);
        assert!(partial.direction.is_none());
        assert!(partial.amount.is_none());

        let full = ClassificationResult::transactional(Some(AmountMatch {
            direction: Direction::Credit,
            amount: "2500".to_string(),
        }));
        assert_eq!(full.direction, Some(Direction::Credit));
        assert_eq!(full.amount.as_deref(), Some("2500"));
    }

    #[test]
    fn test_result_serializes_with_lowercase_names() {
        let json = serde_json::to_value(ClassificationResult::non_transactional()).unwrap();
        assert_eq!(json["status"], "non-transactional");
        assert!(json["direction"].is_null());

        let json = serde_json::to_value(ClassificationResult::transactional(Some(AmountMatch {
            direction: Direction::Debit,
            amount: "5000".to_string(),
        })))
        .unwrap();
        assert_eq!(json["direction"], "debit");
        assert_eq!(json["amount"], "5000");
    }

    #[test]
    fn test_only_debits_become_expenses() {
        let debit = SmsTransaction {
            amount: 250.0,
            direction: Direction::Debit,
            merchant: "Amazon".to_string(),
            received_at: Utc::now(),
            sms_text: "debited".to_string(),
        };
        let expense = debit.to_expense().unwrap();
        assert_eq!(expense.category, DEFAULT_CATEGORY);
        assert_eq!(expense.merchant, "Amazon");
        assert_eq!(expense.timestamp, debit.received_at);

        let credit = SmsTransaction {
            direction: Direction::Credit,
            ..debit
        };
        assert!(credit.to_expense().is_none());
    }
}
