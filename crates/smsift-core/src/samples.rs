//! Labelled sample messages
//!
//! Representative spam, bank and everyday messages with the outcome the
//! built-in rules are expected to produce. Used by tests and by
//! `smsift samples` to catch rule regressions.

use serde::Serialize;

use crate::classifier::Classifier;
use crate::models::{Direction, Status, UNKNOWN_MERCHANT};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SampleMessage {
    pub text: &'static str,
    pub status: Status,
    pub direction: Option<Direction>,
    pub amount: Option<&'static str>,
    pub merchant: &'static str,
}

const fn sample(
    text: &'static str,
    status: Status,
    direction: Option<Direction>,
    amount: Option<&'static str>,
    merchant: &'static str,
) -> SampleMessage {
    SampleMessage {
        text,
        status,
        direction,
        amount,
        merchant,
    }
}

pub const SAMPLE_MESSAGES: &[SampleMessage] = &[
    // Spam
    sample(
        "Congratulations! You have won a FREE gift card worth ₹1000. Click here!!!",
        Status::Spam,
        None,
        None,
        UNKNOWN_MERCHANT,
    ),
    sample(
        "100% free loan approved! Call now for instant cash. Limited time offer!",
        Status::Spam,
        None,
        None,
        "instant cash",
    ),
    // Transactional
    sample(
        "Your A/c X1234 has been debited for Rs. 5,000 on 12 Jun. Avl Bal: Rs 25,000",
        Status::Transactional,
        Some(Direction::Debit),
        Some("5000"),
        UNKNOWN_MERCHANT,
    ),
    sample(
        "Your A/c X1234 has been debited for Rs. 250.00 at Amazon on 13-Jun-24. Avl Bal: Rs 25,000.00",
        Status::Transactional,
        Some(Direction::Debit),
        Some("250.00"),
        "Amazon",
    ),
    sample(
        "Your account is credited with INR 2,500 by IMPS from John Doe",
        Status::Transactional,
        Some(Direction::Credit),
        Some("2500"),
        UNKNOWN_MERCHANT,
    ),
    sample(
        "ATM WDL Rs.500 from ICICI ATM at CP on 13-Jun. Avl Bal: Rs.2000",
        Status::Transactional,
        Some(Direction::Debit),
        Some("500"),
        UNKNOWN_MERCHANT,
    ),
    // Transactional, but no amount rule fits
    sample(
        "Paid ₹250 to Amazon via GPay. Transaction ID: ABC123. Balance: ₹1000",
        Status::Transactional,
        None,
        None,
        "Amazon",
    ),
    sample(
        "Transaction of Rs.150.50 at McDonald's using HDFC Debit Card",
        Status::Transactional,
        None,
        None,
        UNKNOWN_MERCHANT,
    ),
    sample(
        "UPI payment of ₹75 to Ola successful. Ref: OLA123456789",
        Status::Transactional,
        None,
        None,
        "Ola successful",
    ),
    sample(
        "Your account is debited by INR 75.50 for Uber ride. Ref No: UBR123456",
        Status::Transactional,
        None,
        None,
        "Uber ride",
    ),
    // Everything else
    sample(
        "Hello, this is a friendly reminder about your appointment tomorrow.",
        Status::NonTransactional,
        None,
        None,
        UNKNOWN_MERCHANT,
    ),
    sample(
        "Your OTP for login is 123456. Do not share with anyone.",
        Status::NonTransactional,
        None,
        None,
        // Merchant extraction does not look at the classification
        "login is 123456",
    ),
    sample(
        "Meeting scheduled for 3 PM today. Please confirm attendance.",
        Status::NonTransactional,
        None,
        None,
        UNKNOWN_MERCHANT,
    ),
];

/// A field where a sample's actual outcome differs from its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleMismatch {
    pub text: &'static str,
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
}

/// Run every sample through a classifier and collect the differences
pub fn check_samples(classifier: &Classifier, samples: &[SampleMessage]) -> Vec<SampleMismatch> {
    let mut mismatches = Vec::new();

    for sample in samples {
        let result = classifier.classify(sample.text);
        let merchant = classifier.extract_merchant(sample.text);

        let mut push = |field, expected: String, actual: String| {
            if expected != actual {
                mismatches.push(SampleMismatch {
                    text: sample.text,
                    field,
                    expected,
                    actual,
                });
            }
        };

        push(
            "status",
            sample.status.to_string(),
            result.status.to_string(),
        );
        push("direction", show(sample.direction), show(result.direction));
        push("amount", show(sample.amount), show(result.amount.as_deref()));
        push("merchant", sample.merchant.to_string(), merchant);
    }

    mismatches
}
