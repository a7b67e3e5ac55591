//! Integration tests for smsift-core
//!
//! These tests exercise the public classify → extract workflow end to end.

use chrono::Utc;
use smsift_core::{
    classify, config::load_rules_from, extract_merchant, ClassificationResult, Classifier,
    Direction, RuleSource, Status, UNKNOWN_MERCHANT,
};

/// Inputs that should never trip up the classifier
fn awkward_inputs() -> Vec<String> {
    vec![
        String::new(),
        " ".to_string(),
        "\n\t\r".to_string(),
        "₹₹₹₹".to_string(),
        "रुपये 500 खाते से कटे".to_string(),
        "🙂🙂🙂 at 🙂 to 🙂".to_string(),
        "at".to_string(),
        "to ".to_string(),
        "Rs.".to_string(),
        "debited for rs ,,,,,,".to_string(),
        "a/c ".repeat(2_000),
        format!("paid to {} on", "x".repeat(10_000)),
        format!("{}debited", "imps ".repeat(2_000)),
        "!".repeat(5_000),
        "Ka\u{212A}e transaction".to_string(),
    ]
}

// =============================================================================
// Documented examples
// =============================================================================

#[test]
fn test_debit_with_grouping_separators() {
    let result =
        classify("Your A/c X1234 has been debited for Rs. 5,000 on 12 Jun. Avl Bal: Rs 25,000");
    assert_eq!(
        result,
        ClassificationResult {
            status: Status::Transactional,
            direction: Some(Direction::Debit),
            amount: Some("5000".to_string()),
        }
    );
}

#[test]
fn test_credit_is_not_reported_as_debit() {
    let result = classify("Your account is credited with INR 2,500 by IMPS from John Doe");
    assert_eq!(result.status, Status::Transactional);
    assert_eq!(result.direction, Some(Direction::Credit));
    assert_eq!(result.amount.as_deref(), Some("2500"));
}

#[test]
fn test_spam_example() {
    let result = classify("Congratulations! You have won a FREE gift card worth ₹1000. Click here!!!");
    assert_eq!(result, ClassificationResult::spam());
}

#[test]
fn test_otp_is_non_transactional() {
    let result = classify("Your OTP for login is 123456. Do not share with anyone.");
    assert_eq!(result, ClassificationResult::non_transactional());
}

#[test]
fn test_merchant_fallback() {
    assert_eq!(
        extract_merchant("Meeting scheduled for 3 PM today."),
        UNKNOWN_MERCHANT
    );
}

#[test]
fn test_merchant_big_bazaar() {
    assert_eq!(
        extract_merchant(
            "Transaction of Rs.500 at Big Bazaar using your HDFC Bank Debit Card ending 1234"
        ),
        "Big Bazaar"
    );
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_totality_and_result_invariants() {
    for input in awkward_inputs() {
        let result = classify(&input);
        if result.status != Status::Transactional {
            assert!(result.direction.is_none(), "{:?}", input);
            assert!(result.amount.is_none(), "{:?}", input);
        }
        assert_eq!(result.direction.is_some(), result.amount.is_some());
        if let Some(amount) = &result.amount {
            assert!(!amount.is_empty());
            assert!(!amount.contains(','));
        }

        let merchant = extract_merchant(&input);
        assert!(!merchant.is_empty());
        assert!(merchant.chars().count() <= 50);
    }
}

#[test]
fn test_spam_precedence() {
    let messages = [
        "URGENT: Rs 500 debited from your HDFC account",
        "Your A/c X1 credited with Rs 100. Claim now for bonus",
        "Paid to shop. Visit https://bank.example.com",
        "UPI txn of Rs 20 done!!!",
    ];
    for message in messages {
        assert!(smsift_core::is_transactional(message), "{}", message);
        assert_eq!(classify(message).status, Status::Spam, "{}", message);
    }
}

#[test]
fn test_idempotence() {
    let mut inputs = awkward_inputs();
    inputs.extend(smsift_core::SAMPLE_MESSAGES.iter().map(|s| s.text.to_string()));
    for input in inputs {
        assert_eq!(classify(&input), classify(&input));
        assert_eq!(extract_merchant(&input), extract_merchant(&input));
    }
}

#[test]
fn test_merchant_length_bound() {
    let long_name = "Supercalifragilistic Emporium Of Fine Goods And Sundries Worldwide";
    let merchant = extract_merchant(&format!("Paid Rs 10 to {} via UPI", long_name));
    assert_eq!(merchant.chars().count(), 50);
    assert!(long_name.starts_with(&merchant));
}

#[test]
fn test_sample_corpus_matches() {
    let mismatches =
        smsift_core::check_samples(smsift_core::default_classifier(), smsift_core::SAMPLE_MESSAGES);
    assert!(mismatches.is_empty(), "{:#?}", mismatches);
}

// =============================================================================
// Transaction and expense extraction
// =============================================================================

#[test]
fn test_debit_becomes_expense() {
    let now = Utc::now();
    let classifier = Classifier::default();
    let tx = classifier
        .extract_transaction(
            "Your A/c X1234 has been debited for Rs. 250.00 at Amazon on 13-Jun-24. Avl Bal: Rs 25,000.00",
            now,
        )
        .expect("debit should extract");
    let expense = tx.to_expense().expect("debits become expenses");
    assert_eq!(expense.amount, 250.0);
    assert_eq!(expense.merchant, "Amazon");
    assert_eq!(expense.category, "Other");
    assert_eq!(expense.timestamp, now);
}

#[test]
fn test_credit_is_not_an_expense() {
    let classifier = Classifier::default();
    let tx = classifier
        .extract_transaction(
            "Your account is credited with INR 2,500 by IMPS from John Doe",
            Utc::now(),
        )
        .expect("credit should extract");
    assert_eq!(tx.direction, Direction::Credit);
    assert_eq!(tx.amount, 2500.0);
    assert!(tx.to_expense().is_none());
}

// =============================================================================
// Rule overrides
// =============================================================================

#[test]
fn test_override_file_changes_classification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        r#"
spam_keywords = ["kyc pending"]

[[credit_patterns]]
name = "received"
pattern = 'received\s+rs\.?\s?([0-9,]+)'
"#,
    )
    .unwrap();

    let loaded = load_rules_from(Some(path.as_path()), None).unwrap();
    assert_eq!(loaded.source, RuleSource::File(path.clone()));
    let classifier = Classifier::new(loaded.rules);

    assert_eq!(
        classifier.classify("KYC PENDING for your account").status,
        Status::Spam
    );
    // Built-in spam keywords were replaced
    assert_eq!(
        classifier.classify("Congratulations on your account").status,
        Status::Transactional
    );

    let result = classifier.classify("Received Rs 1,200 in your account");
    assert_eq!(result.direction, Some(Direction::Credit));
    assert_eq!(result.amount.as_deref(), Some("1200"));
}

#[test]
fn test_bundled_example_rules_file() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/rules.toml");
    let loaded = load_rules_from(Some(path.as_path()), None).unwrap();
    let classifier = Classifier::new(loaded.rules);

    let topup = "Added Rs 500 to your wallet";
    assert_eq!(classify(topup).amount, None);

    let result = classifier.classify(topup);
    assert_eq!(result.status, Status::Transactional);
    assert_eq!(result.direction, Some(Direction::Credit));
    assert_eq!(result.amount.as_deref(), Some("500"));

    // Debit tables were not overridden
    assert_eq!(
        classifier.classify("Rs. 150.5 has been debited from a/c 1234"),
        classify("Rs. 150.5 has been debited from a/c 1234")
    );
}
