//! Single-message commands

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use smsift_core::Classifier;

use super::{or_dash, write_csv, ResultRow};
use crate::cli::OutputFormat;

pub fn cmd_classify<W: Write>(
    classifier: &Classifier,
    text: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let result = classifier.classify(text);
    let merchant = classifier.extract_merchant(text);
    let row = ResultRow::new(&result, &merchant, text);

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&row)?)?,
        OutputFormat::Csv => write_csv(out, &[row])?,
        OutputFormat::Text => {
            writeln!(out, "status:    {}", result.status)?;
            writeln!(
                out,
                "direction: {}",
                or_dash(result.direction.as_ref().map(|d| d.as_str()))
            )?;
            writeln!(out, "amount:    {}", or_dash(result.amount.as_deref()))?;
            writeln!(out, "merchant:  {}", merchant)?;
        }
    }

    Ok(())
}

pub fn cmd_merchant<W: Write>(
    classifier: &Classifier,
    text: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let merchant = classifier.extract_merchant(text);

    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({ "merchant": merchant, "message": text })
        )?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            wtr.write_record(["merchant", "message"])?;
            wtr.write_record([merchant.as_str(), text])?;
            wtr.flush()?;
        }
        OutputFormat::Text => writeln!(out, "{}", merchant)?,
    }

    Ok(())
}

pub fn cmd_explain<W: Write>(
    classifier: &Classifier,
    text: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let analysis = classifier.analyze(text);

    match format {
        OutputFormat::Json | OutputFormat::Csv => {
            // The trace is nested; CSV falls back to JSON
            writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?
        }
        OutputFormat::Text => {
            let result = &analysis.result;
            writeln!(out)?;
            writeln!(out, "🔍 {}", text)?;
            writeln!(out, "   ─────────────────────────────────────────────")?;
            writeln!(
                out,
                "   spam trigger:        {}",
                or_dash(analysis.spam_trigger.as_deref())
            )?;
            writeln!(
                out,
                "   transaction trigger: {}",
                or_dash(analysis.transaction_trigger.as_deref())
            )?;
            writeln!(
                out,
                "   amount rule:         {}",
                or_dash(analysis.amount_rule.as_deref())
            )?;
            writeln!(
                out,
                "   merchant rule:       {}",
                or_dash(analysis.merchant_rule.as_deref())
            )?;
            writeln!(out)?;
            writeln!(out, "   → status:    {}", result.status)?;
            writeln!(
                out,
                "   → direction: {}",
                or_dash(result.direction.as_ref().map(|d| d.as_str()))
            )?;
            writeln!(out, "   → amount:    {}", or_dash(result.amount.as_deref()))?;
            writeln!(out, "   → merchant:  {}", analysis.merchant)?;
        }
    }

    Ok(())
}

pub fn cmd_expense<W: Write>(
    classifier: &Classifier,
    text: &str,
    received_at: DateTime<Utc>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let transaction = classifier.extract_transaction(text, received_at);
    let expense = transaction.as_ref().and_then(|t| t.to_expense());

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&expense)?)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            match &expense {
                Some(expense) => wtr.serialize(expense)?,
                None => {
                    wtr.write_record(["amount", "merchant", "category", "timestamp", "sms_text"])?
                }
            }
            wtr.flush()?;
        }
        OutputFormat::Text => match (&transaction, &expense) {
            (Some(_), Some(expense)) => {
                writeln!(out, "amount:    {:.2}", expense.amount)?;
                writeln!(out, "merchant:  {}", expense.merchant)?;
                writeln!(out, "category:  {}", expense.category)?;
                writeln!(out, "timestamp: {}", expense.timestamp.to_rfc3339())?;
            }
            (Some(t), None) => writeln!(
                out,
                "No expense: {} of {:.2} is not spending",
                t.direction, t.amount
            )?,
            (None, _) => writeln!(out, "No expense: not a transaction with an amount")?,
        },
    }

    Ok(())
}
