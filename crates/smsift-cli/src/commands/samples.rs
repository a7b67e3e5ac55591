//! Built-in sample corpus check

use std::io::Write;

use anyhow::Result;
use smsift_core::{check_samples, Classifier, SAMPLE_MESSAGES};

use super::truncate;
use crate::cli::OutputFormat;

/// Run the labelled samples and report every field that differs.
/// Returns the number of mismatches.
pub fn cmd_samples<W: Write>(
    classifier: &Classifier,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize> {
    let mismatches = check_samples(classifier, SAMPLE_MESSAGES);

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&mismatches)?)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.write_record(["text", "field", "expected", "actual"])?;
            for m in &mismatches {
                wtr.write_record([m.text, m.field, m.expected.as_str(), m.actual.as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            writeln!(out)?;
            if mismatches.is_empty() {
                writeln!(
                    out,
                    "✅ All {} sample messages classified as labelled",
                    SAMPLE_MESSAGES.len()
                )?;
            } else {
                writeln!(out, "❌ {} mismatch(es)", mismatches.len())?;
                writeln!(out)?;
                for m in &mismatches {
                    writeln!(out, "   {}", truncate(m.text, 60))?;
                    writeln!(
                        out,
                        "      {:<10} expected {:<20} got {}",
                        m.field, m.expected, m.actual
                    )?;
                }
            }
        }
    }

    Ok(mismatches.len())
}
