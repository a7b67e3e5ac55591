//! Batch classification, one message per line

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use smsift_core::{ClassificationResult, Classifier, Status};
use tracing::{debug, warn};

use super::{or_dash, truncate, ResultRow};
use crate::cli::OutputFormat;

/// Per-status counts of a scan
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub counts: HashMap<Status, usize>,
}

impl ScanSummary {
    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Where scan rows go
enum Sink<'a, W: Write> {
    Text(&'a mut W),
    Json(&'a mut W),
    Csv(csv::Writer<&'a mut W>),
}

impl<'a, W: Write> Sink<'a, W> {
    fn new(format: OutputFormat, out: &'a mut W) -> Self {
        match format {
            OutputFormat::Text => Self::Text(out),
            OutputFormat::Json => Self::Json(out),
            OutputFormat::Csv => Self::Csv(csv::Writer::from_writer(out)),
        }
    }

    fn header(&mut self) -> Result<()> {
        if let Self::Text(out) = self {
            writeln!(out)?;
            writeln!(out, "📨 Scan Results")?;
            writeln!(
                out,
                "   ─────────────────────────────────────────────────────────────"
            )?;
        }
        Ok(())
    }

    fn row(&mut self, result: &ClassificationResult, merchant: &str, text: &str) -> Result<()> {
        match self {
            Self::Csv(wtr) => wtr.serialize(ResultRow::new(result, merchant, text))?,
            Self::Json(out) => writeln!(
                out,
                "{}",
                serde_json::to_string(&ResultRow::new(result, merchant, text))?
            )?,
            Self::Text(out) => writeln!(
                out,
                "   {:<17} │ {:<6} │ {:>10} │ {:<20} │ {}",
                result.status.as_str(),
                or_dash(result.direction.as_ref().map(|d| d.as_str())),
                or_dash(result.amount.as_deref()),
                truncate(merchant, 20),
                truncate(text, 40)
            )?,
        }
        Ok(())
    }

    fn finish(self, summary: &ScanSummary) -> Result<()> {
        match self {
            Self::Csv(mut wtr) => wtr.flush()?,
            Self::Json(_) => {}
            Self::Text(out) => {
                writeln!(out)?;
                for status in Status::all() {
                    writeln!(out, "   {:<17} {}", status.as_str(), summary.count(*status))?;
                }
                writeln!(out, "   {:<17} {}", "total", summary.total())?;
            }
        }
        Ok(())
    }
}

pub fn cmd_scan<R: BufRead, W: Write>(
    classifier: &Classifier,
    input: R,
    format: OutputFormat,
    out: &mut W,
) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();
    let mut sink = Sink::new(format, out);
    sink.header()?;

    for (line_no, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let line = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = line {
            warn!("Line {} is not valid UTF-8, invalid bytes replaced", line_no + 1);
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let result = classifier.classify(text);
        let merchant = classifier.extract_merchant(text);
        *summary.counts.entry(result.status).or_insert(0) += 1;
        debug!("Line {}: {}", line_no + 1, result.status);

        sink.row(&result, &merchant, text)?;
    }

    sink.finish(&summary)?;
    Ok(summary)
}
