//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `message` - Single-message commands (classify, merchant, explain, expense)
//! - `scan` - Batch classification of one message per line
//! - `samples` - Built-in sample corpus check
//! - `rules` - Effective rule table summary
//!
//! Every command writes to the writer it is given so tests can capture output.

pub mod message;
pub mod rules;
pub mod samples;
pub mod scan;

// Re-export command functions for main.rs
pub use message::*;
pub use rules::*;
pub use samples::*;
pub use scan::*;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use smsift_core::{ClassificationResult, Direction, Status};

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One classified message, as written in JSON and CSV output
#[derive(Debug, Serialize)]
pub struct ResultRow<'a> {
    pub status: Status,
    pub direction: Option<Direction>,
    pub amount: Option<&'a str>,
    pub merchant: &'a str,
    pub message: &'a str,
}

impl<'a> ResultRow<'a> {
    pub fn new(result: &'a ClassificationResult, merchant: &'a str, message: &'a str) -> Self {
        Self {
            status: result.status,
            direction: result.direction,
            amount: result.amount.as_deref(),
            merchant,
            message,
        }
    }
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(out: &mut W, rows: &[ResultRow<'_>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
