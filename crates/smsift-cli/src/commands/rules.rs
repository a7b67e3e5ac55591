//! Effective rule table summary

use std::io::Write;

use anyhow::Result;
use smsift_core::LoadedRules;

use crate::cli::OutputFormat;

pub fn cmd_rules<W: Write>(loaded: &LoadedRules, format: OutputFormat, out: &mut W) -> Result<()> {
    let summary = loaded.rules.summary();

    match format {
        OutputFormat::Json => {
            let tables: serde_json::Map<String, serde_json::Value> = summary
                .iter()
                .map(|(name, count)| (name.to_string(), serde_json::json!(count)))
                .collect();
            let doc = serde_json::json!({
                "source": loaded.source.to_string(),
                "tables": tables,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.write_record(["table", "entries"])?;
            for (name, count) in &summary {
                wtr.write_record([name.to_string(), count.to_string()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            writeln!(out)?;
            writeln!(out, "📋 Rules ({})", loaded.source)?;
            writeln!(out, "   ─────────────────────────────────")?;
            for (name, count) in &summary {
                writeln!(out, "   {:<22} {:>5}", name, count)?;
            }
        }
    }

    Ok(())
}
