//! smsift CLI - Bank SMS classifier
//!
//! Usage:
//!   smsift classify "TEXT"     Classify one message
//!   smsift merchant "TEXT"     Extract the merchant
//!   smsift explain "TEXT"      Show which rules fired
//!   smsift expense "TEXT"      Build an expense draft from a debit
//!   smsift scan --file FILE    Classify one message per line
//!   smsift samples             Check the built-in sample corpus
//!   smsift rules               Show the effective rule tables

mod cli;
mod commands;


use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use smsift_core::{load_rules, Classifier};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // stdout carries results, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(io::stderr))
        .init();

    let loaded = load_rules(cli.rules.as_deref()).context("Failed to load rule tables")?;
    let classifier = Classifier::new(loaded.rules.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Classify { text } => {
            commands::cmd_classify(&classifier, &text, cli.format, &mut out)
        }
        Commands::Merchant { text } => {
            commands::cmd_merchant(&classifier, &text, cli.format, &mut out)
        }
        Commands::Explain { text } => {
            commands::cmd_explain(&classifier, &text, cli.format, &mut out)
        }
        Commands::Expense { text, received_at } => {
            let received_at = received_at.unwrap_or_else(Utc::now);
            commands::cmd_expense(&classifier, &text, received_at, cli.format, &mut out)
        }
        Commands::Scan { file } => {
            let summary = match file {
                Some(path) => {
                    let f = File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    commands::cmd_scan(&classifier, BufReader::new(f), cli.format, &mut out)?
                }
                None => commands::cmd_scan(&classifier, io::stdin().lock(), cli.format, &mut out)?,
            };
            tracing::info!("Scanned {} messages", summary.total());
            Ok(())
        }
        Commands::Samples => {
            let mismatches = commands::cmd_samples(&classifier, cli.format, &mut out)?;
            if mismatches > 0 {
                anyhow::bail!("{} sample field(s) did not match", mismatches);
            }
            Ok(())
        }
        Commands::Rules => commands::cmd_rules(&loaded, cli.format, &mut out),
    }
}
