//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

/// smsift - Sort bank SMS into spam, transactions and noise
#[derive(Parser)]
#[command(name = "smsift")]
#[command(about = "Classify bank and merchant SMS messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Rule override file (TOML)
    ///
    /// Without this flag, ~/.local/share/smsift/rules.toml is used if it
    /// exists, otherwise the built-in rule tables.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one message and extract its amount and merchant
    Classify {
        /// Message text
        text: String,
    },

    /// Extract only the merchant name from a message
    Merchant {
        /// Message text
        text: String,
    },

    /// Show which rules decided each step for a message
    Explain {
        /// Message text
        text: String,
    },

    /// Turn a debit message into an expense draft
    Expense {
        /// Message text
        text: String,

        /// When the message was received, RFC 3339 (defaults to now)
        #[arg(long)]
        received_at: Option<DateTime<Utc>>,
    },

    /// Classify many messages, one per line
    Scan {
        /// File to read (defaults to stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Run the built-in labelled sample messages and report mismatches
    Samples,

    /// Show the effective rule tables and where they came from
    Rules,
}
