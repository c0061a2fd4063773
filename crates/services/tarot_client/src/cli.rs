// File: services/tarot_client/src/cli.rs
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Book tarot readings from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tarot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a session token
    Login {
        /// JWT issued by the booking API
        token: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current user and role
    Whoami,
    /// List booking topics
    Topics,
    /// Show a reader and their price
    Reader { reader_id: String },
    /// List bookable slots
    Slots {
        reader_id: String,
        /// Session date, YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Session length in minutes
        minutes: Option<i64>,
    },
    /// Book a slot and open payment
    Book {
        reader_id: String,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        minutes: i64,
        /// Slot label as printed by `slots`, e.g. "09:00 AM - 10:00 AM"
        slot_label: String,
        /// Comma separated topic ids
        #[arg(short, long = "topics", value_delimiter = ',', required = true)]
        topic_ids: Vec<String>,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Retry payment for an unpaid booking
    Pay { booking_id: String },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date {:?}, expected YYYY-MM-DD", raw))
}
