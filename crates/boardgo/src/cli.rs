//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};

/// BoardAndGo - text travellers when their flight lands, slips or stays on track
#[derive(Parser, Debug)]
#[command(name = "boardgo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Send the template text without language-model rewording
    #[arg(long, global = true)]
    pub no_polish: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a flight and text its status to a phone number
    Send {
        /// Flight code (IATA), e.g. RJA3813
        flight_code: String,

        /// Recipient phone number, e.g. +15551234567
        recipient: String,
    },

    /// Show the message that would be sent for a flight
    Status {
        /// Flight code (IATA), e.g. RJA3813
        flight_code: String,
    },

    /// Start the HTTP API
    Serve {
        /// Host to bind to (overrides BOARDGO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides BOARDGO_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Output format for send/status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Returns the tracing filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "boardgo=info,reqwest=warn",
            1 => "boardgo=debug,reqwest=info",
            2 => "boardgo=trace,reqwest=debug",
            _ => "trace",
        }
    }

    /// Filter directives: `RUST_LOG` when set, otherwise the `-v` level.
    pub fn filter_directives(&self, rust_log: Option<String>) -> String {
        rust_log
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.log_filter().to_string())
    }
}
