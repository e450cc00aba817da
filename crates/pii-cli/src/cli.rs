use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pii-redact")]
#[command(about = "Redact personal information from free text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "PII_REDACT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP redaction server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Redact text once and print the result
    Redact(RedactArgs),

    /// Write a default config file
    Init {
        /// Where to write it (default: platform config dir)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct RedactArgs {
    /// Text to redact; reads stdin when neither TEXT nor --file is given
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Redaction level 1-3 (default from config)
    #[arg(long)]
    pub level: Option<i64>,

    /// Identifier placeholder, e.g. --placeholder aadhaar=[AADHAAR]
    #[arg(long = "placeholder", value_parser = parse_placeholder)]
    pub placeholders: Vec<(String, String)>,

    /// Print per-label counts to stderr
    #[arg(long)]
    pub stats: bool,
}

fn parse_placeholder(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected CATEGORY=PLACEHOLDER, got '{}'", raw)),
    }
}
