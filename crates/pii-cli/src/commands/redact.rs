use anyhow::{Context, Result};
use pii_config::Config;
use pii_core::{PlaceholderOverrides, RedactionLevel};
use pii_engine::Redactor;
use std::io::Read;
use tracing::debug;

use crate::cli::RedactArgs;

pub async fn handle(config: &Config, args: RedactArgs) -> Result<()> {
    let text = read_input(&args)?;

    let level = match args.level {
        Some(level) => RedactionLevel::try_from(level)?,
        None => config.redaction.level()?,
    };
    let overrides = PlaceholderOverrides::from_constants(args.placeholders);

    let source = pii_sources::build_source(&config.recognizer)?;
    let redactor = Redactor::new(source).with_policy(config.redaction.overlap_policy);

    debug!(
        source = redactor.source_name(),
        level = level.as_u8(),
        bytes = text.len(),
        "Redacting input"
    );
    let outcome = redactor.redact(&text, level, &overrides).await?;

    print!("{}", outcome.redacted_text);
    if !outcome.redacted_text.ends_with('\n') {
        println!();
    }

    if args.stats {
        let total: usize = outcome.redactions.iter().map(|r| r.count).sum();
        eprintln!("Redactions (level {}): {}", level.as_u8(), total);
        for summary in &outcome.redactions {
            eprintln!("  {:<16} {}", summary.label, summary.count);
        }
    }

    Ok(())
}

fn read_input(args: &RedactArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
