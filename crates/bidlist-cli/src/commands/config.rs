//! Config command handlers

use anyhow::{bail, Context, Result};

use bidlist_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "csv_path": config.csv_path,
                    "delimiter": config.delimiter,
                    "columns": config.columns
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(ref path) = config.csv_path {
                println!("{}", path.display());
            }
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  csv_path:  {}",
                config
                    .csv_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  delimiter: '{}'", config.delimiter);
            println!(
                "  columns:   title={} id={} amount={} fund={} strip='{}'",
                config.columns.title,
                config.columns.id,
                config.columns.amount,
                config.columns.fund,
                config.columns.strip
            );
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "csv_path" => {
            config.csv_path = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone().into())
            };
        }
        "delimiter" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => config.delimiter = ch,
                _ => bail!("Invalid value for delimiter. Use a single character."),
            }
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: csv_path, delimiter",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
