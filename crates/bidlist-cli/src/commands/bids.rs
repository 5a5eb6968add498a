//! Bid command handlers: list, find, remove, export

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};

use bidlist_core::{loader, BidStore, Config, CsvDocument};

use crate::output::Output;

/// Resolve the CSV path from the argument or configuration
fn resolve_path(file: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match file.or_else(|| config.csv_path.clone()) {
        Some(path) => Ok(path),
        None => bail!(
            "No CSV file given. Pass a path or set one with `bidlist config set csv_path <file>`."
        ),
    }
}

/// Load the document at `path` and fill a store from it
fn load_store(path: &Path, config: &Config) -> Result<(BidStore, usize)> {
    let doc = CsvDocument::load(path, config.delimiter)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let mut store = BidStore::new();
    let loaded = loader::load_into(&doc, &config.columns, &mut store)
        .with_context(|| format!("Failed to map bids from {}", path.display()))?;

    Ok((store, loaded))
}

/// Load a file and print every bid with count and timing
pub fn list(file: Option<PathBuf>, config: &Config, output: &Output) -> Result<()> {
    let path = resolve_path(file, config)?;

    let started = Instant::now();
    let (store, loaded) = load_store(&path, config)?;
    let elapsed = started.elapsed();

    output.print_bids(&store);
    output.message(&format!(
        "{} bids read in {:.2} ms",
        loaded,
        elapsed.as_secs_f64() * 1000.0
    ));
    Ok(())
}

/// Load a file and look up one bid by id
pub fn find(id: &str, file: Option<PathBuf>, config: &Config, output: &Output) -> Result<()> {
    let path = resolve_path(file, config)?;
    let (store, _) = load_store(&path, config)?;

    let started = Instant::now();
    let found = store.search(id.trim());
    let micros = started.elapsed().as_micros();

    match found {
        Some(bid) => {
            output.print_bid(bid);
            output.message(&format!("Search time: {} us", micros));
        }
        None => output.message(&format!("Bid id {} not found.", id.trim())),
    }
    Ok(())
}

/// Load a file, remove one bid from the store, and report the result
pub fn remove(id: &str, file: Option<PathBuf>, config: &Config, output: &Output) -> Result<()> {
    let path = resolve_path(file, config)?;
    let (mut store, _) = load_store(&path, config)?;

    let id = id.trim();
    if store.remove(id) {
        output.success(&format!(
            "Removed bid id {} ({} bids remain)",
            id,
            store.len()
        ));
    } else {
        output.message(&format!("Bid id {} was not in the list.", id));
    }
    Ok(())
}

/// Re-serialize a file to stdout or another file
pub fn export(
    file: Option<PathBuf>,
    out: Option<PathBuf>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let path = resolve_path(file, config)?;
    let doc = CsvDocument::load(&path, config.delimiter)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    match out {
        Some(target) => {
            doc.save(&target)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            output.success(&format!(
                "Wrote {} rows to {}",
                doc.row_count(),
                target.display()
            ));
        }
        None => print!("{}", doc.serialize()),
    }
    Ok(())
}
