//! Interactive menu shell
//!
//! Reimplements the classic menu front end over one in-memory store:
//! enter bids by hand, load them from the export, list, find, and
//! remove, until the user exits. Parse and file errors are shown and
//! the menu continues; only I/O failure on the terminal itself ends
//! the session.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use bidlist_core::{loader, Bid, BidStore, Config, CsvDocument};

use crate::output::bid_line;

pub fn run(file: Option<PathBuf>, config: &Config) -> Result<()> {
    let csv_path = file.or_else(|| config.csv_path.clone());
    let mut store = BidStore::new();

    loop {
        print_menu();
        let Some(choice) = prompt("Enter choice: ")? else {
            break; // EOF
        };

        match choice.as_str() {
            "1" => {
                if enter_bid(&mut store, config)?.is_none() {
                    break;
                }
            }
            "2" => {
                if load_bids(&mut store, csv_path.as_deref(), config)?.is_none() {
                    break;
                }
            }
            "3" => show_all(&store),
            "4" => {
                if find_bid(&store)?.is_none() {
                    break;
                }
            }
            "5" => {
                if remove_bid(&mut store)?.is_none() {
                    break;
                }
            }
            "9" => {
                println!();
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("BID SYSTEM");
    println!("  [1] Enter Bid");
    println!("  [2] Load Bids");
    println!("  [3] Show All");
    println!("  [4] Find Bid");
    println!("  [5] Remove Bid");
    println!("  [9] Exit");
    println!();
}

/// Print a label and read one trimmed line; `None` on EOF
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a new bid and add it; `None` means EOF
fn enter_bid(store: &mut BidStore, config: &Config) -> Result<Option<()>> {
    println!();
    let Some(id) = prompt("Enter ID: ")? else {
        return Ok(None);
    };
    if id.is_empty() {
        println!("No ID entered.");
        return Ok(Some(()));
    }
    if store.contains(&id) {
        println!("Bid ID {id} already exists.");
        println!("Use a different ID or remove the existing bid first.");
        return Ok(Some(()));
    }

    let Some(title) = prompt("Enter Title: ")? else {
        return Ok(None);
    };
    let Some(fund) = prompt("Enter Fund: ")? else {
        return Ok(None);
    };
    let Some(amount) = prompt("Enter Amount: $")? else {
        return Ok(None);
    };
    let amount = loader::parse_amount(&amount, config.columns.strip);

    let Some(position) = prompt("Add to [f]ront or [b]ack? [b] ")? else {
        return Ok(None);
    };

    let bid = Bid::new(id, title, fund, amount);
    println!();
    println!("BID ADDED");
    println!("{}", bid_line(&bid));

    if position.eq_ignore_ascii_case("f") {
        store.prepend(bid);
    } else {
        store.append(bid);
    }

    Ok(Some(()))
}

/// Load bids from the session file, prompting for a path if none is set
fn load_bids(
    store: &mut BidStore,
    csv_path: Option<&std::path::Path>,
    config: &Config,
) -> Result<Option<()>> {
    let path: PathBuf = match csv_path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(entered) = prompt("Enter CSV path: ")? else {
                return Ok(None);
            };
            if entered.is_empty() {
                println!("No path entered.");
                return Ok(Some(()));
            }
            PathBuf::from(entered)
        }
    };

    println!("Loading CSV file {}", path.display());
    let started = Instant::now();

    let doc = match CsvDocument::load(&path, config.delimiter) {
        Ok(doc) => doc,
        Err(e) => {
            // Stay in the menu; the store is untouched
            println!("Error loading CSV '{}': {}", path.display(), e);
            return Ok(Some(()));
        }
    };

    match loader::load_into(&doc, &config.columns, store) {
        Ok(loaded) => {
            let elapsed = started.elapsed();
            println!();
            println!("BIDS LOADED");
            println!("{} bids read", loaded);
            println!("Time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
        }
        Err(e) => println!("Error loading CSV '{}': {}", path.display(), e),
    }

    Ok(Some(()))
}

fn show_all(store: &BidStore) {
    if store.is_empty() {
        println!("No bids loaded yet.");
        println!("Please select option 2 first.");
        return;
    }

    println!();
    println!("ALL BIDS ({} total)", store.len());
    println!();
    for bid in store {
        println!("{}", bid_line(bid));
    }
}

fn find_bid(store: &BidStore) -> Result<Option<()>> {
    println!();
    let Some(id) = prompt("Enter Bid ID to find: ")? else {
        return Ok(None);
    };
    if id.is_empty() {
        println!("No ID entered.");
        return Ok(Some(()));
    }

    let started = Instant::now();
    let found = store.search(&id);
    let micros = started.elapsed().as_micros();

    match found {
        Some(bid) => {
            println!();
            println!("BID FOUND");
            println!("{}", bid_line(bid));
            println!("Search time: {} us", micros);
        }
        None => println!("Bid ID {id} not found."),
    }

    Ok(Some(()))
}

fn remove_bid(store: &mut BidStore) -> Result<Option<()>> {
    println!();
    let Some(id) = prompt("Enter Bid ID to remove: ")? else {
        return Ok(None);
    };
    if id.is_empty() {
        println!("No ID entered.");
        return Ok(Some(()));
    }

    if store.remove(&id) {
        println!("Successfully removed bid ID: {id}");
    } else {
        println!("Bid ID {id} was not in the list.");
    }

    Ok(Some(()))
}
