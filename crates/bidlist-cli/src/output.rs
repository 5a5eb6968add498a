//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use bidlist_core::{Bid, BidStore};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single bid in full
    pub fn print_bid(&self, bid: &Bid) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", bid.id);
                println!("Title:  {}", bid.title);
                println!("Fund:   {}", bid.fund);
                println!("Amount: ${:.2}", bid.amount);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(bid).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", bid.id);
            }
        }
    }

    /// Print every bid in the store, head to tail
    pub fn print_bids(&self, store: &BidStore) {
        match self.format {
            OutputFormat::Human => {
                if store.is_empty() {
                    println!("No bids loaded.");
                    return;
                }
                for bid in store {
                    println!("{}", bid_line(bid));
                }
                println!("\n{} bid(s)", store.len());
            }
            OutputFormat::Json => {
                let bids: Vec<&Bid> = store.iter().collect();
                println!("{}", serde_json::to_string_pretty(&bids).unwrap());
            }
            OutputFormat::Quiet => {
                for bid in store {
                    println!("{}", bid.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// One-line table row for a bid, original front end's column order
pub fn bid_line(bid: &Bid) -> String {
    format!(
        "ID: {:<8} | Title: {:<50} | Fund: {:<12} | Amount: ${:>10.2}",
        bid.id,
        truncate(&bid.title, 50),
        bid.fund,
        bid.amount
    )
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_bid_line_layout() {
        let bid = Bid::new("98109", "Roadwork", "GEN", 1200.5);
        let line = bid_line(&bid);
        assert!(line.contains("ID: 98109"));
        assert!(line.contains("Roadwork"));
        assert!(line.contains("$"));
        assert!(line.contains("1200.50"));
    }
}
