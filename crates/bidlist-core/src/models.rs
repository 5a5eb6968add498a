//! Data model for bidlist
//!
//! Defines the `Bid` record, one line item from a surplus-auction export.

use serde::{Deserialize, Serialize};

/// A single bid
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    /// External identifier, unique within one export
    pub id: String,
    /// Display title
    pub title: String,
    /// Fund code the proceeds are credited to
    pub fund: String,
    /// Winning amount in dollars
    pub amount: f64,
}

impl Bid {
    /// Create a bid from its four fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_new() {
        let bid = Bid::new("98109", "Roadwork", "GEN", 1200.50);
        assert_eq!(bid.id, "98109");
        assert_eq!(bid.title, "Roadwork");
        assert_eq!(bid.fund, "GEN");
        assert_eq!(bid.amount, 1200.50);
    }

    #[test]
    fn test_bid_default_is_empty() {
        let bid = Bid::default();
        assert!(bid.id.is_empty());
        assert!(bid.title.is_empty());
        assert!(bid.fund.is_empty());
        assert_eq!(bid.amount, 0.0);
    }

    #[test]
    fn test_bid_serialization() {
        let bid = Bid::new("12345", "Office chairs", "ENTERPRISE", 87.00);
        let json = serde_json::to_string(&bid).unwrap();
        let deserialized: Bid = serde_json::from_str(&json).unwrap();
        assert_eq!(bid, deserialized);
    }
}
