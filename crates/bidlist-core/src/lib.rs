//! Bidlist Core Library
//!
//! This crate provides the core functionality for bidlist, a small
//! bid-tracking system fed by delimited monthly sales exports.
//!
//! # Architecture
//!
//! Raw text flows through the tokenizer into a `CsvDocument`, the
//! loader maps fixed columns of each row to a `Bid`, and bids live in a
//! `BidStore` - a singly linked sequence with head/tail tracking that
//! the front end queries and mutates.
//!
//! # Quick Start
//!
//! ```text
//! let doc = CsvDocument::load("eBid_Monthly_Sales.csv", ',')?;
//!
//! let mut store = BidStore::new();
//! loader::load_into(&doc, &ColumnMapping::default(), &mut store)?;
//!
//! if let Some(bid) = store.search("98109") {
//!     println!("{}: {}", bid.id, bid.title);
//! }
//! ```
//!
//! # Modules
//!
//! - `tokenizer`: quote-aware field splitting for one line
//! - `document`: in-memory table of header + rows, serialization back to text
//! - `store`: sequential bid storage (main entry point)
//! - `loader`: column mapping from document rows to bids
//! - `models`: the `Bid` record
//! - `config`: application configuration
//! - `error`: the error taxonomy shared by the above

pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod models;
pub mod store;
pub mod tokenizer;

pub use config::Config;
pub use document::{CsvDocument, ShapeMismatch};
pub use error::{DocumentError, DocumentResult, FileError, IndexError, ParseError};
pub use loader::ColumnMapping;
pub use models::Bid;
pub use store::BidStore;
