//! Command handlers

pub mod bids;
pub mod config;
