//! Record Collection Scanner
//!
//! Answers the queries that need to look at every stored record.
//!
//! ## Overview
//! There is no index: each query lists the data directory and parses the record files
//! one by one. A single unreadable or corrupt file fails the whole query rather than
//! being skipped.
//!
//! ## Submodules
//! - **`matcher`**: Case-insensitive name comparison (exact pair and prefix filter).
//! - **`scanner`**: The record cursor plus duplicate detection and prefix search.

pub mod matcher;
pub mod scanner;

#[cfg(test)]
mod tests;
