//! Record Storage Module
//!
//! Persists student records as individual JSON files inside a data directory.
//!
//! ## Core Concepts
//! - **Addressing**: A record lives at `<data_dir>/<record_id>.json`. Its existence is
//!   defined solely by the presence of that file; there is no separate index.
//! - **Writes**: Documents are written to a hidden temporary file and renamed into place,
//!   so a crash mid-write never leaves a truncated record behind.
//! - **Identifiers**: `RecordIdGenerator` derives ids from the wall clock (milliseconds)
//!   while keeping them strictly increasing.

pub mod ids;
pub mod store;
pub mod types;
