//! Student Records Service Library
//!
//! A small REST service that keeps one JSON file per student record and answers
//! duplicate checks and name searches by scanning the record directory.
//! The binary (`main.rs`) wires these modules into an HTTP server.
//!
//! ## Modules
//! - **`storage`**: The record store. One `<record_id>.json` file per record, atomic
//!   replace-on-write, and the monotonic wall-clock id generator.
//! - **`search`**: The collection scanner. Sequential cursor over record files, duplicate
//!   detection on create, case-insensitive prefix search on list.
//! - **`students`**: The HTTP handlers, request/response types and body extraction.
//! - **`server`**: Shared application state and router assembly.
//! - **`config`**: Command line and environment configuration.
//! - **`error`**: The error kinds shared by all layers.

pub mod config;
pub mod error;
pub mod search;
pub mod server;
pub mod storage;
pub mod students;
