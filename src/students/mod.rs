//! Student REST API
//!
//! Maps the five `/students` operations onto the record store and the scanner and
//! turns every outcome into a status code plus a JSON body with a `message` field.
//!
//! ## Submodules
//! - **`handlers`**: Create, get, list/search, update and delete handlers.
//! - **`extract`**: Body extractor accepting JSON or URL-encoded forms.
//! - **`types`**: Payloads, responses and the lenient `gpa`/`enrolled` coercions.

pub mod extract;
pub mod handlers;
pub mod types;
