//! Error types shared by the storage, search and HTTP layers.

use crate::storage::types::RecordId;
use std::path::PathBuf;

pub type RecordResult<T> = Result<T, RecordError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    /// No backing file exists for the id.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// A backing file already exists for a freshly generated id.
    #[error("record {0} already exists")]
    AlreadyExists(RecordId),

    /// Another record already uses this name pair (case-insensitive).
    #[error("duplicate found for {first_name} {last_name}")]
    Duplicate {
        first_name: String,
        last_name: String,
    },

    /// A record file exists but its content is not a valid record.
    #[error("corrupt record file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RecordError {
    /// True for failures the caller did not cause (filesystem, corrupt data).
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RecordError::Corrupt { .. } | RecordError::Io(_) | RecordError::Encode(_)
        )
    }
}
