use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored record.
///
/// The decimal form of the id is also the stem of the record's file name,
/// so only digits ever reach the filesystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, RECORD_EXTENSION)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text that is not the canonical decimal form of an id.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid record id {0:?}")]
pub struct InvalidRecordId(pub String);

/// Accepts only the exact text an id is displayed as: ASCII digits, no sign,
/// no leading zeros.
impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(InvalidRecordId(s.to_string()));
        }
        s.parse::<u64>()
            .map(RecordId)
            .map_err(|_| InvalidRecordId(s.to_string()))
    }
}

/// Extension of record files inside the data directory.
pub const RECORD_EXTENSION: &str = "json";

/// A single student's persisted data.
///
/// Field order here is the field order of the stored JSON document.
/// `gpa` is `None` when the submitted text was not a number; it is written
/// as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentRecord {
    pub record_id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub gpa: Option<f64>,
    pub enrolled: bool,
}
