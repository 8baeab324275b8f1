//! Student API Data Types
//!
//! Request payloads, query parameters and response bodies of the `/students` endpoints,
//! plus the lenient text coercions applied to submitted `gpa` and `enrolled` values.

use crate::storage::types::{RecordId, StudentRecord};
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// A submitted field reduced to its textual form.
///
/// Form bodies only carry strings, while JSON bodies may carry numbers or
/// booleans for the same field. Both end up as the text a client would have
/// typed: `true`, `3.5`, `Ann`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValue(pub String);

impl TextValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TextValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl Visitor<'_> for TextVisitor {
            type Value = TextValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TextValue, E> {
                Ok(TextValue(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TextValue, E> {
                Ok(TextValue(v.to_string()))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

/// Body of `POST /students` and `PUT /students/:record_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentPayload {
    pub first_name: TextValue,
    pub last_name: TextValue,
    #[serde(default)]
    pub gpa: Option<TextValue>,
    pub enrolled: TextValue,
}

impl StudentPayload {
    pub fn to_record(&self, record_id: RecordId) -> StudentRecord {
        StudentRecord {
            record_id,
            first_name: self.first_name.0.clone(),
            last_name: self.last_name.0.clone(),
            gpa: self.gpa.as_ref().and_then(|gpa| parse_gpa(gpa.as_str())),
            enrolled: parse_enrolled(self.enrolled.as_str()),
        }
    }
}

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Reads the longest leading decimal number of `text`, ignoring leading
/// whitespace and any trailing garbage.
///
/// Returns `None` (not a number) when there is no numeric prefix or the value
/// is not finite. No range check is made.
pub fn parse_gpa(text: &str) -> Option<f64> {
    let prefix = NUMERIC_PREFIX.find(text.trim_start())?;
    prefix
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Only the exact text `true` enrolls a student.
pub fn parse_enrolled(text: &str) -> bool {
    text == "true"
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// The `record_id` echoed back in acknowledgements and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Id(RecordId),
    /// Path text that is not a valid id, echoed verbatim.
    Raw(String),
    /// No id was assigned (failed create); serialized as `-1`.
    Unassigned,
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordKey::Id(id) => id.serialize(serializer),
            RecordKey::Raw(text) => serializer.serialize_str(text),
            RecordKey::Unassigned => serializer.serialize_i64(-1),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub record_id: RecordKey,
    pub message: String,
}

impl RecordResponse {
    pub fn new(record_id: RecordKey, message: impl Into<String>) -> Self {
        Self {
            record_id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentRecord>,
}

pub const MSG_CREATED: &str = "successfully created";
pub const MSG_UPDATED: &str = "successfully updated";
pub const MSG_DELETED: &str = "record deleted";
pub const MSG_NOT_FOUND: &str = "error - resource not found";
pub const MSG_INTERNAL: &str = "error - internal server error";
pub const MSG_CREATE_FAILED: &str = "error - unable to create resource";
pub const MSG_UPDATE_FAILED: &str = "error - unable to update resource";
pub const MSG_INVALID_BODY: &str = "error - invalid request body";
