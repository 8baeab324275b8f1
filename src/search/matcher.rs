use crate::storage::types::StudentRecord;

/// Case folding applied to both sides of every name comparison.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// A `(first_name, last_name)` pair compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    first_name: String,
    last_name: String,
}

impl NamePair {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: fold_name(first_name),
            last_name: fold_name(last_name),
        }
    }

    pub fn matches(&self, record: &StudentRecord) -> bool {
        fold_name(&record.first_name) == self.first_name
            && fold_name(&record.last_name) == self.last_name
    }
}

/// Case-insensitive prefix filter over both name fields.
///
/// A missing or empty prefix matches every value of that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    first_name: String,
    last_name: String,
}

impl NameFilter {
    pub fn new(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            first_name: first_name.map(fold_name).unwrap_or_default(),
            last_name: last_name.map(fold_name).unwrap_or_default(),
        }
    }

    pub fn matches(&self, record: &StudentRecord) -> bool {
        fold_name(&record.first_name).starts_with(&self.first_name)
            && fold_name(&record.last_name).starts_with(&self.last_name)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }
}
