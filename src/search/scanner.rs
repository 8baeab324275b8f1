use super::matcher::{NameFilter, NamePair};
use crate::error::{RecordError, RecordResult};
use crate::storage::store::{RecordFiles, RecordStore, read_record_file};
use crate::storage::types::StudentRecord;

use std::io::ErrorKind;

/// Walks every record of a store, one file at a time.
///
/// A file that cannot be read or parsed ends the walk with an error. A file
/// that disappears between listing and reading was deleted concurrently and
/// is no longer a record, so it is passed over.
pub struct RecordCursor {
    files: RecordFiles,
}

impl RecordCursor {
    pub async fn open(store: &RecordStore) -> RecordResult<Self> {
        Ok(Self {
            files: store.list().await?,
        })
    }

    pub async fn next_record(&mut self) -> RecordResult<Option<StudentRecord>> {
        while let Some(path) = self.files.next_path().await? {
            match read_record_file(&path).await {
                Ok(record) => return Ok(Some(record)),
                Err(RecordError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!("Record file {} vanished during scan", path.display());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

/// Returns the first record carrying the same name pair, ignoring case.
pub async fn find_duplicate(
    store: &RecordStore,
    first_name: &str,
    last_name: &str,
) -> RecordResult<Option<StudentRecord>> {
    let wanted = NamePair::new(first_name, last_name);
    let mut cursor = RecordCursor::open(store).await?;

    while let Some(record) = cursor.next_record().await? {
        if wanted.matches(&record) {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

/// Collects every record accepted by `filter`, in listing order.
pub async fn search(store: &RecordStore, filter: &NameFilter) -> RecordResult<Vec<StudentRecord>> {
    let mut cursor = RecordCursor::open(store).await?;
    let mut matches = Vec::new();
    let mut scanned = 0usize;

    while let Some(record) = cursor.next_record().await? {
        scanned += 1;
        if filter.matches(&record) {
            matches.push(record);
        }
    }

    tracing::debug!("Search scanned {} records, {} matched", scanned, matches.len());
    Ok(matches)
}
