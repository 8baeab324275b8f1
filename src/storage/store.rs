use super::types::{RECORD_EXTENSION, RecordId, StudentRecord};
use crate::error::{RecordError, RecordResult};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of record files, one `<record_id>.json` per record.
///
/// The store does not serialize writers. Compound operations such as
/// "check then create" must be guarded by the caller.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    ///
    /// Temporary files left behind by an interrupted write are removed.
    pub async fn open(dir: impl Into<PathBuf>) -> RecordResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        let store = Self { dir };
        store.remove_stale_temp_files().await?;
        tracing::debug!("Record store opened at {}", store.dir.display());
        Ok(store)
    }

    async fn remove_stale_temp_files(&self) -> RecordResult<()> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_temp_file_name(&path) || !entry.file_type().await?.is_file() {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::warn!("Removed stale temporary file {}", path.display()),
                Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, id: RecordId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    pub async fn exists(&self, id: RecordId) -> bool {
        tokio::fs::metadata(self.path_of(id))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    pub async fn read(&self, id: RecordId) -> RecordResult<StudentRecord> {
        let path = self.path_of(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode_record(&path, &bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RecordError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `record`, replacing any previous content for its id.
    ///
    /// The document goes to a hidden temporary file first and is renamed over
    /// the target, so readers see either the old or the new record.
    pub async fn write(&self, record: &StudentRecord) -> RecordResult<()> {
        let content = encode_record(record)?;
        let path = self.path_of(record.record_id);
        let tmp = self
            .dir
            .join(format!(".{}{}", record.record_id.file_name(), TEMP_SUFFIX));

        if let Err(e) = tokio::fs::write(&tmp, content.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!("Wrote record {} to {}", record.record_id, path.display());
        Ok(())
    }

    /// Writes a record whose id must not be in use yet.
    pub async fn create(&self, record: &StudentRecord) -> RecordResult<()> {
        if self.exists(record.record_id).await {
            return Err(RecordError::AlreadyExists(record.record_id));
        }
        self.write(record).await
    }

    pub async fn delete(&self, id: RecordId) -> RecordResult<()> {
        match tokio::fs::remove_file(self.path_of(id)).await {
            Ok(()) => {
                tracing::debug!("Deleted record {}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RecordError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Starts enumerating record files in directory-listing order.
    pub async fn list(&self) -> RecordResult<RecordFiles> {
        let entries = tokio::fs::read_dir(&self.dir).await?;
        Ok(RecordFiles { entries })
    }
}

/// Lazy listing of the record files in a store directory.
///
/// Order is whatever the filesystem returns. Hidden files (including
/// in-flight temporary writes), directories and files without the record
/// extension are skipped.
pub struct RecordFiles {
    entries: tokio::fs::ReadDir,
}

impl RecordFiles {
    pub async fn next_path(&mut self) -> RecordResult<Option<PathBuf>> {
        while let Some(entry) = self.entries.next_entry().await? {
            let path = entry.path();
            if !is_record_file_name(&path) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            return Ok(Some(path));
        }
        Ok(None)
    }
}

/// Suffix of the hidden `.<id>.json.tmp` files used while writing.
const TEMP_SUFFIX: &str = ".tmp";

fn is_temp_file_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.starts_with('.')
                && name
                    .strip_suffix(TEMP_SUFFIX)
                    .is_some_and(|stem| stem.ends_with(&format!(".{}", RECORD_EXTENSION)))
        })
}

fn is_record_file_name(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| name.starts_with('.'));
    !hidden && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
}

/// Reads and decodes the record file at `path`.
pub async fn read_record_file(path: &Path) -> RecordResult<StudentRecord> {
    let bytes = tokio::fs::read(path).await?;
    decode_record(path, &bytes)
}

pub fn decode_record(path: &Path, bytes: &[u8]) -> RecordResult<StudentRecord> {
    serde_json::from_slice(bytes).map_err(|source| RecordError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed JSON with two-space indentation.
pub fn encode_record(record: &StudentRecord) -> RecordResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}
