use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::resume::builder::BuildError;

/// A finished résumé, ready for download.
#[derive(Debug, Clone, Serialize)]
pub struct FileBlob {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Bytes,
    pub page_count: usize,
}

/// The save/download trigger for a generated file.
pub trait DocumentSink: Send + Sync {
    fn save(&self, blob: &FileBlob) -> Result<PathBuf, BuildError>;
}

/// Saves files into a directory. The file only appears under its final name
/// once fully written.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn save(&self, blob: &FileBlob) -> Result<PathBuf, BuildError> {
        let name = Path::new(&blob.file_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(BuildError::failed(format!(
                "refusing to save outside {}: {:?}",
                self.dir.display(),
                blob.file_name
            )));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            BuildError::failed(format!(
                "cannot create output directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let target = self.dir.join(name);

        // Dropping the temp file on any error path removes it.
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| BuildError::failed(format!("cannot create temp file: {e}")))?;
        tmp.write_all(&blob.bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| BuildError::failed(format!("cannot write {}: {e}", blob.file_name)))?;
        tmp.persist(&target).map_err(|e| {
            BuildError::failed(format!("cannot save {}: {}", target.display(), e.error))
        })?;

        info!(path = %target.display(), bytes = blob.bytes.len(), "résumé saved");
        Ok(target)
    }
}
