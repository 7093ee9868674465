//! Directory-backed file registry

use super::filename::{allowed_file, is_plain_name, validate_upload_name};
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A stored PDF as seen in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Filename, used verbatim as the lookup key
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Flat directory of uploaded PDFs keyed by filename.
///
/// The directory listing is the only source of truth; nothing is cached.
/// There is no locking: concurrent saves of one name are last-write-wins.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    root: PathBuf,
}

impl FileRegistry {
    /// Create a registry over `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a registry over `root`, creating the directory if missing
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let registry = Self::new(root);
        std::fs::create_dir_all(&registry.root)?;
        Ok(registry)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List stored PDFs, sorted by name
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.root)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue, // Skip entries we can't read
            };

            let name = match entry.file_name().into_string() {
                Ok(n) => n,
                Err(_) => continue, // Non-UTF-8 names can't be addressed over HTTP
            };
            if !allowed_file(&name) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .and_then(|d| chrono::DateTime::from_timestamp(d.as_secs() as i64, 0))
                .map(|dt| dt.to_rfc3339());

            files.push(StoredFile {
                name,
                size: metadata.len(),
                modified,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// List stored PDF names, sorted
    pub fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|f| f.name).collect())
    }

    /// Store `data` under `name`, replacing any file of the same name.
    ///
    /// The bytes are written to a temporary file in the same directory and
    /// renamed into place, so readers never see a partial file.
    pub fn save(&self, name: &str, data: &[u8]) -> Result<()> {
        let name = validate_upload_name(name)?;
        let target = self.root.join(name);

        let mut tmp = tempfile::Builder::new()
            .prefix(".upload-")
            .suffix(".part")
            .tempfile_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    /// Check whether a stored PDF named `name` exists
    pub fn exists(&self, name: &str) -> bool {
        self.lookup_path(name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Read the full contents of a stored PDF
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.lookup_path(name)?;
        std::fs::read(&path).map_err(|e| not_found_or_io(e, name))
    }

    /// Remove a stored PDF.
    ///
    /// The existence check and the removal are not atomic; a concurrent
    /// delete surfaces as `FileNotFound`.
    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::FileNotFound {
                name: name.to_string(),
            });
        }
        let path = self.lookup_path(name)?;
        std::fs::remove_file(&path).map_err(|e| not_found_or_io(e, name))
    }

    /// Resolve `name` to a path inside the registry directory.
    /// Names that could never be stored resolve to `FileNotFound`.
    fn lookup_path(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_name(name) || !allowed_file(name) {
            return Err(Error::FileNotFound {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(name))
    }
}

fn not_found_or_io(e: std::io::Error, name: &str) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::FileNotFound {
            name: name.to_string(),
        }
    } else {
        Error::Io(e)
    }
}
