//! Filesystem persistence for the Document Store

use crate::error::StoreError;
use crate::store::DocumentStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEMP_EXTENSION: &str = "tmp";

/// Documents stored as flat files in one working directory
///
/// Writes are atomic: the document is written to `.{name}.tmp` and renamed over
/// the final file, so readers never observe a partially written document.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Open an existing working directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::MissingWorkDir(root));
        }
        Ok(Self { root })
    }

    /// Open a working directory, creating it if needed.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::io_at("create working directory", &root, e))?;
        Ok(Self { root })
    }

    /// Get the working directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Document names are plain file names inside the working directory.
fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.starts_with('.')
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl DocumentStore for FsDocumentStore {
    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.document_path(name)?.is_file())
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.document_path(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io_at("read document", &path, e)),
        }
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.document_path(name)?;
        let temp_path = self.root.join(format!(".{}.{}", name, TEMP_EXTENSION));

        fs::write(&temp_path, bytes)
            .map_err(|e| StoreError::io_at("write document", &temp_path, e))?;

        fs::rename(&temp_path, &path).map_err(|e| {
            // Clean up temp file on error
            let _ = fs::remove_file(&temp_path);
            StoreError::io_at("rename temp file to", &path, e)
        })?;

        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let path = self.document_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io_at("delete document", &path, e)),
        }
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                StoreError::IoError(std::io::Error::new(
                    ErrorKind::Other,
                    format!("Failed to list {:?}: {}", self.root, e),
                ))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            // Hidden files include in-flight temp files
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }
}
