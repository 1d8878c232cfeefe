//! Document Store
//!
//! Named serialized documents in one working directory: the root document and
//! the pending fragments. Pure I/O; no merge logic lives here.

pub mod naming;
pub mod persistence;
pub mod staged;

pub use naming::{DocumentLayout, FragmentName, DEFAULT_ROOT_DOCUMENT};
pub use persistence::FsDocumentStore;
pub use staged::{CommitSummary, StagedStore};

use crate::error::StoreError;
use crate::tree::Module;

/// Document store interface
pub trait DocumentStore {
    fn exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Raw document bytes, or `None` if the document does not exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Create or replace a document.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove a document. Returns `false` if it did not exist.
    fn delete(&mut self, name: &str) -> Result<bool, StoreError>;

    /// Names of all documents, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Read and deserialize a module document.
    fn read_module(&self, name: &str) -> Result<Option<Module>, StoreError> {
        match self.read(name)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| StoreError::Format {
                    name: name.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and write a module document.
    fn write_module(&mut self, name: &str, module: &Module) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(module).map_err(|source| StoreError::Format {
            name: name.to_string(),
            source,
        })?;
        self.write(name, &bytes)
    }
}
