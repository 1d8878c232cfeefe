//! Working directory status: the root document and the fragments waiting on disk.

use crate::error::StoreError;
use crate::store::{DocumentLayout, DocumentStore, FragmentName};
use crate::tree::hasher::module_digest_hex;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct RootSummary {
    pub document: String,
    pub name: String,
    pub modules: usize,
    pub digest: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FragmentEntry {
    pub document: String,
    /// Coordinate or directory name the file is keyed by
    pub identity: String,
    pub legacy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkDirStatus {
    pub work_dir: PathBuf,
    pub root: Option<RootSummary>,
    pub fragments: Vec<FragmentEntry>,
    /// Files that are neither the root document nor fragments
    pub other: Vec<String>,
}

/// Inspect a working directory without modifying it.
///
/// Fails if the root document exists but cannot be parsed.
pub fn collect_status<S: DocumentStore + ?Sized>(
    store: &S,
    work_dir: PathBuf,
    layout: &DocumentLayout,
) -> Result<WorkDirStatus, StoreError> {
    let root = store.read_module(&layout.root_document)?.map(|module| RootSummary {
        document: layout.root_document.clone(),
        name: module.name.clone(),
        modules: module.node_count(),
        digest: module_digest_hex(&module),
    });

    let mut fragments = Vec::new();
    let mut other = Vec::new();
    for document in store.list()? {
        if document == layout.root_document {
            continue;
        }
        match FragmentName::parse(&document) {
            Some(FragmentName::Legacy(_)) if !layout.legacy_fragment_names => other.push(document),
            Some(name) => {
                let (identity, legacy) = match name {
                    FragmentName::Coordinate(coordinate) => (coordinate, false),
                    FragmentName::Legacy(dir) => (dir, true),
                };
                fragments.push(FragmentEntry {
                    document,
                    identity,
                    legacy,
                });
            }
            None => other.push(document),
        }
    }

    Ok(WorkDirStatus {
        work_dir,
        root,
        fragments,
        other,
    })
}
