//! Per-pass staging overlay
//!
//! An aggregation pass reads and writes through a `StagedStore`. Changes are
//! visible to the pass immediately but reach the underlying store only on
//! `commit`. Dropping the overlay without committing discards them, which is
//! how a failed pass leaves the working directory untouched.

use crate::error::StoreError;
use crate::store::DocumentStore;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
enum Change {
    Write(Vec<u8>),
    Delete,
}

/// Documents written and deleted by a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub written: Vec<String>,
    pub deleted: Vec<String>,
}

impl CommitSummary {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.deleted.is_empty()
    }
}

pub struct StagedStore<'a, S: DocumentStore> {
    base: &'a mut S,
    changes: BTreeMap<String, Change>,
}

impl<'a, S: DocumentStore> StagedStore<'a, S> {
    pub fn new(base: &'a mut S) -> Self {
        Self {
            base,
            changes: BTreeMap::new(),
        }
    }

    /// What `commit` would write and delete, without applying anything.
    ///
    /// Staged deletes of documents the underlying store does not hold are left
    /// out, matching what `commit` reports.
    pub fn preview(&self) -> Result<CommitSummary, StoreError> {
        let mut summary = CommitSummary::default();
        for (name, change) in &self.changes {
            match change {
                Change::Write(_) => summary.written.push(name.clone()),
                Change::Delete => {
                    if self.base.exists(name)? {
                        summary.deleted.push(name.clone());
                    }
                }
            }
        }
        Ok(summary)
    }

    /// Apply staged changes to the underlying store.
    ///
    /// All writes land before any delete, so an interrupted commit can leave a
    /// consumed fragment behind but never loses merged data.
    pub fn commit(mut self) -> Result<CommitSummary, StoreError> {
        let mut summary = CommitSummary::default();

        for (name, change) in &self.changes {
            if let Change::Write(bytes) = change {
                self.base.write(name, bytes)?;
                summary.written.push(name.clone());
            }
        }

        for (name, change) in &self.changes {
            if let Change::Delete = change {
                if self.base.delete(name)? {
                    summary.deleted.push(name.clone());
                }
            }
        }

        debug!(
            written = summary.written.len(),
            deleted = summary.deleted.len(),
            "Committed staged documents"
        );
        Ok(summary)
    }

    /// Drop all staged changes.
    pub fn discard(self) {
        debug!(discarded = self.changes.len(), "Discarded staged documents");
    }
}

impl<'a, S: DocumentStore> DocumentStore for StagedStore<'a, S> {
    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        match self.changes.get(name) {
            Some(Change::Write(_)) => Ok(true),
            Some(Change::Delete) => Ok(false),
            None => self.base.exists(name),
        }
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.changes.get(name) {
            Some(Change::Write(bytes)) => Ok(Some(bytes.clone())),
            Some(Change::Delete) => Ok(None),
            None => self.base.read(name),
        }
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.changes
            .insert(name.to_string(), Change::Write(bytes.to_vec()));
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let existed = self.exists(name)?;
        self.changes.insert(name.to_string(), Change::Delete);
        Ok(existed)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self
            .base
            .list()?
            .into_iter()
            .filter(|name| !matches!(self.changes.get(name), Some(Change::Delete)))
            .collect();

        for (name, change) in &self.changes {
            if matches!(change, Change::Write(_)) && !names.contains(name) {
                names.push(name.clone());
            }
        }

        names.sort();
        Ok(names)
    }
}
