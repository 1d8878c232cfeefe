//! Results of an aggregation pass

use serde::{Deserialize, Serialize};

/// What happened to one pending fragment during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FragmentOutcome {
    /// Added to the parent's own pending fragment
    MergedIntoFragment { parent: String, document: String },
    /// Added to the parent's node inside the root document
    MergedIntoRoot { parent: String },
    /// Parent known, but not persisted anywhere yet
    ParentPending { parent: String },
    /// No project declares this one as a child
    NoParent,
}

impl FragmentOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(
            self,
            FragmentOutcome::MergedIntoFragment { .. } | FragmentOutcome::MergedIntoRoot { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentReport {
    /// Coordinate of the project the fragment belongs to
    pub project: String,
    pub document: String,
    #[serde(flatten)]
    pub outcome: FragmentOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub fragments: Vec<FragmentReport>,
    /// Hex BLAKE3 digest of the root document after the pass, if it exists
    pub root_digest: Option<String>,
    /// False for dry runs
    pub committed: bool,
    pub written: Vec<String>,
    pub deleted: Vec<String>,
}

impl AggregationReport {
    pub fn merged(&self) -> usize {
        self.fragments.iter().filter(|f| f.outcome.is_merged()).count()
    }

    pub fn deferred(&self) -> usize {
        self.fragments.len() - self.merged()
    }

    /// A pass that changed nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.merged() == 0 && self.written.is_empty() && self.deleted.is_empty()
    }
}
