//! Aggregator
//!
//! Folds pending per-project fragments into their parents. A parent is either
//! still a pending fragment itself, or already part of the root document tree.
//! Each pass runs against a staged overlay of the working directory and is
//! committed as a whole; an error anywhere in the pass leaves the directory as
//! it was.

pub mod locator;
pub mod report;

pub use locator::{fragment_documents, locate_fragments, PendingFragment};
pub use report::{AggregationReport, FragmentOutcome, FragmentReport};

use crate::error::AggregateError;
use crate::project::{Project, ProjectSet};
use crate::store::{DocumentLayout, DocumentStore, StagedStore};
use crate::tree::hasher::module_digest_hex;
use crate::tree::{search, Module};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub struct Aggregator<'p> {
    projects: &'p ProjectSet,
    layout: DocumentLayout,
}

impl<'p> Aggregator<'p> {
    pub fn new(projects: &'p ProjectSet, layout: DocumentLayout) -> Self {
        Self { projects, layout }
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Run one aggregation pass and commit its changes.
    #[instrument(skip_all, fields(projects = self.projects.len()))]
    pub fn aggregate<S: DocumentStore>(
        &self,
        store: &mut S,
    ) -> Result<AggregationReport, AggregateError> {
        let start = Instant::now();
        let mut staged = StagedStore::new(store);

        let fragments = self.run_pass(&mut staged)?;
        let root_digest = self.root_digest(&staged)?;
        let summary = staged.commit()?;

        let report = AggregationReport {
            fragments,
            root_digest,
            committed: true,
            written: summary.written,
            deleted: summary.deleted,
        };

        info!(
            pending = report.fragments.len(),
            merged = report.merged(),
            deferred = report.deferred(),
            duration_ms = start.elapsed().as_millis(),
            "Aggregation pass complete"
        );
        Ok(report)
    }

    /// Compute what a pass would do without touching the store.
    pub fn plan<S: DocumentStore>(&self, store: &mut S) -> Result<AggregationReport, AggregateError> {
        let mut staged = StagedStore::new(store);

        let fragments = self.run_pass(&mut staged)?;
        let root_digest = self.root_digest(&staged)?;
        let summary = staged.preview()?;
        staged.discard();

        Ok(AggregationReport {
            fragments,
            root_digest,
            committed: false,
            written: summary.written,
            deleted: summary.deleted,
        })
    }

    /// Repeat passes until one merges nothing.
    ///
    /// Each merge removes a fragment, so the number of productive passes is
    /// bounded by the number of projects.
    pub fn aggregate_until_stable<S: DocumentStore>(
        &self,
        store: &mut S,
    ) -> Result<Vec<AggregationReport>, AggregateError> {
        let mut reports = Vec::new();
        for pass in 1..=self.projects.len() + 1 {
            let report = self.aggregate(store)?;
            let merged = report.merged();
            reports.push(report);
            if merged == 0 {
                debug!(passes = pass, "Aggregation converged");
                break;
            }
        }
        Ok(reports)
    }

    fn root_digest<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<Option<String>, AggregateError> {
        Ok(store
            .read_module(&self.layout.root_document)?
            .map(|root| module_digest_hex(&root)))
    }

    fn run_pass<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<Vec<FragmentReport>, AggregateError> {
        let pending = locate_fragments(&*store, self.projects, &self.layout)?;
        debug!(pending = pending.len(), "Located pending fragments");

        let mut reports = Vec::with_capacity(pending.len());
        for fragment in pending {
            let Some(outcome) = self.merge_fragment(store, &fragment)? else {
                debug!(
                    project = %fragment.project.coordinate,
                    document = %fragment.document,
                    "Fragment already consumed earlier in this pass"
                );
                continue;
            };
            debug!(
                project = %fragment.project.coordinate,
                document = %fragment.document,
                outcome = ?outcome,
                "Processed fragment"
            );
            reports.push(FragmentReport {
                project: fragment.project.coordinate.clone(),
                document: fragment.document,
                outcome,
            });
        }
        Ok(reports)
    }

    fn merge_fragment<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        fragment: &PendingFragment<'_>,
    ) -> Result<Option<FragmentOutcome>, AggregateError> {
        let Some(parent) = self.projects.parent_of(fragment.project) else {
            if !self.projects.is_top_level(fragment.project) {
                warn!(
                    project = %fragment.project.coordinate,
                    "No project declares this module; leaving its fragment pending"
                );
            }
            return Ok(Some(FragmentOutcome::NoParent));
        };

        // A legacy name shared by two projects is consumed by the first one
        let Some(child) = store.read_module(&fragment.document)? else {
            return Ok(None);
        };

        let outcome = self.attach_to_parent(store, parent, child)?;

        if outcome.is_merged() {
            store.delete(&fragment.document)?;
            for stale in &fragment.stale {
                store.delete(stale)?;
            }
        }
        Ok(Some(outcome))
    }

    /// Add `child` to wherever `parent` is currently persisted.
    ///
    /// A parent fragment takes precedence over a node in the root tree when both
    /// exist, since the fragment is the fresher copy.
    fn attach_to_parent<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        parent: &Project,
        child: Module,
    ) -> Result<FragmentOutcome, AggregateError> {
        if let Some((document, _)) = fragment_documents(&*store, parent, &self.layout)? {
            if let Some(mut parent_module) = store.read_module(&document)? {
                parent_module.add_submodule(child);
                store.write_module(&document, &parent_module)?;
                return Ok(FragmentOutcome::MergedIntoFragment {
                    parent: parent.coordinate.clone(),
                    document,
                });
            }
        }

        let root_document = &self.layout.root_document;
        if let Some(mut root) = store.read_module(root_document)? {
            if let Some(node) = search::find_mut(&mut root, parent.module_name()) {
                node.add_submodule(child);
                store.write_module(root_document, &root)?;
                return Ok(FragmentOutcome::MergedIntoRoot {
                    parent: parent.coordinate.clone(),
                });
            }
        }

        Ok(FragmentOutcome::ParentPending {
            parent: parent.coordinate.clone(),
        })
    }
}
