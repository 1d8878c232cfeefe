//! Fragment Locator: which projects have a report waiting to be merged

use crate::error::StoreError;
use crate::project::{Project, ProjectSet};
use crate::store::{DocumentLayout, DocumentStore};

/// A project whose fragment file currently exists
#[derive(Debug, Clone)]
pub struct PendingFragment<'p> {
    pub project: &'p Project,
    /// Document holding the fragment
    pub document: String,
    /// Older copies under a less preferred name, removed together with `document`
    pub stale: Vec<String>,
}

/// Find the fragment document for one project, if any.
///
/// Candidates are tried in layout preference order (coordinate name first, then
/// the legacy directory name). Returns the first existing document plus any
/// other existing candidates.
pub fn fragment_documents<S: DocumentStore + ?Sized>(
    store: &S,
    project: &Project,
    layout: &DocumentLayout,
) -> Result<Option<(String, Vec<String>)>, StoreError> {
    let mut existing = Vec::new();
    for candidate in layout.fragment_candidates(project) {
        let file_name = candidate.file_name();
        if file_name != layout.root_document && store.exists(&file_name)? {
            existing.push(file_name);
        }
    }

    if existing.is_empty() {
        return Ok(None);
    }
    let document = existing.remove(0);
    Ok(Some((document, existing)))
}

/// Pending fragments for every known project, in project-set order.
///
/// Read-only. Callers must not rely on the order for correctness.
pub fn locate_fragments<'p, S: DocumentStore + ?Sized>(
    store: &S,
    projects: &'p ProjectSet,
    layout: &DocumentLayout,
) -> Result<Vec<PendingFragment<'p>>, StoreError> {
    let mut pending = Vec::new();
    for project in projects.iter() {
        if let Some((document, stale)) = fragment_documents(store, project, layout)? {
            pending.push(PendingFragment {
                project,
                document,
                stale,
            });
        }
    }
    Ok(pending)
}
