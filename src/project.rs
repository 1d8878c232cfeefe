//! Project references supplied by the build driver
//!
//! A project is identified by its fully qualified coordinate. Its directory name
//! is what parent projects list in their declared child modules, and what legacy
//! fragment files were named after.

pub mod manifest;
pub mod path;

pub use manifest::ProjectManifest;

use crate::error::AggregateError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A project in the multi-project build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Fully qualified build coordinate, e.g. `org.acme:mod-a`
    pub coordinate: String,
    /// Directory name of the project
    pub dir: String,
    /// Declared child projects as relative paths
    #[serde(default)]
    pub modules: Vec<String>,
}

impl Project {
    pub fn new(coordinate: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            coordinate: coordinate.into(),
            dir: dir.into(),
            modules: Vec::new(),
        }
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the module node this project's report produces.
    pub fn module_name(&self) -> &str {
        &self.coordinate
    }

    /// Whether this project declares `child` among its modules.
    pub fn declares(&self, child: &Project) -> bool {
        self.modules
            .iter()
            .any(|entry| path::declares_child(entry, &child.dir))
    }
}

/// The known projects of one build, in driver order
///
/// The first project is the top-level project.
#[derive(Debug, Clone)]
pub struct ProjectSet {
    projects: Vec<Project>,
}

impl ProjectSet {
    /// Build a project set, rejecting empty sets, blank identities and
    /// duplicate coordinates.
    pub fn new(projects: Vec<Project>) -> Result<Self, AggregateError> {
        if projects.is_empty() {
            return Err(AggregateError::EmptyProjectSet);
        }

        let mut seen = HashSet::new();
        for project in &projects {
            if project.coordinate.trim().is_empty() || project.dir.trim().is_empty() {
                return Err(AggregateError::InvalidProject(format!(
                    "coordinate and dir must be non-empty (got coordinate {:?}, dir {:?})",
                    project.coordinate, project.dir
                )));
            }
            if !seen.insert(project.coordinate.as_str()) {
                return Err(AggregateError::DuplicateProject(project.coordinate.clone()));
            }
        }

        Ok(Self { projects })
    }

    pub fn top_level(&self) -> &Project {
        &self.projects[0]
    }

    pub fn is_top_level(&self, project: &Project) -> bool {
        self.top_level().coordinate == project.coordinate
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, coordinate: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.coordinate == coordinate)
    }

    /// Resolve the project that declares `child` as one of its modules.
    ///
    /// Scans projects in driver order and returns the first declaring project.
    /// A project is never its own parent; the top-level project normally has none.
    pub fn parent_of(&self, child: &Project) -> Option<&Project> {
        self.projects
            .iter()
            .filter(|candidate| candidate.coordinate != child.coordinate)
            .find(|candidate| candidate.declares(child))
    }
}
