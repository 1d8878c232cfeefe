//! Project manifest files
//!
//! The build driver describes its projects in a manifest, top-level project
//! first. TOML and JSON are both accepted, chosen by file extension:
//!
//! ```toml
//! [[projects]]
//! coordinate = "org.acme:root"
//! dir = "root"
//! modules = ["mod-a", "libs/mod-b"]
//! ```

use crate::error::AggregateError;
use crate::project::{Project, ProjectSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub coordinate: String,
    /// Defaults to the artifact part of the coordinate (text after the last `:`)
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub modules: Vec<String>,
}

impl ManifestEntry {
    fn into_project(self) -> Project {
        let dir = self.dir.unwrap_or_else(|| {
            self.coordinate
                .rsplit(':')
                .next()
                .unwrap_or(self.coordinate.as_str())
                .to_string()
        });
        Project {
            coordinate: self.coordinate,
            dir,
            modules: self.modules,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub projects: Vec<ManifestEntry>,
}

impl ProjectManifest {
    /// Load a manifest from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, AggregateError> {
        let manifest_error = |reason: String| AggregateError::Manifest {
            path: path.to_path_buf(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| manifest_error(e.to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&raw).map_err(|e| manifest_error(e.to_string())),
            Some("toml") | None => toml::from_str(&raw).map_err(|e| manifest_error(e.to_string())),
            Some(other) => Err(manifest_error(format!(
                "unsupported manifest extension '{}' (expected .toml or .json)",
                other
            ))),
        }
    }

    pub fn into_project_set(self) -> Result<ProjectSet, AggregateError> {
        ProjectSet::new(
            self.projects
                .into_iter()
                .map(ManifestEntry::into_project)
                .collect(),
        )
    }
}
