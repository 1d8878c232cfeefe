//! Configuration System
//!
//! Layered configuration for the working directory layout and logging. Sources
//! are merged by [`ConfigLoader`]; values are validated before use.

use crate::logging::LoggingConfig;
use crate::store::{DocumentLayout, FragmentName, DEFAULT_ROOT_DOCUMENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::DEFAULT_WORK_DIR;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraftConfig {
    /// Working directory layout
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Working directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Working directory, relative to the workspace root unless absolute
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// File name of the root document
    #[serde(default = "default_root_document")]
    pub root_document: String,

    /// Also pick up fragments named after the project directory
    #[serde(default = "default_true")]
    pub legacy_fragment_names: bool,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORK_DIR)
}

fn default_root_document() -> String {
    DEFAULT_ROOT_DOCUMENT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            root_document: default_root_document(),
            legacy_fragment_names: default_true(),
        }
    }
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.work_dir.as_os_str().is_empty() {
            return Err("Working directory cannot be empty".to_string());
        }

        let root = self.root_document.as_str();
        if root.is_empty() || root.starts_with('.') || root.contains('/') || root.contains('\\') {
            return Err(format!(
                "Root document must be a plain file name, got {:?}",
                root
            ));
        }
        if FragmentName::parse(root).is_some() {
            return Err(format!(
                "Root document {:?} would be mistaken for a fragment file",
                root
            ));
        }

        Ok(())
    }

    /// Resolve the working directory against a workspace root.
    pub fn resolve_work_dir(&self, workspace_root: &Path) -> PathBuf {
        if self.work_dir.is_absolute() {
            self.work_dir.clone()
        } else {
            workspace_root.join(&self.work_dir)
        }
    }

    pub fn layout(&self) -> DocumentLayout {
        DocumentLayout {
            root_document: self.root_document.clone(),
            legacy_fragment_names: self.legacy_fragment_names,
        }
    }
}

impl GraftConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate().map_err(|e| format!("store: {}", e))
    }
}
