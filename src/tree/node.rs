//! Module node definition

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dependency entry carried by a module report.
///
/// Opaque to aggregation; only preserved across rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// A node in the merged report tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Stable name derived from the owning project's coordinate
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Child modules, unique by name and kept in name order
    #[serde(default)]
    pub submodules: Vec<Module>,

    /// Fields written by the report generator that this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            dependencies: Vec::new(),
            submodules: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_submodule(mut self, child: Module) -> Self {
        self.add_submodule(child);
        self
    }

    /// Attach a child module.
    ///
    /// A sibling with the same name absorbs the child instead (see
    /// [`Module::absorb`]), so merging the same fragment twice leaves a single
    /// copy and never drops modules merged under it earlier. Siblings stay sorted
    /// by name, which makes the resulting tree independent of merge order.
    ///
    /// Returns `true` if a sibling with the same name already existed.
    pub fn add_submodule(&mut self, child: Module) -> bool {
        if let Some(existing) = self.submodules.iter_mut().find(|m| m.name == child.name) {
            existing.absorb(child);
            return true;
        }
        self.submodules.push(child);
        self.submodules.sort_by(|a, b| a.name.cmp(&b.name));
        false
    }

    /// Fold a newer report of the same module into this one.
    ///
    /// Version, dependencies and extra fields come from `incoming`. Submodules
    /// are merged by name: ones only present here are kept, shared ones are
    /// absorbed recursively.
    pub fn absorb(&mut self, incoming: Module) {
        let Module {
            name: _,
            version,
            dependencies,
            submodules,
            extra,
        } = incoming;

        self.version = version;
        self.dependencies = dependencies;
        self.extra = extra;
        for child in submodules {
            self.add_submodule(child);
        }
    }

    /// Direct child by name.
    pub fn submodule(&self, name: &str) -> Option<&Module> {
        self.submodules.iter().find(|m| m.name == name)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.submodules.iter().map(Module::node_count).sum::<usize>()
    }
}
