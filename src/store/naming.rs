//! Document naming
//!
//! Fragment file names are derived from a project identity and can be parsed
//! back into it:
//! - `fragment-{hex(coordinate)}.json` keyed by the project's coordinate
//! - `{dir}-module.json`, the legacy name keyed by directory name
//!
//! Hex keeps coordinates (which contain `:` and `.`) filesystem-safe and makes
//! distinct coordinates map to distinct names.

use crate::project::Project;
use std::fmt;

pub const DEFAULT_ROOT_DOCUMENT: &str = "module.json";

const FRAGMENT_PREFIX: &str = "fragment-";
const FRAGMENT_SUFFIX: &str = ".json";
const LEGACY_SUFFIX: &str = "-module.json";

/// Identity a fragment file is keyed by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FragmentName {
    Coordinate(String),
    Legacy(String),
}

impl FragmentName {
    pub fn file_name(&self) -> String {
        match self {
            FragmentName::Coordinate(coordinate) => format!(
                "{}{}{}",
                FRAGMENT_PREFIX,
                hex::encode(coordinate.as_bytes()),
                FRAGMENT_SUFFIX
            ),
            FragmentName::Legacy(dir) => format!("{}{}", dir, LEGACY_SUFFIX),
        }
    }

    /// Recover the identity from a fragment file name.
    ///
    /// Returns `None` for names that are not fragment files (the root document,
    /// temp files, unrelated files).
    pub fn parse(file_name: &str) -> Option<Self> {
        if let Some(encoded) = file_name
            .strip_prefix(FRAGMENT_PREFIX)
            .and_then(|rest| rest.strip_suffix(FRAGMENT_SUFFIX))
        {
            if let Some(coordinate) = hex::decode(encoded)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
            {
                return Some(FragmentName::Coordinate(coordinate));
            }
        }

        file_name
            .strip_suffix(LEGACY_SUFFIX)
            .filter(|dir| !dir.is_empty())
            .map(|dir| FragmentName::Legacy(dir.to_string()))
    }
}

impl fmt::Display for FragmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentName::Coordinate(coordinate) => write!(f, "{}", coordinate),
            FragmentName::Legacy(dir) => write!(f, "{} (legacy)", dir),
        }
    }
}

/// Names of the documents in a working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pub root_document: String,
    /// Also recognize `{dir}-module.json` fragments
    pub legacy_fragment_names: bool,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            root_document: DEFAULT_ROOT_DOCUMENT.to_string(),
            legacy_fragment_names: true,
        }
    }
}

impl DocumentLayout {
    /// Fragment names a project's report may be stored under, preferred first.
    pub fn fragment_candidates(&self, project: &Project) -> Vec<FragmentName> {
        let mut candidates = vec![FragmentName::Coordinate(project.coordinate.clone())];
        if self.legacy_fragment_names {
            candidates.push(FragmentName::Legacy(project.dir.clone()));
        }
        candidates
    }

    /// File name new fragments for `project` are written under.
    pub fn fragment_file_name(&self, project: &Project) -> String {
        FragmentName::Coordinate(project.coordinate.clone()).file_name()
    }
}
