//! Module Tree
//!
//! The merged dependency report: a tree of modules rooted at the top-level
//! project, plus depth-first lookup and structural digests over it.

pub mod hasher;
pub mod node;
pub mod search;

pub use node::{Dependency, Module};
