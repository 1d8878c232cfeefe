//! Graft: Report Fragment Aggregation
//!
//! Each project of a multi-project build writes its own module report as a
//! fragment. Graft folds those fragments into their declaring parents until a
//! single module tree remains under the top-level project.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod status;
pub mod store;
pub mod tree;
