//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::store::DEFAULT_ROOT_DOCUMENT;

pub const DEFAULT_WORK_DIR: &str = ".graft";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("store.work_dir", DEFAULT_WORK_DIR)?
        .set_default("store.root_document", DEFAULT_ROOT_DOCUMENT)?
        .set_default("store.legacy_fragment_names", true)
}
