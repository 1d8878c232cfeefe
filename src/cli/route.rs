//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::aggregate::{AggregationReport, Aggregator};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_reports_json, format_reports_text, format_status_json, format_status_text,
    format_tree_json, format_tree_text,
};
use crate::config::{ConfigLoader, GraftConfig};
use crate::error::AggregateError;
use crate::project::manifest::ProjectManifest;
use crate::project::ProjectSet;
use crate::status::collect_status;
use crate::store::{DocumentLayout, DocumentStore, FsDocumentStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, resolved working directory, and layout.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    work_dir: PathBuf,
    config: GraftConfig,
}

impl RunContext {
    /// Create run context from workspace root, an optional working directory
    /// override and an optional config path.
    pub fn new(
        workspace_root: PathBuf,
        work_dir: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, AggregateError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(dir) = work_dir {
            config.store.work_dir = dir;
        }
        config.validate().map_err(AggregateError::ConfigError)?;

        let work_dir = config.store.resolve_work_dir(&workspace_root);
        debug!(work_dir = %work_dir.display(), "Resolved working directory");

        Ok(Self {
            workspace_root,
            work_dir,
            config,
        })
    }

    pub fn config(&self) -> &GraftConfig {
        &self.config
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn layout(&self) -> DocumentLayout {
        self.config.store.layout()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, AggregateError> {
        match command {
            Commands::Aggregate {
                manifest,
                until_stable,
                dry_run,
                format,
            } => self.handle_aggregate(manifest, *until_stable, *dry_run, format),
            Commands::Status { manifest, format } => {
                self.handle_status(manifest.as_deref(), format)
            }
            Commands::Tree { format } => self.handle_tree(format),
        }
    }

    fn handle_aggregate(
        &self,
        manifest: &Path,
        until_stable: bool,
        dry_run: bool,
        format: &str,
    ) -> Result<String, AggregateError> {
        let projects = self.load_projects(manifest)?;
        let mut store = FsDocumentStore::open(&self.work_dir)?;
        let aggregator = Aggregator::new(&projects, self.layout());

        let reports = if dry_run {
            vec![aggregator.plan(&mut store)?]
        } else if until_stable {
            aggregator.aggregate_until_stable(&mut store)?
        } else {
            vec![aggregator.aggregate(&mut store)?]
        };
        info!(
            passes = reports.len(),
            dry_run,
            "Aggregate command finished"
        );

        match format {
            "json" => format_reports_json(&reports),
            _ => Ok(format_reports_text(&reports)),
        }
    }

    fn handle_status(
        &self,
        manifest: Option<&Path>,
        format: &str,
    ) -> Result<String, AggregateError> {
        let mut store = FsDocumentStore::open(&self.work_dir)?;
        let layout = self.layout();
        let status = collect_status(&store, self.work_dir.clone(), &layout)?;

        let plan: Option<AggregationReport> = match manifest {
            Some(path) => {
                let projects = self.load_projects(path)?;
                Some(Aggregator::new(&projects, layout).plan(&mut store)?)
            }
            None => None,
        };

        match format {
            "json" => format_status_json(&status, plan.as_ref()),
            _ => Ok(format_status_text(&status, plan.as_ref())),
        }
    }

    fn handle_tree(&self, format: &str) -> Result<String, AggregateError> {
        let store = FsDocumentStore::open(&self.work_dir)?;
        let root = store
            .read_module(&self.config.store.root_document)?
            .ok_or_else(|| AggregateError::RootMissing(self.work_dir.clone()))?;

        match format {
            "json" => format_tree_json(&root),
            _ => Ok(format_tree_text(&root)),
        }
    }

    fn load_projects(&self, manifest: &Path) -> Result<ProjectSet, AggregateError> {
        let path = if manifest.is_absolute() {
            manifest.to_path_buf()
        } else {
            self.workspace_root.join(manifest)
        };
        ProjectManifest::load(&path)?.into_project_set()
    }
}
