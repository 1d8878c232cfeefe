//! Integration tests for CLI commands routed through RunContext

use graft::cli::{Commands, RunContext};
use graft::error::{AggregateError, StoreError};
use graft::project::{Project, ProjectSet};
use graft::store::{DocumentLayout, DocumentStore, FsDocumentStore};
use graft::tree::Module;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[projects]]
coordinate = "org.acme:root"
modules = ["modA"]

[[projects]]
coordinate = "org.acme:modA"
modules = ["libs/modB"]

[[projects]]
coordinate = "org.acme:modB"
"#;

struct Workspace {
    temp_dir: TempDir,
    context: RunContext,
}

impl Workspace {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cli-test.toml");
        std::fs::write(&config_path, "[store]\nwork_dir = \"reports\"\n").unwrap();
        std::fs::write(temp_dir.path().join("projects.toml"), MANIFEST).unwrap();

        let context =
            RunContext::new(temp_dir.path().to_path_buf(), None, Some(config_path)).unwrap();
        Self { temp_dir, context }
    }

    fn store(&self) -> FsDocumentStore {
        FsDocumentStore::create(self.context.work_dir()).unwrap()
    }

    /// Root report plus fragments for both child projects.
    fn write_reports(&self) {
        let mut store = self.store();
        store
            .write_module("module.json", &Module::new("org.acme:root"))
            .unwrap();
        let layout = DocumentLayout::default();
        let projects = ProjectSet::new(vec![
            Project::new("org.acme:modA", "modA"),
            Project::new("org.acme:modB", "modB"),
        ])
        .unwrap();
        for project in projects.iter() {
            store
                .write_module(
                    &layout.fragment_file_name(project),
                    &Module::new(project.module_name()),
                )
                .unwrap();
        }
    }

    fn aggregate(&self, dry_run: bool, until_stable: bool, format: &str) -> String {
        self.context
            .execute(&Commands::Aggregate {
                manifest: PathBuf::from("projects.toml"),
                until_stable,
                dry_run,
                format: format.to_string(),
            })
            .unwrap()
    }

    fn work_dir(&self) -> &Path {
        self.context.work_dir()
    }
}

#[test]
fn test_aggregate_then_tree() {
    let ws = Workspace::new();
    ws.write_reports();

    let out = ws.aggregate(false, false, "text");
    assert!(out.contains("Merged: 2"), "unexpected output: {}", out);

    let tree = ws
        .context
        .execute(&Commands::Tree {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(tree, "org.acme:root\n└─ org.acme:modA\n   └─ org.acme:modB");
    assert_eq!(ws.store().list().unwrap(), vec!["module.json".to_string()]);
}

#[test]
fn test_dry_run_leaves_reports_in_place() {
    let ws = Workspace::new();
    ws.write_reports();
    let before = ws.store().list().unwrap();

    let out = ws.aggregate(true, false, "json");
    let reports: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(reports[0]["committed"], false);
    assert_eq!(reports[0]["fragments"].as_array().unwrap().len(), 2);

    assert_eq!(ws.store().list().unwrap(), before);
}

#[test]
fn test_until_stable_reports_every_pass() {
    let ws = Workspace::new();
    ws.write_reports();

    let out = ws.aggregate(false, true, "json");
    let reports: serde_json::Value = serde_json::from_str(&out).unwrap();
    let passes = reports.as_array().unwrap();
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[1]["fragments"].as_array().unwrap().len(), 0);
}

#[test]
fn test_status_with_plan() {
    let ws = Workspace::new();
    ws.write_reports();

    let out = ws
        .context
        .execute(&Commands::Status {
            manifest: Some(PathBuf::from("projects.toml")),
            format: "json".to_string(),
        })
        .unwrap();
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["status"]["fragments"].as_array().unwrap().len(), 2);
    assert_eq!(status["status"]["root"]["name"], "org.acme:root");
    assert_eq!(status["plan"]["committed"], false);
    assert_eq!(ws.store().list().unwrap().len(), 3);
}

#[test]
fn test_missing_work_dir_is_reported() {
    let ws = Workspace::new();
    assert!(!ws.work_dir().exists());

    let err = ws
        .context
        .execute(&Commands::Status {
            manifest: None,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        AggregateError::Store(StoreError::MissingWorkDir(_))
    ));
    assert!(graft::cli::map_error(&err).contains("does not exist"));
}

#[test]
fn test_bad_manifest_is_reported() {
    let ws = Workspace::new();
    ws.store();
    std::fs::write(ws.temp_dir.path().join("broken.toml"), "[[projects]]\nmodules = 3\n").unwrap();

    let err = ws
        .context
        .execute(&Commands::Aggregate {
            manifest: PathBuf::from("broken.toml"),
            until_stable: false,
            dry_run: false,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, AggregateError::Manifest { .. }));
}
