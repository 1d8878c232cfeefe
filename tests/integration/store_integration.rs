//! Integration tests for the Document Store

use graft::aggregate::Aggregator;
use graft::error::StoreError;
use graft::project::{Project, ProjectSet};
use graft::store::{DocumentLayout, DocumentStore, FsDocumentStore, StagedStore};
use graft::tree::{search, Module};
use std::fs;
use std::io::{Error, ErrorKind};
use tempfile::TempDir;

/// Filesystem store whose delete of one document fails, as if the process died
/// partway through a commit.
struct FailingDelete {
    inner: FsDocumentStore,
    fail_on: String,
}

impl DocumentStore for FailingDelete {
    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        self.inner.exists(name)
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.read(name)
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.inner.write(name, bytes)
    }

    fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        if name == self.fail_on {
            return Err(StoreError::IoError(Error::new(
                ErrorKind::PermissionDenied,
                format!("cannot delete {}", name),
            )));
        }
        self.inner.delete(name)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list()
    }
}

/// root -> zparent -> achild; the child's fragment sorts before the parent's.
fn nested_projects() -> ProjectSet {
    ProjectSet::new(vec![
        Project::new("org.acme:root", "root").with_modules(["zparent"]),
        Project::new("org.acme:zparent", "zparent").with_modules(["achild"]),
        Project::new("org.acme:achild", "achild"),
    ])
    .unwrap()
}

fn write_reports(store: &mut FsDocumentStore, projects: &ProjectSet, layout: &DocumentLayout) {
    store
        .write_module(&layout.root_document, &Module::new("org.acme:root"))
        .unwrap();
    for project in projects.iter().skip(1) {
        store
            .write_module(
                &layout.fragment_file_name(project),
                &Module::new(project.module_name()),
            )
            .unwrap();
    }
}

#[test]
fn test_open_missing_work_dir() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("reports");

    let err = FsDocumentStore::open(&missing).err().unwrap();
    assert!(matches!(err, StoreError::MissingWorkDir(path) if path == missing));
}

#[test]
fn test_create_then_write_module() {
    let temp_dir = TempDir::new().unwrap();
    let work_dir = temp_dir.path().join("nested").join("reports");
    let mut store = FsDocumentStore::create(&work_dir).unwrap();

    let module = Module::new("org.acme:root").with_version("1.0");
    store.write_module("module.json", &module).unwrap();

    let raw = fs::read_to_string(work_dir.join("module.json")).unwrap();
    assert!(raw.contains("\"org.acme:root\""));
    assert_eq!(store.read_module("module.json").unwrap(), Some(module));
}

#[test]
fn test_write_leaves_no_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();

    store.write("module.json", b"{\"name\":\"a\"}").unwrap();
    store.write("module.json", b"{\"name\":\"b\"}").unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["module.json".to_string()]);
}

#[test]
fn test_list_skips_hidden_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    let store = FsDocumentStore::open(temp_dir.path()).unwrap();

    fs::write(temp_dir.path().join("b-module.json"), "{}").unwrap();
    fs::write(temp_dir.path().join("a-module.json"), "{}").unwrap();
    fs::write(temp_dir.path().join(".module.json.tmp"), "{}").unwrap();
    fs::create_dir(temp_dir.path().join("sub")).unwrap();

    assert_eq!(
        store.list().unwrap(),
        vec!["a-module.json".to_string(), "b-module.json".to_string()]
    );
}

#[test]
fn test_rejects_names_outside_work_dir() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();

    for name in ["../escape.json", "sub/doc.json", ".hidden", ""] {
        assert!(matches!(
            store.write(name, b"{}"),
            Err(StoreError::InvalidName(_))
        ));
    }
}

#[test]
fn test_malformed_document_reports_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();
    store.write("module.json", b"[1, 2").unwrap();

    match store.read_module("module.json") {
        Err(StoreError::Format { name, .. }) => assert_eq!(name, "module.json"),
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_staged_changes_reach_disk_only_on_commit() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();
    store.write("a-module.json", b"{}").unwrap();

    let mut staged = StagedStore::new(&mut store);
    staged.write("module.json", b"{\"name\":\"root\"}").unwrap();
    assert!(staged.delete("a-module.json").unwrap());
    assert!(!temp_dir.path().join("module.json").exists());
    assert!(temp_dir.path().join("a-module.json").exists());

    let summary = staged.commit().unwrap();
    assert_eq!(summary.written, vec!["module.json".to_string()]);
    assert_eq!(summary.deleted, vec!["a-module.json".to_string()]);
    assert_eq!(store.list().unwrap(), vec!["module.json".to_string()]);
}

#[test]
fn test_dropped_overlay_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();
    store.write("a-module.json", b"{}").unwrap();

    {
        let mut staged = StagedStore::new(&mut store);
        staged.write("module.json", b"{}").unwrap();
        staged.delete("a-module.json").unwrap();
    }

    assert_eq!(store.list().unwrap(), vec!["a-module.json".to_string()]);
}

#[test]
fn test_interrupted_commit_recovers_same_tree() {
    let projects = nested_projects();
    let layout = DocumentLayout::default();
    let aggregator = Aggregator::new(&projects, layout.clone());

    let clean_dir = TempDir::new().unwrap();
    let mut clean = FsDocumentStore::open(clean_dir.path()).unwrap();
    write_reports(&mut clean, &projects, &layout);
    aggregator.aggregate(&mut clean).unwrap();
    let expected = clean.read_module(&layout.root_document).unwrap().unwrap();

    let crash_dir = TempDir::new().unwrap();
    let mut inner = FsDocumentStore::open(crash_dir.path()).unwrap();
    write_reports(&mut inner, &projects, &layout);
    let parent_doc = layout.fragment_file_name(projects.get("org.acme:zparent").unwrap());
    let child_doc = layout.fragment_file_name(projects.get("org.acme:achild").unwrap());
    let mut failing = FailingDelete {
        inner,
        fail_on: parent_doc.clone(),
    };

    assert!(aggregator.aggregate(&mut failing).is_err());
    // The root write and the child's delete landed; the parent's fragment did not go
    let mut store = failing.inner;
    assert!(!store.exists(&child_doc).unwrap());
    assert!(store.exists(&parent_doc).unwrap());

    let recovery = aggregator.aggregate(&mut store).unwrap();
    assert_eq!(recovery.merged(), 1);

    let root = store.read_module(&layout.root_document).unwrap().unwrap();
    assert!(search::contains(&root, "org.acme:achild"));
    assert_eq!(root, expected);
    assert_eq!(store.list().unwrap(), vec![layout.root_document.clone()]);
}
