//! The merged tree does not depend on the order projects are listed or merged in

use graft::aggregate::Aggregator;
use graft::project::{Project, ProjectSet};
use graft::store::{DocumentLayout, DocumentStore, FsDocumentStore};
use graft::tree::hasher::module_digest_hex;
use graft::tree::{search, Module};
use proptest::prelude::*;
use tempfile::TempDir;

/// Parent index for every project after the top-level one.
fn hierarchy() -> impl Strategy<Value = Vec<usize>> {
    (1usize..8).prop_flat_map(|children| {
        (0..children)
            .map(|i| 0..=i)
            .collect::<Vec<_>>()
    })
}

fn build_projects(parents: &[usize]) -> Vec<Project> {
    let count = parents.len() + 1;
    let dir = |i: usize| format!("p{}", i);
    (0..count)
        .map(|i| {
            let modules: Vec<String> = parents
                .iter()
                .enumerate()
                .filter(|(_, parent)| **parent == i)
                .map(|(child, _)| dir(child + 1))
                .collect();
            Project::new(format!("org.acme:{}", dir(i)), dir(i)).with_modules(modules)
        })
        .collect()
}

/// Report every project, then aggregate to a fixed point. Returns the root tree.
fn aggregate_all(projects: Vec<Project>) -> (Module, Vec<String>) {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FsDocumentStore::open(temp_dir.path()).unwrap();
    let layout = DocumentLayout::default();
    let set = ProjectSet::new(projects).unwrap();

    store
        .write_module(&layout.root_document, &Module::new(set.top_level().module_name()))
        .unwrap();
    for project in set.iter().skip(1) {
        store
            .write_module(
                &layout.fragment_file_name(project),
                &Module::new(project.module_name()),
            )
            .unwrap();
    }

    let aggregator = Aggregator::new(&set, layout.clone());
    let reports = aggregator.aggregate_until_stable(&mut store).unwrap();
    assert!(reports.len() <= set.len() + 1);

    let root = store.read_module(&layout.root_document).unwrap().unwrap();
    (root, store.list().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_project_order_does_not_change_tree(
        (parents, order) in hierarchy().prop_flat_map(|parents| {
            let children: Vec<usize> = (1..=parents.len()).collect();
            (Just(parents), Just(children).prop_shuffle())
        })
    ) {
        let canonical = build_projects(&parents);

        let mut shuffled = vec![canonical[0].clone()];
        shuffled.extend(order.iter().map(|&i| canonical[i].clone()));

        let (expected, _) = aggregate_all(canonical.clone());
        let (actual, remaining) = aggregate_all(shuffled);

        prop_assert_eq!(module_digest_hex(&expected), module_digest_hex(&actual));
        prop_assert_eq!(remaining, vec!["module.json".to_string()]);
        prop_assert_eq!(actual.node_count(), canonical.len());
        for project in &canonical {
            prop_assert!(search::contains(&actual, project.module_name()));
        }
    }

    #[test]
    fn prop_sibling_insertion_order_does_not_change_digest(
        names in proptest::collection::btree_set("[a-z]{1,6}", 1..10)
            .prop_flat_map(|set| Just(set.into_iter().collect::<Vec<_>>()).prop_shuffle())
    ) {
        let mut shuffled = Module::new("root");
        for name in &names {
            shuffled.add_submodule(Module::new(name.clone()));
        }

        let mut sorted_names = names.clone();
        sorted_names.sort();
        let mut sorted = Module::new("root");
        for name in &sorted_names {
            sorted.add_submodule(Module::new(name.clone()));
        }

        prop_assert_eq!(module_digest_hex(&shuffled), module_digest_hex(&sorted));
    }
}
