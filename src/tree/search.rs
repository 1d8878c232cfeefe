//! Depth-first lookup of modules by name
//!
//! All lookups share one pre-order traversal: the root is checked first, then
//! each child subtree in stored order, and the first match wins.

use crate::tree::Module;

/// Index path from a root to one of its descendants (empty = the root itself).
pub type ModulePath = Vec<usize>;

/// Find the first module named `name` in the subtree rooted at `root`.
pub fn find<'a>(root: &'a Module, name: &str) -> Option<&'a Module> {
    if root.name == name {
        return Some(root);
    }
    root.submodules.iter().find_map(|child| find(child, name))
}

/// Whether the subtree rooted at `root` contains a module named `name`.
pub fn contains(root: &Module, name: &str) -> bool {
    find(root, name).is_some()
}

/// Locate a module and return the index path that reaches it.
pub fn find_path(root: &Module, name: &str) -> Option<ModulePath> {
    let mut path = Vec::new();
    if locate(root, name, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn locate(node: &Module, name: &str, path: &mut ModulePath) -> bool {
    if node.name == name {
        return true;
    }
    for (index, child) in node.submodules.iter().enumerate() {
        path.push(index);
        if locate(child, name, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Follow an index path to a mutable node.
///
/// Returns `None` if any index is out of bounds.
pub fn resolve_mut<'a>(root: &'a mut Module, path: &[usize]) -> Option<&'a mut Module> {
    let mut node = root;
    for &index in path {
        node = node.submodules.get_mut(index)?;
    }
    Some(node)
}

/// Find the first module named `name` for mutation.
pub fn find_mut<'a>(root: &'a mut Module, name: &str) -> Option<&'a mut Module> {
    let path = find_path(root, name)?;
    resolve_mut(root, &path)
}
