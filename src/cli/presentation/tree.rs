//! Module tree formatters.

use super::to_pretty_json;
use crate::error::AggregateError;
use crate::tree::Module;

/// Indented outline, one module per line.
pub fn format_tree_text(root: &Module) -> String {
    let mut lines = Vec::with_capacity(root.node_count());
    push_lines(root, 0, &mut lines);
    lines.join("\n")
}

fn push_lines(module: &Module, depth: usize, lines: &mut Vec<String>) {
    let version = module
        .version
        .as_deref()
        .map(|v| format!(" {}", v))
        .unwrap_or_default();
    let marker = if depth == 0 { "" } else { "└─ " };
    lines.push(format!(
        "{}{}{}{}",
        "   ".repeat(depth.saturating_sub(1)),
        marker,
        module.name,
        version
    ));
    for child in &module.submodules {
        push_lines(child, depth + 1, lines);
    }
}

pub fn format_tree_json(root: &Module) -> Result<String, AggregateError> {
    to_pretty_json(root)
}
