//! Working directory status formatters.

use super::to_pretty_json;
use crate::aggregate::AggregationReport;
use crate::error::AggregateError;
use crate::status::WorkDirStatus;
use serde_json::json;

pub fn format_status_text(status: &WorkDirStatus, plan: Option<&AggregationReport>) -> String {
    let mut s = format!("Working directory: {}", status.work_dir.display());

    match &status.root {
        Some(root) => s.push_str(&format!(
            "\n  Root document: {} ({} modules, root {})\n  Root digest: {}",
            root.document, root.modules, root.name, root.digest
        )),
        None => s.push_str("\n  Root document: not written yet"),
    }

    if status.fragments.is_empty() {
        s.push_str("\n  Pending fragments: none");
    } else {
        s.push_str(&format!("\n  Pending fragments ({}):", status.fragments.len()));
        for fragment in &status.fragments {
            let legacy = if fragment.legacy { " [legacy name]" } else { "" };
            s.push_str(&format!(
                "\n    - {} ({}){}",
                fragment.identity, fragment.document, legacy
            ));
        }
    }

    if !status.other.is_empty() {
        s.push_str(&format!("\n  Other files: {}", status.other.join(", ")));
    }

    if let Some(plan) = plan {
        s.push_str(&format!(
            "\n  Next pass would merge {} and defer {}",
            plan.merged(),
            plan.deferred()
        ));
    }

    s
}

pub fn format_status_json(
    status: &WorkDirStatus,
    plan: Option<&AggregationReport>,
) -> Result<String, AggregateError> {
    to_pretty_json(&json!({
        "status": status,
        "plan": plan,
    }))
}
