//! Aggregation pass formatters.

use super::to_pretty_json;
use crate::aggregate::{AggregationReport, FragmentOutcome};
use crate::error::AggregateError;

pub fn format_reports_text(reports: &[AggregationReport]) -> String {
    let mut sections = Vec::with_capacity(reports.len());

    for (index, report) in reports.iter().enumerate() {
        let mut s = if reports.len() > 1 {
            format!("Pass {}", index + 1)
        } else if report.committed {
            "Aggregation pass".to_string()
        } else {
            "Aggregation plan (dry run)".to_string()
        };
        s.push_str(&format!(
            ":\n  Pending: {}\n  Merged: {}\n  Deferred: {}",
            report.fragments.len(),
            report.merged(),
            report.deferred()
        ));

        for fragment in &report.fragments {
            let line = match &fragment.outcome {
                FragmentOutcome::MergedIntoFragment { parent, .. } => {
                    format!("merged into pending fragment of {}", parent)
                }
                FragmentOutcome::MergedIntoRoot { parent } => {
                    format!("merged into {} in the root document", parent)
                }
                FragmentOutcome::ParentPending { parent } => {
                    format!("waiting for {} to report", parent)
                }
                FragmentOutcome::NoParent => "no declaring parent".to_string(),
            };
            s.push_str(&format!("\n  - {}: {}", fragment.project, line));
        }

        if let Some(digest) = &report.root_digest {
            s.push_str(&format!("\n  Root digest: {}", digest));
        }
        sections.push(s);
    }

    if sections.is_empty() {
        return "Nothing to aggregate.".to_string();
    }
    sections.join("\n\n")
}

pub fn format_reports_json(reports: &[AggregationReport]) -> Result<String, AggregateError> {
    to_pretty_json(reports)
}
