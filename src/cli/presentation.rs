//! CLI presentation: text and json formatters per command family.

mod aggregate;
mod status;
mod tree;

pub use aggregate::{format_reports_json, format_reports_text};
pub use status::{format_status_json, format_status_text};
pub use tree::{format_tree_json, format_tree_text};

use crate::error::AggregateError;
use serde::Serialize;

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AggregateError> {
    serde_json::to_string_pretty(value).map_err(|e| AggregateError::Render(e.to_string()))
}
