//! Normalization and matching of declared child-module paths

use unicode_normalization::UnicodeNormalization;

/// Normalize a declared module path for comparison (without filesystem access)
///
/// This function:
/// 1. Normalizes Unicode to NFC
/// 2. Treats `\` and `/` as the same separator
/// 3. Removes leading `./` segments
/// 4. Removes trailing separators
pub fn normalize_module_path(path: &str) -> String {
    let normalized: String = path.nfc().collect();
    let mut result = normalized.replace('\\', "/");

    while let Some(rest) = result.strip_prefix("./") {
        result = rest.to_string();
    }

    while result.len() > 1 && result.ends_with('/') {
        result.pop();
    }

    result
}

/// Whether a declared module entry refers to the child directory `child`.
///
/// Matches either the bare name (`"child"`) or a path ending in it
/// (`"group/child"`).
pub fn declares_child(entry: &str, child: &str) -> bool {
    let entry = normalize_module_path(entry);
    let child = normalize_module_path(child);

    if child.is_empty() {
        return false;
    }

    entry == child
        || entry
            .strip_suffix(child.as_str())
            .map_or(false, |prefix| prefix.ends_with('/'))
}
