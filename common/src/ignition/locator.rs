use serde_json::Value;

use crate::ignition::document::IgnitionDocument;

/// How a patcher identifies file entries inside `storage.files`.
///
/// Entries carry no stable identifier, so they are matched on their `path`
/// field. The predicate is a named policy rather than a bare closure so a
/// caller can move from substring matching to exact paths without touching
/// the scan itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPredicate {
    /// The path contains the marker anywhere.
    Contains(String),
    /// The path equals the value exactly.
    Exact(String),
}

impl PathPredicate {
    pub fn contains(marker: impl Into<String>) -> PathPredicate {
        PathPredicate::Contains(marker.into())
    }

    pub fn exact(path: impl Into<String>) -> PathPredicate {
        PathPredicate::Exact(path.into())
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPredicate::Contains(marker) => path.contains(marker.as_str()),
            PathPredicate::Exact(expected) => path == expected,
        }
    }
}

/// Indices of every file entry whose path matches, in document order.
///
/// The returned snapshot is detached from the tree, so entries can be
/// removed (or rewritten) while walking it without skipping or duplicating
/// elements. Entries without a string `path` never match.
pub fn find_files(doc: &IgnitionDocument, predicate: &PathPredicate) -> Vec<usize> {
    doc.files()
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            entry
                .get("path")
                .and_then(Value::as_str)
                .is_some_and(|path| predicate.matches(path))
        })
        .map(|(index, _)| index)
        .collect()
}
