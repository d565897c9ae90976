use serde_json::{json, Map, Value};

use crate::Error;

/// A parsed ignition config.
///
/// The document is held as an owned JSON tree and mutated in place; file
/// entries are addressed by their index in `storage.files` rather than by
/// references into the tree, so patchers never alias each other.
///
/// The whole document is read from disk, patched in memory and written back
/// in one piece. There is no partial persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnitionDocument {
    root: Map<String, Value>,
}

/// A file entry synthesized by a patcher and appended to `storage.files`.
///
/// Only patchers create these; existing entries are rewritten in place
/// through [`IgnitionDocument::set_file_source`]. The verification object is
/// always empty, synthesized entries carry no hash.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub filesystem: String,
    pub path: String,
    pub mode: i64,
    pub source: String,
}

impl From<FileEntry> for Value {
    fn from(entry: FileEntry) -> Value {
        json!({
            "filesystem": entry.filesystem,
            "path": entry.path,
            "contents": {
                "source": entry.source,
                "verification": {},
            },
            "mode": entry.mode,
        })
    }
}

impl IgnitionDocument {
    /// Parses a whole ignition document.
    pub fn from_slice(bytes: &[u8]) -> Result<IgnitionDocument, Error> {
        let root: Value = serde_json::from_slice(bytes).map_err(Error::MalformedIgnition)?;

        match root {
            Value::Object(root) => Ok(IgnitionDocument { root }),
            _ => Err(Error::IgnitionRootNotObject),
        }
    }

    /// Serializes the whole document for the single write back to disk.
    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&self.root).map_err(Error::MalformedIgnition)
    }

    /// The `storage.files` sequence, or an empty slice when it is absent.
    pub fn files(&self) -> &[Value] {
        self.root
            .get("storage")
            .and_then(|storage| storage.get("files"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `path` of the file entry at `index`.
    pub fn file_path(&self, index: usize) -> Option<&str> {
        self.files().get(index)?.get("path")?.as_str()
    }

    /// The `contents.source` of the file entry at `index`.
    pub fn file_source(&self, index: usize) -> Option<&str> {
        self.files()
            .get(index)?
            .get("contents")?
            .get("source")?
            .as_str()
    }

    /// Replaces the `contents.source` of the file entry at `index`. Returns
    /// false when the entry or its source slot does not exist.
    pub fn set_file_source(&mut self, index: usize, source: String) -> bool {
        let Some(slot) = self
            .files_mut()
            .and_then(|files| files.get_mut(index))
            .and_then(|entry| entry.get_mut("contents"))
            .and_then(|contents| contents.get_mut("source"))
        else {
            return false;
        };

        *slot = Value::String(source);
        true
    }

    /// Removes and returns the file entry at `index`.
    pub fn remove_file(&mut self, index: usize) -> Option<Value> {
        let files = self.files_mut()?;

        (index < files.len()).then(|| files.remove(index))
    }

    /// Appends a synthesized file entry, creating `storage.files` when the
    /// document does not have it yet.
    pub fn append_file(&mut self, entry: FileEntry) {
        let storage = object_entry(&mut self.root, "storage");
        array_entry(storage, "files").push(entry.into());
    }

    /// DNS name baked into the document's own config-append source URL. For
    /// `https://api-int.example.com:22623/config/master` this is
    /// `api-int.example.com`.
    pub fn append_source_host(&self) -> Option<&str> {
        let source = self
            .root
            .get("ignition")?
            .get("config")?
            .get("append")?
            .get(0)?
            .get("source")?
            .as_str()?;

        let after_scheme = source.split_once("//")?.1;
        after_scheme.split(':').next()
    }

    fn files_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.root
            .get_mut("storage")?
            .get_mut("files")?
            .as_array_mut()
    }
}

fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    if !matches!(map.get(key), Some(Value::Object(_))) {
        map.insert(key.to_string(), Value::Object(Map::new()));
    }

    match map.get_mut(key) {
        Some(Value::Object(inner)) => inner,
        _ => unreachable!("normalized to an object above"),
    }
}

fn array_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    if !matches!(map.get(key), Some(Value::Array(_))) {
        map.insert(key.to_string(), Value::Array(Vec::new()));
    }

    match map.get_mut(key) {
        Some(Value::Array(inner)) => inner,
        _ => unreachable!("normalized to an array above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(value: Value) -> IgnitionDocument {
        IgnitionDocument::from_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn rejects_non_object_roots() {
        let result = IgnitionDocument::from_slice(b"[1, 2, 3]");

        assert!(matches!(result, Err(Error::IgnitionRootNotObject)));
    }

    #[test]
    fn rejects_unparseable_documents() {
        let result = IgnitionDocument::from_slice(b"{ oops");

        assert!(matches!(result, Err(Error::MalformedIgnition(_))));
    }

    #[test]
    fn files_is_empty_when_storage_has_no_file_list() {
        let doc = document(json!({"storage": {}}));

        assert!(doc.files().is_empty());
    }

    #[test]
    fn append_creates_the_file_list_on_demand() {
        let mut doc = document(json!({"ignition": {"version": "2.2.0"}, "storage": {}}));

        doc.append_file(FileEntry {
            filesystem: "root".to_string(),
            path: "/etc/motd".to_string(),
            mode: 420,
            source: "data:,hello".to_string(),
        });

        assert_eq!(doc.files().len(), 1);
        assert_eq!(doc.file_path(0), Some("/etc/motd"));
    }

    #[test]
    fn set_file_source_rewrites_in_place() {
        let mut doc = document(json!({
            "storage": {"files": [
                {"path": "/a", "contents": {"source": "data:,old", "verification": {}}},
            ]},
        }));

        assert!(doc.set_file_source(0, "data:,new".to_string()));
        assert_eq!(doc.file_source(0), Some("data:,new"));

        assert!(!doc.set_file_source(7, "data:,nope".to_string()));
    }

    #[test]
    fn append_source_host_takes_the_host_between_scheme_and_port() {
        let doc = document(json!({
            "ignition": {"config": {"append": [
                {"source": "https://api-int.example.com:22623/config/master"},
            ]}},
        }));

        assert_eq!(doc.append_source_host(), Some("api-int.example.com"));
    }

    #[test]
    fn append_source_host_is_none_without_a_config_append() {
        let doc = document(json!({"storage": {"files": []}}));

        assert_eq!(doc.append_source_host(), None);
    }

    #[test]
    fn whole_document_round_trip_preserves_unrelated_fields() {
        let original = json!({
            "ignition": {"version": "2.2.0"},
            "passwd": {"users": [{"name": "core"}]},
            "storage": {"files": []},
        });
        let doc = document(original.clone());

        let written: Value = serde_json::from_slice(&doc.to_vec().unwrap()).unwrap();

        assert_eq!(written, original);
    }
}
