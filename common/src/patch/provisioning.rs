use crate::ignition::document::IgnitionDocument;
use crate::ignition::locator::{self, PathPredicate};

/// Path marker of the provisioning configuration shipped by the installer.
pub const PROVISIONING_CONFIG_MARKER: &str = "baremetal-provisioning-config";

/// Removes the first file entry carrying the provisioning config marker.
///
/// Returns true when an entry was removed, so the caller can leave an
/// untouched document unwritten. Once the entry is gone further calls are
/// no-ops.
pub fn remove_provisioning_config(doc: &mut IgnitionDocument) -> bool {
    let predicate = PathPredicate::contains(PROVISIONING_CONFIG_MARKER);

    match locator::find_files(doc, &predicate).first() {
        Some(&index) => doc.remove_file(index).is_some(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bootstrap_document() -> IgnitionDocument {
        IgnitionDocument::from_slice(
            json!({
                "ignition": {"version": "2.2.0"},
                "storage": {"files": [
                    {"path": "/etc/motd"},
                    {"path": "/opt/openshift/manifests/baremetal-provisioning-config.yaml"},
                    {"path": "/opt/openshift/manifests/cluster-config.yaml"},
                ]},
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn removes_the_marked_entry_and_preserves_the_rest() {
        let mut doc = bootstrap_document();

        assert!(remove_provisioning_config(&mut doc));

        assert_eq!(doc.files().len(), 2);
        assert_eq!(doc.file_path(0), Some("/etc/motd"));
        assert_eq!(
            doc.file_path(1),
            Some("/opt/openshift/manifests/cluster-config.yaml")
        );
    }

    #[test]
    fn removal_is_idempotent() {
        let mut doc = bootstrap_document();

        assert!(remove_provisioning_config(&mut doc));
        let after_first = doc.clone();

        assert!(!remove_provisioning_config(&mut doc));
        assert_eq!(doc, after_first);
    }

    #[test]
    fn only_the_first_match_is_removed() {
        let mut doc = IgnitionDocument::from_slice(
            json!({
                "storage": {"files": [
                    {"path": "/a/baremetal-provisioning-config.yaml"},
                    {"path": "/b/baremetal-provisioning-config.yaml"},
                ]},
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        assert!(remove_provisioning_config(&mut doc));

        assert_eq!(doc.files().len(), 1);
        assert_eq!(
            doc.file_path(0),
            Some("/b/baremetal-provisioning-config.yaml")
        );
    }

    #[test]
    fn documents_without_the_entry_are_untouched() {
        let mut doc = IgnitionDocument::from_slice(
            json!({"storage": {"files": [{"path": "/etc/motd"}]}})
                .to_string()
                .as_bytes(),
        )
        .unwrap();

        assert!(!remove_provisioning_config(&mut doc));
        assert_eq!(doc.files().len(), 1);
    }
}
