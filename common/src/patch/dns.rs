use crate::ignition::codec;
use crate::ignition::document::{FileEntry, IgnitionDocument};

/// Path of the synthesized hosts file entry.
pub const HOSTS_FILE_PATH: &str = "/etc/hosts";

// 0644
const HOSTS_FILE_MODE: i64 = 420;

/// Appends a static hosts entry mapping the cluster VIP to the internal DNS
/// name, so nodes resolve the API endpoint before cluster DNS is up.
///
/// The DNS name is taken from the document's own config-append source URL;
/// when the document has no such URL the injection is skipped. The
/// `storage.files` list is created when the document does not have one yet.
///
/// Running this twice appends a second entry. Nothing deduplicates by path
/// today; whether repeated runs should be idempotent is an open product
/// question.
///
/// Returns true when an entry was appended.
pub fn inject_dns_entry(doc: &mut IgnitionDocument, vip: &str) -> bool {
    let Some(host) = doc.append_source_host() else {
        tracing::warn!("Ignition document has no config-append source URL, skipping hosts entry");
        return false;
    };

    let content = format!("{vip}   {host}");

    doc.append_file(FileEntry {
        filesystem: "root".to_string(),
        path: HOSTS_FILE_PATH.to_string(),
        mode: HOSTS_FILE_MODE,
        source: codec::encode_payload(content.as_bytes()),
    });

    true
}
