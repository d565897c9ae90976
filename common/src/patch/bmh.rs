use crate::ignition::codec;
use crate::ignition::document::IgnitionDocument;
use crate::ignition::locator::{self, PathPredicate};
use crate::inventory::InventoryPool;
use crate::manifest::HostManifest;
use crate::patch::annotation::build_status_annotation;
use crate::Error;

/// Path marker of embedded host-declaration manifests.
pub const HOST_MANIFEST_PATH_MARKER: &str = "openshift-cluster-api_hosts";

/// Correlates embedded host manifests with inventory hosts and writes a
/// hardware status annotation into each matched manifest.
///
/// For every located manifest: decode it, infer its role from the manifest
/// name, consume one matching host from the pool, replace the annotations
/// with the built hardware status and erase the BMC credentials reference,
/// then re-encode the manifest into its file entry. A manifest whose role
/// has no remaining inventory host is left untouched.
///
/// A decode failure aborts the whole operation; the caller must not persist
/// the document in that case. Persisting is the caller's job either way,
/// one whole-document write after all entries are processed.
///
/// Returns the number of entries that were rewritten.
pub fn annotate_host_manifests(
    doc: &mut IgnitionDocument,
    pool: &mut InventoryPool,
) -> Result<usize, Error> {
    let predicate = PathPredicate::contains(HOST_MANIFEST_PATH_MARKER);
    let mut patched = 0;

    for index in locator::find_files(doc, &predicate) {
        let source = doc.file_source(index).ok_or_else(|| {
            Error::MalformedEmbeddedResource("file entry has no contents source".to_string())
        })?;
        let mut manifest: HostManifest = codec::decode_embedded(source)?;

        let role = manifest.role();
        let Some(host) = pool.consume(role) else {
            tracing::debug!(
                "No unused {:?} inventory host for manifest '{}', leaving it unpatched",
                role,
                manifest.metadata.name
            );
            continue;
        };

        let annotations = build_status_annotation(&manifest.status, &host)?;
        // Host manifests must not carry live credentials into the bootstrap
        // artifact.
        manifest.spec.bmc.credentials_name.clear();
        manifest.metadata.annotations = Some(annotations);

        let source = codec::encode_embedded(&manifest)?;
        doc.set_file_source(index, source);
        patched += 1;
    }

    Ok(patched)
}
