use std::fs;
use std::path::Path;

use anyhow::Context;
use common::ignition::document::IgnitionDocument;
use common::inventory::InventoryPool;
use common::patch::{bmh, dns, provisioning};

/// The bootstrap ignition config, the one carrying the embedded manifests.
pub const BOOTSTRAP_IGNITION: &str = "bootstrap.ign";

/// The per-role node ignition configs the DNS entry goes into.
pub const NODE_IGNITIONS: [&str; 2] = ["master.ign", "worker.ign"];

/// Strips the provisioning config entry from the bootstrap ignition.
///
/// The file is read fully, patched in memory and written back once; when no
/// entry matches the file is left byte-for-byte unwritten.
pub fn remove_provisioning(path: &Path) -> anyhow::Result<()> {
    let mut doc = read_document(path)?;

    if provisioning::remove_provisioning_config(&mut doc) {
        write_document(path, &doc)?;
        tracing::info!("Removed provisioning config from {}", path.display());
    } else {
        tracing::info!("No provisioning config in {}", path.display());
    }

    Ok(())
}

/// Annotates the embedded host manifests of the bootstrap ignition from the
/// inventory pool.
///
/// The pool handle is shared across every artifact of a run so a host never
/// annotates more than one manifest. Any decode failure aborts before the
/// single write back.
pub fn annotate_hosts(path: &Path, pool: &mut InventoryPool) -> anyhow::Result<()> {
    let mut doc = read_document(path)?;

    let patched = bmh::annotate_host_manifests(&mut doc, pool)?;
    write_document(path, &doc)?;

    tracing::info!(
        "Annotated {patched} host manifest(s) in {}, {} inventory host(s) left",
        path.display(),
        pool.len()
    );

    Ok(())
}

/// Adds the VIP hosts entry to a node ignition config.
pub fn inject_dns(path: &Path, vip: &str) -> anyhow::Result<()> {
    let mut doc = read_document(path)?;

    if dns::inject_dns_entry(&mut doc, vip) {
        write_document(path, &doc)?;
        tracing::info!("Added hosts entry for {vip} to {}", path.display());
    }

    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<IgnitionDocument> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    IgnitionDocument::from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn write_document(path: &Path, doc: &IgnitionDocument) -> anyhow::Result<()> {
    fs::write(path, doc.to_vec()?)
        .with_context(|| format!("failed to write {}", path.display()))
}
