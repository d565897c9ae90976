use serde::{Deserialize, Serialize};

use crate::Error;

/// Marker inside a manifest name that identifies a control-plane host.
pub const MASTER_NAME_MARKER: &str = "-master-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostRole {
    Master,
    Worker,
}

impl HostRole {
    /// Infers the role of a host manifest from its name. Anything without
    /// the master marker is treated as a worker.
    pub fn infer_from_name(name: &str) -> HostRole {
        if name.contains(MASTER_NAME_MARKER) {
            HostRole::Master
        } else {
            HostRole::Worker
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nic {
    pub name: String,
    pub mac: String,
    #[serde(rename = "ipAddr")]
    pub ip_addr: String,
    pub speed: i64,
}

/// A discovered host record, as delivered by the inventory payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryHost {
    pub role: HostRole,
    pub hostname: String,
    #[serde(default)]
    pub nics: Vec<Nic>,
}

/// The pool of discovered hosts available for annotation.
///
/// The pool is consumable: each host satisfies at most one manifest match
/// per run, and a match removes the host in the same call. Runs that patch
/// several artifacts from one inventory must thread a single pool handle
/// through every patch so consumption is shared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryPool {
    hosts: Vec<InventoryHost>,
}

impl InventoryPool {
    pub fn new(hosts: Vec<InventoryHost>) -> InventoryPool {
        InventoryPool { hosts }
    }

    /// Parses an inventory payload, a YAML document with a top-level
    /// `hosts` list.
    pub fn from_yaml(payload: &str) -> Result<InventoryPool, Error> {
        serde_yaml::from_str(payload).map_err(Error::MalformedInventory)
    }

    /// Takes the first remaining host with the requested role out of the
    /// pool. `None` means "nothing left to annotate" and is not an error;
    /// the caller must leave its manifest unmodified.
    ///
    /// First-fit in pool order, so a fixed pool and request sequence always
    /// produce the same matches.
    pub fn consume(&mut self, role: HostRole) -> Option<InventoryHost> {
        let index = self.hosts.iter().position(|host| host.role == role)?;

        Some(self.hosts.remove(index))
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVENTORY_YAML: &str = r#"
hosts:
- role: master
  hostname: test-bmh1-master-0.example.com
  nics:
  - name: eth0
    mac: 52:54:00:4e:ea:7b
    ipAddr: 192.168.126.10
    speed: -1
  - name: eth1
    mac: 52:54:00:4e:19:64
    ipAddr: 192.168.140.220
    speed: -1
- role: master
  hostname: test-bmh1-master-1.example.com
  nics:
  - name: eth0
    mac: 52:54:00:c2:de:42
    ipAddr: 192.168.126.11
    speed: -1
- role: worker
  hostname: test-bmh1-worker-0.example.com
  nics:
  - name: eth0
    mac: 52:54:00:2e:c4:dd
    ipAddr: 192.168.126.12
    speed: -1
"#;

    #[test]
    fn parses_the_inventory_payload() {
        let pool = InventoryPool::from_yaml(INVENTORY_YAML).unwrap();

        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn rejects_payloads_without_a_host_list() {
        let result = InventoryPool::from_yaml("nodes: []");

        assert!(matches!(result, Err(Error::MalformedInventory(_))));
    }

    #[test]
    fn consume_is_first_fit_in_pool_order() {
        let mut pool = InventoryPool::from_yaml(INVENTORY_YAML).unwrap();

        let first = pool.consume(HostRole::Master).unwrap();
        let second = pool.consume(HostRole::Master).unwrap();

        assert_eq!(first.hostname, "test-bmh1-master-0.example.com");
        assert_eq!(second.hostname, "test-bmh1-master-1.example.com");
    }

    #[test]
    fn consume_never_returns_a_host_twice() {
        let mut pool = InventoryPool::from_yaml(INVENTORY_YAML).unwrap();

        let mut hostnames = Vec::new();
        while let Some(host) = pool.consume(HostRole::Master) {
            hostnames.push(host.hostname);
        }

        assert_eq!(hostnames.len(), 2);
        hostnames.dedup();
        assert_eq!(hostnames.len(), 2);
        assert_eq!(pool.consume(HostRole::Master), None);
    }

    #[test]
    fn exhausted_role_returns_none_and_leaves_other_roles_alone() {
        let mut pool = InventoryPool::from_yaml(INVENTORY_YAML).unwrap();

        assert!(pool.consume(HostRole::Worker).is_some());
        assert_eq!(pool.consume(HostRole::Worker), None);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn role_inference_falls_back_to_worker() {
        assert_eq!(
            HostRole::infer_from_name("test-cluster-master-0"),
            HostRole::Master
        );
        assert_eq!(
            HostRole::infer_from_name("test-cluster-worker-0"),
            HostRole::Worker
        );
        assert_eq!(HostRole::infer_from_name("mastery"), HostRole::Worker);
    }
}
