use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::inventory::InventoryHost;
use crate::Error;

/// Annotation key the serialized hardware status is stored under.
pub const STATUS_ANNOTATION_KEY: &str = "baremetalhost.metal3.io/status";

/// Hardware block attached to the copied status fields.
///
/// Only the NIC list carries real data; CPU and storage are placeholders
/// until proper introspection data is wired through the inventory.
#[derive(Debug, Clone, Serialize)]
pub struct Hardware {
    pub nics: Vec<NicStatus>,
    pub cpu: CpuStatus,
    pub storage: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NicStatus {
    pub name: String,
    pub model: String,
    pub mac: String,
    pub ip: String,
    #[serde(rename = "speedGbps")]
    pub speed_gbps: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpuStatus {
    pub arch: String,
    pub model: String,
    #[serde(rename = "clockMegahertz")]
    pub clock_megahertz: f64,
    pub count: u32,
    pub flags: Vec<String>,
}

impl Default for CpuStatus {
    fn default() -> CpuStatus {
        CpuStatus {
            arch: String::new(),
            model: String::new(),
            clock_megahertz: 0.0,
            count: 1,
            flags: Vec::new(),
        }
    }
}

impl Hardware {
    pub fn from_inventory(host: &InventoryHost) -> Hardware {
        let nics = host
            .nics
            .iter()
            .map(|nic| NicStatus {
                name: nic.name.clone(),
                model: String::new(),
                mac: nic.mac.clone(),
                ip: nic.ip_addr.clone(),
                speed_gbps: nic.speed,
            })
            .collect();

        Hardware {
            nics,
            cpu: CpuStatus::default(),
            storage: Vec::new(),
        }
    }
}

/// Builds the replacement `metadata.annotations` map for a matched host.
///
/// The manifest's existing status fields are copied, never aliased, and a
/// `hardware` block derived from the inventory host is added on top. The
/// annotation value is serialized to a JSON string of its own, independent
/// of how the surrounding manifest is serialized.
pub fn build_status_annotation(
    status: &serde_yaml::Mapping,
    host: &InventoryHost,
) -> Result<BTreeMap<String, String>, Error> {
    let mut annotated = serde_json::to_value(status).map_err(Error::AnnotationSerialization)?;

    if let Value::Object(fields) = &mut annotated {
        fields.insert(
            "hardware".to_string(),
            serde_json::to_value(Hardware::from_inventory(host))
                .map_err(Error::AnnotationSerialization)?,
        );
    }

    let serialized = serde_json::to_string(&annotated).map_err(Error::AnnotationSerialization)?;

    Ok(BTreeMap::from([(
        STATUS_ANNOTATION_KEY.to_string(),
        serialized,
    )]))
}
