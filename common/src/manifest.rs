use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::inventory::HostRole;

/// A host-declaration manifest recovered from an embedded ignition file
/// entry.
///
/// Only the fields the patcher reads or rewrites are modelled; everything
/// else is kept in flattened maps so it survives the decode/encode round
/// trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostManifest {
    pub metadata: ManifestMetadata,
    pub spec: ManifestSpec,
    #[serde(default)]
    pub status: serde_yaml::Mapping,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSpec {
    pub bmc: BmcSpec,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmcSpec {
    #[serde(rename = "credentialsName")]
    pub credentials_name: String,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl HostManifest {
    /// The role this manifest declares, read off its name.
    pub fn role(&self) -> HostRole {
        HostRole::infer_from_name(&self.metadata.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_YAML: &str = r#"
apiVersion: metal3.io/v1alpha1
kind: BareMetalHost
metadata:
  name: test-cluster-master-0
  namespace: openshift-machine-api
spec:
  bmc:
    address: ipmi://192.168.126.1:6230
    credentialsName: test-cluster-master-0-bmc-secret
  bootMACAddress: 52:54:00:4e:ea:7b
  online: true
status:
  operationalStatus: OK
"#;

    #[test]
    fn unmodelled_fields_survive_the_round_trip() {
        let manifest: HostManifest = serde_yaml::from_str(MANIFEST_YAML).unwrap();

        assert_eq!(
            manifest.rest.get("kind"),
            Some(&Value::String("BareMetalHost".to_string()))
        );
        assert_eq!(
            manifest.spec.bmc.rest.get("address"),
            Some(&Value::String("ipmi://192.168.126.1:6230".to_string()))
        );

        let reparsed: HostManifest =
            serde_yaml::from_str(&serde_yaml::to_string(&manifest).unwrap()).unwrap();

        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn role_comes_from_the_manifest_name() {
        let manifest: HostManifest = serde_yaml::from_str(MANIFEST_YAML).unwrap();

        assert_eq!(manifest.role(), HostRole::Master);
    }

    #[test]
    fn manifests_without_a_bmc_section_do_not_parse() {
        let result = serde_yaml::from_str::<HostManifest>(
            "metadata:\n  name: host-0\nspec:\n  online: true\n",
        );

        assert!(result.is_err());
    }
}
