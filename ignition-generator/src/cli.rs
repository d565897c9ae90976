use std::path::PathBuf;

use clap::Parser;
use common::clap::{AwsConfig, CliSecret, PlainRedactor, S3Config};

/// Release image the installer binary is extracted from when no override is
/// given.
const DEFAULT_RELEASE_IMAGE: &str =
    "quay.io/openshift-release-dev/ocp-release-nightly@sha256:b0600325129b5b14d272ad61bcbd7fe609b812ac2620976158046a7bd2c31c62";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Directory holding the installer binary and the generated artifacts
    #[clap(long, env = "WORK_DIR")]
    pub work_dir: PathBuf,
    /// Full install-config payload; written into the installer directory
    /// when set. Embeds a pull secret, so it is redacted from debug output.
    #[clap(long, env = "INSTALLER_CONFIG", hide_env_values = true)]
    pub installer_config: Option<CliSecret<String, PlainRedactor>>,
    /// Inventory payload, a YAML document with a top-level `hosts` list of
    /// the discovered hosts
    #[clap(long, env = "BMH_CONFIG", hide_env_values = true)]
    pub bmh_config: Option<CliSecret<String, PlainRedactor>>,
    /// Release image the installer binary is extracted from
    #[clap(long, env = "RELEASE_IMAGE", default_value = DEFAULT_RELEASE_IMAGE)]
    pub release_image: String,
    /// Add an /etc/hosts entry for the cluster DNS name to the node
    /// ignition configs
    #[clap(long)]
    pub dns: bool,
    /// Object key prefix, usually the cluster identifier
    #[clap(long, env = "CLUSTER_ID")]
    pub cluster_id: Option<String>,
    #[command(flatten)]
    pub s3_config: S3Config,
    #[command(flatten)]
    pub aws_config: AwsConfig,
}
