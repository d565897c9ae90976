use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

/// Name of the install config inside the installer directory.
pub const INSTALL_CONFIG_FILE: &str = "install-config.yaml";

/// Subdirectory of the work dir the installer reads from and writes to.
const CONFIG_DIR: &str = "installer_dir";

/// The slice of the install config this tool cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallConfig {
    pub platform: Platform,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub baremetal: BaremetalPlatform,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaremetalPlatform {
    #[serde(rename = "apiVIP")]
    pub api_vip: String,
}

/// Materializes the install config payload into the installer directory and
/// checks the directory is usable. Without a payload the directory and its
/// install config must already be mounted.
pub fn prepare_config_dir(
    work_dir: &Path,
    installer_config: Option<&str>,
) -> anyhow::Result<PathBuf> {
    let config_dir = work_dir.join(CONFIG_DIR);

    if let Some(payload) = installer_config {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("failed to create {}", config_dir.display()))?;
        fs::write(config_dir.join(INSTALL_CONFIG_FILE), payload)
            .with_context(|| format!("failed to write {INSTALL_CONFIG_FILE}"))?;
    }

    if !config_dir.is_dir() {
        bail!("installer directory is not mounted at {}", config_dir.display());
    }
    if !config_dir.join(INSTALL_CONFIG_FILE).is_file() {
        bail!("install config file not located in {}", config_dir.display());
    }

    Ok(config_dir)
}

/// Reads the cluster virtual IP the DNS injection maps the internal API
/// name to.
pub fn read_api_vip(config_dir: &Path) -> anyhow::Result<String> {
    let path = config_dir.join(INSTALL_CONFIG_FILE);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let config: InstallConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(config.platform.baremetal.api_vip)
}
