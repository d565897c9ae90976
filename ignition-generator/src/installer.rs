use std::path::Path;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Name of the installer binary extracted from the release image.
pub const INSTALLER_BINARY: &str = "openshift-baremetal-install";

/// Extracts the installer binary from the release image into the work dir
/// using the `oc` client expected alongside it.
pub async fn extract_installer(work_dir: &Path, release_image: &str) -> anyhow::Result<()> {
    let command = format!(
        "{dir}/oc adm release extract --command={INSTALLER_BINARY} --to={dir} {release_image}",
        dir = work_dir.display(),
    );

    run_logged("extract-installer", &command).await
}

/// Runs the installer to generate the ignition configs into the config dir.
pub async fn create_ignition_configs(work_dir: &Path, config_dir: &Path) -> anyhow::Result<()> {
    let command = format!(
        "OPENSHIFT_INSTALL_INVOKER=\"assisted-installer\" {}/{INSTALLER_BINARY} create ignition-configs --dir {}",
        work_dir.display(),
        config_dir.display(),
    );

    run_logged("create-ignition-configs", &command).await
}

async fn run_logged(name: &'static str, command: &str) -> anyhow::Result<()> {
    tracing::info!("Running {name}: {command}");

    let mut child = tokio::process::Command::new("sh")
        .kill_on_drop(true)
        .arg("-c")
        .arg(command)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {name}"))?;

    if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        tokio::spawn(async move {
            while let Some(line) = stdout_reader.next_line().await.unwrap_or(None) {
                tracing::info!("{name} stdout: {line}");
            }
        });

        tokio::spawn(async move {
            while let Some(line) = stderr_reader.next_line().await.unwrap_or(None) {
                tracing::info!("{name} stderr: {line}");
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for {name}"))?;

    if !status.success() {
        bail!("{name} exited with {status}");
    }

    Ok(())
}
