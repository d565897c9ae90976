use std::path::Path;

use anyhow::Context;
use common::aws::s3::client::S3Client;
use walkdir::WalkDir;

/// Object name the generated kubeconfig is published under; the plain name
/// is reserved for the post-install kubeconfig that has ingress access.
const KUBECONFIG_UPLOAD_NAME: &str = "kubeconfig-noingress";

/// The object name a generated file is published under.
pub fn object_name(file_name: &str) -> &str {
    if file_name == "kubeconfig" {
        KUBECONFIG_UPLOAD_NAME
    } else {
        file_name
    }
}

/// Uploads every file below `dir` under the `<prefix>/<object name>` key.
/// The files must be finalized before this starts; nothing here mutates
/// them.
pub async fn upload_artifacts(
    s3: &S3Client,
    bucket: &str,
    prefix: &str,
    dir: &Path,
) -> anyhow::Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };

        let key = format!("{prefix}/{}", object_name(file_name));
        tracing::info!("Uploading file {} as object {key}", entry.path().display());

        s3.upload_file(entry.path(), bucket, &key)
            .await
            .with_context(|| format!("failed to upload {}", entry.path().display()))?;
    }

    Ok(())
}

/// Dry run used when no object-store endpoint is configured.
pub fn log_upload_plan(prefix: &str, dir: &Path) {
    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(file_name) = entry.file_name().to_str() {
            tracing::info!(
                "Would upload file {} as object {prefix}/{}",
                entry.path().display(),
                object_name(file_name)
            );
        }
    }
}
