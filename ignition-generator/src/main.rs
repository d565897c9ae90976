use anyhow::Context;
use clap::Parser;
use common::aws::s3::client::S3Client;
use common::inventory::InventoryPool;
use common::tracing::init_tracing;
use ignition_generator::{artifacts, cli::Cli, config, installer, upload};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing("info");

    if let Err(e) = run(cli).await {
        tracing::error!("{e:?}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Cli args: {cli:?}");

    let installer_config = cli.installer_config.as_ref().map(|secret| secret.as_str());
    let config_dir = config::prepare_config_dir(&cli.work_dir, installer_config)?;

    let vip = if cli.dns {
        Some(config::read_api_vip(&config_dir)?)
    } else {
        None
    };

    installer::extract_installer(&cli.work_dir, &cli.release_image).await?;
    installer::create_ignition_configs(&cli.work_dir, &config_dir).await?;

    let bootstrap_path = config_dir.join(artifacts::BOOTSTRAP_IGNITION);
    artifacts::remove_provisioning(&bootstrap_path)?;

    if let Some(payload) = cli.bmh_config.as_ref() {
        // One pool handle for the whole run; every artifact patched from it
        // shares the same consumption state.
        let mut pool = InventoryPool::from_yaml(payload)?;
        artifacts::annotate_hosts(&bootstrap_path, &mut pool)?;
    }

    if let Some(vip) = vip {
        for name in artifacts::NODE_IGNITIONS {
            artifacts::inject_dns(&config_dir.join(name), &vip)?;
        }
    }

    match cli.s3_config.endpoint_url.as_ref() {
        Some(endpoint_url) => {
            let prefix = cli
                .cluster_id
                .as_deref()
                .context("CLUSTER_ID must be set when uploading artifacts")?;

            let s3 = S3Client::new(cli.aws_config.clone(), endpoint_url).await;
            upload::upload_artifacts(&s3, &cli.s3_config.bucket, prefix, &config_dir).await?;
        }
        None => {
            upload::log_upload_plan(
                cli.cluster_id.as_deref().unwrap_or("dummy_cluster_id"),
                &config_dir,
            );
        }
    }

    Ok(())
}
