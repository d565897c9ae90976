use std::path::Path;

use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::clap::AwsConfig;

#[derive(Clone)]
pub struct S3Client {
    inner: Client,
}

impl S3Client {
    async fn build_credentials(profile: Option<String>) -> DefaultCredentialsChain {
        let mut builder = DefaultCredentialsChain::builder();
        if let Some(profile) = profile {
            builder = builder.profile_name(&profile);
        }

        builder.build().await
    }

    pub async fn new(aws_config: AwsConfig, s3_endpoint_url: &str) -> S3Client {
        let region = Region::new(aws_config.region);
        let credentials_provider = S3Client::build_credentials(aws_config.profile).await;

        let config = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .region(region)
            .force_path_style(true) // needed for minio
            .credentials_provider(credentials_provider)
            .endpoint_url(s3_endpoint_url)
            .build();

        let inner = Client::from_conf(config);

        S3Client { inner }
    }

    /// Uploads a local file as a publicly readable object.
    pub async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> anyhow::Result<()> {
        let body = ByteStream::from_path(path).await?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(body)
            .send()
            .await?;

        Ok(())
    }
}
