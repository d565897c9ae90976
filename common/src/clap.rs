use std::{
    fmt::{self, Display},
    marker::PhantomData,
    ops::Deref,
    str::FromStr,
};

use clap::Args;

/// Common AWS configuration parameters such as the region.
#[derive(Args, Clone, Debug)]
pub struct AwsConfig {
    /// AWS region
    #[clap(
        name = "aws-region",
        long,
        env = "AWS_REGION",
        global = true,
        default_value = "us-east-1"
    )]
    pub region: String,
    /// AWS profile
    #[clap(name = "aws-profile", long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,
}

/// Object-store parameters for publishing the generated artifacts.
#[derive(Args, Clone, Debug)]
pub struct S3Config {
    /// The address of the S3-compatible endpoint; without it the upload is
    /// only logged
    #[clap(name = "s3-endpoint-url", long, env = "S3_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
    /// The bucket receiving the generated artifacts
    #[clap(name = "s3-bucket", long, env = "S3_BUCKET", default_value = "test")]
    pub bucket: String,
}

//
// Secrets redaction
// It is nice to be able to debug print our CLI arguments on startup as this can save a lot of
// time when investigating an issue. Some of our CLI arguments are secrets though (the install
// config payload embeds a pull secret), so we want a way of hiding those values from `Debug`
// calls without introducing overheads in the developer experience.
//
// For this we have `CliSecret` and `RedactionFunction` which you can wrap around values which will
// modify debug print output.
//

pub trait RedactionFunction<T> {
    fn redact(s: &T) -> String;
}

const REDACTED_VALUE: &str = "<REDACTED>";

#[derive(Clone)]
pub struct PlainRedactor {}

impl<T> RedactionFunction<T> for PlainRedactor {
    fn redact(_: &T) -> String {
        REDACTED_VALUE.to_string()
    }
}

#[derive(Clone)]
pub struct CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    value: T,
    redaction_function: PhantomData<R>,
}

impl<T, R> CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    pub fn new(value: T) -> Self {
        Self {
            value,
            redaction_function: PhantomData,
        }
    }
}

impl<T, R> Deref for CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T, R> fmt::Debug for CliSecret<T, R>
where
    T: Display,
    R: RedactionFunction<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = R::redact(&self.value);
        f.write_str(&text)
    }
}

impl<T, R> FromStr for CliSecret<T, R>
where
    T: FromStr,
    R: RedactionFunction<T>,
{
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = T::from_str(s)?;
        Ok(CliSecret {
            value: t,
            redaction_function: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CliSecret, PlainRedactor};

    #[test]
    fn plain_redactor() {
        let test_value = "secret value".to_string();

        let secret_wrapper = CliSecret::<String, PlainRedactor>::new(test_value);

        let debug_value = format!("{secret_wrapper:?}");

        assert_eq!(debug_value, "<REDACTED>");
    }
}
