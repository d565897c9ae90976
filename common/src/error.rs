use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed ignition document: {0}")]
    MalformedIgnition(#[source] serde_json::Error),
    #[error("Ignition root is not a JSON object")]
    IgnitionRootNotObject,
    #[error("Malformed embedded resource: {0}")]
    MalformedEmbeddedResource(String),
    #[error("Malformed inventory config: {0}")]
    MalformedInventory(#[source] serde_yaml::Error),
    #[error("Failed to serialize hardware status annotation: {0}")]
    AnnotationSerialization(#[source] serde_json::Error),
}
