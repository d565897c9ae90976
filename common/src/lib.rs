//! The `common` crate provides the building blocks shared by the ignition patching tools:
//! the embedded-resource codec, the file-entry locator, the consumable inventory pool and
//! the patchers that rewrite bootstrap artifacts before they are published, such as
//! [`annotate_host_manifests`] and [`inject_dns_entry`].
//!
//! [`annotate_host_manifests`]: patch::bmh::annotate_host_manifests
//! [`inject_dns_entry`]: patch::dns::inject_dns_entry

pub mod aws;
pub mod clap;
mod error;
pub mod ignition;
pub mod inventory;
pub mod manifest;
pub mod patch;
pub mod tracing;

pub use error::Error;
