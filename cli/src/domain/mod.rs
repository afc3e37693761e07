//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod host;
pub mod playbook;
pub mod request;

pub use artifacts::{ArtifactLayout, GroupVars};
pub use config::SdkConfig;
pub use error::{ConfigError, ProvisionError};
pub use host::HostEnvironment;
pub use playbook::ToolInvocation;
pub use request::ProvisioningRequest;
