//! Core component model for Ceradon
//!
//! This crate contains the catalog and build-assembly layer with no
//! estimation or exchange-schema logic:
//! - Canonical component types (hosts, radios, antennas, batteries, sensors)
//! - Catalog loading with one-shot field normalization
//! - `NodeBuild` assembly from raw build requests

pub mod build;
pub mod catalog;
pub mod error;
pub mod logging;
pub mod types;

pub use build::BuildRequest;
pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use types::{
    Antenna, Battery, ComponentFamily, Host, NodeBuild, Radio, Sensor, DEFAULT_ENVIRONMENT,
};
