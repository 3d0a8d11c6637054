//! Build assembly from raw build requests.

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};
use crate::types::{NodeBuild, Sensor, DEFAULT_ENVIRONMENT};

/// Raw build config: catalog ids plus an optional environment tag.
///
/// This is the `{host, radio, antenna, battery, sensors?, environment?}`
/// JSON shape accepted by the CLI and bundled presets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildRequest {
    /// Host id.
    pub host: Option<String>,
    /// Radio id.
    pub radio: Option<String>,
    /// Antenna id.
    pub antenna: Option<String>,
    /// Battery id.
    pub battery: Option<String>,
    /// Sensor ids.
    pub sensors: Vec<String>,
    /// Propagation environment tag; defaults to rural_open.
    pub environment: Option<String>,
    /// Human description, used by preset listings.
    pub description: String,
}

impl BuildRequest {
    /// Parse a build request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve every id against the catalog into a validated build.
    ///
    /// Any missing required field or unknown id is a hard failure here;
    /// the tolerant path is mission-document import, not direct parsing.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Result<NodeBuild<'a>> {
        let host = catalog.host(require("host", &self.host)?)?;
        let radio = catalog.radio(require("radio", &self.radio)?)?;
        let antenna = catalog.antenna(require("antenna", &self.antenna)?)?;
        let battery = catalog.battery(require("battery", &self.battery)?)?;

        let mut sensors: Vec<&'a Sensor> = Vec::with_capacity(self.sensors.len());
        for id in &self.sensors {
            sensors.push(catalog.sensor(id)?);
        }

        Ok(NodeBuild {
            host,
            radio,
            antenna,
            battery,
            sensors,
            environment: self
                .environment
                .clone()
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        })
    }
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(CatalogError::InvalidConfig(field))
}
