//! Canonical component types.
//!
//! Catalog JSON is parsed into raw records (see `catalog`) and normalized into
//! these types exactly once. Aliased fields (`band` vs `bands`, `gain_db` vs
//! `gain_dbi`) and derivable defaults do not survive past construction, so
//! there is a single representation with no dual-field drift.

use serde::Serialize;
use std::fmt;

/// Default propagation environment for new builds.
pub const DEFAULT_ENVIRONMENT: &str = "rural_open";

/// Component family discriminator used in lookups and error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentFamily {
    /// Compute host (SBC, SoM, microcontroller).
    Host,
    /// RF transceiver.
    Radio,
    /// Antenna.
    Antenna,
    /// Battery pack.
    Battery,
    /// Payload sensor.
    Sensor,
}

impl fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComponentFamily::Host => "host",
            ComponentFamily::Radio => "radio",
            ComponentFamily::Antenna => "antenna",
            ComponentFamily::Battery => "battery",
            ComponentFamily::Sensor => "sensor",
        };
        f.write_str(label)
    }
}

/// Compute host.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Host {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal draw in watts. When the catalog record gives both idle and
    /// load figures and no nominal one, this is their mean.
    pub power_w: f64,
    /// Free-form capability tags.
    pub tags: Vec<String>,
    /// Operator notes.
    pub notes: String,
    /// CPU description.
    pub cpu: String,
    /// RAM in GB.
    pub ram_gb: f64,
    /// Storage description.
    pub storage: String,
    /// Operating system.
    pub os: String,
    /// Weight in kg.
    pub weight_kg: f64,
    /// Coarse 0-10 compute capability indicator.
    pub cpu_score: f64,
    /// Idle draw in watts, when the catalog gives one.
    pub power_w_idle: Option<f64>,
    /// Full-load draw in watts, when the catalog gives one.
    pub power_w_load: Option<f64>,
}

impl Host {
    /// Duty-cycle draw: mean of idle/load when both are known, nominal otherwise.
    pub fn average_power_w(&self) -> f64 {
        match (self.power_w_idle, self.power_w_load) {
            (Some(idle), Some(load)) => (idle + load) / 2.0,
            _ => self.power_w,
        }
    }
}

/// RF transceiver.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Radio {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal draw in watts.
    pub power_w: f64,
    /// Free-form capability tags.
    pub tags: Vec<String>,
    /// Operator notes.
    pub notes: String,
    /// Frequency band labels; the first entry is the primary band.
    pub bands: Vec<String>,
    /// Radio class tag: wifi, lora, analog_fpv, sdr, cellular, other.
    pub radio_type: String,
    /// Gain of any integrated antenna in dB.
    pub antenna_gain_db: f64,
    /// Whether the chipset/driver exposes channel state information.
    pub supports_csi: bool,
    /// Whether monitor mode is available.
    pub supports_monitor: bool,
    /// Transmit draw in watts, when the catalog gives one.
    pub power_w_tx: Option<f64>,
    /// Receive draw in watts, when the catalog gives one.
    pub power_w_rx: Option<f64>,
}

impl Radio {
    /// Primary band label, when any band is listed.
    pub fn primary_band(&self) -> Option<&str> {
        self.bands.first().map(String::as_str)
    }

    /// All band labels joined with `/` for display.
    pub fn band_label(&self) -> String {
        self.bands.join("/")
    }

    /// Duty-cycle draw: mean of tx/rx when both are known, nominal otherwise.
    pub fn average_power_w(&self) -> f64 {
        match (self.power_w_tx, self.power_w_rx) {
            (Some(tx), Some(rx)) => (tx + rx) / 2.0,
            _ => self.power_w,
        }
    }
}

/// Antenna.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Antenna {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal draw in watts (0 for passive antennas).
    pub power_w: f64,
    /// Free-form capability tags.
    pub tags: Vec<String>,
    /// Operator notes.
    pub notes: String,
    /// Gain in dBi.
    pub gain_dbi: f64,
    /// Radiation pattern: omni, whip, or a directional variant.
    pub pattern: String,
    /// Polarization description.
    pub polarization: String,
}

/// Battery pack.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Battery {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal draw in watts (0 for batteries).
    pub power_w: f64,
    /// Free-form capability tags.
    pub tags: Vec<String>,
    /// Operator notes.
    pub notes: String,
    /// Capacity in watt-hours.
    pub capacity_wh: f64,
    /// Cell chemistry.
    pub chemistry: String,
}

/// Payload sensor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Sensor {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Nominal draw in watts.
    pub power_w: f64,
    /// Free-form capability tags.
    pub tags: Vec<String>,
    /// Operator notes.
    pub notes: String,
    /// Sensor class tag: camera, gps, imu, environment, other.
    pub sensor_type: String,
    /// Electrical interface (CSI, USB, I2C, ...).
    pub interface: String,
}

/// One deployable node assembly resolved against a catalog.
///
/// Builds are ephemeral per-request views: they borrow catalog components and
/// are discarded once the estimate or export completes. `environment` is the
/// only field meant to change after construction (CLI override).
#[derive(Debug, Clone)]
pub struct NodeBuild<'a> {
    /// Compute host.
    pub host: &'a Host,
    /// RF transceiver.
    pub radio: &'a Radio,
    /// Antenna.
    pub antenna: &'a Antenna,
    /// Battery pack.
    pub battery: &'a Battery,
    /// Payload sensors; order carries no meaning.
    pub sensors: Vec<&'a Sensor>,
    /// Propagation environment tag.
    pub environment: String,
}

impl NodeBuild<'_> {
    /// Sensor names joined for display, or "None".
    pub fn sensor_summary(&self) -> String {
        if self.sensors.is_empty() {
            "None".to_string()
        } else {
            self.sensors
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_power(power_w: f64, idle: Option<f64>, load: Option<f64>) -> Host {
        Host {
            id: "h".into(),
            name: "Host".into(),
            power_w,
            tags: vec![],
            notes: String::new(),
            cpu: String::new(),
            ram_gb: 0.0,
            storage: String::new(),
            os: "Linux".into(),
            weight_kg: 0.0,
            cpu_score: 0.0,
            power_w_idle: idle,
            power_w_load: load,
        }
    }

    #[test]
    fn host_average_prefers_idle_load_pair() {
        let host = host_with_power(4.0, Some(5.0), Some(15.0));
        assert_eq!(host.average_power_w(), 10.0);
    }

    #[test]
    fn host_average_falls_back_to_nominal() {
        let host = host_with_power(4.0, Some(5.0), None);
        assert_eq!(host.average_power_w(), 4.0);
    }

    #[test]
    fn family_display_matches_wire_tags() {
        assert_eq!(ComponentFamily::Host.to_string(), "host");
        assert_eq!(ComponentFamily::Battery.to_string(), "battery");
    }
}
