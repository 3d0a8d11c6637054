//! Catalog records, normalization, and id lookup.
//!
//! The raw record structs are the serde surface for catalog JSON. They accept
//! the aliased/optional field spellings found in the wild (`band` vs `bands`,
//! `gain_db` vs `gain_dbi`, idle/load vs nominal power) and collapse them into
//! the canonical `types` representation in their `normalize` step.

use serde::Deserialize;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::types::{Antenna, Battery, ComponentFamily, Host, Radio, Sensor};

fn default_os() -> String {
    "Linux".to_string()
}

fn default_pattern() -> String {
    "omni".to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostRecord {
    id: String,
    name: String,
    power_w: f64,
    tags: Vec<String>,
    notes: String,
    cpu: String,
    ram_gb: f64,
    storage: String,
    #[serde(default = "default_os")]
    os: String,
    weight_kg: f64,
    cpu_score: f64,
    power_w_idle: Option<f64>,
    power_w_load: Option<f64>,
}

impl HostRecord {
    fn normalize(self) -> Host {
        // Zero draw figures mean "not measured", same as an absent field.
        let idle = self.power_w_idle.filter(|v| *v > 0.0);
        let load = self.power_w_load.filter(|v| *v > 0.0);
        let power_w = if self.power_w > 0.0 {
            self.power_w
        } else if let (Some(idle), Some(load)) = (idle, load) {
            (idle + load) / 2.0
        } else {
            self.power_w
        };
        Host {
            id: self.id,
            name: self.name,
            power_w,
            tags: self.tags,
            notes: self.notes,
            cpu: self.cpu,
            ram_gb: self.ram_gb,
            storage: self.storage,
            os: self.os,
            weight_kg: self.weight_kg,
            cpu_score: self.cpu_score,
            power_w_idle: idle,
            power_w_load: load,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RadioRecord {
    id: String,
    name: String,
    power_w: f64,
    tags: Vec<String>,
    notes: String,
    band: String,
    bands: Vec<String>,
    radio_type: String,
    antenna_gain_db: f64,
    supports_csi: bool,
    supports_monitor: bool,
    power_w_tx: Option<f64>,
    power_w_rx: Option<f64>,
}

impl RadioRecord {
    fn normalize(self) -> Radio {
        // A single joined `band` string and a `bands` list are interchangeable
        // input spellings; only the list survives.
        let bands = if !self.bands.is_empty() {
            self.bands
        } else {
            self.band
                .split(['/', ','])
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        };
        Radio {
            id: self.id,
            name: self.name,
            power_w: self.power_w,
            tags: self.tags,
            notes: self.notes,
            bands,
            radio_type: self.radio_type,
            antenna_gain_db: self.antenna_gain_db,
            supports_csi: self.supports_csi,
            supports_monitor: self.supports_monitor,
            power_w_tx: self.power_w_tx.filter(|v| *v > 0.0),
            power_w_rx: self.power_w_rx.filter(|v| *v > 0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AntennaRecord {
    id: String,
    name: String,
    power_w: f64,
    tags: Vec<String>,
    notes: String,
    #[serde(alias = "gain_db")]
    gain_dbi: f64,
    #[serde(default = "default_pattern")]
    pattern: String,
    polarization: String,
}

impl AntennaRecord {
    fn normalize(self) -> Antenna {
        Antenna {
            id: self.id,
            name: self.name,
            power_w: self.power_w,
            tags: self.tags,
            notes: self.notes,
            gain_dbi: self.gain_dbi,
            pattern: self.pattern,
            polarization: self.polarization,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BatteryRecord {
    id: String,
    name: String,
    power_w: f64,
    tags: Vec<String>,
    notes: String,
    capacity_wh: f64,
    chemistry: String,
}

impl BatteryRecord {
    fn normalize(self) -> Battery {
        Battery {
            id: self.id,
            name: self.name,
            power_w: self.power_w,
            tags: self.tags,
            notes: self.notes,
            capacity_wh: self.capacity_wh,
            chemistry: self.chemistry,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SensorRecord {
    id: String,
    name: String,
    power_w: f64,
    tags: Vec<String>,
    notes: String,
    sensor_type: String,
    interface: String,
}

impl SensorRecord {
    fn normalize(self) -> Sensor {
        Sensor {
            id: self.id,
            name: self.name,
            power_w: self.power_w,
            tags: self.tags,
            notes: self.notes,
            sensor_type: self.sensor_type,
            interface: self.interface,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    hosts: Vec<HostRecord>,
    radios: Vec<RadioRecord>,
    antennas: Vec<AntennaRecord>,
    batteries: Vec<BatteryRecord>,
    sensors: Vec<SensorRecord>,
}

/// Component inventory, one list per family, catalog order preserved.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Compute hosts.
    pub hosts: Vec<Host>,
    /// RF transceivers.
    pub radios: Vec<Radio>,
    /// Antennas.
    pub antennas: Vec<Antenna>,
    /// Battery packs.
    pub batteries: Vec<Battery>,
    /// Payload sensors.
    pub sensors: Vec<Sensor>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Ok(Self {
            hosts: file.hosts.into_iter().map(HostRecord::normalize).collect(),
            radios: file.radios.into_iter().map(RadioRecord::normalize).collect(),
            antennas: file
                .antennas
                .into_iter()
                .map(AntennaRecord::normalize)
                .collect(),
            batteries: file
                .batteries
                .into_iter()
                .map(BatteryRecord::normalize)
                .collect(),
            sensors: file
                .sensors
                .into_iter()
                .map(SensorRecord::normalize)
                .collect(),
        })
    }

    /// Load a catalog from a JSON file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Look up a host by id, or `None`.
    pub fn find_host(&self, id: &str) -> Option<&Host> {
        self.hosts.iter().find(|c| c.id == id)
    }

    /// Look up a radio by id, or `None`.
    pub fn find_radio(&self, id: &str) -> Option<&Radio> {
        self.radios.iter().find(|c| c.id == id)
    }

    /// Look up an antenna by id, or `None`.
    pub fn find_antenna(&self, id: &str) -> Option<&Antenna> {
        self.antennas.iter().find(|c| c.id == id)
    }

    /// Look up a battery by id, or `None`.
    pub fn find_battery(&self, id: &str) -> Option<&Battery> {
        self.batteries.iter().find(|c| c.id == id)
    }

    /// Look up a sensor by id, or `None`.
    pub fn find_sensor(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|c| c.id == id)
    }

    /// Look up a host by id, failing with the id and family.
    pub fn host(&self, id: &str) -> Result<&Host> {
        self.find_host(id)
            .ok_or_else(|| Self::unknown(ComponentFamily::Host, id))
    }

    /// Look up a radio by id, failing with the id and family.
    pub fn radio(&self, id: &str) -> Result<&Radio> {
        self.find_radio(id)
            .ok_or_else(|| Self::unknown(ComponentFamily::Radio, id))
    }

    /// Look up an antenna by id, failing with the id and family.
    pub fn antenna(&self, id: &str) -> Result<&Antenna> {
        self.find_antenna(id)
            .ok_or_else(|| Self::unknown(ComponentFamily::Antenna, id))
    }

    /// Look up a battery by id, failing with the id and family.
    pub fn battery(&self, id: &str) -> Result<&Battery> {
        self.find_battery(id)
            .ok_or_else(|| Self::unknown(ComponentFamily::Battery, id))
    }

    /// Look up a sensor by id, failing with the id and family.
    pub fn sensor(&self, id: &str) -> Result<&Sensor> {
        self.find_sensor(id)
            .ok_or_else(|| Self::unknown(ComponentFamily::Sensor, id))
    }

    fn unknown(family: ComponentFamily, id: &str) -> CatalogError {
        CatalogError::UnknownComponent {
            family,
            id: id.to_string(),
        }
    }
}
