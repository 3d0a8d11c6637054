//! MissionProject document model.
//!
//! Wire shape shared with mapping/ATAK tooling. Every struct carries a
//! flattened extension map, so fields this schema version does not understand
//! survive a parse → upgrade → serialize round trip untouched. That is the
//! forward-compatibility contract; keep the wire keys stable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Current MissionProject schema version.
pub const SCHEMA_VERSION: &str = "2.0.0";

/// Deprecated v1 schema tag, accepted on import and emittable on request.
pub const LEGACY_SCHEMA_TAG: &str = "mission_project_v1";

/// Tool identifier stamped on produced documents.
pub const ORIGIN_TOOL: &str = "ceradon";

/// Extension map preserving unknown wire fields.
pub type Extensions = BTreeMap<String, Value>;

/// Versioned MissionProject exchange document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MissionDocument {
    /// Schema version; absent on pre-versioning documents.
    #[serde(rename = "schemaVersion", default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Producing tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_tool: Option<String>,
    /// RFC3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Mission metadata (free-form object).
    #[serde(default)]
    pub mission: Value,
    /// Mission-wide environment assumptions (free-form object).
    #[serde(default)]
    pub environment: Value,
    /// Planning constraints.
    #[serde(default)]
    pub constraints: Vec<Value>,
    /// Platforms referenced by nodes; node `platform_id` must resolve here.
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Node records, one per build.
    #[serde(default)]
    pub nodes: Vec<MissionNode>,
    /// Planned point-to-point links between nodes.
    #[serde(default)]
    pub mesh_links: Vec<MeshLink>,
    /// Equipment kits.
    #[serde(default)]
    pub kits: Vec<Value>,
    /// Unrecognized top-level fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

impl MissionDocument {
    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Compute platform shared by one or more nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    /// Derived id, `platform-<hostId>`.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Platform role label.
    #[serde(default)]
    pub role: String,
    /// Producing tool.
    #[serde(default)]
    pub origin_tool: String,
    /// Hardware specs snapshot.
    #[serde(default)]
    pub specs: PlatformSpecs,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Hardware details carried on a platform record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlatformSpecs {
    /// CPU description.
    #[serde(default)]
    pub cpu: String,
    /// RAM in GB.
    #[serde(default)]
    pub ram_gb: f64,
    /// Storage description.
    #[serde(default)]
    pub storage: String,
    /// Idle draw in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_idle_w: Option<f64>,
    /// Full-load draw in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_load_w: Option<f64>,
    /// Weight in kg.
    #[serde(default)]
    pub weight_kg: f64,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// One deployable node record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MissionNode {
    /// Node id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Producing tool; backfilled from the document on upgrade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_tool: Option<String>,
    /// Referenced platform id.
    #[serde(default)]
    pub platform_id: String,
    /// Assigned roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Lowercased RF band labels.
    #[serde(default)]
    pub rf_bands: Vec<String>,
    /// Power and runtime estimates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_profile: Option<PowerProfile>,
    /// Per-node environment assumptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentAssumptions>,
    /// Derived capability tags.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Estimator role recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_role: Option<String>,
    /// Host summary; synthesized from `parts.host_id` on upgrade when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_type: Option<HostType>,
    /// Radio snapshots.
    #[serde(default)]
    pub radios: Vec<RadioSnapshot>,
    /// Antenna snapshots.
    #[serde(default)]
    pub antennas: Vec<AntennaSnapshot>,
    /// Battery snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatterySnapshot>,
    /// Sensor snapshots.
    #[serde(default)]
    pub sensors: Vec<SensorSnapshot>,
    /// Adjusted runtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_runtime_min: Option<f64>,
    /// Duplicate of `environment` kept for older consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_assumptions: Option<EnvironmentAssumptions>,
    /// Catalog ids needed to rebuild this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<NodeParts>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Geographic position, when surveyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Estimated link ranges for mesh planning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_hints: Option<Vec<MeshHint>>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Power and runtime estimate block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PowerProfile {
    /// Estimated draw in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_draw_w: Option<f64>,
    /// Runtime at nominal battery capacity, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_runtime_h: Option<f64>,
    /// Runtime after altitude/temperature capacity derating, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_runtime_h: Option<f64>,
    /// Capacity derating factor applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_factor: Option<f64>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Propagation and climate assumptions for a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentAssumptions {
    /// Propagation environment tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagation: Option<String>,
    /// Altitude band tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_band: Option<String>,
    /// Temperature band tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_band: Option<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Host summary carried on a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostType {
    /// Host catalog id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Capability tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Radio snapshot embedded in a node record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RadioSnapshot {
    /// Radio catalog id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Radio class tag.
    #[serde(default)]
    pub radio_type: String,
    /// Band labels.
    #[serde(default)]
    pub bands: Vec<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Antenna snapshot embedded in a node record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AntennaSnapshot {
    /// Antenna catalog id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Gain in dBi.
    #[serde(default)]
    pub gain_dbi: f64,
    /// Radiation pattern.
    #[serde(default)]
    pub pattern: String,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Battery snapshot embedded in a node record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatterySnapshot {
    /// Battery catalog id.
    #[serde(default)]
    pub id: String,
    /// Capacity in watt-hours.
    #[serde(default)]
    pub capacity_wh: f64,
    /// Cell chemistry.
    #[serde(default)]
    pub chemistry: String,
    /// Capability tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Sensor snapshot embedded in a node record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SensorSnapshot {
    /// Sensor catalog id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Sensor class tag.
    #[serde(rename = "type", default)]
    pub sensor_type: String,
    /// Capability tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Catalog ids needed to rebuild a node from a local inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeParts {
    /// Host id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    /// Battery id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_id: Option<String>,
    /// Radio/antenna chains; the first entry is the primary chain.
    #[serde(default)]
    pub rf_chains: Vec<RfChain>,
    /// Sensor ids.
    #[serde(default)]
    pub sensor_ids: Vec<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// One radio/antenna pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RfChain {
    /// Radio id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_id: Option<String>,
    /// Antenna id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antenna_id: Option<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Geographic position of a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Elevation in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

impl Location {
    /// Lat/lon pair when both are present; projections require both.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }
}

/// Estimated point-to-point range annotation for mesh planning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeshHint {
    /// Band label the estimate applies to.
    #[serde(default)]
    pub band: String,
    /// Estimated range in km.
    #[serde(default)]
    pub estimated_range_km: f64,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Planned point-to-point link between two nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeshLink {
    /// Link id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source node id.
    #[serde(default)]
    pub from_node: String,
    /// Destination node id.
    #[serde(default)]
    pub to_node: String,
    /// Band label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    /// Estimated range in km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_range_km: Option<f64>,
    /// Producing tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_tool: Option<String>,
    /// Unrecognized fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Extensions,
}

/// Lightweight nodes/platforms-only bundle for downstream tools that do not
/// want the full mission scaffolding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeBundle {
    /// Schema version the bundle shape aligns to.
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    /// Bundle metadata.
    #[serde(default)]
    pub meta: Value,
    /// Producing tool.
    #[serde(default)]
    pub origin_tool: String,
    /// Mission metadata.
    #[serde(default)]
    pub mission: Value,
    /// Platforms referenced by the bundled nodes.
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Node records.
    #[serde(default)]
    pub nodes: Vec<MissionNode>,
}
