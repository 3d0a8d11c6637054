//! Build → MissionProject export.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use ceradon_core::{Host, NodeBuild, Radio};
use ceradon_estimator::EstimateResult;

use crate::document::{
    AntennaSnapshot, BatterySnapshot, EnvironmentAssumptions, Extensions, HostType, Location,
    MeshHint, MeshLink, MissionDocument, MissionNode, NodeBundle, NodeParts, Platform,
    PlatformSpecs, PowerProfile, RadioSnapshot, RfChain, SensorSnapshot, LEGACY_SCHEMA_TAG,
    ORIGIN_TOOL, SCHEMA_VERSION,
};

/// Altitude bands for battery capacity derating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltitudeBand {
    /// Up to roughly 1000 m.
    #[serde(rename = "sea_level")]
    SeaLevel,
    /// 1000-2000 m.
    #[serde(rename = "band_1000_2000")]
    Band1000To2000,
    /// 2000-3000 m.
    #[default]
    #[serde(rename = "band_2000_3000")]
    Band2000To3000,
    /// Above 3000 m.
    #[serde(rename = "above_3000")]
    Above3000,
}

impl AltitudeBand {
    /// Wire tag for this band.
    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeBand::SeaLevel => "sea_level",
            AltitudeBand::Band1000To2000 => "band_1000_2000",
            AltitudeBand::Band2000To3000 => "band_2000_3000",
            AltitudeBand::Above3000 => "above_3000",
        }
    }
}

impl fmt::Display for AltitudeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AltitudeBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sea_level" => Ok(AltitudeBand::SeaLevel),
            "band_1000_2000" => Ok(AltitudeBand::Band1000To2000),
            "band_2000_3000" => Ok(AltitudeBand::Band2000To3000),
            "above_3000" => Ok(AltitudeBand::Above3000),
            other => Err(format!("unknown altitude band '{other}'")),
        }
    }
}

/// Temperature bands for battery capacity derating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Above ~30 C.
    Hot,
    /// Mild conditions.
    Temperate,
    /// Below ~5 C.
    #[default]
    Cold,
    /// Below ~-15 C.
    VeryCold,
}

impl TemperatureBand {
    /// Wire tag for this band.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::Hot => "hot",
            TemperatureBand::Temperate => "temperate",
            TemperatureBand::Cold => "cold",
            TemperatureBand::VeryCold => "very_cold",
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(TemperatureBand::Hot),
            "temperate" => Ok(TemperatureBand::Temperate),
            "cold" => Ok(TemperatureBand::Cold),
            "very_cold" => Ok(TemperatureBand::VeryCold),
            other => Err(format!("unknown temperature band '{other}'")),
        }
    }
}

/// Battery capacity derating by altitude and temperature band.
///
/// The table is total over the band enums; string-keyed lookups elsewhere
/// default to 1.0 instead.
pub fn capacity_factor(altitude: AltitudeBand, temperature: TemperatureBand) -> f64 {
    use AltitudeBand::*;
    use TemperatureBand::*;
    match (altitude, temperature) {
        (SeaLevel, Hot) | (SeaLevel, Temperate) => 1.0,
        (SeaLevel, Cold) => 0.95,
        (SeaLevel, VeryCold) => 0.9,
        (Band1000To2000, Hot) => 0.95,
        (Band1000To2000, Temperate) => 0.93,
        (Band1000To2000, Cold) => 0.88,
        (Band1000To2000, VeryCold) => 0.82,
        (Band2000To3000, Hot) => 0.9,
        (Band2000To3000, Temperate) => 0.88,
        (Band2000To3000, Cold) => 0.82,
        (Band2000To3000, VeryCold) => 0.76,
        (Above3000, Hot) => 0.85,
        (Above3000, Temperate) => 0.82,
        (Above3000, Cold) => 0.75,
        (Above3000, VeryCold) => 0.7,
    }
}

/// Where a node is expected to operate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Surveyed position, when known.
    pub location: Option<Location>,
    /// Altitude band for capacity derating.
    pub altitude_band: AltitudeBand,
    /// Temperature band for capacity derating.
    pub temperature_band: TemperatureBand,
}

/// One build staged for export.
#[derive(Debug)]
pub struct NodeExport<'a> {
    /// Node id.
    pub id: String,
    /// Display label; falls back to the id when empty.
    pub label: String,
    /// Resolved build.
    pub build: &'a NodeBuild<'a>,
    /// Estimate for the build.
    pub estimate: &'a EstimateResult,
    /// Assigned roles.
    pub roles: Vec<String>,
    /// Operating placement.
    pub placement: Placement,
}

/// Optional mission scaffolding attached to a full project export.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Mission metadata object.
    pub mission: Value,
    /// Mission-wide environment object.
    pub environment: Value,
    /// Planning constraints.
    pub constraints: Vec<Value>,
    /// Equipment kits.
    pub kits: Vec<Value>,
    /// Planned links between exported nodes.
    pub mesh_links: Vec<MeshLink>,
    /// Emit the deprecated v1 shape: `schema` key, no capacity derating.
    pub legacy: bool,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn derive_rf_bands(radio: &Radio) -> Vec<String> {
    radio
        .bands
        .iter()
        .map(|band| band.to_lowercase().replace('/', "_"))
        .collect()
}

fn build_platform(host: &Host) -> Platform {
    Platform {
        id: format!("platform-{}", host.id),
        name: host.name.clone(),
        role: "compute".to_string(),
        origin_tool: ORIGIN_TOOL.to_string(),
        specs: PlatformSpecs {
            cpu: host.cpu.clone(),
            ram_gb: host.ram_gb,
            storage: host.storage.clone(),
            power_idle_w: host.power_w_idle,
            power_load_w: host.power_w_load,
            weight_kg: host.weight_kg,
            extra: Extensions::new(),
        },
        extra: Extensions::new(),
    }
}

fn build_node(export: &NodeExport<'_>, legacy: bool) -> MissionNode {
    let build = export.build;
    let estimate = export.estimate;
    let placement = &export.placement;

    let rf_bands = derive_rf_bands(build.radio);
    let cap_factor = if legacy {
        1.0
    } else {
        capacity_factor(placement.altitude_band, placement.temperature_band)
    };
    let adjusted_runtime_h = round2(estimate.runtime_hours * cap_factor);

    let environment = EnvironmentAssumptions {
        propagation: Some(build.environment.clone()),
        altitude_band: Some(placement.altitude_band.as_str().to_string()),
        temperature_band: Some(placement.temperature_band.as_str().to_string()),
        extra: Extensions::new(),
    };

    let name = if export.label.is_empty() {
        export.id.clone()
    } else {
        export.label.clone()
    };

    MissionNode {
        id: export.id.clone(),
        name,
        origin_tool: Some(ORIGIN_TOOL.to_string()),
        platform_id: format!("platform-{}", build.host.id),
        roles: export.roles.clone(),
        rf_bands: rf_bands.clone(),
        power_profile: Some(PowerProfile {
            estimated_draw_w: Some(estimate.total_power_w),
            ideal_runtime_h: Some(estimate.runtime_hours),
            adjusted_runtime_h: Some(adjusted_runtime_h),
            capacity_factor: Some(cap_factor),
            extra: Extensions::new(),
        }),
        environment: Some(environment.clone()),
        capabilities: estimate.capabilities.clone(),
        recommended_role: Some(estimate.recommended_role.clone()),
        host_type: Some(HostType {
            id: build.host.id.clone(),
            name: build.host.name.clone(),
            tags: build.host.tags.clone(),
            extra: Extensions::new(),
        }),
        radios: vec![RadioSnapshot {
            id: build.radio.id.clone(),
            name: build.radio.name.clone(),
            radio_type: build.radio.radio_type.clone(),
            bands: build.radio.bands.clone(),
            extra: Extensions::new(),
        }],
        antennas: vec![AntennaSnapshot {
            id: build.antenna.id.clone(),
            name: build.antenna.name.clone(),
            gain_dbi: build.antenna.gain_dbi,
            pattern: build.antenna.pattern.clone(),
            extra: Extensions::new(),
        }],
        battery: Some(BatterySnapshot {
            id: build.battery.id.clone(),
            capacity_wh: build.battery.capacity_wh,
            chemistry: build.battery.chemistry.clone(),
            tags: build.battery.tags.clone(),
            extra: Extensions::new(),
        }),
        sensors: build
            .sensors
            .iter()
            .map(|sensor| SensorSnapshot {
                id: sensor.id.clone(),
                name: sensor.name.clone(),
                sensor_type: sensor.sensor_type.clone(),
                tags: sensor.tags.clone(),
                extra: Extensions::new(),
            })
            .collect(),
        estimated_runtime_min: Some(round1(adjusted_runtime_h * 60.0)),
        environment_assumptions: Some(environment),
        parts: Some(NodeParts {
            host_id: Some(build.host.id.clone()),
            battery_id: Some(build.battery.id.clone()),
            rf_chains: vec![RfChain {
                radio_id: Some(build.radio.id.clone()),
                antenna_id: Some(build.antenna.id.clone()),
                extra: Extensions::new(),
            }],
            sensor_ids: build.sensors.iter().map(|s| s.id.clone()).collect(),
            extra: Extensions::new(),
        }),
        notes: Some(export.label.clone()),
        location: placement.location.clone(),
        mesh_hints: estimate.range_km.map(|range_km| {
            vec![MeshHint {
                band: rf_bands
                    .first()
                    .cloned()
                    .unwrap_or_else(|| build.radio.radio_type.clone()),
                estimated_range_km: range_km,
                extra: Extensions::new(),
            }]
        }),
        extra: Extensions::new(),
    }
}

fn collect_platforms(exports: &[NodeExport<'_>]) -> Vec<Platform> {
    let mut platforms: Vec<Platform> = Vec::new();
    for export in exports {
        let platform = build_platform(export.build.host);
        if !platforms.iter().any(|existing| existing.id == platform.id) {
            platforms.push(platform);
        }
    }
    platforms
}

fn or_empty_object(value: &Value) -> Value {
    if value.is_null() {
        json!({})
    } else {
        value.clone()
    }
}

/// Assemble a full MissionProject document from staged builds.
///
/// Platforms are deduped across nodes sharing a host. The legacy option emits
/// the deprecated v1 top-level shape (`schema` key, capacity factor pinned to
/// 1.0) for consumers that never upgraded.
pub fn assemble_project(exports: &[NodeExport<'_>], options: &ProjectOptions) -> MissionDocument {
    let schema_version = if options.legacy {
        LEGACY_SCHEMA_TAG
    } else {
        SCHEMA_VERSION
    };

    let mut extra = Extensions::new();
    if options.legacy {
        extra.insert("schema".to_string(), Value::String(LEGACY_SCHEMA_TAG.into()));
    }

    MissionDocument {
        schema_version: Some(schema_version.to_string()),
        origin_tool: Some(ORIGIN_TOOL.to_string()),
        generated_at: if options.legacy {
            None
        } else {
            Some(Utc::now().to_rfc3339())
        },
        mission: or_empty_object(&options.mission),
        environment: or_empty_object(&options.environment),
        constraints: options.constraints.clone(),
        platforms: collect_platforms(exports),
        nodes: exports
            .iter()
            .map(|export| build_node(export, options.legacy))
            .collect(),
        mesh_links: options.mesh_links.clone(),
        kits: options.kits.clone(),
        extra,
    }
}

/// Assemble a nodes/platforms-only bundle aligned to the current schema.
pub fn assemble_node_bundle(exports: &[NodeExport<'_>], mission: Value) -> NodeBundle {
    NodeBundle {
        schema_version: SCHEMA_VERSION.to_string(),
        meta: json!({ "origin_tool": ORIGIN_TOOL }),
        origin_tool: ORIGIN_TOOL.to_string(),
        mission: or_empty_object(&mission),
        platforms: collect_platforms(exports),
        nodes: exports
            .iter()
            .map(|export| build_node(export, false))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceradon_core::Catalog;
    use ceradon_estimator::estimate_node;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "hosts": [{"id": "pi", "name": "Pi", "cpu": "BCM2711", "ram_gb": 4,
                           "power_w_idle": 3.0, "power_w_load": 7.0, "cpu_score": 6,
                           "tags": ["sbc"]}],
                "radios": [
                    {"id": "wl", "name": "WiFi", "radio_type": "wifi",
                     "bands": ["2.4GHz", "5GHz"], "power_w": 2.0,
                     "supports_monitor": true},
                    {"id": "lte", "name": "LTE", "radio_type": "cellular",
                     "band": "lte_b3", "power_w": 2.5}
                ],
                "antennas": [{"id": "omni", "name": "Omni", "gain_dbi": 3.0}],
                "batteries": [{"id": "pack", "name": "Pack", "capacity_wh": 99.0,
                               "chemistry": "li-ion"}],
                "sensors": [{"id": "cam", "name": "Camera", "power_w": 1.0,
                             "sensor_type": "camera"}]
            }"#,
        )
        .unwrap()
    }

    fn node_build<'a>(catalog: &'a Catalog, radio: &str) -> NodeBuild<'a> {
        NodeBuild {
            host: catalog.host("pi").unwrap(),
            radio: catalog.radio(radio).unwrap(),
            antenna: catalog.antenna("omni").unwrap(),
            battery: catalog.battery("pack").unwrap(),
            sensors: vec![catalog.sensor("cam").unwrap()],
            environment: "rural_open".to_string(),
        }
    }

    fn staged<'a>(
        id: &str,
        build: &'a NodeBuild<'a>,
        estimate: &'a EstimateResult,
    ) -> NodeExport<'a> {
        NodeExport {
            id: id.to_string(),
            label: id.replace('-', " "),
            build,
            estimate,
            roles: vec![estimate.recommended_role.clone()],
            placement: Placement::default(),
        }
    }

    #[test]
    fn platforms_are_deduped_by_host() {
        let catalog = catalog();
        let build_a = node_build(&catalog, "wl");
        let build_b = node_build(&catalog, "lte");
        let estimate_a = estimate_node(&build_a);
        let estimate_b = estimate_node(&build_b);
        let exports = vec![
            staged("node-a", &build_a, &estimate_a),
            staged("node-b", &build_b, &estimate_b),
        ];
        let project = assemble_project(&exports, &ProjectOptions::default());

        assert_eq!(project.platforms.len(), 1);
        assert_eq!(project.platforms[0].id, "platform-pi");
        assert!(project
            .nodes
            .iter()
            .all(|node| node.platform_id == "platform-pi"));
    }

    #[test]
    fn node_carries_adjusted_runtime_and_parts() {
        let catalog = catalog();
        let build = node_build(&catalog, "wl");
        let estimate = estimate_node(&build);
        let exports = vec![staged("node-a", &build, &estimate)];
        let project = assemble_project(&exports, &ProjectOptions::default());

        let node = &project.nodes[0];
        let profile = node.power_profile.as_ref().unwrap();
        // default placement: band_2000_3000 x cold = 0.82
        assert_eq!(profile.capacity_factor, Some(0.82));
        assert_eq!(
            profile.adjusted_runtime_h,
            Some(round2(estimate.runtime_hours * 0.82))
        );
        assert_eq!(
            node.estimated_runtime_min,
            Some(round1(profile.adjusted_runtime_h.unwrap() * 60.0))
        );

        let parts = node.parts.as_ref().unwrap();
        assert_eq!(parts.host_id.as_deref(), Some("pi"));
        assert_eq!(parts.battery_id.as_deref(), Some("pack"));
        assert_eq!(parts.rf_chains[0].radio_id.as_deref(), Some("wl"));
        assert_eq!(parts.sensor_ids, vec!["cam"]);
        assert_eq!(node.rf_bands, vec!["2.4ghz", "5ghz"]);
    }

    #[test]
    fn mesh_hint_present_only_with_numeric_range() {
        let catalog = catalog();
        let wifi_build = node_build(&catalog, "wl");
        let lte_build = node_build(&catalog, "lte");
        let wifi_estimate = estimate_node(&wifi_build);
        let lte_estimate = estimate_node(&lte_build);
        let exports = vec![
            staged("node-wifi", &wifi_build, &wifi_estimate),
            staged("node-lte", &lte_build, &lte_estimate),
        ];
        let project = assemble_project(&exports, &ProjectOptions::default());

        let hints = project.nodes[0].mesh_hints.as_ref().unwrap();
        assert_eq!(hints[0].band, "2.4ghz");
        assert!(project.nodes[1].mesh_hints.is_none());
    }

    #[test]
    fn legacy_export_pins_capacity_factor_and_adds_schema_key() {
        let catalog = catalog();
        let build = node_build(&catalog, "wl");
        let estimate = estimate_node(&build);
        let exports = vec![staged("node-a", &build, &estimate)];
        let options = ProjectOptions {
            legacy: true,
            ..Default::default()
        };
        let project = assemble_project(&exports, &options);

        assert_eq!(project.schema_version.as_deref(), Some(LEGACY_SCHEMA_TAG));
        assert_eq!(
            project.extra.get("schema"),
            Some(&Value::String(LEGACY_SCHEMA_TAG.into()))
        );
        assert_eq!(project.generated_at, None);
        let profile = project.nodes[0].power_profile.as_ref().unwrap();
        assert_eq!(profile.capacity_factor, Some(1.0));
        assert_eq!(profile.adjusted_runtime_h, profile.ideal_runtime_h);
    }

    #[test]
    fn bundle_keeps_only_nodes_and_platforms() {
        let catalog = catalog();
        let build = node_build(&catalog, "wl");
        let estimate = estimate_node(&build);
        let exports = vec![staged("node-a", &build, &estimate)];
        let bundle = assemble_node_bundle(&exports, json!({"name": "demo"}));

        assert_eq!(bundle.schema_version, SCHEMA_VERSION);
        assert_eq!(bundle.meta["origin_tool"], json!(ORIGIN_TOOL));
        assert_eq!(bundle.nodes.len(), 1);
        assert_eq!(bundle.platforms.len(), 1);
    }

    #[test]
    fn band_tags_parse_their_wire_names() {
        assert_eq!(
            "band_1000_2000".parse::<AltitudeBand>().unwrap(),
            AltitudeBand::Band1000To2000
        );
        assert_eq!(
            "very_cold".parse::<TemperatureBand>().unwrap(),
            TemperatureBand::VeryCold
        );
        assert!("band_9000".parse::<AltitudeBand>().is_err());
    }

    #[test]
    fn capacity_table_reference_values() {
        assert_eq!(
            capacity_factor(AltitudeBand::SeaLevel, TemperatureBand::Hot),
            1.0
        );
        assert_eq!(
            capacity_factor(AltitudeBand::Above3000, TemperatureBand::VeryCold),
            0.7
        );
        assert_eq!(
            capacity_factor(AltitudeBand::Band2000To3000, TemperatureBand::Cold),
            0.82
        );
    }
}
