//! Map-tool projections: GeoJSON and Cursor-on-Target stubs.
//!
//! Both projections are lossy by design. Only located nodes produce output,
//! and link features require both endpoints to be located.

use serde::Serialize;
use serde_json::{json, Value};

use crate::document::{Location, MissionDocument, ORIGIN_TOOL};

/// CoT type for a friendly ground unit.
pub const COT_TYPE_GROUND_UNIT: &str = "a-f-G-U-C";

/// CoT how for machine-derived GPS positions.
pub const COT_HOW_MACHINE_GPS: &str = "m-g";

/// GeoJSON geometry; the tag doubles as the wire `type` key.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Single position, `[lon, lat]` or `[lon, lat, elevation_m]`.
    Point { coordinates: Vec<f64> },
    /// Node-to-node segment.
    LineString { coordinates: Vec<Vec<f64>> },
}

/// GeoJSON feature.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Point for nodes, LineString for mesh links.
    pub geometry: Geometry,
    /// Free-form properties block.
    pub properties: Value,
}

impl Feature {
    fn new(geometry: Geometry, properties: Value) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Node and link features, nodes first.
    pub features: Vec<Feature>,
}

/// One Cursor-on-Target event stub.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CotEvent {
    /// Node id.
    pub uid: String,
    /// CoT type tag.
    #[serde(rename = "type")]
    pub event_type: &'static str,
    /// Position provenance tag.
    pub how: &'static str,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Height above ellipsoid in meters, when surveyed.
    pub hae: Option<f64>,
    /// Node display name.
    pub name: String,
    /// Estimator role recommendation.
    pub role: Option<String>,
    /// Band and provenance summary.
    pub remarks: String,
}

fn coordinates(location: &Location, lat: f64, lon: f64) -> Vec<f64> {
    // GeoJSON ordering is lon before lat; elevation rides third only when
    // actually surveyed.
    match location.elevation_m {
        Some(elevation) => vec![lon, lat, elevation],
        None => vec![lon, lat],
    }
}

fn origin_for(node_origin: Option<&str>, doc: &MissionDocument) -> String {
    node_origin
        .or(doc.origin_tool.as_deref())
        .unwrap_or(ORIGIN_TOOL)
        .to_string()
}

/// Project located nodes and fully-located mesh links to GeoJSON.
pub fn to_geojson(doc: &MissionDocument) -> FeatureCollection {
    let mut features = Vec::new();

    for node in &doc.nodes {
        let Some(location) = &node.location else {
            continue;
        };
        let Some((lat, lon)) = location.position() else {
            continue;
        };
        let profile = node.power_profile.as_ref();
        features.push(Feature::new(
            Geometry::Point {
                coordinates: coordinates(location, lat, lon),
            },
            json!({
                "id": node.id,
                "name": node.name,
                "origin_tool": origin_for(node.origin_tool.as_deref(), doc),
                "roles": node.roles,
                "recommended_role": node.recommended_role,
                "rf_bands": node.rf_bands,
                "power_draw_w": profile.and_then(|p| p.estimated_draw_w),
                "runtime_h": profile.and_then(|p| p.adjusted_runtime_h),
            }),
        ));
    }

    for link in &doc.mesh_links {
        let endpoint = |id: &str| {
            doc.nodes
                .iter()
                .find(|node| node.id == id)
                .and_then(|node| node.location.as_ref())
                .and_then(|loc| loc.position().map(|(lat, lon)| coordinates(loc, lat, lon)))
        };
        let (Some(start), Some(end)) = (endpoint(&link.from_node), endpoint(&link.to_node)) else {
            continue;
        };
        features.push(Feature::new(
            Geometry::LineString {
                coordinates: vec![start, end],
            },
            json!({
                "id": link.id,
                "origin_tool": link.origin_tool.clone()
                    .unwrap_or_else(|| origin_for(None, doc)),
                "band": link.band,
                "estimated_range_km": link.estimated_range_km,
            }),
        ));
    }

    FeatureCollection {
        kind: "FeatureCollection",
        features,
    }
}

/// Project located nodes to Cursor-on-Target event stubs.
pub fn to_cot_stub(doc: &MissionDocument) -> Vec<CotEvent> {
    let mut events = Vec::new();
    for node in &doc.nodes {
        let Some(location) = &node.location else {
            continue;
        };
        let Some((lat, lon)) = location.position() else {
            continue;
        };
        events.push(CotEvent {
            uid: node.id.clone(),
            event_type: COT_TYPE_GROUND_UNIT,
            how: COT_HOW_MACHINE_GPS,
            lat,
            lon,
            hae: location.elevation_m,
            name: node.name.clone(),
            role: node.recommended_role.clone(),
            remarks: format!(
                "rf: {bands} | origin: {origin}",
                bands = node.rf_bands.join(","),
                origin = origin_for(node.origin_tool.as_deref(), doc)
            ),
        });
    }
    events
}
