//! MissionProject schema translation.
//!
//! Bidirectional bridge between resolved node builds and the versioned
//! MissionProject JSON exchanged with mapping and ATAK-adjacent tooling:
//! export, tolerant import, legacy schema upgrade, and lossy GeoJSON/CoT
//! projections. Unknown wire fields are preserved end to end.

pub mod document;
pub mod export;
pub mod geo;
pub mod import;
pub mod upgrade;

pub use document::{
    MissionDocument, MissionNode, NodeBundle, Platform, LEGACY_SCHEMA_TAG, ORIGIN_TOOL,
    SCHEMA_VERSION,
};
pub use export::{
    assemble_node_bundle, assemble_project, capacity_factor, AltitudeBand, NodeExport, Placement,
    ProjectOptions, TemperatureBand,
};
pub use geo::{to_cot_stub, to_geojson, CotEvent, FeatureCollection};
pub use import::{project_to_builds, ImportOutcome, ImportedNode};
pub use upgrade::{parse_project, upgrade_project};
