//! Shared fixtures for the integration tests.

use ceradon_core::{BuildRequest, Catalog, NodeBuild};
use ceradon_estimator::EstimateResult;
use ceradon_mission::{NodeExport, Placement};

/// Path to the shipped component catalog.
pub const CATALOG_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/default_components.json");

/// The recon preset, inlined so tests do not depend on the presets directory.
pub const RECON_BUILD: &str = r#"{
    "host": "rpi4",
    "radio": "mt7612u",
    "antenna": "whip-5dbi",
    "battery": "powerbank-100wh",
    "sensors": ["picam-v3", "gps-neo-m9n"],
    "environment": "urban_outdoor"
}"#;

/// An LTE backhaul build sharing the recon build's host.
pub const BACKHAUL_BUILD: &str = r#"{
    "host": "rpi4",
    "radio": "quectel-ec25",
    "antenna": "omni-2dbi",
    "battery": "powerbank-100wh",
    "sensors": ["gps-neo-m9n"],
    "environment": "urban_outdoor"
}"#;

pub fn load_catalog() -> Catalog {
    Catalog::from_file(CATALOG_PATH).expect("shipped catalog parses")
}

pub fn resolve<'a>(catalog: &'a Catalog, raw: &str) -> NodeBuild<'a> {
    BuildRequest::from_json(raw)
        .expect("build request parses")
        .resolve(catalog)
        .expect("build request resolves")
}

pub fn staged_export<'a>(
    id: &str,
    build: &'a NodeBuild<'a>,
    estimate: &'a EstimateResult,
    placement: Placement,
) -> NodeExport<'a> {
    NodeExport {
        id: id.to_string(),
        label: id.replace('-', " "),
        build,
        estimate,
        roles: vec![estimate.recommended_role.clone()],
        placement,
    }
}
