//! Legacy document upgrade across the serialize boundary.

use serde_json::{json, Value};

use ceradon_mission::{parse_project, upgrade_project, ORIGIN_TOOL, SCHEMA_VERSION};

fn legacy_raw() -> String {
    json!({
        "schema": "mission_project_v1",
        "mission": {"name": "ridge survey", "ao": "sector 4"},
        "planner_notes": "hand-edited in the field",
        "nodes": [{
            "id": "node-legacy",
            "name": "Legacy ridge node",
            "environment_assumptions": {"propagation": "rural_open"},
            "power_profile": {"estimated_draw_w": 6.1, "adjusted_runtime_h": 9.8},
            "custom_payload": {"firmware": "v7"},
            "parts": {
                "host_id": "rpi4",
                "host_name": "Raspberry Pi 4B (8GB)",
                "host_tags": ["sbc", "linux"],
                "battery_id": "powerbank-100wh",
                "rf_chains": [{"radio_id": "mt7612u", "antenna_id": "whip-5dbi"}],
                "sensor_ids": ["gps-neo-m9n"]
            }
        }]
    })
    .to_string()
}

#[test]
fn legacy_upgrade_survives_serialization_and_stays_idempotent() {
    let upgraded = parse_project(&legacy_raw()).unwrap();
    assert_eq!(upgraded.schema_version.as_deref(), Some(SCHEMA_VERSION));
    assert_eq!(upgraded.origin_tool.as_deref(), Some(ORIGIN_TOOL));

    // serialize, parse, and upgrade again: fixed point
    let reserialized = upgraded.to_json_pretty().unwrap();
    let reparsed = parse_project(&reserialized).unwrap();
    assert_eq!(reparsed, upgraded);
    assert_eq!(upgrade_project(reparsed.clone()), upgraded);
}

#[test]
fn upgrade_backfills_derived_node_fields() {
    let doc = parse_project(&legacy_raw()).unwrap();
    let node = &doc.nodes[0];

    assert_eq!(node.origin_tool.as_deref(), Some(ORIGIN_TOOL));
    assert_eq!(node.estimated_runtime_min, Some(588.0));
    assert_eq!(node.environment, node.environment_assumptions);

    let host_type = node.host_type.as_ref().unwrap();
    assert_eq!(host_type.id, "rpi4");
    assert_eq!(host_type.name, "Raspberry Pi 4B (8GB)");
    assert_eq!(host_type.tags, vec!["sbc", "linux"]);
}

#[test]
fn unknown_fields_survive_the_upgrade_path() {
    let doc = parse_project(&legacy_raw()).unwrap();
    let raw: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();

    assert_eq!(raw["schema"], json!("mission_project_v1"));
    assert_eq!(raw["planner_notes"], json!("hand-edited in the field"));
    assert_eq!(raw["mission"]["ao"], json!("sector 4"));
    assert_eq!(raw["nodes"][0]["custom_payload"]["firmware"], json!("v7"));
    assert_eq!(raw["nodes"][0]["parts"]["host_name"], json!("Raspberry Pi 4B (8GB)"));
}
