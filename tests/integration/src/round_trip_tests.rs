//! Export → serialize → parse → import round trips.

use serde_json::{json, Value};

use ceradon_estimator::estimate_node;
use ceradon_mission::{
    assemble_project, parse_project, project_to_builds, Placement, ProjectOptions, SCHEMA_VERSION,
};

use crate::test_utils::{load_catalog, resolve, staged_export, BACKHAUL_BUILD, RECON_BUILD};

#[test]
fn exported_project_reimports_to_the_same_build() {
    let catalog = load_catalog();
    let build = resolve(&catalog, RECON_BUILD);
    let estimate = estimate_node(&build);

    let exports = vec![staged_export(
        "node-recon",
        &build,
        &estimate,
        Placement::default(),
    )];
    let project = assemble_project(&exports, &ProjectOptions::default());
    let raw = project.to_json_pretty().unwrap();

    let parsed = parse_project(&raw).unwrap();
    assert_eq!(parsed.schema_version.as_deref(), Some(SCHEMA_VERSION));

    let outcome = project_to_builds(&parsed, &catalog);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.builds.len(), 1);

    let imported = &outcome.builds[0];
    assert_eq!(imported.id, "node-recon");
    assert_eq!(imported.build.host.id, build.host.id);
    assert_eq!(imported.build.radio.id, build.radio.id);
    assert_eq!(imported.build.antenna.id, build.antenna.id);
    assert_eq!(imported.build.battery.id, build.battery.id);
    assert_eq!(imported.build.sensors.len(), 2);
    assert_eq!(imported.build.environment, "urban_outdoor");

    // the reimported build estimates identically
    assert_eq!(estimate_node(&imported.build), estimate);
}

#[test]
fn reference_recon_estimates_survive_export() {
    // rpi4 (3+7)/2 + mt7612u (2+1)/2 + sensors 0.5 = 7.0 W, urban_outdoor x0.6
    let catalog = load_catalog();
    let build = resolve(&catalog, RECON_BUILD);
    let estimate = estimate_node(&build);
    assert_eq!(estimate.total_power_w, 4.2);
    assert_eq!(estimate.runtime_hours, 22.86);
    assert_eq!(estimate.range_km, Some(0.108));
    assert_eq!(estimate.recommended_role, "Recon / RF mapping node");

    let exports = vec![staged_export(
        "node-recon",
        &build,
        &estimate,
        Placement::default(),
    )];
    let project = assemble_project(&exports, &ProjectOptions::default());
    let node = &project.nodes[0];
    let profile = node.power_profile.as_ref().unwrap();
    assert_eq!(profile.estimated_draw_w, Some(4.2));
    assert_eq!(profile.ideal_runtime_h, Some(22.86));
    assert_eq!(node.rf_bands, vec!["2.4ghz", "5ghz"]);
}

#[test]
fn nodes_sharing_a_host_share_one_platform() {
    let catalog = load_catalog();
    let recon = resolve(&catalog, RECON_BUILD);
    let backhaul = resolve(&catalog, BACKHAUL_BUILD);
    let recon_estimate = estimate_node(&recon);
    let backhaul_estimate = estimate_node(&backhaul);

    let exports = vec![
        staged_export("node-recon", &recon, &recon_estimate, Placement::default()),
        staged_export(
            "node-backhaul",
            &backhaul,
            &backhaul_estimate,
            Placement::default(),
        ),
    ];
    let project = assemble_project(&exports, &ProjectOptions::default());

    assert_eq!(project.platforms.len(), 1);
    assert_eq!(project.platforms[0].id, "platform-rpi4");
    assert_eq!(project.nodes.len(), 2);

    // cellular backhaul node has no numeric range, so no mesh hints
    assert!(project.nodes[0].mesh_hints.is_some());
    assert!(project.nodes[1].mesh_hints.is_none());
}

#[test]
fn missing_local_components_degrade_instead_of_failing() {
    let catalog = load_catalog();
    let build = resolve(&catalog, RECON_BUILD);
    let estimate = estimate_node(&build);
    let exports = vec![staged_export(
        "node-recon",
        &build,
        &estimate,
        Placement::default(),
    )];
    let project = assemble_project(&exports, &ProjectOptions::default());

    // sabotage the document: one unknown sensor, one sibling with a ghost battery
    let mut raw: Value = serde_json::from_str(&project.to_json_pretty().unwrap()).unwrap();
    raw["nodes"][0]["parts"]["sensor_ids"]
        .as_array_mut()
        .unwrap()
        .push(json!("thermal-ghost"));
    let mut broken = raw["nodes"][0].clone();
    broken["id"] = json!("node-broken");
    broken["parts"]["battery_id"] = json!("ghost-pack");
    raw["nodes"].as_array_mut().unwrap().push(broken);

    let parsed = parse_project(&raw.to_string()).unwrap();
    let outcome = project_to_builds(&parsed, &catalog);

    assert_eq!(outcome.builds.len(), 1);
    assert_eq!(outcome.builds[0].id, "node-recon");
    assert_eq!(outcome.builds[0].build.sensors.len(), 2);
    assert!(outcome
        .warnings
        .contains(&"Missing sensor 'thermal-ghost' for node node-recon".to_string()));
    assert!(outcome.warnings.contains(
        &"Skipping node node-broken due to missing components (host/radio/antenna/battery)"
            .to_string()
    ));
}
