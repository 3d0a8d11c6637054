//! GeoJSON and CoT projections of an assembled project.

use serde_json::json;

use ceradon_estimator::estimate_node;
use ceradon_mission::document::{Location, MeshLink};
use ceradon_mission::{
    assemble_project, parse_project, to_cot_stub, to_geojson, Placement, ProjectOptions,
};

use crate::test_utils::{load_catalog, resolve, staged_export, BACKHAUL_BUILD, RECON_BUILD};

fn placement(lat: f64, lon: f64, elevation_m: Option<f64>) -> Placement {
    Placement {
        location: Some(Location {
            lat: Some(lat),
            lon: Some(lon),
            elevation_m,
            extra: Default::default(),
        }),
        ..Default::default()
    }
}

#[test]
fn located_project_projects_to_geojson_and_cot() {
    let catalog = load_catalog();
    let recon = resolve(&catalog, RECON_BUILD);
    let backhaul = resolve(&catalog, BACKHAUL_BUILD);
    let recon_estimate = estimate_node(&recon);
    let backhaul_estimate = estimate_node(&backhaul);

    let exports = vec![
        staged_export(
            "node-recon",
            &recon,
            &recon_estimate,
            placement(46.2, 7.5, Some(2100.0)),
        ),
        staged_export(
            "node-backhaul",
            &backhaul,
            &backhaul_estimate,
            placement(46.1, 7.4, None),
        ),
    ];
    let options = ProjectOptions {
        mesh_links: vec![MeshLink {
            id: Some("link-1".to_string()),
            from_node: "node-recon".to_string(),
            to_node: "node-backhaul".to_string(),
            band: Some("2.4ghz".to_string()),
            estimated_range_km: recon_estimate.range_km,
            origin_tool: None,
            extra: Default::default(),
        }],
        ..Default::default()
    };
    let project = assemble_project(&exports, &options);

    // round trip through the wire format before projecting
    let doc = parse_project(&project.to_json_pretty().unwrap()).unwrap();

    let geojson = serde_json::to_value(to_geojson(&doc)).unwrap();
    let features = geojson["features"].as_array().unwrap();
    assert_eq!(geojson["type"], json!("FeatureCollection"));
    assert_eq!(features.len(), 3);

    assert_eq!(features[0]["geometry"]["type"], json!("Point"));
    assert_eq!(
        features[0]["geometry"]["coordinates"],
        json!([7.5, 46.2, 2100.0])
    );
    assert_eq!(features[0]["properties"]["id"], json!("node-recon"));
    assert_eq!(
        features[0]["properties"]["rf_bands"],
        json!(["2.4ghz", "5ghz"])
    );

    // second point has no surveyed elevation
    assert_eq!(features[1]["geometry"]["coordinates"], json!([7.4, 46.1]));

    assert_eq!(features[2]["geometry"]["type"], json!("LineString"));
    assert_eq!(features[2]["properties"]["id"], json!("link-1"));

    let events = to_cot_stub(&doc);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].uid, "node-recon");
    assert_eq!(events[0].event_type, "a-f-G-U-C");
    assert_eq!(events[0].how, "m-g");
    assert_eq!(events[0].remarks, "rf: 2.4ghz,5ghz | origin: ceradon");
    assert_eq!(events[1].hae, None);
}

#[test]
fn unlocated_nodes_produce_no_features() {
    let catalog = load_catalog();
    let recon = resolve(&catalog, RECON_BUILD);
    let estimate = estimate_node(&recon);
    let exports = vec![staged_export(
        "node-recon",
        &recon,
        &estimate,
        Placement::default(),
    )];
    let project = assemble_project(&exports, &ProjectOptions::default());

    assert!(to_geojson(&project).features.is_empty());
    assert!(to_cot_stub(&project).is_empty());
}
