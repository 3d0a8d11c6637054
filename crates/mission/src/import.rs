//! Tolerant MissionProject → build import.
//!
//! Import never fails on a bad node: nodes missing required parts are skipped
//! with a warning, and the rest of the document is still honored. Unknown
//! component ids behave the same as absent ones.

use ceradon_core::{Catalog, NodeBuild, DEFAULT_ENVIRONMENT};

use crate::document::{MissionDocument, MissionNode};

/// One node successfully re-resolved against a local catalog.
#[derive(Debug)]
pub struct ImportedNode<'a> {
    /// Node id from the document.
    pub id: String,
    /// Display name from the document.
    pub name: String,
    /// Build resolved against the catalog.
    pub build: NodeBuild<'a>,
}

/// Result of importing a document: re-resolved builds plus non-fatal warnings.
#[derive(Debug, Default)]
pub struct ImportOutcome<'a> {
    /// Nodes whose parts all resolved.
    pub builds: Vec<ImportedNode<'a>>,
    /// Per-node skip and missing-sensor warnings, in document order.
    pub warnings: Vec<String>,
}

fn node_environment(node: &MissionNode) -> String {
    node.environment
        .as_ref()
        .and_then(|env| env.propagation.clone())
        .or_else(|| {
            node.environment_assumptions
                .as_ref()
                .and_then(|env| env.propagation.clone())
        })
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

fn resolve_node<'a>(
    node: &MissionNode,
    catalog: &'a Catalog,
    warnings: &mut Vec<String>,
) -> Option<NodeBuild<'a>> {
    let parts = node.parts.clone().unwrap_or_default();
    let chain = parts.rf_chains.first().cloned().unwrap_or_default();

    let host = parts.host_id.as_deref().and_then(|id| catalog.find_host(id));
    let radio = chain
        .radio_id
        .as_deref()
        .and_then(|id| catalog.find_radio(id));
    let antenna = chain
        .antenna_id
        .as_deref()
        .and_then(|id| catalog.find_antenna(id));
    let battery = parts
        .battery_id
        .as_deref()
        .and_then(|id| catalog.find_battery(id));

    // Sensor gaps are reported even when the node itself ends up skipped;
    // they name real holes in the local inventory either way.
    let mut sensors = Vec::new();
    for sensor_id in &parts.sensor_ids {
        match catalog.find_sensor(sensor_id) {
            Some(sensor) => sensors.push(sensor),
            None => warnings.push(format!(
                "Missing sensor '{sensor_id}' for node {id}",
                id = node.id
            )),
        }
    }

    Some(NodeBuild {
        host: host?,
        radio: radio?,
        antenna: antenna?,
        battery: battery?,
        sensors,
        environment: node_environment(node),
    })
}

/// Re-resolve every node in a document against a local catalog.
///
/// Missing sensors degrade the build (warning, sensor dropped); a missing
/// host, radio, antenna, or battery skips the whole node with a warning.
pub fn project_to_builds<'a>(doc: &MissionDocument, catalog: &'a Catalog) -> ImportOutcome<'a> {
    let mut outcome = ImportOutcome::default();

    for node in &doc.nodes {
        let Some(build) = resolve_node(node, catalog, &mut outcome.warnings) else {
            outcome.warnings.push(format!(
                "Skipping node {} due to missing components (host/radio/antenna/battery)",
                node.id
            ));
            continue;
        };
        outcome.builds.push(ImportedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            build,
        });
    }

    outcome
}
