//! Legacy-document schema upgrade.
//!
//! `upgrade_project` is idempotent: fields are only filled in when absent,
//! never overwritten, so upgrading an already-current document is a no-op.

use serde_json::{json, Value};

use crate::document::{HostType, MissionDocument, MissionNode, ORIGIN_TOOL, SCHEMA_VERSION};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn upgrade_node(node: &mut MissionNode, document_origin: &str) {
    if node.origin_tool.is_none() {
        node.origin_tool = Some(document_origin.to_string());
    }

    // Mirror environment and environment_assumptions into each other, but
    // never overwrite one that is already present.
    let environment = node
        .environment
        .clone()
        .or_else(|| node.environment_assumptions.clone())
        .unwrap_or_default();
    if node.environment.is_none() {
        node.environment = Some(environment.clone());
    }
    if node.environment_assumptions.is_none() {
        node.environment_assumptions = Some(environment);
    }

    if node.estimated_runtime_min.is_none() {
        let adjusted = node
            .power_profile
            .as_ref()
            .and_then(|profile| profile.adjusted_runtime_h)
            .filter(|hours| *hours != 0.0);
        if let Some(hours) = adjusted {
            node.estimated_runtime_min = Some(round1(hours * 60.0));
        }
    }

    if node.host_type.is_none() {
        if let Some(host_id) = node
            .parts
            .as_ref()
            .and_then(|parts| parts.host_id.clone())
        {
            let parts = node.parts.as_ref().unwrap();
            let name = parts
                .extra
                .get("host_name")
                .and_then(Value::as_str)
                .unwrap_or(&host_id)
                .to_string();
            let tags = parts
                .extra
                .get("host_tags")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            node.host_type = Some(HostType {
                id: host_id,
                name,
                tags,
                extra: Default::default(),
            });
        }
    }
}

/// Bring a document of any accepted vintage up to the current schema.
pub fn upgrade_project(mut doc: MissionDocument) -> MissionDocument {
    doc.schema_version = Some(SCHEMA_VERSION.to_string());
    if doc.origin_tool.is_none() {
        doc.origin_tool = Some(ORIGIN_TOOL.to_string());
    }
    if doc.mission.is_null() {
        doc.mission = json!({});
    }
    if doc.environment.is_null() {
        doc.environment = json!({});
    }

    let document_origin = doc
        .origin_tool
        .clone()
        .unwrap_or_else(|| ORIGIN_TOOL.to_string());
    for node in &mut doc.nodes {
        upgrade_node(node, &document_origin);
    }

    doc
}

/// Parse a MissionProject document, upgrading legacy shapes on the way in.
pub fn parse_project(raw: &str) -> serde_json::Result<MissionDocument> {
    let doc: MissionDocument = serde_json::from_str(raw)?;
    if doc.schema_version.as_deref() == Some(SCHEMA_VERSION) {
        Ok(doc)
    } else {
        Ok(upgrade_project(doc))
    }
}
