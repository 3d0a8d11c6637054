//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use serde_json::json;

use ceradon_core::{BuildRequest, Catalog, NodeBuild};
use ceradon_estimator::{estimate_node, format_report, EstimateResult};
use ceradon_mission::document::Location;
use ceradon_mission::{
    assemble_node_bundle, assemble_project, parse_project, project_to_builds, to_cot_stub,
    to_geojson, AltitudeBand, NodeExport, Placement, ProjectOptions, TemperatureBand,
};

use crate::presets;

/// Print the catalog, one section per component family.
pub fn list_components(catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::from_file(catalog_path)?;

    println!("HOSTS");
    for host in &catalog.hosts {
        println!("- {}: {} ({})", host.id, host.name, host.notes);
    }
    println!();

    println!("RADIOS");
    for radio in &catalog.radios {
        println!(
            "- {}: {} ({}, {})",
            radio.id,
            radio.name,
            radio.radio_type,
            radio.band_label()
        );
    }
    println!();

    println!("ANTENNAS");
    for antenna in &catalog.antennas {
        println!(
            "- {}: {} ({} dBi, {})",
            antenna.id, antenna.name, antenna.gain_dbi, antenna.pattern
        );
    }
    println!();

    println!("BATTERIES");
    for battery in &catalog.batteries {
        println!(
            "- {}: {} ({} Wh, {})",
            battery.id, battery.name, battery.capacity_wh, battery.chemistry
        );
    }
    println!();

    println!("SENSORS");
    for sensor in &catalog.sensors {
        println!("- {}: {} ({})", sensor.id, sensor.name, sensor.notes);
    }
    println!();

    Ok(())
}

/// Print bundled preset names with their descriptions.
pub fn list_presets(presets_dir: &Path) -> Result<()> {
    for (name, description) in presets::list(presets_dir)? {
        if description.is_empty() {
            println!("{name}");
        } else {
            println!("{name} - {description}");
        }
    }
    Ok(())
}

fn resolve_config(
    presets_dir: &Path,
    config: Option<PathBuf>,
    preset: Option<String>,
    command: &str,
) -> Result<PathBuf> {
    if let Some(name) = preset {
        return presets::resolve(presets_dir, &name);
    }
    config.ok_or_else(|| anyhow!("{command} requires a config path or --preset"))
}

fn load_build<'a>(
    catalog: &'a Catalog,
    config_path: &Path,
    environment_override: Option<&str>,
) -> Result<NodeBuild<'a>> {
    let raw = fs::read_to_string(config_path)?;
    let request = BuildRequest::from_json(&raw)?;
    let mut build = request.resolve(catalog)?;
    if let Some(environment) = environment_override {
        build.environment = environment.to_string();
    }
    Ok(build)
}

fn config_stem(config_path: &Path) -> String {
    config_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("build")
        .to_string()
}

/// Simulate one build and print the operator report.
pub fn simulate(
    catalog_path: &Path,
    presets_dir: &Path,
    config: Option<PathBuf>,
    preset: Option<String>,
    environment_override: Option<&str>,
) -> Result<()> {
    let config_path = resolve_config(presets_dir, config, preset, "simulate")?;
    let catalog = Catalog::from_file(catalog_path)?;
    let build = load_build(&catalog, &config_path, environment_override)?;
    let estimate = estimate_node(&build);
    println!("{}", format_report(&build, &estimate));
    Ok(())
}

pub struct ExportMissionArgs<'a> {
    pub catalog: &'a Path,
    pub presets_dir: &'a Path,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub mission_name: String,
    pub altitude_band: AltitudeBand,
    pub temperature_band: TemperatureBand,
    pub environment: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub elevation_m: Option<f64>,
    pub legacy_v1: bool,
}

/// Export a single-build MissionProject document.
pub fn export_mission(args: ExportMissionArgs<'_>) -> Result<()> {
    let config_path = resolve_config(
        args.presets_dir,
        args.config,
        args.preset,
        "export-mission",
    )?;
    let catalog = Catalog::from_file(args.catalog)?;
    let build = load_build(&catalog, &config_path, args.environment.as_deref())?;
    let estimate = estimate_node(&build);

    let stem = config_stem(&config_path);
    let location = if args.lat.is_none() && args.lon.is_none() && args.elevation_m.is_none() {
        None
    } else {
        Some(Location {
            lat: args.lat,
            lon: args.lon,
            elevation_m: args.elevation_m,
            extra: Default::default(),
        })
    };

    let export = NodeExport {
        id: format!("node-{stem}"),
        label: stem.replace('_', " "),
        build: &build,
        estimate: &estimate,
        roles: vec![estimate.recommended_role.clone()],
        placement: Placement {
            location,
            altitude_band: args.altitude_band,
            temperature_band: args.temperature_band,
        },
    };

    let options = ProjectOptions {
        mission: json!({ "name": args.mission_name }),
        environment: json!({
            "propagation": build.environment.clone(),
            "altitude_band": args.altitude_band.as_str(),
            "temperature_band": args.temperature_band.as_str(),
        }),
        legacy: args.legacy_v1,
        ..Default::default()
    };

    let project = assemble_project(std::slice::from_ref(&export), &options);
    fs::write(&args.output, project.to_json_pretty()?)?;
    println!("MissionProject written to {}", args.output.display());
    Ok(())
}

pub struct ExportBundleArgs<'a> {
    pub catalog: &'a Path,
    pub presets_dir: &'a Path,
    pub output: PathBuf,
    pub configs: Vec<PathBuf>,
    pub presets: Vec<String>,
    pub mission_name: String,
    pub altitude_band: AltitudeBand,
    pub temperature_band: TemperatureBand,
    pub environment: Option<String>,
}

/// Export a nodes/platforms-only bundle from one or more builds.
pub fn export_bundle(args: ExportBundleArgs<'_>) -> Result<()> {
    let mut config_paths = args.configs;
    for name in &args.presets {
        config_paths.push(presets::resolve(args.presets_dir, name)?);
    }
    if config_paths.is_empty() {
        bail!("At least one --config or --preset is required to export a bundle");
    }

    let catalog = Catalog::from_file(args.catalog)?;
    let mut staged: Vec<(String, NodeBuild<'_>, EstimateResult)> = Vec::new();
    for config_path in &config_paths {
        let build = load_build(&catalog, config_path, args.environment.as_deref())?;
        let estimate = estimate_node(&build);
        staged.push((config_stem(config_path), build, estimate));
    }

    let exports: Vec<NodeExport<'_>> = staged
        .iter()
        .map(|(stem, build, estimate)| NodeExport {
            id: format!("node-{stem}"),
            label: stem.replace('_', " "),
            build,
            estimate,
            roles: vec![estimate.recommended_role.clone()],
            placement: Placement {
                location: None,
                altitude_band: args.altitude_band,
                temperature_band: args.temperature_band,
            },
        })
        .collect();

    let bundle = assemble_node_bundle(&exports, json!({ "name": args.mission_name }));
    fs::write(&args.output, serde_json::to_string_pretty(&bundle)?)?;
    println!("MissionProject bundle written to {}", args.output.display());
    Ok(())
}

/// Re-resolve a MissionProject against the local catalog and list the builds.
pub fn import_mission(catalog_path: &Path, mission_file: &Path, simulate: bool) -> Result<()> {
    let raw = fs::read_to_string(mission_file)?;
    let doc = parse_project(&raw)?;
    let catalog = Catalog::from_file(catalog_path)?;

    let outcome = project_to_builds(&doc, &catalog);
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }

    for imported in &outcome.builds {
        if simulate {
            let estimate = estimate_node(&imported.build);
            println!("{}", format_report(&imported.build, &estimate));
        } else {
            let build = &imported.build;
            println!(
                "{}: {} + {} + {} + {} [{}] ({})",
                imported.id,
                build.host.name,
                build.radio.name,
                build.antenna.name,
                build.battery.name,
                build.sensor_summary(),
                build.environment
            );
        }
    }
    Ok(())
}

/// Project a MissionProject to GeoJSON and/or CoT stub files.
pub fn atak_export(
    mission_file: &Path,
    geojson_path: Option<&Path>,
    cot_path: Option<&Path>,
) -> Result<()> {
    let raw = fs::read_to_string(mission_file)?;
    let doc = parse_project(&raw)?;

    if let Some(path) = geojson_path {
        let collection = to_geojson(&doc);
        fs::write(path, serde_json::to_string_pretty(&collection)?)?;
        println!("GeoJSON written to {}", path.display());
    }
    if let Some(path) = cot_path {
        let events = to_cot_stub(&doc);
        fs::write(path, serde_json::to_string_pretty(&events)?)?;
        println!("CoT stub written to {}", path.display());
    }
    Ok(())
}
