//! Ceradon Node Architect CLI.
//!
//! Estimates power, runtime, range, and roles for RF/sensor node builds and
//! exchanges MissionProject JSON with mapping/ATAK tooling.

mod commands;
mod presets;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ceradon_mission::{AltitudeBand, TemperatureBand};

const ENVIRONMENTS: [&str; 5] = [
    "lab",
    "urban_indoor",
    "urban_outdoor",
    "rural_open",
    "subterranean",
];

#[derive(Parser)]
#[command(name = "ceradon")]
#[command(
    about = "Estimate power, runtime, and roles for RF/sensor nodes (MissionProject schema v2.0.0 exports by default)"
)]
struct Cli {
    /// Path to the component catalog JSON
    #[arg(long, default_value = "data/default_components.json")]
    catalog: PathBuf,

    /// Directory holding bundled build presets
    #[arg(long, default_value = "sample_builds")]
    presets_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all available components
    List,

    /// List bundled sample builds
    Presets,

    /// Simulate a build from a JSON config
    Simulate {
        /// Path to build JSON
        config: Option<PathBuf>,

        /// Preset name from the presets directory
        #[arg(long)]
        preset: Option<String>,

        /// Override environment assumption for range/power scaling
        #[arg(long, value_parser = ENVIRONMENTS)]
        environment: Option<String>,
    },

    /// Export a MissionProject JSON from a build (schema v2.0.0)
    ExportMission {
        /// Output path for mission project JSON
        output: PathBuf,

        /// Path to build JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset name from the presets directory
        #[arg(long)]
        preset: Option<String>,

        #[arg(long, default_value = "Node Architect export")]
        mission_name: String,

        #[arg(long, default_value = "band_2000_3000")]
        altitude_band: AltitudeBand,

        #[arg(long, default_value = "very_cold")]
        temperature_band: TemperatureBand,

        /// Override environment assumption
        #[arg(long, value_parser = ENVIRONMENTS)]
        environment: Option<String>,

        #[arg(long)]
        lat: Option<f64>,

        #[arg(long)]
        lon: Option<f64>,

        #[arg(long)]
        elevation_m: Option<f64>,

        /// Deprecated: emit legacy mission_project_v1 schema instead of
        /// schemaVersion 2.0.0
        #[arg(long)]
        legacy_v1: bool,
    },

    /// Export a MissionProject node bundle skeleton (schema v2.0.0)
    ExportBundle {
        /// Output path for MissionProject bundle JSON
        output: PathBuf,

        /// Path to build JSON; repeatable
        #[arg(long)]
        config: Vec<PathBuf>,

        /// Preset name from the presets directory; repeatable
        #[arg(long)]
        preset: Vec<String>,

        #[arg(long, default_value = "Node Architect export")]
        mission_name: String,

        #[arg(long, default_value = "band_2000_3000")]
        altitude_band: AltitudeBand,

        #[arg(long, default_value = "cold")]
        temperature_band: TemperatureBand,

        /// Override environment assumption for all bundle nodes
        #[arg(long, value_parser = ENVIRONMENTS)]
        environment: Option<String>,
    },

    /// Import a MissionProject JSON and list usable builds
    ImportMission {
        mission_file: PathBuf,

        /// Run the estimator for each usable node
        #[arg(long)]
        simulate: bool,
    },

    /// Export GeoJSON and CoT from a MissionProject JSON
    AtakExport {
        mission_file: PathBuf,

        /// Output GeoJSON path
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Output CoT stub path
        #[arg(long)]
        cot: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    ceradon_core::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List => commands::list_components(&cli.catalog),
        Commands::Presets => commands::list_presets(&cli.presets_dir),
        Commands::Simulate {
            config,
            preset,
            environment,
        } => commands::simulate(
            &cli.catalog,
            &cli.presets_dir,
            config,
            preset,
            environment.as_deref(),
        ),
        Commands::ExportMission {
            output,
            config,
            preset,
            mission_name,
            altitude_band,
            temperature_band,
            environment,
            lat,
            lon,
            elevation_m,
            legacy_v1,
        } => commands::export_mission(commands::ExportMissionArgs {
            catalog: &cli.catalog,
            presets_dir: &cli.presets_dir,
            output,
            config,
            preset,
            mission_name,
            altitude_band,
            temperature_band,
            environment,
            lat,
            lon,
            elevation_m,
            legacy_v1,
        }),
        Commands::ExportBundle {
            output,
            config,
            preset,
            mission_name,
            altitude_band,
            temperature_band,
            environment,
        } => commands::export_bundle(commands::ExportBundleArgs {
            catalog: &cli.catalog,
            presets_dir: &cli.presets_dir,
            output,
            configs: config,
            presets: preset,
            mission_name,
            altitude_band,
            temperature_band,
            environment,
        }),
        Commands::ImportMission {
            mission_file,
            simulate,
        } => commands::import_mission(&cli.catalog, &mission_file, simulate),
        Commands::AtakExport {
            mission_file,
            geojson,
            cot,
        } => commands::atak_export(&mission_file, geojson.as_deref(), cot.as_deref()),
    }
}
