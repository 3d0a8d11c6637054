//! Power, runtime, and range estimation.

use ceradon_core::{Antenna, Battery, Host, NodeBuild, Radio, Sensor};
use serde::Serialize;

use crate::capability::derive_capabilities;
use crate::role::{recommend_role, RoleContext};

/// Scaling applied to both power draw and range per environment tag.
const ENVIRONMENT_MULTIPLIERS: &[(&str, f64)] = &[
    ("lab", 0.8),
    ("urban_indoor", 0.3),
    ("urban_outdoor", 0.6),
    ("rural_open", 1.0),
    ("subterranean", 0.2),
];

// Baseline open-terrain range in km by radio class and band.
const BASELINE_WIFI_2_4_KM: f64 = 0.15; // ~150 m open
const BASELINE_WIFI_5_KM: f64 = 0.08; // ~80 m open, also 6 GHz
const BASELINE_LORA_KM: f64 = 2.0;
const BASELINE_ANALOG_FPV_KM: f64 = 1.0;
const BASELINE_SDR_KM: f64 = 0.5;
const BASELINE_OTHER_KM: f64 = 0.3;

/// Estimation output for one build. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EstimateResult {
    /// Total draw in watts after environment scaling.
    pub total_power_w: f64,
    /// Battery runtime in hours; infinite for a zero-draw build.
    pub runtime_hours: f64,
    /// Estimated point-to-point range in km; `None` for backhaul radios.
    pub range_km: Option<f64>,
    /// Human-readable range sentence, always present.
    pub range_text: String,
    /// Capability tags in derivation order, duplicates kept.
    pub capabilities: Vec<String>,
    /// Recommended fielding role.
    pub recommended_role: String,
    /// Joined advisory notes, when any.
    pub notes: Option<String>,
}

/// Multiplier for an environment tag; unknown tags scale by 1.0.
pub fn environment_multiplier(environment: &str) -> f64 {
    ENVIRONMENT_MULTIPLIERS
        .iter()
        .find(|(tag, _)| *tag == environment)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Approximate draw: averaged host and radio power plus the sensor budget,
/// scaled by the environment multiplier and rounded to 2 decimals.
pub fn estimate_power(
    host: &Host,
    radio: &Radio,
    sensors: &[&Sensor],
    environment_factor: f64,
) -> f64 {
    let sensor_draw: f64 = sensors.iter().map(|s| s.power_w).sum();
    let total = (host.average_power_w() + radio.average_power_w() + sensor_draw)
        * environment_factor;
    round2(total)
}

/// Hours on battery at the given load. Zero or negative load means the build
/// idles forever rather than failing the estimate.
pub fn estimate_runtime_hours(battery: &Battery, load_w: f64) -> f64 {
    if load_w <= 0.0 {
        return f64::INFINITY;
    }
    round2(battery.capacity_wh / load_w)
}

/// Bucketed gain-to-multiplier mapping over the combined antenna and radio
/// gain. Directional patterns get a flat 2 dB bonus instead of link math.
fn antenna_gain_modifier(antenna: &Antenna, radio: &Radio) -> f64 {
    let mut gain = antenna.gain_dbi + radio.antenna_gain_db;
    let pattern = antenna.pattern.to_lowercase();
    if pattern != "omni" && pattern != "whip" {
        gain += 2.0;
    }

    if gain <= 2.0 {
        1.0
    } else if gain <= 5.0 {
        1.2
    } else if gain <= 9.0 {
        1.5
    } else if gain <= 14.0 {
        2.5
    } else {
        3.5
    }
}

/// Coarse point-to-point range estimate with a descriptive sentence.
///
/// Cellular radios return no numeric range, only the backhaul/tether
/// description; everything else gets baseline × gain bucket × environment,
/// rounded to 3 decimals.
pub fn estimate_range_km(
    radio: &Radio,
    antenna: &Antenna,
    environment: &str,
) -> (Option<f64>, String) {
    let radio_type = radio.radio_type.to_lowercase();
    let band = radio.primary_band().unwrap_or_default().to_lowercase();

    let baseline = match radio_type.as_str() {
        "wifi" => {
            if band.contains("2.4") {
                BASELINE_WIFI_2_4_KM
            } else {
                BASELINE_WIFI_5_KM
            }
        }
        "lora" => BASELINE_LORA_KM,
        "analog_fpv" => BASELINE_ANALOG_FPV_KM,
        "sdr" => BASELINE_SDR_KM,
        "cellular" => {
            let text =
                "Backhaul via 4G/5G network – local RF range depends on client WiFi/USB tether";
            return (None, text.to_string());
        }
        _ => BASELINE_OTHER_KM,
    };

    let multiplier = antenna_gain_modifier(antenna, radio) * environment_multiplier(environment);
    let range_km = round3(baseline * multiplier);
    let text = format!(
        "Approx. {:.2} km in {}",
        range_km,
        environment.replace('_', " ")
    );
    (Some(range_km), text)
}

/// Full estimate for one build.
pub fn estimate_node(build: &NodeBuild<'_>) -> EstimateResult {
    let environment_factor = environment_multiplier(&build.environment);
    let total_power_w = estimate_power(build.host, build.radio, &build.sensors, environment_factor);
    let runtime_hours = estimate_runtime_hours(build.battery, total_power_w);
    let (range_km, range_text) = estimate_range_km(build.radio, build.antenna, &build.environment);
    let (capabilities, notes) = derive_capabilities(build.host, build.radio, &build.sensors);
    let recommended_role =
        recommend_role(&RoleContext::from_build(build, runtime_hours)).to_string();

    EstimateResult {
        total_power_w,
        runtime_hours,
        range_km,
        range_text,
        capabilities,
        recommended_role,
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        },
    }
}
