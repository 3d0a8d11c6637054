//! Capability inference from radio class and sensor fit.

use ceradon_core::{Host, Radio, Sensor};

/// Derive capability tags and advisory notes for a build.
///
/// The base radio capability is always appended before sensor-derived
/// entries; downstream consumers rely on that ordering. Duplicates are kept.
pub fn derive_capabilities(
    host: &Host,
    radio: &Radio,
    sensors: &[&Sensor],
) -> (Vec<String>, Vec<String>) {
    let mut capabilities: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    let radio_type = radio.radio_type.to_lowercase();
    match radio_type.as_str() {
        "wifi" => {
            if radio.supports_monitor {
                capabilities.push("WiFi recon / monitor mode scanning".to_string());
            } else {
                capabilities.push("WiFi client/backhaul".to_string());
            }
            if radio.supports_csi {
                capabilities.push(
                    "Potential WiFi CSI / channel analysis (driver support required)".to_string(),
                );
            }
        }
        "lora" => capabilities.push("LoRa telemetry / low-rate sensor network".to_string()),
        "analog_fpv" => capabilities.push("Analog FPV video link".to_string()),
        "sdr" => capabilities.push("SDR-based RF capture / analysis".to_string()),
        "cellular" => capabilities.push("Cellular backhaul for remote deployment".to_string()),
        _ => capabilities.push(format!("{} link", radio.radio_type)),
    }

    let sensor_types: Vec<String> = sensors
        .iter()
        .map(|sensor| sensor.sensor_type.to_lowercase())
        .collect();
    if sensor_types.iter().any(|t| t == "camera") {
        capabilities.push("Video capture".to_string());
    }
    if sensor_types.iter().any(|t| t == "gps") {
        capabilities.push("GPS time/position reference".to_string());
    }
    if sensor_types.iter().any(|t| t == "imu") {
        capabilities.push("IMU / motion sensing".to_string());
    }
    if sensor_types
        .iter()
        .any(|t| t == "environment" || t == "environmental")
    {
        capabilities.push("Environmental sensing (temp/humidity)".to_string());
    }

    // The strong-host and lightweight-model CSI notes are mutually exclusive.
    if host.cpu_score >= 8.0 && radio.supports_csi {
        notes.push("Host strong enough for CSI pose models like WiPose".to_string());
    } else if radio.supports_csi {
        notes.push("CSI available; keep models lightweight (Jetson/RPi)".to_string());
    }

    if radio_type == "cellular" {
        notes.push("Assumes LTE/5G coverage for backhaul".to_string());
    }

    (capabilities, notes)
}
