//! Human-readable simulation report.

use ceradon_core::NodeBuild;

use crate::estimate::EstimateResult;

/// Render the operator-facing report for one simulated build.
pub fn format_report(build: &NodeBuild<'_>, estimate: &EstimateResult) -> String {
    let mut lines: Vec<String> = vec![
        "Ceradon Node Architect Report".to_string(),
        "==============================".to_string(),
        String::new(),
        "Selected stack:".to_string(),
        format!("- Host: {}", build.host.name),
        format!("- Radio: {}", build.radio.name),
        format!("- Antenna: {}", build.antenna.name),
        format!("- Battery: {}", build.battery.name),
        format!("- Sensors: {}", build.sensor_summary()),
        format!("- Environment: {}", build.environment.replace('_', " ")),
        String::new(),
        "Estimates:".to_string(),
        format!("- Total power draw: {:.2} W", estimate.total_power_w),
        format!("- Runtime (est.): {:.2} hours", estimate.runtime_hours),
    ];

    match estimate.range_km {
        Some(range_km) => lines.push(format!(
            "- Link range (est.): {:.2} km ({})",
            range_km, estimate.range_text
        )),
        None => lines.push(format!("- Link capability: {}", estimate.range_text)),
    }

    lines.push("- Capabilities:".to_string());
    for capability in &estimate.capabilities {
        lines.push(format!("  - {capability}"));
    }
    lines.push(format!("- Recommended role: {}", estimate.recommended_role));
    if let Some(notes) = &estimate.notes {
        lines.push(format!("- Notes: {notes}"));
    }

    lines.join("\n")
}
