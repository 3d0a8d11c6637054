//! Role recommendation rules.
//!
//! Precedence is an explicit ordered table rather than nested conditionals:
//! the first matching rule wins, and the fallback is endurance-based. The
//! order is a contract, not an implementation detail.

use ceradon_core::NodeBuild;

/// Inputs the role rules evaluate over.
#[derive(Debug, Clone)]
pub struct RoleContext {
    /// Lowercased radio class tag.
    pub radio_type: String,
    /// Radio exposes channel state information.
    pub supports_csi: bool,
    /// Radio supports monitor mode.
    pub supports_monitor: bool,
    /// Host compute score, 0-10.
    pub cpu_score: f64,
    /// Estimated runtime in hours; may be infinite.
    pub runtime_hours: f64,
    /// A camera sensor is fitted.
    pub has_camera: bool,
}

impl RoleContext {
    /// Build a rule context from a resolved build and its runtime estimate.
    pub fn from_build(build: &NodeBuild<'_>, runtime_hours: f64) -> Self {
        Self {
            radio_type: build.radio.radio_type.to_lowercase(),
            supports_csi: build.radio.supports_csi,
            supports_monitor: build.radio.supports_monitor,
            cpu_score: build.host.cpu_score,
            runtime_hours,
            has_camera: build
                .sensors
                .iter()
                .any(|s| s.sensor_type.eq_ignore_ascii_case("camera")),
        }
    }
}

struct RoleRule {
    role: &'static str,
    applies: fn(&RoleContext) -> bool,
}

const ROLE_RULES: &[RoleRule] = &[
    // WiFi + CSI + strong compute -> experimental channel analysis
    RoleRule {
        role: "Experimental WiFi CSI / channel analysis node",
        applies: |ctx| {
            ctx.radio_type == "wifi"
                && ctx.supports_csi
                && ctx.cpu_score >= 8.0
                && ctx.runtime_hours >= 2.0
        },
    },
    // WiFi + monitor + decent compute -> recon mapping
    RoleRule {
        role: "Recon / RF mapping node",
        applies: |ctx| {
            ctx.radio_type == "wifi"
                && ctx.supports_monitor
                && ctx.cpu_score >= 6.0
                && ctx.runtime_hours >= 2.0
        },
    },
    // LoRa + long runtime -> perimeter telemetry
    RoleRule {
        role: "Low-power perimeter/telemetry node",
        applies: |ctx| ctx.radio_type == "lora" && ctx.runtime_hours >= 12.0,
    },
    // Analog FPV + camera -> video payload
    RoleRule {
        role: "FPV video relay / payload node",
        applies: |ctx| ctx.radio_type == "analog_fpv" && ctx.has_camera,
    },
    // SDR + decent compute -> RF capture
    RoleRule {
        role: "RF capture / lab or field survey node",
        applies: |ctx| ctx.radio_type == "sdr" && ctx.cpu_score >= 6.0,
    },
    RoleRule {
        role: "Backhaul via LTE/5G; pair with WiFi/USB tether for clients",
        applies: |ctx| ctx.radio_type == "cellular",
    },
];

/// Recommend a fielding role; falls back to endurance thresholds when no
/// rule matches.
pub fn recommend_role(ctx: &RoleContext) -> &'static str {
    for rule in ROLE_RULES {
        if (rule.applies)(ctx) {
            return rule.role;
        }
    }

    if ctx.runtime_hours > 12.0 {
        "Endurance ISR node"
    } else if ctx.runtime_hours < 4.0 {
        "Burst recon / short-mission scout"
    } else {
        "Balanced multi-role field node"
    }
}
