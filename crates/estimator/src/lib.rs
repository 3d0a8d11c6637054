//! Node estimation heuristics
//!
//! Deliberately coarse, deterministic lookups rather than RF link-budget
//! physics: averaged duty-cycle power, bucketed antenna-gain multipliers,
//! fixed per-environment scaling, and an ordered role rule table. The exact
//! bucket edges and multipliers are part of the exchange contract with
//! downstream tooling and must not drift.

pub mod capability;
pub mod estimate;
pub mod report;
pub mod role;

pub use capability::derive_capabilities;
pub use estimate::{
    environment_multiplier, estimate_node, estimate_power, estimate_range_km,
    estimate_runtime_hours, EstimateResult,
};
pub use report::format_report;
pub use role::{recommend_role, RoleContext};
