//! Workspace-level integration tests.
//!
//! These exercise the full pipeline across crates: catalog loading, build
//! resolution, estimation, MissionProject export, legacy upgrade, tolerant
//! import, and the GeoJSON/CoT projections.

pub mod test_utils;

#[cfg(test)]
mod projection_tests;

#[cfg(test)]
mod round_trip_tests;

#[cfg(test)]
mod upgrade_tests;
