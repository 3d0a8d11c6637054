//! Bundled build presets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ceradon_core::BuildRequest;

/// Preset name and description pairs, sorted by name.
pub fn list(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut presets = Vec::new();
    if !dir.exists() {
        return Ok(presets);
    }

    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        let request = BuildRequest::from_json(&raw)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        presets.push((stem.to_string(), request.description));
    }

    presets.sort();
    Ok(presets)
}

/// Resolve a preset name to its JSON path.
pub fn resolve(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        bail!("Preset '{name}' not found in {}", dir.display());
    }
    Ok(path)
}
