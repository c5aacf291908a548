//! Loads a `Scene` from a JSON file — `pf-scene` itself has no file I/O,
//! per the engine's contract (the Scene is always a structured value; this
//! is the host-application side of that contract).

use std::path::Path;

use anyhow::{Context, Result};
use pf_scene::Scene;

/// `Scene`'s own fields are all public (so test fixtures can build one
/// inline without a constructor), which means deserializing it directly
/// would skip `Scene::new`'s invariant checks. Deserialize into the same
/// shape, then funnel the fields back through `Scene::new` so a malformed
/// file is rejected the same way a malformed in-process value would be.
pub fn load(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scene file {}", path.display()))?;
    let raw: Scene = serde_json::from_str(&text)
        .with_context(|| format!("parsing scene file {}", path.display()))?;
    Scene::new(raw.width_m, raw.depth_m, raw.obstacles, raw.entrances, raw.zones, raw.lanes)
        .with_context(|| format!("validating scene file {}", path.display()))
}
