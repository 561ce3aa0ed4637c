mod blocks;
mod render;
mod sources;

pub use blocks::cmd_blocks;
pub use render::cmd_render;
pub use sources::cmd_sources;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
