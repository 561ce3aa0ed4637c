//! Loading block type declarations from disk.
//!
//! The core block types are always available. Hosts add their own block types
//! with a JSON file holding block.json style attribute declarations:
//!
//! ```json
//! {
//!   "blockTypes": {
//!     "acme/card": {
//!       "attributes": {
//!         "title": { "type": "string", "source": "html", "selector": "h3" },
//!         "link": { "type": "string", "source": "attribute", "selector": "a", "attribute": "href" }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! The file is named on the command line or through `BLOCKBIND_BLOCK_TYPES`.
//! Block types in the file replace core block types of the same name.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::attributes::{AttributeError, BlockAttributeMap, BlockType, BlockTypeDeclaration};
use crate::consts::BLOCK_TYPES_ENV;

/// Errors that can occur when loading block type declarations.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the declaration file.
  #[error("failed to read block types from {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The file is not valid JSON or has the wrong shape.
  #[error("failed to parse block types: {0}")]
  Parse(#[source] serde_json::Error),

  /// A block type declares an attribute that can't be located in markup.
  #[error(transparent)]
  Attribute(#[from] AttributeError),
}

#[derive(Debug, Deserialize)]
struct BlockTypesFile {
  #[serde(rename = "blockTypes", default)]
  block_types: BTreeMap<String, BlockTypeDeclaration>,
}

/// The declaration file to load, if any.
///
/// An explicit path wins over `BLOCKBIND_BLOCK_TYPES`; an empty variable counts as unset.
pub fn block_types_path(explicit: Option<&Path>) -> Option<PathBuf> {
  if let Some(path) = explicit {
    return Some(path.to_path_buf());
  }

  std::env::var_os(BLOCK_TYPES_ENV)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
}

/// Parse the block types declared in a JSON document.
pub fn parse_block_types(content: &str) -> Result<Vec<BlockType>, ConfigError> {
  let file: BlockTypesFile = serde_json::from_str(content).map_err(ConfigError::Parse)?;

  file
    .block_types
    .iter()
    .map(|(name, declaration)| BlockType::from_declaration(name.as_str(), declaration).map_err(ConfigError::from))
    .collect()
}

/// Build the block attribute map: core block types, then those declared in `path`.
pub fn load_block_types(path: Option<&Path>) -> Result<BlockAttributeMap, ConfigError> {
  let mut map = BlockAttributeMap::core();

  let Some(path) = path else {
    debug!("no block type declarations configured, using core block types");
    return Ok(map);
  };

  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let block_types = parse_block_types(&content)?;
  info!(
    path = %path.display(),
    block_type_count = block_types.len(),
    "loaded block type declarations"
  );

  for block_type in block_types {
    map.insert(block_type);
  }
  Ok(map)
}
