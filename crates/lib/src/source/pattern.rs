//! `core/pattern-attributes`: per-instance overrides of a synced pattern.
//!
//! A pattern passes its overrides down as block context:
//!
//! ```json
//! { "pattern/overrides": { "<metadata id>": { "content": "Custom text" } } }
//! ```
//!
//! A bound block inside the pattern looks itself up by its `metadata.id`.

use super::{Source, SourceArgs};
use crate::block::BlockInstance;

pub const NAME: &str = "core/pattern-attributes";
pub const LABEL: &str = "Pattern Attributes";

/// Context key under which a pattern exposes its overrides.
pub const OVERRIDES_CONTEXT: &str = "pattern/overrides";

/// The `core/pattern-attributes` source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternOverridesSource;

impl Source for PatternOverridesSource {
  fn apply(&self, _args: &SourceArgs, instance: &BlockInstance, attribute: &str) -> Option<String> {
    let id = instance.metadata_id()?;
    instance
      .context
      .get(OVERRIDES_CONTEXT)?
      .get(id)?
      .get(attribute)?
      .as_str()
      .map(str::to_owned)
  }
}
