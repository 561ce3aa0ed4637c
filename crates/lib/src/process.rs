//! Applying a block's declared bindings to its rendered markup.
//!
//! For every `attribute → { source, args }` entry of the block's binding
//! declaration, in declaration order:
//!
//! 1. find where the attribute lives in this block type's markup,
//! 2. ask the named source for a value,
//! 3. splice the value into the markup produced by the previous step.
//!
//! Each step that comes up empty (malformed entry, unmapped attribute, unknown
//! source, no value, target not found in the markup) skips that attribute and
//! leaves its authored value in place. Nothing here fails the render.

use std::borrow::Cow;

use tracing::debug;

use crate::attributes::BlockAttributeMap;
use crate::block::{Binding, Block, BlockInstance};
use crate::html;
use crate::source::SourceRegistry;

/// Applies binding declarations using a registry of sources and a block attribute map.
///
/// Borrows both; processing never modifies either.
#[derive(Debug, Clone, Copy)]
pub struct BindingProcessor<'a> {
  sources: &'a SourceRegistry,
  blocks: &'a BlockAttributeMap,
}

impl<'a> BindingProcessor<'a> {
  pub fn new(sources: &'a SourceRegistry, blocks: &'a BlockAttributeMap) -> Self {
    Self { sources, blocks }
  }

  pub fn sources(&self) -> &'a SourceRegistry {
    self.sources
  }

  pub fn blocks(&self) -> &'a BlockAttributeMap {
    self.blocks
  }

  /// Apply every resolvable binding of `block` to `html`.
  ///
  /// Substitutions run one after another over the same markup, so a later
  /// binding sees the result of an earlier one. Blocks without bindings are
  /// returned as-is without allocating.
  pub fn process<'h>(&self, html: &'h str, block: &Block, instance: &BlockInstance) -> Cow<'h, str> {
    let Some(bindings) = block.bindings() else {
      return Cow::Borrowed(html);
    };

    let mut output = Cow::Borrowed(html);

    for (attribute, declaration) in bindings {
      let Some(binding) = Binding::from_value(declaration) else {
        debug!(block = %block.name, attribute = %attribute, "skipping malformed binding");
        continue;
      };

      if let Some(spliced) = self.apply(&output, block, instance, attribute, &binding) {
        output = Cow::Owned(spliced);
      }
    }

    output
  }

  /// Resolve one binding against `html`, returning the new markup if it changed.
  fn apply(
    &self,
    html: &str,
    block: &Block,
    instance: &BlockInstance,
    attribute: &str,
    binding: &Binding,
  ) -> Option<String> {
    let Some(mapping) = self.blocks.lookup(&block.name, attribute) else {
      debug!(block = %block.name, attribute, "attribute does not support bindings");
      return None;
    };

    let Some(source) = self.sources.get(&binding.source) else {
      debug!(block = %block.name, attribute, source = %binding.source, "binding source not registered");
      return None;
    };

    let Some(value) = source.apply(&binding.args, instance, attribute) else {
      debug!(block = %block.name, attribute, source = %binding.source, "binding source returned no value");
      return None;
    };

    let spliced = html::splice(html, mapping, &value);
    if spliced.is_none() {
      debug!(block = %block.name, attribute, "binding target not found in block markup");
    }
    spliced
  }
}
