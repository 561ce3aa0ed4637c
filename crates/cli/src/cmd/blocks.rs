//! Implementation of the `blockbind blocks` command.

use std::path::Path;

use anyhow::{Context, Result};

use blockbind_lib::config::{block_types_path, load_block_types};
use blockbind_lib::{AttributeKind, AttributeMapping};

use crate::output::{OutputFormat, print_json, symbols};

pub fn cmd_blocks(block_types: Option<&Path>, format: OutputFormat) -> Result<()> {
  let blocks = load_block_types(block_types_path(block_types).as_deref()).context("Failed to load block types")?;

  if format.is_json() {
    return print_json(&blocks);
  }

  for block_type in blocks.block_types() {
    println!("{}", block_type.name);
    for (attribute, mapping) in &block_type.attributes {
      println!("  {} {} {}", attribute, symbols::ARROW, describe(mapping));
    }
  }
  Ok(())
}

fn describe(mapping: &AttributeMapping) -> String {
  let selector = mapping.selectors.join(",");
  match (mapping.kind, mapping.html_attribute_name.as_deref()) {
    (AttributeKind::Attribute, Some(name)) => format!("{}[{}]", selector, name),
    _ => format!("text of <{}>", selector),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn describes_text_and_attribute_mappings() {
    assert_eq!(describe(&AttributeMapping::text("h1,h2")), "text of <h1,h2>");
    assert_eq!(describe(&AttributeMapping::attribute("img", "src")), "img[src]");
  }
}
