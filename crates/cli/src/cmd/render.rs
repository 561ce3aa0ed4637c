//! Implementation of the `blockbind render` command.
//!
//! Reads a document of parsed blocks, applies each block's bindings to its
//! `innerHTML` and prints the resulting markup.
//!
//! # Document Format
//!
//! ```json
//! {
//!   "context": { "postId": 1 },
//!   "blocks": [
//!     {
//!       "blockName": "core/paragraph",
//!       "attrs": { "metadata": { "bindings": { "content": { "source": "core/post-meta", "args": { "key": "subtitle" } } } } },
//!       "innerHTML": "<p>Placeholder</p>",
//!       "context": {}
//!     }
//!   ]
//! }
//! ```
//!
//! The document context applies to every block; a block's own context is
//! layered on top of it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use blockbind_lib::config::{block_types_path, load_block_types};
use blockbind_lib::source::InMemoryMetaStore;
use blockbind_lib::{BindingProcessor, Block, BlockInstance, SourceRegistry};

use super::read_json;
use crate::output::{OutputFormat, print_info, print_json};

#[derive(Debug, Deserialize)]
struct RenderDocument {
  #[serde(default)]
  context: Map<String, Value>,
  blocks: Vec<DocumentBlock>,
}

#[derive(Debug, Deserialize)]
struct DocumentBlock {
  #[serde(flatten)]
  block: Block,
  #[serde(default)]
  context: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct RenderedBlock<'a> {
  #[serde(rename = "blockName")]
  name: &'a str,
  html: String,
}

pub fn cmd_render(document: &Path, block_types: Option<&Path>, meta: Option<&Path>, format: OutputFormat) -> Result<()> {
  let document: RenderDocument = read_json(document).context("Failed to load block document")?;

  let meta: InMemoryMetaStore = match meta {
    Some(path) => read_json(path).context("Failed to load post meta")?,
    None => InMemoryMetaStore::default(),
  };

  let blocks = load_block_types(block_types_path(block_types).as_deref()).context("Failed to load block types")?;
  let sources = SourceRegistry::with_core_sources(meta);
  let processor = BindingProcessor::new(&sources, &blocks);

  let rendered: Vec<RenderedBlock<'_>> = document
    .blocks
    .iter()
    .map(|entry| {
      let mut context = document.context.clone();
      context.extend(entry.context.clone());

      let instance = BlockInstance::from_block(&entry.block, context);
      let html = processor.process(&entry.block.inner_html, &entry.block, &instance);
      debug!(block = %entry.block.name, changed = (html != entry.block.inner_html), "rendered block");

      RenderedBlock {
        name: &entry.block.name,
        html: html.into_owned(),
      }
    })
    .collect();

  if format.is_json() {
    return print_json(&rendered);
  }

  if rendered.is_empty() {
    print_info("Document contains no blocks.");
    return Ok(());
  }

  for block in &rendered {
    println!("{}", block.html);
  }
  Ok(())
}
