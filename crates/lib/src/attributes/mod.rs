//! Where bindable block attributes live in rendered markup.
//!
//! Block types declare, per attribute, how its value is sourced from the
//! block's HTML, in the same shape block.json uses:
//!
//! ```json
//! {
//!   "content": { "type": "string", "source": "rich-text", "selector": "p" },
//!   "url": { "type": "string", "source": "attribute", "selector": "img", "attribute": "src" }
//! }
//! ```
//!
//! [`BlockAttributeMap`] is the projection of those declarations that the
//! splicer needs: for each `(block type, attribute)` pair, whether the value is
//! the text content of an element or one of its HTML attributes. A pair with
//! no entry simply cannot be bound.

pub mod core_blocks;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What part of the markup an attribute maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
  /// The text content of the selected element.
  Text,
  /// An HTML attribute on the selected element.
  Attribute,
}

/// How one bindable attribute maps onto a block's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMapping {
  pub kind: AttributeKind,

  /// Tag names of the element(s) carrying the value.
  pub selectors: Vec<String>,

  /// The HTML attribute to rewrite, for [`AttributeKind::Attribute`].
  #[serde(skip_serializing_if = "Option::is_none")]
  pub html_attribute_name: Option<String>,
}

impl AttributeMapping {
  /// Text content of the first element matching `selector` (`"h1,h2"` style).
  pub fn text(selector: &str) -> Self {
    Self {
      kind: AttributeKind::Text,
      selectors: parse_selector(selector),
      html_attribute_name: None,
    }
  }

  /// The `html_attribute_name` attribute of the first element matching `selector`.
  pub fn attribute(selector: &str, html_attribute_name: impl Into<String>) -> Self {
    Self {
      kind: AttributeKind::Attribute,
      selectors: parse_selector(selector),
      html_attribute_name: Some(html_attribute_name.into()),
    }
  }

  pub fn matches_tag(&self, tag: &str) -> bool {
    self.selectors.iter().any(|selector| selector.eq_ignore_ascii_case(tag))
  }
}

/// Selectors are comma-separated tag names; combinators are not supported.
fn parse_selector(selector: &str) -> Vec<String> {
  selector
    .split(',')
    .map(str::trim)
    .filter(|tag| !tag.is_empty())
    .map(str::to_ascii_lowercase)
    .collect()
}

/// How a block.json attribute is sourced from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeSource {
  Html,
  RichText,
  Attribute,
  Text,
  Query,
  Raw,
  Meta,
  /// Any other source (`tag`, `children`, `node`, ...); never bindable.
  #[serde(other)]
  Other,
}

/// One attribute declaration as written in block.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDeclaration {
  #[serde(default)]
  pub source: Option<AttributeSource>,

  #[serde(default)]
  pub selector: Option<String>,

  #[serde(default)]
  pub attribute: Option<String>,
}

/// The attribute section of a block type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTypeDeclaration {
  #[serde(default)]
  pub attributes: BTreeMap<String, AttributeDeclaration>,
}

/// A declaration that names a markup source but can't be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
  #[error("{block}: attribute '{attribute}' is sourced from markup but has no selector")]
  MissingSelector { block: String, attribute: String },

  #[error("{block}: attribute '{attribute}' is sourced from an HTML attribute but doesn't name it")]
  MissingHtmlAttribute { block: String, attribute: String },
}

/// A block type and its bindable attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockType {
  pub name: String,
  pub attributes: BTreeMap<String, AttributeMapping>,
}

impl BlockType {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      attributes: BTreeMap::new(),
    }
  }

  pub fn with_attribute(mut self, attribute: impl Into<String>, mapping: AttributeMapping) -> Self {
    self.attributes.insert(attribute.into(), mapping);
    self
  }

  /// Project a block.json style declaration onto its bindable attributes.
  ///
  /// Attributes sourced from `html`, `rich-text` or `attribute` are bindable;
  /// the rest (plain values, `query`, `meta`, ...) are skipped.
  ///
  /// # Errors
  ///
  /// Returns an [`AttributeError`] when a bindable attribute lacks the
  /// selector or HTML attribute name needed to find it.
  pub fn from_declaration(name: impl Into<String>, declaration: &BlockTypeDeclaration) -> Result<Self, AttributeError> {
    let mut block_type = Self::new(name);

    for (attribute, decl) in &declaration.attributes {
      let kind = match decl.source {
        Some(AttributeSource::Html | AttributeSource::RichText) => AttributeKind::Text,
        Some(AttributeSource::Attribute) => AttributeKind::Attribute,
        _ => continue,
      };

      let selector = decl
        .selector
        .as_deref()
        .filter(|selector| !selector.trim().is_empty())
        .ok_or_else(|| AttributeError::MissingSelector {
          block: block_type.name.clone(),
          attribute: attribute.clone(),
        })?;

      let mapping = match kind {
        AttributeKind::Text => AttributeMapping::text(selector),
        AttributeKind::Attribute => {
          let html_attribute = decl
            .attribute
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AttributeError::MissingHtmlAttribute {
              block: block_type.name.clone(),
              attribute: attribute.clone(),
            })?;
          AttributeMapping::attribute(selector, html_attribute)
        }
      };

      block_type.attributes.insert(attribute.clone(), mapping);
    }

    Ok(block_type)
  }
}

/// Lookup table from `(block type, attribute)` to its markup location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockAttributeMap {
  block_types: BTreeMap<String, BlockType>,
}

impl BlockAttributeMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// The bindable attributes of the core blocks.
  pub fn core() -> Self {
    let mut map = Self::new();
    for block_type in core_blocks::block_types() {
      map.insert(block_type);
    }
    map
  }

  /// Add a block type, replacing any previous entry of the same name.
  pub fn insert(&mut self, block_type: BlockType) {
    self.block_types.insert(block_type.name.clone(), block_type);
  }

  pub fn with_block_type(mut self, block_type: BlockType) -> Self {
    self.insert(block_type);
    self
  }

  /// Where `attribute` of `block_type` lives, or `None` if it can't be bound.
  pub fn lookup(&self, block_type: &str, attribute: &str) -> Option<&AttributeMapping> {
    self.block_types.get(block_type)?.attributes.get(attribute)
  }

  pub fn block_type(&self, name: &str) -> Option<&BlockType> {
    self.block_types.get(name)
  }

  pub fn block_types(&self) -> impl Iterator<Item = &BlockType> {
    self.block_types.values()
  }

  pub fn len(&self) -> usize {
    self.block_types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.block_types.is_empty()
  }
}
