//! Block descriptors handed over by the render pipeline.
//!
//! Two views of the same rendered block are involved in binding processing:
//!
//! - [`Block`]: the parsed block as it appears in post content (`blockName`,
//!   `attrs`, `innerHTML`). Its `attrs.metadata.bindings` object carries the
//!   binding declaration.
//! - [`BlockInstance`]: the live block being rendered, with the context it
//!   inherited from its ancestors (`postId`, `pattern/overrides`, ...). Sources
//!   read from it to compute override values.
//!
//! # Binding Declaration
//!
//! ```json
//! {
//!   "metadata": {
//!     "bindings": {
//!       "content": { "source": "core/post-meta", "args": { "key": "subtitle" } },
//!       "url": { "source": "core/pattern-attributes" }
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{BINDINGS_KEY, METADATA_KEY};
use crate::source::SourceArgs;

/// A parsed block from post content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
  #[serde(rename = "blockName")]
  pub name: String,

  #[serde(default)]
  pub attrs: Map<String, Value>,

  #[serde(rename = "innerHTML", default)]
  pub inner_html: String,
}

impl Block {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  /// Replace the block attributes. Non-object values leave the block without attributes.
  pub fn with_attrs(mut self, attrs: Value) -> Self {
    self.attrs = match attrs {
      Value::Object(map) => map,
      _ => Map::new(),
    };
    self
  }

  pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
    self.inner_html = html.into();
    self
  }

  /// The raw `attrs.metadata.bindings` object, in declaration order.
  ///
  /// Returns `None` when the block declares no bindings or the metadata has
  /// the wrong shape.
  pub fn bindings(&self) -> Option<&Map<String, Value>> {
    self.attrs.get(METADATA_KEY)?.get(BINDINGS_KEY)?.as_object()
  }
}

/// One attribute's binding: which source to ask and with what arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
  pub source: String,
  pub args: SourceArgs,
}

impl Binding {
  pub fn new(source: impl Into<String>, args: SourceArgs) -> Self {
    Self {
      source: source.into(),
      args,
    }
  }

  /// Parse one entry of a binding declaration.
  ///
  /// Accepts `{ "source": "<name>", "args": {..} }` and the older
  /// `{ "source": { "name": "<name>", "attributes": {..} } }` form.
  /// Returns `None` for anything else.
  pub fn from_value(value: &Value) -> Option<Self> {
    let entry = value.as_object()?;

    let (name, args) = match entry.get("source")? {
      Value::String(name) => (name.as_str(), entry.get("args")),
      Value::Object(legacy) => (legacy.get("name")?.as_str()?, legacy.get("attributes")),
      _ => return None,
    };

    let args = match args {
      None | Some(Value::Null) => Map::new(),
      Some(Value::Object(args)) => args.clone(),
      Some(_) => return None,
    };

    if name.is_empty() {
      return None;
    }

    Some(Self::new(name.to_owned(), args))
  }
}

/// The block currently being rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
  pub name: String,

  #[serde(default)]
  pub attributes: Map<String, Value>,

  #[serde(default)]
  pub context: Map<String, Value>,
}

impl BlockInstance {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  /// Build the instance for a parsed block, rendered with the given context.
  pub fn from_block(block: &Block, context: Map<String, Value>) -> Self {
    Self {
      name: block.name.clone(),
      attributes: block.attrs.clone(),
      context,
    }
  }

  pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
    self.context.insert(key.into(), value);
    self
  }

  pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
    self.attributes.insert(key.into(), value);
    self
  }

  /// `context.postId`, given either as a number or a numeric string.
  pub fn post_id(&self) -> Option<u64> {
    let id = match self.context.get("postId")? {
      Value::Number(n) => n.as_u64(),
      Value::String(s) => s.parse().ok(),
      _ => None,
    };
    id.filter(|id| *id > 0)
  }

  /// `attributes.metadata.id`, the identifier pattern overrides are keyed by.
  pub fn metadata_id(&self) -> Option<&str> {
    self.attributes.get(METADATA_KEY)?.get("id")?.as_str()
  }
}
