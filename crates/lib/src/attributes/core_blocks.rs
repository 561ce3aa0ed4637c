//! Bindable attributes of the core blocks.

use super::{AttributeMapping, BlockType};

pub const PARAGRAPH: &str = "core/paragraph";
pub const HEADING: &str = "core/heading";
pub const IMAGE: &str = "core/image";
pub const BUTTON: &str = "core/button";

pub fn block_types() -> Vec<BlockType> {
  vec![
    BlockType::new(PARAGRAPH).with_attribute("content", AttributeMapping::text("p")),
    BlockType::new(HEADING).with_attribute("content", AttributeMapping::text("h1,h2,h3,h4,h5,h6")),
    BlockType::new(IMAGE)
      .with_attribute("url", AttributeMapping::attribute("img", "src"))
      .with_attribute("alt", AttributeMapping::attribute("img", "alt"))
      .with_attribute("title", AttributeMapping::attribute("img", "title")),
    BlockType::new(BUTTON)
      .with_attribute("url", AttributeMapping::attribute("a", "href"))
      .with_attribute("text", AttributeMapping::text("a")),
  ]
}
