//! Splicing bound values into serialized block markup.
//!
//! Rendered blocks are HTML strings, so values are substituted directly into
//! the text instead of going through a parse tree. Two kinds of target are
//! supported, matching [`AttributeKind`]:
//!
//! - **Text**: the content between the first element matching the selector
//!   and its end tag is replaced by the escaped value. The element's own tag
//!   and everything around it stay as they were.
//! - **Attribute**: the named attribute on the first element matching the
//!   selector is set to the escaped value, added if the element lacks it.
//!
//! Only the first matching element is touched. When the target can't be found
//! (no matching element, a void element for text, an element that never
//! ends) the markup is returned unchanged.

pub mod escape;
mod tag;

use std::borrow::Cow;

use crate::attributes::{AttributeKind, AttributeMapping, BlockAttributeMap};
use tag::{StartTag, Tag, TagScanner, is_void_element};

pub use escape::{escape_attr, escape_html};

/// Splice `value` into `html` at the location described by `mapping`.
///
/// Returns `None` when the location can't be found.
pub fn splice(html: &str, mapping: &AttributeMapping, value: &str) -> Option<String> {
  match mapping.kind {
    AttributeKind::Text => splice_text(html, mapping, value),
    AttributeKind::Attribute => splice_attribute(html, mapping, mapping.html_attribute_name.as_deref()?, value),
  }
}

/// Like [`splice`], borrowing the input when nothing changes.
pub fn replace_html<'h>(html: &'h str, mapping: &AttributeMapping, value: &str) -> Cow<'h, str> {
  splice(html, mapping, value).map_or(Cow::Borrowed(html), Cow::Owned)
}

/// Replace `attribute` of a `block_name` block, as described by `map`.
///
/// Block types or attributes missing from the map leave the markup unchanged.
pub fn replace_block_html<'h>(
  map: &BlockAttributeMap,
  html: &'h str,
  block_name: &str,
  attribute: &str,
  value: &str,
) -> Cow<'h, str> {
  match map.lookup(block_name, attribute) {
    Some(mapping) => replace_html(html, mapping, value),
    None => Cow::Borrowed(html),
  }
}

fn first_match<'a>(scanner: &mut TagScanner<'a>, mapping: &AttributeMapping) -> Option<StartTag<'a>> {
  scanner.find_map(|tag| match tag {
    Tag::Start(start) if mapping.matches_tag(start.name) => Some(start),
    _ => None,
  })
}

fn splice_text(html: &str, mapping: &AttributeMapping, value: &str) -> Option<String> {
  let mut scanner = TagScanner::new(html);
  let open = first_match(&mut scanner, mapping)?;
  if open.self_closing || is_void_element(open.name) {
    return None;
  }

  // Nested elements of the same name must close before ours does
  let mut depth = 0usize;
  let close = scanner.find_map(|tag| match tag {
    Tag::Start(start) if !start.self_closing && start.name.eq_ignore_ascii_case(open.name) => {
      depth += 1;
      None
    }
    Tag::End { name, span } if name.eq_ignore_ascii_case(open.name) => {
      if depth == 0 {
        return Some(span.start);
      }
      depth -= 1;
      None
    }
    _ => None,
  })?;

  let escaped = escape_html(value);
  let mut spliced = String::with_capacity(html.len() + escaped.len());
  spliced.push_str(&html[..open.span.end]);
  spliced.push_str(&escaped);
  spliced.push_str(&html[close..]);
  Some(spliced)
}

fn splice_attribute(html: &str, mapping: &AttributeMapping, attribute: &str, value: &str) -> Option<String> {
  let open = first_match(&mut TagScanner::new(html), mapping)?;
  let escaped = escape_attr(value);

  let existing = open
    .attributes
    .iter()
    .find(|attr| html[attr.name.clone()].eq_ignore_ascii_case(attribute));

  let (range, replacement) = match existing {
    Some(attr) => (attr.span.clone(), format!("{}=\"{}\"", &html[attr.name.clone()], escaped)),
    None => {
      let bytes = html.as_bytes();
      let mut at = if open.self_closing {
        open.span.end - 2
      } else {
        open.span.end - 1
      };
      while at > open.span.start && bytes[at - 1].is_ascii_whitespace() {
        at -= 1;
      }
      // A dangling `name=` would take the inserted text as its value
      if bytes[at - 1] == b'=' {
        return None;
      }
      (at..at, format!(" {attribute}=\"{escaped}\""))
    }
  };

  let mut spliced = String::with_capacity(html.len() + replacement.len());
  spliced.push_str(&html[..range.start]);
  spliced.push_str(&replacement);
  spliced.push_str(&html[range.end..]);
  Some(spliced)
}
