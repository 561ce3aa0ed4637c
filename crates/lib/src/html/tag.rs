//! A forward-only scanner over the tags of serialized markup.
//!
//! This is not an HTML parser. It finds start and end tags, records byte
//! spans for tag names and attributes, and skips what can't contain tags
//! (comments, doctypes, the bodies of raw text elements). Anything it can't
//! make sense of ends the scan, so callers fall back to leaving the markup
//! untouched.

use std::ops::Range;

/// Elements whose content is raw text rather than markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
  VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// An attribute inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpan {
  /// Span of the attribute name.
  pub name: Range<usize>,
  /// Span of the whole attribute, from its name through its value and closing quote.
  pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
  pub name: &'a str,
  /// From `<` through `>`.
  pub span: Range<usize>,
  pub attributes: Vec<AttributeSpan>,
  pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
  Start(StartTag<'a>),
  End { name: &'a str, span: Range<usize> },
}

pub struct TagScanner<'a> {
  html: &'a str,
  pos: usize,
}

impl<'a> TagScanner<'a> {
  pub fn new(html: &'a str) -> Self {
    Self { html, pos: 0 }
  }

  fn bytes(&self) -> &'a [u8] {
    self.html.as_bytes()
  }

  /// Move past the next occurrence of `needle`, or to the end of input.
  fn skip_past(&mut self, from: usize, needle: &str) {
    self.pos = match self.html[from..].find(needle) {
      Some(offset) => from + offset + needle.len(),
      None => self.html.len(),
    };
  }

  /// Index just past a tag name starting at `start`.
  fn tag_name_end(&self, start: usize) -> usize {
    let bytes = self.bytes();
    let mut end = start;
    while end < bytes.len() && !bytes[end].is_ascii_whitespace() && bytes[end] != b'/' && bytes[end] != b'>' {
      end += 1;
    }
    end
  }

  fn skip_whitespace(&self, mut i: usize) -> usize {
    let bytes = self.bytes();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
      i += 1;
    }
    i
  }

  /// Parse the attributes of a start tag whose name ends at `i`.
  ///
  /// Returns the attributes, the index past `>` and whether the tag is
  /// self-closing, or `None` if the tag never ends.
  fn parse_attributes(&self, mut i: usize) -> Option<(Vec<AttributeSpan>, usize, bool)> {
    let bytes = self.bytes();
    let mut attributes = Vec::new();

    loop {
      i = self.skip_whitespace(i);
      match bytes.get(i)? {
        b'>' => return Some((attributes, i + 1, false)),
        b'/' => {
          if bytes.get(i + 1) == Some(&b'>') {
            return Some((attributes, i + 2, true));
          }
          i += 1;
          continue;
        }
        _ => {}
      }

      let name_start = i;
      // A leading '=' belongs to the name
      i += 1;
      while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'/' | b'>' | b'=') {
        i += 1;
      }
      let name = name_start..i;

      let after_name = self.skip_whitespace(i);
      if bytes.get(after_name) != Some(&b'=') {
        attributes.push(AttributeSpan {
          span: name.clone(),
          name,
        });
        continue;
      }

      i = self.skip_whitespace(after_name + 1);
      match bytes.get(i) {
        Some(&quote) if quote == b'"' || quote == b'\'' => {
          let close = bytes[i + 1..].iter().position(|b| *b == quote)?;
          i = i + 1 + close + 1;
        }
        Some(_) => {
          while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
            i += 1;
          }
        }
        None => return None,
      }

      attributes.push(AttributeSpan {
        span: name.start..i,
        name,
      });
    }
  }

  /// Skip the body of a raw text element, stopping at its end tag.
  fn skip_raw_text(&mut self, name: &str) {
    let closing = format!("</{name}");
    let rest = &self.html[self.pos..];
    self.pos = match find_ignore_ascii_case(rest, &closing) {
      Some(offset) => self.pos + offset,
      None => self.html.len(),
    };
  }
}

impl<'a> Iterator for TagScanner<'a> {
  type Item = Tag<'a>;

  fn next(&mut self) -> Option<Tag<'a>> {
    let html = self.html;
    let bytes = self.bytes();

    loop {
      let lt = self.pos + html.get(self.pos..)?.find('<')?;
      let rest = &html[lt + 1..];

      if rest.starts_with("!--") {
        self.skip_past(lt + 4, "-->");
        continue;
      }

      if rest.starts_with('!') || rest.starts_with('?') {
        self.skip_past(lt + 1, ">");
        continue;
      }

      if let Some(after_slash) = rest.strip_prefix('/') {
        if !after_slash.starts_with(|c: char| c.is_ascii_alphabetic()) {
          self.skip_past(lt + 1, ">");
          continue;
        }
        let name_start = lt + 2;
        let name_end = self.tag_name_end(name_start);
        let gt = name_end + html[name_end..].find('>')?;
        self.pos = gt + 1;
        return Some(Tag::End {
          name: &html[name_start..name_end],
          span: lt..gt + 1,
        });
      }

      if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        self.pos = lt + 1;
        continue;
      }

      let name_start = lt + 1;
      let name_end = self.tag_name_end(name_start);
      let name = &html[name_start..name_end];

      let Some((attributes, end, self_closing)) = self.parse_attributes(name_end) else {
        self.pos = bytes.len();
        return None;
      };

      self.pos = end;
      if RAW_TEXT_ELEMENTS.iter().any(|raw| raw.eq_ignore_ascii_case(name)) {
        self.skip_raw_text(name);
      }

      return Some(Tag::Start(StartTag {
        name,
        span: lt..end,
        attributes,
        self_closing,
      }));
    }
  }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
  let needle = needle.as_bytes();
  haystack
    .as_bytes()
    .windows(needle.len())
    .position(|window| window.eq_ignore_ascii_case(needle))
}
