//! Escaping of values spliced into markup.

use std::borrow::Cow;

/// Escape a value placed between tags.
pub fn escape_html(value: &str) -> Cow<'_, str> {
  escape(value)
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
  escape(value)
}

fn escape(value: &str) -> Cow<'_, str> {
  if !value.contains(['&', '<', '>', '"', '\'']) {
    return Cow::Borrowed(value);
  }

  let mut escaped = String::with_capacity(value.len() + 16);
  for ch in value.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#039;"),
      _ => escaped.push(ch),
    }
  }
  Cow::Owned(escaped)
}
