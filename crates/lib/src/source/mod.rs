//! Binding sources and the registry that holds them.
//!
//! A source is a named provider of override values. When a block attribute is
//! bound to a source, the source is asked for a value at render time and the
//! answer replaces the attribute's value in the rendered markup.
//!
//! Sources are registered once, while the host is starting up, into a
//! [`SourceRegistry`] that the render pipeline then only reads. Registering the
//! same name twice is a configuration mistake and fails with
//! [`DuplicateSourceError`]; the first registration stays in place.
//!
//! # Submodules
//!
//! - [`pattern`] - `core/pattern-attributes`, overrides supplied by a synced pattern
//! - [`post_meta`] - `core/post-meta`, values read from the current post's meta

pub mod pattern;
pub mod post_meta;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::block::BlockInstance;

pub use pattern::PatternOverridesSource;
pub use post_meta::{InMemoryMetaStore, MetaStore, PostMetaSource};

/// Arguments declared next to a binding, e.g. `{ "key": "subtitle" }`.
pub type SourceArgs = Map<String, Value>;

/// A provider of override values for bound block attributes.
///
/// `apply` returns `None` when the source has nothing to offer, in which case
/// the attribute keeps its authored value.
pub trait Source: Send + Sync {
  fn apply(&self, args: &SourceArgs, instance: &BlockInstance, attribute: &str) -> Option<String>;
}

impl<F> Source for F
where
  F: Fn(&SourceArgs, &BlockInstance, &str) -> Option<String> + Send + Sync,
{
  fn apply(&self, args: &SourceArgs, instance: &BlockInstance, attribute: &str) -> Option<String> {
    self(args, instance, attribute)
  }
}

/// A registered source together with its human-readable label.
#[derive(Clone)]
pub struct SourceEntry {
  label: String,
  source: Arc<dyn Source>,
}

impl SourceEntry {
  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn source(&self) -> &Arc<dyn Source> {
    &self.source
  }

  pub fn apply(&self, args: &SourceArgs, instance: &BlockInstance, attribute: &str) -> Option<String> {
    self.source.apply(args, instance, attribute)
  }
}

impl fmt::Debug for SourceEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SourceEntry").field("label", &self.label).finish_non_exhaustive()
  }
}

/// Registration failed because the name is already taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block bindings source \"{name}\" is already registered")]
pub struct DuplicateSourceError {
  pub name: String,
}

/// Catalogue of binding sources, keyed by unique name.
///
/// Mutated only through [`register`](Self::register), which takes `&mut self`;
/// once shared with the render pipeline the registry is read-only.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
  sources: BTreeMap<String, SourceEntry>,
}

impl SourceRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry holding the core sources, with post meta served by `meta`.
  pub fn with_core_sources(meta: impl MetaStore + 'static) -> Self {
    let mut registry = Self::new();
    registry.insert(post_meta::NAME, post_meta::LABEL, Arc::new(PostMetaSource::new(meta)));
    registry.insert(pattern::NAME, pattern::LABEL, Arc::new(PatternOverridesSource));
    registry
  }

  /// Register a new source under `name`.
  ///
  /// # Errors
  ///
  /// Returns [`DuplicateSourceError`] if `name` is already registered. The
  /// existing entry is left untouched.
  pub fn register(
    &mut self,
    name: impl Into<String>,
    label: impl Into<String>,
    source: impl Source + 'static,
  ) -> Result<(), DuplicateSourceError> {
    let name = name.into();
    if self.sources.contains_key(&name) {
      warn!(source = %name, "block bindings source already registered");
      return Err(DuplicateSourceError { name });
    }

    let label = label.into();
    info!(source = %name, label = %label, "registering block bindings source");
    self.insert(name, label, Arc::new(source));
    Ok(())
  }

  /// Register a closure as a source.
  ///
  /// Same as [`register`](Self::register), spelled out so closure arguments
  /// don't need type annotations.
  pub fn register_fn<F>(
    &mut self,
    name: impl Into<String>,
    label: impl Into<String>,
    apply: F,
  ) -> Result<(), DuplicateSourceError>
  where
    F: Fn(&SourceArgs, &BlockInstance, &str) -> Option<String> + Send + Sync + 'static,
  {
    self.register(name, label, apply)
  }

  /// Look up a source by name. A miss is not an error.
  pub fn get(&self, name: &str) -> Option<&SourceEntry> {
    self.sources.get(name)
  }

  /// Every registered source, keyed by name.
  pub fn list_all(&self) -> &BTreeMap<String, SourceEntry> {
    &self.sources
  }

  pub fn contains(&self, name: &str) -> bool {
    self.sources.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.sources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sources.is_empty()
  }

  fn insert(&mut self, name: impl Into<String>, label: impl Into<String>, source: Arc<dyn Source>) {
    self.sources.insert(
      name.into(),
      SourceEntry {
        label: label.into(),
        source,
      },
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tracing_test::traced_test;

  fn fixed(value: &'static str) -> impl Fn(&SourceArgs, &BlockInstance, &str) -> Option<String> + Send + Sync {
    move |_, _, _| Some(value.to_string())
  }

  #[test]
  fn register_then_get() {
    let mut registry = SourceRegistry::new();
    registry.register_fn("test_source", "Test Source", fixed("hello")).unwrap();

    let entry = registry.get("test_source").unwrap();
    assert_eq!(entry.label(), "Test Source");
    assert_eq!(
      entry.apply(&SourceArgs::new(), &BlockInstance::new("core/paragraph"), "content"),
      Some("hello".to_string())
    );
  }

  #[test]
  fn get_unknown_source_is_none() {
    let registry = SourceRegistry::new();
    assert!(registry.get("missing").is_none());
    assert!(!registry.contains("missing"));
  }

  #[test]
  #[traced_test]
  fn duplicate_registration_keeps_first_entry() {
    let mut registry = SourceRegistry::new();
    registry.register_fn("test_source", "First", fixed("first")).unwrap();

    let err = registry
      .register_fn("test_source", "Second", fixed("second"))
      .unwrap_err();
    assert_eq!(err.name, "test_source");
    assert_eq!(err.to_string(), "block bindings source \"test_source\" is already registered");

    let entry = registry.get("test_source").unwrap();
    assert_eq!(entry.label(), "First");
    assert_eq!(
      entry.apply(&SourceArgs::new(), &BlockInstance::default(), "content"),
      Some("first".to_string())
    );
    assert_eq!(registry.len(), 1);
    assert!(logs_contain("already registered"));
  }

  #[test]
  fn list_all_returns_every_source() {
    let mut registry = SourceRegistry::new();
    registry.register_fn("b/source", "B", fixed("b")).unwrap();
    registry.register_fn("a/source", "A", fixed("a")).unwrap();

    let labels: Vec<_> = registry
      .list_all()
      .iter()
      .map(|(name, entry)| (name.as_str(), entry.label()))
      .collect();
    assert_eq!(labels, vec![("a/source", "A"), ("b/source", "B")]);
  }

  #[test]
  fn sources_receive_args_instance_and_attribute() {
    let mut registry = SourceRegistry::new();
    registry
      .register_fn("echo", "Echo", |args, instance, attribute| {
        let key = args.get("key")?.as_str()?;
        Some(format!("{}:{}:{}", instance.name, attribute, key))
      })
      .unwrap();

    let mut args = SourceArgs::new();
    args.insert("key".to_string(), json!("subtitle"));

    let value = registry
      .get("echo")
      .unwrap()
      .apply(&args, &BlockInstance::new("core/heading"), "content");
    assert_eq!(value.as_deref(), Some("core/heading:content:subtitle"));
  }

  #[test]
  fn struct_sources_can_be_registered() {
    struct Upper;

    impl Source for Upper {
      fn apply(&self, args: &SourceArgs, _instance: &BlockInstance, _attribute: &str) -> Option<String> {
        args.get("value")?.as_str().map(str::to_uppercase)
      }
    }

    let mut registry = SourceRegistry::new();
    registry.register("upper", "Upper", Upper).unwrap();

    let mut args = SourceArgs::new();
    args.insert("value".to_string(), json!("shout"));
    let value = registry
      .get("upper")
      .unwrap()
      .apply(&args, &BlockInstance::default(), "content");
    assert_eq!(value.as_deref(), Some("SHOUT"));
  }

  #[test]
  fn core_sources_are_registered() {
    let registry = SourceRegistry::with_core_sources(InMemoryMetaStore::default());

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(post_meta::NAME).unwrap().label(), "Post Meta");
    assert_eq!(registry.get(pattern::NAME).unwrap().label(), "Pattern Attributes");
  }

  #[test]
  fn core_source_names_cannot_be_reused() {
    let mut registry = SourceRegistry::with_core_sources(InMemoryMetaStore::default());
    let result = registry.register_fn(post_meta::NAME, "Impostor", fixed("nope"));

    assert!(result.is_err());
    assert_eq!(registry.get(post_meta::NAME).unwrap().label(), "Post Meta");
  }
}
