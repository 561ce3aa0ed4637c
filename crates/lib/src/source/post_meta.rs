//! `core/post-meta`: bind attributes to custom fields of the current post.
//!
//! The meta key comes from the binding args (`key`, or the older `value`),
//! the post from the block context (`postId`). Reading meta is left to the
//! host through [`MetaStore`], including the decision whether the current
//! visitor may read the post at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Source, SourceArgs};
use crate::block::BlockInstance;

pub const NAME: &str = "core/post-meta";
pub const LABEL: &str = "Post Meta";

/// Host-side access to post meta.
pub trait MetaStore: Send + Sync {
  /// The single value stored under `key` for `post_id`.
  fn get_post_meta(&self, post_id: u64, key: &str) -> Option<String>;

  /// Whether the current visitor may read meta of `post_id`.
  fn can_read(&self, _post_id: u64) -> bool {
    true
  }
}

/// Meta keys starting with an underscore are private to the host.
pub fn is_protected_meta(key: &str) -> bool {
  key.starts_with('_')
}

/// Meta values held in memory, keyed by post id then meta key.
///
/// Deserializes from `{ "<post id>": { "<key>": "<value>" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryMetaStore {
  posts: HashMap<u64, HashMap<String, String>>,
}

impl InMemoryMetaStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, post_id: u64, key: impl Into<String>, value: impl Into<String>) {
    self.posts.entry(post_id).or_default().insert(key.into(), value.into());
  }

  pub fn with_meta(mut self, post_id: u64, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.insert(post_id, key, value);
    self
  }
}

impl MetaStore for InMemoryMetaStore {
  fn get_post_meta(&self, post_id: u64, key: &str) -> Option<String> {
    self.posts.get(&post_id)?.get(key).cloned()
  }
}

/// The `core/post-meta` source.
pub struct PostMetaSource<M> {
  store: M,
}

impl<M: MetaStore> PostMetaSource<M> {
  pub fn new(store: M) -> Self {
    Self { store }
  }
}

impl<M: MetaStore> Source for PostMetaSource<M> {
  fn apply(&self, args: &SourceArgs, instance: &BlockInstance, _attribute: &str) -> Option<String> {
    let key = args
      .get("key")
      .or_else(|| args.get("value"))
      .and_then(Value::as_str)
      .filter(|key| !key.is_empty())?;
    let post_id = instance.post_id()?;

    if is_protected_meta(key) {
      debug!(key, post_id, "refusing to bind protected post meta");
      return None;
    }

    if !self.store.can_read(post_id) {
      debug!(key, post_id, "post meta not readable by current visitor");
      return None;
    }

    self.store.get_post_meta(post_id, key)
  }
}
