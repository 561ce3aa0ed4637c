//! Implementation of the `blockbind sources` command.

use anyhow::Result;

use blockbind_lib::SourceRegistry;
use blockbind_lib::source::InMemoryMetaStore;

use crate::output::{OutputFormat, print_json, print_stat, print_success};

/// List the registered binding sources, as editor tooling would see them.
pub fn cmd_sources(format: OutputFormat) -> Result<()> {
  let registry = SourceRegistry::with_core_sources(InMemoryMetaStore::default());

  if format.is_json() {
    let sources: Vec<_> = registry
      .list_all()
      .iter()
      .map(|(name, entry)| serde_json::json!({ "name": name, "label": entry.label() }))
      .collect();
    return print_json(&sources);
  }

  print_success(&format!("{} binding source(s) registered", registry.len()));
  for (name, entry) in registry.list_all() {
    print_stat(name, entry.label());
  }
  Ok(())
}
