//! CLI smoke tests for blockbind.
//!
//! These tests run the binary against the fixture documents and check the
//! rendered markup and exit codes.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the blockbind binary, isolated from the caller's environment.
fn blockbind_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("blockbind");
  cmd.env_remove("BLOCKBIND_BLOCK_TYPES").env_remove("RUST_LOG");
  cmd
}

fn fixture(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  blockbind_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  blockbind_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("blockbind"));
}

#[test]
fn subcommand_help_works() {
  for cmd in ["render", "sources", "blocks"] {
    blockbind_cmd()
      .args([cmd, "--help"])
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn render_requires_document() {
  blockbind_cmd().arg("render").assert().failure();
}

// =============================================================================
// Render
// =============================================================================

#[test]
fn render_substitutes_bound_values() {
  blockbind_cmd()
    .arg("render")
    .arg(fixture("document.json"))
    .arg("--meta")
    .arg(fixture("meta.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("<p>Notes from the harbour</p>"))
    .stdout(predicate::str::contains("href=\"https://example.com/harbour\""))
    .stdout(predicate::str::contains(">Visit</a>"))
    .stdout(predicate::str::contains("alt=\"Harbour at dusk\""))
    .stdout(predicate::str::contains("Placeholder subtitle").not());
}

#[test]
fn render_without_meta_keeps_placeholders() {
  blockbind_cmd()
    .arg("render")
    .arg(fixture("document.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("<p>Placeholder subtitle</p>"))
    .stdout(predicate::str::contains("alt=\"Harbour at dusk\""));
}

#[test]
fn render_leaves_undeclared_block_types_alone() {
  blockbind_cmd()
    .arg("render")
    .arg(fixture("document.json"))
    .arg("--meta")
    .arg(fixture("meta.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("<h3>Card title</h3>"));
}

#[test]
fn render_with_block_types_flag() {
  blockbind_cmd()
    .arg("render")
    .arg(fixture("document.json"))
    .arg("--meta")
    .arg(fixture("meta.json"))
    .arg("--block-types")
    .arg(fixture("block-types.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("<h3>Harbour &amp; Sea</h3>"));
}

#[test]
fn render_with_block_types_from_env() {
  blockbind_cmd()
    .env("BLOCKBIND_BLOCK_TYPES", fixture("block-types.json"))
    .arg("render")
    .arg(fixture("document.json"))
    .arg("--meta")
    .arg(fixture("meta.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("<h3>Harbour &amp; Sea</h3>"));
}

#[test]
fn render_json_format() {
  blockbind_cmd()
    .args(["--format", "json", "render"])
    .arg(fixture("document.json"))
    .arg("--meta")
    .arg(fixture("meta.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("\"blockName\": \"core/paragraph\""))
    .stdout(predicate::str::contains("<p>Notes from the harbour</p>"));
}

#[test]
fn render_empty_document() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("empty.json");
  std::fs::write(&path, r#"{ "blocks": [] }"#).unwrap();

  blockbind_cmd()
    .arg("render")
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::contains("no blocks"));
}

#[test]
fn render_missing_document_fails() {
  let temp = TempDir::new().unwrap();

  blockbind_cmd()
    .arg("render")
    .arg(temp.path().join("missing.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load block document"));
}

#[test]
fn render_invalid_block_types_fails() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("block-types.json");
  std::fs::write(
    &path,
    r#"{ "blockTypes": { "acme/card": { "attributes": { "link": { "source": "attribute", "selector": "a" } } } } }"#,
  )
  .unwrap();

  blockbind_cmd()
    .arg("render")
    .arg(fixture("document.json"))
    .arg("--block-types")
    .arg(&path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load block types"));
}

// =============================================================================
// Sources & Blocks
// =============================================================================

#[test]
fn sources_lists_core_sources() {
  blockbind_cmd()
    .arg("sources")
    .assert()
    .success()
    .stdout(predicate::str::contains("core/post-meta"))
    .stdout(predicate::str::contains("Pattern Attributes"));
}

#[test]
fn sources_json_format() {
  blockbind_cmd()
    .args(["sources", "--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"label\": \"Post Meta\""));
}

#[test]
fn blocks_lists_core_block_types() {
  blockbind_cmd()
    .arg("blocks")
    .assert()
    .success()
    .stdout(predicate::str::contains("core/button"))
    .stdout(predicate::str::contains("a[href]"))
    .stdout(predicate::str::contains("acme/card").not());
}

#[test]
fn blocks_includes_declared_block_types() {
  blockbind_cmd()
    .arg("blocks")
    .arg("--block-types")
    .arg(fixture("block-types.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("acme/card"))
    .stdout(predicate::str::contains("text of <h3>"));
}
