//! blockbind-lib: Block bindings for rendered block markup
//!
//! This crate substitutes values from pluggable sources into the serialized
//! HTML of rendered blocks:
//! - `SourceRegistry`: named binding sources and their substitution callbacks
//! - `BlockAttributeMap`: where each bindable attribute lives in a block's markup
//! - `BindingProcessor`: applies a block's declared bindings to its HTML
//! - `html`: the splicer that rewrites text content and attributes in place

pub mod attributes;
pub mod block;
pub mod config;
pub mod consts;
pub mod html;
pub mod process;
pub mod source;

pub use attributes::{AttributeKind, AttributeMapping, BlockAttributeMap, BlockType};
pub use block::{Binding, Block, BlockInstance};
pub use process::BindingProcessor;
pub use source::{DuplicateSourceError, Source, SourceArgs, SourceEntry, SourceRegistry};
