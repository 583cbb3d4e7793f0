//! # dwg-graph-rs
//!
//! The in-memory document model of a DWG-style CAD drawing: a graph of
//! typed records (entities and objects) connected exclusively through
//! integer handles, plus a generic, type-checked accessor layer for
//! reading and writing record fields by name.
//!
//! This crate covers the graph itself, not the byte stream: the bit-level
//! codec that serializes a document, on-disk compression, and DXF text
//! conversion are external consumers of the invariants maintained here.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dwggraph::{Document, Vector3};
//!
//! let mut doc = Document::new();
//! let ms = doc.model_space();
//!
//! // build geometry into model space
//! let circle = doc.add_circle(ms, Vector3::new(10.0, 10.0, 0.0), 5.0)?;
//!
//! // generic, kind-checked field access
//! use dwggraph::{access, schema::KindFamily};
//! let r = access::get_field(&doc, circle, "radius", KindFamily::Real)?;
//!
//! // the graph invariants hold after every mutation
//! doc.validate()?;
//! # Ok::<(), dwggraph::CadError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`registry::Registry`] - flat, append-only record collection indexed
//!   by position and by absolute handle
//! - [`record::Record`] - envelope + typed payload behind a closed
//!   discriminant, split into entities and objects
//! - [`chain`] - doubly-linked sibling chains for owned entity
//!   sub-sequences, with bracket and terminator upkeep
//! - [`objects::Dictionary`] - ordered key→handle maps with
//!   version-dependent key equality
//! - [`access`] - the schema-driven field accessor facade
//! - [`document::Document`] - document construction and builder
//!   operations
//! - [`acis`] - the fixed-block byte transform for embedded solid
//!   geometry payloads

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod acis;
pub mod builder;
pub mod chain;
pub mod document;
pub mod entities;
pub mod error;
pub mod notification;
pub mod objects;
pub mod record;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod tables;
pub mod text;
pub mod types;
pub mod xdata;

// Re-export commonly used types
pub use error::{CadError, Result};
pub use types::{CadVersion, Color, Handle, LineWeight, Vector2, Vector3};

// Re-export the graph core
pub use document::{Document, Header};
pub use record::{Record, RecordData, RecordKind};
pub use reference::{HandleRef, RefKind};
pub use registry::{RecordId, Registry};

// Re-export the accessor facade surface
pub use access::{get_field, set_field};
pub use schema::{FieldValue, KindFamily, StorageKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
