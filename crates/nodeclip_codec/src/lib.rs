// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text codec for geometry node graphs.
//!
//! A graph and every subgraph it instantiates are written as one YAML-like
//! document and read back through [`nodeclip_graph::GraphAccessor`]:
//! - [`encode`] writes leaf subgraphs first and the root last
//! - [`decode`] replaces each named graph with the document's content and
//!   binds the root to a target object
//! - [`copy`] and [`paste`] wrap both around an object's node modifier

pub mod clipboard;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod link_ref;
pub mod literal;
pub mod options;

#[cfg(test)]
mod fixtures;

pub use clipboard::{copy, paste, ClipboardError, DEFAULT_GRAPH_NAME};
pub use decoder::{decode, decode_document, AppliedDirective, DecodeReport, GraphSummary};
pub use document::Document;
pub use encoder::{encode, Encoder};
pub use error::{CodecError, DecodeWarning, LinkFailure};
pub use link_ref::LinkRef;
pub use options::EncodeOptions;
