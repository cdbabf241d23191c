// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geometry node graph model for `nodeclip`.
//!
//! This crate provides everything the text codec needs to know about node
//! graphs without depending on a particular host:
//! - Name-based type inference over the canonical node name table
//! - Static node schemas (socket layouts, property sets, defaults)
//! - The [`GraphAccessor`] trait, the single seam to a host application
//! - An in-memory [`Scene`] host implementing that trait

pub mod accessor;
pub mod graph;
pub mod link;
pub mod node;
pub mod registry;
pub mod scene;
pub mod schema;
pub mod value;

pub use accessor::{GraphAccessor, HostError, IdKind, LinkSource, NodeAttribute, NodeInfo, SocketInfo};
pub use graph::NodeGroup;
pub use link::{Link, LinkId};
pub use node::{Node, NodeId, Socket};
pub use registry::{minimal_type_annotation, resolve_type_tag, UnknownTypeName};
pub use scene::Scene;
pub use schema::{NodeSchema, NodeSchemaRegistry};
pub use value::{CurvePoint, FactorRange, InterfaceSocket, SocketSide, Value, ValueKind};
