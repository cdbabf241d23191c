// SPDX-License-Identifier: MIT OR Apache-2.0
//! The seam between the codec and a host application's node graphs.
//!
//! Graphs are addressed by name; nodes by an opaque host handle. Every
//! operation is synchronous and callers serialize access to a graph.

use crate::value::{CurvePoint, InterfaceSocket, SocketSide, Value, ValueKind};
use std::fmt::Debug;
use std::hash::Hash;

/// Snapshot of a node's built-in attributes
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    /// Node name, unique within its graph
    pub name: String,
    /// Type tag
    pub type_tag: String,
    /// Label (empty when unset)
    pub label: String,
    /// Location in the editor
    pub location: [f64; 2],
    /// Width in the editor
    pub width: f64,
    /// Collapsed in the editor
    pub hide: bool,
    /// Whether the custom color is in use
    pub use_custom_color: bool,
    /// Custom color
    pub color: [f64; 3],
    /// Referenced subgraph, for subgraph instances
    pub node_tree: Option<String>,
    /// `Some(false)` for an output node that is not the active one
    pub is_active_output: Option<bool>,
}

/// Snapshot of a node socket
#[derive(Debug, Clone, PartialEq)]
pub struct SocketInfo {
    /// Stable identifier, unique per node side
    pub identifier: String,
    /// Display name
    pub name: String,
    /// Value kind
    pub kind: ValueKind,
    /// Default value, if the socket has one
    pub default: Option<Value>,
}

/// The source end of a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSource<K> {
    /// Source node
    pub node: K,
    /// Identifier of the source output socket
    pub socket: String,
}

/// Kinds of host data blocks a socket may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Scene objects
    Object,
    /// Materials
    Material,
}

/// A writable built-in node attribute
#[derive(Debug, Clone, PartialEq)]
pub enum NodeAttribute {
    /// Rename the node
    Name(String),
    /// Set the label
    Label(String),
    /// Move the node
    Location([f64; 2]),
    /// Set the width
    Width(f64),
    /// Collapse or expand
    Hide(bool),
    /// Set the custom color value
    Color([f64; 3]),
    /// Toggle the custom color
    UseCustomColor(bool),
    /// Select or deselect
    Select(bool),
    /// Bind a subgraph instance to a graph
    NodeTree(Option<String>),
}

/// Error reported by a host
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// Graph not found
    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    /// Node handle does not belong to the graph
    #[error("Node not found in graph {0}")]
    NodeNotFound(String),

    /// Object not found
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// The host cannot create nodes of this type
    #[error("Unsupported node type: {0}")]
    UnsupportedNodeType(String),

    /// Socket index out of range
    #[error("Socket index {index} out of range on node {node}")]
    SocketOutOfRange {
        /// Node name
        node: String,
        /// Requested index
        index: usize,
    },

    /// The node type does not declare this property
    #[error("Node {node} has no property {property}")]
    UnknownProperty {
        /// Node name
        node: String,
        /// Property name
        property: String,
    },

    /// Value does not fit the target slot
    #[error("Value of kind {found:?} does not fit {expected:?}")]
    TypeMismatch {
        /// Kind of the slot
        expected: ValueKind,
        /// Kind of the given value
        found: ValueKind,
    },

    /// The node has no curve mapping
    #[error("Node {0} has no curve mapping")]
    NoCurveMapping(String),

    /// Curve point index out of range
    #[error("Curve point {index} out of range on node {node}")]
    PointOutOfRange {
        /// Node name
        node: String,
        /// Requested index
        index: usize,
    },

    /// The object carries no node modifier
    #[error("Object {0} has no node modifier")]
    NoNodeModifier(String),
}

/// Read/write access to a host's node graphs
pub trait GraphAccessor {
    /// Host handle of a node
    type NodeKey: Copy + Eq + Hash + Debug;

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// Whether a graph with this name exists
    fn has_graph(&self, graph: &str) -> bool;

    /// The graph's interface ports on one side
    fn interface(&self, graph: &str, side: SocketSide) -> Result<Vec<InterfaceSocket>, HostError>;

    /// Nodes of a graph in host order
    fn nodes(&self, graph: &str) -> Result<Vec<Self::NodeKey>, HostError>;

    /// Built-in attributes of a node
    fn node_info(&self, graph: &str, node: Self::NodeKey) -> Result<NodeInfo, HostError>;

    /// Type-specific properties in declaration order.
    ///
    /// Structured values are reported as [`Value::Unsupported`].
    fn node_properties(
        &self,
        graph: &str,
        node: Self::NodeKey,
    ) -> Result<Vec<(String, Value)>, HostError>;

    /// Sockets of a node on one side
    fn sockets(
        &self,
        graph: &str,
        node: Self::NodeKey,
        side: SocketSide,
    ) -> Result<Vec<SocketInfo>, HostError>;

    /// Sources of all links into an input socket, in link order
    fn links_into(
        &self,
        graph: &str,
        node: Self::NodeKey,
        input: usize,
    ) -> Result<Vec<LinkSource<Self::NodeKey>>, HostError>;

    /// Control points of the node's curve mapping
    fn curve_points(&self, graph: &str, node: Self::NodeKey) -> Result<Vec<CurvePoint>, HostError>;

    /// Whether a data block of `kind` named `name` exists
    fn has_id(&self, kind: IdKind, name: &str) -> bool;

    /// Whether an object exists
    fn object_exists(&self, object: &str) -> bool;

    /// Graph of the object's node modifier.
    ///
    /// `Ok(None)` when the object has no node modifier, `Ok(Some(None))`
    /// when the modifier has no graph.
    fn modifier_graph(&self, object: &str) -> Result<Option<Option<String>>, HostError>;

    // ------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------

    /// Create a graph, returning the name the host gave it
    fn create_graph(&mut self, name: &str) -> Result<String, HostError>;

    /// Remove all interface ports, nodes and links from a graph
    fn clear_graph(&mut self, graph: &str) -> Result<(), HostError>;

    /// Delete a graph; modifiers bound to it are left without one
    fn remove_graph(&mut self, graph: &str) -> Result<(), HostError>;

    /// Append an interface port.
    ///
    /// The identifier is a hint; hosts may generate their own.
    fn add_interface_socket(
        &mut self,
        graph: &str,
        side: SocketSide,
        socket: &InterfaceSocket,
    ) -> Result<(), HostError>;

    /// Create a node of the given type
    fn create_node(&mut self, graph: &str, type_tag: &str) -> Result<Self::NodeKey, HostError>;

    /// Set a built-in attribute
    fn set_node_attribute(
        &mut self,
        graph: &str,
        node: Self::NodeKey,
        attribute: NodeAttribute,
    ) -> Result<(), HostError>;

    /// Set a type-specific property
    fn set_property(
        &mut self,
        graph: &str,
        node: Self::NodeKey,
        name: &str,
        value: Value,
    ) -> Result<(), HostError>;

    /// Append a curve mapping point
    fn add_curve_point(
        &mut self,
        graph: &str,
        node: Self::NodeKey,
        location: [f64; 2],
    ) -> Result<(), HostError>;

    /// Overwrite a curve mapping point
    fn set_curve_point(
        &mut self,
        graph: &str,
        node: Self::NodeKey,
        index: usize,
        point: CurvePoint,
    ) -> Result<(), HostError>;

    /// Set the default value of an input socket
    fn set_socket_default(
        &mut self,
        graph: &str,
        node: Self::NodeKey,
        input: usize,
        value: Value,
    ) -> Result<(), HostError>;

    /// Link an output socket to an input socket
    fn create_link(
        &mut self,
        graph: &str,
        from: Self::NodeKey,
        output: usize,
        to: Self::NodeKey,
        input: usize,
    ) -> Result<(), HostError>;

    /// Add a node modifier to an object
    fn add_node_modifier(&mut self, object: &str) -> Result<(), HostError>;

    /// Point the object's node modifier at a graph
    fn set_modifier_graph(&mut self, object: &str, graph: &str) -> Result<(), HostError>;
}
