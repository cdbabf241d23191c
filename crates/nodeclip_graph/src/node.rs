// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nodes and sockets of the in-memory host.

use crate::accessor::{NodeInfo, SocketInfo};
use crate::registry::GROUP_OUTPUT;
use crate::schema::{NodeSchema, SocketTemplate};
use crate::value::{CurvePoint, InterfaceSocket, Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default node width
pub const DEFAULT_WIDTH: f64 = 140.0;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A socket on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    /// Stable identifier, unique per side
    pub identifier: String,
    /// Display name
    pub name: String,
    /// Value kind
    pub kind: ValueKind,
    /// Default value (inputs only)
    pub default: Option<Value>,
}

impl Socket {
    /// Build an input socket mirroring a graph interface port
    pub fn from_interface_input(port: &InterfaceSocket) -> Self {
        let kind = port.kind();
        let default = match (&port.range, kind) {
            (Some(range), _) => Some(Value::Float(range.default)),
            _ => initial_value(kind),
        };
        Self {
            identifier: port.identifier.clone(),
            name: port.name.clone(),
            kind,
            default,
        }
    }

    /// Build an output socket mirroring a graph interface port
    pub fn from_interface_output(port: &InterfaceSocket) -> Self {
        Self {
            identifier: port.identifier.clone(),
            name: port.name.clone(),
            kind: port.kind(),
            default: None,
        }
    }

    /// Snapshot for the accessor
    pub fn info(&self) -> SocketInfo {
        SocketInfo {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            kind: self.kind,
            default: self.default.clone(),
        }
    }
}

impl From<&SocketTemplate> for Socket {
    fn from(template: &SocketTemplate) -> Self {
        Self {
            identifier: template.identifier.clone(),
            name: template.name.clone(),
            kind: template.kind,
            default: template.default.clone(),
        }
    }
}

/// Zero value a fresh socket of `kind` starts with
fn initial_value(kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::Float => Some(Value::Float(0.0)),
        ValueKind::Int => Some(Value::Int(0)),
        ValueKind::Bool => Some(Value::Bool(false)),
        ValueKind::Vector => Some(Value::Vector(vec![0.0; 3])),
        ValueKind::Color => Some(Value::Vector(vec![0.0, 0.0, 0.0, 1.0])),
        ValueKind::String => Some(Value::String(String::new())),
        ValueKind::Object => Some(Value::Object(None)),
        ValueKind::Material => Some(Value::Material(None)),
        ValueKind::Unsupported => None,
    }
}

/// A node instance in a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Type tag
    pub type_tag: String,
    /// Name, unique within the graph
    pub name: String,
    /// Label (empty when unset)
    pub label: String,
    /// Position in the editor
    pub location: [f64; 2],
    /// Width in the editor
    pub width: f64,
    /// Whether the node is collapsed
    pub hide: bool,
    /// Whether the node is selected
    pub select: bool,
    /// Whether the custom color is in use
    pub use_custom_color: bool,
    /// Custom color
    pub color: [f64; 3],
    /// Referenced subgraph (subgraph instances only)
    pub node_tree: Option<String>,
    /// Active flag of output nodes
    pub is_active_output: Option<bool>,
    /// Type-specific properties in declaration order
    pub properties: IndexMap<String, Value>,
    /// Curve mapping control points
    pub curve: Option<Vec<CurvePoint>>,
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Create a new node from a schema
    pub fn new(schema: &NodeSchema) -> Self {
        let mut node = Self::bare(&schema.id, &schema.default_name);
        node.properties = schema.properties.iter().cloned().collect();
        node.curve = schema.curve.clone();
        node.inputs = schema.inputs.iter().map(Socket::from).collect();
        node.outputs = schema.outputs.iter().map(Socket::from).collect();
        node
    }

    /// Create a node with no sockets or properties
    pub fn bare(type_tag: &str, name: &str) -> Self {
        Self {
            id: NodeId::new(),
            type_tag: type_tag.to_string(),
            name: name.to_string(),
            label: String::new(),
            location: [0.0, 0.0],
            width: DEFAULT_WIDTH,
            hide: false,
            select: true,
            use_custom_color: false,
            color: [0.608, 0.608, 0.608],
            node_tree: None,
            is_active_output: (type_tag == GROUP_OUTPUT).then_some(true),
            properties: IndexMap::new(),
            curve: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Get an input socket by index
    pub fn input(&self, index: usize) -> Option<&Socket> {
        self.inputs.get(index)
    }

    /// Get an output socket by index
    pub fn output(&self, index: usize) -> Option<&Socket> {
        self.outputs.get(index)
    }

    /// Snapshot for the accessor
    pub fn info(&self) -> NodeInfo {
        NodeInfo {
            name: self.name.clone(),
            type_tag: self.type_tag.clone(),
            label: self.label.clone(),
            location: self.location,
            width: self.width,
            hide: self.hide,
            use_custom_color: self.use_custom_color,
            color: self.color,
            node_tree: self.node_tree.clone(),
            is_active_output: self.is_active_output,
        }
    }
}
