// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node group: nodes, links and the group's external interface.

use crate::accessor::HostError;
use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId, Socket};
use crate::schema::{NodeSchemaRegistry, SocketLayout};
use crate::value::{InterfaceSocket, SocketSide};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGroup {
    /// Graph name
    pub name: String,
    /// Interface inputs
    pub inputs: Vec<InterfaceSocket>,
    /// Interface outputs
    pub outputs: Vec<InterfaceSocket>,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between nodes
    links: IndexMap<LinkId, Link>,
}

impl NodeGroup {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Interface ports on one side
    pub fn interface(&self, side: SocketSide) -> &[InterfaceSocket] {
        match side {
            SocketSide::Input => &self.inputs,
            SocketSide::Output => &self.outputs,
        }
    }

    /// Append an interface port, keeping the identifier when it is free
    pub fn add_interface_socket(&mut self, side: SocketSide, socket: &InterfaceSocket) {
        let ports = match side {
            SocketSide::Input => &mut self.inputs,
            SocketSide::Output => &mut self.outputs,
        };
        let mut socket = socket.clone();
        let taken = |id: &str| ports.iter().any(|p| p.identifier == id);
        if socket.identifier.is_empty() || taken(&socket.identifier) {
            let prefix = match side {
                SocketSide::Input => "Input",
                SocketSide::Output => "Output",
            };
            let mut n = ports.len();
            while taken(&format!("{prefix}_{n}")) {
                n += 1;
            }
            socket.identifier = format!("{prefix}_{n}");
        }
        ports.push(socket);
        self.sync_interface_nodes();
    }

    /// Rebuild the sockets of group input/output nodes from the interface
    pub fn sync_interface_nodes(&mut self) {
        for node in self.nodes.values_mut() {
            match NodeSchemaRegistry::socket_layout(&node.type_tag) {
                SocketLayout::GraphInputs => {
                    node.outputs = self.inputs.iter().map(Socket::from_interface_output).collect();
                }
                SocketLayout::GraphOutputs => {
                    node.inputs = self.outputs.iter().map(Socket::from_interface_input).collect();
                }
                SocketLayout::Static | SocketLayout::Subgraph => {}
            }
        }
        self.prune_links();
    }

    /// Drop links whose sockets no longer exist
    pub fn prune_links(&mut self) {
        let nodes = &self.nodes;
        self.links.retain(|_, link| {
            let from = nodes
                .get(&link.from_node)
                .is_some_and(|n| n.outputs.iter().any(|s| s.identifier == link.from_socket));
            let to = nodes
                .get(&link.to_node)
                .is_some_and(|n| n.inputs.iter().any(|s| s.identifier == link.to_socket));
            from && to
        });
    }

    /// Remove the interface, nodes and links
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
        self.nodes.clear();
        self.links.clear();
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        self.sync_interface_nodes();
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Find a node by name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether another node already uses `name`
    pub fn name_taken(&self, name: &str, except: Option<NodeId>) -> bool {
        self.nodes
            .values()
            .any(|n| n.name == name && Some(n.id) != except)
    }

    /// Link an output socket to an input socket, by index
    pub fn connect(
        &mut self,
        from_node: NodeId,
        output: usize,
        to_node: NodeId,
        input: usize,
    ) -> Result<LinkId, HostError> {
        let source = self
            .nodes
            .get(&from_node)
            .ok_or_else(|| HostError::NodeNotFound(self.name.clone()))?;
        let target = self
            .nodes
            .get(&to_node)
            .ok_or_else(|| HostError::NodeNotFound(self.name.clone()))?;

        let from_socket = source.output(output).ok_or_else(|| HostError::SocketOutOfRange {
            node: source.name.clone(),
            index: output,
        })?;
        let to_socket = target.input(input).ok_or_else(|| HostError::SocketOutOfRange {
            node: target.name.clone(),
            index: input,
        })?;

        let link = Link::new(from_node, &from_socket.identifier, to_node, &to_socket.identifier);
        let id = link.id;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links ending at an input socket
    pub fn links_to<'a>(&'a self, node_id: NodeId, socket: &'a str) -> impl Iterator<Item = &'a Link> {
        self.links.values().filter(move |l| l.targets(node_id, socket))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl Default for NodeGroup {
    fn default() -> Self {
        Self::new("Geometry Nodes")
    }
}

/// Pick `base` or the first free `base.NNN` variant
pub fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let stem = match base.rsplit_once('.') {
        Some((stem, suffix)) if suffix.len() == 3 && suffix.bytes().all(|b| b.is_ascii_digit()) => stem,
        _ => base,
    };
    (1..)
        .map(|n| format!("{stem}.{n:03}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{GROUP_INPUT, GROUP_OUTPUT};

    fn node(type_tag: &str) -> Node {
        Node::new(NodeSchemaRegistry::builtin().get(type_tag).unwrap())
    }

    #[test]
    fn test_unique_name() {
        let taken = ["Cube", "Cube.001"];
        assert_eq!(unique_name("Math", |n| taken.contains(&n)), "Math");
        assert_eq!(unique_name("Cube", |n| taken.contains(&n)), "Cube.002");
        assert_eq!(unique_name("Cube.001", |n| taken.contains(&n)), "Cube.002");
    }

    #[test]
    fn test_interface_drives_group_nodes() {
        let mut group = NodeGroup::new("Test");
        let input = group.add_node(node(GROUP_INPUT));
        let output = group.add_node(node(GROUP_OUTPUT));
        group.add_interface_socket(
            SocketSide::Input,
            &InterfaceSocket::new("Input_0", "Geometry", "NodeSocketGeometry"),
        );
        group.add_interface_socket(
            SocketSide::Output,
            &InterfaceSocket::new("Output_1", "Geometry", "NodeSocketGeometry"),
        );

        assert_eq!(group.node(input).unwrap().outputs.len(), 1);
        assert_eq!(group.node(output).unwrap().inputs[0].identifier, "Output_1");
        group.connect(input, 0, output, 0).unwrap();
        assert_eq!(group.link_count(), 1);
    }

    #[test]
    fn test_duplicate_interface_identifier_regenerated() {
        let mut group = NodeGroup::new("Test");
        let port = InterfaceSocket::new("Input_0", "A", "NodeSocketFloat");
        group.add_interface_socket(SocketSide::Input, &port);
        group.add_interface_socket(SocketSide::Input, &port);
        assert_eq!(group.inputs[1].identifier, "Input_1");
    }

    #[test]
    fn test_connect_out_of_range() {
        let mut group = NodeGroup::new("Test");
        let cube = group.add_node(node("GeometryNodeMeshCube"));
        let transform = group.add_node(node("GeometryNodeTransform"));
        assert!(matches!(
            group.connect(cube, 5, transform, 0),
            Err(HostError::SocketOutOfRange { index: 5, .. })
        ));
    }
}
