// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host: objects, materials and node groups.
//!
//! Behaves like the host the text format was designed against: new nodes and
//! graphs get unique default names, group input/output nodes follow the
//! graph interface, and subgraph instances take their sockets from the graph
//! they reference.

use crate::accessor::{
    GraphAccessor, HostError, IdKind, LinkSource, NodeAttribute, NodeInfo, SocketInfo,
};
use crate::graph::{unique_name, NodeGroup};
use crate::node::{Node, NodeId, Socket};
use crate::registry;
use crate::schema::{NodeSchemaRegistry, SocketLayout};
use crate::value::{CurvePoint, InterfaceSocket, SocketSide, Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name given to new node modifiers
pub const MODIFIER_NAME: &str = "GeometryNodes";

/// A node modifier on an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodesModifier {
    /// Modifier name
    pub name: String,
    /// Graph evaluated by the modifier
    pub node_group: Option<String>,
}

/// A scene object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneObject {
    /// Node modifiers in stack order
    pub modifiers: Vec<NodesModifier>,
}

/// In-memory scene implementing [`GraphAccessor`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Objects by name
    pub objects: IndexMap<String, SceneObject>,
    /// Material names
    pub materials: Vec<String>,
    /// Node groups by name
    pub node_groups: IndexMap<String, NodeGroup>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object without modifiers
    pub fn add_object(&mut self, name: impl Into<String>) {
        self.objects.entry(name.into()).or_default();
    }

    /// Add a material
    pub fn add_material(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.materials.contains(&name) {
            self.materials.push(name);
        }
    }

    /// Get a node group by name
    pub fn group(&self, name: &str) -> Option<&NodeGroup> {
        self.node_groups.get(name)
    }

    /// Get a mutable node group by name
    pub fn group_mut(&mut self, name: &str) -> Option<&mut NodeGroup> {
        self.node_groups.get_mut(name)
    }

    /// Create a node and give it a name
    pub fn spawn_node(
        &mut self,
        graph: &str,
        type_tag: &str,
        name: &str,
        location: [f64; 2],
    ) -> Result<NodeId, HostError> {
        let id = self.create_node(graph, type_tag)?;
        self.set_node_attribute(graph, id, NodeAttribute::Name(name.to_string()))?;
        self.set_node_attribute(graph, id, NodeAttribute::Location(location))?;
        Ok(id)
    }

    /// Link two nodes by socket index
    pub fn link(
        &mut self,
        graph: &str,
        from: NodeId,
        output: usize,
        to: NodeId,
        input: usize,
    ) -> Result<(), HostError> {
        self.create_link(graph, from, output, to, input)
    }

    fn graph_ref(&self, graph: &str) -> Result<&NodeGroup, HostError> {
        self.node_groups
            .get(graph)
            .ok_or_else(|| HostError::GraphNotFound(graph.to_string()))
    }

    fn graph_mut(&mut self, graph: &str) -> Result<&mut NodeGroup, HostError> {
        self.node_groups
            .get_mut(graph)
            .ok_or_else(|| HostError::GraphNotFound(graph.to_string()))
    }

    fn node_ref(&self, graph: &str, node: NodeId) -> Result<&Node, HostError> {
        self.graph_ref(graph)?
            .node(node)
            .ok_or_else(|| HostError::NodeNotFound(graph.to_string()))
    }

    fn node_mut(&mut self, graph: &str, node: NodeId) -> Result<&mut Node, HostError> {
        self.graph_mut(graph)?
            .node_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(graph.to_string()))
    }

    /// Rebind a subgraph instance and rebuild its sockets
    fn bind_subgraph(
        &mut self,
        graph: &str,
        node: NodeId,
        target: Option<String>,
    ) -> Result<(), HostError> {
        let (inputs, outputs) = match &target {
            Some(name) => {
                let sub = self.graph_ref(name)?;
                (
                    sub.inputs.iter().map(Socket::from_interface_input).collect(),
                    sub.outputs.iter().map(Socket::from_interface_output).collect(),
                )
            }
            None => (Vec::new(), Vec::new()),
        };
        let group = self.graph_mut(graph)?;
        let entry = group
            .node_mut(node)
            .ok_or_else(|| HostError::NodeNotFound(graph.to_string()))?;
        entry.node_tree = target;
        if NodeSchemaRegistry::socket_layout(&entry.type_tag) == SocketLayout::Subgraph {
            entry.inputs = inputs;
            entry.outputs = outputs;
        }
        group.prune_links();
        Ok(())
    }

    fn first_modifier_mut(&mut self, object: &str) -> Result<&mut NodesModifier, HostError> {
        self.objects
            .get_mut(object)
            .ok_or_else(|| HostError::ObjectNotFound(object.to_string()))?
            .modifiers
            .first_mut()
            .ok_or_else(|| HostError::NoNodeModifier(object.to_string()))
    }
}

impl GraphAccessor for Scene {
    type NodeKey = NodeId;

    fn has_graph(&self, graph: &str) -> bool {
        self.node_groups.contains_key(graph)
    }

    fn interface(&self, graph: &str, side: SocketSide) -> Result<Vec<InterfaceSocket>, HostError> {
        Ok(self.graph_ref(graph)?.interface(side).to_vec())
    }

    fn nodes(&self, graph: &str) -> Result<Vec<NodeId>, HostError> {
        Ok(self.graph_ref(graph)?.node_ids().collect())
    }

    fn node_info(&self, graph: &str, node: NodeId) -> Result<NodeInfo, HostError> {
        Ok(self.node_ref(graph, node)?.info())
    }

    fn node_properties(&self, graph: &str, node: NodeId) -> Result<Vec<(String, Value)>, HostError> {
        Ok(self
            .node_ref(graph, node)?
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    fn sockets(&self, graph: &str, node: NodeId, side: SocketSide) -> Result<Vec<SocketInfo>, HostError> {
        let node = self.node_ref(graph, node)?;
        let sockets = match side {
            SocketSide::Input => &node.inputs,
            SocketSide::Output => &node.outputs,
        };
        Ok(sockets.iter().map(Socket::info).collect())
    }

    fn links_into(
        &self,
        graph: &str,
        node: NodeId,
        input: usize,
    ) -> Result<Vec<LinkSource<NodeId>>, HostError> {
        let group = self.graph_ref(graph)?;
        let target = group
            .node(node)
            .ok_or_else(|| HostError::NodeNotFound(graph.to_string()))?;
        let socket = target.input(input).ok_or_else(|| HostError::SocketOutOfRange {
            node: target.name.clone(),
            index: input,
        })?;
        Ok(group
            .links_to(node, &socket.identifier)
            .map(|link| LinkSource {
                node: link.from_node,
                socket: link.from_socket.clone(),
            })
            .collect())
    }

    fn curve_points(&self, graph: &str, node: NodeId) -> Result<Vec<CurvePoint>, HostError> {
        let node = self.node_ref(graph, node)?;
        node.curve
            .clone()
            .ok_or_else(|| HostError::NoCurveMapping(node.name.clone()))
    }

    fn has_id(&self, kind: IdKind, name: &str) -> bool {
        match kind {
            IdKind::Object => self.objects.contains_key(name),
            IdKind::Material => self.materials.iter().any(|m| m == name),
        }
    }

    fn object_exists(&self, object: &str) -> bool {
        self.objects.contains_key(object)
    }

    fn modifier_graph(&self, object: &str) -> Result<Option<Option<String>>, HostError> {
        let object = self
            .objects
            .get(object)
            .ok_or_else(|| HostError::ObjectNotFound(object.to_string()))?;
        Ok(object.modifiers.first().map(|m| m.node_group.clone()))
    }

    fn create_graph(&mut self, name: &str) -> Result<String, HostError> {
        let name = unique_name(name, |n| self.node_groups.contains_key(n));
        self.node_groups.insert(name.clone(), NodeGroup::new(name.clone()));
        tracing::debug!("Created node group {name}");
        Ok(name)
    }

    fn clear_graph(&mut self, graph: &str) -> Result<(), HostError> {
        self.graph_mut(graph)?.clear();
        Ok(())
    }

    fn remove_graph(&mut self, graph: &str) -> Result<(), HostError> {
        if self.node_groups.shift_remove(graph).is_none() {
            return Err(HostError::GraphNotFound(graph.to_string()));
        }
        for modifier in self.objects.values_mut().flat_map(|o| o.modifiers.iter_mut()) {
            if modifier.node_group.as_deref() == Some(graph) {
                modifier.node_group = None;
            }
        }
        tracing::debug!("Removed node group {graph}");
        Ok(())
    }

    fn add_interface_socket(
        &mut self,
        graph: &str,
        side: SocketSide,
        socket: &InterfaceSocket,
    ) -> Result<(), HostError> {
        self.graph_mut(graph)?.add_interface_socket(side, socket);
        Ok(())
    }

    fn create_node(&mut self, graph: &str, type_tag: &str) -> Result<NodeId, HostError> {
        let mut node = match NodeSchemaRegistry::builtin().get(type_tag) {
            Some(schema) => Node::new(schema),
            None => {
                // Registered but without a schema: no sockets, no properties
                let name = registry::canonical_name(type_tag)
                    .ok_or_else(|| HostError::UnsupportedNodeType(type_tag.to_string()))?;
                tracing::debug!("No schema for {type_tag}, creating a bare node");
                Node::bare(type_tag, name)
            }
        };
        let group = self.graph_mut(graph)?;
        node.name = unique_name(&node.name, |n| group.name_taken(n, None));
        Ok(group.add_node(node))
    }

    fn set_node_attribute(
        &mut self,
        graph: &str,
        node: NodeId,
        attribute: NodeAttribute,
    ) -> Result<(), HostError> {
        if let NodeAttribute::NodeTree(target) = attribute {
            return self.bind_subgraph(graph, node, target);
        }
        if let NodeAttribute::Name(name) = &attribute {
            let group = self.graph_ref(graph)?;
            let name = unique_name(name, |n| group.name_taken(n, Some(node)));
            self.node_mut(graph, node)?.name = name;
            return Ok(());
        }

        let entry = self.node_mut(graph, node)?;
        match attribute {
            NodeAttribute::Label(label) => entry.label = label,
            NodeAttribute::Location(location) => entry.location = location,
            NodeAttribute::Width(width) => entry.width = width,
            NodeAttribute::Hide(hide) => entry.hide = hide,
            NodeAttribute::Color(color) => entry.color = color,
            NodeAttribute::UseCustomColor(enabled) => entry.use_custom_color = enabled,
            NodeAttribute::Select(select) => entry.select = select,
            NodeAttribute::Name(_) | NodeAttribute::NodeTree(_) => {}
        }
        Ok(())
    }

    fn set_property(
        &mut self,
        graph: &str,
        node: NodeId,
        name: &str,
        value: Value,
    ) -> Result<(), HostError> {
        let entry = self.node_mut(graph, node)?;
        let node_name = entry.name.clone();
        let slot = entry
            .properties
            .get_mut(name)
            .ok_or_else(|| HostError::UnknownProperty {
                node: node_name,
                property: name.to_string(),
            })?;
        let expected = slot.kind();
        if expected == ValueKind::Unsupported || !value.fits(expected) {
            return Err(HostError::TypeMismatch {
                expected,
                found: value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }

    fn add_curve_point(&mut self, graph: &str, node: NodeId, location: [f64; 2]) -> Result<(), HostError> {
        let entry = self.node_mut(graph, node)?;
        let name = entry.name.clone();
        entry
            .curve
            .as_mut()
            .ok_or(HostError::NoCurveMapping(name))?
            .push(CurvePoint::auto(location[0], location[1]));
        Ok(())
    }

    fn set_curve_point(
        &mut self,
        graph: &str,
        node: NodeId,
        index: usize,
        point: CurvePoint,
    ) -> Result<(), HostError> {
        let entry = self.node_mut(graph, node)?;
        let name = entry.name.clone();
        let points = entry
            .curve
            .as_mut()
            .ok_or_else(|| HostError::NoCurveMapping(name.clone()))?;
        let slot = points
            .get_mut(index)
            .ok_or(HostError::PointOutOfRange { node: name, index })?;
        *slot = point;
        Ok(())
    }

    fn set_socket_default(
        &mut self,
        graph: &str,
        node: NodeId,
        input: usize,
        value: Value,
    ) -> Result<(), HostError> {
        let entry = self.node_mut(graph, node)?;
        let name = entry.name.clone();
        let socket = entry
            .inputs
            .get_mut(input)
            .ok_or(HostError::SocketOutOfRange { node: name, index: input })?;
        if socket.default.is_none() || !value.fits(socket.kind) {
            return Err(HostError::TypeMismatch {
                expected: socket.kind,
                found: value.kind(),
            });
        }
        socket.default = Some(value);
        Ok(())
    }

    fn create_link(
        &mut self,
        graph: &str,
        from: NodeId,
        output: usize,
        to: NodeId,
        input: usize,
    ) -> Result<(), HostError> {
        self.graph_mut(graph)?.connect(from, output, to, input)?;
        Ok(())
    }

    fn add_node_modifier(&mut self, object: &str) -> Result<(), HostError> {
        let entry = self
            .objects
            .get_mut(object)
            .ok_or_else(|| HostError::ObjectNotFound(object.to_string()))?;
        entry.modifiers.push(NodesModifier {
            name: MODIFIER_NAME.to_string(),
            node_group: None,
        });
        Ok(())
    }

    fn set_modifier_graph(&mut self, object: &str, graph: &str) -> Result<(), HostError> {
        if !self.has_graph(graph) {
            return Err(HostError::GraphNotFound(graph.to_string()));
        }
        self.first_modifier_mut(object)?.node_group = Some(graph.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{GROUP_INPUT, GROUP_INSTANCE, GROUP_OUTPUT};

    fn scene_with_graph(name: &str) -> Scene {
        let mut scene = Scene::new();
        scene.create_graph(name).unwrap();
        scene
    }

    #[test]
    fn test_create_node_default_names() {
        let mut scene = scene_with_graph("G");
        let a = scene.create_node("G", "GeometryNodeMeshCube").unwrap();
        let b = scene.create_node("G", "GeometryNodeMeshCube").unwrap();
        assert_eq!(scene.node_info("G", a).unwrap().name, "Cube");
        assert_eq!(scene.node_info("G", b).unwrap().name, "Cube.001");
    }

    #[test]
    fn test_create_node_without_schema() {
        let mut scene = scene_with_graph("G");
        let id = scene.create_node("G", "GeometryNodeFlipFaces").unwrap();
        assert_eq!(scene.node_info("G", id).unwrap().name, "Flip Faces");
        assert!(scene.sockets("G", id, SocketSide::Input).unwrap().is_empty());
        assert!(matches!(
            scene.create_node("G", "NotANode"),
            Err(HostError::UnsupportedNodeType(_))
        ));
    }

    #[test]
    fn test_rename_collision_is_uniquified() {
        let mut scene = scene_with_graph("G");
        let a = scene.spawn_node("G", "ShaderNodeMath", "Add", [0.0, 0.0]).unwrap();
        let b = scene.spawn_node("G", "ShaderNodeMath", "Add", [0.0, 0.0]).unwrap();
        assert_eq!(scene.node_info("G", a).unwrap().name, "Add");
        assert_eq!(scene.node_info("G", b).unwrap().name, "Add.001");
    }

    #[test]
    fn test_create_graph_unique() {
        let mut scene = scene_with_graph("Geometry Nodes");
        assert_eq!(scene.create_graph("Geometry Nodes").unwrap(), "Geometry Nodes.001");
    }

    #[test]
    fn test_remove_graph_unbinds_modifiers() {
        let mut scene = scene_with_graph("G");
        scene.add_object("Plane");
        scene.add_node_modifier("Plane").unwrap();
        scene.set_modifier_graph("Plane", "G").unwrap();

        scene.remove_graph("G").unwrap();
        assert!(!scene.has_graph("G"));
        assert_eq!(scene.modifier_graph("Plane").unwrap(), Some(None));
        assert!(matches!(scene.remove_graph("G"), Err(HostError::GraphNotFound(_))));
    }

    #[test]
    fn test_subgraph_binding_rebuilds_sockets() {
        let mut scene = scene_with_graph("Leaf");
        scene
            .add_interface_socket(
                "Leaf",
                SocketSide::Input,
                &InterfaceSocket::new("Input_0", "Amount", "NodeSocketFloatFactor").with_range(0.5, 0.0, 1.0),
            )
            .unwrap();
        scene
            .add_interface_socket(
                "Leaf",
                SocketSide::Output,
                &InterfaceSocket::new("Output_1", "Geometry", "NodeSocketGeometry"),
            )
            .unwrap();
        scene.create_graph("Root").unwrap();
        let group = scene.create_node("Root", GROUP_INSTANCE).unwrap();
        scene
            .set_node_attribute("Root", group, NodeAttribute::NodeTree(Some("Leaf".into())))
            .unwrap();

        let inputs = scene.sockets("Root", group, SocketSide::Input).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].default, Some(Value::Float(0.5)));
        assert_eq!(scene.sockets("Root", group, SocketSide::Output).unwrap().len(), 1);
        assert_eq!(scene.node_info("Root", group).unwrap().node_tree.as_deref(), Some("Leaf"));
    }

    #[test]
    fn test_links_into() {
        let mut scene = scene_with_graph("G");
        scene
            .add_interface_socket("G", SocketSide::Input, &InterfaceSocket::new("", "Size", "NodeSocketVector"))
            .unwrap();
        let input = scene.spawn_node("G", GROUP_INPUT, "Group Input", [-200.0, 0.0]).unwrap();
        let cube = scene.spawn_node("G", "GeometryNodeMeshCube", "Cube", [0.0, 0.0]).unwrap();
        scene.link("G", input, 0, cube, 0).unwrap();

        let sources = scene.links_into("G", cube, 0).unwrap();
        assert_eq!(sources, vec![LinkSource { node: input, socket: "Input_0".to_string() }]);
        assert!(scene.links_into("G", cube, 1).unwrap().is_empty());
    }

    #[test]
    fn test_property_and_default_type_checks() {
        let mut scene = scene_with_graph("G");
        let math = scene.create_node("G", "ShaderNodeMath").unwrap();
        scene
            .set_property("G", math, "operation", Value::String("MULTIPLY".into()))
            .unwrap();
        assert!(matches!(
            scene.set_property("G", math, "operation", Value::Float(1.0)),
            Err(HostError::TypeMismatch { .. })
        ));
        assert!(matches!(
            scene.set_property("G", math, "missing", Value::Bool(true)),
            Err(HostError::UnknownProperty { .. })
        ));
        scene.set_socket_default("G", math, 1, Value::Float(2.0)).unwrap();
        assert!(scene.set_socket_default("G", math, 1, Value::Bool(true)).is_err());
    }

    #[test]
    fn test_curve_points() {
        let mut scene = scene_with_graph("G");
        let curve = scene.create_node("G", "ShaderNodeFloatCurve").unwrap();
        scene.add_curve_point("G", curve, [0.5, 0.5]).unwrap();
        scene
            .set_curve_point("G", curve, 2, CurvePoint { handle_type: "VECTOR".into(), location: [0.5, 0.8] })
            .unwrap();
        let points = scene.curve_points("G", curve).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].handle_type, "VECTOR");
        assert!(scene.set_curve_point("G", curve, 7, CurvePoint::auto(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_modifier_binding() {
        let mut scene = scene_with_graph("G");
        scene.add_object("Plane");
        assert_eq!(scene.modifier_graph("Plane").unwrap(), None);
        assert!(matches!(
            scene.set_modifier_graph("Plane", "G"),
            Err(HostError::NoNodeModifier(_))
        ));
        scene.add_node_modifier("Plane").unwrap();
        assert_eq!(scene.modifier_graph("Plane").unwrap(), Some(None));
        scene.set_modifier_graph("Plane", "G").unwrap();
        assert_eq!(scene.modifier_graph("Plane").unwrap(), Some(Some("G".to_string())));
        assert!(scene.modifier_graph("Missing").is_err());
    }

    #[test]
    fn test_group_output_follows_interface() {
        let mut scene = scene_with_graph("G");
        let out = scene.create_node("G", GROUP_OUTPUT).unwrap();
        scene
            .add_interface_socket("G", SocketSide::Output, &InterfaceSocket::new("", "Geometry", "NodeSocketGeometry"))
            .unwrap();
        assert_eq!(scene.sockets("G", out, SocketSide::Input).unwrap().len(), 1);
    }

    #[test]
    fn test_scene_ron_round_trip() {
        let mut scene = scene_with_graph("G");
        scene.add_object("Cube");
        scene.add_material("Steel");
        scene.spawn_node("G", "GeometryNodeMeshCube", "Cube", [10.0, 20.0]).unwrap();

        let text = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Scene = ron::from_str(&text).unwrap();
        assert_eq!(loaded.group("G").unwrap().node_count(), 1);
        assert!(loaded.has_id(IdKind::Material, "Steel"));
    }
}
