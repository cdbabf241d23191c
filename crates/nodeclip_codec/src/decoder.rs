// SPDX-License-Identifier: MIT OR Apache-2.0
//! Text to graph.
//!
//! Decoding overwrites: each graph block replaces the whole content of the
//! host graph of the same name. Nodes are built in two passes so links may
//! point at nodes declared further down the block.

use crate::document::{
    BuiltinAttribute, Directive, Document, GraphBlock, InputEntry, InputValue, NodeEntry, SocketKey,
    NODE_TREE_KEY,
};
use crate::error::{CodecError, DecodeWarning, LinkFailure};
use crate::link_ref::regroup;
use crate::literal::{coerce, number, numbers, scalar_text};
use nodeclip_graph::schema::MAPPING_PROPERTY;
use nodeclip_graph::{
    CurvePoint, GraphAccessor, HostError, IdKind, NodeAttribute, SocketInfo, SocketSide, Value,
};
use serde_yaml::Value as Yaml;
use std::collections::HashMap;

/// A graph the decoder populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    /// Host name of the graph
    pub name: String,
    /// Nodes created
    pub nodes: usize,
    /// Links created
    pub links: usize,
}

/// A directive that took effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDirective {
    /// Host name of the graph
    pub graph: String,
    /// Node name
    pub node: String,
    /// Directive key; inputs are reported as `inputs.<socket>`
    pub key: String,
}

/// Outcome of a decode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    /// Graphs in the order they were decoded
    pub graphs: Vec<GraphSummary>,
    /// Directives applied, in order
    pub applied: Vec<AppliedDirective>,
    /// Skipped directives
    pub warnings: Vec<DecodeWarning>,
    /// Graph bound to the target object
    pub attached: Option<String>,
}

impl DecodeReport {
    /// The root graph, decoded last
    pub fn root(&self) -> Option<&GraphSummary> {
        self.graphs.last()
    }
}

/// Decode `text` into `host`, binding the root graph to `target` if given.
///
/// The document is validated completely before the host is modified.
pub fn decode<A: GraphAccessor>(
    host: &mut A,
    text: &str,
    target: Option<&str>,
) -> Result<DecodeReport, CodecError> {
    let document = Document::parse(text)?;
    decode_document(host, &document, target)
}

/// Apply an already validated document
pub fn decode_document<A: GraphAccessor>(
    host: &mut A,
    document: &Document,
    target: Option<&str>,
) -> Result<DecodeReport, CodecError> {
    if let Some(object) = target {
        if !host.object_exists(object) {
            return Err(HostError::ObjectNotFound(object.to_string()).into());
        }
    }

    let mut decoder = Decoder::new(host);
    for block in &document.graphs {
        decoder.decode_graph(block)?;
    }
    if let Some(object) = target {
        decoder.attach(object)?;
    }

    let report = decoder.finish();
    tracing::info!(
        "Decoded {} graph(s): {} directive(s) applied, {} warning(s)",
        report.graphs.len(),
        report.applied.len(),
        report.warnings.len()
    );
    Ok(report)
}

/// Applies graph blocks to a host
pub struct Decoder<'a, A: GraphAccessor> {
    host: &'a mut A,
    /// Document graph name to host graph name
    graph_names: HashMap<String, String>,
    report: DecodeReport,
}

/// Per-graph state, dropped when the block is done
struct GraphScope<K> {
    graph: String,
    nodes: HashMap<String, K>,
    links: usize,
}

impl<'a, A: GraphAccessor> Decoder<'a, A> {
    /// Create a decoder
    pub fn new(host: &'a mut A) -> Self {
        Self {
            host,
            graph_names: HashMap::new(),
            report: DecodeReport::default(),
        }
    }

    /// Finish and return the report
    pub fn finish(self) -> DecodeReport {
        self.report
    }

    /// Replace the content of one graph with a block
    pub fn decode_graph(&mut self, block: &GraphBlock) -> Result<(), CodecError> {
        let graph = if self.host.has_graph(&block.name) {
            block.name.clone()
        } else {
            self.host.create_graph(&block.name)?
        };
        self.graph_names.insert(block.name.clone(), graph.clone());
        tracing::debug!("Decoding graph {} into {graph}", block.name);

        self.host.clear_graph(&graph)?;
        for socket in &block.inputs {
            self.host.add_interface_socket(&graph, SocketSide::Input, socket)?;
        }
        for socket in &block.outputs {
            self.host.add_interface_socket(&graph, SocketSide::Output, socket)?;
        }

        let mut scope = GraphScope {
            graph,
            nodes: HashMap::new(),
            links: 0,
        };

        // Pass 1: create every node; bind subgraphs so instance sockets exist
        // before anything links to them
        for entry in &block.nodes {
            let node = self.host.create_node(&scope.graph, &entry.type_tag)?;
            self.host
                .set_node_attribute(&scope.graph, node, NodeAttribute::Name(entry.name.clone()))?;
            self.host
                .set_node_attribute(&scope.graph, node, NodeAttribute::Select(false))?;
            if let Some(subgraph) = entry.node_tree() {
                self.bind_subgraph(&scope.graph, node, entry, subgraph)?;
            }
            scope.nodes.insert(entry.name.clone(), node);
        }

        // Pass 2: everything else, in document order
        for entry in &block.nodes {
            let Some(&node) = scope.nodes.get(&entry.name) else {
                continue;
            };
            for directive in &entry.directives {
                self.apply(&mut scope, node, entry, directive)?;
            }
        }

        tracing::debug!(
            "Graph {}: {} node(s), {} link(s)",
            scope.graph,
            scope.nodes.len(),
            scope.links
        );
        self.report.graphs.push(GraphSummary {
            name: scope.graph,
            nodes: scope.nodes.len(),
            links: scope.links,
        });
        Ok(())
    }

    /// Bind the last decoded graph to an object's node modifier
    pub fn attach(&mut self, object: &str) -> Result<(), CodecError> {
        let Some(root) = self.report.root().map(|g| g.name.clone()) else {
            return Ok(());
        };
        if self.host.modifier_graph(object)?.is_none() {
            tracing::debug!("Adding a node modifier to {object}");
            self.host.add_node_modifier(object)?;
        }
        self.host.set_modifier_graph(object, &root)?;
        tracing::debug!("Attached {root} to {object}");
        self.report.attached = Some(root);
        Ok(())
    }

    fn bind_subgraph(
        &mut self,
        graph: &str,
        node: A::NodeKey,
        entry: &NodeEntry,
        subgraph: &str,
    ) -> Result<(), CodecError> {
        let target = match self.graph_names.get(subgraph) {
            Some(name) => name.clone(),
            None if self.host.has_graph(subgraph) => subgraph.to_string(),
            None => {
                self.warn(DecodeWarning::UnresolvedSubgraph {
                    graph: graph.to_string(),
                    node: entry.name.clone(),
                    subgraph: subgraph.to_string(),
                });
                return Ok(());
            }
        };
        self.host
            .set_node_attribute(graph, node, NodeAttribute::NodeTree(Some(target)))?;
        self.applied(graph, &entry.name, NODE_TREE_KEY);
        Ok(())
    }

    fn apply(
        &mut self,
        scope: &mut GraphScope<A::NodeKey>,
        node: A::NodeKey,
        entry: &NodeEntry,
        directive: &Directive,
    ) -> Result<(), CodecError> {
        let graph = scope.graph.clone();
        match directive {
            Directive::NodeTree(_) => {}
            Directive::Builtin(attribute, value) => match builtin(*attribute, value) {
                Some(attributes) => {
                    for attribute in attributes {
                        self.host.set_node_attribute(&graph, node, attribute)?;
                    }
                    self.applied(&graph, &entry.name, directive.key());
                }
                None => self.warn(DecodeWarning::InvalidValue {
                    graph,
                    node: entry.name.clone(),
                    key: directive.key().to_string(),
                    reason: format!("cannot read {value:?}"),
                }),
            },
            Directive::Mapping(points) => self.apply_mapping(&graph, node, entry, points)?,
            Directive::Property(name, value) => self.apply_property(&graph, node, entry, name, value)?,
            Directive::Inputs(inputs) => {
                let sockets = self.host.sockets(&graph, node, SocketSide::Input)?;
                for input in inputs {
                    self.apply_input(scope, node, entry, &sockets, input)?;
                }
            }
        }
        Ok(())
    }

    fn apply_mapping(
        &mut self,
        graph: &str,
        node: A::NodeKey,
        entry: &NodeEntry,
        points: &[CurvePoint],
    ) -> Result<(), CodecError> {
        let existing = match self.host.curve_points(graph, node) {
            Ok(existing) => existing.len(),
            Err(HostError::NoCurveMapping(_)) => {
                self.warn(DecodeWarning::UnknownProperty {
                    graph: graph.to_string(),
                    node: entry.name.clone(),
                    property: MAPPING_PROPERTY.to_string(),
                });
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        for point in points.iter().skip(existing) {
            self.host.add_curve_point(graph, node, point.location)?;
        }
        for (index, point) in points.iter().enumerate() {
            self.host.set_curve_point(graph, node, index, point.clone())?;
        }
        self.applied(graph, &entry.name, MAPPING_PROPERTY);
        Ok(())
    }

    fn apply_property(
        &mut self,
        graph: &str,
        node: A::NodeKey,
        entry: &NodeEntry,
        name: &str,
        value: &Yaml,
    ) -> Result<(), CodecError> {
        let properties = self.host.node_properties(graph, node)?;
        let Some(kind) = properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, current)| current.kind())
        else {
            self.warn(DecodeWarning::UnknownProperty {
                graph: graph.to_string(),
                node: entry.name.clone(),
                property: name.to_string(),
            });
            return Ok(());
        };

        let result = coerce(value, kind).and_then(|value| {
            match self.host.set_property(graph, node, name, value) {
                Ok(()) => Ok(()),
                Err(HostError::TypeMismatch { expected, found }) => {
                    Err(format!("expected {expected:?}, found {found:?}"))
                }
                Err(e) => Err(e.to_string()),
            }
        });
        match result {
            Ok(()) => self.applied(graph, &entry.name, name),
            Err(reason) => self.warn(DecodeWarning::InvalidValue {
                graph: graph.to_string(),
                node: entry.name.clone(),
                key: name.to_string(),
                reason,
            }),
        }
        Ok(())
    }

    fn apply_input(
        &mut self,
        scope: &mut GraphScope<A::NodeKey>,
        node: A::NodeKey,
        entry: &NodeEntry,
        sockets: &[SocketInfo],
        input: &InputEntry,
    ) -> Result<(), CodecError> {
        let graph = scope.graph.clone();
        let index = match &input.key {
            SocketKey::Index(index) => Some(*index).filter(|i| *i < sockets.len()),
            SocketKey::Name(name) => sockets.iter().position(|s| s.name == *name),
        };
        let Some(index) = index else {
            self.warn(DecodeWarning::UnknownSocket {
                graph,
                node: entry.name.clone(),
                socket: input.key.to_string(),
            });
            return Ok(());
        };
        let key = format!("inputs.{}", input.key);

        match &input.value {
            InputValue::Links(refs) => {
                let refs = regroup(refs, |name| scope.nodes.contains_key(name));
                let mut linked = 0;
                for link in &refs {
                    let failure = match scope.nodes.get(&link.node) {
                        None => Some(LinkFailure::UnknownNode),
                        Some(&source) => {
                            let outputs = self.host.sockets(&graph, source, SocketSide::Output)?;
                            if link.index() < outputs.len() {
                                self.host.create_link(&graph, source, link.index(), node, index)?;
                                None
                            } else {
                                Some(LinkFailure::OutputOutOfRange(outputs.len()))
                            }
                        }
                    };
                    match failure {
                        None => linked += 1,
                        Some(reason) => self.warn(DecodeWarning::LinkResolutionFailure {
                            graph: graph.clone(),
                            node: entry.name.clone(),
                            socket: input.key.to_string(),
                            reference: link.to_string(),
                            reason,
                        }),
                    }
                }
                scope.links += linked;
                if linked > 0 {
                    self.applied(&graph, &entry.name, &key);
                }
            }
            InputValue::Literal(value) => {
                let socket = &sockets[index];
                let invalid = |reason: String| DecodeWarning::InvalidValue {
                    graph: graph.clone(),
                    node: entry.name.clone(),
                    key: key.clone(),
                    reason,
                };
                if socket.default.is_none() || !socket.kind.is_representable() {
                    self.warn(invalid("socket takes no literal value".to_string()));
                    return Ok(());
                }
                let value = match coerce(value, socket.kind) {
                    Ok(value) => value,
                    Err(reason) => {
                        self.warn(invalid(reason));
                        return Ok(());
                    }
                };
                if let Some((kind, name)) = id_reference(&value) {
                    if !self.host.has_id(kind, name) {
                        self.warn(DecodeWarning::UnresolvedReference {
                            graph: graph.clone(),
                            node: entry.name.clone(),
                            socket: input.key.to_string(),
                            name: name.to_string(),
                        });
                        return Ok(());
                    }
                }
                match self.host.set_socket_default(&graph, node, index, value) {
                    Ok(()) => self.applied(&graph, &entry.name, &key),
                    Err(HostError::TypeMismatch { expected, found }) => {
                        self.warn(invalid(format!("expected {expected:?}, found {found:?}")))
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(())
    }

    fn applied(&mut self, graph: &str, node: &str, key: &str) {
        self.report.applied.push(AppliedDirective {
            graph: graph.to_string(),
            node: node.to_string(),
            key: key.to_string(),
        });
    }

    fn warn(&mut self, warning: DecodeWarning) {
        tracing::warn!("{warning}");
        self.report.warnings.push(warning);
    }
}

/// Host attribute assignments for a built-in directive
fn builtin(attribute: BuiltinAttribute, value: &Yaml) -> Option<Vec<NodeAttribute>> {
    let attributes = match attribute {
        BuiltinAttribute::Label => vec![NodeAttribute::Label(scalar_text(value)?)],
        BuiltinAttribute::Location => match numbers(value)?.as_slice() {
            [x, y] => vec![NodeAttribute::Location([*x, *y])],
            _ => return None,
        },
        BuiltinAttribute::Width => vec![NodeAttribute::Width(number(value)?)],
        BuiltinAttribute::Hide => vec![NodeAttribute::Hide(value.as_bool()?)],
        BuiltinAttribute::Color => match numbers(value)?.as_slice() {
            [r, g, b, ..] => vec![
                NodeAttribute::Color([*r, *g, *b]),
                NodeAttribute::UseCustomColor(true),
            ],
            _ => return None,
        },
    };
    Some(attributes)
}

/// Data block named by an object/material literal
fn id_reference(value: &Value) -> Option<(IdKind, &str)> {
    match value {
        Value::Object(Some(name)) => Some((IdKind::Object, name)),
        Value::Material(Some(name)) => Some((IdKind::Material, name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::fixtures;
    use crate::options::EncodeOptions;
    use nodeclip_graph::{NodeId, Scene};

    fn node_id(scene: &Scene, graph: &str, name: &str) -> NodeId {
        scene.group(graph).unwrap().node_by_name(name).unwrap().id
    }

    fn scene_with_object(object: &str) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(object);
        scene
    }

    #[test]
    fn test_two_node_example() {
        let text = encode(&fixtures::cube_scene(), "Geometry Nodes", &EncodeOptions::default()).unwrap();
        let mut scene = scene_with_object("Cube");
        let report = decode(&mut scene, &text, Some("Cube")).unwrap();

        assert!(report.warnings.is_empty());
        assert_eq!(
            report.graphs,
            vec![GraphSummary { name: "Geometry Nodes".into(), nodes: 2, links: 1 }]
        );
        let cube = node_id(&scene, "Geometry Nodes", "Cube");
        let input = node_id(&scene, "Geometry Nodes", "Group Input");
        let sources = scene.links_into("Geometry Nodes", cube, 0).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].node, input);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let original = fixtures::sample_scene();
        let text = encode(&original, "Main", &EncodeOptions::default()).unwrap();

        let mut scene = scene_with_object("Plane");
        let report = decode(&mut scene, &text, Some("Plane")).unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(
            report.graphs,
            vec![
                GraphSummary { name: "Leaf".into(), nodes: 3, links: 2 },
                GraphSummary { name: "Main".into(), nodes: 8, links: 8 },
            ]
        );
        assert_eq!(encode(&scene, "Main", &EncodeOptions::default()).unwrap(), text);

        // Pasting again over the same graphs changes nothing
        decode(&mut scene, &text, Some("Plane")).unwrap();
        assert_eq!(encode(&scene, "Main", &EncodeOptions::default()).unwrap(), text);
        assert_eq!(scene.node_groups.len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_nodes() {
        let text = encode(&fixtures::sample_scene(), "Main", &EncodeOptions::default()).unwrap();
        let mut scene = Scene::new();
        decode(&mut scene, &text, None).unwrap();

        let main = scene.group("Main").unwrap();
        let curve = main.node_by_name("Curve").unwrap();
        assert_eq!(curve.type_tag, "ShaderNodeFloatCurve");
        assert_eq!(curve.curve.as_ref().unwrap().len(), 3);
        assert!(!curve.select);

        let instance = main.node_by_name("Leaf Group").unwrap();
        assert_eq!(instance.node_tree.as_deref(), Some("Leaf"));
        assert_eq!(instance.inputs.len(), 1);

        let range = main.inputs[1].range.unwrap();
        assert_eq!((range.default, range.min, range.max), (0.25, 0.0, 1.0));

        let join = node_id(&scene, "Main", "Join Geometry");
        let sources = scene.links_into("Main", join, 0).unwrap();
        let names: Vec<String> = sources
            .iter()
            .map(|s| scene.node_info("Main", s.node).unwrap().name)
            .collect();
        assert_eq!(names, ["Leaf Group", "Cube"]);
    }

    #[test]
    fn test_forward_reference() {
        let text = "\
G:
  Transform Geometry:
    inputs:
      Geometry: ~Cube/0
  Cube:
    location: [0, 0]";
        let mut scene = Scene::new();
        let report = decode(&mut scene, text, None).unwrap();
        assert!(report.warnings.is_empty());

        let transform = node_id(&scene, "G", "Transform Geometry");
        let cube = node_id(&scene, "G", "Cube");
        let sources = scene.links_into("G", transform, 0).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].node, cube);
        assert_eq!(sources[0].socket, "Mesh");
    }

    #[test]
    fn test_separator_in_source_name() {
        let mut scene = Scene::new();
        scene.create_graph("G").unwrap();
        let cube = scene.spawn_node("G", "GeometryNodeMeshCube", "A;B", [0.0, 0.0]).unwrap();
        let transform = scene
            .spawn_node("G", "GeometryNodeTransform", "Transform Geometry", [200.0, 0.0])
            .unwrap();
        scene.link("G", cube, 0, transform, 0).unwrap();
        let text = encode(&scene, "G", &EncodeOptions::default()).unwrap();
        assert!(text.contains("Geometry: ~A;B"));

        let mut copy = Scene::new();
        let report = decode(&mut copy, &text, None).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(copy.group("G").unwrap().link_count(), 1);
        assert_eq!(encode(&copy, "G", &EncodeOptions::default()).unwrap(), text);
    }

    #[test]
    fn test_unresolved_links_are_skipped() {
        let text = "\
G:
  Cube:
    location: [0, 0]
  Transform Geometry:
    inputs:
      Geometry: ~Nowhere;Cube/5;Cube
      Translation: [1, 2, 3]";
        let mut scene = Scene::new();
        let report = decode(&mut scene, text, None).unwrap();

        let reasons: Vec<LinkFailure> = report
            .warnings
            .iter()
            .filter_map(|w| match w {
                DecodeWarning::LinkResolutionFailure { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect();
        assert_eq!(reasons, [LinkFailure::UnknownNode, LinkFailure::OutputOutOfRange(2)]);
        assert_eq!(scene.group("G").unwrap().link_count(), 1);

        let transform = scene.group("G").unwrap().node_by_name("Transform Geometry").unwrap();
        assert_eq!(transform.inputs[1].default, Some(Value::Vector(vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn test_unknown_type_leaves_host_untouched() {
        let mut scene = fixtures::cube_scene();
        let text = "\
Geometry Nodes:
  Cube:
    location: [0, 0]
  Mystery Box:
    location: [100, 0]";
        let err = decode(&mut scene, text, Some("Cube")).unwrap_err();
        assert!(matches!(err, CodecError::UnknownTypeName(_)));

        let group = scene.group("Geometry Nodes").unwrap();
        assert_eq!(group.node_count(), 2);
        assert_eq!(group.link_count(), 1);
    }

    #[test]
    fn test_missing_target_object() {
        let mut scene = Scene::new();
        let err = decode(&mut scene, "G:\n  Cube:\n    location: [0, 0]", Some("Nope")).unwrap_err();
        assert_eq!(err, CodecError::Host(HostError::ObjectNotFound("Nope".into())));
        assert!(scene.node_groups.is_empty());
    }

    #[test]
    fn test_decode_overwrites_graph() {
        let mut scene = fixtures::cube_scene();
        let text = "Geometry Nodes:\n  Transform Geometry:\n    location: [0, 0]";
        decode(&mut scene, text, None).unwrap();

        let group = scene.group("Geometry Nodes").unwrap();
        assert_eq!(group.node_count(), 1);
        assert_eq!(group.link_count(), 0);
        assert!(group.inputs.is_empty());
    }

    #[test]
    fn test_subgraph_decoded_before_use() {
        let text = "\
Inner:
  Outputs:
    Output_0: Value/NodeSocketFloat
Outer:
  Group:
    bl_idname: GeometryNodeGroup
    node_tree: Inner
  Math:
    inputs:
      0: ~Group";
        let mut scene = Scene::new();
        let report = decode(&mut scene, text, None).unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(scene.group("Outer").unwrap().link_count(), 1);
        let group = scene.group("Outer").unwrap().node_by_name("Group").unwrap();
        assert_eq!(group.node_tree.as_deref(), Some("Inner"));
    }

    #[test]
    fn test_unresolved_subgraph_warns() {
        let text = "G:\n  Group:\n    bl_idname: GeometryNodeGroup\n    node_tree: Missing";
        let mut scene = Scene::new();
        let report = decode(&mut scene, text, None).unwrap();
        assert_eq!(
            report.warnings,
            vec![DecodeWarning::UnresolvedSubgraph {
                graph: "G".into(),
                node: "Group".into(),
                subgraph: "Missing".into(),
            }]
        );
        let group = scene.group("G").unwrap().node_by_name("Group").unwrap();
        assert_eq!(group.node_tree, None);
    }

    #[test]
    fn test_invalid_directives_warn() {
        let text = "\
G:
  Math:
    location: [1]
    use_clamp: maybe
    frobnicate: 1
    operation: MULTIPLY
    inputs:
      Nope: 1
      0: [1, 2]
      1: 2.5
  Object Info:
    inputs:
      Object: Missing
  Object Info.001:
    inputs:
      Object: Suzanne";
        let mut scene = scene_with_object("Suzanne");
        let report = decode(&mut scene, text, None).unwrap();

        assert_eq!(report.warnings.len(), 6, "{:?}", report.warnings);
        assert!(matches!(&report.warnings[0], DecodeWarning::InvalidValue { key, .. } if key == "location"));
        assert!(matches!(&report.warnings[1], DecodeWarning::InvalidValue { key, .. } if key == "use_clamp"));
        assert!(matches!(&report.warnings[2], DecodeWarning::UnknownProperty { property, .. } if property == "frobnicate"));
        assert!(matches!(&report.warnings[3], DecodeWarning::UnknownSocket { socket, .. } if socket == "Nope"));
        assert!(matches!(&report.warnings[4], DecodeWarning::InvalidValue { key, .. } if key == "inputs.0"));
        assert!(matches!(&report.warnings[5], DecodeWarning::UnresolvedReference { name, .. } if name == "Missing"));

        let group = scene.group("G").unwrap();
        let math = group.node_by_name("Math").unwrap();
        assert_eq!(math.properties["operation"], Value::String("MULTIPLY".into()));
        assert_eq!(math.inputs[1].default, Some(Value::Float(2.5)));
        let info = group.node_by_name("Object Info.001").unwrap();
        assert_eq!(info.inputs[0].default, Some(Value::Object(Some("Suzanne".into()))));
        assert!(report
            .applied
            .iter()
            .any(|a| a.node == "Object Info.001" && a.key == "inputs.Object"));
    }

    #[test]
    fn test_material_reference() {
        let mut source = Scene::new();
        source.add_material("Steel");
        source.create_graph("G").unwrap();
        let node = source
            .spawn_node("G", "GeometryNodeSetMaterial", "Set Material", [0.0, 0.0])
            .unwrap();
        source.group_mut("G").unwrap().node_mut(node).unwrap().inputs[2].default =
            Some(Value::Material(Some("Steel".into())));
        let text = encode(&source, "G", &EncodeOptions::default()).unwrap();
        assert!(text.contains("      Material: Steel"));

        let mut scene = Scene::new();
        scene.add_material("Steel");
        let report = decode(&mut scene, &text, None).unwrap();
        assert!(report.warnings.is_empty());
        let set = scene.group("G").unwrap().node_by_name("Set Material").unwrap();
        assert_eq!(set.inputs[2].default, Some(Value::Material(Some("Steel".into()))));

        // Without the material the input keeps its default
        let mut bare = Scene::new();
        let report = decode(&mut bare, &text, None).unwrap();
        assert!(matches!(
            report.warnings.as_slice(),
            [DecodeWarning::UnresolvedReference { name, socket, .. }] if name == "Steel" && socket == "Material"
        ));
        let set = bare.group("G").unwrap().node_by_name("Set Material").unwrap();
        assert_eq!(set.inputs[2].default, Some(Value::Material(None)));
    }

    #[test]
    fn test_builtin_attributes() {
        let text = "\
G:
  Base:
    bl_idname: GeometryNodeMeshCube
    label: Base Shape
    location: [10, -20]
    width: 200
    hide: True
    color: [0.1, 0.2, 0.3]";
        let mut scene = Scene::new();
        decode(&mut scene, text, None).unwrap();

        let node = scene.group("G").unwrap().node_by_name("Base").unwrap();
        assert_eq!(node.type_tag, "GeometryNodeMeshCube");
        assert_eq!(node.label, "Base Shape");
        assert_eq!(node.location, [10.0, -20.0]);
        assert_eq!(node.width, 200.0);
        assert!(node.hide);
        assert!(node.use_custom_color);
        assert_eq!(node.color, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_attach_adds_modifier() {
        let mut scene = scene_with_object("Empty");
        let report = decode(&mut scene, "G:\n  Cube:\n    location: [0, 0]", Some("Empty")).unwrap();
        assert_eq!(report.attached.as_deref(), Some("G"));
        assert_eq!(scene.modifier_graph("Empty").unwrap(), Some(Some("G".to_string())));
    }

    #[test]
    fn test_name_inference() {
        let text = "G:\n  Cube.001:\n    location: [0, 0]\n  Vector Math.002:\n    operation: SCALE";
        let mut scene = Scene::new();
        decode(&mut scene, text, None).unwrap();
        let group = scene.group("G").unwrap();
        assert_eq!(group.node_by_name("Cube.001").unwrap().type_tag, "GeometryNodeMeshCube");
        assert_eq!(group.node_by_name("Vector Math.002").unwrap().type_tag, "ShaderNodeVectorMath");
    }
}
