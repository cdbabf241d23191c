// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parsed form of a text document.
//!
//! [`Document::parse`] checks the whole structure and resolves every node's
//! type tag up front, so a document that cannot be decoded is rejected
//! before the host is touched. Literal values stay as YAML until the decoder
//! knows the kind of the slot they go into.

use crate::error::CodecError;
use crate::link_ref::{parse_links, LinkRef};
use crate::literal::scalar_text;
use nodeclip_graph::schema::MAPPING_PROPERTY;
use nodeclip_graph::{resolve_type_tag, CurvePoint, InterfaceSocket};
use serde_yaml::{Mapping, Value as Yaml};
use std::fmt;

/// Graph key holding interface inputs
pub const INPUTS_KEY: &str = "Inputs";
/// Graph key holding interface outputs
pub const OUTPUTS_KEY: &str = "Outputs";
/// Node key holding the explicit type tag
pub const TYPE_KEY: &str = "bl_idname";
/// Node key holding the subgraph reference
pub const NODE_TREE_KEY: &str = "node_tree";
/// Node key holding socket values and links
pub const SOCKETS_KEY: &str = "inputs";

/// A whole document: graph blocks in dependency order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Graph blocks, root last
    pub graphs: Vec<GraphBlock>,
}

/// One graph block
#[derive(Debug, Clone, PartialEq)]
pub struct GraphBlock {
    /// Graph name
    pub name: String,
    /// Interface inputs
    pub inputs: Vec<InterfaceSocket>,
    /// Interface outputs
    pub outputs: Vec<InterfaceSocket>,
    /// Node entries in document order
    pub nodes: Vec<NodeEntry>,
}

/// One node entry
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry {
    /// Node name (the entry key)
    pub name: String,
    /// Resolved type tag
    pub type_tag: String,
    /// Attribute directives in document order
    pub directives: Vec<Directive>,
}

impl NodeEntry {
    /// Subgraph named by a `node_tree` directive
    pub fn node_tree(&self) -> Option<&str> {
        self.directives.iter().find_map(|d| match d {
            Directive::NodeTree(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Built-in node attributes with a fixed key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAttribute {
    /// `label`
    Label,
    /// `location`
    Location,
    /// `width`
    Width,
    /// `hide`
    Hide,
    /// `color`
    Color,
}

impl BuiltinAttribute {
    /// Match a node key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "label" => Some(Self::Label),
            "location" => Some(Self::Location),
            "width" => Some(Self::Width),
            "hide" => Some(Self::Hide),
            "color" => Some(Self::Color),
            _ => None,
        }
    }

    /// Key as written
    pub fn key(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Location => "location",
            Self::Width => "width",
            Self::Hide => "hide",
            Self::Color => "color",
        }
    }
}

/// A single attribute assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Built-in attribute with its raw value
    Builtin(BuiltinAttribute, Yaml),
    /// Bind a subgraph instance
    NodeTree(String),
    /// Curve mapping points
    Mapping(Vec<CurvePoint>),
    /// Socket values and links
    Inputs(Vec<InputEntry>),
    /// Type-specific property with its raw value
    Property(String, Yaml),
}

impl Directive {
    /// Key the directive was written under
    pub fn key(&self) -> &str {
        match self {
            Self::Builtin(attribute, _) => attribute.key(),
            Self::NodeTree(_) => NODE_TREE_KEY,
            Self::Mapping(_) => MAPPING_PROPERTY,
            Self::Inputs(_) => SOCKETS_KEY,
            Self::Property(name, _) => name,
        }
    }
}

/// How an input is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketKey {
    /// Position among the node's inputs
    Index(usize),
    /// Display name
    Name(String),
}

impl fmt::Display for SocketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// What goes into an input
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Links from source outputs
    Links(Vec<LinkRef>),
    /// Default value
    Literal(Yaml),
}

/// One line of an `inputs:` section
#[derive(Debug, Clone, PartialEq)]
pub struct InputEntry {
    /// Target input
    pub key: SocketKey,
    /// Links or default
    pub value: InputValue,
}

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::MalformedDocument(message.into())
}

/// Entries of an optional mapping; `null` reads as empty
fn entries<'a>(value: &'a Yaml, context: &str) -> Result<Vec<(&'a Yaml, &'a Yaml)>, CodecError> {
    match value {
        Yaml::Null => Ok(Vec::new()),
        Yaml::Mapping(mapping) => Ok(mapping.iter().collect()),
        _ => Err(malformed(format!("{context} must be a mapping"))),
    }
}

fn key_text(key: &Yaml, context: &str) -> Result<String, CodecError> {
    scalar_text(key).ok_or_else(|| malformed(format!("{context} has a non-scalar key")))
}

impl Document {
    /// Parse and validate a document
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let root: Yaml =
            serde_yaml::from_str(text).map_err(|e| malformed(format!("invalid YAML: {e}")))?;
        let mapping: &Mapping = match &root {
            Yaml::Mapping(mapping) if !mapping.is_empty() => mapping,
            Yaml::Null => return Err(malformed("document is empty")),
            Yaml::Mapping(_) => return Err(malformed("document holds no graphs")),
            _ => return Err(malformed("document must be a mapping of graphs")),
        };

        let mut graphs = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key_text(key, "document")?;
            graphs.push(GraphBlock::parse(name, value)?);
        }
        Ok(Self { graphs })
    }

    /// The root graph block
    pub fn root(&self) -> Option<&GraphBlock> {
        self.graphs.last()
    }
}

impl GraphBlock {
    fn parse(name: String, value: &Yaml) -> Result<Self, CodecError> {
        let mut block = Self {
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            nodes: Vec::new(),
        };
        for (key, value) in entries(value, &format!("graph {}", block.name))? {
            let key = key_text(key, &format!("graph {}", block.name))?;
            match key.as_str() {
                INPUTS_KEY => block.inputs = parse_interface(&block.name, value)?,
                OUTPUTS_KEY => block.outputs = parse_interface(&block.name, value)?,
                _ => {
                    let node = NodeEntry::parse(&block.name, key, value)?;
                    block.nodes.push(node);
                }
            }
        }
        Ok(block)
    }
}

fn parse_interface(graph: &str, value: &Yaml) -> Result<Vec<InterfaceSocket>, CodecError> {
    let context = format!("interface of {graph}");
    entries(value, &context)?
        .into_iter()
        .map(|(key, declaration)| {
            let identifier = key_text(key, &context)?;
            let declaration = declaration
                .as_str()
                .ok_or_else(|| malformed(format!("{context}: {identifier} must be Name/SocketType")))?;
            parse_interface_declaration(&identifier, declaration)
                .ok_or_else(|| malformed(format!("{context}: bad declaration {declaration:?}")))
        })
        .collect()
}

/// Parse `Name/SocketType[, default, min, max]`
pub fn parse_interface_declaration(identifier: &str, declaration: &str) -> Option<InterfaceSocket> {
    // Socket types hold neither '/' nor ',', names may
    let slash = declaration.rfind('/')?;
    let name = &declaration[..slash];
    let mut parts = declaration[slash + 1..].split(',').map(str::trim);
    let socket_type = parts.next().filter(|t| !t.is_empty())?;
    let bounds: Vec<f64> = parts.map(|p| p.parse().ok()).collect::<Option<_>>()?;

    let socket = InterfaceSocket::new(identifier, name, socket_type);
    match bounds.as_slice() {
        [] => Some(socket),
        [default, min, max] => Some(socket.with_range(*default, *min, *max)),
        _ => None,
    }
}

impl NodeEntry {
    fn parse(graph: &str, name: String, value: &Yaml) -> Result<Self, CodecError> {
        let context = format!("{graph}/{name}");
        let mut explicit_tag = None;
        let mut directives = Vec::new();

        for (key, value) in entries(value, &context)? {
            let key = key_text(key, &context)?;
            let directive = match key.as_str() {
                TYPE_KEY => {
                    let tag = scalar_text(value)
                        .ok_or_else(|| malformed(format!("{context}: {TYPE_KEY} must be a string")))?;
                    explicit_tag = Some(tag);
                    continue;
                }
                NODE_TREE_KEY => Directive::NodeTree(
                    scalar_text(value)
                        .ok_or_else(|| malformed(format!("{context}: {NODE_TREE_KEY} must be a name")))?,
                ),
                MAPPING_PROPERTY => Directive::Mapping(parse_mapping(&context, value)?),
                SOCKETS_KEY => Directive::Inputs(parse_inputs(&context, value)?),
                _ => match BuiltinAttribute::from_key(&key) {
                    Some(attribute) => Directive::Builtin(attribute, value.clone()),
                    None => Directive::Property(key, value.clone()),
                },
            };
            directives.push(directive);
        }

        let type_tag = match explicit_tag {
            Some(tag) => tag,
            None => resolve_type_tag(&name)?.to_string(),
        };
        Ok(Self {
            name,
            type_tag,
            directives,
        })
    }
}

fn parse_mapping(context: &str, value: &Yaml) -> Result<Vec<CurvePoint>, CodecError> {
    let points = value
        .as_sequence()
        .ok_or_else(|| malformed(format!("{context}: {MAPPING_PROPERTY} must be a list")))?;
    points
        .iter()
        .map(|point| {
            point
                .as_str()
                .and_then(parse_curve_point)
                .ok_or_else(|| malformed(format!("{context}: bad curve point {point:?}")))
        })
        .collect()
}

/// Parse `HANDLE, x, y`
pub fn parse_curve_point(text: &str) -> Option<CurvePoint> {
    let mut parts = text.split(',').map(str::trim);
    let handle_type = parts.next().filter(|h| !h.is_empty())?.to_string();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(CurvePoint {
        handle_type,
        location: [x, y],
    })
}

fn parse_inputs(context: &str, value: &Yaml) -> Result<Vec<InputEntry>, CodecError> {
    entries(value, &format!("{context} {SOCKETS_KEY}"))?
        .into_iter()
        .map(|(key, value)| {
            let key = match key {
                Yaml::Number(n) => n
                    .as_u64()
                    .and_then(|i| usize::try_from(i).ok())
                    .map(SocketKey::Index)
                    .ok_or_else(|| malformed(format!("{context}: bad input index {n}")))?,
                other => SocketKey::Name(key_text(other, context)?),
            };
            let value = match value.as_str().and_then(parse_links) {
                Some(links) if !links.is_empty() => InputValue::Links(links),
                Some(_) => return Err(malformed(format!("{context}: empty link list for {key}"))),
                None => InputValue::Literal(value.clone()),
            };
            Ok(InputEntry { key, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Leaf:
  Inputs:
    Input_0: Geometry/NodeSocketGeometry
  Outputs:
    Output_1: Geometry/NodeSocketGeometry
  Group Input:
    location: [-200, 0]
Main:
  Inputs:
    Input_1: Amount/NodeSocketFloatFactor, 0.25, 0.0, 1.0
  Curve:
    bl_idname: ShaderNodeFloatCurve
    location: [0, 0]
    mapping:
    - AUTO, 0.0, 0.0
    - VECTOR, 1.0, 1.0
    inputs:
      Factor: ~Group Input
      1: 0.5
  Leaf Group:
    bl_idname: GeometryNodeGroup
    node_tree: Leaf
  Math:
    operation: MULTIPLY
    inputs:
      0: ~Curve;Leaf Group/1";

    #[test]
    fn test_parse_structure() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.graphs.len(), 2);
        assert_eq!(doc.root().unwrap().name, "Main");

        let leaf = &doc.graphs[0];
        assert_eq!(leaf.inputs[0].identifier, "Input_0");
        assert_eq!(leaf.outputs[0].socket_type, "NodeSocketGeometry");
        assert_eq!(leaf.nodes[0].type_tag, "NodeGroupInput");

        let main = &doc.graphs[1];
        let range = main.inputs[0].range.unwrap();
        assert_eq!((range.default, range.min, range.max), (0.25, 0.0, 1.0));
        let names: Vec<&str> = main.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Curve", "Leaf Group", "Math"]);
        assert_eq!(main.nodes[1].node_tree(), Some("Leaf"));
        assert_eq!(main.nodes[2].type_tag, "ShaderNodeMath");
    }

    #[test]
    fn test_parse_directives() {
        let doc = Document::parse(SAMPLE).unwrap();
        let curve = &doc.graphs[1].nodes[0];
        assert_eq!(curve.type_tag, "ShaderNodeFloatCurve");
        let keys: Vec<&str> = curve.directives.iter().map(Directive::key).collect();
        assert_eq!(keys, ["location", "mapping", "inputs"]);

        let Directive::Mapping(points) = &curve.directives[1] else {
            panic!("expected mapping");
        };
        assert_eq!(points[1].handle_type, "VECTOR");
        assert_eq!(points[1].location, [1.0, 1.0]);

        let Directive::Inputs(inputs) = &curve.directives[2] else {
            panic!("expected inputs");
        };
        assert_eq!(inputs[0].key, SocketKey::Name("Factor".into()));
        assert_eq!(
            inputs[0].value,
            InputValue::Links(vec![LinkRef { node: "Group Input".into(), output: None }])
        );
        assert_eq!(inputs[1].key, SocketKey::Index(1));
        assert_eq!(inputs[1].value, InputValue::Literal(Yaml::from(0.5)));
    }

    #[test]
    fn test_multi_link_input() {
        let doc = Document::parse(SAMPLE).unwrap();
        let math = &doc.graphs[1].nodes[2];
        assert!(matches!(&math.directives[0], Directive::Property(name, _) if name == "operation"));
        let Directive::Inputs(inputs) = &math.directives[1] else {
            panic!("expected inputs");
        };
        let InputValue::Links(links) = &inputs[0].value else {
            panic!("expected links");
        };
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].output, Some(1));
    }

    #[test]
    fn test_unknown_type_name() {
        let err = Document::parse("G:\n  Thingamajig:\n    location: [0, 0]").unwrap_err();
        assert!(matches!(err, CodecError::UnknownTypeName(_)));
        // Explicit tags bypass inference
        assert!(Document::parse("G:\n  Thingamajig:\n    bl_idname: ShaderNodeMath").is_ok());
    }

    #[test]
    fn test_malformed_documents() {
        for text in [
            "",
            "- a\n- b",
            "G: [1, 2]",
            "G:\n  Cube: 3",
            "G:\n  Inputs:\n    Input_0: NoSlash",
            "G:\n  Inputs:\n    Input_0: A/NodeSocketFloatFactor, 1, 2",
            "G:\n  Float Curve:\n    mapping:\n    - AUTO, x, 0",
            "G:\n  Cube:\n    inputs: [1]",
            "G:\n  Cube:\n    inputs:\n      Size: '~'",
            "G: {a: [",
        ] {
            assert!(
                matches!(Document::parse(text), Err(CodecError::MalformedDocument(_))),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_interface_declaration() {
        let socket = parse_interface_declaration("Input_0", "In/Out/NodeSocketFloat").unwrap();
        assert_eq!(socket.name, "In/Out");
        assert_eq!(socket.socket_type, "NodeSocketFloat");
        assert_eq!(socket.range, None);
        assert!(parse_interface_declaration("Input_0", "Name/").is_none());
    }

    #[test]
    fn test_curve_point() {
        let point = parse_curve_point("AUTO_CLAMPED, 0.25, -1").unwrap();
        assert_eq!(point.handle_type, "AUTO_CLAMPED");
        assert_eq!(point.location, [0.25, -1.0]);
        assert!(parse_curve_point("AUTO, 1").is_none());
        assert!(parse_curve_point("AUTO, 1, 2, 3").is_none());
    }
}
