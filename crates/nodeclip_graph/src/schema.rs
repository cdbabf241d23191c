// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static node schemas.
//!
//! Per type tag: the default node name, socket layout and the type-specific
//! property set with defaults. The in-memory host builds nodes from these;
//! a real host would answer the same questions by introspection.

use crate::registry::{GROUP_INPUT, GROUP_INSTANCE, GROUP_OUTPUT};
use crate::value::{CurvePoint, Value, ValueKind};
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Name of the curve-mapping property
pub const MAPPING_PROPERTY: &str = "mapping";

/// Template for a node socket
#[derive(Debug, Clone, PartialEq)]
pub struct SocketTemplate {
    /// Stable identifier, unique per side
    pub identifier: String,
    /// Display name
    pub name: String,
    /// Value kind
    pub kind: ValueKind,
    /// Default value (inputs only)
    pub default: Option<Value>,
}

impl SocketTemplate {
    /// Create an input socket template, identified by its name
    pub fn input(name: impl Into<String>, kind: ValueKind) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
            kind,
            default: None,
        }
    }

    /// Create an output socket template, identified by its name
    pub fn output(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::input(name, kind)
    }

    /// Set the default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Override the identifier (for repeated display names)
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

/// Where a node's sockets come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketLayout {
    /// Fixed by the schema
    Static,
    /// Outputs mirror the owning graph's interface inputs
    GraphInputs,
    /// Inputs mirror the owning graph's interface outputs
    GraphOutputs,
    /// Mirrors the interface of the referenced subgraph
    Subgraph,
}

/// Schema of one node type
#[derive(Debug, Clone)]
pub struct NodeSchema {
    /// Type tag
    pub id: String,
    /// Name given to new nodes of this type
    pub default_name: String,
    /// Socket layout source
    pub layout: SocketLayout,
    /// Input sockets (static layout)
    pub inputs: Vec<SocketTemplate>,
    /// Output sockets (static layout)
    pub outputs: Vec<SocketTemplate>,
    /// Type-specific properties in declaration order
    pub properties: Vec<(String, Value)>,
    /// Initial curve mapping points, for types with a `mapping` property
    pub curve: Option<Vec<CurvePoint>>,
}

impl NodeSchema {
    /// Create a schema with a static layout and no properties
    pub fn new(id: impl Into<String>, default_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_name: default_name.into(),
            layout: SocketLayout::Static,
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: Vec::new(),
            curve: None,
        }
    }

    fn layout(mut self, layout: SocketLayout) -> Self {
        self.layout = layout;
        self
    }

    fn inputs(mut self, inputs: Vec<SocketTemplate>) -> Self {
        self.inputs = inputs;
        self
    }

    fn outputs(mut self, outputs: Vec<SocketTemplate>) -> Self {
        self.outputs = outputs;
        self
    }

    fn property(mut self, name: &str, value: Value) -> Self {
        self.properties.push((name.to_string(), value));
        self
    }

    fn curve_mapping(mut self) -> Self {
        self.properties
            .push((MAPPING_PROPERTY.to_string(), Value::Unsupported));
        self.curve = Some(vec![CurvePoint::auto(0.0, 0.0), CurvePoint::auto(1.0, 1.0)]);
        self
    }

}

/// Registry of node schemas by type tag
pub struct NodeSchemaRegistry {
    schemas: IndexMap<String, NodeSchema>,
}

impl NodeSchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Register a schema
    pub fn register(&mut self, schema: NodeSchema) {
        self.schemas.insert(schema.id.clone(), schema);
    }

    /// Get a schema by type tag
    pub fn get(&self, id: &str) -> Option<&NodeSchema> {
        self.schemas.get(id)
    }

    /// Iterate over all schemas
    pub fn schemas(&self) -> impl Iterator<Item = &NodeSchema> {
        self.schemas.values()
    }

    /// Shared registry of the built-in geometry node schemas
    pub fn builtin() -> &'static NodeSchemaRegistry {
        static BUILTIN: OnceLock<NodeSchemaRegistry> = OnceLock::new();
        BUILTIN.get_or_init(create_geometry_schemas)
    }

    /// Socket layout of a built-in type; unknown types are static
    pub fn socket_layout(type_tag: &str) -> SocketLayout {
        Self::builtin()
            .get(type_tag)
            .map_or(SocketLayout::Static, |schema| schema.layout)
    }
}

impl Default for NodeSchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn float(v: f64) -> Value {
    Value::Float(v)
}

fn int(v: i64) -> Value {
    Value::Int(v)
}

fn vector(x: f64, y: f64, z: f64) -> Value {
    Value::Vector(vec![x, y, z])
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

fn geometry(name: &str) -> SocketTemplate {
    SocketTemplate::input(name, ValueKind::Unsupported)
}

fn selection() -> SocketTemplate {
    SocketTemplate::input("Selection", ValueKind::Bool).with_default(Value::Bool(true))
}

/// Create the geometry node schema registry
pub fn create_geometry_schemas() -> NodeSchemaRegistry {
    use ValueKind::{Bool, Color, Float, Int, Material, Object, Vector};

    let mut registry = NodeSchemaRegistry::new();

    // ========================================================================
    // Group plumbing
    // ========================================================================

    registry.register(NodeSchema::new(GROUP_INPUT, "Group Input").layout(SocketLayout::GraphInputs));
    registry.register(NodeSchema::new(GROUP_OUTPUT, "Group Output").layout(SocketLayout::GraphOutputs));
    registry.register(NodeSchema::new(GROUP_INSTANCE, "Group").layout(SocketLayout::Subgraph));

    registry.register(
        NodeSchema::new("NodeReroute", "Reroute")
            .inputs(vec![geometry("Input")])
            .outputs(vec![geometry("Output")]),
    );

    registry.register(
        NodeSchema::new("NodeFrame", "Frame")
            .property("shrink", Value::Bool(true))
            .property("label_size", int(20)),
    );

    // ========================================================================
    // Mesh primitives
    // ========================================================================

    registry.register(
        NodeSchema::new("GeometryNodeMeshCube", "Cube")
            .inputs(vec![
                SocketTemplate::input("Size", Vector).with_default(vector(1.0, 1.0, 1.0)),
                SocketTemplate::input("Vertices X", Int).with_default(int(2)),
                SocketTemplate::input("Vertices Y", Int).with_default(int(2)),
                SocketTemplate::input("Vertices Z", Int).with_default(int(2)),
            ])
            .outputs(vec![geometry("Mesh"), SocketTemplate::output("UV Map", Vector)]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeMeshUVSphere", "UV Sphere")
            .inputs(vec![
                SocketTemplate::input("Segments", Int).with_default(int(32)),
                SocketTemplate::input("Rings", Int).with_default(int(16)),
                SocketTemplate::input("Radius", Float).with_default(float(1.0)),
            ])
            .outputs(vec![geometry("Mesh"), SocketTemplate::output("UV Map", Vector)]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeMeshCylinder", "Cylinder")
            .property("fill_type", text("NGON"))
            .inputs(vec![
                SocketTemplate::input("Vertices", Int).with_default(int(32)),
                SocketTemplate::input("Side Segments", Int).with_default(int(1)),
                SocketTemplate::input("Fill Segments", Int).with_default(int(1)),
                SocketTemplate::input("Radius", Float).with_default(float(1.0)),
                SocketTemplate::input("Depth", Float).with_default(float(2.0)),
            ])
            .outputs(vec![
                geometry("Mesh"),
                SocketTemplate::output("Top", Bool),
                SocketTemplate::output("Side", Bool),
                SocketTemplate::output("Bottom", Bool),
                SocketTemplate::output("UV Map", Vector),
            ]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeMeshLine", "Mesh Line")
            .property("mode", text("OFFSET"))
            .property("count_mode", text("TOTAL"))
            .inputs(vec![
                SocketTemplate::input("Count", Int).with_default(int(10)),
                SocketTemplate::input("Resolution", Float).with_default(float(1.0)),
                SocketTemplate::input("Start Location", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Offset", Vector).with_default(vector(0.0, 0.0, 1.0)),
            ])
            .outputs(vec![geometry("Mesh")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeMeshGrid", "Grid")
            .inputs(vec![
                SocketTemplate::input("Size X", Float).with_default(float(1.0)),
                SocketTemplate::input("Size Y", Float).with_default(float(1.0)),
                SocketTemplate::input("Vertices X", Int).with_default(int(3)),
                SocketTemplate::input("Vertices Y", Int).with_default(int(3)),
            ])
            .outputs(vec![geometry("Mesh"), SocketTemplate::output("UV Map", Vector)]),
    );

    // ========================================================================
    // Geometry operations
    // ========================================================================

    registry.register(
        NodeSchema::new("GeometryNodeTransform", "Transform Geometry")
            .inputs(vec![
                geometry("Geometry"),
                SocketTemplate::input("Translation", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Rotation", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Scale", Vector).with_default(vector(1.0, 1.0, 1.0)),
            ])
            .outputs(vec![geometry("Geometry")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeSetPosition", "Set Position")
            .inputs(vec![
                geometry("Geometry"),
                selection(),
                SocketTemplate::input("Position", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Offset", Vector).with_default(vector(0.0, 0.0, 0.0)),
            ])
            .outputs(vec![geometry("Geometry")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeJoinGeometry", "Join Geometry")
            .inputs(vec![geometry("Geometry")])
            .outputs(vec![geometry("Geometry")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeRealizeInstances", "Realize Instances")
            .inputs(vec![geometry("Geometry")])
            .outputs(vec![geometry("Geometry")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeInstanceOnPoints", "Instance on Points")
            .inputs(vec![
                geometry("Points"),
                selection(),
                geometry("Instance"),
                SocketTemplate::input("Pick Instance", Bool).with_default(Value::Bool(false)),
                SocketTemplate::input("Instance Index", Int).with_default(int(0)),
                SocketTemplate::input("Rotation", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Scale", Vector).with_default(vector(1.0, 1.0, 1.0)),
            ])
            .outputs(vec![geometry("Instances")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeDistributePointsOnFaces", "Distribute Points on Faces")
            .property("distribute_method", text("RANDOM"))
            .property("use_legacy_normal", Value::Bool(false))
            .inputs(vec![
                geometry("Mesh"),
                selection(),
                SocketTemplate::input("Density", Float).with_default(float(10.0)),
                SocketTemplate::input("Seed", Int).with_default(int(0)),
            ])
            .outputs(vec![
                geometry("Points"),
                SocketTemplate::output("Normal", Vector),
                SocketTemplate::output("Rotation", Vector),
            ]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeMeshBoolean", "Mesh Boolean")
            .property("operation", text("DIFFERENCE"))
            .inputs(vec![
                geometry("Mesh 1"),
                geometry("Mesh 2"),
                SocketTemplate::input("Self Intersection", Bool).with_default(Value::Bool(false)),
                SocketTemplate::input("Hole Tolerant", Bool).with_default(Value::Bool(false)),
            ])
            .outputs(vec![
                geometry("Mesh"),
                SocketTemplate::output("Intersecting Edges", Bool),
            ]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeSetMaterial", "Set Material")
            .inputs(vec![
                geometry("Geometry"),
                selection(),
                SocketTemplate::input("Material", Material).with_default(Value::Material(None)),
            ])
            .outputs(vec![geometry("Geometry")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeSwitch", "Switch")
            .property("input_type", text("GEOMETRY"))
            .inputs(vec![
                SocketTemplate::input("Switch", Bool).with_default(Value::Bool(false)),
                geometry("False"),
                geometry("True"),
            ])
            .outputs(vec![geometry("Output")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeObjectInfo", "Object Info")
            .property("transform_space", text("ORIGINAL"))
            .inputs(vec![
                SocketTemplate::input("Object", Object).with_default(Value::Object(None)),
                SocketTemplate::input("As Instance", Bool).with_default(Value::Bool(false)),
            ])
            .outputs(vec![
                SocketTemplate::output("Location", Vector),
                SocketTemplate::output("Rotation", Vector),
                SocketTemplate::output("Scale", Vector),
                geometry("Geometry"),
            ]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeViewer", "Viewer")
            .property("domain", text("AUTO"))
            .property("data_type", text("FLOAT"))
            .inputs(vec![
                geometry("Geometry"),
                SocketTemplate::input("Value", Float).with_default(float(0.0)),
            ]),
    );

    // ========================================================================
    // Curves
    // ========================================================================

    registry.register(
        NodeSchema::new("GeometryNodeCurvePrimitiveCircle", "Curve Circle")
            .property("mode", text("RADIUS"))
            .inputs(vec![
                SocketTemplate::input("Resolution", Int).with_default(int(32)),
                SocketTemplate::input("Radius", Float).with_default(float(1.0)),
            ])
            .outputs(vec![geometry("Curve"), SocketTemplate::output("Center", Vector)]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeCurveToMesh", "Curve to Mesh")
            .inputs(vec![
                geometry("Curve"),
                geometry("Profile Curve"),
                SocketTemplate::input("Fill Caps", Bool).with_default(Value::Bool(false)),
            ])
            .outputs(vec![geometry("Mesh")]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeResampleCurve", "Resample Curve")
            .property("mode", text("COUNT"))
            .inputs(vec![
                geometry("Curve"),
                selection(),
                SocketTemplate::input("Count", Int).with_default(int(10)),
            ])
            .outputs(vec![geometry("Curve")]),
    );

    // ========================================================================
    // Fields and inputs
    // ========================================================================

    registry.register(
        NodeSchema::new("GeometryNodeInputPosition", "Position")
            .outputs(vec![SocketTemplate::output("Position", Vector)]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeInputIndex", "Index")
            .outputs(vec![SocketTemplate::output("Index", Int)]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeInputVector", "Vector")
            .property("vector", vector(0.0, 0.0, 0.0))
            .outputs(vec![SocketTemplate::output("Vector", Vector)]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeInputString", "String")
            .property("string", text(""))
            .outputs(vec![SocketTemplate::output("String", ValueKind::String)]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeInputInt", "Integer")
            .property("integer", int(0))
            .outputs(vec![SocketTemplate::output("Integer", Int)]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeValue", "Value")
            .outputs(vec![SocketTemplate::output("Value", Float)]),
    );

    // ========================================================================
    // Math and utilities
    // ========================================================================

    registry.register(
        NodeSchema::new("ShaderNodeMath", "Math")
            .property("operation", text("ADD"))
            .property("use_clamp", Value::Bool(false))
            .inputs(vec![
                SocketTemplate::input("Value", Float).with_default(float(0.5)),
                SocketTemplate::input("Value", Float)
                    .with_identifier("Value_001")
                    .with_default(float(0.5)),
                SocketTemplate::input("Value", Float)
                    .with_identifier("Value_002")
                    .with_default(float(0.5)),
            ])
            .outputs(vec![SocketTemplate::output("Value", Float)]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeVectorMath", "Vector Math")
            .property("operation", text("ADD"))
            .inputs(vec![
                SocketTemplate::input("Vector", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Vector", Vector)
                    .with_identifier("Vector_001")
                    .with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Vector", Vector)
                    .with_identifier("Vector_002")
                    .with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Scale", Float).with_default(float(1.0)),
            ])
            .outputs(vec![
                SocketTemplate::output("Vector", Vector),
                SocketTemplate::output("Value", Float),
            ]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeCombineXYZ", "Combine XYZ")
            .inputs(vec![
                SocketTemplate::input("X", Float).with_default(float(0.0)),
                SocketTemplate::input("Y", Float).with_default(float(0.0)),
                SocketTemplate::input("Z", Float).with_default(float(0.0)),
            ])
            .outputs(vec![SocketTemplate::output("Vector", Vector)]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeSeparateXYZ", "Separate XYZ")
            .inputs(vec![
                SocketTemplate::input("Vector", Vector).with_default(vector(0.0, 0.0, 0.0)),
            ])
            .outputs(vec![
                SocketTemplate::output("X", Float),
                SocketTemplate::output("Y", Float),
                SocketTemplate::output("Z", Float),
            ]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeMapRange", "Map Range")
            .property("clamp", Value::Bool(true))
            .property("data_type", text("FLOAT"))
            .property("interpolation_type", text("LINEAR"))
            .inputs(vec![
                SocketTemplate::input("Value", Float).with_default(float(1.0)),
                SocketTemplate::input("From Min", Float).with_default(float(0.0)),
                SocketTemplate::input("From Max", Float).with_default(float(1.0)),
                SocketTemplate::input("To Min", Float).with_default(float(0.0)),
                SocketTemplate::input("To Max", Float).with_default(float(1.0)),
            ])
            .outputs(vec![SocketTemplate::output("Result", Float)]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeCompare", "Compare")
            .property("data_type", text("FLOAT"))
            .property("operation", text("GREATER_THAN"))
            .property("mode", text("ELEMENT"))
            .inputs(vec![
                SocketTemplate::input("A", Float).with_default(float(0.0)),
                SocketTemplate::input("B", Float).with_default(float(0.0)),
                SocketTemplate::input("Epsilon", Float).with_default(float(0.001)),
            ])
            .outputs(vec![SocketTemplate::output("Result", Bool)]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeRandomValue", "Random Value")
            .property("data_type", text("FLOAT"))
            .inputs(vec![
                SocketTemplate::input("Min", Float).with_default(float(0.0)),
                SocketTemplate::input("Max", Float).with_default(float(1.0)),
                SocketTemplate::input("ID", Int).with_default(int(0)),
                SocketTemplate::input("Seed", Int).with_default(int(0)),
            ])
            .outputs(vec![SocketTemplate::output("Value", Float)]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeFloatCurve", "Float Curve")
            .curve_mapping()
            .inputs(vec![
                SocketTemplate::input("Factor", Float).with_default(float(1.0)),
                SocketTemplate::input("Value", Float).with_default(float(1.0)),
            ])
            .outputs(vec![SocketTemplate::output("Value", Float)]),
    );

    // ========================================================================
    // Textures and color
    // ========================================================================

    registry.register(
        NodeSchema::new("ShaderNodeTexNoise", "Noise Texture")
            .property("noise_dimensions", text("3D"))
            .inputs(vec![
                SocketTemplate::input("Vector", Vector).with_default(vector(0.0, 0.0, 0.0)),
                SocketTemplate::input("Scale", Float).with_default(float(5.0)),
                SocketTemplate::input("Detail", Float).with_default(float(2.0)),
                SocketTemplate::input("Roughness", Float).with_default(float(0.5)),
                SocketTemplate::input("Distortion", Float).with_default(float(0.0)),
            ])
            .outputs(vec![
                SocketTemplate::output("Fac", Float),
                SocketTemplate::output("Color", Color),
            ]),
    );

    registry.register(
        NodeSchema::new("ShaderNodeValToRGB", "Color Ramp")
            .property("color_ramp", Value::Unsupported)
            .inputs(vec![SocketTemplate::input("Fac", Float).with_default(float(0.5))])
            .outputs(vec![
                SocketTemplate::output("Color", Color),
                SocketTemplate::output("Alpha", Float),
            ]),
    );

    registry.register(
        NodeSchema::new("FunctionNodeCombineColor", "Combine Color")
            .property("mode", text("RGB"))
            .inputs(vec![
                SocketTemplate::input("Red", Float).with_default(float(0.0)),
                SocketTemplate::input("Green", Float).with_default(float(0.0)),
                SocketTemplate::input("Blue", Float).with_default(float(0.0)),
                SocketTemplate::input("Alpha", Float).with_default(float(1.0)),
            ])
            .outputs(vec![SocketTemplate::output("Color", Color)]),
    );

    registry.register(
        NodeSchema::new("GeometryNodeStoreNamedAttribute", "Store Named Attribute")
            .property("data_type", text("FLOAT_COLOR"))
            .property("domain", text("POINT"))
            .inputs(vec![
                geometry("Geometry"),
                selection(),
                SocketTemplate::input("Name", ValueKind::String).with_default(text("")),
                SocketTemplate::input("Value", Color).with_default(Value::Vector(vec![0.0, 0.0, 0.0, 1.0])),
            ])
            .outputs(vec![geometry("Geometry")]),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{canonical_name, resolve_type_tag};
    use std::collections::HashSet;

    #[test]
    fn test_builtin_is_shared() {
        let a = NodeSchemaRegistry::builtin() as *const _;
        let b = NodeSchemaRegistry::builtin() as *const _;
        assert_eq!(a, b);
        assert!(NodeSchemaRegistry::builtin().get("GeometryNodeMeshCube").is_some());
    }

    #[test]
    fn test_socket_identifiers_unique_per_side() {
        for schema in NodeSchemaRegistry::builtin().schemas() {
            for side in [&schema.inputs, &schema.outputs] {
                let mut seen = HashSet::new();
                for socket in side {
                    assert!(
                        seen.insert(socket.identifier.as_str()),
                        "{}: duplicate identifier {}",
                        schema.id,
                        socket.identifier
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_names_agree_with_registry() {
        for schema in NodeSchemaRegistry::builtin().schemas() {
            if schema.id == GROUP_INSTANCE {
                continue;
            }
            assert!(canonical_name(&schema.id).is_some(), "{} unregistered", schema.id);
            assert_eq!(
                resolve_type_tag(&schema.default_name).ok(),
                Some(schema.id.as_str()),
                "{} does not infer its own type",
                schema.default_name
            );
        }
    }

    #[test]
    fn test_defaults_fit_their_sockets() {
        for schema in NodeSchemaRegistry::builtin().schemas() {
            for socket in &schema.inputs {
                if let Some(default) = &socket.default {
                    assert!(default.fits(socket.kind), "{}.{}", schema.id, socket.name);
                }
            }
        }
    }

    #[test]
    fn test_float_curve_has_mapping() {
        let schema = NodeSchemaRegistry::builtin().get("ShaderNodeFloatCurve").unwrap();
        assert!(schema
            .properties
            .iter()
            .any(|(name, value)| name == MAPPING_PROPERTY && *value == Value::Unsupported));
        assert_eq!(schema.curve.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_socket_layouts() {
        assert_eq!(NodeSchemaRegistry::socket_layout(GROUP_INPUT), SocketLayout::GraphInputs);
        assert_eq!(NodeSchemaRegistry::socket_layout(GROUP_OUTPUT), SocketLayout::GraphOutputs);
        assert_eq!(NodeSchemaRegistry::socket_layout(GROUP_INSTANCE), SocketLayout::Subgraph);
        assert_eq!(NodeSchemaRegistry::socket_layout("ShaderNodeMath"), SocketLayout::Static);
        assert_eq!(NodeSchemaRegistry::socket_layout("NodeUnknown"), SocketLayout::Static);
    }
}
