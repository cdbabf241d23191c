// SPDX-License-Identifier: MIT OR Apache-2.0
//! Values carried by sockets, node properties and graph interfaces.

use serde::{Deserialize, Serialize};

/// Socket type name of the bounded-fraction interface kind
pub const FLOAT_FACTOR_SOCKET: &str = "NodeSocketFloatFactor";

/// Kind of value a socket or property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Floating point number
    Float,
    /// Integer number
    Int,
    /// Boolean
    Bool,
    /// Vector or euler rotation
    Vector,
    /// Color (RGB or RGBA)
    Color,
    /// Text, also used for enum properties
    String,
    /// Reference to a scene object, by name
    Object,
    /// Reference to a material, by name
    Material,
    /// Structured data that has no text form (geometry, ramps, collections)
    Unsupported,
}

impl ValueKind {
    /// Map a host socket type name onto a value kind.
    ///
    /// Subtyped names (`NodeSocketFloatFactor`, `NodeSocketVectorEuler`, ...)
    /// share the kind of their base type.
    pub fn from_socket_type(socket_type: &str) -> Self {
        let Some(base) = socket_type.strip_prefix("NodeSocket") else {
            return Self::Unsupported;
        };
        if base.starts_with("Float") {
            Self::Float
        } else if base.starts_with("Int") {
            Self::Int
        } else if base.starts_with("Bool") {
            Self::Bool
        } else if base.starts_with("Vector") {
            Self::Vector
        } else if base.starts_with("Color") {
            Self::Color
        } else if base.starts_with("String") {
            Self::String
        } else if base == "Object" {
            Self::Object
        } else if base == "Material" {
            Self::Material
        } else {
            Self::Unsupported
        }
    }

    /// Whether values of this kind can be written as text
    pub fn is_representable(self) -> bool {
        self != Self::Unsupported
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Float
    Float(f64),
    /// Integer
    Int(i64),
    /// Boolean
    Bool(bool),
    /// String or enum identifier
    String(String),
    /// Vector, euler or color components
    Vector(Vec<f64>),
    /// Object reference
    Object(Option<String>),
    /// Material reference
    Material(Option<String>),
    /// Structured value with no literal form
    Unsupported,
}

impl Value {
    /// Get the kind of this value.
    ///
    /// Vectors report [`ValueKind::Vector`]; colors are only distinguishable
    /// through the declaring socket.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Vector(_) => ValueKind::Vector,
            Self::Object(_) => ValueKind::Object,
            Self::Material(_) => ValueKind::Material,
            Self::Unsupported => ValueKind::Unsupported,
        }
    }

    /// Check whether this value may be stored in a slot of `kind`
    pub fn fits(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Self::Vector(_), ValueKind::Vector | ValueKind::Color) => true,
            (value, kind) => value.kind() == kind,
        }
    }
}

/// Socket side of a node or graph interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketSide {
    /// Input side
    Input,
    /// Output side
    Output,
}

/// A control point of a curve mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Handle kind, e.g. `AUTO` or `VECTOR`
    pub handle_type: String,
    /// Point location
    pub location: [f64; 2],
}

impl CurvePoint {
    /// Create a point with the default `AUTO` handle
    pub fn auto(x: f64, y: f64) -> Self {
        Self {
            handle_type: "AUTO".to_string(),
            location: [x, y],
        }
    }
}

/// Default/min/max of a bounded-fraction interface socket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    /// Default value
    pub default: f64,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// A port on a graph's own external interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSocket {
    /// Stable identifier (host generated)
    pub identifier: String,
    /// Display name
    pub name: String,
    /// Host socket type name, e.g. `NodeSocketGeometry`
    pub socket_type: String,
    /// Bounds, only for [`FLOAT_FACTOR_SOCKET`]
    pub range: Option<FactorRange>,
}

impl InterfaceSocket {
    /// Create an interface socket without bounds
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        socket_type: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            socket_type: socket_type.into(),
            range: None,
        }
    }

    /// Attach default/min/max bounds
    pub fn with_range(mut self, default: f64, min: f64, max: f64) -> Self {
        self.range = Some(FactorRange { default, min, max });
        self
    }

    /// Value kind carried by this port
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_socket_type(&self.socket_type)
    }

    /// Whether this is the bounded-fraction kind
    pub fn is_factor(&self) -> bool {
        self.socket_type == FLOAT_FACTOR_SOCKET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_type_kinds() {
        assert_eq!(ValueKind::from_socket_type("NodeSocketFloatFactor"), ValueKind::Float);
        assert_eq!(ValueKind::from_socket_type("NodeSocketIntUnsigned"), ValueKind::Int);
        assert_eq!(ValueKind::from_socket_type("NodeSocketVectorEuler"), ValueKind::Vector);
        assert_eq!(ValueKind::from_socket_type("NodeSocketObject"), ValueKind::Object);
        assert_eq!(ValueKind::from_socket_type("NodeSocketGeometry"), ValueKind::Unsupported);
        assert_eq!(ValueKind::from_socket_type("Geometry"), ValueKind::Unsupported);
    }

    #[test]
    fn test_value_fits() {
        assert!(Value::Vector(vec![1.0, 0.0, 0.0, 1.0]).fits(ValueKind::Color));
        assert!(Value::Float(0.5).fits(ValueKind::Float));
        assert!(!Value::Int(1).fits(ValueKind::Float));
    }
}
