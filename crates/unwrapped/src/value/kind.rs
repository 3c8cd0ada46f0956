//! Variant tags and structural shapes for values

use std::fmt;

use super::Value;

/// The variant tag of a [`Value`](super::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `nil`
    Absent,
    /// `true` / `false`
    Bool,
    /// Integer
    Int,
    /// Floating point
    Float,
    /// Text
    Text,
    /// Tuple of any arity
    Tuple,
}

impl Kind {
    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Absent => "nil",
            Kind::Bool => "Bool",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Text => "Text",
            Kind::Tuple => "Tuple",
        }
    }

    /// Integer or float.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Float)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kind with tuple element kinds spelled out, e.g. `(Int, Text)`.
///
/// Shapes describe values that are known not to be `nil`; a `nil` inside a
/// tuple value fits any element shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Any non-tuple kind
    Kind(Kind),
    /// Tuple with one shape per element
    Tuple(Vec<Shape>),
}

impl Shape {
    /// Shape of a value, or `None` if it is or contains `nil`.
    pub fn of(value: &Value) -> Option<Shape> {
        match value {
            Value::Absent => None,
            Value::Tuple(items) => items
                .iter()
                .map(Shape::of)
                .collect::<Option<_>>()
                .map(Shape::Tuple),
            other => Some(Shape::Kind(other.kind())),
        }
    }

    /// Whether `value` has this shape.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Absent) => true,
            (Shape::Tuple(shapes), Value::Tuple(items)) => {
                shapes.len() == items.len()
                    && shapes.iter().zip(items.iter()).all(|(s, v)| s.admits(v))
            }
            (Shape::Kind(kind), value) => value.kind() == *kind,
            (Shape::Tuple(_), _) => false,
        }
    }

    /// Integer or float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Shape::Kind(kind) if kind.is_numeric())
    }
}

impl From<Kind> for Shape {
    fn from(kind: Kind) -> Self {
        Shape::Kind(kind)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Kind(kind) => write!(f, "{}", kind),
            Shape::Tuple(shapes) => {
                write!(f, "(")?;
                for (i, shape) in shapes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", shape)?;
                }
                write!(f, ")")
            }
        }
    }
}
