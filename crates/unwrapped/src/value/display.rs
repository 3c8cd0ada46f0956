//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // `{:?}` keeps the fractional part: 3.0 rather than 3
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Text(s) => write!(f, "{:?}", s.as_str()),

            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?; // Single-element tuple needs trailing comma
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s.as_str()), // No quotes for Display
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_scalars() {
        assert_eq!(format!("{:?}", Value::Absent), "nil");
        assert_eq!(format!("{:?}", Value::Int(-7)), "-7");
        assert_eq!(format!("{:?}", Value::Float(3.0)), "3.0");
        assert_eq!(format!("{:?}", Value::text("hi")), "\"hi\"");
    }

    #[test]
    fn test_debug_tuples() {
        let pair = Value::tuple(vec![Value::Int(1), Value::text("B")]);
        assert_eq!(format!("{:?}", pair), "(1, \"B\")");
        let single = Value::tuple(vec![Value::Absent]);
        assert_eq!(format!("{:?}", single), "(nil,)");
    }

    #[test]
    fn test_display_unquotes_text_only_at_top_level() {
        assert_eq!(Value::text("hi").to_string(), "hi");
        let pair = Value::tuple(vec![Value::text("a"), Value::Bool(false)]);
        assert_eq!(pair.to_string(), "(\"a\", false)");
    }
}
