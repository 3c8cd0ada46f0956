//! Error types for sandbox evaluation

use thiserror::Error;

use crate::ast::BinOp;
use crate::frontend::ParseError;
use crate::Value;

/// Failure raised while evaluating an expression tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Operand kinds do not fit the operator
    #[error("type mismatch in `{op}`: expected {expected}, found {found}")]
    TypeMismatch {
        /// Operator symbol
        op: String,
        /// What the operator accepts
        expected: String,
        /// Kinds actually supplied
        found: String,
    },

    /// Integer `/` or `%` with a zero right operand
    #[error("division by zero in `{op}`")]
    DivisionByZero {
        /// Operator symbol
        op: String,
    },

    /// Forced unwrap of an absent value
    #[error("unexpectedly found nil while force-unwrapping a value")]
    UnwrapOnAbsent,

    /// Checked integer arithmetic overflowed
    #[error("integer overflow in `{op}`")]
    IntegerOverflow {
        /// Operator symbol
        op: String,
    },
}

impl EvalError {
    /// Mismatch between two operands of a binary operator.
    pub fn binary_mismatch(op: BinOp, expected: &str, left: &Value, right: &Value) -> Self {
        EvalError::TypeMismatch {
            op: op.symbol().to_string(),
            expected: expected.to_string(),
            found: format!("{} and {}", type_name(left), type_name(right)),
        }
    }

    /// Whether this is the forced-unwrap failure, which a session may treat as fatal.
    pub fn is_fatal_unwrap(&self) -> bool {
        matches!(self, EvalError::UnwrapOnAbsent)
    }
}

/// Errors from the parse-then-evaluate convenience path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SandboxError {
    /// Source text did not parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Parsed tree failed to evaluate
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Get a human-readable type name for a value.
///
/// Tuples spell out their element types, e.g. `(Int, Text)`.
pub fn type_name(value: &Value) -> String {
    match value {
        Value::Tuple(items) => {
            let names: Vec<String> = items.iter().map(type_name).collect();
            format!("({})", names.join(", "))
        }
        other => other.kind().to_string(),
    }
}

/// Result type alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_scalars() {
        assert_eq!(type_name(&Value::Int(1)), "Int");
        assert_eq!(type_name(&Value::Float(1.0)), "Float");
        assert_eq!(type_name(&Value::text("a")), "Text");
        assert_eq!(type_name(&Value::Bool(true)), "Bool");
        assert_eq!(type_name(&Value::Absent), "nil");
    }

    #[test]
    fn test_type_name_nested_tuple() {
        let value = Value::tuple(vec![
            Value::Int(1),
            Value::tuple(vec![Value::text("x"), Value::Absent]),
        ]);
        assert_eq!(type_name(&value), "(Int, (Text, nil))");
    }

    #[test]
    fn test_mismatch_message() {
        let err = EvalError::binary_mismatch(
            BinOp::Add,
            "two numbers of the same kind",
            &Value::Int(1),
            &Value::text("a"),
        );
        assert_eq!(
            err.to_string(),
            "type mismatch in `+`: expected two numbers of the same kind, found Int and Text"
        );
    }

    #[test]
    fn test_is_fatal_unwrap() {
        assert!(EvalError::UnwrapOnAbsent.is_fatal_unwrap());
        assert!(!EvalError::DivisionByZero { op: "/".into() }.is_fatal_unwrap());
    }
}
