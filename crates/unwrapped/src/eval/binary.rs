//! Binary operation evaluation

use std::cmp::Ordering;

use crate::ast::BinOp;
use crate::error::type_name;
use crate::{EvalContext, EvalError, Expr, Kind, Shape, Tracer, Value};

use super::optional::static_shape;
use super::Evaluate;

/// Evaluate `left op right`.
///
/// Operands are evaluated left to right; `&&` and `||` skip the right
/// operand when the left one already decides the result.
pub fn eval_binary(
    op: BinOp,
    left: &Expr,
    right: &Expr,
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // Short-circuit evaluation for && and ||
    match op {
        BinOp::And => return eval_logical(op, false, left, right, tracer, ctx),
        BinOp::Or => return eval_logical(op, true, left, right, tracer, ctx),
        _ => {}
    }

    let left = left.eval(tracer, ctx)?;
    let right = right.eval(tracer, ctx)?;
    apply_binary(op, left, right)
}

/// Apply a binary operator to two already-evaluated operands.
pub fn apply_binary(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        // Arithmetic
        BinOp::Add => eval_add(left, right),
        BinOp::Sub => eval_arithmetic(op, left, right, i64::checked_sub, |a, b| a - b),
        BinOp::Mul => eval_arithmetic(op, left, right, i64::checked_mul, |a, b| a * b),
        BinOp::Div => eval_division(op, left, right, i64::checked_div, |a, b| a / b),
        BinOp::Rem => eval_division(op, left, right, i64::checked_rem, |a, b| a % b),

        // Comparison
        BinOp::Eq => values_equal(op, &left, &right).map(Value::Bool),
        BinOp::Ne => values_equal(op, &left, &right).map(|eq| Value::Bool(!eq)),
        BinOp::Lt => ordered(op, &left, &right, |o| o == Ordering::Less),
        BinOp::Gt => ordered(op, &left, &right, |o| o == Ordering::Greater),
        BinOp::Le => ordered(op, &left, &right, |o| o != Ordering::Greater),
        BinOp::Ge => ordered(op, &left, &right, |o| o != Ordering::Less),

        // Logical, without short-circuit since both values are at hand
        BinOp::And | BinOp::Or => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinOp::And {
                a && b
            } else {
                a || b
            })),
            (left, right) => Err(EvalError::binary_mismatch(op, "two Bools", &left, &right)),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Logical Operators
// ═══════════════════════════════════════════════════════════════════════

/// `&&` decides on `false`, `||` decides on `true`.
///
/// A skipped right operand is still rejected when its kind is known from
/// the tree alone and is not `Bool`.
fn eval_logical(
    op: BinOp,
    decisive: bool,
    left: &Expr,
    right: &Expr,
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let left_val = left.eval(tracer, ctx)?;
    match left_val {
        Value::Bool(b) if b == decisive => match static_shape(right) {
            Some(shape) if shape != Shape::Kind(Kind::Bool) => Err(EvalError::TypeMismatch {
                op: op.symbol().to_string(),
                expected: "two Bools".to_string(),
                found: format!("Bool and {}", shape),
            }),
            _ => Ok(Value::Bool(b)),
        },
        Value::Bool(_) => match right.eval(tracer, ctx)? {
            Value::Bool(b) => Ok(Value::Bool(b)),
            other => Err(EvalError::binary_mismatch(op, "two Bools", &left_val, &other)),
        },
        other => Err(EvalError::TypeMismatch {
            op: op.symbol().to_string(),
            expected: "two Bools".to_string(),
            found: format!("{} on the left", type_name(&other)),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

fn eval_add(left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        // Text concatenation
        (Value::Text(a), Value::Text(b)) => Ok(Value::text(format!("{}{}", a, b))),

        // Numeric addition
        _ => eval_arithmetic(BinOp::Add, left, right, i64::checked_add, |a, b| a + b),
    }
}

/// Same-kind numeric arithmetic; integers are checked, floats follow IEEE-754.
fn eval_arithmetic(
    op: BinOp,
    left: Value,
    right: Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_op(a, b)
            .map(Value::Int)
            .ok_or_else(|| EvalError::IntegerOverflow {
                op: op.symbol().to_string(),
            }),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(a, b))),
        (left, right) => Err(EvalError::binary_mismatch(
            op,
            "two numbers of the same kind",
            &left,
            &right,
        )),
    }
}

/// `/` and `%`: a zero integer divisor is rejected before anything else.
fn eval_division(
    op: BinOp,
    left: Value,
    right: Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    if matches!(right, Value::Int(0)) {
        return Err(EvalError::DivisionByZero {
            op: op.symbol().to_string(),
        });
    }
    eval_arithmetic(op, left, right, int_op, float_op)
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison Operations
// ═══════════════════════════════════════════════════════════════════════

/// Equality used by `==` and `!=`.
///
/// `nil` compares with anything and equals only `nil`. Other operands must
/// share a kind; tuples must have the same length and element kinds
/// throughout, whatever their values.
pub fn values_equal(op: BinOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    if !comparable(left, right, false) {
        return Err(EvalError::binary_mismatch(
            op,
            "operands of the same kind",
            left,
            right,
        ));
    }
    Ok(left == right)
}

/// Ordering used by `<` `>` `<=` `>=`.
///
/// Returns `None` for unordered floats (NaN). Text orders by code point.
/// Tuples must agree in length and element kinds; they then order
/// lexicographically, stopping at the first pair that is not equal.
pub fn compare(op: BinOp, left: &Value, right: &Value) -> Result<Option<Ordering>, EvalError> {
    if !comparable(left, right, true) {
        return Err(EvalError::binary_mismatch(
            op,
            "two orderable operands of the same kind",
            left,
            right,
        ));
    }
    Ok(ordering(left, right))
}

/// Whether two values may be compared, checked over every tuple element.
///
/// `nil` fits anything for equality; `nil` and Bools have no ordering.
fn comparable(left: &Value, right: &Value, ordered: bool) -> bool {
    match (left, right) {
        (Value::Tuple(a), Value::Tuple(b)) => {
            let mut pairs = a.iter().zip(b.iter());
            a.len() == b.len() && pairs.all(|(x, y)| comparable(x, y, ordered))
        }
        (Value::Absent, _) | (_, Value::Absent) | (Value::Bool(_), Value::Bool(_)) => !ordered,
        _ => left.kind() == right.kind(),
    }
}

/// Ordering of two values already known to be comparable.
fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.chars().cmp(b.chars())),
        (Value::Tuple(a), Value::Tuple(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                match ordering(x, y) {
                    Some(Ordering::Equal) => continue,
                    decided => return decided,
                }
            }
            Some(Ordering::Equal)
        }
        _ => None,
    }
}

fn ordered(
    op: BinOp,
    left: &Value,
    right: &Value,
    accept: fn(Ordering) -> bool,
) -> Result<Value, EvalError> {
    let ordering = compare(op, left, right)?;
    Ok(Value::Bool(ordering.map_or(false, accept)))
}
