//! Unary operation evaluation

use crate::ast::UnOp;
use crate::error::type_name;
use crate::{EvalContext, EvalError, Expr, Tracer, Value};

use super::Evaluate;

/// Evaluate `op operand`.
pub fn eval_unary(
    op: UnOp,
    operand: &Expr,
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let operand = operand.eval(tracer, ctx)?;
    apply_unary(op, operand)
}

/// Apply a prefix operator to an evaluated operand.
pub fn apply_unary(op: UnOp, operand: Value) -> Result<Value, EvalError> {
    match op {
        UnOp::Neg => eval_neg(operand),
        UnOp::Not => eval_not(operand),
    }
}

/// Evaluate unary negation (`-x`).
fn eval_neg(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::IntegerOverflow {
                op: UnOp::Neg.symbol().to_string(),
            }),
        Value::Float(n) => Ok(Value::Float(-n)),
        other => Err(mismatch(UnOp::Neg, "a number", &other)),
    }
}

/// Evaluate logical NOT (`!x`).
fn eval_not(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(mismatch(UnOp::Not, "a Bool", &other)),
    }
}

fn mismatch(op: UnOp, expected: &str, operand: &Value) -> EvalError {
    EvalError::TypeMismatch {
        op: op.symbol().to_string(),
        expected: expected.to_string(),
        found: type_name(operand),
    }
}
