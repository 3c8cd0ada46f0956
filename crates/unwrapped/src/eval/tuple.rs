//! Tuple literal evaluation

use crate::{EvalContext, EvalError, Expr, Tracer, Value};

use super::Evaluate;

/// Evaluate a tuple expression, elements left to right.
///
/// # Errors
///
/// Returns the first error raised by an element.
pub fn eval_tuple(
    elements: &[Expr],
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(element.eval(tracer, ctx)?);
    }
    Ok(Value::tuple(values))
}
