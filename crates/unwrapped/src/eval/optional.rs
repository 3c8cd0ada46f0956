//! Nil-coalescing and forced unwrapping
//!
//! `a ?? b` yields `a` unless it is `nil`, in which case `b` is evaluated and
//! returned. The fallback is never evaluated when `a` is present, so its
//! kind is checked statically: if the fallback's kind can be inferred from
//! the tree alone and differs from the present primary's, the expression is
//! rejected with a type mismatch.
//!
//! `a!` yields `a` unless it is `nil`, which is the one designed failure.

use crate::ast::{BinOp, Expr, UnOp};
use crate::error::type_name;
use crate::{EvalContext, EvalError, Kind, Shape, Tracer, Value};

use super::Evaluate;

/// Evaluate `primary ?? fallback`.
pub fn eval_coalesce(
    primary: &Expr,
    fallback: &Expr,
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let value = primary.eval(tracer, ctx)?;
    if value.is_absent() {
        return fallback.eval(tracer, ctx);
    }

    if ctx.check_fallback_kind {
        if let Some(shape) = static_shape(fallback) {
            if !shape.admits(&value) {
                return Err(EvalError::TypeMismatch {
                    op: "??".to_string(),
                    expected: format!("a fallback of kind {}", type_name(&value)),
                    found: shape.to_string(),
                });
            }
        }
    }

    Ok(value)
}

/// Evaluate `operand!`.
pub fn eval_force_unwrap(
    operand: &Expr,
    tracer: &mut Tracer,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match operand.eval(tracer, ctx)? {
        Value::Absent => Err(EvalError::UnwrapOnAbsent),
        value => Ok(value),
    }
}

/// Infer the shape an expression yields without evaluating it.
///
/// Returns `None` when the shape depends on evaluation or the expression
/// may yield `nil`. Tuples have a shape only when every element does.
pub fn static_shape(expr: &Expr) -> Option<Shape> {
    match expr {
        Expr::Literal(value) => Shape::of(value),
        Expr::Tuple(elements) => elements
            .iter()
            .map(static_shape)
            .collect::<Option<_>>()
            .map(Shape::Tuple),

        Expr::Unary { op: UnOp::Not, .. } => Some(Kind::Bool.into()),
        Expr::Unary { op: UnOp::Neg, operand } => static_shape(operand).filter(Shape::is_numeric),

        Expr::Binary { op, .. } if op.is_comparison() || op.is_logical() => Some(Kind::Bool.into()),
        Expr::Binary { op, left, right } => {
            let left = static_shape(left)?;
            let right = static_shape(right)?;
            let text = Shape::Kind(Kind::Text);
            let valid = left == right && (left.is_numeric() || (*op == BinOp::Add && left == text));
            valid.then_some(left)
        }

        Expr::Coalesce { primary, fallback } => {
            static_shape(fallback).or_else(|| static_shape(primary))
        }
        Expr::ForceUnwrap(operand) => static_shape(operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate, evaluate_with};

    #[test]
    fn test_coalesce_absent_uses_fallback() {
        let expr = Expr::coalesce(Expr::absent(), Expr::lit(3));
        assert_eq!(evaluate(&expr), Ok(Value::Int(3)));
    }

    #[test]
    fn test_coalesce_present_keeps_primary() {
        let expr = Expr::coalesce(Expr::lit(8), Expr::lit(3));
        assert_eq!(evaluate(&expr), Ok(Value::Int(8)));
    }

    #[test]
    fn test_coalesce_absent_fallback_allowed() {
        let expr = Expr::coalesce(Expr::absent(), Expr::absent());
        assert_eq!(evaluate(&expr), Ok(Value::Absent));
        let expr = Expr::coalesce(Expr::lit("x"), Expr::absent());
        assert_eq!(evaluate(&expr), Ok(Value::text("x")));
    }

    #[test]
    fn test_coalesce_fallback_kind_mismatch() {
        let expr = Expr::coalesce(Expr::lit(8), Expr::lit("three"));
        assert_eq!(
            evaluate(&expr),
            Err(EvalError::TypeMismatch {
                op: "??".into(),
                expected: "a fallback of kind Int".into(),
                found: "Text".into(),
            })
        );
    }

    #[test]
    fn test_coalesce_kind_check_can_be_disabled() {
        let expr = Expr::coalesce(Expr::lit(8), Expr::lit("three"));
        let ctx = EvalContext::default().fallback_kind_check(false);
        assert_eq!(evaluate_with(&expr, &ctx).result, Ok(Value::Int(8)));
    }

    #[test]
    fn test_coalesce_does_not_evaluate_fallback_when_present() {
        // The fallback would fail if it ran
        let expr = Expr::coalesce(Expr::lit(1), Expr::force_unwrap(Expr::absent()));
        assert_eq!(evaluate(&expr), Ok(Value::Int(1)));
    }

    #[test]
    fn test_force_unwrap() {
        assert_eq!(
            evaluate(&Expr::force_unwrap(Expr::lit(2))),
            Ok(Value::Int(2))
        );
        assert_eq!(
            evaluate(&Expr::force_unwrap(Expr::absent())),
            Err(EvalError::UnwrapOnAbsent)
        );
    }

    #[test]
    fn test_coalesce_tuple_fallback_shape() {
        let pair = |a: Expr, b: Expr| Expr::tuple(vec![a, b]);
        let expr = Expr::coalesce(
            pair(Expr::lit(1), Expr::lit(2)),
            pair(Expr::lit("a"), Expr::lit(true)),
        );
        assert_eq!(
            evaluate(&expr),
            Err(EvalError::TypeMismatch {
                op: "??".into(),
                expected: "a fallback of kind (Int, Int)".into(),
                found: "(Text, Bool)".into(),
            })
        );

        let same = Expr::coalesce(
            pair(Expr::lit(1), Expr::lit(2)),
            pair(Expr::lit(3), Expr::lit(4)),
        );
        assert_eq!(
            evaluate(&same),
            Ok(Value::tuple(vec![Value::Int(1), Value::Int(2)]))
        );

        // An element that may be nil leaves the fallback unchecked
        let open = Expr::coalesce(
            pair(Expr::lit(1), Expr::lit(2)),
            pair(Expr::lit("a"), Expr::absent()),
        );
        assert!(evaluate(&open).is_ok());
    }

    #[test]
    fn test_static_shape() {
        let int = Some(Shape::Kind(Kind::Int));
        assert_eq!(static_shape(&Expr::lit(1)), int);
        assert_eq!(static_shape(&Expr::absent()), None);
        assert_eq!(
            static_shape(&Expr::binary(BinOp::Lt, Expr::absent(), Expr::lit(1))),
            Some(Shape::Kind(Kind::Bool))
        );
        assert_eq!(
            static_shape(&Expr::binary(BinOp::Add, Expr::lit("a"), Expr::lit("b"))),
            Some(Shape::Kind(Kind::Text))
        );
        assert_eq!(
            static_shape(&Expr::binary(BinOp::Mul, Expr::lit("a"), Expr::lit("b"))),
            None
        );
        assert_eq!(
            static_shape(&Expr::coalesce(Expr::absent(), Expr::lit(2.0))),
            Some(Shape::Kind(Kind::Float))
        );
        assert_eq!(static_shape(&Expr::unary(UnOp::Neg, Expr::lit(true))), None);
        assert_eq!(
            static_shape(&Expr::tuple(vec![Expr::lit(1), Expr::lit("x")])),
            Some(Shape::Tuple(vec![Kind::Int.into(), Kind::Text.into()]))
        );
        assert_eq!(
            static_shape(&Expr::tuple(vec![Expr::lit(1), Expr::absent()])),
            None
        );
    }
}
