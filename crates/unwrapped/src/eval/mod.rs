//! Expression evaluation

pub mod binary;
pub mod optional;
pub mod tuple;
pub mod unary;

use crate::{EvalContext, EvalError, Expr, Trace, Tracer, Value};

/// Trait for evaluating expression nodes to values.
///
/// This is the core abstraction for the tree-walking evaluator.
pub trait Evaluate {
    /// Evaluate this node, reporting each finished sub-result to `tracer`.
    fn eval(&self, tracer: &mut Tracer, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, tracer: &mut Tracer, ctx: &EvalContext) -> Result<Value, EvalError> {
        tracer.enter();

        let result = match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Binary { op, left, right } => binary::eval_binary(*op, left, right, tracer, ctx),
            Expr::Unary { op, operand } => unary::eval_unary(*op, operand, tracer, ctx),
            Expr::Coalesce { primary, fallback } => {
                optional::eval_coalesce(primary, fallback, tracer, ctx)
            }
            Expr::ForceUnwrap(operand) => optional::eval_force_unwrap(operand, tracer, ctx),
            Expr::Tuple(elements) => tuple::eval_tuple(elements, tracer, ctx),
        };

        tracer.exit(self, &result);
        result
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Result of an evaluation together with its trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The value, or the first failure
    pub result: Result<Value, EvalError>,
    /// Recorded steps; empty unless tracing was on
    pub trace: Trace,
}

/// Evaluate an expression with default settings.
pub fn evaluate(expr: &Expr) -> Result<Value, EvalError> {
    expr.eval(&mut Tracer::disabled(), &EvalContext::default())
}

/// Evaluate an expression, recording a trace when `ctx.trace` is set.
///
/// The trace is returned even when evaluation fails, ending at the
/// failing node and the nodes it propagated through.
pub fn evaluate_with(expr: &Expr, ctx: &EvalContext) -> Evaluation {
    let mut tracer = Tracer::new(ctx.trace);
    let result = expr.eval(&mut tracer, ctx);
    Evaluation {
        result,
        trace: tracer.finish(),
    }
}

/// Evaluate an expression with tracing forced on.
pub fn evaluate_traced(expr: &Expr, ctx: &EvalContext) -> Evaluation {
    evaluate_with(expr, &ctx.clone().traced(true))
}
