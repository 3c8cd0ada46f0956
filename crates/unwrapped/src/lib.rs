//! # Unwrapped
//!
//! An evaluation sandbox for optional values.
//!
//! Unwrapped lets a learner type small expressions mixing `nil`,
//! nil-coalescing (`??`), forced unwrapping (`!`) and the usual arithmetic,
//! comparison and logical operators, and see both the result and how it
//! was reached.
//!
//! ## Architecture
//!
//! - **Frontend**: parse source text into an [`Expr`] tree
//! - **Evaluator**: walk the tree and produce a [`Value`] or an [`EvalError`]
//! - **Trace**: optionally record every intermediate sub-result
//!
//! Evaluation is a pure function of the tree; nothing is shared between calls.
//!
//! ```
//! use unwrapped::{run, Value};
//!
//! assert_eq!(run("nil ?? 42").unwrap(), Value::Int(42));
//! assert!(run("nil!").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod frontend;
pub mod trace;
pub mod value;

// Re-export main types
pub use ast::{BinOp, Expr, Precedence, UnOp};
pub use context::EvalContext;
pub use error::{EvalError, Result, SandboxError};
pub use eval::{evaluate, evaluate_traced, evaluate_with, Evaluate, Evaluation};
pub use frontend::{parse, parse_with, ParseError, SourceLocation};
pub use trace::{Outcome, Trace, TraceStep, Tracer};
pub use value::{Kind, Shape, Value};

/// Unwrapped version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and evaluate source text with default settings.
pub fn run(source: &str) -> std::result::Result<Value, SandboxError> {
    let expr = parse(source)?;
    Ok(evaluate(&expr)?)
}

/// Parse and evaluate source text under `ctx`, returning the trace as well.
pub fn run_with(
    source: &str,
    ctx: &EvalContext,
) -> std::result::Result<Evaluation, ParseError> {
    let expr = parse_with(source, ctx)?;
    Ok(evaluate_with(&expr, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_run_reports_both_error_kinds() {
        assert!(matches!(run("1 +"), Err(SandboxError::Parse(_))));
        assert_eq!(
            run("nil!"),
            Err(SandboxError::Eval(EvalError::UnwrapOnAbsent))
        );
    }

    #[test]
    fn test_run_with_trace() {
        let eval = run_with("nil ?? 2", &EvalContext::default().traced(true)).unwrap();
        assert_eq!(eval.result, Ok(Value::Int(2)));
        assert_eq!(eval.trace.exprs(), vec!["nil", "2", "nil ?? 2"]);
    }
}
