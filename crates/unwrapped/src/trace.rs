//! Evaluation trace recording
//!
//! A trace lists every evaluated node in completion order (post-order),
//! so the steps read the way the value was built up: operands before the
//! operator that consumed them. Failed nodes record their error, and the
//! error is recorded again by each enclosing node it propagates through.

use std::fmt;

use crate::{Expr, EvalError, Value};

/// What a single node evaluated to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "status", content = "detail", rename_all = "snake_case")
)]
pub enum Outcome {
    /// Rendered value (`Debug` form)
    Value(String),
    /// Rendered error message
    Error(String),
}

impl Outcome {
    fn from_result(result: &Result<Value, EvalError>) -> Self {
        match result {
            Ok(value) => Outcome::Value(format!("{:?}", value)),
            Err(err) => Outcome::Error(err.to_string()),
        }
    }

    /// Whether the node failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

/// One evaluated node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceStep {
    /// Nesting depth, 0 for the root
    pub depth: usize,
    /// The node rendered as source text
    pub expr: String,
    /// Its result
    pub outcome: Outcome,
}

/// The recorded steps of one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Trace {
    /// Steps in completion order
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Rendered source of each step, in order.
    pub fn exprs(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.expr.as_str()).collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            let indent = "  ".repeat(step.depth);
            match &step.outcome {
                Outcome::Value(v) => writeln!(f, "{}{} => {}", indent, step.expr, v)?,
                Outcome::Error(e) => writeln!(f, "{}{} !! {}", indent, step.expr, e)?,
            }
        }
        Ok(())
    }
}

/// Collects trace steps while an expression is evaluated.
///
/// A disabled tracer only tracks depth, so evaluation code can call it
/// unconditionally.
#[derive(Debug, Default)]
pub struct Tracer {
    enabled: bool,
    depth: usize,
    steps: Vec<TraceStep>,
}

impl Tracer {
    /// Create a tracer that records when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    /// A tracer that records nothing.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Whether steps are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Mark the start of a node's evaluation.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Mark the end of a node's evaluation and record its result.
    pub fn exit(&mut self, expr: &Expr, result: &Result<Value, EvalError>) {
        self.depth = self.depth.saturating_sub(1);
        if self.enabled {
            self.steps.push(TraceStep {
                depth: self.depth,
                expr: expr.to_string(),
                outcome: Outcome::from_result(result),
            });
        }
    }

    /// Finish recording.
    pub fn finish(self) -> Trace {
        Trace { steps: self.steps }
    }
}
