//! Evaluation context configuration

/// Default nesting limit for parsed expressions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for parsing and evaluation.
///
/// This is passed through all evaluation calls and controls
/// behavior like nesting limits and tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum nesting depth accepted by the parser
    pub max_depth: usize,

    /// Whether to record an evaluation trace
    pub trace: bool,

    /// Whether `??` rejects a fallback whose kind differs from a present primary
    pub check_fallback_kind: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
            check_fallback_kind: true,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Turn trace recording on or off.
    pub fn traced(mut self, on: bool) -> Self {
        self.trace = on;
        self
    }

    /// Turn the `??` fallback kind check on or off.
    pub fn fallback_kind_check(mut self, on: bool) -> Self {
        self.check_fallback_kind = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = EvalContext::new();
        assert_eq!(ctx.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!ctx.trace);
        assert!(ctx.check_fallback_kind);
    }

    #[test]
    fn test_builders() {
        let ctx = EvalContext::with_max_depth(8)
            .traced(true)
            .fallback_kind_check(false);
        assert_eq!(ctx.max_depth, 8);
        assert!(ctx.trace);
        assert!(!ctx.check_fallback_kind);
    }
}
