//! Command-line arguments

use clap::Parser;
use unwrapped::context::DEFAULT_MAX_DEPTH;
use unwrapped::EvalContext;

/// Evaluate expressions over optional values.
///
/// With expressions on the command line, each is evaluated and its value
/// printed. Without any, an interactive session starts.
#[derive(Debug, Parser)]
#[command(name = "unwrapped", version, about)]
pub struct Cli {
    /// Expressions to evaluate, e.g. 'nil ?? 42'
    pub exprs: Vec<String>,

    /// Print the evaluation trace before each value
    #[arg(short, long)]
    pub trace: bool,

    /// Print one JSON document per expression
    #[arg(long)]
    pub json: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// End the interactive session when nil is force-unwrapped
    #[arg(long)]
    pub fatal_unwrap: bool,

    /// Accept `??` fallbacks whose kind differs from the primary
    #[arg(long)]
    pub lenient_fallback: bool,
}

impl Cli {
    /// Evaluation settings selected by the flags.
    pub fn context(&self) -> EvalContext {
        EvalContext::with_max_depth(self.max_depth)
            .traced(self.trace)
            .fallback_kind_check(!self.lenient_fallback)
    }
}
