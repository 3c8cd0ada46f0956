//! Textual front end
//!
//! Turns source text such as `nil ?? "fallback"` or `(2, "B") > (2, "A")`
//! into an [`Expr`] tree.
//!
//! ```text
//! Source Text → [proc-macro2 lexer] → token trees → [Parser] → Expr
//! ```
//!
//! Lexing follows Rust's token rules, so comments are ignored, delimiters
//! must balance and literals use Rust escapes. Literal tokens are decoded
//! with `syn`.
//!
//! Precedence, loosest first: `||`, `&&`, comparisons (which do not chain),
//! `??` (right-associative), `+ -`, `* / %`, prefix `- !`, postfix `!`.

mod lexer;
mod literal;
mod parser;

use std::fmt;
use std::str::FromStr;

use proc_macro2::{LineColumn, Span, TokenStream};

use crate::{EvalContext, Expr};

// ═══════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub(crate) fn at(message: impl Into<String>, span: Span) -> Self {
        Self::new(message).with_location(SourceLocation::from(span.start()))
    }

    /// Render the offending source line with a caret under the error column.
    ///
    /// Returns `None` when the error has no location or the line is missing.
    pub fn caret(&self, source: &str) -> Option<String> {
        let loc = self.location?;
        let line = source.lines().nth(loc.line.checked_sub(1)?)?;
        let pad = " ".repeat(loc.column.saturating_sub(1));
        Some(format!("{}\n{}^", line, pad))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Source code location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<LineColumn> for SourceLocation {
    fn from(lc: LineColumn) -> Self {
        // proc-macro2 columns are 0-indexed
        Self::new(lc.line, lc.column + 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════

/// Parse source text with default settings.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with(source, &EvalContext::default())
}

/// Parse source text, rejecting nesting deeper than `ctx.max_depth`.
pub fn parse_with(source: &str, ctx: &EvalContext) -> Result<Expr, ParseError> {
    let stream = TokenStream::from_str(source).map_err(|err| {
        ParseError::at(
            "could not tokenize input (unbalanced delimiters or unterminated literal?)",
            err.span(),
        )
    })?;
    let tokens = lexer::tokenize(stream)?;
    let mut parser = parser::Parser::new(tokens, ctx.max_depth);
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new("boom").with_location(SourceLocation::new(1, 4));
        assert_eq!(err.to_string(), "parse error: boom at 1:4");
        assert_eq!(ParseError::new("boom").to_string(), "parse error: boom");
    }

    #[test]
    fn test_caret() {
        let err = ParseError::new("boom").with_location(SourceLocation::new(1, 4));
        assert_eq!(err.caret("1 + = 2").unwrap(), "1 + = 2\n   ^");
        assert_eq!(ParseError::new("boom").caret("x"), None);
    }

    #[test]
    fn test_from_str() {
        let expr: Expr = "nil ?? 1".parse().unwrap();
        assert_eq!(expr, Expr::coalesce(Expr::absent(), Expr::lit(1)));
    }
}
