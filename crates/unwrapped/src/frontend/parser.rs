//! Precedence-climbing parser over operator tokens

use proc_macro2::{Delimiter, Group, Span};

use super::lexer::{tokenize, Op, Token};
use super::literal;
use super::{ParseError, SourceLocation};
use crate::ast::{BinOp, Expr, UnOp};
use crate::Value;

const DISJUNCTION: &[(Op, BinOp)] = &[(Op::OrOr, BinOp::Or)];
const CONJUNCTION: &[(Op, BinOp)] = &[(Op::AndAnd, BinOp::And)];
const COMPARISON: &[(Op, BinOp)] = &[
    (Op::EqEq, BinOp::Eq),
    (Op::NotEq, BinOp::Ne),
    (Op::Lt, BinOp::Lt),
    (Op::Gt, BinOp::Gt),
    (Op::Le, BinOp::Le),
    (Op::Ge, BinOp::Ge),
];
const ADDITIVE: &[(Op, BinOp)] = &[(Op::Plus, BinOp::Add), (Op::Minus, BinOp::Sub)];
const MULTIPLICATIVE: &[(Op, BinOp)] = &[
    (Op::Star, BinOp::Mul),
    (Op::Slash, BinOp::Div),
    (Op::Percent, BinOp::Rem),
];

/// A parsed subtree and its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current recursion depth, shared with enclosing groups
    depth: usize,
    max_depth: usize,
    /// Closing delimiter of the enclosing group, if any
    close: Option<Span>,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
            close: None,
        }
    }

    /// Parser for the inside of a parenthesized group.
    fn nested(&self, group: &Group) -> Result<Parser, ParseError> {
        Ok(Parser {
            tokens: tokenize(group.stream())?,
            pos: 0,
            depth: self.depth,
            max_depth: self.max_depth,
            close: Some(group.span_close()),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cursor helpers
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume `op` if it is next.
    fn eat_op(&mut self, op: Op) -> Option<Span> {
        match self.peek() {
            Some(Token::Op(next, span)) if *next == op => {
                let span = *span;
                self.pos += 1;
                Some(span)
            }
            _ => None,
        }
    }

    fn eat_comma(&mut self) -> bool {
        if matches!(self.peek(), Some(Token::Comma(_))) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Peek a binary operator from `table`.
    fn peek_binary(&self, table: &[(Op, BinOp)]) -> Option<(BinOp, Span)> {
        match self.peek() {
            Some(Token::Op(op, span)) => table
                .iter()
                .find(|(candidate, _)| candidate == op)
                .map(|(_, bin)| (*bin, *span)),
            _ => None,
        }
    }

    fn eat_binary(&mut self, table: &[(Op, BinOp)]) -> Option<(BinOp, Span)> {
        let found = self.peek_binary(table);
        if found.is_some() {
            self.pos += 1;
        }
        found
    }

    /// Error positioned at the end of the current token list.
    fn error_at_end(&self, message: &str) -> ParseError {
        let err = ParseError::new(message);
        match (self.close, self.tokens.last()) {
            (Some(close), _) => err.with_location(SourceLocation::from(close.start())),
            (None, Some(last)) => err.with_location(SourceLocation::from(last.span().end())),
            (None, None) => err,
        }
    }

    fn descend(&mut self, span: Span) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.too_deep(span));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn too_deep(&self, span: Span) -> ParseError {
        ParseError::at(
            format!("expression nests deeper than {} levels", self.max_depth),
            span,
        )
    }

    /// Build a node over children of the given heights.
    fn join(&self, expr: Expr, children: &[usize], span: Span) -> Result<Node, ParseError> {
        let height = 1 + children.iter().copied().max().unwrap_or(0);
        if height > self.max_depth {
            return Err(self.too_deep(span));
        }
        Ok(Node { expr, height })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Grammar
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_disjunction().map(|node| node.expr)
    }

    /// Fail unless every token was consumed.
    pub(crate) fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::at(
                format!("unexpected {} after expression", token.describe()),
                token.span(),
            )),
        }
    }

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        self.parse_disjunction()
    }

    fn parse_left_assoc(
        &mut self,
        table: &[(Op, BinOp)],
        operand: fn(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        let mut left = operand(self)?;
        while let Some((op, span)) = self.eat_binary(table) {
            let right = operand(self)?;
            let heights = [left.height, right.height];
            left = self.join(Expr::binary(op, left.expr, right.expr), &heights, span)?;
        }
        Ok(left)
    }

    fn parse_disjunction(&mut self) -> Result<Node, ParseError> {
        self.parse_left_assoc(DISJUNCTION, Self::parse_conjunction)
    }

    fn parse_conjunction(&mut self) -> Result<Node, ParseError> {
        self.parse_left_assoc(CONJUNCTION, Self::parse_comparison)
    }

    /// Comparisons are non-associative: `a < b < c` is rejected.
    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_coalescing()?;
        let Some((op, span)) = self.eat_binary(COMPARISON) else {
            return Ok(left);
        };
        let right = self.parse_coalescing()?;
        if let Some((_, next)) = self.peek_binary(COMPARISON) {
            return Err(ParseError::at(
                "comparison operators cannot be chained; add parentheses",
                next,
            ));
        }
        let heights = [left.height, right.height];
        self.join(Expr::binary(op, left.expr, right.expr), &heights, span)
    }

    /// `??` is right-associative: `a ?? b ?? c` is `a ?? (b ?? c)`.
    fn parse_coalescing(&mut self) -> Result<Node, ParseError> {
        let primary = self.parse_additive()?;
        let Some(span) = self.eat_op(Op::Coalesce) else {
            return Ok(primary);
        };
        self.descend(span)?;
        let fallback = self.parse_coalescing();
        self.ascend();
        let fallback = fallback?;
        let heights = [primary.height, fallback.height];
        self.join(Expr::coalesce(primary.expr, fallback.expr), &heights, span)
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        self.parse_left_assoc(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        self.parse_left_assoc(MULTIPLICATIVE, Self::parse_prefix)
    }

    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let (op, span) = match self.peek() {
            Some(Token::Op(Op::Minus, span)) => (UnOp::Neg, *span),
            Some(Token::Op(Op::Bang, span)) => (UnOp::Not, *span),
            _ => return self.parse_postfix(),
        };
        self.pos += 1;
        if op == UnOp::Neg {
            if let Some(value) = self.negative_literal() {
                return self.parse_postfix_from(Node::leaf(Expr::Literal(value?)));
            }
        }
        self.descend(span)?;
        let operand = self.parse_prefix();
        self.ascend();
        let operand = operand?;
        self.join(Expr::unary(op, operand.expr), &[operand.height], span)
    }

    /// `-` directly followed by a number literal is a single negative literal.
    fn negative_literal(&mut self) -> Option<Result<Value, ParseError>> {
        let Some(Token::Literal(lit)) = self.peek() else {
            return None;
        };
        let value = literal::decode_negated(lit)?;
        self.pos += 1;
        Some(value)
    }

    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_primary()?;
        self.parse_postfix_from(node)
    }

    fn parse_postfix_from(&mut self, mut node: Node) -> Result<Node, ParseError> {
        while let Some(span) = self.eat_op(Op::Bang) {
            node = self.join(Expr::force_unwrap(node.expr), &[node.height], span)?;
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.error_at_end("expected an expression, found end of input"));
        };

        match token {
            Token::Literal(lit) => literal::decode(&lit).map(|v| Node::leaf(Expr::Literal(v))),
            Token::Ident(ident) => literal::keyword(&ident).map(|v| Node::leaf(Expr::Literal(v))),
            Token::Group(group) => self.parse_group(&group),
            other => Err(ParseError::at(
                format!("expected an expression, found {}", other.describe()),
                other.span(),
            )),
        }
    }

    fn parse_group(&mut self, group: &Group) -> Result<Node, ParseError> {
        if group.delimiter() != Delimiter::Parenthesis {
            return Err(ParseError::at(
                "only parentheses can group expressions",
                group.span_open(),
            ));
        }
        self.descend(group.span_open())?;
        let node = self
            .nested(group)
            .and_then(|mut inner| inner.parse_group_body(group));
        self.ascend();
        node
    }

    /// `(e)` is plain grouping; a top-level comma makes a tuple.
    fn parse_group_body(&mut self, group: &Group) -> Result<Node, ParseError> {
        if self.at_end() {
            return Err(ParseError::at(
                "empty parentheses are not an expression",
                group.span_open(),
            ));
        }

        let first = self.parse_node()?;
        if !self.eat_comma() {
            self.expect_end()?;
            return Ok(first);
        }

        let mut elements = vec![first];
        while !self.at_end() {
            elements.push(self.parse_node()?);
            if !self.eat_comma() {
                break;
            }
        }
        self.expect_end()?;

        let heights: Vec<usize> = elements.iter().map(|n| n.height).collect();
        let exprs = elements.into_iter().map(|n| n.expr).collect();
        self.join(Expr::tuple(exprs), &heights, group.span_open())
    }
}
