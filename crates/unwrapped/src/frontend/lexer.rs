//! Operator tokens on top of proc-macro2 token trees

use proc_macro2::{Group, Ident, Literal, Spacing, Span, TokenStream, TokenTree};

use super::ParseError;

/// Operator symbols understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Coalesce,
    Bang,
}

impl Op {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Percent => "%",
            Op::EqEq => "==",
            Op::NotEq => "!=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Ge => ">=",
            Op::AndAnd => "&&",
            Op::OrOr => "||",
            Op::Coalesce => "??",
            Op::Bang => "!",
        }
    }

    fn single(c: char) -> Option<Op> {
        Some(match c {
            '+' => Op::Plus,
            '-' => Op::Minus,
            '*' => Op::Star,
            '/' => Op::Slash,
            '%' => Op::Percent,
            '<' => Op::Lt,
            '>' => Op::Gt,
            '!' => Op::Bang,
            _ => return None,
        })
    }

    fn pair(first: char, second: char) -> Option<Op> {
        Some(match (first, second) {
            ('=', '=') => Op::EqEq,
            ('!', '=') => Op::NotEq,
            ('<', '=') => Op::Le,
            ('>', '=') => Op::Ge,
            ('&', '&') => Op::AndAnd,
            ('|', '|') => Op::OrOr,
            ('?', '?') => Op::Coalesce,
            _ => return None,
        })
    }
}

/// A token as seen by the parser.
#[derive(Debug, Clone)]
pub(crate) enum Token {
    Op(Op, Span),
    Comma(Span),
    Literal(Literal),
    Ident(Ident),
    Group(Group),
}

impl Token {
    pub(crate) fn span(&self) -> Span {
        match self {
            Token::Op(_, span) | Token::Comma(span) => *span,
            Token::Literal(lit) => lit.span(),
            Token::Ident(ident) => ident.span(),
            Token::Group(group) => group.span(),
        }
    }

    /// Short description for diagnostics.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Op(op, _) => format!("`{}`", op.symbol()),
            Token::Comma(_) => "`,`".to_string(),
            Token::Literal(lit) => format!("`{}`", lit),
            Token::Ident(ident) => format!("`{}`", ident),
            Token::Group(_) => "a parenthesized group".to_string(),
        }
    }
}

/// Flatten one level of token trees, joining two-character operators.
///
/// Nested groups stay whole; the parser tokenizes them when it enters them.
pub(crate) fn tokenize(stream: TokenStream) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut trees = stream.into_iter().peekable();

    while let Some(tree) = trees.next() {
        let punct = match tree {
            TokenTree::Group(group) => {
                tokens.push(Token::Group(group));
                continue;
            }
            TokenTree::Ident(ident) => {
                tokens.push(Token::Ident(ident));
                continue;
            }
            TokenTree::Literal(lit) => {
                tokens.push(Token::Literal(lit));
                continue;
            }
            TokenTree::Punct(punct) => punct,
        };

        let c = punct.as_char();
        let span = punct.span();
        if c == ',' {
            tokens.push(Token::Comma(span));
            continue;
        }

        if punct.spacing() == Spacing::Joint {
            let joined = match trees.peek() {
                Some(TokenTree::Punct(next)) => Op::pair(c, next.as_char()),
                _ => None,
            };
            if let Some(op) = joined {
                trees.next();
                tokens.push(Token::Op(op, span));
                continue;
            }
        }

        match Op::single(c) {
            Some(op) => tokens.push(Token::Op(op, span)),
            None => return Err(ParseError::at(unexpected_punct(c), span)),
        }
    }

    Ok(tokens)
}

fn unexpected_punct(c: char) -> String {
    match c {
        '=' => "unexpected `=`; use `==` to compare".to_string(),
        '?' => "unexpected `?`; nil-coalescing is written `??`".to_string(),
        '&' => "unexpected `&`; logical and is written `&&`".to_string(),
        '|' => "unexpected `|`; logical or is written `||`".to_string(),
        other => format!("unexpected character `{}`", other),
    }
}
