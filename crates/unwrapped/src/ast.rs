//! Expression tree
//!
//! The tree is immutable once built. It can be assembled programmatically
//! through the constructors below or produced by [`crate::frontend::parse`].
//! `Display` renders source text that parses back to the same tree.

use std::fmt;

use crate::Value;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinOp {
    /// Source symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Binding strength of the operator.
    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Or => Precedence::Disjunction,
            BinOp::And => Precedence::Conjunction,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => {
                Precedence::Comparison
            }
            BinOp::Add | BinOp::Sub => Precedence::Additive,
            BinOp::Mul | BinOp::Div | BinOp::Rem => Precedence::Multiplicative,
        }
    }

    /// `==` `!=` `<` `>` `<=` `>=`
    pub fn is_comparison(self) -> bool {
        self.precedence() == Precedence::Comparison
    }

    /// `&&` `||`
    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnOp {
    /// Source symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `a, b` inside a tuple
    Tuple,
    /// `||`
    Disjunction,
    /// `&&`
    Conjunction,
    /// `==` `!=` `<` `>` `<=` `>=`, non-associative
    Comparison,
    /// `??`, right-associative
    Coalescing,
    /// `+` `-`
    Additive,
    /// `*` `/` `%`
    Multiplicative,
    /// `-x` `!x`
    Prefix,
    /// `x!`
    Postfix,
    /// Literals and parenthesised groups
    Primary,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value
    Literal(Value),

    /// `left op right`
    Binary {
        /// Operator
        op: BinOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// `op operand`
    Unary {
        /// Operator
        op: UnOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// `primary ?? fallback`
    Coalesce {
        /// Value used when present
        primary: Box<Expr>,
        /// Value used when the primary is `nil`
        fallback: Box<Expr>,
    },

    /// `operand!`
    ForceUnwrap(Box<Expr>),

    /// `(a, b, ...)`; parsed tuples always have at least one element
    Tuple(Vec<Expr>),
}

impl Expr {
    /// Literal node from anything convertible to a value.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// The `nil` literal.
    pub fn absent() -> Self {
        Expr::Literal(Value::Absent)
    }

    /// Binary node.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Prefix node.
    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// `primary ?? fallback`
    pub fn coalesce(primary: Expr, fallback: Expr) -> Self {
        Expr::Coalesce {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// `operand!`
    pub fn force_unwrap(operand: Expr) -> Self {
        Expr::ForceUnwrap(Box::new(operand))
    }

    /// Tuple node.
    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::Tuple(elements)
    }

    /// Binding strength of this node when rendered.
    pub fn precedence(&self) -> Precedence {
        match self {
            // A negative number renders with a leading `-`
            Expr::Literal(Value::Int(n)) if *n < 0 => Precedence::Prefix,
            Expr::Literal(Value::Float(n)) if n.is_sign_negative() => Precedence::Prefix,
            Expr::Literal(_) | Expr::Tuple(_) => Precedence::Primary,
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => Precedence::Prefix,
            Expr::Coalesce { .. } => Precedence::Coalescing,
            Expr::ForceUnwrap(_) => Precedence::Postfix,
        }
    }
}

/// Write `expr`, parenthesised when it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: Precedence) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Whether the rendering of `expr` begins with an unsigned number literal.
fn starts_with_number(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Value::Int(n)) => *n >= 0,
        Expr::Literal(Value::Float(n)) => !n.is_sign_negative(),
        Expr::ForceUnwrap(operand) => starts_with_number(operand),
        _ => false,
    }
}

/// The next tighter level, used for the side of an operator that may not repeat it.
fn tighter(prec: Precedence) -> Precedence {
    match prec {
        Precedence::Tuple => Precedence::Disjunction,
        Precedence::Disjunction => Precedence::Conjunction,
        Precedence::Conjunction => Precedence::Comparison,
        Precedence::Comparison => Precedence::Coalescing,
        Precedence::Coalescing => Precedence::Additive,
        Precedence::Additive => Precedence::Multiplicative,
        Precedence::Multiplicative => Precedence::Prefix,
        Precedence::Prefix => Precedence::Postfix,
        Precedence::Postfix | Precedence::Primary => Precedence::Primary,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{:?}", value),

            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                // Left-associative, except comparisons which do not chain
                let left_min = if op.is_comparison() { tighter(prec) } else { prec };
                write_operand(f, left, left_min)?;
                write!(f, " {} ", op)?;
                write_operand(f, right, tighter(prec))
            }

            Expr::Unary { op, operand } => {
                write!(f, "{}", op)?;
                // `-` right before a number would read back as a negative literal
                if *op == UnOp::Neg && starts_with_number(operand) {
                    write!(f, "({})", operand)
                } else {
                    write_operand(f, operand, Precedence::Prefix)
                }
            }

            Expr::Coalesce { primary, fallback } => {
                write_operand(f, primary, tighter(Precedence::Coalescing))?;
                write!(f, " ?? ")?;
                write_operand(f, fallback, Precedence::Coalescing)
            }

            Expr::ForceUnwrap(operand) => {
                write_operand(f, operand, Precedence::Postfix)?;
                write!(f, "!")
            }

            Expr::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}
