//! Value representation for runtime values

mod display;
mod impls;
mod kind;

pub use kind::{Kind, Shape};

use std::sync::Arc;

/// Runtime value representation for the sandbox.
///
/// Absence is an ordinary variant: `nil` is a value that can be compared,
/// coalesced and force-unwrapped, never a null reference.
#[derive(Clone, PartialEq)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// No value (`nil`)
    Absent,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Heap-Allocated Types
    // ═══════════════════════════════════════════════════════════════════
    /// Immutable text
    Text(Arc<String>),

    /// Tuple (heterogeneous, fixed-size)
    ///
    /// The parser only builds tuples with at least one element; an empty
    /// tuple can be constructed directly and renders as `()`, which does
    /// not parse back.
    Tuple(Arc<Vec<Value>>),
}
