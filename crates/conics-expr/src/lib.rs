//! Exact symbolic expression kernel.
//!
//! An interned arena graph of exact expressions: arbitrary-precision
//! rationals, named symbols with assumptions, the imaginary unit, square
//! roots and the trig atoms the conic engine needs. The `Expr` handle is
//! 4 bytes and `Copy`; arithmetic operators on it build nodes in a
//! thread-local graph, so symbolic code reads like scalar code.
//!
//! # Quick start
//!
//! ```
//! use conics_expr::{symbol, Assume, Expr, Truth};
//!
//! let x = symbol("x", Assume::positive());
//! let e = (x + Expr::ONE) * (x - Expr::ONE) - x * x + Expr::ONE;
//! assert_eq!(e.is_zero(), Truth::True); // (x+1)(x-1) = x^2 - 1
//! ```
//!
//! Predicates are three-valued: `Truth::Unknown` is returned whenever the
//! assumptions cannot decide a sign or zero question.

pub mod display;
pub mod eval;
pub mod graph;
pub mod node;
mod ops;
mod poly;
pub mod predicate;
pub mod simplify;

pub use graph::{Assume, ExprGraph, Symbol};
pub use node::Expr;
pub use predicate::{Hint, Sign, Truth};

use std::cell::RefCell;

thread_local! {
    static SESSION: RefCell<ExprGraph> = RefCell::new(ExprGraph::new());
}

/// Access the thread-local expression graph.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut ExprGraph) -> R,
{
    SESSION.with(|g| f(&mut g.borrow_mut()))
}

/// Run a closure with a fresh graph, returning the graph and result.
///
/// Installs a new empty graph, runs `f`, then extracts the graph. Handles
/// created inside are only valid against the returned graph.
pub fn trace<F, R>(f: F) -> (ExprGraph, R)
where
    F: FnOnce() -> R,
{
    SESSION.with(|g| {
        let old = std::mem::take(&mut *g.borrow_mut());
        let result = f();
        let graph = std::mem::replace(&mut *g.borrow_mut(), old);
        (graph, result)
    })
}

/// Create (or look up) a named symbol in the thread-local graph.
pub fn symbol(name: &str, assume: Assume) -> Expr {
    with_session(|g| g.symbol(name, assume))
}

/// Create a sign-carrier symbol: a value known to be +1 or -1.
///
/// `f*f` simplifies to 1 and `f.powi(k)` collapses by parity. This is the
/// opaque result of an undecidable normalization-factor query.
pub fn sign_symbol(name: &str) -> Expr {
    with_session(|g| g.symbol(name, Assume::unit_sign()))
}

impl Expr {
    /// Integer constant in the thread-local graph.
    #[inline]
    pub fn from_int(v: i64) -> Self {
        with_session(|g| g.int(v))
    }

    /// Exact ratio n/d in the thread-local graph.
    #[inline]
    pub fn ratio(n: i64, d: i64) -> Self {
        with_session(|g| g.ratio(n, d))
    }
}
