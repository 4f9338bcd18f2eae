//! Pattern-matched simplification rules.
//!
//! [`ExprGraph::simplify`] is a cheap structural pass: bottom-up rewrites to
//! fixpoint with a memo, never changing the value of the expression.
//! [`ExprGraph::normalized`] is the heavy hammer: it rebuilds the expression
//! from its canonical rational-function form, which cancels everything the
//! polynomial arithmetic can see.

use rustc_hash::FxHashMap;

use crate::graph::ExprGraph;
use crate::node::{Expr, Node};
use crate::poly::{canon, ratfn_to_expr, Canon};
use crate::with_session;

impl ExprGraph {
    /// Simplify an expression by applying rewrite rules to fixpoint.
    ///
    /// Bottom-up: simplify children first, then match parent. Iterates
    /// until no more changes occur.
    pub fn simplify(&mut self, expr: Expr) -> Expr {
        let mut memo = FxHashMap::default();
        self.simplify_inner(expr, &mut memo)
    }

    fn simplify_inner(&mut self, expr: Expr, memo: &mut FxHashMap<Expr, Expr>) -> Expr {
        if let Some(&cached) = memo.get(&expr) {
            return cached;
        }

        // First, simplify children. The smart constructors re-fold rationals
        // and re-apply the construction-time identities on the way back up.
        let simplified_children = match self.node(expr) {
            Node::Rat(_) | Node::Sym(_) | Node::Imag | Node::Infinity | Node::Nan => expr,
            Node::Add(a, b) => {
                let sa = self.simplify_inner(a, memo);
                let sb = self.simplify_inner(b, memo);
                self.add(sa, sb)
            }
            Node::Mul(a, b) => {
                let sa = self.simplify_inner(a, memo);
                let sb = self.simplify_inner(b, memo);
                self.mul(sa, sb)
            }
            Node::Neg(a) => {
                let sa = self.simplify_inner(a, memo);
                self.neg(sa)
            }
            Node::Recip(a) => {
                let sa = self.simplify_inner(a, memo);
                self.recip(sa)
            }
            Node::Sqrt(a) => {
                let sa = self.simplify_inner(a, memo);
                self.sqrt(sa)
            }
            Node::Sin(a) => {
                let sa = self.simplify_inner(a, memo);
                self.sin(sa)
            }
            Node::Cos(a) => {
                let sa = self.simplify_inner(a, memo);
                self.cos(sa)
            }
            Node::Atan2(y, x) => {
                let sy = self.simplify_inner(y, memo);
                let sx = self.simplify_inner(x, memo);
                self.atan2(sy, sx)
            }
        };

        // Now apply rewrite rules on the node with simplified children
        let result = self.rewrite(simplified_children);

        // If rewrite changed something, simplify again (fixpoint)
        let final_result = if result != simplified_children {
            self.simplify_inner(result, memo)
        } else {
            result
        };

        memo.insert(expr, final_result);
        final_result
    }

    /// Apply one round of rewrite rules.
    fn rewrite(&mut self, expr: Expr) -> Expr {
        match self.node(expr) {
            // Add(x, Neg(x)) → ZERO, unless x can be infinite (∞ - ∞ is NaN).
            Node::Add(a, b) => {
                if let Node::Neg(inner) = self.node(b) {
                    if inner == a && !self.involves_infinity(a) {
                        return Expr::ZERO;
                    }
                }
                if let Node::Neg(inner) = self.node(a) {
                    if inner == b && !self.involves_infinity(b) {
                        return Expr::ZERO;
                    }
                }
                expr
            }

            Node::Mul(a, b) => {
                // Mul(i, i) → -1
                if a == Expr::I && b == Expr::I {
                    return self.int(-1);
                }
                // Mul(x, Recip(x)) → ONE, only for provably nonzero x.
                if let Node::Recip(inner) = self.node(b) {
                    if inner == a && self.is_nonzero(a).is_true() {
                        return Expr::ONE;
                    }
                }
                if let Node::Recip(inner) = self.node(a) {
                    if inner == b && self.is_nonzero(b).is_true() {
                        return Expr::ONE;
                    }
                }
                // Mul(Sqrt(x), Sqrt(x)) → x for real nonnegative x.
                if let (Node::Sqrt(ra), Node::Sqrt(rb)) = (self.node(a), self.node(b)) {
                    if ra == rb && self.is_nonneg(ra).is_true() {
                        return ra;
                    }
                }
                expr
            }

            // Neg(Infinity) → Infinity (the unsigned point at infinity).
            Node::Neg(a) if a == Expr::INFINITY => Expr::INFINITY,

            _ => expr,
        }
    }

    /// Rebuild an expression from its canonical rational-function form.
    ///
    /// This is a full normalization: equal expressions come back as the same
    /// handle, so it doubles as a decision procedure for equality of values
    /// the canonical form covers.
    pub fn normalized(&mut self, e: Expr) -> Expr {
        match canon(self, e) {
            Canon::Fin { num, den } => ratfn_to_expr(self, &num, &den),
            Canon::Inf => Expr::INFINITY,
            Canon::Nan => Expr::NAN,
        }
    }
}

impl Expr {
    /// Full canonical normalization; see [`ExprGraph::normalized`].
    pub fn normalized(self) -> Expr {
        with_session(|g| g.normalized(self))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Assume, ExprGraph};
    use crate::node::Expr;

    #[test]
    fn simplify_cancel_add_neg() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let nx = g.neg(x);
        let sum = g.add(x, nx);
        assert_eq!(g.simplify(sum), Expr::ZERO);
    }

    #[test]
    fn simplify_keeps_possibly_infinite_difference() {
        let mut g = ExprGraph::new();
        let ninf = g.neg(Expr::INFINITY);
        let sum = g.add(Expr::INFINITY, ninf);
        assert_ne!(g.simplify(sum), Expr::ZERO);
    }

    #[test]
    fn simplify_cancel_mul_recip_needs_nonzero() {
        let mut g = ExprGraph::new();
        let a = g.symbol("a", Assume::positive());
        let ra = g.recip(a);
        let prod = g.mul(a, ra);
        assert_eq!(g.simplify(prod), Expr::ONE);

        let x = g.symbol("x", Assume::real());
        let rx = g.recip(x);
        let prod = g.mul(x, rx);
        assert_ne!(g.simplify(prod), Expr::ONE);
    }

    #[test]
    fn simplify_i_squared() {
        let mut g = ExprGraph::new();
        let ii = g.mul(Expr::I, Expr::I);
        let s = g.simplify(ii);
        assert_eq!(g.as_rat(s).map(|r| r.to_string()), Some("-1".to_string()));
    }

    #[test]
    fn normalized_merges_equal_forms() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        // (x+1)² and x² + 2x + 1 normalize to the same handle.
        let one = Expr::ONE;
        let xp1 = g.add(x, one);
        let sq = g.mul(xp1, xp1);
        let x2 = g.mul(x, x);
        let two = Expr::TWO;
        let twox = g.mul(two, x);
        let t = g.add(x2, twox);
        let expanded = g.add(t, one);
        let na = g.normalized(sq);
        let nb = g.normalized(expanded);
        assert_eq!(na, nb);
    }

    #[test]
    fn normalized_cancels_common_factor() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        // x²/x normalizes to x (as a rational function).
        let x2 = g.mul(x, x);
        let rx = g.recip(x);
        let q = g.mul(x2, rx);
        assert_eq!(g.normalized(q), x);
    }
}
