//! Numeric evaluation of expression graphs.
//!
//! A floating-point backstop for the exact layer: useful in tests to check
//! that a symbolic identity also holds numerically at sample inputs.

use num_traits::ToPrimitive;

use crate::graph::ExprGraph;
use crate::node::{Expr, Node};
use crate::with_session;

impl ExprGraph {
    /// Evaluate an expression with concrete `f64` inputs.
    ///
    /// `inputs[n]` provides the value of the n-th interned symbol, in
    /// creation order. Walks the graph in index order, which is already
    /// topological since children are interned before parents. The
    /// imaginary unit evaluates to NaN; this is a real-valued evaluator.
    pub fn eval(&self, expr: Expr, inputs: &[f64]) -> f64 {
        let n = expr.0 as usize + 1;
        let mut vals: Vec<f64> = Vec::with_capacity(n);

        for i in 0..n {
            let v = match self.node(Expr(i as u32)) {
                Node::Rat(idx) => self.rat_value(idx).to_f64().unwrap_or(f64::NAN),
                Node::Sym(idx) => inputs
                    .get(idx as usize)
                    .copied()
                    .unwrap_or(f64::NAN),
                Node::Imag => f64::NAN,
                Node::Infinity => f64::INFINITY,
                Node::Nan => f64::NAN,
                Node::Add(a, b) => vals[a.0 as usize] + vals[b.0 as usize],
                Node::Mul(a, b) => vals[a.0 as usize] * vals[b.0 as usize],
                Node::Neg(a) => -vals[a.0 as usize],
                Node::Recip(a) => vals[a.0 as usize].recip(),
                Node::Sqrt(a) => vals[a.0 as usize].sqrt(),
                Node::Sin(a) => vals[a.0 as usize].sin(),
                Node::Cos(a) => vals[a.0 as usize].cos(),
                Node::Atan2(y, x) => vals[y.0 as usize].atan2(vals[x.0 as usize]),
            };
            vals.push(v);
        }

        vals[expr.0 as usize]
    }
}

impl Expr {
    /// Evaluate through the thread-local session; see [`ExprGraph::eval`].
    pub fn eval(self, inputs: &[f64]) -> f64 {
        with_session(|g| g.eval(self, inputs))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Assume, ExprGraph};

    #[test]
    fn eval_rationals() {
        let mut g = ExprGraph::new();
        let a = g.ratio(3, 4);
        let b = g.int(4);
        let prod = g.mul(a, b);
        let result = g.eval(prod, &[]);
        assert!((result - 3.0).abs() < 1e-12);
    }

    #[test]
    fn eval_with_symbols() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let y = g.symbol("y", Assume::real());
        let sum = g.add(x, y);
        let prod = g.mul(sum, x);
        // (x + y) * x at x=3, y=4
        let result = g.eval(prod, &[3.0, 4.0]);
        assert!((result - 21.0).abs() < 1e-10);
    }

    #[test]
    fn eval_sqrt() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::nonneg());
        let sq = g.sqrt(x);
        let result = g.eval(sq, &[9.0]);
        assert!((result - 3.0).abs() < 1e-10);
    }

    #[test]
    fn eval_trig_identity() {
        let mut g = ExprGraph::new();
        let t = g.symbol("t", Assume::real());
        let s = g.sin(t);
        let c = g.cos(t);
        let s2 = g.mul(s, s);
        let c2 = g.mul(c, c);
        let sum = g.add(s2, c2);
        let result = g.eval(sum, &[0.7]);
        assert!((result - 1.0).abs() < 1e-12);
    }

    #[test]
    fn eval_imag_is_nan() {
        let g = ExprGraph::new();
        assert!(g.eval(crate::Expr::I, &[]).is_nan());
    }
}
