//! Pretty-printing for expressions.

use crate::graph::ExprGraph;
use crate::node::{Expr, Node};
use crate::with_session;

impl ExprGraph {
    /// Format an expression as a human-readable string.
    pub fn fmt_expr(&self, expr: Expr) -> String {
        match self.node(expr) {
            Node::Rat(idx) => {
                let r = self.rat_value(idx);
                if r.is_integer() {
                    format!("{}", r.numer())
                } else {
                    format!("{}/{}", r.numer(), r.denom())
                }
            }
            Node::Sym(idx) => self.sym(idx).name.clone(),
            Node::Imag => "i".to_string(),
            Node::Infinity => "inf".to_string(),
            Node::Nan => "nan".to_string(),
            Node::Add(a, b) => {
                // Fold a negated right operand into a subtraction.
                if let Node::Neg(inner) = self.node(b) {
                    return format!("({} - {})", self.fmt_expr(a), self.fmt_expr(inner));
                }
                format!("({} + {})", self.fmt_expr(a), self.fmt_expr(b))
            }
            Node::Mul(a, b) => {
                if let Node::Recip(inner) = self.node(b) {
                    return format!("({} / {})", self.fmt_expr(a), self.fmt_expr(inner));
                }
                format!("({} * {})", self.fmt_expr(a), self.fmt_expr(b))
            }
            Node::Neg(a) => format!("(-{})", self.fmt_expr(a)),
            Node::Recip(a) => format!("(1 / {})", self.fmt_expr(a)),
            Node::Sqrt(a) => format!("sqrt({})", self.fmt_expr(a)),
            Node::Sin(a) => format!("sin({})", self.fmt_expr(a)),
            Node::Cos(a) => format!("cos({})", self.fmt_expr(a)),
            Node::Atan2(y, x) => {
                format!("atan2({}, {})", self.fmt_expr(y), self.fmt_expr(x))
            }
        }
    }
}

impl Expr {
    /// Render through the thread-local session; see [`ExprGraph::fmt_expr`].
    pub fn render(self) -> String {
        with_session(|g| g.fmt_expr(self))
    }
}
