//! Expression graph with structural interning (automatic CSE).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rustc_hash::FxHashMap;

use crate::node::{Expr, Node};

/// Assumptions attached to a symbol, in the spirit of a CAS assumption
/// system. Each flag means "known to hold"; an unset flag means unknown,
/// not false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assume {
    pub real: bool,
    pub positive: bool,
    pub negative: bool,
    pub nonzero: bool,
    pub nonneg: bool,
    pub nonpos: bool,
    pub integer: bool,
    /// The symbol is +1 or -1; even powers collapse to 1.
    pub unit_sign: bool,
}

impl Assume {
    /// No assumptions (a general complex-valued unknown).
    pub fn none() -> Self {
        Self::default()
    }

    /// Real-valued, nothing else known.
    pub fn real() -> Self {
        Self {
            real: true,
            ..Self::default()
        }
    }

    /// Real and strictly positive.
    pub fn positive() -> Self {
        Self {
            real: true,
            positive: true,
            nonzero: true,
            nonneg: true,
            ..Self::default()
        }
    }

    /// Real and strictly negative.
    pub fn negative() -> Self {
        Self {
            real: true,
            negative: true,
            nonzero: true,
            nonpos: true,
            ..Self::default()
        }
    }

    /// Real and nonzero, sign unknown.
    pub fn nonzero() -> Self {
        Self {
            real: true,
            nonzero: true,
            ..Self::default()
        }
    }

    /// Real and >= 0.
    pub fn nonneg() -> Self {
        Self {
            real: true,
            nonneg: true,
            ..Self::default()
        }
    }

    /// A sign carrier: the symbol is either +1 or -1.
    pub fn unit_sign() -> Self {
        Self {
            real: true,
            nonzero: true,
            unit_sign: true,
            integer: true,
            ..Self::default()
        }
    }
}

/// A named symbol with its assumptions.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub assume: Assume,
}

/// Arena-based expression graph with structural interning.
///
/// Identical subexpressions always return the same `Expr` handle. Exact
/// rationals and symbols live in side tables so nodes stay `Copy`.
pub struct ExprGraph {
    nodes: Vec<Node>,
    intern: FxHashMap<Node, Expr>,
    rats: Vec<BigRational>,
    rat_intern: FxHashMap<BigRational, u32>,
    syms: Vec<Symbol>,
    sym_intern: FxHashMap<String, u32>,
}

impl ExprGraph {
    /// Create a new graph pre-populated with 0, 1, 2, i, infinity, nan.
    pub fn new() -> Self {
        let mut g = Self {
            nodes: Vec::new(),
            intern: FxHashMap::default(),
            rats: Vec::new(),
            rat_intern: FxHashMap::default(),
            syms: Vec::new(),
            sym_intern: FxHashMap::default(),
        };
        let z = g.int(0);
        debug_assert_eq!(z, Expr::ZERO);
        let o = g.int(1);
        debug_assert_eq!(o, Expr::ONE);
        let t = g.int(2);
        debug_assert_eq!(t, Expr::TWO);
        let i = g.insert(Node::Imag);
        debug_assert_eq!(i, Expr::I);
        let inf = g.insert(Node::Infinity);
        debug_assert_eq!(inf, Expr::INFINITY);
        let nan = g.insert(Node::Nan);
        debug_assert_eq!(nan, Expr::NAN);
        g
    }

    /// Total number of nodes in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph is empty (it never is after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up the node for an `Expr`.
    #[inline]
    pub fn node(&self, id: Expr) -> Node {
        self.nodes[id.0 as usize]
    }

    /// The rational value stored at a `Node::Rat` index.
    #[inline]
    pub fn rat_value(&self, idx: u32) -> &BigRational {
        &self.rats[idx as usize]
    }

    /// The rational value of an expression, if it is a rational atom.
    pub fn as_rat(&self, e: Expr) -> Option<&BigRational> {
        match self.node(e) {
            Node::Rat(idx) => Some(self.rat_value(idx)),
            _ => None,
        }
    }

    /// The symbol stored at a `Node::Sym` index.
    #[inline]
    pub fn sym(&self, idx: u32) -> &Symbol {
        &self.syms[idx as usize]
    }

    /// Internal: insert a node, returning its interned handle.
    fn insert(&mut self, node: Node) -> Expr {
        if let Some(&id) = self.intern.get(&node) {
            return id;
        }
        let id = Expr(self.nodes.len() as u32);
        self.nodes.push(node);
        self.intern.insert(node, id);
        id
    }

    /// Create (or reuse) a rational atom.
    pub fn rational(&mut self, v: BigRational) -> Expr {
        let idx = if let Some(&idx) = self.rat_intern.get(&v) {
            idx
        } else {
            let idx = self.rats.len() as u32;
            self.rats.push(v.clone());
            self.rat_intern.insert(v, idx);
            idx
        };
        self.insert(Node::Rat(idx))
    }

    /// Create an integer atom.
    pub fn int(&mut self, v: i64) -> Expr {
        self.rational(BigRational::from_integer(BigInt::from(v)))
    }

    /// Create an exact ratio n/d. Panics on d == 0.
    pub fn ratio(&mut self, n: i64, d: i64) -> Expr {
        assert!(d != 0, "ratio: zero denominator");
        self.rational(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    /// Create (or look up) a named symbol. A name is bound to one symbol
    /// per graph; the assumptions of the first introduction win.
    pub fn symbol(&mut self, name: &str, assume: Assume) -> Expr {
        let idx = if let Some(&idx) = self.sym_intern.get(name) {
            idx
        } else {
            let idx = self.syms.len() as u32;
            self.syms.push(Symbol {
                name: name.to_string(),
                assume,
            });
            self.sym_intern.insert(name.to_string(), idx);
            idx
        };
        self.insert(Node::Sym(idx))
    }

    /// Handle for an existing symbol-table index.
    pub(crate) fn sym_expr(&mut self, idx: u32) -> Expr {
        self.insert(Node::Sym(idx))
    }

    /// Add two expressions. Folds rational operands and additive identities.
    pub fn add(&mut self, a: Expr, b: Expr) -> Expr {
        if a == Expr::NAN || b == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO {
            return b;
        }
        if b == Expr::ZERO {
            return a;
        }
        if let (Some(ra), Some(rb)) = (self.as_rat(a), self.as_rat(b)) {
            let sum = ra + rb;
            return self.rational(sum);
        }
        self.insert(Node::Add(a, b))
    }

    /// Multiply two expressions. Folds rationals, zero and one.
    pub fn mul(&mut self, a: Expr, b: Expr) -> Expr {
        if a == Expr::NAN || b == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO || b == Expr::ZERO {
            // 0 * infinity is undefined.
            let other = if a == Expr::ZERO { b } else { a };
            if self.involves_infinity(other) {
                return Expr::NAN;
            }
            return Expr::ZERO;
        }
        if a == Expr::ONE {
            return b;
        }
        if b == Expr::ONE {
            return a;
        }
        if let (Some(ra), Some(rb)) = (self.as_rat(a), self.as_rat(b)) {
            let prod = ra * rb;
            return self.rational(prod);
        }
        // A unit-sign symbol squares to one.
        if a == b {
            if let Node::Sym(idx) = self.node(a) {
                if self.sym(idx).assume.unit_sign {
                    return Expr::ONE;
                }
            }
        }
        self.insert(Node::Mul(a, b))
    }

    /// Negate an expression.
    pub fn neg(&mut self, a: Expr) -> Expr {
        if a == Expr::NAN {
            return Expr::NAN;
        }
        match self.node(a) {
            Node::Neg(inner) => inner,
            Node::Rat(idx) => {
                let v = -self.rat_value(idx).clone();
                self.rational(v)
            }
            _ => self.insert(Node::Neg(a)),
        }
    }

    /// Reciprocal. 1/0 is infinity, 1/infinity is zero.
    pub fn recip(&mut self, a: Expr) -> Expr {
        if a == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO {
            return Expr::INFINITY;
        }
        if a == Expr::INFINITY {
            return Expr::ZERO;
        }
        match self.node(a) {
            Node::Recip(inner) => inner,
            Node::Rat(idx) => {
                let v = self.rat_value(idx).recip();
                self.rational(v)
            }
            _ => self.insert(Node::Recip(a)),
        }
    }

    /// Principal square root. `sqrt(r)` of a rational folds to an exact
    /// value when possible; `sqrt(-r) = i*sqrt(r)`.
    pub fn sqrt(&mut self, a: Expr) -> Expr {
        if a == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO || a == Expr::ONE || a == Expr::INFINITY {
            return a;
        }
        if let Node::Rat(idx) = self.node(a) {
            let v = self.rat_value(idx).clone();
            return self.sqrt_rational(&v);
        }
        self.insert(Node::Sqrt(a))
    }

    /// sqrt of an exact rational: extract the square part, keep a
    /// squarefree surd, factor out i for negative input.
    fn sqrt_rational(&mut self, v: &BigRational) -> Expr {
        let negative = v.is_negative();
        let abs = v.abs();
        // sqrt(p/q) = sqrt(p*q) / q
        let pq = abs.numer() * abs.denom();
        let (square_root, surd) = split_square(&pq);
        let coeff = BigRational::new(square_root, abs.denom().clone());
        let c = self.rational(coeff);
        let body = if surd.is_one() {
            c
        } else {
            let s = self.rational(BigRational::from_integer(surd));
            let root = self.insert(Node::Sqrt(s));
            self.mul(c, root)
        };
        if negative {
            self.mul(Expr::I, body)
        } else {
            body
        }
    }

    /// Sine.
    pub fn sin(&mut self, a: Expr) -> Expr {
        if a == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO {
            return Expr::ZERO;
        }
        self.insert(Node::Sin(a))
    }

    /// Cosine.
    pub fn cos(&mut self, a: Expr) -> Expr {
        if a == Expr::NAN {
            return Expr::NAN;
        }
        if a == Expr::ZERO {
            return Expr::ONE;
        }
        self.insert(Node::Cos(a))
    }

    /// atan2(y, x).
    pub fn atan2(&mut self, y: Expr, x: Expr) -> Expr {
        if y == Expr::NAN || x == Expr::NAN {
            return Expr::NAN;
        }
        self.insert(Node::Atan2(y, x))
    }

    /// Whether infinity appears anywhere in the expression tree.
    pub(crate) fn involves_infinity(&self, e: Expr) -> bool {
        match self.node(e) {
            Node::Infinity => true,
            Node::Rat(_) | Node::Sym(_) | Node::Imag | Node::Nan => false,
            Node::Add(a, b) | Node::Mul(a, b) | Node::Atan2(a, b) => {
                self.involves_infinity(a) || self.involves_infinity(b)
            }
            Node::Neg(a) | Node::Recip(a) | Node::Sqrt(a) | Node::Sin(a) | Node::Cos(a) => {
                self.involves_infinity(a)
            }
        }
    }

    /// Substitute every occurrence of the symbol `sym` by `replacement`.
    pub fn subst(&mut self, e: Expr, sym: Expr, replacement: Expr) -> Expr {
        let mut memo = FxHashMap::default();
        self.subst_inner(e, sym, replacement, &mut memo)
    }

    fn subst_inner(
        &mut self,
        e: Expr,
        sym: Expr,
        replacement: Expr,
        memo: &mut FxHashMap<Expr, Expr>,
    ) -> Expr {
        if e == sym {
            return replacement;
        }
        if let Some(&cached) = memo.get(&e) {
            return cached;
        }
        let result = match self.node(e) {
            Node::Rat(_) | Node::Sym(_) | Node::Imag | Node::Infinity | Node::Nan => e,
            Node::Add(a, b) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                let sb = self.subst_inner(b, sym, replacement, memo);
                self.add(sa, sb)
            }
            Node::Mul(a, b) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                let sb = self.subst_inner(b, sym, replacement, memo);
                self.mul(sa, sb)
            }
            Node::Neg(a) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                self.neg(sa)
            }
            Node::Recip(a) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                self.recip(sa)
            }
            Node::Sqrt(a) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                self.sqrt(sa)
            }
            Node::Sin(a) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                self.sin(sa)
            }
            Node::Cos(a) => {
                let sa = self.subst_inner(a, sym, replacement, memo);
                self.cos(sa)
            }
            Node::Atan2(y, x) => {
                let sy = self.subst_inner(y, sym, replacement, memo);
                let sx = self.subst_inner(x, sym, replacement, memo);
                self.atan2(sy, sx)
            }
        };
        memo.insert(e, result);
        result
    }
}

impl Default for ExprGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a nonnegative integer n into (k, m) with n = k^2 * m and m
/// squarefree, by trial division.
pub(crate) fn split_square(n: &BigInt) -> (BigInt, BigInt) {
    let mut k = BigInt::one();
    let mut m = BigInt::one();
    let mut rest = n.clone();
    if rest.is_zero() {
        return (BigInt::zero(), BigInt::one());
    }
    let mut p = BigInt::from(2);
    while &p * &p <= rest {
        let mut count = 0u32;
        while (&rest % &p).is_zero() {
            rest /= &p;
            count += 1;
        }
        for _ in 0..count / 2 {
            k *= &p;
        }
        if count % 2 == 1 {
            m *= &p;
        }
        p += 1;
    }
    // rest is 1 or a prime
    m *= rest;
    (k, m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_populated() {
        let g = ExprGraph::new();
        assert_eq!(g.node(Expr::I), Node::Imag);
        assert_eq!(g.node(Expr::NAN), Node::Nan);
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn interning() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let x2 = g.symbol("x", Assume::real());
        assert_eq!(x, x2);

        let a = g.add(x, Expr::ONE);
        let a2 = g.add(x, Expr::ONE);
        assert_eq!(a, a2);
    }

    #[test]
    fn rational_folding() {
        let mut g = ExprGraph::new();
        let a = g.ratio(1, 3);
        let b = g.ratio(2, 3);
        let sum = g.add(a, b);
        assert_eq!(sum, Expr::ONE);

        let third = g.ratio(1, 3);
        let three = g.int(3);
        assert_eq!(g.mul(third, three), Expr::ONE);
    }

    #[test]
    fn sqrt_exact() {
        let mut g = ExprGraph::new();
        let four = g.int(4);
        assert_eq!(g.sqrt(four), Expr::TWO);

        // sqrt(8) = 2*sqrt(2)
        let eight = g.int(8);
        let r = g.sqrt(eight);
        let two = Expr::TWO;
        let s2 = g.sqrt(two);
        let expected = g.mul(two, s2);
        assert_eq!(r, expected);
    }

    #[test]
    fn sqrt_negative_pulls_out_i() {
        let mut g = ExprGraph::new();
        let m1 = g.int(-1);
        assert_eq!(g.sqrt(m1), Expr::I);

        let m4 = g.int(-4);
        let r = g.sqrt(m4);
        let expected = g.mul(Expr::I, Expr::TWO);
        assert_eq!(r, expected);
    }

    #[test]
    fn zero_times_infinity_is_nan() {
        let mut g = ExprGraph::new();
        assert_eq!(g.mul(Expr::ZERO, Expr::INFINITY), Expr::NAN);
        let x = g.symbol("x", Assume::real());
        assert_eq!(g.mul(Expr::ZERO, x), Expr::ZERO);
    }

    #[test]
    fn subst_symbol() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let e = g.mul(x, x);
        let e = g.add(e, Expr::ONE);
        let three = g.int(3);
        let r = g.subst(e, x, three);
        let ten = g.int(10);
        assert_eq!(r, ten);
    }

    #[test]
    fn subst_leaves_unrelated_atoms_alone() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let y = g.symbol("y", Assume::real());
        // y + 2i contains rational, symbol and imaginary atoms, none of
        // which mention x.
        let ti = g.mul(Expr::TWO, Expr::I);
        let e = g.add(y, ti);
        let r = g.subst(e, x, Expr::ONE);
        assert_eq!(r, e);
        assert_eq!(g.subst(Expr::INFINITY, x, Expr::ONE), Expr::INFINITY);
        assert_eq!(g.subst(Expr::NAN, x, Expr::ONE), Expr::NAN);
    }

    #[test]
    fn split_square_works() {
        let (k, m) = split_square(&BigInt::from(72));
        assert_eq!(k, BigInt::from(6));
        assert_eq!(m, BigInt::from(2));
        let (k, m) = split_square(&BigInt::from(17));
        assert_eq!(k, BigInt::from(1));
        assert_eq!(m, BigInt::from(17));
    }
}
