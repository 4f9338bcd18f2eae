//! Canonical rational-function form.
//!
//! Every expression normalizes to numerator/denominator polynomials over ℚ
//! in a small set of generators: symbols, squarefree surds, symbolic square
//! roots, the imaginary unit and trig atoms. The reductions `i² = -1`,
//! `surd(n)² = n`, `sqrt(e)² = e` and `cos(t)² = 1 - sin(t)²` are applied
//! during monomial multiplication, so two expressions are equal exactly
//! when their canonical numerators cross-multiply to the same polynomial.
//! This form is the ground truth for the three-valued predicates and for
//! polynomial coefficient extraction.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rustc_hash::FxHashMap;

use crate::graph::{split_square, ExprGraph};
use crate::node::{Expr, Node};

/// A generator: an atom treated as an indeterminate of the polynomial ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Gen {
    /// Symbol by table index.
    Sym(u32),
    /// The imaginary unit; exponent is always 0 or 1 after reduction.
    Imag,
    /// sqrt of a canonical radicand. Rational radicands are squarefree
    /// positive integers (the graph folds the square part out).
    Sqrt(Expr),
    Sin(Expr),
    /// Exponent is always 0 or 1 after the cos² reduction.
    Cos(Expr),
    Atan2(Expr, Expr),
}

/// A monomial: sorted generators with positive exponents.
pub(crate) type Mono = Vec<(Gen, u32)>;

/// Multivariate polynomial over ℚ in the generators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct Poly {
    pub(crate) terms: BTreeMap<Mono, BigRational>,
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn one() -> Self {
        Self::from_rat(BigRational::one())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn from_rat(r: BigRational) -> Self {
        let mut p = Self::zero();
        if !r.is_zero() {
            p.terms.insert(Vec::new(), r);
        }
        p
    }

    pub(crate) fn from_gen(gen: Gen) -> Self {
        let mut p = Self::zero();
        p.terms.insert(vec![(gen, 1)], BigRational::one());
        p
    }

    fn insert_term(&mut self, mono: Mono, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.entry(mono) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(coeff);
            }
            std::collections::btree_map::Entry::Occupied(mut e) => {
                let sum = e.get() + &coeff;
                if sum.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
        }
    }

    pub(crate) fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.insert_term(m.clone(), c.clone());
        }
        out
    }

    pub(crate) fn neg(&self) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            out.terms.insert(m.clone(), -c.clone());
        }
        out
    }

    pub(crate) fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.neg())
    }

    pub(crate) fn mul(&self, other: &Poly, g: &mut ExprGraph) -> Poly {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                let term = mul_term(g, m1, c1, m2, c2);
                out = out.add(&term);
            }
        }
        out
    }

    pub(crate) fn pow(&self, n: u32, g: &mut ExprGraph) -> Poly {
        let mut out = Poly::one();
        for _ in 0..n {
            out = out.mul(self, g);
        }
        out
    }

    /// The polynomial as a single rational constant, if it is one.
    pub(crate) fn as_rat(&self) -> Option<&BigRational> {
        if self.terms.len() == 1 {
            let (m, c) = self.terms.iter().next().unwrap();
            if m.is_empty() {
                return Some(c);
            }
        }
        None
    }

    pub(crate) fn is_one(&self) -> bool {
        self.as_rat().map(|r| r.is_one()).unwrap_or(false)
    }

    /// Positive rational content (gcd of coefficient magnitudes) and
    /// whether every coefficient is negative.
    pub(crate) fn content(&self) -> (BigRational, bool) {
        let mut cont: Option<BigRational> = None;
        let mut all_neg = true;
        for c in self.terms.values() {
            if !c.is_negative() {
                all_neg = false;
            }
            let a = c.abs();
            cont = Some(match cont {
                None => a,
                Some(prev) => rat_gcd(&prev, &a),
            });
        }
        (cont.unwrap_or_else(BigRational::one), all_neg && !self.terms.is_empty())
    }

    /// Divide every coefficient by a rational (exact).
    pub(crate) fn div_rat(&self, r: &BigRational) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            out.terms.insert(m.clone(), c / r);
        }
        out
    }
}

/// gcd of two nonnegative rationals: gcd of numerators over lcm of
/// denominators.
fn rat_gcd(a: &BigRational, b: &BigRational) -> BigRational {
    let gn = big_gcd(a.numer(), b.numer());
    let gd = big_gcd(a.denom(), b.denom());
    let lcm = a.denom() * b.denom() / &gd;
    BigRational::new(gn, lcm)
}

fn big_gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Multiply two monomial terms, applying the generator reductions.
fn mul_term(g: &mut ExprGraph, m1: &Mono, c1: &BigRational, m2: &Mono, c2: &BigRational) -> Poly {
    let mut coeff = c1 * c2;
    let mut exps: BTreeMap<Gen, u32> = BTreeMap::new();
    for (gen, e) in m1.iter().chain(m2.iter()) {
        *exps.entry(*gen).or_insert(0) += e;
    }

    let mut mono: Mono = Vec::new();
    let mut surds: Vec<BigInt> = Vec::new();
    // Polynomial factors produced by sqrt(e)² = e and cos² = 1 - sin².
    let mut factors: Vec<Poly> = Vec::new();

    for (gen, mut e) in exps {
        // Unit-sign symbols square to one.
        if let Gen::Sym(idx) = gen {
            if g.sym(idx).assume.unit_sign {
                e %= 2;
                if e == 0 {
                    continue;
                }
            }
        }
        match gen {
            Gen::Imag => {
                // i^e: fold pairs into the coefficient sign.
                if (e / 2) % 2 == 1 {
                    coeff = -coeff;
                }
                if e % 2 == 1 {
                    mono.push((Gen::Imag, 1));
                }
            }
            Gen::Sqrt(r) => {
                if let Some(n) = g.as_rat(r).cloned() {
                    // surd(n)^e = n^(e/2) * surd(n)^(e%2)
                    for _ in 0..e / 2 {
                        coeff *= &n;
                    }
                    if e % 2 == 1 {
                        surds.push(n.to_integer());
                    }
                } else {
                    if e / 2 > 0 {
                        let rad = radicand_poly(g, r);
                        for _ in 0..e / 2 {
                            factors.push(rad.clone());
                        }
                    }
                    if e % 2 == 1 {
                        mono.push((Gen::Sqrt(r), 1));
                    }
                }
            }
            Gen::Cos(t) => {
                if e / 2 > 0 {
                    let mut s2 = Poly::zero();
                    s2.terms.insert(vec![(Gen::Sin(t), 2)], BigRational::one());
                    let one_minus = Poly::one().sub(&s2);
                    factors.push(one_minus.pow(e / 2, g));
                }
                if e % 2 == 1 {
                    mono.push((Gen::Cos(t), 1));
                }
            }
            other => mono.push((other, e)),
        }
    }

    // Combine rational surds: surd(a)*surd(b) = gcd * surd(a' * b').
    if !surds.is_empty() {
        let mut acc = BigInt::one();
        for s in surds {
            let d = big_gcd(&acc, &s);
            coeff *= BigRational::from_integer(d.clone());
            acc = (acc / &d) * (s / &d);
        }
        if !acc.is_one() {
            let e = g.rational(BigRational::from_integer(acc));
            mono.push((Gen::Sqrt(e), 1));
        }
    }

    mono.sort();
    let mut term = Poly::zero();
    term.insert_term(mono, coeff);
    for f in factors {
        term = term.mul(&f, g);
    }
    term
}

/// Canonical polynomial of a symbolic sqrt radicand (denominators were
/// cleared when the generator was created).
fn radicand_poly(g: &mut ExprGraph, r: Expr) -> Poly {
    match canon(g, r) {
        Canon::Fin { num, den } => {
            debug_assert!(den.is_one(), "sqrt radicand with uncancelled denominator");
            num
        }
        _ => Poly::from_gen(Gen::Sqrt(r)), // unreachable for well-formed graphs
    }
}

/// Canonical form of an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Canon {
    Fin { num: Poly, den: Poly },
    Inf,
    Nan,
}

impl Canon {
    fn from_poly(num: Poly) -> Self {
        Self::Fin {
            num,
            den: Poly::one(),
        }
    }
}

/// Normalize an expression to canonical form.
pub(crate) fn canon(g: &mut ExprGraph, e: Expr) -> Canon {
    let mut memo = FxHashMap::default();
    match canon_inner(g, e, &mut memo) {
        Canon::Fin { num, den } => {
            let (num, den) = cancel_common(num, den);
            Canon::Fin { num, den }
        }
        other => other,
    }
}

/// Reduce num/den as a rational function: cancel the shared rational content
/// and the shared monomial factor, then orient the pair so the denominator's
/// terms are not all negative.
fn cancel_common(num: Poly, den: Poly) -> (Poly, Poly) {
    if num.is_zero() {
        return (num, Poly::one());
    }
    let (cn, _) = num.content();
    let (cd, _) = den.content();
    let c = rat_gcd(&cn, &cd);
    let mut num = num.div_rat(&c);
    let mut den = den.div_rat(&c);
    let mut common: Option<Mono> = None;
    for mono in num.terms.keys().chain(den.terms.keys()) {
        common = Some(match common {
            None => mono.clone(),
            Some(prev) => prev
                .iter()
                .filter_map(|&(gen, e)| {
                    mono.iter()
                        .find(|&&(h, _)| h == gen)
                        .map(|&(_, f)| (gen, e.min(f)))
                })
                .collect(),
        });
    }
    if let Some(common) = common.filter(|c| !c.is_empty()) {
        num = strip_mono(&num, &common);
        den = strip_mono(&den, &common);
    }
    let (_, den_all_neg) = den.content();
    if den_all_neg {
        num = num.neg();
        den = den.neg();
    }
    (num, den)
}

/// Divide every term by a monomial known to divide all of them.
fn strip_mono(p: &Poly, common: &Mono) -> Poly {
    let mut out = Poly::zero();
    for (mono, coeff) in &p.terms {
        let reduced: Mono = mono
            .iter()
            .filter_map(|&(gen, e)| {
                let drop = common
                    .iter()
                    .find(|&&(h, _)| h == gen)
                    .map(|&(_, f)| f)
                    .unwrap_or(0);
                let left = e - drop;
                (left > 0).then_some((gen, left))
            })
            .collect();
        out.terms.insert(reduced, coeff.clone());
    }
    out
}

fn canon_inner(g: &mut ExprGraph, e: Expr, memo: &mut FxHashMap<Expr, Canon>) -> Canon {
    if let Some(c) = memo.get(&e) {
        return c.clone();
    }
    let result = match g.node(e) {
        Node::Rat(idx) => Canon::from_poly(Poly::from_rat(g.rat_value(idx).clone())),
        Node::Sym(idx) => Canon::from_poly(Poly::from_gen(Gen::Sym(idx))),
        Node::Imag => Canon::from_poly(Poly::from_gen(Gen::Imag)),
        Node::Infinity => Canon::Inf,
        Node::Nan => Canon::Nan,
        Node::Add(a, b) => {
            let ca = canon_inner(g, a, memo);
            let cb = canon_inner(g, b, memo);
            canon_add(g, ca, cb)
        }
        Node::Mul(a, b) => {
            let ca = canon_inner(g, a, memo);
            let cb = canon_inner(g, b, memo);
            canon_mul(g, ca, cb)
        }
        Node::Neg(a) => match canon_inner(g, a, memo) {
            Canon::Fin { num, den } => Canon::Fin {
                num: num.neg(),
                den,
            },
            other => other,
        },
        Node::Recip(a) => match canon_inner(g, a, memo) {
            Canon::Fin { num, den } => {
                if num.is_zero() {
                    Canon::Inf
                } else {
                    Canon::Fin { num: den, den: num }
                }
            }
            Canon::Inf => Canon::from_poly(Poly::zero()),
            Canon::Nan => Canon::Nan,
        },
        Node::Sqrt(a) => match canon_inner(g, a, memo) {
            Canon::Fin { num, den } => canon_sqrt(g, num, den),
            other => other,
        },
        Node::Sin(a) => match canon_inner(g, a, memo) {
            Canon::Fin { num, den } => {
                if num.is_zero() {
                    Canon::from_poly(Poly::zero())
                } else {
                    let key = ratfn_to_expr(g, &num, &den);
                    Canon::from_poly(Poly::from_gen(Gen::Sin(key)))
                }
            }
            _ => Canon::Nan,
        },
        Node::Cos(a) => match canon_inner(g, a, memo) {
            Canon::Fin { num, den } => {
                if num.is_zero() {
                    Canon::from_poly(Poly::one())
                } else {
                    let key = ratfn_to_expr(g, &num, &den);
                    Canon::from_poly(Poly::from_gen(Gen::Cos(key)))
                }
            }
            _ => Canon::Nan,
        },
        Node::Atan2(y, x) => {
            let cy = canon_inner(g, y, memo);
            let cx = canon_inner(g, x, memo);
            match (cy, cx) {
                (Canon::Fin { num: ny, den: dy }, Canon::Fin { num: nx, den: dx }) => {
                    let y_zero = ny.is_zero();
                    let x_pos = {
                        let (_, s) = ratfn_sign(g, &nx, &dx);
                        s == SignClass::Pos
                    };
                    if y_zero && x_pos {
                        Canon::from_poly(Poly::zero())
                    } else {
                        let ky = ratfn_to_expr(g, &ny, &dy);
                        let kx = ratfn_to_expr(g, &nx, &dx);
                        Canon::from_poly(Poly::from_gen(Gen::Atan2(ky, kx)))
                    }
                }
                _ => Canon::Nan,
            }
        }
    };
    memo.insert(e, result.clone());
    result
}

fn canon_add(g: &mut ExprGraph, a: Canon, b: Canon) -> Canon {
    match (a, b) {
        (Canon::Nan, _) | (_, Canon::Nan) => Canon::Nan,
        // Unsigned infinity: any sum involving it stays infinite.
        (Canon::Inf, _) | (_, Canon::Inf) => Canon::Inf,
        (Canon::Fin { num: n1, den: d1 }, Canon::Fin { num: n2, den: d2 }) => {
            if d1 == d2 {
                return Canon::Fin {
                    num: n1.add(&n2),
                    den: d1,
                };
            }
            let num = n1.mul(&d2, g).add(&n2.mul(&d1, g));
            let den = d1.mul(&d2, g);
            Canon::Fin { num, den }
        }
    }
}

fn canon_mul(g: &mut ExprGraph, a: Canon, b: Canon) -> Canon {
    match (a, b) {
        (Canon::Nan, _) | (_, Canon::Nan) => Canon::Nan,
        (Canon::Inf, Canon::Fin { num, .. }) | (Canon::Fin { num, .. }, Canon::Inf) => {
            if num.is_zero() {
                Canon::Nan
            } else {
                Canon::Inf
            }
        }
        (Canon::Inf, Canon::Inf) => Canon::Inf,
        (Canon::Fin { num: n1, den: d1 }, Canon::Fin { num: n2, den: d2 }) => Canon::Fin {
            num: n1.mul(&n2, g),
            den: d1.mul(&d2, g),
        },
    }
}

/// sqrt of num/den: clear the denominator, pull out the square part of the
/// rational content, factor i from an all-negative radicand (principal
/// branch), and keep a generator for whatever remains.
fn canon_sqrt(g: &mut ExprGraph, num: Poly, den: Poly) -> Canon {
    if num.is_zero() {
        return Canon::from_poly(Poly::zero());
    }
    // sqrt(n/d) = sqrt(n*d)/d
    let rad = num.mul(&den, g);
    let (content, all_neg) = rad.content();
    let signed_content = if all_neg { -content.clone() } else { content.clone() };
    let primitive = rad.div_rat(&signed_content);

    // sqrt(content) = (k/cd) * surd(m) with content = cn/cd, cn*cd = k² m.
    let cn_cd = content.numer() * content.denom();
    let (k, m) = split_square(&cn_cd);
    let mut out = Poly::from_rat(BigRational::new(k, content.denom().clone()));
    if !m.is_one() {
        let me = g.rational(BigRational::from_integer(m));
        out = out.mul(&Poly::from_gen(Gen::Sqrt(me)), g);
    }
    if all_neg {
        out = out.mul(&Poly::from_gen(Gen::Imag), g);
    }
    if !primitive.is_one() {
        let key = poly_to_expr(g, &primitive);
        out = out.mul(&Poly::from_gen(Gen::Sqrt(key)), g);
    }
    Canon::Fin { num: out, den }
}

/// Rebuild a canonical expression from a polynomial.
pub(crate) fn poly_to_expr(g: &mut ExprGraph, p: &Poly) -> Expr {
    let mut sum = Expr::ZERO;
    for (mono, coeff) in &p.terms {
        let mut term = g.rational(coeff.clone());
        for (gen, e) in mono {
            let ge = gen_to_expr(g, *gen);
            for _ in 0..*e {
                term = g.mul(term, ge);
            }
        }
        sum = g.add(sum, term);
    }
    sum
}

fn gen_to_expr(g: &mut ExprGraph, gen: Gen) -> Expr {
    match gen {
        Gen::Sym(idx) => g.sym_expr(idx),
        Gen::Imag => Expr::I,
        Gen::Sqrt(r) => g.sqrt(r),
        Gen::Sin(t) => g.sin(t),
        Gen::Cos(t) => g.cos(t),
        Gen::Atan2(y, x) => g.atan2(y, x),
    }
}

pub(crate) fn ratfn_to_expr(g: &mut ExprGraph, num: &Poly, den: &Poly) -> Expr {
    let n = poly_to_expr(g, num);
    if den.is_one() {
        n
    } else {
        let d = poly_to_expr(g, den);
        let rd = g.recip(d);
        g.mul(n, rd)
    }
}

// --- Sign analysis over canonical polynomials ---

/// Sign classification of a real quantity. `Unknown` means the assumptions
/// cannot decide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SignClass {
    Zero,
    Pos,
    Neg,
    NonNeg,
    NonPos,
    NonZero,
    Unknown,
}

use crate::predicate::Truth;

/// (is_real, sign) of a single generator.
pub(crate) fn gen_sign(g: &mut ExprGraph, gen: Gen) -> (Truth, SignClass) {
    match gen {
        Gen::Sym(idx) => {
            let a = g.sym(idx).assume;
            let real = if a.real { Truth::True } else { Truth::Unknown };
            let sign = if a.positive {
                SignClass::Pos
            } else if a.negative {
                SignClass::Neg
            } else if a.nonzero {
                SignClass::NonZero
            } else if a.nonneg {
                SignClass::NonNeg
            } else if a.nonpos {
                SignClass::NonPos
            } else {
                SignClass::Unknown
            };
            (real, sign)
        }
        Gen::Imag => (Truth::False, SignClass::Unknown),
        Gen::Sqrt(r) => {
            if g.as_rat(r).is_some() {
                // squarefree positive integer
                return (Truth::True, SignClass::Pos);
            }
            match canon(g, r) {
                Canon::Fin { num, den } => {
                    let (real, s) = ratfn_sign(g, &num, &den);
                    match s {
                        SignClass::Pos => (real, SignClass::Pos),
                        SignClass::Zero => (real, SignClass::Zero),
                        SignClass::NonNeg => (real, SignClass::NonNeg),
                        SignClass::Neg => (Truth::False, SignClass::Unknown),
                        _ => (Truth::Unknown, SignClass::Unknown),
                    }
                }
                _ => (Truth::Unknown, SignClass::Unknown),
            }
        }
        Gen::Sin(t) | Gen::Cos(t) => {
            let real = expr_is_real(g, t);
            (real, SignClass::Unknown)
        }
        Gen::Atan2(y, x) => {
            let ry = expr_is_real(g, y);
            let rx = expr_is_real(g, x);
            (ry.and(rx), SignClass::Unknown)
        }
    }
}

pub(crate) fn expr_is_real(g: &mut ExprGraph, e: Expr) -> Truth {
    match canon(g, e) {
        Canon::Fin { num, den } => {
            let (rn, _) = poly_sign(g, &num);
            let (rd, _) = poly_sign(g, &den);
            rn.and(rd)
        }
        Canon::Inf => Truth::False,
        Canon::Nan => Truth::Unknown,
    }
}

fn mul_class(a: SignClass, b: SignClass) -> SignClass {
    use SignClass::*;
    match (a, b) {
        (Zero, _) | (_, Zero) => Zero,
        (Pos, x) | (x, Pos) => x,
        (Neg, Neg) => Pos,
        (Neg, NonNeg) | (NonNeg, Neg) => NonPos,
        (Neg, NonPos) | (NonPos, Neg) => NonNeg,
        (Neg, NonZero) | (NonZero, Neg) => NonZero,
        (Neg, Unknown) | (Unknown, Neg) => Unknown,
        (NonZero, NonZero) => NonZero,
        (NonNeg, NonNeg) | (NonPos, NonPos) => NonNeg,
        (NonNeg, NonPos) | (NonPos, NonNeg) => NonPos,
        _ => Unknown,
    }
}

fn add_class(a: SignClass, b: SignClass) -> SignClass {
    use SignClass::*;
    match (a, b) {
        (Zero, x) | (x, Zero) => x,
        (Pos, Pos) | (Pos, NonNeg) | (NonNeg, Pos) => Pos,
        (NonNeg, NonNeg) => NonNeg,
        (Neg, Neg) | (Neg, NonPos) | (NonPos, Neg) => Neg,
        (NonPos, NonPos) => NonPos,
        _ => Unknown,
    }
}

/// Square of a sign class (even powers).
fn square_class(s: SignClass) -> SignClass {
    use SignClass::*;
    match s {
        Zero => Zero,
        Pos | Neg | NonZero => Pos,
        NonNeg | NonPos | Unknown => NonNeg,
    }
}

/// (is_real, sign) of one term. The sign is only meaningful when real.
fn term_sign(g: &mut ExprGraph, mono: &Mono, coeff: &BigRational) -> (Truth, SignClass) {
    let mut real = Truth::True;
    let mut sign = if coeff.is_positive() {
        SignClass::Pos
    } else {
        SignClass::Neg
    };
    for (gen, e) in mono {
        let (r, s) = gen_sign(g, *gen);
        real = real.and(r);
        let powered = if e % 2 == 0 {
            square_class(s)
        } else if *e == 1 {
            s
        } else {
            mul_class(square_class(s), s)
        };
        sign = mul_class(sign, powered);
    }
    (real, sign)
}

/// Whether a term contains an odd power of i (its value is purely
/// imaginary whenever its real cofactor is nonzero).
fn term_has_imag(mono: &Mono) -> bool {
    mono.iter().any(|(g, e)| *g == Gen::Imag && e % 2 == 1)
}

/// (is_real, sign) of a polynomial under the symbol assumptions.
pub(crate) fn poly_sign(g: &mut ExprGraph, p: &Poly) -> (Truth, SignClass) {
    if p.is_zero() {
        return (Truth::True, SignClass::Zero);
    }
    // Split off the imaginary component.
    let mut imag_part = Poly::zero();
    let mut real_terms: Vec<(&Mono, &BigRational)> = Vec::new();
    for (m, c) in &p.terms {
        if term_has_imag(m) {
            let stripped: Mono = m
                .iter()
                .filter(|(gen, _)| *gen != Gen::Imag)
                .cloned()
                .collect();
            imag_part.insert_term(stripped, c.clone());
        } else {
            real_terms.push((m, c));
        }
    }
    if !imag_part.is_zero() {
        // Nonzero imaginary component => not real; if it is provably
        // nonzero the whole value is provably nonreal.
        let (_, s) = poly_sign(g, &imag_part);
        let real = match s {
            SignClass::Pos | SignClass::Neg | SignClass::NonZero => Truth::False,
            _ => Truth::Unknown,
        };
        return (real, SignClass::Unknown);
    }
    let mut real = Truth::True;
    let mut sign = SignClass::Zero;
    for (m, c) in real_terms {
        let (r, s) = term_sign(g, m, c);
        real = real.and(r);
        sign = add_class(sign, s);
    }
    if real != Truth::True {
        sign = SignClass::Unknown;
    }
    (real, sign)
}

/// (is_real, sign) of num/den.
pub(crate) fn ratfn_sign(g: &mut ExprGraph, num: &Poly, den: &Poly) -> (Truth, SignClass) {
    let (rn, sn) = poly_sign(g, num);
    let (rd, sd) = poly_sign(g, den);
    let real = rn.and(rd);
    use SignClass::*;
    let sign = match sd {
        Pos => sn,
        Neg => mul_class(sn, Neg),
        NonZero => match sn {
            Zero => Zero,
            _ => Unknown,
        },
        _ => match sn {
            Zero => Zero,
            _ => Unknown,
        },
    };
    (real, sign)
}

/// Three-valued zero test of a canonical form.
pub(crate) fn canon_is_zero(g: &mut ExprGraph, c: &Canon) -> Truth {
    match c {
        Canon::Inf => Truth::False,
        Canon::Nan => Truth::Unknown,
        Canon::Fin { num, .. } => {
            if num.is_zero() {
                return Truth::True;
            }
            let (real, sign) = poly_sign(g, num);
            match sign {
                SignClass::Pos | SignClass::Neg | SignClass::NonZero => return Truth::False,
                _ => {}
            }
            if real == Truth::False {
                // A provably nonreal value cannot be zero.
                return Truth::False;
            }
            // A single formally nonzero term with all-nonzero generators.
            if num.terms.len() == 1 {
                let (mono, _) = num.terms.iter().next().unwrap();
                let all_nonzero = mono.iter().all(|(gen, _)| {
                    let (_, s) = gen_sign(g, *gen);
                    matches!(
                        s,
                        SignClass::Pos | SignClass::Neg | SignClass::NonZero
                    ) || *gen == Gen::Imag
                });
                if all_nonzero {
                    return Truth::False;
                }
            }
            Truth::Unknown
        }
    }
}

/// Coefficient of x^i y^j in a polynomial expression, as an expression.
/// The denominator must be free of x and y; if not, NAN is returned.
pub(crate) fn coeff_of(
    g: &mut ExprGraph,
    e: Expr,
    x: Expr,
    y: Expr,
    i: u32,
    j: u32,
) -> Expr {
    let (xi, yi) = match (g.node(x), g.node(y)) {
        (Node::Sym(a), Node::Sym(b)) => (a, b),
        _ => return Expr::NAN,
    };
    let (num, den) = match canon(g, e) {
        Canon::Fin { num, den } => (num, den),
        _ => return Expr::NAN,
    };
    let den_has_xy = den.terms.keys().any(|m| {
        m.iter()
            .any(|(gen, _)| *gen == Gen::Sym(xi) || *gen == Gen::Sym(yi))
    });
    if den_has_xy {
        return Expr::NAN;
    }
    let mut picked = Poly::zero();
    for (m, c) in &num.terms {
        let ei = m
            .iter()
            .find(|(gen, _)| *gen == Gen::Sym(xi))
            .map(|(_, e)| *e)
            .unwrap_or(0);
        let ej = m
            .iter()
            .find(|(gen, _)| *gen == Gen::Sym(yi))
            .map(|(_, e)| *e)
            .unwrap_or(0);
        if ei == i && ej == j {
            let rest: Mono = m
                .iter()
                .filter(|(gen, _)| *gen != Gen::Sym(xi) && *gen != Gen::Sym(yi))
                .cloned()
                .collect();
            picked.insert_term(rest, c.clone());
        }
    }
    ratfn_to_expr(g, &picked, &den)
}

impl ExprGraph {
    /// Coefficient of x^i y^j in `e` viewed as a polynomial in the symbols
    /// x and y; see [`coeff_of`] for the NAN cases.
    pub fn coeff(&mut self, e: Expr, x: Expr, y: Expr, i: u32, j: u32) -> Expr {
        coeff_of(self, e, x, y, i, j)
    }
}

impl Expr {
    /// Coefficient of x^i y^j through the thread-local session.
    pub fn coeff(self, x: Expr, y: Expr, i: u32, j: u32) -> Expr {
        crate::with_session(|g| g.coeff(self, x, y, i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Assume;

    #[test]
    fn expand_binomial() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        // (x+1)^2 - x^2 - 2x - 1 == 0
        let xp1 = g.add(x, Expr::ONE);
        let sq = g.mul(xp1, xp1);
        let x2 = g.mul(x, x);
        let tx = g.mul(Expr::TWO, x);
        let nx2 = g.neg(x2);
        let ntx = g.neg(tx);
        let none = g.neg(Expr::ONE);
        let mut e = g.add(sq, nx2);
        e = g.add(e, ntx);
        e = g.add(e, none);
        let c = canon(&mut g, e);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::True);
    }

    #[test]
    fn surd_product_combines() {
        let mut g = ExprGraph::new();
        // sqrt(2)*sqrt(8) = 4
        let two = Expr::TWO;
        let eight = g.int(8);
        let s2 = g.sqrt(two);
        let s8 = g.sqrt(eight);
        let p = g.mul(s2, s8);
        let four = g.int(4);
        let nfour = g.neg(four);
        let diff = g.add(p, nfour);
        let c = canon(&mut g, diff);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::True);
    }

    #[test]
    fn i_squared_is_minus_one() {
        let mut g = ExprGraph::new();
        let ii = g.mul(Expr::I, Expr::I);
        let e = g.add(ii, Expr::ONE);
        let c = canon(&mut g, e);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::True);
    }

    #[test]
    fn nested_sqrt_squares_away() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::positive());
        // sqrt(x+1)^2 == x+1
        let xp1 = g.add(x, Expr::ONE);
        let s = g.sqrt(xp1);
        let ss = g.mul(s, s);
        let nxp1 = g.neg(xp1);
        let diff = g.add(ss, nxp1);
        let c = canon(&mut g, diff);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::True);
    }

    #[test]
    fn pythagorean_identity() {
        let mut g = ExprGraph::new();
        let t = g.symbol("t", Assume::real());
        let s = g.sin(t);
        let cth = g.cos(t);
        let s2 = g.mul(s, s);
        let c2 = g.mul(cth, cth);
        let sum = g.add(s2, c2);
        let n1 = g.neg(Expr::ONE);
        let e = g.add(sum, n1);
        let c = canon(&mut g, e);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::True);
    }

    #[test]
    fn positive_symbol_sum_is_positive() {
        let mut g = ExprGraph::new();
        let a = g.symbol("a", Assume::positive());
        let b = g.symbol("b", Assume::positive());
        let e = g.add(a, b);
        let c = canon(&mut g, e);
        match c {
            Canon::Fin { num, .. } => {
                let (real, sign) = poly_sign(&mut g, &num);
                assert_eq!(real, Truth::True);
                assert_eq!(sign, SignClass::Pos);
            }
            _ => panic!("finite expected"),
        }
    }

    #[test]
    fn unknown_symbol_sign_is_unknown() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let e = g.add(x, Expr::ONE);
        let c = canon(&mut g, e);
        assert_eq!(canon_is_zero(&mut g, &c), Truth::Unknown);
    }

    #[test]
    fn coeff_extraction() {
        let mut g = ExprGraph::new();
        let x = g.symbol("x", Assume::real());
        let y = g.symbol("y", Assume::real());
        // 3x^2 + 5xy - 7
        let three = g.int(3);
        let five = g.int(5);
        let x2 = g.mul(x, x);
        let t1 = g.mul(three, x2);
        let xy = g.mul(x, y);
        let t2 = g.mul(five, xy);
        let m7 = g.int(-7);
        let mut e = g.add(t1, t2);
        e = g.add(e, m7);
        assert_eq!(coeff_of(&mut g, e, x, y, 2, 0), g.int(3));
        assert_eq!(coeff_of(&mut g, e, x, y, 1, 1), g.int(5));
        assert_eq!(coeff_of(&mut g, e, x, y, 0, 0), g.int(-7));
        assert_eq!(coeff_of(&mut g, e, x, y, 0, 2), Expr::ZERO);
    }
}
