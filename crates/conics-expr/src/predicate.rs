//! Three-valued predicates.
//!
//! Exact questions about symbolic expressions do not always have an answer:
//! `x² ≥ 0` holds for every real `x`, but whether `x - y` is zero depends on
//! values we do not have. Every predicate therefore returns a [`Truth`] with
//! a third state, and callers combine them with the fuzzy `and`/`or`/`not`.
//! `Unknown` is an honest "cannot decide", never a silent guess.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::graph::ExprGraph;
use crate::node::Expr;
use crate::poly::{canon, canon_is_zero, expr_is_real, gen_sign, ratfn_sign, Canon, Poly, SignClass};
use crate::with_session;

/// Three-valued logic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    /// Fuzzy conjunction: `False` dominates, `Unknown` absorbs `True`.
    pub fn and(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }

    /// Fuzzy disjunction: `True` dominates, `Unknown` absorbs `False`.
    pub fn or(self, other: Truth) -> Truth {
        match (self, other) {
            (Truth::True, _) | (_, Truth::True) => Truth::True,
            (Truth::False, Truth::False) => Truth::False,
            _ => Truth::Unknown,
        }
    }

    /// Negation; `Unknown` stays `Unknown`.
    pub fn not(self) -> Truth {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        }
    }

    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    pub fn is_false(self) -> bool {
        self == Truth::False
    }

    pub fn is_unknown(self) -> bool {
        self == Truth::Unknown
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

/// Sign of a decided real quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

/// Normalization applied before a sign or zero test.
///
/// `Factor` divides the canonical numerator by its rational content and by
/// common generator factors of known positive sign, which can decide tests
/// the raw form leaves open. `Custom` runs a caller-supplied rewrite first.
#[derive(Clone, Copy, Default)]
pub enum Hint {
    #[default]
    Identity,
    Factor,
    Custom(fn(&mut ExprGraph, Expr) -> Expr),
}

impl std::fmt::Debug for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::Identity => f.write_str("Identity"),
            Hint::Factor => f.write_str("Factor"),
            Hint::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ExprGraph {
    fn canon_with(&mut self, e: Expr, hint: Hint) -> Canon {
        let e = match hint {
            Hint::Custom(f) => f(self, e),
            _ => e,
        };
        let c = canon(self, e);
        match (hint, c) {
            (Hint::Factor, Canon::Fin { num, den }) => {
                let num = self.strip_positive_factors(num);
                Canon::Fin { num, den }
            }
            (_, c) => c,
        }
    }

    /// Divide a polynomial by its rational content and by every common
    /// generator factor that is provably real and positive. Sound for both
    /// zero and sign tests because only positive quantities are removed.
    fn strip_positive_factors(&mut self, p: Poly) -> Poly {
        if p.is_zero() {
            return p;
        }
        let (content, _) = p.content();
        let p = p.div_rat(&content);
        // Common monomial part across all terms.
        let mut common: Option<Vec<(crate::poly::Gen, u32)>> = None;
        for mono in p.terms.keys() {
            common = Some(match common {
                None => mono.clone(),
                Some(prev) => prev
                    .iter()
                    .filter_map(|&(g, e)| {
                        mono.iter()
                            .find(|&&(h, _)| h == g)
                            .map(|&(_, f)| (g, e.min(f)))
                    })
                    .collect(),
            });
        }
        let mut strip: Vec<(crate::poly::Gen, u32)> = Vec::new();
        for (gen, e) in common.unwrap_or_default() {
            if gen_sign(self, gen) == (Truth::True, SignClass::Pos) {
                strip.push((gen, e));
            }
        }
        if strip.is_empty() {
            return p;
        }
        let mut out = Poly::zero();
        for (mono, coeff) in &p.terms {
            let reduced: Vec<_> = mono
                .iter()
                .filter_map(|&(g, e)| {
                    let drop = strip
                        .iter()
                        .find(|&&(h, _)| h == g)
                        .map(|&(_, f)| f)
                        .unwrap_or(0);
                    let left = e - drop;
                    (left > 0).then_some((g, left))
                })
                .collect();
            out.terms.insert(reduced, coeff.clone());
        }
        out
    }

    /// Is the expression exactly zero?
    pub fn is_zero(&mut self, e: Expr) -> Truth {
        self.is_zero_with(e, Hint::Identity)
    }

    pub fn is_zero_with(&mut self, e: Expr, hint: Hint) -> Truth {
        let c = self.canon_with(e, hint);
        canon_is_zero(self, &c)
    }

    pub fn is_nonzero(&mut self, e: Expr) -> Truth {
        self.is_zero(e).not()
    }

    pub fn is_nonzero_with(&mut self, e: Expr, hint: Hint) -> Truth {
        self.is_zero_with(e, hint).not()
    }

    /// Do the two expressions denote the same value?
    pub fn equals(&mut self, a: Expr, b: Expr) -> Truth {
        if a == b {
            return Truth::True;
        }
        let nb = self.neg(b);
        let diff = self.add(a, nb);
        self.is_zero(diff)
    }

    pub fn is_positive(&mut self, e: Expr) -> Truth {
        self.is_positive_with(e, Hint::Identity)
    }

    pub fn is_positive_with(&mut self, e: Expr, hint: Hint) -> Truth {
        self.signed_test(e, hint, SignClass::Pos, SignClass::NonNeg)
    }

    pub fn is_negative(&mut self, e: Expr) -> Truth {
        self.is_negative_with(e, Hint::Identity)
    }

    pub fn is_negative_with(&mut self, e: Expr, hint: Hint) -> Truth {
        self.signed_test(e, hint, SignClass::Neg, SignClass::NonPos)
    }

    pub fn is_nonneg(&mut self, e: Expr) -> Truth {
        self.is_nonneg_with(e, Hint::Identity)
    }

    pub fn is_nonneg_with(&mut self, e: Expr, hint: Hint) -> Truth {
        self.is_negative_with(e, hint).not()
    }

    pub fn is_nonpos(&mut self, e: Expr) -> Truth {
        self.is_nonpos_with(e, Hint::Identity)
    }

    pub fn is_nonpos_with(&mut self, e: Expr, hint: Hint) -> Truth {
        self.is_positive_with(e, hint).not()
    }

    /// Strict sign test. `strict` is the class that decides `True` outright;
    /// `weak` is its non-strict widening, which decides once zero is ruled
    /// in or out.
    fn signed_test(&mut self, e: Expr, hint: Hint, strict: SignClass, weak: SignClass) -> Truth {
        let c = self.canon_with(e, hint);
        let (num, den) = match &c {
            Canon::Fin { num, den } => (num.clone(), den.clone()),
            // Infinity is unsigned; NaN compares to nothing.
            Canon::Inf | Canon::Nan => return Truth::Unknown,
        };
        let (real, sign) = ratfn_sign(self, &num, &den);
        if real == Truth::False {
            return Truth::False;
        }
        if real != Truth::True {
            return Truth::Unknown;
        }
        let opp_strict = match strict {
            SignClass::Pos => SignClass::Neg,
            _ => SignClass::Pos,
        };
        let opp_weak = match weak {
            SignClass::NonNeg => SignClass::NonPos,
            _ => SignClass::NonNeg,
        };
        if sign == SignClass::Zero || sign == opp_strict || sign == opp_weak {
            return Truth::False;
        }
        if sign == strict {
            return Truth::True;
        }
        if sign == weak {
            // Nonstrict sign plus a zero decision settles it.
            return match canon_is_zero(self, &c) {
                Truth::True => Truth::False,
                Truth::False => Truth::True,
                Truth::Unknown => Truth::Unknown,
            };
        }
        Truth::Unknown
    }

    /// Does the expression denote a (finite) real number?
    pub fn is_real(&mut self, e: Expr) -> Truth {
        expr_is_real(self, e)
    }

    pub fn is_infinite(&mut self, e: Expr) -> Truth {
        match canon(self, e) {
            Canon::Inf => Truth::True,
            Canon::Nan => Truth::Unknown,
            Canon::Fin { .. } => Truth::False,
        }
    }

    pub fn is_nan(&mut self, e: Expr) -> Truth {
        match canon(self, e) {
            Canon::Nan => Truth::True,
            _ => Truth::False,
        }
    }

    /// The expression as a rational constant, if its canonical form is one.
    fn const_rat(&mut self, e: Expr) -> Option<BigRational> {
        match canon(self, e) {
            Canon::Fin { num, den } => {
                let n = num.as_rat()?.clone();
                let d = den.as_rat()?.clone();
                Some(n / d)
            }
            Canon::Inf | Canon::Nan => None,
        }
    }

    /// Does the expression denote an integer? Decided for rational
    /// constants and infinity; symbolic values stay `Unknown`.
    pub fn is_integer(&mut self, e: Expr) -> Truth {
        match canon(self, e) {
            Canon::Fin { num, den } => match (num.as_rat(), den.as_rat()) {
                (Some(n), Some(d)) => {
                    if (n / d).is_integer() {
                        Truth::True
                    } else {
                        Truth::False
                    }
                }
                _ => Truth::Unknown,
            },
            Canon::Inf => Truth::False,
            Canon::Nan => Truth::Unknown,
        }
    }

    pub fn is_even(&mut self, e: Expr) -> Truth {
        self.parity(e, true)
    }

    pub fn is_odd(&mut self, e: Expr) -> Truth {
        self.parity(e, false)
    }

    fn parity(&mut self, e: Expr, want_even: bool) -> Truth {
        match self.is_integer(e) {
            Truth::True => match self.const_rat(e) {
                Some(v) => {
                    let even = (v.numer() % BigInt::from(2)).is_zero();
                    if even == want_even {
                        Truth::True
                    } else {
                        Truth::False
                    }
                }
                None => Truth::Unknown,
            },
            other => other,
        }
    }

    /// Decided sign, or `None` when any of the three outcomes is open.
    pub fn sign_of(&mut self, e: Expr) -> Option<Sign> {
        self.sign_of_with(e, Hint::Identity)
    }

    pub fn sign_of_with(&mut self, e: Expr, hint: Hint) -> Option<Sign> {
        if self.is_zero_with(e, hint).is_true() {
            return Some(Sign::Zero);
        }
        if self.is_positive_with(e, hint).is_true() {
            return Some(Sign::Positive);
        }
        if self.is_negative_with(e, hint).is_true() {
            return Some(Sign::Negative);
        }
        None
    }
}

impl Expr {
    pub fn is_zero(self) -> Truth {
        with_session(|g| g.is_zero(self))
    }

    pub fn is_zero_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_zero_with(self, hint))
    }

    pub fn is_nonzero(self) -> Truth {
        with_session(|g| g.is_nonzero(self))
    }

    pub fn is_nonzero_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_nonzero_with(self, hint))
    }

    pub fn equals(self, other: Expr) -> Truth {
        with_session(|g| g.equals(self, other))
    }

    pub fn is_positive(self) -> Truth {
        with_session(|g| g.is_positive(self))
    }

    pub fn is_positive_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_positive_with(self, hint))
    }

    pub fn is_negative(self) -> Truth {
        with_session(|g| g.is_negative(self))
    }

    pub fn is_negative_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_negative_with(self, hint))
    }

    pub fn is_nonneg(self) -> Truth {
        with_session(|g| g.is_nonneg(self))
    }

    pub fn is_nonneg_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_nonneg_with(self, hint))
    }

    pub fn is_nonpos(self) -> Truth {
        with_session(|g| g.is_nonpos(self))
    }

    pub fn is_nonpos_with(self, hint: Hint) -> Truth {
        with_session(|g| g.is_nonpos_with(self, hint))
    }

    pub fn is_real(self) -> Truth {
        with_session(|g| g.is_real(self))
    }

    pub fn is_infinite(self) -> Truth {
        with_session(|g| g.is_infinite(self))
    }

    pub fn is_nan(self) -> Truth {
        with_session(|g| g.is_nan(self))
    }

    pub fn is_integer(self) -> Truth {
        with_session(|g| g.is_integer(self))
    }

    pub fn is_even(self) -> Truth {
        with_session(|g| g.is_even(self))
    }

    pub fn is_odd(self) -> Truth {
        with_session(|g| g.is_odd(self))
    }

    pub fn sign_of(self) -> Option<Sign> {
        with_session(|g| g.sign_of(self))
    }

    pub fn sign_of_with(self, hint: Hint) -> Option<Sign> {
        with_session(|g| g.sign_of_with(self, hint))
    }
}
