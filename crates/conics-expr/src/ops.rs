//! Arithmetic operators for `Expr` through the thread-local graph.
//!
//! Subtraction, division, powers and abs decompose into the primitive
//! nodes, so the graph only ever sees Add/Mul/Neg/Recip/Sqrt.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::node::Expr;
use crate::with_session;

impl Add for Expr {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        with_session(|g| g.add(self, rhs))
    }
}

impl Sub for Expr {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        with_session(|g| {
            let nb = g.neg(rhs);
            g.add(self, nb)
        })
    }
}

impl Mul for Expr {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        with_session(|g| g.mul(self, rhs))
    }
}

impl Div for Expr {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        with_session(|g| {
            let rb = g.recip(rhs);
            g.mul(self, rb)
        })
    }
}

impl Neg for Expr {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        with_session(|g| g.neg(self))
    }
}

impl AddAssign for Expr {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Expr {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Expr {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Expr {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Expr {
    /// Principal square root.
    #[inline]
    pub fn sqrt(self) -> Self {
        with_session(|g| g.sqrt(self))
    }

    /// Reciprocal.
    #[inline]
    pub fn recip(self) -> Self {
        with_session(|g| g.recip(self))
    }

    /// Integer power by repeated squaring. `powi(0)` is 1.
    pub fn powi(self, n: i32) -> Self {
        if n < 0 {
            return self.powi(-n).recip();
        }
        let mut result = Expr::ONE;
        let mut base = self;
        let mut k = n as u32;
        while k > 0 {
            if k & 1 == 1 {
                result = result * base;
            }
            k >>= 1;
            if k > 0 {
                base = base * base;
            }
        }
        result
    }

    /// |x| = sqrt(x*x), exact for real expressions.
    #[inline]
    pub fn abs(self) -> Self {
        (self * self).sqrt()
    }

    /// Sine.
    #[inline]
    pub fn sin(self) -> Self {
        with_session(|g| g.sin(self))
    }

    /// Cosine.
    #[inline]
    pub fn cos(self) -> Self {
        with_session(|g| g.cos(self))
    }

    /// atan2(self, x).
    #[inline]
    pub fn atan2(self, x: Self) -> Self {
        with_session(|g| g.atan2(self, x))
    }

    /// Apply the rewrite simplifier in the thread-local graph.
    #[inline]
    pub fn simplified(self) -> Self {
        with_session(|g| g.simplify(self))
    }

    /// Substitute a symbol in the thread-local graph.
    #[inline]
    pub fn subst(self, sym: Expr, replacement: Expr) -> Self {
        with_session(|g| g.subst(self, sym, replacement))
    }
}
