//! 3-vectors over the exact expression type.
//!
//! Homogeneous coordinates for RP²: a `Vec3` is a point or a line depending
//! on context, identified up to a nonzero scalar. Entries are `Expr` handles,
//! so the whole vector is `Copy`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use conics_expr::{Expr, Truth};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vec3 {
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
}

/// A point in homogeneous coordinates; z = 0 means ideal.
pub type Point = Vec3;

/// A line as a dual 3-vector: locus ax + by + cz = 0.
pub type Line = Vec3;

impl Vec3 {
    #[inline]
    pub fn new(x: Expr, y: Expr, z: Expr) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(Expr::ZERO, Expr::ZERO, Expr::ZERO)
    }

    /// All-NaN vector, the designated "undefined" value.
    #[inline]
    pub fn nan() -> Self {
        Self::new(Expr::NAN, Expr::NAN, Expr::NAN)
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> Expr {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared Euclidean norm of the first two coordinates. For a line this
    /// is the squared length of its normal (a, b).
    #[inline]
    pub fn xy_norm_sq(self) -> Expr {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean norm of the first two coordinates.
    #[inline]
    pub fn xy_norm(self) -> Expr {
        self.xy_norm_sq().sqrt()
    }

    /// Is this exactly the zero vector?
    pub fn is_zero_vector(self) -> Truth {
        self.x.is_zero().and(self.y.is_zero()).and(self.z.is_zero())
    }

    /// Does any entry hold the NaN sentinel?
    pub fn has_nan(self) -> Truth {
        self.x.is_nan().or(self.y.is_nan()).or(self.z.is_nan())
    }

    /// Entry-wise canonical normalization; useful before structural
    /// comparison in tests.
    pub fn normalized(self) -> Self {
        Self::new(self.x.normalized(), self.y.normalized(), self.z.normalized())
    }

    #[inline]
    pub fn as_array(&self) -> [Expr; 3] {
        [self.x, self.y, self.z]
    }

    /// Component by index (0, 1, 2).
    #[inline]
    pub fn get(self, i: usize) -> Expr {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Expr> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Expr) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<Expr> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Expr) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl core::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.x.render(),
            self.y.render(),
            self.z.render()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i64, y: i64, z: i64) -> Vec3 {
        Vec3::new(Expr::from_int(x), Expr::from_int(y), Expr::from_int(z))
    }

    #[test]
    fn dot_product() {
        let a = v(1, 2, 3);
        let b = v(4, 5, 6);
        assert_eq!(a.dot(b).equals(Expr::from_int(32)), Truth::True);
    }

    #[test]
    fn cross_product_anticommutes() {
        let a = v(1, 0, 0);
        let b = v(0, 1, 0);
        let c = a.cross(b);
        assert_eq!(c.normalized(), v(0, 0, 1).normalized());
        assert_eq!(b.cross(a).normalized(), (-c).normalized());
    }

    #[test]
    fn cross_with_self_vanishes() {
        let a = v(3, -2, 5);
        assert_eq!(a.cross(a).is_zero_vector(), Truth::True);
    }

    #[test]
    fn zero_vector_detection() {
        assert_eq!(Vec3::zero().is_zero_vector(), Truth::True);
        assert_eq!(v(0, 1, 0).is_zero_vector(), Truth::False);
    }
}
