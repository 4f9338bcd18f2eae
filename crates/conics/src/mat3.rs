//! 3x3 matrices over the exact expression type, column-major storage.
//!
//! A symmetric matrix is a conic, a general invertible one a homography or
//! a polar matrix. The adjugate replaces the inverse throughout: it is
//! polynomial in the entries and satisfies adj(M)·M = det(M)·I, so duality
//! and transformation formulas stay exact without dividing by determinants.

use core::ops::{Add, Index, Mul, Neg, Sub};

use conics_expr::{Expr, Truth};

use crate::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mat3 {
    /// Column 0
    pub c0: Vec3,
    /// Column 1
    pub c1: Vec3,
    /// Column 2
    pub c2: Vec3,
}

/// A conic: symmetric, up to a nonzero scalar.
pub type Conic = Mat3;

/// A polar parameterization matrix: P·(cos θ, sin θ, 1)ᵀ traces the curve.
pub type PolarConic = Mat3;

/// A projective transformation.
pub type Transform = Mat3;

impl Mat3 {
    /// Construct from individual elements (row-major argument order for readability).
    /// ```text
    /// | m00 m01 m02 |
    /// | m10 m11 m12 |
    /// | m20 m21 m22 |
    /// ```
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: Expr,
        m01: Expr,
        m02: Expr,
        m10: Expr,
        m11: Expr,
        m12: Expr,
        m20: Expr,
        m21: Expr,
        m22: Expr,
    ) -> Self {
        Self {
            c0: Vec3::new(m00, m10, m20),
            c1: Vec3::new(m01, m11, m21),
            c2: Vec3::new(m02, m12, m22),
        }
    }

    /// Construct from column vectors
    #[inline]
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { c0, c1, c2 }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_cols(Vec3::zero(), Vec3::zero(), Vec3::zero())
    }

    #[inline]
    pub fn identity() -> Self {
        Self::diagonal(Expr::ONE, Expr::ONE, Expr::ONE)
    }

    #[inline]
    pub fn diagonal(d0: Expr, d1: Expr, d2: Expr) -> Self {
        let o = Expr::ZERO;
        Self::new(d0, o, o, o, d1, o, o, o, d2)
    }

    /// Element access (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Expr {
        self.col(col).get(row)
    }

    /// Column access
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        match i {
            0 => self.c0,
            1 => self.c1,
            _ => self.c2,
        }
    }

    /// Row access
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.c0.get(i), self.c1.get(i), self.c2.get(i))
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    #[inline]
    pub fn determinant(&self) -> Expr {
        self.c0.dot(self.c1.cross(self.c2))
    }

    /// Determinant of the top-left 2x2 block, the classifier of conic kind.
    #[inline]
    pub fn det2(&self) -> Expr {
        self.c0.x * self.c1.y - self.c1.x * self.c0.y
    }

    /// Adjugate: transpose of the cofactor matrix, adj(M)·M = det(M)·I.
    ///
    /// For 3x3 the cofactor columns are cross products of the input columns.
    #[inline]
    pub fn adjugate(&self) -> Self {
        Self::from_cols(
            self.c1.cross(self.c2),
            self.c2.cross(self.c0),
            self.c0.cross(self.c1),
        )
        .transpose()
    }

    /// Outer product u·vᵀ.
    #[inline]
    pub fn outer(u: Vec3, v: Vec3) -> Self {
        Self::from_cols(u * v.x, u * v.y, u * v.z)
    }

    /// Matrix-vector product
    #[inline]
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        self.c0 * v.x + self.c1 * v.y + self.c2 * v.z
    }

    /// Matrix-matrix product
    #[inline]
    pub fn mul_mat(&self, rhs: &Mat3) -> Mat3 {
        Mat3::from_cols(
            self.mul_vec(rhs.c0),
            self.mul_vec(rhs.c1),
            self.mul_vec(rhs.c2),
        )
    }

    /// Trace
    #[inline]
    pub fn trace(&self) -> Expr {
        self.c0.x + self.c1.y + self.c2.z
    }

    /// Frobenius inner product Σ mᵢⱼ nᵢⱼ.
    #[inline]
    pub fn frobenius_dot(&self, rhs: &Mat3) -> Expr {
        self.c0.dot(rhs.c0) + self.c1.dot(rhs.c1) + self.c2.dot(rhs.c2)
    }

    /// Is this exactly the zero matrix?
    pub fn is_zero_matrix(&self) -> Truth {
        self.c0
            .is_zero_vector()
            .and(self.c1.is_zero_vector())
            .and(self.c2.is_zero_vector())
    }

    /// Entry-wise canonical normalization, for structural comparison.
    pub fn normalized(&self) -> Self {
        Self::from_cols(
            self.c0.normalized(),
            self.c1.normalized(),
            self.c2.normalized(),
        )
    }
}

impl Index<(usize, usize)> for Mat3 {
    type Output = Expr;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Expr {
        let c = match col {
            0 => &self.c0,
            1 => &self.c1,
            _ => &self.c2,
        };
        match row {
            0 => &c.x,
            1 => &c.y,
            _ => &c.z,
        }
    }
}

impl Add for Mat3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_cols(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl Sub for Mat3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_cols(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl Neg for Mat3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::from_cols(-self.c0, -self.c1, -self.c2)
    }
}

impl Mul<Expr> for Mat3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Expr) -> Self {
        Self::from_cols(self.c0 * rhs, self.c1 * rhs, self.c2 * rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}
