//! Conic-matrix helpers.
//!
//! The small toolbox the rest of the engine leans on: the symmetric builder,
//! quadratic forms, the skew (cross-product) lift, 2x2 eigenvalues,
//! proportionality tests and the witness search for a provably nonzero
//! entry of a symbolic matrix.

use conics_expr::{Expr, Sign, Truth};

use crate::mat3::Mat3;
use crate::vec3::Vec3;

/// Build the symmetric matrix of ax² + 2bxy + cy² + 2dx + 2ey + f = 0.
pub fn conic_matrix(a: Expr, b: Expr, c: Expr, d: Expr, e: Expr, f: Expr) -> Mat3 {
    Mat3::new(a, b, d, b, c, e, d, e, f)
}

/// vᵀ·M·v.
pub fn quadratic_form(m: &Mat3, v: Vec3) -> Expr {
    v.dot(m.mul_vec(v))
}

/// Skew-symmetric lift: skew(v)·u = v×u.
pub fn skew(v: Vec3) -> Mat3 {
    let o = Expr::ZERO;
    Mat3::new(o, -v.z, v.y, v.z, o, -v.x, -v.y, v.x, o)
}

/// Eigenvalues of the symmetric 2x2 block [[a, b], [b, c]], returned as
/// (λ₋, λ₊) = (a+c)/2 ∓ √((a−c)² + 4b²)/2.
pub fn eigenvalues_2x2(a: Expr, b: Expr, c: Expr) -> (Expr, Expr) {
    let half = Expr::ratio(1, 2);
    let mean = (a + c) * half;
    let s = ((a - c) * (a - c) + Expr::from_int(4) * b * b).sqrt() * half;
    (mean - s, mean + s)
}

/// Are the two matrices nonzero scalar multiples of each other?
///
/// Two provably zero matrices count as multiples. Otherwise the test is
/// Cauchy-Schwarz equality |M₁|²|M₂|² = (M₁·M₂)² over the Frobenius inner
/// product, conjoined with both matrices being nonzero.
pub fn is_nonzero_multiple(m1: &Mat3, m2: &Mat3) -> Truth {
    let z1 = m1.is_zero_matrix();
    let z2 = m2.is_zero_matrix();
    if z1.is_true() && z2.is_true() {
        return Truth::True;
    }
    if (z1.is_true() && z2.is_false()) || (z1.is_false() && z2.is_true()) {
        return Truth::False;
    }
    let n1 = m1.frobenius_dot(m1);
    let n2 = m2.frobenius_dot(m2);
    let d = m1.frobenius_dot(m2);
    let proportional = (n1 * n2 - d * d).is_zero();
    proportional.and(z1.not()).and(z2.not())
}

/// As [`is_nonzero_multiple`], additionally requiring a positive factor.
/// For proportional nonzero matrices the factor's sign is the sign of the
/// Frobenius inner product.
pub fn is_positive_multiple(m1: &Mat3, m2: &Mat3) -> Truth {
    is_nonzero_multiple(m1, m2).and(m1.frobenius_dot(m2).is_positive())
}

/// Outcome of the search for a provably nonzero entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Witness {
    /// Entry (row, col) is provably nonzero.
    At { row: usize, col: usize },
    /// The matrix is provably zero.
    Nowhere,
    /// The predicates could not decide.
    Unknown,
}

/// Locate an entry of `m` that is provably nonzero, column-major order.
///
/// Used to extract a scalar-representative row and column from a rank-1
/// matrix. `Nowhere` only when every entry is provably zero.
pub fn non_zero_cross(m: &Mat3) -> Witness {
    let mut all_zero = true;
    for col in 0..3 {
        for row in 0..3 {
            match m.get(row, col).is_zero() {
                Truth::False => return Witness::At { row, col },
                Truth::True => {}
                Truth::Unknown => all_zero = false,
            }
        }
    }
    if all_zero {
        Witness::Nowhere
    } else {
        Witness::Unknown
    }
}

/// Is the symmetric matrix definite (positive or negative)?
///
/// Flips sign when the (0,0) entry is negative, then checks the leading
/// principal minors. Rejects early on a mixed-sign diagonal.
pub fn is_definite(m: &Mat3) -> Truth {
    let diag = [m.get(0, 0), m.get(1, 1), m.get(2, 2)];
    let any_pos = diag[0]
        .is_positive()
        .or(diag[1].is_positive())
        .or(diag[2].is_positive());
    let any_neg = diag[0]
        .is_negative()
        .or(diag[1].is_negative())
        .or(diag[2].is_negative());
    if any_pos.is_true() && any_neg.is_true() {
        return Truth::False;
    }
    let m = match diag[0].sign_of() {
        Some(Sign::Positive) => *m,
        Some(Sign::Negative) => -*m,
        Some(Sign::Zero) => return Truth::False,
        None => return Truth::Unknown,
    };
    let m1 = m.get(0, 0);
    let m2 = m.det2();
    let m3 = m.determinant();
    m1.is_positive().and(m2.is_positive()).and(m3.is_positive())
}
