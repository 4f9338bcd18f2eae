//! Metric invariants of central conics: center, radii, eccentricity and
//! the constructions derived from them.
//!
//! A conic matrix is only defined up to a nonzero scale, so every
//! formula here is either scale-invariant outright or made so through
//! [`conic_norm_factor`], which stands in for the sign of det(C) even
//! when the kernel cannot decide it.

use std::sync::atomic::{AtomicU64, Ordering};

use conics_expr::{symbol, Assume, Expr, Hint, Sign, Truth};

use crate::mat3::{Conic, Mat3};
use crate::matrix::{conic_matrix, quadratic_form};
use crate::vec3::{Point, Vec3};

static SIGN_SYMBOLS: AtomicU64 = AtomicU64::new(0);

/// A fresh opaque symbol constrained to ±1. Used wherever a formula
/// needs the sign of an expression the kernel cannot decide; squares of
/// the symbol cancel, so downstream sign-free results stay exact.
pub(crate) fn sign_symbol() -> Expr {
    let n = SIGN_SYMBOLS.fetch_add(1, Ordering::Relaxed);
    symbol(&format!("sgn{n}"), Assume::unit_sign())
}

/// The sign of `e` as an exact ±1 expression, or a fresh unit-sign
/// symbol when undecidable. `Zero` maps to +1.
pub(crate) fn sign_expr(e: Expr) -> Expr {
    match e.sign_of_with(Hint::Factor) {
        Some(Sign::Negative) => -Expr::ONE,
        Some(Sign::Zero) | Some(Sign::Positive) => Expr::ONE,
        None => sign_symbol(),
    }
}

/// Homogeneous center of the conic, the pole of the ideal line. Ideal
/// for parabolas, the zero vector when ambiguous (a parallel line
/// pair has a whole line of centers).
pub fn conic_center(c: &Conic) -> Point {
    c.row(0).cross(c.row(1))
}

/// A ±1 expression normalizing the scale freedom of the matrix: for a
/// non-degenerate conic, sign(det C), which makes the quadratic form of
/// f·C positive at each focus; for a point conic, the sign making the
/// form non-positive at every finite point; +1 for line pairs. Falls
/// back to an opaque unit-sign symbol when nothing is decidable, whose
/// even powers still cancel exactly.
pub fn conic_norm_factor(c: &Conic) -> Expr {
    let det = c.determinant();
    match det.sign_of_with(Hint::Factor) {
        Some(Sign::Positive) => return Expr::ONE,
        Some(Sign::Negative) => return -Expr::ONE,
        Some(Sign::Zero) => {}
        None => return sign_symbol(),
    }
    if crate::conic_classes::is_line_pair(c).is_true() {
        return Expr::ONE;
    }
    // Point conic: q(p) keeps one sign everywhere, read it off the
    // diagonal.
    for k in 0..3 {
        match c.get(k, k).sign_of_with(Hint::Factor) {
            Some(Sign::Positive) => return -Expr::ONE,
            Some(Sign::Negative) => return Expr::ONE,
            _ => {}
        }
    }
    sign_symbol()
}

/// √((a−c)² + 4b²), the eigenvalue gap of the affine part. Zero exactly
/// for circular conics.
fn eigen_gap(c: &Conic) -> Expr {
    let a = c.get(0, 0);
    let b = c.get(0, 1);
    let cc = c.get(1, 1);
    ((a - cc) * (a - cc) + Expr::from_int(4) * b * b).sqrt()
}

fn radius_sq_for(c: &Conic, lambda: Expr) -> Expr {
    -(c.determinant()) / (lambda * c.det2())
}

/// Squared semi-axis along the focal axis. For hyperbolas this is the
/// real semi-axis; negative values never occur here for real central
/// conics.
pub fn primary_radius_sq(c: &Conic) -> Expr {
    let f = conic_norm_factor(c);
    let half = Expr::ratio(1, 2);
    let lambda = (c.get(0, 0) + c.get(1, 1)) * half + f * eigen_gap(c) * half;
    radius_sq_for(c, lambda)
}

/// Squared semi-axis along the conjugate axis; negative for hyperbolas
/// (the conjugate axis is imaginary).
pub fn secondary_radius_sq(c: &Conic) -> Expr {
    let f = conic_norm_factor(c);
    let half = Expr::ratio(1, 2);
    let lambda = (c.get(0, 0) + c.get(1, 1)) * half - f * eigen_gap(c) * half;
    radius_sq_for(c, lambda)
}

pub fn primary_radius(c: &Conic) -> Expr {
    primary_radius_sq(c).sqrt()
}

pub fn secondary_radius(c: &Conic) -> Expr {
    secondary_radius_sq(c).sqrt()
}

/// Distance from the center to either focus: √(r₁² − r₂²). The sign
/// convention of the radii makes the radicand non-negative for both
/// ellipses and hyperbolas.
pub fn linear_eccentricity(c: &Conic) -> Expr {
    (primary_radius_sq(c) - secondary_radius_sq(c)).sqrt()
}

/// Eccentricity: 0 for circles, below 1 for ellipses, 1 for parabolas,
/// above 1 for hyperbolas. e² = 2s/(s − f·(a+c)) with s the eigenvalue
/// gap; this form is scale-invariant and free of the radii, so it also
/// works for parabolas where the radii blow up.
pub fn eccentricity(c: &Conic) -> Expr {
    let s = eigen_gap(c);
    let f = conic_norm_factor(c);
    (Expr::TWO * s / (s - f * (c.get(0, 0) + c.get(1, 1)))).sqrt()
}

/// Circle of points where two perpendicular tangents of the conic meet.
/// Concentric with the conic; squared radius r₁² + r₂², which collapses
/// to −det(C)·(a+c)/det₂² in closed form. Imaginary for hyperbolas
/// with e > √2.
pub fn director_circle(c: &Conic) -> Conic {
    let center = conic_center(c);
    let (cx, cy) = (center.x / center.z, center.y / center.z);
    let det2 = c.det2();
    let r_sq = -(c.determinant()) * (c.get(0, 0) + c.get(1, 1)) / (det2 * det2);
    conic_matrix(
        Expr::ONE,
        Expr::ZERO,
        Expr::ONE,
        -cx,
        -cy,
        cx * cx + cy * cy - r_sq,
    )
}

/// Distance from the center to the conic along the (affine) direction
/// `u`. At the center the linear part of the form vanishes, so the
/// parameter satisfies t²·q(u) + q(ĉ) = 0 directly.
pub fn radius_in_direction(c: &Conic, u: Vec3) -> Expr {
    let center = conic_center(c);
    let m = Vec3::new(center.x / center.z, center.y / center.z, Expr::ONE);
    let dir = Vec3::new(u.x, u.y, Expr::ZERO);
    (-quadratic_form(c, m) / quadratic_form(c, dir)).sqrt()
}

/// The point conic sharing center and axis direction with `c`: the
/// limit of scaling the conic down to radius zero. Subtracting the
/// value of the form at the center kills the constant term in the
/// centered coordinates.
pub fn shrink_conic_to_zero(c: &Conic) -> Conic {
    let center = conic_center(c);
    let m = Vec3::new(center.x / center.z, center.y / center.z, Expr::ONE);
    let mut e22 = Mat3::zero();
    e22.c2.z = Expr::ONE;
    *c - e22 * quadratic_form(c, m)
}

/// Vector from the center to a focus, as an ideal point. The other
/// focus sits at the negated vector. Zero for circles.
pub fn center_to_focus_vector(c: &Conic) -> Vec3 {
    let d = crate::conic_direction::focal_axis_direction(c);
    let norm = d.xy_norm();
    if d.is_zero_vector().is_true() {
        return Vec3::zero();
    }
    Vec3::new(
        linear_eccentricity(c) * d.x / norm,
        linear_eccentricity(c) * d.y / norm,
        Expr::ZERO,
    )
}

/// Vector from the center to a vertex along the focal axis.
pub fn center_to_vertex_vector(c: &Conic) -> Vec3 {
    let d = crate::conic_direction::focal_axis_direction(c);
    let norm = d.xy_norm();
    if d.is_zero_vector().is_true() {
        return Vec3::zero();
    }
    Vec3::new(
        primary_radius(c) * d.x / norm,
        primary_radius(c) * d.y / norm,
        Expr::ZERO,
    )
}

/// Both foci of a central conic, center ± the focal vector. Coincident
/// at the center for circles.
pub fn conic_foci(c: &Conic) -> (Point, Point) {
    let center = conic_center(c);
    let m = Vec3::new(center.x / center.z, center.y / center.z, Expr::ONE);
    let v = center_to_focus_vector(c);
    (m + v, m - v)
}

/// Do the two conics provably have the same center?
pub fn concentric(c1: &Conic, c2: &Conic) -> Truth {
    crate::point::same_projective(conic_center(c1), conic_center(c2))
}
