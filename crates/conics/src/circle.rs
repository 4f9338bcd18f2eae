//! Circles as conic matrices.

use conics_expr::Expr;

use crate::mat3::Conic;
use crate::matrix::conic_matrix;
use crate::vec3::Point;

/// The unit circle x² + y² = 1.
pub fn unit_circle() -> Conic {
    conic_matrix(
        Expr::ONE,
        Expr::ZERO,
        Expr::ONE,
        Expr::ZERO,
        Expr::ZERO,
        -Expr::ONE,
    )
}

/// Circle with the given center and radius:
/// (x − cx)² + (y − cy)² = r².
pub fn circle(center: Point, r: Expr) -> Conic {
    circle_from_radius_sq(center, r * r)
}

/// As [`circle`] with the squared radius given directly, so exact radii
/// like √2 need not be re-rooted.
pub fn circle_from_radius_sq(center: Point, r_sq: Expr) -> Conic {
    let (cx, cy) = (center.x / center.z, center.y / center.z);
    conic_matrix(
        Expr::ONE,
        Expr::ZERO,
        Expr::ONE,
        -cx,
        -cy,
        cx * cx + cy * cy - r_sq,
    )
}

/// Circle through a given point.
pub fn circle_through(center: Point, p: Point) -> Conic {
    let (cx, cy) = (center.x / center.z, center.y / center.z);
    let (px, py) = (p.x / p.z, p.y / p.z);
    let dx = px - cx;
    let dy = py - cy;
    circle_from_radius_sq(center, dx * dx + dy * dy)
}

/// Squared radius of a circle conic: −det(C)/a³, scale-invariant.
pub fn circle_radius_sq(c: &Conic) -> Expr {
    let a = c.get(0, 0);
    -c.determinant() / (a * a * a)
}

pub fn circle_radius(c: &Conic) -> Expr {
    circle_radius_sq(c).sqrt()
}
