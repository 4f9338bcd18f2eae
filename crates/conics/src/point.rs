//! Points in homogeneous coordinates.

use conics_expr::{Expr, Truth};

use crate::vec3::{Point, Vec3};

/// Finite point (x, y) as (x, y, 1).
pub fn point(x: Expr, y: Expr) -> Point {
    Vec3::new(x, y, Expr::ONE)
}

/// Ideal point in direction (dx, dy).
pub fn ideal_point(dx: Expr, dy: Expr) -> Point {
    Vec3::new(dx, dy, Expr::ZERO)
}

/// The origin (0, 0, 1).
pub fn origin() -> Point {
    point(Expr::ZERO, Expr::ZERO)
}

/// Cartesian coordinates (x/z, y/z). The divisions are left unsimplified;
/// an ideal point yields infinite coordinates.
pub fn point_to_xy(p: Point) -> (Expr, Expr) {
    (p.x / p.z, p.y / p.z)
}

/// Is the last homogeneous coordinate zero?
pub fn is_ideal(p: Point) -> Truth {
    p.z.is_zero()
}

/// Centroid of finite points, in homogeneous closed form (no divisions):
/// X = Σᵢ xᵢ·Πⱼ≠ᵢ zⱼ, likewise Y, and Z = n·Πⱼ zⱼ.
pub fn centroid(points: &[Point]) -> Point {
    let n = points.len();
    if n == 0 {
        return Vec3::zero();
    }
    let mut x = Expr::ZERO;
    let mut y = Expr::ZERO;
    let mut z_prod = Expr::ONE;
    for (i, p) in points.iter().enumerate() {
        let mut others = Expr::ONE;
        for (j, q) in points.iter().enumerate() {
            if i != j {
                others = others * q.z;
            }
        }
        x = x + p.x * others;
        y = y + p.y * others;
        z_prod = z_prod * p.z;
    }
    Vec3::new(x, y, Expr::from_int(n as i64) * z_prod)
}

/// Do two vectors name the same projective point (nonzero multiples)?
pub fn same_projective(p: Point, q: Point) -> Truth {
    p.cross(q)
        .is_zero_vector()
        .and(p.is_zero_vector().not())
        .and(q.is_zero_vector().not())
}
