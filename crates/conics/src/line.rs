//! Lines as dual 3-vectors.

use conics_expr::{Expr, Truth};

use crate::vec3::{Line, Point, Vec3};

/// Line through two points: their cross product. Zero if the points
/// coincide projectively.
pub fn line_through(p: Point, q: Point) -> Line {
    p.cross(q)
}

/// The ideal line (0, 0, 1).
pub fn ideal_line() -> Line {
    Vec3::new(Expr::ZERO, Expr::ZERO, Expr::ONE)
}

/// Horizontal line y = y0.
pub fn horizontal_line(y0: Expr) -> Line {
    Vec3::new(Expr::ZERO, Expr::ONE, -y0)
}

/// Vertical line x = x0.
pub fn vertical_line(x0: Expr) -> Line {
    Vec3::new(Expr::ONE, Expr::ZERO, -x0)
}

/// Line parallel to `l` through the point `p`: same normal (a, b), with the
/// constant fixed by incidence.
pub fn parallel_through(l: Line, p: Point) -> Line {
    Vec3::new(l.x * p.z, l.y * p.z, -(l.x * p.x + l.y * p.y))
}

/// Line perpendicular to `l` through the point `p`: normal rotated a
/// quarter turn.
pub fn perpendicular_through(l: Line, p: Point) -> Line {
    Vec3::new(-l.y * p.z, l.x * p.z, l.y * p.x - l.x * p.y)
}

/// Homogeneous midpoint of two finite points.
pub fn midpoint(p: Point, q: Point) -> Point {
    Vec3::new(
        p.x * q.z + q.x * p.z,
        p.y * q.z + q.y * p.z,
        Expr::TWO * p.z * q.z,
    )
}

/// Perpendicular bisector of the segment pq.
pub fn perpendicular_bisector(p: Point, q: Point) -> Line {
    perpendicular_through(line_through(p, q), midpoint(p, q))
}

/// One of the two angle bisectors of l₁ and l₂: l₁·‖n₂‖ − l₂·‖n₁‖ where
/// ‖nᵢ‖ is the Euclidean norm of the normal (aᵢ, bᵢ). Negate either line
/// for the other bisector. Degenerates to the zero vector for coincident
/// or same-direction parallel lines and for two ideal lines; for
/// opposite-direction parallels it is the center line, and for a real and
/// an ideal line it stays ideal.
pub fn angle_bisector(l1: Line, l2: Line) -> Line {
    l1 * l2.xy_norm() - l2 * l1.xy_norm()
}

/// Ideal point on a line: its direction, l × (0,0,1) = (b, −a, 0).
pub fn ideal_point_on(l: Line) -> Point {
    l.cross(ideal_line())
}

/// Do the two coordinate vectors describe the same line?
pub fn same_line(l1: Line, l2: Line) -> Truth {
    crate::point::same_projective(l1, l2)
}

/// a₁b₂ − a₂b₁ = 0. The ideal line is parallel to everything.
pub fn are_parallel(l1: Line, l2: Line) -> Truth {
    (l1.x * l2.y - l2.x * l1.y).is_zero()
}

/// a₁a₂ + b₁b₂ = 0.
pub fn are_perpendicular(l1: Line, l2: Line) -> Truth {
    (l1.x * l2.x + l1.y * l2.y).is_zero()
}
