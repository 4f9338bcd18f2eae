//! Exact distances.
//!
//! Distances involving ideal elements follow the homogeneous conventions:
//! one ideal operand gives infinity, two give NaN. The checks are
//! three-valued; when ideality is undecidable the raw formula is returned
//! and the division by the vanishing coordinate carries the question along.

use conics_expr::{Expr, Truth};

use crate::line::{ideal_line, ideal_point_on};
use crate::vec3::{Line, Point};

/// Euclidean distance between two points in homogeneous form:
/// √((x₂z₁−x₁z₂)² + (y₂z₁−y₁z₂)²)/(z₁z₂).
pub fn point_point_distance(p: Point, q: Point) -> Expr {
    let pz = p.z.is_zero();
    let qz = q.z.is_zero();
    if pz.is_true() && qz.is_true() {
        return Expr::NAN;
    }
    if pz.is_true() || qz.is_true() {
        return Expr::INFINITY;
    }
    let dx = q.x * p.z - p.x * q.z;
    let dy = q.y * p.z - p.y * q.z;
    (dx * dx + dy * dy).sqrt() / (p.z * q.z)
}

/// Signed distance from a point to a line: (ax + by + cz)/(√(a²+b²)·z).
/// Infinite for the ideal line and a finite point; NaN for an ideal point.
pub fn point_line_distance(l: Line, p: Point) -> Expr {
    if p.z.is_zero().is_true() {
        return Expr::NAN;
    }
    if l.xy_norm_sq().is_zero().is_true() {
        return Expr::INFINITY;
    }
    l.dot(p) / (l.xy_norm() * p.z)
}

/// Distance between two parallel lines, measured from a finite point of the
/// second line to the first. The chosen point is l₂ × (its ideal point),
/// the foot of the perpendicular from the origin.
pub fn parallel_line_distance(l1: Line, l2: Line) -> Expr {
    if l2.xy_norm_sq().is_zero().is_true() {
        // l2 is the ideal line (or zero); no finite point to measure from.
        return if l1.xy_norm_sq().is_zero().is_true() {
            Expr::NAN
        } else {
            Expr::INFINITY
        };
    }
    let foot = l2.cross(ideal_point_on(l2));
    point_line_distance(l1, foot)
}

/// Convenience: does the line pass through the point?
pub fn line_contains_point(l: Line, p: Point) -> Truth {
    l.dot(p).is_zero()
}

/// The ideal line never measures a finite offset to itself.
pub fn is_ideal_line(l: Line) -> Truth {
    l.cross(ideal_line()).is_zero_vector().and(l.is_zero_vector().not())
}
