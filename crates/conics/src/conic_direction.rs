//! Focal and conjugate axis directions.
//!
//! The focal axis of a central conic points along the eigenvector of
//! the affine part for the primary eigenvalue. Instead of solving the
//! eigenproblem, the direction comes from the square root of the
//! complex number f·(a − c + 2ib): its real and imaginary parts are the
//! direction components, which keeps everything in closed form and
//! picks an angle in (−π/2, π/2].

use conics_expr::{Expr, Hint, Truth};

pub use crate::central_conic::conic_norm_factor;

use crate::central_conic::conic_center;
use crate::line::line_through;
use crate::point::ideal_point;
use crate::vec3::{Line, Point, Vec3};
use crate::mat3::Conic;

/// Ideal point along the focal axis. Zero vector for circles, where
/// every direction is an axis.
pub fn focal_axis_direction(c: &Conic) -> Point {
    let a = c.get(0, 0);
    let b = c.get(0, 1);
    let cc = c.get(1, 1);
    let gap_sq = (a - cc) * (a - cc) + Expr::from_int(4) * b * b;
    if gap_sq.is_zero_with(Hint::Factor).is_true() {
        return Vec3::zero();
    }
    if c.det2().is_zero_with(Hint::Factor).is_true() {
        // Parabola: the axis direction is the ideal point of the conic
        // itself, visible in the adjugate's last column.
        let adj = c.adjugate();
        return ideal_point(adj.get(0, 2), adj.get(1, 2));
    }
    let f = conic_norm_factor(c);
    let u = f * (a - cc);
    let v = Expr::TWO * f * b;
    let s = gap_sq.sqrt();
    let half = Expr::ratio(1, 2);
    // Principal square root of u + iv, with |u + iv| = s.
    let re = ((s + u) * half).sqrt();
    let im = ((s - u) * half).sqrt() * crate::central_conic::sign_expr(v);
    ideal_point(re, im)
}

/// Ideal point perpendicular to the focal axis.
pub fn conjugate_axis_direction(c: &Conic) -> Point {
    let d = focal_axis_direction(c);
    ideal_point(-d.y, d.x)
}

/// Focal angle in (−π/2, π/2], measured from the positive x axis.
pub fn focal_axis_angle(c: &Conic) -> Expr {
    let d = focal_axis_direction(c);
    d.y.atan2(d.x)
}

/// The focal axis as a line. Passes through the center for central
/// conics and through the focus for parabolas.
pub fn focal_axis(c: &Conic) -> Line {
    let d = focal_axis_direction(c);
    if d.is_zero_vector().is_true() {
        return Vec3::zero();
    }
    let anchor = if c.det2().is_zero_with(Hint::Factor).is_true() {
        crate::parabola::focus_raw(c)
    } else {
        conic_center(c)
    };
    line_through(anchor, d)
}

/// Perpendicular axis of symmetry of a central conic, through its
/// center. Zero for circles.
pub fn conjugate_axis(c: &Conic) -> Line {
    let d = conjugate_axis_direction(c);
    if d.is_zero_vector().is_true() {
        return Vec3::zero();
    }
    line_through(conic_center(c), d)
}

/// Does the line run provably parallel to the focal axis?
pub fn is_axis_aligned(c: &Conic, l: Line) -> Truth {
    crate::line::are_parallel(focal_axis(c), l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::conic_matrix;
    use crate::point::same_projective;

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    #[test]
    fn circle_has_no_axis() {
        let c = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-4));
        assert_eq!(focal_axis_direction(&c).is_zero_vector(), Truth::True);
        assert_eq!(focal_axis(&c).is_zero_vector(), Truth::True);
    }

    #[test]
    fn wide_ellipse_points_along_x() {
        let c = conic_matrix(Expr::ratio(1, 4), int(0), int(1), int(0), int(0), int(-1));
        let d = focal_axis_direction(&c);
        assert_eq!(same_projective(d, ideal_point(int(1), int(0))), Truth::True);
        let conj = conjugate_axis_direction(&c);
        assert_eq!(
            same_projective(conj, ideal_point(int(0), int(1))),
            Truth::True
        );
    }

    #[test]
    fn rotated_hyperbola_axis_is_diagonal() {
        // xy = 1 opens along y = x.
        let c = conic_matrix(int(0), Expr::ratio(1, 2), int(0), int(0), int(0), int(-1));
        let d = focal_axis_direction(&c);
        assert_eq!(same_projective(d, ideal_point(int(1), int(1))), Truth::True);
    }

    #[test]
    fn parabola_axis_through_focus() {
        // y² + 2x − 1 = 0: opens along −x, focus at the origin.
        let c = conic_matrix(int(0), int(0), int(1), int(1), int(0), int(-1));
        let d = focal_axis_direction(&c);
        assert_eq!(same_projective(d, ideal_point(int(1), int(0))), Truth::True);
        // The axis is the x axis itself.
        let axis = focal_axis(&c);
        assert_eq!(
            crate::distance::line_contains_point(axis, crate::point::origin()),
            Truth::True
        );
        assert_eq!(are_ideal_parallel(axis), Truth::False);
    }

    fn are_ideal_parallel(l: Line) -> Truth {
        crate::distance::is_ideal_line(l)
    }
}
