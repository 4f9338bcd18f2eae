//! Intersections of lines and conics.
//!
//! The conic-line routine follows Richter-Gebert §11.3: embed the line
//! into a degenerate member of the pencil and split it. Complex
//! conjugate points come out when the line misses the conic, a doubled
//! point when it is tangent.

use conics_expr::Expr;

use crate::mat3::Conic;
use crate::matrix::{skew, Witness};
use crate::vec3::{Line, Point, Vec3};

/// Outcome of intersecting a line with a conic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineConicMeet {
    /// The two intersection points, complex conjugates if the line
    /// misses the conic, equal if it is tangent.
    Pair(Point, Point),
    /// Every point of the line lies on the conic.
    LineOnConic,
    /// The kernel could not decide which component of the line is
    /// nonzero, or could not locate a pivot in the split matrix.
    Undecided,
}

/// Meet of two lines: an ideal point when parallel, the zero vector
/// when coincident.
pub fn meet_lines(l1: Line, l2: Line) -> Point {
    l1.cross(l2)
}

/// Both intersection points of a line with a conic.
pub fn intersect_conic_line(c: &Conic, l: Line) -> LineConicMeet {
    let s = skew(l);
    let m = s.transpose() * (*c * s);
    // α is chosen so that M + α·S drops to rank 1. Its square is a
    // ratio of 2×2 minors against any provably nonzero line component.
    let mut pivot = None;
    for k in 0..3 {
        if l.get(k).is_nonzero().is_true() {
            pivot = Some(k);
            break;
        }
    }
    let Some(k) = pivot else {
        return if l.is_zero_vector().is_true() {
            // The zero vector is not a line; the invalid points mark
            // the result as meaningless.
            LineConicMeet::Pair(Vec3::zero(), Vec3::zero())
        } else {
            LineConicMeet::Undecided
        };
    };
    let (i, j) = match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let alpha =
        (m.get(i, j) * m.get(j, i) - m.get(i, i) * m.get(j, j)).sqrt() / l.get(k);
    let n = m + s * alpha;
    match crate::matrix::non_zero_cross(&n) {
        Witness::At { row, col } => LineConicMeet::Pair(n.col(col), n.row(row)),
        Witness::Nowhere => LineConicMeet::LineOnConic,
        Witness::Unknown => LineConicMeet::Undecided,
    }
}

/// The two ideal points of the conic, i.e. its meet with the ideal
/// line. Real for hyperbolas and line pairs, a double point for
/// parabolas, complex conjugates for ellipses.
pub fn ideal_points(c: &Conic) -> LineConicMeet {
    intersect_conic_line(c, Vec3::new(Expr::ZERO, Expr::ZERO, Expr::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::{symbol, Assume, Truth};

    use crate::incidence::conic_contains_point;
    use crate::matrix::conic_matrix;
    use crate::point::{ideal_point, point, same_projective};

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    fn unit_circle() -> Conic {
        conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1))
    }

    fn meet_points(m: LineConicMeet) -> (Point, Point) {
        match m {
            LineConicMeet::Pair(p, q) => (p, q),
            other => panic!("expected a point pair, got {other:?}"),
        }
    }

    #[test]
    fn secant_through_the_circle() {
        // y = 0 meets the unit circle at (±1, 0).
        let (p, q) = meet_points(intersect_conic_line(
            &unit_circle(),
            Vec3::new(int(0), int(1), int(0)),
        ));
        let hit = |pt: Point, x: i64| same_projective(pt, point(int(x), int(0))).is_true();
        assert!(hit(p, 1) && hit(q, -1) || hit(p, -1) && hit(q, 1));
    }

    #[test]
    fn tangent_touches_once() {
        // x = 1 is tangent at (1, 0).
        let (p, q) = meet_points(intersect_conic_line(
            &unit_circle(),
            Vec3::new(int(1), int(0), int(-1)),
        ));
        assert_eq!(same_projective(p, point(int(1), int(0))), Truth::True);
        assert_eq!(same_projective(q, point(int(1), int(0))), Truth::True);
    }

    #[test]
    fn missing_line_gives_conjugate_points() {
        // x = 2 misses the circle; the points are complex but still lie
        // on both curve and line.
        let l = Vec3::new(int(1), int(0), int(-2));
        let (p, q) = meet_points(intersect_conic_line(&unit_circle(), l));
        for pt in [p, q] {
            assert_eq!(conic_contains_point(&unit_circle(), pt), Truth::True);
            assert_eq!(l.dot(pt).is_zero(), Truth::True);
        }
    }

    #[test]
    fn hyperbola_ideal_points_are_the_asymptotic_directions() {
        // xy = 1 has ideal points (1,0,0) and (0,1,0).
        let c = conic_matrix(int(0), Expr::ratio(1, 2), int(0), int(0), int(0), int(-1));
        let (p, q) = meet_points(ideal_points(&c));
        let along = |pt: Point, x: i64, y: i64| {
            same_projective(pt, ideal_point(int(x), int(y))).is_true()
        };
        assert!(along(p, 1, 0) && along(q, 0, 1) || along(p, 0, 1) && along(q, 1, 0));
    }

    #[test]
    fn undecidable_line_component() {
        let t = symbol("t", Assume::real());
        let l = Vec3::new(t, int(0), t - int(1));
        assert_eq!(
            intersect_conic_line(&unit_circle(), l),
            LineConicMeet::Undecided
        );
    }

    #[test]
    fn zero_vector_is_not_a_line() {
        let (p, q) = meet_points(intersect_conic_line(&unit_circle(), Vec3::zero()));
        assert_eq!(p.is_zero_vector(), Truth::True);
        assert_eq!(q.is_zero_vector(), Truth::True);
    }

    #[test]
    fn line_on_line_pair_conic() {
        // The pair xy = 0 contains the line x = 0 entirely.
        let c = conic_matrix(int(0), Expr::ratio(1, 2), int(0), int(0), int(0), int(0));
        assert_eq!(
            intersect_conic_line(&c, Vec3::new(int(1), int(0), int(0))),
            LineConicMeet::LineOnConic
        );
    }
}
