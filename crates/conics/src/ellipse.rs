//! Ellipse constructions.

use conics_expr::Expr;

use crate::circle::unit_circle;
use crate::mat3::{Conic, Mat3};
use crate::point::{centroid, point_to_xy};
use crate::transform::{rotate_cs, scale_xy, transform_conic, translate};
use crate::vec3::{Point, Vec3};

fn placed_ellipse(center: Point, r1: Expr, r2: Expr, rot: Mat3) -> Conic {
    let (cx, cy) = point_to_xy(center);
    let t = translate(cx, cy) * rot * scale_xy(r1, r2);
    transform_conic(&t, &unit_circle())
}

/// Ellipse with the given center, semi-axes and focal-axis angle,
/// produced by mapping the unit circle through translate·rotate·scale.
pub fn ellipse(center: Point, r1: Expr, r2: Expr, angle: Expr) -> Conic {
    placed_ellipse(center, r1, r2, crate::transform::rotate(angle))
}

/// As [`ellipse`] with the focal axis given as a direction vector
/// instead of an angle, avoiding trigonometric entries for rational
/// directions.
pub fn ellipse_from_direction(center: Point, r1: Expr, r2: Expr, dir: Vec3) -> Conic {
    let n = dir.xy_norm();
    placed_ellipse(center, r1, r2, rotate_cs(dir.x / n, dir.y / n))
}

/// Steiner circumellipse of a triangle: the unique ellipse through the
/// three vertices centered at the centroid.
pub fn steiner_circumellipse(p1: Point, p2: Point, p3: Point) -> Conic {
    let g = centroid(&[p1, p2, p3]);
    crate::conic::conic_from_center_points(g, p1, p2, p3)
}

/// Steiner inellipse: tangent to the three sides at their midpoints,
/// which makes it the circumellipse of the midpoint triangle.
pub fn steiner_inellipse(p1: Point, p2: Point, p3: Point) -> Conic {
    let m12 = crate::line::midpoint(p1, p2);
    let m23 = crate::line::midpoint(p2, p3);
    let m31 = crate::line::midpoint(p3, p1);
    steiner_circumellipse(m12, m23, m31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::Truth;

    use crate::central_conic::{conic_center, primary_radius_sq, secondary_radius_sq};
    use crate::conic_classes::is_ellipse;
    use crate::incidence::conic_contains_point;
    use crate::matrix::{conic_matrix, is_nonzero_multiple};
    use crate::point::{point, same_projective};

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    #[test]
    fn axis_aligned_from_zero_angle() {
        let c = ellipse(point(int(0), int(0)), int(2), int(1), Expr::ZERO);
        let expect = conic_matrix(int(1), int(0), int(4), int(0), int(0), int(-4));
        assert_eq!(is_nonzero_multiple(&c, &expect), Truth::True);
    }

    #[test]
    fn diagonal_direction_recovers_radii() {
        let c = ellipse_from_direction(
            point(int(1), int(-1)),
            int(3),
            int(2),
            Vec3::new(int(1), int(1), int(0)),
        );
        assert_eq!(is_ellipse(&c), Truth::True);
        assert_eq!(
            same_projective(conic_center(&c), point(int(1), int(-1))),
            Truth::True
        );
        assert_eq!((primary_radius_sq(&c) - int(9)).is_zero(), Truth::True);
        assert_eq!((secondary_radius_sq(&c) - int(4)).is_zero(), Truth::True);
    }

    #[test]
    fn circumellipse_passes_through_the_vertices() {
        let (a, b, c) = (
            point(int(0), int(0)),
            point(int(4), int(0)),
            point(int(1), int(3)),
        );
        let e = steiner_circumellipse(a, b, c);
        for p in [a, b, c] {
            assert_eq!(conic_contains_point(&e, p), Truth::True);
        }
        assert_eq!(is_ellipse(&e), Truth::True);
    }

    #[test]
    fn inellipse_touches_the_midpoints() {
        let (a, b, c) = (
            point(int(0), int(0)),
            point(int(4), int(0)),
            point(int(1), int(3)),
        );
        let e = steiner_inellipse(a, b, c);
        assert_eq!(conic_contains_point(&e, crate::line::midpoint(a, b)), Truth::True);
        assert_eq!(
            crate::central_conic::concentric(&e, &steiner_circumellipse(a, b, c)),
            Truth::True
        );
    }
}
