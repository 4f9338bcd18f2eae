//! Polar representation of conics.
//!
//! A polar conic is an invertible 3×3 matrix P tracing the curve
//! P·(cos θ, sin θ, 1)ᵀ. It is a second, redundant representation: the
//! quadratic matrix is recovered through the adjugate, and the choice
//! of where θ = 0 lands on the curve is the polar origin.

use conics_expr::{Expr, Sign};

use crate::central_conic::{conic_center, primary_radius, secondary_radius, secondary_radius_sq};
use crate::conic_classes::{is_ellipse, is_hyperbola};
use crate::conic_direction::focal_axis_direction;
use crate::error::ConicError;
use crate::mat3::{Conic, Mat3, PolarConic};
use crate::vec3::{Line, Point, Vec3};

/// Anchor of the angle parameter on the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolarOrigin {
    /// θ = 0 at a vertex on the focal axis.
    Vertex,
    /// θ = 0 at an end of the conjugate axis.
    Covertex,
    /// θ = 0 at an ideal point of the curve.
    IdealPoint,
    /// θ = 0 where the horizontal ray from the center meets the curve.
    Horizontal,
    /// θ = 0 where the vertical ray from the center meets the curve.
    Vertical,
}

/// The curve point at parameter θ.
pub fn point_at_angle(p: &PolarConic, theta: Expr) -> Point {
    *p * Vec3::new(theta.cos(), theta.sin(), Expr::ONE)
}

/// Inverse of [`point_at_angle`]: maps the curve point back to its
/// parameter. adj(P)·q is proportional to (cos θ, sin θ, 1), so the
/// angle is an atan2 of its dehomogenized parts.
pub fn angle_at_point(p: &PolarConic, q: Point) -> Expr {
    let v = p.adjugate() * q;
    (v.y / v.z).atan2(v.x / v.z)
}

/// Tangent line of the curve at parameter θ.
pub fn tangent_at_angle(p: &PolarConic, theta: Expr) -> Line {
    p.adjugate().transpose() * Vec3::new(theta.cos(), theta.sin(), -Expr::ONE)
}

/// Sign of the curvature at parameter θ: positive where the trace
/// bends towards its left. None when undecidable.
pub fn curvature_sign_at_angle(p: &PolarConic, theta: Expr) -> Option<Sign> {
    let w = p.get(2, 0) * theta.cos() + p.get(2, 1) * theta.sin() + p.get(2, 2);
    (w * p.determinant()).sign_of()
}

/// The quadratic conic matrix traced by the polar conic:
/// adj(P)ᵀ·diag(1,1,−1)·adj(P), the image of the unit circle's dual.
pub fn conic_from_polar_matrix(p: &PolarConic) -> Conic {
    let adj = p.adjugate();
    let mirror = Mat3::diagonal(Expr::ONE, Expr::ONE, -Expr::ONE);
    adj.transpose() * (mirror * adj)
}

/// Unit direction of the focal axis, falling back to the x axis for
/// circles where any direction serves.
fn axis_cos_sin(c: &Conic) -> (Expr, Expr) {
    let d = focal_axis_direction(c);
    if d.is_zero_vector().is_true() {
        return (Expr::ONE, Expr::ZERO);
    }
    let n = d.xy_norm();
    (d.x / n, d.y / n)
}

fn affine_center(c: &Conic) -> Vec3 {
    let m = conic_center(c);
    Vec3::new(m.x / m.z, m.y / m.z, Expr::ONE)
}

/// Polar matrix of an ellipse with the angle anchored at the chosen
/// origin. COVERTEX and IDEAL_POINT anchors are not defined for
/// ellipses and fail with a domain error.
pub fn ellipse_to_polar_matrix(c: &Conic, origin: PolarOrigin) -> Result<PolarConic, ConicError> {
    if is_ellipse(c).is_false() {
        return Err(ConicError::NotAnEllipse);
    }
    let (co, si) = axis_cos_sin(c);
    let r1 = primary_radius(c);
    let r2 = secondary_radius(c);
    let center = affine_center(c);
    match origin {
        PolarOrigin::Vertex => Ok(Mat3::from_cols(
            Vec3::new(r1 * co, r1 * si, Expr::ZERO),
            Vec3::new(-(r2 * si), r2 * co, Expr::ZERO),
            center,
        )),
        PolarOrigin::Horizontal => {
            // Anchor θ = 0 on the horizontal through the center; the
            // secant columns follow from the axis lengths projected
            // onto the anchor frame.
            let n = (co * co / (r1 * r1) + si * si / (r2 * r2)).sqrt();
            let c0 = Vec3::new(n.recip(), Expr::ZERO, Expr::ZERO);
            let c1 = Vec3::new(
                (co * si / n) * (r1 / r2 - r2 / r1),
                (si * si * r1 / r2 + co * co * r2 / r1) / n,
                Expr::ZERO,
            );
            Ok(Mat3::from_cols(c0, c1, center))
        }
        PolarOrigin::Vertical => {
            let n = (si * si / (r1 * r1) + co * co / (r2 * r2)).sqrt();
            let c0 = Vec3::new(Expr::ZERO, n.recip(), Expr::ZERO);
            let c1 = Vec3::new(
                -(co * co * r1 / r2 + si * si * r2 / r1) / n,
                (-(si * co) / n) * (r1 / r2 - r2 / r1),
                Expr::ZERO,
            );
            Ok(Mat3::from_cols(c0, c1, center))
        }
        other => Err(ConicError::UnsupportedPolarOrigin(other)),
    }
}

/// Polar matrix of a hyperbola, anchored at a vertex. The conjugate
/// column carries a factor i, so real parameters trace the complex
/// circle through the real branches.
pub fn hyperbola_to_polar_matrix(
    c: &Conic,
    origin: PolarOrigin,
) -> Result<PolarConic, ConicError> {
    if is_hyperbola(c).is_false() {
        return Err(ConicError::NotAHyperbola);
    }
    match origin {
        PolarOrigin::Vertex => {
            let (co, si) = axis_cos_sin(c);
            let r1 = primary_radius(c);
            let r2 = (-secondary_radius_sq(c)).sqrt();
            Ok(Mat3::from_cols(
                Vec3::new(r1 * co, r1 * si, Expr::ZERO),
                Vec3::new(-(Expr::I * r2 * si), Expr::I * r2 * co, Expr::ZERO),
                affine_center(c),
            ))
        }
        other => Err(ConicError::UnsupportedPolarOrigin(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::{symbol, Assume, Truth};

    use crate::incidence::conic_contains_point;
    use crate::matrix::{conic_matrix, is_nonzero_multiple};
    use crate::point::point;

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    fn wide_ellipse() -> Conic {
        // x²/4 + y² = 1
        conic_matrix(Expr::ratio(1, 4), int(0), int(1), int(0), int(0), int(-1))
    }

    #[test]
    fn vertex_polar_of_axis_aligned_ellipse() {
        let p = ellipse_to_polar_matrix(&wide_ellipse(), PolarOrigin::Vertex).unwrap();
        let start = point_at_angle(&p, Expr::ZERO);
        assert_eq!(
            crate::point::same_projective(start, point(int(2), int(0))),
            Truth::True
        );
        // The whole parameterization stays on the curve.
        let t = symbol("t", Assume::real());
        assert_eq!(conic_contains_point(&wide_ellipse(), point_at_angle(&p, t)), Truth::True);
    }

    #[test]
    fn polar_matrix_recovers_the_conic() {
        for origin in [PolarOrigin::Vertex, PolarOrigin::Horizontal, PolarOrigin::Vertical] {
            let p = ellipse_to_polar_matrix(&wide_ellipse(), origin).unwrap();
            let back = conic_from_polar_matrix(&p);
            assert_eq!(is_nonzero_multiple(&back, &wide_ellipse()), Truth::True);
        }
    }

    #[test]
    fn horizontal_anchor_lies_on_the_ray_through_the_center() {
        // Axes 2 and 1 along the 3-4-5 direction. The anchor sits where
        // the horizontal through the center meets the curve, which for a
        // tilted ellipse is not the rightmost point.
        let e = crate::ellipse::ellipse_from_direction(
            point(int(0), int(0)),
            int(2),
            int(1),
            Vec3::new(int(3), int(4), int(0)),
        );
        let p = ellipse_to_polar_matrix(&e, PolarOrigin::Horizontal).unwrap();
        let start = point_at_angle(&p, Expr::ZERO);
        assert_eq!(start.y.is_zero(), Truth::True);
        assert_eq!(conic_contains_point(&e, start), Truth::True);
        let t = symbol("h", Assume::real());
        assert_eq!(conic_contains_point(&e, point_at_angle(&p, t)), Truth::True);
    }

    #[test]
    fn angle_recovery_on_the_unit_circle() {
        let p = Mat3::identity();
        let q = point(Expr::ratio(3, 5), Expr::ratio(4, 5));
        let alpha = angle_at_point(&p, q);
        assert_eq!(
            (alpha - Expr::ratio(4, 5).atan2(Expr::ratio(3, 5))).is_zero(),
            Truth::True
        );
    }

    #[test]
    fn tangent_at_the_vertex_is_vertical() {
        let p = ellipse_to_polar_matrix(&wide_ellipse(), PolarOrigin::Vertex).unwrap();
        let t = tangent_at_angle(&p, Expr::ZERO);
        // x = 2.
        assert_eq!(
            crate::line::same_line(t, Vec3::new(int(1), int(0), int(-2))),
            Truth::True
        );
    }

    #[test]
    fn curvature_turns_left_on_a_counterclockwise_circle() {
        let p = Mat3::identity();
        assert_eq!(curvature_sign_at_angle(&p, Expr::ZERO), Some(Sign::Positive));
    }

    #[test]
    fn unsupported_origins_fail() {
        assert!(matches!(
            ellipse_to_polar_matrix(&wide_ellipse(), PolarOrigin::Covertex),
            Err(ConicError::UnsupportedPolarOrigin(PolarOrigin::Covertex))
        ));
        let hyp = conic_matrix(int(1), int(0), int(-1), int(0), int(0), int(-1));
        assert!(matches!(
            hyperbola_to_polar_matrix(&hyp, PolarOrigin::Horizontal),
            Err(ConicError::UnsupportedPolarOrigin(_))
        ));
    }

    #[test]
    fn hyperbola_polar_parameterization_is_on_the_curve() {
        // x² − y² = 1, vertex (1, 0).
        let hyp = conic_matrix(int(1), int(0), int(-1), int(0), int(0), int(-1));
        let p = hyperbola_to_polar_matrix(&hyp, PolarOrigin::Vertex).unwrap();
        let start = point_at_angle(&p, Expr::ZERO);
        assert_eq!(
            crate::point::same_projective(start, point(int(1), int(0))),
            Truth::True
        );
        let t = symbol("t", Assume::real());
        assert_eq!(conic_contains_point(&hyp, point_at_angle(&p, t)), Truth::True);
    }
}
