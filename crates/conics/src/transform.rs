//! Projective transformations.
//!
//! A transform T sends a point to T·p. To stay exact without inverting, a
//! line goes to adj(T)ᵀ·l and a conic to adj(T)ᵀ·C·adj(T); both agree with
//! the inverse-based formulas up to the projective scale det(T).

use conics_expr::Expr;

use crate::mat3::{Conic, Mat3, Transform};
use crate::vec3::{Line, Point};

/// Translation by (dx, dy).
pub fn translate(dx: Expr, dy: Expr) -> Transform {
    let o = Expr::ZERO;
    let l = Expr::ONE;
    Mat3::new(l, o, dx, o, l, dy, o, o, l)
}

/// Rotation about the origin from an explicit cosine/sine pair.
pub fn rotate_cs(c: Expr, s: Expr) -> Transform {
    let o = Expr::ZERO;
    let l = Expr::ONE;
    Mat3::new(c, -s, o, s, c, o, o, o, l)
}

/// Rotation about the origin by `angle`.
pub fn rotate(angle: Expr) -> Transform {
    rotate_cs(angle.cos(), angle.sin())
}

/// Rotation about an arbitrary finite center.
pub fn rotate_about(angle: Expr, center: Point) -> Transform {
    let (cx, cy) = (center.x / center.z, center.y / center.z);
    translate(cx, cy) * rotate(angle) * translate(-cx, -cy)
}

/// Anisotropic scale about the origin.
pub fn scale_xy(sx: Expr, sy: Expr) -> Transform {
    Mat3::diagonal(sx, sy, Expr::ONE)
}

/// Uniform scale about the origin.
pub fn scale(s: Expr) -> Transform {
    scale_xy(s, s)
}

/// T·p.
pub fn transform_point(t: &Transform, p: Point) -> Point {
    t.mul_vec(p)
}

/// adj(T)ᵀ·l.
pub fn transform_line(t: &Transform, l: Line) -> Line {
    t.adjugate().transpose().mul_vec(l)
}

/// adj(T)ᵀ·C·adj(T).
pub fn transform_conic(t: &Transform, c: &Conic) -> Conic {
    let adj = t.adjugate();
    adj.transpose().mul_mat(c).mul_mat(&adj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::Truth;

    use crate::matrix::{conic_matrix, quadratic_form};
    use crate::point::{point, same_projective};

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    #[test]
    fn translate_moves_origin() {
        let t = translate(int(3), int(-1));
        let p = transform_point(&t, point(int(0), int(0)));
        assert_eq!(same_projective(p, point(int(3), int(-1))), Truth::True);
    }

    #[test]
    fn line_incidence_is_covariant() {
        let t = translate(int(2), int(5)) * scale_xy(int(3), int(1));
        let p = point(int(1), int(4));
        let q = point(int(-2), int(7));
        let l = p.cross(q);
        let tl = transform_line(&t, l);
        let tp = transform_point(&t, p);
        assert_eq!(tl.dot(tp).is_zero(), Truth::True);
    }

    #[test]
    fn conic_incidence_is_covariant() {
        // Unit circle through (1, 0); rotate about (2, 0) by a symbolic angle.
        let circle = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1));
        let theta = conics_expr::symbol("theta_cov", conics_expr::Assume::real());
        let t = rotate_about(theta, point(int(2), int(0)));
        let tc = transform_conic(&t, &circle);
        let tp = transform_point(&t, point(int(1), int(0)));
        assert_eq!(quadratic_form(&tc, tp).is_zero(), Truth::True);
    }

    #[test]
    fn rotation_preserves_unit_circle() {
        let circle = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1));
        let theta = conics_expr::symbol("theta_rot", conics_expr::Assume::real());
        let t = rotate(theta);
        let tc = transform_conic(&t, &circle);
        assert_eq!(crate::matrix::is_nonzero_multiple(&tc, &circle), Truth::True);
    }
}
