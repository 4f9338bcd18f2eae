//! Conic construction.
//!
//! Every constructor returns a symmetric matrix up to a nonzero scalar.
//! Ambiguous data (collinear five-point subsets) yields the zero matrix
//! rather than an error.

use conics_expr::Expr;

use crate::mat3::{Conic, Mat3};
use crate::matrix::conic_matrix;
use crate::transform::{transform_conic, translate};
use crate::vec3::{Line, Point, Vec3};

/// Conic of the polynomial ax² + 2bxy + cy² + 2dx + 2ey + f in the symbols
/// `x` and `y`: the coefficients are extracted symbolically, odd-degree
/// ones halved for the matrix entries.
pub fn conic_from_polynomial(poly: Expr, x: Expr, y: Expr) -> Conic {
    let half = Expr::ratio(1, 2);
    conic_matrix(
        poly.coeff(x, y, 2, 0),
        poly.coeff(x, y, 1, 1) * half,
        poly.coeff(x, y, 0, 2),
        poly.coeff(x, y, 1, 0) * half,
        poly.coeff(x, y, 0, 1) * half,
        poly.coeff(x, y, 0, 0),
    )
}

/// Conic through five points (Richter-Gebert §10.1).
///
/// Two degenerate line-pair conics G (through p₁p₂ and p₃p₄) and H
/// (through p₁p₃ and p₂p₄) span the pencil through the first four points;
/// p₅ fixes the member. Collinear subsets collapse to the zero matrix.
pub fn five_point_conic(p1: Point, p2: Point, p3: Point, p4: Point, p5: Point) -> Conic {
    let g1 = p1.cross(p2);
    let g2 = p3.cross(p4);
    let h1 = p1.cross(p3);
    let h2 = p2.cross(p4);
    let g = Mat3::outer(g1, g2) + Mat3::outer(g2, g1);
    let h = Mat3::outer(h1, h2) + Mat3::outer(h2, h1);
    g * (p5.dot(h1) * p5.dot(h2)) - h * (p5.dot(g1) * p5.dot(g2))
}

/// Conic with the given focus, directrix and eccentricity: the locus of
/// dist(p, focus)² = e²·dist(p, directrix)², cleared of denominators:
/// C = (a²+b²)·M_focus − e²·(d·dᵀ).
pub fn conic_from_focus_directrix(focus: Point, directrix: Line, ecc: Expr) -> Conic {
    let (fx, fy) = (focus.x / focus.z, focus.y / focus.z);
    let m_focus = zero_circle(fx, fy);
    m_focus * directrix.xy_norm_sq() - Mat3::outer(directrix, directrix) * (ecc * ecc)
}

/// The radius-zero circle at (cx, cy): (x−cx)² + (y−cy)².
fn zero_circle(cx: Expr, cy: Expr) -> Conic {
    conic_matrix(
        Expr::ONE,
        Expr::ZERO,
        Expr::ONE,
        -cx,
        -cy,
        cx * cx + cy * cy,
    )
}

/// Conic with foci f₁, f₂ and primary radius r, from the eccentricity-free
/// equation obtained by squaring d₁ ± d₂ = 2r twice:
/// 16r²·d₂² − (4r² + d₂² − d₁²)² = 0. Ellipses and hyperbolas share the
/// matrix; the sign of r² against the squared linear eccentricity picks
/// the branch.
pub fn conic_from_foci_radius(f1: Point, f2: Point, r: Expr) -> Conic {
    conic_from_foci_radius_sq(f1, f2, r * r)
}

/// As [`conic_from_foci_radius`] with the squared radius given directly,
/// so exact radii like √8 need not be re-rooted.
pub fn conic_from_foci_radius_sq(f1: Point, f2: Point, r_sq: Expr) -> Conic {
    let (p, q) = (f1.x / f1.z, f1.y / f1.z);
    let (s, t) = (f2.x / f2.z, f2.y / f2.z);
    let k = Expr::from_int(4) * r_sq;
    // d₂² − d₁² is linear: L·(x, y, 1).
    let l = Vec3::new(
        Expr::TWO * (p - s),
        Expr::TWO * (q - t),
        k + s * s + t * t - p * p - q * q,
    );
    zero_circle(s, t) * (Expr::from_int(4) * k) - Mat3::outer(l, l)
}

/// Squared distance between two finite points, exactly.
fn dist_sq(p: Point, q: Point) -> Expr {
    let dx = q.x * p.z - p.x * q.z;
    let dy = q.y * p.z - p.y * q.z;
    (dx * dx + dy * dy) / (p.z * p.z * q.z * q.z)
}

/// Ellipse with foci f₁, f₂ through the point p₀. The squared radius is
/// recovered without nested radicals through the rationalizing product
/// d₁²·d₂²: 4r² = d₁² + d₂² + 2√(d₁²·d₂²).
pub fn ellipse_from_foci_point(f1: Point, f2: Point, p0: Point) -> Conic {
    foci_point_conic(f1, f2, p0, Expr::TWO)
}

/// Hyperbola with foci f₁, f₂ through the point p₀: as the ellipse case
/// but with 2r = |d₁ − d₂|, flipping the sign of the mixed term.
pub fn hyperbola_from_foci_point(f1: Point, f2: Point, p0: Point) -> Conic {
    foci_point_conic(f1, f2, p0, -Expr::TWO)
}

fn foci_point_conic(f1: Point, f2: Point, p0: Point, mixed: Expr) -> Conic {
    let u = dist_sq(p0, f1);
    let v = dist_sq(p0, f2);
    let r_sq = (u + v + mixed * (u * v).sqrt()) * Expr::ratio(1, 4);
    conic_from_foci_radius_sq(f1, f2, r_sq)
}

/// Central conic with the given center through three points.
///
/// In coordinates centered on the center the equation is
/// A·u² + 2B·uv + C·v² = F; the three points give a homogeneous Cramer
/// system whose solution is a cross product of two difference rows.
pub fn conic_from_center_points(center: Point, p1: Point, p2: Point, p3: Point) -> Conic {
    let (cx, cy) = (center.x / center.z, center.y / center.z);
    let uv = |p: Point| (p.x / p.z - cx, p.y / p.z - cy);
    let (u1, v1) = uv(p1);
    let (u2, v2) = uv(p2);
    let (u3, v3) = uv(p3);
    let row = |u: Expr, v: Expr| Vec3::new(u * u, u * v, v * v);
    let r1 = row(u1, v1) - row(u3, v3);
    let r2 = row(u2, v2) - row(u3, v3);
    let sol = r1.cross(r2);
    let (a, b2, c) = (sol.x, sol.y, sol.z);
    let f = a * u3 * u3 + b2 * u3 * v3 + c * v3 * v3;
    let centered = conic_matrix(
        a,
        b2 * Expr::ratio(1, 2),
        c,
        Expr::ZERO,
        Expr::ZERO,
        -f,
    );
    transform_conic(&translate(cx, cy), &centered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::{symbol, Assume, Truth};

    use crate::conic_classes::is_degenerate;
    use crate::incidence::conic_contains_point;
    use crate::matrix::is_nonzero_multiple;
    use crate::point::point;

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    #[test]
    fn polynomial_roundtrip() {
        let x = symbol("x", Assume::real());
        let y = symbol("y", Assume::real());
        // 3x² + 4xy - y² + 6x - 10y + 7
        let poly = int(3) * x * x + int(4) * x * y - y * y + int(6) * x - int(10) * y + int(7);
        let c = conic_from_polynomial(poly, x, y);
        let expect = conic_matrix(int(3), int(2), int(-1), int(3), int(-5), int(7));
        assert_eq!((c - expect).is_zero_matrix(), Truth::True);
    }

    #[test]
    fn five_points_lie_on_their_conic() {
        // No three collinear; four lie on the unit circle and the fifth
        // pins it down.
        let p = [
            point(int(1), int(0)),
            point(int(-1), int(0)),
            point(int(0), int(1)),
            point(int(0), int(-1)),
            point(Expr::ratio(3, 5), Expr::ratio(4, 5)),
        ];
        let c = five_point_conic(p[0], p[1], p[2], p[3], p[4]);
        for q in &p {
            assert_eq!(conic_contains_point(&c, *q), Truth::True);
        }
        assert_eq!(is_degenerate(&c), Truth::False);
        let circle = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1));
        assert_eq!(is_nonzero_multiple(&c, &circle), Truth::True);
    }

    #[test]
    fn collinear_triple_forces_a_line_pair() {
        // (1,2), (3,5), (5,8) all satisfy 3x - 2y + 1 = 0, so the only
        // conic through the five is that line paired with the line
        // through (2,3) and (8,13).
        let pts = [(1, 2), (2, 3), (3, 5), (5, 8), (8, 13)];
        let p: Vec<Point> = pts.iter().map(|&(x, y)| point(int(x), int(y))).collect();
        let c = five_point_conic(p[0], p[1], p[2], p[3], p[4]);
        for q in &p {
            assert_eq!(conic_contains_point(&c, *q), Truth::True);
        }
        assert_eq!(is_degenerate(&c), Truth::True);
        let pair = crate::degenerate_conic::line_pair_conic(
            Vec3::new(int(3), int(-2), int(1)),
            Vec3::new(int(5), int(-3), int(-1)),
        );
        assert_eq!(is_nonzero_multiple(&c, &pair), Truth::True);
    }

    #[test]
    fn five_points_collinear_gives_zero() {
        let p: Vec<Point> = (0..5).map(|i| point(int(i), int(2 * i))).collect();
        let c = five_point_conic(p[0], p[1], p[2], p[3], p[4]);
        assert_eq!(c.is_zero_matrix(), Truth::True);
    }

    #[test]
    fn focus_directrix_parabola() {
        // Focus at the origin, directrix x = 1, e = 1: y² + 2x − 1 = 0.
        let c = conic_from_focus_directrix(
            point(int(0), int(0)),
            Vec3::new(int(1), int(0), int(-1)),
            int(1),
        );
        let expect = conic_matrix(int(0), int(0), int(1), int(1), int(0), int(-1));
        assert_eq!(is_nonzero_multiple(&c, &expect), Truth::True);
    }

    #[test]
    fn foci_radius_scenario() {
        // Foci (0,0), (3,4), r = 10: contains the axis point at distance
        // (10 + 5/2) from the first focus along the focal axis.
        let c = conic_from_foci_radius(point(int(0), int(0)), point(int(3), int(4)), int(10));
        // Center (3/2, 2); vertex = center + 10·(3/5, 4/5) = (15/2, 10).
        let vertex = point(Expr::ratio(15, 2), int(10));
        assert_eq!(conic_contains_point(&c, vertex), Truth::True);
        assert_eq!(is_degenerate(&c), Truth::False);
    }

    #[test]
    fn center_three_points_circle() {
        // Points of the circle x² + y² = 25 with center at the origin.
        let c = conic_from_center_points(
            point(int(0), int(0)),
            point(int(3), int(4)),
            point(int(5), int(0)),
            point(int(0), int(-5)),
        );
        let expect = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-25));
        assert_eq!(is_nonzero_multiple(&c, &expect), Truth::True);
    }

    #[test]
    fn foci_point_recovers_circle() {
        // Coincident foci: an ellipse through (3, 4) around the origin is
        // the radius-5 circle.
        let o = point(int(0), int(0));
        let c = ellipse_from_foci_point(o, o, point(int(3), int(4)));
        let expect = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-25));
        assert_eq!(is_nonzero_multiple(&c, &expect), Truth::True);
    }
}
