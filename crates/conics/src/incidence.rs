//! Pole-polar duality and determinant-based incidence predicates.

use conics_expr::{Expr, Truth};

use crate::mat3::{Conic, Mat3};
use crate::vec3::{Line, Point};

/// Polar line of a point: C·p. For p on the conic this is the tangent
/// there.
pub fn polar_line(c: &Conic, p: Point) -> Line {
    *c * p
}

/// Pole of a line: adj(C)·l. Inverse to [`polar_line`] up to the
/// scalar det(C).
pub fn pole_point(c: &Conic, l: Line) -> Point {
    c.adjugate() * l
}

/// Does the conic provably pass through the point? Evaluates pᵀCp = 0.
pub fn conic_contains_point(c: &Conic, p: Point) -> Truth {
    crate::matrix::quadratic_form(c, p).is_zero()
}

/// Determinant of a square matrix of expressions by Laplace expansion
/// along the first column. The sizes here are at most 6.
fn det_n(rows: &[Vec<Expr>]) -> Expr {
    let n = rows.len();
    if n == 1 {
        return rows[0][0];
    }
    let mut acc = Expr::ZERO;
    for i in 0..n {
        let minor: Vec<Vec<Expr>> = rows
            .iter()
            .enumerate()
            .filter(|(r, _)| *r != i)
            .map(|(_, row)| row[1..].to_vec())
            .collect();
        let term = rows[i][0] * det_n(&minor);
        acc = if i % 2 == 0 { acc + term } else { acc - term };
    }
    acc
}

/// Do all the points lie on one line? Fewer than three points are
/// always collinear. Three points use the 3×3 determinant; more use
/// the Gram matrix Σ pᵢpᵢᵀ, which drops rank exactly when they do.
pub fn are_collinear(points: &[Point]) -> Truth {
    match points {
        [] | [_] | [_, _] => Truth::True,
        [p, q, r] => p.dot(q.cross(*r)).is_zero(),
        _ => {
            let mut gram = Mat3::zero();
            for p in points {
                gram = gram + Mat3::outer(*p, *p);
            }
            gram.determinant().is_zero()
        }
    }
}

/// Do the four points lie on a common circle? Equivalent to the six
/// points together with the ideal circular points (∓i, 1, 0) lying on
/// one conic, which collapses to a 4×4 determinant.
pub fn are_cocircular(p1: Point, p2: Point, p3: Point, p4: Point) -> Truth {
    let rows: Vec<Vec<Expr>> = [p1, p2, p3, p4]
        .iter()
        .map(|p| {
            vec![
                p.x * p.z,
                p.y * p.z,
                p.x * p.x + p.y * p.y,
                p.z * p.z,
            ]
        })
        .collect();
    det_n(&rows).is_zero()
}

/// Do the six points lie on a common conic? The quadratic monomial
/// vectors become linearly dependent exactly then.
pub fn are_conconic(points: &[Point; 6]) -> Truth {
    let rows: Vec<Vec<Expr>> = points
        .iter()
        .map(|p| {
            vec![
                p.x * p.x,
                p.y * p.y,
                p.z * p.z,
                p.x * p.y,
                p.y * p.z,
                p.z * p.x,
            ]
        })
        .collect();
    det_n(&rows).is_zero()
}
