//! Degenerate conics: building them from lines and points, and taking
//! them back apart.

use conics_expr::{Expr, Hint};

use crate::error::ConicError;
use crate::mat3::{Conic, Mat3};
use crate::matrix::{skew, Witness};
use crate::vec3::{Line, Point, Vec3};

/// Result of splitting a degenerate conic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitLines {
    /// The two lines, complex conjugates for a point conic, equal for
    /// a double line.
    Pair(Line, Line),
    /// No pivot entry could be decided nonzero.
    Undecided,
}

/// The rank-2 conic consisting of two lines.
pub fn line_pair_conic(l1: Line, l2: Line) -> Conic {
    (Mat3::outer(l1, l2) + Mat3::outer(l2, l1)) * Expr::ratio(1, 2)
}

/// The rank-1 conic consisting of one doubled line.
pub fn double_line_conic(l: Line) -> Conic {
    Mat3::outer(l, l)
}

/// The conic whose only real point is `p`: −skew(p)ᵀ·skew(p). Its two
/// complex conjugate lines meet at p.
pub fn point_conic(p: Point) -> Conic {
    let s = skew(p);
    -(s.transpose() * s)
}

/// Split a degenerate conic into its two lines (Richter-Gebert §11.1).
///
/// The adjugate of a rank-2 conic is κ·ppᵀ at the meet p of the lines;
/// adding skew(p/√(−κ·p_k²)) kills the symmetric part's rank down to 1,
/// whose outer factors are the lines. Errors if the conic is provably
/// non-degenerate.
pub fn split_to_lines(c: &Conic) -> Result<SplitLines, ConicError> {
    if c.determinant().is_nonzero_with(Hint::Factor).is_true() {
        return Err(ConicError::NotDegenerate);
    }
    let adj = c.adjugate();
    let mut pivot = None;
    let mut diagonal_zero = true;
    for k in 0..3 {
        match adj.get(k, k).is_nonzero() {
            t if t.is_true() => {
                pivot = Some(k);
                break;
            }
            t if t.is_unknown() => diagonal_zero = false,
            _ => {}
        }
    }
    let split = match pivot {
        Some(k) => {
            let p = adj.col(k) / (-adj.get(k, k)).sqrt();
            *c + skew(p)
        }
        // A provably zero adjugate diagonal means the adjugate itself
        // vanishes: the conic is already rank 1.
        None if diagonal_zero => *c,
        None => return Ok(SplitLines::Undecided),
    };
    Ok(match crate::matrix::non_zero_cross(&split) {
        Witness::At { row, col } => SplitLines::Pair(split.row(row), split.col(col)),
        Witness::Nowhere => SplitLines::Pair(Vec3::zero(), Vec3::zero()),
        Witness::Unknown => SplitLines::Undecided,
    })
}

/// The unique point of a point conic.
///
/// Works on the adjugate, which is rank 1 of the form κ·ppᵀ, so any
/// nonzero column is the point. Returns the zero vector for a conic
/// with vanishing adjugate and a NaN point when undecidable.
pub fn extract_point(c: &Conic) -> Point {
    let adj = c.adjugate();
    match crate::matrix::non_zero_cross(&adj) {
        Witness::At { col, .. } => adj.col(col),
        Witness::Nowhere => Vec3::zero(),
        Witness::Unknown => Vec3::nan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::Truth;

    use crate::conic_classes::{is_line_pair, is_point_conic};
    use crate::line::same_line;
    use crate::matrix::conic_matrix;
    use crate::point::{point, same_projective};

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    fn lines_of(s: SplitLines) -> (Line, Line) {
        match s {
            SplitLines::Pair(a, b) => (a, b),
            SplitLines::Undecided => panic!("expected a line pair"),
        }
    }

    #[test]
    fn split_crossing_pair() {
        // x² − y² = 0 is the pair x − y = 0, x + y = 0.
        let c = conic_matrix(int(1), int(0), int(-1), int(0), int(0), int(0));
        let (l1, l2) = lines_of(split_to_lines(&c).unwrap());
        let diag = Vec3::new(int(1), int(-1), int(0));
        let anti = Vec3::new(int(1), int(1), int(0));
        let is = |l: Line, m: Line| same_line(l, m).is_true();
        assert!(is(l1, diag) && is(l2, anti) || is(l1, anti) && is(l2, diag));
    }

    #[test]
    fn split_double_line() {
        // (x + 2y − 3)² has a vanishing adjugate.
        let l = Vec3::new(int(1), int(2), int(-3));
        let (l1, l2) = lines_of(split_to_lines(&double_line_conic(l)).unwrap());
        assert_eq!(same_line(l1, l), Truth::True);
        assert_eq!(same_line(l2, l), Truth::True);
    }

    #[test]
    fn split_rejects_nondegenerate() {
        let circle = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1));
        assert!(matches!(
            split_to_lines(&circle),
            Err(ConicError::NotDegenerate)
        ));
    }

    #[test]
    fn pair_roundtrip() {
        let l1 = Vec3::new(int(1), int(0), int(-2));
        let l2 = Vec3::new(int(0), int(1), int(3));
        let c = line_pair_conic(l1, l2);
        assert_eq!(is_line_pair(&c), Truth::True);
        let (m1, m2) = lines_of(split_to_lines(&c).unwrap());
        let is = |l: Line, m: Line| same_line(l, m).is_true();
        assert!(is(m1, l1) && is(m2, l2) || is(m1, l2) && is(m2, l1));
    }

    #[test]
    fn point_conic_roundtrip() {
        let p = point(int(2), int(-1));
        let c = point_conic(p);
        assert_eq!(is_point_conic(&c), Truth::True);
        assert_eq!(same_projective(extract_point(&c), p), Truth::True);
    }

    #[test]
    fn point_conic_splits_into_conjugate_lines() {
        // x² + y² = 0: the lines x ± iy through the origin.
        let c = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(0));
        let (l1, l2) = lines_of(split_to_lines(&c).unwrap());
        // Both lines pass through the real point.
        for l in [l1, l2] {
            assert_eq!(l.dot(point(int(0), int(0))).is_zero(), Truth::True);
        }
    }
}
