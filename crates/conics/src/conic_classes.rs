//! Tri-valued conic classification.
//!
//! Every predicate returns [`Truth`]: `Unknown` means the symbolic
//! kernel could not decide the underlying sign, not that the answer is
//! somehow in between. All predicates are invariant under scaling the
//! matrix by a nonzero constant, which is why discriminant-style
//! products like a·det appear instead of bare entries.

use conics_expr::{Hint, Truth};

use crate::mat3::Conic;
use crate::matrix::is_definite;

/// det C = 0: the conic splits into lines or degenerates to a point.
pub fn is_degenerate(c: &Conic) -> Truth {
    c.determinant().is_zero_with(Hint::Factor)
}

pub fn is_non_degenerate(c: &Conic) -> Truth {
    is_degenerate(c).not()
}

/// Nonzero subdeterminant of the affine part: the conic has a unique
/// center of symmetry.
pub fn is_central(c: &Conic) -> Truth {
    c.det2().is_nonzero_with(Hint::Factor)
}

/// Positive subdeterminant of the affine part: no real ideal points, so
/// the curve is bounded. Holds for ellipses and finite point conics.
pub fn is_finite(c: &Conic) -> Truth {
    c.det2().is_positive_with(Hint::Factor)
}

/// Non-degenerate, bounded, and carrying real points. Definite matrices
/// are the imaginary ellipses and are excluded here.
pub fn is_ellipse(c: &Conic) -> Truth {
    is_non_degenerate(c)
        .and(is_finite(c))
        .and(is_definite(c).not())
}

/// Definite matrix: a conic with no real points at all.
pub fn is_imaginary_ellipse(c: &Conic) -> Truth {
    is_definite(c)
}

/// Non-degenerate, tangent to the ideal line (det₂ = 0).
pub fn is_parabola(c: &Conic) -> Truth {
    is_non_degenerate(c).and(c.det2().is_zero_with(Hint::Factor))
}

/// Non-degenerate with two real ideal points.
pub fn is_hyperbola(c: &Conic) -> Truth {
    is_non_degenerate(c).and(c.det2().is_negative_with(Hint::Factor))
}

/// Hyperbola with perpendicular asymptotes (zero affine trace).
pub fn is_rectangular_hyperbola(c: &Conic) -> Truth {
    is_non_degenerate(c).and((c.get(0, 0) + c.get(1, 1)).is_zero())
}

/// Equal diagonal, no cross term, and a·det < 0 so that real points
/// exist (rules out the imaginary circle x² + y² + 1).
pub fn is_circle(c: &Conic) -> Truth {
    let a = c.get(0, 0);
    let b = c.get(0, 1);
    let cc = c.get(1, 1);
    (a - cc)
        .is_zero()
        .and(b.is_zero())
        .and((a * c.determinant()).is_negative_with(Hint::Factor))
}

/// Rotationally symmetric about its center: equal nonzero diagonal and
/// no cross term. Unlike [`is_circle`] this admits imaginary and
/// point circles.
pub fn is_circular(c: &Conic) -> Truth {
    let a = c.get(0, 0);
    a.is_nonzero()
        .and(c.get(0, 1).is_zero())
        .and((a - c.get(1, 1)).is_zero())
}

/// Nonzero matrix with vanishing adjugate: a doubled line.
pub fn is_double_line(c: &Conic) -> Truth {
    c.adjugate()
        .is_zero_matrix()
        .and(c.is_zero_matrix().not())
}

/// Degenerate conic that carries at least one real line: all three
/// 2×2 cofactor discriminants are non-negative.
pub fn is_line_pair(c: &Conic) -> Truth {
    let a = c.get(0, 0);
    let b = c.get(0, 1);
    let cc = c.get(1, 1);
    let d = c.get(0, 2);
    let e = c.get(1, 2);
    let f = c.get(2, 2);
    is_degenerate(c)
        .and(c.is_zero_matrix().not())
        .and((b * b - a * cc).is_nonneg_with(Hint::Factor))
        .and((d * d - a * f).is_nonneg_with(Hint::Factor))
        .and((e * e - cc * f).is_nonneg_with(Hint::Factor))
}

/// Degenerate conic whose real locus is a single point: some cofactor
/// discriminant is provably negative.
pub fn is_point_conic(c: &Conic) -> Truth {
    let a = c.get(0, 0);
    let b = c.get(0, 1);
    let cc = c.get(1, 1);
    let d = c.get(0, 2);
    let e = c.get(1, 2);
    let f = c.get(2, 2);
    is_degenerate(c).and(
        (b * b - a * cc)
            .is_negative_with(Hint::Factor)
            .or((d * d - a * f).is_negative_with(Hint::Factor))
            .or((e * e - cc * f).is_negative_with(Hint::Factor)),
    )
}

/// Point conic whose point is affine (not ideal).
pub fn is_finite_point_conic(c: &Conic) -> Truth {
    is_point_conic(c).and(is_finite(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conics_expr::{symbol, Assume, Expr};

    use crate::matrix::conic_matrix;

    fn int(v: i64) -> Expr {
        Expr::from_int(v)
    }

    fn unit_circle() -> Conic {
        conic_matrix(int(1), int(0), int(1), int(0), int(0), int(-1))
    }

    #[test]
    fn classifies_standard_conics() {
        let circle = unit_circle();
        assert_eq!(is_ellipse(&circle), Truth::True);
        assert_eq!(is_circle(&circle), Truth::True);
        assert_eq!(is_parabola(&circle), Truth::False);
        assert_eq!(is_hyperbola(&circle), Truth::False);
        assert_eq!(is_degenerate(&circle), Truth::False);

        // y² = 2x
        let parabola = conic_matrix(int(0), int(0), int(1), int(-1), int(0), int(0));
        assert_eq!(is_parabola(&parabola), Truth::True);
        assert_eq!(is_ellipse(&parabola), Truth::False);

        // xy = 1
        let hyperbola = conic_matrix(int(0), Expr::ratio(1, 2), int(0), int(0), int(0), int(-1));
        assert_eq!(is_hyperbola(&hyperbola), Truth::True);
        assert_eq!(is_circle(&hyperbola), Truth::False);
    }

    #[test]
    fn imaginary_circle_is_not_a_circle() {
        // x² + y² + 1 = 0 has no real points.
        let c = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(1));
        assert_eq!(is_circle(&c), Truth::False);
        assert_eq!(is_circular(&c), Truth::True);
        assert_eq!(is_finite(&c), Truth::True);
        assert_eq!(is_imaginary_ellipse(&c), Truth::True);
        assert_eq!(is_ellipse(&c), Truth::False);
    }

    #[test]
    fn rectangular_hyperbola() {
        // xy = 1 and x² − y² = 1 both have perpendicular asymptotes.
        let c = conic_matrix(int(0), Expr::ratio(1, 2), int(0), int(0), int(0), int(-1));
        assert_eq!(is_rectangular_hyperbola(&c), Truth::True);
        let d = conic_matrix(int(1), int(0), int(-1), int(0), int(0), int(-1));
        assert_eq!(is_rectangular_hyperbola(&d), Truth::True);
        assert_eq!(is_rectangular_hyperbola(&unit_circle()), Truth::False);
    }

    #[test]
    fn scaling_does_not_change_the_class() {
        let c = unit_circle() * int(-3);
        assert_eq!(is_circle(&c), Truth::True);
        assert_eq!(is_ellipse(&c), Truth::True);
    }

    #[test]
    fn degenerate_classes() {
        // x² − y² = 0: the line pair y = ±x.
        let pair = conic_matrix(int(1), int(0), int(-1), int(0), int(0), int(0));
        assert_eq!(is_line_pair(&pair), Truth::True);
        assert_eq!(is_point_conic(&pair), Truth::False);

        // x² + y² = 0: only the origin.
        let pt = conic_matrix(int(1), int(0), int(1), int(0), int(0), int(0));
        assert_eq!(is_point_conic(&pt), Truth::True);
        assert_eq!(is_finite_point_conic(&pt), Truth::True);
        assert_eq!(is_line_pair(&pt), Truth::False);

        // x² = 0: a double line, both finite discriminants vanish.
        let dbl = conic_matrix(int(1), int(0), int(0), int(0), int(0), int(0));
        assert_eq!(is_line_pair(&dbl), Truth::True);
        assert_eq!(is_double_line(&dbl), Truth::True);
        assert_eq!(is_double_line(&pair), Truth::False);
        assert_eq!(is_central(&pair), Truth::True);
        assert_eq!(is_central(&dbl), Truth::False);
    }

    #[test]
    fn symbolic_radius_stays_a_circle() {
        let r = symbol("r", Assume::positive());
        let c = conic_matrix(int(1), int(0), int(1), int(0), int(0), -(r * r));
        assert_eq!(is_circle(&c), Truth::True);
        assert_eq!(is_ellipse(&c), Truth::True);
    }

    #[test]
    fn opaque_symbol_is_undecided() {
        let t = symbol("t", Assume::real());
        let c = conic_matrix(int(1), int(0), int(1), int(0), int(0), t);
        assert_eq!(is_degenerate(&c), Truth::Unknown);
        assert_eq!(is_circle(&c), Truth::Unknown);
    }
}
