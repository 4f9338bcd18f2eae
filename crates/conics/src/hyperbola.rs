//! Hyperbola-specific invariants: asymptotes and their angle.

use conics_expr::{Expr, Truth};

use crate::central_conic::{conic_center, eccentricity, shrink_conic_to_zero};
use crate::conic_classes::is_hyperbola;
use crate::degenerate_conic::line_pair_conic;
use crate::error::ConicError;
use crate::intersection::{ideal_points, LineConicMeet};
use crate::line::line_through;
use crate::mat3::Conic;

/// Angle between the focal axis and an asymptote, in (0, π/2).
/// cos θ = 1/e gives tan θ = √(e² − 1).
pub fn asymptote_angle(c: &Conic) -> Result<Expr, ConicError> {
    if is_hyperbola(c).is_false() {
        return Err(ConicError::NotAHyperbola);
    }
    let e = eccentricity(c);
    Ok((e * e - Expr::ONE).sqrt().atan2(Expr::ONE))
}

/// Both asymptotes as a line-pair conic. Built from the lines joining
/// the center to the two real ideal points; when the kernel cannot
/// split the ideal points, the same pair is obtained by shrinking the
/// hyperbola onto its center.
pub fn asymptotes(c: &Conic) -> Result<Conic, ConicError> {
    if is_hyperbola(c).is_false() {
        return Err(ConicError::NotAHyperbola);
    }
    let center = conic_center(c);
    Ok(match ideal_points(c) {
        LineConicMeet::Pair(p, q) => {
            line_pair_conic(line_through(center, p), line_through(center, q))
        }
        _ => shrink_conic_to_zero(c),
    })
}

/// Does the line provably run parallel to an asymptote? Such a line
/// meets the hyperbola only once.
pub fn is_asymptotic_direction(c: &Conic, l: crate::vec3::Line) -> Truth {
    let d = crate::line::ideal_point_on(l);
    crate::matrix::quadratic_form(c, d).is_zero()
}
