//! Parabola invariants: focus, directrix, vertex, focal parameter.
//!
//! All of these read off the adjugate, whose last column is the ideal
//! point of the parabola (the axis direction) and whose remaining
//! entries encode the directrix. Each public function rejects a
//! provable non-parabola with a domain error.

use conics_expr::Expr;

use crate::conic_classes::is_parabola;
use crate::distance::point_line_distance;
use crate::error::ConicError;
use crate::intersection::meet_lines;
use crate::line::midpoint;
use crate::mat3::Conic;
use crate::vec3::{Line, Point};

fn check(c: &Conic) -> Result<(), ConicError> {
    if is_parabola(c).is_false() {
        return Err(ConicError::NotAParabola);
    }
    Ok(())
}

/// Directrix without the parabola guard, shared with the axis code.
pub(crate) fn directrix_raw(c: &Conic) -> Line {
    let adj = c.adjugate();
    Line::new(
        adj.get(0, 2),
        adj.get(1, 2),
        -(adj.get(0, 0) + adj.get(1, 1)) * Expr::ratio(1, 2),
    )
}

pub(crate) fn focus_raw(c: &Conic) -> Point {
    c.adjugate() * directrix_raw(c)
}

/// The directrix: the polar line of the focus, at the same distance
/// from the vertex on the far side.
pub fn parabola_directrix(c: &Conic) -> Result<Line, ConicError> {
    check(c)?;
    Ok(directrix_raw(c))
}

pub fn parabola_focus(c: &Conic) -> Result<Point, ConicError> {
    check(c)?;
    Ok(focus_raw(c))
}

/// The vertex: halfway between the focus and the foot of the directrix
/// on the axis.
pub fn parabola_vertex(c: &Conic) -> Result<Point, ConicError> {
    check(c)?;
    let focus = focus_raw(c);
    let axis = crate::conic_direction::focal_axis(c);
    let foot = meet_lines(axis, directrix_raw(c));
    Ok(midpoint(focus, foot))
}

/// Focal parameter: the distance from the focus to the directrix.
pub fn focal_parameter(c: &Conic) -> Result<Expr, ConicError> {
    check(c)?;
    Ok(point_line_distance(directrix_raw(c), focus_raw(c)).abs())
}
