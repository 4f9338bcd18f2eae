//! Domain errors.
//!
//! Errors are reserved for arguments that can never yield an answer:
//! provably wrong conic kinds and unsupported enum choices. Mathematically
//! undefined outcomes are values (NaN entries, the zero vector,
//! `Truth::Unknown`), never errors.

use thiserror::Error;

use crate::polar_conic::PolarOrigin;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConicError {
    #[error("conic is provably not a parabola")]
    NotAParabola,
    #[error("conic is provably not an ellipse")]
    NotAnEllipse,
    #[error("conic is provably not a hyperbola")]
    NotAHyperbola,
    #[error("conic is provably non-degenerate")]
    NotDegenerate,
    #[error("polar origin {0:?} is not supported for this conic")]
    UnsupportedPolarOrigin(PolarOrigin),
}
