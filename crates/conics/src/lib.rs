//! Exact conic sections in the real projective plane.
//!
//! A conic is a symmetric 3×3 matrix over the symbolic expression
//! domain of `conics-expr`; points and lines are homogeneous 3-vectors.
//! Everything is exact: classification and incidence predicates return
//! a three-valued [`Truth`](conics_expr::Truth) instead of guessing,
//! and invariants come back as closed-form expressions.
//!
//! # Design principles
//! - Matrix-polymorphic: there is no Ellipse or Hyperbola type. Kind is
//!   recovered by predicates, and most operations are meaningful across
//!   kinds (the primary radius of a parabola is ∞, of a line pair 0).
//! - Scale-free: every function tolerates an arbitrary nonzero scaling
//!   of its matrix and vector arguments.
//! - Undecidable is an answer: symbolic inputs the kernel cannot pin
//!   down flow through as `Truth::Unknown`, opaque sign symbols, or
//!   explicit `Undecided` variants, never as a wrong guess.

pub mod matrix;
pub mod point;
pub mod line;
pub mod distance;
pub mod transform;
pub mod transform_classes;
pub mod conic;
pub mod conic_classes;
pub mod central_conic;
pub mod conic_direction;
pub mod degenerate_conic;
pub mod circle;
pub mod ellipse;
pub mod hyperbola;
pub mod parabola;
pub mod intersection;
pub mod incidence;
pub mod polar_conic;

mod error;
mod mat3;
mod vec3;

pub use error::ConicError;
pub use mat3::{Conic, Mat3, PolarConic, Transform};
pub use vec3::{Line, Point, Vec3};

pub use degenerate_conic::SplitLines;
pub use intersection::LineConicMeet;
pub use matrix::Witness;
pub use polar_conic::PolarOrigin;
