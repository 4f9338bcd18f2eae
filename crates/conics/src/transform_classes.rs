//! Classification of transforms.

use conics_expr::Truth;

use crate::mat3::Transform;

/// Invertible projective map: det(T) ≠ 0.
pub fn is_homography(t: &Transform) -> Truth {
    t.determinant().is_nonzero()
}

/// Affine map: the last row is (0, 0, w) with w ≠ 0.
pub fn is_affine(t: &Transform) -> Truth {
    t.get(2, 0)
        .is_zero()
        .and(t.get(2, 1).is_zero())
        .and(t.get(2, 2).is_nonzero())
}
