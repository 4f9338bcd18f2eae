//! Expression node types and the `Expr` handle.

use std::fmt;

/// Handle into the expression graph. Lightweight (4 bytes), Copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Expr(pub(crate) u32);

/// Well-known node indices, pre-populated in every graph.
impl Expr {
    /// The rational constant 0 (index 0).
    pub const ZERO: Self = Self(0);
    /// The rational constant 1 (index 1).
    pub const ONE: Self = Self(1);
    /// The rational constant 2 (index 2).
    pub const TWO: Self = Self(2);
    /// The imaginary unit (index 3).
    pub const I: Self = Self(3);
    /// Positive infinity (index 4). Distances to ideal elements return this.
    pub const INFINITY: Self = Self(4);
    /// Not-a-number (index 5). Marks mathematically undefined results.
    pub const NAN: Self = Self(5);

    /// Create an `Expr` from a raw index.
    #[inline]
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The raw index of this expression in the graph.
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A node in the expression graph.
///
/// Exact atoms plus eight primitive operations. Rationals and symbols live
/// in side tables so the node itself stays 12 bytes and `Copy`. Every
/// higher-level operation (subtraction, division, integer powers, abs)
/// decomposes into these primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    // Atoms
    /// Exact rational, by index into the graph's rational table.
    Rat(u32),
    /// Named symbol with assumptions, by index into the symbol table.
    Sym(u32),
    /// The imaginary unit i, with i*i = -1.
    Imag,
    /// Positive infinity.
    Infinity,
    /// Undefined result.
    Nan,

    // Primitive operations
    /// Addition.
    Add(Expr, Expr),
    /// Multiplication.
    Mul(Expr, Expr),
    /// Negation.
    Neg(Expr),
    /// Reciprocal (1/x).
    Recip(Expr),
    /// Principal square root.
    Sqrt(Expr),
    /// Sine.
    Sin(Expr),
    /// Cosine.
    Cos(Expr),
    /// Two-argument arctangent atan2(y, x).
    Atan2(Expr, Expr),
}

impl Node {
    /// Whether this node is an atom (no children).
    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Self::Rat(_) | Self::Sym(_) | Self::Imag | Self::Infinity | Self::Nan
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_indices_are_distinct() {
        let all = [
            Expr::ZERO,
            Expr::ONE,
            Expr::TWO,
            Expr::I,
            Expr::INFINITY,
            Expr::NAN,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn atoms() {
        assert!(Node::Imag.is_atom());
        assert!(Node::Rat(0).is_atom());
        assert!(!Node::Add(Expr::ZERO, Expr::ONE).is_atom());
    }
}
