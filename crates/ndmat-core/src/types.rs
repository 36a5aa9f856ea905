//! Common type aliases

use smallvec::SmallVec;

/// Axis index type
pub type Axis = usize;

/// Tensor rank (number of dimensions)
pub type Rank = usize;

/// Shape of a tensor (sizes along each axis)
///
/// Uses SmallVec to avoid heap allocation for tensors of rank six or less.
pub type Shape = SmallVec<[usize; 6]>;

/// Element category of a tensor instantiation
///
/// The category is fixed at compile time by the element type (see
/// [`Element::CATEGORY`](crate::element::Element::CATEGORY)) and decides
/// which capability layers are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementCategory {
    /// Arbitrary cloneable values (`bool`, `char`, `String`, ...)
    General,
    /// Integer arithmetic
    Numeric,
    /// Complex floating point
    Complex,
    /// Real floating point
    Real,
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Numeric => "numeric",
            Self::Complex => "complex",
            Self::Real => "real",
        };
        f.write_str(name)
    }
}
