//! Dataspace extents.
//!
//! A dataspace describes the shape of an attribute or dataset: its rank and
//! the extent of each dimension, slowest-varying first.

use smallvec::SmallVec;

/// Extents of a simple dataspace.
///
/// An OMX table is always rank 2 with equal extents; attributes are
/// scalar (rank 0) or short rank-1 vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Extent of each dimension. Empty means scalar (rank 0).
    dims: SmallVec<[usize; 4]>,
}

impl Dimensions {
    /// Scalar dataspace (rank 0).
    pub fn scalar() -> Self {
        Self { dims: SmallVec::new() }
    }

    /// Rank-1 dataspace.
    pub fn d1(len: usize) -> Self {
        Self { dims: smallvec::smallvec![len] }
    }

    /// Rank-2 dataspace of `rows x cols`.
    pub fn d2(rows: usize, cols: usize) -> Self {
        Self { dims: smallvec::smallvec![rows, cols] }
    }

    /// Square `zones x zones` dataspace.
    pub fn square(zones: usize) -> Self {
        Self::d2(zones, zones)
    }

    /// Create from a slice of extents.
    pub fn from_slice(sizes: &[usize]) -> Self {
        Self { dims: SmallVec::from_slice(sizes) }
    }

    /// Number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Extent of one dimension, `None` past the rank.
    pub fn size(&self, dim: usize) -> Option<usize> {
        self.dims.get(dim).copied()
    }

    /// All extents.
    pub fn sizes(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements, or `None` on overflow.
    pub fn num_points(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// True for a rank-2 dataspace with equal extents.
    pub fn is_square(&self) -> bool {
        matches!(self.sizes(), [r, c] if r == c)
    }
}

impl From<usize> for Dimensions {
    fn from(len: usize) -> Self {
        Self::d1(len)
    }
}

impl From<(usize, usize)> for Dimensions {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::d2(rows, cols)
    }
}

impl From<Vec<usize>> for Dimensions {
    fn from(v: Vec<usize>) -> Self {
        Self { dims: SmallVec::from_vec(v) }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "]")
    }
}
