//! Dataset storage layouts.

use crate::util::Dimensions;

/// How a dataset's elements are laid out on disk.
///
/// Informational only: every layout is read with one bulk transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Raw data stored in the object header
    Compact,
    /// One contiguous block
    #[default]
    Contiguous,
    /// Fixed-size chunks of the given extents
    Chunked(Dimensions),
}

impl Layout {
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, Self::Chunked(_))
    }

    /// Chunk extents, if chunk-stored.
    pub fn chunk_dims(&self) -> Option<&Dimensions> {
        match self {
            Self::Chunked(dims) => Some(dims),
            _ => None,
        }
    }
}
