//! Container engines.
//!
//! - [`signature`] - superblock signature probe shared by every engine
//! - [`MemoryBackend`] - in-process containers registered against paths
//! - [`Hdf5Backend`] - the HDF5 C library (feature `hdf5`)

pub mod signature;
mod memory;
#[cfg(feature = "hdf5")]
mod native;

pub use memory::{MemoryAttribute, MemoryBackend, MemoryContainer, MemoryDataset, MemoryGroup};
#[cfg(feature = "hdf5")]
pub use native::Hdf5Backend;
