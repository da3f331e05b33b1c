//! # OpenMatrix
//!
//! Rust reader for OMX (Open Matrix) files: HDF5 containers holding named,
//! square, dense zone-to-zone tables plus file-level metadata.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (type classes, datatypes, dimensions, errors)
//! - [`core`] - Container engine traits and attribute values
//! - [`hdf`] - Engines: in-memory containers, the HDF5 library (feature `hdf5`)
//! - [`omx`] - High-level API (OmxFile, OmxAttrs, OmxTables, OmxMatrix)
//!
//! ## File layout
//!
//! ```text
//! /                      root group
//! |-- @OMX_VERSION       string, e.g. "0.2"
//! |-- @SHAPE             integer(s), zone count N
//! `-- data/              one dataset per table
//!     |-- "All Ones"     N x N float64
//!     `-- ...
//! ```
//!
//! ## Features
//!
//! - `hdf5` - [`hdf::Hdf5Backend`] and [`OmxFile::open`], which read OMX files
//!   on disk through the HDF5 C library. Needs a system HDF5 installation
//!   (`apt install libhdf5-dev`, `brew install hdf5`), so it is opt-in:
//!   `openmatrix = { version = "0.1", features = ["hdf5"] }`.
//! - `serde` - (de)serialization of [`OmxOptions`].
//!
//! Without `hdf5` the only engine is [`hdf::MemoryBackend`], which serves
//! containers built in process (fixtures, tests) through
//! [`OmxFile::open_with`]. It cannot read an OMX file from disk.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use openmatrix::hdf::{MemoryAttribute, MemoryContainer, MemoryDataset, MemoryGroup};
//! use openmatrix::prelude::*;
//!
//! # fn main() -> openmatrix::Result<()> {
//! let counting: Vec<f64> = (1..=9).map(f64::from).collect();
//! let container = MemoryContainer::new()
//!     .with_attribute(MemoryAttribute::text("OMX_VERSION", "0.2"))
//!     .with_attribute(MemoryAttribute::ints("SHAPE", &[3, 3]))
//!     .with_group(
//!         MemoryGroup::new("data").with_dataset(MemoryDataset::from_values("Counting", (3, 3), &counting)?),
//!     );
//!
//! let scratch = tempfile::NamedTempFile::new()?;
//! let backend = Arc::new(MemoryBackend::new());
//! backend.register(scratch.path(), container);
//!
//! let file = OmxFile::open_with(backend, scratch.path(), OmxOptions::default())?;
//! let zones = file.attributes().get_zone_count()?;
//! let tables = file.tables()?;
//! for name in tables.table_names()? {
//!     let m = tables.load(&name, zones)?;
//!     assert_eq!(m.get_row(2)?, &[4.0, 5.0, 6.0]);
//! }
//! drop(tables);
//! file.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! With the `hdf5` feature a file on disk is opened with
//! `OmxFile::open("skims.omx")`.

pub mod util;
pub mod core;
pub mod hdf;
pub mod omx;

// Re-export commonly used types
pub use util::{Datatype, Dimensions, Error, Result, TypeClass};
pub use omx::{OmxAttrs, OmxFile, OmxMatrix, OmxOptions, OmxTables, SharedOmxFile};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Datatype, Dimensions, Error, Result};
    pub use crate::core::{AttrValue, Backend, Layout};
    pub use crate::hdf::MemoryBackend;
    #[cfg(feature = "hdf5")]
    pub use crate::hdf::Hdf5Backend;
    pub use crate::omx::*;
}
