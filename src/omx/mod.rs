//! High-level OMX API.
//!
//! This module provides the entry points for reading OMX matrix files:
//! - [`OmxFile`] - the container handle (open / validate / close)
//! - [`OmxAttrs`] - root metadata: format version and zone count
//! - [`OmxTables`] - names of the tables in the `data` group
//! - [`OmxMatrix`] - one loaded table with 1-based row/column/cell access
//! - [`SharedOmxFile`] - mutex-serialized handle for multi-threaded callers
//!
//! Reading files from disk needs the `hdf5` feature; see the crate docs.

mod attrs;
mod file;
mod matrix;
mod options;
mod shared;
mod tables;

pub use attrs::OmxAttrs;
pub use file::OmxFile;
pub use matrix::OmxMatrix;
pub use options::{OmxOptions, DATA_GROUP, SHAPE_ATTRIBUTE, VERSION_ATTRIBUTE};
pub use shared::SharedOmxFile;
pub use tables::OmxTables;
