//! Abstract traits for the hierarchical container engine.
//!
//! These traits define the interface between the container backends in
//! [`crate::hdf`] and the OMX layer in [`crate::omx`]. Every sub-resource
//! (group, attribute, dataset) is a boxed reader borrowing its parent and is
//! released when dropped.

use std::path::Path;

use crate::core::{AttrValue, Layout};
use crate::hdf::signature;
use crate::util::{Datatype, Dimensions, Result};

// ============================================================================
// Engine
// ============================================================================

/// Entry point of a container engine.
pub trait Backend: Send + Sync {
    /// Short engine name for diagnostics.
    fn name(&self) -> &str;

    /// Check whether `path` holds a container this engine can open.
    ///
    /// Probes the file on disk, never an open handle.
    fn probe(&self, path: &Path) -> Result<bool> {
        signature::probe_file(path)
    }

    /// Open a container read-only.
    fn open(&self, path: &Path) -> Result<Box<dyn FileReader>>;
}

// ============================================================================
// Objects
// ============================================================================

/// An open container file.
pub trait FileReader: Send {
    /// Path the file was opened from.
    fn path(&self) -> &Path;

    /// Open an attribute attached to the root group.
    fn open_attribute(&self, name: &str) -> Result<Box<dyn AttributeReader + '_>>;

    /// Open a group by name relative to the root.
    fn open_group(&self, name: &str) -> Result<Box<dyn GroupReader + '_>>;

    /// Release the file.
    fn close(self: Box<Self>) -> Result<()>;
}

/// An open attribute.
pub trait AttributeReader {
    fn name(&self) -> &str;

    /// Stored element type.
    fn datatype(&self) -> Result<Datatype>;

    /// Stored dataspace.
    fn space(&self) -> Result<Dimensions>;

    /// Read the whole attribute, converting elements to `mem_type`.
    fn read(&self, mem_type: &Datatype) -> Result<AttrValue>;
}

/// An open group.
pub trait GroupReader {
    fn name(&self) -> &str;

    /// Number of direct members.
    fn num_members(&self) -> Result<u64>;

    /// Name of the member at storage-order `index`.
    fn member_name(&self, index: u64) -> Result<String>;

    /// Open a member dataset by name.
    fn open_dataset(&self, name: &str) -> Result<Box<dyn DatasetReader + '_>>;
}

/// An open dataset.
pub trait DatasetReader {
    fn name(&self) -> &str;

    /// Storage dataspace (rank and extents).
    fn space(&self) -> Result<Dimensions>;

    /// Storage layout, with chunk extents when chunked.
    fn layout(&self) -> Result<Layout>;

    /// Stored element type.
    fn datatype(&self) -> Result<Datatype>;

    /// Bulk-read the whole dataset into `buf`.
    ///
    /// `mem_type` is the in-memory element type and `mem_space` the in-memory
    /// target dataspace; `buf.len()` must equal the number of points of both
    /// `mem_space` and the stored dataspace.
    fn read(&self, mem_type: &Datatype, mem_space: &Dimensions, buf: &mut [f64]) -> Result<()>;
}
