//! Matrix loader.
//!
//! A table is read in one bulk transfer into an owned `N*N` buffer of `f64`,
//! row-major. Accessors take 1-based zone numbers: zone `i` is row `i - 1`
//! of the stored dataset.

use super::OmxFile;
use crate::core::{GroupReader, Layout};
use crate::util::{Datatype, Dimensions, Error, Result};

/// A fully loaded, immutable `N x N` table.
#[derive(Clone, Debug, PartialEq)]
pub struct OmxMatrix {
    name: String,
    zones: usize,
    data: Vec<f64>,
    source_type: Datatype,
    layout: Layout,
}

impl OmxMatrix {
    /// Load table `table` from the data group of `file`.
    ///
    /// Opens the data group for the duration of the load; use
    /// [`OmxTables::load`](super::OmxTables::load) to reuse an open one.
    pub fn load(file: &OmxFile, table: &str, zones: usize) -> Result<Self> {
        let group_name = &file.options().data_group;
        let group = file
            .reader()
            .open_group(group_name)
            .map_err(|_| Error::GroupNotFound(group_name.clone()))?;
        Self::from_group(group.as_ref(), table, zones)
    }

    pub(crate) fn from_group(group: &dyn GroupReader, table: &str, zones: usize) -> Result<Self> {
        let dataset = group.open_dataset(table).map_err(|e| {
            tracing::debug!(table, error = %e, "table unavailable");
            Error::TableNotFound(table.to_string())
        })?;

        let space = dataset.space()?;
        let layout = dataset.layout()?;
        if let Some(chunk) = layout.chunk_dims() {
            tracing::debug!(table, chunk = %chunk, "chunked table");
        }

        // The caller's zone count must match the stored extents exactly,
        // otherwise the buffer would be over- or under-filled.
        let shape_mismatch = || Error::ShapeMismatch {
            table: table.to_string(),
            zones,
            actual: space.clone(),
        };
        if space != Dimensions::square(zones) {
            return Err(shape_mismatch());
        }
        let len = space.num_points().ok_or_else(shape_mismatch)?;
        let mem_space = Dimensions::from_slice(space.sizes());

        let source_type = dataset.datatype()?;
        if !source_type.is_numeric() {
            return Err(Error::type_mismatch("numeric table", source_type));
        }

        let mut data = vec![0.0f64; len];
        dataset
            .read(&Datatype::native_f64(), &mem_space, &mut data)
            .map_err(|e| Error::ReadError {
                table: table.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(table, zones, source = %source_type, "loaded table");

        Ok(Self {
            name: table.to_string(),
            zones,
            data,
            source_type,
            layout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zone count N.
    pub fn zones(&self) -> usize {
        self.zones
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Element type the table was stored with.
    pub fn source_type(&self) -> Datatype {
        self.source_type
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Chunk extents, if the table is chunk-stored.
    pub fn chunk_dims(&self) -> Option<&Dimensions> {
        self.layout.chunk_dims()
    }

    /// 0-based position of 1-based zone `index`.
    #[inline]
    fn zone_index(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.zones {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.zones,
            });
        }
        Ok(index - 1)
    }

    /// Row `i` (origin zone), 1-based.
    pub fn get_row(&self, i: usize) -> Result<&[f64]> {
        let start = self.zone_index(i)? * self.zones;
        Ok(&self.data[start..start + self.zones])
    }

    /// Value at row `i`, column `j`, both 1-based.
    pub fn get_cell(&self, i: usize, j: usize) -> Result<f64> {
        let row = self.get_row(i)?;
        Ok(row[self.zone_index(j)?])
    }

    /// Column `j` (destination zone), 1-based: value `j` of every row in order.
    pub fn get_column(&self, j: usize) -> Result<Vec<f64>> {
        let col = self.zone_index(j)?;
        Ok(self.rows().map(|row| row[col]).collect())
    }

    /// Rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.zones.max(1))
    }
}
