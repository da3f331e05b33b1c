//! Table catalog.

use super::{OmxFile, OmxMatrix};
use crate::core::GroupReader;
use crate::util::{Error, Result};

/// Enumerates the tables stored under the reserved data group.
///
/// Keeps the data group open for its own lifetime; matrices loaded through
/// [`load`](Self::load) reuse it instead of reopening the group.
pub struct OmxTables<'f> {
    group: Box<dyn GroupReader + 'f>,
}

impl<'f> OmxTables<'f> {
    pub fn new(file: &'f OmxFile) -> Result<Self> {
        let name = &file.options().data_group;
        let group = file.reader().open_group(name).map_err(|e| {
            tracing::debug!(group = %name, error = %e, "table group unavailable");
            Error::GroupNotFound(name.clone())
        })?;
        Ok(Self { group })
    }

    /// Number of tables (direct members of the data group).
    pub fn table_count(&self) -> Result<usize> {
        let n = self.group.num_members()?;
        usize::try_from(n).map_err(|_| Error::backend(format!("member count {} exceeds usize", n)))
    }

    /// Table names in storage order, exactly `table_count()` of them.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let count = self.table_count()?;
        let mut names = Vec::with_capacity(count);
        for index in 0..count as u64 {
            let name = self.group.member_name(index)?;
            tracing::trace!(index, name = %name, "table");
            names.push(name);
        }
        Ok(names)
    }

    /// True if a table called `name` exists.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.table_names()?.iter().any(|n| n == name))
    }

    /// Load table `name` as a `zones x zones` matrix.
    pub fn load(&self, name: &str, zones: usize) -> Result<OmxMatrix> {
        OmxMatrix::from_group(self.group.as_ref(), name, zones)
    }
}
