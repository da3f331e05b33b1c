//! The OMX container handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{OmxAttrs, OmxMatrix, OmxOptions, OmxTables};
use crate::core::{Backend, FileReader};
use crate::util::{Error, Result};

/// An open OMX file.
///
/// Owns exactly one engine file handle. Attribute readers, table catalogs and
/// matrix loaders borrow the handle and cannot outlive it. The handle is
/// released by [`close`](Self::close) or, failing that, when dropped.
pub struct OmxFile {
    backend: Arc<dyn Backend>,
    reader: Box<dyn FileReader>,
    path: PathBuf,
    options: OmxOptions,
}

impl OmxFile {
    /// Open an OMX file with the HDF5 engine and default options.
    ///
    /// ```no_run
    /// use openmatrix::OmxFile;
    ///
    /// # fn main() -> openmatrix::Result<()> {
    /// let file = OmxFile::open("skims.omx")?;
    /// let zones = file.attributes().get_zone_count()?;
    /// for name in file.tables()?.table_names()? {
    ///     let m = file.matrix(&name, zones)?;
    ///     println!("{name}: cell(1,1) = {}", m.get_cell(1, 1)?);
    /// }
    /// file.close()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "hdf5")]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(
            Arc::new(crate::hdf::Hdf5Backend::new()),
            path,
            OmxOptions::default(),
        )
    }

    /// Open an OMX file through `backend`.
    ///
    /// Checks, in order, that the path exists, that the engine recognises
    /// the file format, and that the engine can open it.
    pub fn open_with(
        backend: Arc<dyn Backend>,
        path: impl AsRef<Path>,
        options: OmxOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        // A probe that cannot read the path counts as a negative answer.
        let valid = backend.probe(path).unwrap_or_else(|e| {
            tracing::debug!(path = %path.display(), error = %e, "format probe failed");
            false
        });
        if !valid {
            return Err(Error::NotAValidContainer(path.to_path_buf()));
        }
        let reader = backend.open(path).map_err(|e| Error::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), backend = backend.name(), "opened OMX file");

        Ok(Self {
            backend,
            reader,
            path: path.to_path_buf(),
            options,
        })
    }

    /// Re-probe the file on disk for format validity.
    ///
    /// Looks at the path, not the open handle; I/O failures count as invalid.
    pub fn is_valid(&self) -> bool {
        self.backend.probe(&self.path).unwrap_or(false)
    }

    /// Release the engine handle.
    ///
    /// Consumes the file, so it can be closed at most once.
    pub fn close(self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "closing OMX file");
        self.reader.close()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn options(&self) -> &OmxOptions {
        &self.options
    }

    /// Reader for the root attributes.
    pub fn attributes(&self) -> OmxAttrs<'_> {
        OmxAttrs::new(self)
    }

    /// Catalog of the tables in the reserved data group.
    pub fn tables(&self) -> Result<OmxTables<'_>> {
        OmxTables::new(self)
    }

    /// Load table `name` as a `zones x zones` matrix.
    pub fn matrix(&self, name: &str, zones: usize) -> Result<OmxMatrix> {
        OmxMatrix::load(self, name, zones)
    }

    /// Load table `name` using the zone count from the shape attribute.
    pub fn load_table(&self, name: &str) -> Result<OmxMatrix> {
        let zones = self.attributes().get_zone_count()?;
        self.matrix(name, zones)
    }

    pub(crate) fn reader(&self) -> &dyn FileReader {
        self.reader.as_ref()
    }
}

impl fmt::Debug for OmxFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmxFile")
            .field("path", &self.path)
            .field("backend", &self.backend.name())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdf::{signature::HDF5_SIGNATURE, MemoryBackend, MemoryContainer};
    use std::io::Write;

    fn backend() -> Arc<MemoryBackend> {
        Arc::new(MemoryBackend::new())
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.omx");
        let err = OmxFile::open_with(backend(), &path, OmxOptions::default()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_text_file_is_not_a_container() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "just some text").unwrap();
        let err = OmxFile::open_with(backend(), f.path(), OmxOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotAValidContainer(_)));
    }

    #[test]
    fn test_directory_is_not_a_container() {
        let dir = tempfile::tempdir().unwrap();
        let err = OmxFile::open_with(backend(), dir.path(), OmxOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotAValidContainer(p) if p == dir.path()));
    }

    #[test]
    fn test_open_failure_after_valid_signature() {
        // Valid signature on disk, but nothing the engine can open.
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(HDF5_SIGNATURE).unwrap();
        f.write_all(&[0u8; 32]).unwrap();
        let err = OmxFile::open_with(backend(), f.path(), OmxOptions::default()).unwrap_err();
        assert!(matches!(err, Error::OpenFailed { .. }));
    }

    #[test]
    fn test_open_is_valid_close() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let mem = backend();
        mem.register(f.path(), MemoryContainer::new());

        let file = OmxFile::open_with(mem.clone(), f.path(), OmxOptions::default()).unwrap();
        assert!(file.is_valid());
        assert_eq!(file.backend_name(), "memory");
        assert_eq!(file.path(), f.path());
        assert!(format!("{:?}", file).contains("memory"));

        mem.unregister(f.path());
        assert!(!file.is_valid());
        file.close().unwrap();
    }
}
