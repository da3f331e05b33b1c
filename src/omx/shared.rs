//! Serialized access to one open file from several threads.

use std::sync::Arc;

use parking_lot::Mutex;

use super::OmxFile;

/// A cloneable handle to one [`OmxFile`], with access serialized by a mutex.
///
/// Engine handles are not safe for concurrent use, so every call goes
/// through [`with`](Self::with) and holds the lock for its duration. Open a
/// separate `OmxFile` per thread instead when reads should run in parallel.
#[derive(Clone, Debug)]
pub struct SharedOmxFile {
    inner: Arc<Mutex<OmxFile>>,
}

impl SharedOmxFile {
    pub fn new(file: OmxFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }

    /// Run `f` with exclusive access to the file.
    pub fn with<R>(&self, f: impl FnOnce(&OmxFile) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Take the file back once this is the last handle, e.g. to close it.
    pub fn into_inner(self) -> Result<OmxFile, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<OmxFile> for SharedOmxFile {
    fn from(file: OmxFile) -> Self {
        Self::new(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdf::{MemoryAttribute, MemoryBackend, MemoryContainer, MemoryDataset, MemoryGroup};
    use crate::omx::OmxOptions;

    #[test]
    fn test_threads_share_one_handle() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let backend = Arc::new(MemoryBackend::new());
        let values: Vec<f64> = (0..16).map(f64::from).collect();
        backend.register(
            f.path(),
            MemoryContainer::new()
                .with_attribute(MemoryAttribute::ints("SHAPE", &[4, 4]))
                .with_group(
                    MemoryGroup::new("data")
                        .with_dataset(MemoryDataset::from_values("t", (4, 4), &values).unwrap()),
                ),
        );
        let file = OmxFile::open_with(backend, f.path(), OmxOptions::default()).unwrap();
        let shared = SharedOmxFile::from(file);

        let sums: Vec<f64> = std::thread::scope(|s| {
            let handles: Vec<_> = (1..=4)
                .map(|zone| {
                    let shared = shared.clone();
                    s.spawn(move || {
                        shared.with(|file| {
                            let m = file.load_table("t").unwrap();
                            m.get_row(zone).unwrap().iter().sum::<f64>()
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(sums, vec![6.0, 22.0, 38.0, 54.0]);

        let file = shared.into_inner().unwrap();
        file.close().unwrap();
    }

    #[test]
    fn test_into_inner_with_other_handles() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let backend = Arc::new(MemoryBackend::new());
        backend.register(f.path(), MemoryContainer::new());
        let file = OmxFile::open_with(backend, f.path(), OmxOptions::default()).unwrap();

        let shared = SharedOmxFile::new(file);
        let other = shared.clone();
        let shared = shared.into_inner().unwrap_err();
        drop(other);
        assert!(shared.into_inner().is_ok());
    }
}
