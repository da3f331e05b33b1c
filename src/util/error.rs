//! Error types for the OMX reader.

use std::path::PathBuf;
use thiserror::Error;

use super::Dimensions;

/// Main error type for OMX operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Path does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The format probe did not recognise the file as a container
    #[error("Not a valid HDF5 container: {0}")]
    NotAValidContainer(PathBuf),

    /// The engine refused to open a file that probed as valid
    #[error("Failed to open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// Root attribute absent or unreadable
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    /// Reserved table group absent
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Named table absent from the table group
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Declared zone count disagrees with the dataset's extents
    #[error("Shape mismatch for table '{table}': expected [{zones} x {zones}], found {actual}")]
    ShapeMismatch {
        table: String,
        zones: usize,
        actual: Dimensions,
    },

    /// Bulk read of a table failed
    #[error("Failed to read table '{table}': {reason}")]
    ReadError { table: String, reason: String },

    /// 1-based zone index outside `[1, count]`
    #[error("Zone index {index} out of range (valid: 1..={count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Stored type cannot be converted to the requested representation
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Object missing inside the container (engine level)
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Failure reported by the container engine
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a backend error from a message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }
}

#[cfg(feature = "hdf5")]
impl From<hdf5::Error> for Error {
    fn from(e: hdf5::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Result type alias for OMX operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::IndexOutOfRange { index: 11, count: 10 };
        assert!(e.to_string().contains("11"));
        assert!(e.to_string().contains("1..=10"));

        let e = Error::ShapeMismatch {
            table: "Counting".into(),
            zones: 12,
            actual: Dimensions::d2(10, 10),
        };
        let msg = e.to_string();
        assert!(msg.contains("Counting"));
        assert!(msg.contains("[12 x 12]"));
        assert!(msg.contains("[10 x 10]"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
