//! Names of the reserved OMX objects.

/// Group holding the matrix tables.
pub const DATA_GROUP: &str = "data";

/// Root attribute holding the format version.
pub const VERSION_ATTRIBUTE: &str = "OMX_VERSION";

/// Root attribute holding the matrix shape (zone count).
pub const SHAPE_ATTRIBUTE: &str = "SHAPE";

/// Options controlling where an [`OmxFile`](super::OmxFile) looks for its
/// tables and metadata.
///
/// The defaults follow the OMX layout; override them only for files written
/// by tools that rename the reserved objects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OmxOptions {
    /// Top-level group whose members are the tables
    pub data_group: String,
    /// Root attribute read by `get_version`
    pub version_attribute: String,
    /// Root attribute read by `get_zone_count` / `get_shape`
    pub shape_attribute: String,
}

impl Default for OmxOptions {
    fn default() -> Self {
        Self {
            data_group: DATA_GROUP.to_string(),
            version_attribute: VERSION_ATTRIBUTE.to_string(),
            shape_attribute: SHAPE_ATTRIBUTE.to_string(),
        }
    }
}

impl OmxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_group(mut self, name: impl Into<String>) -> Self {
        self.data_group = name.into();
        self
    }

    pub fn with_version_attribute(mut self, name: impl Into<String>) -> Self {
        self.version_attribute = name.into();
        self
    }

    pub fn with_shape_attribute(mut self, name: impl Into<String>) -> Self {
        self.shape_attribute = name.into();
        self
    }
}
