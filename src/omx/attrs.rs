//! Root attribute reader.

use super::OmxFile;
use crate::core::AttrValue;
use crate::util::{Error, Result};

/// Reads the metadata attributes attached to the root of an [`OmxFile`].
///
/// Holds no resource of its own: each read opens the attribute, reads it
/// with its declared type and releases it before returning.
#[derive(Clone, Copy, Debug)]
pub struct OmxAttrs<'f> {
    file: &'f OmxFile,
}

impl<'f> OmxAttrs<'f> {
    pub fn new(file: &'f OmxFile) -> Self {
        Self { file }
    }

    /// Read any root attribute using its declared type.
    pub fn get(&self, name: &str) -> Result<AttrValue> {
        let not_found = |e: Error| {
            tracing::debug!(attribute = name, error = %e, "attribute unavailable");
            Error::AttributeNotFound(name.to_string())
        };
        let attr = self.file.reader().open_attribute(name).map_err(not_found)?;
        let dtype = attr.datatype().map_err(not_found)?;
        if dtype.native_kind().is_none() {
            return Err(Error::type_mismatch("scalar or string attribute", dtype));
        }
        attr.read(&dtype).map_err(|e| match e {
            Error::TypeMismatch { .. } => e,
            e => not_found(e),
        })
    }

    /// True if the root carries an attribute called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.file.reader().open_attribute(name).is_ok()
    }

    /// The format version, e.g. `"0.2"`.
    ///
    /// A numeric version attribute is rendered as text.
    pub fn get_version(&self) -> Result<String> {
        let value = self.get(&self.file.options().version_attribute)?;
        Ok(match value {
            AttrValue::Text(s) => s.trim_end_matches('\0').to_string(),
            other => other.to_string(),
        })
    }

    /// Every element of the shape attribute.
    pub fn get_shape(&self) -> Result<Vec<u64>> {
        let name = &self.file.options().shape_attribute;
        let value = self.get(name)?;
        value
            .to_integers()
            .ok_or_else(|| Error::type_mismatch("non-negative integer shape", &value))
    }

    /// The zone count N: the first element of the shape attribute.
    ///
    /// Tables are assumed square; a shape with unequal extents is logged and
    /// only its first extent is used.
    pub fn get_zone_count(&self) -> Result<usize> {
        let shape = self.get_shape()?;
        let name = &self.file.options().shape_attribute;
        let zones = *shape
            .first()
            .ok_or_else(|| Error::type_mismatch("at least one shape element", "empty shape"))?;
        if shape.iter().any(|&d| d != zones) {
            tracing::warn!(attribute = %name, ?shape, "non-square shape, using first extent");
        }
        usize::try_from(zones).map_err(|_| Error::type_mismatch("zone count within usize", zones))
    }
}
