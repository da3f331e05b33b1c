//! Container engine backed by the HDF5 C library.
//!
//! Requires the `hdf5` feature and a system HDF5 installation
//! (`apt install libhdf5-dev`, `brew install hdf5`).

use std::path::{Path, PathBuf};

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{IterationOrder, TraversalOrder};

use crate::core::{
    AttrValue, AttributeReader, Backend, DatasetReader, FileReader, GroupReader, Layout,
};
use crate::util::{ByteOrder, Datatype, Dimensions, Error, NativeKind, Result, TypeClass};

/// Longest fixed-length string attribute read back, in bytes.
const MAX_FIXED_STRING: usize = 8192;

/// Engine over the `hdf5` crate.
///
/// Group members are listed in creation order when the file tracks it.
/// Fixed-length string attributes are read up to 8192 bytes; longer ones
/// are a type mismatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5Backend;

impl Hdf5Backend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for Hdf5Backend {
    fn name(&self) -> &str {
        "hdf5"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FileReader>> {
        let file = hdf5::File::open(path)?;
        Ok(Box::new(NativeFile {
            path: path.to_path_buf(),
            file,
        }))
    }
}

/// Map an engine type descriptor to a [`Datatype`].
///
/// The library converts to host order on read, so the order is always native.
fn datatype_of(desc: &TypeDescriptor) -> Datatype {
    let native = ByteOrder::native();
    match desc {
        TypeDescriptor::Integer(size) => Datatype::int(*size as usize),
        TypeDescriptor::Unsigned(size) => Datatype::uint(*size as usize),
        TypeDescriptor::Float(size) => Datatype::float(*size as usize),
        TypeDescriptor::Boolean => Datatype::new(TypeClass::Enum, 1, false, native),
        TypeDescriptor::Enum(e) => Datatype::new(TypeClass::Enum, e.size as usize, e.signed, native),
        TypeDescriptor::FixedAscii(n) | TypeDescriptor::FixedUnicode(n) => Datatype::fixed_string(*n),
        TypeDescriptor::VarLenAscii | TypeDescriptor::VarLenUnicode => Datatype::STRING,
        TypeDescriptor::Compound(c) => Datatype::new(TypeClass::Compound, c.size, false, native),
        TypeDescriptor::FixedArray(inner, len) => {
            Datatype::new(TypeClass::Array, inner.size() * len, false, native)
        }
        TypeDescriptor::VarLenArray(_) => Datatype::new(TypeClass::VarLen, 0, false, native),
        _ => Datatype::UNKNOWN,
    }
}

struct NativeFile {
    path: PathBuf,
    file: hdf5::File,
}

impl FileReader for NativeFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn open_attribute(&self, name: &str) -> Result<Box<dyn AttributeReader + '_>> {
        let attr = self
            .file
            .attr(name)
            .map_err(|_| Error::ObjectNotFound(name.to_string()))?;
        Ok(Box::new(NativeAttribute {
            name: name.to_string(),
            attr,
        }))
    }

    fn open_group(&self, name: &str) -> Result<Box<dyn GroupReader + '_>> {
        let group = self
            .file
            .group(name)
            .map_err(|_| Error::ObjectNotFound(name.to_string()))?;
        // Names are listed once; per-index queries index into this list.
        let members = member_names(&group)?;
        Ok(Box::new(NativeGroup {
            name: name.to_string(),
            group,
            members,
        }))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}

/// Member names in creation order, or name order when the group does not
/// track creation order.
fn member_names(group: &hdf5::Group) -> Result<Vec<String>> {
    let by_creation = group.iter_visit(
        IterationOrder::Increasing,
        TraversalOrder::Creation,
        Vec::new(),
        |_, name, _, names: &mut Vec<String>| {
            names.push(name.to_string());
            true
        },
    );
    match by_creation {
        Ok(names) => Ok(names),
        Err(e) => {
            tracing::debug!(group = %group.name(), error = %e, "no creation order index, listing by name");
            Ok(group.member_names()?)
        }
    }
}

fn read_fixed_ascii<const N: usize>(attr: &hdf5::Attribute) -> Result<Vec<String>> {
    Ok(attr
        .read_raw::<FixedAscii<N>>()?
        .iter()
        .map(|s| s.as_str().to_string())
        .collect())
}

fn read_fixed_unicode<const N: usize>(attr: &hdf5::Attribute) -> Result<Vec<String>> {
    Ok(attr
        .read_raw::<FixedUnicode<N>>()?
        .iter()
        .map(|s| s.as_str().to_string())
        .collect())
}

struct NativeAttribute {
    name: String,
    attr: hdf5::Attribute,
}

impl NativeAttribute {
    fn read_text(&self) -> Result<String> {
        let values = match self.attr.dtype()?.to_descriptor()? {
            TypeDescriptor::VarLenUnicode => self
                .attr
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            TypeDescriptor::VarLenAscii => self
                .attr
                .read_raw::<VarLenAscii>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            TypeDescriptor::FixedAscii(len) => self.read_fixed(len, false)?,
            TypeDescriptor::FixedUnicode(len) => self.read_fixed(len, true)?,
            other => return Err(Error::type_mismatch("string attribute", datatype_of(&other))),
        };
        values
            .into_iter()
            .next()
            .ok_or_else(|| Error::backend(format!("attribute '{}' is empty", self.name)))
    }

    /// Read a fixed-length string into the smallest buffer that holds `len` bytes.
    fn read_fixed(&self, len: usize, unicode: bool) -> Result<Vec<String>> {
        macro_rules! read_sized {
            ($($cap:literal),*) => {
                $(if len <= $cap {
                    return if unicode {
                        read_fixed_unicode::<$cap>(&self.attr)
                    } else {
                        read_fixed_ascii::<$cap>(&self.attr)
                    };
                })*
            };
        }
        read_sized!(64, 256, 1024, 8192);
        Err(Error::type_mismatch(
            format!("fixed string of at most {} bytes", MAX_FIXED_STRING),
            Datatype::fixed_string(len),
        ))
    }
}

impl AttributeReader for NativeAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn datatype(&self) -> Result<Datatype> {
        Ok(datatype_of(&self.attr.dtype()?.to_descriptor()?))
    }

    fn space(&self) -> Result<Dimensions> {
        Ok(Dimensions::from(self.attr.shape()))
    }

    fn read(&self, mem_type: &Datatype) -> Result<AttrValue> {
        match mem_type.native_kind() {
            Some(NativeKind::Text) => Ok(AttrValue::Text(self.read_text()?)),
            Some(NativeKind::Int) => Ok(AttrValue::Int(self.attr.read_raw::<i64>()?)),
            Some(NativeKind::UInt) => Ok(AttrValue::UInt(self.attr.read_raw::<u64>()?)),
            Some(NativeKind::Float) => Ok(AttrValue::Float(self.attr.read_raw::<f64>()?)),
            None => Err(Error::type_mismatch("scalar or string type", mem_type)),
        }
    }
}

struct NativeGroup {
    name: String,
    group: hdf5::Group,
    members: Vec<String>,
}

impl GroupReader for NativeGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_members(&self) -> Result<u64> {
        Ok(self.group.len())
    }

    fn member_name(&self, index: u64) -> Result<String> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.members.get(i))
            .cloned()
            .ok_or_else(|| Error::ObjectNotFound(format!("{}[{}]", self.name, index)))
    }

    fn open_dataset(&self, name: &str) -> Result<Box<dyn DatasetReader + '_>> {
        let dataset = self
            .group
            .dataset(name)
            .map_err(|_| Error::ObjectNotFound(format!("{}/{}", self.name, name)))?;
        Ok(Box::new(NativeDataset {
            name: name.to_string(),
            dataset,
        }))
    }
}

struct NativeDataset {
    name: String,
    dataset: hdf5::Dataset,
}

impl DatasetReader for NativeDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn space(&self) -> Result<Dimensions> {
        Ok(Dimensions::from(self.dataset.shape()))
    }

    fn layout(&self) -> Result<Layout> {
        Ok(match self.dataset.chunk() {
            Some(chunk) => Layout::Chunked(Dimensions::from(chunk)),
            None => Layout::Contiguous,
        })
    }

    fn datatype(&self) -> Result<Datatype> {
        Ok(datatype_of(&self.dataset.dtype()?.to_descriptor()?))
    }

    fn read(&self, mem_type: &Datatype, mem_space: &Dimensions, buf: &mut [f64]) -> Result<()> {
        if mem_type.class != TypeClass::Float || mem_type.size != 8 {
            return Err(Error::type_mismatch("float64 memory type", mem_type));
        }
        if mem_space.num_points() != Some(buf.len()) {
            return Err(Error::backend(format!(
                "memory space {} does not match buffer of {} elements",
                mem_space,
                buf.len()
            )));
        }
        let data = self.dataset.read_raw::<f64>()?;
        if data.len() != buf.len() {
            return Err(Error::backend(format!(
                "dataset '{}' holds {} elements, buffer has {}",
                self.name,
                data.len(),
                buf.len()
            )));
        }
        buf.copy_from_slice(&data);
        Ok(())
    }
}
