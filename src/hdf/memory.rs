//! In-process container engine.
//!
//! [`MemoryBackend`] serves container trees that live in memory, keyed by
//! the filesystem path they stand in for. Datasets keep their raw bytes and
//! stored [`Datatype`]; a bulk read converts them to `f64` the same way the
//! native engine converts on read.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use half::f16;
use parking_lot::RwLock;

use super::signature;
use crate::core::{
    AttrValue, AttributeReader, Backend, DatasetReader, FileReader, GroupReader, Layout,
};
use crate::util::{
    ByteOrder, ContainerScalar, Datatype, Dimensions, Error, NativeKind, Result, TypeClass,
};

// ============================================================================
// Tree
// ============================================================================

/// An attribute with its stored type and value.
#[derive(Clone, Debug)]
pub struct MemoryAttribute {
    name: String,
    datatype: Datatype,
    space: Dimensions,
    value: AttrValue,
}

impl MemoryAttribute {
    /// Scalar variable-length string attribute.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: Datatype::STRING,
            space: Dimensions::scalar(),
            value: AttrValue::Text(value.into()),
        }
    }

    /// Rank-1 signed integer attribute, stored as `int64`.
    pub fn ints(name: impl Into<String>, values: &[i64]) -> Self {
        Self {
            name: name.into(),
            datatype: Datatype::INT64,
            space: Dimensions::d1(values.len()),
            value: AttrValue::Int(values.to_vec()),
        }
    }

    /// Rank-1 float attribute, stored as `float64`.
    pub fn floats(name: impl Into<String>, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            datatype: Datatype::FLOAT64,
            space: Dimensions::d1(values.len()),
            value: AttrValue::Float(values.to_vec()),
        }
    }

    /// Override the stored datatype, e.g. `int32` or a fixed-length string.
    ///
    /// The held value keeps its native form.
    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = datatype;
        self
    }

    /// Store as a scalar dataspace rather than a rank-1 vector.
    pub fn scalar(mut self) -> Self {
        self.space = Dimensions::scalar();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A dataset: raw element bytes plus their type, dataspace and layout.
#[derive(Clone, Debug)]
pub struct MemoryDataset {
    name: String,
    datatype: Datatype,
    space: Dimensions,
    layout: Layout,
    bytes: Vec<u8>,
}

impl MemoryDataset {
    /// Build from typed values in host byte order.
    pub fn from_values<T: ContainerScalar>(
        name: impl Into<String>,
        space: impl Into<Dimensions>,
        values: &[T],
    ) -> Result<Self> {
        let bytes = bytemuck::cast_slice::<T, u8>(values).to_vec();
        Self::from_raw(name, T::DATATYPE, space, bytes)
    }

    /// Build from raw element bytes of the given type.
    pub fn from_raw(
        name: impl Into<String>,
        datatype: Datatype,
        space: impl Into<Dimensions>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let name = name.into();
        let space = space.into();
        let expected = space
            .num_points()
            .and_then(|n| n.checked_mul(datatype.size))
            .ok_or_else(|| Error::backend(format!("dataspace {} overflows", space)))?;
        if bytes.len() != expected {
            return Err(Error::backend(format!(
                "dataset '{}': {} bytes for {} elements of {}",
                name,
                bytes.len(),
                space,
                datatype
            )));
        }
        Ok(Self {
            name,
            datatype,
            space,
            layout: Layout::Contiguous,
            bytes,
        })
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A group of datasets, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryGroup {
    name: String,
    datasets: Vec<MemoryDataset>,
}

impl MemoryGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasets: Vec::new(),
        }
    }

    pub fn with_dataset(mut self, dataset: MemoryDataset) -> Self {
        self.push(dataset);
        self
    }

    /// Append a dataset, replacing any existing one of the same name in place.
    pub fn push(&mut self, dataset: MemoryDataset) {
        match self.datasets.iter_mut().find(|d| d.name == dataset.name) {
            Some(slot) => *slot = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Root of an in-memory container: root attributes and top-level groups.
#[derive(Clone, Debug, Default)]
pub struct MemoryContainer {
    attributes: Vec<MemoryAttribute>,
    groups: Vec<MemoryGroup>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: MemoryAttribute) -> Self {
        self.attributes.retain(|a| a.name != attribute.name);
        self.attributes.push(attribute);
        self
    }

    pub fn with_group(mut self, group: MemoryGroup) -> Self {
        self.groups.retain(|g| g.name != group.name);
        self.groups.push(group);
        self
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Engine serving [`MemoryContainer`]s registered against paths.
///
/// Meant for fixtures and tests: it never parses a file on disk.
/// Probing a registered path succeeds; any other path falls back to the
/// on-disk signature probe. Opening an unregistered path fails.
#[derive(Default)]
pub struct MemoryBackend {
    files: RwLock<HashMap<PathBuf, Arc<MemoryContainer>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `container` for `path`, replacing any earlier registration.
    pub fn register(&self, path: impl Into<PathBuf>, container: MemoryContainer) {
        self.files.write().insert(path.into(), Arc::new(container));
    }

    /// Stop serving `path`. Returns true if it was registered.
    pub fn unregister(&self, path: &Path) -> bool {
        self.files.write().remove(path).is_some()
    }

    pub fn is_registered(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn probe(&self, path: &Path) -> Result<bool> {
        if self.is_registered(path) {
            return Ok(true);
        }
        signature::probe_file(path)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FileReader>> {
        let container = self
            .files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::backend(format!("no container registered at {}", path.display())))?;
        Ok(Box::new(MemoryFile {
            path: path.to_path_buf(),
            container,
        }))
    }
}

struct MemoryFile {
    path: PathBuf,
    container: Arc<MemoryContainer>,
}

impl FileReader for MemoryFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn open_attribute(&self, name: &str) -> Result<Box<dyn AttributeReader + '_>> {
        self.container
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| Box::new(AttrHandle(a)) as Box<dyn AttributeReader + '_>)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    fn open_group(&self, name: &str) -> Result<Box<dyn GroupReader + '_>> {
        self.container
            .groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| Box::new(GroupHandle(g)) as Box<dyn GroupReader + '_>)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

struct AttrHandle<'a>(&'a MemoryAttribute);

impl AttributeReader for AttrHandle<'_> {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn datatype(&self) -> Result<Datatype> {
        Ok(self.0.datatype)
    }

    fn space(&self) -> Result<Dimensions> {
        Ok(self.0.space.clone())
    }

    fn read(&self, mem_type: &Datatype) -> Result<AttrValue> {
        let kind = mem_type
            .native_kind()
            .ok_or_else(|| Error::type_mismatch("scalar or string type", mem_type))?;
        convert_attr(&self.0.value, kind)
    }
}

/// Convert an attribute value to the requested native kind.
fn convert_attr(value: &AttrValue, kind: NativeKind) -> Result<AttrValue> {
    let mismatch = || Error::type_mismatch(format!("{:?}", kind), format!("{:?}", value.kind()));
    Ok(match (kind, value) {
        (NativeKind::Text, AttrValue::Text(s)) => AttrValue::Text(s.clone()),
        (NativeKind::Int, AttrValue::Int(v)) => AttrValue::Int(v.clone()),
        (NativeKind::UInt, AttrValue::UInt(v)) => AttrValue::UInt(v.clone()),
        (NativeKind::Float, AttrValue::Float(v)) => AttrValue::Float(v.clone()),
        (NativeKind::Float, AttrValue::Int(v)) => AttrValue::Float(v.iter().map(|&x| x as f64).collect()),
        (NativeKind::Float, AttrValue::UInt(v)) => AttrValue::Float(v.iter().map(|&x| x as f64).collect()),
        (NativeKind::Int, AttrValue::UInt(v)) => AttrValue::Int(
            v.iter()
                .map(|&x| i64::try_from(x).map_err(|_| mismatch()))
                .collect::<Result<_>>()?,
        ),
        (NativeKind::UInt, AttrValue::Int(v)) => AttrValue::UInt(
            v.iter()
                .map(|&x| u64::try_from(x).map_err(|_| mismatch()))
                .collect::<Result<_>>()?,
        ),
        _ => return Err(mismatch()),
    })
}

struct GroupHandle<'a>(&'a MemoryGroup);

impl GroupReader for GroupHandle<'_> {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn num_members(&self) -> Result<u64> {
        Ok(self.0.datasets.len() as u64)
    }

    fn member_name(&self, index: u64) -> Result<String> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.0.datasets.get(i))
            .map(|d| d.name.clone())
            .ok_or_else(|| {
                Error::ObjectNotFound(format!("{}[{}] of {}", self.0.name, index, self.0.datasets.len()))
            })
    }

    fn open_dataset(&self, name: &str) -> Result<Box<dyn DatasetReader + '_>> {
        self.0
            .datasets
            .iter()
            .find(|d| d.name == name)
            .map(|d| Box::new(DatasetHandle(d)) as Box<dyn DatasetReader + '_>)
            .ok_or_else(|| Error::ObjectNotFound(format!("{}/{}", self.0.name, name)))
    }
}

struct DatasetHandle<'a>(&'a MemoryDataset);

impl DatasetReader for DatasetHandle<'_> {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn space(&self) -> Result<Dimensions> {
        Ok(self.0.space.clone())
    }

    fn layout(&self) -> Result<Layout> {
        Ok(self.0.layout.clone())
    }

    fn datatype(&self) -> Result<Datatype> {
        Ok(self.0.datatype)
    }

    fn read(&self, mem_type: &Datatype, mem_space: &Dimensions, buf: &mut [f64]) -> Result<()> {
        let ds = self.0;
        if mem_type.class != TypeClass::Float || mem_type.size != 8 {
            return Err(Error::type_mismatch("float64 memory type", mem_type));
        }
        if !ds.datatype.is_numeric() {
            return Err(Error::type_mismatch("numeric dataset", ds.datatype));
        }
        let points = ds.space.num_points();
        if mem_space.num_points() != points || points != Some(buf.len()) {
            return Err(Error::backend(format!(
                "dataset '{}' {} cannot be read into {} ({} elements)",
                ds.name,
                ds.space,
                mem_space,
                buf.len()
            )));
        }
        match ds.datatype.order {
            ByteOrder::Little => decode::<LittleEndian>(&ds.datatype, &ds.bytes, buf),
            ByteOrder::Big => decode::<BigEndian>(&ds.datatype, &ds.bytes, buf),
        }
    }
}

/// Decode raw elements of `dt` into `out`.
fn decode<E: Endian>(dt: &Datatype, bytes: &[u8], out: &mut [f64]) -> Result<()> {
    if !matches!(dt.class, TypeClass::Integer | TypeClass::Float) || dt.size == 0 {
        return Err(Error::type_mismatch("numeric dataset", dt));
    }
    for (slot, b) in out.iter_mut().zip(bytes.chunks_exact(dt.size)) {
        *slot = match (dt.class, dt.size, dt.signed) {
            (TypeClass::Float, 8, _) => E::read_f64(b),
            (TypeClass::Float, 4, _) => E::read_f32(b) as f64,
            (TypeClass::Float, 2, _) => f16::from_bits(E::read_u16(b)).to_f64(),
            (TypeClass::Integer, 1, true) => b[0] as i8 as f64,
            (TypeClass::Integer, 1, false) => b[0] as f64,
            (TypeClass::Integer, 2, true) => E::read_i16(b) as f64,
            (TypeClass::Integer, 2, false) => E::read_u16(b) as f64,
            (TypeClass::Integer, 4, true) => E::read_i32(b) as f64,
            (TypeClass::Integer, 4, false) => E::read_u32(b) as f64,
            (TypeClass::Integer, 8, true) => E::read_i64(b) as f64,
            (TypeClass::Integer, 8, false) => E::read_u64(b) as f64,
            _ => return Err(Error::type_mismatch("numeric dataset", dt)),
        };
    }
    Ok(())
}
