//! Datatype - element class, size and byte order of stored values.

use bytemuck::Pod;
use half::f16;
use std::fmt;

use super::TypeClass;

/// Byte order of multi-byte elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the host.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

/// Native representation a stored value is read into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// Signed integer, read as `i64`
    Int,
    /// Unsigned integer, read as `u64`
    UInt,
    /// Floating point, read as `f64`
    Float,
    /// Character string, read as `String`
    Text,
}

/// Datatype describes how one element of an attribute or dataset is stored.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datatype {
    pub class: TypeClass,
    /// Element size in bytes. Zero for variable-length strings.
    pub size: usize,
    /// Only meaningful for integers.
    pub signed: bool,
    pub order: ByteOrder,
}

impl Datatype {
    #[inline]
    pub const fn new(class: TypeClass, size: usize, signed: bool, order: ByteOrder) -> Self {
        Self { class, size, signed, order }
    }

    #[inline]
    pub const fn int(size: usize) -> Self {
        Self::new(TypeClass::Integer, size, true, ByteOrder::native())
    }

    #[inline]
    pub const fn uint(size: usize) -> Self {
        Self::new(TypeClass::Integer, size, false, ByteOrder::native())
    }

    #[inline]
    pub const fn float(size: usize) -> Self {
        Self::new(TypeClass::Float, size, true, ByteOrder::native())
    }

    /// Fixed-length string of `size` bytes.
    #[inline]
    pub const fn fixed_string(size: usize) -> Self {
        Self::new(TypeClass::String, size, false, ByteOrder::native())
    }

    /// Same type with a different byte order.
    #[inline]
    pub const fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub const UNKNOWN: Self = Self::new(TypeClass::NoClass, 0, false, ByteOrder::Little);

    pub const INT8: Self = Self::int(1);
    pub const INT16: Self = Self::int(2);
    pub const INT32: Self = Self::int(4);
    pub const INT64: Self = Self::int(8);
    pub const UINT8: Self = Self::uint(1);
    pub const UINT16: Self = Self::uint(2);
    pub const UINT32: Self = Self::uint(4);
    pub const UINT64: Self = Self::uint(8);
    pub const FLOAT16: Self = Self::float(2);
    pub const FLOAT32: Self = Self::float(4);
    pub const FLOAT64: Self = Self::float(8);
    /// Variable-length string.
    pub const STRING: Self = Self::new(TypeClass::String, 0, false, ByteOrder::Little);

    /// Map a stored datatype to the native representation used to read it.
    ///
    /// Returns `None` for classes that have no scalar/string counterpart
    /// (compound, opaque, reference, ...) or for unsupported element sizes.
    pub const fn native_kind(&self) -> Option<NativeKind> {
        match (self.class, self.size, self.signed) {
            (TypeClass::Integer | TypeClass::Enum, 1 | 2 | 4 | 8, true) => Some(NativeKind::Int),
            (TypeClass::Integer | TypeClass::Enum, 1 | 2 | 4 | 8, false) => Some(NativeKind::UInt),
            (TypeClass::Float, 2 | 4 | 8, _) => Some(NativeKind::Float),
            (TypeClass::String, _, _) => Some(NativeKind::Text),
            _ => None,
        }
    }

    /// True if elements can be converted to `f64` by a bulk read.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self.native_kind(),
            Some(NativeKind::Int | NativeKind::UInt | NativeKind::Float)
        )
    }

    /// In-memory target type for table reads.
    #[inline]
    pub const fn native_f64() -> Self {
        Self::FLOAT64
    }
}

impl Default for Datatype {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            TypeClass::Integer if self.signed => write!(f, "int{}", self.size * 8),
            TypeClass::Integer => write!(f, "uint{}", self.size * 8),
            TypeClass::Float => write!(f, "float{}", self.size * 8),
            TypeClass::String if self.size == 0 => write!(f, "string"),
            TypeClass::String => write!(f, "string[{}]", self.size),
            class => write!(f, "{}[{}]", class, self.size),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Scalar types that can be stored as dataset elements.
pub trait ContainerScalar: Pod + Copy + Default {
    /// Datatype of this scalar in host byte order.
    const DATATYPE: Datatype;
}

macro_rules! impl_container_scalar {
    ($($ty:ty => $dt:expr),* $(,)?) => {
        $(impl ContainerScalar for $ty {
            const DATATYPE: Datatype = $dt;
        })*
    };
}

impl_container_scalar! {
    i8 => Datatype::INT8,
    i16 => Datatype::INT16,
    i32 => Datatype::INT32,
    i64 => Datatype::INT64,
    u8 => Datatype::UINT8,
    u16 => Datatype::UINT16,
    u32 => Datatype::UINT32,
    u64 => Datatype::UINT64,
    f16 => Datatype::FLOAT16,
    f32 => Datatype::FLOAT32,
    f64 => Datatype::FLOAT64,
}
