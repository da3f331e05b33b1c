//! Datatype class codes as reported by the container engine.

use std::fmt;

/// Datatype class of an attribute or dataset element.
///
/// Discriminants are the engine's class codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum TypeClass {
    /// Error / no class
    #[default]
    NoClass = -1,
    /// Integer types
    Integer = 0,
    /// Floating-point types
    Float = 1,
    /// Date and time types
    Time = 2,
    /// Character string types
    String = 3,
    /// Bit field types
    Bitfield = 4,
    /// Opaque types
    Opaque = 5,
    /// Compound types
    Compound = 6,
    /// Reference types
    Reference = 7,
    /// Enumeration types
    Enum = 8,
    /// Variable-length sequence types
    VarLen = 9,
    /// Array types
    Array = 10,
}

impl TypeClass {
    /// The engine class code.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i8 as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoClass => "no-class",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Time => "time",
            Self::String => "string",
            Self::Bitfield => "bitfield",
            Self::Opaque => "opaque",
            Self::Compound => "compound",
            Self::Reference => "reference",
            Self::Enum => "enum",
            Self::VarLen => "vlen",
            Self::Array => "array",
        }
    }

    /// Integer or float.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
