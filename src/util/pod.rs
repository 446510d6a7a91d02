//! Plain Old Data types - the element types a property can store.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Plain Old Data type enum.
///
/// Every property sample is a run of elements of one of these types. The
/// discriminants are the on-disk tags and must stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PlainOldDataType {
    /// Boolean (stored as u8: 0 = false, non-zero = true)
    Boolean = 0,
    Uint8 = 1,
    Int8 = 2,
    Uint16 = 3,
    Int16 = 4,
    Uint32 = 5,
    Int32 = 6,
    Uint64 = 7,
    Int64 = 8,
    /// IEEE 754 half precision
    Float16 = 9,
    Float32 = 10,
    Float64 = 11,
    /// UTF-8 string, stored null-terminated
    String = 12,
    /// Wide string (stored as UTF-8, null-terminated)
    Wstring = 13,
    /// Unknown/invalid type
    #[default]
    Unknown = 127,
}

impl PlainOldDataType {
    /// Size in bytes of one element, or 0 for the variable-size string types.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Boolean | Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 | Self::Float16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
            Self::Uint64 | Self::Int64 | Self::Float64 => 8,
            Self::String | Self::Wstring | Self::Unknown => 0,
        }
    }

    /// Element size handed to the key hash for endian normalization.
    #[inline]
    pub const fn key_size(self) -> usize {
        match self {
            Self::String => 1,
            Self::Wstring => 4,
            _ => self.num_bytes(),
        }
    }

    /// Alembic type name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "bool_t",
            Self::Uint8 => "uint8_t",
            Self::Int8 => "int8_t",
            Self::Uint16 => "uint16_t",
            Self::Int16 => "int16_t",
            Self::Uint32 => "uint32_t",
            Self::Int32 => "int32_t",
            Self::Uint64 => "uint64_t",
            Self::Int64 => "int64_t",
            Self::Float16 => "float16_t",
            Self::Float32 => "float32_t",
            Self::Float64 => "float64_t",
            Self::String => "string",
            Self::Wstring => "wstring",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse from the Alembic type name.
    pub fn from_name(name: &str) -> Self {
        (0..14u8)
            .map(Self::from_u8)
            .find(|pod| pod.name() == name)
            .unwrap_or(Self::Unknown)
    }

    /// Convert from the stored tag.
    pub const fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Boolean,
            1 => Self::Uint8,
            2 => Self::Int8,
            3 => Self::Uint16,
            4 => Self::Int16,
            5 => Self::Uint32,
            6 => Self::Int32,
            7 => Self::Uint64,
            8 => Self::Int64,
            9 => Self::Float16,
            10 => Self::Float32,
            11 => Self::Float64,
            12 => Self::String,
            13 => Self::Wstring,
            _ => Self::Unknown,
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }

    #[inline]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::Wstring)
    }
}

impl fmt::Display for PlainOldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boolean with guaranteed 1-byte storage (Alembic `bool_t`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bool(u8);

impl Bool {
    pub const TRUE: Self = Self(1);
    pub const FALSE: Self = Self(0);

    #[inline]
    pub const fn new(v: bool) -> Self {
        Self(v as u8)
    }

    #[inline]
    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for Bool {
    #[inline]
    fn from(v: bool) -> Self {
        Self::new(v)
    }
}

impl From<Bool> for bool {
    #[inline]
    fn from(v: Bool) -> Self {
        v.get()
    }
}

impl fmt::Debug for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
