//! DataType - combines POD type with extent (dimensionality).

use super::PlainOldDataType;
use std::fmt;

/// DataType describes how one element of a sample is stored.
///
/// A Vec3f is Float32 with extent 3; a transform channel block of
/// twelve doubles is Float64 with extent 12.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub pod: PlainOldDataType,
    /// Number of POD elements per value (1 for scalars).
    pub extent: u8,
}

impl DataType {
    #[inline]
    pub const fn new(pod: PlainOldDataType, extent: u8) -> Self {
        Self { pod, extent }
    }

    /// Extent 1.
    #[inline]
    pub const fn scalar(pod: PlainOldDataType) -> Self {
        Self { pod, extent: 1 }
    }

    /// Total size in bytes of one value, 0 for strings.
    #[inline]
    pub const fn num_bytes(&self) -> usize {
        self.pod.num_bytes() * self.extent as usize
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.pod, PlainOldDataType::Unknown) && self.extent > 0
    }

    /// Multiply the extent, as for a scalar holding `count` values of `self`.
    /// Returns `None` when the result does not fit the u8 extent.
    pub fn with_multiplier(self, count: usize) -> Option<Self> {
        let extent = (self.extent as usize).checked_mul(count)?;
        u8::try_from(extent).ok().filter(|&e| e > 0).map(|e| Self::new(self.pod, e))
    }

    pub const UNKNOWN: Self = Self::new(PlainOldDataType::Unknown, 0);

    pub const BOOL: Self = Self::scalar(PlainOldDataType::Boolean);
    pub const UINT8: Self = Self::scalar(PlainOldDataType::Uint8);
    pub const INT8: Self = Self::scalar(PlainOldDataType::Int8);
    pub const UINT16: Self = Self::scalar(PlainOldDataType::Uint16);
    pub const INT16: Self = Self::scalar(PlainOldDataType::Int16);
    pub const UINT32: Self = Self::scalar(PlainOldDataType::Uint32);
    pub const INT32: Self = Self::scalar(PlainOldDataType::Int32);
    pub const UINT64: Self = Self::scalar(PlainOldDataType::Uint64);
    pub const INT64: Self = Self::scalar(PlainOldDataType::Int64);
    pub const FLOAT16: Self = Self::scalar(PlainOldDataType::Float16);
    pub const FLOAT32: Self = Self::scalar(PlainOldDataType::Float32);
    pub const FLOAT64: Self = Self::scalar(PlainOldDataType::Float64);
    pub const STRING: Self = Self::scalar(PlainOldDataType::String);
    pub const WSTRING: Self = Self::scalar(PlainOldDataType::Wstring);

    pub const VEC2F: Self = Self::new(PlainOldDataType::Float32, 2);
    pub const VEC3F: Self = Self::new(PlainOldDataType::Float32, 3);
    pub const VEC4F: Self = Self::new(PlainOldDataType::Float32, 4);
    pub const VEC2D: Self = Self::new(PlainOldDataType::Float64, 2);
    pub const VEC3D: Self = Self::new(PlainOldDataType::Float64, 3);
    pub const VEC4D: Self = Self::new(PlainOldDataType::Float64, 4);
    pub const VEC2I: Self = Self::new(PlainOldDataType::Int32, 2);
    pub const VEC3I: Self = Self::new(PlainOldDataType::Int32, 3);

    pub const MAT44F: Self = Self::new(PlainOldDataType::Float32, 16);
    pub const MAT44D: Self = Self::new(PlainOldDataType::Float64, 16);
    pub const QUATF: Self = Self::new(PlainOldDataType::Float32, 4);

    /// min + max, 2 * vec3
    pub const BOX3D: Self = Self::new(PlainOldDataType::Float64, 6);
}

impl Default for DataType {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extent == 1 {
            write!(f, "{}", self.pod.name())
        } else {
            write!(f, "{}[{}]", self.pod.name(), self.extent)
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_sizes() {
        assert_eq!(DataType::BOOL.num_bytes(), 1);
        assert_eq!(DataType::VEC3F.num_bytes(), 12);
        assert_eq!(DataType::MAT44D.num_bytes(), 128);
        assert_eq!(DataType::BOX3D.num_bytes(), 48);
        assert_eq!(DataType::STRING.num_bytes(), 0);
    }

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::FLOAT32.to_string(), "float32_t");
        assert_eq!(DataType::VEC3F.to_string(), "float32_t[3]");
    }

    #[test]
    fn test_with_multiplier() {
        assert_eq!(DataType::FLOAT64.with_multiplier(12), Some(DataType::new(PlainOldDataType::Float64, 12)));
        assert_eq!(DataType::VEC3D.with_multiplier(2), Some(DataType::new(PlainOldDataType::Float64, 6)));
        assert_eq!(DataType::FLOAT64.with_multiplier(256), None);
        assert_eq!(DataType::FLOAT64.with_multiplier(0), None);
    }

    #[test]
    fn test_data_type_validity() {
        assert!(DataType::VEC3F.is_valid());
        assert!(!DataType::UNKNOWN.is_valid());
        assert!(!DataType::new(PlainOldDataType::Float32, 0).is_valid());
    }
}
