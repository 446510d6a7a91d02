//! Object and property headers.

use std::fmt;

use super::MetaData;
use crate::util::DataType;

/// Identity of an object in the hierarchy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectHeader {
    /// Name of this object (not full path).
    pub name: String,
    /// Full path from root, e.g. `/parent/child`. The root is `/`.
    pub full_name: String,
    pub meta_data: MetaData,
}

impl ObjectHeader {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            meta_data: MetaData::new(),
        }
    }

    /// Header for a child of `parent_full_name`.
    pub fn child_of(parent_full_name: &str, name: &str, meta_data: MetaData) -> Self {
        let full_name = if parent_full_name.ends_with('/') {
            format!("{parent_full_name}{name}")
        } else {
            format!("{parent_full_name}/{name}")
        };
        Self { name: name.to_string(), full_name, meta_data }
    }

    pub fn schema(&self) -> Option<&str> {
        self.meta_data.schema()
    }
}

/// Kind of property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// One element group per sample.
    #[default]
    Scalar,
    /// Variable-length run of elements per sample.
    Array,
    /// Container of named child properties.
    Compound,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Compound => "compound",
        })
    }
}

/// Name, kind, element type and sampling of a property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyHeader {
    pub name: String,
    pub property_type: PropertyType,
    /// Element type; [`DataType::UNKNOWN`] for compounds.
    pub data_type: DataType,
    /// Index into the archive's time sampling table. 0 is the identity sampling.
    pub time_sampling_index: u32,
    pub meta_data: MetaData,
}

impl PropertyHeader {
    fn with_kind(name: impl Into<String>, property_type: PropertyType, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            property_type,
            data_type,
            time_sampling_index: 0,
            meta_data: MetaData::new(),
        }
    }

    pub fn scalar(name: impl Into<String>, data_type: DataType) -> Self {
        Self::with_kind(name, PropertyType::Scalar, data_type)
    }

    pub fn array(name: impl Into<String>, data_type: DataType) -> Self {
        Self::with_kind(name, PropertyType::Array, data_type)
    }

    pub fn compound(name: impl Into<String>) -> Self {
        Self::with_kind(name, PropertyType::Compound, DataType::UNKNOWN)
    }

    pub fn with_time_sampling(mut self, index: u32) -> Self {
        self.time_sampling_index = index;
        self
    }

    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = meta_data;
        self
    }

    pub fn is_scalar(&self) -> bool {
        self.property_type == PropertyType::Scalar
    }

    pub fn is_array(&self) -> bool {
        self.property_type == PropertyType::Array
    }

    pub fn is_compound(&self) -> bool {
        self.property_type == PropertyType::Compound
    }

    /// Scalar or array.
    pub fn is_simple(&self) -> bool {
        !self.is_compound()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_of() {
        let top = ObjectHeader::child_of("/", "xf", MetaData::new());
        assert_eq!(top.full_name, "/xf");
        let nested = ObjectHeader::child_of(&top.full_name, "child", MetaData::new());
        assert_eq!(nested.full_name, "/xf/child");
        assert_eq!(nested.name, "child");
    }

    #[test]
    fn test_property_kinds() {
        let s = PropertyHeader::scalar("P", DataType::VEC3F);
        assert!(s.is_scalar() && s.is_simple());
        let a = PropertyHeader::array("vertices", DataType::VEC3F).with_time_sampling(1);
        assert!(a.is_array());
        assert_eq!(a.time_sampling_index, 1);
        let c = PropertyHeader::compound(".xform");
        assert!(c.is_compound() && !c.is_simple());
        assert_eq!(c.data_type, DataType::UNKNOWN);
        assert_eq!(PropertyType::Array.to_string(), "array");
    }
}
