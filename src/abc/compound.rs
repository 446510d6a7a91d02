//! Compound properties: ordered, named containers of child properties.

use tracing::debug;

use super::archive::ArchiveRef;
use super::{
    IArchive, IArrayProperty, IObject, IScalarProperty, OArrayProperty, OScalarProperty,
    PropertyArgs, SampleValue,
};
use crate::core::{MetaData, NodeId, PropertyHeader};
use crate::util::{Error, Result, ResultExt};

/// Compound property being written.
#[derive(Clone)]
pub struct OCompoundProperty {
    archive: ArchiveRef,
    id: NodeId,
    name: String,
    parent: Option<NodeId>,
}

impl OCompoundProperty {
    pub(crate) fn new(archive: ArchiveRef, id: NodeId, name: String, parent: Option<NodeId>) -> Self {
        Self { archive, id, name, parent }
    }

    /// Handle for an existing compound node.
    pub(crate) fn from_node(archive: ArchiveRef, id: NodeId) -> Result<Self> {
        let (name, parent) = archive.with(|w| {
            let header = w.property_header(id)?;
            if !header.is_compound() {
                return Err(Error::TypeMismatch {
                    expected: "compound".into(),
                    actual: header.property_type.to_string(),
                });
            }
            Ok((header.name.clone(), w.property_parent(id)?))
        })?;
        Ok(Self::new(archive, id, name, parent))
    }

    /// Empty for an object's top compound.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` for an object's top compound.
    pub fn parent(&self) -> Result<Option<OCompoundProperty>> {
        self.parent
            .map(|p| OCompoundProperty::from_node(self.archive.clone(), p))
            .transpose()
            .op("parent")
    }

    pub fn has_property(&self, name: &str) -> bool {
        let id = self.id;
        self.archive.with(|w| Ok(w.find_property(id, name).is_some())).unwrap_or(false)
    }

    pub fn property_header(&self, name: &str) -> Option<PropertyHeader> {
        let id = self.id;
        self.archive
            .with(|w| match w.find_property(id, name) {
                Some(child) => w.property_header(child).map(|h| Some(h.clone())),
                None => Ok(None),
            })
            .ok()
            .flatten()
    }

    /// Scalar property holding one `T` per sample.
    pub fn add_scalar<T: SampleValue>(
        &self,
        name: &str,
        args: impl Into<PropertyArgs>,
    ) -> Result<OScalarProperty<T>> {
        OScalarProperty::create(self.archive.clone(), self.id, name, 1, args.into()).op("add_scalar")
    }

    /// Scalar property holding exactly `count` values of `T` per sample.
    pub fn add_scalar_n<T: SampleValue>(
        &self,
        name: &str,
        count: usize,
        args: impl Into<PropertyArgs>,
    ) -> Result<OScalarProperty<T>> {
        OScalarProperty::create(self.archive.clone(), self.id, name, count, args.into())
            .op("add_scalar")
    }

    pub fn add_array<T: SampleValue>(
        &self,
        name: &str,
        args: impl Into<PropertyArgs>,
    ) -> Result<OArrayProperty<T>> {
        OArrayProperty::create(self.archive.clone(), self.id, name, args.into()).op("add_array")
    }

    pub fn add_compound(&self, name: &str, meta_data: MetaData) -> Result<OCompoundProperty> {
        let parent = self.id;
        let header = PropertyHeader::compound(name).with_meta_data(meta_data);
        let id = self
            .archive
            .with(|w| w.create_property(parent, header))
            .op("add_compound")?;
        debug!(compound = name, parent = %self.name, "added compound");
        Ok(OCompoundProperty::new(self.archive.clone(), id, name.to_string(), Some(parent)))
    }

    /// Existing compound `name`, or a new one with `meta_data`.
    pub fn get_or_add_compound(&self, name: &str, meta_data: MetaData) -> Result<OCompoundProperty> {
        let parent = self.id;
        let existing = self.archive.with(|w| Ok(w.find_property(parent, name)))?;
        match existing {
            Some(id) => OCompoundProperty::from_node(self.archive.clone(), id).op("get_or_add_compound"),
            None => self.add_compound(name, meta_data),
        }
    }
}

impl std::fmt::Debug for OCompoundProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OCompoundProperty").field("name", &self.name).finish()
    }
}

/// Compound property being read.
#[derive(Clone, Copy)]
pub struct ICompoundProperty<'a> {
    archive: &'a IArchive,
    id: NodeId,
    header: &'a PropertyHeader,
}

impl<'a> ICompoundProperty<'a> {
    pub(crate) fn new(archive: &'a IArchive, id: NodeId) -> Result<Self> {
        let header = archive.reader().property_header(id)?;
        if !header.is_compound() {
            return Err(Error::TypeMismatch {
                expected: "compound".into(),
                actual: header.property_type.to_string(),
            });
        }
        Ok(Self { archive, id, header })
    }

    pub fn header(&self) -> &'a PropertyHeader {
        self.header
    }

    pub fn name(&self) -> &'a str {
        &self.header.name
    }

    pub fn meta_data(&self) -> &'a MetaData {
        &self.header.meta_data
    }

    pub fn num_properties(&self) -> usize {
        self.archive.reader().num_properties(self.id).unwrap_or(0)
    }

    pub fn property_header(&self, index: usize) -> Option<&'a PropertyHeader> {
        let reader = self.archive.reader();
        let child = reader.property(self.id, index).ok()?;
        reader.property_header(child).ok()
    }

    pub fn property_header_by_name(&self, name: &str) -> Option<&'a PropertyHeader> {
        let reader = self.archive.reader();
        let child = reader.property_by_name(self.id, name)?;
        reader.property_header(child).ok()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.archive.reader().property_by_name(self.id, name).is_some()
    }

    /// Child names in insertion order.
    pub fn property_names(&self) -> Vec<&'a str> {
        (0..self.num_properties())
            .filter_map(|i| self.property_header(i))
            .map(|h| h.name.as_str())
            .collect()
    }

    fn child_id(&self, name: &str) -> Result<NodeId> {
        self.archive
            .reader()
            .property_by_name(self.id, name)
            .ok_or_else(|| Error::PropertyNotFound(format!("{}/{name}", self.header.name)))
    }

    pub fn compound(&self, name: &str) -> Result<ICompoundProperty<'a>> {
        let id = self.child_id(name).op("compound")?;
        ICompoundProperty::new(self.archive, id).op("compound")
    }

    pub fn compound_at(&self, index: usize) -> Result<ICompoundProperty<'a>> {
        let id = self.archive.reader().property(self.id, index).op("compound")?;
        ICompoundProperty::new(self.archive, id).op("compound")
    }

    /// Typed scalar child holding one `T` per sample.
    pub fn scalar<T: SampleValue>(&self, name: &str) -> Result<IScalarProperty<'a, T>> {
        self.scalar_n(name, 1)
    }

    /// Typed scalar child holding `count` values of `T` per sample.
    pub fn scalar_n<T: SampleValue>(&self, name: &str, count: usize) -> Result<IScalarProperty<'a, T>> {
        let id = self.child_id(name).op("scalar")?;
        IScalarProperty::open(self.archive, id, count).op("scalar")
    }

    pub fn array<T: SampleValue>(&self, name: &str) -> Result<IArrayProperty<'a, T>> {
        let id = self.child_id(name).op("array")?;
        IArrayProperty::open(self.archive, id).op("array")
    }

    /// `None` for an object's top compound.
    pub fn parent(&self) -> Option<ICompoundProperty<'a>> {
        let parent = self.archive.reader().property_parent(self.id).ok()??;
        ICompoundProperty::new(self.archive, parent).ok()
    }

    /// Object owning this property tree.
    pub fn object(&self) -> Result<IObject<'a>> {
        let object = self.archive.reader().property_object(self.id)?;
        self.archive.object(object)
    }
}

impl std::fmt::Debug for ICompoundProperty<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ICompoundProperty").field("name", &self.header.name).finish()
    }
}
