//! Objects: named nodes of the scene hierarchy, each with a property tree.

use super::archive::ArchiveRef;
use super::{IArchive, ICompoundProperty, OCompoundProperty};
use crate::core::{MetaData, NodeId, ObjectHeader};
use crate::util::{Result, ResultExt};

/// Object being written.
#[derive(Clone)]
pub struct OObject {
    archive: ArchiveRef,
    id: NodeId,
    name: String,
    full_name: String,
}

impl OObject {
    pub(crate) fn new(archive: ArchiveRef, id: NodeId, name: String, full_name: String) -> Self {
        Self { archive, id, name, full_name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub(crate) fn archive(&self) -> &ArchiveRef {
        &self.archive
    }

    /// Create a child object. Fails on a duplicate sibling name.
    pub fn add_child(&self, name: &str, meta_data: MetaData) -> Result<OObject> {
        let id = self.id;
        let (child, full_name) = self
            .archive
            .with(|w| {
                let child = w.create_object(id, name, meta_data)?;
                Ok((child, w.object_header(child)?.full_name.clone()))
            })
            .op("add_child")?;
        Ok(OObject::new(self.archive.clone(), child, name.to_string(), full_name))
    }

    pub fn meta_data(&self) -> Result<MetaData> {
        let id = self.id;
        self.archive.with(|w| Ok(w.object_header(id)?.meta_data.clone()))
    }

    /// Top compound property.
    pub fn properties(&self) -> Result<OCompoundProperty> {
        let id = self.id;
        let props = self.archive.with(|w| w.object_properties(id)).op("properties")?;
        Ok(OCompoundProperty::new(self.archive.clone(), props, String::new(), None))
    }
}

impl std::fmt::Debug for OObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OObject").field("full_name", &self.full_name).finish()
    }
}

/// Object being read.
#[derive(Clone, Copy)]
pub struct IObject<'a> {
    archive: &'a IArchive,
    id: NodeId,
    header: &'a ObjectHeader,
}

impl<'a> IObject<'a> {
    pub(crate) fn new(archive: &'a IArchive, id: NodeId) -> Result<Self> {
        let header = archive.reader().object_header(id)?;
        Ok(Self { archive, id, header })
    }

    pub fn header(&self) -> &'a ObjectHeader {
        self.header
    }

    pub fn name(&self) -> &'a str {
        &self.header.name
    }

    pub fn full_name(&self) -> &'a str {
        &self.header.full_name
    }

    pub fn meta_data(&self) -> &'a MetaData {
        &self.header.meta_data
    }

    pub fn matches_schema(&self, schema: &str) -> bool {
        self.header.meta_data.matches_schema(schema)
    }

    pub fn archive(&self) -> &'a IArchive {
        self.archive
    }

    pub fn is_root(&self) -> bool {
        self.id == self.archive.reader().root()
    }

    /// `None` at the root.
    pub fn parent(&self) -> Option<IObject<'a>> {
        let parent = self.archive.reader().object_parent(self.id).ok()??;
        IObject::new(self.archive, parent).ok()
    }

    pub fn num_children(&self) -> usize {
        self.archive.reader().num_children(self.id).unwrap_or(0)
    }

    pub fn child(&self, index: usize) -> Result<IObject<'a>> {
        let child = self.archive.reader().child(self.id, index).op("child")?;
        IObject::new(self.archive, child)
    }

    pub fn child_by_name(&self, name: &str) -> Option<IObject<'a>> {
        let child = self.archive.reader().child_by_name(self.id, name)?;
        IObject::new(self.archive, child).ok()
    }

    pub fn children(&self) -> impl Iterator<Item = IObject<'a>> + 'a {
        let this = *self;
        (0..this.num_children()).filter_map(move |i| this.child(i).ok())
    }

    /// Top compound property.
    pub fn properties(&self) -> Result<ICompoundProperty<'a>> {
        let props = self.archive.reader().object_properties(self.id).op("properties")?;
        ICompoundProperty::new(self.archive, props)
    }
}

impl std::fmt::Debug for IObject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IObject").field("full_name", &self.header.full_name).finish()
    }
}
