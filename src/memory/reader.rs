//! Reader half of the in-memory backend.

use super::arena::Arena;
use crate::core::{ArchiveReader, MetaData, NodeId, ObjectHeader, PropertyHeader, SampleKey, TimeSampling};
use crate::util::{Dimensions, Error, Result};

/// Finished in-memory archive.
pub struct MemoryArchiveReader {
    name: String,
    meta_data: MetaData,
    time_samplings: Vec<TimeSampling>,
    max_samples: Vec<u32>,
    arena: Arena,
}

impl MemoryArchiveReader {
    pub(super) fn new(
        name: String,
        meta_data: MetaData,
        time_samplings: Vec<TimeSampling>,
        max_samples: Vec<u32>,
        arena: Arena,
    ) -> Self {
        Self { name, meta_data, time_samplings, max_samples, arena }
    }
}

impl ArchiveReader for MemoryArchiveReader {
    fn name(&self) -> &str {
        &self.name
    }

    fn meta_data(&self) -> &MetaData {
        &self.meta_data
    }

    fn num_time_samplings(&self) -> usize {
        self.time_samplings.len()
    }

    fn time_sampling(&self, index: u32) -> Option<&TimeSampling> {
        self.time_samplings.get(index as usize)
    }

    fn max_num_samples_for_time_sampling(&self, index: u32) -> Option<usize> {
        self.max_samples.get(index as usize).map(|&n| n as usize)
    }

    fn object_header(&self, object: NodeId) -> Result<&ObjectHeader> {
        Ok(&self.arena.object(object)?.header)
    }

    fn object_parent(&self, object: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.object(object)?.parent)
    }

    fn num_children(&self, object: NodeId) -> Result<usize> {
        Ok(self.arena.object(object)?.children.len())
    }

    fn child(&self, object: NodeId, index: usize) -> Result<NodeId> {
        let node = self.arena.object(object)?;
        node.children.get(index).copied().ok_or_else(|| {
            Error::ObjectNotFound(format!("child {index} of '{}'", node.header.full_name))
        })
    }

    fn child_by_name(&self, object: NodeId, name: &str) -> Option<NodeId> {
        self.arena.find_child(object, name)
    }

    fn object_properties(&self, object: NodeId) -> Result<NodeId> {
        Ok(self.arena.object(object)?.properties)
    }

    fn property_header(&self, property: NodeId) -> Result<&PropertyHeader> {
        Ok(&self.arena.property(property)?.header)
    }

    fn property_parent(&self, property: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.property(property)?.parent)
    }

    fn property_object(&self, property: NodeId) -> Result<NodeId> {
        Ok(self.arena.property(property)?.object)
    }

    fn num_properties(&self, compound: NodeId) -> Result<usize> {
        Ok(self.arena.compound_children(compound)?.len())
    }

    fn property(&self, compound: NodeId, index: usize) -> Result<NodeId> {
        self.arena
            .compound_children(compound)?
            .get(index)
            .copied()
            .ok_or_else(|| Error::PropertyNotFound(format!("property {index}")))
    }

    fn property_by_name(&self, compound: NodeId, name: &str) -> Option<NodeId> {
        self.arena.find_property(compound, name)
    }

    fn num_samples(&self, property: NodeId) -> Result<usize> {
        Ok(self.arena.store(property)?.index.len())
    }

    fn num_stored_samples(&self, property: NodeId) -> Result<usize> {
        Ok(self.arena.store(property)?.slots.len())
    }

    fn first_changed_index(&self, property: NodeId) -> Result<usize> {
        Ok(self.arena.store(property)?.first_changed)
    }

    fn last_changed_index(&self, property: NodeId) -> Result<usize> {
        Ok(self.arena.store(property)?.last_changed)
    }

    fn read_sample(&self, property: NodeId, index: usize) -> Result<(&[u8], &Dimensions)> {
        let slot = self.arena.store(property)?.slot(index)?;
        Ok((&slot.bytes, &slot.dims))
    }

    fn sample_key(&self, property: NodeId, index: usize) -> Result<SampleKey> {
        Ok(self.arena.store(property)?.slot(index)?.key)
    }
}
