//! Writer half of the in-memory backend.

use tracing::debug;

use super::arena::{Arena, Node, ObjectNode, PropertyBody, PropertyNode, SampleStore};
use super::MemoryArchiveReader;
use crate::core::{
    decode_time_samplings, encode_time_samplings, ArchiveReader, ArchiveWriter, MetaData, NodeId,
    ObjectHeader, PropertyHeader, SampleWrite, TimeSampling,
};
use crate::util::{Chrono, Error, Result};

/// Archive under construction, held entirely in memory.
pub struct MemoryArchive {
    name: String,
    meta_data: MetaData,
    time_samplings: Vec<TimeSampling>,
    arena: Arena,
}

impl MemoryArchive {
    pub fn new(name: impl Into<String>, meta_data: MetaData) -> Self {
        Self {
            name: name.into(),
            meta_data,
            time_samplings: vec![TimeSampling::identity()],
            arena: Arena::with_root(),
        }
    }

    fn check_time_sampling(&self, index: u32) -> Result<()> {
        if (index as usize) < self.time_samplings.len() {
            Ok(())
        } else {
            Err(Error::time_sampling(format!(
                "index {index} not in table of {}",
                self.time_samplings.len()
            )))
        }
    }

    /// Reject empty names and names containing the path separator.
    fn check_name(name: &str) -> Result<()> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::invalid(format!("invalid name '{name}'")));
        }
        Ok(())
    }
}

impl ArchiveWriter for MemoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn meta_data(&self) -> &MetaData {
        &self.meta_data
    }

    fn add_time_sampling(&mut self, ts: TimeSampling) -> Result<u32> {
        if let Some(existing) = self.time_samplings.iter().position(|t| *t == ts) {
            return u32::try_from(existing).map_err(|_| Error::other("time sampling table overflow"));
        }
        let index = u32::try_from(self.time_samplings.len())
            .map_err(|_| Error::other("time sampling table overflow"))?;
        debug!(index, sampling = %ts.sampling_type(), "registered time sampling");
        self.time_samplings.push(ts);
        Ok(index)
    }

    fn num_time_samplings(&self) -> usize {
        self.time_samplings.len()
    }

    fn time_sampling(&self, index: u32) -> Option<&TimeSampling> {
        self.time_samplings.get(index as usize)
    }

    fn append_sample_time(&mut self, index: u32, time: Chrono) -> Result<()> {
        self.check_time_sampling(index)?;
        self.time_samplings[index as usize].append_time(time)
    }

    fn object_header(&self, object: NodeId) -> Result<&ObjectHeader> {
        Ok(&self.arena.object(object)?.header)
    }

    fn create_object(&mut self, parent: NodeId, name: &str, meta_data: MetaData) -> Result<NodeId> {
        Self::check_name(name)?;
        let parent_node = self.arena.object(parent)?;
        if self.arena.find_child(parent, name).is_some() {
            return Err(Error::DuplicateName {
                name: name.to_string(),
                parent: parent_node.header.full_name.clone(),
            });
        }
        let header = ObjectHeader::child_of(&parent_node.header.full_name, name, meta_data);
        debug!(path = %header.full_name, "created object");

        let object = self.arena.next_id();
        let properties = NodeId::new(object.index() + 1);
        self.arena.push(Node::Object(ObjectNode {
            header,
            parent: Some(parent),
            children: Vec::new(),
            properties,
        }));
        self.arena.push(Node::Property(PropertyNode {
            header: PropertyHeader::compound(""),
            parent: None,
            object,
            body: PropertyBody::Compound(Vec::new()),
        }));
        self.arena.object_mut(parent)?.children.push(object);
        Ok(object)
    }

    fn object_properties(&self, object: NodeId) -> Result<NodeId> {
        Ok(self.arena.object(object)?.properties)
    }

    fn create_property(&mut self, parent: NodeId, header: PropertyHeader) -> Result<NodeId> {
        Self::check_name(&header.name)?;
        self.check_time_sampling(header.time_sampling_index)?;
        let object = self.arena.property(parent)?.object;
        self.arena.compound_children(parent)?;
        if self.arena.find_property(parent, &header.name).is_some() {
            let parent_name = self.arena.property(parent)?.header.name.clone();
            return Err(Error::DuplicateName { name: header.name, parent: parent_name });
        }

        debug!(
            name = %header.name,
            kind = %header.property_type,
            data_type = %header.data_type,
            time_sampling = header.time_sampling_index,
            "created property"
        );
        let body = if header.is_compound() {
            PropertyBody::Compound(Vec::new())
        } else {
            PropertyBody::Sampled(SampleStore::default())
        };
        let id = self.arena.push(Node::Property(PropertyNode {
            header,
            parent: Some(parent),
            object,
            body,
        }));
        if let PropertyBody::Compound(children) = &mut self.arena.property_mut(parent)?.body {
            children.push(id);
        }
        Ok(id)
    }

    fn find_property(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.arena.find_property(parent, name)
    }

    fn property_header(&self, property: NodeId) -> Result<&PropertyHeader> {
        Ok(&self.arena.property(property)?.header)
    }

    fn property_parent(&self, property: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.property(property)?.parent)
    }

    fn set_time_sampling_index(&mut self, property: NodeId, index: u32) -> Result<()> {
        self.check_time_sampling(index)?;
        self.arena.property_mut(property)?.header.time_sampling_index = index;
        Ok(())
    }

    fn write_sample(&mut self, property: NodeId, sample: SampleWrite<'_>) -> Result<()> {
        let node = self.arena.property_mut(property)?;
        match &mut node.body {
            PropertyBody::Sampled(store) => store.push(sample, &node.header.name),
            PropertyBody::Compound(_) => Err(Error::WriteFailed(format!(
                "'{}' is a compound property",
                node.header.name
            ))),
        }
    }

    fn num_samples(&self, property: NodeId) -> Result<usize> {
        Ok(self.arena.store(property)?.index.len())
    }

    fn finish(self: Box<Self>) -> Result<Box<dyn ArchiveReader>> {
        let this = *self;
        let mut max_samples = vec![0u32; this.time_samplings.len()];
        for node in this.arena.nodes() {
            if let Node::Property(PropertyNode { header, body: PropertyBody::Sampled(store), .. }) = node {
                if let Some(slot) = max_samples.get_mut(header.time_sampling_index as usize) {
                    let hint = u32::try_from(store.max_samples_hint()).unwrap_or(u32::MAX);
                    *slot = (*slot).max(hint);
                }
            }
        }

        // Archive tables go through their persisted encoding.
        let table = encode_time_samplings(&this.time_samplings, &max_samples)?;
        let (time_samplings, max_samples) = decode_time_samplings(&table)?;
        let meta_data = MetaData::parse(&this.meta_data.serialize());

        debug!(
            name = %this.name,
            time_samplings = time_samplings.len(),
            table_bytes = table.len(),
            "finished archive"
        );
        Ok(Box::new(MemoryArchiveReader::new(
            this.name,
            meta_data,
            time_samplings,
            max_samples,
            this.arena,
        )))
    }
}
