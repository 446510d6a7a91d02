//! Abstract storage boundary.
//!
//! The typed API in [`crate::abc`] talks to storage only through these two
//! traits. A backend owns its object graph as an arena; handles address nodes
//! by [`NodeId`] and never own them.

use crate::core::{MetaData, ObjectHeader, PropertyHeader, SampleKey, TimeSampling};
use crate::util::{Chrono, Dimensions, Result};

/// Index of an object or property node in a backend arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Backends place the root object at index 0.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One append to a simple property.
#[derive(Clone, Copy, Debug)]
pub enum SampleWrite<'a> {
    /// Store a new physical slot.
    Data {
        bytes: &'a [u8],
        dims: &'a Dimensions,
        key: SampleKey,
    },
    /// Reference the previous logical sample's slot again.
    Repeat,
}

/// Writer side of a storage backend.
pub trait ArchiveWriter: Send {
    /// Archive name/path.
    fn name(&self) -> &str;

    fn meta_data(&self) -> &MetaData;

    /// Register a time sampling, returning the index of an equal existing
    /// entry when there is one.
    fn add_time_sampling(&mut self, ts: TimeSampling) -> Result<u32>;

    fn num_time_samplings(&self) -> usize;

    fn time_sampling(&self, index: u32) -> Option<&TimeSampling>;

    /// Grow an acyclic table entry by one observed time.
    fn append_sample_time(&mut self, index: u32, time: Chrono) -> Result<()>;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn object_header(&self, object: NodeId) -> Result<&ObjectHeader>;

    /// Create a child object. Names are unique among siblings.
    fn create_object(&mut self, parent: NodeId, name: &str, meta_data: MetaData) -> Result<NodeId>;

    /// Top compound property of an object.
    fn object_properties(&self, object: NodeId) -> Result<NodeId>;

    /// Create a property under a compound. Names are unique within a compound.
    fn create_property(&mut self, parent: NodeId, header: PropertyHeader) -> Result<NodeId>;

    fn find_property(&self, parent: NodeId, name: &str) -> Option<NodeId>;

    fn property_header(&self, property: NodeId) -> Result<&PropertyHeader>;

    /// Parent compound, or `None` for an object's top compound.
    fn property_parent(&self, property: NodeId) -> Result<Option<NodeId>>;

    fn set_time_sampling_index(&mut self, property: NodeId, index: u32) -> Result<()>;

    /// Append one logical sample to a scalar or array property.
    fn write_sample(&mut self, property: NodeId, sample: SampleWrite<'_>) -> Result<()>;

    /// Logical sample count of a simple property.
    fn num_samples(&self, property: NodeId) -> Result<usize>;

    /// Finalize and hand back a reader over the stored data.
    fn finish(self: Box<Self>) -> Result<Box<dyn ArchiveReader>>;
}

/// Reader side of a storage backend.
pub trait ArchiveReader: Send + Sync {
    fn name(&self) -> &str;

    /// Archive-level metadata (application, version, ...).
    fn meta_data(&self) -> &MetaData;

    fn num_time_samplings(&self) -> usize;

    fn time_sampling(&self, index: u32) -> Option<&TimeSampling>;

    /// Largest sample count of any property using time sampling `index`.
    fn max_num_samples_for_time_sampling(&self, index: u32) -> Option<usize>;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn object_header(&self, object: NodeId) -> Result<&ObjectHeader>;

    fn object_parent(&self, object: NodeId) -> Result<Option<NodeId>>;

    fn num_children(&self, object: NodeId) -> Result<usize>;

    fn child(&self, object: NodeId, index: usize) -> Result<NodeId>;

    fn child_by_name(&self, object: NodeId, name: &str) -> Option<NodeId>;

    fn object_properties(&self, object: NodeId) -> Result<NodeId>;

    fn property_header(&self, property: NodeId) -> Result<&PropertyHeader>;

    /// Parent compound, or `None` for an object's top compound.
    fn property_parent(&self, property: NodeId) -> Result<Option<NodeId>>;

    /// Object whose property tree contains `property`.
    fn property_object(&self, property: NodeId) -> Result<NodeId>;

    fn num_properties(&self, compound: NodeId) -> Result<usize>;

    fn property(&self, compound: NodeId, index: usize) -> Result<NodeId>;

    fn property_by_name(&self, compound: NodeId, name: &str) -> Option<NodeId>;

    fn num_samples(&self, property: NodeId) -> Result<usize>;

    /// Physical slots actually stored.
    fn num_stored_samples(&self, property: NodeId) -> Result<usize>;

    /// First logical index whose slot differs from its predecessor, 0 if none.
    fn first_changed_index(&self, property: NodeId) -> Result<usize>;

    /// Last logical index whose slot differs from its predecessor, 0 if none.
    fn last_changed_index(&self, property: NodeId) -> Result<usize>;

    /// Raw bytes and dimensions of logical sample `index`.
    fn read_sample(&self, property: NodeId, index: usize) -> Result<(&[u8], &Dimensions)>;

    fn sample_key(&self, property: NodeId, index: usize) -> Result<SampleKey>;
}
