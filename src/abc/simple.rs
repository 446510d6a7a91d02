//! Machinery shared by scalar and array properties.

use tracing::{debug, trace};

use super::archive::ArchiveRef;
use super::args::ErrorSink;
use super::tracker::SampleTracker;
use super::{IArchive, ICompoundProperty, OCompoundProperty, PropertyArgs, TimeSamplingArg};
use crate::core::{NodeId, PropertyHeader, SampleInterp, SampleKey, SampleSelector, SampleWrite, TimeSampling};
use crate::util::{Chrono, Dimensions, Error, Result, ResultExt};

/// Untyped writer for one scalar or array property.
pub(crate) struct SimpleWriter {
    archive: ArchiveRef,
    id: NodeId,
    parent: NodeId,
    header: PropertyHeader,
    tracker: SampleTracker,
    sink: ErrorSink,
}

impl SimpleWriter {
    /// Create the property under `parent`, resolving the time sampling first.
    pub fn create(
        archive: ArchiveRef,
        parent: NodeId,
        mut header: PropertyHeader,
        args: PropertyArgs,
    ) -> Result<Self> {
        let PropertyArgs { error_policy, time_sampling, meta_data } = args;
        header.time_sampling_index = archive.resolve_time_sampling(time_sampling)?;
        header.meta_data.extend_from(&meta_data);
        let to_create = header.clone();
        let id = archive.with(|w| w.create_property(parent, to_create))?;
        debug!(property = %header.name, kind = %header.property_type, policy = ?error_policy, "opened property writer");
        Ok(Self {
            archive,
            id,
            parent,
            tracker: SampleTracker::new(header.is_array()),
            header,
            sink: ErrorSink::new(error_policy),
        })
    }

    pub fn header(&self) -> &PropertyHeader {
        &self.header
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn write(&mut self, bytes: &[u8], dims: Dimensions) -> Result<()> {
        let result = self.try_write(bytes, dims);
        self.sink.handle("set", &self.header.name, result)
    }

    fn try_write(&mut self, bytes: &[u8], dims: Dimensions) -> Result<()> {
        let key = SampleKey::from_bytes(bytes, self.header.data_type.pod);
        let repeat = self.tracker.is_repeat(&key, &dims);
        let sample = if repeat {
            SampleWrite::Repeat
        } else {
            SampleWrite::Data { bytes, dims: &dims, key }
        };
        let id = self.id;
        self.archive.with(|w| w.write_sample(id, sample))?;
        trace!(
            property = %self.header.name,
            index = self.tracker.num_samples(),
            repeat,
            bytes = bytes.len(),
            "wrote sample"
        );
        self.tracker.commit(key, dims, repeat);
        Ok(())
    }

    /// Reject a sample before it reaches storage, honouring the error policy.
    pub fn reject(&mut self, error: Error) -> Result<()> {
        self.sink.handle("set", &self.header.name, Err(error))
    }

    pub fn set_from_previous(&mut self) -> Result<()> {
        let result = self.try_set_from_previous();
        self.sink.handle("set_from_previous", &self.header.name, result)
    }

    fn try_set_from_previous(&mut self) -> Result<()> {
        if !self.tracker.has_previous() {
            return Err(Error::NoPreviousSample(self.header.name.clone()));
        }
        let id = self.id;
        self.archive.with(|w| w.write_sample(id, SampleWrite::Repeat))?;
        trace!(property = %self.header.name, index = self.tracker.num_samples(), "repeated sample");
        self.tracker.commit_repeat();
        Ok(())
    }

    pub fn set_time_sampling(&mut self, ts: TimeSamplingArg) -> Result<()> {
        let result = self.try_set_time_sampling(ts);
        self.sink.handle("set_time_sampling", &self.header.name, result)
    }

    fn try_set_time_sampling(&mut self, ts: TimeSamplingArg) -> Result<()> {
        let index = self.archive.resolve_time_sampling(ts)?;
        let id = self.id;
        self.archive.with(|w| w.set_time_sampling_index(id, index))?;
        self.header.time_sampling_index = index;
        Ok(())
    }

    pub fn time_sampling_index(&self) -> u32 {
        self.header.time_sampling_index
    }

    pub fn time_sampling(&self) -> Result<TimeSampling> {
        self.archive.time_sampling(self.header.time_sampling_index)
    }

    pub fn num_samples(&self) -> usize {
        self.tracker.num_samples()
    }

    pub fn is_constant(&self) -> bool {
        self.tracker.is_constant()
    }

    pub fn is_scalar_like(&self) -> bool {
        self.tracker.is_scalar_like()
    }

    pub fn parent(&self) -> Result<OCompoundProperty> {
        OCompoundProperty::from_node(self.archive.clone(), self.parent).op("parent")
    }

    pub fn errors(&self) -> &[Error] {
        self.sink.errors()
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        self.sink.take()
    }
}

/// Untyped reader for one scalar or array property.
#[derive(Clone, Copy)]
pub(crate) struct SimpleReader<'a> {
    archive: &'a IArchive,
    id: NodeId,
    header: &'a PropertyHeader,
    time_sampling: &'a TimeSampling,
    num_samples: usize,
}

impl<'a> SimpleReader<'a> {
    pub fn open(archive: &'a IArchive, id: NodeId) -> Result<Self> {
        let reader = archive.reader();
        let header = reader.property_header(id)?;
        let time_sampling = reader.time_sampling(header.time_sampling_index).ok_or_else(|| {
            Error::invalid(format!(
                "property '{}' refers to missing time sampling {}",
                header.name, header.time_sampling_index
            ))
        })?;
        let num_samples = reader.num_samples(id)?;
        Ok(Self { archive, id, header, time_sampling, num_samples })
    }

    pub fn header(&self) -> &'a PropertyHeader {
        self.header
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn time_sampling(&self) -> &'a TimeSampling {
        self.time_sampling
    }

    /// Payloads physically held; repeats share the previous slot.
    pub fn num_stored_samples(&self) -> usize {
        self.archive.reader().num_stored_samples(self.id).unwrap_or(0)
    }

    pub fn is_constant(&self) -> bool {
        self.archive.reader().last_changed_index(self.id).map_or(true, |i| i == 0)
    }

    pub fn index(&self, sel: SampleSelector) -> Result<usize> {
        let index = sel.resolve(self.time_sampling, self.num_samples);
        if index >= self.num_samples {
            return Err(Error::SampleOutOfBounds { index, count: self.num_samples });
        }
        Ok(index)
    }

    pub fn raw(&self, sel: SampleSelector) -> Result<(&'a [u8], &'a Dimensions)> {
        let index = self.index(sel)?;
        self.archive.reader().read_sample(self.id, index)
    }

    pub fn key(&self, sel: SampleSelector) -> Result<SampleKey> {
        let index = self.index(sel).op("get_key")?;
        self.archive.reader().sample_key(self.id, index).op("get_key")
    }

    pub fn sample_interp(&self, time: Chrono) -> SampleInterp {
        self.time_sampling.interp(time, self.num_samples)
    }

    pub fn parent(&self) -> Option<ICompoundProperty<'a>> {
        let parent = self.archive.reader().property_parent(self.id).ok()??;
        ICompoundProperty::new(self.archive, parent).ok()
    }
}
