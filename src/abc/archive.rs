//! Archive handles.
//!
//! [`OArchive`] owns the storage writer. Every handle created from it keeps
//! only a weak reference, so closing the archive freezes them all.
//! [`IArchive`] owns the storage reader; reader handles borrow it.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use super::{ArchiveOptions, IObject, OObject, TimeSamplingArg};
use crate::core::{ArchiveReader, ArchiveWriter, MetaData, NodeId, TimeSampling};
use crate::memory::MemoryArchive;
use crate::util::{Chrono, Error, Result, ResultExt};

type SharedWriter = Arc<Mutex<Box<dyn ArchiveWriter>>>;

/// Non-owning link from a writer handle back to its archive.
#[derive(Clone)]
pub(crate) struct ArchiveRef(Weak<Mutex<Box<dyn ArchiveWriter>>>);

impl ArchiveRef {
    /// Run `f` against the live writer; [`Error::Frozen`] once closed.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn ArchiveWriter) -> Result<R>) -> Result<R> {
        let archive = self.0.upgrade().ok_or(Error::Frozen)?;
        let mut writer = archive.lock();
        f(writer.as_mut())
    }

    /// Table index for `arg`, registering a new sampling when needed.
    ///
    /// Lookup and append happen under one lock.
    pub fn resolve_time_sampling(&self, arg: TimeSamplingArg) -> Result<u32> {
        self.with(|w| match arg {
            TimeSamplingArg::Index(index) => {
                if w.time_sampling(index).is_none() {
                    return Err(Error::time_sampling(format!(
                        "index {index} not in table of {}",
                        w.num_time_samplings()
                    )));
                }
                Ok(index)
            }
            TimeSamplingArg::Sampling(ts) => w.add_time_sampling(ts),
        })
    }

    pub fn time_sampling(&self, index: u32) -> Result<TimeSampling> {
        self.with(|w| {
            w.time_sampling(index)
                .cloned()
                .ok_or_else(|| Error::time_sampling(format!("unknown time sampling index {index}")))
        })
    }
}

/// Archive being written.
pub struct OArchive {
    inner: SharedWriter,
    name: String,
}

impl OArchive {
    /// Wrap a storage backend.
    pub fn new(writer: Box<dyn ArchiveWriter>) -> Self {
        let name = writer.name().to_string();
        Self { inner: Arc::new(Mutex::new(writer)), name }
    }

    /// Archive backed by [`MemoryArchive`].
    pub fn in_memory(name: impl Into<String>, options: ArchiveOptions) -> Self {
        Self::new(Box::new(MemoryArchive::new(name, options.to_meta_data())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn archive_ref(&self) -> ArchiveRef {
        ArchiveRef(Arc::downgrade(&self.inner))
    }

    /// Register a time sampling; equal samplings share one index.
    pub fn add_time_sampling(&self, ts: TimeSampling) -> Result<u32> {
        self.inner.lock().add_time_sampling(ts).op("add_time_sampling")
    }

    pub fn num_time_samplings(&self) -> usize {
        self.inner.lock().num_time_samplings()
    }

    pub fn time_sampling(&self, index: u32) -> Option<TimeSampling> {
        self.inner.lock().time_sampling(index).cloned()
    }

    /// Record the time of the next sample on an acyclic sampling.
    pub fn append_sample_time(&self, index: u32, time: Chrono) -> Result<()> {
        self.inner.lock().append_sample_time(index, time).op("append_sample_time")
    }

    pub fn meta_data(&self) -> MetaData {
        self.inner.lock().meta_data().clone()
    }

    /// Root object.
    pub fn top(&self) -> OObject {
        let root = self.inner.lock().root();
        OObject::new(self.archive_ref(), root, "ABC".to_string(), "/".to_string())
    }

    /// Finalize storage and reopen it for reading.
    ///
    /// Every handle created from this archive is frozen afterwards.
    pub fn close(self) -> Result<IArchive> {
        let name = self.name;
        let mutex = Arc::try_unwrap(self.inner)
            .map_err(|_| Error::other(format!("archive '{name}' is still in use")))
            .op("close")?;
        let reader = mutex.into_inner().finish().op("close")?;
        debug!(archive = %name, "closed archive");
        Ok(IArchive::new(reader))
    }
}

/// Archive being read.
pub struct IArchive {
    reader: Box<dyn ArchiveReader>,
}

impl IArchive {
    pub fn new(reader: Box<dyn ArchiveReader>) -> Self {
        Self { reader }
    }

    pub fn name(&self) -> &str {
        self.reader.name()
    }

    /// Storage backend behind this archive.
    pub fn reader(&self) -> &dyn ArchiveReader {
        self.reader.as_ref()
    }

    pub fn meta_data(&self) -> &MetaData {
        self.reader.meta_data()
    }

    pub fn application(&self) -> Option<&str> {
        self.meta_data().get(ArchiveOptions::APPLICATION_KEY)
    }

    pub fn description(&self) -> Option<&str> {
        self.meta_data().get(ArchiveOptions::DESCRIPTION_KEY)
    }

    pub fn dcc_fps(&self) -> Option<f64> {
        self.meta_data().get(ArchiveOptions::DCC_FPS_KEY)?.parse().ok()
    }

    pub fn alembic_version(&self) -> Option<&str> {
        self.meta_data().get(ArchiveOptions::VERSION_KEY)
    }

    pub fn num_time_samplings(&self) -> usize {
        self.reader.num_time_samplings()
    }

    pub fn time_sampling(&self, index: u32) -> Option<&TimeSampling> {
        self.reader.time_sampling(index)
    }

    pub fn max_num_samples_for_time_sampling(&self, index: u32) -> Option<usize> {
        self.reader.max_num_samples_for_time_sampling(index)
    }

    /// Root object.
    pub fn top(&self) -> Result<IObject<'_>> {
        self.object(self.reader.root()).op("top")
    }

    /// Resolve a path such as `/a/b`. `/` and the empty path give the root.
    pub fn find_object(&self, path: &str) -> Option<IObject<'_>> {
        let mut id = self.reader.root();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            id = self.reader.child_by_name(id, part)?;
        }
        self.object(id).ok()
    }

    pub(crate) fn object(&self, id: NodeId) -> Result<IObject<'_>> {
        IObject::new(self, id)
    }
}

impl std::fmt::Debug for IArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IArchive").field("name", &self.name()).finish()
    }
}
