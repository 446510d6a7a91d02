//! Core layer - fundamental types and the abstract storage boundary.
//!
//! - [`TimeSampling`] / [`TimeSamplingType`] - sample index <-> time mapping
//! - [`SampleSelector`] - sample selection by index or time
//! - [`SampleKey`] - content digests for sample elision
//! - [`ObjectHeader`] / [`PropertyHeader`] / [`MetaData`]
//! - [`ArchiveWriter`] / [`ArchiveReader`] - what a storage backend provides

mod header;
mod key;
mod metadata;
mod sample;
mod time_sampling;
mod traits;

pub use header::{ObjectHeader, PropertyHeader, PropertyType};
pub use key::{SampleDigest, SampleKey};
pub use metadata::MetaData;
pub use sample::{SampleInterp, SampleSelector, TimeIndexPolicy};
pub use time_sampling::{
    decode_time_samplings, encode_time_samplings, TimeSampling, TimeSamplingType,
    ACYCLIC_NUM_SAMPLES, ACYCLIC_TIME_PER_CYCLE,
};
pub use traits::{ArchiveReader, ArchiveWriter, NodeId, SampleWrite};
