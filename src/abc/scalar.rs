//! Typed scalar properties: a fixed number of values per sample.

use std::marker::PhantomData;

use super::archive::ArchiveRef;
use super::simple::{SimpleReader, SimpleWriter};
use super::typed::{check_data_type, encode_values};
use super::{IArchive, ICompoundProperty, OCompoundProperty, PropertyArgs, SampleValue, TimeSamplingArg};
use crate::core::{NodeId, PropertyHeader, SampleInterp, SampleKey, SampleSelector, TimeSampling};
use crate::util::{Chrono, Dimensions, Error, Result, ResultExt};

/// Scalar property writer.
///
/// A sample is `count` values of `T`, fixed at creation; the stored data type
/// carries `T`'s extent times `count`.
pub struct OScalarProperty<T: SampleValue> {
    inner: SimpleWriter,
    count: usize,
    _marker: PhantomData<fn(T)>,
}

impl<T: SampleValue> OScalarProperty<T> {
    pub(crate) fn create(
        archive: ArchiveRef,
        parent: NodeId,
        name: &str,
        count: usize,
        args: PropertyArgs,
    ) -> Result<Self> {
        let data_type = T::data_type()
            .with_multiplier(count)
            .ok_or_else(|| Error::invalid(format!("cannot store {count} values per scalar sample")))?;
        let header = PropertyHeader::scalar(name, data_type);
        let inner = SimpleWriter::create(archive, parent, header, args)?;
        Ok(Self { inner, count, _marker: PhantomData })
    }

    /// Write one sample; only valid when the property holds a single value.
    pub fn set(&mut self, value: &T) -> Result<()> {
        self.set_slice(std::slice::from_ref(value))
    }

    /// Write one sample of exactly `count` values.
    pub fn set_slice(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.count {
            return self.inner.reject(Error::invalid(format!(
                "'{}' takes {} values per sample, got {}",
                self.inner.name(),
                self.count,
                values.len()
            )));
        }
        if let Err(e) = T::validate(values) {
            return self.inner.reject(e);
        }
        let bytes = encode_values(values);
        self.inner.write(&bytes, Dimensions::scalar())
    }

    /// Repeat the previous sample without rehashing it.
    pub fn set_from_previous(&mut self) -> Result<()> {
        self.inner.set_from_previous()
    }

    pub fn set_time_sampling(&mut self, ts: impl Into<TimeSamplingArg>) -> Result<()> {
        self.inner.set_time_sampling(ts.into())
    }

    pub fn time_sampling_index(&self) -> u32 {
        self.inner.time_sampling_index()
    }

    pub fn time_sampling(&self) -> Result<TimeSampling> {
        self.inner.time_sampling()
    }

    pub fn num_samples(&self) -> usize {
        self.inner.num_samples()
    }

    pub fn is_constant(&self) -> bool {
        self.inner.is_constant()
    }

    /// Always true for scalars.
    pub fn is_scalar_like(&self) -> bool {
        true
    }

    /// Values per sample.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn header(&self) -> &PropertyHeader {
        self.inner.header()
    }

    pub fn parent(&self) -> Result<OCompoundProperty> {
        self.inner.parent()
    }

    /// Errors swallowed under [`ErrorPolicy::Collect`](super::ErrorPolicy::Collect).
    pub fn errors(&self) -> &[Error] {
        self.inner.errors()
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        self.inner.take_errors()
    }
}

/// Scalar property reader.
pub struct IScalarProperty<'a, T: SampleValue> {
    inner: SimpleReader<'a>,
    count: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: SampleValue> IScalarProperty<'a, T> {
    pub(crate) fn open(archive: &'a IArchive, id: NodeId, count: usize) -> Result<Self> {
        let inner = SimpleReader::open(archive, id)?;
        let header = inner.header();
        if !header.is_scalar() {
            return Err(Error::TypeMismatch {
                expected: "scalar".into(),
                actual: header.property_type.to_string(),
            });
        }
        check_data_type::<T>(header.data_type, count)?;
        Ok(Self { inner, count, _marker: PhantomData })
    }

    /// First value of the selected sample.
    pub fn get(&self, sel: impl Into<SampleSelector>) -> Result<T> {
        self.get_slice(sel)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid(format!("empty sample in '{}'", self.name())))
            .op("get")
    }

    /// All values of the selected sample.
    pub fn get_slice(&self, sel: impl Into<SampleSelector>) -> Result<Vec<T>> {
        let (bytes, _) = self.inner.raw(sel.into()).op("get")?;
        let values = T::decode(bytes).op("get")?;
        if values.len() != self.count {
            return Err(Error::invalid(format!(
                "'{}' sample holds {} values, expected {}",
                self.name(),
                values.len(),
                self.count
            ))
            .context("get"));
        }
        Ok(values)
    }

    pub fn get_key(&self, sel: impl Into<SampleSelector>) -> Result<SampleKey> {
        self.inner.key(sel.into())
    }

    pub fn num_samples(&self) -> usize {
        self.inner.num_samples()
    }

    pub fn num_stored_samples(&self) -> usize {
        self.inner.num_stored_samples()
    }

    pub fn is_constant(&self) -> bool {
        self.inner.is_constant()
    }

    pub fn is_scalar_like(&self) -> bool {
        true
    }

    pub fn time_sampling(&self) -> &'a TimeSampling {
        self.inner.time_sampling()
    }

    pub fn sample_interp(&self, time: Chrono) -> SampleInterp {
        self.inner.sample_interp(time)
    }

    pub fn name(&self) -> &'a str {
        &self.inner.header().name
    }

    pub fn header(&self) -> &'a PropertyHeader {
        self.inner.header()
    }

    pub fn parent(&self) -> Option<ICompoundProperty<'a>> {
        self.inner.parent()
    }
}
