//! Typed array properties: a variable-length run of values per sample.

use std::marker::PhantomData;

use super::archive::ArchiveRef;
use super::simple::{SimpleReader, SimpleWriter};
use super::typed::{check_data_type, encode_values};
use super::{IArchive, ICompoundProperty, OCompoundProperty, PropertyArgs, SampleValue, TimeSamplingArg};
use crate::core::{NodeId, PropertyHeader, SampleInterp, SampleKey, SampleSelector, TimeSampling};
use crate::util::{Chrono, Dimensions, Error, Result, ResultExt};

/// Array property writer.
pub struct OArrayProperty<T: SampleValue> {
    inner: SimpleWriter,
    _marker: PhantomData<fn(T)>,
}

impl<T: SampleValue> OArrayProperty<T> {
    pub(crate) fn create(archive: ArchiveRef, parent: NodeId, name: &str, args: PropertyArgs) -> Result<Self> {
        let header = PropertyHeader::array(name, T::data_type());
        let inner = SimpleWriter::create(archive, parent, header, args)?;
        Ok(Self { inner, _marker: PhantomData })
    }

    /// Write a 1D sample.
    pub fn set(&mut self, values: &[T]) -> Result<()> {
        self.set_with_dims(values, Dimensions::d1(values.len()))
    }

    /// Write a sample with an explicit shape covering all of `values`.
    pub fn set_with_dims(&mut self, values: &[T], dims: Dimensions) -> Result<()> {
        if dims.num_points() != values.len() {
            return self.inner.reject(Error::invalid(format!(
                "dimensions {dims} do not cover {} values",
                values.len()
            )));
        }
        if let Err(e) = T::validate(values) {
            return self.inner.reject(e);
        }
        let bytes = encode_values(values);
        self.inner.write(&bytes, dims)
    }

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

    /// Every sample so far held exactly one element.
    pub fn is_scalar_like(&self) -> bool {
        self.inner.is_scalar_like()
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

    pub fn errors(&self) -> &[Error] {
        self.inner.errors()
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        self.inner.take_errors()
    }
}

/// Array property reader.
pub struct IArrayProperty<'a, T: SampleValue> {
    inner: SimpleReader<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: SampleValue> IArrayProperty<'a, T> {
    pub(crate) fn open(archive: &'a IArchive, id: NodeId) -> Result<Self> {
        let inner = SimpleReader::open(archive, id)?;
        let header = inner.header();
        if !header.is_array() {
            return Err(Error::TypeMismatch {
                expected: "array".into(),
                actual: header.property_type.to_string(),
            });
        }
        check_data_type::<T>(header.data_type, 1)?;
        Ok(Self { inner, _marker: PhantomData })
    }

    pub fn get(&self, sel: impl Into<SampleSelector>) -> Result<Vec<T>> {
        let (bytes, _) = self.inner.raw(sel.into()).op("get")?;
        T::decode(bytes).op("get")
    }

    pub fn get_dimensions(&self, sel: impl Into<SampleSelector>) -> Result<Dimensions> {
        let (_, dims) = self.inner.raw(sel.into()).op("get_dimensions")?;
        Ok(dims.clone())
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

    /// Every stored sample holds exactly one element.
    pub fn is_scalar_like(&self) -> bool {
        (0..self.num_samples()).all(|i| {
            self.inner
                .raw(SampleSelector::Index(i))
                .map_or(false, |(_, dims)| dims.num_points() == 1)
        })
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
