//! Scalar properties that only exist once they leave their default.

use tracing::debug;

use super::args::ErrorSink;
use super::typed::encode_values;
use super::{OCompoundProperty, OScalarProperty, PropertyArgs, SampleValue, TimeSamplingArg};
use crate::util::{Error, Result};

/// A scalar channel with a known default.
///
/// Samples bit-identical to the default are only counted. The first differing sample
/// at index `k` creates the real property and backfills it: the default at 0,
/// repeats for `1..k`, then the value at `k`. A channel that never diverges is
/// never stored and readers fall back to the default.
pub struct ODefaultedScalarProperty<T: SampleValue> {
    parent: OCompoundProperty,
    name: String,
    args: PropertyArgs,
    default: Vec<T>,
    default_bytes: Vec<u8>,
    num_samples: usize,
    property: Option<OScalarProperty<T>>,
    sink: ErrorSink,
}

impl<T: SampleValue> ODefaultedScalarProperty<T> {
    /// Channel of `default.len()` values per sample.
    pub fn new(
        parent: OCompoundProperty,
        name: impl Into<String>,
        default: Vec<T>,
        args: impl Into<PropertyArgs>,
    ) -> Self {
        let args = args.into();
        Self {
            parent,
            name: name.into(),
            sink: ErrorSink::new(args.error_policy),
            args,
            default_bytes: encode_values(&default),
            default,
            num_samples: 0,
            property: None,
        }
    }

    pub fn set(&mut self, value: &T) -> Result<()> {
        self.set_slice(std::slice::from_ref(value))
    }

    pub fn set_slice(&mut self, values: &[T]) -> Result<()> {
        let result = self.try_set(values);
        self.sink.handle("set", &self.name, result)
    }

    fn try_set(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.default.len() {
            return Err(Error::invalid(format!(
                "'{}' takes {} values per sample, got {}",
                self.name,
                self.default.len(),
                values.len()
            )));
        }
        T::validate(values)?;
        if let Some(property) = &mut self.property {
            property.set_slice(values)?;
        } else if encode_values(values) != self.default_bytes {
            let property = self.materialize(values)?;
            self.property = Some(property);
        }
        self.num_samples += 1;
        Ok(())
    }

    fn materialize(&self, values: &[T]) -> Result<OScalarProperty<T>> {
        let mut property =
            self.parent
                .add_scalar_n::<T>(&self.name, self.default.len(), self.args.clone())?;
        if self.num_samples > 0 {
            property.set_slice(&self.default)?;
            for _ in 1..self.num_samples {
                property.set_from_previous()?;
            }
        }
        property.set_slice(values)?;
        debug!(property = %self.name, at = self.num_samples, "materialized defaulted property");
        Ok(property)
    }

    /// Repeat the previous sample, stored or virtual.
    pub fn set_from_previous(&mut self) -> Result<()> {
        let result = match &mut self.property {
            Some(property) => property.set_from_previous(),
            None if self.num_samples == 0 => Err(Error::NoPreviousSample(self.name.clone())),
            None => Ok(()),
        };
        let result = result.map(|()| self.num_samples += 1);
        self.sink.handle("set_from_previous", &self.name, result)
    }

    /// Applies now if materialized, otherwise when the property is created.
    pub fn set_time_sampling(&mut self, ts: impl Into<TimeSamplingArg>) -> Result<()> {
        let ts = ts.into();
        if let Some(property) = &mut self.property {
            property.set_time_sampling(ts.clone())?;
        }
        self.args.time_sampling = ts;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &[T] {
        &self.default
    }

    /// Logical samples, stored or not.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn is_materialized(&self) -> bool {
        self.property.is_some()
    }

    /// The stored property, once it exists.
    pub fn property(&self) -> Option<&OScalarProperty<T>> {
        self.property.as_ref()
    }

    pub fn is_constant(&self) -> bool {
        self.property.as_ref().map_or(true, |p| p.is_constant())
    }

    pub fn errors(&self) -> &[Error] {
        self.sink.errors()
    }
}
