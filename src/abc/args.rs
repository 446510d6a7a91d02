//! Construction-time configuration for archives and properties.

use tracing::warn;

use crate::core::{MetaData, TimeSampling};
use crate::util::{Error, Result};

/// What a writer does with a failed write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error to the caller.
    #[default]
    Abort,
    /// Log it, keep it on the handle and carry on as if nothing was written.
    Collect,
}

/// Time sampling given either as a table index or as a value to register.
#[derive(Clone, Debug, PartialEq)]
pub enum TimeSamplingArg {
    Index(u32),
    Sampling(TimeSampling),
}

impl Default for TimeSamplingArg {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<u32> for TimeSamplingArg {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl From<TimeSampling> for TimeSamplingArg {
    fn from(ts: TimeSampling) -> Self {
        Self::Sampling(ts)
    }
}

/// Options accepted by every property constructor.
///
/// ```ignore
/// let args = PropertyArgs::new()
///     .with_time_sampling(TimeSampling::uniform(1.0 / 24.0, 0.0)?)
///     .with_error_policy(ErrorPolicy::Collect);
/// let p = props.add_scalar::<f32>("weight", args)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyArgs {
    pub error_policy: ErrorPolicy,
    pub time_sampling: TimeSamplingArg,
    pub meta_data: MetaData,
}

impl PropertyArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_sampling(mut self, ts: impl Into<TimeSamplingArg>) -> Self {
        self.time_sampling = ts.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = meta_data;
        self
    }

    /// Shorthand for the `interpretation` metadata key.
    pub fn with_interpretation(mut self, interpretation: &str) -> Self {
        self.meta_data.set(MetaData::INTERPRETATION_KEY, interpretation);
        self
    }
}

impl From<u32> for PropertyArgs {
    fn from(index: u32) -> Self {
        Self::new().with_time_sampling(index)
    }
}

impl From<TimeSampling> for PropertyArgs {
    fn from(ts: TimeSampling) -> Self {
        Self::new().with_time_sampling(ts)
    }
}

impl From<ErrorPolicy> for PropertyArgs {
    fn from(policy: ErrorPolicy) -> Self {
        Self::new().with_error_policy(policy)
    }
}

/// Applies an [`ErrorPolicy`] to write results and keeps collected errors.
#[derive(Debug, Default)]
pub(crate) struct ErrorSink {
    policy: ErrorPolicy,
    errors: Vec<Error>,
}

impl ErrorSink {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy, errors: Vec::new() }
    }

    pub fn handle<T: Default>(&mut self, op: &'static str, name: &str, result: Result<T>) -> Result<T> {
        match result {
            Ok(v) => Ok(v),
            Err(e) => {
                let e = e.context(op);
                match self.policy {
                    ErrorPolicy::Abort => Err(e),
                    ErrorPolicy::Collect => {
                        warn!(property = name, error = %e, "write failed, error collected");
                        self.errors.push(e);
                        Ok(T::default())
                    }
                }
            }
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }
}

/// Archive-level information written into the archive metadata.
#[derive(Clone, Debug, Default)]
pub struct ArchiveOptions {
    pub application: Option<String>,
    pub description: Option<String>,
    pub dcc_fps: Option<f64>,
    pub meta_data: MetaData,
}

impl ArchiveOptions {
    pub const APPLICATION_KEY: &'static str = "_ai_Application";
    pub const DESCRIPTION_KEY: &'static str = "_ai_Description";
    pub const DCC_FPS_KEY: &'static str = "_ai_DCC_FPS";
    pub const VERSION_KEY: &'static str = "_ai_AlembicVersion";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn application(mut self, name: impl Into<String>) -> Self {
        self.application = Some(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn dcc_fps(mut self, fps: f64) -> Self {
        self.dcc_fps = Some(fps);
        self
    }

    /// Extra user entries; the `_ai_` keys above take precedence.
    pub fn meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = meta_data;
        self
    }

    /// Final archive metadata including the library version stamp.
    pub fn to_meta_data(&self) -> MetaData {
        let mut meta = self.meta_data.clone();
        if let Some(app) = &self.application {
            meta.set(Self::APPLICATION_KEY, app.as_str());
        }
        if let Some(desc) = &self.description {
            meta.set(Self::DESCRIPTION_KEY, desc.as_str());
        }
        if let Some(fps) = self.dcc_fps {
            meta.set(Self::DCC_FPS_KEY, fps.to_string());
        }
        meta.set(Self::VERSION_KEY, library_version());
        meta
    }
}

/// Version string stamped into every archive.
pub fn library_version() -> String {
    let date = option_env!("ALEMBIC_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("ALEMBIC_BUILD_TIME").unwrap_or("unknown");
    format!("alembic-core {} (built {date} {time})", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_args_builder() {
        let args = PropertyArgs::new()
            .with_time_sampling(3)
            .with_error_policy(ErrorPolicy::Collect)
            .with_interpretation("point");
        assert_eq!(args.time_sampling, TimeSamplingArg::Index(3));
        assert_eq!(args.error_policy, ErrorPolicy::Collect);
        assert_eq!(args.meta_data.interpretation(), Some("point"));
        assert_eq!(PropertyArgs::default().time_sampling, TimeSamplingArg::Index(0));
    }

    #[test]
    fn test_error_sink() {
        let mut abort = ErrorSink::new(ErrorPolicy::Abort);
        let err = abort.handle::<()>("set", "p", Err(Error::Frozen)).unwrap_err();
        assert!(matches!(err.root_cause(), Error::Frozen));
        assert!(abort.errors().is_empty());

        let mut collect = ErrorSink::new(ErrorPolicy::Collect);
        collect.handle::<()>("set", "p", Err(Error::Frozen)).unwrap();
        assert_eq!(collect.errors().len(), 1);
        assert_eq!(collect.take().len(), 1);
        assert!(collect.errors().is_empty());
    }

    #[test]
    fn test_archive_options() {
        let meta = ArchiveOptions::new()
            .application("unit")
            .description("desc")
            .dcc_fps(24.0)
            .to_meta_data();
        assert_eq!(meta.get(ArchiveOptions::APPLICATION_KEY), Some("unit"));
        assert_eq!(meta.get(ArchiveOptions::DESCRIPTION_KEY), Some("desc"));
        assert_eq!(meta.get(ArchiveOptions::DCC_FPS_KEY), Some("24"));
        assert!(meta.get(ArchiveOptions::VERSION_KEY).unwrap().starts_with("alembic-core"));
    }
}
