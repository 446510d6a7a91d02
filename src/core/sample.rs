//! Sample selection.
//!
//! A read names its sample either directly by index or by a time plus a
//! rounding policy; the policy is resolved against the property's
//! [`TimeSampling`].

use crate::core::TimeSampling;
use crate::util::Chrono;

/// How a time maps to a sample index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeIndexPolicy {
    /// Largest index whose time is `<=` the request.
    Floor,
    /// Smallest index whose time is `>=` the request.
    Ceil,
    /// Closest sample; ties go to floor.
    #[default]
    Near,
}

/// Sample selector for reading property samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleSelector {
    Index(usize),
    Time { time: Chrono, policy: TimeIndexPolicy },
}

impl SampleSelector {
    /// Index 0 (first/static sample).
    pub const fn first() -> Self {
        Self::Index(0)
    }

    pub const fn index(i: usize) -> Self {
        Self::Index(i)
    }

    pub const fn at(time: Chrono, policy: TimeIndexPolicy) -> Self {
        Self::Time { time, policy }
    }

    pub const fn time_floor(t: Chrono) -> Self {
        Self::at(t, TimeIndexPolicy::Floor)
    }

    pub const fn time_ceil(t: Chrono) -> Self {
        Self::at(t, TimeIndexPolicy::Ceil)
    }

    pub const fn time_near(t: Chrono) -> Self {
        Self::at(t, TimeIndexPolicy::Near)
    }

    /// Resolve to an index for a property with `num_samples` samples.
    ///
    /// Time requests are clamped into range; explicit indices pass through
    /// unchanged and are bounds-checked by the read.
    pub fn resolve(&self, ts: &TimeSampling, num_samples: usize) -> usize {
        match *self {
            Self::Index(i) => i,
            Self::Time { time, policy } => match policy {
                TimeIndexPolicy::Floor => ts.floor_index(time, num_samples).0,
                TimeIndexPolicy::Ceil => ts.ceil_index(time, num_samples).0,
                TimeIndexPolicy::Near => ts.near_index(time, num_samples).0,
            },
        }
    }
}

impl Default for SampleSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<usize> for SampleSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Chrono> for SampleSelector {
    fn from(time: Chrono) -> Self {
        Self::time_near(time)
    }
}

/// Result of sample interpolation query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleInterp {
    /// Floor sample index.
    pub floor_index: usize,
    /// Ceil sample index.
    pub ceil_index: usize,
    /// Interpolation factor (0.0 = floor, 1.0 = ceil).
    pub alpha: f64,
}

impl SampleInterp {
    /// Exact sample, no blending.
    pub fn exact(index: usize) -> Self {
        Self {
            floor_index: index,
            ceil_index: index,
            alpha: 0.0,
        }
    }

    pub fn lerp(floor: usize, ceil: usize, alpha: f64) -> Self {
        Self {
            floor_index: floor,
            ceil_index: ceil,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.floor_index == self.ceil_index || self.alpha == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let ts = TimeSampling::uniform(1.0, 0.0).unwrap();
        assert_eq!(SampleSelector::index(7).resolve(&ts, 3), 7);
        assert_eq!(SampleSelector::time_floor(1.6).resolve(&ts, 3), 1);
        assert_eq!(SampleSelector::time_ceil(1.2).resolve(&ts, 3), 2);
        assert_eq!(SampleSelector::time_near(1.4).resolve(&ts, 3), 1);
        assert_eq!(SampleSelector::time_near(99.0).resolve(&ts, 3), 2);
        assert_eq!(SampleSelector::from(0.6).resolve(&ts, 3), 1);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SampleSelector::default(), SampleSelector::first());
        assert_eq!(TimeIndexPolicy::default(), TimeIndexPolicy::Near);
        assert_eq!(SampleSelector::from(4usize), SampleSelector::Index(4));
    }

    #[test]
    fn test_interp() {
        let exact = SampleInterp::exact(5);
        assert!(exact.is_exact());
        assert_eq!(exact.floor_index, 5);

        let lerp = SampleInterp::lerp(2, 3, 1.5);
        assert!(!lerp.is_exact());
        assert_eq!(lerp.alpha, 1.0);
    }
}
