//! Per-property write state: previous key, last change, scalar-likeness.

use crate::core::SampleKey;
use crate::util::Dimensions;

/// Decides whether the next sample can reuse the previous slot.
///
/// State only moves forward in [`commit`](Self::commit), after storage has
/// accepted the write, so a failed write leaves it untouched.
#[derive(Debug)]
pub(crate) struct SampleTracker {
    previous: Option<(SampleKey, Dimensions)>,
    num_samples: usize,
    last_changed: usize,
    scalar_like: bool,
    array: bool,
}

impl SampleTracker {
    pub fn new(array: bool) -> Self {
        Self {
            previous: None,
            num_samples: 0,
            last_changed: 0,
            scalar_like: true,
            array,
        }
    }

    /// True when `key`/`dims` match the immediately previous sample.
    pub fn is_repeat(&self, key: &SampleKey, dims: &Dimensions) -> bool {
        matches!(&self.previous, Some((k, d)) if k == key && d == dims)
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn commit(&mut self, key: SampleKey, dims: Dimensions, repeat: bool) {
        let index = self.num_samples;
        if !repeat && index > 0 {
            self.last_changed = index;
        }
        if self.array && dims.num_points() != 1 {
            self.scalar_like = false;
        }
        self.previous = Some((key, dims));
        self.num_samples += 1;
    }

    /// Explicit repeat of the previous sample.
    pub fn commit_repeat(&mut self) {
        self.num_samples += 1;
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// No stored sample after the first differed from its predecessor.
    pub fn is_constant(&self) -> bool {
        self.last_changed == 0
    }

    pub fn is_scalar_like(&self) -> bool {
        self.scalar_like
    }
}
