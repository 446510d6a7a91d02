//! Shape of an array sample.

use smallvec::SmallVec;
use std::fmt;

/// Dimensions of an array sample.
///
/// Most samples are 1D (`[len]`); rank 0 stands for a lone scalar value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    dims: SmallVec<[usize; 4]>,
}

impl Dimensions {
    /// Rank 0.
    pub fn scalar() -> Self {
        Self { dims: SmallVec::new() }
    }

    pub fn d1(size: usize) -> Self {
        Self { dims: smallvec::smallvec![size] }
    }

    pub fn d2(width: usize, height: usize) -> Self {
        Self { dims: smallvec::smallvec![width, height] }
    }

    pub fn from_slice(sizes: &[usize]) -> Self {
        Self { dims: SmallVec::from_slice(sizes) }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn sizes(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements (product of all dimensions, 1 for rank 0).
    pub fn num_points(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }
}

impl From<usize> for Dimensions {
    fn from(size: usize) -> Self {
        Self::d1(size)
    }
}

impl From<(usize, usize)> for Dimensions {
    fn from((w, h): (usize, usize)) -> Self {
        Self::d2(w, h)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, s) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(" x ")?;
            }
            write!(f, "{s}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let d = Dimensions::scalar();
        assert_eq!(d.rank(), 0);
        assert!(d.is_scalar());
        assert_eq!(d.num_points(), 1);
        assert_eq!(d.to_string(), "[]");
    }

    #[test]
    fn test_ranks() {
        let d: Dimensions = 10.into();
        assert_eq!(d.sizes(), &[10]);
        assert_eq!(d.num_points(), 10);

        let d: Dimensions = (640, 480).into();
        assert_eq!(d.rank(), 2);
        assert_eq!(d.num_points(), 640 * 480);
        assert_eq!(d.to_string(), "[640 x 480]");

        assert_eq!(Dimensions::d1(0).num_points(), 0);
    }
}
