//! Math types: glam re-exports, the box type used for bounds, and `Chrono`.

pub use glam::{DMat4, DQuat, DVec3, Mat4, Vec2, Vec3};

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Time value in seconds.
pub type Chrono = f64;

/// 3D bounding box with double precision (Alembic `Box3d`).
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BBox3d {
    pub min: DVec3,
    pub max: DVec3,
}

impl BBox3d {
    /// Inverted box; expands to the first point added.
    pub const EMPTY: Self = Self {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// True when any axis is inverted (NaN extents count as empty too).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }

    #[inline]
    pub fn expand_by_point(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

impl Default for BBox3d {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for BBox3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox3d({:?} - {:?})", self.min, self.max)
    }
}
