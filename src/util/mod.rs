//! Utility types used throughout the crate:
//! - [`PlainOldDataType`] - element types
//! - [`DataType`] - POD + extent
//! - [`Dimensions`] - array sample shape
//! - [`Error`] / [`Result`] - error handling
//! - math types (glam re-exports, [`BBox3d`], [`Chrono`])

mod pod;
mod data_type;
mod dimensions;
mod error;
mod math;
pub mod logging;

pub use pod::*;
pub use data_type::*;
pub use dimensions::*;
pub use error::{Error, Result};
pub(crate) use error::ResultExt;
pub use math::*;
