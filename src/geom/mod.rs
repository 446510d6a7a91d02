//! Geometry schemas built on the property layer.
//!
//! - [`OXform`] / [`IXform`] - transform nodes

mod xform;
mod xform_op;

pub use xform::{IXform, OXform, XformSample, XFORM_SCHEMA, XFORM_SCHEMA_TITLE};
pub use xform_op::{XformOp, XformOpType};
