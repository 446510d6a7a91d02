//! High-level Alembic API.
//!
//! - [`OArchive`] / [`IArchive`] - archive handles and the time sampling table
//! - [`OObject`] / [`IObject`] - hierarchical scene objects
//! - [`OCompoundProperty`] / [`ICompoundProperty`] - property containers
//! - [`OScalarProperty`] / [`IScalarProperty`] - fixed-size samples
//! - [`OArrayProperty`] / [`IArrayProperty`] - variable-length samples
//! - [`ODefaultedScalarProperty`] - scalar stored only once it leaves its default
//!
//! ## Example
//!
//! ```ignore
//! use alembic_core::abc::{ArchiveOptions, OArchive};
//!
//! let archive = OArchive::in_memory("scene", ArchiveOptions::new().application("demo"));
//! let props = archive.top().add_child("box", Default::default())?.properties()?;
//! let mut weight = props.add_scalar::<f32>("weight", 0)?;
//! weight.set(&0.5)?;
//! let reader = archive.close()?;
//! ```

mod archive;
mod args;
mod array;
mod compound;
mod defaulted;
mod object;
mod scalar;
mod simple;
mod tracker;
mod typed;

pub use archive::{IArchive, OArchive};
pub use args::{library_version, ArchiveOptions, ErrorPolicy, PropertyArgs, TimeSamplingArg};
pub(crate) use args::ErrorSink;
pub use array::{IArrayProperty, OArrayProperty};
pub use compound::{ICompoundProperty, OCompoundProperty};
pub use defaulted::ODefaultedScalarProperty;
pub use object::{IObject, OObject};
pub use scalar::{IScalarProperty, OScalarProperty};
pub use typed::SampleValue;
