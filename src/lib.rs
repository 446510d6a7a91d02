//! # alembic-core
//!
//! Time sampling and the typed hierarchical property layer of the Alembic
//! (.abc) data model.
//!
//! Original Alembic data model and C++ library developed by Sony Pictures Imageworks
//! and Industrial Light & Magic. All rights to the original belong to the authors.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (POD, DataType, Dimensions, errors, math)
//! - [`core`] - Time sampling, metadata, headers, sample keys and the storage traits
//! - [`memory`] - In-memory storage backend
//! - [`abc`] - High-level API (archives, objects, properties)
//! - [`geom`] - Transform schema built on the property layer
//!
//! ## Example
//!
//! ```ignore
//! use alembic_core::prelude::*;
//!
//! let archive = OArchive::in_memory("shot", ArchiveOptions::new().dcc_fps(24.0));
//! let ts = archive.add_time_sampling(TimeSampling::uniform(1.0 / 24.0, 0.0)?)?;
//! let mut xf = OXform::new(&archive.top(), "cube", ts)?;
//! xf.set(&XformSample::new().with_op(XformOp::translate(DVec3::X)))?;
//!
//! let reader = archive.close()?;
//! let cube = IXform::new(reader.find_object("/cube").ok_or(Error::ObjectNotFound("/cube".into()))?)?;
//! assert_eq!(cube.num_samples(), 1);
//! ```

pub mod util;
pub mod core;
pub mod memory;
pub mod abc;
pub mod geom;

// Re-export commonly used types
pub use util::{DataType, Dimensions, Error, PlainOldDataType, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::abc::{
        ArchiveOptions, ErrorPolicy, IArchive, IArrayProperty, ICompoundProperty, IObject,
        IScalarProperty, OArchive, OArrayProperty, OCompoundProperty, ODefaultedScalarProperty,
        OObject, OScalarProperty, PropertyArgs, SampleValue,
    };
    pub use crate::core::{MetaData, SampleSelector, TimeIndexPolicy, TimeSampling, TimeSamplingType};
    pub use crate::geom::{IXform, OXform, XformOp, XformOpType, XformSample};
    pub use crate::util::{BBox3d, Chrono, DMat4, DVec3, DataType, Dimensions, Error, PlainOldDataType, Result};
}
