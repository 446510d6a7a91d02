//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use alembic_core::abc::{ArchiveOptions, OArchive};
use alembic_core::util::logging::init_tracing;

pub const EPS: f64 = 1e-9;

/// In-memory archive with tracing hooked up to the test writer.
pub fn archive(name: &str) -> OArchive {
    init_tracing();
    OArchive::in_memory(name, ArchiveOptions::new().application("alembic-core tests"))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < EPS, "expected {expected}, got {actual}");
}
