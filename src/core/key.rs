//! Content keys for sample elision.
//!
//! Two samples with equal keys are treated as identical, so a writer can
//! record a repeat instead of storing the bytes again.

use std::fmt;

use crate::util::PlainOldDataType;

/// 128-bit content digest.
pub type SampleDigest = [u8; 16];

/// Digest of a sample's bytes plus its size and element type.
///
/// The digest hashes in units of the element size so keys are stable across
/// host byte orders; string data hashes per character width.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub digest: SampleDigest,
    pub num_bytes: usize,
    pub pod: PlainOldDataType,
}

impl SampleKey {
    pub fn from_bytes(data: &[u8], pod: PlainOldDataType) -> Self {
        Self {
            digest: murmur3::hash128_bytes(data, Some(pod.key_size())),
            num_bytes: data.len(),
            pod,
        }
    }

    /// Hex form of the digest.
    pub fn digest_hex(&self) -> String {
        self.digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SampleKey({} {}B {})", self.digest_hex(), self.num_bytes, self.pod.name())
    }
}
