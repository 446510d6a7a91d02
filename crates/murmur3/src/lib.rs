//! MurmurHash3 x64_128.
//!
//! Original algorithm by Austin Appleby (public domain). Alembic uses the
//! 128-bit variant with a zero seed to key array samples, so that is the only
//! flavour provided here.

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// Compute MurmurHash3 x64_128 with seed 0.
///
/// `pod_size` is the size of one element in bytes. On big-endian targets each
/// element is byte-swapped before hashing so keys agree across platforms.
/// Returns the two 64-bit halves `(h1, h2)`.
pub fn hash128(data: &[u8], pod_size: Option<usize>) -> (u64, u64) {
    let pod_size = pod_size.unwrap_or(1);
    if cfg!(target_endian = "big") && pod_size > 1 {
        let swapped: Vec<u8> = data
            .chunks(pod_size)
            .flat_map(|chunk| chunk.iter().rev().copied())
            .collect();
        return hash128_le(&swapped);
    }
    hash128_le(data)
}

/// Same as [`hash128`] but packed into 16 bytes (h1 then h2, little-endian).
pub fn hash128_bytes(data: &[u8], pod_size: Option<usize>) -> [u8; 16] {
    let (h1, h2) = hash128(data, pod_size);
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&h1.to_le_bytes());
    out[8..].copy_from_slice(&h2.to_le_bytes());
    out
}

fn hash128_le(data: &[u8]) -> (u64, u64) {
    let mut h1 = 0u64;
    let mut h2 = 0u64;

    let mut blocks = data.chunks_exact(16);
    for block in &mut blocks {
        let (lo, hi) = block.split_at(8);
        h1 ^= mix_k1(read_u64(lo));
        h1 = h1.rotate_left(27).wrapping_add(h2).wrapping_mul(5).wrapping_add(0x52dc_e729);

        h2 ^= mix_k2(read_u64(hi));
        h2 = h2.rotate_left(31).wrapping_add(h1).wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    // Tail bytes are folded in without the block rounds.
    let tail = blocks.remainder();
    if tail.len() > 8 {
        h2 ^= mix_k2(read_partial(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_partial(&tail[..tail.len().min(8)]));
    }

    let len = data.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (h1, h2)
}

#[inline]
fn mix_k1(k: u64) -> u64 {
    k.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k: u64) -> u64 {
    k.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

#[inline]
fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// Little-endian read of up to 8 bytes, zero padded.
#[inline]
fn read_partial(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}

#[inline]
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_zero() {
        // Zero seed and zero length leave both lanes untouched.
        assert_eq!(hash128(&[], None), (0, 0));
    }

    #[test]
    fn test_every_tail_length_differs() {
        let data: Vec<u8> = (1..=40).collect();
        let mut seen = std::collections::HashSet::new();
        for len in 0..data.len() {
            assert!(seen.insert(hash128(&data[..len], None)), "collision at len {len}");
        }
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<u8> = (0..100).collect();
        assert_eq!(hash128(&data, None), hash128(&data, None));
        assert_ne!(hash128(b"hello", None), hash128(b"hellp", None));
    }

    #[test]
    fn test_bytes_layout() {
        let (h1, h2) = hash128(b"0123456789abcdef", None);
        let bytes = hash128_bytes(b"0123456789abcdef", None);
        assert_eq!(read_u64(&bytes[..8]), h1);
        assert_eq!(read_u64(&bytes[8..]), h2);
    }

    #[test]
    fn test_read_partial() {
        assert_eq!(read_partial(&[0x01, 0x02]), 0x0201);
        assert_eq!(read_partial(&[]), 0);
    }
}
