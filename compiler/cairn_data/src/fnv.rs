//! FNV-1a hashing.

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// 64-bit FNV-1a over a byte slice.
#[inline]
pub fn fnv_1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// 64-bit FNV-1a over a string, stopping at the first NUL byte.
///
/// Strings that differ only after an embedded NUL hash identically; key
/// equality still tells them apart.
#[inline]
pub fn fnv_1a_64_str(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    fnv_1a_64(&bytes[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_offset_basis() {
        assert_eq!(fnv_1a_64(b""), FNV_OFFSET_BASIS);
        assert_eq!(fnv_1a_64_str(""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn known_vector() {
        // FNV-1a 64 of "a"
        assert_eq!(fnv_1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn string_variant_stops_at_nul() {
        assert_eq!(fnv_1a_64_str("ab\0cd"), fnv_1a_64(b"ab"));
        assert_ne!(fnv_1a_64(b"ab\0cd"), fnv_1a_64(b"ab"));
    }
}
