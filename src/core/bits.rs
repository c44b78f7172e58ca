//! Keyspace arithmetic.

use num_bigint::BigUint;

use crate::core::id::Id;

/// Rounds `n` up to the next multiple of `bits`.
///
/// Used to align bit lengths to byte boundaries (`bits = 8`).
pub fn bit_align(n: usize, bits: usize) -> usize {
    debug_assert_ne!(bits, 0);
    n + ((bits - (n % bits)) % bits)
}

/// Returns the identifier made of exactly `count` one-bits, i.e. `2^count - 1`.
///
/// This is the inclusive upper bound of a `count`-bit keyspace.
pub fn bit_mask(count: usize) -> Id {
    // Full bytes are 0xff, the remaining high bits go into a leading partial byte.
    let (q, r) = (count / 8, count % 8);

    let mut bytes = Vec::with_capacity(q + 1);
    if r > 0 {
        bytes.push((1u8 << r) - 1);
    }
    bytes.resize(bytes.len() + q, u8::MAX);

    Id::from(BigUint::from_bytes_be(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_align_rounds_up() {
        assert_eq!(bit_align(0, 8), 0);
        assert_eq!(bit_align(1, 8), 8);
        assert_eq!(bit_align(8, 8), 8);
        assert_eq!(bit_align(9, 8), 16);
        assert_eq!(bit_align(14, 8), 16);
        assert_eq!(bit_align(17, 8), 24);
        assert_eq!(bit_align(5, 3), 6);
    }

    #[test]
    fn bit_mask_hex() {
        for (input, expected) in [
            (0, "0"),
            (1, "1"),
            (9, "1ff"),
            (10, "3ff"),
            (11, "7ff"),
            (12, "fff"),
            (13, "1fff"),
            (14, "3fff"),
            (15, "7fff"),
            (16, "ffff"),
        ] {
            assert_eq!(bit_mask(input).to_string(), expected, "bit_mask({input})");
        }
    }

    #[test]
    fn bit_mask_is_power_of_two_minus_one() {
        for count in [0usize, 1, 7, 8, 63, 64, 65, 128, 160, 256, 257] {
            let expected = (BigUint::from(1u8) << count) - 1u8;
            assert_eq!(bit_mask(count), Id::from(expected));
            assert_eq!(bit_mask(count).bits(), count as u64);
        }
    }
}
