//! Protocol identifier types.

use std::{
    fmt::{self, Debug, Display, Formatter, LowerHex},
    str::FromStr,
};

use num_bigint::BigUint;

use crate::{Error, Result};

/// An arbitrary-precision, non-negative identifier with a XOR-based distance metric.
///
/// Equality, ordering and hashing are over the integer value, never over the width of the
/// representation it was built from: `0x00ff` and `0xff` are the same identifier.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(BigUint);

impl Id {
    /// Creates a new identifier from an arbitrary-precision integer.
    pub fn new(value: BigUint) -> Self {
        Id(value)
    }

    /// The zero identifier.
    pub fn zero() -> Self {
        Id(BigUint::default())
    }

    /// Creates an identifier from big-endian bytes, leading zero bytes are ignored.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Id(BigUint::from_bytes_be(bytes))
    }

    /// Returns the minimal big-endian encoding of the identifier (zero encodes as `[0]`).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Returns the integer backing the identifier.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Returns the number of bits needed to represent the identifier, `0` for zero.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    /// Computes the XOR-based distance between two identifiers.
    pub fn distance(&self, other: &Id) -> Id {
        Id(&self.0 ^ &other.0)
    }

    #[doc(hidden)]
    /// Convenience function for generating random identifiers of at most `bits` bits.
    pub fn rand(bits: usize) -> Self {
        use rand::{thread_rng, Rng};

        let mut rng = thread_rng();
        let mut bytes: Vec<u8> = (0..(bits + 7) / 8).map(|_| rng.gen()).collect();

        // Clear the surplus high bits of the leading byte.
        if let Some(first) = bytes.first_mut() {
            *first &= u8::MAX >> ((8 - bits % 8) % 8);
        }

        Self::from_bytes_be(&bytes)
    }
}

impl From<BigUint> for Id {
    fn from(value: BigUint) -> Self {
        Id(value)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(BigUint::from(value))
    }
}

impl From<Id> for BigUint {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl FromStr for Id {
    type Err = Error;

    /// Parses a hexadecimal identifier, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        // `parse_bytes` accepts `_` separators, identifiers don't.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidId(s.to_owned()));
        }

        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(Id)
            .ok_or_else(|| Error::InvalidId(s.to_owned()))
    }
}

impl LowerHex for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl Debug for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!("3faa".parse::<Id>().unwrap(), Id::from(0x3faa));
        assert_eq!("0x3FAA".parse::<Id>().unwrap(), Id::from(0x3faa));
        assert_eq!("0".parse::<Id>().unwrap(), Id::zero());

        for invalid in ["", "0x", "xyz", "12_34", "-1", " 1"] {
            assert!(matches!(invalid.parse::<Id>(), Err(Error::InvalidId(_))));
        }
    }

    #[test]
    fn display_round_trip() {
        let raw = "fb449c17f6c34fadea26a5a83e1952e815e001ea";
        let id: Id = raw.parse().unwrap();

        assert_eq!(id.to_string(), raw);
        assert_eq!(format!("{id:?}"), format!("Id({raw})"));
        assert_eq!(id.bits(), 160);
    }

    #[test]
    fn value_equality_ignores_leading_zeros() {
        let a = Id::from_bytes_be(&[0, 0, 0, 0x12, 0x34]);
        let b = Id::from_bytes_be(&[0x12, 0x34]);

        assert_eq!(a, b);
        assert_eq!(a.to_bytes_be(), vec![0x12, 0x34]);
        assert_eq!(Id::zero().to_bytes_be(), vec![0]);
        assert!(Id::from_bytes_be(&[]).is_zero());
    }

    #[test]
    fn distance() {
        const N: usize = 1000;

        let mut rng = thread_rng();

        for _ in 0..N {
            let a: u64 = rng.gen();
            let b: u64 = rng.gen();

            let distance = Id::from(a).distance(&Id::from(b));

            assert_eq!(distance, Id::from(a ^ b));
            assert_eq!(distance.bits(), u64::from(u64::BITS - (a ^ b).leading_zeros()));
        }
    }

    #[test]
    fn rand_respects_width() {
        for bits in [0, 1, 3, 8, 17, 160] {
            for _ in 0..100 {
                assert!(Id::rand(bits).bits() <= bits as u64);
            }
        }
    }
}
