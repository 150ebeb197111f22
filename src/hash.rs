// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::str::FromStr;

/// Fractional constant for multiplicative hashing, `(sqrt(5) - 1) / 2`
const KNUTH_FRACTION: f64 = 0.618_033_988_749_894_9;

/// Hashes bytes with xxh3
#[must_use]
pub fn hash64(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(bytes)
}

/// Folds a 64-bit hash into 32 bits by XOR-ing its halves.
#[allow(clippy::cast_possible_truncation)]
fn fold64(hash: u64) -> i32 {
    (hash ^ (hash >> 32)) as u32 as i32
}

/// A key that can produce a 32-bit raw hash code
///
/// The raw hash is what [`bucket_index`] reduces to a bucket. Two keys that
/// compare equal must produce the same raw hash.
pub trait RawHash {
    /// Returns the raw hash code of the key.
    fn raw_hash(&self) -> i32;
}

impl RawHash for i32 {
    fn raw_hash(&self) -> i32 {
        *self
    }
}

impl RawHash for u32 {
    #[allow(clippy::cast_possible_wrap)]
    fn raw_hash(&self) -> i32 {
        *self as i32
    }
}

impl RawHash for i64 {
    #[allow(clippy::cast_sign_loss)]
    fn raw_hash(&self) -> i32 {
        fold64(*self as u64)
    }
}

impl RawHash for u64 {
    fn raw_hash(&self) -> i32 {
        fold64(*self)
    }
}

impl RawHash for usize {
    fn raw_hash(&self) -> i32 {
        fold64(*self as u64)
    }
}

macro_rules! raw_hash_widen {
    ($($t:ty),*) => {
        $(
            impl RawHash for $t {
                fn raw_hash(&self) -> i32 {
                    i32::from(*self)
                }
            }
        )*
    };
}

raw_hash_widen!(i8, u8, i16, u16);

impl RawHash for char {
    #[allow(clippy::cast_possible_wrap)]
    fn raw_hash(&self) -> i32 {
        u32::from(*self) as i32
    }
}

impl RawHash for str {
    fn raw_hash(&self) -> i32 {
        fold64(hash64(self.as_bytes()))
    }
}

impl RawHash for String {
    fn raw_hash(&self) -> i32 {
        self.as_str().raw_hash()
    }
}

impl<T: RawHash + ?Sized> RawHash for &T {
    fn raw_hash(&self) -> i32 {
        (**self).raw_hash()
    }
}

impl<T: RawHash + ?Sized> RawHash for Box<T> {
    fn raw_hash(&self) -> i32 {
        (**self).raw_hash()
    }
}

/// Hash function used to map a raw hash code to a bucket index
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum HashType {
    /// `|h| mod n`
    #[default]
    Division,

    /// Knuth's multiplicative method, `floor(n * frac(|h| * A))`
    Multiplication,

    /// Seven-shift XOR mix, then division
    Jcf7,

    /// Single 16-bit XOR fold, then division
    Jcf,
}

impl HashType {
    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Division => "division",
            Self::Multiplication => "multiplication",
            Self::Jcf7 => "jcf7",
            Self::Jcf => "jcf",
        }
    }
}

impl std::fmt::Display for HashType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "division" | "div" => Ok(Self::Division),
            "multiplication" | "mul" => Ok(Self::Multiplication),
            "jcf7" => Ok(Self::Jcf7),
            "jcf" | "jcf8" => Ok(Self::Jcf),
            _ => Err(crate::Error::invalid_argument(
                "hash_type",
                format!("unknown hash function {s:?}"),
            )),
        }
    }
}

/// Reduces a raw hash to `[0, len)` by absolute value and remainder.
fn reduce(raw: i32, len: usize) -> usize {
    raw.unsigned_abs() as usize % len
}

/// Maps a raw hash code to a bucket index in `[0, len)`.
///
/// Negative raw hashes (including `i32::MIN`) are reduced by their absolute value.
///
/// # Panics
///
/// Panics if `len` is zero.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn bucket_index(raw: i32, len: usize, hash_type: HashType) -> usize {
    assert!(len > 0, "table length may not be zero");

    match hash_type {
        HashType::Division => reduce(raw, len),
        HashType::Multiplication => {
            let fraction = (f64::from(raw.unsigned_abs()) * KNUTH_FRACTION).fract();

            // NOTE: float rounding may land exactly on `len` for huge tables
            ((len as f64 * fraction) as usize).min(len - 1)
        }
        HashType::Jcf7 => {
            let mut h = raw as u32;
            h ^= (h >> 20) ^ (h >> 12);
            h ^= (h >> 7) ^ (h >> 4);
            reduce(h as i32, len)
        }
        HashType::Jcf => {
            let h = raw as u32;
            reduce((h ^ (h >> 16)) as i32, len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn hash_division() {
        assert_eq!(3, bucket_index(11, 8, HashType::Division));
        assert_eq!(5, bucket_index(-13, 8, HashType::Division));
        assert_eq!(0, bucket_index(0, 8, HashType::Division));
    }

    #[test]
    fn hash_min_value_does_not_overflow() {
        for variant in HashType::iter() {
            assert!(bucket_index(i32::MIN, 7, variant) < 7);
        }
    }

    #[test]
    fn hash_multiplication() {
        // frac(1 * 0.618...) * 8 = 4.94...
        assert_eq!(4, bucket_index(1, 8, HashType::Multiplication));
        assert_eq!(
            bucket_index(-1, 8, HashType::Multiplication),
            bucket_index(1, 8, HashType::Multiplication),
        );
    }

    #[test]
    fn hash_jcf() {
        assert_eq!(1, bucket_index(0x1_0000, 8, HashType::Jcf));
        assert_eq!(0, bucket_index(0, 8, HashType::Jcf7));
        assert_eq!(0, bucket_index(0, 8, HashType::Jcf));
    }

    #[test]
    fn hash_always_in_range() {
        use rand::Rng;

        let mut rng = rand::rng();

        for variant in HashType::iter() {
            for len in [1, 2, 7, 8, 13, 1_024] {
                for _ in 0..1_000 {
                    let raw: i32 = rng.random();
                    assert!(bucket_index(raw, len, variant) < len);
                }
            }
        }
    }

    #[test]
    fn hash_type_names_round_trip() -> crate::Result<()> {
        for variant in HashType::iter() {
            assert_eq!(variant, variant.name().parse::<HashType>()?);
        }
        assert!("crc32".parse::<HashType>().is_err());
        Ok(())
    }

    #[test]
    fn raw_hash_strings_are_stable() {
        assert_eq!("TA100".raw_hash(), String::from("TA100").raw_hash());
        assert_eq!("TA100".raw_hash(), (&"TA100").raw_hash());
        assert_ne!("TA100".raw_hash(), "TA101".raw_hash());
    }

    #[test]
    fn raw_hash_integers() {
        assert_eq!(-5, (-5_i32).raw_hash());
        assert_eq!(42, 42_u8.raw_hash());
        assert_eq!(1, (1_u64 << 32).raw_hash());
    }
}
