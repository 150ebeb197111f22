// Copyright (c) 2026-present, hashkit
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::str::FromStr;

/// Probe sequence used by the open-addressing table after a collision
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum ProbeType {
    /// `(i0 + j + 1) mod n`
    #[default]
    Linear,

    /// `(i0 + (j + 1)^2) mod n`
    Quadratic,

    /// `(i0 + j * (7 - |h| mod 7)) mod n`
    DoubleHashing,
}

impl ProbeType {
    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::DoubleHashing => "double",
        }
    }

    /// Returns the slot examined on probe `attempt` (0-based), given the
    /// initial index, the raw hash of the key and the table length.
    #[must_use]
    pub fn position(self, initial: usize, attempt: usize, raw: i32, len: usize) -> usize {
        match self {
            Self::Linear => (initial + attempt + 1) % len,
            Self::Quadratic => {
                let step = (attempt + 1) % len;
                (initial + (step * step) % len) % len
            }
            Self::DoubleHashing => {
                let step = 7 - (raw.unsigned_abs() % 7) as usize;
                (initial + (attempt % len) * step) % len
            }
        }
    }
}

impl std::fmt::Display for ProbeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProbeType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "quadratic" => Ok(Self::Quadratic),
            "double" | "double-hashing" | "doublehashing" => Ok(Self::DoubleHashing),
            _ => Err(crate::Error::invalid_argument(
                "probe_type",
                format!("unknown probe sequence {s:?}"),
            )),
        }
    }
}
