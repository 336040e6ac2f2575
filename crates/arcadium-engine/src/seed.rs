use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic simulation runs.
///
/// A 128-bit (16-byte) seed that initializes the random number generator
/// driving obstacle placement. The same seed produces the same obstacle
/// stream, enabling:
///
/// - Reproducible fitness evaluation (the optimizer can re-score a policy)
/// - Regression testing of simulation determinism
///
/// Serializes as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSeed([u8; 16]);

/// Error returned when parsing a [`SimSeed`] from a hex string fails.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed hex: {reason}")]
pub struct ParseSimSeedError {
    #[error(not(source))]
    reason: String,
}

impl SimSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Formats the seed as a 32-character lowercase hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        hex_str
    }

    /// Parses a seed from a 32-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, ParseSimSeedError> {
        if hex_str.len() != 32 {
            return Err(ParseSimSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSimSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl FromStr for SimSeed {
    type Err = ParseSimSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for SimSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SimSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows sampling random seeds with `rng.random()`.
impl Distribution<SimSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimSeed(seed)
    }
}
