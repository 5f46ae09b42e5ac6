//! Account number newtype
//!
//! Account numbers are strings on disk and at the CLI. Freshly generated
//! numbers are always eight decimal digits without a leading zero.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::RangeInclusive;

/// Range of freshly generated account numbers
pub const ACCOUNT_NUMBER_RANGE: RangeInclusive<u32> = 10_000_000..=99_999_999;

/// Unique, immutable identifier of an account
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Wrap an existing account number (e.g. from user input), trimming whitespace
    pub fn new(number: impl AsRef<str>) -> Self {
        Self(number.as_ref().trim().to_string())
    }

    /// Draw a random eight-digit candidate
    ///
    /// Uniqueness is the caller's job: candidates must be checked against the
    /// live account set.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(ACCOUNT_NUMBER_RANGE).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored numbers are trimmed the same way as typed ones
impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
