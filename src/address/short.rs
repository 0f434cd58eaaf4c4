//! 8-bit UAN short addresses.

use super::AddressParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A compact address on the acoustic network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortAddress(u8);

impl ShortAddress {
    /// Reserved broadcast address
    pub const BROADCAST: ShortAddress = ShortAddress(u8::MAX);

    pub const fn new(value: u8) -> Self {
        ShortAddress(value)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl From<u8> for ShortAddress {
    fn from(value: u8) -> Self {
        ShortAddress(value)
    }
}

impl fmt::Display for ShortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShortAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map(ShortAddress)
            .map_err(|_| AddressParseError::InvalidShort { input: s.to_string() })
    }
}
