//! 48-bit hardware (MAC) addresses.

use super::AddressParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest value representable in 48 bits
pub const HARDWARE_ADDRESS_MAX: u64 = (1 << 48) - 1;

/// A fixed 48-bit link-layer address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HardwareAddress([u8; 6]);

impl HardwareAddress {
    /// The all-ones broadcast address `ff:ff:ff:ff:ff:ff`
    pub const BROADCAST: HardwareAddress = HardwareAddress([0xff; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        HardwareAddress(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Build an address from the low 48 bits of `value`
    pub fn from_u64(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bytes[2..]);
        HardwareAddress(octets)
    }

    pub fn to_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes[2..].copy_from_slice(&self.0);
        u64::from_be_bytes(bytes)
    }
}

impl From<[u8; 6]> for HardwareAddress {
    fn from(octets: [u8; 6]) -> Self {
        HardwareAddress(octets)
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

impl FromStr for HardwareAddress {
    type Err = AddressParseError;

    /// Parse colon-separated hex, e.g. "00:11:22:33:AA:bb"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let groups: Vec<&str> = input.split(':').collect();
        if groups.len() != 6 {
            return Err(AddressParseError::GroupCount {
                input: input.to_string(),
                found: groups.len(),
            });
        }

        let mut octets = [0u8; 6];
        for (octet, group) in octets.iter_mut().zip(&groups) {
            // from_str_radix alone would accept "+f" or a single digit
            if group.len() != 2 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(AddressParseError::InvalidGroup {
                    input: input.to_string(),
                    group: group.to_string(),
                });
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| AddressParseError::InvalidGroup {
                input: input.to_string(),
                group: group.to_string(),
            })?;
        }
        Ok(HardwareAddress(octets))
    }
}

impl Serialize for HardwareAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HardwareAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
