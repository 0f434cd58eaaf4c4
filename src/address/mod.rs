//! Address value types for both sides of the bridge.
//!
//! The hardware side uses fixed 48-bit MAC addresses; the acoustic side uses
//! compact 8-bit UAN addresses. Both are plain `Copy` values so they can be
//! used directly as map keys.

pub mod hardware;
pub mod short;

// Re-export commonly used types
pub use hardware::HardwareAddress;
pub use short::ShortAddress;

use serde::Serialize;
use std::fmt;

/// Which addressing domain a value (or an allocator) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressDomain {
    Hardware,
    Short,
}

impl fmt::Display for AddressDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressDomain::Hardware => write!(f, "hardware"),
            AddressDomain::Short => write!(f, "short"),
        }
    }
}

/// Errors produced when parsing address text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("Expected 6 colon-separated groups in '{input}', found {found}")]
    GroupCount { input: String, found: usize },

    #[error("Invalid hex group '{group}' in '{input}'")]
    InvalidGroup { input: String, group: String },

    #[error("Invalid short address '{input}'")]
    InvalidShort { input: String },
}
