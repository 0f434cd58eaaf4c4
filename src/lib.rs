//! # UanBridge - address translation for tap-bridged acoustic networks
//!
//! Virtual machines attached to a simulated underwater acoustic network
//! speak Ethernet and use 48-bit hardware addresses, while the acoustic MAC
//! layer only understands compact 8-bit addresses. This crate provides the
//! translation layer between the two.
//!
//! ## Architecture
//!
//! - `address`: hardware and short address value types
//! - `translator`: the bidirectional translation cache and its allocators
//! - `bridge`: re-addressing of frames in both directions, with drop-on-failure
//! - `config`, `config_loader`: YAML configuration
//! - `scenario`: scripted replay and seeded synthetic traffic
//!
//! ## Example Usage
//!
//! ```rust
//! use uanbridge::address::{HardwareAddress, ShortAddress};
//! use uanbridge::translator::AddressTranslator;
//!
//! let mut translator = AddressTranslator::new();
//! let station: HardwareAddress = "00:11:22:33:44:55".parse()?;
//!
//! let short = translator.translate_to_short(station)?;
//! assert_eq!(translator.translate_to_short(station)?, short);
//! assert_eq!(translator.translate_to_hardware(short)?, station);
//!
//! // Broadcast maps to broadcast and is never stored
//! assert_eq!(
//!     translator.translate_to_short(HardwareAddress::BROADCAST)?,
//!     ShortAddress::BROADCAST
//! );
//! assert_eq!(translator.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed `thiserror` errors. The binary and the
//! configuration loader use `color_eyre` for reports with context.

pub mod address;
pub mod bridge;
pub mod config;
pub mod config_loader;
pub mod scenario;
pub mod translator;
