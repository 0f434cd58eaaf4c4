//! Address translation between the hardware and short address domains.
//!
//! [`AddressTranslator`] keeps a one-to-one mapping between 48-bit hardware
//! addresses and 8-bit short addresses. Mappings are created lazily the
//! first time an unseen address is translated in either direction, and the
//! broadcast address of one domain always maps to the broadcast address of
//! the other without touching the table.
//!
//! The translator is single-threaded: every mutating call takes `&mut self`.
//! Callers that share one instance across threads must wrap it in a lock.

pub mod allocator;
pub mod table;

pub use allocator::Allocator;
pub use table::{BiTable, TranslationRecord};

use crate::address::hardware::HARDWARE_ADDRESS_MAX;
use crate::address::{AddressDomain, HardwareAddress, ShortAddress};
use crate::config::{TranslatorConfig, ValidationError};
use log::{debug, warn};

/// Errors raised by translation calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("No free {domain} address left to allocate")]
    AddressSpaceExhausted { domain: AddressDomain },
}

/// Bidirectional hardware <-> short address cache
#[derive(Debug)]
pub struct AddressTranslator {
    table: BiTable,
    short_allocator: Allocator,
    hardware_allocator: Allocator,
}

impl AddressTranslator {
    /// Translator using the full short address pool
    pub fn new() -> Self {
        Self::build(&TranslatorConfig::default())
    }

    /// Translator with a custom short pool and placeholder hardware start
    pub fn with_config(config: &TranslatorConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &TranslatorConfig) -> Self {
        AddressTranslator {
            table: BiTable::new(),
            short_allocator: Allocator::new(
                AddressDomain::Short,
                u64::from(config.short_pool_start),
                u64::from(config.short_pool_end),
            ),
            // Zero and broadcast are never handed out as placeholders
            hardware_allocator: Allocator::starting_at(
                AddressDomain::Hardware,
                1,
                HARDWARE_ADDRESS_MAX - 1,
                config.first_hardware_address.to_u64(),
            ),
        }
    }

    /// Short address for `hardware`, allocating one on first contact.
    ///
    /// Repeated calls return the same value until the record is removed.
    pub fn translate_to_short(&mut self, hardware: HardwareAddress) -> Result<ShortAddress, TranslationError> {
        if hardware.is_broadcast() {
            return Ok(ShortAddress::BROADCAST);
        }
        if let Some(short) = self.table.short_for(&hardware) {
            return Ok(short);
        }

        let table = &self.table;
        let value = self
            .short_allocator
            .allocate(table.len(), |v| table.contains_short(&ShortAddress::new(v as u8)))
            .map_err(|e| {
                warn!("Cannot translate {}: {}", hardware, e);
                e
            })?;
        let short = ShortAddress::new(value as u8);

        self.table.insert(TranslationRecord { hardware, short });
        debug!("Mapped hardware {} -> short {}", hardware, short);
        Ok(short)
    }

    /// Hardware address for `short`, allocating a placeholder on first contact.
    ///
    /// A short address seen only on the acoustic side (for example the
    /// sender of the first inbound frame) gets a stable made-up hardware
    /// identity so replies can be addressed to it.
    pub fn translate_to_hardware(&mut self, short: ShortAddress) -> Result<HardwareAddress, TranslationError> {
        if short.is_broadcast() {
            return Ok(HardwareAddress::BROADCAST);
        }
        if let Some(hardware) = self.table.hardware_for(&short) {
            return Ok(hardware);
        }

        let table = &self.table;
        let value = self
            .hardware_allocator
            .allocate(table.len(), |v| table.contains_hardware(&HardwareAddress::from_u64(v)))
            .map_err(|e| {
                warn!("Cannot translate short {}: {}", short, e);
                e
            })?;
        let hardware = HardwareAddress::from_u64(value);

        self.table.insert(TranslationRecord { hardware, short });
        debug!("Mapped short {} -> placeholder hardware {}", short, hardware);
        Ok(hardware)
    }

    /// Forget the record for `hardware`. Unknown addresses are ignored.
    pub fn remove(&mut self, hardware: HardwareAddress) -> Option<TranslationRecord> {
        let removed = self.table.remove_hardware(&hardware);
        if let Some(record) = &removed {
            debug!("Removed mapping {} <-> {}", record.hardware, record.short);
        }
        removed
    }

    /// Forget the record for `short`. Unknown addresses are ignored.
    pub fn remove_short(&mut self, short: ShortAddress) -> Option<TranslationRecord> {
        let removed = self.table.remove_short(&short);
        if let Some(record) = &removed {
            debug!("Removed mapping {} <-> {}", record.hardware, record.short);
        }
        removed
    }

    /// Lookup without allocating
    pub fn short_for(&self, hardware: HardwareAddress) -> Option<ShortAddress> {
        if hardware.is_broadcast() {
            return Some(ShortAddress::BROADCAST);
        }
        self.table.short_for(&hardware)
    }

    /// Lookup without allocating
    pub fn hardware_for(&self, short: ShortAddress) -> Option<HardwareAddress> {
        if short.is_broadcast() {
            return Some(HardwareAddress::BROADCAST);
        }
        self.table.hardware_for(&short)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = TranslationRecord> + '_ {
        self.table.records()
    }

    /// Drop every record. Allocator cursors keep their position.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl Default for AddressTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hw(text: &str) -> HardwareAddress {
        text.parse().unwrap()
    }

    #[test]
    fn test_translate_to_short_is_idempotent() {
        let mut translator = AddressTranslator::new();
        let first = translator.translate_to_short(hw("00:11:22:33:44:55")).unwrap();
        let second = translator.translate_to_short(hw("00:11:22:33:44:55")).unwrap();
        assert_eq!(first, second);
        assert_eq!(translator.len(), 1);
    }

    #[test]
    fn test_distinct_hardware_gets_distinct_short() {
        let mut translator = AddressTranslator::new();
        let mut seen = HashSet::new();
        for i in 1..=100u64 {
            let short = translator.translate_to_short(HardwareAddress::from_u64(0x1000 + i)).unwrap();
            assert!(seen.insert(short), "short address {} handed out twice", short);
        }
        assert_eq!(translator.len(), 100);
    }

    #[test]
    fn test_broadcast_is_transparent() {
        let mut translator = AddressTranslator::new();
        translator.translate_to_short(hw("00:11:22:33:44:55")).unwrap();

        for _ in 0..3 {
            assert_eq!(
                translator.translate_to_short(HardwareAddress::BROADCAST),
                Ok(ShortAddress::BROADCAST)
            );
            assert_eq!(
                translator.translate_to_hardware(ShortAddress::BROADCAST),
                Ok(HardwareAddress::BROADCAST)
            );
        }
        assert_eq!(translator.len(), 1);
    }

    #[test]
    fn test_reverse_translation_returns_placeholder() {
        let mut translator = AddressTranslator::new();
        let short = ShortAddress::new(42);

        let placeholder = translator.translate_to_hardware(short).unwrap();
        assert!(!placeholder.is_broadcast());
        assert_eq!(translator.translate_to_hardware(short), Ok(placeholder));
        assert_eq!(translator.translate_to_short(placeholder), Ok(short));
        assert_eq!(translator.len(), 1);
    }

    #[test]
    fn test_duality() {
        let mut translator = AddressTranslator::new();
        let a = hw("00:11:22:33:44:55");
        let s = translator.translate_to_short(a).unwrap();
        let h = translator.translate_to_hardware(ShortAddress::new(200)).unwrap();

        assert_eq!(translator.translate_to_hardware(s), Ok(a));
        assert_eq!(translator.translate_to_short(h), Ok(ShortAddress::new(200)));
        for record in translator.records() {
            assert_eq!(translator.short_for(record.hardware), Some(record.short));
            assert_eq!(translator.hardware_for(record.short), Some(record.hardware));
        }
    }

    #[test]
    fn test_allocation_skips_short_claimed_by_reverse_lookup() {
        let mut translator = AddressTranslator::new();
        // Short 0 is claimed from the acoustic side first
        translator.translate_to_hardware(ShortAddress::new(0)).unwrap();

        let short = translator.translate_to_short(hw("00:11:22:33:44:55")).unwrap();
        assert_ne!(short, ShortAddress::new(0));
    }

    #[test]
    fn test_placeholder_skips_known_hardware() {
        let config = TranslatorConfig::default();
        let mut translator = AddressTranslator::with_config(&config).unwrap();
        // The first placeholder value is already a real station
        translator.translate_to_short(config.first_hardware_address).unwrap();

        let placeholder = translator.translate_to_hardware(ShortAddress::new(100)).unwrap();
        assert_ne!(placeholder, config.first_hardware_address);
        assert_eq!(translator.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut translator = AddressTranslator::new();
        let a = hw("00:11:22:33:44:55");
        let s = translator.translate_to_short(a).unwrap();

        let removed = translator.remove(a);
        assert_eq!(removed, Some(TranslationRecord { hardware: a, short: s }));
        assert_eq!(translator.short_for(a), None);
        assert_eq!(translator.hardware_for(s), None);
        assert!(translator.is_empty());

        // Second removal is a no-op
        assert_eq!(translator.remove(a), None);
    }

    #[test]
    fn test_remove_short() {
        let mut translator = AddressTranslator::new();
        let h = translator.translate_to_hardware(ShortAddress::new(9)).unwrap();
        assert!(translator.remove_short(ShortAddress::new(9)).is_some());
        assert_eq!(translator.short_for(h), None);
    }

    #[test]
    fn test_exhaustion_leaves_table_unchanged() {
        let config = TranslatorConfig {
            short_pool_start: 10,
            short_pool_end: 11,
            ..TranslatorConfig::default()
        };
        let mut translator = AddressTranslator::with_config(&config).unwrap();
        translator.translate_to_short(HardwareAddress::from_u64(0xa1)).unwrap();
        translator.translate_to_short(HardwareAddress::from_u64(0xa2)).unwrap();

        let before: Vec<TranslationRecord> = translator.records().collect();
        let result = translator.translate_to_short(HardwareAddress::from_u64(0xa3));
        assert_eq!(
            result,
            Err(TranslationError::AddressSpaceExhausted { domain: AddressDomain::Short })
        );
        let after: Vec<TranslationRecord> = translator.records().collect();
        assert_eq!(before, after);
        assert_eq!(translator.short_for(HardwareAddress::from_u64(0xa3)), None);

        // Freeing one slot makes allocation possible again
        translator.remove(HardwareAddress::from_u64(0xa1));
        assert!(translator.translate_to_short(HardwareAddress::from_u64(0xa3)).is_ok());
    }

    #[test]
    fn test_full_default_pool_holds_255_records() {
        let mut translator = AddressTranslator::new();
        for i in 0..255u64 {
            translator.translate_to_short(HardwareAddress::from_u64(0x5000 + i)).unwrap();
        }
        assert_eq!(translator.len(), 255);
        assert!(translator.translate_to_short(HardwareAddress::from_u64(0x6000)).is_err());
        assert!(translator.short_for(HardwareAddress::BROADCAST).is_some());
    }

    #[test]
    fn test_with_config_rejects_invalid_pool() {
        let config = TranslatorConfig {
            short_pool_start: 20,
            short_pool_end: 10,
            ..TranslatorConfig::default()
        };
        assert!(AddressTranslator::with_config(&config).is_err());
    }
}
