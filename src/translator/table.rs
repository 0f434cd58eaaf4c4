//! Bidirectional translation table.
//!
//! Both directions live in one type and are only ever changed together, so
//! the forward and reverse maps cannot drift apart.

use crate::address::{HardwareAddress, ShortAddress};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// One hardware <-> short address pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationRecord {
    pub hardware: HardwareAddress,
    pub short: ShortAddress,
}

#[derive(Debug, Default)]
pub struct BiTable {
    /// Hardware -> short
    forward: HashMap<HardwareAddress, ShortAddress>,
    /// Short -> hardware, ordered so records iterate by short address
    reverse: BTreeMap<ShortAddress, HardwareAddress>,
}

impl BiTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pairing whose sides are both unmapped.
    pub fn insert(&mut self, record: TranslationRecord) {
        debug_assert!(!self.forward.contains_key(&record.hardware));
        debug_assert!(!self.reverse.contains_key(&record.short));
        self.forward.insert(record.hardware, record.short);
        self.reverse.insert(record.short, record.hardware);
    }

    pub fn short_for(&self, hardware: &HardwareAddress) -> Option<ShortAddress> {
        self.forward.get(hardware).copied()
    }

    pub fn hardware_for(&self, short: &ShortAddress) -> Option<HardwareAddress> {
        self.reverse.get(short).copied()
    }

    pub fn contains_hardware(&self, hardware: &HardwareAddress) -> bool {
        self.forward.contains_key(hardware)
    }

    pub fn contains_short(&self, short: &ShortAddress) -> bool {
        self.reverse.contains_key(short)
    }

    pub fn remove_hardware(&mut self, hardware: &HardwareAddress) -> Option<TranslationRecord> {
        let short = self.forward.remove(hardware)?;
        self.reverse.remove(&short);
        Some(TranslationRecord { hardware: *hardware, short })
    }

    pub fn remove_short(&mut self, short: &ShortAddress) -> Option<TranslationRecord> {
        let hardware = self.reverse.remove(short)?;
        self.forward.remove(&hardware);
        Some(TranslationRecord { hardware, short: *short })
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.reverse.len());
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Records ordered by short address
    pub fn records(&self) -> impl Iterator<Item = TranslationRecord> + '_ {
        self.reverse
            .iter()
            .map(|(short, hardware)| TranslationRecord { hardware: *hardware, short: *short })
    }
}
