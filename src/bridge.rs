//! Frame re-addressing between the tap side and the acoustic network.
//!
//! Frames leaving a virtual machine carry hardware addresses and must be
//! re-addressed with short addresses before they go out on the acoustic
//! channel; frames arriving from the channel are re-addressed the other way
//! before delivery. Payloads are carried through untouched.
//!
//! A frame whose addresses cannot be translated is dropped and counted. It is
//! never treated as fatal to the simulation.

use crate::address::{HardwareAddress, ShortAddress};
use crate::translator::{AddressTranslator, TranslationError};
use log::{trace, warn};
use serde::Serialize;

/// A frame as seen on the tap (hardware) side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub source: HardwareAddress,
    pub destination: HardwareAddress,
    pub ether_type: u16,
    pub payload: Vec<u8>,
}

/// A frame as carried on the acoustic (short address) side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UanFrame {
    pub source: ShortAddress,
    pub destination: ShortAddress,
    pub protocol: u16,
    pub payload: Vec<u8>,
}

/// Frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BridgeStats {
    pub forwarded_out: u64,
    pub forwarded_in: u64,
    pub dropped: u64,
}

#[derive(Debug, Default)]
pub struct Bridge {
    translator: AddressTranslator,
    stats: BridgeStats,
}

impl Bridge {
    pub fn new(translator: AddressTranslator) -> Self {
        Bridge {
            translator,
            stats: BridgeStats::default(),
        }
    }

    /// Re-address a frame heading onto the acoustic network.
    ///
    /// Returns `None` when the frame had to be dropped.
    pub fn outbound(&mut self, frame: EthernetFrame) -> Option<UanFrame> {
        match self.readdress_outbound(&frame) {
            Ok((source, destination)) => {
                self.stats.forwarded_out += 1;
                trace!("Outbound {} -> {} as {} -> {}", frame.source, frame.destination, source, destination);
                Some(UanFrame {
                    source,
                    destination,
                    protocol: frame.ether_type,
                    payload: frame.payload,
                })
            }
            Err(e) => {
                self.stats.dropped += 1;
                warn!("Dropping outbound frame {} -> {}: {}", frame.source, frame.destination, e);
                None
            }
        }
    }

    /// Re-address a frame arriving from the acoustic network.
    ///
    /// Returns `None` when the frame had to be dropped.
    pub fn inbound(&mut self, frame: UanFrame) -> Option<EthernetFrame> {
        match self.readdress_inbound(&frame) {
            Ok((source, destination)) => {
                self.stats.forwarded_in += 1;
                trace!("Inbound {} -> {} as {} -> {}", frame.source, frame.destination, source, destination);
                Some(EthernetFrame {
                    source,
                    destination,
                    ether_type: frame.protocol,
                    payload: frame.payload,
                })
            }
            Err(e) => {
                self.stats.dropped += 1;
                warn!("Dropping inbound frame {} -> {}: {}", frame.source, frame.destination, e);
                None
            }
        }
    }

    /// Forget a station that left the tap side
    pub fn detach(&mut self, station: HardwareAddress) {
        self.translator.remove(station);
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    pub fn translator(&self) -> &AddressTranslator {
        &self.translator
    }

    fn readdress_outbound(&mut self, frame: &EthernetFrame) -> Result<(ShortAddress, ShortAddress), TranslationError> {
        let source = self.translator.translate_to_short(frame.source)?;
        let destination = self.translator.translate_to_short(frame.destination)?;
        Ok((source, destination))
    }

    fn readdress_inbound(&mut self, frame: &UanFrame) -> Result<(HardwareAddress, HardwareAddress), TranslationError> {
        let source = self.translator.translate_to_hardware(frame.source)?;
        let destination = self.translator.translate_to_hardware(frame.destination)?;
        Ok((source, destination))
    }
}
