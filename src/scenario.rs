//! Scripted and synthetic workloads for the translator.
//!
//! Scripted steps exercise the translator directly and record every result,
//! including failures. Synthetic traffic pushes seeded random frames through a
//! [`Bridge`] so the drop policy and table churn can be observed.

use crate::address::{HardwareAddress, ShortAddress};
use crate::bridge::{Bridge, BridgeStats, EthernetFrame, UanFrame};
use crate::config::TrafficConfig;
use crate::translator::{AddressTranslator, TranslationRecord};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const ETHERTYPE_IPV4: u16 = 0x0800;

/// One scripted translator operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    ToShort { to_short: HardwareAddress },
    ToHardware { to_hardware: ShortAddress },
    Remove { remove: HardwareAddress },
}

/// Result of replaying one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    /// Translated address, for translation steps that succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of records after the step
    pub records: usize,
}

/// Everything the CLI prints at the end of a run
#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
    pub records: Vec<TranslationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic: Option<TrafficReport>,
}

#[derive(Debug, Serialize)]
pub struct TrafficReport {
    pub stats: BridgeStats,
    pub records: Vec<TranslationRecord>,
}

/// Replay `steps` against `translator`, one outcome per step
pub fn run_scenario(translator: &mut AddressTranslator, steps: &[Step]) -> Vec<StepOutcome> {
    steps
        .iter()
        .map(|step| {
            let (address, error) = match step {
                Step::ToShort { to_short } => match translator.translate_to_short(*to_short) {
                    Ok(short) => (Some(short.to_string()), None),
                    Err(e) => (None, Some(e.to_string())),
                },
                Step::ToHardware { to_hardware } => match translator.translate_to_hardware(*to_hardware) {
                    Ok(hardware) => (Some(hardware.to_string()), None),
                    Err(e) => (None, Some(e.to_string())),
                },
                Step::Remove { remove } => {
                    translator.remove(*remove);
                    (None, None)
                }
            };
            debug!("Step {:?}: address={:?} error={:?}", step, address, error);
            StepOutcome {
                step: step.clone(),
                address,
                error,
                records: translator.len(),
            }
        })
        .collect()
}

/// Push seeded random traffic through `bridge`
pub fn generate_traffic(bridge: &mut Bridge, config: &TrafficConfig) -> BridgeStats {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let stations: Vec<HardwareAddress> = (0..config.stations).map(|_| random_station(&mut rng)).collect();

    info!(
        "Generating {} frames across {} stations (seed {})",
        config.frames, stations.len(), config.seed
    );

    for _ in 0..config.frames {
        if rng.gen_bool(config.detach_probability) {
            let station = stations[rng.gen_range(0..stations.len())];
            debug!("Station {} detached", station);
            bridge.detach(station);
        }

        let payload_len = rng.gen_range(0..64);
        let payload: Vec<u8> = (0..payload_len).map(|_| rng.gen()).collect();

        if rng.gen_bool(config.inbound_probability) {
            let sender = stations[rng.gen_range(0..stations.len())];
            let source = bridge
                .translator()
                .short_for(sender)
                .unwrap_or_else(|| ShortAddress::new(rng.gen_range(0..u8::MAX)));
            let receiver = stations[rng.gen_range(0..stations.len())];
            let destination = bridge
                .translator()
                .short_for(receiver)
                .unwrap_or(ShortAddress::BROADCAST);
            bridge.inbound(UanFrame {
                source,
                destination,
                protocol: ETHERTYPE_IPV4,
                payload,
            });
        } else {
            let source = stations[rng.gen_range(0..stations.len())];
            let destination = if rng.gen_bool(config.broadcast_probability) {
                HardwareAddress::BROADCAST
            } else {
                stations[rng.gen_range(0..stations.len())]
            };
            bridge.outbound(EthernetFrame {
                source,
                destination,
                ether_type: ETHERTYPE_IPV4,
                payload,
            });
        }
    }

    let stats = bridge.stats();
    info!(
        "Traffic done: {} out, {} in, {} dropped, {} records",
        stats.forwarded_out,
        stats.forwarded_in,
        stats.dropped,
        bridge.translator().len()
    );
    stats
}

/// Random locally administered unicast address
fn random_station(rng: &mut StdRng) -> HardwareAddress {
    let mut octets: [u8; 6] = rng.gen();
    octets[0] = (octets[0] & 0xfc) | 0x02;
    HardwareAddress::new(octets)
}
