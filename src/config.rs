//! Configuration structures for the translator, traffic generator and CLI.
//!
//! Every section has defaults, so an empty YAML document is a valid
//! configuration.

use crate::address::HardwareAddress;
use crate::scenario::Step;
use serde::{Deserialize, Serialize};

/// Log levels accepted by `general.log_level`
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Top-level configuration that mirrors the YAML file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// Synthetic traffic to push through a bridge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<TrafficConfig>,
    /// Scripted translator operations, replayed in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.general.validate()?;
        self.translator.validate()?;
        if let Some(traffic) = &self.traffic {
            traffic.validate()?;
        }
        Ok(())
    }

    /// Log level to use when RUST_LOG is not set
    pub fn log_level(&self) -> &str {
        self.general.log_level.as_deref().unwrap_or("info")
    }
}

/// General settings
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ValidationError::InvalidGeneral(format!(
                    "unknown log_level '{}', expected one of {:?}",
                    level, LOG_LEVELS
                )));
            }
        }
        Ok(())
    }
}

/// Address allocation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// First short address handed out (inclusive)
    pub short_pool_start: u8,
    /// Last short address handed out (inclusive); 255 is broadcast
    pub short_pool_end: u8,
    /// First placeholder for short addresses first seen on the acoustic side
    pub first_hardware_address: HardwareAddress,
}

impl TranslatorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.short_pool_start > self.short_pool_end {
            return Err(ValidationError::InvalidTranslator(format!(
                "short_pool_start ({}) is greater than short_pool_end ({})",
                self.short_pool_start, self.short_pool_end
            )));
        }
        if self.short_pool_end == u8::MAX {
            return Err(ValidationError::InvalidTranslator(
                "short pool cannot include the broadcast address 255".to_string(),
            ));
        }
        if self.first_hardware_address.is_broadcast() || self.first_hardware_address.to_u64() == 0 {
            return Err(ValidationError::InvalidTranslator(format!(
                "first_hardware_address {} is reserved",
                self.first_hardware_address
            )));
        }
        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            short_pool_start: 0,
            short_pool_end: 254,
            first_hardware_address: HardwareAddress::from_u64(1),
        }
    }
}

/// Random traffic generation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    pub seed: u64,
    /// Number of hardware stations attached to the bridge
    pub stations: usize,
    /// Number of frames to generate
    pub frames: usize,
    /// Chance that an outbound frame is broadcast
    pub broadcast_probability: f64,
    /// Chance that a frame arrives from the acoustic side
    pub inbound_probability: f64,
    /// Chance, per frame, that a random station detaches
    pub detach_probability: f64,
}

impl TrafficConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stations == 0 {
            return Err(ValidationError::InvalidTraffic(
                "stations must be at least 1".to_string(),
            ));
        }
        let probabilities = [
            ("broadcast_probability", self.broadcast_probability),
            ("inbound_probability", self.inbound_probability),
            ("detach_probability", self.detach_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidTraffic(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stations: 8,
            frames: 1000,
            broadcast_probability: 0.1,
            inbound_probability: 0.4,
            detach_probability: 0.01,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid translator configuration: {0}")]
    InvalidTranslator(String),
    #[error("Invalid traffic configuration: {0}")]
    InvalidTraffic(String),
}
