use std::net::SocketAddr;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::models::{AdherenceSource, ContactValidation};

/// Application-level constants
pub const APP_NAME: &str = "MedTracker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_RECENT_LOG_LIMIT: usize = 4;

/// Environment keys read by [`AppConfig::from_env`].
pub const ENV_BIND_ADDR: &str = "MEDTRACKER_BIND_ADDR";
pub const ENV_TIER_EXCELLENT: &str = "MEDTRACKER_TIER_EXCELLENT";
pub const ENV_TIER_GOOD: &str = "MEDTRACKER_TIER_GOOD";
pub const ENV_ADHERENCE_SOURCE: &str = "MEDTRACKER_ADHERENCE_SOURCE";
pub const ENV_CONTACT_VALIDATION: &str = "MEDTRACKER_CONTACT_VALIDATION";
pub const ENV_RECENT_LOG_LIMIT: &str = "MEDTRACKER_RECENT_LOG_LIMIT";

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medtracker_lib=info,medtracker=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Tier thresholds out of order: good {good} must not exceed excellent {excellent} (max 100)")]
    TierOrder { excellent: u8, good: u8 },
}

/// Lower bounds (inclusive) of the Excellent and Good adherence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierThresholds {
    pub excellent: u8,
    pub good: u8,
}

impl TierThresholds {
    pub fn new(excellent: u8, good: u8) -> Result<Self, ConfigError> {
        if good > excellent || excellent > 100 {
            return Err(ConfigError::TierOrder { excellent, good });
        }
        Ok(Self { excellent, good })
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 80,
        }
    }
}

/// Runtime configuration. Defaults reproduce the stock dashboard;
/// every field can be overridden from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub tiers: TierThresholds,
    /// Which dashboard adherence rate is authoritative.
    pub adherence_source: AdherenceSource,
    pub contact_validation: ContactValidation,
    pub recent_log_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            tiers: TierThresholds::default(),
            adherence_source: AdherenceSource::Derived,
            contact_validation: ContactValidation::Accept,
            recent_log_limit: DEFAULT_RECENT_LOG_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(ENV_BIND_ADDR) {
            Some(v) => parse_value(ENV_BIND_ADDR, &v)?,
            None => defaults.bind_addr,
        };

        let excellent = match get(ENV_TIER_EXCELLENT) {
            Some(v) => parse_value(ENV_TIER_EXCELLENT, &v)?,
            None => defaults.tiers.excellent,
        };
        let good = match get(ENV_TIER_GOOD) {
            Some(v) => parse_value(ENV_TIER_GOOD, &v)?,
            None => defaults.tiers.good,
        };
        let tiers = TierThresholds::new(excellent, good)?;

        let adherence_source = match get(ENV_ADHERENCE_SOURCE) {
            Some(v) => parse_value(ENV_ADHERENCE_SOURCE, &v.to_ascii_lowercase())?,
            None => defaults.adherence_source,
        };
        let contact_validation = match get(ENV_CONTACT_VALIDATION) {
            Some(v) => parse_value(ENV_CONTACT_VALIDATION, &v.to_ascii_lowercase())?,
            None => defaults.contact_validation,
        };

        let recent_log_limit = match get(ENV_RECENT_LOG_LIMIT) {
            Some(v) => parse_value(ENV_RECENT_LOG_LIMIT, &v)?,
            None => defaults.recent_log_limit,
        };

        Ok(Self {
            bind_addr,
            tiers,
            adherence_source,
            contact_validation,
            recent_log_limit,
        })
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
