//! Configuration module for recon-engine.

use crate::error::EngineError;
use rust_decimal::Decimal;
use std::env;

/// Tunable policy for a reconciliation run.
///
/// Missing environment variables fall back to defaults; a variable that is
/// present but unparseable is a configuration error.
#[derive(Debug, Clone)]
pub struct EnginePolicy {
    /// Fraction of the credit limit at which a customer account is flagged
    /// near-limit.
    pub near_limit_ratio: Decimal,
    /// Page size used when a ledger page request does not specify one.
    pub default_page_size: i32,
    /// Upper bound on requested ledger page sizes.
    pub max_page_size: i32,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            near_limit_ratio: Decimal::new(8, 1),
            default_page_size: 50,
            max_page_size: 100,
        }
    }
}

impl EnginePolicy {
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();

        Ok(Self {
            near_limit_ratio: read_env("RECON_NEAR_LIMIT_RATIO", defaults.near_limit_ratio)?,
            default_page_size: read_env("RECON_DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            max_page_size: read_env("RECON_MAX_PAGE_SIZE", defaults.max_page_size)?,
        })
    }
}

fn read_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, EngineError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            EngineError::Config(anyhow::anyhow!("{} has invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
