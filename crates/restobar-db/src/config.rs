//! # Runtime Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RESTOBAR_*`)
//! 2. Defaults (this file)
//!
//! Read-only after loading, so it is shared by reference without locking.

use restobar_core::money::CURRENCY_SYMBOL;
use restobar_core::{Money, DEFAULT_TABLE_COUNT, UNASSIGNED_WAITER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Restaurant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestobarConfig {
    /// SQLite file holding the collections.
    pub database_path: PathBuf,

    /// Size of the floor served before any table list is stored.
    pub table_count: u32,

    /// Symbol printed in front of amounts.
    pub currency_symbol: String,

    /// Waiter name recorded when an order is taken without one.
    pub unassigned_waiter: String,
}

impl Default for RestobarConfig {
    fn default() -> Self {
        RestobarConfig {
            database_path: PathBuf::from("./restobar.db"),
            table_count: DEFAULT_TABLE_COUNT,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            unassigned_waiter: UNASSIGNED_WAITER.to_string(),
        }
    }
}

impl RestobarConfig {
    /// Defaults overridden by the process environment.
    ///
    /// ## Environment Variables
    /// - `RESTOBAR_DB_PATH`: database file
    /// - `RESTOBAR_TABLE_COUNT`: default floor size (positive integer)
    /// - `RESTOBAR_CURRENCY_SYMBOL`: e.g. `Bs`
    /// - `RESTOBAR_UNASSIGNED_WAITER`: waiter name used when none is given
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = RestobarConfig::default();

        if let Some(path) = lookup("RESTOBAR_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Some(count) = lookup("RESTOBAR_TABLE_COUNT") {
            match count.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.table_count = n,
                _ => warn!(value = %count, "Ignoring invalid RESTOBAR_TABLE_COUNT"),
            }
        }

        if let Some(symbol) = lookup("RESTOBAR_CURRENCY_SYMBOL") {
            let symbol = symbol.trim();
            if !symbol.is_empty() {
                config.currency_symbol = symbol.to_string();
            }
        }

        if let Some(waiter) = lookup("RESTOBAR_UNASSIGNED_WAITER") {
            let waiter = waiter.trim();
            if !waiter.is_empty() {
                config.unassigned_waiter = waiter.to_string();
            }
        }

        config
    }

    /// Formats an amount with the configured symbol.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}
