//! User settings for Bankbook
//!
//! Display preferences and ledger engine limits, stored as JSON next to the
//! ledger file.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// User settings for Bankbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of transactions shown on a receipt
    #[serde(default = "default_receipt_transactions")]
    pub receipt_transactions: usize,

    /// Upper bound on random draws when generating an account number
    #[serde(default = "default_max_account_number_attempts")]
    pub max_account_number_attempts: u32,

    /// Whether successful mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

/// Settings layout written by this version
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_receipt_transactions() -> usize {
    5
}

fn default_max_account_number_attempts() -> u32 {
    1000
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            receipt_transactions: default_receipt_transactions(),
            max_account_number_attempts: default_max_account_number_attempts(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    ///
    /// Failing to write the defaults is not fatal; the defaults are still
    /// returned.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            if let Err(e) = settings.save(paths) {
                warn!(path = %settings_path.display(), error = %e, "could not write default settings");
            }
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.schema_version > SETTINGS_SCHEMA_VERSION {
            return Err(LedgerError::Config(format!(
                "Settings file uses schema version {}, but this build only understands up to {}",
                settings.schema_version, SETTINGS_SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
