//! User settings for ledger-cli
//!
//! Stored as `config.json` in the base directory. Every field has a default,
//! so partial or older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// How category titles are compared when resolving a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatching {
    /// Titles must match byte for byte (after trimming)
    #[default]
    Exact,
    /// "Food" and "food" resolve to the same category
    CaseInsensitive,
}

impl CategoryMatching {
    /// Whether two trimmed titles refer to the same category
    pub fn matches(&self, stored: &str, wanted: &str) -> bool {
        match self {
            Self::Exact => stored == wanted,
            Self::CaseInsensitive => stored.to_lowercase() == wanted.to_lowercase(),
        }
    }

    /// Key used to deduplicate titles within one import
    pub fn key(&self, title: &str) -> String {
        match self {
            Self::Exact => title.to_string(),
            Self::CaseInsensitive => title.to_lowercase(),
        }
    }
}

/// What the importer does with a row it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Report the row and import the others
    #[default]
    Skip,
    /// Fail the whole import before anything is written
    Abort,
}

/// CSV import settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImportSettings {
    #[serde(default)]
    pub on_malformed: MalformedRowPolicy,
}

/// User settings for ledger-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Category title comparison policy
    #[serde(default)]
    pub category_matching: CategoryMatching,

    /// CSV import behaviour
    #[serde(default)]
    pub import: ImportSettings,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            category_matching: CategoryMatching::default(),
            import: ImportSettings::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
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
