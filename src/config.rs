use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{AdatError, Result};
use crate::ledger::LedgerFormat;

/// default location of the persisted monthly rates
pub const DEFAULT_RATES_PATH: &str = "faiz_oranlari.json";

/// application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdatConfig {
    /// json file holding the monthly rates
    pub rates_path: PathBuf,
    pub report: ReportConfig,
    pub ledger: LedgerConfig,
}

/// static labels printed on reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub summary_title: String,
    pub preparer: Option<String>,
}

/// ledger file dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub delimiter: char,
    pub has_headers: bool,
}

impl Default for AdatConfig {
    fn default() -> Self {
        Self {
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            report: ReportConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "ORTAKLAR CARİ HESAP ADAT HESAPLAMA RAPORU".to_string(),
            summary_title: "DÖNEM ÖZETİ".to_string(),
            preparer: None,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            has_headers: true,
        }
    }
}

impl LedgerConfig {
    /// csv dialect; the delimiter must be a single-byte character
    pub fn format(&self) -> Result<LedgerFormat> {
        if !self.delimiter.is_ascii() {
            return Err(AdatError::malformed(format!(
                "ledger delimiter {:?} is not an ascii character",
                self.delimiter
            )));
        }
        Ok(LedgerFormat {
            delimiter: self.delimiter as u8,
            has_headers: self.has_headers,
        })
    }
}

impl AdatConfig {
    /// load settings from a json file; fields left out keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: AdatConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// like `load`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(AdatError::Storage(e)) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "settings file {} not found, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }
}
