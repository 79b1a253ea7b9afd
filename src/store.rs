use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use rust_decimal::Decimal;
use serde_json::Number;

use crate::decimal::Rate;
use crate::errors::{AdatError, Result};
use crate::rates::RateTable;

/// persisted form: string month -> numeric rate
type RateDocument = BTreeMap<String, Number>;

/// where rate tables are persisted between runs
pub trait RateStore {
    /// read the persisted table; months missing from storage take their
    /// defaults, and absent storage yields the default table
    fn load(&self) -> Result<RateTable>;

    /// overwrite storage with the full table
    fn save(&self, table: &RateTable) -> Result<()>;

    /// replace whatever is stored with the default table. never reads the
    /// current contents, so an unreadable document can still be reset.
    fn reset_all(&self) -> Result<RateTable> {
        let table = RateTable::defaults();
        self.save(&table)?;
        Ok(table)
    }
}

/// decode a persisted document into a complete table
pub fn decode_rates(raw: &str) -> Result<RateTable> {
    let document: RateDocument = serde_json::from_str(raw)?;

    let mut overrides = Vec::with_capacity(document.len());
    for (key, value) in document {
        let month = match key.trim().parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => m,
            _ => {
                log::warn!("ignoring rate store key {:?}: not a month number", key);
                continue;
            }
        };
        let rate = number_to_decimal(&value).ok_or_else(|| AdatError::MalformedInput {
            message: format!("rate for month {} is not a decimal: {}", month, value),
        })?;
        overrides.push((month, Rate::from_percentage(rate)));
    }

    RateTable::with_overrides(overrides)
}

/// encode a table as the persisted document
pub fn encode_rates(table: &RateTable) -> Result<String> {
    let mut document = RateDocument::new();
    for (month, rate) in table.iter() {
        // written from the decimal text so no digits are lost
        let value = Number::from_str(&rate.as_percentage().normalize().to_string())?;
        document.insert(month.to_string(), value);
    }
    Ok(serde_json::to_string_pretty(&document)?)
}

fn number_to_decimal(value: &Number) -> Option<Decimal> {
    let text = value.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// json file holding `{"1": 49.25, "2": 49.25, ...}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateStore for JsonFileStore {
    fn load(&self) -> Result<RateTable> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "rate file {} not found, using default rates",
                    self.path.display()
                );
                return Ok(RateTable::defaults());
            }
            Err(e) => return Err(AdatError::Storage(e)),
        };

        let table = decode_rates(&raw)?;
        log::info!("loaded rates from {}", self.path.display());
        Ok(table)
    }

    fn save(&self, table: &RateTable) -> Result<()> {
        let encoded = encode_rates(table)?;
        fs::write(&self.path, encoded)?;
        log::info!("saved rates to {}", self.path.display());
        Ok(())
    }
}

/// in-process store; goes through the same document encoding as the file store
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// store pre-seeded with a raw document
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(raw.into())),
        }
    }

    /// the raw persisted document, if any
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl RateStore for MemoryStore {
    fn load(&self) -> Result<RateTable> {
        match self.document() {
            Some(raw) => decode_rates(&raw),
            None => Ok(RateTable::defaults()),
        }
    }

    fn save(&self, table: &RateTable) -> Result<()> {
        let encoded = encode_rates(table)?;
        let mut guard = self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(encoded);
        Ok(())
    }
}
