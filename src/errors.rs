use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdatError {
    #[error("invalid interest rate for month {month}: {rate}")]
    InvalidRate {
        month: u32,
        rate: Decimal,
    },

    #[error("invalid month: {month} (expected 1..=12)")]
    InvalidMonth {
        month: u32,
    },

    #[error("no interest rate configured for month {month}")]
    MissingRate {
        month: u32,
    },

    #[error("malformed input: {message}")]
    MalformedInput {
        message: String,
    },

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("rate store content is corrupt: {0}")]
    StoreFormat(#[from] serde_json::Error),

    #[error("report error: {0}")]
    Report(#[from] csv::Error),
}

impl AdatError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        AdatError::MalformedInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdatError>;
