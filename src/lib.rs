pub mod config;
pub mod decimal;
pub mod errors;
pub mod format;
pub mod interest;
pub mod ledger;
pub mod rates;
pub mod report;
pub mod store;
pub mod types;

// re-export key types
pub use config::AdatConfig;
pub use decimal::{Money, Rate};
pub use errors::{AdatError, Result};
pub use interest::{accrue_period, AccrualEngine, AccrualRow, AccrualSchedule, PeriodSummary};
pub use ledger::{read_ledger, LedgerFormat};
pub use rates::{RateTable, DEFAULT_RATES};
pub use report::{AdatReport, ReportFormat, ReportMetadata};
pub use store::{JsonFileStore, MemoryStore, RateStore};
pub use types::{AccrualPeriod, LedgerEntry};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
