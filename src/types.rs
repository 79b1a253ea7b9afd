use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{AdatError, Result};

/// one ledger line: a dated debit and/or credit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub debit: Money,
    pub credit: Money,
}

impl LedgerEntry {
    pub fn new(date: NaiveDate, debit: Money, credit: Money) -> Self {
        Self { date, debit, credit }
    }

    /// debit-only line
    pub fn debit(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, Money::ZERO)
    }

    /// credit-only line
    pub fn credit(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, Money::ZERO, amount)
    }

    /// calendar month of the entry date (1..=12)
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// reject negative amounts
    pub fn validate(&self) -> Result<()> {
        if self.debit.is_negative() || self.credit.is_negative() {
            return Err(AdatError::malformed(format!(
                "negative amount on {}: debit {}, credit {}",
                self.date, self.debit, self.credit
            )));
        }
        Ok(())
    }
}

/// accounting period bounds. only `end` takes part in the day counts;
/// `start` is carried for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AccrualPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AdatError::malformed(format!(
                "period start {} is after period end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }
}
