use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{AdatError, Result};

/// built-in annual rates (%) by month. january and february carry the
/// rate in force before the march change.
pub const DEFAULT_RATES: [(u32, Decimal); 12] = [
    (1, dec!(49.25)),
    (2, dec!(49.25)),
    (3, dec!(44.25)),
    (4, dec!(44.25)),
    (5, dec!(44.25)),
    (6, dec!(44.25)),
    (7, dec!(44.25)),
    (8, dec!(44.25)),
    (9, dec!(44.25)),
    (10, dec!(44.25)),
    (11, dec!(44.25)),
    (12, dec!(44.25)),
];

/// check that a month number is within 1..=12
pub fn check_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(AdatError::InvalidMonth { month })
    }
}

/// default rate for a month
pub fn default_rate(month: u32) -> Result<Rate> {
    let month = check_month(month)?;
    DEFAULT_RATES
        .iter()
        .find(|(m, _)| *m == month)
        .map(|(_, r)| Rate::from_percentage(*r))
        .ok_or(AdatError::MissingRate { month })
}

/// annual interest rate per calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<u32, Rate>,
}

impl RateTable {
    /// table holding the built-in defaults for all twelve months
    pub fn defaults() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .map(|(month, rate)| (*month, Rate::from_percentage(*rate)))
            .collect();
        Self { rates }
    }

    /// build a complete table from partial overrides; months without an
    /// override keep their default
    pub fn with_overrides<I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, Rate)>,
    {
        let mut table = Self::defaults();
        for (month, rate) in overrides {
            table = table.edit(month, rate)?;
        }
        Ok(table)
    }

    /// rate for a month
    pub fn rate_for(&self, month: u32) -> Result<Rate> {
        self.rates
            .get(&month)
            .copied()
            .ok_or(AdatError::MissingRate { month })
    }

    /// new table with one month changed
    pub fn edit(&self, month: u32, rate: Rate) -> Result<Self> {
        let month = check_month(month)?;
        if rate.is_negative() {
            return Err(AdatError::InvalidRate {
                month,
                rate: rate.as_percentage(),
            });
        }

        let mut rates = self.rates.clone();
        rates.insert(month, rate);
        Ok(Self { rates })
    }

    /// new table with one month back at its default
    pub fn reset(&self, month: u32) -> Result<Self> {
        self.edit(month, default_rate(month)?)
    }

    /// (month, rate) pairs in month order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Rate)> + '_ {
        self.rates.iter().map(|(m, r)| (*m, *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::defaults()
    }
}
