use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::rates::RateTable;
use crate::types::LedgerEntry;

/// one accrual line derived from a ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    pub date: NaiveDate,
    pub debit: Money,
    pub credit: Money,
    pub period_end: NaiveDate,
    pub days_to_period_end: i64,
    /// debit x days (adat)
    pub debit_day_sum: Money,
    /// credit x days (adat)
    pub credit_day_sum: Money,
    pub month: u32,
    pub month_rate: Rate,
    pub debit_interest: Money,
    pub credit_interest: Money,
}

/// period totals, summed from unrounded row values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodSummary {
    pub total_debit: Money,
    pub total_credit: Money,
    pub total_debit_interest: Money,
    pub total_credit_interest: Money,
    pub net_accrual: Money,
}

impl PeriodSummary {
    pub fn from_rows(rows: &[AccrualRow]) -> Self {
        let mut summary = PeriodSummary::default();
        for row in rows {
            summary.total_debit += row.debit;
            summary.total_credit += row.credit;
            summary.total_debit_interest += row.debit_interest;
            summary.total_credit_interest += row.credit_interest;
        }
        summary.net_accrual = summary.total_debit_interest - summary.total_credit_interest;
        summary
    }
}

/// rows in date order plus their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSchedule {
    pub period_end: NaiveDate,
    pub rows: Vec<AccrualRow>,
    pub summary: PeriodSummary,
}

/// simple daily-balance interest on each entry up to the period end,
/// at the rate of the entry's own month over a fixed 365-day year
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine;

impl AccrualEngine {
    pub fn new() -> Self {
        Self
    }

    /// accrue every entry to `period_end`
    pub fn compute(
        &self,
        entries: &[LedgerEntry],
        rates: &RateTable,
        period_end: NaiveDate,
    ) -> Result<AccrualSchedule> {
        for entry in entries {
            entry.validate()?;
        }

        let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
        // stable: same-day entries keep input order
        ordered.sort_by_key(|entry| entry.date);

        let rows = ordered
            .into_iter()
            .map(|entry| self.accrue_entry(entry, rates, period_end))
            .collect::<Result<Vec<_>>>()?;

        let summary = PeriodSummary::from_rows(&rows);
        log::debug!(
            "accrued {} entries to {}: net {}",
            rows.len(),
            period_end,
            summary.net_accrual
        );

        Ok(AccrualSchedule {
            period_end,
            rows,
            summary,
        })
    }

    /// accrual for a single entry
    pub fn accrue_entry(
        &self,
        entry: &LedgerEntry,
        rates: &RateTable,
        period_end: NaiveDate,
    ) -> Result<AccrualRow> {
        let days = (period_end - entry.date).num_days();
        let month = entry.month();
        let month_rate = rates.rate_for(month)?;

        let debit_day_sum = entry.debit.day_weighted(days);
        let credit_day_sum = entry.credit.day_weighted(days);

        Ok(AccrualRow {
            date: entry.date,
            debit: entry.debit,
            credit: entry.credit,
            period_end,
            days_to_period_end: days,
            debit_day_sum,
            credit_day_sum,
            month,
            month_rate,
            debit_interest: Money::interest_on_day_sum(debit_day_sum, month_rate),
            credit_interest: Money::interest_on_day_sum(credit_day_sum, month_rate),
        })
    }
}
