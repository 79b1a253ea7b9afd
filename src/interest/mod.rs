pub mod accrual;

use crate::errors::Result;
use crate::rates::RateTable;
use crate::types::{AccrualPeriod, LedgerEntry};

pub use accrual::{AccrualEngine, AccrualRow, AccrualSchedule, PeriodSummary};

/// accrue entries over a period; only the period end affects the numbers
pub fn accrue_period(
    entries: &[LedgerEntry],
    rates: &RateTable,
    period: &AccrualPeriod,
) -> Result<AccrualSchedule> {
    AccrualEngine::new().compute(entries, rates, period.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_start_does_not_change_results() {
        let entries = vec![
            LedgerEntry::debit(date(2024, 11, 5), Money::from_major(2_000)),
            LedgerEntry::credit(date(2025, 2, 14), Money::from_major(500)),
        ];
        let rates = RateTable::defaults();

        let wide = AccrualPeriod::new(date(2024, 1, 1), date(2025, 9, 30)).unwrap();
        let narrow = AccrualPeriod::new(date(2025, 9, 1), date(2025, 9, 30)).unwrap();

        assert_eq!(
            accrue_period(&entries, &rates, &wide).unwrap(),
            accrue_period(&entries, &rates, &narrow).unwrap()
        );
    }
}
