use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{AdatError, Result};
use crate::types::LedgerEntry;

/// day-first text formats, tried in order; iso dates are accepted too.
/// each carries its separator and the position of the year field.
const DATE_FORMATS: [(&str, char, usize); 4] = [
    ("%d.%m.%Y", '.', 2),
    ("%d/%m/%Y", '/', 2),
    ("%d-%m-%Y", '-', 2),
    ("%Y-%m-%d", '-', 0),
];

/// dialect of the incoming ledger file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerFormat {
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for LedgerFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_headers: true,
        }
    }
}

/// read a three-column ledger (date, debit, credit). columns are taken by
/// position; header names are ignored.
pub fn read_ledger<R: Read>(reader: R, format: LedgerFormat) -> Result<Vec<LedgerEntry>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(format.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| AdatError::malformed(format!("ledger: {e}")))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        entries.push(parse_record(&record, line)?);
    }

    log::debug!("read {} ledger entries", entries.len());
    Ok(entries)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<LedgerEntry> {
    if record.len() != 3 {
        return Err(AdatError::malformed(format!(
            "line {line}: expected 3 columns (date, debit, credit), found {}",
            record.len()
        )));
    }

    let date = parse_date(&record[0])
        .map_err(|e| AdatError::malformed(format!("line {line}: {e}")))?;
    let debit = parse_amount(&record[1])
        .map_err(|e| AdatError::malformed(format!("line {line}: debit {e}")))?;
    let credit = parse_amount(&record[2])
        .map_err(|e| AdatError::malformed(format!("line {line}: credit {e}")))?;

    let entry = LedgerEntry::new(date, debit, credit);
    entry
        .validate()
        .map_err(|e| AdatError::malformed(format!("line {line}: {e}")))?;
    Ok(entry)
}

/// parse a day-first date
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    // spreadsheet exports sometimes carry a time part
    let s = s.split_whitespace().next().unwrap_or(s);

    // chrono's %Y takes any digit count, so "03.02.25" would become year 25
    DATE_FORMATS
        .iter()
        .filter(|(_, sep, year_pos)| has_four_digit_year(s, *sep, *year_pos))
        .find_map(|(fmt, _, _)| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("unparseable date {s:?} (expected dd.mm.yyyy)"))
}

fn has_four_digit_year(s: &str, sep: char, year_pos: usize) -> bool {
    s.split(sep)
        .nth(year_pos)
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

/// parse an amount; blank means zero. "1.234,56", "1234,56" and "1.000"
/// are read as european notation (dots group thousands), anything else
/// as plain decimal.
pub fn parse_amount(s: &str) -> std::result::Result<Money, String> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(Money::ZERO);
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if is_dot_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized)
        .map(Money::from_decimal)
        .map_err(|_| format!("unparseable amount {s:?}"))
}

/// "1.000", "12.345.678": a 1-3 digit head followed by dot-separated
/// groups of exactly three digits
fn is_dot_grouped(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let mut groups = digits.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|head| (1..=3).contains(&head.len()) && head.bytes().all(|b| b.is_ascii_digit()));

    let mut tail_count = 0;
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        tail_count += 1;
    }
    head_ok && tail_count > 0
}
