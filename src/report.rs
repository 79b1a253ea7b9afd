//! report rendering for accrual schedules
use std::io::Write;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::errors::Result;
use crate::format::{format_date, format_money, format_money_or_blank, format_rate};
use crate::interest::{AccrualRow, AccrualSchedule, PeriodSummary};
use crate::types::AccrualPeriod;

const DETAIL_HEADERS: [&str; 9] = [
    "Tarih",
    "Borç",
    "Alacak",
    "Sonraki_Tarih",
    "Gün_Sayısı",
    "Ay",
    "Faiz_Oranı",
    "Borç_Faiz",
    "Alacak_Faiz",
];

const SUMMARY_HEADERS: [&str; 5] = [
    "Borç Toplamı",
    "Alacak Toplamı",
    "Borç Faiz Toplamı",
    "Alacak Faiz Toplamı",
    "Net Adat Tutarı (Borç - Alacak)",
];

/// output encoding for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// delimited text: header block, detail table, period summary
    Csv,
    /// pretty json with the unrounded schedule
    Json,
}

/// labels printed around the numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub summary_title: String,
    pub period: AccrualPeriod,
    pub preparer: Option<String>,
}

impl ReportMetadata {
    pub fn from_config(config: &ReportConfig, period: AccrualPeriod) -> Self {
        Self {
            title: config.title.clone(),
            summary_title: config.summary_title.clone(),
            period,
            preparer: config.preparer.clone(),
        }
    }
}

/// one detail line as shown; zero amounts are blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRowView {
    pub date: String,
    pub debit: String,
    pub credit: String,
    pub period_end: String,
    pub days: String,
    pub month: String,
    pub rate: String,
    pub debit_interest: String,
    pub credit_interest: String,
}

impl DetailRowView {
    pub fn from_row(row: &AccrualRow) -> Self {
        Self {
            date: format_date(row.date),
            debit: format_money_or_blank(row.debit),
            credit: format_money_or_blank(row.credit),
            period_end: format_date(row.period_end),
            days: row.days_to_period_end.to_string(),
            month: row.month.to_string(),
            rate: format_rate(row.month_rate),
            debit_interest: format_money_or_blank(row.debit_interest),
            credit_interest: format_money_or_blank(row.credit_interest),
        }
    }

    fn fields(&self) -> [&str; 9] {
        [
            &self.date,
            &self.debit,
            &self.credit,
            &self.period_end,
            &self.days,
            &self.month,
            &self.rate,
            &self.debit_interest,
            &self.credit_interest,
        ]
    }
}

/// period totals as shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub total_debit: String,
    pub total_credit: String,
    pub total_debit_interest: String,
    pub total_credit_interest: String,
    pub net_accrual: String,
}

impl SummaryView {
    pub fn from_summary(summary: &PeriodSummary) -> Self {
        Self {
            total_debit: format_money(summary.total_debit),
            total_credit: format_money(summary.total_credit),
            total_debit_interest: format_money(summary.total_debit_interest),
            total_credit_interest: format_money(summary.total_credit_interest),
            net_accrual: format_money(summary.net_accrual),
        }
    }

    fn fields(&self) -> [&str; 5] {
        [
            &self.total_debit,
            &self.total_credit,
            &self.total_debit_interest,
            &self.total_credit_interest,
            &self.net_accrual,
        ]
    }
}

/// a computed schedule with its labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdatReport {
    pub metadata: ReportMetadata,
    pub schedule: AccrualSchedule,
}

impl AdatReport {
    pub fn new(metadata: ReportMetadata, schedule: AccrualSchedule) -> Self {
        Self { metadata, schedule }
    }

    pub fn detail_rows(&self) -> Vec<DetailRowView> {
        self.schedule.rows.iter().map(DetailRowView::from_row).collect()
    }

    pub fn summary(&self) -> SummaryView {
        SummaryView::from_summary(&self.schedule.summary)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// write the delimited report: header block, detail table, summary
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(writer);

        let meta = &self.metadata;
        wtr.write_record([meta.title.as_str()])?;
        wtr.write_record(["Dönem Başlangıç:", format_date(meta.period.start).as_str()])?;
        wtr.write_record(["Dönem Bitiş:", format_date(meta.period.end).as_str()])?;

        wtr.write_record(DETAIL_HEADERS)?;
        for row in self.detail_rows() {
            wtr.write_record(row.fields())?;
        }

        wtr.write_record([meta.summary_title.as_str()])?;
        wtr.write_record(SUMMARY_HEADERS)?;
        wtr.write_record(self.summary().fields())?;

        if let Some(preparer) = &meta.preparer {
            wtr.write_record(["Hazırlayan:", preparer.as_str()])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// render fully into memory so nothing is written when rendering fails
    pub fn render(&self, format: ReportFormat, delimiter: u8) -> Result<Vec<u8>> {
        match format {
            ReportFormat::Json => Ok(self.to_json_pretty()?.into_bytes()),
            ReportFormat::Csv => {
                let mut buf = Vec::new();
                self.write_csv(&mut buf, delimiter)?;
                Ok(buf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::interest::AccrualEngine;
    use crate::rates::RateTable;
    use crate::types::LedgerEntry;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_report(preparer: Option<&str>) -> AdatReport {
        let entries = vec![
            LedgerEntry::debit(date(2025, 1, 10), Money::from_major(1_000)),
            LedgerEntry::credit(date(2025, 3, 1), Money::from_major(2_500)),
        ];
        let period = AccrualPeriod::new(date(2025, 1, 1), date(2025, 9, 30)).unwrap();
        let schedule = AccrualEngine::new()
            .compute(&entries, &RateTable::defaults(), period.end)
            .unwrap();
        let config = ReportConfig {
            preparer: preparer.map(str::to_string),
            ..ReportConfig::default()
        };
        AdatReport::new(ReportMetadata::from_config(&config, period), schedule)
    }

    #[test]
    fn test_detail_rows_blank_zeros() {
        let report = sample_report(None);
        let rows = report.detail_rows();

        assert_eq!(rows[0].date, "10.01.2025");
        assert_eq!(rows[0].debit, "1.000,00");
        assert_eq!(rows[0].credit, "");
        assert_eq!(rows[0].period_end, "30.09.2025");
        assert_eq!(rows[0].days, "263");
        assert_eq!(rows[0].rate, "49,25");
        assert_eq!(rows[0].debit_interest, "354,87");
        assert_eq!(rows[0].credit_interest, "");

        assert_eq!(rows[1].debit, "");
        assert_eq!(rows[1].credit, "2.500,00");
        assert_eq!(rows[1].debit_interest, "");
    }

    #[test]
    fn test_summary_view() {
        let report = sample_report(None);
        let summary = report.summary();
        // 2500 * 213 * 44.25 / 36500 = 645.5650...
        assert_eq!(summary.total_debit, "1.000,00");
        assert_eq!(summary.total_credit, "2.500,00");
        assert_eq!(summary.total_debit_interest, "354,87");
        assert_eq!(summary.total_credit_interest, "645,57");
        assert_eq!(summary.net_accrual, "-290,70");
    }

    #[test]
    fn test_csv_sections() {
        let report = sample_report(Some("Muhasebe"));
        let bytes = report.render(ReportFormat::Csv, b';').unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ORTAKLAR CARİ HESAP ADAT HESAPLAMA RAPORU");
        assert_eq!(lines[1], "Dönem Başlangıç:;01.01.2025");
        assert_eq!(lines[2], "Dönem Bitiş:;30.09.2025");
        assert!(lines[3].starts_with("Tarih;Borç;Alacak;Sonraki_Tarih"));
        assert_eq!(lines[4], "10.01.2025;1.000,00;;30.09.2025;263;1;49,25;354,87;");
        assert_eq!(lines[6], "DÖNEM ÖZETİ");
        assert_eq!(lines[8], "1.000,00;2.500,00;354,87;645,57;-290,70");
        assert_eq!(lines[9], "Hazırlayan:;Muhasebe");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_csv_without_preparer() {
        let report = sample_report(None);
        let text = String::from_utf8(report.render(ReportFormat::Csv, b';').unwrap()).unwrap();
        assert!(!text.contains("Hazırlayan"));
    }

    #[test]
    fn test_json_keeps_unrounded_values() {
        let report = sample_report(None);
        let json = report.to_json_pretty().unwrap();
        let parsed: AdatReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(json.contains("\"days_to_period_end\": 263"));
    }
}
