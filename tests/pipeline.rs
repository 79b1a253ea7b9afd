use adat_rs::{
    accrue_period, read_ledger, AccrualPeriod, AdatReport, JsonFileStore, LedgerFormat, Money,
    Rate, RateStore, RateTable, ReportFormat, ReportMetadata,
};
use adat_rs::config::ReportConfig;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::tempdir;

const LEDGER: &str = "\
Tarih;Borç;Alacak
15.03.2025;2.500,40;
10.01.2025;1.000,00;
20.01.2025;;800,00
01.06.2025;120,50;75,25
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn ledger_to_report() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("faiz_oranlari.json"));

    // first run: nothing persisted yet
    let rates = store.load().unwrap();
    assert_eq!(rates, RateTable::defaults());

    let rates = rates.edit(6, Rate::from_percentage(dec!(40))).unwrap();
    store.save(&rates).unwrap();
    let rates = store.load().unwrap();

    let entries = read_ledger(LEDGER.as_bytes(), LedgerFormat::default()).unwrap();
    let period = AccrualPeriod::new(date(2025, 1, 1), date(2025, 9, 30)).unwrap();
    let schedule = accrue_period(&entries, &rates, &period).unwrap();

    let dates: Vec<NaiveDate> = schedule.rows.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 1, 10), date(2025, 1, 20), date(2025, 3, 15), date(2025, 6, 1)]
    );

    let june = &schedule.rows[3];
    assert_eq!(june.month_rate.as_percentage(), dec!(40));
    assert_eq!(june.days_to_period_end, 121);
    assert_eq!(june.debit_day_sum, Money::from_decimal(dec!(14580.5)));

    let summary = &schedule.summary;
    assert_eq!(summary.total_debit.as_decimal(), dec!(3620.90));
    assert_eq!(summary.total_credit.as_decimal(), dec!(875.25));
    assert_eq!(
        summary.net_accrual,
        summary.total_debit_interest - summary.total_credit_interest
    );

    let config = ReportConfig {
        preparer: Some("Muhasebe".to_string()),
        ..ReportConfig::default()
    };
    let report = AdatReport::new(ReportMetadata::from_config(&config, period), schedule);

    let csv = String::from_utf8(report.render(ReportFormat::Csv, b';').unwrap()).unwrap();
    assert!(csv.contains("10.01.2025;1.000,00;;30.09.2025;263;1;49,25;354,87;"));
    assert!(csv.contains("01.06.2025;120,50;75,25;30.09.2025;121;6;40,00;15,98;9,98"));
    assert!(csv.contains("3.620,90;875,25;"));

    let json = String::from_utf8(report.render(ReportFormat::Json, b';').unwrap()).unwrap();
    let back: AdatReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
