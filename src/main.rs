use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use adat_rs::format::format_rate;
use adat_rs::ledger::parse_date;
use adat_rs::{
    accrue_period, read_ledger, AccrualPeriod, AdatConfig, AdatReport, Decimal, JsonFileStore,
    Rate, RateStore, ReportFormat, ReportMetadata,
};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

const MONTH_NAMES: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "adat", version, about = "Daily-balance (adat) interest accrual for ledger entries")]
struct Cli {
    /// Settings file (json)
    #[arg(long, global = true, default_value = "adat.json")]
    config: PathBuf,

    /// Monthly rate file; overrides the settings file
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Accrue interest for a ledger file and write the report
    Compute {
        /// Ledger file with three columns: date, debit, credit
        #[arg(short = 'l', long)]
        ledger: PathBuf,

        /// Period start (dd.mm.yyyy or yyyy-mm-dd)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        /// Period end (dd.mm.yyyy or yyyy-mm-dd)
        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// Output file (default stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Name printed as the report preparer
        #[arg(long)]
        preparer: Option<String>,
    },
    /// Show or edit the monthly rate table
    Rates {
        #[command(subcommand)]
        action: RatesAction,
    },
}

#[derive(Subcommand, Debug)]
enum RatesAction {
    /// Print the rate for every month
    Show,
    /// Set one month's rate and save
    Set {
        /// Month number 1..12
        month: u32,
        /// Annual rate in percent, e.g. 44.25
        rate: String,
    },
    /// Restore defaults for one month, or all months when none given, and save
    Reset { month: Option<u32> },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AdatConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    if let Some(rates) = cli.rates {
        config.rates_path = rates;
    }
    let store = JsonFileStore::new(&config.rates_path);

    match cli.command {
        Command::Compute {
            ledger,
            start,
            end,
            output,
            format,
            preparer,
        } => {
            if preparer.is_some() {
                config.report.preparer = preparer;
            }
            compute(&config, &store, &ledger, start, end, output, format.into())
        }
        Command::Rates { action } => rates(&store, action),
    }
}

fn compute(
    config: &AdatConfig,
    store: &JsonFileStore,
    ledger: &Path,
    start: NaiveDate,
    end: NaiveDate,
    output: Option<PathBuf>,
    format: ReportFormat,
) -> Result<()> {
    let period = AccrualPeriod::new(start, end)?;
    let rates = store
        .load()
        .with_context(|| format!("loading rates from {}", store.path().display()))?;

    let ledger_format = config.ledger.format()?;
    let file = File::open(ledger).with_context(|| format!("opening {}", ledger.display()))?;
    let entries = read_ledger(BufReader::new(file), ledger_format)
        .with_context(|| format!("reading {}", ledger.display()))?;

    let schedule = accrue_period(&entries, &rates, &period)?;
    log::info!(
        "accrued {} entries for {} - {}",
        schedule.rows.len(),
        period.start,
        period.end
    );

    let report = AdatReport::new(ReportMetadata::from_config(&config.report, period), schedule);
    let bytes = report.render(format, ledger_format.delimiter)?;

    match output {
        Some(path) => {
            fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            log::info!("report written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn rates(store: &JsonFileStore, action: RatesAction) -> Result<()> {
    let table = match action {
        RatesAction::Show => store.load()?,
        RatesAction::Set { month, rate } => {
            let rate = Decimal::from_str(&rate.replace(',', "."))
                .map_err(|e| anyhow!("invalid rate {rate:?}: {e}"))?;
            let table = store.load()?.edit(month, Rate::from_percentage(rate))?;
            store.save(&table)?;
            table
        }
        RatesAction::Reset { month: Some(month) } => {
            let table = store.load()?.reset(month)?;
            store.save(&table)?;
            table
        }
        // a full reset must work even when the stored file cannot be read
        RatesAction::Reset { month: None } => store.reset_all()?,
    };

    for (month, rate) in table.iter() {
        let name = MONTH_NAMES[(month - 1) as usize];
        println!("{:>2} {:<8} {:>7}", month, name, format_rate(rate));
    }
    Ok(())
}
