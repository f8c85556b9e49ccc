//! `holidaybalance` CLI — annotate vacation entries with running balances.
//!
//! ## Usage
//!
//! ```sh
//! # Compute balances and rewrite the descriptions in the calendar export
//! holidaybalance calendar.json --holiday-calendar ch-holidays.json
//!
//! # Only print the balance lines, leave the export untouched
//! holidaybalance -n calendar.json
//!
//! # Write the annotated events to another file
//! holidaybalance calendar.json -o annotated.json
//! ```
//!
//! The calendar file is an events-list export: `{"items": [...]}` where
//! all-day entries use `start.date`/`end.date`. Entries titled
//! "Employee start date [NN%]" set the employment fraction, entries
//! mentioning "vacation" or "holiday" are deducted.
//!
//! Public holidays are read from the `--holidays` cache. When the cache is
//! missing or unreadable it is rebuilt from `--holiday-calendar`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use balance_engine::{
    fetch_ordered_all_day_markers, run, BalanceError, HolidaySet, MemoryCalendar, RunOptions,
    WriteOutcome,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "holidaybalance",
    version,
    about = "Compute and record vacation balances on calendar entries"
)]
struct Cli {
    /// Events-list export of the employee's calendar
    calendar: PathBuf,

    /// Don't update the calendar entries with new descriptions
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Where to write the updated events (defaults to the input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cached public holidays (JSON object of YYYY-MM-DD to name)
    #[arg(long, default_value = "publicholidays.json")]
    holidays: PathBuf,

    /// Events-list export of the public-holiday calendar, used to rebuild the cache
    #[arg(long)]
    holiday_calendar: Option<PathBuf>,

    /// Region that regional holidays must mention to count
    #[arg(long, default_value = "Zurich")]
    region: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let calendar_id = cli.calendar.display().to_string();

    let mut calendar = read_calendar(&cli.calendar)?;

    let holidays = HolidaySet::load_or_fetch(&cli.holidays, || {
        fetch_public_holidays(cli.holiday_calendar.as_deref(), &cli.region)
    })
    .with_context(|| format!("Failed to load public holidays from {}", cli.holidays.display()))?;
    info!("Got {} public holidays", holidays.len());

    let markers = fetch_ordered_all_day_markers(&calendar, &calendar_id)
        .with_context(|| format!("Failed to get events from {}", calendar_id))?;
    let (Some(first), Some(last)) = (
        markers.first().map(|m| m.start),
        markers.iter().map(|m| m.end).max(),
    ) else {
        anyhow::bail!("No events from {:?}", calendar_id);
    };
    info!(
        "Got {} all-day events, from {} to {}",
        markers.len(),
        first,
        last
    );

    let report = run(
        &markers,
        &holidays,
        &mut calendar,
        RunOptions {
            dry_run: cli.dry_run,
        },
    )?;

    for annotated in &report.entries {
        println!("{}", annotated.line);
    }
    if let Some(projection) = &report.projection {
        println!("{}", projection);
    }

    let updated = report
        .entries
        .iter()
        .any(|e| e.outcome == WriteOutcome::Updated);
    if updated {
        let output = cli.output.as_deref().unwrap_or(&cli.calendar);
        let json = calendar.to_json()?;
        std::fs::write(output, json + "\n")
            .with_context(|| format!("Failed to write file: {}", output.display()))?;
        info!("Saved updated events to {}", output.display());
    }
    if report.failed_writes() > 0 {
        tracing::warn!("{} events could not be updated", report.failed_writes());
    }

    Ok(())
}

fn read_calendar(path: &Path) -> Result<MemoryCalendar> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    MemoryCalendar::from_json(&json)
        .with_context(|| format!("Failed to parse events from {}", path.display()))
}

fn fetch_public_holidays(
    path: Option<&Path>,
    region: &str,
) -> balance_engine::error::Result<HolidaySet> {
    let path = path.ok_or_else(|| {
        BalanceError::Calendar("no --holiday-calendar given to rebuild the cache".to_string())
    })?;
    let json = std::fs::read_to_string(path)?;
    let calendar = MemoryCalendar::from_json(&json)?;
    let markers = fetch_ordered_all_day_markers(&calendar, &path.display().to_string())?;
    Ok(HolidaySet::from_calendar(&markers, region))
}
