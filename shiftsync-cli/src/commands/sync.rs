use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use shiftsync_core::ShiftEntity;
use shiftsync_core::aggregate::{AggregateOptions, Aggregation, aggregate};
use shiftsync_core::reconcile::{ReconcileReport, reconcile};
use shiftsync_core::remote::CalendarApi;
use shiftsync_core::source::SnapshotSource;
use shiftsync_provider_google::GoogleCalendar;

use crate::config::{Settings, expand_path};
use crate::render::{Render, pluralize};
use crate::utils::tui::create_spinner;

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Schedule snapshot (JSON) written by the browser driver
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Calendar that receives the shifts (created if missing)
    #[arg(short, long)]
    pub calendar_name: Option<String>,

    /// Number of months to collect, starting with the one shown first
    #[arg(short, long)]
    pub months: Option<usize>,

    /// Collect and print shifts without touching the calendar
    #[arg(long)]
    pub dry_run: bool,

    /// Google account whose session is used
    #[arg(short, long)]
    pub account: Option<String>,
}

/// Fully resolved options for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub snapshot: PathBuf,
    pub calendar_name: String,
    pub months: usize,
    pub dry_run: bool,
    /// Always set unless `dry_run`.
    pub account: Option<String>,
}

impl SyncOptions {
    /// Account to connect before collecting, `None` on a dry run.
    pub fn connect_account(&self) -> Option<&str> {
        if self.dry_run {
            None
        } else {
            self.account.as_deref()
        }
    }
}

impl SyncArgs {
    /// Merge flags over settings; flags win.
    pub fn resolve(self, settings: &Settings) -> Result<SyncOptions> {
        let snapshot = self
            .snapshot
            .map(|p| expand_path(&p))
            .or_else(|| settings.snapshot_path())
            .context(
                "No schedule snapshot given.\n\
                Pass --snapshot <FILE> or set `snapshot` in the config file.",
            )?;

        let months = self.months.unwrap_or(settings.months);
        if months == 0 {
            anyhow::bail!("--months must be at least 1");
        }

        let account = self.account.or_else(|| settings.google_account.clone());
        if account.is_none() && !self.dry_run {
            anyhow::bail!(
                "No Google account configured.\n\n\
                Connect one with:\n  \
                shiftsync auth\n\n\
                then pass --account <EMAIL> or set `google_account` in the config file."
            );
        }

        Ok(SyncOptions {
            snapshot,
            calendar_name: self
                .calendar_name
                .unwrap_or_else(|| settings.calendar_name.clone()),
            months,
            dry_run: self.dry_run,
            account,
        })
    }
}

/// What a run did once the shifts were collected.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Nothing parsed; the calendar was not contacted.
    NoShifts,
    /// Shifts printed only.
    DryRun,
    Reconciled(ReconcileReport),
}

pub async fn run(options: SyncOptions) -> Result<()> {
    // Credentials are checked before the schedule is read
    let calendar = match options.connect_account() {
        Some(account) => Some(GoogleCalendar::connect(account).await?),
        None => None,
    };

    let aggregation = collect(&options.snapshot, options.months).await?;

    apply(calendar.as_ref(), &options.calendar_name, &aggregation.shifts).await?;
    Ok(())
}

/// Load the snapshot, aggregate its views and print what was found.
pub async fn collect(snapshot: &Path, months: usize) -> Result<Aggregation> {
    let mut source = SnapshotSource::load(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;

    let spinner = create_spinner("Collecting shifts".to_string());
    let aggregation = aggregate(
        &mut source,
        &AggregateOptions {
            months,
            ..Default::default()
        },
    )
    .await;
    spinner.finish_and_clear();

    let shift_count = aggregation.shifts.len();
    let view_count = aggregation.views.len();
    println!(
        "Found {} {} across {} {}",
        shift_count,
        pluralize("shift", shift_count),
        view_count,
        pluralize("view", view_count)
    );
    for shift in &aggregation.shifts {
        println!("   {}", shift.render());
    }

    Ok(aggregation)
}

/// Reconcile `shifts` into the calendar named `calendar_name`.
/// `None` for `calendar` is a dry run.
pub async fn apply<A: CalendarApi>(
    calendar: Option<&A>,
    calendar_name: &str,
    shifts: &[ShiftEntity],
) -> Result<SyncOutcome> {
    if shifts.is_empty() {
        println!(
            "{}",
            "No shifts found. The snapshot was likely not parsed correctly; calendar left untouched."
                .yellow()
        );
        return Ok(SyncOutcome::NoShifts);
    }

    let Some(calendar) = calendar else {
        println!("\n{}", "Dry run: calendar left untouched.".dimmed());
        return Ok(SyncOutcome::DryRun);
    };

    println!("\n📅 {}", calendar_name);

    let calendar_id = calendar
        .find_or_create_calendar(calendar_name)
        .await
        .with_context(|| format!("Failed to open calendar '{}'", calendar_name))?;

    let spinner = create_spinner("Syncing".to_string());
    let report = reconcile(calendar, &calendar_id, shifts).await;
    spinner.finish_and_clear();

    for shift_report in report.iter() {
        println!("   {}", shift_report.render());
    }
    println!("\n{}", report.counts().render());

    Ok(SyncOutcome::Reconciled(report))
}
