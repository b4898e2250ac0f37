//! Action Plan CLI Application
//!
//! This is the command-line interface for the action plan tracker.
//! It uses the action-plan-engine library and adds:
//! - Registering, editing and deleting action items
//! - Item tables filtered by area, status and planned week
//! - Cumulative progress curve
//! - Status summary and most-overdue list

use action_plan_engine::{
    area_status_counts, derive_alert, derive_status, items_in_week, most_overdue, parse_date_strict,
    parse_status_label, progress_curve, status_counts, ActionItem, EngineConfig, ItemEdit, Locale,
    RecordStore, Status, StatusEngine, Summary, WeekWindow,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};
use report::{ItemRow, SummaryReport};

/// Action Plan - Track action items and their status
#[derive(Parser, Debug)]
#[command(name = "action-plan")]
#[command(about = "Track project action items, their status and progress", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the record store (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Reference date used instead of today (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_name = "DATE")]
    today: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Display language for status labels: pt-br or en
    #[arg(long, value_parser = config::parse_locale)]
    locale: Option<Locale>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new action item
    Add(ItemFields),

    /// Edit an existing action item (empty values clear a field)
    Update {
        id: u64,
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Delete an action item
    Remove { id: u64 },

    /// Show the tracking table
    List {
        /// Only items of this area
        #[arg(long)]
        area: Option<String>,

        /// Only items with this status (any language)
        #[arg(long)]
        status: Option<String>,
    },

    /// Classify a single set of dates without touching the store
    Classify {
        #[arg(long, value_name = "DATE")]
        planned_start: Option<String>,
        #[arg(long, value_name = "DATE")]
        planned_end: Option<String>,
        #[arg(long, value_name = "DATE")]
        actual_start: Option<String>,
        #[arg(long, value_name = "DATE")]
        actual_end: Option<String>,
    },

    /// Show the cumulative progress curve
    Progress {
        #[arg(long)]
        area: Option<String>,
    },

    /// Show headline figures and status distribution
    Summary,

    /// Show items planned to start in a given week
    Week {
        #[arg(value_enum, default_value = "current")]
        window: Window,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Window {
    Previous,
    Current,
    Next,
}

impl From<Window> for WeekWindow {
    fn from(window: Window) -> Self {
        match window {
            Window::Previous => WeekWindow::Previous,
            Window::Current => WeekWindow::Current,
            Window::Next => WeekWindow::Next,
        }
    }
}

/// Item fields shared by `add` and `update`
#[derive(ClapArgs, Debug, Default)]
struct ItemFields {
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    action: Option<String>,
    #[arg(long)]
    impact: Option<String>,
    #[arg(long)]
    responsible: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, value_name = "DATE")]
    planned_start: Option<String>,
    #[arg(long, value_name = "DATE")]
    planned_end: Option<String>,
    #[arg(long, value_name = "DATE")]
    actual_start: Option<String>,
    #[arg(long, value_name = "DATE")]
    actual_end: Option<String>,
    #[arg(long, value_name = "DATE")]
    rescheduled_start: Option<String>,
    #[arg(long, value_name = "DATE")]
    rescheduled_end: Option<String>,
    /// Pin the status manually (e.g. "Concluída"); empty clears the pin
    #[arg(long)]
    status: Option<String>,
}

impl ItemFields {
    fn into_edit(self) -> Result<ItemEdit> {
        Ok(ItemEdit {
            area: self.area,
            location: self.location,
            action: self.action,
            impact: self.impact,
            responsible: self.responsible,
            notes: self.notes,
            planned_start: date_arg(self.planned_start.as_deref())?,
            planned_end: date_arg(self.planned_end.as_deref())?,
            actual_start: date_arg(self.actual_start.as_deref())?,
            actual_end: date_arg(self.actual_end.as_deref())?,
            rescheduled_start: date_arg(self.rescheduled_start.as_deref())?,
            rescheduled_end: date_arg(self.rescheduled_end.as_deref())?,
            manual_status_override: self
                .status
                .as_deref()
                .map(parse_status_label)
                .transpose()?,
        })
    }

    fn into_item(self) -> Result<ActionItem> {
        let edit = self.into_edit()?;
        Ok(ActionItem {
            area: edit.area.unwrap_or_default(),
            location: edit.location.unwrap_or_default(),
            action: edit.action.unwrap_or_default(),
            impact: edit.impact.unwrap_or_default(),
            responsible: edit.responsible.unwrap_or_default(),
            notes: edit.notes.unwrap_or_default(),
            planned_start: edit.planned_start.flatten(),
            planned_end: edit.planned_end.flatten(),
            actual_start: edit.actual_start.flatten(),
            actual_end: edit.actual_end.flatten(),
            rescheduled_start: edit.rescheduled_start.flatten(),
            rescheduled_end: edit.rescheduled_end.flatten(),
            manual_status_override: edit.manual_status_override.flatten(),
            ..ActionItem::default()
        })
    }
}

/// Parse an optional date argument; an empty value means "clear"
fn date_arg(value: Option<&str>) -> Result<Option<Option<NaiveDate>>> {
    match value {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(Some(None)),
        Some(text) => Ok(Some(Some(parse_date_strict(text)?))),
    }
}

/// Settings after merging the config file with command-line overrides
struct Settings {
    store_path: PathBuf,
    engine: EngineConfig,
    format: OutputFormat,
    locale: Locale,
    reference: NaiveDate,
}

impl Settings {
    fn resolve(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                log::info!("Loading configuration from: {:?}", path);
                config::load_config(path)?
            }
            None => AppConfig::default(),
        };

        let reference = match &args.today {
            Some(text) => parse_date_strict(text).context("Invalid --today value")?,
            None => chrono::Local::now().date_naive(),
        };

        Ok(Self {
            store_path: args.store.clone().unwrap_or(file.store.path),
            engine: file.engine,
            format: args.format.unwrap_or(file.output.format),
            locale: args.locale.unwrap_or(file.output.locale),
            reference,
        })
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Action Plan CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using engine library v{}", action_plan_engine::VERSION);

    let settings = Settings::resolve(&args)?;
    log::debug!("Reference date: {}", settings.reference);

    let output = run(args.command, &settings)?;
    print!("{}", output);
    Ok(())
}

/// Execute a command and return what should be printed
fn run(command: Command, settings: &Settings) -> Result<String> {
    let engine = StatusEngine::with_config(settings.engine.clone());
    let today = settings.reference;
    let locale = settings.locale;

    match command {
        Command::Classify {
            planned_start,
            planned_end,
            actual_start,
            actual_end,
        } => classify(
            settings,
            [planned_start, planned_end, actual_start, actual_end],
        ),
        Command::Add(fields) => with_store(settings, true, |store| {
            let id = store.insert(fields.into_item()?, today);
            let status = store.get(id).map(|item| item.status).unwrap_or(Status::Undetermined);
            Ok(format!("✓ Registered #{} ({})\n", id, locale.label(status)))
        }),
        Command::Update { id, fields } => with_store(settings, true, |store| {
            let status = store.update(id, fields.into_edit()?, today)?.status;
            Ok(format!("✓ Updated #{} ({})\n", id, locale.label(status)))
        }),
        Command::Remove { id } => with_store(settings, true, |store| {
            store.remove(id)?;
            Ok(format!("✓ Removed #{}\n", id))
        }),
        Command::List { area, status } => with_store(settings, false, |store| {
            let wanted = status.as_deref().map(parse_status_label).transpose()?.flatten();
            let rows: Vec<ItemRow> = store
                .items()
                .iter()
                .filter(|item| area.as_ref().map_or(true, |area| &item.area == area))
                .filter(|item| wanted.map_or(true, |wanted| item.status == wanted))
                .map(|item| ItemRow::new(item, engine.assess(item, today)))
                .collect();
            report::render_items(&rows, settings.format, locale)
        }),
        Command::Progress { area } => with_store(settings, false, |store| {
            let items: Vec<ActionItem> = match &area {
                Some(area) => store.filter_area(area).into_iter().cloned().collect(),
                None => store.items().to_vec(),
            };
            let curve = progress_curve(&items, today);
            report::render_progress(curve.as_ref(), today, settings.format)
        }),
        Command::Summary => with_store(settings, false, |store| {
            let items = store.items();
            let report = SummaryReport {
                reference: today,
                summary: Summary::from_items(items),
                by_status: status_counts(items),
                by_area: area_status_counts(items),
                most_overdue: most_overdue(items, settings.engine.overdue_limit),
            };
            report::render_summary(&report, settings.format, locale)
        }),
        Command::Week { window } => with_store(settings, false, |store| {
            let rows: Vec<ItemRow> = items_in_week(store.items(), window.into(), today)
                .into_iter()
                .map(|item| ItemRow::new(item, engine.assess(item, today)))
                .collect();
            report::render_items(&rows, settings.format, locale)
        }),
    }
}

/// Derive status and alert for dates given on the command line
fn classify(settings: &Settings, dates: [Option<String>; 4]) -> Result<String> {
    let mut parsed = [None; 4];
    for (slot, value) in parsed.iter_mut().zip(&dates) {
        *slot = date_arg(value.as_deref())?.flatten();
    }
    let [planned_start, planned_end, actual_start, actual_end] = parsed;

    let today = settings.reference;
    let status = derive_status(today, planned_start, planned_end, actual_start, actual_end);
    let alert = derive_alert(status, planned_end, today, settings.engine.due_soon_days);

    Ok(match settings.format {
        OutputFormat::Json => format!("{}\n", serde_json::json!({ "status": status, "alert": alert })),
        OutputFormat::Txt => {
            let alert_label = settings.locale.alert_label(alert);
            if alert_label.is_empty() {
                format!("{}\n", settings.locale.label(status))
            } else {
                format!("{} {}\n", settings.locale.label(status), alert_label)
            }
        }
    })
}

/// Load the store, bring statuses up to date, run `f`, and save if asked to
fn with_store<F>(settings: &Settings, save: bool, f: F) -> Result<String>
where
    F: FnOnce(&mut RecordStore) -> Result<String>,
{
    let path = &settings.store_path;
    let mut store = RecordStore::load(path)
        .with_context(|| format!("Failed to load record store: {:?}", path))?;

    let changed = store.refresh(settings.reference);
    if changed > 0 {
        log::info!("{} record(s) changed status as of {}", changed, settings.reference);
    }

    let output = f(&mut store)?;

    if save {
        store
            .save(path)
            .with_context(|| format!("Failed to save record store: {:?}", path))?;
    }
    Ok(output)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
