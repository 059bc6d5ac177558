// ==========================================
// 考试日程查询工具 - 命令行入口
// ==========================================
// 子命令: lookup / calendar / settings
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use exam_track::api::{ScheduleRow, ScheduleView};
use exam_track::app::{get_default_db_path, AppState};
use exam_track::domain::SearchQuery;
use exam_track::engine::{MonthGrid, YearMonth};
use exam_track::export::{IcsExporter, TimetableExporter};
use exam_track::{i18n, logging, APP_NAME, VERSION};

const NOW_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Parser, Debug)]
#[command(author, version, about = "Exam schedule lookup", long_about = None)]
struct Cli {
    /// SQLite database for settings (defaults to EXAM_TRACK_DB or the user data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a student's exam schedule
    Lookup(LookupArgs),
    /// Show a month calendar of a student's exams
    Calendar(CalendarArgs),
    /// Show or change display settings
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
struct StudentArgs {
    /// Dataset file (.json, .csv, .xlsx, .xls)
    #[arg(long)]
    data: PathBuf,

    /// Register number
    #[arg(long)]
    id: String,

    /// Student name (optional secondary filter)
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args, Debug)]
struct LookupArgs {
    #[command(flatten)]
    student: StudentArgs,

    /// Evaluate statuses at this local time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    now: Option<String>,

    /// Write an iCalendar file
    #[arg(long)]
    ics: Option<PathBuf>,

    /// Write the timetable as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print a Google Calendar link for the first dated exam
    #[arg(long)]
    google_link: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CalendarArgs {
    #[command(flatten)]
    student: StudentArgs,

    /// Month to show (YYYY-MM); defaults to the month of the first dated exam
    #[arg(long)]
    month: Option<String>,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    #[arg(long, value_enum)]
    dark_mode: Option<DarkMode>,

    /// Time zone written to exported calendars (e.g. Asia/Kolkata)
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DarkMode {
    On,
    Off,
    Toggle,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let db_path = cli
        .db
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(get_default_db_path);

    tracing::debug!("{} v{}，数据库: {}", APP_NAME, VERSION, db_path);

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;

    match cli.command {
        Command::Lookup(args) => run_lookup(&state, args),
        Command::Calendar(args) => run_calendar(&state, args),
        Command::Settings(args) => run_settings(&state, args),
    }
}

fn load_schedule(state: &AppState, student: &StudentArgs) -> Result<ScheduleView> {
    state
        .load_dataset(&student.data)
        .with_context(|| format!("failed to load dataset {}", student.data.display()))?;

    let mut query = SearchQuery::by_identifier(student.id.clone());
    if let Some(name) = &student.name {
        query = query.with_name(name.clone());
    }

    Ok(state.lookup(&query)?)
}

fn run_lookup(state: &AppState, args: LookupArgs) -> Result<()> {
    let now = match &args.now {
        Some(raw) => NaiveDateTime::parse_from_str(raw, NOW_FORMAT)
            .with_context(|| format!("invalid --now value '{}', expected YYYY-MM-DDTHH:MM", raw))?,
        None => Local::now().naive_local(),
    };

    let view = load_schedule(state, &args.student)?;
    let classifier = state.status_classifier()?;
    let rows = state.schedule_api.annotate(&view, &classifier, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_schedule(&view, &rows);
    }

    if let Some(path) = &args.ics {
        state
            .ics_exporter()?
            .write_to(path, &view.entries, &view.identity, Utc::now())
            .with_context(|| format!("failed to write {}", path.display()))?;
        let shown = path.display().to_string();
        println!(
            "{}",
            i18n::t_with_args("export.ics_saved", &[("path", shown.as_str())])
        );
    }

    if args.google_link {
        match state.google_calendar_link(&view.entries)? {
            Some(url) => println!(
                "{}",
                i18n::t_with_args("export.google_link", &[("url", url.as_str())])
            ),
            None => println!("{}", i18n::t("export.google_link_unavailable")),
        }
    }

    if let Some(path) = &args.csv {
        TimetableExporter::new()
            .write_to(path, &view.entries, &view.identity)
            .with_context(|| format!("failed to write {}", path.display()))?;
        let shown = path.display().to_string();
        println!(
            "{}",
            i18n::t_with_args("export.csv_saved", &[("path", shown.as_str())])
        );
    }

    if args.ics.is_none() && args.csv.is_none() && !args.json {
        println!(
            "\nExport with --ics {} or --csv {}",
            IcsExporter::file_name(&view.identity),
            TimetableExporter::file_name(&view.identity)
        );
    }

    Ok(())
}

fn print_schedule(view: &ScheduleView, rows: &[ScheduleRow]) {
    println!("{} ({})", view.identity.name, view.identity.register_number);
    println!("{}", "=".repeat(72));

    let (upcoming, completed): (Vec<&ScheduleRow>, Vec<&ScheduleRow>) = rows
        .iter()
        .partition(|row| row.status != exam_track::ExamStatus::Finished);

    for row in &upcoming {
        print_row(row);
    }

    if !completed.is_empty() {
        println!("\n{}", i18n::t("schedule.completed"));
        println!("{}", "-".repeat(72));
        for row in &completed {
            print_row(row);
        }
    }
}

fn print_row(row: &ScheduleRow) {
    let entry = &row.entry;
    let date = exam_track::export::format_display_date(entry);
    let window = row.session_label.as_deref().unwrap_or("");

    println!(
        "[{}] {}  {} {}  {} - {} ({})  {}",
        i18n::status_label(row.status),
        date,
        entry.session,
        window,
        entry.subject_code,
        entry.subject_name,
        entry.category,
        entry.location
    );

    if let Some(remaining) = &row.time_remaining {
        println!("      {}", remaining);
    }
    if let Some(gap) = row.gap_days.filter(|g| *g > 0) {
        let days = gap.to_string();
        println!(
            "      {}",
            i18n::t_with_args("schedule.gap_days", &[("days", days.as_str())])
        );
    }
}

fn run_calendar(state: &AppState, args: CalendarArgs) -> Result<()> {
    let view = load_schedule(state, &args.student)?;

    let month = match &args.month {
        Some(raw) => match YearMonth::parse(raw) {
            Some(m) => m,
            None => bail!("invalid --month value '{}', expected YYYY-MM", raw),
        },
        None => view
            .entries
            .iter()
            .find_map(|e| e.calendar_date())
            .map(YearMonth::of)
            .unwrap_or_else(|| YearMonth::of(Local::now().date_naive())),
    };

    let grid = MonthGrid::build(&view.entries, month);
    let today = Local::now().date_naive();

    println!("{} ({})", view.identity.name, view.identity.register_number);
    println!("{:04}-{:02}", month.year, month.month);
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    for week in grid.weeks() {
        let line: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let marker = if grid.is_today(*day, today) {
                        '*'
                    } else if !grid.exams_on(*day).is_empty() {
                        '#'
                    } else {
                        ' '
                    };
                    format!("{:>3}{} ", day, marker)
                }
                None => "     ".to_string(),
            })
            .collect();
        println!("{}", line.join("").trim_end());
    }

    println!();
    for (day, exams) in &grid.exams_by_day {
        for exam in exams {
            println!(
                "{:>2}  {}  {} ({})",
                day, exam.session, exam.subject_name, exam.category
            );
        }
    }

    Ok(())
}

fn run_settings(state: &AppState, args: SettingsArgs) -> Result<()> {
    let api = &state.settings_api;

    if let Some(mode) = args.dark_mode {
        let enabled = match mode {
            DarkMode::On => api.set_dark_mode(true)?.dark_mode,
            DarkMode::Off => api.set_dark_mode(false)?.dark_mode,
            DarkMode::Toggle => api.toggle_dark_mode()?,
        };
        let key = if enabled {
            "settings.dark_mode_on"
        } else {
            "settings.dark_mode_off"
        };
        println!("{}", i18n::t(key));
    }

    if let Some(tz) = &args.timezone {
        let tz = tz.trim();
        if tz.is_empty() {
            bail!("--timezone must not be empty");
        }
        exam_track::export::parse_timezone(tz)
            .with_context(|| format!("unknown timezone {}", tz))?;
        state
            .config_manager
            .set_global_config_value(exam_track::config::config_keys::CALENDAR_TIMEZONE, tz)?;
    }

    let windows = api.get_session_windows()?;
    println!("dark mode : {}", api.get_ui_settings().dark_mode);
    println!("FN        : {}", windows.forenoon.label());
    println!("AN        : {}", windows.afternoon.label());
    println!("timezone  : {}", api.get_calendar_timezone()?);

    Ok(())
}
