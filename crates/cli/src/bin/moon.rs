use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use lunar_cycle::config::{EngineConfig, load_engine_config, load_engine_config_or_default};
use lunar_cycle::engine::{GeoCoordinate, MoonEngine, RotationSpeed, parse_calendar_date};
use lunar_cycle::export::{self, json as export_json, table as export_table};

#[path = "moon/render.rs"]
mod render;

const DEFAULT_CONFIG_PATH: &str = "configs/engine.toml";

/// Lunar phase, rise/set and date-navigation calculator.
#[derive(Parser)]
#[command(author, version, about = "Lunar cycle calculator")]
struct Cli {
    /// Engine configuration (TOML or YAML); defaults to configs/engine.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Phase, illumination, distance, rise/set and next phase for one date
    Observe {
        /// Calendar date (YYYY-MM-DD); defaults to today (UTC)
        date: Option<String>,
        #[command(flatten)]
        observer: ObserverArgs,
    },
    /// One observation per day between two dates, inclusive
    Range {
        /// First date (YYYY-MM-DD)
        start: String,
        /// Last date (YYYY-MM-DD)
        end: String,
        /// Also write a CSV table to this path ('-' for stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Date reached by turning the dial from a base date
    Navigate {
        /// Base date (YYYY-MM-DD)
        date: String,
        /// Rotation in degrees; 30 degrees is one step
        #[arg(allow_negative_numbers = true)]
        angle: f64,
        /// Step size: slow = 1 day, fast = 7 days (defaults to config)
        #[arg(long)]
        speed: Option<RotationSpeed>,
        #[command(flatten)]
        observer: ObserverArgs,
    },
    /// Symmetric ribbon of day/month labels around a date
    Arc {
        /// Centre date (YYYY-MM-DD)
        date: String,
        /// Days between labels: 1, 3, 7 or 30 (defaults to config)
        #[arg(long)]
        interval: Option<u32>,
        /// Number of labels either side is half of this (defaults to config)
        #[arg(long)]
        count: Option<u32>,
    },
}

#[derive(clap::Args)]
struct ObserverArgs {
    /// Observer latitude in degrees, north positive
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let engine = MoonEngine::from_config(&config);
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Command::Observe { date, observer } => {
            let date = match date {
                Some(date) => parse_calendar_date(date)?,
                None => lunar_cycle::time::today(),
            };
            let observer = resolve_observer(observer, &config)?;
            let observation = engine.observe_date(date, observer)?;
            if cli.json {
                export_json::write_pretty(&mut out, &observation)?;
            } else {
                render::observation(&mut out, &observation, observer.as_ref())?;
            }
        }
        Command::Range { start, end, csv } => {
            let start = parse_calendar_date(start)?;
            let end = parse_calendar_date(end)?;
            let observations = engine.compute_range(start, end)?;
            if let Some(path) = csv {
                let rows = render::DayRowStrings::collect(&observations);
                let table: Vec<_> = rows.iter().map(|row| row.as_row()).collect();
                let mut writer = export::writer_for_path(path)
                    .with_context(|| format!("opening {}", path.display()))?;
                export_table::write_rows(writer.as_mut(), &table)?;
                writer.flush()?;
                log::info!("wrote {} rows to {}", table.len(), path.display());
                if path.as_os_str() == "-" {
                    return Ok(());
                }
            }
            if cli.json {
                export_json::write_pretty(&mut out, &observations)?;
            } else {
                render::range(&mut out, &observations)?;
            }
        }
        Command::Navigate {
            date,
            angle,
            speed,
            observer,
        } => {
            let base = parse_calendar_date(date)?;
            let speed = speed.unwrap_or_else(|| RotationSpeed::from(config.navigation.speed));
            let observer = resolve_observer(observer, &config)?;
            let navigation = engine.navigate_and_observe(base, *angle, speed, observer)?;
            if cli.json {
                export_json::write_pretty(&mut out, &navigation)?;
            } else {
                render::navigation(&mut out, &navigation, observer.as_ref())?;
            }
        }
        Command::Arc {
            date,
            interval,
            count,
        } => {
            let center = parse_calendar_date(date)?;
            let arc = engine.generate_date_arc(
                center,
                interval.unwrap_or(config.arc.interval_days),
                count.unwrap_or(config.arc.total_dates),
            )?;
            if cli.json {
                export_json::write_pretty(&mut out, &arc)?;
            } else {
                render::arc(&mut out, &arc)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => load_engine_config(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => load_engine_config_or_default(Some(DEFAULT_CONFIG_PATH))
            .context("loading default configuration"),
    }
}

fn resolve_observer(
    args: &ObserverArgs,
    config: &EngineConfig,
) -> anyhow::Result<Option<GeoCoordinate>> {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Ok(Some(GeoCoordinate::new(lat, lon)?)),
        _ => Ok(config.observer),
    }
}
