// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! soltime - civil and solar clock
//!
//! Shows the current civil and solar time, converts between the four time
//! representations, and prints the equation of time.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use soltime::reading::UNAVAILABLE_TEXT;
use soltime::{
    driver, equation_of_time, ClockConfig, ClockMode, ClockSnapshot, Entry, FrameTime,
    GeoCoordinate, LocationUpdate, Meridiem, Reading, SolarClock, SpaSunriseSunset, SunTimes,
    TimeConverter, TimeRepresentationKind,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// soltime - civil and solar clock
#[derive(Parser, Debug)]
#[command(name = "soltime")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Latitude in degrees (overrides the configuration)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude in degrees, east positive (overrides the configuration)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Render hh:mm on a 24-hour clock
    #[arg(long = "24h")]
    twenty_four_hour: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current civil and solar time once
    Now,

    /// Keep printing the clock on every metric unit until Ctrl-C
    Watch,

    /// Convert a time typed as digits into all four representations
    Convert {
        /// Representation of the typed digits
        #[arg(value_enum)]
        kind: KindArg,

        /// Up to four digits, e.g. 930 for 9:30 or 5000 for metric noon
        digits: String,

        /// The typed hh:mm is after noon (12-hour clock only)
        #[arg(long)]
        pm: bool,

        /// Date of the conversion (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the equation of time
    Eot {
        /// Date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Hour of the day, 0-23
        #[arg(long, default_value = "12")]
        hour: u32,
    },
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum KindArg {
    CivilHhmm,
    CivilMetric,
    SolarHhmm,
    SolarMetric,
}

impl From<KindArg> for TimeRepresentationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::CivilHhmm => Self::CivilHhmm,
            KindArg::CivilMetric => Self::CivilMetric,
            KindArg::SolarHhmm => Self::SolarHhmm,
            KindArg::SolarMetric => Self::SolarMetric,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => ClockConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClockConfig::default(),
    };
    if cli.twenty_four_hour {
        config.clock_mode = ClockMode::TwentyFourHour;
    }
    let location = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(GeoCoordinate::new(lat, lon)?),
        _ => config.location()?,
    };

    match cli.command {
        Commands::Now => now(&config, location),
        Commands::Watch => watch(&config, location).await,
        Commands::Convert {
            kind,
            digits,
            pm,
            date,
        } => convert(&config, location, kind.into(), &digits, pm, date),
        Commands::Eot { date, hour } => eot(date, hour),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now(config: &ClockConfig, location: Option<GeoCoordinate>) -> Result<()> {
    let mut clock = SolarClock::new(Local, SpaSunriseSunset);
    if let Some(location) = location {
        clock = clock.with_location(location);
    }
    print_snapshot(clock.tick(), config.clock_mode);
    Ok(())
}

async fn watch(config: &ClockConfig, location: Option<GeoCoordinate>) -> Result<()> {
    let clock = SolarClock::new(Local, SpaSunriseSunset);
    let handle = driver::spawn(clock, config.tick_interval());

    let update = location.map_or(LocationUpdate::Unavailable, LocationUpdate::Fix);
    handle
        .locations()
        .send(update)
        .await
        .context("clock task stopped")?;

    let mut snapshots = handle.subscribe();
    let mut last_unit = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = snapshots.borrow_and_update().clone();
                let unit = snap.civil.metric;
                if last_unit != Some(unit) {
                    last_unit = Some(unit);
                    print_snapshot(&snap, config.clock_mode);
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn convert(
    config: &ClockConfig,
    location: Option<GeoCoordinate>,
    kind: TimeRepresentationKind,
    digits: &str,
    pm: bool,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut entry = Entry::new(kind);
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else {
            bail!("not a digit: {c:?}");
        };
        if !entry.push_digit(digit as u8) {
            bail!("at most four digits can be entered");
        }
    }
    if pm {
        entry.set_meridiem(Meridiem::Pm);
    }

    let mode = config.clock_mode;
    let date = date.unwrap_or_else(today);
    let result =
        TimeConverter::new(Local).convert_entry(&entry, mode, date, location.as_ref())?;

    for kind in TimeRepresentationKind::ALL {
        println!("{:<13} {}", kind.to_string(), result.render(kind, mode));
    }
    println!("{:<13} {}", "delta", result.delta);
    Ok(())
}

fn eot(date: Option<NaiveDate>, hour: u32) -> Result<()> {
    if hour > 23 {
        bail!("hour must be 0-23, got {hour}");
    }
    let date = date.unwrap_or_else(today);
    let minutes = equation_of_time(date, hour)?;
    println!("{date} {hour:02}:00  {:+.2} min", minutes.value());
    Ok(())
}

fn print_snapshot<Tz: TimeZone>(snap: &ClockSnapshot<Tz>, mode: ClockMode) {
    println!(
        "civil  {}  {}  {:>3}%  {}",
        snap.civil.clock.display(mode),
        snap.civil.metric,
        snap.civil.metric.percent_of_day(),
        render_sun(&snap.civil_sun, mode),
    );
    match &snap.solar {
        Reading::Value(solar) => println!(
            "solar  {}  {}  {:>3}%  {}  ({})",
            solar.now.clock.display(mode),
            solar.now.metric,
            solar.now.metric.percent_of_day(),
            render_sun(&solar.sun, mode),
            solar.delta,
        ),
        Reading::Unavailable(why) => println!("solar  {UNAVAILABLE_TEXT}  ({why})"),
    }
}

fn render_sun<Tz: TimeZone>(sun: &Reading<SunTimes<FrameTime<Tz>>>, mode: ClockMode) -> String {
    let frame = |t: FrameTime<Tz>| format!("{} {}", t.clock.display(mode), t.metric);
    match sun {
        Reading::Value(times) => {
            let times = times.clone().map(frame);
            format!("sunrise {}  sunset {}", times.sunrise, times.sunset)
        }
        Reading::Unavailable(_) => format!("sunrise {UNAVAILABLE_TEXT}  sunset {UNAVAILABLE_TEXT}"),
    }
}
