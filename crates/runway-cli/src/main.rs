//! Predict landing runways for one snapshot of arriving traffic.

use anyhow::{Context, Result};
use clap::Parser;
use runway_cli::opensky::{parse_states, OpenSkyClient, Snapshot};
use runway_cli::report::{header_line, render_json, render_table, ReportRow};
use runway_cli::{Config, SnapshotFilter};
use runway_core::{Predictor, RunwayTable, ScoreParams};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Predict which runway each arriving aircraft will land on
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Read an OpenSky `/states/all` JSON payload from a file instead of the network
    #[arg(long)]
    file: Option<PathBuf>,

    /// OpenSky states URL (default: RUNWAY_OPENSKY_URL or the RKSI bounding box)
    #[arg(long)]
    url: Option<String>,

    /// Airport ICAO or IATA code (default: RUNWAY_AIRPORT or RKSI)
    #[arg(long)]
    airport: Option<String>,

    /// Runway table JSON (default: built-in Incheon table)
    #[arg(long)]
    runways: Option<PathBuf>,

    /// Scoring parameter JSON; missing fields keep their defaults
    #[arg(long)]
    params: Option<PathBuf>,

    /// Only consider aircraft within this distance of a threshold (NM)
    #[arg(long)]
    max_distance: Option<f64>,

    /// Minimum ground speed for an aircraft to count as airborne (m/s)
    #[arg(long, default_value_t = 10.0)]
    min_speed: f64,

    /// Keep level and climbing traffic
    #[arg(long)]
    include_climbing: bool,

    /// Emit JSON instead of the console table
    #[arg(long)]
    json: bool,

    /// Predict on the rayon thread pool
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("runway_cli=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let airport = args.airport.clone().unwrap_or(config.airport.clone());

    let table = match &args.runways {
        Some(path) => RunwayTable::from_json(&read(path)?)
            .with_context(|| format!("invalid runway table {}", path.display()))?,
        None => RunwayTable::incheon(),
    };
    let params = match &args.params {
        Some(path) => ScoreParams::from_json(&read(path)?)
            .with_context(|| format!("invalid scoring parameters {}", path.display()))?,
        None => ScoreParams::default(),
    };
    let predictor = Predictor::new(table, params)?;
    let approaches = predictor.table().approaches_for(&airport)?;

    let snapshot = load_snapshot(&args, &config)?;
    let total = snapshot.aircraft.len();

    let filter = SnapshotFilter {
        min_speed_mps: args.min_speed,
        require_descending: !args.include_climbing,
        max_threshold_distance_nm: args.max_distance.unwrap_or(config.max_distance_nm),
    };
    let arrivals = filter.apply(snapshot.aircraft, approaches);
    tracing::info!(
        airport = %predictor.table().airport(),
        snapshot_time = ?snapshot.time,
        total,
        arrivals = arrivals.len(),
        "snapshot filtered"
    );

    let states: Vec<_> = arrivals.into_iter().map(|a| a.state).collect();
    let predictions = if args.parallel {
        predictor.predict_snapshot_par(&airport, &states)?
    } else {
        predictor.predict_snapshot(&airport, &states)?
    };

    let rows: Vec<ReportRow<'_>> = states
        .iter()
        .zip(&predictions)
        .map(|(state, prediction)| ReportRow::new(state, prediction))
        .collect();

    if args.json {
        println!("{}", render_json(&rows)?);
    } else {
        println!("{}", header_line(&filter, predictor.table().airport(), rows.len()));
        if !rows.is_empty() {
            println!("{}", render_table(&rows));
        }
    }

    Ok(())
}

fn load_snapshot(args: &Args, config: &Config) -> Result<Snapshot> {
    if let Some(path) = &args.file {
        let raw = serde_json::from_str(&read(path)?)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        return Ok(parse_states(&raw));
    }

    let url = args.url.clone().unwrap_or(config.opensky_url.clone());
    tracing::info!(%url, "fetching OpenSky snapshot");
    OpenSkyClient::new(url)?.fetch_snapshot()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
