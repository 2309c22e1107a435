//! OpenSky Network state-vector feed.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use runway_core::AircraftState;
use serde_json::Value;
use std::time::Duration;

/// Bounding box of roughly 60 NM around Incheon (RKSI).
pub const DEFAULT_STATES_URL: &str = "https://opensky-network.org/api/states/all?\
lamin=36.46333&lomin=125.180146&lamax=38.46333&lomax=127.699854";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Columns of an OpenSky state vector row.
mod col {
    pub const ICAO24: usize = 0;
    pub const CALLSIGN: usize = 1;
    pub const LON: usize = 5;
    pub const LAT: usize = 6;
    pub const BARO_ALT: usize = 7;
    pub const ON_GROUND: usize = 8;
    pub const VELOCITY: usize = 9;
    pub const TRUE_TRACK: usize = 10;
    pub const VERTICAL_RATE: usize = 11;
    pub const GEO_ALT: usize = 13;
    /// Rows shorter than this are malformed
    pub const MIN_LEN: usize = 17;
}

/// One decoded snapshot of traffic.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: Option<DateTime<Utc>>,
    pub aircraft: Vec<AircraftState>,
}

/// Blocking client for the `/states/all` endpoint.
pub struct OpenSkyClient {
    client: Client,
    url: String,
}

impl OpenSkyClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch and decode one snapshot.
    pub fn fetch_snapshot(&self) -> Result<Snapshot> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("request to {} failed", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("OpenSky returned {}: {}", status, body);
        }

        let raw: Value = response.json().context("OpenSky response is not JSON")?;
        Ok(parse_states(&raw))
    }
}

/// Decode an OpenSky `/states/all` payload. Malformed rows and rows without
/// a position are skipped.
pub fn parse_states(raw: &Value) -> Snapshot {
    let time = raw
        .get("time")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    let aircraft = raw
        .get("states")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(parse_row).collect())
        .unwrap_or_default();

    Snapshot { time, aircraft }
}

fn parse_row(row: &Value) -> Option<AircraftState> {
    let fields = row.as_array()?;
    if fields.len() < col::MIN_LEN {
        return None;
    }

    let number = |idx: usize| fields[idx].as_f64();
    let text = |idx: usize| {
        fields[idx]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let lat = number(col::LAT)?;
    let lon = number(col::LON)?;

    Some(AircraftState {
        icao24: text(col::ICAO24),
        callsign: text(col::CALLSIGN),
        lat: Some(lat),
        lon: Some(lon),
        track_deg: number(col::TRUE_TRACK),
        altitude_m: number(col::GEO_ALT).or_else(|| number(col::BARO_ALT)),
        ground_speed_mps: number(col::VELOCITY),
        vertical_rate_mps: number(col::VERTICAL_RATE),
        on_ground: fields[col::ON_GROUND].as_bool().unwrap_or(false),
    })
}
