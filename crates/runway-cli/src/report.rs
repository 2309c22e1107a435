//! Console and JSON rendering of predictions.

use anyhow::Result;
use crate::snapshot::SnapshotFilter;
use runway_core::{AircraftState, Prediction};
use serde::Serialize;

const KNOTS_PER_MPS: f64 = 1.943_84;

/// Prediction joined with the observation it came from.
#[derive(Debug, Serialize)]
pub struct ReportRow<'a> {
    #[serde(flatten)]
    pub prediction: &'a Prediction,
    pub track_deg: Option<f64>,
    pub altitude_m: Option<f64>,
    pub ground_speed_kt: Option<f64>,
}

impl<'a> ReportRow<'a> {
    pub fn new(state: &AircraftState, prediction: &'a Prediction) -> Self {
        Self {
            prediction,
            track_deg: state.track(),
            altitude_m: state.altitude_m,
            ground_speed_kt: state.ground_speed_mps.map(|v| v * KNOTS_PER_MPS),
        }
    }
}

fn num(value: Option<f64>, width: usize, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:>width$.precision$}"),
        None => format!("{:>width$}", "n/a"),
    }
}

/// Console heading describing which aircraft the filter kept.
pub fn header_line(filter: &SnapshotFilter, airport: &str, count: usize) -> String {
    let kind = if filter.require_descending { "Descending" } else { "Airborne" };
    format!(
        "{kind} aircraft within {:.0} NM of any {airport} runway threshold: {count}",
        filter.max_threshold_distance_nm
    )
}

/// One fixed-width console line.
pub fn format_line(row: &ReportRow<'_>) -> String {
    let p = row.prediction;
    let runway = p.runway.as_deref().unwrap_or("—");
    let ambiguous = if p.ambiguous_parallel {
        format!("  [ambiguous: {}]", p.tied_runways.join("/"))
    } else {
        String::new()
    };

    format!(
        "{:>8}  d={}NM  hdg={}°  alt={}m  →  {:>3}  score={}  conf={:>7}  (Δtrack={}°, xtrack={}NM){}",
        p.ident,
        num(p.distance_nm, 4, 1),
        num(row.track_deg, 6, 1),
        num(row.altitude_m, 6, 0),
        runway,
        num(p.score, 4, 2),
        p.confidence.as_str(),
        num(p.track_delta_deg, 5, 1),
        num(p.cross_track_nm, 5, 2),
        ambiguous,
    )
}

/// Render every row as console lines.
pub fn render_table(rows: &[ReportRow<'_>]) -> String {
    rows.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

/// Render every row as a pretty JSON array.
pub fn render_json(rows: &[ReportRow<'_>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
