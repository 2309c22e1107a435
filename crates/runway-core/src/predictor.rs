//! Snapshot-level entry points.
//!
//! Every aircraft is predicted independently against the same read-only
//! runway table, so batches may be split across threads freely.

use crate::error::ConfigurationError;
use crate::filter::evaluate_all;
use crate::models::{AircraftState, GateOutcome, Prediction, RunwayApproach};
use crate::params::ScoreParams;
use crate::runways::RunwayTable;
use crate::selector::select;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Predict the landing runway for a single aircraft.
///
/// `params` should have passed [`ScoreParams::validate`]; parameters that
/// make the score non-finite leave the aircraft unmatched rather than
/// panicking.
pub fn predict(state: &AircraftState, approaches: &[RunwayApproach], params: &ScoreParams) -> Prediction {
    let ident = state.ident();
    let candidates = evaluate_all(state, approaches, params);

    for candidate in candidates.iter().filter(|c| c.gate != GateOutcome::Passed) {
        trace!(
            ident = %ident,
            runway = %candidate.runway_id,
            gate = ?candidate.gate,
            track_delta = ?candidate.track_delta_deg,
            xtrack = ?candidate.cross_track_nm,
            "candidate rejected"
        );
    }

    let prediction = select(&ident, &candidates, params);
    debug!(
        ident = %prediction.ident,
        runway = prediction.runway.as_deref().unwrap_or("-"),
        score = ?prediction.score,
        confidence = %prediction.confidence,
        ambiguous = prediction.ambiguous_parallel,
        "runway prediction"
    );
    prediction
}

/// Predict every aircraft in a snapshot, preserving input order.
pub fn predict_batch(states: &[AircraftState], approaches: &[RunwayApproach], params: &ScoreParams) -> Vec<Prediction> {
    states
        .iter()
        .map(|state| predict(state, approaches, params))
        .collect()
}

/// Same as [`predict_batch`], spread over the rayon thread pool.
pub fn predict_batch_par(
    states: &[AircraftState],
    approaches: &[RunwayApproach],
    params: &ScoreParams,
) -> Vec<Prediction> {
    states
        .par_iter()
        .map(|state| predict(state, approaches, params))
        .collect()
}

/// A runway table and validated scoring parameters bundled for callers
/// that predict many snapshots against one airport.
#[derive(Debug, Clone)]
pub struct Predictor {
    table: RunwayTable,
    params: ScoreParams,
}

impl Predictor {
    pub fn new(table: RunwayTable, params: ScoreParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self { table, params })
    }

    pub fn table(&self) -> &RunwayTable {
        &self.table
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    /// Predict a snapshot for `airport`, which must match the table.
    pub fn predict_snapshot(&self, airport: &str, states: &[AircraftState]) -> Result<Vec<Prediction>, ConfigurationError> {
        let approaches = self.table.approaches_for(airport)?;
        Ok(predict_batch(states, approaches, &self.params))
    }

    /// Parallel variant of [`Predictor::predict_snapshot`].
    pub fn predict_snapshot_par(
        &self,
        airport: &str,
        states: &[AircraftState],
    ) -> Result<Vec<Prediction>, ConfigurationError> {
        let approaches = self.table.approaches_for(airport)?;
        Ok(predict_batch_par(states, approaches, &self.params))
    }
}
