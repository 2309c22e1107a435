//! Heading and lateral gates deciding whether a runway is a plausible
//! landing candidate for an aircraft.

use crate::geodesy::{along_track_nm, cross_track_nm, distance_nm, normalize_signed_deg};
use crate::models::{AircraftState, Candidate, GateOutcome, RunwayApproach};
use crate::params::ScoreParams;

/// Compute candidate geometry for one aircraft/runway pair and apply the gates.
///
/// Both gates are hard cut-offs. Missing track or position yields
/// [`GateOutcome::Undefined`] with the affected diagnostics left as `None`.
pub fn evaluate(state: &AircraftState, approach: &RunwayApproach, params: &ScoreParams) -> Candidate {
    let threshold = approach.threshold();
    let course = approach.inbound_course_deg;
    let lateral_gate_nm = approach.xtrack_tolerance_nm.unwrap_or(params.xtrack_gate_nm);

    // Non-finite results (e.g. from an unvalidated table) count as unknown.
    let position = state.position();
    let distance = position.map(|p| distance_nm(threshold, p)).filter(|d| d.is_finite());
    let track_delta = state
        .track()
        .map(|track| normalize_signed_deg(track - course))
        .filter(|d| d.is_finite());
    let xtrack = position
        .and_then(|p| cross_track_nm(p, threshold, course))
        .filter(|x| x.is_finite());
    let along = position
        .and_then(|p| along_track_nm(p, threshold, course))
        .filter(|a| a.is_finite());

    let gate = match (track_delta, xtrack) {
        (None, _) => GateOutcome::Undefined,
        (Some(delta), _) if !(delta.abs() <= params.track_gate_deg) => GateOutcome::HeadingRejected,
        (Some(_), None) => GateOutcome::Undefined,
        (Some(_), Some(x)) if x.abs() <= lateral_gate_nm => GateOutcome::Passed,
        (Some(_), Some(_)) => GateOutcome::LateralRejected,
    };

    Candidate {
        runway_id: approach.id.clone(),
        distance_nm: distance,
        track_delta_deg: track_delta,
        cross_track_nm: xtrack,
        along_track_nm: along,
        lateral_gate_nm,
        gate,
    }
}

/// Evaluate every approach for one aircraft.
pub fn evaluate_all(state: &AircraftState, approaches: &[RunwayApproach], params: &ScoreParams) -> Vec<Candidate> {
    approaches
        .iter()
        .map(|approach| evaluate(state, approach, params))
        .collect()
}
