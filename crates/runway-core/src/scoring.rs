//! Continuous likelihood score and confidence bucket for gated candidates.

use crate::models::{Candidate, Confidence, ScoredCandidate};
use crate::params::{ConfidenceThresholds, DistancePrior, ScoreParams};

/// Score a candidate that passed both gates.
///
/// Returns `None` for rejected or undefined candidates, and for any
/// combination that is not finite (zero weight sum, NaN inputs); they never
/// get a score or a confidence other than unknown.
pub fn score(candidate: &Candidate, params: &ScoreParams) -> Option<ScoredCandidate> {
    if !candidate.passed() {
        return None;
    }
    let value = combined_score(candidate, params)?;
    Some(ScoredCandidate {
        candidate: candidate.clone(),
        score: value,
        confidence: confidence_for(value, &params.thresholds),
    })
}

/// Score every passing candidate, dropping the rest.
pub fn score_all(candidates: &[Candidate], params: &ScoreParams) -> Vec<ScoredCandidate> {
    candidates.iter().filter_map(|c| score(c, params)).collect()
}

/// The score formula applied regardless of gate outcome, for display when
/// nothing passed. `None` when the geometry is undefined.
pub fn diagnostic_score(candidate: &Candidate, params: &ScoreParams) -> Option<f64> {
    combined_score(candidate, params)
}

/// Map a score onto its confidence bucket.
pub fn confidence_for(score: f64, thresholds: &ConfidenceThresholds) -> Confidence {
    if score >= thresholds.high {
        Confidence::High
    } else if score >= thresholds.medium {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn combined_score(candidate: &Candidate, params: &ScoreParams) -> Option<f64> {
    let delta = candidate.track_delta_deg?;
    let xtrack = candidate.cross_track_nm?;

    let heading = component(delta.abs(), params.track_gate_deg);
    let lateral = component(xtrack.abs(), candidate.lateral_gate_nm);

    let weight_sum = params.w_track + params.w_xtrack;
    let mut value = (params.w_track * heading + params.w_xtrack * lateral) / weight_sum;

    if let (Some(prior), Some(distance)) = (params.distance_prior, candidate.distance_nm) {
        value = (1.0 - prior.weight) * value + prior.weight * distance_term(prior, distance);
    }

    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

/// 1 at zero error, 0 at (or beyond) the gate.
fn component(error: f64, gate: f64) -> f64 {
    (1.0 - error / gate).clamp(0.0, 1.0)
}

fn distance_term(prior: DistancePrior, distance_nm: f64) -> f64 {
    (1.0 - (distance_nm - prior.peak_nm).abs() / prior.span_nm).max(0.0)
}
