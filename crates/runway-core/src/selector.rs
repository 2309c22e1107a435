//! Reduce one aircraft's candidates to a single runway prediction.

use crate::models::{Candidate, Confidence, Prediction, ScoredCandidate};
use crate::params::ScoreParams;
use crate::scoring::{diagnostic_score, score_all};
use std::cmp::Ordering;

/// Scores closer than this are treated as a tie.
pub const SCORE_TIE_EPSILON: f64 = 1e-9;

/// Pick the best runway for one aircraft from all of its candidates.
///
/// The highest score wins. Equal scores resolve to the lexically lowest
/// runway id and set `ambiguous_parallel`, so the answer never depends on
/// the order of the runway table.
pub fn select(ident: &str, candidates: &[Candidate], params: &ScoreParams) -> Prediction {
    let scored = score_all(candidates, params);

    let Some(best_score) = scored.iter().map(|s| s.score).reduce(f64::max) else {
        return no_match(ident, candidates, params);
    };

    let mut tied: Vec<&ScoredCandidate> = scored
        .iter()
        .filter(|s| best_score - s.score <= SCORE_TIE_EPSILON)
        .collect();
    tied.sort_by(|a, b| a.runway_id().cmp(b.runway_id()));

    let Some(&winner) = tied.first() else {
        return no_match(ident, candidates, params);
    };
    let ambiguous = tied.len() > 1;
    let tied_runways = if ambiguous {
        tied.iter().map(|s| s.runway_id().to_string()).collect()
    } else {
        Vec::new()
    };

    Prediction {
        ident: ident.to_string(),
        runway: Some(winner.runway_id().to_string()),
        score: Some(winner.score),
        confidence: winner.confidence,
        distance_nm: winner.candidate.distance_nm,
        track_delta_deg: winner.candidate.track_delta_deg,
        cross_track_nm: winner.candidate.cross_track_nm,
        ambiguous_parallel: ambiguous,
        tied_runways,
    }
}

/// Sentinel prediction. Diagnostics come from the best rejected candidate
/// with defined geometry; otherwise only the nearest threshold distance is
/// reported.
fn no_match(ident: &str, candidates: &[Candidate], params: &ScoreParams) -> Prediction {
    let best_rejected = candidates
        .iter()
        .filter_map(|c| diagnostic_score(c, params).map(|s| (c, s)))
        .min_by(|(a, sa), (b, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.runway_id.cmp(&b.runway_id))
        });

    let (score, distance, delta, xtrack) = match best_rejected {
        Some((c, s)) => (Some(s), c.distance_nm, c.track_delta_deg, c.cross_track_nm),
        None => {
            let nearest = candidates
                .iter()
                .filter_map(|c| c.distance_nm)
                .reduce(f64::min);
            (None, nearest, None, None)
        }
    };

    Prediction {
        ident: ident.to_string(),
        runway: None,
        score,
        confidence: Confidence::Unknown,
        distance_nm: distance,
        track_delta_deg: delta,
        cross_track_nm: xtrack,
        ambiguous_parallel: false,
        tied_runways: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GateOutcome;

    fn passed(id: &str, delta: f64, xtrack: f64) -> Candidate {
        Candidate {
            runway_id: id.into(),
            distance_nm: Some(5.0),
            track_delta_deg: Some(delta),
            cross_track_nm: Some(xtrack),
            along_track_nm: Some(-5.0),
            lateral_gate_nm: 0.3,
            gate: GateOutcome::Passed,
        }
    }

    fn rejected(id: &str, delta: f64, xtrack: f64, gate: GateOutcome) -> Candidate {
        Candidate {
            gate,
            ..passed(id, delta, xtrack)
        }
    }

    #[test]
    fn test_highest_score_wins() {
        let candidates = vec![passed("34L", 8.0, 0.1), passed("33R", 1.0, 0.02)];
        let p = select("KAL1", &candidates, &ScoreParams::default());
        assert_eq!(p.runway.as_deref(), Some("33R"));
        assert!(!p.ambiguous_parallel);
        assert!(p.tied_runways.is_empty());
    }

    #[test]
    fn test_tie_breaks_lexically_regardless_of_order() {
        let forward = vec![passed("15L", 2.0, 0.1), passed("15R", 2.0, -0.1)];
        let reverse = vec![passed("15R", 2.0, -0.1), passed("15L", 2.0, 0.1)];

        for candidates in [forward, reverse] {
            let p = select("AAR2", &candidates, &ScoreParams::default());
            assert_eq!(p.runway.as_deref(), Some("15L"));
            assert!(p.ambiguous_parallel);
            assert_eq!(p.tied_runways, vec!["15L".to_string(), "15R".to_string()]);
        }
    }

    #[test]
    fn test_no_match_uses_best_rejected_for_diagnostics() {
        let candidates = vec![
            rejected("33L", 25.0, 0.0, GateOutcome::HeadingRejected),
            rejected("34R", 60.0, 0.1, GateOutcome::HeadingRejected),
        ];
        let p = select("JNA3", &candidates, &ScoreParams::default());
        assert!(p.runway.is_none());
        assert_eq!(p.confidence, Confidence::Unknown);
        assert_eq!(p.score, Some(0.5));
        assert_eq!(p.track_delta_deg, Some(25.0));
    }

    #[test]
    fn test_no_match_without_geometry_reports_nearest_distance_only() {
        let mut a = rejected("33L", 0.0, 0.0, GateOutcome::Undefined);
        a.track_delta_deg = None;
        a.distance_nm = Some(7.0);
        let mut b = a.clone();
        b.runway_id = "33R".into();
        b.distance_nm = Some(6.5);

        let p = select("", &[a, b], &ScoreParams::default());
        assert!(p.runway.is_none());
        assert!(p.score.is_none());
        assert!(p.track_delta_deg.is_none());
        assert!(p.cross_track_nm.is_none());
        assert_eq!(p.distance_nm, Some(6.5));
    }

    #[test]
    fn test_zero_weights_fall_back_to_no_match() {
        let params = ScoreParams {
            w_track: 0.0,
            w_xtrack: 0.0,
            ..ScoreParams::default()
        };
        let candidates = vec![passed("33L", 1.0, 0.05), passed("33R", 2.0, 0.1)];
        let p = select("ZERO", &candidates, &params);
        assert!(p.runway.is_none());
        assert!(p.score.is_none());
        assert_eq!(p.confidence, Confidence::Unknown);
    }

    #[test]
    fn test_non_finite_geometry_is_never_selected() {
        let candidates = vec![passed("33L", f64::NAN, 0.05), passed("33R", 2.0, 0.1)];
        let p = select("NANG", &candidates, &ScoreParams::default());
        assert_eq!(p.runway.as_deref(), Some("33R"));
        assert!(!p.ambiguous_parallel);
    }

    #[test]
    fn test_empty_candidate_list() {
        let p = select("X", &[], &ScoreParams::default());
        assert!(p.runway.is_none());
        assert!(p.score.is_none());
        assert!(p.distance_nm.is_none());
    }
}
