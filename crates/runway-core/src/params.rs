//! Gate and scoring parameters.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Tunables for the candidate gates and the score formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    /// Maximum |track delta| in degrees for a runway to be considered
    pub track_gate_deg: f64,
    /// Maximum |cross-track| in NM, unless the approach overrides it
    pub xtrack_gate_nm: f64,
    /// Weight of the heading-alignment component
    pub w_track: f64,
    /// Weight of the centerline-offset component
    pub w_xtrack: f64,
    /// Optional nudge toward a typical final-approach distance
    pub distance_prior: Option<DistancePrior>,
    pub thresholds: ConfidenceThresholds,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            track_gate_deg: 20.0,
            xtrack_gate_nm: 0.3,
            w_track: 0.5,
            w_xtrack: 0.5,
            distance_prior: None,
            thresholds: ConfidenceThresholds::default(),
        }
    }
}

/// Triangular preference for aircraft near `peak_nm` from the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistancePrior {
    pub peak_nm: f64,
    /// Distance from the peak at which the prior falls to zero
    pub span_nm: f64,
    /// Share of the final score given to the prior, in [0, 1]
    pub weight: f64,
}

impl Default for DistancePrior {
    fn default() -> Self {
        Self {
            peak_nm: 4.0,
            span_nm: 6.0,
            weight: 0.10,
        }
    }
}

/// Score cut-offs for the confidence buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.75,
            medium: 0.5,
        }
    }
}

impl ScoreParams {
    /// Parse parameters from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fail = |msg: &str| -> Result<(), ConfigurationError> {
            Err(ConfigurationError::InvalidParams(msg.to_string()))
        };

        if !(self.track_gate_deg.is_finite() && self.track_gate_deg > 0.0 && self.track_gate_deg <= 180.0) {
            return fail("track_gate_deg must be in (0, 180]");
        }
        if !(self.xtrack_gate_nm.is_finite() && self.xtrack_gate_nm > 0.0) {
            return fail("xtrack_gate_nm must be positive");
        }
        if !(self.w_track.is_finite() && self.w_xtrack.is_finite()) || self.w_track < 0.0 || self.w_xtrack < 0.0 {
            return fail("component weights must be non-negative");
        }
        if self.w_track + self.w_xtrack <= 0.0 {
            return fail("component weights must not both be zero");
        }

        let t = self.thresholds;
        if !(0.0..=1.0).contains(&t.medium) || !(0.0..=1.0).contains(&t.high) || t.medium > t.high {
            return fail("confidence thresholds must satisfy 0 <= medium <= high <= 1");
        }

        if let Some(prior) = self.distance_prior {
            if !(prior.peak_nm.is_finite() && prior.peak_nm >= 0.0) {
                return fail("distance prior peak must be non-negative");
            }
            if !(prior.span_nm.is_finite() && prior.span_nm > 0.0) {
                return fail("distance prior span must be positive");
            }
            if !(0.0..=1.0).contains(&prior.weight) {
                return fail("distance prior weight must be in [0, 1]");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_equal_weights() {
        let params = ScoreParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.w_track, params.w_xtrack);
        assert!(params.distance_prior.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params = ScoreParams::from_json(r#"{"track_gate_deg": 15.0}"#).unwrap();
        assert_eq!(params.track_gate_deg, 15.0);
        assert_eq!(params.xtrack_gate_nm, 0.3);
        assert_eq!(params.thresholds.high, 0.75);
    }

    #[test]
    fn test_distance_prior_from_json() {
        let params = ScoreParams::from_json(
            r#"{"distance_prior": {"peak_nm": 4.0, "span_nm": 6.0, "weight": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(params.distance_prior, Some(DistancePrior::default()));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut params = ScoreParams::default();
        params.w_track = 0.0;
        params.w_xtrack = 0.0;
        assert!(params.validate().is_err());

        let mut params = ScoreParams::default();
        params.thresholds.medium = 0.9;
        assert!(params.validate().is_err());

        let mut params = ScoreParams::default();
        params.xtrack_gate_nm = -0.3;
        assert!(params.validate().is_err());

        let mut params = ScoreParams::default();
        params.distance_prior = Some(DistancePrior { span_nm: 0.0, ..DistancePrior::default() });
        assert!(params.validate().is_err());
    }
}
