//! Core data models for runway prediction.

use crate::geodesy::{normalize_deg, GeoPoint};
use serde::{Deserialize, Serialize};

/// One aircraft observation from a traffic snapshot.
///
/// Any field may be missing; the engine treats missing or invalid values as
/// unknown geometry rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AircraftState {
    /// ICAO 24-bit transponder address (hex)
    #[serde(default)]
    pub icao24: Option<String>,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// True track over ground, degrees
    #[serde(default)]
    pub track_deg: Option<f64>,
    /// Altitude above the reference datum, meters
    #[serde(default)]
    pub altitude_m: Option<f64>,
    #[serde(default)]
    pub ground_speed_mps: Option<f64>,
    #[serde(default)]
    pub vertical_rate_mps: Option<f64>,
    #[serde(default)]
    pub on_ground: bool,
}

impl AircraftState {
    /// Create a state with position and track only.
    pub fn new(callsign: impl Into<String>, lat: f64, lon: f64, track_deg: f64) -> Self {
        Self {
            callsign: Some(callsign.into()),
            lat: Some(lat),
            lon: Some(lon),
            track_deg: Some(track_deg),
            ..Self::default()
        }
    }

    /// Set altitude, ground speed and vertical rate.
    pub fn with_kinematics(mut self, altitude_m: f64, ground_speed_mps: f64, vertical_rate_mps: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self.ground_speed_mps = Some(ground_speed_mps);
        self.vertical_rate_mps = Some(vertical_rate_mps);
        self
    }

    /// Position if both coordinates are present and in range.
    pub fn position(&self) -> Option<GeoPoint> {
        let point = GeoPoint::new(self.lat?, self.lon?);
        point.is_valid().then_some(point)
    }

    /// Track normalized to [0, 360), if present and finite.
    pub fn track(&self) -> Option<f64> {
        self.track_deg
            .filter(|t| t.is_finite())
            .map(normalize_deg)
    }

    /// Display identity: callsign, else ICAO address, else empty.
    pub fn ident(&self) -> String {
        self.callsign
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.icao24.as_deref().map(str::trim))
            .unwrap_or_default()
            .to_string()
    }
}

/// One landing direction of a physical runway (e.g. "33L").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayApproach {
    pub id: String,
    pub threshold_lat: f64,
    pub threshold_lon: f64,
    /// Course flown while established on final, degrees true
    pub inbound_course_deg: f64,
    #[serde(default)]
    pub elevation_ft: Option<f64>,
    /// Overrides the global lateral gate for this approach
    #[serde(default)]
    pub xtrack_tolerance_nm: Option<f64>,
}

impl RunwayApproach {
    pub fn new(id: impl Into<String>, threshold_lat: f64, threshold_lon: f64, inbound_course_deg: f64) -> Self {
        Self {
            id: id.into(),
            threshold_lat,
            threshold_lon,
            inbound_course_deg,
            elevation_ft: None,
            xtrack_tolerance_nm: None,
        }
    }

    pub fn with_elevation(mut self, elevation_ft: f64) -> Self {
        self.elevation_ft = Some(elevation_ft);
        self
    }

    pub fn with_xtrack_tolerance(mut self, tolerance_nm: f64) -> Self {
        self.xtrack_tolerance_nm = Some(tolerance_nm);
        self
    }

    pub fn threshold(&self) -> GeoPoint {
        GeoPoint::new(self.threshold_lat, self.threshold_lon)
    }
}

/// Discrete confidence bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// No runway could be scored
    Unknown,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the heading and lateral gates on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    Passed,
    /// |track delta| above the heading gate
    HeadingRejected,
    /// |cross-track| above the lateral gate
    LateralRejected,
    /// Track or position missing, gates could not be evaluated
    Undefined,
}

/// One aircraft paired with one runway, with derived geometry.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub runway_id: String,
    pub distance_nm: Option<f64>,
    /// Aircraft track minus inbound course, in (-180, 180]
    pub track_delta_deg: Option<f64>,
    /// Offset from the extended centerline, positive right of course
    pub cross_track_nm: Option<f64>,
    pub along_track_nm: Option<f64>,
    /// Lateral gate that applied to this runway
    pub lateral_gate_nm: f64,
    pub gate: GateOutcome,
}

impl Candidate {
    pub fn passed(&self) -> bool {
        self.gate == GateOutcome::Passed
    }
}

/// A candidate that survived both gates, with its score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Likelihood in [0, 1]
    pub score: f64,
    pub confidence: Confidence,
}

impl ScoredCandidate {
    pub fn runway_id(&self) -> &str {
        &self.candidate.runway_id
    }
}

/// Final runway prediction for one aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub ident: String,
    /// Predicted runway, `None` when nothing matched
    pub runway: Option<String>,
    pub score: Option<f64>,
    pub confidence: Confidence,
    pub distance_nm: Option<f64>,
    pub track_delta_deg: Option<f64>,
    pub cross_track_nm: Option<f64>,
    /// Several runways shared the winning score
    #[serde(default)]
    pub ambiguous_parallel: bool,
    #[serde(default)]
    pub tied_runways: Vec<String>,
}

impl Prediction {
    pub fn is_match(&self) -> bool {
        self.runway.is_some()
    }
}
