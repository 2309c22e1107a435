//! Runway Core - geometric landing-runway prediction for arriving traffic.
//!
//! Compares each aircraft's position and track against a table of published
//! final-approach courses and picks the most likely runway.

pub mod error;
pub mod filter;
pub mod geodesy;
pub mod models;
pub mod params;
pub mod predictor;
pub mod runways;
pub mod scoring;
pub mod selector;

pub use error::ConfigurationError;
pub use geodesy::{bearing_deg, cross_track_nm, distance_nm, GeoPoint};
pub use models::{
    AircraftState, Candidate, Confidence, GateOutcome, Prediction, RunwayApproach, ScoredCandidate,
};
pub use params::{ConfidenceThresholds, DistancePrior, ScoreParams};
pub use predictor::{predict, predict_batch, predict_batch_par, Predictor};
pub use runways::RunwayTable;
pub use selector::select;
