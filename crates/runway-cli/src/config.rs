//! Runner configuration from environment.

use crate::opensky::DEFAULT_STATES_URL;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub opensky_url: String,
    pub airport: String,
    pub max_distance_nm: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            opensky_url: env::var("RUNWAY_OPENSKY_URL").unwrap_or_else(|_| DEFAULT_STATES_URL.to_string()),
            airport: env::var("RUNWAY_AIRPORT").unwrap_or_else(|_| "RKSI".to_string()),
            max_distance_nm: env::var("RUNWAY_MAX_DISTANCE_NM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10.0),
        }
    }
}
