//! Runway approach reference table.

use crate::error::ConfigurationError;
use crate::models::RunwayApproach;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Validated, read-only set of approaches for one airport.
#[derive(Debug, Clone, Serialize)]
pub struct RunwayTable {
    /// ICAO code, e.g. "RKSI"
    airport: String,
    /// IATA code, e.g. "ICN"
    iata: Option<String>,
    approaches: Vec<RunwayApproach>,
}

#[derive(Deserialize)]
struct RawTable {
    airport: String,
    #[serde(default)]
    iata: Option<String>,
    approaches: Vec<RunwayApproach>,
}

impl RunwayTable {
    /// Build a table, rejecting anything that could not be scored against.
    pub fn new(
        airport: impl Into<String>,
        iata: Option<String>,
        approaches: Vec<RunwayApproach>,
    ) -> Result<Self, ConfigurationError> {
        let airport = airport.into();
        if let Err(err) = validate(&airport, &approaches) {
            warn!(airport = %airport, error = %err, "rejected runway table");
            return Err(err);
        }
        Ok(Self {
            airport,
            iata,
            approaches,
        })
    }

    /// Parse a table from JSON:
    /// `{"airport": "RKSI", "iata": "ICN", "approaches": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::new(raw.airport, raw.iata, raw.approaches)
    }

    /// Incheon International. Thresholds are approximate but adequate for
    /// classification.
    pub fn incheon() -> Self {
        let approaches = vec![
            RunwayApproach::new("33L", 37.4542, 126.4608, 333.0).with_elevation(23.0),
            RunwayApproach::new("33R", 37.4540, 126.4437, 333.0).with_elevation(23.0),
            RunwayApproach::new("34L", 37.4762, 126.4155, 340.0).with_elevation(23.0),
            RunwayApproach::new("34R", 37.4728, 126.4317, 340.0).with_elevation(23.0),
            RunwayApproach::new("15L", 37.4818, 126.4363, 153.0).with_elevation(23.0),
            RunwayApproach::new("15R", 37.4802, 126.4500, 153.0).with_elevation(23.0),
            RunwayApproach::new("16L", 37.4728, 126.4417, 160.0).with_elevation(23.0),
            RunwayApproach::new("16R", 37.4789, 126.4149, 160.0).with_elevation(23.0),
        ];
        Self {
            airport: "RKSI".to_string(),
            iata: Some("ICN".to_string()),
            approaches,
        }
    }

    pub fn airport(&self) -> &str {
        &self.airport
    }

    pub fn approaches(&self) -> &[RunwayApproach] {
        &self.approaches
    }

    /// Approaches for `airport` (ICAO or IATA code, case-insensitive).
    pub fn approaches_for(&self, airport: &str) -> Result<&[RunwayApproach], ConfigurationError> {
        let wanted = airport.trim();
        let matches_icao = self.airport.eq_ignore_ascii_case(wanted);
        let matches_iata = self
            .iata
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case(wanted));

        if matches_icao || matches_iata {
            Ok(&self.approaches)
        } else {
            Err(ConfigurationError::UnknownAirport(wanted.to_string()))
        }
    }
}

fn validate(airport: &str, approaches: &[RunwayApproach]) -> Result<(), ConfigurationError> {
    if approaches.is_empty() {
        return Err(ConfigurationError::EmptyTable(airport.to_string()));
    }

    let mut seen = HashSet::new();
    for approach in approaches {
        let invalid = |reason: &str| ConfigurationError::InvalidRunway {
            id: approach.id.clone(),
            reason: reason.to_string(),
        };

        if approach.id.trim().is_empty() {
            return Err(invalid("empty identifier"));
        }
        if !seen.insert(approach.id.as_str()) {
            return Err(ConfigurationError::DuplicateRunway(approach.id.clone()));
        }
        if !approach.threshold().is_valid() {
            return Err(invalid("threshold coordinates out of range"));
        }
        let course = approach.inbound_course_deg;
        if !course.is_finite() || !(0.0..360.0).contains(&course) {
            return Err(invalid("inbound course must be in [0, 360)"));
        }
        if let Some(tolerance) = approach.xtrack_tolerance_nm {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(invalid("cross-track tolerance must be positive"));
            }
        }
    }

    Ok(())
}
