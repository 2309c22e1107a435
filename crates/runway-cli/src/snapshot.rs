//! Pre-filters that narrow a traffic snapshot down to likely arrivals.

use runway_core::geodesy::distance_nm;
use runway_core::{AircraftState, RunwayApproach};
use std::cmp::Ordering;

/// Criteria for keeping an aircraft in the prediction pass.
#[derive(Debug, Clone)]
pub struct SnapshotFilter {
    /// Aircraft at or below this ground speed are treated as taxiing/parked
    pub min_speed_mps: f64,
    pub require_descending: bool,
    /// Maximum distance to the nearest runway threshold
    pub max_threshold_distance_nm: f64,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self {
            min_speed_mps: 10.0,
            require_descending: true,
            max_threshold_distance_nm: 10.0,
        }
    }
}

/// An aircraft that passed the filter, with its distance to the nearest threshold.
#[derive(Debug, Clone)]
pub struct Arrival {
    pub state: AircraftState,
    pub nearest_threshold_nm: f64,
}

impl SnapshotFilter {
    /// Keep airborne, descending aircraft near the airport, nearest first.
    pub fn apply(&self, aircraft: Vec<AircraftState>, approaches: &[RunwayApproach]) -> Vec<Arrival> {
        let mut arrivals: Vec<Arrival> = aircraft
            .into_iter()
            .filter(|ac| self.is_airborne(ac) && self.is_descending(ac))
            .filter_map(|state| {
                let nearest = nearest_threshold_nm(&state, approaches)?;
                (nearest <= self.max_threshold_distance_nm).then_some(Arrival {
                    state,
                    nearest_threshold_nm: nearest,
                })
            })
            .collect();

        arrivals.sort_by(|a, b| {
            a.nearest_threshold_nm
                .partial_cmp(&b.nearest_threshold_nm)
                .unwrap_or(Ordering::Equal)
        });
        arrivals
    }

    fn is_airborne(&self, ac: &AircraftState) -> bool {
        !ac.on_ground && ac.ground_speed_mps.unwrap_or(0.0) > self.min_speed_mps
    }

    fn is_descending(&self, ac: &AircraftState) -> bool {
        !self.require_descending || ac.vertical_rate_mps.is_some_and(|rate| rate < 0.0)
    }
}

/// Distance to the closest threshold, `None` without a valid position.
pub fn nearest_threshold_nm(state: &AircraftState, approaches: &[RunwayApproach]) -> Option<f64> {
    let position = state.position()?;
    approaches
        .iter()
        .map(|a| distance_nm(a.threshold(), position))
        .reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::geodesy::destination;
    use runway_core::RunwayTable;

    fn arriving(callsign: &str, back_nm: f64) -> AircraftState {
        let table = RunwayTable::incheon();
        let rwy = &table.approaches()[0];
        let p = destination(rwy.threshold(), rwy.inbound_course_deg + 180.0, back_nm);
        AircraftState::new(callsign, p.lat, p.lon, rwy.inbound_course_deg).with_kinematics(600.0, 75.0, -3.0)
    }

    #[test]
    fn test_keeps_descending_arrivals_sorted_by_distance() {
        let table = RunwayTable::incheon();
        let aircraft = vec![arriving("FAR", 8.0), arriving("NEAR", 3.0), arriving("OUT", 25.0)];

        let arrivals = SnapshotFilter::default().apply(aircraft, table.approaches());
        let idents: Vec<String> = arrivals.iter().map(|a| a.state.ident()).collect();
        assert_eq!(idents, vec!["NEAR", "FAR"]);
        assert!(arrivals[0].nearest_threshold_nm <= 3.0 + 1e-6);
    }

    #[test]
    fn test_drops_ground_slow_and_climbing_traffic() {
        let table = RunwayTable::incheon();

        let mut on_ground = arriving("GND", 2.0);
        on_ground.on_ground = true;
        let mut slow = arriving("SLOW", 2.0);
        slow.ground_speed_mps = Some(5.0);
        let mut climbing = arriving("CLB", 2.0);
        climbing.vertical_rate_mps = Some(8.0);
        let mut no_rate = arriving("NORATE", 2.0);
        no_rate.vertical_rate_mps = None;

        let filter = SnapshotFilter::default();
        let kept = filter.apply(vec![on_ground, slow, climbing.clone(), no_rate], table.approaches());
        assert!(kept.is_empty());

        let lenient = SnapshotFilter {
            require_descending: false,
            ..SnapshotFilter::default()
        };
        let kept = lenient.apply(vec![climbing], table.approaches());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_nearest_threshold_requires_position() {
        let table = RunwayTable::incheon();
        assert!(nearest_threshold_nm(&AircraftState::default(), table.approaches()).is_none());
    }
}
