//! Spherical-earth geodesy for approach geometry.
//!
//! All angles cross this API in degrees and all distances in nautical miles.
//! Results that are geometrically undefined (bearing between coincident
//! points and everything derived from it) come back as `None`.

use serde::{Deserialize, Serialize};

/// Mean earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Below this (in radians of arc or bearing-vector magnitude) two points are
/// treated as coincident.
const COINCIDENT_EPS: f64 = 1e-12;

/// A position in decimal degrees (WGS-84, spherical approximation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite and inside the WGS-84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Wrap any angle into [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap any angle into (-180, 180].
pub fn normalize_signed_deg(deg: f64) -> f64 {
    let wrapped = normalize_deg(deg);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Great-circle distance between two points in nautical miles (haversine).
pub fn distance_nm(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial great-circle bearing from `a` to `b`, in [0, 360).
///
/// Returns `None` when the points coincide and no direction exists.
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> Option<f64> {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    if x.abs() < COINCIDENT_EPS && y.abs() < COINCIDENT_EPS {
        return None;
    }

    Some(normalize_deg(x.atan2(y).to_degrees()))
}

/// Signed perpendicular distance from `point` to the great circle through
/// `origin` with heading `course_deg`.
///
/// Positive when `point` lies right of the course, negative when left.
/// `None` when `point` coincides with `origin`.
pub fn cross_track_nm(point: GeoPoint, origin: GeoPoint, course_deg: f64) -> Option<f64> {
    let angular = distance_nm(origin, point) / EARTH_RADIUS_NM;
    let theta = bearing_deg(origin, point)?;
    let rel = (theta - course_deg).to_radians();
    let arg = (angular.sin() * rel.sin()).clamp(-1.0, 1.0);
    Some(arg.asin() * EARTH_RADIUS_NM)
}

/// Signed distance along the course line from `origin` to the foot of the
/// perpendicular dropped from `point`.
///
/// Positive when the foot lies ahead of `origin` in the course direction.
pub fn along_track_nm(point: GeoPoint, origin: GeoPoint, course_deg: f64) -> Option<f64> {
    let angular = distance_nm(origin, point) / EARTH_RADIUS_NM;
    let theta = bearing_deg(origin, point)?;
    let xt = cross_track_nm(point, origin, course_deg)? / EARTH_RADIUS_NM;

    let denom = xt.cos();
    if denom.abs() < COINCIDENT_EPS {
        return None;
    }
    let arg = (angular.cos() / denom).clamp(-1.0, 1.0);
    let magnitude = arg.acos() * EARTH_RADIUS_NM;
    let sign = (theta - course_deg).to_radians().cos().signum();
    Some(sign * magnitude)
}

/// Point reached by travelling `distance_nm` from `origin` on initial
/// bearing `bearing_deg`.
pub fn destination(origin: GeoPoint, bearing_deg: f64, distance_nm: f64) -> GeoPoint {
    if distance_nm.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let angular = distance_nm / EARTH_RADIUS_NM;
    let brg = bearing_deg.to_radians();

    let sin_lat2 = lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * brg.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = brg.sin() * angular.sin() * lat1.cos();
    let x = angular.cos() - lat1.sin() * sin_lat2;
    let lon2 = lon1 + y.atan2(x);

    GeoPoint {
        lat: lat2.to_degrees(),
        lon: normalize_signed_deg(lon2.to_degrees()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICN_33L: GeoPoint = GeoPoint { lat: 37.4542, lon: 126.4608 };

    #[test]
    fn test_distance_one_degree_latitude() {
        // 1 degree of latitude is 60 NM on this sphere
        let dist = distance_nm(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((dist - 60.04).abs() < 0.05, "got {dist}");
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        assert_eq!(distance_nm(ICN_33L, ICN_33L), 0.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        let north = bearing_deg(origin, GeoPoint::new(1.0, 0.0)).unwrap();
        let east = bearing_deg(origin, GeoPoint::new(0.0, 1.0)).unwrap();
        let south = bearing_deg(origin, GeoPoint::new(-1.0, 0.0)).unwrap();
        let west = bearing_deg(origin, GeoPoint::new(0.0, -1.0)).unwrap();
        assert!(north.abs() < 1e-9);
        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_undefined_for_coincident_points() {
        assert!(bearing_deg(ICN_33L, ICN_33L).is_none());
        assert!(cross_track_nm(ICN_33L, ICN_33L, 333.0).is_none());
        assert!(along_track_nm(ICN_33L, ICN_33L, 333.0).is_none());
    }

    #[test]
    fn test_cross_track_sign_follows_side() {
        let origin = GeoPoint::new(0.0, 0.0);
        let right = destination(origin, 90.0, 0.2);
        let left = destination(origin, 270.0, 0.2);
        let xt_right = cross_track_nm(right, origin, 0.0).unwrap();
        let xt_left = cross_track_nm(left, origin, 0.0).unwrap();
        assert!((xt_right - 0.2).abs() < 1e-6, "got {xt_right}");
        assert!((xt_left + 0.2).abs() < 1e-6, "got {xt_left}");
    }

    #[test]
    fn test_point_on_course_line_has_zero_cross_track() {
        let behind = destination(ICN_33L, 153.0, 5.0);
        let xt = cross_track_nm(behind, ICN_33L, 333.0).unwrap();
        assert!(xt.abs() < 1e-6, "got {xt}");
    }

    #[test]
    fn test_along_track_sign() {
        let ahead = destination(ICN_33L, 333.0, 3.0);
        let behind = destination(ICN_33L, 153.0, 3.0);
        let at_ahead = along_track_nm(ahead, ICN_33L, 333.0).unwrap();
        let at_behind = along_track_nm(behind, ICN_33L, 333.0).unwrap();
        assert!((at_ahead - 3.0).abs() < 1e-6, "got {at_ahead}");
        assert!((at_behind + 3.0).abs() < 1e-6, "got {at_behind}");
    }

    #[test]
    fn test_destination_round_trips_distance_and_bearing() {
        let p = destination(ICN_33L, 45.0, 7.5);
        assert!((distance_nm(ICN_33L, p) - 7.5).abs() < 1e-6);
        assert!((bearing_deg(ICN_33L, p).unwrap() - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angles() {
        assert_eq!(normalize_deg(-10.0), 350.0);
        assert_eq!(normalize_deg(720.0), 0.0);
        assert_eq!(normalize_signed_deg(190.0), -170.0);
        assert_eq!(normalize_signed_deg(-190.0), 170.0);
        assert_eq!(normalize_signed_deg(180.0), 180.0);
        assert_eq!(normalize_signed_deg(-180.0), 180.0);
        assert!(normalize_deg(-1e-20) < 360.0);
    }

    #[test]
    fn test_point_validity() {
        assert!(ICN_33L.is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
