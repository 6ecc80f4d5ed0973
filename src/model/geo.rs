//! Coordinates, compass headings and great-circle distances.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees. No range validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

/// Initial compass bearing from `start` to `end`, in degrees within `[0, 360)`.
///
/// Uses the spherical forward-azimuth formula. Identical points yield `0`.
pub fn heading(start: Coordinate, end: Coordinate) -> f64 {
    let start_lat = start.lat.to_radians();
    let end_lat = end.lat.to_radians();
    let d_lng = (end.lng - start.lng).to_radians();

    let y = d_lng.sin() * end_lat.cos();
    let x = start_lat.cos() * end_lat.sin() - start_lat.sin() * end_lat.cos() * d_lng.cos();
    let degrees = y.atan2(x).to_degrees();

    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Haversine distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Errors raised when building geometry from raw coordinates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoError {
    /// A path needs a start and at least one further waypoint.
    #[error("path needs at least 2 points, got {0}")]
    InsufficientPoints(usize),
}

/// An ordered waypoint list with at least two points.
///
/// Built once from a driver's registered route and never mutated; the
/// position publisher walks it by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Coordinate>,
}

impl Path {
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeoError> {
        if points.len() < 2 {
            return Err(GeoError::InsufficientPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a `Path` holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    pub fn first(&self) -> Coordinate {
        self.points[0]
    }

    pub fn last(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Heading of the segment leaving `index`, if there is one.
    pub fn segment_heading(&self, index: usize) -> Option<f64> {
        let from = self.get(index)?;
        let to = self.get(index + 1)?;
        Some(heading(from, to))
    }

    /// Distance left to travel from waypoint `from_index` to the end.
    pub fn remaining_distance_km(&self, from_index: usize) -> f64 {
        self.points
            .get(from_index..)
            .unwrap_or(&[])
            .windows(2)
            .map(|w| distance_km(w[0], w[1]))
            .sum()
    }

    /// Total length of the path.
    pub fn length_km(&self) -> f64 {
        self.remaining_distance_km(0)
    }
}

impl TryFrom<Vec<Coordinate>> for Path {
    type Error = GeoError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Path::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YOFF: Coordinate = Coordinate::new(14.7645, -17.3660);
    const PLATEAU: Coordinate = Coordinate::new(14.6937, -17.4441);

    fn angle_diff(a: f64, b: f64) -> f64 {
        (a - b).rem_euclid(360.0)
    }

    #[test]
    fn cardinal_headings() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!((heading(origin, Coordinate::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((heading(origin, Coordinate::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((heading(origin, Coordinate::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((heading(origin, Coordinate::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn heading_stays_in_range() {
        let samples = [
            YOFF,
            PLATEAU,
            Coordinate::new(-33.9, 18.4),
            Coordinate::new(89.9, 179.9),
            Coordinate::new(-89.9, -179.9),
            Coordinate::new(0.0, 180.0),
            Coordinate::new(0.0, -180.0),
            Coordinate::new(14.7645, -17.3660 - 1e-12),
        ];
        for a in samples {
            for b in samples {
                let h = heading(a, b);
                assert!((0.0..360.0).contains(&h), "heading {} out of range for {} -> {}", h, a, b);
            }
        }
    }

    #[test]
    fn identical_points_have_zero_heading() {
        assert_eq!(heading(YOFF, YOFF), 0.0);
    }

    #[test]
    fn reverse_heading_is_opposite() {
        // exact along meridians and the equator
        let a = Coordinate::new(10.0, 5.0);
        let b = Coordinate::new(20.0, 5.0);
        assert!((angle_diff(heading(a, b), heading(b, a)) - 180.0).abs() < 1e-9);
        let c = Coordinate::new(0.0, -3.0);
        let d = Coordinate::new(0.0, 7.0);
        assert!((angle_diff(heading(c, d), heading(d, c)) - 180.0).abs() < 1e-9);

        // city scale
        let forward = heading(YOFF, PLATEAU);
        let back = heading(PLATEAU, YOFF);
        assert!((angle_diff(forward, back) - 180.0).abs() < 0.1);
    }

    #[test]
    fn yoff_to_plateau_is_southwest() {
        let h = heading(YOFF, PLATEAU);
        assert!((h - 226.86).abs() < 0.05, "got {}", h);
    }

    #[test]
    fn haversine_distance() {
        assert!((distance_km(YOFF, PLATEAU) - 11.51).abs() < 0.01);
        assert_eq!(distance_km(YOFF, YOFF), 0.0);
        // one degree of latitude
        let one_deg = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((one_deg - 111.19).abs() < 0.01);
    }

    #[test]
    fn path_requires_two_points() {
        assert_eq!(Path::new(vec![]), Err(GeoError::InsufficientPoints(0)));
        assert_eq!(Path::new(vec![YOFF]), Err(GeoError::InsufficientPoints(1)));
        let path = Path::try_from(vec![YOFF, PLATEAU]).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.first(), YOFF);
        assert_eq!(path.last(), PLATEAU);
    }

    #[test]
    fn path_distances_and_headings() {
        let mid = Coordinate::new(14.7350, -17.4000);
        let path = Path::new(vec![YOFF, mid, PLATEAU]).unwrap();
        let total = distance_km(YOFF, mid) + distance_km(mid, PLATEAU);
        assert!((path.length_km() - total).abs() < 1e-9);
        assert!((path.remaining_distance_km(1) - distance_km(mid, PLATEAU)).abs() < 1e-9);
        assert_eq!(path.remaining_distance_km(2), 0.0);
        assert_eq!(path.remaining_distance_km(7), 0.0);
        assert_eq!(path.segment_heading(0), Some(heading(YOFF, mid)));
        assert_eq!(path.segment_heading(2), None);
    }
}
