//! Lat/long normalisation used by the Google Maps flavour of the viewer.
//!
//! Pixel points inside `mapMin .. mapMin + mapSize` are stretched onto a box
//! `latitude_range` degrees tall and 180 degrees wide, centred on (0, 0).

use serde::{Deserialize, Serialize};

use super::{Vec2, WorldVectors};
use crate::error::ConfigurationError;

pub const DEFAULT_LATITUDE_RANGE: f64 = 10.0;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngProjection {
    latitude_range: f64,
    map_min: Vec2,
    map_size: Vec2,
}

impl LatLngProjection {
    pub fn new(latitude_range: f64, vectors: &WorldVectors) -> Result<Self, ConfigurationError> {
        if !(latitude_range > 0.0 && latitude_range <= 180.0) {
            return Err(ConfigurationError::InvalidLatitudeRange(latitude_range));
        }
        let (Some(map_min), Some(map_size)) = (vectors.map_min, vectors.map_size) else {
            return Err(ConfigurationError::MissingMapBounds);
        };
        if !map_min.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "mapMin" });
        }
        if !map_size.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "mapSize" });
        }
        if map_size.x == 0.0 || map_size.y == 0.0 {
            return Err(ConfigurationError::DegenerateMapBounds);
        }
        Ok(Self {
            latitude_range,
            map_min,
            map_size,
        })
    }

    pub fn point_to_lat_lng(&self, point: Vec2) -> LatLng {
        let nx = (point.x - self.map_min.x) / self.map_size.x;
        let ny = (point.y - self.map_min.y) / self.map_size.y;
        LatLng {
            lat: nx * self.latitude_range - self.latitude_range / 2.0,
            lng: ny * 180.0 - 90.0,
        }
    }

    pub fn lat_lng_to_point(&self, ll: LatLng) -> Vec2 {
        let nx = ll.lat / self.latitude_range + 0.5;
        let ny = ll.lng / 180.0 + 0.5;
        Vec2::new(
            nx * self.map_size.x + self.map_min.x,
            ny * self.map_size.y + self.map_min.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LATITUDE_RANGE, LatLng, LatLngProjection};
    use crate::error::ConfigurationError;
    use crate::math::{Vec2, WorldVectors};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "expected {a} ~= {b}");
    }

    fn bounded() -> WorldVectors {
        WorldVectors {
            map_min: Some(Vec2::new(-2048.0, -1024.0)),
            map_size: Some(Vec2::new(4096.0, 2048.0)),
            ..WorldVectors::top_down()
        }
    }

    #[test]
    fn corners_map_to_box_edges() {
        let p = LatLngProjection::new(DEFAULT_LATITUDE_RANGE, &bounded()).unwrap();
        let min = p.point_to_lat_lng(Vec2::new(-2048.0, -1024.0));
        assert_eq!(min, LatLng { lat: -5.0, lng: -90.0 });
        let centre = p.point_to_lat_lng(Vec2::new(0.0, 0.0));
        assert_eq!(centre, LatLng { lat: 0.0, lng: 0.0 });
    }

    #[test]
    fn lat_lng_round_trip() {
        let p = LatLngProjection::new(DEFAULT_LATITUDE_RANGE, &bounded()).unwrap();
        let px = Vec2::new(311.25, -777.5);
        let back = p.lat_lng_to_point(p.point_to_lat_lng(px));
        assert_close(back.x, px.x, 1e-9);
        assert_close(back.y, px.y, 1e-9);
    }

    #[test]
    fn requires_bounds() {
        assert_eq!(
            LatLngProjection::new(10.0, &WorldVectors::top_down()),
            Err(ConfigurationError::MissingMapBounds)
        );
        let mut v = bounded();
        v.map_size = Some(Vec2::new(0.0, 10.0));
        assert_eq!(
            LatLngProjection::new(10.0, &v),
            Err(ConfigurationError::DegenerateMapBounds)
        );
        assert_eq!(
            LatLngProjection::new(0.0, &bounded()),
            Err(ConfigurationError::InvalidLatitudeRange(0.0))
        );
    }
}
