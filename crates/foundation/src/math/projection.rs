//! World ↔ map conversion.
//!
//! The renderer exports, per map, the screen-space image of the world origin and
//! of the three unit axes. Going world → map is therefore a plain affine
//! combination; going back only has two equations, so the altitude must be
//! supplied (or assumed) by the caller.

use super::{MapPoint, SEA_LEVEL, Vec2, Vec3, WorldVectors};
use crate::error::ConfigurationError;

/// Below this |det| the x/z axes are treated as parallel.
pub const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    vectors: WorldVectors,
    det: f64,
}

impl Projection {
    pub fn new(vectors: WorldVectors) -> Result<Self, ConfigurationError> {
        let fields = [
            ("origin", vectors.origin),
            ("xAxis", vectors.x_axis),
            ("yAxis", vectors.y_axis),
            ("zAxis", vectors.z_axis),
        ];
        for (field, v) in fields {
            if !v.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
        }

        let det = vectors.x_axis.perp_dot(vectors.z_axis);
        if det.abs() <= SINGULAR_EPSILON {
            return Err(ConfigurationError::SingularAxes { det });
        }

        Ok(Self { vectors, det })
    }

    pub fn world_vectors(&self) -> &WorldVectors {
        &self.vectors
    }

    /// World position to rendered-image pixel space.
    pub fn world_to_pixel(&self, world: impl Into<Vec3>) -> Vec2 {
        let w = world.into();
        let v = &self.vectors;
        v.origin + v.x_axis * w.x + v.y_axis * (w.y + v.y_offset as f64) + v.z_axis * w.z
    }

    /// World position to the map library's plane.
    pub fn world_to_map(&self, world: impl Into<Vec3>) -> MapPoint {
        pixel_to_map(self.world_to_pixel(world))
    }

    /// Map point back to the world, assuming the point lies at sea level.
    pub fn map_to_world(&self, point: MapPoint) -> Vec3 {
        self.map_to_world_at(point, SEA_LEVEL as f64)
    }

    /// Map point back to the world at a known altitude `y`.
    pub fn map_to_world_at(&self, point: MapPoint, y: f64) -> Vec3 {
        let v = &self.vectors;
        let rhs = map_to_pixel(point) - v.origin - v.y_axis * (y + v.y_offset as f64);

        // rhs = x_axis * x + z_axis * z, solved with Cramer's rule.
        let x = rhs.perp_dot(v.z_axis) / self.det;
        let z = v.x_axis.perp_dot(rhs) / self.det;
        Vec3::new(x, y, z)
    }
}

/// Pixel space to Leaflet `CRS.Simple` (lat is the flipped, halved image y).
pub fn pixel_to_map(p: Vec2) -> MapPoint {
    MapPoint::new(p.y / -2.0, p.x / 2.0)
}

pub fn map_to_pixel(m: MapPoint) -> Vec2 {
    Vec2::new(m.lng * 2.0, m.lat * -2.0)
}

#[cfg(test)]
mod tests {
    use super::{Projection, map_to_pixel, pixel_to_map};
    use crate::error::ConfigurationError;
    use crate::math::{MapPoint, Vec2, Vec3, WorldCoord, WorldVectors};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    /// Oblique vectors shaped like an isometric render.
    fn oblique() -> WorldVectors {
        WorldVectors {
            origin: Vec2::new(1024.0, 768.0),
            x_axis: Vec2::new(3.0, 1.5),
            y_axis: Vec2::new(0.0, -3.5),
            z_axis: Vec2::new(-3.0, 1.5),
            y_offset: 64,
            ..WorldVectors::top_down()
        }
    }

    #[test]
    fn top_down_swaps_and_halves() {
        let p = Projection::new(WorldVectors::top_down()).unwrap();
        let m = p.world_to_map(WorldCoord::new(10, 64, 20));
        assert_eq!(m, MapPoint::new(-10.0, 5.0));
    }

    #[test]
    fn y_offset_shifts_along_y_axis() {
        let mut v = oblique();
        v.y_offset = 0;
        let without = Projection::new(v.clone()).unwrap();
        v.y_offset = 64;
        let with = Projection::new(v).unwrap();

        let a = without.world_to_pixel(WorldCoord::new(0, 0, 0));
        let b = with.world_to_pixel(WorldCoord::new(0, 0, 0));
        assert_close(b.y - a.y, -3.5 * 64.0, 1e-12);
        assert_close(b.x, a.x, 1e-12);
    }

    #[test]
    fn world_to_map_is_deterministic() {
        let p = Projection::new(oblique()).unwrap();
        let w = Vec3::new(-1234.5, 80.0, 987.25);
        let first = p.world_to_map(w);
        for _ in 0..8 {
            assert_eq!(p.world_to_map(w), first);
        }
    }

    #[test]
    fn round_trip_at_sea_level() {
        let p = Projection::new(oblique()).unwrap();
        for (x, z) in [(0.0, 0.0), (-1500.0, 320.0), (12345.0, -6789.0), (0.5, 0.5)] {
            let w = Vec3::new(x, 64.0, z);
            let back = p.map_to_world(p.world_to_map(w));
            assert_close(back.x, x, 1e-9);
            assert_close(back.z, z, 1e-9);
            assert_close(back.y, 64.0, 0.0);
        }
    }

    #[test]
    fn round_trip_at_known_altitude() {
        let p = Projection::new(oblique()).unwrap();
        let w = Vec3::new(-42.0, 120.0, 17.0);
        let back = p.map_to_world_at(p.world_to_map(w), 120.0);
        assert_close(back.x, w.x, 1e-9);
        assert_close(back.z, w.z, 1e-9);
    }

    #[test]
    fn top_down_ignores_altitude() {
        let p = Projection::new(WorldVectors::top_down()).unwrap();
        let w = Vec3::new(300.0, 12.0, -40.0);
        let back = p.map_to_world(p.world_to_map(w));
        assert_close(back.x, w.x, 1e-9);
        assert_close(back.z, w.z, 1e-9);
    }

    #[test]
    fn rejects_parallel_axes() {
        let v = WorldVectors {
            x_axis: Vec2::new(1.0, 1.0),
            z_axis: Vec2::new(2.0, 2.0),
            ..WorldVectors::top_down()
        };
        assert!(matches!(
            Projection::new(v),
            Err(ConfigurationError::SingularAxes { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_vectors() {
        let v = WorldVectors {
            origin: Vec2::new(f64::NAN, 0.0),
            ..WorldVectors::top_down()
        };
        assert_eq!(
            Projection::new(v),
            Err(ConfigurationError::NonFinite { field: "origin" })
        );
    }

    #[test]
    fn plane_swap_inverts() {
        let px = Vec2::new(-37.0, 91.5);
        assert_eq!(map_to_pixel(pixel_to_map(px)), px);
    }
}
