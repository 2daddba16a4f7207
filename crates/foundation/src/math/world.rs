use serde::{Deserialize, Serialize};

use super::{Vec2, Vec3};

/// Altitude assumed when a 2D map point is turned back into a world position.
pub const SEA_LEVEL: i64 = 64;

/// Integer block position in Minecraft world space.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldCoord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl WorldCoord {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Rounds a continuous world position to the nearest block.
    ///
    /// Halves round toward positive infinity, so `-2.5` becomes `-2`.
    pub fn round(world: Vec3) -> Self {
        Self::new(round_half_up(world.x), round_half_up(world.y), round_half_up(world.z))
    }
}

fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

impl From<WorldCoord> for Vec3 {
    fn from(c: WorldCoord) -> Self {
        Vec3::new(c.x as f64, c.y as f64, c.z as f64)
    }
}

impl std::fmt::Display for WorldCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// A point in the map library's plane (Leaflet `CRS.Simple`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

impl MapPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Per-map constants describing how world axes land on the rendered image.
///
/// Produced by the tile renderer next to the tiles; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldVectors {
    pub origin: Vec2,
    pub x_axis: Vec2,
    pub y_axis: Vec2,
    pub z_axis: Vec2,
    #[serde(default)]
    pub y_offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_min: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_size: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_position: Option<WorldCoord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_view: Option<WorldCoord>,
    #[serde(default)]
    pub world_name: String,
    #[serde(default, deserialize_with = "crate::text::lenient_u64")]
    pub num_chunks: u64,
    /// Square kilometres, pre-formatted by the renderer.
    #[serde(default, deserialize_with = "crate::text::lenient_string")]
    pub surface_area: String,
    #[serde(default, deserialize_with = "crate::text::lenient_u64")]
    pub num_players: u64,
    #[serde(default, deserialize_with = "crate::text::lenient_u64")]
    pub world_size_in_bytes: u64,
}

impl WorldVectors {
    /// Axis-aligned top-down vectors: one block per pixel, world z grows down the image.
    pub fn top_down() -> Self {
        Self {
            origin: Vec2::ZERO,
            x_axis: Vec2::new(1.0, 0.0),
            y_axis: Vec2::ZERO,
            z_axis: Vec2::new(0.0, 1.0),
            y_offset: 0,
            map_min: None,
            map_size: None,
            spawn_position: None,
            start_view: None,
            world_name: String::new(),
            num_chunks: 0,
            surface_area: String::new(),
            num_players: 0,
            world_size_in_bytes: 0,
        }
    }

    /// Where a fresh view of this map should look.
    pub fn default_view(&self) -> WorldCoord {
        self.start_view
            .or(self.spawn_position)
            .unwrap_or(WorldCoord::new(0, SEA_LEVEL, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::{SEA_LEVEL, Vec3, WorldCoord, WorldVectors};

    #[test]
    fn round_matches_half_up() {
        assert_eq!(WorldCoord::round(Vec3::new(1.5, 2.4, -2.5)), WorldCoord::new(2, 2, -2));
        assert_eq!(WorldCoord::round(Vec3::new(-0.49, 63.6, 10.0)), WorldCoord::new(0, 64, 10));
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(WorldCoord::new(-12, 70, 3).to_string(), "-12, 70, 3");
    }

    #[test]
    fn default_view_prefers_start_view_then_spawn() {
        let mut v = WorldVectors::top_down();
        assert_eq!(v.default_view(), WorldCoord::new(0, SEA_LEVEL, 0));

        v.spawn_position = Some(WorldCoord::new(5, 70, 5));
        assert_eq!(v.default_view(), WorldCoord::new(5, 70, 5));

        v.start_view = Some(WorldCoord::new(-100, 64, 20));
        assert_eq!(v.default_view(), WorldCoord::new(-100, 64, 20));
    }

    #[test]
    fn deserializes_renderer_output() {
        let raw = r#"{
            "origin": {"x": 1024.0, "y": 512.0},
            "xAxis": {"x": 0.5, "y": 0.25},
            "yAxis": {"x": 0.0, "y": -0.5},
            "zAxis": {"x": -0.5, "y": 0.25},
            "yOffset": 64,
            "mapMin": {"x": -2048, "y": -1024},
            "mapSize": {"x": 4096, "y": 2048},
            "spawnPosition": {"x": 0, "y": 70, "z": 0},
            "worldName": "Survival",
            "numChunks": 1234,
            "surfaceArea": "0.3"
        }"#;
        let v: WorldVectors = serde_json::from_str(raw).unwrap();
        assert_eq!(v.y_offset, 64);
        assert_eq!(v.spawn_position, Some(WorldCoord::new(0, 70, 0)));
        assert!(v.start_view.is_none());
        assert_eq!(v.map_size.map(|s| s.x), Some(4096.0));
        assert_eq!(v.world_name, "Survival");
        assert_eq!(v.num_chunks, 1234);
        assert_eq!(v.surface_area, "0.3");
    }
}
