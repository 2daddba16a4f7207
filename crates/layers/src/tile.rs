use serde::{Deserialize, Serialize};

/// Tile address as handed out by the map library's grid layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl TileCoord {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// Where one layer's tile pyramid lives relative to the viewer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    pub map_id: String,
    pub layer_id: String,
    pub image_format: String,
}

/// Tiles are binned 16x16 per directory to keep directory sizes bounded.
pub const TILE_BIN: i64 = 16;

impl TileSource {
    /// `{mapId}/{layerId}/Zoom{z}/{x%16}/{y%16}/tile_{x}_{y}.{format}`
    ///
    /// The bin uses a truncated remainder, so negative tiles land in
    /// negative bins (`-17 % 16 == -1`).
    pub fn tile_url(&self, c: TileCoord) -> String {
        format!(
            "{}/{}/Zoom{}/{}/{}/tile_{}_{}.{}",
            self.map_id,
            self.layer_id,
            c.z,
            c.x % TILE_BIN,
            c.y % TILE_BIN,
            c.x,
            c.y,
            self.image_format
        )
    }
}
