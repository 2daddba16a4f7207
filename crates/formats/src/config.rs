use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, read_file};

/// Page-level viewer settings chosen at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub max_zoom: u32,
    pub tile_size: u32,
    pub show_spawn: bool,
    pub signs_initially_visible: bool,
    pub players_initially_visible: bool,
    pub portals_initially_visible: bool,
    pub beds_initially_visible: bool,
    pub spawn_initially_visible: bool,
    pub views_initially_visible: bool,
    pub chests_initially_visible: bool,
    pub respawn_anchors_initially_visible: bool,
    pub default_layer_id: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_zoom: 8,
            tile_size: 512,
            show_spawn: true,
            signs_initially_visible: true,
            players_initially_visible: true,
            portals_initially_visible: true,
            beds_initially_visible: true,
            spawn_initially_visible: true,
            views_initially_visible: true,
            chests_initially_visible: false,
            respawn_anchors_initially_visible: true,
            default_layer_id: "LayerA".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ContentError> {
        serde_json::from_str(payload).map_err(ContentError::parse("viewer config"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }
}
