//! Static content written by the renderer next to the tile pyramids.
//!
//! The document is a list of maps; each map carries its world vectors, its
//! layers and the entity lists found while rendering. Layers may carry entity
//! lists of their own, which extend the map's lists for that layer only.

use std::path::Path;

use foundation::{Vec3, WorldVectors};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, read_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapContent {
    pub id: String,
    pub name: String,
    pub world_vectors: WorldVectors,
    #[serde(default)]
    pub layers: Vec<LayerDesc>,
    #[serde(flatten)]
    pub entities: EntityLists,
    #[serde(default)]
    pub block_stats: Vec<BlockStat>,
    #[serde(default)]
    pub world_stats: WorldStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDesc {
    pub id: String,
    pub name: String,
    /// Renderer enum name: `OVERWORLD`, `NETHER` or `END`.
    #[serde(default)]
    pub dimension: String,
    #[serde(default = "default_image_format")]
    pub image_format: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_flag"
    )]
    pub is_png: Option<bool>,
    #[serde(flatten)]
    pub entities: EntityLists,
}

fn default_image_format() -> String {
    "png".to_string()
}

// `isPng` is written as the quoted string "true"/"false".
fn lenient_flag<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let raw = foundation::text::lenient_string(d)?;
    Ok(match raw.trim() {
        "" => None,
        s => Some(s.eq_ignore_ascii_case("true")),
    })
}

/// Every kind of entity the renderer exports, by list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLists {
    #[serde(default)]
    pub signs: Vec<SignRecord>,
    #[serde(default)]
    pub chests: Vec<ChestRecord>,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub portals: Vec<PortalRecord>,
    #[serde(default)]
    pub beds: Vec<BedRecord>,
    #[serde(default)]
    pub respawn_anchors: Vec<RespawnAnchorRecord>,
    #[serde(default)]
    pub views: Vec<ViewRecord>,
}

impl EntityLists {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.signs.len()
            + self.chests.len()
            + self.players.len()
            + self.portals.len()
            + self.beds.len()
            + self.respawn_anchors.len()
            + self.views.len()
    }

    /// Map lists followed by the layer's own lists.
    pub fn merged(&self, extra: &EntityLists) -> EntityLists {
        fn cat<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
            a.iter().chain(b).cloned().collect()
        }
        EntityLists {
            signs: cat(&self.signs, &extra.signs),
            chests: cat(&self.chests, &extra.chests),
            players: cat(&self.players, &extra.players),
            portals: cat(&self.portals, &extra.portals),
            beds: cat(&self.beds, &extra.beds),
            respawn_anchors: cat(&self.respawn_anchors, &extra.respawn_anchors),
            views: cat(&self.views, &extra.views),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRecord {
    pub world_pos: Vec3,
    #[serde(default)]
    pub text1: String,
    #[serde(default)]
    pub text2: String,
    #[serde(default)]
    pub text3: String,
    #[serde(default)]
    pub text4: String,
}

impl SignRecord {
    pub fn lines(&self) -> [&str; 4] {
        [&self.text1, &self.text2, &self.text3, &self.text4]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChestRecord {
    pub world_pos: Vec3,
    #[serde(default)]
    pub name: String,
    /// Double chest; items from the left half use slots 27..54.
    #[serde(default)]
    pub large: bool,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Namespaced id, e.g. `minecraft:diamond_sword`.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// Dye colour as a packed 0xRRGGBB integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub slot: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<ArmorTrim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchantments: Option<Vec<Enchantment>>,
}

fn one() -> u32 {
    1
}

impl ItemRecord {
    /// `(namespace, id)`; ids without a namespace are treated as `minecraft`.
    pub fn namespaced(&self) -> (&str, &str) {
        split_namespaced(&self.id)
    }
}

pub fn split_namespaced(id: &str) -> (&str, &str) {
    id.split_once(':').unwrap_or(("minecraft", id))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorTrim {
    pub pattern: String,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    pub id: String,
    #[serde(default = "one")]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub world_pos: Vec3,
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub air: f64,
    #[serde(default)]
    pub xp_level: i64,
    #[serde(default)]
    pub xp_total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalRecord {
    pub world_pos: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedRecord {
    pub world_pos: Vec3,
    #[serde(default)]
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespawnAnchorRecord {
    pub world_pos: Vec3,
    #[serde(default)]
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    pub world_pos: Vec3,
    #[serde(default)]
    pub text: String,
    pub image_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStat {
    pub name: String,
    /// Locale-formatted by the renderer ("1,234").
    #[serde(deserialize_with = "foundation::text::lenient_string")]
    pub count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldStats {
    #[serde(default, deserialize_with = "foundation::text::lenient_u64")]
    pub num_chunks: u64,
    #[serde(default, deserialize_with = "foundation::text::lenient_u64")]
    pub num_portals: u64,
    #[serde(default, deserialize_with = "foundation::text::lenient_u64")]
    pub num_players: u64,
}

pub fn contents_from_json_str(payload: &str) -> Result<Vec<MapContent>, ContentError> {
    serde_json::from_str(payload).map_err(ContentError::parse("contents"))
}

pub fn load_contents(path: impl AsRef<Path>) -> Result<Vec<MapContent>, ContentError> {
    let payload = read_file(path.as_ref())?;
    let contents = contents_from_json_str(&payload)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        maps = contents.len(),
        "loaded contents"
    );
    Ok(contents)
}
