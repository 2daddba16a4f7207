use formats::{BlockStat, EntityLists, LayerDesc, MapContent, ViewerConfig, WorldStats};
use foundation::text::escape_html;
use foundation::{ConfigurationError, Projection, WorldCoord, WorldVectors};
use serde::{Deserialize, Serialize};

use crate::control::ControlState;
use crate::tile::TileSource;
use crate::view::ViewPosition;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        LayerId(s.to_string())
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
    End,
}

impl Dimension {
    /// Parses the renderer's enum name; anything unrecognised is the overworld.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "NETHER" => Dimension::Nether,
            "END" | "THE_END" => Dimension::End,
            _ => Dimension::Overworld,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Overworld => "OVERWORLD",
            Dimension::Nether => "NETHER",
            Dimension::End => "END",
        }
    }
}

/// One selectable base layer: a tile pyramid plus the entities shown over it.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub map_id: String,
    pub map_name: String,
    pub name: String,
    /// Entry in the layer switcher; may carry a disambiguating suffix.
    pub label: String,
    pub dimension: Dimension,
    pub image_format: String,
    pub background_color: String,
    pub entities: EntityLists,
    pub projection: Projection,
    pub view_position: ViewPosition,
    pub control_state: ControlState,
    pub block_stats: Vec<BlockStat>,
    pub world_stats: WorldStats,
}

impl Layer {
    pub fn from_content(
        map: &MapContent,
        desc: &LayerDesc,
        label: String,
        config: &ViewerConfig,
    ) -> Result<Self, ConfigurationError> {
        let projection = Projection::new(map.world_vectors.clone())?;
        let id = LayerId(desc.id.clone());
        let view_position = ViewPosition::new(
            id.clone(),
            map.world_vectors.default_view(),
            0,
            &projection,
        );

        Ok(Self {
            id,
            map_id: map.id.clone(),
            map_name: map.name.clone(),
            name: desc.name.clone(),
            label,
            dimension: Dimension::from_name(&desc.dimension),
            image_format: desc.image_format.clone(),
            background_color: desc.background_color.clone(),
            entities: map.entities.merged(&desc.entities),
            projection,
            view_position,
            control_state: ControlState::from_config(config),
            block_stats: map.block_stats.clone(),
            world_stats: map.world_stats.clone(),
        })
    }

    pub fn world_vectors(&self) -> &WorldVectors {
        self.projection.world_vectors()
    }

    pub fn tile_source(&self) -> TileSource {
        TileSource {
            map_id: self.map_id.clone(),
            layer_id: self.id.0.clone(),
            image_format: self.image_format.clone(),
        }
    }

    pub fn attribution(&self) -> String {
        format!(
            r#"<a href="https://github.com/tectonicus/tectonicus">Tectonicus</a> - <a tabindex="0" id="mapInfo">{}</a>"#,
            escape_html(&self.map_name)
        )
    }

    pub fn compass_url(&self) -> String {
        format!("{}/Compass.png", self.map_id)
    }

    pub fn spawn_position(&self) -> Option<WorldCoord> {
        self.world_vectors().spawn_position
    }

    /// Spawn is meaningless in the nether; its marker and control are never shown there.
    pub fn shows_spawn(&self) -> bool {
        self.spawn_position().is_some() && self.dimension != Dimension::Nether
    }
}
