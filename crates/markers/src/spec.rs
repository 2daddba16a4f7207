use formats::{Localizations, PlayerRecord};
use foundation::percent::encode_component;
use foundation::{MapPoint, Projection};
use layers::MarkerKind;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::{chest, popup};

pub const ICON_ANCHOR: [i32; 2] = [17, 20];
pub const POPUP_ANCHOR: [i32; 2] = [0, -10];

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopupWidth {
    #[default]
    Default,
    /// Grow to fit the content (view screenshots).
    Auto,
}

/// Everything the host needs to draw one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub kind: MarkerKind,
    pub position: MapPoint,
    pub icon_url: String,
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub popup_html: String,
    pub popup_max_width: PopupWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Player icon chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIcon {
    pub url: String,
}

impl Default for PlayerIcon {
    fn default() -> Self {
        Self {
            url: layers::DEFAULT_PLAYER_ICON.to_string(),
        }
    }
}

/// Skin icon the renderer writes for `player`; the name is percent-encoded.
pub fn player_icon_candidate(player: &PlayerRecord) -> String {
    format!("Images/PlayerIcons/{}.png", encode_component(&player.name))
}

/// Builds the marker for `entity`. `player_icon` is only read for players.
pub fn build_spec(
    entity: Entity<'_>,
    projection: &Projection,
    localizations: &Localizations,
    player_icon: &PlayerIcon,
) -> MarkerSpec {
    let kind = entity.kind();
    let mut spec = MarkerSpec {
        kind,
        position: projection.world_to_map(entity.world_pos()),
        icon_url: kind.icon_url().to_string(),
        icon_anchor: ICON_ANCHOR,
        popup_anchor: POPUP_ANCHOR,
        popup_html: String::new(),
        popup_max_width: PopupWidth::Default,
        tooltip: None,
    };

    match entity {
        Entity::Spawn(pos) => {
            spec.popup_html = popup::spawn(pos);
            spec.tooltip = Some("Spawn Point".to_string());
        }
        Entity::Sign(sign) => spec.popup_html = popup::sign(sign),
        Entity::View(view) => {
            spec.popup_html = popup::view(view);
            spec.popup_max_width = PopupWidth::Auto;
        }
        Entity::Player(player) => {
            spec.icon_url = player_icon.url.clone();
            spec.popup_html = popup::player(player, &player_icon.url);
            spec.tooltip = Some(player.name.clone());
        }
        Entity::Portal(portal) => spec.popup_html = popup::portal(portal),
        Entity::Bed(bed) => spec.popup_html = popup::bed(bed),
        Entity::Chest(c) => spec.popup_html = chest::popup(c, localizations),
        Entity::RespawnAnchor(anchor) => spec.popup_html = popup::respawn_anchor(anchor),
    }
    spec
}
