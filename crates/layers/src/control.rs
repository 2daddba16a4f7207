use std::collections::BTreeMap;

use formats::ViewerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Spawn,
    Sign,
    View,
    Player,
    Portal,
    Bed,
    Chest,
    RespawnAnchor,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 8] = [
        MarkerKind::Spawn,
        MarkerKind::Sign,
        MarkerKind::View,
        MarkerKind::Player,
        MarkerKind::Portal,
        MarkerKind::Bed,
        MarkerKind::Chest,
        MarkerKind::RespawnAnchor,
    ];

    /// Toggle control title; also used as the control's DOM key.
    pub fn title(self) -> &'static str {
        match self {
            MarkerKind::Spawn => "spawn",
            MarkerKind::Sign => "signs",
            MarkerKind::View => "views",
            MarkerKind::Player => "players",
            MarkerKind::Portal => "portals",
            MarkerKind::Bed => "beds",
            MarkerKind::Chest => "chests",
            MarkerKind::RespawnAnchor => "respawn anchors",
        }
    }

    pub fn icon_url(self) -> &'static str {
        match self {
            MarkerKind::Spawn => "Images/Spawn.png",
            MarkerKind::Sign => "Images/Sign.png",
            MarkerKind::View => "Images/Picture.png",
            MarkerKind::Player => DEFAULT_PLAYER_ICON,
            MarkerKind::Portal => "Images/Portal.png",
            MarkerKind::Bed => "Images/Bed.png",
            MarkerKind::Chest => "Images/Chest.png",
            MarkerKind::RespawnAnchor => "Images/RespawnAnchor.png",
        }
    }

    pub fn initially_visible(self, config: &ViewerConfig) -> bool {
        match self {
            MarkerKind::Spawn => config.spawn_initially_visible,
            MarkerKind::Sign => config.signs_initially_visible,
            MarkerKind::View => config.views_initially_visible,
            MarkerKind::Player => config.players_initially_visible,
            MarkerKind::Portal => config.portals_initially_visible,
            MarkerKind::Bed => config.beds_initially_visible,
            MarkerKind::Chest => config.chests_initially_visible,
            MarkerKind::RespawnAnchor => config.respawn_anchors_initially_visible,
        }
    }
}

pub const DEFAULT_PLAYER_ICON: &str = "Images/PlayerIcons/Tectonicus_Default_Player_Icon.png";

/// Checked state of every toggle control, saved per layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    checked: BTreeMap<MarkerKind, bool>,
}

impl ControlState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            checked: MarkerKind::ALL
                .iter()
                .map(|&k| (k, k.initially_visible(config)))
                .collect(),
        }
    }

    pub fn is_checked(&self, kind: MarkerKind) -> bool {
        self.checked.get(&kind).copied().unwrap_or(false)
    }

    pub fn set(&mut self, kind: MarkerKind, checked: bool) {
        self.checked.insert(kind, checked);
    }

    /// Flips `kind` and returns the new state.
    pub fn toggle(&mut self, kind: MarkerKind) -> bool {
        let next = !self.is_checked(kind);
        self.set(kind, next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlState, MarkerKind};
    use formats::ViewerConfig;

    #[test]
    fn starts_from_config() {
        let state = ControlState::from_config(&ViewerConfig::default());
        assert!(state.is_checked(MarkerKind::Sign));
        assert!(!state.is_checked(MarkerKind::Chest));
    }

    #[test]
    fn toggle_flips() {
        let mut state = ControlState::default();
        assert!(state.toggle(MarkerKind::Bed));
        assert!(state.is_checked(MarkerKind::Bed));
        assert!(!state.toggle(MarkerKind::Bed));
    }
}
