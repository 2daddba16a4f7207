use formats::{
    BedRecord, ChestRecord, EntityLists, PlayerRecord, PortalRecord, RespawnAnchorRecord,
    SignRecord, ViewRecord,
};
use foundation::{Vec3, WorldCoord};
use layers::{Layer, MarkerKind};

/// A borrowed view of one thing to put a marker on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Entity<'a> {
    Spawn(WorldCoord),
    Sign(&'a SignRecord),
    View(&'a ViewRecord),
    Player(&'a PlayerRecord),
    Portal(&'a PortalRecord),
    Bed(&'a BedRecord),
    Chest(&'a ChestRecord),
    RespawnAnchor(&'a RespawnAnchorRecord),
}

impl Entity<'_> {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Entity::Spawn(_) => MarkerKind::Spawn,
            Entity::Sign(_) => MarkerKind::Sign,
            Entity::View(_) => MarkerKind::View,
            Entity::Player(_) => MarkerKind::Player,
            Entity::Portal(_) => MarkerKind::Portal,
            Entity::Bed(_) => MarkerKind::Bed,
            Entity::Chest(_) => MarkerKind::Chest,
            Entity::RespawnAnchor(_) => MarkerKind::RespawnAnchor,
        }
    }

    pub fn world_pos(&self) -> Vec3 {
        match self {
            Entity::Spawn(c) => Vec3::from(*c),
            Entity::Sign(r) => r.world_pos,
            Entity::View(r) => r.world_pos,
            Entity::Player(r) => r.world_pos,
            Entity::Portal(r) => r.world_pos,
            Entity::Bed(r) => r.world_pos,
            Entity::Chest(r) => r.world_pos,
            Entity::RespawnAnchor(r) => r.world_pos,
        }
    }
}

/// Entities of `kind` from plain lists, in list order. Never yields spawn.
pub fn entities_of(lists: &EntityLists, kind: MarkerKind) -> Vec<Entity<'_>> {
    match kind {
        MarkerKind::Spawn => Vec::new(),
        MarkerKind::Sign => lists.signs.iter().map(Entity::Sign).collect(),
        MarkerKind::View => lists.views.iter().map(Entity::View).collect(),
        MarkerKind::Player => lists.players.iter().map(Entity::Player).collect(),
        MarkerKind::Portal => lists.portals.iter().map(Entity::Portal).collect(),
        MarkerKind::Bed => lists.beds.iter().map(Entity::Bed).collect(),
        MarkerKind::Chest => lists.chests.iter().map(Entity::Chest).collect(),
        MarkerKind::RespawnAnchor => lists.respawn_anchors.iter().map(Entity::RespawnAnchor).collect(),
    }
}

/// Everything of `kind` that gets a marker on `layer`.
///
/// Spawn yields one entity when `show_spawn` is set and the layer shows a
/// spawn point.
pub fn layer_entities(layer: &Layer, kind: MarkerKind, show_spawn: bool) -> Vec<Entity<'_>> {
    match kind {
        MarkerKind::Spawn => match layer.spawn_position() {
            Some(spawn) if show_spawn && layer.shows_spawn() => vec![Entity::Spawn(spawn)],
            _ => Vec::new(),
        },
        other => entities_of(&layer.entities, other),
    }
}

/// Whether the toggle control for `kind` belongs on `layer` at all.
pub fn has_control(layer: &Layer, kind: MarkerKind) -> bool {
    match kind {
        MarkerKind::Spawn => layer.shows_spawn(),
        other => !entities_of(&layer.entities, other).is_empty(),
    }
}
