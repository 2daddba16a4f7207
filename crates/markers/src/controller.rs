//! Owns the live markers of the active layer, one set per [`MarkerKind`].

use std::collections::BTreeMap;

use formats::Localizations;
use foundation::Generation;
use layers::{Layer, MarkerKind};

use crate::entity::{Entity, layer_entities};
use crate::host::{MarkerHandle, MarkerHost, ProbeTicket};
use crate::spec::{PlayerIcon, build_spec, player_icon_candidate};

#[derive(Debug, Clone, Default)]
struct MarkerSet {
    handles: Vec<MarkerHandle>,
    visible: bool,
}

#[derive(Debug, Clone)]
pub struct MarkerController {
    sets: BTreeMap<MarkerKind, MarkerSet>,
    localizations: Localizations,
    show_spawn: bool,
}

impl MarkerController {
    pub fn new(localizations: Localizations, show_spawn: bool) -> Self {
        Self {
            sets: BTreeMap::new(),
            localizations,
            show_spawn,
        }
    }

    /// Whether the spawn marker is configured at all.
    pub fn shows_spawn(&self) -> bool {
        self.show_spawn
    }

    /// Replaces the translation table. Callers rebuild chest markers afterwards.
    pub fn set_localizations(&mut self, localizations: Localizations) {
        self.localizations = localizations;
    }

    /// Destroys every marker of `kind` and creates one per entity on `layer`.
    ///
    /// Player markers start with the default icon; an icon probe tagged with
    /// `generation` is issued for each of them.
    pub fn refresh<H>(
        &mut self,
        host: &mut H,
        kind: MarkerKind,
        layer: &Layer,
        visible: bool,
        generation: Generation,
    ) where
        H: MarkerHost + ?Sized,
    {
        let set = self.sets.entry(kind).or_default();
        for handle in set.handles.drain(..) {
            host.remove_marker(handle);
        }
        set.visible = visible;

        let default_icon = PlayerIcon::default();
        for (index, entity) in layer_entities(layer, kind, self.show_spawn).into_iter().enumerate() {
            let spec = build_spec(entity, &layer.projection, &self.localizations, &default_icon);
            set.handles.push(host.add_marker(&spec, visible));

            if let Entity::Player(player) = entity {
                let ticket = ProbeTicket {
                    generation,
                    layer_id: layer.id.clone(),
                    index,
                };
                host.probe_icon(ticket, &player_icon_candidate(player));
            }
        }

        tracing::debug!(?kind, layer = %layer.id, markers = set.handles.len(), "markers refreshed");
    }

    /// Rebuilds every kind, using the layer's saved checkbox state for visibility.
    pub fn refresh_all<H>(&mut self, host: &mut H, layer: &Layer, generation: Generation)
    where
        H: MarkerHost + ?Sized,
    {
        for kind in MarkerKind::ALL {
            let visible = layer.control_state.is_checked(kind);
            self.refresh(host, kind, layer, visible, generation);
        }
    }

    /// Shows or hides the markers of `kind` without rebuilding them.
    pub fn set_visible<H>(&mut self, host: &mut H, kind: MarkerKind, visible: bool)
    where
        H: MarkerHost + ?Sized,
    {
        let set = self.sets.entry(kind).or_default();
        if set.visible == visible {
            return;
        }
        set.visible = visible;
        for &handle in &set.handles {
            host.set_marker_visible(handle, visible);
        }
    }

    pub fn is_visible(&self, kind: MarkerKind) -> bool {
        self.sets.get(&kind).is_some_and(|s| s.visible)
    }

    /// Applies the outcome of a player icon probe.
    ///
    /// Returns whether the host was touched. Completions from an older
    /// generation or another layer are dropped, as are failed loads.
    pub fn on_icon_probe<H>(
        &mut self,
        host: &mut H,
        ticket: &ProbeTicket,
        loaded: bool,
        current: Generation,
        layer: &Layer,
    ) -> bool
    where
        H: MarkerHost + ?Sized,
    {
        if !ticket.generation.is_current(current) || ticket.layer_id != layer.id {
            tracing::debug!(
                ?ticket,
                current = current.get(),
                active = %layer.id,
                "stale icon probe dropped"
            );
            return false;
        }
        if !loaded {
            return false;
        }

        let Some(player) = layer.entities.players.get(ticket.index) else {
            tracing::warn!(?ticket, "icon probe for unknown player");
            return false;
        };
        let Some(&handle) = self
            .sets
            .get(&MarkerKind::Player)
            .and_then(|s| s.handles.get(ticket.index))
        else {
            return false;
        };

        let icon = PlayerIcon {
            url: player_icon_candidate(player),
        };
        let spec = build_spec(
            Entity::Player(player),
            &layer.projection,
            &self.localizations,
            &icon,
        );
        host.update_marker(handle, &spec);
        true
    }

    pub fn count(&self, kind: MarkerKind) -> usize {
        self.sets.get(&kind).map_or(0, |s| s.handles.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::MarkerController;
    use crate::host::{MarkerHandle, MarkerHost, ProbeTicket};
    use crate::spec::MarkerSpec;
    use formats::{Localizations, ViewerConfig, load_contents};
    use foundation::Generation;
    use layers::{LayerId, LayerRegistry, MarkerKind};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingHost {
        next: u64,
        pub markers: BTreeMap<MarkerHandle, (MarkerSpec, bool)>,
        pub probes: Vec<(ProbeTicket, String)>,
        pub calls: usize,
    }

    impl MarkerHost for RecordingHost {
        fn add_marker(&mut self, spec: &MarkerSpec, visible: bool) -> MarkerHandle {
            self.calls += 1;
            self.next += 1;
            let handle = MarkerHandle(self.next);
            self.markers.insert(handle, (spec.clone(), visible));
            handle
        }

        fn remove_marker(&mut self, handle: MarkerHandle) {
            self.calls += 1;
            self.markers.remove(&handle);
        }

        fn set_marker_visible(&mut self, handle: MarkerHandle, visible: bool) {
            self.calls += 1;
            if let Some(m) = self.markers.get_mut(&handle) {
                m.1 = visible;
            }
        }

        fn update_marker(&mut self, handle: MarkerHandle, spec: &MarkerSpec) {
            self.calls += 1;
            if let Some(m) = self.markers.get_mut(&handle) {
                m.0 = spec.clone();
            }
        }

        fn probe_icon(&mut self, ticket: ProbeTicket, url: &str) {
            self.probes.push((ticket, url.to_string()));
        }
    }

    impl RecordingHost {
        fn of_kind(&self, kind: MarkerKind) -> Vec<&MarkerSpec> {
            self.markers
                .values()
                .filter(|(s, _)| s.kind == kind)
                .map(|(s, _)| s)
                .collect()
        }
    }

    fn registry() -> LayerRegistry {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../apps/web/assets/contents.json");
        let contents = load_contents(path).unwrap();
        LayerRegistry::build(&contents, &ViewerConfig::default()).unwrap()
    }

    #[test]
    fn refresh_twice_leaves_one_marker_per_entity() {
        let registry = registry();
        let layer = registry.get(&LayerId::from("LayerB")).unwrap();
        let mut host = RecordingHost::default();
        let mut markers = MarkerController::new(Localizations::disabled(), true);

        markers.refresh(&mut host, MarkerKind::Sign, layer, true, Generation::default());
        markers.refresh(&mut host, MarkerKind::Sign, layer, true, Generation::default());

        assert_eq!(host.of_kind(MarkerKind::Sign).len(), 3);
        assert_eq!(markers.count(MarkerKind::Sign), 3);
    }

    #[test]
    fn refresh_all_builds_spawn_and_hides_unchecked_kinds() {
        let registry = registry();
        let layer = registry.get(&LayerId::from("LayerA")).unwrap();
        let mut host = RecordingHost::default();
        let mut markers = MarkerController::new(Localizations::disabled(), true);

        markers.refresh_all(&mut host, layer, Generation::default());

        assert_eq!(host.of_kind(MarkerKind::Spawn).len(), 1);
        assert_eq!(host.of_kind(MarkerKind::Player).len(), 2);
        assert_eq!(host.of_kind(MarkerKind::RespawnAnchor).len(), 0);
        let chests: Vec<bool> = host
            .markers
            .values()
            .filter(|(s, _)| s.kind == MarkerKind::Chest)
            .map(|(_, v)| *v)
            .collect();
        assert_eq!(chests, vec![false]);
        assert!(!markers.is_visible(MarkerKind::Chest));
    }

    #[test]
    fn spawn_is_skipped_when_not_configured_or_in_nether() {
        let registry = registry();
        let mut host = RecordingHost::default();

        let mut markers = MarkerController::new(Localizations::disabled(), false);
        let day = registry.get(&LayerId::from("LayerA")).unwrap();
        markers.refresh(&mut host, MarkerKind::Spawn, day, true, Generation::default());
        assert_eq!(markers.count(MarkerKind::Spawn), 0);

        let mut markers = MarkerController::new(Localizations::disabled(), true);
        let caves = registry.get(&LayerId::from("LayerC")).unwrap();
        markers.refresh(&mut host, MarkerKind::Spawn, caves, true, Generation::default());
        assert_eq!(markers.count(MarkerKind::Spawn), 0);
    }

    #[test]
    fn set_visible_keeps_markers() {
        let registry = registry();
        let layer = registry.get(&LayerId::from("LayerA")).unwrap();
        let mut host = RecordingHost::default();
        let mut markers = MarkerController::new(Localizations::disabled(), true);
        markers.refresh(&mut host, MarkerKind::Portal, layer, true, Generation::default());
        let before: Vec<MarkerHandle> = host.markers.keys().copied().collect();

        markers.set_visible(&mut host, MarkerKind::Portal, false);

        let after: Vec<MarkerHandle> = host.markers.keys().copied().collect();
        assert_eq!(before, after);
        assert!(host.markers.values().all(|(_, visible)| !visible));
    }

    #[test]
    fn players_start_with_default_icon_and_probe_their_own() {
        let registry = registry();
        let layer = registry.get(&LayerId::from("LayerA")).unwrap();
        let mut host = RecordingHost::default();
        let mut markers = MarkerController::new(Localizations::disabled(), true);
        let generation = Generation::new(3);

        markers.refresh(&mut host, MarkerKind::Player, layer, true, generation);

        assert!(
            host.of_kind(MarkerKind::Player)
                .iter()
                .all(|s| s.icon_url == layers::DEFAULT_PLAYER_ICON)
        );
        let urls: Vec<&str> = host.probes.iter().map(|(_, u)| u.as_str()).collect();
        assert_eq!(urls, vec!["Images/PlayerIcons/Steve.png", "Images/PlayerIcons/Vyruz.png"]);

        let (ticket, _) = host.probes[1].clone();
        assert!(markers.on_icon_probe(&mut host, &ticket, true, generation, layer));
        let icons: Vec<String> = host
            .of_kind(MarkerKind::Player)
            .iter()
            .map(|s| s.icon_url.clone())
            .collect();
        assert_eq!(
            icons,
            vec![
                layers::DEFAULT_PLAYER_ICON.to_string(),
                "Images/PlayerIcons/Vyruz.png".to_string()
            ]
        );
    }

    #[test]
    fn stale_or_failed_probes_never_touch_the_host() {
        let registry = registry();
        let layer = registry.get(&LayerId::from("LayerA")).unwrap();
        let other = registry.get(&LayerId::from("LayerB")).unwrap();
        let mut host = RecordingHost::default();
        let mut markers = MarkerController::new(Localizations::disabled(), true);
        let mut generation = Generation::default();

        markers.refresh(&mut host, MarkerKind::Player, layer, true, generation);
        let (ticket, _) = host.probes[0].clone();
        let calls = host.calls;

        assert!(!markers.on_icon_probe(&mut host, &ticket, false, generation, layer));
        assert!(!markers.on_icon_probe(&mut host, &ticket, true, generation, other));
        let current = generation.bump();
        assert!(!markers.on_icon_probe(&mut host, &ticket, true, current, layer));

        assert_eq!(host.calls, calls);
    }
}
