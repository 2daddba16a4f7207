use formats::{Localizations, MapContent, RenderStats, ViewerConfig};
use foundation::MapPoint;
use layers::{LayerId, LayerRegistry, MarkerKind, ViewPosition};
use markers::{MarkerController, ProbeTicket, has_control, popup};
use viewstate::{UrlParams, ViewDefaults, ViewState, clamp_zoom, decode, encode_view};

use crate::error::ViewerError;
use crate::host::MapHost;
use crate::session::Session;

/// Reacts to page and map events and keeps the host in sync with the session.
#[derive(Debug, Clone)]
pub struct ViewController {
    session: Session,
    markers: MarkerController,
    stats: RenderStats,
}

impl ViewController {
    pub fn new(registry: LayerRegistry, config: &ViewerConfig, localizations: Localizations) -> Self {
        Self {
            session: Session::new(registry, config.max_zoom),
            markers: MarkerController::new(localizations, config.show_spawn),
            stats: RenderStats::default(),
        }
    }

    pub fn from_contents(
        contents: &[MapContent],
        config: &ViewerConfig,
        localizations: Localizations,
    ) -> Result<Self, ViewerError> {
        let registry = LayerRegistry::build(contents, config)?;
        Ok(Self::new(registry, config, localizations))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn markers(&self) -> &MarkerController {
        &self.markers
    }

    pub fn set_render_stats(&mut self, stats: RenderStats) {
        self.stats = stats;
    }

    /// Opens the view described by the page URL.
    ///
    /// Fragment parameters win over query parameters. Missing or malformed
    /// values fall back to the default layer's start view; an unknown layer id
    /// falls back to the default layer.
    pub fn start<H>(&mut self, host: &mut H, fragment: &str, query: &str) -> ViewState
    where
        H: MapHost + ?Sized,
    {
        let params = UrlParams::resolve(fragment, query);
        let registry = self.session.registry();
        let default = registry.default_layer();
        let defaults = ViewDefaults::new(default.id.clone(), default.view_position.world_pos());

        let mut state = decode(&params, &defaults, self.session.max_zoom());
        if !registry.contains(&state.layer_id) {
            tracing::warn!(requested = %state.layer_id, fallback = %defaults.layer_id, "unknown layer in url");
            state.layer_id = defaults.layer_id.clone();
        }

        if registry.needs_layer_control() {
            let labels: Vec<(String, LayerId)> = registry
                .labels()
                .map(|(label, id)| (label.to_string(), id.clone()))
                .collect();
            host.set_layer_control(&labels, &state.layer_id);
        }

        if let Some(layer) = self.session.layer_mut(&state.layer_id) {
            layer.view_position =
                ViewPosition::new(state.layer_id.clone(), state.world_pos, state.zoom, &layer.projection);
        }

        if let Err(err) = self.switch_layer(host, &state.layer_id) {
            tracing::warn!(%err, "start layer vanished");
        }
        state
    }

    /// Makes `id` the active layer and restores its saved view and toggles.
    ///
    /// The outgoing layer's view and checkbox state are already current, so
    /// nothing is copied out of the host.
    pub fn switch_layer<H>(&mut self, host: &mut H, id: &LayerId) -> Result<(), ViewerError>
    where
        H: MapHost + ?Sized,
    {
        if !self.session.set_active(id) {
            return Err(ViewerError::UnknownLayer(id.clone()));
        }
        let generation = self.session.bump_generation();
        let layer = self.session.active_layer();

        host.set_tile_source(&layer.tile_source());
        host.set_background(&layer.background_color);
        host.set_compass(&layer.compass_url());
        host.set_attribution(&layer.attribution());

        for kind in MarkerKind::ALL {
            let available = has_control(layer, kind)
                && (kind != MarkerKind::Spawn || self.markers.shows_spawn());
            if available {
                host.show_control(kind, layer.control_state.is_checked(kind));
            } else {
                host.hide_control(kind);
            }
        }

        self.markers.refresh_all(host, layer, generation);

        let view = &layer.view_position;
        host.set_view(view.map_point(), view.zoom());
        host.set_fragment(&encode_view(view));

        tracing::debug!(layer = %id, generation = generation.get(), "layer switched");
        Ok(())
    }

    /// Records where the map ended up after a pan or zoom.
    pub fn on_view_changed<H>(&mut self, host: &mut H, center: MapPoint, zoom: i64)
    where
        H: MapHost + ?Sized,
    {
        let zoom = clamp_zoom(zoom, self.session.max_zoom());
        let Some(layer) = self.session.active_layer_mut() else {
            return;
        };
        layer.view_position = ViewPosition::from_map_point(layer.id.clone(), center, zoom, &layer.projection);
        host.set_fragment(&encode_view(&layer.view_position));
    }

    /// Flips the checkbox of `kind` on the active layer and returns its new state.
    pub fn toggle<H>(&mut self, host: &mut H, kind: MarkerKind) -> bool
    where
        H: MapHost + ?Sized,
    {
        let Some(layer) = self.session.active_layer_mut() else {
            return false;
        };
        let checked = layer.control_state.toggle(kind);
        self.markers.set_visible(host, kind, checked);
        tracing::debug!(kind = kind.title(), checked, "toggled");
        checked
    }

    /// Delivers a finished player icon load. Returns whether a marker changed.
    pub fn on_icon_probe<H>(&mut self, host: &mut H, ticket: &ProbeTicket, loaded: bool) -> bool
    where
        H: MapHost + ?Sized,
    {
        let current = self.session.generation();
        self.markers
            .on_icon_probe(host, ticket, loaded, current, self.session.active_layer())
    }

    /// Installs a freshly loaded translation table and redraws chest popups.
    pub fn set_localizations<H>(&mut self, host: &mut H, localizations: Localizations)
    where
        H: MapHost + ?Sized,
    {
        self.markers.set_localizations(localizations);
        let layer = self.session.active_layer();
        let visible = layer.control_state.is_checked(MarkerKind::Chest);
        self.markers
            .refresh(host, MarkerKind::Chest, layer, visible, self.session.generation());
    }

    /// Current fragment for the active view.
    pub fn fragment(&self) -> String {
        encode_view(&self.session.active_layer().view_position)
    }

    /// Stats panel for the active layer's map.
    pub fn map_info_html(&self) -> String {
        let layer = self.session.active_layer();
        popup::map_info(&self.stats, &layer.world_stats, &layer.block_stats, &layer.entities)
    }
}
