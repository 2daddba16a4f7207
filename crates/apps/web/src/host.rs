use formats::ViewerConfig;
use foundation::MapPoint;
use layers::{LayerId, MarkerKind, TileCoord, TileSource};
use markers::{MarkerHandle, MarkerHost, MarkerSpec, ProbeTicket};
use viewer::MapHost;
use wasm_bindgen::prelude::*;

use crate::{glue, log, with_viewer};

/// [`MapHost`] backed by a Leaflet map in the page.
pub struct LeafletHost {
    next_marker: u64,
    tile_size: u32,
    max_zoom: u32,
    // Kept alive while the current tile layer can still ask for urls.
    tile_url: Option<Closure<dyn Fn(f64, f64, f64) -> String>>,
}

impl LeafletHost {
    pub fn new(element_id: &str, config: &ViewerConfig, callbacks: &JsValue) -> Self {
        glue::tec_create_map(element_id, config.max_zoom, callbacks);
        Self {
            next_marker: 0,
            tile_size: config.tile_size,
            max_zoom: config.max_zoom,
            tile_url: None,
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(err) => {
            log(&format!("encode error: {err}"));
            None
        }
    }
}

impl MarkerHost for LeafletHost {
    fn add_marker(&mut self, spec: &MarkerSpec, visible: bool) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        if let Some(json) = to_json(spec) {
            glue::tec_add_marker(handle.0 as f64, &json, visible);
        }
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        glue::tec_remove_marker(handle.0 as f64);
    }

    fn set_marker_visible(&mut self, handle: MarkerHandle, visible: bool) {
        glue::tec_set_marker_visible(handle.0 as f64, visible);
    }

    fn update_marker(&mut self, handle: MarkerHandle, spec: &MarkerSpec) {
        if let Some(json) = to_json(spec) {
            glue::tec_update_marker(handle.0 as f64, &json);
        }
    }

    fn probe_icon(&mut self, ticket: ProbeTicket, url: &str) {
        let done = Closure::once_into_js(move |loaded: bool| {
            with_viewer(|v| v.controller.on_icon_probe(&mut v.host, &ticket, loaded));
        });
        glue::tec_probe_image(url, &done);
    }
}

impl MapHost for LeafletHost {
    fn set_tile_source(&mut self, source: &TileSource) {
        let source = source.clone();
        let tile_url = Closure::<dyn Fn(f64, f64, f64) -> String>::new(move |x: f64, y: f64, z: f64| {
            source.tile_url(TileCoord::new(x as i64, y as i64, z as i64))
        });
        glue::tec_set_tile_layer(self.tile_size, self.max_zoom, tile_url.as_ref());
        self.tile_url = Some(tile_url);
    }

    fn set_view(&mut self, center: MapPoint, zoom: u32) {
        glue::tec_set_view(center.lat, center.lng, zoom);
    }

    fn set_background(&mut self, colour: &str) {
        glue::tec_set_background(colour);
    }

    fn set_compass(&mut self, url: &str) {
        glue::tec_set_compass(url);
    }

    fn set_attribution(&mut self, html: &str) {
        glue::tec_set_attribution(html);
    }

    fn show_control(&mut self, kind: MarkerKind, checked: bool) {
        glue::tec_show_control(kind.title(), kind.icon_url(), checked);
    }

    fn hide_control(&mut self, kind: MarkerKind) {
        glue::tec_hide_control(kind.title());
    }

    fn set_layer_control(&mut self, labels: &[(String, LayerId)], active: &LayerId) {
        if let Some(json) = to_json(labels) {
            glue::tec_set_layer_control(&json, active.as_str());
        }
    }

    fn set_fragment(&mut self, fragment: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let replaced = window
            .history()
            .and_then(|h| h.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{fragment}"))));
        if let Err(err) = replaced {
            log(&format!("fragment update error: {:?}", err));
        }
    }
}
