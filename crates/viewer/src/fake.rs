//! Recording map host shared by the controller tests.

use std::collections::BTreeMap;

use formats::{MapContent, load_contents};
use foundation::MapPoint;
use layers::{LayerId, MarkerKind, TileSource};
use markers::{MarkerHandle, MarkerHost, MarkerSpec, ProbeTicket};

use crate::host::MapHost;

pub fn demo_contents() -> Vec<MapContent> {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../apps/web/assets/contents.json");
    load_contents(path).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Add(MarkerKind),
    Remove,
    Visible(bool),
    /// New icon url.
    Update(String),
    Host(&'static str),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u64,
    pub markers: BTreeMap<MarkerHandle, (MarkerSpec, bool)>,
    pub probes: Vec<(ProbeTicket, String)>,
    pub calls: Vec<Call>,
    /// `None` for hidden controls, `Some(checked)` for shown ones.
    pub controls: BTreeMap<MarkerKind, Option<bool>>,
    pub layer_labels: Vec<(String, LayerId)>,
    pub tiles: Option<TileSource>,
    pub view: Option<(MapPoint, u32)>,
    pub background: Option<String>,
    pub compass: Option<String>,
    pub attribution: Option<String>,
    pub fragment: Option<String>,
}

impl RecordingHost {
    pub fn count(&self, kind: MarkerKind) -> usize {
        self.markers.values().filter(|(s, _)| s.kind == kind).count()
    }

    pub fn visible(&self, kind: MarkerKind) -> Vec<bool> {
        self.markers
            .values()
            .filter(|(s, _)| s.kind == kind)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn popups(&self, kind: MarkerKind) -> Vec<String> {
        self.markers
            .values()
            .filter(|(s, _)| s.kind == kind)
            .map(|(s, _)| s.popup_html.clone())
            .collect()
    }
}

impl MarkerHost for RecordingHost {
    fn add_marker(&mut self, spec: &MarkerSpec, visible: bool) -> MarkerHandle {
        self.calls.push(Call::Add(spec.kind));
        self.next += 1;
        let handle = MarkerHandle(self.next);
        self.markers.insert(handle, (spec.clone(), visible));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.calls.push(Call::Remove);
        self.markers.remove(&handle);
    }

    fn set_marker_visible(&mut self, handle: MarkerHandle, visible: bool) {
        self.calls.push(Call::Visible(visible));
        if let Some(m) = self.markers.get_mut(&handle) {
            m.1 = visible;
        }
    }

    fn update_marker(&mut self, handle: MarkerHandle, spec: &MarkerSpec) {
        self.calls.push(Call::Update(spec.icon_url.clone()));
        if let Some(m) = self.markers.get_mut(&handle) {
            m.0 = spec.clone();
        }
    }

    fn probe_icon(&mut self, ticket: ProbeTicket, url: &str) {
        self.probes.push((ticket, url.to_string()));
    }
}

impl MapHost for RecordingHost {
    fn set_tile_source(&mut self, source: &TileSource) {
        self.calls.push(Call::Host("tiles"));
        self.tiles = Some(source.clone());
    }

    fn set_view(&mut self, center: MapPoint, zoom: u32) {
        self.calls.push(Call::Host("view"));
        self.view = Some((center, zoom));
    }

    fn set_background(&mut self, colour: &str) {
        self.calls.push(Call::Host("background"));
        self.background = Some(colour.to_string());
    }

    fn set_compass(&mut self, url: &str) {
        self.calls.push(Call::Host("compass"));
        self.compass = Some(url.to_string());
    }

    fn set_attribution(&mut self, html: &str) {
        self.calls.push(Call::Host("attribution"));
        self.attribution = Some(html.to_string());
    }

    fn show_control(&mut self, kind: MarkerKind, checked: bool) {
        self.controls.insert(kind, Some(checked));
    }

    fn hide_control(&mut self, kind: MarkerKind) {
        self.controls.insert(kind, None);
    }

    fn set_layer_control(&mut self, labels: &[(String, LayerId)], _active: &LayerId) {
        self.layer_labels = labels.to_vec();
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.calls.push(Call::Host("fragment"));
        self.fragment = Some(fragment.to_string());
    }
}
