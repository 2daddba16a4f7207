//! Leaflet bindings. Leaflet objects never cross into Rust; markers are keyed
//! by the numeric handle the host hands out.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = r#"
let map = null;
let handlers = null;
let tileLayer = null;
let compass = null;
let attribution = null;
let attributionHtml = null;
let layerControl = null;
const controls = new Map();
const markers = new Map();

export function tec_create_map(element_id, max_zoom, callbacks) {
    handlers = callbacks;
    map = L.map(element_id, {crs: L.CRS.Simple, minZoom: 0, maxZoom: max_zoom, attributionControl: false})
        .setView([0, 0], 0);
    attribution = L.control.attribution({position: 'bottomleft'}).addTo(map);

    const moved = () => {
        const c = map.getCenter();
        handlers.onMove(c.lat, c.lng, map.getZoom());
    };
    map.on('moveend', moved);
    map.on('zoomend', moved);
    map.on('baselayerchange', (e) => handlers.onLayer(e.layer.tecLayerId));
}

export function tec_set_tile_layer(tile_size, max_zoom, tile_url) {
    if (tileLayer) {
        tileLayer.remove();
    }
    const Tiles = L.TileLayer.extend({
        getTileUrl: (coords) => tile_url(coords.x, coords.y, coords.z),
    });
    tileLayer = new Tiles('', {tileSize: tile_size, maxZoom: max_zoom}).addTo(map);
}

export function tec_set_view(lat, lng, zoom) {
    map.setView([lat, lng], zoom);
}

export function tec_set_background(colour) {
    map.getContainer().style.backgroundColor = colour;
}

export function tec_set_attribution(html) {
    if (attributionHtml) {
        attribution.removeAttribution(attributionHtml);
    }
    attributionHtml = html;
    attribution.addAttribution(html);
}

export function tec_set_compass(url) {
    if (compass) {
        compass.remove();
    }
    const Compass = L.Control.extend({
        options: {position: 'topleft'},
        onAdd: function () {
            const div = L.DomUtil.create('div', 'compass leaflet-control leaflet-control-custom');
            div.style.background = 'url(' + url + ') center';
            div.style.backgroundSize = '128px 128px';
            div.style.width = '100px';
            div.style.height = '80px';
            return div;
        }
    });
    compass = new Compass().addTo(map);
}

function paintToggle(button, title) {
    button.style.backgroundColor = button.checked ? '#CCCCFF' : '#FFFFFF';
    button.title = (button.checked ? 'Hide ' : 'Show ') + title;
}

export function tec_show_control(title, icon, checked) {
    tec_hide_control(title);
    const Toggle = L.Control.extend({
        options: {position: 'topright'},
        onAdd: function () {
            const button = L.DomUtil.create('input', 'leaflet-bar leaflet-control leaflet-control-custom button');
            button.type = 'image';
            button.src = icon;
            button.style.padding = '5px';
            button.style.width = '34px';
            button.style.height = '34px';
            button.checked = checked;
            paintToggle(button, title);
            button.onclick = function () {
                this.checked = handlers.onToggle(title);
                paintToggle(this, title);
            };
            L.DomEvent.disableClickPropagation(button);
            return button;
        }
    });
    controls.set(title, new Toggle().addTo(map));
}

export function tec_hide_control(title) {
    const control = controls.get(title);
    if (control) {
        control.remove();
        controls.delete(title);
    }
}

export function tec_set_layer_control(entries_json, active_id) {
    if (layerControl) {
        layerControl.remove();
    }
    const base = {};
    for (const [label, id] of JSON.parse(entries_json)) {
        const group = L.layerGroup();
        group.tecLayerId = id;
        base[label] = group;
        if (id === active_id) {
            group.addTo(map);
        }
    }
    layerControl = L.control.layers(base).addTo(map);
}

function markerIcon(spec) {
    return L.icon({iconUrl: spec.iconUrl, iconAnchor: spec.iconAnchor, popupAnchor: spec.popupAnchor});
}

export function tec_add_marker(id, spec_json, visible) {
    const spec = JSON.parse(spec_json);
    const options = spec.popupMaxWidth === 'auto' ? {maxWidth: 'auto'} : {};
    const marker = L.marker([spec.position.lat, spec.position.lng], {icon: markerIcon(spec)})
        .bindPopup(spec.popupHtml, options);
    if (spec.tooltip) {
        marker.bindTooltip(spec.tooltip);
    }
    if (visible) {
        marker.addTo(map);
    }
    markers.set(id, marker);
}

export function tec_remove_marker(id) {
    const marker = markers.get(id);
    if (marker) {
        marker.remove();
        markers.delete(id);
    }
}

export function tec_set_marker_visible(id, visible) {
    const marker = markers.get(id);
    if (!marker) {
        return;
    }
    if (visible) {
        marker.addTo(map);
    } else {
        marker.remove();
    }
}

export function tec_update_marker(id, spec_json) {
    const marker = markers.get(id);
    if (!marker) {
        return;
    }
    const spec = JSON.parse(spec_json);
    marker.setIcon(markerIcon(spec));
    marker.setPopupContent(spec.popupHtml);
}

export function tec_probe_image(url, done) {
    const image = new Image();
    image.onload = () => done(true);
    image.onerror = () => done(false);
    image.src = url;
}

export function tec_set_map_info(html) {
    if (typeof tippy === 'function') {
        tippy('#mapInfo', {content: html, allowHTML: true, interactive: true, theme: 'light', maxWidth: 500});
    }
}
"#)]
extern "C" {
    pub fn tec_create_map(element_id: &str, max_zoom: u32, callbacks: &JsValue);
    pub fn tec_set_tile_layer(tile_size: u32, max_zoom: u32, tile_url: &JsValue);
    pub fn tec_set_view(lat: f64, lng: f64, zoom: u32);
    pub fn tec_set_background(colour: &str);
    pub fn tec_set_attribution(html: &str);
    pub fn tec_set_compass(url: &str);
    pub fn tec_show_control(title: &str, icon: &str, checked: bool);
    pub fn tec_hide_control(title: &str);
    pub fn tec_set_layer_control(entries_json: &str, active_id: &str);
    pub fn tec_add_marker(id: f64, spec_json: &str, visible: bool);
    pub fn tec_remove_marker(id: f64);
    pub fn tec_set_marker_visible(id: f64, visible: bool);
    pub fn tec_update_marker(id: f64, spec_json: &str);
    pub fn tec_probe_image(url: &str, done: &JsValue);
    pub fn tec_set_map_info(html: &str);
}
