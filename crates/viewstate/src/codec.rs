use foundation::WorldCoord;
use foundation::percent::encode_component;
use layers::{LayerId, ViewPosition};

use crate::params::UrlParams;

/// What the URL asked for, after per-key defaulting and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub layer_id: LayerId,
    pub world_pos: WorldCoord,
    pub zoom: u32,
}

/// Values used for keys that are missing or unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefaults {
    pub layer_id: LayerId,
    pub world_pos: WorldCoord,
    pub zoom: u32,
}

impl ViewDefaults {
    pub fn new(layer_id: LayerId, world_pos: WorldCoord) -> Self {
        Self {
            layer_id,
            world_pos,
            zoom: 0,
        }
    }
}

pub fn clamp_zoom(zoom: i64, max_zoom: u32) -> u32 {
    zoom.clamp(0, i64::from(max_zoom)) as u32
}

/// Integer in the forgiving form links are written by hand: surrounding
/// whitespace, an optional sign, and an optional fractional part that is
/// truncated toward zero (`"-3.9"` → `-3`). Anything else is `None`.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && frac.is_empty() || !all_digits(whole) || !all_digits(frac) {
        return None;
    }
    let magnitude: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    Some(if negative { -magnitude } else { magnitude })
}

pub fn decode(params: &UrlParams, defaults: &ViewDefaults, max_zoom: u32) -> ViewState {
    let layer_id = params
        .get("layerId")
        .filter(|id| !id.is_empty())
        .map(LayerId::from)
        .unwrap_or_else(|| defaults.layer_id.clone());

    let int = |key: &str, fallback: i64| match params.get(key) {
        Some(raw) => parse_int(raw).unwrap_or_else(|| {
            tracing::debug!(key, raw, "unparseable view parameter, using default");
            fallback
        }),
        None => fallback,
    };
    let world_pos = WorldCoord::new(
        int("worldX", defaults.world_pos.x),
        int("worldY", defaults.world_pos.y),
        int("worldZ", defaults.world_pos.z),
    );
    let zoom = clamp_zoom(int("zoom", i64::from(defaults.zoom)), max_zoom);

    ViewState {
        layer_id,
        world_pos,
        zoom,
    }
}

pub fn encode(layer_id: &LayerId, world_pos: WorldCoord, zoom: u32) -> String {
    format!(
        "layerId={}&worldX={}&worldY={}&worldZ={}&zoom={}",
        encode_component(layer_id.as_str()),
        world_pos.x,
        world_pos.y,
        world_pos.z,
        zoom
    )
}

pub fn encode_view(view: &ViewPosition) -> String {
    encode(view.layer_id(), view.world_pos(), view.zoom())
}

/// `base_url` with its fragment replaced by `fragment`.
pub fn link(base_url: &str, fragment: &str) -> String {
    let base = base_url.split_once('#').map_or(base_url, |(b, _)| b);
    format!("{base}#{fragment}")
}
