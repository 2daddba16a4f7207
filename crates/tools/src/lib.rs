//! Offline inspection of a rendered map directory: the same content model,
//! projection and URL codec the viewer uses, without a browser.

use std::path::Path;

use formats::{ContentError, ViewerConfig, load_contents};
use foundation::{
    ConfigurationError, LatLng, LatLngProjection, MapPoint, Vec2, Vec3, WorldCoord,
};
use layers::{Layer, LayerId, LayerRegistry, MarkerKind, RegistryError, TileCoord};
use markers::layer_entities;
use serde::Serialize;
use viewstate::{UrlParams, ViewDefaults, ViewState, decode, encode, link};

#[derive(Debug)]
pub enum ToolError {
    Content(ContentError),
    Registry(RegistryError),
    Projection(ConfigurationError),
    UnknownLayer(String),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Content(e) => write!(f, "{e}"),
            ToolError::Registry(e) => write!(f, "{e}"),
            ToolError::Projection(e) => write!(f, "{e}"),
            ToolError::UnknownLayer(id) => write!(f, "no layer with id `{id}`"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<ContentError> for ToolError {
    fn from(e: ContentError) -> Self {
        ToolError::Content(e)
    }
}

impl From<RegistryError> for ToolError {
    fn from(e: RegistryError) -> Self {
        ToolError::Registry(e)
    }
}

impl From<ConfigurationError> for ToolError {
    fn from(e: ConfigurationError) -> Self {
        ToolError::Projection(e)
    }
}

/// Content plus the settings it is viewed with.
pub struct Workspace {
    pub registry: LayerRegistry,
    pub config: ViewerConfig,
}

impl Workspace {
    pub fn load(contents: &Path, config: Option<&Path>) -> Result<Self, ToolError> {
        let config = match config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        let contents = load_contents(contents)?;
        let registry = LayerRegistry::build(&contents, &config)?;
        tracing::debug!(layers = registry.len(), "workspace loaded");
        Ok(Self { registry, config })
    }

    /// `id`, or the default layer when `None`.
    pub fn layer(&self, id: Option<&str>) -> Result<&Layer, ToolError> {
        match id {
            None => Ok(self.registry.default_layer()),
            Some(id) => self
                .registry
                .get(&LayerId::from(id))
                .ok_or_else(|| ToolError::UnknownLayer(id.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    pub id: String,
    pub label: String,
    pub map_id: String,
    pub dimension: &'static str,
    pub image_format: String,
    pub start_view: WorldCoord,
    pub default: bool,
    /// Marker count per kind title, kinds without markers omitted.
    pub markers: Vec<(&'static str, usize)>,
}

pub fn layer_rows(ws: &Workspace) -> Vec<LayerRow> {
    let default = &ws.registry.default_layer().id;
    ws.registry
        .layers()
        .iter()
        .map(|layer| LayerRow {
            id: layer.id.to_string(),
            label: layer.label.clone(),
            map_id: layer.map_id.clone(),
            dimension: layer.dimension.as_str(),
            image_format: layer.image_format.clone(),
            start_view: layer.view_position.world_pos(),
            default: &layer.id == default,
            markers: MarkerKind::ALL
                .into_iter()
                .map(|kind| (kind.title(), layer_entities(layer, kind, ws.config.show_spawn).len()))
                .filter(|(_, n)| *n > 0)
                .collect(),
        })
        .collect()
}

pub fn format_layer_row(row: &LayerRow) -> String {
    let markers: Vec<String> = row
        .markers
        .iter()
        .map(|(title, n)| format!("{n} {title}"))
        .collect();
    format!(
        "{}{}\t{}\t{}\t{}\t{}\t{}",
        if row.default { "*" } else { " " },
        row.id,
        row.label,
        row.dimension,
        row.image_format,
        row.start_view,
        markers.join(", ")
    )
}

pub fn tile_url(layer: &Layer, coord: TileCoord) -> String {
    layer.tile_source().tile_url(coord)
}

/// Where a world position lands on each map plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub world: Vec3,
    pub pixel: Vec2,
    pub map: MapPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
}

/// Projects `world` through `layer`. `latitude_range` adds the lat/long
/// position, which needs the map's pixel bounds.
pub fn locate(layer: &Layer, world: Vec3, latitude_range: Option<f64>) -> Result<Location, ToolError> {
    let pixel = layer.projection.world_to_pixel(world);
    let lat_lng = match latitude_range {
        Some(range) => Some(LatLngProjection::new(range, layer.world_vectors())?.point_to_lat_lng(pixel)),
        None => None,
    };
    Ok(Location {
        world,
        pixel,
        map: layer.projection.world_to_map(world),
        lat_lng,
    })
}

/// Map point back to the world, at sea level unless `y` is given.
pub fn unproject(layer: &Layer, point: MapPoint, y: Option<f64>) -> Vec3 {
    match y {
        Some(y) => layer.projection.map_to_world_at(point, y),
        None => layer.projection.map_to_world(point),
    }
}

/// Link opening `layer` at `world_pos`.
pub fn view_link(base_url: &str, layer: &Layer, world_pos: WorldCoord, zoom: u32) -> String {
    link(base_url, &encode(&layer.id, world_pos, zoom))
}

/// Decodes the view a viewer link opens, the way the page would on load.
pub fn parse_link(ws: &Workspace, url: &str) -> ViewState {
    let (rest, fragment) = url.split_once('#').unwrap_or((url, ""));
    let query = rest.split_once('?').map_or("", |(_, q)| q);

    let default = ws.registry.default_layer();
    let defaults = ViewDefaults::new(default.id.clone(), default.view_position.world_pos());
    let mut state = decode(&UrlParams::resolve(fragment, query), &defaults, ws.config.max_zoom);
    if !ws.registry.contains(&state.layer_id) {
        tracing::warn!(requested = %state.layer_id, "unknown layer in link");
        state.layer_id = defaults.layer_id;
    }
    state
}
