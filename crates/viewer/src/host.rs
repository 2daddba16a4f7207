use foundation::MapPoint;
use layers::{LayerId, MarkerKind, TileSource};
use markers::MarkerHost;

/// Everything the controller needs from the map library besides markers.
pub trait MapHost: MarkerHost {
    /// Swaps the base tile layer.
    fn set_tile_source(&mut self, source: &TileSource);
    fn set_view(&mut self, center: MapPoint, zoom: u32);
    fn set_background(&mut self, colour: &str);
    fn set_compass(&mut self, url: &str);
    fn set_attribution(&mut self, html: &str);
    /// Shows the toggle control for `kind` with the given checkbox state.
    fn show_control(&mut self, kind: MarkerKind, checked: bool);
    fn hide_control(&mut self, kind: MarkerKind);
    /// Installs the layer switcher; `labels` are in display order.
    fn set_layer_control(&mut self, labels: &[(String, LayerId)], active: &LayerId);
    /// Replaces the URL fragment without reloading.
    fn set_fragment(&mut self, fragment: &str);
}
