use foundation::Generation;
use layers::LayerId;

use crate::spec::MarkerSpec;

/// Opaque marker reference issued by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

/// Identifies one outstanding player icon probe.
///
/// A completion is applied only if its generation is still current and its
/// layer is still active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTicket {
    pub generation: Generation,
    pub layer_id: LayerId,
    pub index: usize,
}

/// Marker operations the map library must provide.
pub trait MarkerHost {
    fn add_marker(&mut self, spec: &MarkerSpec, visible: bool) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn set_marker_visible(&mut self, handle: MarkerHandle, visible: bool);
    /// Swaps icon and popup of an existing marker, keeping its visibility.
    fn update_marker(&mut self, handle: MarkerHandle, spec: &MarkerSpec);
    /// Starts loading `url`; the outcome comes back through the view controller.
    fn probe_icon(&mut self, ticket: ProbeTicket, url: &str);
}
