use foundation::{MapPoint, Projection, WorldCoord};

use crate::layer::LayerId;

/// Where a layer is looking. Kept per layer so switching back restores it.
///
/// Only constructible through a projection, so `map_point` is always the
/// projection of `world_pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPosition {
    layer_id: LayerId,
    world_pos: WorldCoord,
    zoom: u32,
    map_point: MapPoint,
}

impl ViewPosition {
    pub fn new(layer_id: LayerId, world_pos: WorldCoord, zoom: u32, projection: &Projection) -> Self {
        Self {
            map_point: projection.world_to_map(world_pos),
            layer_id,
            world_pos,
            zoom,
        }
    }

    /// View centred near `center`, snapped to the nearest block at sea level.
    pub fn from_map_point(
        layer_id: LayerId,
        center: MapPoint,
        zoom: u32,
        projection: &Projection,
    ) -> Self {
        let world_pos = WorldCoord::round(projection.map_to_world(center));
        Self::new(layer_id, world_pos, zoom, projection)
    }

    pub fn layer_id(&self) -> &LayerId {
        &self.layer_id
    }

    pub fn world_pos(&self) -> WorldCoord {
        self.world_pos
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn map_point(&self) -> MapPoint {
        self.map_point
    }
}

#[cfg(test)]
mod tests {
    use super::ViewPosition;
    use crate::layer::LayerId;
    use foundation::{MapPoint, Projection, Vec2, WorldCoord, WorldVectors};

    fn projection() -> Projection {
        Projection::new(WorldVectors {
            origin: Vec2::new(100.0, 50.0),
            x_axis: Vec2::new(0.5, 0.25),
            y_axis: Vec2::new(0.0, -0.5),
            z_axis: Vec2::new(-0.5, 0.25),
            ..WorldVectors::top_down()
        })
        .unwrap()
    }

    #[test]
    fn map_point_is_projection_of_world_pos() {
        let p = projection();
        let v = ViewPosition::new(LayerId::from("LayerA"), WorldCoord::new(7, 70, -3), 2, &p);
        assert_eq!(v.map_point(), p.world_to_map(v.world_pos()));
    }

    #[test]
    fn from_map_point_snaps_to_blocks() {
        let p = projection();
        let exact = p.world_to_map(WorldCoord::new(40, 64, -12));
        let nudged = MapPoint::new(exact.lat + 0.01, exact.lng - 0.01);
        let v = ViewPosition::from_map_point(LayerId::from("LayerA"), nudged, 3, &p);
        assert_eq!(v.world_pos(), WorldCoord::new(40, 64, -12));
        assert_eq!(v.map_point(), exact);
        assert_eq!(v.zoom(), 3);
    }
}
