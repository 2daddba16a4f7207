use foundation::Generation;
use layers::{Layer, LayerId, LayerRegistry};

/// Mutable state of one viewing session: the layers, which one is active and
/// the generation that tags outstanding asynchronous work.
#[derive(Debug, Clone)]
pub struct Session {
    registry: LayerRegistry,
    active: LayerId,
    generation: Generation,
    max_zoom: u32,
}

impl Session {
    pub fn new(registry: LayerRegistry, max_zoom: u32) -> Self {
        let active = registry.default_layer().id.clone();
        Self {
            registry,
            active,
            generation: Generation::default(),
            max_zoom,
        }
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn active_id(&self) -> &LayerId {
        &self.active
    }

    pub fn active_layer(&self) -> &Layer {
        self.registry
            .get(&self.active)
            .unwrap_or_else(|| self.registry.default_layer())
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        self.registry.get_mut(&self.active)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.registry.get_mut(id)
    }

    /// Makes `id` active. Returns false, leaving the session untouched, for unknown ids.
    pub(crate) fn set_active(&mut self, id: &LayerId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.active = id.clone();
        true
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Invalidates everything issued under the current generation.
    pub(crate) fn bump_generation(&mut self) -> Generation {
        self.generation.bump()
    }

    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }
}
