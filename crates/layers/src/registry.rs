use std::collections::BTreeMap;

use formats::{MapContent, ViewerConfig};
use foundation::ConfigurationError;

use crate::layer::{Layer, LayerId};

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    NoLayers,
    DuplicateLayerId(LayerId),
    Configuration {
        map_id: String,
        source: ConfigurationError,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NoLayers => write!(f, "content has no layers"),
            RegistryError::DuplicateLayerId(id) => write!(f, "layer id `{id}` appears twice"),
            RegistryError::Configuration { map_id, source } => {
                write!(f, "map `{map_id}` has unusable world vectors: {source}")
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Configuration { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Every layer of every map, in content order.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    by_id: BTreeMap<LayerId, usize>,
    // Switcher entries in insertion order; a later colliding label takes over
    // the earlier entry's slot.
    labels: Vec<(String, usize)>,
    default: usize,
}

impl LayerRegistry {
    pub fn build(contents: &[MapContent], config: &ViewerConfig) -> Result<Self, RegistryError> {
        let mut layers: Vec<Layer> = Vec::new();
        let mut by_id = BTreeMap::new();
        let mut labels: Vec<(String, usize)> = Vec::new();

        for map in contents {
            for (j, desc) in map.layers.iter().enumerate() {
                let id = LayerId(desc.id.clone());
                if by_id.contains_key(&id) {
                    return Err(RegistryError::DuplicateLayerId(id));
                }

                let base = format!("{} - {}", map.name, desc.name);
                let label = if labels.iter().any(|(l, _)| *l == base) {
                    format!("{base}{j}")
                } else {
                    base
                };

                let layer = Layer::from_content(map, desc, label.clone(), config).map_err(
                    |source| RegistryError::Configuration {
                        map_id: map.id.clone(),
                        source,
                    },
                )?;

                let index = layers.len();
                match labels.iter_mut().find(|(l, _)| *l == label) {
                    Some(slot) => {
                        tracing::warn!(%label, replaced = %layers[slot.1].id, by = %id, "layer label collision");
                        slot.1 = index;
                    }
                    None => labels.push((label, index)),
                }

                by_id.insert(id, index);
                layers.push(layer);
            }
        }

        if layers.is_empty() {
            return Err(RegistryError::NoLayers);
        }

        let wanted = LayerId(config.default_layer_id.clone());
        let default = by_id.get(&wanted).copied().unwrap_or_else(|| {
            tracing::debug!(%wanted, fallback = %layers[0].id, "default layer not in content");
            0
        });

        tracing::debug!(layers = layers.len(), default = %layers[default].id, "layer registry built");
        Ok(Self {
            layers,
            by_id,
            labels,
            default,
        })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.by_id.get(id).map(|&i| &self.layers[i])
    }

    pub fn get_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.by_id.get(id).map(|&i| &mut self.layers[i])
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn default_layer(&self) -> &Layer {
        &self.layers[self.default]
    }

    /// `(label, layer id)` pairs for the layer switcher.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &LayerId)> + '_ {
        self.labels
            .iter()
            .map(|(label, i)| (label.as_str(), &self.layers[*i].id))
    }

    /// A switcher is only worth showing when there is something to switch to.
    pub fn needs_layer_control(&self) -> bool {
        self.layers.len() > 1
    }
}
