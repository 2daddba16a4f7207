use layers::{LayerId, RegistryError};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerError {
    UnknownLayer(LayerId),
    Registry(RegistryError),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::UnknownLayer(id) => write!(f, "no layer with id `{id}`"),
            ViewerError::Registry(e) => write!(f, "cannot build layers: {e}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Registry(e) => Some(e),
            ViewerError::UnknownLayer(_) => None,
        }
    }
}

impl From<RegistryError> for ViewerError {
    fn from(e: RegistryError) -> Self {
        ViewerError::Registry(e)
    }
}
