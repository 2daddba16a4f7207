/// Static map metadata that cannot drive a usable projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The x/z world axes are (nearly) parallel on the map plane, so a map point
    /// cannot be solved back to a world position.
    SingularAxes { det: f64 },
    NonFinite { field: &'static str },
    MissingMapBounds,
    DegenerateMapBounds,
    InvalidLatitudeRange(f64),
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::SingularAxes { det } => {
                write!(f, "world x/z axes are singular on the map plane (det={det})")
            }
            ConfigurationError::NonFinite { field } => {
                write!(f, "world vector `{field}` is not finite")
            }
            ConfigurationError::MissingMapBounds => write!(f, "world vectors lack mapMin/mapSize"),
            ConfigurationError::DegenerateMapBounds => write!(f, "mapSize has a zero component"),
            ConfigurationError::InvalidLatitudeRange(r) => {
                write!(f, "latitude range must be in (0, 180], got {r}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
