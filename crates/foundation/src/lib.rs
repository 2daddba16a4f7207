pub mod error;
pub mod generation;
pub mod math;
pub mod percent;
pub mod text;

// Foundation crate: small, well-tested primitives only.

pub use error::*;
pub use generation::*;
pub use math::*;
