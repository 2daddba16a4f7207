pub mod control;
pub mod layer;
pub mod registry;
pub mod tile;
pub mod view;

pub use control::*;
pub use layer::*;
pub use registry::*;
pub use tile::*;
pub use view::*;
