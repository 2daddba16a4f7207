pub mod latlng;
pub mod projection;
pub mod vec;
pub mod world;

pub use latlng::*;
pub use projection::*;
pub use vec::*;
pub use world::*;
