pub mod chest;
pub mod controller;
pub mod entity;
pub mod host;
pub mod html;
pub mod popup;
pub mod spec;
pub mod text;

pub use controller::*;
pub use entity::*;
pub use host::*;
pub use layers::MarkerKind;
pub use spec::*;
