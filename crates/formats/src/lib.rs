pub mod config;
pub mod content;
pub mod error;
pub mod localization;
pub mod stats;

pub use config::*;
pub use content::*;
pub use error::*;
pub use localization::*;
pub use stats::*;
