//! Session state and the view controller driving a map host.

pub mod controller;
pub mod error;
pub mod host;
pub mod session;

#[cfg(test)]
mod fake;

pub use controller::*;
pub use error::*;
pub use host::*;
pub use session::*;
