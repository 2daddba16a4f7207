//! Page URL ⇄ view state.
//!
//! The current view is mirrored into the URL fragment
//! (`#layerId=LayerA&worldX=0&worldY=64&worldZ=0&zoom=2`) so links reopen the
//! same spot. Rewriting the fragment never reloads the page.

pub mod codec;
pub mod params;

pub use codec::*;
pub use params::*;
