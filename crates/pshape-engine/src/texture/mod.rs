//! Textures bound to shapes.
//!
//! A shape either holds a decoded [`Image`] or a deferred reference string
//! that is resolved on first draw. References come in two forms:
//! - `file://<path>`: loaded through the renderer's image loader
//! - `data:image/<ext>;base64,<payload>`: decoded inline

mod bitmap;
mod reference;

pub use bitmap::{Image, ImageHandle};
pub use reference::TextureRef;
