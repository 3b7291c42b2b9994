//! Color model shared by shape authoring and draw replay.
//!
//! Scope:
//! - color modes (RGB/HSB with per-channel maxima)
//! - conversion of mode-relative channel values to normalized RGBA and packed ARGB
//!
//! Packed colors are `0xAARRGGBB` in a `u32`.

pub mod argb;
pub mod mode;
pub mod spec;

pub use argb::{pack_rgb_opaque, pack_rgba, unpack_rgb, unpack_rgba};
pub use mode::{CalcColor, ColorMode, ColorSpace};
pub use spec::ColorSpec;
