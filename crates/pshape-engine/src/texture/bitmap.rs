use std::path::Path;
use std::rc::Rc;

use ::image::RgbaImage;

use crate::diag::ShapeError;

/// Shared handle to a decoded image. Shapes and recorded draw streams hold
/// the same allocation.
pub type ImageHandle = Rc<Image>;

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbaImage,
    has_alpha: bool,
}

impl Image {
    /// Wraps already-decoded pixels. The image is treated as opaque until
    /// [`check_alpha`](Self::check_alpha) runs.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels, has_alpha: false }
    }

    /// Decodes an encoded image (PNG, JPEG, GIF, BMP).
    pub fn decode(bytes: &[u8]) -> Result<Self, ShapeError> {
        let decoded = ::image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    /// Reads and decodes an image file. Formats that can carry transparency
    /// get their alpha checked.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ShapeError> {
        let path = path.as_ref();
        let decoded = ::image::open(path).map_err(|source| ShapeError::ImageLoad {
            path: path.display().to_string(),
            source,
        })?;
        let mut img = Self::from_rgba(decoded.into_rgba8());

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("unknown");
        if may_have_alpha(ext) {
            img.check_alpha();
        }
        Ok(img)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True once [`check_alpha`](Self::check_alpha) found a non-opaque pixel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Scans the pixels and records whether any is not fully opaque.
    pub fn check_alpha(&mut self) {
        self.has_alpha = self.pixels.pixels().any(|p| p.0[3] != 255);
    }
}

/// Extensions whose payloads are checked for transparency after decoding.
pub(crate) fn may_have_alpha(ext: &str) -> bool {
    matches!(ext.to_ascii_lowercase().as_str(), "gif" | "png" | "unknown")
}
