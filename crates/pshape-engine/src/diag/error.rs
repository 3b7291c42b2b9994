use thiserror::Error;

use crate::shape::Family;

/// Failures that are not absorbed as warnings.
///
/// `ContainsUnsupported` is returned to the caller. The image variants are
/// produced while resolving a deferred texture; the draw path logs them and
/// leaves the shape untextured.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("contains() is only implemented for PATH and GROUP shapes, not {family}")]
    ContainsUnsupported { family: Family },

    #[error("unrecognized texture reference: {0}")]
    MalformedTextureRef(String),

    #[error("invalid base64 image payload")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("could not decode image data")]
    ImageDecode(#[from] image::ImageError),

    #[error("could not load image file {path}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
