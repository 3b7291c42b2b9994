use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use std::rc::Rc;

use super::bitmap::may_have_alpha;
use super::{Image, ImageHandle};
use crate::diag::ShapeError;

const FILE_PREFIX: &str = "file://";
const DATA_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// A parsed deferred texture reference.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureRef<'a> {
    /// Path with the `file://` prefix stripped.
    File(&'a str),
    /// Inline payload; `extension` is whatever follows `data:image/`.
    Inline { extension: &'a str, payload: &'a str },
}

impl<'a> TextureRef<'a> {
    /// Parses `file://...` or `data:image/<ext>;base64,<payload>`.
    ///
    /// The data form is split on the first `;base64,` marker.
    pub fn parse(reference: &'a str) -> Result<Self, ShapeError> {
        if let Some(path) = reference.strip_prefix(FILE_PREFIX) {
            return Ok(TextureRef::File(path));
        }
        if let Some(rest) = reference.strip_prefix(DATA_PREFIX) {
            if let Some((extension, payload)) = rest.split_once(BASE64_MARKER) {
                return Ok(TextureRef::Inline { extension, payload });
            }
        }
        Err(ShapeError::MalformedTextureRef(abbreviate(reference)))
    }

    /// Decodes an inline payload. File references are left to the caller's
    /// loader and return `None`.
    pub fn decode_inline(&self) -> Option<Result<Image, ShapeError>> {
        match *self {
            TextureRef::File(_) => None,
            TextureRef::Inline { extension, payload } => Some(decode_base64(extension, payload)),
        }
    }

    /// Produces the image, handing file paths to `load_file`.
    pub fn resolve(
        &self,
        load_file: impl FnOnce(&str) -> Result<ImageHandle, ShapeError>,
    ) -> Result<ImageHandle, ShapeError> {
        match *self {
            TextureRef::File(path) => load_file(path),
            TextureRef::Inline { extension, payload } => decode_base64(extension, payload).map(Rc::new),
        }
    }
}

fn decode_base64(extension: &str, payload: &str) -> Result<Image, ShapeError> {
    let bytes = BASE64.decode(payload.trim())?;
    let mut img = Image::decode(&bytes)?;
    if may_have_alpha(extension) {
        img.check_alpha();
    }
    Ok(img)
}

/// Keeps log lines short when the reference embeds a large payload.
fn abbreviate(reference: &str) -> String {
    match reference.char_indices().nth(32) {
        Some((cut, _)) => format!("{}...", &reference[..cut]),
        None => reference.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_data_uri(pixel: [u8; 4]) -> String {
        let img = RgbaImage::from_pixel(1, 1, Rgba(pixel));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        format!("data:image/png;base64,{}", BASE64.encode(out.into_inner()))
    }

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn file_prefix_is_stripped() {
        assert_eq!(TextureRef::parse("file://tex/brick.png").unwrap(), TextureRef::File("tex/brick.png"));
    }

    #[test]
    fn data_uri_splits_on_first_marker() {
        let r = TextureRef::parse("data:image/png;base64,AAAA;base64,BBBB").unwrap();
        assert_eq!(r, TextureRef::Inline { extension: "png", payload: "AAAA;base64,BBBB" });
    }

    #[test]
    fn unknown_scheme_is_malformed() {
        assert!(matches!(TextureRef::parse("http://x/y.png"), Err(ShapeError::MalformedTextureRef(_))));
        assert!(matches!(TextureRef::parse("data:image/png,AAAA"), Err(ShapeError::MalformedTextureRef(_))));
    }

    // ── decode ────────────────────────────────────────────────────────────

    #[test]
    fn inline_png_decodes_with_alpha_check() {
        let uri = png_data_uri([9, 9, 9, 0]);
        let img = TextureRef::parse(&uri).unwrap().decode_inline().unwrap().unwrap();
        assert_eq!((img.width(), img.height()), (1, 1));
        assert!(img.has_alpha());
    }

    #[test]
    fn bad_base64_is_reported() {
        let r = TextureRef::parse("data:image/png;base64,@@not-base64@@").unwrap();
        assert!(matches!(r.decode_inline(), Some(Err(ShapeError::InvalidBase64(_)))));
    }

    #[test]
    fn file_refs_are_not_decoded_inline() {
        assert!(TextureRef::File("a.png").decode_inline().is_none());
    }

    #[test]
    fn resolve_routes_files_to_the_loader() {
        let mut asked = None;
        let r = TextureRef::File("tex/a.png").resolve(|p| {
            asked = Some(p.to_owned());
            Err(ShapeError::MalformedTextureRef(p.to_owned()))
        });
        assert!(r.is_err());
        assert_eq!(asked.as_deref(), Some("tex/a.png"));

        let uri = png_data_uri([1, 2, 3, 255]);
        let img = TextureRef::parse(&uri).unwrap().resolve(|_| unreachable!()).unwrap();
        assert_eq!(img.width(), 1);
    }

    #[test]
    fn long_references_are_abbreviated() {
        let long = format!("bogus:{}", "x".repeat(200));
        match TextureRef::parse(&long) {
            Err(ShapeError::MalformedTextureRef(s)) => assert!(s.len() < 40),
            other => panic!("unexpected {other:?}"),
        }
    }
}
