/// Arguments accepted by `fill`, `stroke`, `tint` and friends.
///
/// Mirrors the classic sketch overloads: one packed or gray value, optionally
/// with alpha, or three channels optionally with alpha. Channel values are
/// relative to the active [`ColorMode`](super::ColorMode).
///
/// ```
/// use pshape_engine::paint::ColorSpec;
///
/// let gray: ColorSpec = 128.0.into();
/// let packed: ColorSpec = 0xff33_6699_u32.into();
/// let rgba: ColorSpec = (255.0, 0.0, 0.0, 128.0).into();
/// assert_eq!(rgba, ColorSpec::ChannelsAlpha(255.0, 0.0, 0.0, 128.0));
/// # let _ = (gray, packed);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorSpec {
    /// Packed ARGB literal, or a gray level if it passes the gray range test.
    Packed(u32),
    PackedAlpha(u32, f32),
    Gray(f32),
    GrayAlpha(f32, f32),
    Channels(f32, f32, f32),
    ChannelsAlpha(f32, f32, f32, f32),
}

impl From<u32> for ColorSpec {
    #[inline]
    fn from(v: u32) -> Self {
        ColorSpec::Packed(v)
    }
}

impl From<(u32, f32)> for ColorSpec {
    #[inline]
    fn from((v, a): (u32, f32)) -> Self {
        ColorSpec::PackedAlpha(v, a)
    }
}

impl From<f32> for ColorSpec {
    #[inline]
    fn from(v: f32) -> Self {
        ColorSpec::Gray(v)
    }
}

impl From<(f32, f32)> for ColorSpec {
    #[inline]
    fn from((v, a): (f32, f32)) -> Self {
        ColorSpec::GrayAlpha(v, a)
    }
}

impl From<(f32, f32, f32)> for ColorSpec {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        ColorSpec::Channels(x, y, z)
    }
}

impl From<(f32, f32, f32, f32)> for ColorSpec {
    #[inline]
    fn from((x, y, z, a): (f32, f32, f32, f32)) -> Self {
        ColorSpec::ChannelsAlpha(x, y, z, a)
    }
}
