/// Per-corner radii for a rounded rect primitive.
///
/// Corners run clockwise from the top-left. Negative values are treated as
/// zero by renderers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// Square corners.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Reads the radii trailing a RECT parameter list: none, one shared
    /// radius, or all four. Any other count yields `None`.
    pub fn from_params(extra: &[f32]) -> Option<Self> {
        match *extra {
            [] => Some(Self::zero()),
            [r] => Some(Self::all(r)),
            [tl, tr, br, bl] => Some(Self::new(tl, tr, br, bl)),
            _ => None,
        }
    }
}
