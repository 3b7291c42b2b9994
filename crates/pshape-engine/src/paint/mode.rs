use super::ColorSpec;

/// Interpretation of the three color channels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ColorSpace {
    #[default]
    Rgb,
    /// Hue, saturation, brightness.
    Hsb,
}

/// Active color mode: channel interpretation plus per-channel maxima.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorMode {
    pub space: ColorSpace,
    /// Max for red (or hue).
    pub max_x: f32,
    /// Max for green (or saturation).
    pub max_y: f32,
    /// Max for blue (or brightness).
    pub max_z: f32,
    pub max_a: f32,
    scale: bool,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::new(ColorSpace::Rgb, 255.0)
    }
}

/// Output of a color calculation.
///
/// `r/g/b/a` are normalized to `[0, 1]` (assuming the mode is scaled or the
/// inputs were already normalized), the `*_i` fields are their truncated
/// 8-bit counterparts and `argb` the packed result.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CalcColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub ri: u32,
    pub gi: u32,
    pub bi: u32,
    pub ai: u32,
    pub argb: u32,
    /// True unless alpha is fully opaque.
    pub has_alpha: bool,
}

impl CalcColor {
    fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        let ri = (r * 255.0) as u32;
        let gi = (g * 255.0) as u32;
        let bi = (b * 255.0) as u32;
        let ai = (a * 255.0) as u32;
        Self {
            r,
            g,
            b,
            a,
            ri,
            gi,
            bi,
            ai,
            argb: (ai << 24) | (ri << 16) | (gi << 8) | bi,
            has_alpha: ai != 255,
        }
    }

    #[inline]
    pub fn rgba(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl ColorMode {
    /// Same maximum for every channel, e.g. `ColorMode::new(Rgb, 255.0)`.
    pub fn new(space: ColorSpace, max: f32) -> Self {
        Self::with_maxima(space, max, max, max, max)
    }

    pub fn with_maxima(space: ColorSpace, max_x: f32, max_y: f32, max_z: f32, max_a: f32) -> Self {
        let scale = max_a != 1.0 || max_x != max_y || max_y != max_z || max_z != max_a;
        Self { space, max_x, max_y, max_z, max_a, scale }
    }

    /// True when channel values must be divided by their maxima.
    ///
    /// `colorMode(RGB, 1)` is the only unscaled configuration: inputs are
    /// already in `[0, 1]`.
    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.scale
    }

    /// True for `colorMode(RGB, 255)`.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.space == ColorSpace::Rgb
            && self.max_x == 255.0
            && self.max_y == 255.0
            && self.max_z == 255.0
            && self.max_a == 255.0
    }

    /// Resolves any [`ColorSpec`] against this mode.
    pub fn calc(&self, spec: impl Into<ColorSpec>) -> CalcColor {
        match spec.into() {
            ColorSpec::Packed(v) => self.calc_packed(v, self.max_a),
            ColorSpec::PackedAlpha(v, a) => self.calc_packed(v, a),
            ColorSpec::Gray(v) => self.calc_gray(v, self.max_a),
            ColorSpec::GrayAlpha(v, a) => self.calc_gray(v, a),
            ColorSpec::Channels(x, y, z) => self.calc_channels(x, y, z, self.max_a),
            ColorSpec::ChannelsAlpha(x, y, z, a) => self.calc_channels(x, y, z, a),
        }
    }

    /// A packed value with no alpha bits that does not exceed the red/gray
    /// maximum is a gray level (`fill(128)`); anything else is an ARGB literal.
    ///
    /// This means `0x000000ff` is gray 255 under `colorMode(RGB, 255)`, not
    /// transparent blue. Kept for compatibility with existing sketches.
    fn calc_packed(&self, v: u32, alpha: f32) -> CalcColor {
        if v & 0xff00_0000 == 0 && v as f32 <= self.max_x {
            self.calc_gray(v as f32, alpha)
        } else {
            self.calc_argb(v, alpha)
        }
    }

    fn calc_gray(&self, gray: f32, alpha: f32) -> CalcColor {
        let gray = clamp(gray, self.max_x);
        let alpha = clamp(alpha, self.max_a);

        let v = if self.scale { gray / self.max_x } else { gray };
        let a = if self.scale { alpha / self.max_a } else { alpha };
        CalcColor::from_unit(v, v, v, a)
    }

    fn calc_channels(&self, x: f32, y: f32, z: f32, a: f32) -> CalcColor {
        let x = clamp(x, self.max_x);
        let y = clamp(y, self.max_y);
        let z = clamp(z, self.max_z);
        let a = clamp(a, self.max_a);

        let a = if self.scale { a / self.max_a } else { a };

        match self.space {
            ColorSpace::Rgb => {
                if self.scale {
                    CalcColor::from_unit(x / self.max_x, y / self.max_y, z / self.max_z, a)
                } else {
                    CalcColor::from_unit(x, y, z, a)
                }
            }
            ColorSpace::Hsb => {
                let (r, g, b) = hsb_to_rgb(x / self.max_x, y / self.max_y, z / self.max_z);
                CalcColor::from_unit(r, g, b, a)
            }
        }
    }

    fn calc_argb(&self, argb: u32, alpha: f32) -> CalcColor {
        let src_a = (argb >> 24) & 0xff;
        let (ai, argb) = if alpha == self.max_a {
            (src_a, argb)
        } else {
            let ai = (src_a as f32 * (clamp(alpha, self.max_a) / self.max_a)) as u32;
            (ai, (ai << 24) | (argb & 0x00ff_ffff))
        };
        let ri = (argb >> 16) & 0xff;
        let gi = (argb >> 8) & 0xff;
        let bi = argb & 0xff;

        CalcColor {
            r: ri as f32 / 255.0,
            g: gi as f32 / 255.0,
            b: bi as f32 / 255.0,
            a: ai as f32 / 255.0,
            ri,
            gi,
            bi,
            ai,
            argb,
            has_alpha: ai != 255,
        }
    }
}

#[inline]
fn clamp(v: f32, max: f32) -> f32 {
    if v > max {
        max
    } else if v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Six-sector HSB to RGB, all inputs and outputs in `[0, 1]`.
fn hsb_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (v, v, v);
    }

    let which = (h - h.trunc()) * 6.0;
    let f = which - which.trunc();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (which as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb255() -> ColorMode {
        ColorMode::default()
    }

    // ── RGB ───────────────────────────────────────────────────────────────

    #[test]
    fn default_mode_flags() {
        let m = rgb255();
        assert!(m.is_default());
        assert!(m.is_scaled());
        assert!(!ColorMode::new(ColorSpace::Rgb, 1.0).is_scaled());
        assert!(!ColorMode::new(ColorSpace::Hsb, 255.0).is_default());
    }

    #[test]
    fn rgba_channels_pack_into_argb() {
        let m = rgb255();
        for &(r, g, b, a) in &[(0u32, 0u32, 0u32, 255u32), (255, 128, 7, 200), (12, 34, 56, 78), (255, 255, 255, 0)] {
            let c = m.calc((r as f32, g as f32, b as f32, a as f32));
            assert_eq!(c.argb, (a << 24) | (r << 16) | (g << 8) | b, "({r}, {g}, {b}, {a})");
        }
    }

    #[test]
    fn channels_are_clamped_before_scaling() {
        let c = rgb255().calc((300.0, -20.0, 128.0, 999.0));
        assert_eq!(c.argb, 0xffff_0080);
        assert!(!c.has_alpha);
    }

    #[test]
    fn unscaled_mode_takes_unit_values() {
        let c = ColorMode::new(ColorSpace::Rgb, 1.0).calc((1.0, 0.5, 0.0));
        assert_eq!(c.ri, 255);
        assert_eq!(c.gi, 127);
        assert_eq!(c.bi, 0);
        assert_eq!(c.ai, 255);
    }

    #[test]
    fn transparency_flag() {
        assert!(rgb255().calc((10.0, 20.0, 30.0, 254.0)).has_alpha);
        assert!(!rgb255().calc((10.0, 20.0, 30.0)).has_alpha);
    }

    // ── gray vs packed ────────────────────────────────────────────────────

    #[test]
    fn small_packed_value_is_gray() {
        let c = rgb255().calc(128u32);
        assert_eq!(c.argb, 0xff80_8080);

        // The compatibility quirk: no alpha bits and <= max means gray.
        let c = rgb255().calc(0x0000_00ffu32);
        assert_eq!(c.argb, 0xffff_ffff);
    }

    #[test]
    fn packed_literal_passes_through() {
        let c = rgb255().calc(0xff33_6699u32);
        assert_eq!(c.argb, 0xff33_6699);
        assert_eq!((c.ri, c.gi, c.bi, c.ai), (0x33, 0x66, 0x99, 0xff));
    }

    #[test]
    fn packed_without_alpha_above_max_is_transparent_literal() {
        let c = rgb255().calc(0x0000_1000u32);
        assert_eq!(c.argb, 0x0000_1000);
        assert!(c.has_alpha);
    }

    #[test]
    fn packed_with_alpha_scales_source_alpha() {
        let c = rgb255().calc((0xff20_4060u32, 127.5));
        assert_eq!(c.ai, 127);
        assert_eq!(c.argb, 0x7f20_4060);
    }

    #[test]
    fn gray_with_alpha() {
        let c = rgb255().calc((255.0, 0.0));
        assert_eq!(c.argb, 0x00ff_ffff);
    }

    // ── HSB ───────────────────────────────────────────────────────────────

    #[test]
    fn hsb_zero_saturation_is_gray_of_brightness() {
        let m = ColorMode::with_maxima(ColorSpace::Hsb, 360.0, 100.0, 100.0, 1.0);
        let c = m.calc((0.0, 0.0, 100.0));
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, c.r);
        assert_eq!(c.b, c.r);

        let c = m.calc((200.0, 0.0, 50.0));
        assert!((c.r - 0.5).abs() < 1e-6);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn hsb_primary_hues() {
        let m = ColorMode::with_maxima(ColorSpace::Hsb, 360.0, 100.0, 100.0, 255.0);
        assert_eq!(m.calc((0.0, 100.0, 100.0)).argb, 0xffff_0000);
        assert_eq!(m.calc((120.0, 100.0, 100.0)).argb, 0xff00_ff00);
        assert_eq!(m.calc((240.0, 100.0, 100.0)).argb, 0xff00_00ff);
    }

    #[test]
    fn hsb_full_hue_wraps_to_red() {
        let m = ColorMode::new(ColorSpace::Hsb, 1.0);
        assert_eq!(m.calc((1.0, 1.0, 1.0)).argb, 0xffff_0000);
    }

    #[test]
    fn hsb_secondary_sector() {
        let m = ColorMode::new(ColorSpace::Hsb, 1.0);
        // Hue 1/2 is cyan: sector 3 with f = 0.
        let c = m.calc((0.5, 1.0, 1.0));
        assert_eq!((c.ri, c.gi, c.bi), (0, 255, 255));
    }
}
