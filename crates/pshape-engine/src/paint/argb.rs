/// Splits a packed `0xAARRGGBB` color into normalized `[r, g, b, a]`.
#[inline]
pub fn unpack_rgba(argb: u32) -> [f32; 4] {
    [
        ((argb >> 16) & 0xff) as f32 / 255.0,
        ((argb >> 8) & 0xff) as f32 / 255.0,
        (argb & 0xff) as f32 / 255.0,
        ((argb >> 24) & 0xff) as f32 / 255.0,
    ]
}

/// Like [`unpack_rgba`] without the alpha channel.
#[inline]
pub fn unpack_rgb(argb: u32) -> [f32; 3] {
    let [r, g, b, _] = unpack_rgba(argb);
    [r, g, b]
}

/// Packs normalized `[r, g, b, a]` into `0xAARRGGBB`.
///
/// Channels are truncated after scaling by 255, matching how the calculator
/// produces its 8-bit values.
#[inline]
pub fn pack_rgba(rgba: [f32; 4]) -> u32 {
    let [r, g, b, a] = rgba.map(to_byte);
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Packs normalized `[r, g, b]` with a fully opaque alpha.
#[inline]
pub fn pack_rgb_opaque(rgb: [f32; 3]) -> u32 {
    let [r, g, b] = rgb.map(to_byte);
    0xff00_0000 | (r << 16) | (g << 8) | b
}

#[inline]
fn to_byte(c: f32) -> u32 {
    ((c * 255.0) as u32).min(255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_then_pack_is_lossless_for_bytes() {
        for argb in [0x0000_0000, 0xff00_0000, 0x80ff_7f01, 0xffff_ffff, 0x12_34_56_78] {
            assert_eq!(pack_rgba(unpack_rgba(argb)), argb);
        }
    }

    #[test]
    fn opaque_pack_forces_alpha() {
        assert_eq!(pack_rgb_opaque([1.0, 0.0, 0.0]), 0xffff_0000);
        assert_eq!(pack_rgb_opaque(unpack_rgb(0x0000_ff00)), 0xff00_ff00);
    }

    #[test]
    fn out_of_range_channels_saturate() {
        assert_eq!(pack_rgba([2.0, -1.0, 0.0, 1.0]), 0xffff_0000);
    }
}
