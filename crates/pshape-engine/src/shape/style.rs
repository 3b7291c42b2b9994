use crate::paint::ColorMode;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StrokeCap {
    #[default]
    Round,
    Square,
    Project,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

/// How the four leading parameters of a rect, ellipse or image are read.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShapeMode {
    /// x, y of the top-left corner, then width, height.
    #[default]
    Corner,
    /// Two opposite corners.
    Corners,
    /// Center, then width, height.
    Center,
    /// Center, then half-width, half-height.
    Radius,
}

/// Coordinate space of texture UVs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextureMode {
    /// UVs are in image pixels.
    #[default]
    Image,
    /// UVs are in `[0, 1]`.
    Normal,
}

/// Optional seventh ARC parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArcMode {
    Open,
    Chord,
    Pie,
}

impl ArcMode {
    /// Decodes the numeric mode stored in a primitive's parameter list.
    pub fn from_param(value: f32) -> Self {
        match value as i32 {
            2 => ArcMode::Chord,
            3 => ArcMode::Pie,
            _ => ArcMode::Open,
        }
    }

    pub fn as_param(self) -> f32 {
        match self {
            ArcMode::Open => 1.0,
            ArcMode::Chord => 2.0,
            ArcMode::Pie => 3.0,
        }
    }
}

/// Style captured on a shape and replayed onto the renderer when the shape
/// honors its own style.
///
/// Colors are packed `0xAARRGGBB`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    pub fill: bool,
    pub fill_color: u32,

    pub stroke: bool,
    pub stroke_color: u32,
    pub stroke_weight: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,

    pub tint: bool,
    pub tint_color: u32,

    pub ambient_color: u32,
    /// Set once `ambient` is called explicitly; until then fill changes
    /// carry over to the ambient color.
    pub ambient_set: bool,
    pub specular_color: u32,
    pub emissive_color: u32,
    pub shininess: f32,

    pub rect_mode: ShapeMode,
    pub ellipse_mode: ShapeMode,
    pub texture_mode: TextureMode,
    pub color_mode: ColorMode,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            fill: true,
            fill_color: 0xffff_ffff,
            stroke: true,
            stroke_color: 0xff00_0000,
            stroke_weight: 1.0,
            stroke_cap: StrokeCap::Round,
            stroke_join: StrokeJoin::Miter,
            tint: false,
            tint_color: 0xffff_ffff,
            ambient_color: 0xffff_ffff,
            ambient_set: false,
            specular_color: 0xff7d_7d7d,
            emissive_color: 0xff00_0000,
            shininess: 1.0,
            rect_mode: ShapeMode::Corner,
            ellipse_mode: ShapeMode::Center,
            texture_mode: TextureMode::Image,
            color_mode: ColorMode::default(),
        }
    }
}
