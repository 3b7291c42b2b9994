use glam::{Vec2, Vec3};

use crate::geometry::Vertex;
use crate::render::CornerRadii;
use crate::shape::{ArcMode, CloseMode, ShapeKind, ShapeMode, StrokeCap, StrokeJoin};
use crate::texture::ImageHandle;
use crate::transform::ShapeMatrix;

/// A rect as drawn, with the rect mode in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub radii: CornerRadii,
    pub mode: ShapeMode,
}

/// An ellipse or arc with the ellipse mode in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCmd {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub mode: ShapeMode,
}

/// A textured rect with the image mode in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: ImageHandle,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub mode: ShapeMode,
}

/// Recorded renderer call.
///
/// One variant per [`Renderer`](crate::render::Renderer) call that produces
/// output or changes state; mode setters are folded into the commands that
/// read them.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    PushMatrix,
    PopMatrix,
    ApplyMatrix(ShapeMatrix),

    PushStyle,
    PopStyle,
    Fill(u32),
    NoFill,
    Stroke(u32),
    NoStroke,
    StrokeWeight(f32),
    StrokeCap(StrokeCap),
    StrokeJoin(StrokeJoin),

    BeginShape(ShapeKind),
    EndShape(CloseMode),
    BeginContour,
    EndContour,
    Vertex(Vec2),
    Vertex3d(Vec3),
    StyledVertex(Vertex),
    Bezier(Vec2, Vec2, Vec2),
    Bezier3d(Vec3, Vec3, Vec3),
    Quadratic(Vec2, Vec2),
    Quadratic3d(Vec3, Vec3),
    Curve(Vec2),
    Curve3d(Vec3),

    Point(Vec2),
    Point3d(Vec3),
    Line(Vec2, Vec2),
    Line3d(Vec3, Vec3),
    Triangle(Vec2, Vec2, Vec2),
    Quad(Vec2, Vec2, Vec2, Vec2),
    Rect(RectCmd),
    Ellipse(EllipseCmd),
    Arc { ellipse: EllipseCmd, start: f32, stop: f32, mode: Option<ArcMode> },
    Box(Vec3),
    Sphere(f32),
    Image(ImageCmd),
}

impl DrawCmd {
    /// Short name for summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            DrawCmd::PushMatrix | DrawCmd::PopMatrix | DrawCmd::ApplyMatrix(_) => "matrix",
            DrawCmd::PushStyle
            | DrawCmd::PopStyle
            | DrawCmd::Fill(_)
            | DrawCmd::NoFill
            | DrawCmd::Stroke(_)
            | DrawCmd::NoStroke
            | DrawCmd::StrokeWeight(_)
            | DrawCmd::StrokeCap(_)
            | DrawCmd::StrokeJoin(_) => "style",
            DrawCmd::BeginShape(_) | DrawCmd::EndShape(_) => "shape",
            DrawCmd::BeginContour | DrawCmd::EndContour => "contour",
            DrawCmd::Vertex(_)
            | DrawCmd::Vertex3d(_)
            | DrawCmd::StyledVertex(_)
            | DrawCmd::Bezier(..)
            | DrawCmd::Bezier3d(..)
            | DrawCmd::Quadratic(..)
            | DrawCmd::Quadratic3d(..)
            | DrawCmd::Curve(_)
            | DrawCmd::Curve3d(_) => "vertex",
            DrawCmd::Image(_) => "image",
            _ => "primitive",
        }
    }
}
