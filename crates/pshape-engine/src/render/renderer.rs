use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::diag::ShapeError;
use crate::geometry::Vertex;
use crate::shape::{ArcMode, CloseMode, ShapeKind, ShapeMode, StrokeCap, StrokeJoin, StyleState};
use crate::texture::{Image, ImageHandle};
use crate::transform::ShapeMatrix;

use super::CornerRadii;

/// Graphics context a shape draws itself onto.
///
/// The call set mirrors an immediate-mode sketch API: matrix and style
/// stacks, vertex runs bracketed by `begin_shape`/`end_shape`, and one call
/// per primitive. Colors are packed `0xAARRGGBB`.
///
/// Implementors only need to record or rasterize; all shape bookkeeping
/// happens before these calls are made.
pub trait Renderer {
    // ── transform ─────────────────────────────────────────────────────────

    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn apply_matrix(&mut self, m: &ShapeMatrix);

    // ── style ─────────────────────────────────────────────────────────────

    fn push_style(&mut self);
    fn pop_style(&mut self);

    /// Current style, used to seed newly created shapes.
    fn current_style(&self) -> StyleState;

    fn fill(&mut self, argb: u32);
    fn no_fill(&mut self);
    fn stroke(&mut self, argb: u32);
    fn no_stroke(&mut self);
    fn stroke_weight(&mut self, weight: f32);
    fn stroke_cap(&mut self, cap: StrokeCap);
    fn stroke_join(&mut self, join: StrokeJoin);

    // ── modes ─────────────────────────────────────────────────────────────

    fn rect_mode(&self) -> ShapeMode;
    fn set_rect_mode(&mut self, mode: ShapeMode);
    fn ellipse_mode(&self) -> ShapeMode;
    fn set_ellipse_mode(&mut self, mode: ShapeMode);
    fn image_mode(&self) -> ShapeMode;
    fn set_image_mode(&mut self, mode: ShapeMode);

    // ── vertex runs ───────────────────────────────────────────────────────

    fn begin_shape(&mut self, kind: ShapeKind);
    fn end_shape(&mut self, mode: CloseMode);
    fn begin_contour(&mut self);
    fn end_contour(&mut self);

    fn vertex(&mut self, p: Vec2);
    fn vertex_3d(&mut self, p: Vec3);
    /// A full vertex record: position plus per-vertex color, normal and UV.
    fn styled_vertex(&mut self, v: &Vertex);
    fn bezier_vertex(&mut self, c1: Vec2, c2: Vec2, anchor: Vec2);
    fn bezier_vertex_3d(&mut self, c1: Vec3, c2: Vec3, anchor: Vec3);
    fn quadratic_vertex(&mut self, control: Vec2, anchor: Vec2);
    fn quadratic_vertex_3d(&mut self, control: Vec3, anchor: Vec3);
    fn curve_vertex(&mut self, p: Vec2);
    fn curve_vertex_3d(&mut self, p: Vec3);

    // ── primitives ────────────────────────────────────────────────────────

    fn point(&mut self, p: Vec2);
    fn point_3d(&mut self, p: Vec3);
    fn line(&mut self, a: Vec2, b: Vec2);
    fn line_3d(&mut self, a: Vec3, b: Vec3);
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2);
    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2);
    /// Parameters are read according to [`rect_mode`](Self::rect_mode).
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radii: CornerRadii);
    /// Parameters are read according to [`ellipse_mode`](Self::ellipse_mode).
    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32);
    #[allow(clippy::too_many_arguments)]
    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32, mode: Option<ArcMode>);
    fn box_3d(&mut self, size: Vec3);
    fn sphere(&mut self, radius: f32);
    /// Parameters are read according to [`image_mode`](Self::image_mode).
    fn image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32);

    // ── resources ─────────────────────────────────────────────────────────

    /// Loads a file-backed texture. Runs synchronously on the draw path.
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, ShapeError> {
        Image::open(path).map(Rc::new)
    }
}
