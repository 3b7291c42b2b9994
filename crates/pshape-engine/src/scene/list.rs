use std::collections::HashMap;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::diag::ShapeError;
use crate::geometry::Vertex;
use crate::render::{CornerRadii, Renderer};
use crate::shape::{ArcMode, CloseMode, ShapeKind, ShapeMode, StrokeCap, StrokeJoin, StyleState};
use crate::texture::{Image, ImageHandle};
use crate::transform::ShapeMatrix;

use super::DrawCmd;
use super::cmd::{EllipseCmd, ImageCmd, RectCmd};

/// Recording renderer.
///
/// Every call is appended as a [`DrawCmd`]; style and mode state is tracked
/// so getters answer like a live context. Useful headless and as a test
/// double.
///
/// ```
/// use pshape_engine::scene::{DrawCmd, DrawList};
/// use pshape_engine::shape::{ShapeKind, ShapeNode, ShapeTree};
///
/// let mut tree = ShapeTree::new();
/// let dot = tree.insert(ShapeNode::primitive(ShapeKind::Point, [4.0, 2.0]));
///
/// let mut list = DrawList::new();
/// tree.draw(dot, &mut list);
/// assert!(list.cmds().iter().any(|c| matches!(c, DrawCmd::Point(_))));
/// assert_eq!(list.style_depth(), 0);
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    style: StyleState,
    image_mode: ShapeMode,
    style_stack: Vec<(StyleState, ShapeMode)>,
    matrix_depth: usize,
    /// Images handed out by `load_image` before touching the filesystem.
    images: HashMap<String, ImageHandle>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded commands and the stacks. Keeps registered images.
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.style_stack.clear();
        self.matrix_depth = 0;
    }

    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Open `push_matrix` calls.
    #[inline]
    pub fn matrix_depth(&self) -> usize {
        self.matrix_depth
    }

    /// Open `push_style` calls.
    #[inline]
    pub fn style_depth(&self) -> usize {
        self.style_stack.len()
    }

    /// Makes `load_image(path)` return `image` without reading a file.
    pub fn register_image(&mut self, path: impl Into<String>, image: ImageHandle) {
        self.images.insert(path.into(), image);
    }

    #[inline]
    fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }
}

impl Renderer for DrawList {
    // ── transform ─────────────────────────────────────────────────────────

    fn push_matrix(&mut self) {
        self.matrix_depth += 1;
        self.push(DrawCmd::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        debug_assert!(self.matrix_depth > 0, "pop_matrix called without matching push_matrix");
        self.matrix_depth = self.matrix_depth.saturating_sub(1);
        self.push(DrawCmd::PopMatrix);
    }

    fn apply_matrix(&mut self, m: &ShapeMatrix) {
        self.push(DrawCmd::ApplyMatrix(*m));
    }

    // ── style ─────────────────────────────────────────────────────────────

    fn push_style(&mut self) {
        self.style_stack.push((self.style.clone(), self.image_mode));
        self.push(DrawCmd::PushStyle);
    }

    fn pop_style(&mut self) {
        debug_assert!(!self.style_stack.is_empty(), "pop_style called without matching push_style");
        if let Some((style, image_mode)) = self.style_stack.pop() {
            self.style = style;
            self.image_mode = image_mode;
        }
        self.push(DrawCmd::PopStyle);
    }

    fn current_style(&self) -> StyleState {
        self.style.clone()
    }

    fn fill(&mut self, argb: u32) {
        self.style.fill = true;
        self.style.fill_color = argb;
        self.push(DrawCmd::Fill(argb));
    }

    fn no_fill(&mut self) {
        self.style.fill = false;
        self.push(DrawCmd::NoFill);
    }

    fn stroke(&mut self, argb: u32) {
        self.style.stroke = true;
        self.style.stroke_color = argb;
        self.push(DrawCmd::Stroke(argb));
    }

    fn no_stroke(&mut self) {
        self.style.stroke = false;
        self.push(DrawCmd::NoStroke);
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.style.stroke_weight = weight;
        self.push(DrawCmd::StrokeWeight(weight));
    }

    fn stroke_cap(&mut self, cap: StrokeCap) {
        self.style.stroke_cap = cap;
        self.push(DrawCmd::StrokeCap(cap));
    }

    fn stroke_join(&mut self, join: StrokeJoin) {
        self.style.stroke_join = join;
        self.push(DrawCmd::StrokeJoin(join));
    }

    // ── modes ─────────────────────────────────────────────────────────────

    fn rect_mode(&self) -> ShapeMode {
        self.style.rect_mode
    }

    fn set_rect_mode(&mut self, mode: ShapeMode) {
        self.style.rect_mode = mode;
    }

    fn ellipse_mode(&self) -> ShapeMode {
        self.style.ellipse_mode
    }

    fn set_ellipse_mode(&mut self, mode: ShapeMode) {
        self.style.ellipse_mode = mode;
    }

    fn image_mode(&self) -> ShapeMode {
        self.image_mode
    }

    fn set_image_mode(&mut self, mode: ShapeMode) {
        self.image_mode = mode;
    }

    // ── vertex runs ───────────────────────────────────────────────────────

    fn begin_shape(&mut self, kind: ShapeKind) {
        self.push(DrawCmd::BeginShape(kind));
    }

    fn end_shape(&mut self, mode: CloseMode) {
        self.push(DrawCmd::EndShape(mode));
    }

    fn begin_contour(&mut self) {
        self.push(DrawCmd::BeginContour);
    }

    fn end_contour(&mut self) {
        self.push(DrawCmd::EndContour);
    }

    fn vertex(&mut self, p: Vec2) {
        self.push(DrawCmd::Vertex(p));
    }

    fn vertex_3d(&mut self, p: Vec3) {
        self.push(DrawCmd::Vertex3d(p));
    }

    fn styled_vertex(&mut self, v: &Vertex) {
        self.push(DrawCmd::StyledVertex(*v));
    }

    fn bezier_vertex(&mut self, c1: Vec2, c2: Vec2, anchor: Vec2) {
        self.push(DrawCmd::Bezier(c1, c2, anchor));
    }

    fn bezier_vertex_3d(&mut self, c1: Vec3, c2: Vec3, anchor: Vec3) {
        self.push(DrawCmd::Bezier3d(c1, c2, anchor));
    }

    fn quadratic_vertex(&mut self, control: Vec2, anchor: Vec2) {
        self.push(DrawCmd::Quadratic(control, anchor));
    }

    fn quadratic_vertex_3d(&mut self, control: Vec3, anchor: Vec3) {
        self.push(DrawCmd::Quadratic3d(control, anchor));
    }

    fn curve_vertex(&mut self, p: Vec2) {
        self.push(DrawCmd::Curve(p));
    }

    fn curve_vertex_3d(&mut self, p: Vec3) {
        self.push(DrawCmd::Curve3d(p));
    }

    // ── primitives ────────────────────────────────────────────────────────

    fn point(&mut self, p: Vec2) {
        self.push(DrawCmd::Point(p));
    }

    fn point_3d(&mut self, p: Vec3) {
        self.push(DrawCmd::Point3d(p));
    }

    fn line(&mut self, a: Vec2, b: Vec2) {
        self.push(DrawCmd::Line(a, b));
    }

    fn line_3d(&mut self, a: Vec3, b: Vec3) {
        self.push(DrawCmd::Line3d(a, b));
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.push(DrawCmd::Triangle(a, b, c));
    }

    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2) {
        self.push(DrawCmd::Quad(a, b, c, d));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, radii: CornerRadii) {
        let mode = self.style.rect_mode;
        self.push(DrawCmd::Rect(RectCmd { x, y, w, h, radii, mode }));
    }

    fn ellipse(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let mode = self.style.ellipse_mode;
        self.push(DrawCmd::Ellipse(EllipseCmd { x, y, w, h, mode }));
    }

    fn arc(&mut self, x: f32, y: f32, w: f32, h: f32, start: f32, stop: f32, mode: Option<ArcMode>) {
        let ellipse = EllipseCmd { x, y, w, h, mode: self.style.ellipse_mode };
        self.push(DrawCmd::Arc { ellipse, start, stop, mode });
    }

    fn box_3d(&mut self, size: Vec3) {
        self.push(DrawCmd::Box(size));
    }

    fn sphere(&mut self, radius: f32) {
        self.push(DrawCmd::Sphere(radius));
    }

    fn image(&mut self, image: &ImageHandle, x: f32, y: f32, w: f32, h: f32) {
        let mode = self.image_mode;
        self.push(DrawCmd::Image(ImageCmd { image: Rc::clone(image), x, y, w, h, mode }));
    }

    // ── resources ─────────────────────────────────────────────────────────

    fn load_image(&mut self, path: &str) -> Result<ImageHandle, ShapeError> {
        if let Some(img) = self.images.get(path) {
            return Ok(Rc::clone(img));
        }
        Image::open(path).map(Rc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Dimensions;

    #[test]
    fn pop_style_restores_state() {
        let mut list = DrawList::new();
        list.push_style();
        list.fill(0xff12_3456);
        list.set_image_mode(ShapeMode::Center);
        list.no_stroke();
        assert_eq!(list.current_style().fill_color, 0xff12_3456);

        list.pop_style();
        let s = list.current_style();
        assert_eq!(s, StyleState::default());
        assert_eq!(list.image_mode(), ShapeMode::Corner);
        assert_eq!(list.style_depth(), 0);
    }

    #[test]
    fn matrix_depth_tracks_pushes() {
        let mut list = DrawList::new();
        list.push_matrix();
        list.apply_matrix(&ShapeMatrix::identity(Dimensions::Two));
        assert_eq!(list.matrix_depth(), 1);
        list.pop_matrix();
        assert_eq!(list.matrix_depth(), 0);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn rect_records_active_mode() {
        let mut list = DrawList::new();
        list.set_rect_mode(ShapeMode::Center);
        list.rect(1.0, 2.0, 3.0, 4.0, CornerRadii::zero());
        match &list.cmds()[0] {
            DrawCmd::Rect(r) => assert_eq!(r.mode, ShapeMode::Center),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn registered_images_skip_the_filesystem() {
        use ::image::{Rgba, RgbaImage};

        let img = Rc::new(Image::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))));
        let mut list = DrawList::new();
        list.register_image("mem/a.png", Rc::clone(&img));
        assert!(Rc::ptr_eq(&list.load_image("mem/a.png").unwrap(), &img));
        assert!(list.load_image("/no/such/file.png").is_err());
    }

    #[test]
    fn clear_resets_commands_and_stacks() {
        let mut list = DrawList::new();
        list.point(Vec2::ZERO);
        list.push_matrix();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.matrix_depth(), 0);
    }
}
