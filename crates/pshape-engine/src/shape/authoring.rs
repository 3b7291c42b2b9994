//! Calls accepted between `begin_shape` and `end_shape`.

use glam::Vec3;

use crate::diag::{ShapeWarning, Status, reject};
use crate::geometry::{Vertex, VertexAttribs, VertexCode};
use crate::paint::{ColorMode, ColorSpace, ColorSpec, unpack_rgb, unpack_rgba};
use crate::texture::ImageHandle;

use super::{CloseMode, Family, Phase, ShapeKind, ShapeNode, StrokeCap, StrokeJoin, TextureMode};

impl ShapeNode {
    // ── begin/end ─────────────────────────────────────────────────────────

    /// Opens the node for authoring with `kind` as its vertex mode.
    pub fn begin_shape(&mut self, kind: ShapeKind) -> Status {
        if self.family == Family::Group {
            return reject(ShapeWarning::GroupUnsupported { op: "beginShape()" });
        }
        if self.is_open() {
            return reject(ShapeWarning::AlreadyOpen);
        }
        self.kind = kind;
        self.phase = Phase::Open;
        Status::Applied
    }

    pub fn end_shape(&mut self, mode: CloseMode) -> Status {
        if self.family == Family::Group {
            return reject(ShapeWarning::GroupUnsupported { op: "endShape()" });
        }
        if !self.is_open() {
            return reject(ShapeWarning::NotOpen);
        }
        if self.open_contour {
            log::warn!("{}", ShapeWarning::ContourLeftOpen);
            self.open_contour = false;
            self.path.pop_trailing_break();
        }
        self.closed = mode == CloseMode::Close;
        self.phase = Phase::Closed;
        Status::Applied
    }

    pub fn begin_contour(&mut self) -> Status {
        if let Err(w) = self.check_authoring("beginContour()") {
            return reject(w);
        }
        if self.open_contour {
            return reject(ShapeWarning::ContourAlreadyOpen);
        }
        self.open_contour = true;
        self.path.push_break();
        Status::Applied
    }

    pub fn end_contour(&mut self) -> Status {
        if let Err(w) = self.check_authoring("endContour()") {
            return reject(w);
        }
        if !self.open_contour {
            return reject(ShapeWarning::ContourNotOpen);
        }
        self.open_contour = false;
        if self.path.pop_trailing_break() {
            log::debug!("dropped empty contour");
        }
        Status::Applied
    }

    // ── vertices ──────────────────────────────────────────────────────────

    pub fn vertex(&mut self, x: f32, y: f32) -> Status {
        self.author("vertex()", VertexCode::Vertex, [[x, y, 0.0]], None)
    }

    pub fn vertex_3d(&mut self, x: f32, y: f32, z: f32) -> Status {
        self.author("vertex()", VertexCode::Vertex, [[x, y, z]], None)
    }

    /// Vertex with texture coordinates. In [`TextureMode::Image`] with a
    /// bound texture, `u`/`v` are pixels and get normalized by its size.
    pub fn vertex_uv(&mut self, x: f32, y: f32, u: f32, v: f32) -> Status {
        self.author("vertex()", VertexCode::Vertex, [[x, y, 0.0]], Some([u, v]))
    }

    pub fn vertex_3d_uv(&mut self, x: f32, y: f32, z: f32, u: f32, v: f32) -> Status {
        self.author("vertex()", VertexCode::Vertex, [[x, y, z]], Some([u, v]))
    }

    pub fn bezier_vertex(&mut self, x2: f32, y2: f32, x3: f32, y3: f32, x4: f32, y4: f32) -> Status {
        self.author("bezierVertex()", VertexCode::Bezier, [[x2, y2, 0.0], [x3, y3, 0.0], [x4, y4, 0.0]], None)
    }

    pub fn bezier_vertex_3d(&mut self, c1: Vec3, c2: Vec3, anchor: Vec3) -> Status {
        self.author("bezierVertex()", VertexCode::Bezier, [c1.to_array(), c2.to_array(), anchor.to_array()], None)
    }

    pub fn quadratic_vertex(&mut self, cx: f32, cy: f32, x3: f32, y3: f32) -> Status {
        self.author("quadraticVertex()", VertexCode::Quadratic, [[cx, cy, 0.0], [x3, y3, 0.0]], None)
    }

    pub fn quadratic_vertex_3d(&mut self, control: Vec3, anchor: Vec3) -> Status {
        self.author("quadraticVertex()", VertexCode::Quadratic, [control.to_array(), anchor.to_array()], None)
    }

    pub fn curve_vertex(&mut self, x: f32, y: f32) -> Status {
        self.author("curveVertex()", VertexCode::Curve, [[x, y, 0.0]], None)
    }

    pub fn curve_vertex_3d(&mut self, x: f32, y: f32, z: f32) -> Status {
        self.author("curveVertex()", VertexCode::Curve, [[x, y, z]], None)
    }

    /// Sets the normal recorded with subsequent vertices.
    pub fn normal(&mut self, nx: f32, ny: f32, nz: f32) -> Status {
        self.while_open("normal()", |s| {
            s.normal = [nx, ny, nz];
            s.path.insert_attribs(VertexAttribs::NORMAL);
        })
    }

    // ── fill / stroke / tint ──────────────────────────────────────────────

    pub fn fill(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("fill()", |s| s.apply_fill(true, argb))
    }

    pub fn no_fill(&mut self) -> Status {
        self.while_open("noFill()", |s| s.apply_fill(false, 0))
    }

    pub fn stroke(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("stroke()", |s| {
            s.style.stroke = true;
            s.style.stroke_color = argb;
        })
    }

    pub fn no_stroke(&mut self) -> Status {
        self.while_open("noStroke()", |s| s.style.stroke = false)
    }

    pub fn tint(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("tint()", |s| {
            s.style.tint = true;
            s.style.tint_color = argb;
        })
    }

    pub fn no_tint(&mut self) -> Status {
        self.while_open("noTint()", |s| s.style.tint = false)
    }

    pub fn stroke_weight(&mut self, weight: f32) -> Status {
        self.while_open("strokeWeight()", |s| s.style.stroke_weight = weight)
    }

    pub fn stroke_cap(&mut self, cap: StrokeCap) -> Status {
        self.while_open("strokeCap()", |s| s.style.stroke_cap = cap)
    }

    pub fn stroke_join(&mut self, join: StrokeJoin) -> Status {
        self.while_open("strokeJoin()", |s| s.style.stroke_join = join)
    }

    // ── material ──────────────────────────────────────────────────────────

    pub fn ambient(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("ambient()", |s| {
            s.style.ambient_set = true;
            s.style.ambient_color = argb;
        })
    }

    pub fn specular(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("specular()", |s| s.style.specular_color = argb)
    }

    pub fn emissive(&mut self, color: impl Into<ColorSpec>) -> Status {
        let argb = self.style.color_mode.calc(color).argb;
        self.while_open("emissive()", |s| s.style.emissive_color = argb)
    }

    pub fn shininess(&mut self, shine: f32) -> Status {
        self.while_open("shininess()", |s| s.style.shininess = shine)
    }

    // ── texture ───────────────────────────────────────────────────────────

    pub fn texture(&mut self, image: ImageHandle) -> Status {
        self.while_open("texture()", |s| s.image = Some(image))
    }

    pub fn no_texture(&mut self) -> Status {
        self.while_open("noTexture()", |s| s.image = None)
    }

    pub fn texture_mode(&mut self, mode: TextureMode) -> Status {
        self.while_open("textureMode()", |s| s.style.texture_mode = mode)
    }

    // ── color mode ────────────────────────────────────────────────────────

    /// Same maximum for every channel. Accepted in any phase.
    pub fn color_mode(&mut self, space: ColorSpace, max: f32) {
        self.style.color_mode = ColorMode::new(space, max);
    }

    pub fn color_mode_with(&mut self, space: ColorSpace, max_x: f32, max_y: f32, max_z: f32, max_a: f32) {
        self.style.color_mode = ColorMode::with_maxima(space, max_x, max_y, max_z, max_a);
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn apply_fill(&mut self, on: bool, argb: u32) {
        self.style.fill = on;
        self.style.fill_color = argb;
        if !self.style.ambient_set {
            self.style.ambient_color = argb;
        }
    }

    /// Runs `f` if the node is open, otherwise warns.
    fn while_open(&mut self, op: &'static str, f: impl FnOnce(&mut Self)) -> Status {
        if !self.is_open() {
            return reject(ShapeWarning::OutsideBeginEnd { op });
        }
        f(self);
        Status::Applied
    }

    fn check_authoring(&self, op: &'static str) -> Result<(), ShapeWarning> {
        if !self.is_open() {
            return Err(ShapeWarning::OutsideBeginEnd { op });
        }
        if self.family == Family::Group {
            return Err(ShapeWarning::GroupUnsupported { op });
        }
        Ok(())
    }

    fn author<const N: usize>(
        &mut self,
        op: &'static str,
        code: VertexCode,
        points: [[f32; 3]; N],
        uv: Option<[f32; 2]>,
    ) -> Status {
        if let Err(w) = self.check_authoring(op) {
            return reject(w);
        }
        let uv = uv.map(|uv| self.normalize_uv(uv));
        let verts = points.map(|p| self.record(p, uv.unwrap_or_default()));
        for p in points {
            self.extents.include(Vec3::from_array(p));
        }
        if uv.is_some() {
            self.path.insert_attribs(VertexAttribs::TEXCOORD);
        }
        self.path.push(code, &verts);
        Status::Applied
    }

    fn normalize_uv(&self, [u, v]: [f32; 2]) -> [f32; 2] {
        match &self.image {
            Some(img) if self.style.texture_mode == TextureMode::Image && img.width() > 0 && img.height() > 0 => {
                [u / img.width() as f32, v / img.height() as f32]
            }
            _ => [u, v],
        }
    }

    /// A vertex carrying the current style. The color slot holds the tint
    /// when a texture is bound, the fill otherwise.
    fn record(&self, position: [f32; 3], uv: [f32; 2]) -> Vertex {
        let s = &self.style;
        let fill = match (&self.image, s.tint) {
            (Some(_), true) => unpack_rgba(s.tint_color),
            (Some(_), false) => [1.0; 4],
            (None, _) => unpack_rgba(s.fill_color),
        };
        Vertex {
            position,
            uv,
            fill,
            stroke: unpack_rgba(s.stroke_color),
            stroke_weight: s.stroke_weight,
            normal: self.normal,
            ambient: unpack_rgb(s.ambient_color),
            specular: unpack_rgb(s.specular_color),
            emissive: unpack_rgb(s.emissive_color),
            shininess: s.shininess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::StyleState;

    fn open_path() -> ShapeNode {
        let mut n = ShapeNode::new(Family::Path);
        assert!(n.begin_shape(ShapeKind::Polygon).is_applied());
        n
    }

    // ── phase ─────────────────────────────────────────────────────────────

    #[test]
    fn fill_outside_begin_end_is_ignored() {
        let mut n = ShapeNode::new(Family::Path);
        let before = n.style().fill_color;
        let s = n.fill(0xff12_3456_u32);
        assert_eq!(s.warning(), Some(&ShapeWarning::OutsideBeginEnd { op: "fill()" }));
        assert_eq!(n.style().fill_color, before);
    }

    #[test]
    fn fill_while_open_sets_color_and_flag() {
        let mut n = open_path();
        n.no_fill();
        assert!(!n.style().fill);
        assert!(n.fill((255.0, 0.0, 0.0)).is_applied());
        assert!(n.style().fill);
        assert_eq!(n.style().fill_color, 0xffff_0000);
    }

    #[test]
    fn fill_carries_into_ambient_until_ambient_is_set() {
        let mut n = open_path();
        n.fill(0xff00_ff00_u32);
        assert_eq!(n.style().ambient_color, 0xff00_ff00);
        n.ambient(0xff00_00ff_u32);
        n.fill(0xffff_0000_u32);
        assert_eq!(n.style().ambient_color, 0xff00_00ff);
    }

    #[test]
    fn closed_shape_rejects_authoring() {
        let mut n = open_path();
        n.vertex(1.0, 1.0);
        assert!(n.end_shape(CloseMode::Close).is_applied());
        assert!(n.is_closed_path());
        assert!(n.vertex(2.0, 2.0).is_ignored());
        assert!(n.stroke_weight(3.0).is_ignored());
        assert_eq!(n.path().vertex_count(), 1);
    }

    #[test]
    fn begin_twice_and_end_without_begin_warn() {
        let mut n = open_path();
        assert_eq!(n.begin_shape(ShapeKind::Lines).warning(), Some(&ShapeWarning::AlreadyOpen));
        assert_eq!(n.kind(), ShapeKind::Polygon);
        n.end_shape(CloseMode::Open);
        assert_eq!(n.end_shape(CloseMode::Open).warning(), Some(&ShapeWarning::NotOpen));
    }

    #[test]
    fn groups_cannot_be_opened() {
        let mut g = ShapeNode::new(Family::Group);
        assert!(matches!(g.begin_shape(ShapeKind::Polygon).warning(), Some(ShapeWarning::GroupUnsupported { .. })));
        assert!(matches!(g.end_shape(CloseMode::Open).warning(), Some(ShapeWarning::GroupUnsupported { .. })));
        assert!(g.vertex(0.0, 0.0).is_ignored());
    }

    // ── vertices ──────────────────────────────────────────────────────────

    #[test]
    fn vertices_round_trip_and_grow_extents() {
        let mut n = open_path();
        let pts = [(3.0, 4.0), (10.0, 2.0), (-5.0, 7.5)];
        for (x, y) in pts {
            n.vertex(x, y);
        }
        assert_eq!(n.vertex_count(), pts.len());
        for (i, (x, y)) in pts.iter().enumerate() {
            assert_eq!(n.vertex_at(i), Some(Vec3::new(*x, *y, 0.0)));
        }
        assert_eq!((n.width(), n.height()), (10.0, 7.5));
        assert_eq!(n.vertex_at(9), None);
    }

    #[test]
    fn curves_record_codes_with_strides() {
        let mut n = open_path();
        n.vertex(0.0, 0.0);
        n.bezier_vertex(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        n.quadratic_vertex(4.0, 4.0, 5.0, 5.0);
        n.curve_vertex(6.0, 6.0);
        assert_eq!(
            n.vertex_codes(),
            &[VertexCode::Vertex, VertexCode::Bezier, VertexCode::Quadratic, VertexCode::Curve]
        );
        assert_eq!(n.vertex_count(), 7);
    }

    #[test]
    fn vertices_capture_current_style() {
        let mut n = open_path();
        n.fill((255.0, 0.0, 0.0));
        n.stroke_weight(4.0);
        n.normal(0.0, 0.0, 1.0);
        n.vertex_uv(1.0, 2.0, 0.5, 0.25);

        let v = n.path().get(0).copied().unwrap();
        assert_eq!(v.fill, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v.stroke_weight, 4.0);
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        assert_eq!(v.uv, [0.5, 0.25]);
        assert!(n.path().attribs().contains(VertexAttribs::NORMAL | VertexAttribs::TEXCOORD));
    }

    #[test]
    fn nonzero_z_makes_node_3d() {
        let mut n = open_path();
        n.vertex_3d(1.0, 1.0, 0.0);
        assert!(!n.is_3d());
        n.vertex_3d(1.0, 1.0, 2.0);
        assert!(n.is_3d());
        assert_eq!(n.depth(), 2.0);
    }

    // ── contours ──────────────────────────────────────────────────────────

    #[test]
    fn contour_appends_break() {
        let mut n = open_path();
        n.vertex(0.0, 0.0);
        assert!(n.begin_contour().is_applied());
        assert_eq!(n.begin_contour().warning(), Some(&ShapeWarning::ContourAlreadyOpen));
        n.vertex(1.0, 1.0);
        assert!(n.end_contour().is_applied());
        assert_eq!(n.end_contour().warning(), Some(&ShapeWarning::ContourNotOpen));
        assert_eq!(n.vertex_codes(), &[VertexCode::Vertex, VertexCode::Break, VertexCode::Vertex]);
    }

    #[test]
    fn empty_contour_leaves_no_break() {
        let mut n = open_path();
        n.vertex(0.0, 0.0);
        n.begin_contour();
        n.end_contour();
        assert_eq!(n.vertex_codes(), &[VertexCode::Vertex]);
    }

    #[test]
    fn end_shape_closes_a_dangling_contour() {
        let mut n = open_path();
        n.vertex(0.0, 0.0);
        n.vertex(1.0, 0.0);
        n.begin_contour();
        assert!(n.end_shape(CloseMode::Close).is_applied());
        assert_eq!(n.vertex_codes(), &[VertexCode::Vertex, VertexCode::Vertex]);

        n.begin_shape(ShapeKind::Polygon);
        assert!(n.begin_contour().is_applied());
        n.vertex(2.0, 2.0);
        assert!(n.end_contour().is_applied());
    }

    #[test]
    fn contour_outside_begin_end_warns() {
        let mut n = ShapeNode::new(Family::Path);
        assert_eq!(n.begin_contour().warning(), Some(&ShapeWarning::OutsideBeginEnd { op: "beginContour()" }));
    }

    // ── color mode ────────────────────────────────────────────────────────

    #[test]
    fn fill_uses_node_color_mode() {
        let mut n = ShapeNode::with_style(Family::Path, StyleState::default());
        n.color_mode(ColorSpace::Rgb, 1.0);
        assert_eq!(n.current_color_mode().max_x, 1.0);
        n.begin_shape(ShapeKind::Polygon);
        n.fill((1.0, 0.0, 0.0));
        assert_eq!(n.style().fill_color, 0xffff_0000);
    }

    #[test]
    fn image_mode_uvs_are_normalized_by_texture_size() {
        use crate::texture::Image;
        use ::image::{Rgba, RgbaImage};
        use std::rc::Rc;

        let img = Rc::new(Image::from_rgba(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255]))));
        let mut n = open_path();
        n.vertex_uv(0.0, 0.0, 2.0, 1.0);
        n.texture(img);
        n.vertex_uv(1.0, 0.0, 2.0, 1.0);
        n.texture_mode(TextureMode::Normal);
        n.vertex_uv(2.0, 0.0, 0.5, 0.25);

        assert_eq!(n.path().get(0).unwrap().uv, [2.0, 1.0]);
        assert_eq!(n.path().get(1).unwrap().uv, [0.5, 0.5]);
        assert_eq!(n.path().get(2).unwrap().uv, [0.5, 0.25]);
    }

    #[test]
    fn textured_vertices_store_tint() {
        use crate::texture::Image;
        use ::image::{Rgba, RgbaImage};
        use std::rc::Rc;

        let img = Rc::new(Image::from_rgba(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))));
        let mut n = open_path();
        n.texture(img);
        n.vertex(0.0, 0.0);
        n.tint(0xff00_00ff_u32);
        n.vertex(1.0, 0.0);

        assert_eq!(n.path().get(0).unwrap().fill, [1.0; 4]);
        assert_eq!(n.path().get(1).unwrap().fill, [0.0, 0.0, 1.0, 1.0]);
    }
}
