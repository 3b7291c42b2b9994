//! Post-authoring setters and per-vertex accessors.
//!
//! Everything here is rejected while the node is open. Per-vertex style
//! setters additionally need a node built `with_per_vertex_styles(true)`.

use glam::Vec3;

use crate::diag::{ShapeWarning, Status, reject};
use crate::geometry::{Vertex, VertexCode};
use crate::paint::{pack_rgb_opaque, pack_rgba, unpack_rgb, unpack_rgba};
use crate::texture::ImageHandle;

use super::{Family, ShapeNode, StrokeCap, StrokeJoin, TextureMode};

impl ShapeNode {
    // ── fill ──────────────────────────────────────────────────────────────

    pub fn set_fill_enabled(&mut self, on: bool) -> Status {
        self.while_closed("setFill()", |s| s.style.fill = on)
    }

    /// Sets the fill color, and every vertex's fill when per-vertex styles
    /// are on and no texture is bound.
    pub fn set_fill_color(&mut self, argb: u32) -> Status {
        self.while_closed("setFill()", |s| {
            s.style.fill_color = argb;
            if s.per_vertex_styles && s.image.is_none() {
                s.each_vertex(|v| v.fill = unpack_rgba(argb));
            }
        })
    }

    /// Per-vertex fill. A no-op on textured nodes, where the slot holds the tint.
    pub fn set_fill_at(&mut self, index: usize, argb: u32) -> Status {
        let textured = self.image.is_some();
        self.with_vertex_style("setFill()", index, |v| {
            if !textured {
                v.fill = unpack_rgba(argb);
            }
        })
    }

    /// Fill of one vertex; 0 on textured nodes.
    pub fn fill_at(&self, index: usize) -> u32 {
        match self.vertex_or_warn("getFill()", index) {
            None => self.style.fill_color,
            Some(_) if self.image.is_some() => 0,
            Some(v) => pack_rgba(v.fill),
        }
    }

    // ── tint ──────────────────────────────────────────────────────────────

    pub fn set_tint_enabled(&mut self, on: bool) -> Status {
        self.while_closed("setTint()", |s| s.style.tint = on)
    }

    pub fn set_tint_color(&mut self, argb: u32) -> Status {
        self.while_closed("setTint()", |s| {
            s.style.tint_color = argb;
            if s.per_vertex_styles && s.image.is_some() {
                s.each_vertex(|v| v.fill = unpack_rgba(argb));
            }
        })
    }

    pub fn set_tint_at(&mut self, index: usize, argb: u32) -> Status {
        let textured = self.image.is_some();
        self.with_vertex_style("setTint()", index, |v| {
            if textured {
                v.fill = unpack_rgba(argb);
            }
        })
    }

    /// Tint of one vertex; 0 on untextured nodes.
    pub fn tint_at(&self, index: usize) -> u32 {
        match self.vertex_or_warn("getTint()", index) {
            None => self.style.tint_color,
            Some(v) if self.image.is_some() => pack_rgba(v.fill),
            Some(_) => 0,
        }
    }

    // ── stroke ────────────────────────────────────────────────────────────

    pub fn set_stroke_enabled(&mut self, on: bool) -> Status {
        self.while_closed("setStroke()", |s| s.style.stroke = on)
    }

    pub fn set_stroke_color(&mut self, argb: u32) -> Status {
        self.while_closed("setStroke()", |s| {
            s.style.stroke_color = argb;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.stroke = unpack_rgba(argb));
            }
        })
    }

    pub fn set_stroke_at(&mut self, index: usize, argb: u32) -> Status {
        self.with_vertex_style("setStroke()", index, |v| v.stroke = unpack_rgba(argb))
    }

    pub fn stroke_at(&self, index: usize) -> u32 {
        self.vertex_or_warn("getStroke()", index)
            .map_or(self.style.stroke_color, |v| pack_rgba(v.stroke))
    }

    pub fn set_stroke_weight(&mut self, weight: f32) -> Status {
        self.while_closed("setStrokeWeight()", |s| {
            s.style.stroke_weight = weight;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.stroke_weight = weight);
            }
        })
    }

    pub fn set_stroke_weight_at(&mut self, index: usize, weight: f32) -> Status {
        self.with_vertex_style("setStrokeWeight()", index, |v| v.stroke_weight = weight)
    }

    pub fn stroke_weight_at(&self, index: usize) -> f32 {
        self.vertex_or_warn("getStrokeWeight()", index)
            .map_or(self.style.stroke_weight, |v| v.stroke_weight)
    }

    pub fn set_stroke_cap(&mut self, cap: StrokeCap) -> Status {
        self.while_closed("setStrokeCap()", |s| s.style.stroke_cap = cap)
    }

    pub fn set_stroke_join(&mut self, join: StrokeJoin) -> Status {
        self.while_closed("setStrokeJoin()", |s| s.style.stroke_join = join)
    }

    // ── material ──────────────────────────────────────────────────────────

    pub fn set_ambient(&mut self, argb: u32) -> Status {
        self.while_closed("setAmbient()", |s| {
            s.style.ambient_color = argb;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.ambient = unpack_rgb(argb));
            }
        })
    }

    pub fn set_ambient_at(&mut self, index: usize, argb: u32) -> Status {
        self.with_vertex_style("setAmbient()", index, |v| v.ambient = unpack_rgb(argb))
    }

    pub fn ambient_at(&self, index: usize) -> u32 {
        self.vertex_or_warn("getAmbient()", index)
            .map_or(self.style.ambient_color, |v| pack_rgb_opaque(v.ambient))
    }

    pub fn set_specular(&mut self, argb: u32) -> Status {
        self.while_closed("setSpecular()", |s| {
            s.style.specular_color = argb;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.specular = unpack_rgb(argb));
            }
        })
    }

    pub fn set_specular_at(&mut self, index: usize, argb: u32) -> Status {
        self.with_vertex_style("setSpecular()", index, |v| v.specular = unpack_rgb(argb))
    }

    pub fn specular_at(&self, index: usize) -> u32 {
        self.vertex_or_warn("getSpecular()", index)
            .map_or(self.style.specular_color, |v| pack_rgb_opaque(v.specular))
    }

    pub fn set_emissive(&mut self, argb: u32) -> Status {
        self.while_closed("setEmissive()", |s| {
            s.style.emissive_color = argb;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.emissive = unpack_rgb(argb));
            }
        })
    }

    pub fn set_emissive_at(&mut self, index: usize, argb: u32) -> Status {
        self.with_vertex_style("setEmissive()", index, |v| v.emissive = unpack_rgb(argb))
    }

    pub fn emissive_at(&self, index: usize) -> u32 {
        self.vertex_or_warn("getEmissive()", index)
            .map_or(self.style.emissive_color, |v| pack_rgb_opaque(v.emissive))
    }

    pub fn set_shininess(&mut self, shine: f32) -> Status {
        self.while_closed("setShininess()", |s| {
            s.style.shininess = shine;
            if s.per_vertex_styles {
                s.each_vertex(|v| v.shininess = shine);
            }
        })
    }

    pub fn set_shininess_at(&mut self, index: usize, shine: f32) -> Status {
        self.with_vertex_style("setShininess()", index, |v| v.shininess = shine)
    }

    pub fn shininess_at(&self, index: usize) -> f32 {
        self.vertex_or_warn("getShininess()", index)
            .map_or(self.style.shininess, |v| v.shininess)
    }

    // ── geometry ──────────────────────────────────────────────────────────

    pub fn set_vertex(&mut self, index: usize, x: f32, y: f32) -> Status {
        self.with_vertex("setVertex()", index, |v| {
            v.position[0] = x;
            v.position[1] = y;
        })
    }

    /// Moves a vertex in 3D. A nonzero z is refused on a 2D node.
    pub fn set_vertex_3d(&mut self, index: usize, x: f32, y: f32, z: f32) -> Status {
        if z != 0.0 && !self.is_3d() && !self.is_open() {
            return reject(ShapeWarning::ZOnFlatShape);
        }
        self.with_vertex("setVertex()", index, |v| v.position = [x, y, z])
    }

    pub fn set_normal(&mut self, index: usize, nx: f32, ny: f32, nz: f32) -> Status {
        self.with_vertex("setNormal()", index, |v| v.normal = [nx, ny, nz])
    }

    pub fn normal_at(&self, index: usize) -> Option<Vec3> {
        self.vertex_or_warn("getNormal()", index).map(|v| Vec3::from_array(v.normal))
    }

    pub fn set_texture_uv(&mut self, index: usize, u: f32, v: f32) -> Status {
        self.with_vertex("setTextureUV()", index, |vert| vert.uv = [u, v])
    }

    pub fn texture_u(&self, index: usize) -> Option<f32> {
        self.vertex_or_warn("getTextureU()", index).map(|v| v.uv[0])
    }

    pub fn texture_v(&self, index: usize) -> Option<f32> {
        self.vertex_or_warn("getTextureV()", index).map(|v| v.uv[1])
    }

    /// Replaces the whole path with prefixes of `vertices` and `codes`.
    /// An empty `codes` prefix means every vertex is plain.
    pub fn set_path(
        &mut self,
        vertex_count: usize,
        vertices: &[Vertex],
        code_count: usize,
        codes: &[VertexCode],
    ) -> Status {
        match self.family {
            Family::Group => return reject(ShapeWarning::GroupUnsupported { op: "setPath()" }),
            Family::Primitive => return reject(ShapeWarning::PrimitiveUnsupported { op: "setPath()" }),
            Family::Path | Family::Geometry => {}
        }
        if self.is_open() {
            return reject(ShapeWarning::InsideBeginEnd { op: "setPath()" });
        }
        if !self.path.set_path(vertex_count, vertices, code_count, codes) {
            let (requested, available) = if vertices.len() < vertex_count {
                (vertex_count, vertices.len())
            } else {
                (code_count, codes.len())
            };
            return reject(ShapeWarning::ShortPathSource { requested, available });
        }
        for v in self.path.vertices() {
            self.extents.include(v.xyz());
        }
        Status::Applied
    }

    // ── texture ───────────────────────────────────────────────────────────

    pub fn set_texture(&mut self, image: Option<ImageHandle>) -> Status {
        self.while_closed("setTexture()", |s| s.image = image)
    }

    pub fn set_texture_mode(&mut self, mode: TextureMode) -> Status {
        self.while_closed("setTextureMode()", |s| s.style.texture_mode = mode)
    }

    /// Attaches a deferred texture reference (`file://...` or a
    /// `data:image/...;base64,...` URI), resolved by the first draw.
    pub fn set_image_path(&mut self, reference: impl Into<String>) -> Status {
        let reference = reference.into();
        self.while_closed("setImagePath()", |s| s.image_path = Some(reference))
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn while_closed(&mut self, op: &'static str, f: impl FnOnce(&mut Self)) -> Status {
        if self.is_open() {
            return reject(ShapeWarning::InsideBeginEnd { op });
        }
        f(self);
        Status::Applied
    }

    fn each_vertex(&mut self, mut f: impl FnMut(&mut Vertex)) {
        for v in self.path.vertices_mut() {
            f(v);
        }
    }

    /// Edits one vertex's geometry.
    fn with_vertex(&mut self, op: &'static str, index: usize, f: impl FnOnce(&mut Vertex)) -> Status {
        if self.is_open() {
            return reject(ShapeWarning::InsideBeginEnd { op });
        }
        match self.path.get_mut(index) {
            Some(v) => {
                f(v);
                Status::Applied
            }
            None => reject(ShapeWarning::NoSuchVertex { op, index }),
        }
    }

    /// Edits one vertex's style; needs per-vertex style capacity.
    fn with_vertex_style(&mut self, op: &'static str, index: usize, f: impl FnOnce(&mut Vertex)) -> Status {
        if self.is_open() {
            return reject(ShapeWarning::InsideBeginEnd { op });
        }
        if !self.per_vertex_styles {
            return reject(ShapeWarning::PerVertexUnsupported { op });
        }
        match self.path.get_mut(index) {
            Some(v) => {
                f(v);
                Status::Applied
            }
            None => reject(ShapeWarning::NoSuchVertex { op, index }),
        }
    }

    pub(super) fn vertex_or_warn(&self, op: &'static str, index: usize) -> Option<&Vertex> {
        let v = self.path.get(index);
        if v.is_none() {
            log::warn!("{}", ShapeWarning::NoSuchVertex { op, index });
        }
        v
    }
}
