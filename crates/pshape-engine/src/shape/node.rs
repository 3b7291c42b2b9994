use std::collections::HashMap;

use glam::Vec3;

use crate::diag::{ShapeWarning, Status, reject};
use crate::geometry::{Extents, PathStore, VertexAttribs, VertexCode};
use crate::paint::ColorMode;
use crate::texture::ImageHandle;
use crate::transform::{Dimensions, ShapeMatrix};

use super::{Family, ShapeId, ShapeKind, StyleState};

/// Authoring state of a node.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Created, never opened.
    #[default]
    Unopened,
    /// Between `begin_shape` and `end_shape`.
    Open,
    /// Finished and drawable.
    Closed,
}

/// One shape in a [`ShapeTree`](super::ShapeTree).
///
/// A node owns its geometry, style and transform. Hierarchy links are
/// [`ShapeId`]s into the owning tree and are maintained by the tree.
///
/// Authoring calls (`fill`, `vertex`, ...) are accepted only while the node
/// is [`Phase::Open`]; their `set_*` counterparts only while it is not. A
/// call in the wrong phase logs a warning, changes nothing and returns
/// [`Status::Ignored`].
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub(crate) name: Option<String>,
    pub(crate) family: Family,
    pub(crate) kind: ShapeKind,
    pub(crate) params: Vec<f32>,
    pub(crate) path: PathStore,
    pub(crate) matrix: Option<ShapeMatrix>,
    pub(crate) style: StyleState,
    pub(crate) honor_style: bool,
    pub(crate) per_vertex_styles: bool,
    pub(crate) image: Option<ImageHandle>,
    pub(crate) image_path: Option<String>,
    pub(crate) visible: bool,
    pub(crate) closed: bool,
    pub(crate) phase: Phase,
    pub(crate) open_contour: bool,
    pub(crate) extents: Extents,
    pub(crate) is_3d: bool,
    /// Normal recorded with the next authored vertex.
    pub(crate) normal: [f32; 3],

    pub(crate) parent: Option<ShapeId>,
    pub(crate) children: Vec<ShapeId>,
    /// Only meaningful on a hierarchy root.
    pub(crate) name_table: HashMap<String, ShapeId>,
}

impl ShapeNode {
    pub fn new(family: Family) -> Self {
        Self::with_style(family, StyleState::default())
    }

    /// A node starting from a renderer's current style.
    pub fn with_style(family: Family, style: StyleState) -> Self {
        Self {
            name: None,
            family,
            kind: ShapeKind::default(),
            params: Vec::new(),
            path: PathStore::new(),
            matrix: None,
            style,
            honor_style: true,
            per_vertex_styles: false,
            image: None,
            image_path: None,
            visible: true,
            closed: false,
            phase: Phase::Unopened,
            open_contour: false,
            extents: Extents::default(),
            is_3d: false,
            normal: [0.0; 3],
            parent: None,
            children: Vec::new(),
            name_table: HashMap::new(),
        }
    }

    /// A PRIMITIVE node, e.g. `ShapeNode::primitive(ShapeKind::Rect, [0.0, 0.0, 20.0, 10.0])`.
    pub fn primitive(kind: ShapeKind, params: impl Into<Vec<f32>>) -> Self {
        Self::new(Family::Primitive).with_kind(kind).with_params(params)
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_params(mut self, params: impl Into<Vec<f32>>) -> Self {
        self.params = params.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Gives every vertex editable fill/stroke/material values.
    pub fn with_per_vertex_styles(mut self, on: bool) -> Self {
        self.per_vertex_styles = on;
        if on {
            self.path.insert_attribs(VertexAttribs::STYLE);
        }
        self
    }

    /// Marks the node as living in 3D space, allowing z edits after authoring.
    pub fn with_3d(mut self, on: bool) -> Self {
        self.is_3d = on;
        self
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[inline]
    pub fn family(&self) -> Family {
        self.family
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Renames the node. Registration in a root name table happens when the
    /// node is added as a child or through [`ShapeTree::add_name`](super::ShapeTree::add_name).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// True if the outline was finished with [`CloseMode::Close`](super::CloseMode::Close).
    #[inline]
    pub fn is_closed_path(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn is_3d(&self) -> bool {
        self.is_3d || self.path.is_3d()
    }

    // ── hierarchy links ───────────────────────────────────────────────────

    #[inline]
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    #[inline]
    pub fn current_color_mode(&self) -> &ColorMode {
        &self.style.color_mode
    }

    /// Whether draw replays this node's style or inherits the renderer's.
    #[inline]
    pub fn is_style_enabled(&self) -> bool {
        self.honor_style
    }

    #[inline]
    pub fn has_per_vertex_styles(&self) -> bool {
        self.per_vertex_styles
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Deferred texture reference not yet resolved by a draw.
    #[inline]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[inline]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.extents.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.extents.height
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.extents.depth
    }

    #[inline]
    pub fn path(&self) -> &PathStore {
        &self.path
    }

    #[inline]
    pub fn matrix(&self) -> Option<&ShapeMatrix> {
        self.matrix.as_ref()
    }

    // ── params ────────────────────────────────────────────────────────────

    #[inline]
    pub fn params(&self) -> &[f32] {
        &self.params
    }

    #[inline]
    pub fn param(&self, index: usize) -> Option<f32> {
        self.params.get(index).copied()
    }

    /// Replaces the primitive parameters. The count must match the current one.
    pub fn set_params(&mut self, params: &[f32]) -> Status {
        if self.params.len() != params.len() {
            return reject(ShapeWarning::WrongParamCount { expected: self.params.len(), got: params.len() });
        }
        self.params.copy_from_slice(params);
        Status::Applied
    }

    // ── vertices ──────────────────────────────────────────────────────────

    /// Number of authored vertices. Warns and returns 0 on families without
    /// vertex data.
    pub fn vertex_count(&self) -> usize {
        if matches!(self.family, Family::Group | Family::Primitive) {
            log::warn!("{}", ShapeWarning::NoVertices);
            return 0;
        }
        self.path.vertex_count()
    }

    pub fn vertex_at(&self, index: usize) -> Option<Vec3> {
        self.vertex_or_warn("getVertex()", index).map(|v| v.xyz())
    }

    pub fn vertex_x(&self, index: usize) -> Option<f32> {
        self.vertex_or_warn("getVertexX()", index).map(|v| v.x())
    }

    pub fn vertex_y(&self, index: usize) -> Option<f32> {
        self.vertex_or_warn("getVertexY()", index).map(|v| v.y())
    }

    pub fn vertex_z(&self, index: usize) -> Option<f32> {
        self.vertex_or_warn("getVertexZ()", index).map(|v| v.z())
    }

    #[inline]
    pub fn vertex_codes(&self) -> &[VertexCode] {
        self.path.codes()
    }

    #[inline]
    pub fn vertex_code_count(&self) -> usize {
        self.path.code_count()
    }

    #[inline]
    pub fn vertex_code(&self, index: usize) -> Option<VertexCode> {
        self.path.codes().get(index).copied()
    }

    // ── transform ─────────────────────────────────────────────────────────

    pub fn translate(&mut self, x: f32, y: f32) {
        self.matrix_for(Dimensions::Two).translate(x, y);
    }

    pub fn translate_3d(&mut self, x: f32, y: f32, z: f32) {
        self.matrix_for(Dimensions::Three).translate_3d(x, y, z);
    }

    /// Rotation in the XY plane.
    pub fn rotate(&mut self, angle: f32) {
        self.matrix_for(Dimensions::Two).rotate(angle);
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate_axis(angle, 1.0, 0.0, 0.0);
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_axis(angle, 0.0, 1.0, 0.0);
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate_axis(angle, 0.0, 0.0, 1.0);
    }

    pub fn rotate_axis(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        self.matrix_for(Dimensions::Three).rotate_axis(angle, Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, s: f32) {
        self.matrix_for(Dimensions::Two).scale_uniform(s);
    }

    pub fn scale_xy(&mut self, x: f32, y: f32) {
        self.matrix_for(Dimensions::Two).scale(x, y);
    }

    pub fn scale_3d(&mut self, x: f32, y: f32, z: f32) {
        self.matrix_for(Dimensions::Three).scale_3d(x, y, z);
    }

    /// Row-major 2x3 affine matrix.
    pub fn apply_matrix_2d(&mut self, n: [f32; 6]) {
        self.matrix_for(Dimensions::Two).apply_2d(n);
    }

    /// Row-major 4x4 matrix.
    pub fn apply_matrix_3d(&mut self, n: [f32; 16]) {
        self.matrix_for(Dimensions::Three).apply_3d(n);
    }

    pub fn apply_matrix(&mut self, m: &ShapeMatrix) {
        self.matrix_for(m.dimensions()).apply(m);
    }

    /// Back to identity. Keeps the matrix allocated at its current dimensionality.
    pub fn reset_matrix(&mut self) {
        self.matrix_for(Dimensions::Two).reset();
    }

    /// Allocates the matrix on first use and promotes it when `dims` needs 3D.
    fn matrix_for(&mut self, dims: Dimensions) -> &mut ShapeMatrix {
        let m = self.matrix.get_or_insert_with(|| ShapeMatrix::identity(dims));
        m.ensure(dims);
        m
    }
}
