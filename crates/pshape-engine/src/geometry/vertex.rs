use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One vertex record.
///
/// Layout is `repr(C)` and all-`f32` so a store can hand its vertices to a
/// GPU-backed renderer as raw bytes.
///
/// Colors are normalized. `fill` doubles as the tint color when the owning
/// shape has a texture bound.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub fill: [f32; 4],
    pub stroke: [f32; 4],
    pub stroke_weight: f32,
    pub normal: [f32; 3],
    pub ambient: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub shininess: f32,
}

impl Vertex {
    /// A bare position with zeroed normal/UV and no style.
    #[inline]
    pub fn at(x: f32, y: f32) -> Self {
        Self::at_3d(x, y, 0.0)
    }

    #[inline]
    pub fn at_3d(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z], ..Self::zeroed() }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.position[2]
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }

    #[inline]
    pub fn xyz(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

bitflags! {
    /// Which optional [`Vertex`] fields a store fills in.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct VertexAttribs: u8 {
        /// At least one vertex has a nonzero z.
        const POSITION_3D = 1 << 0;
        const NORMAL      = 1 << 1;
        const TEXCOORD    = 1 << 2;
        /// Per-vertex fill/stroke/material values may be edited after authoring.
        const STYLE       = 1 << 3;
    }
}

/// How the next vertices of a path are interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexCode {
    Vertex,
    /// Two control points and an anchor.
    Bezier,
    /// One control point and an anchor.
    Quadratic,
    /// Catmull-Rom control vertex.
    Curve,
    /// Starts a new contour; consumes no vertex.
    Break,
}

impl VertexCode {
    /// Number of vertex records the code consumes.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            VertexCode::Vertex | VertexCode::Curve => 1,
            VertexCode::Bezier => 3,
            VertexCode::Quadratic => 2,
            VertexCode::Break => 0,
        }
    }
}
