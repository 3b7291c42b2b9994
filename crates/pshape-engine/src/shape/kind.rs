use std::fmt;

/// Top-level shape category. Fixed when the node is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Family {
    /// Container of child shapes.
    Group,
    /// Parametric shape drawn by a single renderer call.
    Primitive,
    /// Coded vertex sequence with optional contours and curves.
    Path,
    /// Raw vertex list drawn with the node's [`ShapeKind`].
    Geometry,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Group => "GROUP",
            Family::Primitive => "PRIMITIVE",
            Family::Path => "PATH",
            Family::Geometry => "GEOMETRY",
        })
    }
}

/// Sub-type of a PRIMITIVE or GEOMETRY node, and the mode passed to
/// `begin_shape`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    // begin_shape modes
    #[default]
    Polygon,
    Points,
    Lines,
    Triangles,
    TriangleFan,
    TriangleStrip,
    Quads,
    QuadStrip,

    // primitives
    Point,
    Line,
    Triangle,
    Quad,
    Rect,
    Ellipse,
    Arc,
    Box,
    Sphere,
}

impl ShapeKind {
    /// True for kinds drawn by a single primitive call rather than a vertex run.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            ShapeKind::Point
                | ShapeKind::Line
                | ShapeKind::Triangle
                | ShapeKind::Quad
                | ShapeKind::Rect
                | ShapeKind::Ellipse
                | ShapeKind::Arc
                | ShapeKind::Box
                | ShapeKind::Sphere
        )
    }
}

/// How `end_shape` finishes an outline.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CloseMode {
    #[default]
    Open,
    Close,
}
