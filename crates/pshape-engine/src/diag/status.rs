use thiserror::Error;

/// Why a shape call was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeWarning {
    #[error("{op} can only be called between beginShape() and endShape()")]
    OutsideBeginEnd { op: &'static str },

    #[error("{op} can only be called outside beginShape() and endShape()")]
    InsideBeginEnd { op: &'static str },

    #[error("{op} is not supported on GROUP shapes")]
    GroupUnsupported { op: &'static str },

    #[error("{op} is not supported on PRIMITIVE shapes")]
    PrimitiveUnsupported { op: &'static str },

    #[error("beginShape() was already called")]
    AlreadyOpen,

    #[error("need to call beginShape() first")]
    NotOpen,

    #[error("already called beginContour()")]
    ContourAlreadyOpen,

    #[error("need to call beginContour() first")]
    ContourNotOpen,

    #[error("endShape() called with an open contour; closing it")]
    ContourLeftOpen,

    #[error("{op}: vertex index {index} does not exist")]
    NoSuchVertex { op: &'static str, index: usize },

    #[error("this shape does not support {op} for individual vertices")]
    PerVertexUnsupported { op: &'static str },

    #[error("getVertexCount() only works with PATH or GEOMETRY shapes")]
    NoVertices,

    #[error("wrong number of parameters: expected {expected}, got {got}")]
    WrongParamCount { expected: usize, got: usize },

    #[error("setPath(): asked for {requested} entries but only {available} were supplied")]
    ShortPathSource { requested: usize, available: usize },

    #[error("PRIMITIVE shapes cannot hold children")]
    NoChildren,

    #[error("cannot set a z-coordinate on a 2D shape")]
    ZOnFlatShape,

    #[error("{op}: child index {index} is out of range")]
    NoSuchChild { op: &'static str, index: usize },

    #[error("shape already has a parent")]
    AlreadyParented,

    #[error("a shape cannot be added under itself or its descendants")]
    CyclicChild,

    #[error("shape handle is stale or was never created")]
    StaleHandle,
}

/// Result of a non-fatal shape call.
///
/// Deliberately not `#[must_use]`: most callers ignore it, the same way an
/// interactive sketch ignores a misplaced `fill()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Applied,
    Ignored(ShapeWarning),
}

impl Status {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Status::Applied)
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        !self.is_applied()
    }

    #[inline]
    pub fn warning(&self) -> Option<&ShapeWarning> {
        match self {
            Status::Applied => None,
            Status::Ignored(w) => Some(w),
        }
    }
}

/// Reports `warning` and returns the matching [`Status`].
pub(crate) fn reject(warning: ShapeWarning) -> Status {
    log::warn!("{warning}");
    Status::Ignored(warning)
}
