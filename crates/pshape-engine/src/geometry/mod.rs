//! Vertex and path storage for PATH and GEOMETRY shapes.
//!
//! Every vertex is a fixed-layout [`Vertex`] record; which of its fields carry
//! meaning is tracked once per store in [`VertexAttribs`]. Path structure is a
//! parallel sequence of [`VertexCode`]s, each consuming a fixed number of
//! vertices.

mod extents;
mod path;
mod vertex;

pub use extents::Extents;
pub use path::{PathSegment, PathStore, Segments};
pub use vertex::{Vertex, VertexAttribs, VertexCode};
