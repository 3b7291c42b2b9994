//! pshape engine crate.
//!
//! Retained vector shapes: build a shape once between `begin_shape` and
//! `end_shape`, edit it through `set_*` calls, and replay it onto any
//! [`Renderer`](render::Renderer) every frame.

pub mod logging;
pub mod paint;
pub mod transform;
pub mod geometry;
pub mod texture;
pub mod diag;
pub mod shape;
pub mod render;
pub mod scene;

pub use diag::{ShapeError, ShapeWarning, Status};
pub use shape::{CloseMode, Family, ShapeId, ShapeKind, ShapeNode, ShapeTree};
