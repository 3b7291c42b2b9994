//! Shape nodes and the tree that owns them.
//!
//! A [`ShapeNode`] goes through `Unopened -> Open -> Closed`:
//! - while open it accepts authoring calls (`vertex`, `fill`, contours, ...)
//! - once closed it is drawable and accepts the `set_*` mutators
//!
//! Nodes live in a [`ShapeTree`] arena and refer to each other by [`ShapeId`].

mod authoring;
mod kind;
mod mutation;
mod node;
mod style;
mod tree;

pub use kind::{CloseMode, Family, ShapeKind};
pub use node::{Phase, ShapeNode};
pub use style::{ArcMode, ShapeMode, StrokeCap, StrokeJoin, StyleState, TextureMode};
pub use tree::{ShapeId, ShapeTree};
