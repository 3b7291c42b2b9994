//! Drawing shapes onto a graphics context.
//!
//! [`Renderer`] is the context a shape tree draws onto. Dispatch lives on
//! [`ShapeTree::draw`](crate::shape::ShapeTree::draw):
//! - GROUP recurses into its children in order
//! - PRIMITIVE maps kind + params to a single primitive call
//! - GEOMETRY replays its vertices as one run in the node's kind
//! - PATH replays its coded vertices, bracketing contours at each break

mod draw;
mod radii;
mod renderer;

pub use radii::CornerRadii;
pub use renderer::Renderer;
