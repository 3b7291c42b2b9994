//! Recorded draw streams.
//!
//! [`DrawList`] implements [`Renderer`](crate::render::Renderer) by
//! appending a [`DrawCmd`] per call. It backs headless runs and tests.

mod cmd;
mod list;

pub use cmd::{DrawCmd, EllipseCmd, ImageCmd, RectCmd};
pub use list::DrawList;
