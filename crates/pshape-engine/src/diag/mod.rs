//! Outcome types for shape operations.
//!
//! Two tiers:
//! - [`Status`] / [`ShapeWarning`]: non-fatal. The call was either applied or
//!   ignored; an ignored call has already been reported through `log::warn!`
//!   and left the shape untouched.
//! - [`ShapeError`]: hard failures handed back to the caller, plus the
//!   image-resolution errors the draw path logs and absorbs.

mod error;
mod status;

pub use error::ShapeError;
pub use status::{Status, ShapeWarning};

pub(crate) use status::reject;
