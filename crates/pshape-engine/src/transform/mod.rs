//! Per-shape transform.
//!
//! A shape starts without a matrix (identity). The first transform call
//! allocates a 2D affine matrix; any call that needs a third dimension
//! promotes it to a 4x4 matrix, embedding the 2D contents. Promotion is one
//! way.
//!
//! Composition follows the sketch convention: each call post-multiplies,
//! so `translate` then `rotate` rotates about the translated origin.

mod matrix;

pub use matrix::{Dimensions, ShapeMatrix};
