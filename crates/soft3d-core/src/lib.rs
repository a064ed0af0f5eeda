//! # soft3d-core
//!
//! Core plumbing shared by the soft3d numeric kernel.
//!
//! This crate provides the pieces that sit beside the math types rather than
//! inside them:
//!
//! - [`SharedArray`] - Reference-counted, fixed-length typed buffer used to hand
//!   vertex, index and constant data between producers and consumers
//! - [`StreamElement`] - Plain-old-data codec for array elements
//! - [`Error`], [`Result`] - Failures of the streaming layer
//!
//! ## Crate Structure
//!
//! ```text
//! soft3d-core (this crate)
//!    ^
//!    |
//!    +-- soft3d-math (Real, vectors, matrices, eigen solver)
//!    +-- soft3d-tests (integration tests)
//!    +-- soft3d-bench (benchmarks)
//! ```
//!
//! ## Stream Layout
//!
//! A streamed array is a little-endian `i32` element count followed by the
//! tightly packed little-endian bit pattern of each element:
//!
//! ```text
//! [count: i32][elem 0][elem 1] ... [elem count-1]
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod shared_array;
pub mod stream;

pub use error::*;
pub use shared_array::*;
pub use stream::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use soft3d_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::shared_array::{CopyMode, SharedArray, WeakSharedArray};
    pub use crate::stream::StreamElement;
}
