//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use quadtree_index::prelude::*;
//! ```

pub use crate::{Boundary, Element, Nearest, Point, Quadrant, Quadtree, QuadtreeConfig};
