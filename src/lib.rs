//! # Quadtree Index - Point Quadtree Spatial Index
//!
//! A Rust library providing an adaptive point quadtree for range search and
//! nearest-neighbor queries over 2D positions.
//!
//! ## Features
//!
//! - **Capacity-Triggered Subdivision**: Leaves split into four quadrants once they overflow
//! - **Range Search**: All elements inside an inclusive axis-aligned boundary, in a stable traversal order
//! - **Nearest Neighbor**: Branch-and-bound search pruned by exact point-to-rectangle distance
//! - **Traversal**: Pre-order node visits for renderers and other collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use quadtree_index::prelude::*;
//!
//! // Create an index over a fixed area
//! let bounds = Boundary::from_coords(0.0, 0.0, 8.0, 8.0).unwrap();
//! let mut tree = Quadtree::new(bounds);
//!
//! // Insert elements (position + payload)
//! tree.insert(Element::new(Point::new(1.0, 1.0), "a"));
//! tree.insert(Element::new(Point::new(2.0, 2.0), "b"));
//! tree.insert(Element::new(Point::new(6.0, 6.0), "c"));
//!
//! // Points outside the root boundary are rejected
//! assert!(!tree.insert(Element::new(Point::new(9.0, 9.0), "d")));
//!
//! // Range search
//! let query = Boundary::from_coords(0.0, 0.0, 3.0, 3.0).unwrap();
//! let found: Vec<_> = tree.search(&query).iter().map(|e| e.data).collect();
//! assert_eq!(found, ["a", "b"]);
//!
//! // Nearest neighbor
//! let best = tree.nearest(Point::new(5.0, 5.0));
//! assert_eq!(best.element.map(|e| e.data), Some("c"));
//! ```
//!
//! ## How It Works
//!
//! Every node covers an inclusive rectangle. A leaf keeps up to `capacity`
//! elements; the insert that would overflow it splits the rectangle at its
//! midpoint into four children and pushes the elements down. Range search
//! skips subtrees whose rectangle misses the query, and nearest-neighbor
//! search skips subtrees farther away than the best match found so far,
//! visiting the quadrant around the query location first.

pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod quadtree;


pub use config::QuadtreeConfig;
pub use element::Element;
pub use error::{OutOfBounds, QuadtreeError, Result};
pub use geometry::{Boundary, Point, Quadrant, distance, distance_to_boundary};
pub use quadtree::{Iter, Nearest, Quadtree};
