//! Error types for index construction and configuration.

use std::fmt;

use thiserror::Error;

use crate::element::Element;

/// Errors raised while building a quadtree or loading its configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuadtreeError {
    /// A node must be able to hold at least one element.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,

    /// The depth limit must allow at least one subdivision.
    #[error("max depth must be at least 1")]
    ZeroMaxDepth,

    /// The min corner lies past the max corner on some axis.
    #[error("inverted boundary: ({min_x}, {min_y}) is not below ({max_x}, {max_y})")]
    InvertedBoundary {
        /// Min corner x.
        min_x: f64,
        /// Min corner y.
        min_y: f64,
        /// Max corner x.
        max_x: f64,
        /// Max corner y.
        max_y: f64,
    },

    /// A boundary coordinate is NaN or infinite.
    #[error("boundary coordinates must be finite")]
    NonFiniteBoundary,

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`QuadtreeConfig`](crate::QuadtreeConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QuadtreeError>;

/// Returned by [`Quadtree::try_insert`](crate::Quadtree::try_insert) when the
/// element lies outside the root boundary. Hands the element back.
pub struct OutOfBounds<T> {
    /// The rejected element.
    pub element: Element<T>,
}

impl<T> OutOfBounds<T> {
    /// Takes the rejected element back.
    pub fn into_inner(self) -> Element<T> {
        self.element
    }
}

impl<T> fmt::Debug for OutOfBounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutOfBounds")
            .field("position", &self.element.position)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for OutOfBounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position ({}, {}) lies outside the index boundary",
            self.element.position.x, self.element.position.y
        )
    }
}

impl<T> std::error::Error for OutOfBounds<T> {}
