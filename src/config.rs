//! Index configuration: node capacity and depth limit.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuadtreeError, Result};

/// Elements a leaf holds before it subdivides.
pub const DEFAULT_CAPACITY: usize = 4;

/// Depth at which leaves stop subdividing.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Tuning knobs for a [`Quadtree`](crate::Quadtree).
///
/// Can be embedded in a caller's TOML configuration; missing fields take
/// their defaults.
///
/// ```
/// use quadtree_index::QuadtreeConfig;
///
/// let config = QuadtreeConfig::from_toml_str("capacity = 8").unwrap();
/// assert_eq!(config.capacity, 8);
/// assert_eq!(config.max_depth, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuadtreeConfig {
    /// Elements a leaf holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Leaves at this depth never subdivide and accept elements past
    /// capacity. Guards against unbounded recursion on repeated positions.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, max_depth: DEFAULT_MAX_DEPTH }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl QuadtreeConfig {
    /// Default configuration with a different capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::ConfigParse`] on malformed TOML, otherwise the
    /// errors of [`QuadtreeConfig::validate`].
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::ConfigIo`] if the file cannot be read, otherwise the
    /// errors of [`QuadtreeConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), capacity = config.capacity, max_depth = config.max_depth, "loaded quadtree config");
        Ok(config)
    }

    /// Checks that the values describe a usable tree.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::ZeroCapacity`] or [`QuadtreeError::ZeroMaxDepth`].
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }
        if self.max_depth == 0 {
            return Err(QuadtreeError::ZeroMaxDepth);
        }
        Ok(())
    }
}
