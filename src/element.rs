//! Stored items: a position plus caller-defined data.

use crate::geometry::Point;

/// A position with an opaque payload. Several elements may share a position.
#[derive(Clone, Debug, PartialEq)]
pub struct Element<T> {
    /// Where the element lives.
    pub position: Point,
    /// Caller-defined payload, e.g. an identifier.
    pub data: T,
}

impl<T> Element<T> {
    /// Creates an element at `position` carrying `data`.
    pub const fn new(position: Point, data: T) -> Self {
        Self { position, data }
    }
}
