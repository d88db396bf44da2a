//! Point quadtree with capacity-triggered subdivision.
//!
//! Each node owns an inclusive [`Boundary`], a bucket of up to `capacity`
//! elements and, once subdivided, exactly four children covering the four
//! quadrants of its boundary. Subdivision is one-way: a node that has
//! children never holds elements again.
//!
//! Children are always handled in the canonical order
//! [`TopLeft`](Quadrant::TopLeft), [`BottomLeft`](Quadrant::BottomLeft),
//! [`TopRight`](Quadrant::TopRight), [`BottomRight`](Quadrant::BottomRight).
//! A point on a shared midpoint edge belongs to the first child in that order
//! whose boundary contains it, and range search returns results in that order.

use std::slice;

use tracing::{debug, trace};

use crate::config::QuadtreeConfig;
use crate::element::Element;
use crate::error::{OutOfBounds, Result};
use crate::geometry::{Boundary, Point, Quadrant};

/// A quadtree node. The value returned by the constructors is the root.
#[derive(Clone, Debug)]
pub struct Quadtree<T> {
    boundary: Boundary,
    elements: Vec<Element<T>>,
    children: Option<Box<[Self; 4]>>,
    depth: usize,
    /// Elements stored in this subtree.
    len: usize,
    config: QuadtreeConfig,
}

/// Result of a nearest-neighbor query.
///
/// `element` is `None` and `distance` is infinite only when the tree is empty
/// or the query location is not finite.
#[derive(Debug)]
pub struct Nearest<'a, T> {
    /// Closest element found.
    pub element: Option<&'a Element<T>>,
    /// Euclidean distance from the query location to `element`.
    pub distance: f64,
}

impl<T> Clone for Nearest<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Nearest<'_, T> {}

impl<T> Nearest<'_, T> {
    fn none() -> Self {
        Self { element: None, distance: f64::INFINITY }
    }

    /// Position of the closest element, if any.
    pub fn position(&self) -> Option<Point> {
        self.element.map(|e| e.position)
    }
}

impl<T> Quadtree<T> {
    /// Creates an empty index over `boundary` with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use quadtree_index::prelude::*;
    ///
    /// let bounds = Boundary::from_coords(0.0, 0.0, 8.0, 8.0).unwrap();
    /// let mut tree = Quadtree::new(bounds);
    /// assert!(tree.insert(Element::new(Point::new(1.0, 1.0), "a")));
    /// assert!(!tree.insert(Element::new(Point::new(9.0, 1.0), "outside")));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new(boundary: Boundary) -> Self {
        Self::node(boundary, 0, QuadtreeConfig::default())
    }

    /// Creates an empty index whose leaves hold up to `capacity` elements.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::ZeroCapacity`](crate::QuadtreeError::ZeroCapacity) if `capacity` is zero.
    pub fn with_capacity(boundary: Boundary, capacity: usize) -> Result<Self> {
        Self::with_config(boundary, QuadtreeConfig::with_capacity(capacity))
    }

    /// Creates an empty index with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Any error of [`QuadtreeConfig::validate`].
    pub fn with_config(boundary: Boundary, config: QuadtreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::node(boundary, 0, config))
    }

    fn node(boundary: Boundary, depth: usize, config: QuadtreeConfig) -> Self {
        Self {
            boundary,
            elements: Vec::new(),
            children: None,
            depth,
            len: 0,
            config,
        }
    }

    /// Area covered by this node.
    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Distance from the root; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Leaf capacity this tree was built with.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Depth at which leaves stop subdividing.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// True until the node subdivides.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Elements held directly by this node. Always empty for internal nodes.
    #[inline]
    pub fn elements(&self) -> &[Element<T>] {
        &self.elements
    }

    /// Children in canonical order, or `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<&[Self; 4]> {
        self.children.as_deref()
    }

    /// Child covering `quadrant`, or `None` for a leaf.
    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// Number of elements stored in this subtree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the subtree stores no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `element`, returning `false` if its position lies outside the
    /// boundary. The tree never grows to fit an element.
    ///
    /// # Panics
    ///
    /// If no child of a subdivided node accepts an element the node itself
    /// contains. The quadrants cover their parent, so this means a broken
    /// boundary partition.
    pub fn insert(&mut self, element: Element<T>) -> bool {
        self.try_insert(element).is_ok()
    }

    /// Inserts `element`, handing it back if its position lies outside the
    /// boundary.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] carrying the rejected element.
    ///
    /// # Panics
    ///
    /// Same as [`Quadtree::insert`].
    pub fn try_insert(&mut self, element: Element<T>) -> std::result::Result<(), OutOfBounds<T>> {
        self.insert_at(element).inspect_err(|rejected| {
            let position = rejected.element.position;
            trace!(x = position.x, y = position.y, "rejected element outside boundary");
        })
    }

    fn insert_at(&mut self, element: Element<T>) -> std::result::Result<(), OutOfBounds<T>> {
        if !self.boundary.contains(element.position) {
            return Err(OutOfBounds { element });
        }
        self.len += 1;

        if self.is_leaf() {
            if self.elements.len() < self.config.capacity {
                self.elements.push(element);
                return Ok(());
            }
            if self.depth >= self.config.max_depth {
                if self.elements.len() == self.config.capacity {
                    debug!(depth = self.depth, capacity = self.config.capacity, "leaf at depth limit exceeds capacity");
                }
                self.elements.push(element);
                return Ok(());
            }
            self.subdivide();
        }

        self.insert_into_children(element);
        Ok(())
    }

    /// Hands `element` to the first child that accepts it.
    fn insert_into_children(&mut self, element: Element<T>) {
        let boundary = self.boundary;
        let Some(children) = self.children.as_deref_mut() else {
            unreachable!("insert_into_children called on a leaf");
        };

        let mut element = element;
        for child in children.iter_mut() {
            match child.insert_at(element) {
                Ok(()) => return,
                Err(rejected) => element = rejected.element,
            }
        }
        unreachable!(
            "no quadrant of {boundary:?} accepts ({}, {})",
            element.position.x, element.position.y
        );
    }

    /// Turns this leaf into an internal node and pushes its elements down.
    fn subdivide(&mut self) {
        let (boundary, depth, config) = (self.boundary, self.depth + 1, self.config);
        let children = Quadrant::ALL.map(|q| Self::node(boundary.quadrant(q), depth, config));
        self.children = Some(Box::new(children));

        let elements = std::mem::take(&mut self.elements);
        trace!(depth = self.depth, ?boundary, count = elements.len(), "subdividing node");
        for element in elements {
            self.insert_into_children(element);
        }
    }

    /// Returns every element whose position lies within `query`, edges
    /// included, in canonical traversal order.
    ///
    /// # Examples
    /// ```
    /// use quadtree_index::prelude::*;
    ///
    /// let mut tree = Quadtree::new(Boundary::from_coords(0.0, 0.0, 8.0, 8.0).unwrap());
    /// for (x, y) in [(1.0, 1.0), (2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (3.0, 7.0)] {
    ///     tree.insert(Element::new(Point::new(x, y), ()));
    /// }
    /// let query = Boundary::from_coords(3.0, 3.0, 7.0, 7.0).unwrap();
    /// let found: Vec<_> = tree.search(&query).iter().map(|e| (e.position.x, e.position.y)).collect();
    /// assert_eq!(found, [(4.0, 4.0), (3.0, 7.0), (6.0, 6.0)]);
    /// ```
    pub fn search(&self, query: &Boundary) -> Vec<&Element<T>> {
        let mut results = Vec::new();
        self.search_into(query, &mut results);
        results
    }

    /// Like [`Quadtree::search`], appending to `results` (not cleared first).
    pub fn search_into<'a>(&'a self, query: &Boundary, results: &mut Vec<&'a Element<T>>) {
        if !self.boundary.intersects(query) {
            return;
        }

        match self.children.as_deref() {
            None => results.extend(self.elements.iter().filter(|e| query.contains(e.position))),
            Some(children) => {
                for child in children {
                    child.search_into(query, results);
                }
            }
        }
    }

    /// Finds the element closest to `location`.
    ///
    /// Subtrees whose boundary is farther than the best match so far are
    /// skipped. Children are visited starting with the quadrant around
    /// `location`, then its neighbour in the same row, then the one in the
    /// same column, then the diagonal. Among equidistant elements the first
    /// one reached wins.
    ///
    /// A location with a NaN or infinite coordinate matches nothing and
    /// yields `element: None` with an infinite distance.
    ///
    /// # Examples
    /// ```
    /// use quadtree_index::prelude::*;
    ///
    /// let mut tree = Quadtree::new(Boundary::from_coords(0.0, 0.0, 8.0, 8.0).unwrap());
    /// for (x, y) in [(1.0, 1.0), (2.0, 2.0), (6.0, 6.0), (2.0, 7.0)] {
    ///     tree.insert(Element::new(Point::new(x, y), ()));
    /// }
    /// let best = tree.nearest(Point::new(2.0, 3.0));
    /// assert_eq!(best.position(), Some(Point::new(2.0, 2.0)));
    /// assert_eq!(best.distance, 1.0);
    /// ```
    pub fn nearest(&self, location: Point) -> Nearest<'_, T> {
        let mut best = Nearest::none();
        self.nearest_into(location, &mut best);
        best
    }

    fn nearest_into<'a>(&'a self, location: Point, best: &mut Nearest<'a, T>) {
        if self.boundary.distance_to(location) > best.distance {
            return;
        }

        match self.children.as_deref() {
            None => {
                for element in &self.elements {
                    let distance = element.position.distance(location);
                    if distance < best.distance {
                        *best = Nearest { element: Some(element), distance };
                    }
                }
            }
            Some(children) => {
                // Closest quadrant first so the bound tightens early.
                let first = Quadrant::of(location, self.boundary.midpoint());
                for quadrant in first.nearest_order() {
                    children[quadrant.index()].nearest_into(location, best);
                }
            }
        }
    }

    /// Calls `callback` on this node and then, recursively, on each child in
    /// canonical order.
    pub fn visit<'a>(&'a self, mut callback: impl FnMut(&'a Self)) {
        self.visit_inner(&mut callback);
    }

    fn visit_inner<'a, F: FnMut(&'a Self)>(&'a self, callback: &mut F) {
        callback(self);
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.visit_inner(callback);
            }
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }

    /// Levels below this node; 0 for a leaf.
    pub fn height(&self) -> usize {
        let mut deepest = self.depth;
        self.visit(|node| deepest = deepest.max(node.depth));
        deepest - self.depth
    }

    /// Iterates over all stored elements in canonical traversal order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { stack: vec![self], current: Default::default() }
    }
}

impl<'a, T> IntoIterator for &'a Quadtree<T> {
    type Item = &'a Element<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`Quadtree`], see [`Quadtree::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a Quadtree<T>>,
    current: slice::Iter<'a, Element<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Element<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.current.next() {
                return Some(element);
            }
            let node = self.stack.pop()?;
            match node.children.as_deref() {
                Some(children) => self.stack.extend(children.iter().rev()),
                None => self.current = node.elements.iter(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuadtreeError;

    fn bounds(x1: f64, y1: f64, x2: f64, y2: f64) -> Boundary {
        Boundary::from_coords(x1, y1, x2, y2).unwrap()
    }

    fn tree_with(points: &[(f64, f64)]) -> Quadtree<usize> {
        let mut tree = Quadtree::new(bounds(0.0, 0.0, 8.0, 8.0));
        for (i, &(x, y)) in points.iter().enumerate() {
            assert!(tree.insert(Element::new(Point::new(x, y), i)), "({x}, {y}) should be accepted");
        }
        tree
    }

    fn positions(found: &[&Element<usize>]) -> Vec<(f64, f64)> {
        found.iter().map(|e| (e.position.x, e.position.y)).collect()
    }

    #[test]
    fn test_new_tree() {
        let tree: Quadtree<()> = Quadtree::new(bounds(0.0, 0.0, 8.0, 8.0));
        assert!(tree.is_empty());
        assert!(tree.is_leaf());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.capacity(), 4);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<Quadtree<()>> = Quadtree::with_capacity(bounds(0.0, 0.0, 1.0, 1.0), 0);
        assert!(matches!(result, Err(QuadtreeError::ZeroCapacity)));
    }

    #[test]
    fn test_insert_outside_boundary() {
        let mut tree = tree_with(&[]);
        assert!(!tree.insert(Element::new(Point::new(8.5, 1.0), 0)));
        assert!(!tree.insert(Element::new(Point::new(f64::NAN, 1.0), 1)));
        assert!(tree.is_empty());

        let rejected = tree.try_insert(Element::new(Point::new(-1.0, -1.0), 7)).unwrap_err();
        assert_eq!(rejected.into_inner().data, 7);
    }

    #[test]
    fn test_search_scenario() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (3.0, 7.0)]);

        let found = tree.search(&bounds(3.0, 3.0, 5.0, 5.0));
        assert_eq!(positions(&found), [(4.0, 4.0)]);

        let found = tree.search(&bounds(3.0, 3.0, 7.0, 7.0));
        assert_eq!(positions(&found), [(4.0, 4.0), (3.0, 7.0), (6.0, 6.0)]);
    }

    #[test]
    fn test_search_into_appends() {
        let tree = tree_with(&[(1.0, 1.0), (6.0, 6.0)]);
        let mut results = Vec::new();
        tree.search_into(&bounds(0.0, 0.0, 2.0, 2.0), &mut results);
        tree.search_into(&bounds(5.0, 5.0, 8.0, 8.0), &mut results);
        assert_eq!(positions(&results), [(1.0, 1.0), (6.0, 6.0)]);
    }

    #[test]
    fn test_search_disjoint_query() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0)]);
        assert!(tree.search(&bounds(10.0, 10.0, 12.0, 12.0)).is_empty());
    }

    #[test]
    fn test_nearest_scenario() {
        let mut tree = tree_with(&[(1.0, 1.0), (2.0, 2.0), (6.0, 6.0), (2.0, 7.0)]);

        let best = tree.nearest(Point::new(2.0, 3.0));
        assert_eq!(best.position(), Some(Point::new(2.0, 2.0)));
        assert_eq!(best.distance, 1.0);

        assert!(tree.insert(Element::new(Point::new(2.0, 3.0), 4)));
        let best = tree.nearest(Point::new(2.0, 3.0));
        assert_eq!(best.position(), Some(Point::new(2.0, 3.0)));
        assert_eq!(best.distance, 0.0);
        assert_eq!(best.element.map(|e| e.data), Some(4));
    }

    #[test]
    fn test_nearest_empty_tree() {
        let tree = tree_with(&[]);
        let best = tree.nearest(Point::new(1.0, 1.0));
        assert!(best.element.is_none());
        assert_eq!(best.distance, f64::INFINITY);
    }

    #[test]
    fn test_nearest_location_outside_boundary() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0), (6.0, 6.0), (7.0, 1.0), (1.0, 7.0)]);
        let best = tree.nearest(Point::new(20.0, 0.0));
        assert_eq!(best.position(), Some(Point::new(7.0, 1.0)));
    }

    #[test]
    fn test_nearest_prefers_same_row_neighbour() {
        let root = bounds(0.0, 0.0, 8.0, 8.0);
        let mut tree = Quadtree::with_capacity(root, 1).unwrap();
        assert!(tree.insert(Element::new(Point::new(5.0, 3.0), "top-right")));
        assert!(tree.insert(Element::new(Point::new(3.0, 5.0), "bottom-left")));

        // Both candidates are 2 away; the same-row quadrant is visited first.
        let best = tree.nearest(Point::new(3.0, 3.0));
        assert_eq!(best.distance, 2.0);
        assert_eq!(best.element.map(|e| e.data), Some("top-right"));
    }

    #[test]
    fn test_nearest_location_on_midline_counts_as_right() {
        let root = bounds(0.0, 0.0, 8.0, 8.0);
        let mut tree = Quadtree::with_capacity(root, 1).unwrap();
        assert!(tree.insert(Element::new(Point::new(2.0, 3.0), "top-left")));
        assert!(tree.insert(Element::new(Point::new(6.0, 3.0), "top-right")));

        let best = tree.nearest(Point::new(4.0, 3.0));
        assert_eq!(best.distance, 2.0);
        assert_eq!(best.element.map(|e| e.data), Some("top-right"));
    }

    #[test]
    fn test_nearest_large_coordinates() {
        let mut tree = Quadtree::new(bounds(0.0, 0.0, 1e300, 1e300));
        assert!(tree.insert(Element::new(Point::new(1e300, 1e300), 0)));
        let best = tree.nearest(Point::new(0.0, 0.0));
        assert_eq!(best.element.map(|e| e.data), Some(0));
        assert!(best.distance.is_finite(), "distance overflowed");

        let mut tree = Quadtree::new(bounds(1e308, 1e308, f64::MAX, f64::MAX));
        let points = [
            (1.1e308, 1.1e308),
            (1.7e308, 1.1e308),
            (1.1e308, 1.7e308),
            (1.7e308, 1.7e308),
            (1.2e308, 1.2e308),
        ];
        for (i, &(x, y)) in points.iter().enumerate() {
            assert!(tree.insert(Element::new(Point::new(x, y), i)), "({x}, {y}) should be accepted");
        }
        assert!(!tree.is_leaf());
        tree.visit(|node| {
            let b = node.boundary();
            assert!(b.width() >= 0.0 && b.height() >= 0.0, "inverted child {b:?}");
            assert!(b.midpoint().x.is_finite(), "midpoint overflowed for {b:?}");
        });
        assert_eq!(tree.search(tree.boundary()).len(), points.len());
        assert_eq!(tree.nearest(Point::new(1e308, 1e308)).element.map(|e| e.data), Some(0));
    }

    #[test]
    fn test_nearest_non_finite_location() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0)]);
        for location in [Point::new(f64::NAN, 1.0), Point::new(1.0, f64::INFINITY)] {
            let best = tree.nearest(location);
            assert!(best.element.is_none(), "{location:?} should match nothing");
            assert_eq!(best.distance, f64::INFINITY);
        }
    }

    #[test]
    fn test_visit_preorder_canonical() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (3.0, 7.0)]);
        let mut seen = Vec::new();
        tree.visit(|node| seen.push((node.depth(), node.boundary().top_left())));
        assert_eq!(
            seen,
            [
                (0, Point::new(0.0, 0.0)),
                (1, Point::new(0.0, 0.0)),
                (1, Point::new(0.0, 4.0)),
                (1, Point::new(4.0, 0.0)),
                (1, Point::new(4.0, 4.0)),
            ]
        );
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_iter_matches_full_search() {
        let tree = tree_with(&[(1.0, 1.0), (2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (3.0, 7.0), (7.0, 0.5)]);
        let all = tree.search(tree.boundary());
        let iterated: Vec<_> = tree.iter().collect();
        assert_eq!(positions(&iterated), positions(&all));
        assert_eq!((&tree).into_iter().count(), tree.len());
    }
}
