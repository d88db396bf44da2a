//! Find the elements inside a query rectangle.
use quadtree_index::prelude::*;
use quadtree_index::Result;

fn main() -> Result<()> {
    let mut tree = Quadtree::with_capacity(Boundary::from_coords(0.0, 0.0, 8.0, 8.0)?, 4)?;
    for (id, (x, y)) in [(1.0, 1.0), (2.0, 2.0), (4.0, 4.0), (6.0, 6.0), (3.0, 7.0)].into_iter().enumerate() {
        tree.insert(Element::new(Point::new(x, y), id));
    }

    let query = Boundary::from_coords(3.0, 3.0, 7.0, 7.0)?;
    let found: Vec<_> = tree.search(&query).iter().map(|e| (e.position.x, e.position.y)).collect();
    println!("In {query:?}: {found:?}");

    // Results come back in traversal order: top-left, bottom-left, top-right, bottom-right
    assert_eq!(found, [(4.0, 4.0), (3.0, 7.0), (6.0, 6.0)], "Expected traversal order");
    Ok(())
}
