//! Find the element closest to a point.
use quadtree_index::prelude::*;
use quadtree_index::Result;

fn main() -> Result<()> {
    let mut tree = Quadtree::new(Boundary::from_coords(0.0, 0.0, 8.0, 8.0)?);
    for (x, y) in [(1.0, 1.0), (2.0, 2.0), (6.0, 6.0), (2.0, 7.0)] {
        tree.insert(Element::new(Point::new(x, y), format!("({x}, {y})")));
    }

    let location = Point::new(2.0, 3.0);
    let best = tree.nearest(location);
    if let Some(element) = best.element {
        println!("Nearest to {location:?}: {} at distance {}", element.data, best.distance);
    }
    assert_eq!(best.distance, 1.0, "Expected (2, 2) at distance 1");

    tree.insert(Element::new(location, "(2, 3)".to_owned()));
    let best = tree.nearest(location);
    println!("After inserting the location itself: distance {}", best.distance);
    assert_eq!(best.distance, 0.0, "Expected an exact match");
    Ok(())
}
