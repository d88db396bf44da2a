//! Print the node structure of a randomly filled tree, the way a renderer
//! would walk it. Pass a TOML config path to override capacity and depth.
//!
//! RUST_LOG=quadtree_index=trace shows every subdivision.
use quadtree_index::prelude::*;
use quadtree_index::Result;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => QuadtreeConfig::load(path)?,
        None => QuadtreeConfig::default(),
    };
    info!(capacity = config.capacity, max_depth = config.max_depth, "building tree");

    let (width, height) = (750.0, 300.0);
    let mut tree = Quadtree::with_config(Boundary::from_coords(0.0, 0.0, width, height)?, config)?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(300);
    for id in 0..300 {
        let position = Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
        tree.insert(Element::new(position, id));
    }

    let mut per_depth = vec![0_usize; tree.height() + 1];
    tree.visit(|node| {
        per_depth[node.depth()] += 1;
        let b = node.boundary();
        let kind = if node.is_leaf() { "leaf" } else { "node" };
        println!(
            "{:indent$}{kind} ({:.1}, {:.1})-({:.1}, {:.1}) points={}",
            "",
            b.top_left().x,
            b.top_left().y,
            b.bottom_right().x,
            b.bottom_right().y,
            node.elements().len(),
            indent = node.depth() * 2,
        );
    });

    info!(elements = tree.len(), nodes = tree.node_count(), height = tree.height(), "done");
    for (depth, count) in per_depth.iter().enumerate() {
        info!(depth, count, "nodes at depth");
    }
    Ok(())
}
