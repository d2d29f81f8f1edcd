//! Seeded random obstacle field; runs repeated queries and prints summary
//! statistics.
//!
//! Run: cargo run --bin scatter [seed] [queries]

use gridnav_demos::{WORLD, build, init_logging, random_point, render, scatter_obstacles};
use gridnav_paths::{PathError, SearchConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

const OBSTACLES: usize = 25;

fn main() {
    init_logging();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let queries: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(200);

    let mut rng = StdRng::seed_from_u64(seed);
    let obstacles = scatter_obstacles(&mut rng, WORLD, OBSTACLES);
    let mut finder = match build(&obstacles, 1.0) {
        Ok(f) => f.with_search_config(SearchConfig::default().with_max_iterations(5_000)),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut found = 0usize;
    let mut unreachable = 0usize;
    let mut capped = 0usize;
    let mut expanded = 0usize;
    let mut waypoints = 0usize;
    let mut last = None;

    for _ in 0..queries {
        let (a, b) = (random_point(&mut rng, WORLD), random_point(&mut rng, WORLD));
        match finder.find_path_detailed(a, b) {
            Ok(result) => {
                found += 1;
                expanded += result.nodes_expanded;
                waypoints += result.len();
                last = Some(result);
            }
            Err(PathError::Unreachable { nodes_expanded }) => {
                unreachable += 1;
                expanded += nodes_expanded;
            }
            Err(PathError::IterationLimit { .. }) => capped += 1,
            Err(e) => log::warn!("query {a} -> {b} failed: {e}"),
        }
    }

    print!("{}", render(finder.grid(), last.as_ref()));
    println!(
        "seed {seed}: {} solid of {} cells",
        finder.grid().solid_count(),
        finder.grid().len()
    );
    println!("{queries} queries: {found} found, {unreachable} unreachable, {capped} capped");
    if found > 0 {
        println!(
            "mean path length {:.1}, mean nodes expanded {:.1}",
            waypoints as f64 / found as f64,
            expanded as f64 / (found + unreachable) as f64
        );
    }
}
