//! Fixed obstacle layout rendered as ASCII with the found path.
//!
//! Run: cargo run --bin maze [resolution]

use gridnav_demos::{build, init_logging, maze_obstacles, render};
use gridnav_geom::Vec2;

fn main() {
    init_logging();

    let resolution = match std::env::args().nth(1).map(|s| s.parse::<f32>()) {
        None => 1.0,
        Some(Ok(r)) => r,
        Some(Err(e)) => {
            eprintln!("Error: bad resolution: {e}");
            std::process::exit(2);
        }
    };

    let mut finder = match build(&maze_obstacles(), resolution) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let (start, end) = (Vec2::new(1.5, 1.5), Vec2::new(38.5, 1.5));
    match finder.find_path_detailed(start, end) {
        Ok(result) => {
            print!("{}", render(finder.grid(), Some(&result)));
            log::info!(
                "{} waypoints, cost {}, {} nodes expanded",
                result.len(),
                result.total_cost,
                result.nodes_expanded
            );
        }
        Err(e) => {
            print!("{}", render(finder.grid(), None));
            log::warn!("no path from {start} to {end}: {e}");
        }
    }
}
