//! Carves a random cave, computes a Dijkstra map towards its center and
//! walks a seeker from the farthest reachable cell down to the goal.
//!
//! Logging goes through `env_logger`: run with `RUST_LOG=info` for a
//! summary, `RUST_LOG=debug` for sweep statistics and `RUST_LOG=trace` for
//! per-pass tracing.

use std::collections::HashSet;

use dmap::{DijkstraMap, Diagonal, Point, Terrain, WeightedPoint};
use dmap_core::TerrainGrid;
use log::info;

const WIDTH: i32 = 60;
const HEIGHT: i32 = 22;
const FILL: f64 = 0.45;

/// Drunk-walk carving from the center until `fill` of the area is open.
fn random_walk_cave(width: i32, height: i32, fill: f64) -> TerrainGrid {
    let mut terrain = TerrainGrid::new(width, height);
    terrain.fill(false);
    let bounds = terrain.bounds();
    let target = (bounds.len() as f64 * fill) as usize;
    let mut pos = Point::new(width / 2, height / 2);
    let mut carved = 0usize;

    while carved < target {
        if terrain.passable_at(pos) == Some(false) {
            terrain.set_passable(pos, true);
            carved += 1;
        }
        let next = match rand::random_range(0..4u32) {
            0 => pos.shift(1, 0),
            1 => pos.shift(-1, 0),
            2 => pos.shift(0, 1),
            _ => pos.shift(0, -1),
        };
        if bounds.contains(next) {
            pos = next;
        }
    }
    terrain
}

/// Last digit of the rank, blank for unreached cells.
fn rank_glyph(w: WeightedPoint) -> char {
    if !w.is_reached() {
        return ' ';
    }
    char::from_digit(u32::from(w.rank % 10), 10).unwrap_or('?')
}

fn main() {
    env_logger::init();

    let terrain = random_walk_cave(WIDTH, HEIGHT, FILL);
    let goal = Point::new(WIDTH / 2, HEIGHT / 2);
    info!(
        "carved {} of {} cells",
        terrain.count_passable(),
        terrain.bounds().len()
    );

    let mut dm = DijkstraMap::blank(&terrain, Diagonal);
    let passes = dm.calc([goal]);
    info!("converged in {passes} passes");

    let Some(farthest) = dm
        .field()
        .bounds()
        .iter()
        .map(|p| dm.value_at(p))
        .filter(|w| w.is_reached() && terrain.is_passable(w.pos))
        .max_by_key(|w| w.rank)
    else {
        info!("nothing reachable");
        return;
    };
    let start = farthest.pos;
    info!(
        "seeker starts at {start}, {} steps from the goal",
        farthest.rank
    );

    let mut path = HashSet::new();
    let mut cur = dm.value_at(start);
    while cur.rank > 0 {
        path.insert(cur.pos);
        cur = dm.lowest_neighbor(cur.pos);
    }

    println!("{}", "-".repeat(WIDTH as usize));
    for y in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|x| {
                let p = Point::new(x, y);
                if p == goal {
                    'X'
                } else if p == start {
                    '@'
                } else if path.contains(&p) {
                    '*'
                } else if terrain.is_passable(p) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect();
        println!("{line}");
    }

    println!("{}", "-".repeat(WIDTH as usize));
    for y in 0..HEIGHT {
        let line: String = (0..WIDTH)
            .map(|x| {
                let p = Point::new(x, y);
                if terrain.is_passable(p) {
                    rank_glyph(dm.value_at(p))
                } else {
                    '#'
                }
            })
            .collect();
        println!("{line}");
    }
}
