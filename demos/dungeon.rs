//! Terminal demo: fog-of-war and torchlight over a pillar field.
//!
//! Prints two views of the same randomly scattered map: the set of cells
//! visible from the center, then the accumulated torchlight brightness.

use std::collections::HashSet;

use rand::{RngExt, SeedableRng, rngs::StdRng};
use shadowfold::{ScanConfig, Viewer, evaluate, illuminate};
use shadowfold_core::{Point, Range};

const WIDTH: i32 = 46;
const HEIGHT: i32 = 18;
const RADIUS: f64 = 12.0;

struct Map {
    walls: HashSet<Point>,
    bounds: Range,
}

impl Map {
    fn generate(seed: u64) -> Self {
        let bounds = Range::new(0, 0, WIDTH, HEIGHT);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut walls = HashSet::new();
        for p in bounds {
            let border =
                p.x == 0 || p.y == 0 || p.x == WIDTH - 1 || p.y == HEIGHT - 1;
            if border || rng.random_range(0..100) < 7 {
                walls.insert(p);
            }
        }
        walls.remove(&center());
        Self { walls, bounds }
    }
}

impl Viewer<HashSet<Point>> for Map {
    fn is_blocked(&self, _seen: &HashSet<Point>, p: Point) -> bool {
        self.walls.contains(&p)
    }

    fn on_visible(&self, mut seen: HashSet<Point>, p: Point, _distance: f64) -> HashSet<Point> {
        seen.insert(p);
        seen
    }
}

fn center() -> Point {
    Point::new(WIDTH / 2, HEIGHT / 2)
}

fn main() {
    let map = Map::generate(7);
    let origin = center();
    let config = ScanConfig {
        bounds: Some(map.bounds),
        ..Default::default()
    };

    let seen = evaluate(HashSet::new(), origin, RADIUS, &map, &config)
        .expect("radius is valid");

    println!("field of view from @ (radius {RADIUS}):");
    for y in 0..HEIGHT {
        let mut line = String::new();
        for x in 0..WIDTH {
            let p = Point::new(x, y);
            line.push(if p == origin {
                '@'
            } else if !seen.contains(&p) {
                ' '
            } else if map.walls.contains(&p) {
                '#'
            } else {
                '.'
            });
        }
        println!("{line}");
    }

    let mut light = vec![0.0_f64; (WIDTH * HEIGHT) as usize];
    illuminate(
        origin,
        RADIUS,
        &config,
        |p| map.walls.contains(&p),
        |p, b| {
            if map.bounds.contains(p) {
                light[(p.y * WIDTH + p.x) as usize] += b;
            }
        },
    )
    .expect("power is valid");

    println!();
    println!("torchlight (accumulated brightness):");
    for y in 0..HEIGHT {
        let mut line = String::new();
        for x in 0..WIDTH {
            let b = light[(y * WIDTH + x) as usize];
            line.push(match b {
                b if b <= 0.0 => ' ',
                b if b < 0.25 => '.',
                b if b < 0.5 => '░',
                b if b < 0.75 => '▒',
                _ => '▓',
            });
        }
        println!("{line}");
    }
}
