//! Triangulates a fixture repeatedly, for profiling.
//!
//! `cargo run --release --example fixture_loop -- ring-holes 500`

use serde::Deserialize;
use std::{env, fs};
use wam_earcut::{deviation, Earcut};

#[derive(Deserialize)]
struct Fixture {
    rings: Vec<Vec<[f64; 2]>>,
    triangles: usize,
    deviation: f64,
}

fn main() {
    let mut args = env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "ring-holes".to_string());
    let rounds: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(500);

    let s = fs::read_to_string(format!("./tests/fixtures/{name}.json")).unwrap();
    let fixture = serde_json::from_str::<Fixture>(&s).unwrap();

    let data: Vec<_> = fixture.rings.iter().flatten().flatten().copied().collect();
    let hole_indices: Vec<_> = fixture
        .rings
        .iter()
        .map(|x| x.len() as u32)
        .scan(0, |sum, e| {
            *sum += e;
            Some(*sum)
        })
        .take(fixture.rings.len() - 1)
        .collect();

    let mut triangles = vec![];
    let mut earcut = Earcut::new();
    for _ in 0..rounds {
        earcut
            .earcut(&data, &hole_indices, 2, &mut triangles)
            .unwrap();
    }

    assert_eq!(triangles.len(), fixture.triangles * 3);
    if !triangles.is_empty() {
        assert!(deviation(&data, &hole_indices, 2, &triangles).unwrap() <= fixture.deviation);
    }
}
