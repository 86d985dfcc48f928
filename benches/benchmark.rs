use std::fs;

use criterion::{criterion_group, criterion_main, Criterion};
use serde::Deserialize;

use wam_earcut::{nearest_edge, Earcut};

#[derive(Deserialize)]
struct Fixture {
    rings: Vec<Vec<[f64; 2]>>,
}

fn load_fixture(name: &str) -> (Vec<f64>, Vec<u32>) {
    let s = fs::read_to_string(format!("./tests/fixtures/{name}.json")).unwrap();
    let rings = serde_json::from_str::<Fixture>(&s).unwrap().rings;

    let data: Vec<_> = rings.iter().flatten().flatten().copied().collect();
    let hole_indices: Vec<_> = rings
        .iter()
        .map(|x| x.len() as u32)
        .scan(0, |sum, e| {
            *sum += e;
            Some(*sum)
        })
        .take(rings.len() - 1)
        .collect();

    (data, hole_indices)
}

fn bench(c: &mut Criterion) {
    let mut earcut = Earcut::new();
    let mut triangles = Vec::new();

    for name in ["l-shape", "square-hole", "two-holes", "star", "ring-holes"] {
        let (data, hole_indices) = load_fixture(name);
        c.bench_function(name, |b| {
            b.iter(|| {
                earcut
                    .earcut(&data, &hole_indices, 2, &mut triangles)
                    .unwrap();
            })
        });
    }

    c.bench_function("nearest_edge star", |b| {
        let (data, _) = load_fixture("star");
        b.iter(|| nearest_edge(&data, [12.5, -40.0]).unwrap())
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
