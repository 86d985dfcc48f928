use proptest::prelude::*;
use wam_earcut::{deviation, nearest_edge, Earcut, Edge};

/// Regular polygon with `n` vertices, optionally wound clockwise.
fn regular_polygon(
    n: usize,
    radius: f64,
    center: (f64, f64),
    phase: f64,
    clockwise: bool,
) -> Vec<f64> {
    let mut coords = Vec::with_capacity(2 * n);
    for k in 0..n {
        let mut t = phase + k as f64 / n as f64 * std::f64::consts::TAU;
        if clockwise {
            t = -t;
        }
        coords.extend([center.0 + radius * t.cos(), center.1 + radius * t.sin()]);
    }
    coords
}

fn doubled_areas(data: &[f64], triangles: &[u32]) -> Vec<f64> {
    triangles
        .chunks_exact(3)
        .map(|t| {
            let p = |k: u32| [data[2 * k as usize], data[2 * k as usize + 1]];
            let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
            (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
        })
        .collect()
}

proptest! {
    #[test]
    fn convex_polygons_yield_n_minus_2_triangles(
        n in 3usize..200,
        radius in 1.0f64..1000.0,
        cx in -500.0f64..500.0,
        cy in -500.0f64..500.0,
        phase in 0.0f64..1.0,
        clockwise: bool,
    ) {
        let data = regular_polygon(n, radius, (cx, cy), phase, clockwise);
        let mut triangles: Vec<u32> = vec![];
        Earcut::new().earcut(&data, &[], 2, &mut triangles).unwrap();

        prop_assert_eq!(triangles.len(), (n - 2) * 3);
        prop_assert!(deviation(&data, &[] as &[u32], 2, &triangles).unwrap() < 1e-9);
        prop_assert!(doubled_areas(&data, &triangles).iter().all(|&a| a > 0.0));
    }

    #[test]
    fn rectangular_hole_is_excluded(
        w in 4i32..200,
        h in 4i32..200,
        fx in 0.05f64..0.45,
        fy in 0.05f64..0.45,
    ) {
        let (w, h) = (w as f64, h as f64);
        let (x0, y0) = ((w * fx).floor() + 1.0, (h * fy).floor() + 1.0);
        let (x1, y1) = (w - x0, h - y0);
        prop_assume!(x0 < x1 && y0 < y1);

        let data = vec![
            0.0, 0.0, w, 0.0, w, h, 0.0, h,
            x0, y0, x1, y0, x1, y1, x0, y1,
        ];
        let holes = [4u32];
        let mut triangles = vec![];
        Earcut::new().earcut(&data, &holes, 2, &mut triangles).unwrap();

        let areas = doubled_areas(&data, &triangles);
        prop_assert!(areas.iter().all(|&a| a > 0.0));
        let covered: f64 = areas.iter().sum::<f64>() / 2.0;
        prop_assert!((covered - (w * h - (x1 - x0) * (y1 - y0))).abs() < 1e-9);
    }

    #[test]
    fn retriangulating_covers_the_same_area(
        n in 3usize..120,
        radius in 1.0f64..100.0,
        jitter in proptest::collection::vec(0.6f64..1.0, 120),
    ) {
        // star-shaped around the origin, so always simple
        let data: Vec<f64> = (0..n)
            .flat_map(|k| {
                let t = k as f64 / n as f64 * std::f64::consts::TAU;
                let r = radius * jitter[k];
                [r * t.cos(), r * t.sin()]
            })
            .collect();

        let mut earcut = Earcut::new();
        let (mut first, mut second): (Vec<u32>, Vec<u32>) = (vec![], vec![]);
        earcut.earcut(&data, &[], 2, &mut first).unwrap();
        earcut.earcut(&data, &[], 2, &mut second).unwrap();

        prop_assert_eq!(first.len(), second.len());
        let a1: f64 = doubled_areas(&data, &first).iter().sum();
        let a2: f64 = doubled_areas(&data, &second).iter().sum();
        prop_assert!((a1 - a2).abs() <= 1e-9 * a1.abs().max(1.0));
    }

    #[test]
    fn nearest_edge_is_adjacent_pair(
        n in 3usize..40,
        tx in -10.0f64..10.0,
        ty in -10.0f64..10.0,
    ) {
        let ring = regular_polygon(n, 5.0, (0.0, 0.0), 0.0, false);
        let edge = nearest_edge(&ring, [tx, ty]).unwrap().unwrap();
        prop_assert_eq!(edge, Edge { start: edge.start, end: (edge.start + 1) % n });
    }
}
