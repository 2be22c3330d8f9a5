use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quake_map::geodesy::Location;
use quake_map::markers::{CityMarker, MarkerId, MarkerSet, Properties, QuakeAge, QuakeFeature};
use quake_map::{nearest, visibility};

/// Deterministic spread of points over the globe
fn scatter(n: usize, seed: u64) -> impl Iterator<Item = Location> {
    let mut state = seed;
    (0..n).map(move |_| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let a = (state >> 33) as f64 / (1u64 << 31) as f64;
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let b = (state >> 33) as f64 / (1u64 << 31) as f64;
        Location::new(a * 160.0 - 80.0, b * 360.0 - 180.0)
    })
}

fn world() -> MarkerSet {
    let cities = scatter(500, 7)
        .map(|loc| CityMarker::new(loc, Properties::new()))
        .collect();
    let quakes = scatter(3000, 11)
        .enumerate()
        .map(|(i, loc)| {
            let magnitude = 2.5 + (i % 50) as f64 / 10.0;
            let title = format!("q{i}");
            QuakeFeature::new(loc, &title, magnitude, 10.0, QuakeAge::PastWeek, Properties::new())
        })
        .collect();
    MarkerSet::build(cities, Vec::new(), quakes)
}

fn bench_nearest(c: &mut Criterion) {
    let markers = world();
    c.bench_function("rank_3000_quakes", |b| {
        b.iter(|| nearest::rank(black_box(&markers.quakes), black_box(Location::new(40.0, -74.0))))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut markers = world();
    c.bench_function("resolve_city_click", |b| {
        b.iter(|| visibility::resolve(black_box(&mut markers), MarkerId::City(0)))
    });
    c.bench_function("resolve_quake_click", |b| {
        b.iter(|| visibility::resolve(black_box(&mut markers), MarkerId::Quake(42)))
    });
}

criterion_group!(benches, bench_nearest, bench_resolve);
criterion_main!(benches);
