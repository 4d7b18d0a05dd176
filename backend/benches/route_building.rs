use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pinmap::cancellation::Cancellation;
use pinmap::directions::DirectionsProvider;
use pinmap::display::{LogAlerts, MapCanvas};
use pinmap::error::DirectionsError;
use pinmap::gpx_export::encode_route_as_gpx;
use pinmap::models::{Coordinate, DirectionsRequest, RouteCandidate, Waypoint};
use pinmap::route_builder::RouteBuilder;
use pinmap::routing::select_shortest;

/// Three alternatives of 64 points each per request, answered immediately.
struct SyntheticDirections;

#[async_trait]
impl DirectionsProvider for SyntheticDirections {
    async fn directions(
        &self,
        req: &DirectionsRequest,
    ) -> Result<Vec<RouteCandidate>, DirectionsError> {
        Ok((0..3)
            .map(|alt| RouteCandidate {
                distance_m: 1000.0 + alt as f64 * 37.0,
                duration_s: 700.0,
                geometry: interpolate(req.start, req.end, 64),
            })
            .collect())
    }
}

fn interpolate(a: Coordinate, b: Coordinate, steps: usize) -> Vec<Coordinate> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Coordinate::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
        })
        .collect()
}

fn pins(n: usize) -> Vec<Waypoint> {
    (0..n)
        .map(|i| Waypoint {
            label: format!("pin {i}"),
            coordinate: Coordinate::new(45.93 + i as f64 * 0.002, 4.57 + i as f64 * 0.003),
        })
        .collect()
}

fn benchmark_build_routes(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("build_routes");

    for n in [3usize, 10, 50] {
        let waypoints = pins(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &waypoints, |b, waypoints| {
            b.to_async(&rt).iter(|| async {
                let builder = RouteBuilder::new(
                    Arc::new(SyntheticDirections),
                    Arc::new(MapCanvas::new()),
                    Arc::new(LogAlerts),
                );
                builder
                    .build_routes(black_box(waypoints), &Cancellation::new())
                    .await
            });
        });
    }

    group.finish();
}

fn benchmark_select_shortest(c: &mut Criterion) {
    let candidates: Vec<RouteCandidate> = (0..16)
        .map(|i| RouteCandidate {
            distance_m: ((i * 7919) % 97) as f64,
            duration_s: 0.0,
            geometry: Vec::new(),
        })
        .collect();

    c.bench_function("select_shortest_16", |b| {
        b.iter(|| select_shortest(black_box(&candidates)))
    });
}

fn benchmark_gpx_export(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let waypoints = pins(20);
    let builder = RouteBuilder::new(
        Arc::new(SyntheticDirections),
        Arc::new(MapCanvas::new()),
        Arc::new(LogAlerts),
    );
    let report = rt.block_on(builder.build_routes(&waypoints, &Cancellation::new()));

    c.bench_function("gpx_export_20_pins", |b| {
        b.iter(|| encode_route_as_gpx(black_box(&waypoints), black_box(&report.segments)))
    });
}

criterion_group!(
    benches,
    benchmark_build_routes,
    benchmark_select_shortest,
    benchmark_gpx_export
);
criterion_main!(benches);
