use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::cancellation::Cancellation;
use crate::directions::DirectionsProvider;
use crate::display::{AlertSink, MapDisplay};
use crate::error::DirectionsError;
use crate::models::{
    DirectionsRequest, RouteReport, RouteSegment, SegmentFailure, TravelMode, Waypoint,
};
use crate::routing::select_shortest;

/// Requests a walking route for every consecutive pair of waypoints.
///
/// All pairs are requested at once and each result is drawn as soon as it
/// arrives, so segments may appear on the map in any order. A failed pair
/// raises one alert and is never retried; the other pairs are unaffected.
#[derive(Clone)]
pub struct RouteBuilder {
    directions: Arc<dyn DirectionsProvider>,
    display: Arc<dyn MapDisplay>,
    alerts: Arc<dyn AlertSink>,
}

impl RouteBuilder {
    pub fn new(
        directions: Arc<dyn DirectionsProvider>,
        display: Arc<dyn MapDisplay>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            directions,
            display,
            alerts,
        }
    }

    /// Fewer than two waypoints is a no-op that returns an empty report.
    ///
    /// Once `cancel` fires the call returns at once: requests still in
    /// flight are abandoned, nothing more is drawn or alerted and the report
    /// is marked `cancelled`. The report carries the routed waypoints.
    pub async fn build_routes(&self, waypoints: &[Waypoint], cancel: &Cancellation) -> RouteReport {
        let mut report = RouteReport {
            waypoints: waypoints.to_vec(),
            ..Default::default()
        };
        if waypoints.len() < 2 {
            tracing::debug!("{} waypoint(s), nothing to route", waypoints.len());
            return report;
        }
        if cancel.is_cancelled() {
            report.cancelled = true;
            return report;
        }

        tracing::info!(
            "requesting {} walking segment(s) for {} waypoints",
            waypoints.len() - 1,
            waypoints.len()
        );

        let directions = &self.directions;
        let mut pending: FuturesUnordered<_> = waypoints
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let req = DirectionsRequest {
                    start: pair[0].coordinate,
                    end: pair[1].coordinate,
                    mode: TravelMode::Walking,
                    alternates: true,
                };
                async move { (index, directions.directions(&req).await) }
            })
            .collect();

        loop {
            let (index, result) = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(
                        "route building cancelled, dropping {} pending segment(s)",
                        pending.len()
                    );
                    report.cancelled = true;
                    break;
                }
                next = pending.next() => match next {
                    Some(done) => done,
                    None => break,
                },
            };

            let (from, to) = (&waypoints[index], &waypoints[index + 1]);
            let outcome = result.and_then(|candidates| {
                let best = select_shortest(&candidates).ok_or(DirectionsError::NoRoute)?;
                tracing::debug!(
                    "segment {index}: {} alternative(s), shortest {:.0} m",
                    candidates.len(),
                    best.distance_m
                );
                Ok(RouteSegment {
                    index,
                    from: from.clone(),
                    to: to.clone(),
                    distance_m: best.distance_m,
                    duration_s: best.duration_s,
                    geometry: best.geometry.clone(),
                })
            });

            // a reset clears the map only after any draw in progress here is done
            let delivered = cancel.run_unless_cancelled(|| match outcome {
                Ok(segment) => {
                    self.display.draw_route(&segment);
                    report.segments.push(segment);
                }
                Err(err) => {
                    tracing::warn!("segment {index} ({} -> {}) failed: {err}", from.label, to.label);
                    self.alerts.alert(err.to_alert());
                    report.failures.push(SegmentFailure {
                        index,
                        from: from.label.clone(),
                        to: to.label.clone(),
                        message: err.to_string(),
                    });
                }
            });
            if delivered.is_none() {
                tracing::info!("route building cancelled, dropping segment {index}");
                report.cancelled = true;
                break;
            }
        }

        report.segments.sort_by_key(|s| s.index);
        report.failures.sort_by_key(|f| f.index);
        report.total_distance_m = report.segments.iter().map(|s| s.distance_m).sum();
        report
    }
}
