use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Alert, MapOverlay, RouteSegment, Waypoint};

/// Map surface the session draws on.
pub trait MapDisplay: Send + Sync {
    fn show_marker(&self, waypoint: &Waypoint);
    fn draw_route(&self, segment: &RouteSegment);
    fn clear(&self);
}

/// Receives user-facing error messages.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory overlay that a map client polls and renders.
#[derive(Debug, Default)]
pub struct MapCanvas {
    overlay: Mutex<MapOverlay>,
}

impl MapCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MapOverlay {
        lock(&self.overlay).clone()
    }
}

impl MapDisplay for MapCanvas {
    fn show_marker(&self, waypoint: &Waypoint) {
        lock(&self.overlay).markers.push(waypoint.clone());
    }

    fn draw_route(&self, segment: &RouteSegment) {
        tracing::debug!(
            "drawing segment {} ({} points, {:.0} m)",
            segment.index,
            segment.geometry.len(),
            segment.distance_m
        );
        lock(&self.overlay).polylines.push(segment.clone());
    }

    fn clear(&self) {
        let mut overlay = lock(&self.overlay);
        overlay.markers.clear();
        overlay.polylines.clear();
    }
}

/// Alerts queued until a client drains them.
#[derive(Debug, Default)]
pub struct AlertLog {
    pending: Mutex<Vec<Alert>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *lock(&self.pending))
    }

    pub fn len(&self) -> usize {
        lock(&self.pending).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for AlertLog {
    fn alert(&self, alert: Alert) {
        tracing::warn!("{}: {}", alert.title, alert.message);
        lock(&self.pending).push(alert);
    }
}

/// Alert sink that only logs; used where nobody reads alerts back.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn alert(&self, alert: Alert) {
        tracing::warn!("{}: {}", alert.title, alert.message);
    }
}

/// Display that discards everything; the CLI prints the report instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl MapDisplay for NoDisplay {
    fn show_marker(&self, _waypoint: &Waypoint) {}
    fn draw_route(&self, _segment: &RouteSegment) {}
    fn clear(&self) {}
}
