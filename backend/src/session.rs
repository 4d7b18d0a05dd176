use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cancellation::Cancellation;
use crate::directions::DirectionsProvider;
use crate::display::{AlertSink, MapDisplay};
use crate::error::{GeocodeError, PinMapError};
use crate::geocoding::Geocoder;
use crate::models::{Controls, RouteBounds, RouteReport, Waypoint};
use crate::route_builder::RouteBuilder;
use crate::waypoints::WaypointList;

#[derive(Default)]
struct SessionState {
    waypoints: WaypointList,
    cancel: Cancellation,
}

/// The add / route / reset actions of one map, wired to its collaborators.
///
/// The waypoint list is only touched while the state lock is held and the
/// lock is never held across an `.await`. Lock order is state, then the
/// cancellation token, then the display.
pub struct Session {
    geocoder: Arc<dyn Geocoder>,
    routes: RouteBuilder,
    display: Arc<dyn MapDisplay>,
    alerts: Arc<dyn AlertSink>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
        display: Arc<dyn MapDisplay>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let routes = RouteBuilder::new(directions, display.clone(), alerts.clone());
        Self {
            geocoder,
            routes,
            display,
            alerts,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Geocodes `address` and appends it as a pin.
    ///
    /// On failure an alert is raised and the list is left untouched. A pin
    /// whose lookup finishes after a reset is discarded.
    pub async fn add_address(&self, address: &str) -> Result<Waypoint, PinMapError> {
        let label = address.trim();
        let cancel = self.state().cancel.clone();

        let lookup = if label.is_empty() {
            Err(GeocodeError::EmptyAddress)
        } else {
            self.geocoder.geocode(label).await
        };
        let coordinate = lookup.map_err(|err| {
            self.alerts.alert(err.to_alert());
            err
        })?;

        let waypoint = Waypoint {
            label: label.to_string(),
            coordinate,
        };

        let mut state = self.state();
        let added = cancel.run_unless_cancelled(|| {
            state.waypoints.append(waypoint.clone());
            self.display.show_marker(&waypoint);
            state.waypoints.count()
        });
        match added {
            Some(count) => {
                tracing::info!("added waypoint #{count} {label:?}");
                Ok(waypoint)
            }
            None => {
                tracing::info!("dropping {label:?}: waypoints were reset during lookup");
                Err(PinMapError::Cancelled)
            }
        }
    }

    /// Routes the current pins; needs at least two of them.
    pub async fn build_routes(&self) -> Result<RouteReport, PinMapError> {
        let (waypoints, cancel) = {
            let state = self.state();
            (state.waypoints.as_slice().to_vec(), state.cancel.clone())
        };
        if waypoints.len() < 2 {
            return Err(PinMapError::NotEnoughWaypoints(waypoints.len()));
        }
        Ok(self.routes.build_routes(&waypoints, &cancel).await)
    }

    /// Drops every pin, cancels in-flight lookups and clears the map.
    ///
    /// Cancelling waits for a draw of the old generation that is already
    /// under way, so nothing from before the reset lands on the cleared map.
    pub fn reset(&self) {
        let mut state = self.state();
        state.cancel.cancel();
        state.cancel = Cancellation::new();
        state.waypoints.clear();
        self.display.clear();
        tracing::info!("waypoints reset");
    }

    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.state().waypoints.as_slice().to_vec()
    }

    pub fn count(&self) -> usize {
        self.state().waypoints.count()
    }

    pub fn controls(&self) -> Controls {
        self.state().waypoints.controls()
    }

    pub fn bounds(&self) -> Option<RouteBounds> {
        self.state().waypoints.bounds()
    }
}
