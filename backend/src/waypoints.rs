use crate::models::{Controls, RouteBounds, Waypoint};
use crate::routing::bounds_of;

/// Route and reset controls appear once more than this many pins exist.
pub const CONTROLS_THRESHOLD: usize = 2;

/// Ordered pins in the order the user entered them.
#[derive(Debug, Clone, Default)]
pub struct WaypointList {
    items: Vec<Waypoint>,
}

impl WaypointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicates are accepted; order is insertion order.
    pub fn append(&mut self, waypoint: Waypoint) {
        self.items.push(waypoint);
    }

    /// Empties the list. Clearing the map is the caller's job.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.items
    }

    pub fn controls(&self) -> Controls {
        let visible = self.count() > CONTROLS_THRESHOLD;
        Controls {
            route_visible: visible,
            reset_visible: visible,
        }
    }

    pub fn bounds(&self) -> Option<RouteBounds> {
        bounds_of(self.items.iter().map(|w| &w.coordinate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn pin(label: &str, lat: f64) -> Waypoint {
        Waypoint {
            label: label.into(),
            coordinate: Coordinate::new(lat, 37.6),
        }
    }

    #[test]
    fn append_keeps_entry_order_and_duplicates() {
        let mut list = WaypointList::new();
        list.append(pin("A", 55.0));
        list.append(pin("B", 55.1));
        list.append(pin("A", 55.0));

        let labels: Vec<_> = list.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "A"]);
        assert_eq!(list.count(), 3);
    }

    #[test]
    fn clear_empties_list() {
        let mut list = WaypointList::new();
        list.append(pin("A", 55.0));
        list.append(pin("B", 55.1));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.count(), 0);
        assert!(list.bounds().is_none());
    }

    #[test]
    fn controls_appear_with_third_pin_and_stay_until_reset() {
        let mut list = WaypointList::new();
        for (i, label) in ["A", "B"].iter().enumerate() {
            list.append(pin(label, 55.0 + i as f64));
            assert_eq!(list.controls(), Controls::default());
        }

        list.append(pin("C", 57.0));
        assert!(list.controls().route_visible);
        assert!(list.controls().reset_visible);

        list.append(pin("D", 58.0));
        assert!(list.controls().route_visible);

        list.clear();
        assert_eq!(list.controls(), Controls::default());
    }
}
