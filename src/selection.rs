use crate::trip::{Trip, TripId};

/// The single currently selected trip.
///
/// Holds the record last handed to it. Callers that mutate the store must
/// pass the updated record to `on_store_mutation` in the same event so the
/// selection never drifts from the stored trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    current: Trip,
}

impl Selection {
    pub fn new(initial: Trip) -> Self {
        Self { current: initial }
    }

    /// First trip of `trips`, or `None` when there is nothing to select
    pub fn from_first(trips: &[Trip]) -> Option<Self> {
        trips.first().cloned().map(Self::new)
    }

    pub fn select(&mut self, trip: Trip) {
        log::debug!("Selection: selected trip {}", trip.id);
        self.current = trip;
    }

    pub fn on_store_mutation(&mut self, updated: &Trip) {
        if self.current.id == updated.id {
            self.current = updated.clone();
        }
    }

    pub fn current(&self) -> &Trip {
        &self.current
    }

    pub fn id(&self) -> TripId {
        self.current.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TripStore;
    use crate::trip::mock_trips;
    use chrono::Utc;

    #[test]
    fn test_initial_selection_is_first_trip() {
        let trips = mock_trips(Utc::now());
        let selection = Selection::from_first(&trips).unwrap();
        assert_eq!(selection.current(), &trips[0]);
    }

    #[test]
    fn test_empty_collection_has_no_selection() {
        assert!(Selection::from_first(&[]).is_none());
    }

    #[test]
    fn test_select_replaces_current() {
        let trips = mock_trips(Utc::now());
        let mut selection = Selection::new(trips[0].clone());
        selection.select(trips[3].clone());
        assert_eq!(selection.id(), trips[3].id);
    }

    #[test]
    fn test_mutation_of_selected_trip_is_reflected() {
        let mut store = TripStore::new();
        store.load(mock_trips(Utc::now()));
        let mut selection = Selection::from_first(store.all()).unwrap();

        let updated = store.toggle_star(selection.id()).unwrap();
        selection.on_store_mutation(&updated);

        assert!(selection.current().is_starred);
        assert_eq!(selection.current(), store.get(selection.id()).unwrap());
    }

    #[test]
    fn test_mutation_of_other_trip_is_ignored() {
        let mut store = TripStore::new();
        store.load(mock_trips(Utc::now()));
        let mut selection = Selection::from_first(store.all()).unwrap();
        let before = selection.clone();

        let other = store.all()[1].id;
        let updated = store.toggle_star(other).unwrap();
        selection.on_store_mutation(&updated);

        assert_eq!(selection, before);
    }
}
