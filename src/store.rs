//! Canonical, ordered collection of trips.
//!
//! The store keeps trips in the order they were loaded. Display ordering is
//! left to the caller; nothing here sorts by date.

use crate::error::{Result, TripError};
use crate::trip::{Trip, TripId};

#[derive(Debug, Clone, Default)]
pub struct TripStore {
    trips: Vec<Trip>,
}

impl TripStore {
    pub fn new() -> Self {
        Self { trips: Vec::new() }
    }

    /// Replace the current collection
    pub fn load(&mut self, trips: Vec<Trip>) {
        log::debug!("TripStore: loaded {} trips", trips.len());
        self.trips = trips;
    }

    pub fn all(&self) -> &[Trip] {
        &self.trips
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Flip the starred flag of the trip with `id` and return the updated record
    pub fn toggle_star(&mut self, id: TripId) -> Result<Trip> {
        let trip = self
            .trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or(TripError::NotFound(id))?;

        trip.is_starred = !trip.is_starred;
        log::debug!("TripStore: trip {} starred={}", id, trip.is_starred);
        Ok(trip.clone())
    }
}
