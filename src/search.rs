//! Free-text trip search.
//!
//! A query matches a trip when it is a case-insensitive substring of any of
//! the trip's searchable strings. An empty query is the identity filter.

use crate::format::TimeFormatter;
use crate::presentation::{distance_label, duration_label};
use crate::trip::Trip;

/// Strings a query is matched against, in match order
pub fn searchable_fields(trip: &Trip, formatter: &dyn TimeFormatter) -> [String; 6] {
    [
        trip.start_location_name.clone(),
        trip.end_location_name.clone(),
        formatter.date_string(trip.start_date),
        formatter.time_range_string(trip.start_date, trip.end_date),
        distance_label(trip),
        duration_label(trip),
    ]
}

pub fn matches(trip: &Trip, query: &str, formatter: &dyn TimeFormatter) -> bool {
    let needle = query.to_lowercase();
    searchable_fields(trip, formatter)
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Trips matching `query`, in their original relative order
pub fn filter<'a>(trips: &'a [Trip], query: &str, formatter: &dyn TimeFormatter) -> Vec<&'a Trip> {
    if query.is_empty() {
        return trips.iter().collect();
    }

    let results: Vec<&Trip> = trips
        .iter()
        .filter(|trip| matches(trip, query, formatter))
        .collect();

    log::debug!("search: '{}' matched {} of {} trips", query, results.len(), trips.len());
    results
}
