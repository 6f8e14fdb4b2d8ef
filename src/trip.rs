use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Result, TripError};

/// Stable identifier of a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub Uuid);

impl TripId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TripId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A single completed drive.
///
/// Everything except `is_starred` is fixed once the trip has been produced by
/// a trip source. `duration_minutes` is supplied independently of the
/// timestamps and is never recomputed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub start_location_name: String,
    pub end_location_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub distance_km: f64,
    pub duration_minutes: u32,
    #[serde(default)]
    pub route: Vec<Coordinate>,
    #[serde(default)]
    pub hard_braking: u32,
    #[serde(default)]
    pub hard_acceleration: u32,
    #[serde(default)]
    pub sharp_turns: u32,
    #[serde(default)]
    pub is_starred: bool,
}

impl Trip {
    pub fn new(
        start_location_name: impl Into<String>,
        end_location_name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TripId::new(),
            start_location_name: start_location_name.into(),
            end_location_name: end_location_name.into(),
            start_date,
            end_date: end_date.max(start_date),
            distance_km: 0.0,
            duration_minutes: 0,
            route: Vec::new(),
            hard_braking: 0,
            hard_acceleration: 0,
            sharp_turns: 0,
            is_starred: false,
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km.max(0.0);
        self
    }

    pub fn with_duration(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    pub fn with_route(mut self, route: Vec<Coordinate>) -> Self {
        self.route = route;
        self
    }

    pub fn with_events(mut self, hard_braking: u32, hard_acceleration: u32, sharp_turns: u32) -> Self {
        self.hard_braking = hard_braking;
        self.hard_acceleration = hard_acceleration;
        self.sharp_turns = sharp_turns;
        self
    }

    /// Check the record against the rules the builder enforces
    pub fn validate(&self) -> Result<()> {
        let reason = if self.end_date < self.start_date {
            "ends before it starts"
        } else if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            "distance must be a non-negative number"
        } else {
            return Ok(());
        };

        Err(TripError::InvalidTrip {
            id: self.id,
            reason: reason.to_string(),
        })
    }

    /// Total number of recorded driving events
    pub fn event_count(&self) -> u32 {
        self.hard_braking + self.hard_acceleration + self.sharp_turns
    }
}

fn base_route() -> Vec<Coordinate> {
    vec![
        Coordinate::new(-28.0116, 153.4052),
        Coordinate::new(-28.0408, 153.3991),
        Coordinate::new(-28.0700, 153.3930),
        Coordinate::new(-28.0780, 153.4075),
        Coordinate::new(-28.0860, 153.4220),
        Coordinate::new(-28.0930, 153.4310),
        Coordinate::new(-28.1000, 153.4400),
    ]
}

/// Sample trips around the Gold Coast, most recent first.
pub fn mock_trips(now: DateTime<Utc>) -> Vec<Trip> {
    let hour_ago = now - Duration::hours(1);
    let two_hours_ago = now - Duration::hours(2);

    let older = |start: &str, end: &str| {
        Trip::new(start, end, two_hours_ago, hour_ago)
            .with_distance(32.0)
            .with_duration(38)
            .with_route(base_route())
            .with_events(1, 0, 1)
    };

    vec![
        Trip::new("Burleigh", "Bundall", hour_ago, now)
            .with_distance(44.0)
            .with_duration(45)
            .with_route(base_route())
            .with_events(3, 1, 2),
        older("Miami", "Ashmore"),
        older("Burleigh", "Southport"),
        older("Arundel", "Southport"),
    ]
}
