use crate::format::TimeFormatter;
use crate::trip::{Coordinate, Trip};

/// Kilometres truncated to a whole number, e.g. "44 km"
pub fn distance_label(trip: &Trip) -> String {
    format!("{} km", trip.distance_km.trunc() as i64)
}

pub fn duration_label(trip: &Trip) -> String {
    format!("{} mins", trip.duration_minutes)
}

pub fn relative_time_label(trip: &Trip, formatter: &dyn TimeFormatter) -> String {
    formatter.relative(trip.end_date)
}

/// "Burleigh → Bundall"
pub fn title(trip: &Trip) -> String {
    format!("{} → {}", trip.start_location_name, trip.end_location_name)
}

/// Secondary line shown under a trip title
pub fn meta_line(trip: &Trip, formatter: &dyn TimeFormatter) -> String {
    format!(
        "{}  •  {}  •  {}",
        distance_label(trip),
        duration_label(trip),
        relative_time_label(trip, formatter)
    )
}

/// Start and end markers of a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMarkers {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Markers for the first and last route points; `None` for an empty route
pub fn route_markers(route: &[Coordinate]) -> Option<RouteMarkers> {
    match (route.first(), route.last()) {
        (Some(start), Some(end)) => Some(RouteMarkers {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}

/// Latitude/longitude bounds of a route as `((min_lat, max_lat), (min_lon, max_lon))`
pub fn route_bounds(route: &[Coordinate]) -> Option<((f64, f64), (f64, f64))> {
    let first = route.first()?;
    let init = (
        (first.latitude, first.latitude),
        (first.longitude, first.longitude),
    );
    Some(route.iter().fold(init, |((lat_lo, lat_hi), (lon_lo, lon_hi)), point| {
        (
            (lat_lo.min(point.latitude), lat_hi.max(point.latitude)),
            (lon_lo.min(point.longitude), lon_hi.max(point.longitude)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ClockFormatter;
    use crate::trip::mock_trips;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_distance_is_truncated() {
        let now = Utc::now();
        let trip = Trip::new("A", "B", now, now).with_distance(44.9);
        assert_eq!(distance_label(&trip), "44 km");

        let short = Trip::new("A", "B", now, now).with_distance(0.4);
        assert_eq!(distance_label(&short), "0 km");
    }

    #[test]
    fn test_duration_label() {
        let now = Utc::now();
        let trip = Trip::new("A", "B", now, now).with_duration(45);
        assert_eq!(duration_label(&trip), "45 mins");
    }

    #[test]
    fn test_meta_line() {
        let now = Utc.with_ymd_and_hms(2026, 1, 26, 9, 30, 0).unwrap();
        let formatter = ClockFormatter::pinned(now + Duration::hours(2));
        let trips = mock_trips(now);

        assert_eq!(title(&trips[0]), "Burleigh → Bundall");
        assert_eq!(meta_line(&trips[0], &formatter), "44 km  •  45 mins  •  2 hours ago");
    }

    #[test]
    fn test_route_markers() {
        let route = vec![
            Coordinate::new(-28.0, 153.0),
            Coordinate::new(-28.1, 153.1),
            Coordinate::new(-28.2, 153.2),
        ];
        let markers = route_markers(&route).unwrap();
        assert_eq!(markers.start, route[0]);
        assert_eq!(markers.end, route[2]);
    }

    #[test]
    fn test_single_point_route_has_coincident_markers() {
        let route = vec![Coordinate::new(-28.0, 153.0)];
        let markers = route_markers(&route).unwrap();
        assert_eq!(markers.start, markers.end);
    }

    #[test]
    fn test_empty_route_has_no_markers() {
        assert_eq!(route_markers(&[]), None);
        assert_eq!(route_bounds(&[]), None);
    }

    #[test]
    fn test_route_bounds() {
        let route = vec![
            Coordinate::new(-28.0116, 153.4052),
            Coordinate::new(-28.1000, 153.3930),
            Coordinate::new(-28.0500, 153.4400),
        ];
        let ((lat_lo, lat_hi), (lon_lo, lon_hi)) = route_bounds(&route).unwrap();
        assert_eq!((lat_lo, lat_hi), (-28.1000, -28.0116));
        assert_eq!((lon_lo, lon_hi), (153.3930, 153.4400));
    }
}
