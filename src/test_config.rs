use crate::app::App;
use crate::detent::Detent;
use crate::error::{Result, TripError};
use crate::format::ClockFormatter;
use crate::trip::{mock_trips, Trip, TripId};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of the application state.
///
/// Used to render screenshots and to replay commands without a terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    pub trips: Vec<Trip>,
    pub selected_trip_id: Option<TripId>,
    pub detent: Detent,
    pub search_query: String,
    pub search_focused: bool,
    pub list_cursor: usize,
    pub detail_trip_id: Option<TripId>,
    pub container_height: f64,
    pub status_message: String,
    pub is_loading: bool,
    /// Clock used for relative times; the system clock when absent
    pub now: Option<DateTime<Utc>>,
    /// Minutes east of UTC for dates and time ranges
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        let now = Utc
            .with_ymd_and_hms(2026, 1, 26, 9, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            trips: mock_trips(now),
            selected_trip_id: None,
            detent: Detent::Collapsed,
            search_query: String::new(),
            search_focused: false,
            list_cursor: 0,
            detail_trip_id: None,
            container_height: 640.0,
            status_message: "Ready".to_string(),
            is_loading: false,
            now: Some(now),
            utc_offset_minutes: 0,
        }
    }
}

impl TestConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TestConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn from_app(app: &App) -> Self {
        TestConfig {
            trips: app.trips().to_vec(),
            selected_trip_id: Some(app.selected().id),
            detent: app.detent(),
            search_query: app.search_query().to_string(),
            search_focused: app.is_search_focused(),
            list_cursor: app.list_cursor(),
            detail_trip_id: app.detail_request().map(|trip| trip.id),
            container_height: app.container_height(),
            status_message: app.status_message.clone(),
            is_loading: app.is_loading,
            now: app.formatter().pinned_now(),
            utc_offset_minutes: app.formatter().offset().local_minus_utc() / 60,
        }
    }
}

impl App {
    pub fn from_test_config(config: &TestConfig) -> Result<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60))
            .ok_or_else(|| TripError::from(format!("UTC offset of {} minutes is out of range", config.utc_offset_minutes)))?;
        let formatter = match config.now {
            Some(now) => ClockFormatter::pinned(now),
            None => ClockFormatter::system(),
        }
        .with_offset(offset);
        let mut app = App::with_formatter(config.trips.clone(), formatter)?;

        // Set the selected trip if specified
        if let Some(id) = config.selected_trip_id {
            if let Some(trip) = config.trips.iter().find(|t| t.id == id) {
                app.select(trip.clone());
            }
        }

        app.set_container_height(config.container_height);
        app.restore_view_state(
            config.detent,
            config.search_query.clone(),
            config.search_focused,
            config.list_cursor,
            config.detail_trip_id,
        );
        app.status_message = config.status_message.clone();
        app.is_loading = config.is_loading;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TimeFormatter;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_builds_app() {
        let config = TestConfig::default();
        let app = App::from_test_config(&config).unwrap();
        assert_eq!(app.trips().len(), 4);
        assert_eq!(app.selected().id, config.trips[0].id);
    }

    #[test]
    fn test_snapshot_round_trip_through_app() {
        let mut config = TestConfig::default();
        config.detent = Detent::Expanded;
        config.search_query = "southport".to_string();
        config.search_focused = true;
        config.list_cursor = 1;
        config.selected_trip_id = Some(config.trips[3].id);
        config.detail_trip_id = Some(config.trips[3].id);

        let app = App::from_test_config(&config).unwrap();
        assert_eq!(TestConfig::from_app(&app), config);
    }

    #[test]
    fn test_collapsed_snapshot_drops_search_focus() {
        let mut config = TestConfig::default();
        config.search_focused = true;

        let app = App::from_test_config(&config).unwrap();
        assert!(!app.is_search_focused());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut config = TestConfig::default();
        config.selected_trip_id = Some(TripId::new());
        config.detail_trip_id = Some(TripId::new());

        let app = App::from_test_config(&config).unwrap();
        assert_eq!(app.selected().id, config.trips[0].id);
        assert!(app.detail_request().is_none());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let path = path.to_string_lossy().to_string();

        let config = TestConfig::default();
        config.save_to_file(&path).unwrap();
        let loaded = TestConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_offset_applies_to_dates_and_search() {
        let mut config = TestConfig::default();
        config.utc_offset_minutes = 600;
        config.detent = Detent::Expanded;

        let mut app = App::from_test_config(&config).unwrap();
        let first = app.trips()[0].clone();
        assert_eq!(
            app.formatter().time_range_string(first.start_date, first.end_date),
            "6:30 PM - 7:30 PM"
        );

        app.set_search_query("6:30 pm - 7");
        let hits: Vec<_> = app.filtered_trips().iter().map(|t| t.id).collect();
        assert_eq!(hits, vec![first.id]);

        assert_eq!(TestConfig::from_app(&app).utc_offset_minutes, 600);
    }

    #[test]
    fn test_offset_out_of_range_is_rejected() {
        let mut config = TestConfig::default();
        config.utc_offset_minutes = -24 * 60;
        assert!(App::from_test_config(&config).is_err());
    }
}
