use crate::detent::{show_last_trip_row, Detent, DetentEvent, DetentMachine, DRAG_THRESHOLD};
use crate::error::{Result, TripError};
use crate::format::ClockFormatter;
use crate::persistence::{NoopPersistence, StarPersistence};
use crate::search;
use crate::selection::Selection;
use crate::store::TripStore;
use crate::trip::{Trip, TripId};

/// Translation used when the panel is moved from the keyboard
pub const KEYBOARD_DRAG: f64 = DRAG_THRESHOLD * 2.0;

/// Container height assumed until the first layout pass reports one
const DEFAULT_CONTAINER_HEIGHT: f64 = 640.0;

/// Trip collection controller.
///
/// Owns the trips and every piece of interaction state around them. All
/// mutations happen synchronously, so a star toggle is visible to search and
/// selection as soon as the call returns.
pub struct App {
    store: TripStore,
    selection: Selection,
    detent: DetentMachine,
    formatter: ClockFormatter,
    persistence: Box<dyn StarPersistence>,

    search_query: String,
    search_focused: bool,
    list_cursor: usize,
    detail_request: Option<TripId>,
    container_height: f64,

    pub status_message: String,
    pub is_loading: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(trips: Vec<Trip>) -> Result<Self> {
        Self::with_formatter(trips, ClockFormatter::system())
    }

    pub fn with_formatter(trips: Vec<Trip>, formatter: ClockFormatter) -> Result<Self> {
        let selection = Selection::from_first(&trips).ok_or(TripError::EmptyCollection)?;
        let mut store = TripStore::new();
        store.load(trips);

        Ok(Self {
            store,
            selection,
            detent: DetentMachine::new(),
            formatter,
            persistence: Box::new(NoopPersistence),
            search_query: String::new(),
            search_focused: false,
            list_cursor: 0,
            detail_request: None,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            status_message: "Ready".to_string(),
            is_loading: false,
            should_quit: false,
        })
    }

    pub fn with_persistence(mut self, persistence: Box<dyn StarPersistence>) -> Self {
        self.persistence = persistence;
        self
    }

    /// Replace the trip collection, keeping the selection when it still exists
    pub fn load_trips(&mut self, trips: Vec<Trip>) -> Result<()> {
        let fallback = Selection::from_first(&trips).ok_or(TripError::EmptyCollection)?;
        let kept = trips.iter().find(|t| t.id == self.selection.id()).cloned();
        self.store.load(trips);
        self.selection = kept.map(Selection::new).unwrap_or(fallback);
        self.clamp_cursor();
        Ok(())
    }

    pub fn trips(&self) -> &[Trip] {
        self.store.all()
    }

    pub fn formatter(&self) -> &ClockFormatter {
        &self.formatter
    }

    /// Trips matching the current search query
    pub fn filtered_trips(&self) -> Vec<&Trip> {
        search::filter(self.store.all(), &self.search_query, &self.formatter)
    }

    pub fn selected(&self) -> &Trip {
        self.selection.current()
    }

    pub fn select(&mut self, trip: Trip) {
        self.selection.select(trip);
    }

    // Starring

    pub fn toggle_star(&mut self, id: TripId) -> Result<Trip> {
        let updated = self.store.toggle_star(id)?;
        self.selection.on_store_mutation(&updated);

        if let Err(e) = self.persistence.star_changed(&updated) {
            log::warn!("Failed to persist star for trip {}: {}", id, e);
        }

        self.status_message = if updated.is_starred {
            format!("Starred {}", crate::presentation::title(&updated))
        } else {
            format!("Unstarred {}", crate::presentation::title(&updated))
        };
        Ok(updated)
    }

    pub fn toggle_star_at_cursor(&mut self) -> Result<Trip> {
        let id = self
            .trip_at_cursor()
            .map(|trip| trip.id)
            .ok_or_else(|| TripError::from("No trip under the cursor"))?;
        self.toggle_star(id)
    }

    /// Star the trip the user is looking at: the open detail, the row under
    /// the cursor when expanded, or the last-trip summary when collapsed
    pub fn toggle_star_in_view(&mut self) -> Result<Trip> {
        if let Some(id) = self.detail_request {
            return self.toggle_star(id);
        }
        if self.detent.detent().is_collapsed() {
            let id = self.selection.id();
            return self.toggle_star(id);
        }
        self.toggle_star_at_cursor()
    }

    // List rows

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn set_list_cursor(&mut self, index: usize) {
        self.list_cursor = index;
        self.clamp_cursor();
    }

    pub fn trip_at_cursor(&self) -> Option<&Trip> {
        self.filtered_trips().get(self.list_cursor).copied()
    }

    pub fn cursor_up(&mut self) -> bool {
        if self.list_cursor == 0 {
            return false;
        }
        self.list_cursor -= 1;
        true
    }

    pub fn cursor_down(&mut self) -> bool {
        if self.list_cursor + 1 >= self.filtered_trips().len() {
            return false;
        }
        self.list_cursor += 1;
        true
    }

    fn clamp_cursor(&mut self) {
        let count = self.filtered_trips().len();
        self.list_cursor = self.list_cursor.min(count.saturating_sub(1));
    }

    /// Tap on a list row: select the trip and ask for its detail screen
    pub fn tap_row(&mut self, index: usize) -> Result<()> {
        let trip = self
            .filtered_trips()
            .get(index)
            .map(|trip| (*trip).clone())
            .ok_or_else(|| TripError::from(format!("No row at index {}", index)))?;

        self.list_cursor = index;
        self.detail_request = Some(trip.id);
        self.status_message = format!("Viewing {}", crate::presentation::title(&trip));
        self.selection.select(trip);
        Ok(())
    }

    /// Tap on the last-trip summary row
    pub fn tap_last_trip(&mut self) {
        self.detail_request = Some(self.selection.id());
    }

    // Detail navigation

    /// Trip whose detail screen has been requested
    pub fn detail_request(&self) -> Option<&Trip> {
        self.detail_request.and_then(|id| self.store.get(id))
    }

    pub fn close_detail(&mut self) -> bool {
        self.detail_request.take().is_some()
    }

    // Search

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    /// Focus the search field; it only exists while the panel is expanded
    pub fn focus_search(&mut self) -> bool {
        if self.detent.detent().is_collapsed() {
            self.status_message = "Expand the panel to search".to_string();
            return false;
        }
        self.search_focused = true;
        true
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.list_cursor = 0;
        self.clamp_cursor();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.search_query);
        query.push(c);
        self.set_search_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = std::mem::take(&mut self.search_query);
        query.pop();
        self.set_search_query(query);
    }

    // Panel

    pub fn detent(&self) -> Detent {
        self.detent.detent()
    }

    pub fn drag_changed(&mut self, translation: f64) {
        self.detent.handle_event(DetentEvent::DragChanged(translation));
    }

    pub fn drag_cancelled(&mut self) {
        self.detent.handle_event(DetentEvent::DragCancelled);
    }

    /// Finish a drag gesture; returns whether the detent changed
    pub fn drag_ended(&mut self, translation: f64) -> bool {
        let changed = self.detent.handle_event(DetentEvent::DragEnded(translation));
        if changed {
            if self.detent.detent().is_collapsed() {
                // The search field is not shown while collapsed
                self.search_focused = false;
            }
            self.status_message = format!("Panel {:?}", self.detent.detent()).to_lowercase();
        }
        changed
    }

    pub fn expand_panel(&mut self) -> bool {
        self.drag_ended(-KEYBOARD_DRAG)
    }

    pub fn collapse_panel(&mut self) -> bool {
        self.drag_ended(KEYBOARD_DRAG)
    }

    pub fn is_dragging(&self) -> bool {
        self.detent.is_dragging()
    }

    pub fn set_container_height(&mut self, height: f64) {
        self.container_height = height;
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn panel_height(&self) -> f64 {
        self.panel_height_for(self.container_height)
    }

    pub fn panel_height_for(&self, container_height: f64) -> f64 {
        self.detent.rendered_height(container_height)
    }

    pub fn map_accepts_touches(&self) -> bool {
        self.detent.map_accepts_touches()
    }

    pub fn show_last_trip_row(&self) -> bool {
        show_last_trip_row(self.detent.detent(), self.search_focused)
    }

    /// Restore interaction state, e.g. from a saved snapshot
    pub(crate) fn restore_view_state(
        &mut self,
        detent: Detent,
        search_query: String,
        search_focused: bool,
        list_cursor: usize,
        detail_request: Option<TripId>,
    ) {
        self.detent = DetentMachine::with_detent(detent);
        self.search_query = search_query;
        self.search_focused = search_focused && !detent.is_collapsed();
        self.list_cursor = list_cursor;
        self.clamp_cursor();
        self.detail_request = detail_request.filter(|id| self.store.get(*id).is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MockStarPersistence;
    use crate::trip::mock_trips;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn test_app() -> App {
        let now = Utc.with_ymd_and_hms(2026, 1, 26, 9, 30, 0).unwrap();
        App::with_formatter(mock_trips(now), ClockFormatter::pinned(now)).unwrap()
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        assert!(matches!(App::new(Vec::new()), Err(TripError::EmptyCollection)));
    }

    #[test]
    fn test_initial_state() {
        let app = test_app();
        assert_eq!(app.selected().id, app.trips()[0].id);
        assert_eq!(app.detent(), Detent::Collapsed);
        assert!(app.map_accepts_touches());
        assert!(app.show_last_trip_row());
        assert_eq!(app.filtered_trips().len(), 4);
        assert!(app.detail_request().is_none());
    }

    #[test]
    fn test_star_selected_trip_updates_selection() {
        let mut app = test_app();
        let id = app.selected().id;

        let updated = app.toggle_star(id).unwrap();
        assert!(updated.is_starred);
        assert!(app.selected().is_starred);

        app.toggle_star(id).unwrap();
        assert!(!app.selected().is_starred);
    }

    #[test]
    fn test_star_unknown_id_leaves_state_untouched() {
        let mut app = test_app();
        let before = app.trips().to_vec();
        assert_matches!(app.toggle_star(TripId::new()), Err(TripError::NotFound(_)));
        assert_eq!(app.trips(), before.as_slice());
    }

    #[test]
    fn test_star_notifies_persistence() {
        let mut persistence = MockStarPersistence::new();
        persistence
            .expect_star_changed()
            .withf(|trip| trip.is_starred)
            .times(1)
            .returning(|_| Ok(()));

        let mut app = test_app().with_persistence(Box::new(persistence));
        let id = app.trips()[1].id;
        app.toggle_star(id).unwrap();
    }

    #[test]
    fn test_persistence_failure_keeps_toggle() {
        let mut persistence = MockStarPersistence::new();
        persistence
            .expect_star_changed()
            .returning(|_| Err(TripError::from("store offline")));

        let mut app = test_app().with_persistence(Box::new(persistence));
        let id = app.trips()[2].id;
        let updated = app.toggle_star(id).unwrap();
        assert!(updated.is_starred);
        assert!(app.trips()[2].is_starred);
    }

    #[test]
    fn test_search_resets_cursor_and_filters() {
        let mut app = test_app();
        app.set_list_cursor(3);
        for c in "southport".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.list_cursor(), 0);
        assert_eq!(app.filtered_trips().len(), 2);

        app.cursor_down();
        assert_eq!(app.trip_at_cursor().unwrap().start_location_name, "Arundel");
        assert!(!app.cursor_down());

        app.pop_search_char();
        assert_eq!(app.search_query(), "southpor");
    }

    #[test]
    fn test_tap_row_selects_and_requests_detail() {
        let mut app = test_app();
        app.set_search_query("ashmore");
        app.tap_row(0).unwrap();

        assert_eq!(app.selected().end_location_name, "Ashmore");
        assert_eq!(app.detail_request().unwrap().id, app.selected().id);
        assert!(app.close_detail());
        assert!(app.detail_request().is_none());
        assert!(!app.close_detail());
    }

    #[test]
    fn test_tap_row_out_of_range() {
        let mut app = test_app();
        app.set_search_query("nowhere");
        assert!(app.tap_row(0).is_err());
        assert!(app.detail_request().is_none());
    }

    #[test]
    fn test_detail_reflects_star_toggle() {
        let mut app = test_app();
        app.tap_last_trip();
        let id = app.selected().id;
        app.toggle_star(id).unwrap();
        assert!(app.detail_request().unwrap().is_starred);
    }

    #[test]
    fn test_search_focus_requires_expanded_panel() {
        let mut app = test_app();
        assert!(!app.focus_search());
        assert!(!app.is_search_focused());

        assert!(app.expand_panel());
        assert!(app.focus_search());
        assert!(!app.show_last_trip_row());
        assert!(!app.map_accepts_touches());

        assert!(app.collapse_panel());
        assert!(!app.is_search_focused());
        assert!(app.show_last_trip_row());
    }

    #[test]
    fn test_panel_height_uses_container() {
        let mut app = test_app();
        app.set_container_height(1000.0);
        assert_eq!(app.panel_height(), 120.0);
        app.expand_panel();
        assert_eq!(app.panel_height(), 750.0);
    }

    #[test]
    fn test_reload_keeps_existing_selection() {
        let mut app = test_app();
        let trips = app.trips().to_vec();
        app.select(trips[2].clone());

        app.load_trips(trips.clone()).unwrap();
        assert_eq!(app.selected().id, trips[2].id);

        let replacement = mock_trips(Utc::now());
        let first = replacement[0].id;
        app.load_trips(replacement).unwrap();
        assert_eq!(app.selected().id, first);
    }
}
