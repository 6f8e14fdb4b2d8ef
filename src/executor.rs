use crate::{app::App, command::Command, error::Result, test_config::TestConfig};

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub config: TestConfig,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

/// Executes commands against applications and saved snapshots
pub struct Executor;

impl Executor {
    /// Execute a command against a configuration and return the resulting state
    pub fn execute(config: &TestConfig, command: Command) -> Result<ExecutionResult> {
        let mut app = App::from_test_config(config)?;
        let status_message = Self::apply(&mut app, command);

        // Update the final status message if one was set
        if let Some(msg) = &status_message {
            app.status_message = msg.clone();
        }

        Ok(ExecutionResult {
            config: TestConfig::from_app(&app),
            status_message,
            should_quit: app.should_quit,
        })
    }

    /// Apply a command to a live application, returning a status line
    pub fn apply(app: &mut App, command: Command) -> Option<String> {
        match command {
            Command::Quit => {
                app.should_quit = true;
                Some("Goodbye!".to_string())
            }

            Command::Drag(translation) => {
                if app.drag_ended(translation) {
                    Some(format!("Panel {:?}", app.detent()))
                } else {
                    Some("Panel unchanged".to_string())
                }
            }

            Command::ExpandPanel => app
                .expand_panel()
                .then(|| "Panel expanded".to_string()),

            Command::CollapsePanel => app
                .collapse_panel()
                .then(|| "Panel collapsed".to_string()),

            Command::FocusSearch => {
                if app.focus_search() {
                    Some("Search focused".to_string())
                } else {
                    Some(app.status_message.clone())
                }
            }

            Command::BlurSearch => {
                app.blur_search();
                None
            }

            Command::SearchInput(ch) => {
                if app.is_search_focused() {
                    app.push_search_char(ch);
                    Some(Self::search_status(app))
                } else {
                    None
                }
            }

            Command::SearchBackspace => {
                if app.is_search_focused() {
                    app.pop_search_char();
                    Some(Self::search_status(app))
                } else {
                    None
                }
            }

            Command::ClearSearch => {
                app.set_search_query(String::new());
                Some(Self::search_status(app))
            }

            Command::CursorUp => {
                app.cursor_up();
                None
            }

            Command::CursorDown => {
                app.cursor_down();
                None
            }

            Command::OpenRow => {
                let cursor = app.list_cursor();
                match app.tap_row(cursor) {
                    Ok(()) => Some(app.status_message.clone()),
                    Err(e) => Some(e.to_string()),
                }
            }

            Command::OpenLastTrip => {
                app.tap_last_trip();
                Some(format!(
                    "Viewing {}",
                    crate::presentation::title(app.selected())
                ))
            }

            Command::ToggleStar => match app.toggle_star_in_view() {
                Ok(_) => Some(app.status_message.clone()),
                Err(e) => Some(e.to_string()),
            },

            Command::CloseDetail => app.close_detail().then(|| "Detail closed".to_string()),

            Command::Sequence(commands) => {
                let mut status_message = None;
                for cmd in commands {
                    if let Some(msg) = Self::apply(app, cmd) {
                        status_message = Some(msg);
                    }
                    if app.should_quit {
                        break;
                    }
                }
                status_message
            }
        }
    }

    fn search_status(app: &App) -> String {
        format!(
            "Search: {} ({} trips)",
            app.search_query(),
            app.filtered_trips().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detent::Detent;

    #[test]
    fn test_drag_threshold_through_executor() {
        let config = TestConfig::default();

        let result = Executor::execute(&config, Command::Drag(-80.0)).unwrap();
        assert_eq!(result.config.detent, Detent::Collapsed);
        assert_eq!(result.status_message.as_deref(), Some("Panel unchanged"));

        let result = Executor::execute(&config, Command::Drag(-81.0)).unwrap();
        assert_eq!(result.config.detent, Detent::Expanded);
    }

    #[test]
    fn test_search_sequence() {
        let config = TestConfig::default();
        let command = Command::from_string(
            "sequence:[expand,focus_search,search:s,search:o,search:u,search:t,search:h]",
        )
        .unwrap();

        let result = Executor::execute(&config, command).unwrap();
        assert_eq!(result.config.search_query, "south");
        assert!(result.config.search_focused);
        assert_eq!(result.status_message.as_deref(), Some("Search: south (2 trips)"));
        assert_eq!(result.config.status_message, "Search: south (2 trips)");
    }

    #[test]
    fn test_typing_without_focus_is_ignored() {
        let config = TestConfig::default();
        let result = Executor::execute(&config, Command::SearchInput('x')).unwrap();
        assert_eq!(result.config.search_query, "");
    }

    #[test]
    fn test_star_and_open_row() {
        let config = TestConfig::default();
        let command = Command::Sequence(vec![
            Command::ExpandPanel,
            Command::CursorDown,
            Command::ToggleStar,
            Command::OpenRow,
        ]);

        let result = Executor::execute(&config, command).unwrap();
        assert!(result.config.trips[1].is_starred);
        assert_eq!(result.config.selected_trip_id, Some(config.trips[1].id));
        assert_eq!(result.config.detail_trip_id, Some(config.trips[1].id));
    }

    #[test]
    fn test_quit_stops_sequence() {
        let config = TestConfig::default();
        let command = Command::Sequence(vec![Command::Quit, Command::ExpandPanel]);

        let result = Executor::execute(&config, command).unwrap();
        assert!(result.should_quit);
        assert_eq!(result.config.detent, Detent::Collapsed);
        assert_eq!(result.status_message.as_deref(), Some("Goodbye!"));
    }

    #[test]
    fn test_collapsed_star_targets_selected_trip() {
        let mut config = TestConfig::default();
        config.selected_trip_id = Some(config.trips[3].id);
        config.list_cursor = 0;

        let result = Executor::execute(&config, Command::ToggleStar).unwrap();
        assert!(result.config.trips[3].is_starred);
        assert!(!result.config.trips[0].is_starred);
        assert_eq!(result.config.status_message, "Starred Arundel → Southport");
    }

    #[test]
    fn test_star_with_detail_open_targets_detail_trip() {
        let mut config = TestConfig::default();
        config.detent = Detent::Expanded;
        config.list_cursor = 0;
        config.detail_trip_id = Some(config.trips[2].id);

        let result = Executor::execute(&config, Command::ToggleStar).unwrap();
        assert!(result.config.trips[2].is_starred);
        assert!(!result.config.trips[0].is_starred);
    }
}
