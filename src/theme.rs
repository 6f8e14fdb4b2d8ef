use ratatui::style::Color;

/// Theme data structure containing all colors used in the application
#[derive(Debug, Clone)]
pub struct Theme {
    // Map
    pub map_border: Color,
    pub map_border_locked: Color,
    pub route: Color,
    pub start_marker: Color,
    pub end_marker: Color,

    // Bottom panel
    pub panel_border: Color,
    pub panel_border_dragging: Color,
    pub drag_handle: Color,
    pub section_title: Color,

    // Trip rows
    pub trip_title: Color,
    pub trip_meta: Color,
    pub row_selected_bg: Color,
    pub row_selected_fg: Color,
    pub star_on: Color,
    pub star_off: Color,

    // Search field
    pub search_focused: Color,
    pub search_idle: Color,
    pub empty_results: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Map
            map_border: Color::DarkGray,
            map_border_locked: Color::Red,
            route: Color::White,
            start_marker: Color::Green,
            end_marker: Color::Red,

            // Bottom panel
            panel_border: Color::Gray,
            panel_border_dragging: Color::Yellow,
            drag_handle: Color::DarkGray,
            section_title: Color::Gray,

            // Trip rows
            trip_title: Color::Reset,
            trip_meta: Color::Gray,
            row_selected_bg: Color::White,
            row_selected_fg: Color::Black,
            star_on: Color::Yellow,
            star_off: Color::DarkGray,

            // Search field
            search_focused: Color::Yellow,
            search_idle: Color::DarkGray,
            empty_results: Color::Gray,

            // Status bar
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_help_text: Color::Gray,
        }
    }
}

/// Get the current theme
pub fn get_theme() -> Theme {
    Theme::default()
}
