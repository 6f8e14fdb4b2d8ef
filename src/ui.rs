use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Clear, List, ListItem, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::config::Config;
use crate::format::TimeFormatter;
use crate::presentation::{self, route_bounds, route_markers};
use crate::theme::{get_theme, Theme};
use crate::trip::Trip;

/// Rows taken by one trip in the list
pub const ROW_HEIGHT: u16 = 2;

/// Smallest panel that still shows its border and one line
const MIN_PANEL_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub map: Rect,
    pub panel: Rect,
    pub status: Rect,
}

/// Areas inside the bottom panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSections {
    pub last_trip: Option<Rect>,
    pub search: Option<Rect>,
    pub list: Option<Rect>,
}

pub fn screen_layout(area: Rect, app: &App, config: &Config) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let body = chunks[0];

    let container = config.rows_to_units(body.height as f64);
    let panel_rows = config
        .units_to_rows(app.panel_height_for(container))
        .clamp(MIN_PANEL_ROWS.min(body.height), body.height);

    let panel = Rect {
        y: body.y + body.height - panel_rows,
        height: panel_rows,
        ..body
    };
    let map = Rect {
        height: body.height - panel_rows,
        ..body
    };

    ScreenLayout {
        map,
        panel,
        status: chunks[1],
    }
}

pub fn panel_sections(panel: Rect, app: &App) -> PanelSections {
    let inner = Block::default().borders(Borders::ALL).inner(panel);
    let mut sections = PanelSections::default();
    let mut y = inner.y;
    let bottom = inner.y + inner.height;

    let take = |rows: u16, y: &mut u16| -> Option<Rect> {
        if *y >= bottom {
            return None;
        }
        let height = rows.min(bottom - *y);
        let rect = Rect {
            y: *y,
            height,
            ..inner
        };
        *y += height;
        Some(rect)
    };

    let expanded = !app.detent().is_collapsed();

    if app.show_last_trip_row() {
        if expanded {
            // "Last Trip" heading
            take(1, &mut y);
        }
        sections.last_trip = take(ROW_HEIGHT, &mut y);
    }

    if expanded {
        // "Recent Trips" heading
        take(1, &mut y);
        sections.search = take(1, &mut y);
        if y < bottom {
            sections.list = take(bottom - y, &mut y);
        }
    }

    sections
}

/// First list index shown when the cursor must stay visible
pub fn list_offset(cursor: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || cursor < visible_rows {
        0
    } else {
        cursor + 1 - visible_rows
    }
}

/// List index under terminal row `y`, if any
pub fn list_row_at(panel: Rect, app: &App, y: u16) -> Option<usize> {
    let list = panel_sections(panel, app).list?;
    if y < list.y || y >= list.y + list.height {
        return None;
    }
    let visible = (list.height / ROW_HEIGHT) as usize;
    let index = list_offset(app.list_cursor(), visible) + ((y - list.y) / ROW_HEIGHT) as usize;
    (index < app.filtered_trips().len()).then_some(index)
}

pub fn draw(frame: &mut Frame, app: &mut App, config: &Config) {
    let theme = get_theme();
    let layout = screen_layout(frame.area(), app, config);
    app.set_container_height(config.rows_to_units((layout.map.height + layout.panel.height) as f64));

    draw_map(frame, app, config, &theme, layout.map);
    draw_panel(frame, app, &theme, layout.panel);
    draw_status_bar(frame, app, &theme, layout.status);

    let area = frame.area();
    if let Some(trip) = app.detail_request() {
        draw_trip_detail(frame, app, trip, &theme, area);
    }
}

fn draw_map(frame: &mut Frame, app: &App, config: &Config, theme: &Theme, area: Rect) {
    if area.height == 0 {
        return;
    }

    let trip = app.selected();
    let (title, border) = if app.map_accepts_touches() {
        (format!(" Map: {} ", presentation::title(trip)), theme.map_border)
    } else {
        (format!(" Map: {} (locked) ", presentation::title(trip)), theme.map_border_locked)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let Some(((lat_lo, lat_hi), (lon_lo, lon_hi))) = route_bounds(&trip.route) else {
        let paragraph = Paragraph::new("No route recorded")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.empty_results));
        frame.render_widget(paragraph, area);
        return;
    };

    let pad_lat = ((lat_hi - lat_lo) * 0.1).max(0.005);
    let pad_lon = ((lon_hi - lon_lo) * 0.1).max(0.005);
    let route = &trip.route;
    let markers = route_markers(route).filter(|_| config.layout.show_route_markers);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([lon_lo - pad_lon, lon_hi + pad_lon])
        .y_bounds([lat_lo - pad_lat, lat_hi + pad_lat])
        .paint(move |ctx| {
            for pair in route.windows(2) {
                ctx.draw(&CanvasLine::new(
                    pair[0].longitude,
                    pair[0].latitude,
                    pair[1].longitude,
                    pair[1].latitude,
                    theme.route,
                ));
            }
            if let Some(markers) = markers {
                ctx.layer();
                ctx.print(
                    markers.start.longitude,
                    markers.start.latitude,
                    Span::styled("●", Style::default().fg(theme.start_marker)),
                );
                ctx.print(
                    markers.end.longitude,
                    markers.end.latitude,
                    Span::styled("■", Style::default().fg(theme.end_marker)),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn trip_lines<'a>(trip: &Trip, app: &App, theme: &Theme, highlighted: bool) -> Vec<Line<'a>> {
    let (star, star_color) = if trip.is_starred {
        ("★", theme.star_on)
    } else {
        ("☆", theme.star_off)
    };
    let title_style = if highlighted {
        Style::default()
            .fg(theme.row_selected_fg)
            .bg(theme.row_selected_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.trip_title).add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{} ", star), Style::default().fg(star_color)),
            Span::styled(presentation::title(trip), title_style),
        ]),
        Line::from(Span::styled(
            format!("  {}", presentation::meta_line(trip, app.formatter())),
            Style::default().fg(theme.trip_meta),
        )),
    ]
}

fn draw_panel(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if area.height == 0 {
        return;
    }

    let border = if app.is_dragging() {
        theme.panel_border_dragging
    } else {
        theme.panel_border
    };
    let block = Block::default()
        .title(Span::styled("━━━━", Style::default().fg(theme.drag_handle)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let sections = panel_sections(area, app);
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let heading = Style::default().fg(theme.section_title).add_modifier(Modifier::BOLD);

    if let Some(row) = sections.last_trip {
        if !app.detent().is_collapsed() && row.y > inner.y {
            let title_area = Rect { y: row.y - 1, height: 1, ..row };
            frame.render_widget(Paragraph::new(Span::styled("Last Trip", heading)), title_area);
        }
        let lines = trip_lines(app.selected(), app, theme, false);
        frame.render_widget(Paragraph::new(lines), row);
    }

    if let Some(search) = sections.search {
        if search.y > inner.y {
            let title_area = Rect { y: search.y - 1, height: 1, ..search };
            frame.render_widget(Paragraph::new(Span::styled("Recent Trips", heading)), title_area);
        }

        let search_line = if app.is_search_focused() {
            Line::from(vec![
                Span::styled("⌕ ", Style::default().fg(theme.search_focused)),
                Span::raw(app.search_query().to_string()),
                Span::styled("▏", Style::default().fg(theme.search_focused)),
            ])
        } else if app.search_query().is_empty() {
            Line::from(vec![
                Span::styled("⌕ ", Style::default().fg(theme.search_idle)),
                Span::styled("Search Trips", Style::default().fg(theme.search_idle)),
            ])
        } else {
            Line::from(vec![
                Span::styled("⌕ ", Style::default().fg(theme.search_idle)),
                Span::raw(app.search_query().to_string()),
            ])
        };
        frame.render_widget(Paragraph::new(search_line), search);
    }

    if let Some(list_area) = sections.list {
        draw_trip_list(frame, app, theme, list_area);
    }
}

fn draw_trip_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let trips = app.filtered_trips();
    if trips.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled("No Results", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(format!("Check the spelling or try a new search for \"{}\".", app.search_query())),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.empty_results));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = (area.height / ROW_HEIGHT) as usize;
    let offset = list_offset(app.list_cursor(), visible);

    let items: Vec<ListItem> = trips
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(index, trip)| ListItem::new(trip_lines(trip, app, theme, index == app.list_cursor())))
        .collect();

    frame.render_widget(List::new(items), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let status_text = if app.is_loading {
        format!("Loading... | {}", app.status_message)
    } else {
        app.status_message.clone()
    };

    let help_text = if app.detail_request().is_some() {
        "Esc: Close detail | s: Star"
    } else if app.is_search_focused() {
        "Type to search | ↑↓: Navigate | Enter: Open | Esc: Done"
    } else if app.detent().is_collapsed() {
        "k/drag up: Expand | Enter: Last trip | q: Quit"
    } else {
        "j/drag down: Collapse | /: Search | ↑↓: Navigate | s: Star | Enter: Open | q: Quit"
    };

    let status_line = Line::from(vec![
        Span::styled(status_text, Style::default().fg(theme.status_bar_fg)),
        Span::raw(" | "),
        Span::styled(help_text, Style::default().fg(theme.status_help_text)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(theme.status_bar_bg));
    frame.render_widget(paragraph, area);
}

/// Rectangle of `percent_x` by `percent_y` centred in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_trip_detail(frame: &mut Frame, app: &App, trip: &Trip, theme: &Theme, area: Rect) {
    let popup = centered_rect(70, 60, area);
    let formatter = app.formatter();
    let star = if trip.is_starred { "★ Starred" } else { "☆ Not starred" };

    let lines = vec![
        Line::from(Span::styled(
            presentation::title(trip),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(star, Style::default().fg(if trip.is_starred { theme.star_on } else { theme.star_off }))),
        Line::from(""),
        Line::from(format!("Date:      {}", formatter.date_string(trip.start_date))),
        Line::from(format!(
            "Time:      {}",
            formatter.time_range_string(trip.start_date, trip.end_date)
        )),
        Line::from(format!("Distance:  {}", presentation::distance_label(trip))),
        Line::from(format!("Duration:  {}", presentation::duration_label(trip))),
        Line::from(format!("Ended:     {}", presentation::relative_time_label(trip, formatter))),
        Line::from(""),
        Line::from(format!("Hard braking:       {}", trip.hard_braking)),
        Line::from(format!("Hard acceleration:  {}", trip.hard_acceleration)),
        Line::from(format!("Sharp turns:        {}", trip.sharp_turns)),
        Line::from(format!("Route points:       {}", trip.route.len())),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Trip Detail ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.panel_border_dragging)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
