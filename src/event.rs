use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::app::App;
use crate::async_task::Task;
use crate::config::Config;
use crate::error::Result;
use crate::ui;

/// Pointer state carried between terminal events
#[derive(Debug, Default, Clone)]
pub struct InputState {
    drag_origin: Option<u16>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Abandon a pointer drag in flight; the panel snaps back to its detent
    pub fn cancel_drag(&mut self, app: &mut App) {
        if self.drag_origin.take().is_some() || app.is_dragging() {
            app.drag_cancelled();
        }
    }
}

pub fn handle_event(
    event: Event,
    app: &mut App,
    input: &mut InputState,
    config: &Config,
    screen: Rect,
    async_sender: &mpsc::Sender<Task>,
) -> Result<()> {
    match event {
        Event::Key(key) => {
            if key.code == KeyCode::Esc || (!app.is_search_focused() && is_detent_key(key.code, config)) {
                input.cancel_drag(app);
            }
            handle_key_event(app, key, config, async_sender)
        }
        Event::Mouse(mouse) => handle_mouse_event(app, input, mouse, config, screen),
        Event::FocusLost => {
            input.cancel_drag(app);
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
        _ => Ok(()),
    }
}

fn is_detent_key(code: KeyCode, config: &Config) -> bool {
    let keys = &config.keybindings;
    match code {
        KeyCode::PageUp | KeyCode::PageDown => true,
        KeyCode::Char(c) => c == keys.expand || c == keys.collapse,
        _ => false,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent, config: &Config, async_sender: &mpsc::Sender<Task>) -> Result<()> {
    let keys = &config.keybindings;

    if app.detail_request().is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                app.close_detail();
            }
            KeyCode::Char(c) if c == keys.toggle_star => {
                app.toggle_star_in_view()?;
            }
            KeyCode::Char(c) if c == keys.quit => app.should_quit = true,
            _ => {}
        }
        return Ok(());
    }

    if app.is_search_focused() {
        match key.code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Esc => app.blur_search(),
            KeyCode::Up => {
                app.cursor_up();
            }
            KeyCode::Down => {
                app.cursor_down();
            }
            KeyCode::Enter => {
                if let Err(e) = app.tap_row(app.list_cursor()) {
                    app.status_message = e.to_string();
                }
            }
            _ => {}
        }
        return Ok(());
    }

    let expanded = !app.detent().is_collapsed();
    match key.code {
        KeyCode::Char(c) if c == keys.quit => {
            app.should_quit = true;
        }
        KeyCode::Char(c) if c == keys.focus_search => {
            app.focus_search();
        }
        KeyCode::Char(c) if c == keys.expand => {
            app.expand_panel();
        }
        KeyCode::PageUp => {
            app.expand_panel();
        }
        KeyCode::Char(c) if c == keys.collapse => {
            app.collapse_panel();
        }
        KeyCode::PageDown => {
            app.collapse_panel();
        }
        KeyCode::Char(c) if c == keys.toggle_star => {
            app.toggle_star_in_view()?;
        }
        KeyCode::Char(c) if c == keys.reload => {
            request_reload(app, config, async_sender);
        }
        KeyCode::Up if expanded => {
            app.cursor_up();
        }
        KeyCode::Down if expanded => {
            app.cursor_down();
        }
        KeyCode::Enter => {
            if expanded {
                app.tap_row(app.list_cursor())?;
            } else {
                app.tap_last_trip();
            }
        }
        KeyCode::Esc => {
            if !app.search_query().is_empty() {
                app.set_search_query(String::new());
            }
        }
        _ => {}
    }

    Ok(())
}

fn request_reload(app: &mut App, config: &Config, async_sender: &mpsc::Sender<Task>) {
    let task = Task::LoadTrips {
        source: config.trip_source.clone(),
    };

    app.is_loading = true;
    app.status_message = "Reloading trips...".to_string();

    if let Err(e) = async_sender.try_send(task) {
        app.is_loading = false;
        app.status_message = format!("Failed to start reload: {}", e);
    }
}

fn contains(rect: Option<Rect>, column: u16, row: u16) -> bool {
    rect.is_some_and(|r| r.contains(Position::new(column, row)))
}

fn handle_mouse_event(app: &mut App, input: &mut InputState, mouse: MouseEvent, config: &Config, screen: Rect) -> Result<()> {
    let layout = ui::screen_layout(screen, app, config);
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.detail_request().is_some() {
                app.close_detail();
                return Ok(());
            }

            if row == layout.panel.y && contains(Some(layout.panel), column, row) {
                // Grabbed the panel by its handle
                input.drag_origin = Some(row);
                app.drag_changed(0.0);
                return Ok(());
            }

            let sections = ui::panel_sections(layout.panel, app);
            if contains(sections.last_trip, column, row) {
                app.tap_last_trip();
            } else if contains(sections.search, column, row) {
                app.focus_search();
            } else if let Some(index) = ui::list_row_at(layout.panel, app, row) {
                if contains(sections.list, column, row) {
                    app.tap_row(index)?;
                }
            } else if contains(Some(layout.map), column, row) {
                if app.map_accepts_touches() {
                    app.blur_search();
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(origin) = input.drag_origin {
                app.drag_changed(config.rows_to_units(row as f64 - origin as f64));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(origin) = input.drag_origin.take() {
                app.drag_ended(config.rows_to_units(row as f64 - origin as f64));
            }
        }
        MouseEventKind::ScrollUp => {
            if contains(Some(layout.panel), column, row) {
                app.cursor_up();
            }
        }
        MouseEventKind::ScrollDown => {
            if contains(Some(layout.panel), column, row) {
                app.cursor_down();
            }
        }
        _ => {}
    }

    Ok(())
}
