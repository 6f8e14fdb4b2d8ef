use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;

use crate::{app::App, config::Config, error::Result, test_config::TestConfig, ui};

pub fn generate_screenshot(
    snapshot_path: &str,
    config: &Config,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<()> {
    // Load the state snapshot
    let snapshot = TestConfig::load_from_file(snapshot_path)?;
    write_screenshot(&snapshot, config, output_path, width, height)
}

pub fn write_screenshot(
    snapshot: &TestConfig,
    config: &Config,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<()> {
    let screenshot = render_to_string(snapshot, config, width, height)?;

    // Output the screenshot
    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path);
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

/// Render a snapshot once into an off-screen buffer using `config`'s layout
pub fn render_to_string(snapshot: &TestConfig, config: &Config, width: u16, height: u16) -> Result<String> {
    let mut app = App::from_test_config(snapshot)?;

    // Create TestBackend with specified dimensions
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, &mut app, config);
    })?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let cell = &buffer[(x, y)];
            let sym = cell.symbol();

            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
