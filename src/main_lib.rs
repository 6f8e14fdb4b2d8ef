// Library module containing testable functions from main.rs

use crate::app::App;
use crate::async_task::TaskResult;
use crate::config::Config;
use crate::error::{Result, TripError};
use std::fs;

/// Status line shown for a failed operation
pub fn error_status(error: &TripError) -> String {
    format!("Error: {}", error)
}

pub fn handle_task_result(app: &mut App, result: TaskResult) {
    app.is_loading = false;

    match result {
        TaskResult::TripsLoaded { trips } => {
            let count = trips.len();
            app.status_message = match app.load_trips(trips) {
                Ok(()) => format!("Loaded {} trips", count),
                Err(e) => error_status(&e),
            };
        }
        TaskResult::Error { message } => {
            log::error!("worker error: {}", message);
            app.status_message = format!("Error: {}", message);
        }
    }
}

pub fn execute_command(
    snapshot_path: &str,
    config: &Config,
    command_str: &str,
    output_path: Option<&str>,
    generate_screenshot: bool,
    width: u16,
    height: u16,
) -> Result<()> {
    // Load the state snapshot
    let snapshot = crate::test_config::TestConfig::load_from_file(snapshot_path)?;

    // Parse the command
    let command = crate::command::Command::from_string(command_str).map_err(TripError::Command)?;

    // Execute the command
    let result = crate::executor::Executor::execute(&snapshot, command)?;

    // Convert result to JSON
    let result_json = serde_json::to_string_pretty(&result.config)?;

    // Output the result
    match output_path {
        Some(path) => {
            fs::write(path, &result_json)?;
            println!("Result saved to: {}", path);
        }
        None => {
            println!("{}", result_json);
        }
    }

    // Show execution summary
    if let Some(status) = result.status_message {
        eprintln!("Status: {}", status);
    }
    if result.should_quit {
        eprintln!("Command resulted in quit");
    }

    // Generate screenshot if requested
    if generate_screenshot {
        let screenshot_path = output_path
            .map(|p| format!("{}.screenshot.txt", p.trim_end_matches(".json")))
            .unwrap_or_else(|| "command_result_screenshot.txt".to_string());

        crate::screenshot::write_screenshot(&result.config, config, Some(&screenshot_path), width, height)?;
        eprintln!("Screenshot saved to: {}", screenshot_path);
    }

    Ok(())
}

pub async fn save_current_state(output_path: Option<&str>, config: &Config) -> Result<()> {
    let trips = crate::async_task::load_trips(&config.trip_source).await?;
    let mut app = App::with_formatter(trips, config.formatter()?)?;
    app.status_message = format!("Loaded {} trips", app.trips().len());

    // Convert app state to TestConfig format
    let snapshot = crate::test_config::TestConfig::from_app(&app);

    // Convert to JSON
    let config_json = serde_json::to_string_pretty(&snapshot)?;

    // Output the result
    match output_path {
        Some(path) => {
            fs::write(path, &config_json)?;
            println!("Current state saved to: {}", path);
        }
        None => {
            println!("{}", config_json);
        }
    }

    Ok(())
}
