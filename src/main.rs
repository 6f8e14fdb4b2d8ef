use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc;

use trip_browser::app::App;
use trip_browser::async_task::{self, Task, TaskResult};
use trip_browser::cli::{Cli, Commands};
use trip_browser::config::{Config, TripSource};
use trip_browser::error::Result;
use trip_browser::event::{self, InputState};
use trip_browser::{main_lib, screenshot, ui};

fn init_logging(verbose: bool) {
    // Logging goes to a file when TRIP_BROWSER_LOG is set, otherwise stderr with --verbose
    if let Ok(log_file) = std::env::var("TRIP_BROWSER_LOG") {
        match std::fs::OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                env_logger::Builder::new()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .filter_level(log::LevelFilter::Debug)
                    .init();
                log::info!("Trip browser starting up");
            }
            Err(e) => eprintln!("Failed to open log file {}: {}", log_file, e),
        }
    } else if verbose {
        env_logger::Builder::new().filter_level(log::LevelFilter::Debug).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.app_config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { trips: None }) {
        Commands::Run { trips } => {
            if let Some(path) = trips {
                config.trip_source = TripSource::File(path);
            }
            run_interactive(config).await
        }
        Commands::Screenshot {
            config: snapshot,
            output,
            width,
            height,
        } => screenshot::generate_screenshot(&snapshot, &config, output.as_deref(), width, height),
        Commands::Execute {
            config: snapshot,
            command,
            output,
            screenshot,
            width,
            height,
        } => main_lib::execute_command(&snapshot, &config, &command, output.as_deref(), screenshot, width, height),
        Commands::SaveState { output, trips } => {
            if let Some(path) = trips {
                config.trip_source = TripSource::File(path);
            }
            main_lib::save_current_state(output.as_deref(), &config).await
        }
    }
}

async fn run_interactive(config: Config) -> Result<()> {
    // The panel needs a non-empty collection before the first frame
    log::info!("Loading trips from {:?}", config.trip_source);
    let trips = async_task::load_trips(&config.trip_source).await?;
    let mut app = App::with_formatter(trips, config.formatter()?)?;
    app.status_message = format!("Loaded {} trips", app.trips().len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup async task channels
    let (task_sender, task_receiver) = mpsc::channel::<Task>(32);
    let (result_sender, mut result_receiver) = mpsc::channel::<TaskResult>(32);
    let worker_handle = tokio::spawn(async_task::run_worker(task_receiver, result_sender));

    let mut input = InputState::new();
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui::draw(f, &mut app, &config))?;

        if crossterm::event::poll(tick_rate)? {
            let event = crossterm::event::read()?;
            let size = terminal.size()?;
            let screen = ratatui::layout::Rect::new(0, 0, size.width, size.height);
            if let Err(e) = event::handle_event(event, &mut app, &mut input, &config, screen, &task_sender) {
                log::warn!("event handling failed: {}", e);
                app.status_message = main_lib::error_status(&e);
            }
        }

        while let Ok(result) = result_receiver.try_recv() {
            main_lib::handle_task_result(&mut app, result);
        }

        if app.should_quit {
            break;
        }
    }

    worker_handle.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableFocusChange)?;
    terminal.show_cursor()?;

    Ok(())
}
