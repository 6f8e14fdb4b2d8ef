pub mod app;
pub mod async_task;
pub mod cli;
pub mod command;
pub mod config;
pub mod detent;
pub mod error;
pub mod event;
pub mod executor;
pub mod format;
pub mod main_lib;
pub mod persistence;
pub mod presentation;
pub mod screenshot;
pub mod search;
pub mod selection;
pub mod store;
pub mod test_config;
pub mod theme;
pub mod trip;
pub mod ui;
