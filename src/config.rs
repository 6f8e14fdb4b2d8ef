use crate::error::{Result, TripError};
use crate::format::ClockFormatter;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub keybindings: KeybindingConfig,
    pub trip_source: TripSource,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minutes east of UTC used for dates and time ranges
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Length units covered by one terminal row
    pub units_per_row: f64,
    pub show_route_markers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: char,
    pub focus_search: char,
    pub toggle_star: char,
    pub expand: char,
    pub collapse: char,
    pub reload: char,
}

/// Where trips are loaded from at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripSource {
    #[default]
    Mock,
    File(PathBuf),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            units_per_row: 16.0,
            show_route_markers: true,
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            focus_search: '/',
            toggle_star: 's',
            expand: 'k',
            collapse: 'j',
            reload: 'r',
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_json::from_str(&content)?;
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn time_offset(&self) -> Result<FixedOffset> {
        let minutes = self.display.utc_offset_minutes;
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| TripError::from(format!("UTC offset of {} minutes is out of range", minutes)))
    }

    /// System-clock formatter in the configured offset
    pub fn formatter(&self) -> Result<ClockFormatter> {
        Ok(ClockFormatter::system().with_offset(self.time_offset()?))
    }

    /// Length units represented by `rows` terminal rows
    pub fn rows_to_units(&self, rows: f64) -> f64 {
        rows * self.layout.units_per_row.max(1.0)
    }

    /// Terminal rows needed to show `units`, rounded to the nearest row
    pub fn units_to_rows(&self, units: f64) -> u16 {
        let rows = (units / self.layout.units_per_row.max(1.0)).round();
        rows.clamp(0.0, u16::MAX as f64) as u16
    }
}
