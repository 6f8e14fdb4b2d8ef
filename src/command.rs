use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents all possible user commands that can be executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // Global commands
    Quit,

    // Panel commands
    /// Drag released with the given vertical translation (negative is upward)
    Drag(f64),
    ExpandPanel,
    CollapsePanel,

    // Search commands
    FocusSearch,
    BlurSearch,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,

    // Trip list commands
    CursorUp,
    CursorDown,
    OpenRow,
    OpenLastTrip,
    ToggleStar,
    CloseDetail,

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "quit" | "q" => Ok(Command::Quit),

            "expand" | "expand_panel" => Ok(Command::ExpandPanel),
            "collapse" | "collapse_panel" => Ok(Command::CollapsePanel),

            "focus_search" | "/" => Ok(Command::FocusSearch),
            "blur_search" | "escape" => Ok(Command::BlurSearch),
            "search_backspace" | "backspace" => Ok(Command::SearchBackspace),
            "clear_search" => Ok(Command::ClearSearch),

            "cursor_up" | "up" => Ok(Command::CursorUp),
            "cursor_down" | "down" => Ok(Command::CursorDown),
            "open_row" | "enter" => Ok(Command::OpenRow),
            "open_last_trip" => Ok(Command::OpenLastTrip),
            "toggle_star" | "star" => Ok(Command::ToggleStar),
            "close_detail" => Ok(Command::CloseDetail),

            _ => {
                if let Some(amount) = strip_prefix_ignore_case(s, "drag:") {
                    return amount
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|t| t.is_finite())
                        .map(Command::Drag)
                        .ok_or_else(|| format!("Invalid drag translation: {}", amount));
                }

                // The typed character keeps its case
                if let Some(char_str) = strip_prefix_ignore_case(s, "search:") {
                    if let Some(ch) = char_str.chars().next() {
                        return Ok(Command::SearchInput(ch));
                    }
                }

                if let Some(inner) = strip_prefix_ignore_case(s, "sequence:[").and_then(|rest| rest.strip_suffix(']')) {
                    // Parse sequence: sequence:[cmd1,cmd2,cmd3]
                    if inner.is_empty() {
                        return Ok(Command::Sequence(vec![]));
                    }

                    let mut commands = Vec::new();
                    for cmd_str in inner.split(',') {
                        let cmd_str = cmd_str.trim();
                        match Command::from_string(cmd_str) {
                            Ok(cmd) => commands.push(cmd),
                            Err(e) => {
                                return Err(format!(
                                    "Invalid command in sequence '{}': {}",
                                    cmd_str, e
                                ))
                            }
                        }
                    }

                    return Ok(Command::Sequence(commands));
                }

                Err(format!("Unknown command: {}", s))
            }
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Quit => write!(f, "quit"),

            Command::Drag(translation) => write!(f, "drag:{}", translation),
            Command::ExpandPanel => write!(f, "expand"),
            Command::CollapsePanel => write!(f, "collapse"),

            Command::FocusSearch => write!(f, "focus_search"),
            Command::BlurSearch => write!(f, "blur_search"),
            Command::SearchInput(ch) => write!(f, "search:{}", ch),
            Command::SearchBackspace => write!(f, "search_backspace"),
            Command::ClearSearch => write!(f, "clear_search"),

            Command::CursorUp => write!(f, "cursor_up"),
            Command::CursorDown => write!(f, "cursor_down"),
            Command::OpenRow => write!(f, "open_row"),
            Command::OpenLastTrip => write!(f, "open_last_trip"),
            Command::ToggleStar => write!(f, "toggle_star"),
            Command::CloseDetail => write!(f, "close_detail"),

            Command::Sequence(commands) => {
                let inner = commands
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "sequence:[{}]", inner)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::from_string("expand").unwrap(), Command::ExpandPanel);
        assert_eq!(Command::from_string("STAR").unwrap(), Command::ToggleStar);
        assert_eq!(Command::from_string("drag:-81").unwrap(), Command::Drag(-81.0));
        assert_eq!(Command::from_string("drag: 12.5").unwrap(), Command::Drag(12.5));
        assert_eq!(Command::from_string("search:S").unwrap(), Command::SearchInput('S'));

        assert!(Command::from_string("invalid").is_err());
        assert!(Command::from_string("").is_err());
        assert!(Command::from_string("drag:up").is_err());
        assert!(Command::from_string("drag:inf").is_err());
        assert!(Command::from_string("down,up,quit").is_err());
    }

    #[test]
    fn test_sequence_parsing() {
        let parsed = Command::from_string("sequence:[expand, focus_search, search:m]").unwrap();
        assert_eq!(
            parsed,
            Command::Sequence(vec![
                Command::ExpandPanel,
                Command::FocusSearch,
                Command::SearchInput('m'),
            ])
        );
        assert_eq!(Command::from_string("sequence:[]").unwrap(), Command::Sequence(vec![]));
        assert!(Command::from_string("sequence:[expand,bogus]").is_err());
    }

    #[test]
    fn test_command_to_string() {
        assert_eq!(Command::ExpandPanel.to_string(), "expand");
        assert_eq!(Command::Drag(-81.0).to_string(), "drag:-81");
        assert_eq!(Command::SearchInput('x').to_string(), "search:x");
        assert_eq!(
            Command::Sequence(vec![Command::CursorDown, Command::ToggleStar]).to_string(),
            "sequence:[cursor_down,toggle_star]"
        );
    }

    #[test]
    fn test_prefixes_ignore_case() {
        assert_eq!(Command::from_string("Drag:-81"), Ok(Command::Drag(-81.0)));
        assert_eq!(Command::from_string("SEARCH:S"), Ok(Command::SearchInput('S')));
        assert_eq!(Command::from_string("Search:s"), Ok(Command::SearchInput('s')));
        assert_eq!(
            Command::from_string("Sequence:[Expand,STAR]"),
            Ok(Command::Sequence(vec![Command::ExpandPanel, Command::ToggleStar]))
        );
    }
}
