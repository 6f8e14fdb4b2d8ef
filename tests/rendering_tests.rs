use trip_browser::command::Command;
use trip_browser::config::Config;
use trip_browser::executor::Executor;
use trip_browser::screenshot::render_to_string;
use trip_browser::test_config::TestConfig;

fn render_after(commands: &[&str], width: u16, height: u16) -> String {
    let mut config = TestConfig::default();
    for command in commands {
        let command = Command::from_string(command).unwrap();
        config = Executor::execute(&config, command).unwrap().config;
    }
    render_to_string(&config, &Config::default(), width, height).unwrap()
}

#[test]
fn test_collapsed_panel_shows_last_trip_summary() {
    let screen = render_after(&[], 100, 30);

    assert!(screen.contains("Burleigh → Bundall"));
    assert!(screen.contains("44 km  •  45 mins"));
    assert!(screen.contains("━━━━"));
    assert!(!screen.contains("Recent Trips"));
    assert!(!screen.contains("Search Trips"));
}

#[test]
fn test_expanded_panel_lists_every_trip() {
    let screen = render_after(&["expand"], 100, 40);

    assert!(screen.contains("Last Trip"));
    assert!(screen.contains("Recent Trips"));
    for title in [
        "Burleigh → Bundall",
        "Miami → Ashmore",
        "Burleigh → Southport",
        "Arundel → Southport",
    ] {
        assert!(screen.contains(title), "missing row {title}");
    }
}

#[test]
fn test_search_without_matches_shows_no_results() {
    let screen = render_after(&["expand", "focus_search", "search:z", "search:z"], 100, 40);

    assert!(screen.contains("No Results"));
    assert!(!screen.contains("Last Trip"));
}

#[test]
fn test_starred_trip_renders_filled_star() {
    let unstarred = render_after(&["expand"], 100, 40);
    let starred = render_after(&["expand", "toggle_star"], 100, 40);

    assert!(!unstarred.contains('★'));
    assert!(starred.contains('★'));
}

#[test]
fn test_open_row_shows_detail_overlay() {
    let screen = render_after(&["expand", "down", "open_row"], 100, 40);

    assert!(screen.contains("Trip Detail"));
    assert!(screen.contains("Miami → Ashmore"));

    let closed = render_after(&["expand", "down", "open_row", "close_detail"], 100, 40);
    assert!(!closed.contains("Trip Detail"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let screen = render_after(&["expand"], 20, 6);
    assert_eq!(screen.lines().count(), 6);
}
