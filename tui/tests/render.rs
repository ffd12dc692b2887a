//! Whole-frame rendering tests against ratatui's test backend.
//!
//! Snapshot screens use ASCII glyphs so every glyph is one column wide.

use insta::assert_snapshot;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use planview_engine::{Dashboard, Geometry, InputAction, StreamEvent, UiOptions};
use planview_tui::{Panels, ReplyViewport, Spinner, draw};

const REPLY_TEXT: &str = "Here is the plan for the refactor.";
const SHORT_REPLY: &str = "Plan ready.";

const ASCII: UiOptions = UiOptions {
    ascii_only: true,
    high_contrast: false,
    reduced_motion: false,
};

fn dashboard(width: u16, height: u16) -> Dashboard {
    Dashboard::new(Geometry::new(width, height).expect("valid geometry"))
}

fn render(dash: &Dashboard, width: u16, height: u16) -> Vec<String> {
    render_with(dash, width, height, REPLY_TEXT, UiOptions::default())
}

fn render_with(
    dash: &Dashboard,
    width: u16,
    height: u16,
    reply_text: &str,
    options: UiOptions,
) -> Vec<String> {
    let mut reply = ReplyViewport::new();
    reply.push_str(reply_text);
    let spinner = Spinner::new(options);
    let panels = Panels {
        main: &reply,
        processing: &spinner,
        help_text: " (s)top",
    };

    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|frame| draw(frame, dash, &panels, options))
        .expect("draw");

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

/// Snapshot the ASCII screen, trailing blanks trimmed from every row.
fn snapshot_screen(name: &str, dash: &Dashboard, width: u16, height: u16) {
    let screen = render_with(dash, width, height, SHORT_REPLY, ASCII)
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(name, screen);
}

fn screen_contains(screen: &[String], needle: &str) -> bool {
    screen.iter().any(|line| line.contains(needle))
}

fn building_dashboard() -> Dashboard {
    let mut dash = dashboard(80, 24);
    dash.apply_stream(StreamEvent::Processing);
    dash.apply_stream(StreamEvent::BuildStarted);
    dash.apply_stream(StreamEvent::TokensStreamed {
        path: "b.go".to_string(),
        delta: 42,
    });
    dash.apply_stream(StreamEvent::FileFinished {
        path: "a.go".to_string(),
    });
    dash
}

#[test]
fn idle_shows_main_and_help_only() {
    let screen = render(&dashboard(80, 24), 80, 24);

    assert!(screen_contains(&screen, REPLY_TEXT));
    assert!(screen_contains(&screen, "(s)top"));
    assert!(!screen_contains(&screen, "Building plan"));
    assert!(!screen_contains(&screen, "⠋"));
}

#[test]
fn building_stacks_all_panels_in_order() {
    let screen = render(&building_dashboard(), 80, 24);

    let row_of = |needle: &str| {
        screen
            .iter()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not rendered"))
    };

    let main = row_of(REPLY_TEXT);
    let spinner = row_of("⠋");
    let header = row_of("Building plan");
    let files = row_of("a.go");
    let help = row_of("(s)top");

    assert!(main < spinner && spinner < header && header < files && files < help);
    assert!(screen[files].contains("b.go"));
    assert!(screen[files].contains("42"));
    assert_eq!(help, 23, "help footer sits on the last row");
}

#[test]
fn prompt_replaces_dashboard_panels() {
    let mut dash = building_dashboard();
    dash.apply_stream(StreamEvent::FileMissing {
        path: "missing.ts".to_string(),
        token_cost: 120,
    });
    let screen = render(&dash, 80, 24);

    assert!(screen_contains(&screen, "missing.ts"));
    assert!(screen_contains(&screen, "What do you want to do?"));
    assert!(screen_contains(&screen, "120"));
    assert!(!screen_contains(&screen, "Building plan"));
    assert!(!screen_contains(&screen, "⠋"));
    assert!(!screen_contains(&screen, "b.go"));
    assert!(!screen_contains(&screen, REPLY_TEXT));
    assert!(!screen_contains(&screen, "(s)top"));
}

#[test]
fn closing_prompt_restores_build_panel() {
    let mut dash = building_dashboard();
    dash.apply_stream(StreamEvent::FileMissing {
        path: "missing.ts".to_string(),
        token_cost: 120,
    });
    dash.apply_input(InputAction::Cancel);
    let screen = render(&dash, 80, 24);

    assert!(screen_contains(&screen, "Building plan"));
    assert!(!screen_contains(&screen, "What do you want to do?"));
}

#[test]
fn drawing_is_clipped_to_reported_geometry() {
    let mut dash = building_dashboard();
    dash.resize(40, 12).expect("valid size");
    let screen = render(&dash, 80, 24);

    for (y, line) in screen.iter().enumerate() {
        let outside: String = line.chars().skip(40).collect();
        assert!(
            outside.trim().is_empty() || y >= 12,
            "row {y} drew past the viewport: {line:?}"
        );
    }
    for line in &screen[12..] {
        assert!(line.trim().is_empty(), "drew below the viewport: {line:?}");
    }
}

#[test]
fn snapshot_idle() {
    snapshot_screen("idle_screen", &dashboard(40, 8), 40, 8);
}

#[test]
fn snapshot_building() {
    let mut dash = building_dashboard();
    dash.resize(40, 12).expect("valid size");
    snapshot_screen("building_screen", &dash, 40, 12);
}

#[test]
fn snapshot_narrow_building_wraps_rows() {
    let mut dash = building_dashboard();
    dash.resize(24, 12).expect("valid size");
    snapshot_screen("narrow_building_screen", &dash, 30, 12);
}

#[test]
fn snapshot_prompt() {
    let mut dash = building_dashboard();
    dash.resize(210, 14).expect("valid size");
    dash.apply_stream(StreamEvent::FileMissing {
        path: "missing.ts".to_string(),
        token_cost: 120,
    });
    // Wide enough that the explanation stays on one line.
    snapshot_screen("prompt_screen", &dash, 210, 14);
}
