//! Content sources for the main and processing panels.
//!
//! The composer only needs something it can ask for text. The reply viewport
//! and spinner here are the default sources the binary wires in.

use ratatui::text::{Line, Text};

use planview_types::UiOptions;

use crate::theme::spinner_frame;

/// Anything that can supply the text for a panel.
pub trait PanelSource {
    fn render(&self) -> Text<'_>;

    fn scroll(&self) -> ScrollState {
        ScrollState::AutoBottom
    }
}

impl PanelSource for String {
    fn render(&self) -> Text<'_> {
        Text::raw(self.as_str())
    }
}

/// Scroll position for the reply view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Always keep the newest content visible.
    #[default]
    AutoBottom,
    /// Manual scroll offset, in rendered rows, up from the bottom.
    Manual { offset_from_bottom: u16 },
}

impl ScrollState {
    /// Rows to skip from the top given the rendered height and the viewport.
    #[must_use]
    pub fn offset_from_top(self, total_rows: usize, viewport_rows: u16) -> u16 {
        let max = total_rows.saturating_sub(viewport_rows as usize);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        match self {
            ScrollState::AutoBottom => max,
            ScrollState::Manual { offset_from_bottom } => max.saturating_sub(offset_from_bottom),
        }
    }
}

/// Streaming reply text shown in the main panel.
#[derive(Debug, Default)]
pub struct ReplyViewport {
    content: String,
    scroll: ScrollState,
}

impl ReplyViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, chunk: &str) {
        self.content.push_str(chunk);
    }

    /// Append `line` on its own line.
    pub fn push_line(&mut self, line: &str) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = match self.scroll {
            ScrollState::AutoBottom => ScrollState::Manual {
                offset_from_bottom: rows,
            },
            ScrollState::Manual { offset_from_bottom } => ScrollState::Manual {
                offset_from_bottom: offset_from_bottom.saturating_add(rows),
            },
        };
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = match self.scroll {
            ScrollState::AutoBottom => ScrollState::AutoBottom,
            ScrollState::Manual { offset_from_bottom } if offset_from_bottom <= rows => {
                ScrollState::AutoBottom
            }
            ScrollState::Manual { offset_from_bottom } => ScrollState::Manual {
                offset_from_bottom: offset_from_bottom - rows,
            },
        };
    }
}

impl PanelSource for ReplyViewport {
    fn render(&self) -> Text<'_> {
        Text::raw(self.content.as_str())
    }

    fn scroll(&self) -> ScrollState {
        self.scroll
    }
}

/// Busy indicator for the processing panel.
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    tick: usize,
    options: UiOptions,
}

impl Spinner {
    #[must_use]
    pub fn new(options: UiOptions) -> Self {
        Self { tick: 0, options }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

impl PanelSource for Spinner {
    fn render(&self) -> Text<'_> {
        Text::from(Line::raw(format!(" {}", spinner_frame(self.tick, self.options))))
    }
}
