//! TUI rendering for planview using ratatui.
//!
//! [`draw`] composes one frame from the dashboard state. While the
//! missing-file prompt is open it is the only thing drawn; otherwise the
//! screen is a vertical stack of the main reply panel, the processing
//! panel, the build panel and the help footer. Conditional panels are
//! either drawn in full or take no rows at all.

mod build_panel;
mod input;
mod prompt;
mod theme;
mod widgets;

pub use build_panel::build_rows;
pub use input::{KeyCommand, map_event};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};
pub use widgets::{PanelSource, ReplyViewport, ScrollState, Spinner};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::error;

use planview_engine::{Composition, Dashboard, Geometry, UiOptions};

const PROCESSING_PANEL_HEIGHT: u16 = 2;
const HELP_PANEL_HEIGHT: u16 = 2;

/// Externally owned panel content.
pub struct Panels<'a> {
    pub main: &'a dyn PanelSource,
    pub processing: &'a dyn PanelSource,
    pub help_text: &'a str,
}

/// Main draw function
pub fn draw(frame: &mut Frame, dashboard: &Dashboard, panels: &Panels<'_>, options: UiOptions) {
    let palette = palette(options);
    let glyphs = glyphs(options);

    let area = viewport_area(frame.area(), dashboard.geometry());
    if area.is_empty() {
        return;
    }
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        area,
    );

    match dashboard.phase().composition() {
        Composition::Modal(missing) => prompt::draw(frame, area, missing, &palette, &glyphs),
        Composition::Dashboard { processing, build } => {
            let build_lines = if build {
                match build_panel::build_lines(dashboard.progress(), area.width, &palette, &glyphs)
                {
                    Ok(lines) => Some(lines),
                    Err(err) => {
                        error!(%err, width = area.width, "Build panel layout failed");
                        None
                    }
                }
            } else {
                None
            };

            let processing_height = if processing {
                PROCESSING_PANEL_HEIGHT
            } else {
                0
            };
            let build_height = build_lines
                .as_deref()
                .map_or(0, build_panel::panel_height);

            let [main_area, processing_area, build_area, help_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(processing_height),
                Constraint::Length(build_height),
                Constraint::Length(HELP_PANEL_HEIGHT),
            ])
            .areas(area);

            draw_main(frame, main_area, panels.main, &palette);
            if processing {
                draw_top_bordered(frame, processing_area, panels.processing, &palette);
            }
            if let Some(lines) = build_lines {
                build_panel::draw(frame, build_area, lines, &palette);
            }
            draw_help(frame, help_area, panels.help_text, &palette);
        }
    }
}

/// The region the dashboard owns, clipped to the frame.
fn viewport_area(frame_area: Rect, geometry: Geometry) -> Rect {
    Rect::new(
        frame_area.x,
        frame_area.y,
        geometry.width(),
        geometry.height(),
    )
    .intersection(frame_area)
}

fn draw_main(frame: &mut Frame, area: Rect, source: &dyn PanelSource, palette: &Palette) {
    if area.is_empty() {
        return;
    }
    let paragraph = Paragraph::new(source.render())
        .style(Style::default().fg(palette.text_secondary))
        .wrap(Wrap { trim: false });
    let total_rows = paragraph.line_count(area.width);
    let offset = source.scroll().offset_from_top(total_rows, area.height);
    frame.render_widget(paragraph.scroll((offset, 0)), area);
}

fn draw_top_bordered(frame: &mut Frame, area: Rect, source: &dyn PanelSource, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::panel_border(palette));
    frame.render_widget(Paragraph::new(source.render()).block(block), area);
}

fn draw_help(frame: &mut Frame, area: Rect, help_text: &str, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::panel_border(palette));
    frame.render_widget(
        Paragraph::new(help_text)
            .style(styles::help_text(palette))
            .block(block),
        area,
    );
}
