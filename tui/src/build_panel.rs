//! Build progress panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use planview_types::{BuildTracker, LayoutError, ROW_SEPARATOR, format_label, pack_rows};

use crate::theme::{Glyphs, Palette, styles};

/// File labels for the current build, packed into rows of at most `width`
/// columns. Files appear in path order.
pub fn build_rows(
    progress: &BuildTracker,
    width: u16,
    glyphs: &Glyphs,
) -> Result<Vec<Vec<String>>, LayoutError> {
    let label_glyphs = glyphs.label();
    let snapshot = progress.snapshot();
    let labels = snapshot
        .iter()
        .map(|(path, file)| format_label(path, file.tokens, file.finished, &label_glyphs));
    pack_rows(labels, usize::from(width))
}

/// Header plus one line per packed row.
pub(crate) fn build_lines(
    progress: &BuildTracker,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Result<Vec<Line<'static>>, LayoutError> {
    let rows = build_rows(progress, width, glyphs)?;

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", glyphs.building), styles::build_badge(palette)),
        Span::styled("Building plan ", styles::build_badge(palette)),
    ]));
    lines.extend(
        rows.into_iter()
            .map(|row| Line::styled(row.join(ROW_SEPARATOR), Style::default().fg(palette.text_primary))),
    );
    Ok(lines)
}

/// Rows the panel needs: its top border plus `lines`.
pub(crate) fn panel_height(lines: &[Line<'_>]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(1)
}

pub(crate) fn draw(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::panel_border(palette));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
