use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

use planview_types::MissingFilePrompt;

use crate::theme::{Glyphs, Palette, styles};

const MISSING_FILE_EXPLANATION: &str = "This file exists in your project, but isn't loaded into context. \
     Unless you load it into context or skip generating it, the plan will fully overwrite \
     the existing file rather than applying updates.";

pub(crate) fn prompt_lines(
    prompt: &MissingFilePrompt,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let text = Style::default().fg(palette.text_primary);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", glyphs.file), text),
            Span::styled(prompt.path().to_string(), styles::missing_path(palette)),
            Span::styled(" isn't in context.", text),
        ]),
        Line::from(""),
        Line::styled(
            MISSING_FILE_EXPLANATION,
            Style::default().fg(palette.text_secondary),
        ),
        Line::from(""),
        Line::styled(
            format!("{} What do you want to do?", glyphs.question),
            styles::question(palette),
        ),
    ];

    for (i, choice) in prompt.options().iter().enumerate() {
        let mut spans = if i == prompt.selected_index() {
            vec![Span::styled(
                format!(" {} {}", glyphs.selected, choice.label()),
                styles::option_selected(palette),
            )]
        } else {
            vec![Span::styled(format!("   {}", choice.label()), text)]
        };

        if choice.shows_token_cost() {
            spans.push(Span::styled(
                format!(" | {} {}", prompt.token_cost(), glyphs.token),
                Style::default().fg(palette.text_muted),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Full-screen modal, inset by one cell on every side.
pub(crate) fn draw(
    frame: &mut Frame,
    area: Rect,
    prompt: &MissingFilePrompt,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let rect = area.inner(Margin::new(1, 1));
    if rect.is_empty() {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::panel_border(palette))
        .padding(Padding::uniform(1));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(prompt_lines(prompt, palette, glyphs))
            .block(block)
            .wrap(Wrap { trim: false }),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use planview_types::{Direction, MissingFilePrompt, UiOptions};

    use super::prompt_lines;
    use crate::theme::{glyphs, palette};

    fn rendered(prompt: &MissingFilePrompt) -> Vec<String> {
        let options = UiOptions::default();
        prompt_lines(prompt, &palette(options), &glyphs(options))
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn headline_names_the_file() {
        let lines = rendered(&MissingFilePrompt::open("missing.ts", 120));
        assert_eq!(lines[0], "📄 missing.ts isn't in context.");
    }

    #[test]
    fn load_option_carries_token_cost() {
        let lines = rendered(&MissingFilePrompt::open("missing.ts", 120));
        let options = &lines[lines.len() - 3..];

        assert_eq!(options[0], " > Load the file into context | 120 🪙");
        assert!(options[1].starts_with("   Skip"));
        assert!(!options[1].contains("120"));
        assert!(!options[2].contains("120"));
    }

    #[test]
    fn marker_follows_selection() {
        let mut prompt = MissingFilePrompt::open("missing.ts", 120);
        prompt.move_selection(Direction::Up);
        let lines = rendered(&prompt);
        let options = &lines[lines.len() - 3..];

        assert!(options[0].starts_with("   Load"));
        assert!(options[2].starts_with(" > "));
    }
}
