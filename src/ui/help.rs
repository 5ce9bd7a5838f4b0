use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use mnemo::mnemonic::{reference_lines, EXAMPLES, TIPS};

use super::{bold_style, dim_style, italic_style, title_block, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

/// Sound table, worked examples and tips
pub fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Each digit stands for a consonant sound:",
        bold_style(),
    ))];
    lines.extend(reference_lines().into_iter().map(Line::from));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Examples", bold_style())));
    for (number, sounds, words) in EXAMPLES {
        lines.push(Line::from(vec![
            Span::styled(format!("{number:>4}"), bold_style().fg(Color::Cyan)),
            Span::raw(format!(" → {sounds} → ")),
            Span::styled(words, italic_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Tips", bold_style())));
    lines.extend(TIPS.iter().map(|tip| Line::from(format!("  - {tip}"))));
    lines
}

pub fn render_help(_app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let help = Paragraph::new(help_lines())
        .block(title_block("The Major System"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, chunks[0]);

    let legend = Paragraph::new(Span::styled("(b/esc) back", dim_style()));
    f.render_widget(legend, chunks[1]);
}
