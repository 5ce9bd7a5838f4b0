use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use super::{bold_style, dim_style, italic_style, title_block, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::{menu_entries, App, RangeField};

pub fn render_menu(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(4),    // entries
            Constraint::Length(1), // status message
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("mnemo", bold_style().fg(Color::Cyan)),
        Span::styled("  Major System trainer", italic_style()),
    ]))
    .block(title_block("Menu"))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = menu_entries()
        .iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();

    let list = List::new(items)
        .block(title_block(format!("Format: {}", app.format())))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.menu_selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(message) = &app.message {
        let status = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        f.render_widget(status, chunks[2]);
    }

    let legend = Paragraph::new(Span::styled(
        "(↑/↓) select  (enter) start  (c)ustom  (m)emorize  (s)tats  (h)elp  (f)ormat  (esc)ape",
        italic_style(),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(legend, chunks[3]);
}

/// Rectangle of `width` x `height` centred in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_custom_range(app: &mut App, f: &mut Frame) {
    let message_width = app.message.as_deref().map_or(0, |m| m.width() as u16 + 4);
    let area = centered_rect(message_width.max(44), 9, f.area());
    f.render_widget(Clear, area);

    let field_line = |label: &str, value: &str, active: bool| {
        let value_style = if active {
            bold_style().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
        } else {
            bold_style()
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::raw(format!("{label:>6}: ")),
            Span::styled(format!("{value}{cursor}"), value_style),
        ])
    };

    let input = &app.custom;
    let mut lines = vec![
        Line::from(""),
        field_line("Start", &input.start, input.field == RangeField::Start),
        field_line("End", &input.end, input.field == RangeField::End),
        Line::from(""),
    ];

    match &app.message {
        Some(message) => lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from(Span::styled(
            "00-09 zero-padded, 0-99 plain",
            dim_style(),
        ))),
    }
    lines.push(Line::from(Span::styled(
        "(tab) switch  (enter) start  (esc) cancel",
        italic_style(),
    )));

    let form = Paragraph::new(lines)
        .block(title_block("Custom Range"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(form, area);
}
