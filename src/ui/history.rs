use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use mnemo::{
    history::NumberSummary,
    sequence::{format_number, NumberFormat},
};

use super::{bold_style, response_color};
use crate::{App, HistorySort};

/// Pure presenter for a single history row
pub fn present_row(data: &NumberSummary, format: NumberFormat) -> Row<'static> {
    let number = data
        .number()
        .map(|n| format_number(n, format))
        .unwrap_or_else(|| data.display.clone());
    let range_display = format!("{:.0} - {:.0}", data.min_response_ms, data.max_response_ms);

    let last_seen = data
        .last_seen
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(number).style(bold_style()),
        Cell::from(format!("{:.0}", data.avg_response_ms))
            .style(Style::default().fg(response_color(data.avg_response_ms))),
        Cell::from(range_display),
        Cell::from(data.attempts.to_string()),
        Cell::from(last_seen),
    ])
}

/// Render the per-number history screen
pub fn render_history(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Stats table
            Constraint::Length(3), // Instructions
        ])
        .split(area);

    let sort_direction = if app.history_state.sort_ascending {
        "↑"
    } else {
        "↓"
    };
    let sort_by_text = match app.history_state.sort_by {
        HistorySort::Number => "Number",
        HistorySort::AvgTime => "Avg Time",
        HistorySort::Attempts => "Attempts",
    };
    let title_text = format!("Recall History (Sort: {sort_by_text} {sort_direction})");

    let title = Paragraph::new(title_text)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let rows = app.history_rows();
    let format = app.format();

    if rows.is_empty() {
        let no_data = Paragraph::new("No history yet. Finish a training session to collect data.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    } else {
        let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
        let max_scroll = rows.len().saturating_sub(table_height);
        let hs = &mut app.history_state;
        hs.scroll_offset = hs.scroll_offset.min(max_scroll);

        let indicator = |sort: HistorySort| {
            if hs.sort_by == sort {
                sort_direction
            } else {
                ""
            }
        };

        let header = Row::new(vec![
            Cell::from(format!("Number {}", indicator(HistorySort::Number))),
            Cell::from(format!("Avg (ms) {}", indicator(HistorySort::AvgTime))),
            Cell::from("Min - Max (ms)"),
            Cell::from(format!("Attempts {}", indicator(HistorySort::Attempts))),
            Cell::from("Last Seen"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let visible_rows: Vec<Row> = rows
            .iter()
            .skip(hs.scroll_offset)
            .take(table_height)
            .map(|row| present_row(row, format))
            .collect();

        let widths = [
            Constraint::Length(10), // Number
            Constraint::Length(12), // Avg
            Constraint::Length(16), // Min - Max
            Constraint::Length(12), // Attempts
            Constraint::Min(16),    // Last Seen
        ];

        let table = Table::new(visible_rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Numbers"))
            .column_spacing(2);

        f.render_widget(table, chunks[1]);
    }

    let instructions = Paragraph::new(
        "(↑/↓) scroll  (PgUp/PgDn) page  (Home) top  (1-3) sort  (space) reverse  (b/backspace) back",
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use mnemo::{config::Config, history::HistoryDb, MajorNumber, NumberPerformance};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render_history(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_empty_history() {
        let mut app = App::new(Config::default(), None, HistoryDb::open_in_memory().ok());
        assert!(rendered_text(&mut app).contains("No history yet"));
    }

    fn plain_seven_history(format: NumberFormat) -> String {
        let mut db = HistoryDb::open_in_memory().unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let seven = MajorNumber::from_value(7).unwrap();
        let recall = NumberPerformance::new(seven, t0, t0 + Duration::milliseconds(850)).unwrap();
        db.record_session(&[recall], "0-9").unwrap();

        let config = Config {
            number_format: format,
            ..Default::default()
        };
        let mut app = App::new(config, None, Some(db));
        rendered_text(&mut app)
    }

    #[test]
    fn test_number_column_follows_display_format() {
        assert!(plain_seven_history(NumberFormat::Padded).contains("07"));
        assert!(!plain_seven_history(NumberFormat::Natural).contains("07"));
    }

    #[test]
    fn test_render_rows_and_clamp_scroll() {
        let mut db = HistoryDb::open_in_memory().unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let perfs = vec![
            NumberPerformance::new(
                MajorNumber::from_zero_padded(7).unwrap(),
                t0,
                t0 + Duration::milliseconds(850),
            )
            .unwrap(),
            NumberPerformance::new(
                MajorNumber::from_value(42).unwrap(),
                t0,
                t0 + Duration::milliseconds(4200),
            )
            .unwrap(),
        ];
        db.record_session(&perfs, "00-99").unwrap();

        let mut app = App::new(Config::default(), None, Some(db));
        app.history_state.scroll_offset = 50;
        let text = rendered_text(&mut app);

        assert!(text.contains("07"));
        assert!(text.contains("4200"));
        assert_eq!(app.history_state.scroll_offset, 0);
    }
}
