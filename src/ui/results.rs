use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use mnemo::{
    mnemonic::sounds_for_display,
    sequence::{format_number, NumberFormat},
    statistics::SessionStatistics,
    util::{format_clock, format_secs},
    NumberPerformance,
};

use super::{
    bold_style, charting, italic_style, response_color, title_block, HORIZONTAL_MARGIN,
    VERTICAL_MARGIN,
};
use crate::App;

/// One line summary shown under the chart
pub fn summary_line(stats: &SessionStatistics, format: NumberFormat) -> String {
    format!(
        "{} numbers in {}   avg {}   sd {:.0}ms   fastest {} ({})   slowest {} ({})",
        stats.total_numbers,
        format_clock(stats.total_duration),
        format_secs(stats.average_response_time),
        stats.response_time_std_dev,
        format_number(stats.fastest_response.number(), format),
        format_secs(stats.fastest_response.response_time()),
        format_number(stats.slowest_response.number(), format),
        format_secs(stats.slowest_response.response_time()),
    )
}

/// Row for the slowest-recall review table
pub fn present_row(p: &NumberPerformance, format: NumberFormat) -> Row<'static> {
    // sounds follow the number itself, so plain 7 stays "k" even when shown as 07
    let sounds = sounds_for_display(&p.number().display()).join("  +  ");

    Row::new(vec![
        Cell::from(format_number(p.number(), format)).style(bold_style()),
        Cell::from(format_secs(p.response_time()))
            .style(Style::default().fg(response_color(p.response_ms()))),
        Cell::from(sounds),
    ])
}

pub fn render_results(app: &mut App, f: &mut Frame) {
    let (Some(stats), Some(session)) = (app.statistics.as_ref(), app.session.as_ref()) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(6),    // chart
            Constraint::Length(1), // summary
            Constraint::Length(1), // padding
            Constraint::Length(
                stats.slowest_responses.len() as u16 + 3, // borders + header
            ),
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    // presentation order, not the value-sorted list
    let coords = charting::response_coords(session.performances());
    let (count, slowest_secs) = charting::compute_chart_params(&coords);

    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&coords)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("number")
                .bounds([1.0, count])
                .labels(vec![
                    Span::styled("1", bold_style()),
                    Span::styled(charting::format_label(count), bold_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, slowest_secs])
                .labels(vec![
                    Span::styled("0", bold_style()),
                    Span::styled(charting::format_label(slowest_secs), bold_style()),
                ]),
        );
    f.render_widget(chart, chunks[0]);

    let format = app.format();
    let summary = Paragraph::new(Line::from(Span::styled(
        summary_line(stats, format),
        bold_style(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(summary, chunks[1]);

    let header = Row::new(vec!["Number", "Time", "Sounds"])
        .style(bold_style().fg(Color::Yellow));
    let rows: Vec<Row> = stats
        .slowest_responses
        .iter()
        .map(|p| present_row(p, format))
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(title_block("Slowest recalls"))
    .column_spacing(2);
    f.render_widget(table, chunks[3]);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (s)tats / (esc)ape",
        italic_style(),
    ));
    f.render_widget(legend, chunks[4]);
}
