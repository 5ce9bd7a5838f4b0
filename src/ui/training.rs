use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use itertools::Itertools;
use mnemo::{clock::Clock, sequence::format_number, util::format_secs};

use super::{
    bold_style, dim_style, italic_style, response_color, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};
use crate::App;

/// Spread a number's digits apart so it reads at a glance
pub fn spaced(display: &str) -> String {
    display.chars().join(" ")
}

pub fn render_training(app: &mut App, f: &mut Frame) {
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // range
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // number
            Constraint::Length(1), // live timer
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // progress
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    let header = Paragraph::new(Span::styled(
        format!(
            "Range {} - {}   {} / {}",
            session.range_start(),
            session.range_end(),
            session.completed_numbers() + 1,
            session.total_numbers()
        ),
        dim_style(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    if let (Some(number), Some(presented_at)) =
        (session.current_number(), session.current_presented_at())
    {
        let number = Paragraph::new(Span::styled(
            spaced(&format_number(number, app.format())),
            bold_style().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center);
        f.render_widget(number, chunks[2]);

        let elapsed = (app.clock.now() - presented_at).to_std().unwrap_or_default();
        let ms = mnemo::util::as_millis_f64(elapsed);
        let timer = Paragraph::new(Line::from(Span::styled(
            format_secs(elapsed),
            Style::default().fg(response_color(ms)),
        )))
        .alignment(Alignment::Center);
        f.render_widget(timer, chunks[3]);
    }

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!("{} remaining", session.remaining_numbers()));
    f.render_widget(progress, chunks[5]);

    let legend = Paragraph::new(Span::styled(
        "(enter/space) next / (esc)ape",
        italic_style(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[7]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo::{config::Config, sequence::NumberFormat};
    use ratatui::{backend::TestBackend, Terminal};

    fn training_screen(format: NumberFormat) -> String {
        let config = Config {
            number_format: format,
            ..Default::default()
        };
        let mut app = App::new(config, None, None);
        app.start_training("7", "7").unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render_training(&mut app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_number_follows_display_format() {
        assert!(training_screen(NumberFormat::Padded).contains("0 7"));
        assert!(!training_screen(NumberFormat::Natural).contains("0 7"));
    }

    #[test]
    fn test_spaced() {
        assert_eq!(spaced("07"), "0 7");
        assert_eq!(spaced("7"), "7");
    }
}
