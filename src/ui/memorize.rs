use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Color,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use mnemo::memorization::{format_time, GamePhase, MemorizationGame, MemorizationSettings};

use super::{bold_style, dim_style, italic_style, title_block, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub fn settings_line(settings: &MemorizationSettings) -> String {
    format!(
        "Digits: {} | Max pair: {} | Pairs: {} | Timer: {}",
        settings.number_of_digits,
        settings.max_pair_value,
        on_off(settings.show_separated),
        on_off(settings.show_timer)
    )
}

pub fn legend_for(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Setup => "(enter) start  (+/-) digits  (p)airs  (t)imer  (esc)ape",
        GamePhase::Memorizing => "(enter) stop and hide  (p)airs  (t)imer  (esc)ape",
        GamePhase::Stopped => "(enter) show/hide  (n)ew  (p)airs  (esc)ape",
    }
}

fn body_text(game: &MemorizationGame, settings: &MemorizationSettings) -> Line<'static> {
    match game.phase {
        GamePhase::Setup => Line::from(Span::styled(
            "Press enter to generate a number",
            italic_style(),
        )),
        _ if !game.is_number_visible => Line::from(Span::styled(
            "Number hidden. Recall it, then press enter to check.",
            dim_style(),
        )),
        _ => Line::from(Span::styled(
            game.displayed_number(settings.show_separated),
            bold_style().fg(Color::Cyan),
        )),
    }
}

pub fn render_memorize(app: &mut App, f: &mut Frame) {
    let settings = &app.config.memorization;
    let game = &app.memorize;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // settings
            Constraint::Min(3),    // number
            Constraint::Length(1), // timer
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    let header = Paragraph::new(settings_line(settings))
        .block(title_block("Memorize"))
        .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let body_line = body_text(game, settings);
    let body = Paragraph::new(body_line.clone())
        .alignment(if body_line.width() <= chunks[1].width as usize {
            // a number that fits on one line reads best centred
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[1]);

    let show_timer = settings.show_timer || game.phase == GamePhase::Stopped;
    if show_timer && game.phase != GamePhase::Setup {
        let timer = Paragraph::new(Span::styled(
            format_time(game.elapsed(&app.clock)),
            bold_style(),
        ))
        .alignment(Alignment::Center);
        f.render_widget(timer, chunks[2]);
    }

    let legend = Paragraph::new(Span::styled(legend_for(game.phase), italic_style()))
        .alignment(Alignment::Center);
    f.render_widget(legend, chunks[4]);
}
