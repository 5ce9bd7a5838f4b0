mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use mnemo::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    history::{HistoryDb, NumberSummary},
    memorization::{GamePhase, MemorizationGame, MAX_DIGITS, MIN_DIGITS},
    mnemonic,
    presets::{find_preset, TrainingPreset, PRESETS},
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner, TICK_RATE_MS},
    sequence::{generate_training_sequence, NumberFormat},
    session::{GameSession, SessionState},
    statistics::SessionStatistics,
    telemetry,
};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::Path,
    time::Duration,
};
use tracing::{info, warn};

/// Longest text accepted in a custom range field ("099" style input is allowed)
const RANGE_INPUT_MAX: usize = 3;

/// terminal trainer for the Major System
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Drill Major System numbers in shuffled order, time every recall, and review which numbers are slowest to come back to you."
)]
pub struct Cli {
    /// first number of the range to drill, e.g. 00, 0 or 25
    #[clap(short = 's', long = "start")]
    range_start: Option<String>,

    /// last number of the range to drill, e.g. 09, 50 or 99
    #[clap(short = 'e', long = "end")]
    range_end: Option<String>,

    /// named range: beginner, single-digits, teens, twenties, first-50, full-range
    #[clap(short = 'p', long, conflicts_with_all = ["range_start", "range_end"])]
    preset: Option<String>,

    /// how numbers are displayed (saved as the new default)
    #[clap(short = 'f', long, value_enum)]
    format: Option<NumberFormat>,

    /// open the long-number memorisation drill
    #[clap(short = 'm', long)]
    memorize: bool,

    /// number of digits to memorise
    #[clap(short = 'd', long, value_parser = clap::value_parser!(u16).range(1..=500))]
    digits: Option<u16>,

    /// show memorisation digits grouped in pairs
    #[clap(long)]
    separated: bool,

    /// print the digit to consonant-sound table and exit
    #[clap(long)]
    help_sounds: bool,

    /// do not record recall times to the history database
    #[clap(long)]
    no_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    CustomRange,
    Training,
    Results,
    History,
    Help,
    Memorize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Preset(&'static TrainingPreset),
    CustomRange,
    Memorize,
    History,
    Help,
    Quit,
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::Preset(p) => format!("{:<14} {}", p.name, p.description),
            MenuEntry::CustomRange => "Custom Range".to_string(),
            MenuEntry::Memorize => "Memorize Digits".to_string(),
            MenuEntry::History => "History".to_string(),
            MenuEntry::Help => "Major System Help".to_string(),
            MenuEntry::Quit => "Quit".to_string(),
        }
    }
}

pub fn menu_entries() -> Vec<MenuEntry> {
    PRESETS
        .iter()
        .map(MenuEntry::Preset)
        .chain([
            MenuEntry::CustomRange,
            MenuEntry::Memorize,
            MenuEntry::History,
            MenuEntry::Help,
            MenuEntry::Quit,
        ])
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeField {
    #[default]
    Start,
    End,
}

#[derive(Debug, Default)]
pub struct CustomRangeInput {
    pub start: String,
    pub end: String,
    pub field: RangeField,
}

impl CustomRangeInput {
    fn active(&mut self) -> &mut String {
        match self.field {
            RangeField::Start => &mut self.start,
            RangeField::End => &mut self.end,
        }
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            RangeField::Start => RangeField::End,
            RangeField::End => RangeField::Start,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySort {
    Number,
    AvgTime,
    Attempts,
}

#[derive(Debug)]
pub struct HistoryState {
    pub scroll_offset: usize,
    pub sort_by: HistorySort,
    pub sort_ascending: bool,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            sort_by: HistorySort::Number,
            sort_ascending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    config_store: Option<FileConfigStore>,
    pub state: AppState,
    /// screen that `back` returns to from history and help
    return_to: AppState,
    pub menu_selected: usize,
    pub custom: CustomRangeInput,
    pub message: Option<String>,
    pub session: Option<GameSession>,
    pub statistics: Option<SessionStatistics>,
    pub history: Option<HistoryDb>,
    pub history_state: HistoryState,
    pub memorize: MemorizationGame,
    pub clock: SystemClock,
    /// --no-history for this run only; never written back to the config file
    skip_history: bool,
}

impl App {
    pub fn new(
        config: Config,
        config_store: Option<FileConfigStore>,
        history: Option<HistoryDb>,
    ) -> Self {
        Self {
            config,
            config_store,
            state: AppState::Menu,
            return_to: AppState::Menu,
            menu_selected: 0,
            custom: CustomRangeInput::default(),
            message: None,
            session: None,
            statistics: None,
            history,
            history_state: HistoryState::default(),
            memorize: MemorizationGame::default(),
            clock: SystemClock,
            skip_history: false,
        }
    }

    pub fn format(&self) -> NumberFormat {
        self.config.number_format
    }

    /// Apply command line overrides and pick the first screen
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), String> {
        if let Some(format) = cli.format {
            self.set_format(format);
        }
        if let Some(digits) = cli.digits {
            self.config.memorization.number_of_digits = digits as usize;
        }
        if cli.separated {
            self.config.memorization.show_separated = true;
        }
        if cli.no_history {
            self.skip_history = true;
        }

        if cli.memorize {
            self.state = AppState::Memorize;
            return Ok(());
        }

        if let Some(name) = &cli.preset {
            let preset = find_preset(name).ok_or_else(|| format!("unknown preset '{name}'"))?;
            return self
                .start_training(preset.range_start, preset.range_end)
                .map_err(|e| e.to_string());
        }

        if cli.range_start.is_some() || cli.range_end.is_some() {
            let start = cli
                .range_start
                .clone()
                .unwrap_or_else(|| self.config.default_range_start.clone());
            let end = cli
                .range_end
                .clone()
                .unwrap_or_else(|| self.config.default_range_end.clone());
            return self.start_training(&start, &end).map_err(|e| e.to_string());
        }

        Ok(())
    }

    /// Build and start a shuffled session over `start..=end`
    pub fn start_training(&mut self, start: &str, end: &str) -> mnemo::Result<()> {
        let mut numbers = generate_training_sequence(start, end, self.format())?;
        numbers.shuffle(&mut rand::thread_rng());

        let mut session = GameSession::with_sequence(start, end, SystemClock, numbers)?;
        session.start()?;

        info!(start, end, total = session.total_numbers(), "training started");
        self.session = Some(session);
        self.statistics = None;
        self.message = None;
        self.state = AppState::Training;
        Ok(())
    }

    pub fn advance(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.advance_to_next() {
            warn!(error = %e, "advance rejected");
            return;
        }

        if session.state() == SessionState::Completed {
            self.finish_session();
        }
    }

    fn finish_session(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        match session.statistics() {
            Ok(stats) => {
                if self.config.record_history && !self.skip_history {
                    if let Some(db) = self.history.as_mut() {
                        let range = format!("{}-{}", session.range_start(), session.range_end());
                        if let Err(e) = db.record_session(session.performances(), &range) {
                            warn!(error = %e, "failed to record session history");
                        }
                    }
                }
                self.statistics = Some(stats);
                self.state = AppState::Results;
            }
            Err(e) => {
                warn!(error = %e, "statistics unavailable");
                self.message = Some(e.to_string());
                self.state = AppState::Menu;
            }
        }
    }

    pub fn retry(&mut self) {
        let Some((start, end)) = self
            .session
            .as_ref()
            .map(|s| (s.range_start().to_string(), s.range_end().to_string()))
        else {
            return;
        };
        if let Err(e) = self.start_training(&start, &end) {
            self.message = Some(e.to_string());
            self.state = AppState::Menu;
        }
    }

    pub fn set_format(&mut self, format: NumberFormat) {
        self.config.number_format = format;
        self.save_config();
    }

    pub fn toggle_format(&mut self) {
        let next = match self.format() {
            NumberFormat::Padded => NumberFormat::Natural,
            NumberFormat::Natural => NumberFormat::Padded,
        };
        self.set_format(next);
    }

    fn save_config(&self) {
        if let Some(store) = &self.config_store {
            if let Err(e) = store.save(&self.config) {
                warn!(error = %e, "failed to save config");
            }
        }
    }

    fn open(&mut self, state: AppState) {
        self.return_to = self.state;
        self.state = state;
    }

    fn back(&mut self) {
        self.state = self.return_to;
        self.return_to = AppState::Menu;
    }

    /// Redraw on ticks only while something on screen is counting
    pub fn needs_tick_redraw(&self) -> bool {
        match self.state {
            AppState::Training => true,
            AppState::Memorize => self.memorize.is_timer_running(),
            _ => false,
        }
    }

    /// History rows in the order selected on the history screen
    pub fn history_rows(&self) -> Vec<NumberSummary> {
        let Some(db) = &self.history else {
            return Vec::new();
        };
        let mut rows = match db.number_summary() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "failed to read history");
                return Vec::new();
            }
        };

        let state = &self.history_state;
        match state.sort_by {
            // summary already arrives in canonical order
            HistorySort::Number => {}
            HistorySort::AvgTime => rows.sort_by(|a, b| {
                a.avg_response_ms
                    .partial_cmp(&b.avg_response_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            HistorySort::Attempts => rows.sort_by_key(|r| r.attempts),
        }
        if !state.sort_ascending {
            rows.reverse();
        }
        rows
    }

    /// Route a key press; settings changed on any screen are saved before quitting
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let flow = self.dispatch_key(key);
        if flow == Flow::Quit {
            self.save_config();
        }
        flow
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Menu => return self.on_menu_key(key),
            AppState::CustomRange => self.on_custom_range_key(key),
            AppState::Training => self.on_training_key(key),
            AppState::Results => return self.on_results_key(key),
            AppState::History => self.on_history_key(key),
            AppState::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter | KeyCode::Char('b')
                ) {
                    self.back();
                }
            }
            AppState::Memorize => self.on_memorize_key(key),
        }
        Flow::Continue
    }

    fn on_menu_key(&mut self, key: KeyEvent) -> Flow {
        let entries = menu_entries();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selected = (self.menu_selected + 1).min(entries.len() - 1);
            }
            KeyCode::Char('c') => self.open_custom_range(),
            KeyCode::Char('m') => self.open(AppState::Memorize),
            KeyCode::Char('s') => self.open(AppState::History),
            KeyCode::Char('h') | KeyCode::Char('?') => self.open(AppState::Help),
            KeyCode::Char('f') => self.toggle_format(),
            KeyCode::Enter => match entries[self.menu_selected] {
                MenuEntry::Preset(p) => {
                    if let Err(e) = self.start_training(p.range_start, p.range_end) {
                        self.message = Some(e.to_string());
                    }
                }
                MenuEntry::CustomRange => self.open_custom_range(),
                MenuEntry::Memorize => self.open(AppState::Memorize),
                MenuEntry::History => self.open(AppState::History),
                MenuEntry::Help => self.open(AppState::Help),
                MenuEntry::Quit => return Flow::Quit,
            },
            _ => {}
        }
        Flow::Continue
    }

    fn open_custom_range(&mut self) {
        self.custom = CustomRangeInput {
            start: self.config.default_range_start.clone(),
            end: self.config.default_range_end.clone(),
            field: RangeField::Start,
        };
        self.message = None;
        self.state = AppState::CustomRange;
    }

    fn on_custom_range_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.message = None;
                self.state = AppState::Menu;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.custom.switch_field()
            }
            KeyCode::Backspace => {
                self.custom.active().pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let field = self.custom.active();
                if field.len() < RANGE_INPUT_MAX {
                    field.push(c);
                }
            }
            KeyCode::Enter if self.custom.field == RangeField::Start => {
                self.custom.field = RangeField::End;
            }
            KeyCode::Enter => {
                let (start, end) = (self.custom.start.clone(), self.custom.end.clone());
                match self.start_training(&start, &end) {
                    Ok(()) => {
                        self.config.default_range_start = start;
                        self.config.default_range_end = end;
                        self.save_config();
                    }
                    Err(e) => self.message = Some(format!("Invalid range: {e}")),
                }
            }
            _ => {}
        }
    }

    fn on_training_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => self.advance(),
            KeyCode::Esc => {
                info!("training aborted");
                self.session = None;
                self.message = Some("Session aborted".to_string());
                self.state = AppState::Menu;
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('n') | KeyCode::Enter => self.state = AppState::Menu,
            KeyCode::Char('s') => self.open(AppState::History),
            _ => {}
        }
        Flow::Continue
    }

    fn on_history_key(&mut self, key: KeyEvent) {
        let hs = &mut self.history_state;
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.back(),
            KeyCode::Up => hs.scroll_offset = hs.scroll_offset.saturating_sub(1),
            // clamped against the table height when rendering
            KeyCode::Down => hs.scroll_offset += 1,
            KeyCode::PageUp => hs.scroll_offset = hs.scroll_offset.saturating_sub(10),
            KeyCode::PageDown => hs.scroll_offset += 10,
            KeyCode::Home => hs.scroll_offset = 0,
            KeyCode::Char('1') => {
                hs.sort_by = HistorySort::Number;
                hs.scroll_offset = 0;
            }
            KeyCode::Char('2') => {
                hs.sort_by = HistorySort::AvgTime;
                hs.scroll_offset = 0;
            }
            KeyCode::Char('3') => {
                hs.sort_by = HistorySort::Attempts;
                hs.scroll_offset = 0;
            }
            KeyCode::Char(' ') => {
                hs.sort_ascending = !hs.sort_ascending;
                hs.scroll_offset = 0;
            }
            _ => {}
        }
    }

    fn on_memorize_key(&mut self, key: KeyEvent) {
        let settings = &mut self.config.memorization;
        match key.code {
            KeyCode::Esc => {
                self.memorize.reset();
                self.save_config();
                self.state = AppState::Menu;
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.memorize.phase {
                GamePhase::Setup => {
                    match MemorizationGame::new(settings, &mut rand::thread_rng()) {
                        Ok(mut game) => {
                            game.start(&self.clock);
                            self.memorize = game;
                        }
                        Err(e) => self.message = Some(e.to_string()),
                    }
                }
                GamePhase::Memorizing => self.memorize.stop(&self.clock),
                GamePhase::Stopped => self.memorize.toggle_visibility(),
            },
            KeyCode::Char('n') => self.memorize.reset(),
            KeyCode::Char('+') | KeyCode::Up if self.memorize.phase == GamePhase::Setup => {
                settings.number_of_digits = (settings.number_of_digits + 1).min(MAX_DIGITS);
            }
            KeyCode::Char('-') | KeyCode::Down if self.memorize.phase == GamePhase::Setup => {
                settings.number_of_digits =
                    settings.number_of_digits.saturating_sub(1).max(MIN_DIGITS);
            }
            KeyCode::Char('p') => settings.show_separated = !settings.show_separated,
            KeyCode::Char('t') => settings.show_timer = !settings.show_timer,
            _ => {}
        }
    }
}

fn open_history(cli: &Cli) -> Option<HistoryDb> {
    if cli.no_history {
        return None;
    }
    match HistoryDb::new() {
        Ok(db) => Some(db),
        Err(e) => {
            warn!(error = %e, "history disabled: cannot open database");
            None
        }
    }
}

fn print_sound_table() {
    println!("Major System: digits to consonant sounds\n");
    for line in mnemonic::reference_lines() {
        println!("  {line}");
    }
    println!("\nExamples:");
    for (number, sounds, words) in mnemonic::EXAMPLES {
        println!("  {number} → {sounds} → {words}");
    }
    println!("\nTips:");
    for tip in mnemonic::TIPS {
        println!("  - {tip}");
    }
}

/// Start file logging, returning a warning when the log cannot be written
fn start_logging(log_path: &Path) -> Option<String> {
    telemetry::init_file_logging(log_path).err().map(|e| {
        format!("mnemo: logging disabled, cannot write {}: {e}", log_path.display())
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.help_sounds {
        print_sound_table();
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // still on the cooked terminal, so the warning stays readable
    if let Some(warning) = AppDirs::log_path().and_then(|path| start_logging(&path)) {
        eprintln!("{warning}");
    }
    info!("mnemo v{} starting", env!("CARGO_PKG_VERSION"));

    let store = FileConfigStore::new();
    let config = store.load();
    let history = open_history(&cli);
    let mut app = App::new(config, Some(store), history);

    if let Err(msg) = app.apply_cli(&cli) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, msg).exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.needs_tick_redraw() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo::runtime::TestEventSource;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(Config::default(), None, HistoryDb::open_in_memory().ok())
    }

    fn finish_training(app: &mut App) {
        while app.state == AppState::Training {
            app.handle_key(key(KeyCode::Enter));
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["mnemo"]);

        assert_eq!(cli.range_start, None);
        assert_eq!(cli.range_end, None);
        assert_eq!(cli.preset, None);
        assert_eq!(cli.format, None);
        assert!(!cli.memorize);
        assert!(!cli.help_sounds);
    }

    #[test]
    fn test_cli_range_and_format() {
        let cli = Cli::parse_from(["mnemo", "-s", "08", "-e", "2", "-f", "natural"]);
        assert_eq!(cli.range_start.as_deref(), Some("08"));
        assert_eq!(cli.range_end.as_deref(), Some("2"));
        assert_eq!(cli.format, Some(NumberFormat::Natural));

        let cli = Cli::parse_from(["mnemo", "--start", "10", "--end", "19"]);
        assert_eq!(cli.range_start.as_deref(), Some("10"));
    }

    #[test]
    fn test_cli_preset_conflicts_with_range() {
        assert!(Cli::try_parse_from(["mnemo", "-p", "teens", "-s", "1"]).is_err());
    }

    #[test]
    fn test_cli_digits_bounds() {
        assert!(Cli::try_parse_from(["mnemo", "-m", "-d", "0"]).is_err());
        assert!(Cli::try_parse_from(["mnemo", "-m", "-d", "501"]).is_err());
        let cli = Cli::parse_from(["mnemo", "-m", "-d", "40", "--separated"]);
        assert_eq!(cli.digits, Some(40));
        assert!(cli.separated);
    }

    #[test]
    fn test_apply_cli_starts_training_from_range() {
        let mut app = test_app();
        let cli = Cli::parse_from(["mnemo", "-s", "08", "-e", "2"]);
        app.apply_cli(&cli).unwrap();

        assert_eq!(app.state, AppState::Training);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total_numbers(), 5);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_apply_cli_invalid_range() {
        let mut app = test_app();
        let cli = Cli::parse_from(["mnemo", "-s", "2", "-e", "08"]);
        assert!(app.apply_cli(&cli).is_err());
        assert!(app.session.is_none());
    }

    #[test]
    fn test_apply_cli_preset_and_memorize() {
        let mut app = test_app();
        app.apply_cli(&Cli::parse_from(["mnemo", "-p", "teens"])).unwrap();
        assert_eq!(app.session.as_ref().unwrap().range_start(), "10");

        let mut app = test_app();
        assert!(app.apply_cli(&Cli::parse_from(["mnemo", "-p", "nope"])).is_err());

        let mut app = test_app();
        app.apply_cli(&Cli::parse_from(["mnemo", "-m", "-d", "12"])).unwrap();
        assert_eq!(app.state, AppState::Memorize);
        assert_eq!(app.config.memorization.number_of_digits, 12);
    }

    #[test]
    fn test_menu_navigation_bounds() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.menu_selected, 0);

        for _ in 0..50 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.menu_selected, menu_entries().len() - 1);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Flow::Quit);
    }

    #[test]
    fn test_full_training_flow_records_history() {
        let mut app = test_app();
        // first entry is the Beginner preset
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Training);

        finish_training(&mut app);
        assert_eq!(app.state, AppState::Results);

        let stats = app.statistics.as_ref().unwrap();
        assert_eq!(stats.total_numbers, 10);
        assert_eq!(stats.all_performances.len(), 10);
        assert_eq!(stats.slowest_responses.len(), 10);

        let rows = app.history_rows();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.is_zero_padded && r.attempts == 1));
    }

    #[test]
    fn test_no_history_flag_skips_recording() {
        let mut app = test_app();
        app.apply_cli(&Cli::parse_from(["mnemo", "-s", "0", "-e", "3", "--no-history"]))
            .unwrap();
        finish_training(&mut app);
        assert_eq!(app.state, AppState::Results);
        assert!(app.history_rows().is_empty());
    }

    #[test]
    fn test_results_retry_restarts_same_range() {
        let mut app = test_app();
        app.start_training("10", "12").unwrap();
        finish_training(&mut app);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Training);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total_numbers(), 3);
        assert_eq!(session.completed_numbers(), 0);
    }

    #[test]
    fn test_training_escape_aborts() {
        let mut app = test_app();
        app.start_training("0", "5").unwrap();
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.state, AppState::Menu);
        assert!(app.session.is_none());
        assert_eq!(app.message.as_deref(), Some("Session aborted"));
    }

    #[test]
    fn test_custom_range_entry() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.state, AppState::CustomRange);

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.custom.field, RangeField::End);

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('0')));
        app.handle_key(key(KeyCode::Char('8')));
        app.handle_key(key(KeyCode::Enter));

        // "2" comes after "08" in canonical order
        assert_eq!(app.state, AppState::CustomRange);
        assert!(app.message.as_deref().unwrap().starts_with("Invalid range"));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('0')));
        app.handle_key(key(KeyCode::Char('8')));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Training);
        assert_eq!(app.session.as_ref().unwrap().total_numbers(), 5);
        assert_eq!(app.config.default_range_start, "08");
        assert_eq!(app.config.default_range_end, "2");
    }

    #[test]
    fn test_format_toggle() {
        let mut app = test_app();
        assert_eq!(app.format(), NumberFormat::Padded);
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.format(), NumberFormat::Natural);
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.format(), NumberFormat::Padded);
    }

    #[test]
    fn test_format_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::new(Config::default(), Some(store.clone()), None);

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(store.load().number_format, NumberFormat::Natural);
    }

    #[test]
    fn test_help_and_history_return_to_previous_screen() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.state, AppState::Help);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Menu);

        app.start_training("0", "1").unwrap();
        finish_training(&mut app);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.state, AppState::History);
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_history_sorting_keys() {
        let mut app = test_app();
        app.start_training("0", "4").unwrap();
        finish_training(&mut app);
        app.handle_key(key(KeyCode::Char('s')));

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.history_state.sort_by, HistorySort::AvgTime);
        let rows = app.history_rows();
        assert!(rows
            .windows(2)
            .all(|w| w[0].avg_response_ms <= w[1].avg_response_ms));

        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.history_state.sort_ascending);
        let values: Vec<u8> = app.history_rows().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_memorize_flow() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.state, AppState::Memorize);

        app.handle_key(key(KeyCode::Char('-')));
        assert_eq!(app.config.memorization.number_of_digits, 19);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.memorize.phase, GamePhase::Memorizing);
        assert_eq!(app.memorize.generated_number.len(), 19);
        assert!(app.needs_tick_redraw());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.memorize.phase, GamePhase::Stopped);
        assert!(!app.memorize.is_number_visible);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.memorize.is_number_visible);

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.memorize.phase, GamePhase::Setup);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = test_app();
        app.start_training("0", "3").unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Flow::Quit);
    }

    #[test]
    fn test_start_logging_reports_unwritable_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("mnemo.log");

        let warning = start_logging(&path).unwrap();
        assert!(warning.starts_with("mnemo: logging disabled"));
        assert!(warning.contains("mnemo.log"));
    }

    #[test]
    fn test_quit_saves_memorize_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::new(Config::default(), Some(store.clone()), None);

        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Char('+')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Flow::Quit);

        assert_eq!(store.load().memorization.number_of_digits, 21);
    }

    #[test]
    fn test_menu_quit_saves_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::new(Config::default(), Some(store.clone()), None);
        app.config.memorization.show_timer = true;

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Flow::Quit);
        assert!(store.load().memorization.show_timer);
    }

    #[test]
    fn test_no_history_flag_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let mut app = App::new(Config::default(), Some(store.clone()), None);
        app.apply_cli(&Cli::parse_from(["mnemo", "--no-history"])).unwrap();

        assert_eq!(app.handle_key(key(KeyCode::Esc)), Flow::Quit);
        assert!(store.load().record_history);
    }

    #[test]
    fn test_every_screen_renders() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        for state in [AppState::Menu, AppState::Help, AppState::History, AppState::Memorize] {
            app.state = state;
            terminal.draw(|f| ui::draw(&mut app, f)).unwrap();
        }

        app.state = AppState::Menu;
        app.handle_key(key(KeyCode::Char('c')));
        terminal.draw(|f| ui::draw(&mut app, f)).unwrap();

        app.start_training("00", "99").unwrap();
        app.advance();
        terminal.draw(|f| ui::draw(&mut app, f)).unwrap();

        finish_training(&mut app);
        terminal.draw(|f| ui::draw(&mut app, f)).unwrap();
        app.state = AppState::History;
        terminal.draw(|f| ui::draw(&mut app, f)).unwrap();
    }

    #[test]
    fn test_run_app_headless() {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = test_app();
        app.start_training("0", "1").unwrap();

        tx.send(AppEvent::Key(key(KeyCode::Enter))).unwrap();
        tx.send(AppEvent::Resize).unwrap();
        tx.send(AppEvent::Key(key(KeyCode::Char(' ')))).unwrap();
        tx.send(AppEvent::Key(key(KeyCode::Char('q')))).unwrap();

        run_app(&mut terminal, &mut app, &runner).unwrap();

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.statistics.as_ref().unwrap().total_numbers, 2);
    }
}
