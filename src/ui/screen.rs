use ratatui::Frame;

use crate::{
    ui::{
        help::render_help, history::render_history, memorize::render_memorize,
        menu::render_custom_range, menu::render_menu, results::render_results,
        training::render_training,
    },
    App, AppState,
};

/// A UI screen boundary: one renderer per app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_menu(app, f);
    }
}

/// Menu with the range form drawn over it
pub struct CustomRangeScreen;

impl Screen for CustomRangeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_menu(app, f);
        render_custom_range(app, f);
    }
}

pub struct TrainingScreen;

impl Screen for TrainingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_training(app, f);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_results(app, f);
    }
}

pub struct HistoryScreen;

impl Screen for HistoryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_history(app, f);
    }
}

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_help(app, f);
    }
}

pub struct MemorizeScreen;

impl Screen for MemorizeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_memorize(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::CustomRange => Box::new(CustomRangeScreen),
        AppState::Training => Box::new(TrainingScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::History => Box::new(HistoryScreen),
        AppState::Help => Box::new(HelpScreen),
        AppState::Memorize => Box::new(MemorizeScreen),
    }
}
