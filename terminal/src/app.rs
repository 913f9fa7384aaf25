use anyhow::Result;
use common::ReplayKey;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use search::SearchConfig;
use std::time::Duration;
use tracing::info;

use crate::views::{KeySelectorState, TurnViewerState, View};

#[derive(Debug)]
pub enum AppCommand {
    Quit,
    BackToSelector,
    OpenReplay(ReplayKey),
}

pub enum AppState {
    KeySelector(Box<KeySelectorState>),
    TurnViewer(Box<TurnViewerState>),
}

pub struct App {
    pub state: AppState,
    pub keys: Vec<ReplayKey>,
    pub config: SearchConfig,
}

impl App {
    pub fn new(config: SearchConfig, keys: Vec<ReplayKey>) -> Self {
        let selector = KeySelectorState::new(keys.clone());
        Self {
            state: AppState::KeySelector(Box::new(selector)),
            keys,
            config,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.state {
            AppState::KeySelector(selector) => selector.handle_input(key),
            AppState::TurnViewer(viewer) => viewer.handle_input(key),
        }
    }

    pub fn update(&mut self, dt: Duration) {
        match &mut self.state {
            AppState::KeySelector(selector) => selector.update(dt),
            AppState::TurnViewer(viewer) => viewer.update(dt),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match &self.state {
            AppState::KeySelector(selector) => selector.render(frame),
            AppState::TurnViewer(viewer) => viewer.render(frame),
        }
    }

    /// Search failures propagate and end the session
    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenReplay(key) => {
                let turns = search::replay_turns(&self.config, &key)?;
                info!(turns = turns.len(), "Reconstructed replay ({})", key);
                let viewer = TurnViewerState::new(key, turns);
                self.state = AppState::TurnViewer(Box::new(viewer));
            }
            AppCommand::BackToSelector => {
                let selector = KeySelectorState::new(self.keys.clone());
                self.state = AppState::KeySelector(Box::new(selector));
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}
