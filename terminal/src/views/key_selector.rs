use super::View;
use crate::app::AppCommand;
use common::ReplayKey;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::cell::Cell;
use std::time::Duration;

pub struct KeySelectorState {
    keys: Vec<ReplayKey>,
    selected_index: usize,
    scroll_offset: Cell<usize>,
}

impl KeySelectorState {
    /// Starts on the most recent (last indexed) replay
    pub fn new(keys: Vec<ReplayKey>) -> Self {
        let selected_index = keys.len().saturating_sub(1);
        Self {
            keys,
            selected_index,
            scroll_offset: Cell::new(0),
        }
    }

    pub fn selected(&self) -> Option<&ReplayKey> {
        self.keys.get(self.selected_index)
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected_index < self.keys.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }
}

impl View for KeySelectorState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected_index = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected_index = self.keys.len().saturating_sub(1);
                None
            }
            KeyCode::Enter => self.selected().cloned().map(AppCommand::OpenReplay),
            _ => None,
        }
    }

    fn update(&mut self, _dt: Duration) {}

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Snake Match Replay")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let list_area = chunks[1];
        let visible_height = (list_area.height.saturating_sub(2) as usize).max(1);

        // Keep the selection on screen
        let mut scroll_offset = self.scroll_offset.get();
        if self.selected_index >= scroll_offset + visible_height {
            scroll_offset = self.selected_index + 1 - visible_height;
        } else if self.selected_index < scroll_offset {
            scroll_offset = self.selected_index;
        }
        self.scroll_offset.set(scroll_offset);

        let items: Vec<ListItem> = self
            .keys
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .map(|(i, key)| {
                let style = if i == self.selected_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>4} ", i), Style::default().fg(Color::DarkGray)),
                    Span::styled(key.start_time.clone(), style),
                    Span::styled(
                        format!("  game {}  snake {}", key.match_id, key.participant_id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("Select Replay ({} indexed)", self.keys.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, list_area);

        let help_text = if self.keys.is_empty() {
            "No replays indexed. Press 'q' to quit."
        } else {
            "↑/k: Up | ↓/j: Down | g/G: First/Latest | Enter: Search logs | q: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn keys() -> Vec<ReplayKey> {
        (0..3)
            .map(|i| ReplayKey::new("2021-01-01 00:00:00", i.to_string(), "7"))
            .collect()
    }

    #[test]
    fn starts_on_most_recent() {
        let selector = KeySelectorState::new(keys());
        assert_eq!(selector.selected().unwrap().match_id, "2");
    }

    #[test]
    fn enter_opens_selected_key() {
        let mut selector = KeySelectorState::new(keys());
        assert!(selector.handle_input(press(KeyCode::Up)).is_none());
        match selector.handle_input(press(KeyCode::Enter)) {
            Some(AppCommand::OpenReplay(key)) => assert_eq!(key.match_id, "1"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn selection_is_clamped() {
        let mut selector = KeySelectorState::new(keys());
        selector.handle_input(press(KeyCode::Down));
        assert_eq!(selector.selected().unwrap().match_id, "2");
        selector.handle_input(press(KeyCode::Char('g')));
        selector.handle_input(press(KeyCode::Up));
        assert_eq!(selector.selected().unwrap().match_id, "0");
    }

    #[test]
    fn empty_selector_ignores_enter() {
        let mut selector = KeySelectorState::new(Vec::new());
        assert!(selector.handle_input(press(KeyCode::Enter)).is_none());
        assert!(matches!(
            selector.handle_input(press(KeyCode::Char('q'))),
            Some(AppCommand::Quit)
        ));
    }
}
