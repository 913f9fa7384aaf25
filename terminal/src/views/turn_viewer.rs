use super::View;
use crate::app::AppCommand;
use crate::player::TurnPlayer;
use crate::render::board::BoardRenderer;
use crate::render::glyphs::{GlyphSet, StandardGlyphs};
use crate::render::types::RenderConfig;
use common::{ReplayKey, TurnSnapshot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Playback rate at speed 1x
const SECONDS_PER_TURN: f32 = 1.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LayoutMode {
    SingleColumn,
    TwoColumn,
}

impl LayoutMode {
    fn from_dimensions(width: u16, height: u16) -> Self {
        const MIN_WIDTH_FOR_TWO_COLUMN: u16 = 100;
        const ASPECT_RATIO_THRESHOLD: f32 = 1.8;

        let aspect_ratio = width as f32 / height.max(1) as f32;
        if width >= MIN_WIDTH_FOR_TWO_COLUMN && aspect_ratio >= ASPECT_RATIO_THRESHOLD {
            LayoutMode::TwoColumn
        } else {
            LayoutMode::SingleColumn
        }
    }
}

pub struct TurnViewerState {
    key: ReplayKey,
    player: TurnPlayer,
    renderer: BoardRenderer<StandardGlyphs>,
    playback_accumulator: f32,
    snake_panel_scroll: u16,
    snake_panel_lines: Cell<u16>,
    snake_panel_scrollbar: RefCell<ScrollbarState>,
}

impl TurnViewerState {
    pub fn new(key: ReplayKey, turns: Vec<TurnSnapshot>) -> Self {
        Self::with_config(key, turns, RenderConfig::default())
    }

    pub fn with_config(key: ReplayKey, turns: Vec<TurnSnapshot>, config: RenderConfig) -> Self {
        Self {
            key,
            player: TurnPlayer::new(turns),
            renderer: BoardRenderer::new(StandardGlyphs::new(config.chars_per_cell)),
            playback_accumulator: 0.0,
            snake_panel_scroll: 0,
            snake_panel_lines: Cell::new(0),
            snake_panel_scrollbar: RefCell::new(ScrollbarState::default()),
        }
    }

    pub fn player(&self) -> &TurnPlayer {
        &self.player
    }

    pub fn key(&self) -> &ReplayKey {
        &self.key
    }

    fn pause_and(&mut self, step: impl FnOnce(&mut TurnPlayer)) {
        self.player.is_playing = false;
        self.playback_accumulator = 0.0;
        step(&mut self.player);
        self.snake_panel_scroll = 0;
    }

    fn scroll_snake_panel_up(&mut self, lines: u16) {
        self.snake_panel_scroll = self.snake_panel_scroll.saturating_sub(lines);
    }

    fn scroll_snake_panel_down(&mut self, lines: u16) {
        let max_scroll = self.snake_panel_lines.get().saturating_sub(1);
        self.snake_panel_scroll = (self.snake_panel_scroll + lines).min(max_scroll);
    }
}

impl View for TurnViewerState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char(' ') => {
                self.player.toggle_play();
                self.playback_accumulator = 0.0;
            }
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.scroll_snake_panel_down(if key.code == KeyCode::PageDown { 5 } else { 1 });
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll_snake_panel_up(if key.code == KeyCode::PageUp { 5 } else { 1 });
            }
            KeyCode::Char('j') | KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.scroll_snake_panel_down(1);
            }
            KeyCode::Char('k') | KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.scroll_snake_panel_up(1);
            }
            KeyCode::Char('j') | KeyCode::Right => self.pause_and(|p| p.step_forward(1)),
            KeyCode::Char('k') | KeyCode::Left => self.pause_and(|p| p.step_backward(1)),
            KeyCode::Char('l') => self.pause_and(|p| p.step_forward(5)),
            KeyCode::Char('h') => self.pause_and(|p| p.step_backward(5)),
            KeyCode::Char('g') | KeyCode::Home => self.pause_and(|p| p.seek(0)),
            KeyCode::Char('G') | KeyCode::End => self.pause_and(TurnPlayer::seek_to_end),
            KeyCode::Char('+') | KeyCode::Char('=') => self.player.speed_up(),
            KeyCode::Char('-') => self.player.slow_down(),
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppCommand::BackToSelector),
            _ => {}
        }
        None
    }

    fn update(&mut self, dt: Duration) {
        if !self.player.is_playing {
            return;
        }
        self.playback_accumulator += dt.as_secs_f32() * self.player.play_speed;
        while self.playback_accumulator >= SECONDS_PER_TURN {
            self.player.step_forward(1);
            self.playback_accumulator -= SECONDS_PER_TURN;
            if !self.player.is_playing {
                self.playback_accumulator = 0.0;
                break;
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        match LayoutMode::from_dimensions(frame.area().width, frame.area().height) {
            LayoutMode::SingleColumn => self.render_single_column(frame),
            LayoutMode::TwoColumn => self.render_two_column(frame),
        }
    }
}

impl TurnViewerState {
    fn render_single_column(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(10),
                Constraint::Length(4),
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);
        self.render_board(frame, chunks[1]);
        self.render_snake_panel(frame, chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_two_column(&self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(frame.area());

        self.render_board(frame, columns[0]);

        let info = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(columns[1]);

        frame.render_widget(self.render_header(), info[0]);
        self.render_snake_panel(frame, info[1]);
        frame.render_widget(self.render_controls(), info[2]);
    }

    fn render_header(&self) -> Paragraph<'_> {
        let turn = self
            .player
            .current()
            .map(|snapshot| snapshot.turn.to_string())
            .unwrap_or_else(|| "-".to_string());
        let title = format!(
            "Game {} / snake {} @ {} | Turn {} ({} of {}) | Speed: {}x | {}",
            self.key.match_id,
            self.key.participant_id,
            self.key.start_time,
            turn,
            self.player.position() + 1,
            self.player.turn_count(),
            self.player.play_speed,
            if self.player.is_playing { "▶ Playing" } else { "⏸ Paused" }
        );

        Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_board(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Board").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(snapshot) = self.player.current() else {
            frame.render_widget(Paragraph::new("No turns reconstructed"), inner);
            return;
        };

        let grid = self.renderer.render(snapshot);
        let board_width = grid.physical_width() + 2;
        let board_height = grid.physical_height() + 2;
        let x_offset = inner.width.saturating_sub(board_width as u16) / 2;
        let y_offset = inner.height.saturating_sub(board_height as u16) / 2;
        let padding = " ".repeat(x_offset as usize);
        let frame_style = Style::default().fg(Color::DarkGray);

        let mut lines: Vec<Line> = Vec::with_capacity(board_height + y_offset as usize);
        lines.extend((0..y_offset).map(|_| Line::from("")));
        lines.push(Line::from(Span::styled(
            format!("{}┌{}┐", padding, "─".repeat(grid.physical_width())),
            frame_style,
        )));
        let food = self.renderer.glyphs().render_food();
        for row in grid.into_lines() {
            let mut spans = vec![Span::raw(padding.clone()), Span::styled("│", frame_style)];
            spans.extend(row.into_iter().map(|ch| {
                let style = if food.chars.iter().flatten().any(|&f| f == ch) {
                    Style::default().fg(Color::Red)
                } else if ch == ' ' {
                    Style::default()
                } else {
                    Style::default().fg(Color::Green)
                };
                Span::styled(ch.to_string(), style)
            }));
            spans.push(Span::styled("│", frame_style));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(Span::styled(
            format!("{}└{}┘", padding, "─".repeat(board_width - 2)),
            frame_style,
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_snake_panel(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        let mut snake_count = 0;

        if let Some(snapshot) = self.player.current() {
            snake_count = snapshot.snakes.len();
            lines.push(Line::from(format!(
                "Board {}x{} | Food: {}",
                snapshot.width,
                snapshot.height,
                snapshot
                    .food
                    .iter()
                    .map(|p| format!("({}, {})", p.x, p.y))
                    .collect::<Vec<_>>()
                    .join(" ")
            )));
            for snake in snapshot.snakes.values() {
                lines.push(Line::from(Span::styled(
                    format!(
                        "Snake {} | length {} | health {}",
                        snake.id, snake.length, snake.health
                    ),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for segment in &snake.segments {
                    lines.push(Line::from(format!(
                        "  {:?} ({}, {})",
                        segment.object, segment.x, segment.y
                    )));
                }
            }
        }

        self.snake_panel_lines.set(lines.len() as u16);
        let mut scrollbar = self.snake_panel_scrollbar.borrow_mut();
        *scrollbar = scrollbar
            .content_length(lines.len())
            .position(self.snake_panel_scroll as usize);

        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!("Snakes ({})", snake_count))
                    .borders(Borders::ALL),
            )
            .scroll((self.snake_panel_scroll, 0));
        frame.render_widget(panel, area);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut *scrollbar,
        );
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let lines = vec![
            Line::from("Space: Play/Pause | j/k: ±1 turn | h/l: ±5 turns | g/G: First/Last | q: Back"),
            Line::from("+/-: Speed | Shift+J/K, PageUp/Down: Scroll snakes"),
        ];

        Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }
}
