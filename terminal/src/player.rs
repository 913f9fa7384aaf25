use common::TurnSnapshot;

pub const MIN_PLAY_SPEED: f32 = 0.25;
pub const MAX_PLAY_SPEED: f32 = 8.0;

/// Cursor over the reconstructed turns of one replay
pub struct TurnPlayer {
    turns: Vec<TurnSnapshot>,
    position: usize,
    pub is_playing: bool,
    pub play_speed: f32,
}

impl TurnPlayer {
    pub fn new(turns: Vec<TurnSnapshot>) -> Self {
        Self {
            turns,
            position: 0,
            is_playing: false,
            play_speed: 1.0,
        }
    }

    /// Move forward by `count` turns, stopping playback at the last one
    pub fn step_forward(&mut self, count: usize) {
        self.position = (self.position + count).min(self.last_index());
        if self.is_at_end() {
            self.is_playing = false;
        }
    }

    pub fn step_backward(&mut self, count: usize) {
        self.position = self.position.saturating_sub(count);
    }

    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.last_index());
    }

    pub fn seek_to_end(&mut self) {
        self.position = self.last_index();
    }

    pub fn toggle_play(&mut self) {
        // A finished replay cannot be resumed without seeking back
        if self.is_at_end() {
            self.is_playing = false;
        } else {
            self.is_playing = !self.is_playing;
        }
    }

    pub fn speed_up(&mut self) {
        self.play_speed = (self.play_speed * 2.0).min(MAX_PLAY_SPEED);
    }

    pub fn slow_down(&mut self) {
        self.play_speed = (self.play_speed / 2.0).max(MIN_PLAY_SPEED);
    }

    pub fn current(&self) -> Option<&TurnSnapshot> {
        self.turns.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn last_index(&self) -> usize {
        self.turns.len().saturating_sub(1)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.last_index()
    }

    pub fn turns(&self) -> &[TurnSnapshot] {
        &self.turns
    }
}
