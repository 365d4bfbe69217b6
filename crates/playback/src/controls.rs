use bounds::{AnalysisConfig, Mode};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_THRESHOLD_STEP: u8 = 5;

/// Interactive commands accepted between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    IncreaseThreshold,
    DecreaseThreshold,
    CycleMode,
    TogglePause,
    Quit,
}

impl Command {
    /// Keyboard binding: `+`/`=` and `-` step the threshold, `m` cycles the
    /// mode, `p` pauses, `q` or Esc quits.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' | '=' => Some(Command::IncreaseThreshold),
            '-' => Some(Command::DecreaseThreshold),
            'm' | 'M' => Some(Command::CycleMode),
            'p' | 'P' => Some(Command::TogglePause),
            'q' | 'Q' | '\u{1b}' => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Mutable state of one playback session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub threshold: u8,
    pub mode: Mode,
    pub paused: bool,
    /// Frames decoded so far
    pub frame_count: u64,
}

impl PlaybackState {
    pub fn new(threshold: u8, mode: Mode) -> Self {
        Self {
            threshold,
            mode,
            paused: false,
            frame_count: 0,
        }
    }

    /// Apply one command. Threshold changes saturate at 0 and 255.
    pub fn apply(&mut self, command: Command, step: u8) -> Transition {
        match command {
            Command::IncreaseThreshold => {
                self.threshold = self.threshold.saturating_add(step);
                info!("Threshold increased to: {}", self.threshold);
            }
            Command::DecreaseThreshold => {
                self.threshold = self.threshold.saturating_sub(step);
                info!("Threshold decreased to: {}", self.threshold);
            }
            Command::CycleMode => {
                self.mode = self.mode.next();
                info!("Switched to {} mode", self.mode.description());
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            Command::Quit => return Transition::Quit,
        }
        Transition::Continue
    }

    /// Snapshot handed to the analysis pipeline for one frame.
    pub fn config(&self, min_area: f64) -> AnalysisConfig {
        AnalysisConfig {
            threshold: self.threshold,
            mode: self.mode,
            min_area,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(bounds::DEFAULT_THRESHOLD, Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_saturates_at_both_ends() {
        let mut state = PlaybackState::new(253, Mode::DirectBounds);
        state.apply(Command::IncreaseThreshold, 5);
        assert_eq!(state.threshold, 255);
        state.apply(Command::IncreaseThreshold, 5);
        assert_eq!(state.threshold, 255);

        let mut state = PlaybackState::new(3, Mode::DirectBounds);
        state.apply(Command::DecreaseThreshold, 5);
        assert_eq!(state.threshold, 0);
    }

    #[test]
    fn default_step_moves_by_five() {
        let mut state = PlaybackState::default();
        state.apply(Command::IncreaseThreshold, DEFAULT_THRESHOLD_STEP);
        assert_eq!(state.threshold, 105);
        state.apply(Command::DecreaseThreshold, DEFAULT_THRESHOLD_STEP);
        state.apply(Command::DecreaseThreshold, DEFAULT_THRESHOLD_STEP);
        assert_eq!(state.threshold, 95);
    }

    #[test]
    fn mode_cycles_in_order() {
        let mut state = PlaybackState::new(100, Mode::BinaryOnly);
        state.apply(Command::CycleMode, 5);
        assert_eq!(state.mode, Mode::ContourAnalysis);
        state.apply(Command::CycleMode, 5);
        assert_eq!(state.mode, Mode::DirectBounds);
        state.apply(Command::CycleMode, 5);
        assert_eq!(state.mode, Mode::BinaryOnly);
    }

    #[test]
    fn pause_toggles_and_quit_stops() {
        let mut state = PlaybackState::default();
        assert_eq!(state.apply(Command::TogglePause, 5), Transition::Continue);
        assert!(state.paused);
        state.apply(Command::TogglePause, 5);
        assert!(!state.paused);
        assert_eq!(state.apply(Command::Quit, 5), Transition::Quit);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Command::from_char('+'), Some(Command::IncreaseThreshold));
        assert_eq!(Command::from_char('='), Some(Command::IncreaseThreshold));
        assert_eq!(Command::from_char('-'), Some(Command::DecreaseThreshold));
        assert_eq!(Command::from_char('m'), Some(Command::CycleMode));
        assert_eq!(Command::from_char('p'), Some(Command::TogglePause));
        assert_eq!(Command::from_char('\u{1b}'), Some(Command::Quit));
        assert_eq!(Command::from_char('x'), None);
    }

    #[test]
    fn config_snapshot_carries_state() {
        let state = PlaybackState::new(42, Mode::ContourAnalysis);
        let config = state.config(7.5);
        assert_eq!(config.threshold, 42);
        assert_eq!(config.mode, Mode::ContourAnalysis);
        assert_eq!(config.min_area, 7.5);
    }
}
