//! Interactive playback of a video through the bounds pipeline.
//!
//! A [`StreamDriver`] pulls frames from a [`FrameSource`], runs
//! [`bounds::analyze`] with the current [`PlaybackState`], hands both the
//! original and the annotated frame to a [`Presenter`], and applies whatever
//! [`Command`] the presenter reports before moving on.

pub mod controls;
pub mod display;
pub mod driver;
pub mod sources;

use std::time::Duration;
use bounds::{analyze, render, DEFAULT_MIN_AREA};
use image::RgbImage;
use tracing::{info, warn};

pub use controls::{Command, PlaybackState, Transition, DEFAULT_THRESHOLD_STEP};
pub use display::Presenter;
pub use driver::{Driver, DriverError, FrameSource, MemoryFrames, VideoMetadata};
pub use sources::{FileSource, Source};

#[cfg(feature = "ffmpeg")]
pub use driver::ffmpeg::{FFmpegDriver, FFmpegFrames, RawFrameReader};
#[cfg(feature = "window")]
pub use display::window::WindowPresenter;

/// Loop parameters that stay fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSettings {
    pub min_area: f64,
    pub threshold_step: u8,
    /// How long to wait for a key between frames
    pub poll_interval: Duration,
    /// Log progress every this many frames, 0 disables
    pub progress_interval: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_AREA,
            threshold_step: DEFAULT_THRESHOLD_STEP,
            poll_interval: Duration::from_millis(30),
            progress_interval: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    UserQuit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub stop: StopReason,
    pub final_state: PlaybackState,
}

/// Drives decode, analysis, display and commands for one video.
pub struct StreamDriver<S, P> {
    source: S,
    presenter: P,
    state: PlaybackState,
    settings: DriverSettings,
}

impl<S: FrameSource, P: Presenter> StreamDriver<S, P> {
    pub fn new(source: S, presenter: P, state: PlaybackState, settings: DriverSettings) -> Self {
        Self {
            source,
            presenter,
            state,
            settings,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Run until the stream ends or the user quits.
    ///
    /// A decode failure mid-stream ends the run like end-of-stream. Display
    /// failures are returned.
    pub fn run(mut self) -> Result<RunSummary, DriverError> {
        let total = self.source.metadata().frame_count;

        let stop = loop {
            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break StopReason::EndOfStream,
                Err(e) => {
                    warn!("Stopping at frame {}: {}", self.state.frame_count, e);
                    break StopReason::EndOfStream;
                }
            };
            self.state.frame_count += 1;

            self.present(&frame)?;

            let command = self.presenter.poll_command(Some(self.settings.poll_interval))?;
            if let Some(command) = command {
                if self.handle(command, &frame)? == Transition::Quit {
                    break StopReason::UserQuit;
                }
            }

            let interval = self.settings.progress_interval;
            if interval > 0 && self.state.frame_count % interval == 0 {
                info!("Processed {} / {} frames", self.state.frame_count, total);
            }
        };

        match stop {
            StopReason::EndOfStream => info!("Video processing complete"),
            StopReason::UserQuit => info!("Processing interrupted by user"),
        }
        info!("Total frames processed: {}", self.state.frame_count);

        Ok(RunSummary {
            frames: self.state.frame_count,
            stop,
            final_state: self.state,
        })
    }

    fn present(&mut self, frame: &RgbImage) -> Result<(), DriverError> {
        let config = self.state.config(self.settings.min_area);
        let annotated = analyze(frame, &config);

        let mut original = frame.clone();
        render::draw_frame_counter(&mut original, self.state.frame_count);
        self.presenter.show(&original, &annotated.to_rgb())
    }

    /// Apply `command`; if it leaves playback paused, keep serving commands
    /// on the held frame until resume or quit.
    fn handle(&mut self, command: Command, frame: &RgbImage) -> Result<Transition, DriverError> {
        if self.state.apply(command, self.settings.threshold_step) == Transition::Quit {
            return Ok(Transition::Quit);
        }

        while self.state.paused {
            let Some(command) = self.presenter.poll_command(None)? else {
                continue;
            };
            if self.state.apply(command, self.settings.threshold_step) == Transition::Quit {
                return Ok(Transition::Quit);
            }
            if self.state.paused {
                self.present(frame)?;
            }
        }
        Ok(Transition::Continue)
    }
}
