use std::collections::VecDeque;
use std::time::Duration;
use bounds::{render, Mode};
use image::{Rgb, RgbImage};
use playback::{
    Command, DriverError, DriverSettings, MemoryFrames, PlaybackState, Presenter, StopReason,
    StreamDriver,
};

struct Recorder {
    keys: VecDeque<char>,
    results: Vec<RgbImage>,
}

impl Presenter for &mut Recorder {
    fn show(&mut self, _original: &RgbImage, result: &RgbImage) -> Result<(), DriverError> {
        self.results.push(result.clone());
        Ok(())
    }

    fn poll_command(&mut self, _timeout: Option<Duration>) -> Result<Option<Command>, DriverError> {
        Ok(self.keys.pop_front().and_then(Command::from_char))
    }
}

/// A bright block that drifts one pixel right per frame.
fn drifting_block(frames: u32) -> MemoryFrames {
    let frames = (0..frames)
        .map(|i| {
            let mut f = RgbImage::from_pixel(160, 120, Rgb([0, 0, 0]));
            for y in 60..80 {
                for x in (40 + i)..(70 + i) {
                    f.put_pixel(x, y, Rgb([255, 255, 255]));
                }
            }
            f
        })
        .collect();
    MemoryFrames::new(frames, 30.0)
}

#[test]
fn keyboard_session_walks_every_mode() {
    // '.' is an unbound key and reads as no command
    let mut recorder = Recorder {
        keys: "m.m.".chars().collect(),
        results: Vec::new(),
    };
    let settings = DriverSettings {
        poll_interval: Duration::ZERO,
        ..Default::default()
    };
    let summary = StreamDriver::new(
        drifting_block(6),
        &mut recorder,
        PlaybackState::new(128, Mode::DirectBounds),
        settings,
    )
    .run()
    .unwrap();

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.frames, 6);
    assert_eq!(summary.final_state.mode, Mode::ContourAnalysis);

    // Frame 1: direct bounds, green outline just outside the block
    assert_eq!(*recorder.results[0].get_pixel(39, 70), render::GREEN);
    // Frames 2-3: binary mask
    assert_eq!(*recorder.results[1].get_pixel(39, 70), Rgb([0, 0, 0]));
    assert_eq!(*recorder.results[1].get_pixel(41, 70), Rgb([255, 255, 255]));
    // Frames 4-6: contour analysis follows the block
    assert_eq!(*recorder.results[5].get_pixel(44, 70), render::GREEN);
}

#[test]
fn threshold_keys_clamp_through_a_session() {
    let mut recorder = Recorder {
        keys: "+++++".chars().collect(),
        results: Vec::new(),
    };
    let summary = StreamDriver::new(
        drifting_block(5),
        &mut recorder,
        PlaybackState::new(245, Mode::DirectBounds),
        DriverSettings::default(),
    )
    .run()
    .unwrap();

    assert_eq!(summary.final_state.threshold, 255);
}

#[test]
fn escape_quits() {
    let mut recorder = Recorder {
        keys: "..\u{1b}".chars().collect(),
        results: Vec::new(),
    };
    let summary = StreamDriver::new(
        drifting_block(10),
        &mut recorder,
        PlaybackState::default(),
        DriverSettings::default(),
    )
    .run()
    .unwrap();

    assert_eq!(summary.stop, StopReason::UserQuit);
    assert_eq!(summary.frames, 3);
}
