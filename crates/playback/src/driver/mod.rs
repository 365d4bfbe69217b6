#[cfg(feature = "ffmpeg")]
pub mod ffmpeg;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use crate::sources::Source;

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error("Failed to initialize driver: {0}")]
    Initialization(String),
    #[error("Video source not found: {0}")]
    NotFound(String),
    #[error("Failed to probe video: {0}")]
    Probe(String),
    #[error("Failed to decode frame: {0}")]
    Decode(String),
    #[error("Display error: {0}")]
    Display(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stream properties reported by the decoder before the first frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Total frames, 0 when the container does not say
    pub frame_count: u64,
    pub codec: String,
    /// Display rotation in degrees. Frames are delivered unrotated.
    pub rotation: i32,
}

/// Sequential decoded frames.
pub trait FrameSource {
    fn metadata(&self) -> &VideoMetadata;

    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, DriverError>;
}

/// A backend that turns a source description into a frame stream.
pub trait Driver {
    /// The type of source this driver works with
    type Source: Source;
    /// The decoded stream handed to the pipeline
    type Frames: FrameSource;

    /// Read stream properties without starting a decode
    fn probe(&self, source: &Self::Source) -> Result<VideoMetadata, DriverError>;

    /// Start decoding `source`
    fn open(&self, source: &Self::Source) -> Result<Self::Frames, DriverError>;
}

/// Frames held in memory, mostly useful for tests and stills.
#[derive(Debug, Clone)]
pub struct MemoryFrames {
    metadata: VideoMetadata,
    frames: std::collections::VecDeque<RgbImage>,
}

impl MemoryFrames {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> Self {
        let (width, height) = frames.first().map(|f| f.dimensions()).unwrap_or((0, 0));
        Self {
            metadata: VideoMetadata {
                width,
                height,
                fps,
                frame_count: frames.len() as u64,
                codec: "rawvideo".to_string(),
                rotation: 0,
            },
            frames: frames.into(),
        }
    }
}

impl FrameSource for MemoryFrames {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>, DriverError> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_frames_drain_in_order() {
        let frames = vec![RgbImage::new(4, 3), RgbImage::from_pixel(4, 3, image::Rgb([9, 9, 9]))];
        let mut source = MemoryFrames::new(frames, 25.0);
        assert_eq!(source.metadata().frame_count, 2);
        assert_eq!((source.metadata().width, source.metadata().height), (4, 3));

        assert_eq!(source.next_frame().unwrap().unwrap().get_pixel(0, 0)[0], 0);
        assert_eq!(source.next_frame().unwrap().unwrap().get_pixel(0, 0)[0], 9);
        assert!(source.next_frame().unwrap().is_none());
    }
}
