#[cfg(feature = "window")]
pub mod window;

use std::time::Duration;
use image::RgbImage;
use crate::controls::Command;
use crate::driver::DriverError;

pub const ORIGINAL_TITLE: &str = "Original";
pub const RESULT_TITLE: &str = "Result";

/// Where frames are shown and commands come from.
pub trait Presenter {
    /// Show the (labelled) original frame and the analysis result side by side.
    fn show(&mut self, original: &RgbImage, result: &RgbImage) -> Result<(), DriverError>;

    /// Wait for the next command. `Some(timeout)` returns `None` once the
    /// timeout elapses; `None` blocks until a command arrives.
    fn poll_command(&mut self, timeout: Option<Duration>) -> Result<Option<Command>, DriverError>;
}

/// Pack an RGB frame into `0x00RRGGBB` words.
pub fn pack_rgb(image: &RgbImage, out: &mut Vec<u32>) {
    out.clear();
    out.extend(image.pixels().map(|p| {
        let [r, g, b] = p.0;
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }));
}
