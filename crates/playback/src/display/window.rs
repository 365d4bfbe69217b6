use std::thread;
use std::time::{Duration, Instant};
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use crate::controls::Command;
use crate::display::{pack_rgb, Presenter, ORIGINAL_TITLE, RESULT_TITLE};
use crate::driver::DriverError;

const IDLE_SLEEP: Duration = Duration::from_millis(5);

/// Keys read from either window, in priority order.
const BINDINGS: [(Key, char); 8] = [
    (Key::Escape, '\u{1b}'),
    (Key::Q, 'q'),
    (Key::P, 'p'),
    (Key::M, 'm'),
    (Key::Equal, '+'),
    (Key::NumPadPlus, '+'),
    (Key::Minus, '-'),
    (Key::NumPadMinus, '-'),
];

struct Surface {
    window: Window,
    pixels: Vec<u32>,
}

impl Surface {
    fn new(title: &str, width: usize, height: usize) -> Result<Self, DriverError> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| DriverError::Display(e.to_string()))?;
        // Pacing comes from the command poll, not the window
        window.set_target_fps(0);
        Ok(Self {
            window,
            pixels: Vec::with_capacity(width * height),
        })
    }

    fn present(&mut self, image: &RgbImage) -> Result<(), DriverError> {
        pack_rgb(image, &mut self.pixels);
        self.window
            .update_with_buffer(&self.pixels, image.width() as usize, image.height() as usize)
            .map_err(|e| DriverError::Display(e.to_string()))
    }

    fn pressed(&self) -> Option<Command> {
        BINDINGS
            .iter()
            .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .find_map(|(_, c)| Command::from_char(*c))
    }
}

/// Two desktop windows, "Original" and "Result", sharing one keyboard.
pub struct WindowPresenter {
    original: Surface,
    result: Surface,
}

impl WindowPresenter {
    pub fn new(width: u32, height: u32) -> Result<Self, DriverError> {
        let (w, h) = (width as usize, height as usize);
        Ok(Self {
            original: Surface::new(ORIGINAL_TITLE, w, h)?,
            result: Surface::new(RESULT_TITLE, w, h)?,
        })
    }

    fn pump(&mut self) -> Option<Command> {
        self.original.window.update();
        self.result.window.update();

        // Closing either window ends the session
        if !self.original.window.is_open() || !self.result.window.is_open() {
            return Some(Command::Quit);
        }
        self.original.pressed().or_else(|| self.result.pressed())
    }
}

impl Presenter for WindowPresenter {
    fn show(&mut self, original: &RgbImage, result: &RgbImage) -> Result<(), DriverError> {
        self.original.present(original)?;
        self.result.present(result)
    }

    fn poll_command(&mut self, timeout: Option<Duration>) -> Result<Option<Command>, DriverError> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(command) = self.pump() {
                return Ok(Some(command));
            }
            if let Some(deadline) = deadline {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                thread::sleep(IDLE_SLEEP.min(deadline - now));
            } else {
                thread::sleep(IDLE_SLEEP);
            }
        }
    }
}
