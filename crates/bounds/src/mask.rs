use image::{GrayImage, Luma};
use crate::error::{BoundsError, Result};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Single-channel raster whose pixels are either [`FOREGROUND`] or [`BACKGROUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// All-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    /// Binarize a luminance image: `pixel >= threshold` becomes foreground.
    pub fn threshold(gray: &GrayImage, threshold: u8) -> Self {
        let image = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            if gray.get_pixel(x, y)[0] >= threshold {
                Luma([FOREGROUND])
            } else {
                Luma([BACKGROUND])
            }
        });
        Self { image }
    }

    /// Wrap an image that is already binary.
    pub fn from_gray(image: GrayImage) -> Result<Self> {
        if let Some((x, y, p)) = image
            .enumerate_pixels()
            .find(|(_, _, p)| p[0] != FOREGROUND && p[0] != BACKGROUND)
        {
            return Err(BoundsError::NonBinaryPixel { x, y, value: p[0] });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] == FOREGROUND
    }

    pub fn set(&mut self, x: u32, y: u32, foreground: bool) {
        let value = if foreground { FOREGROUND } else { BACKGROUND };
        self.image.put_pixel(x, y, Luma([value]));
    }

    /// Mark the `width` x `height` block at (`x`, `y`) as foreground, clipped to the mask.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for yy in y..y_end {
            for xx in x..x_end {
                self.set(xx, yy, true);
            }
        }
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> u64 {
        self.image.pixels().filter(|p| p[0] == FOREGROUND).count() as u64
    }

    /// Row-major view of the raw pixel values.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_gray(self) -> GrayImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x + y * width) % 256) as u8]))
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut gray = GrayImage::new(3, 1);
        gray.put_pixel(0, 0, Luma([99]));
        gray.put_pixel(1, 0, Luma([100]));
        gray.put_pixel(2, 0, Luma([101]));

        let mask = BinaryMask::threshold(&gray, 100);
        assert!(!mask.is_foreground(0, 0));
        assert!(mask.is_foreground(1, 0));
        assert!(mask.is_foreground(2, 0));
    }

    #[test]
    fn zero_threshold_selects_everything() {
        let mask = BinaryMask::threshold(&gradient(8, 4), 0);
        assert_eq!(mask.count_foreground(), 32);
    }

    #[test]
    fn raising_threshold_never_adds_foreground() {
        let gray = gradient(32, 16);
        let mut previous = BinaryMask::threshold(&gray, 0);
        for t in 1..=255u8 {
            let current = BinaryMask::threshold(&gray, t);
            for (now, before) in current.as_raw().iter().zip(previous.as_raw()) {
                assert!(*now <= *before, "threshold {t} added a foreground pixel");
            }
            assert!(current.count_foreground() <= previous.count_foreground());
            previous = current;
        }
    }

    #[test]
    fn from_gray_rejects_intermediate_values() {
        let mut gray = GrayImage::new(4, 4);
        gray.put_pixel(2, 3, Luma([128]));
        assert_eq!(
            BinaryMask::from_gray(gray),
            Err(BoundsError::NonBinaryPixel { x: 2, y: 3, value: 128 })
        );

        let mut gray = GrayImage::new(4, 4);
        gray.put_pixel(1, 1, Luma([255]));
        let mask = BinaryMask::from_gray(gray).expect("binary input");
        assert_eq!(mask.count_foreground(), 1);
    }

    #[test]
    fn fill_rect_clips_to_mask() {
        let mut mask = BinaryMask::new(10, 10);
        mask.fill_rect(8, 8, 5, 5);
        assert_eq!(mask.count_foreground(), 4);
    }
}
