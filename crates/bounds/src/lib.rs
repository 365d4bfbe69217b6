//! # Foreground Bounds Library
//!
//! Locates the bounding region of bright pixels in a thresholded frame and
//! draws it back onto the frame.
//!
//! ## Core Features
//!
//! - **Direct scan**: one row-major pass over every pixel, exact pixel count
//! - **Contour grouping**: connected components above a minimum area, merged
//!   into one bounding result
//! - **Frame pipeline**: luminance, threshold, strategy selected by [`Mode`],
//!   annotated output
//!
//! ## Quick Start
//!
//! ```rust
//! use bounds::{analyze, AnalysisConfig, Mode};
//! use image::{Rgb, RgbImage};
//!
//! let mut frame = RgbImage::new(64, 48);
//! frame.put_pixel(10, 20, Rgb([255, 255, 255]));
//!
//! let config = AnalysisConfig { mode: Mode::DirectBounds, ..Default::default() };
//! let out = analyze(&frame, &config);
//! assert_eq!(out.bounds().unwrap().support_count, 1);
//! ```

pub mod error;
pub mod types;
pub mod mask;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod render;

// Re-exports for convenience
pub use error::{BoundsError, Result};
pub use types::{BoundsResult, Component, ExtremalPoints, Point, Rect};
pub use mask::BinaryMask;
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{analyze, annotate, binarize, AnalysisConfig, AnnotatedFrame, Mode, DEFAULT_THRESHOLD};

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_mask() -> BinaryMask {
        let mut mask = BinaryMask::new(100, 100);
        mask.fill_rect(20, 20, 60, 60);
        mask
    }

    #[test]
    fn test_strategies_agree_on_solid_square() {
        let mask = create_test_mask();
        let direct = DirectScan.compute_bounds(&mask);
        let grouped = ContourGrouper::new(0.0).compute_bounds(&mask);

        assert_eq!(direct.bounding_rect, Rect::new(20, 20, 60, 60));
        assert_eq!(grouped.bounding_rect, direct.bounding_rect);
        assert_eq!(direct.support_count, 3600);
        // Polygon area through the border pixel centres
        assert_eq!(grouped.support_count, 59 * 59);
    }

    #[test]
    fn test_strategies_on_empty_mask() {
        let mask = BinaryMask::new(100, 100);
        let strategies: [&dyn BoundsExtractor; 2] = [&DirectScan, &ContourGrouper::default()];
        for strategy in strategies {
            let result = strategy.compute_bounds(&mask);
            assert!(!result.found());
            assert!(result.bounding_rect.is_empty());
        }
    }
}
