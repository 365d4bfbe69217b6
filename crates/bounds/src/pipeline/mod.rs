use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use tracing::debug;
use crate::{
    algorithms::{merge_components, ContourGrouper, DirectScan, DEFAULT_MIN_AREA},
    error::{BoundsError, Result},
    mask::BinaryMask,
    render,
    types::BoundsResult,
};

pub const DEFAULT_THRESHOLD: u8 = 100;

/// What the result surface shows for each frame.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash, Default
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// The thresholded mask itself
    BinaryOnly,
    /// Merged extents of the connected components above the minimum area
    ContourAnalysis,
    /// Extents of every foreground pixel
    #[default]
    DirectBounds,
}

impl Mode {
    /// Next mode in the fixed cycle `binary_only -> contour_analysis -> direct_bounds`.
    pub fn next(self) -> Self {
        match self {
            Mode::BinaryOnly => Mode::ContourAnalysis,
            Mode::ContourAnalysis => Mode::DirectBounds,
            Mode::DirectBounds => Mode::BinaryOnly,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::BinaryOnly => "binary mask display",
            Mode::ContourAnalysis => "contour analysis",
            Mode::DirectBounds => "direct bounds detection",
        }
    }
}

/// Per-frame analysis parameters, copied into every `analyze` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub threshold: u8,
    pub mode: Mode,
    pub min_area: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: Mode::default(),
            min_area: DEFAULT_MIN_AREA,
        }
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub enum AnnotatedFrame {
    /// `Mode::BinaryOnly`: the mask, no bounds computed
    Binary(BinaryMask),
    /// Copy of the colour frame with the strategy's overlay drawn on it
    Annotated { image: RgbImage, bounds: BoundsResult },
}

impl AnnotatedFrame {
    pub fn bounds(&self) -> Option<&BoundsResult> {
        match self {
            AnnotatedFrame::Binary(_) => None,
            AnnotatedFrame::Annotated { bounds, .. } => Some(bounds),
        }
    }

    /// Colour rendering suitable for any display surface.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            AnnotatedFrame::Binary(mask) => {
                RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
                    let v = mask.as_gray().get_pixel(x, y)[0];
                    image::Rgb([v, v, v])
                })
            }
            AnnotatedFrame::Annotated { image, .. } => image.clone(),
        }
    }
}

/// BT.601 luma of a colour frame, `0.299 R + 0.587 G + 0.114 B`, rounded.
pub fn to_luminance(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
        Luma([luma as u8])
    })
}

/// Colour frame to binary mask at `threshold`.
pub fn binarize(frame: &RgbImage, threshold: u8) -> BinaryMask {
    BinaryMask::threshold(&to_luminance(frame), threshold)
}

/// Full frame pipeline: luminance, threshold, then the strategy picked by `config.mode`.
pub fn analyze(frame: &RgbImage, config: &AnalysisConfig) -> AnnotatedFrame {
    let mask = binarize(frame, config.threshold);
    annotate_unchecked(frame, mask, config)
}

/// Run the configured strategy on an already binarized `mask` of `frame`.
pub fn annotate(frame: &RgbImage, mask: BinaryMask, config: &AnalysisConfig) -> Result<AnnotatedFrame> {
    if mask.dimensions() != frame.dimensions() {
        return Err(BoundsError::DimensionMismatch {
            expected: frame.dimensions(),
            actual: mask.dimensions(),
        });
    }
    Ok(annotate_unchecked(frame, mask, config))
}

fn annotate_unchecked(frame: &RgbImage, mask: BinaryMask, config: &AnalysisConfig) -> AnnotatedFrame {
    match config.mode {
        Mode::BinaryOnly => AnnotatedFrame::Binary(mask),
        Mode::ContourAnalysis => {
            let components = ContourGrouper::new(config.min_area).surviving_components(&mask);
            let bounds = merge_components(&components);
            debug!(
                components = components.len(),
                area = bounds.support_count,
                rect = ?bounds.bounding_rect,
                extremes = ?bounds.extremes,
                "contour analysis"
            );
            let mut image = frame.clone();
            render::draw_contour_summary(&mut image, &bounds);
            AnnotatedFrame::Annotated { image, bounds }
        }
        Mode::DirectBounds => {
            let bounds = DirectScan.extract(&mask);
            debug!(
                pixels = bounds.support_count,
                rect = ?bounds.bounding_rect,
                extremes = ?bounds.extremes,
                "direct bounds"
            );
            let mut image = frame.clone();
            render::draw_direct_summary(&mut image, &bounds);
            AnnotatedFrame::Annotated { image, bounds }
        }
    }
}
