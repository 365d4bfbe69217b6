use crate::{
    algorithms::ImageprocContourExtractor,
    mask::BinaryMask,
    traits::{BoundsExtractor, ContourExtractor},
    types::{BoundsResult, Component, ExtremaTracker, Rect},
};

pub const DEFAULT_MIN_AREA: f64 = 100.0;

/// Groups connected foreground components, drops the small ones, and merges
/// the extents of the survivors into one result.
///
/// Extremal points are chosen over the pooled boundary points in discovery
/// order (first occurrence wins), so ties can resolve differently than in
/// [`DirectScan`](super::DirectScan). `support_count` is the sum of the
/// surviving polygon areas, each truncated to an integer.
#[derive(Debug, Clone)]
pub struct ContourGrouper<C = ImageprocContourExtractor> {
    pub min_area: f64,
    pub contour_extractor: C,
}

impl ContourGrouper {
    pub fn new(min_area: f64) -> Self {
        Self {
            min_area,
            contour_extractor: ImageprocContourExtractor,
        }
    }
}

impl Default for ContourGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA)
    }
}

impl<C: ContourExtractor> ContourGrouper<C> {
    pub fn with_extractor(min_area: f64, contour_extractor: C) -> Self {
        Self { min_area, contour_extractor }
    }

    /// Components whose area reaches `min_area` (inclusive).
    pub fn surviving_components(&self, mask: &BinaryMask) -> Vec<Component> {
        let mut components = self.contour_extractor.extract_components(mask);
        components.retain(|c| c.area >= self.min_area);
        components
    }

    pub fn group(&self, mask: &BinaryMask) -> BoundsResult {
        merge_components(&self.surviving_components(mask))
    }
}

impl<C: ContourExtractor> BoundsExtractor for ContourGrouper<C> {
    fn compute_bounds(&self, mask: &BinaryMask) -> BoundsResult {
        self.group(mask)
    }
}

/// Merge the extents of `components` into one result.
pub fn merge_components(components: &[Component]) -> BoundsResult {
    let mut tracker = ExtremaTracker::new();
    let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);

    for p in components.iter().flat_map(|c| c.boundary.iter().copied()) {
        tracker.observe(p);
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    match tracker.finish() {
        Some(extremes) => BoundsResult {
            extremes: Some(extremes),
            bounding_rect: Rect::from_inclusive(min_x, min_y, max_x, max_y),
            support_count: components.iter().map(|c| c.area as u64).sum(),
        },
        None => BoundsResult::NOT_FOUND,
    }
}
