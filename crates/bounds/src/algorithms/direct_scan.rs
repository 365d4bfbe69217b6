use crate::{
    mask::{BinaryMask, FOREGROUND},
    traits::BoundsExtractor,
    types::{BoundsResult, ExtremaTracker, Point},
};

/// Single-pass, row-major scan over every pixel, no clustering.
///
/// The four extremes are the first foreground pixels in scan order that reach
/// each extreme value, and the rectangle is rebuilt from them. `support_count`
/// is the exact number of foreground pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectScan;

impl DirectScan {
    pub fn extract(&self, mask: &BinaryMask) -> BoundsResult {
        let width = mask.width() as usize;
        let mut tracker = ExtremaTracker::new();
        let mut count = 0u64;

        if width > 0 {
            for (y, row) in mask.as_raw().chunks_exact(width).enumerate() {
                for (x, &value) in row.iter().enumerate() {
                    if value == FOREGROUND {
                        count += 1;
                        tracker.observe(Point::new(x as i32, y as i32));
                    }
                }
            }
        }

        match tracker.finish() {
            Some(extremes) => BoundsResult {
                extremes: Some(extremes),
                bounding_rect: extremes.rect(),
                support_count: count,
            },
            None => BoundsResult::NOT_FOUND,
        }
    }
}

impl BoundsExtractor for DirectScan {
    fn compute_bounds(&self, mask: &BinaryMask) -> BoundsResult {
        self.extract(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn assert_corner_invariant(result: &BoundsResult) {
        let e = result.extremes.expect("found");
        let r = result.bounding_rect;
        assert_eq!(e.left.x, r.x);
        assert_eq!(e.right.x, r.right());
        assert_eq!(e.top.y, r.y);
        assert_eq!(e.bottom.y, r.bottom());
        for p in [e.top, e.bottom, e.left, e.right] {
            assert!(r.contains(p));
        }
    }

    #[test]
    fn empty_mask() {
        let result = DirectScan.extract(&BinaryMask::new(16, 9));
        assert!(!result.found());
        assert_eq!(result.bounding_rect, Rect::EMPTY);
        assert_eq!(result.support_count, 0);
    }

    #[test]
    fn zero_sized_mask() {
        assert_eq!(DirectScan.extract(&BinaryMask::new(0, 0)), BoundsResult::NOT_FOUND);
    }

    #[test]
    fn single_pixel() {
        let mut mask = BinaryMask::new(20, 10);
        mask.set(7, 3, true);

        let result = DirectScan.extract(&mask);
        let e = result.extremes.expect("found");
        for p in [e.top, e.bottom, e.left, e.right] {
            assert_eq!(p, Point::new(7, 3));
        }
        assert_eq!(result.bounding_rect, Rect::new(7, 3, 1, 1));
        assert_eq!(result.support_count, 1);
    }

    #[test]
    fn filled_rectangle() {
        let mut mask = BinaryMask::new(64, 48);
        mask.fill_rect(10, 12, 25, 7);

        let result = DirectScan.extract(&mask);
        assert_eq!(result.bounding_rect, Rect::new(10, 12, 25, 7));
        assert_eq!(result.support_count, 25 * 7);
        assert_corner_invariant(&result);
    }

    #[test]
    fn first_pixel_in_scan_order_wins_ties() {
        let mut mask = BinaryMask::new(10, 10);
        mask.fill_rect(2, 2, 4, 3);

        let e = DirectScan.extract(&mask).extremes.expect("found");
        assert_eq!(e.top, Point::new(2, 2));
        assert_eq!(e.bottom, Point::new(2, 4));
        assert_eq!(e.left, Point::new(2, 2));
        assert_eq!(e.right, Point::new(5, 2));
    }

    #[test]
    fn scattered_pixels() {
        let mut mask = BinaryMask::new(30, 30);
        for (x, y) in [(15, 2), (3, 10), (27, 10), (9, 25), (20, 25), (27, 18)] {
            mask.set(x, y, true);
        }

        let result = DirectScan.extract(&mask);
        let e = result.extremes.expect("found");
        assert_eq!(e.top, Point::new(15, 2));
        assert_eq!(e.bottom, Point::new(9, 25));
        assert_eq!(e.left, Point::new(3, 10));
        assert_eq!(e.right, Point::new(27, 10));
        assert_eq!(result.bounding_rect, Rect::new(3, 2, 25, 24));
        assert_eq!(result.support_count, 6);
        assert_corner_invariant(&result);
    }

    #[test]
    fn pixels_on_the_border() {
        let mut mask = BinaryMask::new(5, 4);
        mask.set(0, 0, true);
        mask.set(4, 3, true);

        let result = DirectScan.extract(&mask);
        assert_eq!(result.bounding_rect, Rect::new(0, 0, 5, 4));
        assert_corner_invariant(&result);
    }

    #[test]
    fn repeated_runs_match() {
        let mut mask = BinaryMask::new(40, 40);
        mask.fill_rect(5, 5, 3, 3);
        mask.fill_rect(30, 12, 6, 20);

        let first = DirectScan.extract(&mask);
        let second = DirectScan.compute_bounds(&mask);
        assert_eq!(first, second);
    }
}
