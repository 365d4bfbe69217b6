use imageproc::contours::{find_contours, BorderType};
use crate::{
    mask::BinaryMask,
    traits::ContourExtractor,
    types::{Component, Point},
};

/// Imageproc-based component extractor (Suzuki-Abe border following, 8-connectivity).
///
/// Only borders whose parent is the image frame are kept: holes and islands
/// inside holes belong to the enclosing component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocContourExtractor;

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_components(&self, mask: &BinaryMask) -> Vec<Component> {
        find_contours::<i32>(mask.as_gray())
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
            .map(|contour| {
                let boundary = contour
                    .points
                    .iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect();
                Component::new(boundary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separate_blobs_are_separate_components() {
        let mut mask = BinaryMask::new(40, 20);
        mask.fill_rect(2, 2, 5, 5);
        mask.fill_rect(20, 10, 8, 4);

        let components = ImageprocContourExtractor.extract_components(&mask);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn diagonal_neighbours_are_connected() {
        let mut mask = BinaryMask::new(10, 10);
        mask.fill_rect(1, 1, 3, 3);
        mask.fill_rect(4, 4, 3, 3);

        let components = ImageprocContourExtractor.extract_components(&mask);
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn holes_and_inner_islands_are_not_components() {
        // Ring with a blob in its hole
        let mut mask = BinaryMask::new(30, 30);
        mask.fill_rect(2, 2, 26, 26);
        for y in 6..24 {
            for x in 6..24 {
                mask.set(x, y, false);
            }
        }
        mask.fill_rect(12, 12, 4, 4);

        let components = ImageprocContourExtractor.extract_components(&mask);
        assert_eq!(components.len(), 1);
        // Outer border of the 26x26 square through pixel centres
        assert_eq!(components[0].area, 25.0 * 25.0);
    }

    #[test]
    fn boundary_stays_on_foreground() {
        let mut mask = BinaryMask::new(16, 16);
        mask.fill_rect(3, 4, 6, 7);

        for component in ImageprocContourExtractor.extract_components(&mask) {
            assert!(!component.boundary.is_empty());
            for p in component.boundary {
                assert!(mask.is_foreground(p.x as u32, p.y as u32));
            }
        }
    }

    #[test]
    fn empty_mask_has_no_components() {
        let mask = BinaryMask::new(12, 12);
        assert!(ImageprocContourExtractor.extract_components(&mask).is_empty());
    }
}
