use crate::{mask::BinaryMask, types::{BoundsResult, Component}};

/// A strategy that reduces a binary mask to one bounding result.
pub trait BoundsExtractor {
    /// Compute the extremal points and enclosing rectangle of the mask's foreground
    fn compute_bounds(&self, mask: &BinaryMask) -> BoundsResult;
}

/// Trait for connected-component discovery
pub trait ContourExtractor {
    /// Outer boundaries of the outermost foreground components, in discovery order
    fn extract_components(&self, mask: &BinaryMask) -> Vec<Component>;
}
