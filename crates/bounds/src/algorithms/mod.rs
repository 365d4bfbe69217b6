pub mod direct_scan;
pub mod extraction;
pub mod grouping;

pub use direct_scan::*;
pub use extraction::*;
pub use grouping::*;
