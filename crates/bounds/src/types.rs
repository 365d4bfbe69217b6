use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel coordinate. Origin is the top-left corner, x grows right, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned rectangle with inclusive pixel bounds.
///
/// A rectangle spanning columns `min_x..=max_x` has `width = max_x - min_x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build the rectangle covering `min_x..=max_x` by `min_y..=max_y`.
    pub fn from_inclusive(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y);
        Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Last column covered by the rectangle.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    /// Last row covered by the rectangle.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32 - 1
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// The four extremal foreground points of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremalPoints {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl ExtremalPoints {
    /// Rectangle reconstructed from the extremes.
    pub fn rect(&self) -> Rect {
        Rect::from_inclusive(self.left.x, self.top.y, self.right.x, self.bottom.y)
    }
}

/// Running extrema over a point sequence.
///
/// Every update uses a strict comparison against the current best, so for each
/// axis the first point in sequence order that reaches the extreme wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtremaTracker {
    current: Option<ExtremalPoints>,
}

impl ExtremaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn observe(&mut self, p: Point) {
        match &mut self.current {
            None => {
                self.current = Some(ExtremalPoints { top: p, bottom: p, left: p, right: p });
            }
            Some(e) => {
                if p.y < e.top.y {
                    e.top = p;
                }
                if p.y > e.bottom.y {
                    e.bottom = p;
                }
                if p.x < e.left.x {
                    e.left = p;
                }
                if p.x > e.right.x {
                    e.right = p;
                }
            }
        }
    }

    pub fn finish(self) -> Option<ExtremalPoints> {
        self.current
    }
}

/// Outcome of one bounds strategy on one mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsResult {
    /// `None` when the mask held nothing the strategy could use.
    pub extremes: Option<ExtremalPoints>,
    pub bounding_rect: Rect,
    /// Foreground pixel count (direct scan) or summed polygon area (contours).
    pub support_count: u64,
}

impl BoundsResult {
    pub const NOT_FOUND: BoundsResult = BoundsResult {
        extremes: None,
        bounding_rect: Rect::EMPTY,
        support_count: 0,
    };

    pub fn found(&self) -> bool {
        self.extremes.is_some()
    }
}

/// Outer boundary of one connected foreground region.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Boundary pixels in tracing order.
    pub boundary: Vec<Point>,
    /// Polygon area of the boundary, not a pixel count.
    pub area: f64,
}

impl Component {
    pub fn new(boundary: Vec<Point>) -> Self {
        let area = polygon_area(&boundary);
        Self { boundary, area }
    }
}

/// Absolute shoelace area of a closed polygon through `points`.
pub fn polygon_area(points: &[Point]) -> f64 {
    use geo::Area;
    use geo_types::{Coord, LineString, Polygon};

    if points.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord { x: p.x as f64, y: p.y as f64 })
        .collect();
    Polygon::new(LineString::new(coords), vec![]).unsigned_area()
}
