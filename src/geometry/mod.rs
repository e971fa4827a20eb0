//! Geometric primitives for layout analysis.
//!
//! Every coordinate handled by the figure extractor lives in the logical
//! space of the converted page (the HTML rendering of a PDF page), measured
//! in whole units with the origin at the top-left corner and `y` growing
//! downwards. [`Bbox`] is the single rectangle type used for text boxes,
//! blobs, regions, the content region and the final figures.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space.
///
/// `(x, y)` is the top-left corner. Width and height are never negative:
/// constructors clamp them to zero, which yields a zero-area sentinel box
/// rather than an inverted one. Deserialization goes through the same
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawBbox")]
pub struct Bbox {
    /// X coordinate of top-left corner
    pub x: i32,
    /// Y coordinate of top-left corner
    pub y: i32,
    /// Width of the box
    pub width: i32,
    /// Height of the box
    pub height: i32,
}

/// Unvalidated wire form of [`Bbox`].
#[derive(Deserialize)]
struct RawBbox {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<RawBbox> for Bbox {
    fn from(raw: RawBbox) -> Self {
        Bbox::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Bbox {
    /// Create a new box from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// let bbox = Bbox::new(10, 20, 100, 50);
    /// assert_eq!(bbox.x1(), 110);
    /// assert_eq!(bbox.y1(), 70);
    ///
    /// // Negative dimensions collapse to an empty box.
    /// assert_eq!(Bbox::new(0, 0, -5, 10).width, 0);
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Create a box from its top-left and bottom-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// let bbox = Bbox::from_points(10, 20, 110, 70);
    /// assert_eq!(bbox, Bbox::new(10, 20, 100, 50));
    /// ```
    pub fn from_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Right edge x-coordinate, saturating at `i32::MAX`.
    #[inline]
    pub fn x1(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate.
    #[inline]
    pub fn y1(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Move the left edge, keeping the right edge in place.
    pub fn set_x(&mut self, x: i32) {
        let x1 = self.x1();
        self.x = x;
        self.width = x1.saturating_sub(x).max(0);
    }

    /// Move the top edge, keeping the bottom edge in place.
    pub fn set_y(&mut self, y: i32) {
        let y1 = self.y1();
        self.y = y;
        self.height = y1.saturating_sub(y).max(0);
    }

    /// Move the right edge and recompute the width.
    pub fn set_x1(&mut self, x1: i32) {
        self.width = x1.saturating_sub(self.x).max(0);
    }

    /// Move the bottom edge and recompute the height.
    pub fn set_y1(&mut self, y1: i32) {
        self.height = y1.saturating_sub(self.y).max(0);
    }

    /// Area of the box. Computed in `i64` so large boxes never overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// assert_eq!(Bbox::new(0, 0, 100, 50).area(), 5000);
    /// ```
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// True when the box covers no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Horizontal center, rounded down.
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical center, rounded down.
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Check whether the interiors of two boxes overlap.
    ///
    /// Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bbox) -> bool {
        self.x < other.x1() && self.x1() > other.x && self.y < other.y1() && self.y1() > other.y
    }

    /// Check whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Bbox) -> bool {
        other.x >= self.x && other.x1() <= self.x1() && other.y >= self.y && other.y1() <= self.y1()
    }

    /// Intersection of two boxes, or `None` when they do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// let a = Bbox::new(0, 0, 100, 100);
    /// let b = Bbox::new(50, 50, 100, 100);
    /// assert_eq!(a.intersection(&b), Some(Bbox::new(50, 50, 50, 50)));
    /// assert_eq!(a.intersection(&Bbox::new(200, 200, 10, 10)), None);
    /// ```
    pub fn intersection(&self, other: &Bbox) -> Option<Bbox> {
        if !self.intersects(other) {
            return None;
        }
        Some(Bbox::from_points(
            self.x.max(other.x),
            self.y.max(other.y),
            self.x1().min(other.x1()),
            self.y1().min(other.y1()),
        ))
    }

    /// Area shared by two boxes.
    pub fn intersection_area(&self, other: &Bbox) -> i64 {
        self.intersection(other).map_or(0, |b| b.area())
    }

    /// Smallest box containing both boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// let a = Bbox::new(0, 0, 50, 50);
    /// let b = Bbox::new(25, 25, 50, 50);
    /// assert_eq!(a.union(&b), Bbox::new(0, 0, 75, 75));
    /// ```
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox::from_points(
            self.x.min(other.x),
            self.y.min(other.y),
            self.x1().max(other.x1()),
            self.y1().max(other.y1()),
        )
    }

    /// Fraction of this box's area covered by `other`.
    ///
    /// The ratio is relative to `self` (the base box), not the union of both
    /// boxes: a small blob fully inside a large region has a ratio of `1.0`
    /// while the region's ratio against the blob is small. A zero-area base
    /// always yields `0.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    ///
    /// let region = Bbox::new(0, 0, 100, 100);
    /// let blob = Bbox::new(10, 10, 20, 20);
    /// assert_eq!(blob.overlap_ratio(&region), 1.0);
    /// assert_eq!(region.overlap_ratio(&blob), 0.04);
    /// ```
    pub fn overlap_ratio(&self, other: &Bbox) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.intersection_area(other) as f64 / area as f64
    }

    /// Grow the box by `dx` on the left and right and `dy` on the top and bottom.
    pub fn expand(&self, dx: i32, dy: i32) -> Bbox {
        Bbox::from_points(
            self.x.saturating_sub(dx),
            self.y.saturating_sub(dy),
            self.x1().saturating_add(dx),
            self.y1().saturating_add(dy),
        )
    }

    /// Scale every coordinate down by `ratio`, truncating towards zero.
    ///
    /// Used to bring image-pixel boxes into page space.
    pub fn scale_down(&self, ratio: f64) -> Bbox {
        let scale = |v: i32| (f64::from(v) / ratio) as i32;
        Bbox::new(scale(self.x), scale(self.y), scale(self.width), scale(self.height))
    }
}

/// Minimal box enclosing every box in `boxes`, or `None` for an empty input.
///
/// # Examples
///
/// ```
/// use pdfigcap::geometry::{merge_bboxes, Bbox};
///
/// let merged = merge_bboxes(&[Bbox::new(0, 0, 10, 10), Bbox::new(20, 30, 10, 10)]);
/// assert_eq!(merged, Some(Bbox::new(0, 0, 30, 40)));
/// assert_eq!(merge_bboxes(&[]), None);
/// ```
pub fn merge_bboxes(boxes: &[Bbox]) -> Option<Bbox> {
    let (first, rest) = boxes.split_first()?;
    Some(rest.iter().fold(*first, |acc, b| acc.union(b)))
}
