//! Document layout inference.
//!
//! This module derives a single document-wide layout model from the noisy
//! text box geometry of every page:
//! - row metrics (the most common text line width and height)
//! - the canonical page size
//! - the content region enclosing the body text
//! - the column count and the x-origin of each column
//!
//! The layout is built once per document and is read-only afterwards.

pub mod builder;
pub mod stats;
pub mod text_box;

use crate::geometry::Bbox;

// Re-export main types
pub use builder::LayoutBuilder;
pub use text_box::{Alignment, TextBox};

/// Document-level layout model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Canonical page width
    pub width: i32,
    /// Canonical page height
    pub height: i32,
    /// Most common text line width
    pub row_width: i32,
    /// Most common text line height
    pub row_height: i32,
    /// Box enclosing the body text of a page
    pub content_region: Bbox,
    /// Number of text columns (1 or 2)
    pub num_cols: usize,
    /// X-origin of each column, left to right
    pub col_coords: Vec<i32>,
}

impl Layout {
    /// X-origin of the second column in a two-column layout.
    pub fn col2(&self) -> Option<i32> {
        if self.num_cols == 2 {
            self.col_coords.get(1).copied()
        } else {
            None
        }
    }

    /// X-origin of the first column.
    pub fn col0(&self) -> i32 {
        self.col_coords.first().copied().unwrap_or(self.content_region.x)
    }

    /// True for two-column layouts.
    pub fn is_two_column(&self) -> bool {
        self.col2().is_some()
    }

    /// Check whether `bbox` crosses the boundary between the two columns.
    ///
    /// Always false in single-column layouts.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    /// use pdfigcap::layout::Layout;
    ///
    /// let layout = Layout {
    ///     width: 700,
    ///     height: 900,
    ///     row_width: 300,
    ///     row_height: 12,
    ///     content_region: Bbox::new(50, 40, 600, 800),
    ///     num_cols: 2,
    ///     col_coords: vec![50, 400],
    /// };
    /// assert!(layout.straddles_columns(&Bbox::new(100, 100, 400, 50)));
    /// assert!(!layout.straddles_columns(&Bbox::new(400, 100, 200, 50)));
    /// ```
    pub fn straddles_columns(&self, bbox: &Bbox) -> bool {
        match self.col2() {
            Some(col2) => bbox.x < col2 && bbox.x1() > col2,
            None => false,
        }
    }

    /// Horizontal middle used to split left and right captions.
    pub fn mid_x(&self) -> i32 {
        match self.col2() {
            Some(col2) => col2,
            None => self.col0() + self.row_width / 2,
        }
    }
}
