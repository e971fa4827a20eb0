//! Text box representation for layout analysis.
//!
//! A text box is one measured line (or, after caption expansion, one caption
//! paragraph) of the converted page, tagged with the page it belongs to and a
//! page-scoped id.

use crate::geometry::Bbox;
use crate::text::{self, CaptionKind};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a caption relative to the column layout.
///
/// Assigned once during caption expansion. Plain text boxes keep
/// [`Alignment::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Starts at a column origin or in the left half of the page
    Left,
    /// Ends at the right margin of a column
    Right,
    /// Spans both columns of a two-column layout
    Multicolumn,
    /// Not yet classified
    #[default]
    Unknown,
}

/// A geometry-tagged span of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// Position on the page
    pub bbox: Bbox,
    /// Number of the page holding the box
    pub page_number: usize,
    /// Page-scoped identifier
    pub id: usize,
    /// Text content
    pub text: String,
    /// Caption alignment, set during caption expansion
    pub alignment: Alignment,
}

impl TextBox {
    /// Create an unaligned text box.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    /// use pdfigcap::layout::{Alignment, TextBox};
    ///
    /// let tb = TextBox::new(1, 0, Bbox::new(50, 500, 300, 12), "Figure 1. Results");
    /// assert!(tb.is_figure_caption());
    /// assert_eq!(tb.alignment, Alignment::Unknown);
    /// ```
    pub fn new(page_number: usize, id: usize, bbox: Bbox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            page_number,
            id,
            text: text.into(),
            alignment: Alignment::Unknown,
        }
    }

    /// Check whether the text starts a caption of the given kind.
    pub fn can_be_caption(&self, kind: CaptionKind) -> bool {
        text::can_be_caption(&self.text, kind)
    }

    /// Shorthand for a figure caption check.
    pub fn is_figure_caption(&self) -> bool {
        self.can_be_caption(CaptionKind::Figure)
    }

    /// Caption kind, figures first, or `None` for plain text.
    pub fn caption_kind(&self) -> Option<CaptionKind> {
        text::classify_caption(&self.text)
    }

    /// True for text boxes that start any kind of caption.
    pub fn is_caption(&self) -> bool {
        self.caption_kind().is_some()
    }

    /// Caption prefix ("Figure 3", "Table S1"), if the box starts a caption.
    pub fn identifier(&self) -> Option<&str> {
        let kind = self.caption_kind()?;
        text::caption_identifier(&self.text, kind)
    }
}
