//! Extracted figures.

use crate::geometry::Bbox;
use crate::layout::TextBox;
use crate::text::CaptionKind;
use serde::{Deserialize, Serialize};

/// Directional strategy that produced a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepType {
    /// Caption sits above its figure
    CaptionsAboveFigures,
    /// Caption sits below its figure
    CaptionsBelowFigures,
    /// Caption sits beside its figure
    CaptionsBesideFigures,
    /// Leftover blobs with no caption found on their page
    Orphan,
}

impl SweepType {
    /// Name used in manifests and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SweepType::CaptionsAboveFigures => "captions_above_figures",
            SweepType::CaptionsBelowFigures => "captions_below_figures",
            SweepType::CaptionsBesideFigures => "captions_beside_figures",
            SweepType::Orphan => "orphan",
        }
    }
}

/// Matching path that produced a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Matched by a directional sweep pass
    Sweep,
    /// Matched by the single-caption fast path
    Greedy,
    /// Orphan figure bound to a caption on the next page
    CarriedOver,
    /// Orphan figure kept without a caption
    Captionless,
}

/// A figure found on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Figure bounds in page space
    pub bbox: Bbox,
    /// Whether the figure spans both columns
    pub multicolumn: bool,
    /// Caption paragraph, if one was matched
    pub caption: Option<TextBox>,
    /// Caption prefix such as "Figure 2"
    pub identifier: Option<String>,
    /// Figure or table, from the caption pattern
    pub kind: CaptionKind,
    /// Strategy that produced the figure
    pub sweep_type: SweepType,
    /// Matching path that produced the figure
    pub resolution: Resolution,
    /// Number of figure candidates merged into `bbox`
    pub blob_count: usize,
}

impl Figure {
    /// Create a figure matched to `caption`.
    pub fn with_caption(
        bbox: Bbox,
        multicolumn: bool,
        caption: TextBox,
        sweep_type: SweepType,
        resolution: Resolution,
    ) -> Self {
        let kind = caption.caption_kind().unwrap_or(CaptionKind::Figure);
        let identifier = caption.identifier().map(str::to_string);
        Self {
            bbox,
            multicolumn,
            caption: Some(caption),
            identifier,
            kind,
            sweep_type,
            resolution,
            blob_count: 1,
        }
    }

    /// Create an orphan figure with no caption yet.
    pub fn orphan(bbox: Bbox, multicolumn: bool) -> Self {
        Self {
            bbox,
            multicolumn,
            caption: None,
            identifier: None,
            kind: CaptionKind::Figure,
            sweep_type: SweepType::Orphan,
            resolution: Resolution::Captionless,
            blob_count: 1,
        }
    }

    /// Record how many candidates were merged into the figure.
    pub fn with_blob_count(mut self, blob_count: usize) -> Self {
        self.blob_count = blob_count;
        self
    }

    /// Attach a caption found later, keeping the geometry.
    pub fn bind_caption(&mut self, caption: TextBox, resolution: Resolution) {
        self.kind = caption.caption_kind().unwrap_or(CaptionKind::Figure);
        self.identifier = caption.identifier().map(str::to_string);
        self.caption = Some(caption);
        self.resolution = resolution;
    }

    /// Caption text, if any.
    pub fn caption_text(&self) -> Option<&str> {
        self.caption.as_ref().map(|c| c.text.as_str())
    }
}
