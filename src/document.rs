//! Document model: extractor input, per-page state and results.
//!
//! A [`DocumentInput`] is what the external conversion step produces: the
//! measured text boxes of every page and, per page, either precomputed blob
//! boxes or the path of a rendered page image. Running the pipeline turns it
//! into a [`Document`] holding the inferred layout and the figures of every
//! page. A [`DocumentReport`] summarizes the outcome for auditing, including
//! documents that failed.

mod figure;
mod page;

pub use figure::{Figure, Resolution, SweepType};
pub use page::Page;

use crate::error::{Error, Result};
use crate::geometry::Bbox;
use crate::layout::{Layout, TextBox};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A measured text box as delivered by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBoxInput {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Text content
    pub text: String,
}

/// Blob boxes found on a rendered page, in image pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBlobs {
    /// Width of the rendered image in pixels
    pub image_width: u32,
    /// Height of the rendered image in pixels
    pub image_height: u32,
    /// Blob bounding boxes in pixel space
    pub boxes: Vec<Bbox>,
}

/// One page of converter output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page number, starting at 1
    pub number: usize,
    /// Page width in page space
    pub width: i32,
    /// Page height in page space
    pub height: i32,
    /// Measured text boxes
    #[serde(default)]
    pub text_boxes: Vec<TextBoxInput>,
    /// Precomputed blobs for the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blobs: Option<PageBlobs>,
    /// Rendered page image, relative to the input file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl PageInput {
    /// Build the working page, numbering text boxes in input order.
    pub fn to_page(&self) -> Page {
        let boxes = self
            .text_boxes
            .iter()
            .enumerate()
            .map(|(id, tb)| {
                TextBox::new(self.number, id, Bbox::new(tb.x, tb.y, tb.width, tb.height), tb.text.clone())
            })
            .collect();
        Page::new(self.number, self.width, self.height, boxes)
    }
}

/// Converter output for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document name, usually the PDF file stem
    pub name: String,
    /// Pages in page order
    pub pages: Vec<PageInput>,
}

impl DocumentInput {
    /// Read a document input from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let input = serde_json::from_reader(BufReader::new(file))?;
        Ok(input)
    }

    /// Parse a document input from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Working pages sorted by page number.
    pub fn to_pages(&self) -> Vec<Page> {
        let mut pages: Vec<Page> = self.pages.iter().map(PageInput::to_page).collect();
        pages.sort_by_key(|p| p.number);
        pages
    }
}

/// A processed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document name
    pub name: String,
    /// Inferred layout
    pub layout: Layout,
    /// Pages with their figures
    pub pages: Vec<Page>,
    /// Orphan figures dropped during orphan resolution
    pub discarded_orphans: usize,
}

impl Document {
    /// Every figure with the number of the page holding it.
    pub fn figures(&self) -> impl Iterator<Item = (usize, &Figure)> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.figures.iter().map(move |f| (p.number, f)))
    }

    /// Total number of figures.
    pub fn figure_count(&self) -> usize {
        self.pages.iter().map(|p| p.figures.len()).sum()
    }

    /// Total number of captions that never got a figure.
    pub fn orphan_caption_count(&self) -> usize {
        self.pages.iter().map(|p| p.orphan_captions.len()).sum()
    }

    /// Summary of a successful run.
    pub fn report(&self) -> DocumentReport {
        DocumentReport {
            name: self.name.clone(),
            outcome: Outcome::Succeeded {
                figures: self.figure_count(),
                orphan_captions: self.orphan_caption_count(),
                discarded_orphans: self.discarded_orphans,
            },
        }
    }
}

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The document was processed
    Succeeded {
        /// Figures extracted
        figures: usize,
        /// Captions left without a figure
        orphan_captions: usize,
        /// Orphan figures dropped
        discarded_orphans: usize,
    },
    /// The document could not be processed
    Failed {
        /// Why processing stopped
        reason: String,
    },
}

/// Per-document audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Document name
    pub name: String,
    /// What happened
    pub outcome: Outcome,
}

impl DocumentReport {
    /// Report a document that failed with `error`.
    pub fn failed(name: impl Into<String>, error: &Error) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Failed {
                reason: error.to_string(),
            },
        }
    }

    /// True when the document was processed.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded { .. })
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Succeeded {
                figures,
                orphan_captions,
                discarded_orphans,
            } => write!(
                f,
                "{}: {} figures, {} orphan captions, {} discarded orphans",
                self.name, figures, orphan_captions, discarded_orphans
            ),
            Outcome::Failed { reason } => write!(f, "{}: FAILED ({})", self.name, reason),
        }
    }
}
