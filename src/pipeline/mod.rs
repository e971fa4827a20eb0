//! Figure extraction pipeline.
//!
//! ```text
//! DocumentInput
//!     ↓
//! [LayoutBuilder] (all pages → Layout)
//!     ↓
//! per page, in page order:
//!     [expand_captions]     caption lines → caption paragraphs
//!     [BlobSource]          raw blobs in pixel space
//!     [extract_candidates]  blobs → figure candidates
//!     [sweep_page]          captions + candidates → figures, orphans
//!     ↓
//! [resolve_orphans] (orphan figures ↔ captions on the next page)
//!     ↓
//! Document
//! ```
//!
//! A failure anywhere aborts the document being processed and nothing else.

pub mod blob_source;
pub mod orphans;
pub mod sweep;

pub use blob_source::{BlobSource, InputBlobSource, PrecomputedBlobs, RasterBlobSource};
pub use orphans::resolve_orphans;
pub use sweep::{sweep_page, Region, SweepOutcome, SweepStrategy};

use crate::config::ExtractionConfig;
use crate::document::{Document, DocumentInput, Page};
use crate::error::Result;
use crate::extractors::{expand_captions, extract_candidates};
use crate::layout::{Layout, LayoutBuilder};

/// The figure extractor: orchestrates the full flow for one document.
///
/// # Examples
///
/// ```
/// use pdfigcap::pipeline::{FigureExtractor, PrecomputedBlobs};
/// use pdfigcap::DocumentInput;
///
/// let input = DocumentInput::from_json(r#"{
///     "name": "empty",
///     "pages": [{"number": 1, "width": 600, "height": 800, "text_boxes": [
///         {"x": 50, "y": 60, "width": 500, "height": 12, "text": "Abstract of the paper"}
///     ]}]
/// }"#).unwrap();
///
/// let extractor = FigureExtractor::new();
/// let document = extractor.extract(&input, &PrecomputedBlobs::new()).unwrap();
/// assert_eq!(document.figure_count(), 0);
/// assert_eq!(document.layout.num_cols, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FigureExtractor {
    config: ExtractionConfig,
}

impl FigureExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the figures of a document.
    pub fn extract(&self, input: &DocumentInput, source: &dyn BlobSource) -> Result<Document> {
        self.extract_pages(&input.name, input.to_pages(), source)
    }

    /// Extract figures from already built pages, in the order given.
    pub fn extract_pages(&self, name: &str, mut pages: Vec<Page>, source: &dyn BlobSource) -> Result<Document> {
        let layout = LayoutBuilder::new(&self.config).build(&pages)?;
        log::info!(
            "{}: {} pages, {} column layout, blobs from {}",
            name,
            pages.len(),
            layout.num_cols,
            source.name()
        );

        for (index, page) in pages.iter_mut().enumerate() {
            expand_captions(page, &layout, &self.config);
            if index == 0 && !self.config.include_first_page {
                log::debug!("Page {}: first page skipped", page.number);
                continue;
            }
            self.process_page(page, &layout, source)?;
        }

        let discarded_orphans = resolve_orphans(&mut pages, &layout, &self.config);
        let document = Document {
            name: name.to_string(),
            layout,
            pages,
            discarded_orphans,
        };
        log::info!(
            "{}: {} figures, {} orphan captions",
            name,
            document.figure_count(),
            document.orphan_caption_count()
        );
        Ok(document)
    }

    fn process_page(&self, page: &mut Page, layout: &Layout, source: &dyn BlobSource) -> Result<()> {
        if self.config.match_tables {
            page.captions.extend(page.table_captions.iter().cloned());
            page.captions.sort_by_key(|c| (c.bbox.y, c.bbox.x));
        }

        let candidates = match source.page_blobs(page.number)? {
            Some(blobs) => {
                extract_candidates(&blobs, &page.captions, &page.table_captions, layout, &self.config)?
            },
            None => Vec::new(),
        };
        log::debug!(
            "Page {}: {} captions, {} candidates",
            page.number,
            page.captions.len(),
            candidates.len()
        );

        let outcome = sweep_page(page.captions.clone(), candidates, &page.text_boxes, layout, &self.config);
        page.figures.extend(outcome.figures);
        page.orphan_figure = outcome.orphan_figure;
        page.captions = outcome.orphan_captions.clone();
        page.orphan_captions = outcome.orphan_captions;

        if !page.orphan_captions.is_empty() {
            log::debug!(
                "Page {}: {} captions without a figure",
                page.number,
                page.orphan_captions.len()
            );
        }
        Ok(())
    }
}
