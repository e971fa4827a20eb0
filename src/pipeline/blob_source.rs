//! Blob sources.
//!
//! The extractor does not care where blob boxes come from. Converters that
//! already ran a contour finder ship them in the document input; otherwise
//! they are detected on the rendered page images.

use crate::document::{DocumentInput, PageBlobs};
use crate::error::Result;
use crate::extractors::BlobDetector;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Trait for supplying the raw blobs of a page.
pub trait BlobSource: Send + Sync {
    /// Blobs of page `page_number`, or `None` when the page has no image.
    fn page_blobs(&self, page_number: usize) -> Result<Option<PageBlobs>>;

    /// Return the name of this source for debugging.
    fn name(&self) -> &'static str;
}

/// Blobs computed ahead of time, keyed by page number.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedBlobs {
    pages: HashMap<usize, PageBlobs>,
}

impl PrecomputedBlobs {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the blobs of one page.
    pub fn with_page(mut self, page_number: usize, blobs: PageBlobs) -> Self {
        self.pages.insert(page_number, blobs);
        self
    }

    /// Collect the blobs shipped in a document input.
    pub fn from_input(input: &DocumentInput) -> Self {
        let pages = input
            .pages
            .iter()
            .filter_map(|p| p.blobs.clone().map(|b| (p.number, b)))
            .collect();
        Self { pages }
    }
}

impl BlobSource for PrecomputedBlobs {
    fn page_blobs(&self, page_number: usize) -> Result<Option<PageBlobs>> {
        Ok(self.pages.get(&page_number).cloned())
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

/// Blobs detected on rendered page images.
#[derive(Debug, Clone, Default)]
pub struct RasterBlobSource {
    detector: BlobDetector,
    images: HashMap<usize, PathBuf>,
}

impl RasterBlobSource {
    /// Create a source using `detector`.
    pub fn new(detector: BlobDetector) -> Self {
        Self {
            detector,
            images: HashMap::new(),
        }
    }

    /// Register the rendered image of a page.
    pub fn with_image(mut self, page_number: usize, path: impl Into<PathBuf>) -> Self {
        self.images.insert(page_number, path.into());
        self
    }

    /// Collect the page images named in a document input. Relative paths are
    /// resolved against `base_dir`.
    pub fn from_input(input: &DocumentInput, base_dir: &Path, detector: BlobDetector) -> Self {
        let images = input
            .pages
            .iter()
            .filter_map(|p| p.image.as_ref().map(|img| (p.number, base_dir.join(img))))
            .collect();
        Self { detector, images }
    }
}

impl BlobSource for RasterBlobSource {
    fn page_blobs(&self, page_number: usize) -> Result<Option<PageBlobs>> {
        match self.images.get(&page_number) {
            Some(path) => self.detector.detect_file(path).map(Some),
            None => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "raster"
    }
}

/// Precomputed blobs where the input has them, image detection elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InputBlobSource {
    precomputed: PrecomputedBlobs,
    raster: RasterBlobSource,
}

impl InputBlobSource {
    /// Build the source for a document input read from `base_dir`.
    pub fn from_input(input: &DocumentInput, base_dir: &Path) -> Self {
        Self {
            precomputed: PrecomputedBlobs::from_input(input),
            raster: RasterBlobSource::from_input(input, base_dir, BlobDetector::default()),
        }
    }
}

impl BlobSource for InputBlobSource {
    fn page_blobs(&self, page_number: usize) -> Result<Option<PageBlobs>> {
        match self.precomputed.page_blobs(page_number)? {
            Some(blobs) => Ok(Some(blobs)),
            None => self.raster.page_blobs(page_number),
        }
    }

    fn name(&self) -> &'static str {
        "input"
    }
}
