//! Raster blob detection.
//!
//! Finds the bounding boxes of graphical content on a rendered page image:
//! 1. Grayscale conversion
//! 2. Inverse binary threshold (anything darker than the threshold is ink)
//! 3. Square (Chebyshev) dilation to fuse nearby strokes
//! 4. 8-connected component labelling
//!
//! Text lines come out as blobs too; candidate extraction later drops
//! everything that does not look like figure content.

use crate::document::PageBlobs;
use crate::error::{Error, Result};
use crate::geometry::Bbox;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use imageproc::region_labelling::{connected_components, Connectivity};
use indexmap::IndexMap;
use std::path::Path;

/// Default gray level below which a pixel counts as ink.
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Default side of the square dilation kernel, in pixels.
pub const DEFAULT_KERNEL_SIZE: u32 = 5;

/// Blob detector for rendered page images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobDetector {
    /// Pixels with a gray level strictly below this value are foreground.
    pub threshold: u8,
    /// Side of the square dilation kernel; even sizes round up to the
    /// next odd size. 0 or 1 disables dilation.
    pub kernel_size: u32,
}

impl Default for BlobDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}

impl BlobDetector {
    /// Create a detector with the default threshold and kernel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the dilation kernel size.
    pub fn with_kernel_size(mut self, size: u32) -> Self {
        self.kernel_size = size;
        self
    }

    /// Load a page image from disk and detect its blobs.
    pub fn detect_file(&self, path: impl AsRef<Path>) -> Result<PageBlobs> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| Error::Image(format!("failed to load page image {:?}: {}", path, e)))?;
        Ok(self.detect_image(&img))
    }

    /// Detect blobs on a decoded image.
    pub fn detect_image(&self, img: &DynamicImage) -> PageBlobs {
        self.detect_gray(&img.to_luma8())
    }

    /// Detect blobs on a grayscale image.
    ///
    /// # Examples
    ///
    /// ```
    /// use image::{GrayImage, Luma};
    /// use pdfigcap::extractors::BlobDetector;
    ///
    /// let mut img = GrayImage::from_pixel(100, 100, Luma([255]));
    /// for x in 20..40 {
    ///     for y in 30..60 {
    ///         img.put_pixel(x, y, Luma([0]));
    ///     }
    /// }
    /// let blobs = BlobDetector::new().with_kernel_size(0).detect_gray(&img);
    /// assert_eq!(blobs.boxes.len(), 1);
    /// assert_eq!(blobs.boxes[0].x, 20);
    /// assert_eq!(blobs.boxes[0].width, 20);
    /// ```
    pub fn detect_gray(&self, gray: &GrayImage) -> PageBlobs {
        let (width, height) = gray.dimensions();

        let mut mask = GrayImage::new(width, height);
        for (x, y, pixel) in gray.enumerate_pixels() {
            if pixel[0] < self.threshold {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let radius = self.dilation_radius();
        if radius > 0 {
            mask = dilate(&mask, Norm::LInf, radius);
        }

        let boxes = component_boxes(&mask);
        log::debug!("Detected {} blobs on a {}x{} image", boxes.len(), width, height);
        PageBlobs {
            image_width: width,
            image_height: height,
            boxes,
        }
    }

    /// Chebyshev radius of the square kernel; even sizes round up.
    fn dilation_radius(&self) -> u8 {
        (self.kernel_size / 2).min(u32::from(u8::MAX)) as u8
    }
}

/// Bounding boxes of the 8-connected foreground components, in scan order.
fn component_boxes(mask: &GrayImage) -> Vec<Bbox> {
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut extents: IndexMap<u32, (u32, u32, u32, u32)> = IndexMap::new();
    for (x, y, label) in labels.enumerate_pixels() {
        let label = label[0];
        if label == 0 {
            continue;
        }
        extents
            .entry(label)
            .and_modify(|e| {
                e.0 = e.0.min(x);
                e.1 = e.1.min(y);
                e.2 = e.2.max(x);
                e.3 = e.3.max(y);
            })
            .or_insert((x, y, x, y));
    }

    extents
        .into_values()
        .map(|(x0, y0, x1, y1)| Bbox::from_points(x0 as i32, y0 as i32, x1 as i32 + 1, y1 as i32 + 1))
        .collect()
}
