//! Figure candidate extraction.
//!
//! Turns the raw blob boxes of a rendered page into figure candidates in page
//! space. Most raw blobs are text lines, page furniture or fragments of one
//! figure; the steps below discard the first two and fuse the last:
//!
//! 1. Scale from image pixels to page units
//! 2. Keep blobs lying mostly inside the content region
//! 3. In two-column layouts, merge blobs crossing the column gap with every
//!    blob sharing their vertical span
//! 4. Trim blobs away from caption text
//! 5. Drop blobs above the content region or no taller than a text line
//! 6. Optionally drop blobs in the band next to a table caption

use crate::config::ExtractionConfig;
use crate::document::PageBlobs;
use crate::error::{Error, Result};
use crate::geometry::{merge_bboxes, Bbox};
use crate::layout::{Layout, TextBox};

/// Ratio between image pixels and page units.
///
/// Taken from the larger image dimension so portrait and landscape renders
/// both scale by their long side.
///
/// # Examples
///
/// ```
/// use pdfigcap::extractors::candidates::scaling_ratio;
/// use pdfigcap::geometry::Bbox;
/// use pdfigcap::layout::Layout;
///
/// let layout = Layout {
///     width: 600,
///     height: 800,
///     row_width: 400,
///     row_height: 12,
///     content_region: Bbox::new(50, 40, 500, 720),
///     num_cols: 1,
///     col_coords: vec![50],
/// };
/// assert_eq!(scaling_ratio(1200, 1600, &layout).unwrap(), 2.0);
/// assert!(scaling_ratio(0, 0, &layout).is_err());
/// ```
pub fn scaling_ratio(image_width: u32, image_height: u32, layout: &Layout) -> Result<f64> {
    let ratio = if image_height > image_width {
        f64::from(image_height) / f64::from(layout.height)
    } else {
        f64::from(image_width) / f64::from(layout.width)
    };
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(Error::MalformedInput(format!(
            "cannot scale a {}x{} image to a {}x{} page",
            image_width, image_height, layout.width, layout.height
        )))
    }
}

/// Extract figure candidates from the blobs of one page.
///
/// `captions` are the caption boxes blobs get trimmed against; `table_captions`
/// drive the table-band filter when it is enabled. Candidates come back
/// sorted top to bottom, then left to right.
pub fn extract_candidates(
    blobs: &PageBlobs,
    captions: &[TextBox],
    table_captions: &[TextBox],
    layout: &Layout,
    config: &ExtractionConfig,
) -> Result<Vec<Bbox>> {
    let ratio = scaling_ratio(blobs.image_width, blobs.image_height, layout)?;
    let content = layout.content_region;

    let mut candidates: Vec<Bbox> = blobs
        .boxes
        .iter()
        .map(|b| b.scale_down(ratio))
        .filter(|b| b.overlap_ratio(&content) >= config.content_overlap)
        .collect();

    if layout.is_two_column() {
        candidates = merge_column_straddlers(candidates, layout);
    }

    candidates = candidates
        .into_iter()
        .filter_map(|blob| {
            captions
                .iter()
                .chain(table_captions.iter())
                .try_fold(blob, |b, caption| trim_against_caption(b, &caption.bbox))
        })
        .filter(|b| b.y >= content.y - config.layout_margin && b.height > layout.row_height)
        .collect();

    if config.suppress_table_regions && !table_captions.is_empty() {
        let before = candidates.len();
        candidates.retain(|b| !in_table_band(b, table_captions, layout, config));
        if candidates.len() < before {
            log::debug!("Dropped {} candidates next to table captions", before - candidates.len());
        }
    }

    candidates.sort_by_key(|b| (b.y, b.x));
    Ok(candidates)
}

/// Merge each blob crossing the column gap with every blob sharing its
/// vertical span, until no such blob is left to merge.
pub fn merge_column_straddlers(mut blobs: Vec<Bbox>, layout: &Layout) -> Vec<Bbox> {
    loop {
        let group = blobs.iter().enumerate().find_map(|(i, b)| {
            if !layout.straddles_columns(b) {
                return None;
            }
            let rows: Vec<usize> = blobs
                .iter()
                .enumerate()
                .filter(|(j, o)| *j != i && o.y < b.y1() && b.y < o.y1())
                .map(|(j, _)| j)
                .collect();
            if rows.is_empty() {
                None
            } else {
                Some((i, rows))
            }
        });

        let Some((i, rows)) = group else {
            return blobs;
        };
        let members: Vec<Bbox> = std::iter::once(blobs[i])
            .chain(rows.iter().map(|&j| blobs[j]))
            .collect();
        let merged = match merge_bboxes(&members) {
            Some(m) => m,
            None => return blobs,
        };
        let mut index = 0;
        blobs.retain(|_| {
            let keep = index != i && !rows.contains(&index);
            index += 1;
            keep
        });
        blobs.push(merged);
    }
}

/// Cut `blob` away from `caption`, keeping the largest remaining piece.
///
/// Returns the blob unchanged when it does not touch the caption and `None`
/// when no cut leaves anything.
///
/// # Examples
///
/// ```
/// use pdfigcap::extractors::candidates::trim_against_caption;
/// use pdfigcap::geometry::Bbox;
///
/// let blob = Bbox::new(50, 100, 400, 420);
/// let caption = Bbox::new(50, 500, 400, 30);
/// assert_eq!(trim_against_caption(blob, &caption), Some(Bbox::new(50, 100, 400, 400)));
/// assert_eq!(trim_against_caption(Bbox::new(60, 505, 100, 10), &caption), None);
/// ```
pub fn trim_against_caption(blob: Bbox, caption: &Bbox) -> Option<Bbox> {
    if !blob.intersects(caption) {
        return Some(blob);
    }
    let cuts = [
        Bbox::from_points(blob.x, blob.y, blob.x1(), caption.y.min(blob.y1())),
        Bbox::from_points(blob.x, caption.y1().max(blob.y), blob.x1(), blob.y1()),
        Bbox::from_points(blob.x, blob.y, caption.x.min(blob.x1()), blob.y1()),
        Bbox::from_points(caption.x1().max(blob.x), blob.y, blob.x1(), blob.y1()),
    ];
    cuts.into_iter()
        .filter(|cut| !cut.is_empty() && !cut.intersects(caption))
        .fold(None, |best: Option<Bbox>, cut| match best {
            Some(b) if b.area() >= cut.area() => Some(b),
            _ => Some(cut),
        })
}

fn in_table_band(
    candidate: &Bbox,
    table_captions: &[TextBox],
    layout: &Layout,
    config: &ExtractionConfig,
) -> bool {
    let band_height = config.table_band_rows * layout.row_height;
    table_captions.iter().any(|tc| {
        let below = Bbox::new(tc.bbox.x, tc.bbox.y1(), tc.bbox.width, band_height);
        let above = Bbox::new(tc.bbox.x, tc.bbox.y - band_height, tc.bbox.width, band_height);
        below.overlap_ratio(candidate) > config.table_overlap
            || above.overlap_ratio(candidate) > config.table_overlap
    })
}
