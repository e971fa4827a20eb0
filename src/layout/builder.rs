//! Layout builder.
//!
//! Infers the [`Layout`] of a document from the text boxes of all of its
//! pages. Only boxes wider than the configured noise threshold take part in
//! the row metrics and the left-margin search; the bottom edge of the content
//! region, the single-column fallback and the second column origin look at
//! every box.

use super::stats::{merge_within, mode, sorted_counts, TieBreak};
use super::{Layout, TextBox};
use crate::config::ExtractionConfig;
use crate::document::Page;
use crate::error::{Error, Result};
use crate::geometry::Bbox;
use indexmap::IndexSet;

/// Builds the document layout from page text boxes.
///
/// # Examples
///
/// ```
/// use pdfigcap::geometry::Bbox;
/// use pdfigcap::layout::{LayoutBuilder, TextBox};
/// use pdfigcap::{ExtractionConfig, Page};
///
/// let boxes = (0..20)
///     .map(|i| TextBox::new(1, i, Bbox::new(60, 80 + 14 * i as i32, 480, 12), "body text line"))
///     .collect();
/// let pages = vec![Page::new(1, 600, 800, boxes)];
///
/// let config = ExtractionConfig::default();
/// let layout = LayoutBuilder::new(&config).build(&pages).unwrap();
/// assert_eq!(layout.num_cols, 1);
/// assert_eq!(layout.row_width, 480);
/// assert_eq!(layout.content_region.x, 60);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> LayoutBuilder<'a> {
    /// Create a builder using the thresholds of `config`.
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Infer the layout of a document.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] when there are no pages or no text box is
    ///   wider than the noise threshold
    /// - [`Error::UnsupportedLayout`] when no content region can be derived or
    ///   the column count is not 1 or 2
    pub fn build(&self, pages: &[Page]) -> Result<Layout> {
        if pages.is_empty() {
            return Err(Error::MalformedInput("document has no pages".to_string()));
        }

        let all: Vec<&TextBox> = pages.iter().flat_map(|p| p.text_boxes.iter()).collect();
        let wide: Vec<&TextBox> = all
            .iter()
            .copied()
            .filter(|tb| tb.bbox.width > self.config.min_text_width)
            .collect();

        let (row_width, row_height) = match (
            mode(wide.iter().map(|tb| tb.bbox.width), TieBreak::Larger),
            mode(wide.iter().map(|tb| tb.bbox.height), TieBreak::Larger),
        ) {
            (Some(w), Some(h)) if w > 0 => (w, h),
            _ => {
                return Err(Error::MalformedInput(format!(
                    "no text box wider than {}",
                    self.config.min_text_width
                )))
            },
        };

        let (width, height) = canonical_page_size(pages);
        let mut content_region = self.content_region(&all, &wide, width, height, row_width)?;

        let num_cols = content_region.width / row_width;
        let col_coords = match num_cols {
            1 => {
                if content_region.x * 4 > width {
                    // Left margin landed in the page interior; fall back to the text extent.
                    let left = all.iter().map(|tb| tb.bbox.x).min().unwrap_or(content_region.x);
                    let right = all.iter().map(|tb| tb.bbox.x1()).max().unwrap_or(content_region.x1());
                    log::debug!(
                        "Single column left margin {} exceeds a quarter page, using text extent {}..{}",
                        content_region.x,
                        left,
                        right
                    );
                    content_region.set_x(left);
                    content_region.set_x1(right);
                }
                vec![content_region.x]
            },
            2 => {
                let threshold = content_region.x + row_width;
                let col2 = mode(
                    all.iter().map(|tb| tb.bbox.x).filter(|x| *x >= threshold),
                    TieBreak::Smaller,
                )
                .ok_or_else(|| {
                    Error::UnsupportedLayout(format!(
                        "no text starts at or beyond x={} for a second column",
                        threshold
                    ))
                })?;
                vec![content_region.x, col2]
            },
            n => {
                return Err(Error::UnsupportedLayout(format!(
                    "content width {} over row width {} gives {} columns",
                    content_region.width, row_width, n
                )))
            },
        };

        let layout = Layout {
            width,
            height,
            row_width,
            row_height,
            content_region,
            num_cols: col_coords.len(),
            col_coords,
        };
        log::debug!(
            "Layout: page {}x{}, row {}x{}, content {:?}, columns {:?}",
            layout.width,
            layout.height,
            layout.row_width,
            layout.row_height,
            layout.content_region,
            layout.col_coords
        );
        Ok(layout)
    }

    fn content_region(
        &self,
        all: &[&TextBox],
        wide: &[&TextBox],
        width: i32,
        height: i32,
        row_width: i32,
    ) -> Result<Bbox> {
        let left_half = sorted_counts(
            wide.iter().map(|tb| tb.bbox.x).filter(|x| x * 2 < width),
            TieBreak::Smaller,
        );
        let left = merge_within(left_half, self.config.padding_tolerance, TieBreak::Smaller)
            .first()
            .map(|c| c.value)
            .ok_or_else(|| {
                Error::UnsupportedLayout("no body text starts in the left half of the page".to_string())
            })?;

        let top = wide.iter().map(|tb| tb.bbox.y).min().unwrap_or(0).max(0);
        let max_x1 = wide.iter().map(|tb| tb.bbox.x1()).max().unwrap_or(width);
        let right = (width - left).min(max_x1);
        if right <= left {
            return Err(Error::UnsupportedLayout(format!(
                "content region collapses: left {} right {}",
                left, right
            )));
        }

        let bottom = all
            .iter()
            .filter(|tb| {
                tb.bbox.x >= left && tb.bbox.x1() <= right && tb.bbox.y >= top && tb.bbox.y1() <= height
            })
            .map(|tb| tb.bbox.y1())
            .max()
            .ok_or_else(|| {
                Error::UnsupportedLayout(format!(
                    "no text box inside horizontal bounds {}..{}",
                    left, right
                ))
            })?;

        log::debug!(
            "Content region left={} top={} right={} bottom={} (row width {})",
            left,
            top,
            right,
            bottom,
            row_width
        );
        Ok(Bbox::from_points(left, top, right, bottom))
    }
}

/// Canonical page size: the only size, the first of two, or the second of many.
fn canonical_page_size(pages: &[Page]) -> (i32, i32) {
    let sizes: IndexSet<(i32, i32)> = pages.iter().map(|p| (p.width, p.height)).collect();
    let index = if sizes.len() > 2 { 1 } else { 0 };
    sizes.get_index(index).copied().unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: usize, x: i32, y: i32, w: i32) -> TextBox {
        TextBox::new(1, id, Bbox::new(x, y, w, 12), "lorem ipsum dolor sit amet")
    }

    fn page(number: usize, width: i32, height: i32, boxes: Vec<TextBox>) -> Page {
        Page::new(number, width, height, boxes)
    }

    #[test]
    fn test_canonical_page_size() {
        let a = page(1, 600, 800, vec![]);
        let b = page(2, 612, 792, vec![]);
        let c = page(3, 500, 700, vec![]);
        assert_eq!(canonical_page_size(&[a.clone()]), (600, 800));
        assert_eq!(canonical_page_size(&[a.clone(), b.clone(), a.clone()]), (600, 800));
        assert_eq!(canonical_page_size(&[a, b, c]), (612, 792));
    }

    #[test]
    fn test_empty_document_is_malformed() {
        let config = ExtractionConfig::default();
        let err = LayoutBuilder::new(&config).build(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_only_narrow_boxes_is_malformed() {
        let config = ExtractionConfig::default();
        let pages = vec![page(1, 600, 800, vec![line(0, 50, 50, 20), line(1, 50, 70, 30)])];
        let err = LayoutBuilder::new(&config).build(&pages).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_two_column_detection() {
        let config = ExtractionConfig::default();
        let mut boxes = Vec::new();
        for i in 0..30 {
            boxes.push(line(2 * i, 50, 60 + 14 * i as i32, 280));
            boxes.push(line(2 * i + 1, 370, 60 + 14 * i as i32, 280));
        }
        let layout = LayoutBuilder::new(&config)
            .build(&[page(1, 700, 900, boxes)])
            .unwrap();
        assert_eq!(layout.num_cols, 2);
        assert_eq!(layout.col_coords, vec![50, 370]);
        assert_eq!(layout.content_region, Bbox::from_points(50, 60, 650, 60 + 14 * 29 + 12));
    }

    #[test]
    fn test_second_column_origin_counts_narrow_boxes() {
        let config = ExtractionConfig::default();
        let mut boxes = Vec::new();
        for i in 0..30 {
            boxes.push(line(i, 50, 60 + 14 * i as i32, 280));
        }
        for i in 0..10 {
            boxes.push(line(30 + i, 370, 60 + 14 * i as i32, 280));
        }
        for i in 0..15 {
            boxes.push(line(40 + i, 372, 300 + 14 * i as i32, 25));
        }
        let layout = LayoutBuilder::new(&config)
            .build(&[page(1, 700, 900, boxes)])
            .unwrap();
        assert_eq!(layout.num_cols, 2);
        assert_eq!(layout.col_coords, vec![50, 372]);
    }

    #[test]
    fn test_single_column_left_margin_fallback() {
        let config = ExtractionConfig::default();
        // Body text starts at x=200 on a 600 wide page, beyond a quarter of the width.
        let mut boxes: Vec<TextBox> = (0..10).map(|i| line(i, 200, 100 + 14 * i as i32, 180)).collect();
        boxes.push(line(10, 150, 300, 20));
        let layout = LayoutBuilder::new(&config)
            .build(&[page(1, 600, 800, boxes)])
            .unwrap();
        assert_eq!(layout.num_cols, 1);
        assert_eq!(layout.content_region.x, 150);
        assert_eq!(layout.content_region.x1(), 380);
        assert_eq!(layout.col_coords, vec![150]);
    }

    #[test]
    fn test_three_columns_unsupported() {
        let config = ExtractionConfig::default();
        let mut boxes = Vec::new();
        for i in 0..10 {
            let y = 60 + 14 * i as i32;
            boxes.push(line(3 * i, 40, y, 180));
            boxes.push(line(3 * i + 1, 250, y, 180));
            boxes.push(line(3 * i + 2, 460, y, 180));
        }
        let err = LayoutBuilder::new(&config)
            .build(&[page(1, 700, 900, boxes)])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedLayout(_)));
    }
}
