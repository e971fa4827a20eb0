//! Caption region estimation.
//!
//! For each strategy, every caption on the page gets one region where its
//! figure is expected. Regions are produced by a sweep over the captions so
//! two captions never claim the same stretch of a column: the boundary moves
//! past each caption as it is processed. Two-column layouts keep one boundary
//! per column; multicolumn captions span the content width and move both.

use super::{Region, SweepStrategy};
use crate::geometry::Bbox;
use crate::layout::{Layout, TextBox};

/// Check whether a caption belongs to a figure spanning both columns.
///
/// A caption crossing the column boundary is multicolumn, and so is one
/// starting well inside the second column (more than a fifth of a row width
/// past its origin), where a single-column caption would be left aligned.
/// Always false for single-column layouts.
///
/// # Examples
///
/// ```
/// use pdfigcap::geometry::Bbox;
/// use pdfigcap::layout::Layout;
/// use pdfigcap::pipeline::sweep::is_multicol_caption;
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
/// assert!(is_multicol_caption(&Bbox::from_points(50, 500, 620, 512), &layout));
/// assert!(!is_multicol_caption(&Bbox::from_points(400, 500, 650, 512), &layout));
/// assert!(!is_multicol_caption(&Bbox::from_points(50, 500, 380, 512), &layout));
/// ```
pub fn is_multicol_caption(caption: &Bbox, layout: &Layout) -> bool {
    match layout.col2() {
        Some(col2) => {
            (caption.x < col2 && caption.x1() > col2) || caption.x > col2 + layout.row_width / 5
        },
        None => false,
    }
}

/// Estimate one region per caption for `strategy`.
pub fn estimate_regions(strategy: SweepStrategy, captions: &[TextBox], layout: &Layout) -> Vec<Region> {
    if captions.is_empty() {
        return Vec::new();
    }
    match strategy {
        SweepStrategy::CaptionBelow => regions_above_captions(captions, layout),
        SweepStrategy::CaptionAbove => regions_below_captions(captions, layout),
        SweepStrategy::CaptionBeside => regions_beside_captions(captions, layout),
    }
}

/// Horizontal extent of the column holding a non-multicolumn caption.
fn column_span(caption: &Bbox, layout: &Layout) -> (i32, i32, usize) {
    let cr = layout.content_region;
    match layout.col2() {
        Some(col2) if caption.x >= col2 => (col2, cr.x1(), 1),
        Some(col2) => (layout.col0(), col2, 0),
        None => (cr.x, cr.x1(), 0),
    }
}

/// Figures above their captions: sweep top-down from the content top.
fn regions_above_captions(captions: &[TextBox], layout: &Layout) -> Vec<Region> {
    let cr = layout.content_region;
    let mut sweep = [cr.y; 2];
    let mut sorted: Vec<&TextBox> = captions.iter().collect();
    sorted.sort_by_key(|c| (c.bbox.y, c.bbox.x));

    sorted
        .into_iter()
        .map(|caption| {
            let multicolumn = is_multicol_caption(&caption.bbox, layout);
            let bbox = if multicolumn {
                let top = sweep[0].max(sweep[1]);
                sweep = [caption.bbox.y1(); 2];
                Bbox::from_points(cr.x, top, cr.x1(), caption.bbox.y)
            } else {
                let (x0, x1, col) = column_span(&caption.bbox, layout);
                let top = sweep[col];
                sweep[col] = caption.bbox.y1();
                Bbox::from_points(x0, top, x1, caption.bbox.y)
            };
            Region {
                bbox,
                caption: caption.clone(),
                multicolumn,
            }
        })
        .collect()
}

/// Figures below their captions: sweep bottom-up from the content bottom.
fn regions_below_captions(captions: &[TextBox], layout: &Layout) -> Vec<Region> {
    let cr = layout.content_region;
    let mut sweep = [cr.y1(); 2];
    let mut sorted: Vec<&TextBox> = captions.iter().collect();
    sorted.sort_by_key(|c| std::cmp::Reverse((c.bbox.y, c.bbox.x)));

    sorted
        .into_iter()
        .map(|caption| {
            let multicolumn = is_multicol_caption(&caption.bbox, layout);
            let bbox = if multicolumn {
                let bottom = sweep[0].min(sweep[1]);
                sweep = [caption.bbox.y; 2];
                Bbox::from_points(cr.x, caption.bbox.y1(), cr.x1(), bottom)
            } else {
                let (x0, x1, col) = column_span(&caption.bbox, layout);
                let bottom = sweep[col];
                sweep[col] = caption.bbox.y;
                Bbox::from_points(x0, caption.bbox.y1(), x1, bottom)
            };
            Region {
                bbox,
                caption: caption.clone(),
                multicolumn,
            }
        })
        .collect()
}

/// Figures beside their captions: sweep bottom-up, region on the far side of
/// the caption across the content width.
fn regions_beside_captions(captions: &[TextBox], layout: &Layout) -> Vec<Region> {
    let cr = layout.content_region;
    let mid = layout.mid_x();
    let mut sweep = cr.y1();
    let mut sorted: Vec<&TextBox> = captions.iter().collect();
    sorted.sort_by_key(|c| std::cmp::Reverse((c.bbox.y, c.bbox.x)));

    sorted
        .into_iter()
        .map(|caption| {
            let c = caption.bbox;
            let bbox = if c.x < mid {
                Bbox::from_points(c.x1(), c.y, cr.x1(), sweep)
            } else {
                Bbox::from_points(cr.x, c.y, c.x, sweep)
            };
            sweep = c.y;
            Region {
                bbox,
                caption: caption.clone(),
                multicolumn: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_1col() -> Layout {
        Layout {
            width: 600,
            height: 800,
            row_width: 500,
            row_height: 12,
            content_region: Bbox::new(50, 40, 500, 720),
            num_cols: 1,
            col_coords: vec![50],
        }
    }

    fn layout_2col() -> Layout {
        Layout {
            width: 700,
            height: 900,
            row_width: 300,
            row_height: 12,
            content_region: Bbox::new(50, 40, 600, 800),
            num_cols: 2,
            col_coords: vec![50, 400],
        }
    }

    fn caption(id: usize, x: i32, y: i32, w: i32) -> TextBox {
        TextBox::new(1, id, Bbox::new(x, y, w, 24), format!("Figure {}", id + 1))
    }

    #[test]
    fn test_single_column_regions_above() {
        let captions = vec![caption(1, 50, 600, 400), caption(0, 50, 300, 400)];
        let regions = estimate_regions(SweepStrategy::CaptionBelow, &captions, &layout_1col());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].caption.id, 0);
        assert_eq!(regions[0].bbox, Bbox::from_points(50, 40, 550, 300));
        assert_eq!(regions[1].bbox, Bbox::from_points(50, 324, 550, 600));
        assert!(!regions[0].multicolumn);
    }

    #[test]
    fn test_single_column_regions_below() {
        let captions = vec![caption(0, 50, 100, 400), caption(1, 50, 400, 400)];
        let regions = estimate_regions(SweepStrategy::CaptionAbove, &captions, &layout_1col());
        assert_eq!(regions[0].caption.id, 1);
        assert_eq!(regions[0].bbox, Bbox::from_points(50, 424, 550, 760));
        assert_eq!(regions[1].bbox, Bbox::from_points(50, 124, 550, 400));
    }

    #[test]
    fn test_two_column_sweeps_are_independent() {
        let captions = vec![caption(0, 50, 300, 300), caption(1, 400, 200, 240)];
        let regions = estimate_regions(SweepStrategy::CaptionBelow, &captions, &layout_2col());
        assert_eq!(regions[0].caption.id, 1);
        assert_eq!(regions[0].bbox, Bbox::from_points(400, 40, 650, 200));
        assert_eq!(regions[1].bbox, Bbox::from_points(50, 40, 400, 300));
    }

    #[test]
    fn test_multicolumn_caption_spans_content() {
        let captions = vec![
            caption(0, 400, 200, 240),
            TextBox::new(1, 1, Bbox::from_points(50, 500, 620, 524), "Figure 2"),
        ];
        let regions = estimate_regions(SweepStrategy::CaptionBelow, &captions, &layout_2col());
        assert!(regions[1].multicolumn);
        assert_eq!(regions[1].bbox, Bbox::from_points(50, 224, 650, 500));
    }

    #[test]
    fn test_beside_regions() {
        let captions = vec![caption(0, 60, 300, 150), caption(1, 420, 100, 120)];
        let regions = estimate_regions(SweepStrategy::CaptionBeside, &captions, &layout_1col());
        assert_eq!(regions[0].caption.id, 0);
        assert_eq!(regions[0].bbox, Bbox::from_points(210, 300, 550, 760));
        assert_eq!(regions[1].bbox, Bbox::from_points(50, 100, 420, 300));
        assert!(regions.iter().all(|r| r.multicolumn));
    }

    #[test]
    fn test_no_captions_no_regions() {
        assert!(estimate_regions(SweepStrategy::CaptionAbove, &[], &layout_1col()).is_empty());
    }
}
