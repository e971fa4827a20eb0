//! Single-caption fast path.
//!
//! With one caption left on a page there is no competition between
//! captions, so instead of requiring two candidates in a region the figure is
//! taken from whichever direction holds the most candidate area. The result
//! is clamped to the caption's column and its top and right edges are
//! adjusted against the surrounding text.

use super::matching::{matching_indices, take_indices};
use super::regions::{estimate_regions, is_multicol_caption};
use super::SweepStrategy;
use crate::config::ExtractionConfig;
use crate::document::{Figure, Resolution};
use crate::geometry::{merge_bboxes, Bbox};
use crate::layout::{Layout, TextBox};

/// Try to build the figure of a lone caption.
///
/// Matched candidates are removed from `candidates`. Returns `None`, leaving
/// the pool untouched, when no direction holds any candidate area.
pub fn greedy_match(
    caption: &TextBox,
    candidates: &mut Vec<Bbox>,
    text_boxes: &[TextBox],
    layout: &Layout,
    config: &ExtractionConfig,
) -> Option<Figure> {
    let mut best: Option<(SweepStrategy, super::Region, i64)> = None;
    for strategy in SweepStrategy::ORDER {
        let Some(region) = estimate_regions(strategy, std::slice::from_ref(caption), layout)
            .into_iter()
            .next()
        else {
            continue;
        };
        let score: i64 = candidates.iter().map(|c| c.intersection_area(&region.bbox)).sum();
        if score > best.as_ref().map_or(0, |(_, _, s)| *s) {
            best = Some((strategy, region, score));
        }
    }

    let (strategy, region, score) = best?;
    let indices = matching_indices(candidates, &region.bbox, config.match_overlap);
    if indices.is_empty() {
        log::debug!(
            "Greedy: best direction {} has area {} but no matching candidate",
            strategy.name(),
            score
        );
        return None;
    }
    let matched = take_indices(candidates, &indices);
    let merged = merge_bboxes(&matched)?;

    let spans_columns = region.multicolumn || is_multicol_caption(&caption.bbox, layout);
    let clamped = clamp_to_column(merged, &caption.bbox, spans_columns, layout);
    let bbox = snap_to_text_edges(clamped, caption, text_boxes, layout);
    let multicolumn = region.multicolumn || layout.straddles_columns(&bbox);

    log::debug!(
        "Greedy: caption {:?} matched {} candidates {} into {:?}",
        caption.identifier().unwrap_or(""),
        matched.len(),
        strategy.name(),
        bbox
    );
    Some(Figure::with_caption(
        bbox,
        multicolumn,
        caption.clone(),
        strategy.sweep_type(),
        Resolution::Greedy,
    )
    .with_blob_count(matched.len()))
}

/// Clamp a figure horizontally to the column of its caption.
fn clamp_to_column(figure: Bbox, caption: &Bbox, spans_columns: bool, layout: &Layout) -> Bbox {
    let cr = layout.content_region;
    let (lo, hi) = match layout.col2() {
        Some(col2) if !spans_columns && caption.x < col2 => (cr.x, col2),
        Some(col2) if !spans_columns => (col2, cr.x1()),
        _ => (cr.x, cr.x1()),
    };
    let clamped = Bbox::from_points(figure.x.max(lo), figure.y, figure.x1().min(hi), figure.y1());
    if clamped.is_empty() {
        figure
    } else {
        clamped
    }
}

/// Adjust the top and right edges against text boxes crossing them.
///
/// A box crosses the top edge when it starts above the figure and ends inside
/// it, and the right edge when it starts inside the figure and ends past it.
/// Paragraph lines (at least half a row wide) are body text, so the figure
/// shrinks to exclude them. Shorter boxes are labels belonging to the figure,
/// so it grows to include them.
fn snap_to_text_edges(figure: Bbox, caption: &TextBox, text_boxes: &[TextBox], layout: &Layout) -> Bbox {
    let paragraph_width = layout.row_width / 2;
    let mut bbox = figure;

    for tb in text_boxes {
        if tb.id == caption.id || tb.is_caption() || !tb.bbox.intersects(&bbox) {
            continue;
        }
        let t = tb.bbox;
        let is_paragraph = t.width >= paragraph_width;

        if t.y < bbox.y && t.y1() > bbox.y {
            let mut snapped = bbox;
            snapped.set_y(if is_paragraph { t.y1() } else { t.y });
            if !snapped.is_empty() {
                bbox = snapped;
            }
        }
        if t.x > bbox.x && t.x < bbox.x1() && t.x1() > bbox.x1() {
            let mut snapped = bbox;
            snapped.set_x1(if is_paragraph { t.x } else { t.x1() });
            if !snapped.is_empty() {
                bbox = snapped;
            }
        }
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SweepType;

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

    fn caption(x: i32, y: i32, w: i32) -> TextBox {
        TextBox::new(1, 0, Bbox::new(x, y, w, 24), "Figure 1. Single panel")
    }

    #[test]
    fn test_picks_direction_with_most_area() {
        let config = ExtractionConfig::default();
        let mut candidates = vec![Bbox::from_points(60, 100, 540, 480)];
        let fig = greedy_match(&caption(50, 500, 400), &mut candidates, &[], &layout_1col(), &config).unwrap();
        assert_eq!(fig.sweep_type, SweepType::CaptionsBelowFigures);
        assert_eq!(fig.resolution, Resolution::Greedy);
        assert_eq!(fig.bbox, Bbox::from_points(60, 100, 540, 480));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_figure_below_caption() {
        let config = ExtractionConfig::default();
        let mut candidates = vec![Bbox::from_points(60, 150, 540, 400)];
        let fig = greedy_match(&caption(50, 100, 400), &mut candidates, &[], &layout_1col(), &config).unwrap();
        assert_eq!(fig.sweep_type, SweepType::CaptionsAboveFigures);
    }

    #[test]
    fn test_no_area_no_figure() {
        let config = ExtractionConfig::default();
        let mut candidates = vec![Bbox::new(0, 0, 0, 0)];
        assert!(greedy_match(&caption(50, 500, 400), &mut candidates, &[], &layout_1col(), &config).is_none());
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_clamped_to_caption_column() {
        let config = ExtractionConfig::default();
        let mut candidates = vec![Bbox::from_points(60, 100, 420, 400)];
        let fig = greedy_match(&caption(50, 450, 300), &mut candidates, &[], &layout_2col(), &config).unwrap();
        assert_eq!(fig.bbox, Bbox::from_points(60, 100, 400, 400));
        assert!(!fig.multicolumn);
    }

    #[test]
    fn test_snap_to_text_edges() {
        let l = layout_1col();
        let cap = caption(50, 500, 400);
        let fig = Bbox::from_points(60, 100, 400, 480);
        let text = vec![
            TextBox::new(1, 1, Bbox::from_points(50, 90, 550, 110), "a paragraph line running across the column"),
            TextBox::new(1, 2, Bbox::from_points(380, 200, 430, 212), "x axis"),
        ];
        let snapped = snap_to_text_edges(fig, &cap, &text, &l);
        assert_eq!(snapped, Bbox::from_points(60, 110, 430, 480));
    }
}
