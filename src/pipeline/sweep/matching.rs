//! Region/candidate matching.

use super::{Region, SweepStrategy};
use crate::config::ExtractionConfig;
use crate::document::{Figure, Resolution};
use crate::geometry::{merge_bboxes, Bbox};
use crate::layout::{Layout, TextBox};

/// Result of matching one strategy's regions against the candidate pool.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Figures produced by the pass
    pub figures: Vec<Figure>,
    /// Captions left without a figure, in region order
    pub captions: Vec<TextBox>,
    /// Candidates not consumed by any figure
    pub candidates: Vec<Bbox>,
}

/// Check whether a candidate belongs to a region.
///
/// The overlap ratio is taken in both directions so a small blob inside a
/// large region and a large blob covering a thin region both match.
pub fn overlaps_region(candidate: &Bbox, region: &Bbox, threshold: f64) -> bool {
    candidate.overlap_ratio(region) > threshold || region.overlap_ratio(candidate) > threshold
}

/// Indices of the candidates matching `region`.
pub(crate) fn matching_indices(candidates: &[Bbox], region: &Bbox, threshold: f64) -> Vec<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| overlaps_region(c, region, threshold))
        .map(|(i, _)| i)
        .collect()
}

/// Remove the candidates at `indices` from the pool and return them.
pub(crate) fn take_indices(candidates: &mut Vec<Bbox>, indices: &[usize]) -> Vec<Bbox> {
    let mut taken = Vec::with_capacity(indices.len());
    let mut kept = Vec::with_capacity(candidates.len());
    for (i, c) in candidates.drain(..).enumerate() {
        if indices.contains(&i) {
            taken.push(c);
        } else {
            kept.push(c);
        }
    }
    *candidates = kept;
    taken
}

/// Match regions to candidates in region order.
///
/// A region takes every remaining candidate matching it. Two or more
/// candidates make a figure; with fewer the caption is handed back and any
/// matching candidate stays in the pool for the next pass.
pub fn match_regions(
    strategy: SweepStrategy,
    regions: Vec<Region>,
    mut candidates: Vec<Bbox>,
    layout: &Layout,
    config: &ExtractionConfig,
) -> MatchResult {
    let mut result = MatchResult::default();

    for region in regions {
        let indices = matching_indices(&candidates, &region.bbox, config.match_overlap);
        if indices.len() < 2 {
            result.captions.push(region.caption);
            continue;
        }

        let matched = take_indices(&mut candidates, &indices);
        let Some(merged) = merge_bboxes(&matched) else {
            result.captions.push(region.caption);
            continue;
        };
        let bbox = style_cut(merged, strategy, &region.caption.bbox, layout, config);
        let multicolumn = region.multicolumn || layout.straddles_columns(&bbox);
        log::debug!(
            "{}: caption {:?} matched {} candidates into {:?}",
            strategy.name(),
            region.caption.identifier().unwrap_or(""),
            matched.len(),
            bbox
        );
        result.figures.push(Figure::with_caption(
            bbox,
            multicolumn,
            region.caption,
            strategy.sweep_type(),
            Resolution::Sweep,
        )
        .with_blob_count(matched.len()));
    }

    result.candidates = candidates;
    result
}

/// Pad a merged figure so it covers axis labels and frame strokes the blob
/// detector clipped.
///
/// The box grows horizontally by the configured padding and by one row
/// height on the side facing away from the caption, then is clamped to the
/// page.
pub fn style_cut(
    figure: Bbox,
    strategy: SweepStrategy,
    caption: &Bbox,
    layout: &Layout,
    config: &ExtractionConfig,
) -> Bbox {
    let pad = config.style_cut_padding;
    let rh = layout.row_height;
    let (mut x0, mut y0, mut x1, mut y1) = (figure.x - pad, figure.y, figure.x1() + pad, figure.y1());

    match strategy {
        SweepStrategy::CaptionBelow => y0 -= rh,
        SweepStrategy::CaptionAbove => y1 += rh,
        SweepStrategy::CaptionBeside => {
            if caption.center_x() < figure.center_x() {
                x1 += rh;
            } else {
                x0 -= rh;
            }
        },
    }

    Bbox::from_points(x0.max(0), y0.max(0), x1.min(layout.width), y1.min(layout.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
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

    fn region(y0: i32, y1: i32, caption_y: i32) -> Region {
        Region {
            bbox: Bbox::from_points(50, y0, 550, y1),
            caption: TextBox::new(1, 0, Bbox::new(50, caption_y, 400, 24), "Figure 1. Panels"),
            multicolumn: false,
        }
    }

    #[test]
    fn test_overlap_either_direction() {
        let region = Bbox::new(0, 0, 100, 100);
        assert!(overlaps_region(&Bbox::new(10, 10, 20, 20), &region, 0.5));
        assert!(overlaps_region(&Bbox::new(0, 0, 200, 100), &region, 0.4));
        assert!(!overlaps_region(&Bbox::new(90, 90, 100, 100), &region, 0.5));
    }

    #[test]
    fn test_two_candidates_make_a_figure() {
        let config = ExtractionConfig::default();
        let candidates = vec![Bbox::new(60, 100, 200, 150), Bbox::new(300, 100, 200, 150)];
        let result = match_regions(
            SweepStrategy::CaptionBelow,
            vec![region(40, 400, 400)],
            candidates,
            &layout(),
            &config,
        );
        assert_eq!(result.figures.len(), 1);
        assert!(result.candidates.is_empty());
        assert!(result.captions.is_empty());
        assert_eq!(result.figures[0].bbox, Bbox::from_points(56, 88, 504, 250));
        assert_eq!(result.figures[0].resolution, Resolution::Sweep);
    }

    #[test]
    fn test_single_candidate_is_not_enough() {
        let config = ExtractionConfig::default();
        let candidates = vec![Bbox::new(60, 100, 200, 150)];
        let result = match_regions(
            SweepStrategy::CaptionBelow,
            vec![region(40, 400, 400)],
            candidates.clone(),
            &layout(),
            &config,
        );
        assert!(result.figures.is_empty());
        assert_eq!(result.captions.len(), 1);
        assert_eq!(result.candidates, candidates);
    }

    #[test]
    fn test_take_indices_preserves_order() {
        let mut pool = vec![Bbox::new(0, 0, 1, 1), Bbox::new(1, 1, 1, 1), Bbox::new(2, 2, 1, 1)];
        let taken = take_indices(&mut pool, &[0, 2]);
        assert_eq!(taken, vec![Bbox::new(0, 0, 1, 1), Bbox::new(2, 2, 1, 1)]);
        assert_eq!(pool, vec![Bbox::new(1, 1, 1, 1)]);
    }

    #[test]
    fn test_style_cut_clamps_to_page() {
        let config = ExtractionConfig::default();
        let fig = Bbox::from_points(2, 5, 598, 300);
        let cut = style_cut(fig, SweepStrategy::CaptionBelow, &Bbox::new(50, 310, 400, 12), &layout(), &config);
        assert_eq!(cut, Bbox::from_points(0, 0, 600, 300));

        let below = style_cut(fig, SweepStrategy::CaptionAbove, &Bbox::new(50, 0, 400, 4), &layout(), &config);
        assert_eq!(below.y1(), 312);
    }
}
