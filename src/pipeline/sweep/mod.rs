//! Directional sweep matching of captions to figure candidates.
//!
//! Three strategies run in a fixed order, each working on what the previous
//! one left over:
//!
//! ```text
//! captions + candidates
//!     ↓
//! [CaptionAbove]   figure expected below its caption
//!     ↓
//! [CaptionBelow]   figure expected above its caption
//!     ↓
//! [CaptionBeside]  figure expected next to its caption
//!     ↓
//! leftover candidates → orphan figure, leftover captions → orphan captions
//! ```
//!
//! Whenever exactly one caption remains, the single-caption fast path in
//! [`greedy`] gets a chance before the next pass and once after the last.

pub mod greedy;
pub mod matching;
pub mod regions;

pub use greedy::greedy_match;
pub use matching::{match_regions, overlaps_region, style_cut, MatchResult};
pub use regions::{estimate_regions, is_multicol_caption};

use crate::config::ExtractionConfig;
use crate::document::{Figure, SweepType};
use crate::geometry::{merge_bboxes, Bbox};
use crate::layout::{Layout, TextBox};

/// Directional matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepStrategy {
    /// Caption above its figure; regions extend below captions
    CaptionAbove,
    /// Caption below its figure; regions extend above captions
    CaptionBelow,
    /// Caption beside its figure; regions extend sideways
    CaptionBeside,
}

impl SweepStrategy {
    /// Strategies in the order they run.
    pub const ORDER: [SweepStrategy; 3] = [
        SweepStrategy::CaptionAbove,
        SweepStrategy::CaptionBelow,
        SweepStrategy::CaptionBeside,
    ];

    /// Sweep type recorded on figures this strategy produces.
    pub fn sweep_type(self) -> SweepType {
        match self {
            SweepStrategy::CaptionAbove => SweepType::CaptionsAboveFigures,
            SweepStrategy::CaptionBelow => SweepType::CaptionsBelowFigures,
            SweepStrategy::CaptionBeside => SweepType::CaptionsBesideFigures,
        }
    }

    /// Name for logging.
    pub fn name(self) -> &'static str {
        self.sweep_type().as_str()
    }
}

/// Area where the figure of a caption is expected.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Expected figure area
    pub bbox: Bbox,
    /// Caption the region belongs to
    pub caption: TextBox,
    /// Whether the region spans both columns
    pub multicolumn: bool,
}

/// Everything the sweep found on one page.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Figures matched to captions
    pub figures: Vec<Figure>,
    /// Leftover candidates merged into one figure
    pub orphan_figure: Option<Figure>,
    /// Captions no figure was found for
    pub orphan_captions: Vec<TextBox>,
}

impl SweepOutcome {
    /// Candidates consumed by matched figures.
    pub fn matched_blob_count(&self) -> usize {
        self.figures.iter().map(|f| f.blob_count).sum()
    }

    /// Candidates merged into the orphan figure.
    pub fn orphan_blob_count(&self) -> usize {
        self.orphan_figure.as_ref().map_or(0, |f| f.blob_count)
    }
}

/// Match the captions of one page to its figure candidates.
///
/// Every sweep-matched figure consumes at least two candidates, the fast
/// path at least one; whatever is left ends up in exactly one orphan figure.
pub fn sweep_page(
    captions: Vec<TextBox>,
    candidates: Vec<Bbox>,
    text_boxes: &[TextBox],
    layout: &Layout,
    config: &ExtractionConfig,
) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();
    let mut captions = captions;
    let mut candidates = candidates;
    // The fast path only depends on the pool, so one failed attempt covers
    // every later one until a pass changes the pool.
    let mut greedy_failed = false;

    for strategy in SweepStrategy::ORDER {
        if captions.is_empty() || candidates.is_empty() {
            break;
        }
        if captions.len() == 1 && !greedy_failed {
            match greedy_match(&captions[0], &mut candidates, text_boxes, layout, config) {
                Some(figure) => {
                    outcome.figures.push(figure);
                    captions.clear();
                    break;
                },
                None => greedy_failed = true,
            }
        }

        let regions = estimate_regions(strategy, &captions, layout);
        let result = match_regions(strategy, regions, candidates, layout, config);
        if !result.figures.is_empty() {
            greedy_failed = false;
        }
        outcome.figures.extend(result.figures);
        captions = result.captions;
        candidates = result.candidates;
    }

    if captions.len() == 1 && !candidates.is_empty() && !greedy_failed {
        if let Some(figure) = greedy_match(&captions[0], &mut candidates, text_boxes, layout, config) {
            outcome.figures.push(figure);
            captions.clear();
        }
    }

    if let Some(merged) = merge_bboxes(&candidates) {
        log::debug!("{} leftover candidates merged into orphan {:?}", candidates.len(), merged);
        outcome.orphan_figure =
            Some(Figure::orphan(merged, layout.straddles_columns(&merged)).with_blob_count(candidates.len()));
    }
    outcome.orphan_captions = captions;
    outcome
}
