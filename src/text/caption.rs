//! Caption pattern recognition.
//!
//! Captions are recognised purely from the start of a text box: "Figure 2",
//! "Fig. S1", "FIG 3" for figures and "Table 1" / "Table S4" for tables.
//! These are natural-language cues, so false positives (a sentence starting
//! with "Figure 3 shows…") and misses are expected; the matching stage is
//! built to tolerate both.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// "fig", "fig." or "figure", then a numeral with an optional alphabetic
    /// sub-label glued to it ("S1"), so plurals never pass as sub-labels
    static ref RE_FIGURE_CAPTION: Regex =
        Regex::new(r"(?i)^\s*(fig(?:ure|\.)?\s*[a-z]?\d+)").unwrap();

    /// "table", then a numeral with an optional glued sub-label
    static ref RE_TABLE_CAPTION: Regex =
        Regex::new(r"(?i)^\s*(table\s*[a-z]?\d+)").unwrap();
}

/// Kind of caption a text box can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionKind {
    /// Figure caption ("Figure 1", "Fig. 2a")
    Figure,
    /// Table caption ("Table 1")
    Table,
}

impl CaptionKind {
    fn pattern(self) -> &'static Regex {
        match self {
            CaptionKind::Figure => &RE_FIGURE_CAPTION,
            CaptionKind::Table => &RE_TABLE_CAPTION,
        }
    }

    /// Lowercase name, as used in manifests and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CaptionKind::Figure => "figure",
            CaptionKind::Table => "table",
        }
    }
}

/// Check whether `text` starts like a caption of the given kind.
///
/// # Examples
///
/// ```
/// use pdfigcap::text::{can_be_caption, CaptionKind};
///
/// assert!(can_be_caption("Fig. S1 Expression of ...", CaptionKind::Figure));
/// assert!(can_be_caption("FIGURE 2. Overview", CaptionKind::Figure));
/// assert!(!can_be_caption("As shown in Figure 2", CaptionKind::Figure));
/// assert!(can_be_caption("Table 3 Primers", CaptionKind::Table));
/// ```
pub fn can_be_caption(text: &str, kind: CaptionKind) -> bool {
    kind.pattern().is_match(text)
}

/// Return the caption prefix ("Fig. 3", "Table S1") if `text` starts one.
///
/// # Examples
///
/// ```
/// use pdfigcap::text::{caption_identifier, CaptionKind};
///
/// assert_eq!(caption_identifier("Figure 12: Results", CaptionKind::Figure), Some("Figure 12"));
/// assert_eq!(caption_identifier("Results", CaptionKind::Figure), None);
/// ```
pub fn caption_identifier(text: &str, kind: CaptionKind) -> Option<&str> {
    kind.pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify a text box by the caption it starts, figures first.
pub fn classify_caption(text: &str) -> Option<CaptionKind> {
    [CaptionKind::Figure, CaptionKind::Table]
        .into_iter()
        .find(|kind| can_be_caption(text, *kind))
}
