//! Caption expansion.
//!
//! Caption detection only recognises the first line of a caption. Expansion
//! grows that line into the full caption paragraph by absorbing the lines
//! directly below it that share its left (or right) edge, and removes the
//! absorbed lines from the page's text pool so they are not mistaken for body
//! text later on.

use crate::config::ExtractionConfig;
use crate::document::Page;
use crate::geometry::Bbox;
use crate::layout::{Alignment, Layout, TextBox};
use std::collections::HashSet;

/// Classify how a caption sits relative to the column layout.
///
/// # Examples
///
/// ```
/// use pdfigcap::extractors::captions::caption_alignment;
/// use pdfigcap::geometry::Bbox;
/// use pdfigcap::layout::{Alignment, Layout};
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
/// assert_eq!(caption_alignment(&Bbox::new(50, 500, 570, 12), &layout), Alignment::Multicolumn);
/// assert_eq!(caption_alignment(&Bbox::new(405, 500, 200, 12), &layout), Alignment::Left);
/// assert_eq!(caption_alignment(&Bbox::new(600, 500, 40, 12), &layout), Alignment::Right);
/// ```
pub fn caption_alignment(caption: &Bbox, layout: &Layout) -> Alignment {
    if layout.straddles_columns(caption) {
        return Alignment::Multicolumn;
    }
    let half_row = layout.row_width / 2;
    let at_column_origin = layout
        .col_coords
        .iter()
        .any(|col| (caption.x - col).abs() <= half_row);
    if at_column_origin || caption.x * 2 < layout.width {
        Alignment::Left
    } else {
        Alignment::Right
    }
}

/// Grow `caption` into its full paragraph using lines from `pool`.
///
/// Lines already in `absorbed` are skipped; the ids of the lines taken here
/// are added to it. Returns the expanded caption and the ids it absorbed.
pub fn expand_caption(
    caption: &TextBox,
    pool: &[TextBox],
    layout: &Layout,
    config: &ExtractionConfig,
    absorbed: &mut HashSet<usize>,
) -> (TextBox, Vec<usize>) {
    let alignment = caption_alignment(&caption.bbox, layout);
    let half_row = layout.row_width / 2;
    let edge_matches = |tb: &TextBox| match alignment {
        Alignment::Right => (tb.bbox.x1() - caption.bbox.x1()).abs() <= half_row,
        _ => (tb.bbox.x - caption.bbox.x).abs() <= half_row,
    };

    let mut followers: Vec<&TextBox> = pool
        .iter()
        .filter(|tb| tb.id != caption.id)
        .filter(|tb| tb.bbox.y > caption.bbox.y)
        .filter(|tb| !absorbed.contains(&tb.id))
        .filter(|tb| !tb.is_caption())
        .filter(|tb| edge_matches(tb))
        .collect();
    followers.sort_by_key(|tb| (tb.bbox.y, tb.bbox.x));

    let max_gap = config.caption_gap_factor * f64::from(layout.row_height);
    let mut expanded = caption.clone();
    expanded.alignment = alignment;
    let mut bottom = caption.bbox.y1();
    let mut taken = Vec::new();

    for line in followers {
        if f64::from(line.bbox.y - bottom) >= max_gap {
            break;
        }
        expanded.text.push(' ');
        expanded.text.push_str(&line.text);
        bottom = bottom.max(line.bbox.y1());
        absorbed.insert(line.id);
        taken.push(line.id);
    }
    expanded.bbox.set_y1(bottom);

    if !taken.is_empty() {
        log::debug!(
            "Caption {:?} on page {} absorbed {} lines ({:?})",
            expanded.identifier().unwrap_or(""),
            caption.page_number,
            taken.len(),
            alignment
        );
    }
    (expanded, taken)
}

/// Expand every caption on the page, top to bottom.
///
/// Figure and table captions share one absorbed set so no line ends up in two
/// captions. The expanded captions replace their originals in the page's
/// caption lists and text pool, and absorbed lines leave the pool.
pub fn expand_captions(page: &mut Page, layout: &Layout, config: &ExtractionConfig) {
    let mut order: Vec<TextBox> = page
        .captions
        .iter()
        .chain(page.table_captions.iter())
        .cloned()
        .collect();
    order.sort_by_key(|c| (c.bbox.y, c.bbox.x));

    let mut absorbed = HashSet::new();
    let mut removed = Vec::new();
    for caption in &order {
        let (expanded, taken) = expand_caption(caption, &page.text_boxes, layout, config, &mut absorbed);
        removed.extend(taken);
        page.replace_text_box(&expanded);
        for list in [&mut page.captions, &mut page.table_captions] {
            if let Some(slot) = list.iter_mut().find(|c| c.id == expanded.id) {
                *slot = expanded.clone();
            }
        }
    }
    page.remove_text_boxes(&removed);
}
