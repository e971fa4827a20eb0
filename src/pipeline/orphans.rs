//! Cross-page orphan resolution.
//!
//! A figure filling the bottom of a page often has its caption at the top of
//! the following page. After every page has been swept, each orphan figure
//! gets exactly one chance to pair with a lone orphan caption on the next
//! page; failing that it is kept without a caption when it lies within the
//! content region, or dropped.

use crate::config::ExtractionConfig;
use crate::document::{Page, Resolution};
use crate::extractors::expand_caption;
use crate::layout::Layout;
use std::collections::HashSet;

/// Resolve the orphan figure of every page. Returns how many were dropped.
pub fn resolve_orphans(pages: &mut [Page], layout: &Layout, config: &ExtractionConfig) -> usize {
    let mut discarded = 0;
    let cr = layout.content_region;

    for i in 0..pages.len() {
        let (head, tail) = pages.split_at_mut(i + 1);
        let page = &mut head[i];
        let Some(mut orphan) = page.orphan_figure.take() else {
            continue;
        };

        if orphan.bbox.area() <= config.min_orphan_size {
            log::debug!(
                "Page {}: orphan {:?} too small ({} <= {}), dropped",
                page.number,
                orphan.bbox,
                orphan.bbox.area(),
                config.min_orphan_size
            );
            discarded += 1;
            continue;
        }

        if let Some(next) = tail.first_mut() {
            let leftmost = next.min_text_x();
            let lone_caption = match next.orphan_captions.as_slice() {
                [caption] if Some(caption.bbox.x) == leftmost => Some(caption.clone()),
                _ => None,
            };
            if let Some(caption) = lone_caption {
                let (expanded, absorbed) =
                    expand_caption(&caption, &next.text_boxes, layout, config, &mut HashSet::new());
                next.replace_text_box(&expanded);
                next.remove_text_boxes(&absorbed);
                next.take_caption(caption.id);

                log::info!(
                    "Page {}: orphan figure bound to caption {:?} from page {}",
                    page.number,
                    expanded.identifier().unwrap_or(""),
                    next.number
                );
                orphan.bind_caption(expanded, Resolution::CarriedOver);
                page.figures.push(orphan);
                continue;
            }
        }

        if cr.x <= orphan.bbox.x && orphan.bbox.x1() <= cr.x1() {
            log::debug!("Page {}: orphan {:?} kept without caption", page.number, orphan.bbox);
            orphan.resolution = Resolution::Captionless;
            page.figures.push(orphan);
        } else {
            log::debug!(
                "Page {}: orphan {:?} outside content bounds, dropped",
                page.number,
                orphan.bbox
            );
            discarded += 1;
        }
    }
    discarded
}
