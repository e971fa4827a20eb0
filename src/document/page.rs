//! Per-page working state.

use super::Figure;
use crate::layout::TextBox;
use crate::text::CaptionKind;

/// A page of the document and everything the extractor found on it.
///
/// Captions stay in `text_boxes` as well: caption expansion replaces the
/// caption's own entry with the expanded paragraph and removes the lines it
/// absorbed, so the pool always reflects the remaining free text.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number, starting at 1
    pub number: usize,
    /// Page width in page space
    pub width: i32,
    /// Page height in page space
    pub height: i32,
    /// Every text box on the page
    pub text_boxes: Vec<TextBox>,
    /// Captions still waiting for a figure
    pub captions: Vec<TextBox>,
    /// Table captions, kept apart unless tables are matched
    pub table_captions: Vec<TextBox>,
    /// Figures found so far
    pub figures: Vec<Figure>,
    /// Leftover blobs merged into one captionless figure
    pub orphan_figure: Option<Figure>,
    /// Captions no figure could be found for
    pub orphan_captions: Vec<TextBox>,
}

impl Page {
    /// Create a page and sort its caption-looking text boxes into figure and
    /// table captions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfigcap::geometry::Bbox;
    /// use pdfigcap::layout::TextBox;
    /// use pdfigcap::Page;
    ///
    /// let page = Page::new(1, 600, 800, vec![
    ///     TextBox::new(1, 0, Bbox::new(50, 50, 400, 12), "Introduction"),
    ///     TextBox::new(1, 1, Bbox::new(50, 500, 400, 12), "Figure 1. Overview"),
    ///     TextBox::new(1, 2, Bbox::new(50, 600, 400, 12), "Table 1. Strains"),
    /// ]);
    /// assert_eq!(page.captions.len(), 1);
    /// assert_eq!(page.table_captions.len(), 1);
    /// assert_eq!(page.text_boxes.len(), 3);
    /// ```
    pub fn new(number: usize, width: i32, height: i32, text_boxes: Vec<TextBox>) -> Self {
        let mut captions = Vec::new();
        let mut table_captions = Vec::new();
        for tb in &text_boxes {
            match tb.caption_kind() {
                Some(CaptionKind::Figure) => captions.push(tb.clone()),
                Some(CaptionKind::Table) => table_captions.push(tb.clone()),
                None => {},
            }
        }
        Self {
            number,
            width,
            height,
            text_boxes,
            captions,
            table_captions,
            figures: Vec::new(),
            orphan_figure: None,
            orphan_captions: Vec::new(),
        }
    }

    /// Leftmost text x-origin on the page.
    pub fn min_text_x(&self) -> Option<i32> {
        self.text_boxes.iter().map(|tb| tb.bbox.x).min()
    }

    /// Replace a text box in the pool, matched by id.
    pub(crate) fn replace_text_box(&mut self, updated: &TextBox) {
        if let Some(slot) = self.text_boxes.iter_mut().find(|tb| tb.id == updated.id) {
            *slot = updated.clone();
        }
    }

    /// Drop every text box whose id is in `ids`.
    pub(crate) fn remove_text_boxes(&mut self, ids: &[usize]) {
        self.text_boxes.retain(|tb| !ids.contains(&tb.id));
    }

    /// Remove a caption from both the pending and the orphan lists.
    pub(crate) fn take_caption(&mut self, id: usize) {
        self.captions.retain(|c| c.id != id);
        self.orphan_captions.retain(|c| c.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bbox;

    fn boxes() -> Vec<TextBox> {
        vec![
            TextBox::new(1, 0, Bbox::new(60, 50, 400, 12), "body"),
            TextBox::new(1, 1, Bbox::new(55, 500, 400, 12), "Fig. 1 Caption"),
            TextBox::new(1, 2, Bbox::new(70, 520, 400, 12), "continued"),
        ]
    }

    #[test]
    fn test_min_text_x() {
        let page = Page::new(1, 600, 800, boxes());
        assert_eq!(page.min_text_x(), Some(55));
        assert_eq!(Page::new(2, 600, 800, vec![]).min_text_x(), None);
    }

    #[test]
    fn test_pool_updates() {
        let mut page = Page::new(1, 600, 800, boxes());
        let mut caption = page.captions[0].clone();
        caption.text.push_str(" continued");
        page.replace_text_box(&caption);
        page.remove_text_boxes(&[2]);
        assert_eq!(page.text_boxes.len(), 2);
        assert_eq!(page.text_boxes[1].text, "Fig. 1 Caption continued");
    }

    #[test]
    fn test_take_caption() {
        let mut page = Page::new(1, 600, 800, boxes());
        page.orphan_captions = page.captions.clone();
        page.take_caption(1);
        assert!(page.captions.is_empty());
        assert!(page.orphan_captions.is_empty());
    }
}
