//! Tests for figures whose caption lands on the following page.

use pdfigcap::geometry::Bbox;
use pdfigcap::pipeline::{FigureExtractor, PrecomputedBlobs};
use pdfigcap::{Document, DocumentInput, PageBlobs, PageInput, Resolution, SweepType, TextBoxInput};

fn tb(x: i32, y: i32, width: i32, text: &str) -> TextBoxInput {
    TextBoxInput {
        x,
        y,
        width,
        height: 12,
        text: text.to_string(),
    }
}

fn body(x: i32, y0: i32, count: i32) -> Vec<TextBoxInput> {
    (0..count)
        .map(|i| tb(x, y0 + 14 * i, 500, "Sed ut perspiciatis unde omnis iste natus error"))
        .collect()
}

/// Page whose only graphic is a figure filling most of it, with no caption.
fn figure_only_page(blob: Bbox) -> PageInput {
    let mut text = body(50, 40, 2);
    text.extend(body(50, 720, 2));
    PageInput {
        number: 1,
        width: 600,
        height: 800,
        text_boxes: text,
        blobs: Some(PageBlobs {
            image_width: 600,
            image_height: 800,
            boxes: vec![blob],
        }),
        image: None,
    }
}

/// Page opening with a caption at `caption_x`, body text below it, no blobs.
fn caption_first_page(caption_x: i32) -> PageInput {
    let mut text = vec![tb(caption_x, 40, 490, "Figure 3. Continued from the previous page")];
    text.extend(body(50, 100, 20));
    PageInput {
        number: 2,
        width: 600,
        height: 800,
        text_boxes: text,
        blobs: None,
        image: None,
    }
}

fn run(pages: Vec<PageInput>) -> Document {
    let input = DocumentInput {
        name: "carried".to_string(),
        pages,
    };
    let source = PrecomputedBlobs::from_input(&input);
    FigureExtractor::new().extract(&input, &source).unwrap()
}

#[test]
fn test_orphan_bound_to_caption_on_next_page() {
    let document = run(vec![
        figure_only_page(Bbox::from_points(60, 100, 540, 700)),
        caption_first_page(50),
    ]);

    let first = &document.pages[0];
    assert_eq!(first.figures.len(), 1);
    let figure = &first.figures[0];
    assert_eq!(figure.resolution, Resolution::CarriedOver);
    assert_eq!(figure.sweep_type, SweepType::Orphan);
    assert_eq!(figure.bbox, Bbox::from_points(60, 100, 540, 700));
    assert_eq!(figure.identifier.as_deref(), Some("Figure 3"));

    let second = &document.pages[1];
    assert!(second.figures.is_empty());
    assert!(second.captions.is_empty());
    assert!(second.orphan_captions.is_empty());
    assert_eq!(document.orphan_caption_count(), 0);
    assert_eq!(document.discarded_orphans, 0);
}

#[test]
fn test_indented_caption_is_not_carried_over() {
    let document = run(vec![
        figure_only_page(Bbox::from_points(60, 100, 540, 700)),
        caption_first_page(60),
    ]);

    let figure = &document.pages[0].figures[0];
    assert_eq!(figure.resolution, Resolution::Captionless);
    assert!(figure.caption.is_none());
    assert_eq!(document.pages[1].orphan_captions.len(), 1);
}

#[test]
fn test_orphan_outside_content_is_dropped() {
    // Mostly inside the content region, but starting left of it.
    let document = run(vec![figure_only_page(Bbox::from_points(20, 100, 540, 700))]);

    assert_eq!(document.figure_count(), 0);
    assert_eq!(document.discarded_orphans, 1);
    assert!(document.pages[0].orphan_figure.is_none());
    assert_eq!(
        document.report().to_string(),
        "carried: 0 figures, 0 orphan captions, 1 discarded orphans"
    );
}
