//! Integration tests for layout inference.
//!
//! These tests build whole documents from mock text boxes simulating
//! realistic journal pages and check the inferred layout.

use pdfigcap::geometry::Bbox;
use pdfigcap::layout::{LayoutBuilder, TextBox};
use pdfigcap::pipeline::{FigureExtractor, PrecomputedBlobs};
use pdfigcap::{DocumentInput, Error, ExtractionConfig, Page, PageBlobs, PageInput, TextBoxInput};

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

/// Body text lines of one column, one every 14 units.
fn mock_column(page: usize, first_id: usize, x: i32, y0: i32, width: i32, count: usize) -> Vec<TextBox> {
    (0..count)
        .map(|i| {
            TextBox::new(
                page,
                first_id + i,
                Bbox::new(x, y0 + 14 * i as i32, width, 12),
                "The quick brown fox jumps over the lazy dog",
            )
        })
        .collect()
}

/// Page noise: page numbers, running heads, figure labels.
fn mock_noise(page: usize, first_id: usize) -> Vec<TextBox> {
    vec![
        TextBox::new(page, first_id, Bbox::new(295, 780, 10, 10), "3"),
        TextBox::new(page, first_id + 1, Bbox::new(500, 10, 25, 8), "J Bio"),
        TextBox::new(page, first_id + 2, Bbox::new(120, 300, 18, 9), "(a)"),
    ]
}

fn input_line(x: i32, y: i32, width: i32, text: &str) -> TextBoxInput {
    TextBoxInput {
        x,
        y,
        width,
        height: 12,
        text: text.to_string(),
    }
}

// ============================================================================
// Single-column documents
// ============================================================================

#[test]
fn test_single_column_paper() {
    let config = ExtractionConfig::default();
    let mut pages = Vec::new();
    for n in 1..=3 {
        let mut boxes = mock_column(n, 0, 72, 60, 456, 40);
        boxes.extend(mock_noise(n, 100));
        pages.push(Page::new(n, 600, 800, boxes));
    }

    let layout = LayoutBuilder::new(&config).build(&pages).unwrap();
    assert_eq!(layout.width, 600);
    assert_eq!(layout.height, 800);
    assert_eq!(layout.row_width, 456);
    assert_eq!(layout.row_height, 12);
    assert_eq!(layout.num_cols, 1);
    assert_eq!(layout.col_coords, vec![72]);
    // The page number at the foot of the page bounds the content region.
    assert_eq!(layout.content_region, Bbox::from_points(72, 60, 528, 790));
}

#[test]
fn test_row_metrics_ignore_short_boxes() {
    let config = ExtractionConfig::default();
    let mut boxes = mock_column(1, 0, 72, 60, 456, 10);
    // Many narrow labels must not win the width mode.
    for i in 0..30 {
        boxes.push(TextBox::new(1, 50 + i, Bbox::new(80, 300, 20, 8), "x"));
    }
    let layout = LayoutBuilder::new(&config)
        .build(&[Page::new(1, 600, 800, boxes)])
        .unwrap();
    assert_eq!(layout.row_width, 456);
    assert_eq!(layout.row_height, 12);
}

#[test]
fn test_left_margin_merges_ragged_starts() {
    let config = ExtractionConfig::default();
    let mut boxes = mock_column(1, 0, 70, 60, 440, 10);
    boxes.extend(mock_column(1, 10, 76, 200, 440, 12));
    let layout = LayoutBuilder::new(&config)
        .build(&[Page::new(1, 600, 800, boxes)])
        .unwrap();
    // 76 is the more frequent origin and absorbs the 70s
    assert_eq!(layout.content_region.x, 76);
}

#[test]
fn test_canonical_page_size_with_many_sizes() {
    let config = ExtractionConfig::default();
    let pages = vec![
        Page::new(1, 612, 792, mock_column(1, 0, 72, 60, 456, 20)),
        Page::new(2, 600, 800, mock_column(2, 0, 72, 60, 456, 20)),
        Page::new(3, 595, 842, mock_column(3, 0, 72, 60, 456, 20)),
    ];
    let layout = LayoutBuilder::new(&config).build(&pages).unwrap();
    assert_eq!((layout.width, layout.height), (600, 800));
}

// ============================================================================
// Two-column documents
// ============================================================================

#[test]
fn test_two_column_paper() {
    let config = ExtractionConfig::default();
    let mut boxes = mock_column(1, 0, 50, 60, 290, 50);
    boxes.extend(mock_column(1, 100, 360, 60, 290, 50));
    boxes.extend(mock_noise(1, 200));
    let layout = LayoutBuilder::new(&config)
        .build(&[Page::new(1, 700, 900, boxes)])
        .unwrap();

    assert_eq!(layout.num_cols, 2);
    assert_eq!(layout.col_coords, vec![50, 360]);
    assert!(layout.col_coords[0] < layout.col_coords[1]);
    assert_eq!(layout.content_region.x1(), 650);
    assert_eq!(layout.col2(), Some(360));
}

// ============================================================================
// Unsupported layouts
// ============================================================================

#[test]
fn test_three_column_document_is_rejected() {
    let pages = vec![PageInput {
        number: 1,
        width: 700,
        height: 900,
        text_boxes: (0..20)
            .flat_map(|i| {
                let y = 60 + 14 * i;
                vec![
                    input_line(40, y, 190, "first column text"),
                    input_line(255, y, 190, "second column text"),
                    input_line(470, y, 190, "third column text"),
                ]
            })
            .collect(),
        blobs: Some(PageBlobs {
            image_width: 700,
            image_height: 900,
            boxes: vec![Bbox::new(60, 400, 300, 200), Bbox::new(380, 400, 200, 200)],
        }),
        image: None,
    }];
    let input = DocumentInput {
        name: "three-columns".to_string(),
        pages,
    };

    let source = PrecomputedBlobs::from_input(&input);
    let err = FigureExtractor::new().extract(&input, &source).unwrap_err();
    assert!(matches!(err, Error::UnsupportedLayout(_)));
    assert!(err.is_document_failure());
}

#[test]
fn test_document_without_text_is_malformed() {
    let input = DocumentInput {
        name: "scan".to_string(),
        pages: vec![PageInput {
            number: 1,
            width: 600,
            height: 800,
            text_boxes: vec![],
            blobs: None,
            image: None,
        }],
    };
    let err = FigureExtractor::new()
        .extract(&input, &PrecomputedBlobs::new())
        .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_document_without_pages_is_malformed() {
    let input = DocumentInput {
        name: "empty".to_string(),
        pages: vec![],
    };
    let err = FigureExtractor::new()
        .extract(&input, &PrecomputedBlobs::new())
        .unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}
