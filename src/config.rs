//! Configuration for figure extraction.
//!
//! Every heuristic threshold used by the layout builder, caption expansion,
//! candidate filtering, the sweep engine and orphan resolution is collected
//! here so it can be tuned per corpus without touching the algorithms.

/// Text boxes narrower than this are treated as noise when computing row
/// metrics and the content region.
pub const DEFAULT_MIN_TEXT_WIDTH: i32 = 30;

/// X-origins closer than this are merged when looking for the left margin.
pub const DEFAULT_PADDING_TOLERANCE: i32 = 10;

/// A caption line is absorbed while its gap to the previous line is below
/// this factor of the row height.
pub const DEFAULT_CAPTION_GAP_FACTOR: f64 = 1.5;

/// Minimum share of a blob that must lie inside the content region.
pub const DEFAULT_CONTENT_OVERLAP: f64 = 0.75;

/// Blobs may start this far above the content region top.
pub const DEFAULT_LAYOUT_MARGIN: i32 = 10;

/// Overlap ratio (either direction) above which a candidate belongs to a region.
pub const DEFAULT_MATCH_OVERLAP: f64 = 0.5;

/// Horizontal padding added around matched figures.
pub const DEFAULT_STYLE_CUT_PADDING: i32 = 4;

/// Orphan figures at or below this area are discarded as noise.
pub const DEFAULT_MIN_ORPHAN_SIZE: i64 = 1000;

/// Overlap ratio above which a candidate counts as part of a table band.
pub const DEFAULT_TABLE_OVERLAP: f64 = 0.1;

/// Height of the table band checked above and below a table caption, in rows.
pub const DEFAULT_TABLE_BAND_ROWS: i32 = 4;

/// Figure extraction configuration.
///
/// # Examples
///
/// ```
/// use pdfigcap::ExtractionConfig;
///
/// let config = ExtractionConfig::new()
///     .with_include_first_page(false)
///     .with_match_overlap(0.6);
/// assert!(!config.include_first_page);
/// assert_eq!(config.min_text_width, 30);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Noise threshold on text box width for layout statistics.
    pub min_text_width: i32,

    /// Tolerance used when merging nearby left-margin candidates.
    pub padding_tolerance: i32,

    /// Maximum line gap, in row heights, inside one caption paragraph.
    pub caption_gap_factor: f64,

    /// Minimum blob share inside the content region.
    pub content_overlap: f64,

    /// Tolerance above the content region top for candidate blobs.
    pub layout_margin: i32,

    /// Region/candidate overlap threshold for the sweep engine.
    pub match_overlap: f64,

    /// Horizontal padding applied to matched figures.
    pub style_cut_padding: i32,

    /// Orphan figures must be larger than this area to be kept.
    pub min_orphan_size: i64,

    /// Height of the band checked above and below a table caption, in rows.
    pub table_band_rows: i32,

    /// Share of a table band a candidate must cover to be dropped.
    pub table_overlap: f64,

    /// Extract figures from the first page as well.
    ///
    /// The first page still contributes to the layout when disabled.
    pub include_first_page: bool,

    /// Treat table captions as captions during matching.
    pub match_tables: bool,

    /// Drop candidates lying in the band directly above or below a table caption.
    pub suppress_table_regions: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create a configuration with the default thresholds.
    pub fn new() -> Self {
        Self {
            min_text_width: DEFAULT_MIN_TEXT_WIDTH,
            padding_tolerance: DEFAULT_PADDING_TOLERANCE,
            caption_gap_factor: DEFAULT_CAPTION_GAP_FACTOR,
            content_overlap: DEFAULT_CONTENT_OVERLAP,
            layout_margin: DEFAULT_LAYOUT_MARGIN,
            match_overlap: DEFAULT_MATCH_OVERLAP,
            style_cut_padding: DEFAULT_STYLE_CUT_PADDING,
            min_orphan_size: DEFAULT_MIN_ORPHAN_SIZE,
            table_band_rows: DEFAULT_TABLE_BAND_ROWS,
            table_overlap: DEFAULT_TABLE_OVERLAP,
            include_first_page: true,
            match_tables: false,
            suppress_table_regions: false,
        }
    }

    /// Set the text width noise threshold.
    pub fn with_min_text_width(mut self, width: i32) -> Self {
        self.min_text_width = width;
        self
    }

    /// Set the left-margin merge tolerance.
    pub fn with_padding_tolerance(mut self, tolerance: i32) -> Self {
        self.padding_tolerance = tolerance;
        self
    }

    /// Set the caption line gap factor.
    pub fn with_caption_gap_factor(mut self, factor: f64) -> Self {
        self.caption_gap_factor = factor;
        self
    }

    /// Set the minimum content region overlap for blobs.
    pub fn with_content_overlap(mut self, ratio: f64) -> Self {
        self.content_overlap = ratio;
        self
    }

    /// Set the tolerance above the content region top.
    pub fn with_layout_margin(mut self, margin: i32) -> Self {
        self.layout_margin = margin;
        self
    }

    /// Set the region/candidate match threshold.
    pub fn with_match_overlap(mut self, ratio: f64) -> Self {
        self.match_overlap = ratio;
        self
    }

    /// Set the horizontal padding of matched figures.
    pub fn with_style_cut_padding(mut self, padding: i32) -> Self {
        self.style_cut_padding = padding;
        self
    }

    /// Set the minimum orphan figure area.
    pub fn with_min_orphan_size(mut self, area: i64) -> Self {
        self.min_orphan_size = area;
        self
    }

    /// Set the table band height, in rows.
    pub fn with_table_band_rows(mut self, rows: i32) -> Self {
        self.table_band_rows = rows;
        self
    }

    /// Set the table band overlap threshold.
    pub fn with_table_overlap(mut self, ratio: f64) -> Self {
        self.table_overlap = ratio;
        self
    }

    /// Extract figures from the first page.
    pub fn with_include_first_page(mut self, include: bool) -> Self {
        self.include_first_page = include;
        self
    }

    /// Match table captions as well as figure captions.
    pub fn with_match_tables(mut self, enable: bool) -> Self {
        self.match_tables = enable;
        self
    }

    /// Drop candidates that sit in a table band.
    pub fn with_suppress_table_regions(mut self, enable: bool) -> Self {
        self.suppress_table_regions = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ExtractionConfig::default();
        assert_eq!(config.min_text_width, 30);
        assert_eq!(config.padding_tolerance, 10);
        assert_eq!(config.caption_gap_factor, 1.5);
        assert_eq!(config.match_overlap, 0.5);
        assert_eq!(config.min_orphan_size, 1000);
        assert_eq!(config.table_band_rows, 4);
        assert_eq!(config.table_overlap, 0.1);
        assert!(config.include_first_page);
        assert!(!config.match_tables);
        assert!(!config.suppress_table_regions);
    }

    #[test]
    fn test_builder_chain() {
        let config = ExtractionConfig::new()
            .with_min_text_width(40)
            .with_padding_tolerance(5)
            .with_caption_gap_factor(2.0)
            .with_content_overlap(0.9)
            .with_min_orphan_size(50)
            .with_layout_margin(20)
            .with_style_cut_padding(0)
            .with_table_band_rows(2)
            .with_table_overlap(0.3)
            .with_match_tables(true)
            .with_suppress_table_regions(true);
        assert_eq!(config.min_text_width, 40);
        assert_eq!(config.padding_tolerance, 5);
        assert_eq!(config.caption_gap_factor, 2.0);
        assert_eq!(config.content_overlap, 0.9);
        assert_eq!(config.min_orphan_size, 50);
        assert_eq!(config.layout_margin, 20);
        assert_eq!(config.style_cut_padding, 0);
        assert_eq!(config.table_band_rows, 2);
        assert_eq!(config.table_overlap, 0.3);
        assert!(config.match_tables);
        assert!(config.suppress_table_regions);
    }
}
