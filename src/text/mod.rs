//! Text recognition helpers.
//!
//! The extractor never interprets text beyond recognising caption openings
//! such as "Figure 3" or "Table S1".

pub mod caption;

pub use caption::{caption_identifier, can_be_caption, classify_caption, CaptionKind};
