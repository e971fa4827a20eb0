//! Per-page extraction steps.
//!
//! - [`captions`]: grows detected caption lines into caption paragraphs
//! - [`candidates`]: turns raw blob boxes into figure candidates
//! - [`blobs`]: finds blob boxes on a rendered page image

pub mod blobs;
pub mod candidates;
pub mod captions;

pub use blobs::BlobDetector;
pub use candidates::{extract_candidates, scaling_ratio};
pub use captions::{caption_alignment, expand_caption, expand_captions};
