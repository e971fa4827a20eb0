//! Output formats for extraction results.

pub mod manifest;

pub use manifest::{FigureRecord, Manifest};
