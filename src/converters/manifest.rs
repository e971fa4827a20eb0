//! JSON manifest of extracted figures.

use crate::document::{Document, SweepType};
use crate::error::Result;
use crate::geometry::Bbox;
use crate::text::CaptionKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One extracted figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureRecord {
    /// Page holding the figure
    pub page: usize,
    /// Figure bounds in page space
    pub bbox: Bbox,
    /// Full caption text
    pub caption_text: Option<String>,
    /// Caption prefix such as "Figure 2"
    pub identifier: Option<String>,
    /// Whether the figure spans both columns
    pub multicolumn: bool,
    /// Figure or table
    pub kind: CaptionKind,
    /// Strategy that produced the figure
    pub sweep_type: SweepType,
}

/// Figures of one document, in page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Document name
    pub document: String,
    /// Extracted figures
    pub figures: Vec<FigureRecord>,
}

impl Manifest {
    /// Build the manifest of a processed document.
    pub fn from_document(document: &Document) -> Self {
        let figures = document
            .figures()
            .map(|(page, figure)| FigureRecord {
                page,
                bbox: figure.bbox,
                caption_text: figure.caption_text().map(str::to_string),
                identifier: figure.identifier.clone(),
                multicolumn: figure.multicolumn,
                kind: figure.kind,
                sweep_type: figure.sweep_type,
            })
            .collect();
        Self {
            document: document.name.clone(),
            figures,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `writer` as pretty-printed JSON.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the manifest to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a manifest back from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
