//! Extract figures from converted documents
//!
//! Reads one or more document input JSON files (converter output: text boxes
//! plus blobs or page images), extracts figures and captions from each and
//! writes one `<name>.figures.json` manifest per document. Documents are
//! processed independently; a failing document is reported and skipped.
//!
//! Usage:
//!   cargo run --release --bin pdfigcap -- paper1.json paper2.json
//!   cargo run --release --bin pdfigcap -- --output-dir out --skip-first-page papers/*.json

use pdfigcap::converters::Manifest;
use pdfigcap::pipeline::{FigureExtractor, InputBlobSource};
use pdfigcap::{DocumentInput, DocumentReport, ExtractionConfig};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

struct CliConfig {
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    report: Option<PathBuf>,
    verbose: bool,
    extraction: ExtractionConfig,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut inputs = Vec::new();
        let mut output_dir = PathBuf::from("figures");
        let mut report = None;
        let mut verbose = false;
        let mut extraction = ExtractionConfig::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output-dir" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--report" => {
                    i += 1;
                    if i < args.len() {
                        report = Some(PathBuf::from(&args[i]));
                    }
                },
                "--skip-first-page" => {
                    extraction = extraction.with_include_first_page(false);
                },
                "--match-tables" => {
                    extraction = extraction.with_match_tables(true);
                },
                "--suppress-tables" => {
                    extraction = extraction.with_suppress_table_regions(true);
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other if other.starts_with('-') => {
                    eprintln!("Ignoring unknown option {}", other);
                },
                path => inputs.push(PathBuf::from(path)),
            }
            i += 1;
        }

        Self {
            inputs,
            output_dir,
            report,
            verbose,
            extraction,
        }
    }
}

fn process_document(
    path: &Path,
    extractor: &FigureExtractor,
    output_dir: &Path,
) -> pdfigcap::Result<DocumentReport> {
    let input = DocumentInput::from_path(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let source = InputBlobSource::from_input(&input, base_dir);

    let document = match extractor.extract(&input, &source) {
        Ok(document) => document,
        Err(e) if e.is_document_failure() => return Ok(DocumentReport::failed(&input.name, &e)),
        Err(e) => return Err(e),
    };

    let manifest_path = output_dir.join(format!("{}.figures.json", document.name));
    Manifest::from_document(&document).save(&manifest_path)?;
    log::debug!("Manifest written to {}", manifest_path.display());
    Ok(document.report())
}

fn document_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn main() {
    let config = CliConfig::from_args();

    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if config.inputs.is_empty() {
        eprintln!("Usage: pdfigcap [--output-dir DIR] [--report FILE] [--skip-first-page] [--match-tables] [--suppress-tables] [-v] INPUT.json...");
        std::process::exit(2);
    }

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("Error: cannot create {}: {}", config.output_dir.display(), e);
        std::process::exit(1);
    }

    let extractor = FigureExtractor::with_config(config.extraction.clone());
    let start = Instant::now();
    let mut reports = Vec::with_capacity(config.inputs.len());

    for (i, path) in config.inputs.iter().enumerate() {
        let report = match process_document(path, &extractor, &config.output_dir) {
            Ok(report) => report,
            Err(e) => DocumentReport::failed(document_name(path), &e),
        };
        println!("[{}/{}] {}", i + 1, config.inputs.len(), report);
        reports.push(report);
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();

    if let Some(report_path) = &config.report {
        let written = File::create(report_path)
            .map_err(pdfigcap::Error::from)
            .and_then(|f| serde_json::to_writer_pretty(BufWriter::new(f), &reports).map_err(pdfigcap::Error::from));
        if let Err(e) = written {
            eprintln!("Error: cannot write report {}: {}", report_path.display(), e);
        }
    }

    println!("\n{}", "=".repeat(70));
    println!("Success: {}/{}", reports.len() - failed, reports.len());
    println!("Failed: {}", failed);
    println!("Time: {:?}", start.elapsed());
    println!("Output: {}", config.output_dir.display());
    println!("{}", "=".repeat(70));

    if failed > 0 {
        std::process::exit(1);
    }
}
