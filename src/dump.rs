use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;
use crate::dump::config_reader::*;
use crate::dump::io_export::ExportFormat;
use crate::dump::record::RecordNode;
use crate::dump::row::{compose_row, item_id, NormalizedRow};

mod config_reader;
mod io_export;
mod io_xml;
mod polls;
mod record;
mod row;

/// Placeholder for every field whose value is not available in the record.
pub const NOT_AVAILABLE: &str = "N/A";

/// Special value of the output path that prints the export instead of writing a file.
const STDOUT: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum DumpError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Malformed XML document {path}"))]
    ParsingXml {
        source: roxmltree::Error,
        path: String,
    },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No item source: pass --input or a --config file with itemSources"))]
    MissingInput {},
    #[snafu(display("Unknown export format {format:?} (expected csv, tsv or json)"))]
    UnknownFormat { format: String },

    #[snafu(display("Item {item_id} has no statistics/ratings block"))]
    MissingRatings { item_id: String },

    #[snafu(display("Error serializing row to csv"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error serializing rows to json"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error flushing the export buffer"))]
    FlushingExport { source: std::io::Error },
    #[snafu(display("Error writing export to {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DumpResult<T> = Result<T, DumpError>;

/// An item that could not be turned into a row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ItemFailure {
    pub item_id: String,
    pub message: String,
}

/// The outcome of processing a batch of item documents.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct BatchReport {
    pub rows: Vec<NormalizedRow>,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.rows.len() + self.failures.len()
    }
}

/// The settings of one run, after merging the configuration file and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
struct DumpSettings {
    sources: Vec<String>,
    out: Option<String>,
    format: ExportFormat,
    include_headers: bool,
    limit: Option<usize>,
    reference: Option<String>,
}

fn resolve_settings(args: &Args) -> DumpResult<DumpSettings> {
    let config: Option<(PathBuf, DumpConfig)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?;
            Some((root_p.to_path_buf(), config))
        }
        None => None,
    };

    let sources: Vec<String> = match (&args.input, &config) {
        (Some(inputs), _) if !inputs.is_empty() => inputs.clone(),
        (_, Some((root_p, config))) => config
            .item_sources
            .iter()
            .map(|s| relative_to(root_p, &s.file_path))
            .collect(),
        _ => vec![],
    };
    ensure!(!sources.is_empty(), MissingInputSnafu {});

    let output_settings: OutputSettings = config
        .as_ref()
        .map(|(_, c)| c.output_settings.clone())
        .unwrap_or_default();

    let out = match (&args.out, &output_settings.output_path, &config) {
        (Some(o), _, _) => Some(o.clone()),
        (None, Some(o), _) if o == STDOUT => Some(o.clone()),
        (None, Some(o), Some((root_p, _))) => Some(relative_to(root_p, o)),
        _ => None,
    };

    let format = match args.format.as_ref().or(output_settings.format.as_ref()) {
        Some(name) => ExportFormat::from_name(name)?,
        None => ExportFormat::Csv,
    };

    let include_headers = !args.no_headers && output_settings.include_headers.unwrap_or(true);

    Ok(DumpSettings {
        sources,
        out,
        format,
        include_headers,
        limit: args.limit.or(config.as_ref().and_then(|(_, c)| c.limit)),
        reference: args.reference.clone(),
    })
}

fn relative_to(root_p: &Path, path: &str) -> String {
    let p: PathBuf = [root_p, Path::new(path)].iter().collect();
    p.as_path().display().to_string()
}

/// Turns every item into a row, in order.
///
/// A failing item is logged and recorded in the report; the following items are still
/// processed. At most `limit` items are looked at, counting the ones already in the report.
pub fn process_items<N: RecordNode>(items: &[N], limit: Option<usize>, report: &mut BatchReport) {
    for (idx, item) in items.iter().enumerate() {
        if limit.map_or(false, |l| report.processed() >= l) {
            debug!("process_items: limit {:?} reached", limit);
            break;
        }
        match compose_row(*item) {
            Ok(row) => {
                debug!("process_items: item {}: {:?}", idx, row);
                report.rows.push(row);
            }
            Err(e) => {
                let id = item_id(item).unwrap_or_else(|| format!("#{}", idx + 1));
                warn!("Error parsing item {} (position {}): {}", id, idx, e);
                report.failures.push(ItemFailure {
                    item_id: id,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Reads all the sources and builds the rows of every item they contain.
pub fn dump_rows(sources: &[String], limit: Option<usize>) -> DumpResult<BatchReport> {
    let mut report = BatchReport::default();
    for (idx, path) in sources.iter().enumerate() {
        if limit.map_or(false, |l| report.processed() >= l) {
            break;
        }
        info!("Processing source {}/{}: {}", idx + 1, sources.len(), path);
        let contents = io_xml::read_document(path)?;
        let doc = io_xml::parse_document(&contents, path)?;
        let items = io_xml::item_nodes(&doc);
        debug!("dump_rows: {} items in {}", items.len(), path);
        process_items(&items, limit, &mut report);
    }
    info!(
        "Processed {} items: {} rows, {} failures",
        report.processed(),
        report.rows.len(),
        report.failures.len()
    );
    Ok(report)
}

fn check_reference(reference_path: &str, produced: &str) -> DumpResult<()> {
    let reference = read_reference(reference_path)?;
    let produced = normalize_newlines(produced);
    if reference != produced {
        warn!("Found differences with the reference export");
        print_diff(reference.as_str(), produced.as_str(), "\n");
        whatever!("Difference detected between produced export and reference")
    }
    info!("Export matches reference {}", reference_path);
    Ok(())
}

pub fn run_dump(args: &Args) -> DumpResult<()> {
    let settings = resolve_settings(args)?;
    debug!("run_dump: settings: {:?}", settings);

    let report = dump_rows(&settings.sources, settings.limit)?;
    for failure in report.failures.iter() {
        debug!("run_dump: skipped item {}: {}", failure.item_id, failure.message);
    }

    if report.rows.is_empty() {
        warn!("No data was collected; no export was written.");
        return Ok(());
    }

    let text = io_export::to_export_string(&report.rows, settings.format, settings.include_headers)?;

    let out = match settings.out.clone() {
        Some(o) => o,
        None => io_export::default_file_name(
            settings.limit.unwrap_or(report.rows.len()),
            settings.format,
        ),
    };
    if out == STDOUT {
        print!("{}", text);
    } else {
        io_export::write_export(&out, &text)?;
        info!("Saved {} games to {}", report.rows.len(), out);
    }

    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &text)?;
    }

    Ok(())
}
