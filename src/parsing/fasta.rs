//! Parser for ORF FASTA files using noodles.
//!
//! Extracts ORF names, coordinates and GC content from the description lines
//! written by Prodigal-style gene callers. Sequences are read but discarded.
//! Supports both uncompressed and gzip/bgzip compressed files.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::interval::Interval;
use crate::core::orf::{OrfInfo, OrfTable};
use crate::parsing::{ParseError, RecordReader};

const GC_PREFIX: &str = "gc_cont=";

/// Name and description of a FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceHeader {
    pub name: String,
    pub description: Option<String>,
}

/// Reads FASTA headers with noodles
#[derive(Debug, Default, Clone, Copy)]
pub struct FastaReader;

impl RecordReader for FastaReader {
    type Record = SequenceHeader;

    fn read_path(&self, path: &Path) -> Result<Vec<SequenceHeader>, ParseError> {
        let file = std::fs::File::open(path)?;
        if is_gzipped(path) {
            // bgzip and concatenated gzip files hold several members
            let reader = BufReader::new(MultiGzDecoder::new(file));
            read_headers(&mut fasta::io::Reader::new(reader))
        } else {
            read_headers(&mut fasta::io::Reader::new(BufReader::new(file)))
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

fn read_headers<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SequenceHeader>, ParseError> {
    let mut headers = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        headers.push(SequenceHeader {
            name: String::from_utf8_lossy(record.name()).to_string(),
            description: record
                .description()
                .map(|d| String::from_utf8_lossy(d).to_string()),
        });
    }

    Ok(headers)
}

/// Parse an ORF FASTA file into a lookup table keyed by ORF name.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// the FASTA is malformed, `ParseError::InvalidFormat` if a header lacks the
/// expected fields, or `ParseError::DuplicateRecord` if an ORF name repeats.
pub fn parse_orf_file<R>(reader: &R, path: &Path) -> Result<OrfTable, ParseError>
where
    R: RecordReader<Record = SequenceHeader>,
{
    let mut table = OrfTable::new();

    for header in reader.read_path(path)? {
        let info = parse_orf_header(&header)?;
        if table.insert(header.name.clone(), info).is_some() {
            return Err(ParseError::DuplicateRecord(header.name));
        }
    }

    debug!("Parsed {} ORFs from {}", table.len(), path.display());
    Ok(table)
}

/// Parse the coordinates and GC content out of one ORF header.
///
/// The full header line is split on `#`; with the record name as field 0,
/// fields 1 and 2 are the start and end. The last `;` separated field of the
/// line must be `gc_cont=<value>`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if fields are missing, coordinates are
/// not integers, start exceeds end, or the GC field is absent.
pub fn parse_orf_header(header: &SequenceHeader) -> Result<OrfInfo, ParseError> {
    let name = &header.name;
    let description = header.description.as_deref().ok_or_else(|| {
        ParseError::InvalidFormat(format!("ORF '{name}' has no header description"))
    })?;
    let line = format!("{name} {description}");

    let fields: Vec<&str> = line.split('#').collect();
    if fields.len() < 3 {
        return Err(ParseError::InvalidFormat(format!(
            "ORF '{name}' header has {} '#' delimited fields, expected at least 3",
            fields.len()
        )));
    }

    let coordinate = |field: &str, what: &str| -> Result<u64, ParseError> {
        field.trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid {what} coordinate for ORF '{name}': '{}'",
                field.trim()
            ))
        })
    };
    let start = coordinate(fields[1], "start")?;
    let end = coordinate(fields[2], "end")?;

    let location = Interval::new(start, end).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "ORF '{name}' has start {start} greater than end {end}"
        ))
    })?;

    let gc_field = line.rsplit(';').next().unwrap_or_default().trim();
    let gc_content = gc_field.strip_prefix(GC_PREFIX).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "ORF '{name}' header does not end with a '{GC_PREFIX}' field"
        ))
    })?;

    Ok(OrfInfo {
        gc_content: gc_content.to_string(),
        location,
    })
}
