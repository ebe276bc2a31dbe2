use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::bgc::index::BgcIndex;
use crate::core::config::OutputPaths;
use crate::core::interval::in_bgc;
use crate::core::orf::{scaffold_of, OrfTable};

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line} of lineage table references ORF '{orf}' missing from the ORF FASTA")]
    UnknownOrf { orf: String, line: usize },

    #[error("Line {0} of lineage table has no ORF identifier")]
    MalformedRow(usize),
}

/// Where a lineage table row ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// ORF lies inside a BGC region
    Masked,
    /// ORF lies outside every BGC region
    Unmasked,
}

/// ORF identifiers and row counts routed to each output table
#[derive(Debug, Default, Clone)]
pub struct SplitOutcome {
    pub masked: HashSet<String>,
    pub unmasked: HashSet<String>,
    /// Rows read from the table
    pub rows: usize,
    pub masked_rows: usize,
    pub unmasked_rows: usize,
}

/// Classify one ORF against the BGC regions of its scaffold.
///
/// ORFs on scaffolds without any BGC are unmasked without consulting the ORF
/// table.
///
/// # Errors
///
/// Returns `SplitError::UnknownOrf` if the scaffold has BGCs but the ORF is not
/// in `orfs`.
pub fn classify(
    orf_id: &str,
    line: usize,
    orfs: &OrfTable,
    bgcs: &BgcIndex,
) -> Result<Placement, SplitError> {
    let regions = bgcs.regions(scaffold_of(orf_id));
    if regions.is_empty() {
        return Ok(Placement::Unmasked);
    }

    let orf = orfs.get(orf_id).ok_or_else(|| SplitError::UnknownOrf {
        orf: orf_id.to_string(),
        line,
    })?;

    if in_bgc(&orf.location, regions) {
        Ok(Placement::Masked)
    } else {
        Ok(Placement::Unmasked)
    }
}

/// Split a lineage table into masked and unmasked tables.
///
/// Each input line is copied byte for byte to exactly one of the outputs. Both
/// outputs are flushed before returning, also when a row fails part way
/// through; in that case the rows before the failure are kept on disk and the
/// row error is returned.
///
/// # Errors
///
/// Returns `SplitError::Io` on read/write failure, `SplitError::MalformedRow`
/// for a line without an identifier, or `SplitError::UnknownOrf` for an ORF
/// missing from `orfs`.
pub fn split_table(
    table: &Path,
    orfs: &OrfTable,
    bgcs: &BgcIndex,
    outputs: &OutputPaths,
) -> Result<SplitOutcome, SplitError> {
    let reader = BufReader::new(File::open(table)?);
    let mut sinks = SplitWriter::create(outputs)?;

    let routed = route_rows(reader, orfs, bgcs, &mut sinks);
    let flushed = sinks.finish();

    let outcome = routed?;
    flushed?;

    info!(
        "Split {} rows: {} masked -> {}, {} unmasked -> {}",
        outcome.rows,
        outcome.masked_rows,
        outputs.masked.display(),
        outcome.unmasked_rows,
        outputs.unmasked.display()
    );

    Ok(outcome)
}

/// Route every row of `reader` to `sinks`
///
/// # Errors
///
/// Returns the first read, write, or row error.
pub fn route_rows<R: BufRead, W: Write>(
    mut reader: R,
    orfs: &OrfTable,
    bgcs: &BgcIndex,
    sinks: &mut SplitWriter<W>,
) -> Result<SplitOutcome, SplitError> {
    let mut outcome = SplitOutcome::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        outcome.rows += 1;
        let line_num = outcome.rows;

        let orf_id = first_token(&buf).ok_or(SplitError::MalformedRow(line_num))?;
        let placement = classify(orf_id, line_num, orfs, bgcs)?;

        sinks.write_row(placement, &buf)?;
        match placement {
            Placement::Masked => {
                outcome.masked_rows += 1;
                outcome.masked.insert(orf_id.to_string());
            }
            Placement::Unmasked => {
                outcome.unmasked_rows += 1;
                outcome.unmasked.insert(orf_id.to_string());
            }
        }
    }

    debug!("Read {} lineage rows", outcome.rows);
    Ok(outcome)
}

/// First whitespace-delimited token of a row, if it is valid UTF-8
fn first_token(row: &[u8]) -> Option<&str> {
    let token = row
        .split(u8::is_ascii_whitespace)
        .find(|field| !field.is_empty())?;
    std::str::from_utf8(token).ok()
}

/// The pair of output tables
pub struct SplitWriter<W: Write> {
    masked: W,
    unmasked: W,
}

impl SplitWriter<BufWriter<File>> {
    /// Create (or truncate) both output files
    ///
    /// # Errors
    ///
    /// Returns an IO error if either file cannot be created.
    pub fn create(outputs: &OutputPaths) -> std::io::Result<Self> {
        Ok(Self::new(
            BufWriter::new(File::create(&outputs.masked)?),
            BufWriter::new(File::create(&outputs.unmasked)?),
        ))
    }
}

impl<W: Write> SplitWriter<W> {
    pub fn new(masked: W, unmasked: W) -> Self {
        Self { masked, unmasked }
    }

    /// Write a row verbatim to the table chosen by `placement`
    ///
    /// # Errors
    ///
    /// Returns an IO error if the write fails.
    pub fn write_row(&mut self, placement: Placement, row: &[u8]) -> std::io::Result<()> {
        match placement {
            Placement::Masked => self.masked.write_all(row),
            Placement::Unmasked => self.unmasked.write_all(row),
        }
    }

    /// Flush both tables, attempting the second even if the first fails
    ///
    /// # Errors
    ///
    /// Returns the first flush error.
    pub fn finish(mut self) -> std::io::Result<(W, W)> {
        let masked = self.masked.flush();
        let unmasked = self.unmasked.flush();
        masked?;
        unmasked?;
        Ok((self.masked, self.unmasked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::output_paths_for;
    use crate::core::interval::Interval;
    use crate::core::orf::OrfInfo;
    use tempfile::TempDir;

    fn orf(start: u64, end: u64) -> OrfInfo {
        OrfInfo {
            gc_content: "0.5".to_string(),
            location: Interval::new(start, end).unwrap(),
        }
    }

    fn fixtures() -> (OrfTable, BgcIndex) {
        let mut orfs = OrfTable::new();
        orfs.insert("s1_1", orf(150, 180));
        orfs.insert("s1_2", orf(300, 400));
        orfs.insert("s1_3", orf(190, 510));
        orfs.insert("s2_1", orf(10, 20));

        let mut bgcs = BgcIndex::new();
        bgcs.insert("s1", Interval::new(100, 200).unwrap());
        bgcs.insert("s1", Interval::new(500, 600).unwrap());
        (orfs, bgcs)
    }

    fn route(table: &str) -> Result<(SplitOutcome, String, String), SplitError> {
        let (orfs, bgcs) = fixtures();
        let mut sinks = SplitWriter::new(Vec::new(), Vec::new());
        let outcome = route_rows(table.as_bytes(), &orfs, &bgcs, &mut sinks)?;
        let (masked, unmasked) = sinks.finish()?;
        Ok((
            outcome,
            String::from_utf8(masked).unwrap(),
            String::from_utf8(unmasked).unwrap(),
        ))
    }

    #[test]
    fn test_classify() {
        let (orfs, bgcs) = fixtures();
        assert_eq!(classify("s1_1", 1, &orfs, &bgcs).unwrap(), Placement::Masked);
        assert_eq!(classify("s1_2", 1, &orfs, &bgcs).unwrap(), Placement::Unmasked);
        assert_eq!(classify("s1_3", 1, &orfs, &bgcs).unwrap(), Placement::Masked);
        assert_eq!(classify("s2_1", 1, &orfs, &bgcs).unwrap(), Placement::Unmasked);
    }

    #[test]
    fn test_scaffold_without_bgc_skips_orf_lookup() {
        let (orfs, bgcs) = fixtures();
        assert_eq!(
            classify("s9_4", 1, &orfs, &bgcs).unwrap(),
            Placement::Unmasked
        );
    }

    #[test]
    fn test_unknown_orf_on_bgc_scaffold() {
        let (orfs, bgcs) = fixtures();
        let err = classify("s1_99", 7, &orfs, &bgcs).unwrap_err();
        assert!(matches!(err, SplitError::UnknownOrf { ref orf, line: 7 } if orf == "s1_99"));
    }

    #[test]
    fn test_route_rows_copies_lines_verbatim() {
        let table = "s1_1\tBacteria;Firmicutes\t0.9\n\
                     s1_2\tBacteria\t1.0\n\
                     s1_3  spaced   row\n\
                     s2_1\tArchaea\n";
        let (outcome, masked, unmasked) = route(table).unwrap();

        assert_eq!(outcome.rows, 4);
        assert_eq!(masked, "s1_1\tBacteria;Firmicutes\t0.9\ns1_3  spaced   row\n");
        assert_eq!(unmasked, "s1_2\tBacteria\t1.0\ns2_1\tArchaea\n");
        assert!(outcome.masked.contains("s1_1"));
        assert!(outcome.unmasked.contains("s2_1"));
        assert!(outcome.masked.is_disjoint(&outcome.unmasked));
        assert_eq!(outcome.masked.len() + outcome.unmasked.len(), outcome.rows);
    }

    #[test]
    fn test_route_rows_keeps_crlf_and_missing_final_newline() {
        let (_, masked, unmasked) = route("s1_1\tx\r\ns2_1\ty").unwrap();
        assert_eq!(masked, "s1_1\tx\r\n");
        assert_eq!(unmasked, "s2_1\ty");
    }

    #[test]
    fn test_route_rows_counts_repeated_orfs_per_row() {
        let (outcome, masked, unmasked) =
            route("s1_1\tA\ns1_1\tB\ns2_1\tC\ns2_1\tD\ns2_1\tE\n").unwrap();

        assert_eq!(outcome.rows, 5);
        assert_eq!(outcome.masked_rows, 2);
        assert_eq!(outcome.unmasked_rows, 3);
        assert_eq!(outcome.masked_rows + outcome.unmasked_rows, outcome.rows);
        assert_eq!(outcome.masked.len(), 1);
        assert_eq!(outcome.unmasked.len(), 1);
        assert_eq!(masked.lines().count(), 2);
        assert_eq!(unmasked.lines().count(), 3);
    }

    #[test]
    fn test_route_rows_blank_line() {
        let err = route("s1_1\tx\n\n").unwrap_err();
        assert!(matches!(err, SplitError::MalformedRow(2)));
    }

    #[test]
    fn test_route_rows_unknown_orf() {
        let err = route("s2_1\tx\ns1_42\ty\n").unwrap_err();
        assert!(err.to_string().contains("s1_42"));
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token(b"  orf_1\tA\n"), Some("orf_1"));
        assert_eq!(first_token(b"orf_1"), Some("orf_1"));
        assert_eq!(first_token(b" \t\n"), None);
        assert_eq!(first_token(b"\xff\xfe\tA\n"), None);
    }

    #[test]
    fn test_split_table_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let table = dir.path().join("sample.lca.tsv");
        std::fs::write(&table, "s1_1\tA\ns1_2\tB\ns2_1\tC\n").unwrap();

        let (orfs, bgcs) = fixtures();
        let outputs = output_paths_for(&table, None);
        let outcome = split_table(&table, &orfs, &bgcs, &outputs).unwrap();

        assert_eq!(outcome.rows, 3);
        assert_eq!(std::fs::read_to_string(&outputs.masked).unwrap(), "s1_1\tA\n");
        assert_eq!(
            std::fs::read_to_string(&outputs.unmasked).unwrap(),
            "s1_2\tB\ns2_1\tC\n"
        );
    }

    #[test]
    fn test_split_table_flushes_rows_before_error() {
        let dir = TempDir::new().unwrap();
        let table = dir.path().join("sample.tsv");
        std::fs::write(&table, "s1_1\tA\ns2_1\tC\ns1_77\tD\ns1_2\tB\n").unwrap();

        let (orfs, bgcs) = fixtures();
        let outputs = output_paths_for(&table, Some("partial"));
        let err = split_table(&table, &orfs, &bgcs, &outputs).unwrap_err();

        assert!(matches!(err, SplitError::UnknownOrf { line: 3, .. }));
        assert_eq!(std::fs::read_to_string(&outputs.masked).unwrap(), "s1_1\tA\n");
        assert_eq!(std::fs::read_to_string(&outputs.unmasked).unwrap(), "s2_1\tC\n");
    }

    #[test]
    fn test_split_table_missing_input() {
        let dir = TempDir::new().unwrap();
        let table = dir.path().join("absent.tsv");
        let (orfs, bgcs) = fixtures();
        let outputs = output_paths_for(&table, None);

        let err = split_table(&table, &orfs, &bgcs, &outputs).unwrap_err();
        assert!(matches!(err, SplitError::Io(_)));
        assert!(!outputs.masked.exists());
    }
}
