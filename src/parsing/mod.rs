//! Readers for the two record formats consumed by a masking run.
//!
//! - **FASTA** ([`fasta`]): ORF sequences whose description lines carry the ORF
//!   coordinates and GC content (Prodigal style headers)
//! - **GenBank** ([`genbank`]): annotation records whose cluster/region feature
//!   gives the BGC interval
//!
//! Both readers implement [`RecordReader`], so the code that builds lookup
//! tables from records does not depend on how the records were parsed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgc_mask::parsing::fasta::{parse_orf_file, FastaReader};
//! use std::path::Path;
//!
//! let orfs = parse_orf_file(&FastaReader, Path::new("orfs.fna")).unwrap();
//! println!("{} ORFs", orfs.len());
//! ```
//!
//! ## Prodigal header layout
//!
//! ```text
//! >NODE_1_3 # 1180 # 2418 # -1 # ID=1_3;partial=00;start_type=ATG;gc_cont=0.552
//!  field 0  |  1   |  2   |  3 |  4
//! ```

use std::path::Path;

use thiserror::Error;

pub mod fasta;
pub mod genbank;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Record '{record}' in {path} has no feature of type {expected}")]
    MissingClusterFeature {
        record: String,
        path: String,
        expected: String,
    },

    #[error("Duplicate record name: {0}")]
    DuplicateRecord(String),
}

/// A source of parsed sequence records.
///
/// Implementations own the file format; callers only see typed records.
pub trait RecordReader {
    type Record;

    /// Read every record from the file at `path`, in file order.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or a format error
    /// if its content cannot be parsed.
    fn read_path(&self, path: &Path) -> Result<Vec<Self::Record>, ParseError>;
}
