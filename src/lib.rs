//! # bgc-mask
//!
//! A library for separating metagenome ORFs that fall inside biosynthetic gene
//! clusters (BGCs) from those that do not.
//!
//! Taxonomic assignment of ORFs is skewed by BGCs: cluster genes are often
//! horizontally transferred and assign to unexpected lineages. `bgc-mask`
//! takes the BGC regions detected on each scaffold, the coordinates of every
//! predicted ORF, and a per-ORF lineage table, and writes the table rows into
//! a masked (inside a BGC) and an unmasked (outside) table.
//!
//! ## Features
//!
//! - **GenBank cluster records**: BGC regions read from `*cluster*.gbk` annotation output
//! - **Prodigal ORF headers**: Start, end and GC content parsed from the FASTA description
//! - **Boundary-inclusive overlap**: An ORF touching a region with either end is masked
//! - **Verbatim output**: Rows are copied byte for byte into exactly one output table
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgc_mask::{execute, MaskConfig};
//!
//! let config = MaskConfig::new("antismash_out", "sample.lca.tsv", "sample.orfs.fna");
//! let summary = execute(&config).unwrap();
//! println!("{} masked, {} unmasked", summary.masked, summary.unmasked);
//! ```
//!
//! ## Modules
//!
//! - [`bgc`]: Annotation file discovery and the scaffold to BGC interval index
//! - [`core`]: Intervals, ORF records and run configuration
//! - [`masking`]: The lineage table splitter
//! - [`parsing`]: FASTA and GenBank readers
//! - [`cli`]: Command-line interface implementation

pub mod bgc;
pub mod cli;
pub mod core;
pub mod masking;
pub mod parsing;

// Re-export commonly used types for convenience
pub use bgc::index::BgcIndex;
pub use cli::split::{execute, RunSummary};
pub use core::config::MaskConfig;
pub use core::interval::{in_bgc, Interval};
pub use core::orf::{OrfInfo, OrfTable};
pub use masking::splitter::{split_table, SplitOutcome};
