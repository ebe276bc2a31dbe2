//! Core data types shared by the parsers and the table splitter.
//!
//! - [`Interval`]: A closed `[start, end]` coordinate range
//! - [`in_bgc`]: The overlap test deciding whether an ORF lies in a BGC region
//! - [`OrfInfo`], [`OrfTable`]: ORF coordinates and GC content from the FASTA headers
//! - [`MaskConfig`]: The run configuration built once from the command line
//!
//! [`Interval`]: interval::Interval
//! [`in_bgc`]: interval::in_bgc
//! [`OrfInfo`]: orf::OrfInfo
//! [`OrfTable`]: orf::OrfTable
//! [`MaskConfig`]: config::MaskConfig

pub mod config;
pub mod interval;
pub mod orf;
