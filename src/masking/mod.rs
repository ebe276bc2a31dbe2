//! Splitting a lineage table by BGC membership.
//!
//! Each row of the lineage table names an ORF in its first column. The ORF's
//! scaffold is looked up in the [`BgcIndex`]; rows whose ORF touches a BGC
//! region go to the masked table, all others to the unmasked table.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgc_mask::bgc::index::BgcIndex;
//! use bgc_mask::core::config::output_paths_for;
//! use bgc_mask::core::orf::OrfTable;
//! use bgc_mask::masking::splitter::split_table;
//! use std::path::Path;
//!
//! let table = Path::new("sample.lca.tsv");
//! let outcome = split_table(
//!     table,
//!     &OrfTable::new(),
//!     &BgcIndex::new(),
//!     &output_paths_for(table, None),
//! )
//! .unwrap();
//! assert!(outcome.masked.is_empty());
//! ```
//!
//! [`BgcIndex`]: crate::bgc::index::BgcIndex

pub mod splitter;

pub use splitter::{Placement, SplitError, SplitOutcome};
