//! BGC region lookup built from annotation output.
//!
//! The annotation tool writes one GenBank file per detected cluster, named like
//! `k141_2217.cluster001.gbk` or `NODE_4.region002.gbk`. Files whose name
//! contains `cluster` and ends in `.gbk` are picked up from the output
//! directory; each record contributes the interval of its cluster feature to
//! the scaffold named by the record's description.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bgc_mask::bgc::{discover_cluster_files, index::BgcIndex};
//! use bgc_mask::parsing::genbank::GenBankReader;
//! use std::path::Path;
//!
//! let files = discover_cluster_files(Path::new("antismash_out")).unwrap();
//! let keys = vec!["cluster".to_string()];
//! let index = BgcIndex::from_files(&GenBankReader, &files, &keys).unwrap();
//! println!("{} scaffolds carry BGCs", index.scaffold_count());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parsing::ParseError;

pub mod index;

/// Substring an annotation file name must contain
pub const CLUSTER_FILE_MARKER: &str = "cluster";

/// Extension of annotation record files
pub const CLUSTER_FILE_EXTENSION: &str = "gbk";

#[derive(Error, Debug)]
pub enum BgcError {
    #[error("Failed to read annotation directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Find the annotation files of a directory (`<dir>/*cluster*.gbk`).
///
/// Paths are returned sorted so that interval lists are built in a stable order.
///
/// # Errors
///
/// Returns `BgcError::Io` if the directory cannot be listed.
pub fn discover_cluster_files(dir: &Path) -> Result<Vec<PathBuf>, BgcError> {
    let io_err = |source: std::io::Error| BgcError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if is_cluster_file(&path) && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a path names an annotation cluster file
pub fn is_cluster_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // Shell globs skip hidden files
    if file_name.starts_with('.') {
        return false;
    }
    let Some(stem) = file_name.strip_suffix(CLUSTER_FILE_EXTENSION) else {
        return false;
    };
    stem.ends_with('.') && stem.contains(CLUSTER_FILE_MARKER)
}
