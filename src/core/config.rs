use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// GenBank feature keys that mark a BGC region by default.
/// antiSMASH 4 writes `cluster`, antiSMASH 5 and later write `region`.
pub const DEFAULT_FEATURE_TYPES: &[&str] = &["cluster", "region"];

pub const MASKED_SUFFIX: &str = ".masked.tsv";
pub const UNMASKED_SUFFIX: &str = ".unmasked.tsv";

/// Everything a masking run needs, resolved once from the command line.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// Directory holding the annotation (GenBank) cluster files
    pub bgc_dir: PathBuf,

    /// Lineage table whose rows are split
    pub lineage_table: PathBuf,

    /// ORF FASTA with coordinate-bearing headers
    pub orf_fasta: PathBuf,

    /// Output basename override; the table's file stem is used otherwise
    pub name: Option<String>,

    /// Feature keys accepted as BGC regions
    pub feature_types: Vec<String>,
}

/// Paths of the two tables produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub masked: PathBuf,
    pub unmasked: PathBuf,
}

impl MaskConfig {
    pub fn new(
        bgc_dir: impl Into<PathBuf>,
        lineage_table: impl Into<PathBuf>,
        orf_fasta: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bgc_dir: bgc_dir.into(),
            lineage_table: lineage_table.into(),
            orf_fasta: orf_fasta.into(),
            name: None,
            feature_types: DEFAULT_FEATURE_TYPES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_feature_types(mut self, feature_types: Vec<String>) -> Self {
        self.feature_types = feature_types;
        self
    }

    /// Output tables live next to the lineage table
    #[must_use]
    pub fn output_paths(&self) -> OutputPaths {
        output_paths_for(&self.lineage_table, self.name.as_deref())
    }
}

/// Derive the masked/unmasked output paths for a lineage table.
///
/// # Examples
///
/// ```
/// use bgc_mask::core::config::output_paths_for;
/// use std::path::{Path, PathBuf};
///
/// let paths = output_paths_for(Path::new("/data/sample.lca.tsv"), None);
/// assert_eq!(paths.masked, PathBuf::from("/data/sample.lca.masked.tsv"));
///
/// let paths = output_paths_for(Path::new("/data/sample.lca.tsv"), Some("run1"));
/// assert_eq!(paths.unmasked, PathBuf::from("/data/run1.unmasked.tsv"));
/// ```
#[must_use]
pub fn output_paths_for(table: &Path, name: Option<&str>) -> OutputPaths {
    let dir = table.parent().unwrap_or_else(|| Path::new(""));
    let base: &OsStr = match name {
        Some(name) => OsStr::new(name),
        None => table.file_stem().unwrap_or_else(|| OsStr::new("lineage")),
    };

    let with_suffix = |suffix: &str| {
        let mut file_name = OsString::from(base);
        file_name.push(suffix);
        dir.join(file_name)
    };

    OutputPaths {
        masked: with_suffix(MASKED_SUFFIX),
        unmasked: with_suffix(UNMASKED_SUFFIX),
    }
}
