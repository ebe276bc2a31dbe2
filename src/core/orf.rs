use std::collections::HashMap;

use serde::Serialize;

use crate::core::interval::Interval;

/// A predicted open reading frame, as described by its FASTA header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrfInfo {
    /// GC content, carried through verbatim (e.g. `"0.55"`)
    pub gc_content: String,

    /// Location on the parent scaffold
    pub location: Interval,
}

/// All ORFs of a FASTA file, keyed by record name
#[derive(Debug, Default, Clone)]
pub struct OrfTable {
    orfs: HashMap<String, OrfInfo>,
}

impl OrfTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an ORF. Returns the previous entry if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, info: OrfInfo) -> Option<OrfInfo> {
        self.orfs.insert(name.into(), info)
    }

    pub fn get(&self, name: &str) -> Option<&OrfInfo> {
        self.orfs.get(name)
    }

    pub fn len(&self) -> usize {
        self.orfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orfs.is_empty()
    }
}

/// Derive the scaffold name from an ORF identifier of the form `<scaffold>_<index>`.
///
/// Only the last `_` separated component is removed, so scaffold names that
/// themselves contain underscores survive intact. An identifier without any `_`
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use bgc_mask::core::orf::scaffold_of;
///
/// assert_eq!(scaffold_of("NODE_12_length_5000_cov_3.2_7"), "NODE_12_length_5000_cov_3.2");
/// assert_eq!(scaffold_of("contig"), "contig");
/// ```
#[must_use]
pub fn scaffold_of(orf_id: &str) -> &str {
    orf_id.rsplit_once('_').map_or(orf_id, |(scaffold, _)| scaffold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_of() {
        assert_eq!(scaffold_of("scaffold1_3"), "scaffold1");
        assert_eq!(scaffold_of("k141_2217_12"), "k141_2217");
        assert_eq!(scaffold_of("_5"), "");
        assert_eq!(scaffold_of("noindex"), "noindex");
    }

    #[test]
    fn test_orf_table_insert_reports_duplicates() {
        let info = OrfInfo {
            gc_content: "0.5".to_string(),
            location: Interval::new(1, 90).unwrap(),
        };

        let mut table = OrfTable::new();
        assert!(table.is_empty());
        assert!(table.insert("s_1", info.clone()).is_none());
        assert_eq!(table.insert("s_1", info.clone()), Some(info));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("s_1").unwrap().gc_content, "0.5");
        assert!(table.get("s_2").is_none());
    }
}
