use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::interval::Interval;
use crate::parsing::genbank::GenBankRecord;
use crate::parsing::{ParseError, RecordReader};

use super::BgcError;

/// BGC intervals grouped by scaffold
#[derive(Debug, Default, Clone)]
pub struct BgcIndex {
    /// Index: scaffold description -> intervals, in the order they were added
    by_scaffold: HashMap<String, Vec<Interval>>,

    /// Number of annotation records that contributed an interval
    record_count: usize,

    /// Number of annotation files read
    file_count: usize,
}

impl BgcIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from annotation files.
    ///
    /// Every record must carry at least one feature whose key is listed in
    /// `feature_types`; the first such feature in file order supplies the
    /// interval. Intervals for the same scaffold accumulate across records and
    /// files.
    ///
    /// # Errors
    ///
    /// Returns `BgcError::Parse` if a file cannot be read or parsed, or if a
    /// record has no cluster feature.
    pub fn from_files<R>(
        reader: &R,
        paths: &[PathBuf],
        feature_types: &[String],
    ) -> Result<Self, BgcError>
    where
        R: RecordReader<Record = GenBankRecord>,
    {
        let mut index = Self::new();

        for path in paths {
            let records = reader.read_path(path)?;
            for record in &records {
                index.add_record(record, path, feature_types)?;
            }
            index.file_count += 1;
        }

        info!(
            "Processed {} annotation records from {} files covering {} scaffolds",
            index.record_count,
            index.file_count,
            index.scaffold_count()
        );

        Ok(index)
    }

    /// Register the cluster interval of one record
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingClusterFeature` if the record has no feature
    /// of a listed type.
    pub fn add_record(
        &mut self,
        record: &GenBankRecord,
        path: &Path,
        feature_types: &[String],
    ) -> Result<(), ParseError> {
        let mut clusters = record.features_of(feature_types);

        let cluster = clusters
            .next()
            .ok_or_else(|| ParseError::MissingClusterFeature {
                record: record.name.clone(),
                path: path.display().to_string(),
                expected: feature_types.join("/"),
            })?;

        let extra = clusters.count();
        if extra > 0 {
            debug!(
                "Record '{}' in {} has {extra} additional cluster features; using the first",
                record.name,
                path.display()
            );
        }

        debug!(
            "BGC {} ({}) on scaffold '{}'",
            cluster.location,
            cluster.qualifier("product").unwrap_or("unknown product"),
            record.description
        );

        self.insert(record.description.clone(), cluster.location);
        self.record_count += 1;
        Ok(())
    }

    /// Append an interval to a scaffold's list
    pub fn insert(&mut self, scaffold: impl Into<String>, interval: Interval) {
        self.by_scaffold
            .entry(scaffold.into())
            .or_default()
            .push(interval);
    }

    /// BGC intervals registered for a scaffold, empty if none
    pub fn regions(&self, scaffold: &str) -> &[Interval] {
        self.by_scaffold
            .get(scaffold)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct scaffolds with at least one BGC
    pub fn scaffold_count(&self) -> usize {
        self.by_scaffold.len()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::genbank::GenBankReader;
    use tempfile::TempDir;

    fn keys() -> Vec<String> {
        vec!["cluster".to_string(), "region".to_string()]
    }

    fn write_gbk(dir: &TempDir, name: &str, scaffold: &str, location: &str) -> PathBuf {
        let path = dir.path().join(name);
        let content = format!(
            "LOCUS       {scaffold} 1000 bp DNA\n\
             DEFINITION  {scaffold}\n\
             FEATURES             Location/Qualifiers\n     \
             cluster         {location}\n                     \
             /product=\"nrps\"\n\
             //\n"
        );
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_regions_accumulate_across_files() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            write_gbk(&dir, "s1.cluster001.gbk", "s1", "100..200"),
            write_gbk(&dir, "s1.cluster002.gbk", "s1", "500..600"),
            write_gbk(&dir, "s2.cluster001.gbk", "s2", "1..50"),
        ];

        let index = BgcIndex::from_files(&GenBankReader, &files, &keys()).unwrap();
        assert_eq!(index.file_count(), 3);
        assert_eq!(index.record_count(), 3);
        assert_eq!(index.scaffold_count(), 2);
        assert_eq!(
            index.regions("s1"),
            &[
                Interval::new(100, 200).unwrap(),
                Interval::new(500, 600).unwrap()
            ]
        );
        assert_eq!(index.regions("s2").len(), 1);
        assert!(index.regions("s3").is_empty());
    }

    #[test]
    fn test_missing_cluster_feature() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s1.cluster001.gbk");
        std::fs::write(
            &path,
            "LOCUS       s1 1000 bp DNA\nDEFINITION  s1\nFEATURES             Location/Qualifiers\n     CDS             1..90\n//\n",
        )
        .unwrap();

        let err = BgcIndex::from_files(&GenBankReader, &[path], &keys()).unwrap_err();
        assert!(matches!(
            err,
            BgcError::Parse(ParseError::MissingClusterFeature { .. })
        ));
        assert!(err.to_string().contains("cluster/region"));
    }

    #[test]
    fn test_first_cluster_feature_wins() {
        let text = "LOCUS       s1 1000 bp DNA\nDEFINITION  s1\nFEATURES             Location/Qualifiers\n     region          10..20\n     cluster         30..40\n//\n";
        let records = crate::parsing::genbank::parse_genbank_text(text).unwrap();

        let mut index = BgcIndex::new();
        index
            .add_record(&records[0], Path::new("s1.gbk"), &keys())
            .unwrap();
        assert_eq!(index.regions("s1"), &[Interval::new(10, 20).unwrap()]);
    }

    #[test]
    fn test_custom_feature_types() {
        let dir = TempDir::new().unwrap();
        let files = vec![write_gbk(&dir, "s1.cluster001.gbk", "s1", "100..200")];

        let only_regions = vec!["region".to_string()];
        assert!(BgcIndex::from_files(&GenBankReader, &files, &only_regions).is_err());
    }

    #[test]
    fn test_no_files() {
        let index = BgcIndex::from_files(&GenBankReader, &[], &keys()).unwrap();
        assert_eq!(index.scaffold_count(), 0);
        assert_eq!(index.file_count(), 0);
    }
}
