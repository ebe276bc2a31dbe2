use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use crate::bgc::discover_cluster_files;
use crate::bgc::index::BgcIndex;
use crate::cli::{Cli, OutputFormat};
use crate::core::config::MaskConfig;
use crate::masking::splitter::split_table;
use crate::parsing::fasta::{parse_orf_file, FastaReader};
use crate::parsing::genbank::GenBankReader;

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub annotation_files: usize,
    pub annotation_records: usize,
    pub bgc_scaffolds: usize,
    pub orfs: usize,
    pub rows: usize,
    pub masked: usize,
    pub unmasked: usize,
    pub masked_path: String,
    pub unmasked_path: String,
}

/// Execute a masking run and print its summary
///
/// # Errors
///
/// Returns an error if any input cannot be read or parsed, or the table split fails.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.to_config();
    let summary = execute(&config)?;

    match cli.format {
        OutputFormat::Text => println!(
            "Processed {} annotation files covering {} scaffolds with BGCs: {} rows masked, {} rows unmasked",
            summary.annotation_files, summary.bgc_scaffolds, summary.masked, summary.unmasked
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string(&summary)?),
    }

    Ok(())
}

/// Build both lookups, then split the lineage table
///
/// # Errors
///
/// Returns an error if any input cannot be read or parsed, or the table split fails.
pub fn execute(config: &MaskConfig) -> anyhow::Result<RunSummary> {
    let files = discover_cluster_files(&config.bgc_dir)?;
    if files.is_empty() {
        warn!(
            "No *cluster*.gbk files found in {}; every row will be unmasked",
            config.bgc_dir.display()
        );
    }

    let bgcs = BgcIndex::from_files(&GenBankReader, &files, &config.feature_types)
        .context("Failed to load BGC annotations")?;

    let orfs = parse_orf_file(&FastaReader, &config.orf_fasta).with_context(|| {
        format!("Failed to parse ORF FASTA {}", config.orf_fasta.display())
    })?;
    info!("Loaded {} ORFs", orfs.len());

    let outputs = config.output_paths();
    let outcome = split_table(&config.lineage_table, &orfs, &bgcs, &outputs).with_context(|| {
        format!(
            "Failed to split lineage table {}",
            config.lineage_table.display()
        )
    })?;

    Ok(RunSummary {
        annotation_files: bgcs.file_count(),
        annotation_records: bgcs.record_count(),
        bgc_scaffolds: bgcs.scaffold_count(),
        orfs: orfs.len(),
        rows: outcome.rows,
        masked: outcome.masked_rows,
        unmasked: outcome.unmasked_rows,
        masked_path: outputs.masked.display().to_string(),
        unmasked_path: outputs.unmasked.display().to_string(),
    })
}
