//! Command-line interface for bgc-mask.
//!
//! ## Usage
//!
//! ```text
//! # Split a lineage table using antiSMASH output and Prodigal ORFs
//! bgc-mask --bgc antismash_out/ --lca sample.lca.tsv --orfs sample.orfs.fna
//!
//! # Choose the output basename
//! bgc-mask --bgc antismash_out/ --lca sample.lca.tsv --orfs sample.orfs.fna --name sample1
//!
//! # JSON summary for scripting
//! bgc-mask --bgc antismash_out/ --lca sample.lca.tsv --orfs sample.orfs.fna --format json
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::core::config::MaskConfig;

pub mod split;

#[derive(Parser)]
#[command(name = "bgc-mask")]
#[command(version)]
#[command(about = "Split an ORF lineage table into inside/outside BGC tables")]
#[command(
    long_about = "bgc-mask separates the ORFs of a metagenome that fall inside biosynthetic gene cluster (BGC) regions from those outside.\n\nIt reads:\n- The BGC regions of each scaffold from annotation output (*cluster*.gbk)\n- ORF coordinates from the headers of a Prodigal-style ORF FASTA\n- A lineage table whose first column is the ORF identifier\n\nand writes <name>.masked.tsv (rows inside a BGC) and <name>.unmasked.tsv (all other rows) next to the lineage table."
)]
pub struct Cli {
    /// Directory containing annotation output (*cluster*.gbk files)
    #[arg(long = "bgc", value_name = "DIR")]
    pub bgc_dir: PathBuf,

    /// Lineage table; the first column is the ORF identifier
    #[arg(long = "lca", value_name = "FILE")]
    pub lineage_table: PathBuf,

    /// ORF FASTA whose headers carry start/end/gc_cont (may be gzipped)
    #[arg(long = "orfs", value_name = "FILE")]
    pub orf_fasta: PathBuf,

    /// Basename for the output tables (defaults to the lineage table's name)
    #[arg(long)]
    pub name: Option<String>,

    /// GenBank feature types that mark a BGC region
    #[arg(
        long = "feature-type",
        value_name = "TYPE",
        value_delimiter = ',',
        default_value = "cluster,region"
    )]
    pub feature_types: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Resolve the parsed arguments into a run configuration
    pub fn to_config(&self) -> MaskConfig {
        let config = MaskConfig::new(&self.bgc_dir, &self.lineage_table, &self.orf_fasta)
            .with_feature_types(self.feature_types.clone());
        match &self.name {
            Some(name) => config.with_name(name),
            None => config,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
